//! # Catalog Repositories
//!
//! Read-mostly access to categories and products, plus the insert path that
//! derives deduplicated slugs.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use shop_core::{slug, Category, NewProduct, Price, Product};

/// Products per listing page
pub const PAGE_SIZE: u32 = 12;

/// Repository for category rows
pub struct CategoryStore<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CategoryStore<'a> {
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All categories, alphabetical
    pub async fn all(&self) -> Result<Vec<Category>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM categories ORDER BY name")
            .fetch_all(self.pool)
            .await
    }

    /// Look up a category by slug
    pub async fn by_slug(&self, slug: &str) -> Result<Option<Category>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM categories WHERE slug = ?")
            .bind(slug)
            .fetch_optional(self.pool)
            .await
    }

    /// Insert a category, deriving its slug from the name
    pub async fn create(&self, name: &str) -> Result<Category, sqlx::Error> {
        let slug = slug::slugify(name);
        let id = sqlx::query("INSERT INTO categories (name, slug) VALUES (?, ?)")
            .bind(name)
            .bind(&slug)
            .execute(self.pool)
            .await?
            .last_insert_rowid();

        Ok(Category {
            id,
            name: name.to_string(),
            slug,
        })
    }

    /// Fetch by derived slug, inserting when absent
    pub async fn get_or_create(&self, name: &str) -> Result<Category, sqlx::Error> {
        if let Some(existing) = self.by_slug(&slug::slugify(name)).await? {
            return Ok(existing);
        }
        self.create(name).await
    }

    /// Delete a category. Products referencing it keep existing with a
    /// nulled category reference.
    pub async fn delete(&self, id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(())
    }
}

/// Listing filter for the shop pages
#[derive(Debug, Default, Clone)]
pub struct ListFilter {
    /// Restrict to one category
    pub category_id: Option<i64>,
    /// Case-insensitive name-substring search
    pub query: Option<String>,
}

/// One page of the product listing
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub products: Vec<Product>,
    /// Page actually served (requests past the end clamp to the last page)
    pub page: u32,
    pub total_pages: u32,
    pub total: i64,
}

/// Repository for product rows
pub struct ProductStore<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductStore<'a> {
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a product, deriving a unique slug from the name.
    ///
    /// Slug collisions get a numeric suffix: the second "Charizard" becomes
    /// `charizard-1`, the third `charizard-2`, and so on.
    pub async fn create(&self, new: NewProduct) -> Result<Product, sqlx::Error> {
        let base = slug::slugify(&new.name);
        let mut candidate = base.clone();
        let mut counter = 1u32;

        while self.slug_exists(&candidate).await? {
            candidate = slug::with_suffix(&base, counter);
            counter += 1;
        }

        let now = Utc::now();
        let id = sqlx::query(
            r#"
            INSERT INTO products
                (category_id, name, slug, description, price_cents, currency, image,
                 is_preorder, product_type, available, stock, created, updated)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(new.category_id)
        .bind(&new.name)
        .bind(&candidate)
        .bind(&new.description)
        .bind(new.price.cents())
        .bind(&new.currency)
        .bind(&new.image)
        .bind(new.is_preorder)
        .bind(new.product_type)
        .bind(new.available)
        .bind(new.stock)
        .bind(now)
        .bind(now)
        .execute(self.pool)
        .await?
        .last_insert_rowid();

        Ok(Product {
            id,
            category_id: new.category_id,
            name: new.name,
            slug: candidate,
            description: new.description,
            price_cents: new.price.cents(),
            currency: new.currency,
            image: new.image,
            is_preorder: new.is_preorder,
            product_type: new.product_type,
            available: new.available,
            stock: new.stock,
            created: now,
            updated: now,
        })
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE slug = ?")
            .bind(slug)
            .fetch_one(self.pool)
            .await?;
        Ok(count > 0)
    }

    /// Look up any product by id
    pub async fn by_id(&self, id: i64) -> Result<Option<Product>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM products WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await
    }

    /// Look up an available product by slug; hidden products do not resolve
    pub async fn available_by_slug(&self, slug: &str) -> Result<Option<Product>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM products WHERE slug = ? AND available = 1")
            .bind(slug)
            .fetch_optional(self.pool)
            .await
    }

    /// Newest available products for the home page
    pub async fn featured(&self, limit: u32) -> Result<Vec<Product>, sqlx::Error> {
        sqlx::query_as(
            "SELECT * FROM products WHERE available = 1 ORDER BY created DESC, id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await
    }

    /// One page of available products, newest first.
    ///
    /// Page numbers are 1-based; out-of-range pages clamp to the nearest
    /// valid page instead of erroring.
    pub async fn list(
        &self,
        filter: &ListFilter,
        page: u32,
    ) -> Result<ProductPage, sqlx::Error> {
        let total: i64 = {
            let mut qb = QueryBuilder::<Sqlite>::new(
                "SELECT COUNT(*) FROM products WHERE available = 1",
            );
            push_filter(&mut qb, filter);
            qb.build_query_scalar().fetch_one(self.pool).await?
        };

        let total_pages = ((total.max(0) as u32).div_ceil(PAGE_SIZE)).max(1);
        let page = page.clamp(1, total_pages);
        let offset = (page - 1) * PAGE_SIZE;

        let mut qb =
            QueryBuilder::<Sqlite>::new("SELECT * FROM products WHERE available = 1");
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY created DESC, id DESC LIMIT ");
        qb.push_bind(PAGE_SIZE);
        qb.push(" OFFSET ");
        qb.push_bind(offset);

        let products = qb.build_query_as::<Product>().fetch_all(self.pool).await?;

        Ok(ProductPage {
            products,
            page,
            total_pages,
            total,
        })
    }

    /// Update a product's unit price
    pub async fn update_price(&self, id: i64, price: Price) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE products SET price_cents = ?, updated = ? WHERE id = ?")
            .bind(price.cents())
            .bind(Utc::now())
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(())
    }

    /// Delete a product. Fails while any order item references it.
    pub async fn delete(&self, id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(())
    }
}

fn push_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &ListFilter) {
    if let Some(category_id) = filter.category_id {
        qb.push(" AND category_id = ");
        qb.push_bind(category_id);
    }
    if let Some(query) = filter.query.clone() {
        // instr() avoids LIKE wildcard handling for user input
        qb.push(" AND instr(lower(name), lower(");
        qb.push_bind(query);
        qb.push(")) > 0");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_schema, memory_pool};
    use shop_core::ProductKind;

    async fn test_pool() -> SqlitePool {
        let pool = memory_pool().await.expect("pool");
        init_schema(&pool).await.expect("schema");
        pool
    }

    #[tokio::test]
    async fn test_slug_collision_gets_suffix() {
        let pool = test_pool().await;
        let store = ProductStore::new(&pool);

        let first = store
            .create(NewProduct::new("Charizard", Price::from_major(129.99)))
            .await
            .unwrap();
        let second = store
            .create(NewProduct::new("Charizard", Price::from_major(89.99)))
            .await
            .unwrap();
        let third = store
            .create(NewProduct::new("Charizard", Price::from_major(49.99)))
            .await
            .unwrap();

        assert_eq!(first.slug, "charizard");
        assert_eq!(second.slug, "charizard-1");
        assert_eq!(third.slug, "charizard-2");
    }

    #[tokio::test]
    async fn test_available_by_slug_hides_unavailable() {
        let pool = test_pool().await;
        let store = ProductStore::new(&pool);

        store
            .create(NewProduct::new("Hidden Gem", Price::from_cents(100)).unavailable())
            .await
            .unwrap();

        assert!(store.available_by_slug("hidden-gem").await.unwrap().is_none());
        // Still reachable by id for internal lookups
        assert!(store.by_id(1).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let pool = test_pool().await;
        let store = ProductStore::new(&pool);

        store
            .create(NewProduct::new("Charizard ex", Price::from_cents(100)))
            .await
            .unwrap();
        store
            .create(NewProduct::new("Pikachu", Price::from_cents(100)))
            .await
            .unwrap();

        let filter = ListFilter {
            query: Some("CHAR".to_string()),
            ..Default::default()
        };
        let page = store.list(&filter, 1).await.unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.products[0].name, "Charizard ex");
    }

    #[tokio::test]
    async fn test_pagination_clamps_out_of_range() {
        let pool = test_pool().await;
        let store = ProductStore::new(&pool);

        for i in 0..15 {
            store
                .create(
                    NewProduct::new(format!("Card {}", i), Price::from_cents(100))
                        .with_kind(ProductKind::Single),
                )
                .await
                .unwrap();
        }

        let page = store.list(&ListFilter::default(), 1).await.unwrap();
        assert_eq!(page.total, 15);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.products.len(), PAGE_SIZE as usize);

        let beyond = store.list(&ListFilter::default(), 99).await.unwrap();
        assert_eq!(beyond.page, 2);
        assert_eq!(beyond.products.len(), 3);
    }

    #[tokio::test]
    async fn test_category_delete_nulls_product_reference() {
        let pool = test_pool().await;
        let categories = CategoryStore::new(&pool);
        let products = ProductStore::new(&pool);

        let category = categories.create("Booster Boxes").await.unwrap();
        assert_eq!(category.slug, "booster-boxes");

        let product = products
            .create(
                NewProduct::new("Surging Sparks Box", Price::from_cents(100))
                    .with_category(category.id),
            )
            .await
            .unwrap();
        assert_eq!(product.category_id, Some(category.id));

        categories.delete(category.id).await.unwrap();

        let reloaded = products.by_id(product.id).await.unwrap().unwrap();
        assert_eq!(reloaded.category_id, None);
    }
}

//! # Storage Layer
//!
//! SQLite-backed persistence for the catalog and the order ledger. Queries
//! are runtime-checked (`query_as` + `FromRow` row types in `shop-core`);
//! each entity gets a small repository struct borrowing the pool.

pub mod orders;
pub mod payments;
pub mod products;

pub use orders::OrderStore;
pub use payments::PaymentStore;
pub use products::{CategoryStore, ListFilter, ProductPage, ProductStore};

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use shop_core::{NewProduct, Price, SeedCatalog};

/// Create the connection pool
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
}

/// A single-connection in-memory pool for tests.
///
/// One connection only: every connection to `sqlite::memory:` would otherwise
/// see its own private database.
pub async fn memory_pool() -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
}

/// Create the tables if they do not exist yet.
///
/// Schema management is deliberately minimal; there is no migration
/// framework in front of this store.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            slug TEXT NOT NULL UNIQUE
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            category_id INTEGER REFERENCES categories(id) ON DELETE SET NULL,
            name TEXT NOT NULL,
            slug TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL DEFAULT '',
            price_cents INTEGER NOT NULL,
            currency TEXT NOT NULL DEFAULT '$',
            image TEXT NOT NULL DEFAULT '',
            is_preorder INTEGER NOT NULL DEFAULT 0,
            product_type TEXT NOT NULL DEFAULT 'single',
            available INTEGER NOT NULL DEFAULT 1,
            stock INTEGER NOT NULL DEFAULT 0,
            created TEXT NOT NULL,
            updated TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            full_name TEXT NOT NULL,
            email TEXT NOT NULL,
            address TEXT NOT NULL,
            total_cents INTEGER NOT NULL DEFAULT 0,
            paid INTEGER NOT NULL DEFAULT 0,
            created TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS order_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            order_id INTEGER NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
            product_id INTEGER NOT NULL REFERENCES products(id) ON DELETE RESTRICT,
            price_cents INTEGER NOT NULL,
            quantity INTEGER NOT NULL DEFAULT 1
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS bitcoin_payments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            order_id TEXT NOT NULL,
            charge_id TEXT NOT NULL,
            amount_cents INTEGER NOT NULL,
            currency TEXT NOT NULL DEFAULT 'USD',
            status TEXT NOT NULL,
            created TEXT NOT NULL
        )
        "#,
    ];

    for statement in statements {
        sqlx::query(statement).execute(pool).await?;
    }

    Ok(())
}

/// Populate an empty catalog from the seed file.
///
/// A non-empty products table leaves the store untouched; the seed file only
/// bootstraps a fresh install. Returns the number of products inserted.
pub async fn seed_if_empty(
    pool: &SqlitePool,
    catalog: &SeedCatalog,
) -> Result<u64, sqlx::Error> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        return Ok(0);
    }

    let categories = CategoryStore::new(pool);
    let products = ProductStore::new(pool);

    let mut category_ids = std::collections::HashMap::new();
    for seed in &catalog.categories {
        let category = categories.get_or_create(&seed.name).await?;
        category_ids.insert(seed.name.clone(), category.id);
    }

    let mut inserted = 0;
    for seed in &catalog.products {
        let mut new = NewProduct::new(&seed.name, Price::from_major(seed.price))
            .with_description(&seed.description)
            .with_kind(seed.kind)
            .with_stock(seed.stock)
            .with_image(&seed.image);
        new.currency = seed.currency.clone();
        new.is_preorder = seed.preorder;
        new.available = seed.available;
        new.category_id = seed
            .category
            .as_ref()
            .and_then(|name| category_ids.get(name))
            .copied();

        products.create(new).await?;
        inserted += 1;
    }

    Ok(inserted)
}

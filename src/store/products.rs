//! Product Store
//!
//! Owns the `products` table. The table is created and seeded the first
//! time a connection is made to a path where no database file exists yet,
//! or where the file exists but the table does not.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use tracing::{debug, info};

use crate::error::{Result, ShopError};
use crate::models::{NewProduct, ProductRecord};
use crate::store::open_connection;

/// Initial catalog inserted once, when the product table is first created.
///
/// Tuples are (name, description, cost, qty).
pub const SEED_PRODUCTS: &[(&str, &str, f64, i64)] = &[
    (
        "Backpack",
        "A durable and stylish backpack for daily use.",
        800.0,
        10,
    ),
    (
        "Wireless Mouse",
        "A sleek and ergonomic wireless mouse with a long battery life.",
        800.0,
        20,
    ),
    (
        "Mechanical Keyboard",
        "A tactile keyboard with hot-swappable switches.",
        2500.0,
        15,
    ),
    (
        "USB-C Hub",
        "A seven-port hub with HDMI output and card reader.",
        1200.0,
        25,
    ),
    (
        "Water Bottle",
        "An insulated steel bottle that keeps drinks cold for a day.",
        450.0,
        40,
    ),
];

const SELECT_COLUMNS: &str = "SELECT id, name, description, cost, qty FROM products";

// == Product Store ==
/// SQLite-backed product table at a fixed path.
#[derive(Debug, Clone)]
pub struct ProductStore {
    path: PathBuf,
}

impl ProductStore {
    // == Constructor ==
    /// Creates a store for `path` without touching the filesystem.
    ///
    /// The first operation against a missing file creates and seeds it.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store and initializes its database file right away.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(path);
        store.connect()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // == List ==
    /// Fetches all products ordered by id.
    pub fn list_products(&self) -> Result<Vec<ProductRecord>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!("{} ORDER BY id", SELECT_COLUMNS))?;
        let records = stmt
            .query_map([], map_product_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        debug!(count = records.len(), "listed products");
        Ok(records)
    }

    // == Add ==
    /// Inserts a product; the store assigns its id.
    pub fn add_product(&self, product: &NewProduct) -> Result<()> {
        if let Some(msg) = product.validate() {
            return Err(ShopError::Validation(msg));
        }

        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO products (name, description, cost, qty) VALUES (?1, ?2, ?3, ?4)",
            params![product.name, product.description, product.cost, product.qty],
        )?;
        debug!(product_id = conn.last_insert_rowid(), name = %product.name, "added product");
        Ok(())
    }

    // == Get ==
    /// Retrieves a product by id, or None if no row matches.
    pub fn get_product(&self, id: i64) -> Result<Option<ProductRecord>> {
        let conn = self.connect()?;
        let record = conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                params![id],
                map_product_row,
            )
            .optional()?;
        Ok(record)
    }

    // == Update Quantity ==
    /// Sets the stock quantity of a product.
    ///
    /// Returns the number of rows affected (0 when no such product).
    pub fn update_qty(&self, id: i64, qty: i64) -> Result<usize> {
        if qty < 0 {
            return Err(ShopError::Validation(
                "Quantity cannot be negative".to_string(),
            ));
        }

        let conn = self.connect()?;
        let rows = conn.execute(
            "UPDATE products SET qty = ?1 WHERE id = ?2",
            params![qty, id],
        )?;
        debug!(product_id = id, qty, rows, "updated product quantity");
        Ok(rows)
    }

    // == Update Product ==
    /// Overwrites every column of a product except its id.
    ///
    /// Returns the number of rows affected.
    pub fn update_product(&self, id: i64, product: &NewProduct) -> Result<usize> {
        if let Some(msg) = product.validate() {
            return Err(ShopError::Validation(msg));
        }

        let conn = self.connect()?;
        let rows = conn.execute(
            "UPDATE products SET name = ?1, description = ?2, cost = ?3, qty = ?4 WHERE id = ?5",
            params![product.name, product.description, product.cost, product.qty, id],
        )?;
        debug!(product_id = id, rows, "overwrote product");
        Ok(rows)
    }

    // == Delete ==
    /// Removes a product; deleting a missing id affects 0 rows.
    pub fn delete_product(&self, id: i64) -> Result<usize> {
        let conn = self.connect()?;
        let rows = conn.execute("DELETE FROM products WHERE id = ?1", params![id])?;
        debug!(product_id = id, rows, "deleted product");
        Ok(rows)
    }

    /// Opens a connection, creating and seeding the table when the file is
    /// new or holds no `products` table yet.
    fn connect(&self) -> Result<Connection> {
        let exists = self.path.exists();
        let mut conn = open_connection(&self.path)?;
        if !exists || !has_products_table(&conn)? {
            initialize_catalog(&mut conn)?;
        }
        Ok(conn)
    }
}

fn has_products_table(conn: &Connection) -> Result<bool> {
    let present = conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'products')",
        [],
        |row| row.get(0),
    )?;
    Ok(present)
}

/// Creates and seeds the table under the write lock.
///
/// Concurrent first callers queue on the immediate transaction; whoever
/// arrives after the commit finds the table and leaves it alone.
fn initialize_catalog(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    if has_products_table(&tx)? {
        return Ok(());
    }

    tx.execute_batch(
        "CREATE TABLE products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            cost REAL NOT NULL,
            qty INTEGER DEFAULT 0
        );",
    )?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO products (name, description, cost, qty) VALUES (?1, ?2, ?3, ?4)",
        )?;
        for (name, description, cost, qty) in SEED_PRODUCTS {
            stmt.execute(params![name, description, cost, qty])?;
        }
    }
    tx.commit()?;
    info!(count = SEED_PRODUCTS.len(), "created products table with seed data");
    Ok(())
}

fn map_product_row(row: &Row<'_>) -> rusqlite::Result<ProductRecord> {
    Ok(ProductRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        cost: row.get(3)?,
        qty: row.get::<_, Option<i64>>(4)?.unwrap_or(0),
    })
}

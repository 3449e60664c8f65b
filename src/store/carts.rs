//! Cart Store
//!
//! Owns the `carts` table. Each row holds a JSON array of product ids for a
//! username; a user normally has a single row, which `add_to_cart` creates on
//! first use and appends to afterwards. Rows imported with `insert_row` can
//! give a user several rows, which are read back in id order.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, Row, TransactionBehavior};
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::CartRow;
use crate::store::open_connection;

// == Cart Store ==
/// SQLite-backed cart table at a fixed path.
#[derive(Debug, Clone)]
pub struct CartStore {
    path: PathBuf,
}

impl CartStore {
    // == Constructor ==
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store and makes sure its table exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(path);
        store.connect()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // == Get ==
    /// Returns every row for `username` in id order; empty if none.
    pub fn get_cart(&self, username: &str) -> Result<Vec<CartRow>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, username, contents, cost FROM carts WHERE username = ?1 ORDER BY id",
        )?;
        let rows = stmt
            .query_map(params![username], map_cart_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    // == Add ==
    /// Appends `product_id` to the user's first decodable row, creating a
    /// row if the user has none or none of theirs decode.
    ///
    /// Rows whose contents do not decode are left alone and skipped, the same
    /// way `remove_from_cart` scans.
    pub fn add_to_cart(&self, username: &str, product_id: i64) -> Result<()> {
        let mut conn = self.connect()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let rows = {
            let mut stmt = tx.prepare(
                "SELECT id, username, contents, cost FROM carts WHERE username = ?1 ORDER BY id",
            )?;
            let rows = stmt
                .query_map(params![username], map_cart_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
        };

        let target = rows.iter().find_map(|row| match row.product_ids() {
            Ok(ids) => Some((row.id, ids)),
            Err(err) => {
                warn!(username, cart_id = row.id, error = %err, "skipping undecodable cart row");
                None
            }
        });

        match target {
            Some((cart_id, mut ids)) => {
                ids.push(product_id);
                tx.execute(
                    "UPDATE carts SET contents = ?1 WHERE id = ?2",
                    params![serde_json::to_string(&ids)?, cart_id],
                )?;
            }
            None => {
                tx.execute(
                    "INSERT INTO carts (username, contents, cost) VALUES (?1, ?2, 0)",
                    params![username, serde_json::to_string(&[product_id])?],
                )?;
            }
        }

        tx.commit()?;
        debug!(username, product_id, "added product to cart");
        Ok(())
    }

    // == Remove ==
    /// Removes the first occurrence of `product_id`, scanning the user's rows
    /// in id order.
    ///
    /// Returns false when the product is not in the cart. Rows that do not
    /// decode are skipped.
    pub fn remove_from_cart(&self, username: &str, product_id: i64) -> Result<bool> {
        let mut conn = self.connect()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let rows = {
            let mut stmt = tx.prepare(
                "SELECT id, username, contents, cost FROM carts WHERE username = ?1 ORDER BY id",
            )?;
            let rows = stmt
                .query_map(params![username], map_cart_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
        };

        let mut removed = false;
        for row in rows {
            let mut ids = match row.product_ids() {
                Ok(ids) => ids,
                Err(err) => {
                    warn!(username, cart_id = row.id, error = %err, "skipping undecodable cart row");
                    continue;
                }
            };
            if let Some(pos) = ids.iter().position(|id| *id == product_id) {
                ids.remove(pos);
                tx.execute(
                    "UPDATE carts SET contents = ?1 WHERE id = ?2",
                    params![serde_json::to_string(&ids)?, row.id],
                )?;
                removed = true;
                break;
            }
        }

        tx.commit()?;
        debug!(username, product_id, removed, "removed product from cart");
        Ok(removed)
    }

    // == Delete ==
    /// Deletes every row of the user's cart; returns how many were deleted.
    pub fn delete_cart(&self, username: &str) -> Result<usize> {
        let conn = self.connect()?;
        let rows = conn.execute("DELETE FROM carts WHERE username = ?1", params![username])?;
        debug!(username, rows, "deleted cart");
        Ok(rows)
    }

    // == Insert Row ==
    /// Inserts a raw cart row with `contents` stored verbatim.
    ///
    /// Returns the new row id.
    pub fn insert_row(&self, username: &str, contents: &str, cost: f64) -> Result<i64> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO carts (username, contents, cost) VALUES (?1, ?2, ?3)",
            params![username, contents, cost],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn connect(&self) -> Result<Connection> {
        let conn = open_connection(&self.path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS carts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL,
                contents TEXT,
                cost REAL NOT NULL DEFAULT 0
            );
            CREATE INDEX IF NOT EXISTS idx_carts_username ON carts (username);",
        )?;
        Ok(conn)
    }
}

fn map_cart_row(row: &Row<'_>) -> rusqlite::Result<CartRow> {
    Ok(CartRow {
        id: row.get(0)?,
        username: row.get(1)?,
        contents: row.get(2)?,
        cost: row.get(3)?,
    })
}

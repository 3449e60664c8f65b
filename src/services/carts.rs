//! Cart Service
//!
//! Assembles a user's logical cart from raw cart rows and resolves every
//! product id through the product service.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{Cart, CartRow, Product};
use crate::services::ProductService;
use crate::store::CartStore;

// == Cart Service ==
#[derive(Debug)]
pub struct CartService {
    store: CartStore,
    products: Arc<ProductService>,
}

impl CartService {
    // == Constructor ==
    pub fn new(store: CartStore, products: Arc<ProductService>) -> Self {
        Self { store, products }
    }

    pub fn store(&self) -> &CartStore {
        &self.store
    }

    // == Get Cart ==
    /// Returns the products in the user's cart, in row order then in-row order.
    ///
    /// Rows whose contents are not a JSON array of ids are skipped. An id with
    /// no matching product yields a `None` slot rather than an error.
    pub fn get_cart(&self, username: &str) -> Result<Vec<Option<Product>>> {
        let rows = self.store.get_cart(username)?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = rows
            .iter()
            .filter_map(decode_row)
            .flatten()
            .collect();
        debug!(username, items = ids.len(), "resolving cart");

        ids.into_iter()
            .map(|id| self.products.get_product(id))
            .collect()
    }

    // == Load Carts ==
    /// Rebuilds each decodable cart row with its products resolved.
    pub fn load_carts(&self, username: &str) -> Result<Vec<Cart>> {
        let mut carts = Vec::new();
        for row in self.store.get_cart(username)? {
            let Some(ids) = decode_row(&row) else {
                continue;
            };
            let contents = ids
                .into_iter()
                .map(|id| self.products.get_product(id))
                .collect::<Result<Vec<_>>>()?;
            carts.push(Cart {
                id: row.id,
                username: row.username,
                contents,
                cost: row.cost,
            });
        }
        Ok(carts)
    }

    /// Adds a product to the user's cart. The id is not checked against the catalog.
    pub fn add_to_cart(&self, username: &str, product_id: i64) -> Result<()> {
        self.store.add_to_cart(username, product_id)
    }

    /// Removes one occurrence of a product; returns whether one was found.
    pub fn remove_from_cart(&self, username: &str, product_id: i64) -> Result<bool> {
        self.store.remove_from_cart(username, product_id)
    }

    /// Deletes the user's whole cart; returns the number of rows removed.
    pub fn delete_cart(&self, username: &str) -> Result<usize> {
        self.store.delete_cart(username)
    }
}

fn decode_row(row: &CartRow) -> Option<Vec<i64>> {
    match row.product_ids() {
        Ok(ids) => Some(ids),
        Err(err) => {
            warn!(username = %row.username, cart_id = row.id, error = %err, "skipping undecodable cart row");
            None
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ProductStore;
    use tempfile::TempDir;

    fn temp_service() -> (TempDir, CartService) {
        let dir = TempDir::new().unwrap();
        let products = ProductStore::open(dir.path().join("products.db")).unwrap();
        let carts = CartStore::open(dir.path().join("carts.db")).unwrap();
        let products = Arc::new(ProductService::with_capacity(products, 100));
        let service = CartService::new(carts, products);
        (dir, service)
    }

    fn ids(cart: &[Option<Product>]) -> Vec<Option<i64>> {
        cart.iter().map(|p| p.as_ref().map(|p| p.id)).collect()
    }

    #[test]
    fn test_get_cart_unknown_user() {
        let (_dir, service) = temp_service();
        assert!(service.get_cart("alice").unwrap().is_empty());
    }

    #[test]
    fn test_get_cart_concatenates_rows() {
        let (_dir, service) = temp_service();
        service.store().insert_row("alice", "[1,2]", 0.0).unwrap();
        service.store().insert_row("alice", "[3]", 0.0).unwrap();

        let cart = service.get_cart("alice").unwrap();

        assert_eq!(ids(&cart), vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_get_cart_skips_malformed_rows() {
        let (_dir, service) = temp_service();
        service.store().insert_row("alice", "definitely not json", 0.0).unwrap();
        service.store().insert_row("alice", "[2, 2]", 0.0).unwrap();

        let cart = service.get_cart("alice").unwrap();

        assert_eq!(ids(&cart), vec![Some(2), Some(2)]);
    }

    #[test]
    fn test_get_cart_keeps_holes_for_missing_products() {
        let (_dir, service) = temp_service();
        service.add_to_cart("alice", 1).unwrap();
        service.add_to_cart("alice", 4242).unwrap();
        service.add_to_cart("alice", 2).unwrap();

        let cart = service.get_cart("alice").unwrap();

        assert_eq!(ids(&cart), vec![Some(1), None, Some(2)]);
    }

    #[test]
    fn test_load_carts_rebuilds_rows() {
        let (_dir, service) = temp_service();
        service.store().insert_row("bob", "[1]", 800.0).unwrap();
        service.store().insert_row("bob", "oops", 5.0).unwrap();
        service.store().insert_row("bob", "[2, 9999]", 800.0).unwrap();

        let carts = service.load_carts("bob").unwrap();

        assert_eq!(carts.len(), 2);
        assert_eq!(carts[0].username, "bob");
        assert_eq!(carts[0].cost, 800.0);
        assert_eq!(ids(&carts[0].contents), vec![Some(1)]);
        assert_eq!(ids(&carts[1].contents), vec![Some(2), None]);
    }

    #[test]
    fn test_remove_and_delete_pass_through() {
        let (_dir, service) = temp_service();
        service.add_to_cart("alice", 1).unwrap();
        service.add_to_cart("alice", 2).unwrap();

        assert!(service.remove_from_cart("alice", 1).unwrap());
        assert_eq!(ids(&service.get_cart("alice").unwrap()), vec![Some(2)]);

        assert_eq!(service.delete_cart("alice").unwrap(), 1);
        assert!(service.get_cart("alice").unwrap().is_empty());
    }
}

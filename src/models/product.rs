//! Product models
//!
//! Defines the stored row mapping, the catalog entity and the add/update input.

use serde::{Deserialize, Serialize};

/// A product row exactly as read from the `products` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub cost: f64,
    pub qty: i64,
}

/// A catalog item with its stock quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned id, immutable once created
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Unit cost
    pub cost: f64,
    /// Units in stock
    #[serde(default)]
    pub qty: i64,
}

impl Product {
    /// Builds an entity from a stored record.
    pub fn load(record: ProductRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            cost: record.cost,
            qty: record.qty,
        }
    }
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Self::load(record)
    }
}

/// Input record for adding or overwriting a product.
///
/// # Fields
/// - `name`: must not be empty
/// - `description`: free text
/// - `cost`: unit cost, must not be negative
/// - `qty`: initial stock, must not be negative (defaults to 0)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub cost: f64,
    #[serde(default)]
    pub qty: i64,
}

impl NewProduct {
    /// Creates a new input record.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        cost: f64,
        qty: i64,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            cost,
            qty,
        }
    }

    /// Validates the record.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("Product name cannot be empty".to_string());
        }
        if self.cost.is_nan() || self.cost < 0.0 {
            return Some("Cost cannot be negative".to_string());
        }
        if self.qty < 0 {
            return Some("Quantity cannot be negative".to_string());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_load_keeps_fields() {
        let record = ProductRecord {
            id: 3,
            name: "Desk Lamp".to_string(),
            description: "LED lamp".to_string(),
            cost: 25.5,
            qty: 4,
        };
        let product = Product::load(record.clone());

        assert_eq!(product.id, record.id);
        assert_eq!(product.name, record.name);
        assert_eq!(product.description, record.description);
        assert_eq!(product.cost, record.cost);
        assert_eq!(product.qty, record.qty);
    }

    #[test]
    fn test_new_product_deserialize_default_qty() {
        let json = r#"{"name": "Pen", "description": "Blue ink", "cost": 1.5}"#;
        let product: NewProduct = serde_json::from_str(json).unwrap();
        assert_eq!(product.qty, 0);
        assert!(product.validate().is_none());
    }

    #[test]
    fn test_validate_empty_name() {
        let product = NewProduct::new("  ", "nothing", 1.0, 1);
        assert!(product.validate().is_some());
    }

    #[test]
    fn test_validate_negative_cost() {
        let product = NewProduct::new("Pen", "Blue ink", -0.5, 1);
        assert!(product.validate().is_some());
    }

    #[test]
    fn test_validate_nan_cost() {
        let product = NewProduct::new("Pen", "Blue ink", f64::NAN, 1);
        assert!(product.validate().is_some());
    }

    #[test]
    fn test_validate_negative_qty() {
        let product = NewProduct::new("Pen", "Blue ink", 1.0, -1);
        assert!(product.validate().is_some());
    }
}

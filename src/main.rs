//! Mini Shop - catalog and cart inspector
//!
//! Opens (and on first run seeds) the product and cart databases, then logs
//! the catalog. When a username is given as the first argument, that user's
//! resolved cart is logged as well.

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mini_shop::{Config, Shop};

/// Entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open both stores, seeding the catalog if the file is new
/// 4. Log the catalog and, optionally, one user's cart
/// 5. Log product cache counters
fn main() -> Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mini_shop=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: products_db={}, carts_db={}, cache_capacity={}",
        config.products_db_path.display(),
        config.carts_db_path.display(),
        config.product_cache_capacity
    );

    let shop = Shop::from_config(&config).context("Failed to open shop databases")?;

    let products = shop
        .products
        .list_products()
        .context("Failed to list products")?;
    info!("Catalog has {} products", products.len());
    for product in products {
        info!(
            id = product.id,
            qty = product.qty,
            cost = product.cost,
            "{}",
            product.name
        );
    }

    if let Some(username) = std::env::args().nth(1) {
        let cart = shop
            .carts
            .get_cart(&username)
            .with_context(|| format!("Failed to load cart for {}", username))?;
        info!("Cart for {} has {} items", username, cart.len());
        for (slot, item) in cart.iter().enumerate() {
            match item {
                Some(product) => {
                    info!(slot, id = product.id, cost = product.cost, "{}", product.name)
                }
                None => warn!(slot, "cart references a product that no longer exists"),
            }
        }
    }

    info!("Product cache: {}", shop.products.cache_stats());

    Ok(())
}

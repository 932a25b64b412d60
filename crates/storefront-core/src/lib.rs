pub mod app_config;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod input;
pub mod pricing;
pub mod product;
pub mod stock;

pub use app_config::{AppConfig, DisplayConfig, Environment};
pub use cart::{cart_totals, CartLine, CartLineError, CartTotals};
pub use catalog::{category_name, group_by_category, CategoryGroup, ListingEntry};
pub use config::{load_app_config, load_app_config_from_env};
pub use input::{cart_from_json, products_from_json};
pub use pricing::{
    get_effective_product_price, get_product_pricing_display, is_tba_price, normalize_price_type,
    parse_price, should_show_public_stock, to_valid_price, PriceType, PricingView,
};
pub use product::ProductRecord;
pub use stock::public_stock;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported {context} document: expected {expected}, found {found}")]
    UnsupportedShape {
        context: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::pricing::{get_product_pricing_display, parse_price};
use crate::product::ProductRecord;

/// A product in a shopper's cart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub product: ProductRecord,
    pub quantity: u32,
}

/// Reasons a raw cart line is dropped while loading a cart.
#[derive(Debug, Error)]
pub enum CartLineError {
    #[error("cart line is not an object")]
    NotAnObject,

    #[error("cart line has no product object")]
    MissingProduct,

    #[error("cart line product is malformed: {0}")]
    InvalidProduct(#[source] serde_json::Error),

    #[error("cart line quantity {0} is not a non-negative number")]
    InvalidQuantity(Value),
}

impl CartLine {
    /// Builds a line from a raw `{product, quantity}` object.
    ///
    /// An absent or `null` quantity means one unit. Numeric strings are
    /// accepted and fractions are floored, as for stock counts.
    ///
    /// # Errors
    ///
    /// Returns [`CartLineError`] when the line is not an object, its product
    /// is missing or not an object, or its quantity is negative or not
    /// numeric.
    pub fn from_value(raw: Value) -> Result<Self, CartLineError> {
        let Value::Object(mut obj) = raw else {
            return Err(CartLineError::NotAnObject);
        };

        let product = match obj.remove("product") {
            Some(product @ Value::Object(_)) => {
                serde_json::from_value(product).map_err(CartLineError::InvalidProduct)?
            }
            _ => return Err(CartLineError::MissingProduct),
        };

        let quantity = match obj.remove("quantity") {
            None | Some(Value::Null) => 1,
            Some(raw_quantity) => match parse_price(Some(&raw_quantity)) {
                Some(units) => whole_units(units),
                None => return Err(CartLineError::InvalidQuantity(raw_quantity)),
            },
        };

        Ok(Self { product, quantity })
    }
}

/// Floors a validated, non-negative quantity. Float-to-int casts saturate at
/// `u32::MAX`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_units(units: f64) -> u32 {
    units.floor() as u32
}

/// Money and unit totals for a cart.
///
/// TBA units are counted in `item_count` and `tba_items` but add nothing to
/// `subtotal` or `savings`; checkout has to quote them separately.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: u64,
    pub subtotal: f64,
    pub savings: f64,
    pub tba_items: u64,
}

impl CartTotals {
    #[must_use]
    pub fn has_tba_items(&self) -> bool {
        self.tba_items > 0
    }
}

#[must_use]
pub fn cart_totals(lines: &[CartLine]) -> CartTotals {
    let mut totals = CartTotals::default();

    for line in lines.iter().filter(|l| l.quantity > 0) {
        let quantity = u64::from(line.quantity);
        totals.item_count += quantity;

        let view = get_product_pricing_display(Some(&line.product));
        if view.is_tba {
            totals.tba_items += quantity;
            continue;
        }

        let units = f64::from(line.quantity);
        totals.subtotal += view.current_price.unwrap_or(0.0) * units;
        totals.savings += view.savings() * units;
    }

    if totals.has_tba_items() {
        tracing::debug!(tba_items = totals.tba_items, "cart contains unpriced items");
    }
    totals
}

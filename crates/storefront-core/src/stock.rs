use crate::pricing::{parse_price, should_show_public_stock};
use crate::product::ProductRecord;

/// Stock count visible to shoppers.
///
/// `None` unless the product opts in via `showStockToPublic` and carries a
/// valid, non-negative `stock` value. Fractional counts are floored.
#[must_use]
pub fn public_stock(product: &ProductRecord) -> Option<u64> {
    if !should_show_public_stock(Some(product)) {
        return None;
    }
    // Stock uses the same lenient numeric policy as prices.
    let count = parse_price(product.stock.as_ref())?.floor();
    // Float-to-int casts saturate at u64::MAX.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = count as u64;
    Some(count)
}

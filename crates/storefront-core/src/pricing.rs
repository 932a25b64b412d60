//! Product pricing resolution.
//!
//! Maps a raw [`ProductRecord`] to a display-ready [`PricingView`]: whether
//! the price is still to be announced, what the current and previous prices
//! are, and whether a discount badge renders. Every function here is total.
//! Malformed or missing fields degrade to fixed fallbacks (`None`, `0`, or
//! [`PriceType::Single`]) so rendering code never handles errors from this
//! module.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::app_config::DisplayConfig;
use crate::product::{is_truthy, ProductRecord};

/// How a product's price is presented.
///
/// Stored values are matched case-insensitively. Unrecognized values are
/// kept (lowercased) in [`PriceType::Other`] and priced like `Single`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum PriceType {
    /// One regular price.
    #[default]
    Single,
    /// Regular price plus an optional sale price.
    Best,
    /// Price to be announced; no amount is shown.
    Tba,
    Other(String),
}

impl PriceType {
    /// Classifies an already-lowercased price type string.
    fn from_lowercase(lower: String) -> Self {
        match lower.as_str() {
            "single" => PriceType::Single,
            "best" => PriceType::Best,
            "tba" => PriceType::Tba,
            _ => PriceType::Other(lower),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            PriceType::Single => "single",
            PriceType::Best => "best",
            PriceType::Tba => "tba",
            PriceType::Other(raw) => raw,
        }
    }
}

impl fmt::Display for PriceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl Serialize for PriceType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PriceType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Ok(PriceType::Single);
        }
        Ok(PriceType::from_lowercase(raw.to_lowercase()))
    }
}

/// Pricing decision for one product, safe to interpolate directly.
///
/// When `is_tba` is false both prices are `Some` with finite, non-negative
/// amounts. When it is true both are `None` and `has_discount` is false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingView {
    pub price_type: PriceType,
    pub is_tba: bool,
    pub current_price: Option<f64>,
    pub previous_price: Option<f64>,
    pub has_discount: bool,
}

impl PricingView {
    fn tba() -> Self {
        Self {
            price_type: PriceType::Tba,
            is_tba: true,
            current_price: None,
            previous_price: None,
            has_discount: false,
        }
    }

    /// Amount saved against the previous price, or `0` without a discount.
    #[must_use]
    pub fn savings(&self) -> f64 {
        match (self.has_discount, self.previous_price, self.current_price) {
            (true, Some(previous), Some(current)) => previous - current,
            _ => 0.0,
        }
    }

    /// Whole-number percentage shown on the discount badge.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u32> {
        let previous = self.previous_price.filter(|_| self.has_discount)?;
        if previous <= 0.0 {
            return None;
        }
        let percent = (self.savings() / previous * 100.0).round();
        // savings < previous, so the percentage lies in 0..=100.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percent = percent.clamp(0.0, 100.0) as u32;
        Some(percent)
    }

    /// Label for the price the shopper pays now.
    #[must_use]
    pub fn current_label(&self, display: &DisplayConfig) -> String {
        match self.current_price {
            Some(amount) if !self.is_tba => format_price(amount, display),
            _ => display.tba_label.clone(),
        }
    }

    /// Struck-through label for the previous price; only present when the
    /// view carries a discount.
    #[must_use]
    pub fn previous_label(&self, display: &DisplayConfig) -> Option<String> {
        if !self.has_discount {
            return None;
        }
        self.previous_price.map(|amount| format_price(amount, display))
    }
}

/// Formats an amount as fixed-point text with the configured currency symbol.
#[must_use]
pub fn format_price(amount: f64, display: &DisplayConfig) -> String {
    format!(
        "{}{:.*}",
        display.currency_symbol,
        usize::from(display.price_decimals),
        amount
    )
}

/// Reads the product's price type, defaulting to [`PriceType::Single`].
///
/// A missing product, an absent or `null` field, an empty string, or any
/// non-string value yields `Single`. Strings are lowercased but not trimmed,
/// so `" best"` is kept as [`PriceType::Other`].
#[must_use]
pub fn normalize_price_type(product: Option<&ProductRecord>) -> PriceType {
    match product.and_then(|p| p.price_type.as_ref()) {
        Some(Value::String(raw)) if !raw.is_empty() => {
            PriceType::from_lowercase(raw.to_lowercase())
        }
        _ => PriceType::Single,
    }
}

#[must_use]
pub fn is_tba_price(product: Option<&ProductRecord>) -> bool {
    normalize_price_type(product) == PriceType::Tba
}

/// Parses a raw price field into a finite, non-negative amount.
///
/// Accepts JSON numbers and numeric strings (surrounding whitespace is
/// ignored). Returns `None` for absent, `null`, blank, unparsable, negative,
/// or non-finite values, and for booleans, arrays and objects.
#[must_use]
pub fn parse_price(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => return None,
    };

    if parsed.is_finite() && parsed >= 0.0 {
        // Adding zero folds -0.0 into 0.0.
        Some(parsed + 0.0)
    } else {
        None
    }
}

/// [`parse_price`] with a numeric fallback for invalid input.
#[must_use]
pub fn to_valid_price(value: Option<&Value>, fallback: f64) -> f64 {
    parse_price(value).unwrap_or(fallback)
}

/// The amount a shopper pays, or `None` for a missing or TBA product.
///
/// A `best` product with a valid sale price resolves to the sale price.
/// Every other case, including `best` with a missing or invalid sale price,
/// resolves to the regular price, defaulting to `0`.
#[must_use]
pub fn get_effective_product_price(product: Option<&ProductRecord>) -> Option<f64> {
    let product = product?;
    let price_type = normalize_price_type(Some(product));
    if price_type == PriceType::Tba {
        return None;
    }

    if price_type == PriceType::Best {
        if let Some(sale_price) = parse_price(product.sale_price.as_ref()) {
            return Some(sale_price);
        }
    }

    Some(to_valid_price(product.price.as_ref(), 0.0))
}

/// Resolves the full pricing view for a product.
///
/// A missing product renders like an empty record: single, `0` and `0`.
/// This differs from [`get_effective_product_price`], which returns `None`
/// for a missing product; a non-TBA view always carries both amounts.
/// When the regular price is invalid the previous price falls back to the
/// current price, so a valid sale price over a broken regular price shows no
/// discount.
#[must_use]
pub fn get_product_pricing_display(product: Option<&ProductRecord>) -> PricingView {
    let price_type = normalize_price_type(product);
    if price_type == PriceType::Tba {
        return PricingView::tba();
    }

    let current = get_effective_product_price(product).unwrap_or(0.0);
    let previous = to_valid_price(product.and_then(|p| p.price.as_ref()), current);
    let has_discount = price_type == PriceType::Best && previous > current;

    PricingView {
        price_type,
        is_tba: false,
        current_price: Some(current),
        previous_price: Some(previous),
        has_discount,
    }
}

/// Whether the product's stock count may be shown to shoppers.
#[must_use]
pub fn should_show_public_stock(product: Option<&ProductRecord>) -> bool {
    is_truthy(product.and_then(|p| p.show_stock_to_public.as_ref()))
}

#[cfg(test)]
#[path = "pricing_test.rs"]
mod tests;

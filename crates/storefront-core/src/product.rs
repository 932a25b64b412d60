use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A product as the storefront backend returns it, reduced to the fields the
/// display layer reads.
///
/// Every field is kept as raw JSON so that deserializing any object succeeds
/// regardless of how the backend typed a field. Interpretation (and the
/// fallbacks for malformed values) lives in [`crate::pricing`],
/// [`crate::catalog`] and [`crate::stock`]. JSON `null` and an absent field
/// both deserialize to `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Backend identifier; Mongo-style exports send it as `_id`.
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    /// Either a plain category name or a populated category object with a
    /// `name` field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Value>,
    /// `"single"`, `"best"` or `"tba"`, in any letter case.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_type: Option<Value>,
    /// Regular price. Numbers and numeric strings (e.g. `"12.50"`) are both
    /// accepted; form fields echo prices back as strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,
    /// Sale price, only meaningful when the price type is `best`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_stock_to_public: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<Value>,
}

impl ProductRecord {
    /// Display name, when the backend sent a non-empty string.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_ref()
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Identifier rendered as text. String ids pass through unquoted; numeric
    /// ids use their JSON text.
    #[must_use]
    pub fn id_text(&self) -> Option<String> {
        match self.id.as_ref()? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// JavaScript-style truthiness for raw JSON flags.
///
/// Absent, `null`, `false`, `0`, `NaN` and `""` are falsy; everything else,
/// including empty arrays and objects, is truthy.
#[must_use]
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn deserializes_camel_case_wire_names() {
        let product: ProductRecord = serde_json::from_value(json!({
            "_id": "64f0c0ffee",
            "name": "Linen Shirt",
            "priceType": "BEST",
            "price": "49.99",
            "salePrice": 39.5,
            "showStockToPublic": true,
            "stock": 12
        }))
        .expect("product should deserialize");

        assert_eq!(product.id_text().as_deref(), Some("64f0c0ffee"));
        assert_eq!(product.display_name(), Some("Linen Shirt"));
        assert_eq!(product.price_type, Some(json!("BEST")));
        assert_eq!(product.price, Some(json!("49.99")));
        assert_eq!(product.sale_price, Some(json!(39.5)));
        assert_eq!(product.show_stock_to_public, Some(json!(true)));
        assert_eq!(product.stock, Some(json!(12)));
    }

    #[test]
    fn null_fields_deserialize_as_absent() {
        let product: ProductRecord =
            serde_json::from_value(json!({ "salePrice": null, "priceType": null })).unwrap();
        assert!(product.sale_price.is_none());
        assert!(product.price_type.is_none());
    }

    #[test]
    fn unexpected_field_types_do_not_fail_deserialization() {
        let product: ProductRecord = serde_json::from_value(json!({
            "id": 42,
            "name": ["not", "a", "string"],
            "priceType": 7,
            "price": { "amount": 10 },
            "vendor": "ignored"
        }))
        .expect("loose shapes must still deserialize");

        assert_eq!(product.id_text().as_deref(), Some("42"));
        assert!(product.display_name().is_none());
    }

    #[test]
    fn display_name_ignores_blank_strings() {
        let product = ProductRecord {
            name: Some(json!("   ")),
            ..ProductRecord::default()
        };
        assert!(product.display_name().is_none());
    }

    #[test]
    fn truthiness_matches_javascript_coercion() {
        assert!(!is_truthy(None));
        assert!(!is_truthy(Some(&Value::Null)));
        assert!(!is_truthy(Some(&json!(false))));
        assert!(!is_truthy(Some(&json!(0))));
        assert!(!is_truthy(Some(&json!(0.0))));
        assert!(!is_truthy(Some(&json!(""))));

        assert!(is_truthy(Some(&json!(true))));
        assert!(is_truthy(Some(&json!(3))));
        assert!(is_truthy(Some(&json!("false"))));
        assert!(is_truthy(Some(&json!([]))));
        assert!(is_truthy(Some(&json!({}))));
    }

    #[test]
    fn serializes_without_absent_fields() {
        let product = ProductRecord {
            price: Some(json!(10)),
            ..ProductRecord::default()
        };
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value, json!({ "price": 10 }));
    }
}

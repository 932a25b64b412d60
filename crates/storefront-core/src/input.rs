//! Loading product and cart documents from JSON.
//!
//! Accepts the shapes the storefront backend returns: a bare product, an
//! array of products, or a list envelope (`{"products": [...]}` or
//! `{"data": [...]}`). Array elements that are not objects are skipped with a
//! warning rather than failing the whole document.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cart::CartLine;
use crate::product::ProductRecord;
use crate::CoreError;

/// Envelope keys checked, in order, for a product list.
const PRODUCT_LIST_KEYS: [&str; 2] = ["products", "data"];
const CART_LIST_KEYS: [&str; 2] = ["items", "data"];

/// Parses one product or a list of products.
///
/// # Errors
///
/// Returns [`CoreError::Json`] for malformed JSON and
/// [`CoreError::UnsupportedShape`] when the top-level value is neither an
/// object nor an array.
pub fn products_from_json(text: &str) -> Result<Vec<ProductRecord>, CoreError> {
    let root: Value = serde_json::from_str(text)?;
    match root {
        Value::Array(items) => collect_objects(items, "product"),
        Value::Object(mut obj) => {
            if let Some(items) = take_list(&mut obj, &PRODUCT_LIST_KEYS) {
                return collect_objects(items, "product");
            }
            Ok(vec![serde_json::from_value(Value::Object(obj))?])
        }
        other => Err(CoreError::UnsupportedShape {
            context: "product",
            expected: "an object or an array",
            found: kind(&other),
        }),
    }
}

/// Parses a cart: an array of `{product, quantity}` lines, or an object with
/// an `items` (or `data`) array.
///
/// # Errors
///
/// Returns [`CoreError::Json`] for malformed JSON and
/// [`CoreError::UnsupportedShape`] for any other top-level shape. Individual
/// lines that cannot be read are skipped with a warning.
pub fn cart_from_json(text: &str) -> Result<Vec<CartLine>, CoreError> {
    let root: Value = serde_json::from_str(text)?;
    let items = match root {
        Value::Array(items) => items,
        Value::Object(mut obj) => {
            take_list(&mut obj, &CART_LIST_KEYS).ok_or(CoreError::UnsupportedShape {
                context: "cart",
                expected: "an array or an object with an `items` array",
                found: "object",
            })?
        }
        other => {
            return Err(CoreError::UnsupportedShape {
                context: "cart",
                expected: "an array or an object with an `items` array",
                found: kind(&other),
            })
        }
    };
    let total = items.len();
    let mut lines = Vec::with_capacity(total);
    for (position, item) in items.into_iter().enumerate() {
        match CartLine::from_value(item) {
            Ok(line) => lines.push(line),
            Err(e) => tracing::warn!(position, error = %e, "skipping cart line"),
        }
    }

    tracing::debug!(total, parsed = lines.len(), "loaded cart line entries");
    Ok(lines)
}

fn take_list(obj: &mut serde_json::Map<String, Value>, keys: &[&str]) -> Option<Vec<Value>> {
    for key in keys {
        if matches!(obj.get(*key), Some(Value::Array(_))) {
            if let Some(Value::Array(items)) = obj.remove(*key) {
                return Some(items);
            }
        }
    }
    None
}

fn collect_objects<T: DeserializeOwned>(
    items: Vec<Value>,
    context: &'static str,
) -> Result<Vec<T>, CoreError> {
    let total = items.len();
    let mut parsed = Vec::with_capacity(total);

    for (position, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            tracing::warn!(
                position,
                found = kind(&item),
                "skipping non-object {context} entry"
            );
            continue;
        }
        parsed.push(serde_json::from_value(item)?);
    }

    tracing::debug!(total, parsed = parsed.len(), "loaded {context} entries");
    Ok(parsed)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn single_object_is_one_product() {
        let products = products_from_json(r#"{"priceType":"best","price":5}"#).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].price, Some(json!(5)));
    }

    #[test]
    fn array_of_products() {
        let products = products_from_json(r#"[{"price":1},{"price":"2"}]"#).unwrap();
        assert_eq!(products.len(), 2);
    }

    #[test]
    fn products_envelope() {
        let products =
            products_from_json(r#"{"products":[{"price":1}],"total":1,"page":1}"#).unwrap();
        assert_eq!(products.len(), 1);
    }

    #[test]
    fn data_envelope() {
        let products = products_from_json(r#"{"success":true,"data":[{"price":1},{}]}"#).unwrap();
        assert_eq!(products.len(), 2);
    }

    #[test]
    fn object_with_non_array_data_is_a_product() {
        let products = products_from_json(r#"{"data":"x","price":4}"#).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].price, Some(json!(4)));
    }

    #[test]
    fn non_object_entries_are_skipped() {
        let products = products_from_json(r#"[{"price":1}, 5, null, "x", {"price":2}]"#).unwrap();
        assert_eq!(products.len(), 2);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = products_from_json("{not json").unwrap_err();
        assert!(matches!(err, CoreError::Json(_)));
    }

    #[test]
    fn scalar_document_is_unsupported() {
        let err = products_from_json("42").unwrap_err();
        assert!(matches!(
            err,
            CoreError::UnsupportedShape { found: "number", .. }
        ));
    }

    #[test]
    fn cart_array_and_envelope() {
        let lines = cart_from_json(r#"[{"product":{"price":2},"quantity":3}]"#).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 3);

        let lines = cart_from_json(r#"{"items":[{"product":{"price":2}}]}"#).unwrap();
        assert_eq!(lines[0].quantity, 1);
    }

    #[test]
    fn cart_object_without_items_is_unsupported() {
        let err = cart_from_json(r#"{"product":{"price":2}}"#).unwrap_err();
        assert!(matches!(
            err,
            CoreError::UnsupportedShape { context: "cart", found: "object", .. }
        ));
    }

    #[test]
    fn cart_null_and_string_quantities_load() {
        let lines = cart_from_json(
            r#"[{"product":{"price":2},"quantity":null},{"product":{"price":3},"quantity":"2"}]"#,
        )
        .unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].quantity, 1);
        assert_eq!(lines[1].quantity, 2);
    }

    #[test]
    fn unreadable_cart_lines_are_skipped() {
        let lines = cart_from_json(
            r#"[
                5,
                {"quantity":2},
                {"product":"p1"},
                {"product":{"price":4},"quantity":-3},
                {"product":{"price":3}}
            ]"#,
        )
        .unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].product.price, Some(json!(3)));
    }
}

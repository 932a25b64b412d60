//! Category grouping for product listings.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::pricing::{get_product_pricing_display, PricingView};
use crate::product::ProductRecord;
use crate::stock::public_stock;

/// Group name for products without a usable category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// One product as a listing card renders it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingEntry {
    pub id: Option<String>,
    pub name: Option<String>,
    pub pricing: PricingView,
    pub public_stock: Option<u64>,
}

impl ListingEntry {
    #[must_use]
    pub fn from_product(product: &ProductRecord) -> Self {
        Self {
            id: product.id_text(),
            name: product.display_name().map(str::to_owned),
            pricing: get_product_pricing_display(Some(product)),
            public_stock: public_stock(product),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup {
    pub name: String,
    pub products: Vec<ListingEntry>,
}

/// Resolves the category a product is listed under.
///
/// The backend sends either the category name or a populated category
/// object; for objects the `name` field is used.
#[must_use]
pub fn category_name(product: &ProductRecord) -> Option<String> {
    let raw = match product.category.as_ref()? {
        Value::String(s) => s.as_str(),
        Value::Object(obj) => obj.get("name").and_then(Value::as_str)?,
        _ => return None,
    };
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Groups products by category, keeping first-seen category order and the
/// input order within each group. Uncategorized products come last.
#[must_use]
pub fn group_by_category(products: &[ProductRecord]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut uncategorized = Vec::new();

    for product in products {
        let entry = ListingEntry::from_product(product);
        let Some(name) = category_name(product) else {
            uncategorized.push(entry);
            continue;
        };

        if let Some(&slot) = index.get(&name) {
            groups[slot].products.push(entry);
        } else {
            index.insert(name.clone(), groups.len());
            groups.push(CategoryGroup {
                name,
                products: vec![entry],
            });
        }
    }

    if !uncategorized.is_empty() {
        groups.push(CategoryGroup {
            name: UNCATEGORIZED.to_string(),
            products: uncategorized,
        });
    }

    tracing::debug!(
        products = products.len(),
        groups = groups.len(),
        "grouped products by category"
    );
    groups
}

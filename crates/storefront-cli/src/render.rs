//! Output rendering for the `price` and `cart` commands.

use serde::Serialize;
use storefront_core::pricing::format_price;
use storefront_core::{
    get_product_pricing_display, CartTotals, DisplayConfig, PricingView, ProductRecord,
};

use crate::OutputFormat;

/// One priced product as the `price` command reports it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PriceRow {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(flatten)]
    pub pricing: PricingView,
    pub current_label: String,
    pub previous_label: Option<String>,
    pub discount_percent: Option<u32>,
}

impl PriceRow {
    pub(crate) fn new(product: &ProductRecord, display: &DisplayConfig) -> Self {
        let pricing = get_product_pricing_display(Some(product));
        Self {
            id: product.id_text(),
            name: product.display_name().map(str::to_owned),
            current_label: pricing.current_label(display),
            previous_label: pricing.previous_label(display),
            discount_percent: pricing.discount_percent(),
            pricing,
        }
    }
}

pub(crate) fn price_report(
    products: &[ProductRecord],
    format: OutputFormat,
    display: &DisplayConfig,
) -> anyhow::Result<String> {
    let rows: Vec<PriceRow> = products
        .iter()
        .map(|p| PriceRow::new(p, display))
        .collect();

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&rows)?),
        OutputFormat::Table => Ok(price_table(&rows)),
    }
}

fn price_table(rows: &[PriceRow]) -> String {
    let mut out = format!(
        "{:<24} {:<8} {:>14} {:>14} {:>6}",
        "PRODUCT", "TYPE", "PRICE", "WAS", "OFF"
    );
    for row in rows {
        let label = row
            .name
            .as_deref()
            .or(row.id.as_deref())
            .unwrap_or("-");
        let off = row
            .discount_percent
            .map_or_else(|| "-".to_string(), |p| format!("{p}%"));
        out.push_str(&format!(
            "\n{:<24} {:<8} {:>14} {:>14} {:>6}",
            truncate(label, 24),
            row.pricing.price_type,
            row.current_label,
            row.previous_label.as_deref().unwrap_or("-"),
            off
        ));
    }
    out
}

pub(crate) fn cart_report(
    totals: &CartTotals,
    format: OutputFormat,
    display: &DisplayConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(totals)?),
        OutputFormat::Table => {
            let mut out = format!(
                "items     {}\nsubtotal  {}\nsavings   {}",
                totals.item_count,
                format_price(totals.subtotal, display),
                format_price(totals.savings, display)
            );
            if totals.has_tba_items() {
                out.push_str(&format!(
                    "\n{}       {} item(s) priced separately",
                    display.tba_label, totals.tba_items
                ));
            }
            Ok(out)
        }
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn product(value: serde_json::Value) -> ProductRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn price_row_json_flattens_pricing_view() {
        let lamp = product(json!({
            "id": "p1",
            "name": "Lamp",
            "priceType": "best",
            "price": 40,
            "salePrice": 30
        }));
        let row = PriceRow::new(&lamp, &DisplayConfig::default());
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["id"], json!("p1"));
        assert_eq!(value["priceType"], json!("best"));
        assert_eq!(value["currentPrice"], json!(30.0));
        assert_eq!(value["hasDiscount"], json!(true));
        assert_eq!(value["currentLabel"], json!("$30.00"));
        assert_eq!(value["previousLabel"], json!("$40.00"));
        assert_eq!(value["discountPercent"], json!(25));
    }

    #[test]
    fn price_table_has_header_and_one_line_per_product() {
        let products = vec![
            product(json!({ "name": "Lamp", "price": 40 })),
            product(json!({ "name": "Sofa", "priceType": "tba" })),
        ];
        let table =
            price_report(&products, OutputFormat::Table, &DisplayConfig::default()).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("PRODUCT"));
        assert!(lines[1].contains("$40.00"));
        assert!(lines[2].contains("TBA"));
    }

    #[test]
    fn cart_table_mentions_tba_items() {
        let totals = CartTotals {
            item_count: 3,
            subtotal: 12.0,
            savings: 0.0,
            tba_items: 1,
        };
        let text = cart_report(&totals, OutputFormat::Table, &DisplayConfig::default()).unwrap();
        assert!(text.contains("subtotal  $12.00"));
        assert!(text.contains("1 item(s) priced separately"));
    }

    #[test]
    fn truncate_long_names() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
    }
}

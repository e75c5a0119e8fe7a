//! CSV export of the full product collection.
//!
//! The export covers every record, ignored and sold included; filtering is
//! a display concern. Output is a plain string so the caller decides where
//! it goes (file download in the dashboard, a file path in the CLI).

use chrono::NaiveDate;

use crate::product::Product;

const HEADER: &str =
    "Name,Category,Quantity,Expiry Date,Sales Per Day,Cost Price,Selling Price,Date Added";

/// Render the collection as CSV, one row per product.
pub fn render_csv(products: &[Product]) -> String {
    let mut out = String::from(HEADER);
    for product in products {
        out.push('\n');
        out.push_str(&render_row(product));
    }
    out
}

/// Default report file name: `inventory-report-YYYY-MM-DD.csv`.
pub fn report_file_name(today: NaiveDate) -> String {
    format!("inventory-report-{}.csv", today.format("%Y-%m-%d"))
}

fn render_row(product: &Product) -> String {
    let expiry = product
        .expiry_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();

    [
        field(&product.name),
        field(&product.category),
        product.quantity.to_string(),
        expiry,
        product.average_sales_per_day.to_string(),
        product.cost_price.to_string(),
        product.selling_price.to_string(),
        product.date_added.format("%Y-%m-%d").to_string(),
    ]
    .join(",")
}

/// Quote a field when it contains a separator or quote character.
fn field(raw: &str) -> String {
    if raw.contains([',', '"', '\n']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

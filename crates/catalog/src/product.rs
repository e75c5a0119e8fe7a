use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shelfwatch_core::ProductId;

/// A perishable product record.
///
/// Field names serialize in camelCase to match the dashboard wire format.
/// Records flagged `is_ignored` or `marked_as_sold` stay in the collection
/// (for export and editing) but are excluded from every engine computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    /// `None` is the invalid-date sentinel: unparseable input deserializes
    /// to `None` rather than failing the whole snapshot.
    #[serde(with = "lenient_date")]
    pub expiry_date: Option<NaiveDate>,
    pub average_sales_per_day: f64,
    pub cost_price: f64,
    pub selling_price: f64,
    pub date_added: NaiveDate,
    #[serde(default)]
    pub is_ignored: bool,
    /// Meaningful only when `is_ignored` is set.
    #[serde(default)]
    pub ignored_reason: Option<String>,
    #[serde(default)]
    pub marked_as_sold: bool,
}

impl Product {
    /// An active product participates in risk, discount, and procurement
    /// computations.
    pub fn is_active(&self) -> bool {
        !self.is_ignored && !self.marked_as_sold
    }
}

/// Lenient `YYYY-MM-DD` (de)serialization for the expiry date.
///
/// Unparseable or missing input maps to `None` instead of a deserialization
/// error; the engine then treats the product as having an invalid expiry.
pub mod lenient_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&d.format(FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.and_then(|s| NaiveDate::parse_from_str(s.trim(), FORMAT).ok()))
    }
}

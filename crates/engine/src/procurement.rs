//! Procurement advisor.
//!
//! Flags products that will sell out within a week and sizes a reorder
//! to cover a supply window proportional to the urgency.

use chrono::NaiveDate;
use serde::Serialize;

use shelfwatch_catalog::Product;

use crate::risk::{ExpiryOutlook, SelloutHorizon, Urgency, classify_risk};

/// A suggested reorder for one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcurementRecommendation<'a> {
    pub product: &'a Product,
    pub days_until_sold_out: i64,
    pub recommended_quantity: u32,
    pub urgency: Urgency,
    pub reason: &'static str,
    /// Margin on the reorder. Deliberately not clamped: a negative value
    /// surfaces mispriced products.
    pub estimated_revenue: f64,
}

/// Compute reorder recommendations for every active product, ranked by
/// descending urgency (stable: ties keep input order).
///
/// Products that never sell out, sell out later than a week from now, or
/// carry an invalid expiry date produce no recommendation.
pub fn recommend_procurement<'a>(
    products: &'a [Product],
    today: NaiveDate,
) -> Vec<ProcurementRecommendation<'a>> {
    let mut recommendations: Vec<ProcurementRecommendation<'a>> = products
        .iter()
        .filter(|p| p.is_active())
        .filter_map(|p| recommend_for(p, today))
        .collect();
    recommendations.sort_by(|a, b| b.urgency.cmp(&a.urgency));
    recommendations
}

fn recommend_for(product: &Product, today: NaiveDate) -> Option<ProcurementRecommendation<'_>> {
    let analysis = classify_risk(product, today);

    if analysis.days_until_expiry == ExpiryOutlook::Invalid {
        return None;
    }

    let days_until_sold_out = match analysis.days_until_sold_out {
        SelloutHorizon::Finite(days) if days <= 7 => days,
        _ => return None,
    };

    let (urgency, reason, supply_days) = if days_until_sold_out <= 2 {
        (
            Urgency::High,
            "Will sell out within 2 days - urgent reorder needed",
            14.0,
        )
    } else if days_until_sold_out <= 4 {
        (
            Urgency::Medium,
            "Will sell out within 4 days - reorder recommended",
            10.0,
        )
    } else {
        (
            Urgency::Low,
            "Will sell out within a week - plan reorder",
            7.0,
        )
    };

    let recommended_quantity = (product.average_sales_per_day * supply_days).ceil() as u32;
    let estimated_revenue =
        f64::from(recommended_quantity) * (product.selling_price - product.cost_price);

    Some(ProcurementRecommendation {
        product,
        days_until_sold_out,
        recommended_quantity,
        urgency,
        reason,
        estimated_revenue,
    })
}

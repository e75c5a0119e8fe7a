//! Discount advisor.
//!
//! Suggests markdowns for products that are projected to expire before
//! selling out, or that expire within the next three days regardless of
//! pace. Each suggestion carries the expected sales boost and a carbon
//! estimate for the waste the markdown would prevent.

use chrono::NaiveDate;
use serde::Serialize;

use shelfwatch_catalog::Product;

use crate::risk::{self, ExpiryOutlook, SelloutHorizon, Urgency, classify_risk};

/// Emission factor: kg of CO2-equivalent per kg of food waste prevented.
pub const CO2E_PER_KG_WASTE: f64 = 2.75;

/// Kg of waste per unsold unit for at-risk stock.
const WASTE_KG_PER_UNSOLD_UNIT: f64 = 0.5;

/// Smaller waste-avoidance credit per unit for stock that is discounted
/// without being projected to expire.
const WASTE_KG_PER_DISCOUNTED_UNIT: f64 = 0.3;

/// Environmental impact of acting on a suggestion.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonSavings {
    pub waste_prevented_kg: f64,
    pub co2_saved_kg: f64,
}

/// A suggested markdown for one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountSuggestion<'a> {
    pub product: &'a Product,
    /// Whole-percent discount. Approval gating for large discounts is a
    /// presentation concern; the engine always computes the number.
    pub suggested_discount: u8,
    pub new_price: f64,
    pub reason: &'static str,
    pub urgency: Urgency,
    pub estimated_boost: f64,
    pub potential_savings: f64,
    pub carbon_savings: CarbonSavings,
}

/// Compute discount suggestions for every active product, ranked by
/// descending urgency (stable: ties keep input order).
pub fn suggest_discounts<'a>(
    products: &'a [Product],
    today: NaiveDate,
) -> Vec<DiscountSuggestion<'a>> {
    let mut suggestions: Vec<DiscountSuggestion<'a>> = products
        .iter()
        .filter(|p| p.is_active())
        .filter_map(|p| suggest_for(p, today))
        .collect();
    suggestions.sort_by(|a, b| b.urgency.cmp(&a.urgency));
    suggestions
}

/// Sum the carbon figures across a suggestion list (the dashboard's
/// carbon savings tracker).
pub fn total_carbon_savings(suggestions: &[DiscountSuggestion<'_>]) -> CarbonSavings {
    suggestions
        .iter()
        .fold(CarbonSavings::default(), |acc, s| CarbonSavings {
            waste_prevented_kg: acc.waste_prevented_kg + s.carbon_savings.waste_prevented_kg,
            co2_saved_kg: acc.co2_saved_kg + s.carbon_savings.co2_saved_kg,
        })
}

fn suggest_for(product: &Product, today: NaiveDate) -> Option<DiscountSuggestion<'_>> {
    let analysis = classify_risk(product, today);

    // Products with an invalid expiry date never get a suggestion.
    let days = match analysis.days_until_expiry {
        ExpiryOutlook::Known(days) => days,
        ExpiryOutlook::Invalid => return None,
    };

    if !(analysis.will_expire || days <= 3) {
        return None;
    }

    let (discount, reason, urgency, boost) = if days <= 1 {
        (
            50,
            "Expires tomorrow - urgent clearance needed",
            Urgency::High,
            3.0,
        )
    } else if days <= 2 {
        (
            35,
            "Expires within 2 days - significant discount needed",
            Urgency::High,
            2.5,
        )
    } else if days <= 3 {
        (
            25,
            "Expires within 3 days - moderate discount recommended",
            Urgency::Medium,
            2.0,
        )
    } else {
        // The entry condition guarantees will-expire past this point. The
        // risk gap is how many extra days of stock outlive freshness.
        let gap_over = |threshold: i64| match analysis.days_until_sold_out {
            SelloutHorizon::Finite(sold_out) => sold_out - days > threshold,
            SelloutHorizon::Unbounded => true,
        };

        if gap_over(5) {
            (
                30,
                "High risk of expiry - boost sales velocity",
                Urgency::High,
                2.2,
            )
        } else if gap_over(2) {
            (
                20,
                "Medium risk of expiry - increase sales pace",
                Urgency::Medium,
                1.8,
            )
        } else {
            (
                15,
                "Low risk of expiry - slight discount to boost sales",
                Urgency::Low,
                1.5,
            )
        }
    };

    let new_price = product.selling_price * (1.0 - f64::from(discount) / 100.0);

    let raw_waste = if analysis.will_expire {
        risk::unsold_at_expiry(product, days) * WASTE_KG_PER_UNSOLD_UNIT
    } else {
        f64::from(product.quantity) * WASTE_KG_PER_DISCOUNTED_UNIT
    };
    let waste_prevented_kg = raw_waste.max(0.0);

    Some(DiscountSuggestion {
        product,
        suggested_discount: discount,
        new_price,
        reason,
        urgency,
        estimated_boost: boost,
        potential_savings: analysis.potential_loss,
        carbon_savings: CarbonSavings {
            waste_prevented_kg,
            co2_saved_kg: waste_prevented_kg * CO2E_PER_KG_WASTE,
        },
    })
}

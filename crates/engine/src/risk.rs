//! Risk classifier — the shared core of the engine.
//!
//! Projects when a product's stock runs out versus when it stops being
//! fresh, and classifies the gap. The other engine modules (discounts,
//! procurement, analytics) all build on `classify_risk`.

use chrono::NaiveDate;
use serde::Serialize;

use shelfwatch_catalog::Product;

/// Days until a product expires, relative to the reference date.
///
/// `Invalid` is the designated sentinel for an unparseable/missing expiry
/// date. It satisfies no threshold comparison, so such products always
/// classify as low risk and produce no suggestions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpiryOutlook {
    /// Whole days until expiry; negative means already expired.
    Known(i64),
    Invalid,
}

impl ExpiryOutlook {
    pub fn days(self) -> Option<i64> {
        match self {
            ExpiryOutlook::Known(days) => Some(days),
            ExpiryOutlook::Invalid => None,
        }
    }

    /// True iff the day count is known and at most `limit`.
    pub fn at_most(self, limit: i64) -> bool {
        matches!(self, ExpiryOutlook::Known(days) if days <= limit)
    }
}

/// Projected days of stock remaining at the current sales pace.
///
/// Modeled as a tagged value rather than a float infinity so comparisons
/// stay exact: `Unbounded` (no sales velocity, never sells out) compares
/// greater than every `Finite` horizon.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelloutHorizon {
    Finite(i64),
    Unbounded,
}

impl SelloutHorizon {
    pub fn is_unbounded(self) -> bool {
        matches!(self, SelloutHorizon::Unbounded)
    }

    pub fn finite(self) -> Option<i64> {
        match self {
            SelloutHorizon::Finite(days) => Some(days),
            SelloutHorizon::Unbounded => None,
        }
    }
}

/// Ordinal risk classification.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Ordinal priority used for ranking suggestions (high > medium > low).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

/// Derived risk view of a single product. Recomputed from scratch on every
/// invocation; never cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAnalysis<'a> {
    pub product: &'a Product,
    pub days_until_expiry: ExpiryOutlook,
    pub days_until_sold_out: SelloutHorizon,
    pub risk_level: RiskLevel,
    pub will_expire: bool,
    pub potential_loss: f64,
}

/// Project how long current stock lasts at the given daily sales rate.
///
/// A non-positive rate means the product never sells out.
pub fn sellout_horizon(quantity: u32, average_sales_per_day: f64) -> SelloutHorizon {
    if average_sales_per_day > 0.0 {
        SelloutHorizon::Finite((f64::from(quantity) / average_sales_per_day).ceil() as i64)
    } else {
        SelloutHorizon::Unbounded
    }
}

/// Classify a single product's expiry risk against the reference date.
pub fn classify_risk(product: &Product, today: NaiveDate) -> RiskAnalysis<'_> {
    let days_until_expiry = match product.expiry_date {
        Some(expiry) => ExpiryOutlook::Known((expiry - today).num_days()),
        None => ExpiryOutlook::Invalid,
    };

    let days_until_sold_out = sellout_horizon(product.quantity, product.average_sales_per_day);

    // Stock outlives freshness when the sellout horizon lies beyond expiry.
    // An unknown expiry can never be "outlived".
    let will_expire = match days_until_expiry {
        ExpiryOutlook::Known(days) => days_until_sold_out > SelloutHorizon::Finite(days),
        ExpiryOutlook::Invalid => false,
    };

    // Precedence matters: the bare <=1 rule is a fallback that catches
    // imminently-expiring products even when they are not overstocked.
    let risk_level = if will_expire && days_until_expiry.at_most(2) {
        RiskLevel::High
    } else if will_expire && days_until_expiry.at_most(5) {
        RiskLevel::Medium
    } else if days_until_expiry.at_most(1) {
        RiskLevel::High
    } else {
        RiskLevel::Low
    };

    let potential_loss = match (will_expire, days_until_expiry) {
        (true, ExpiryOutlook::Known(days)) => {
            unsold_at_expiry(product, days) * product.cost_price
        }
        _ => 0.0,
    };

    RiskAnalysis {
        product,
        days_until_expiry,
        days_until_sold_out,
        risk_level,
        will_expire,
        potential_loss: potential_loss.max(0.0),
    }
}

/// Classify every active product and rank by descending risk.
///
/// The sort is stable, so equally-risky products keep their input order.
pub fn analyze(products: &[Product], today: NaiveDate) -> Vec<RiskAnalysis<'_>> {
    let mut analyses: Vec<RiskAnalysis<'_>> = products
        .iter()
        .filter(|p| p.is_active())
        .map(|p| classify_risk(p, today))
        .collect();
    analyses.sort_by(|a, b| b.risk_level.cmp(&a.risk_level));
    analyses
}

/// Units projected to remain unsold at the moment of expiry. May be
/// negative when stock would have sold out first; callers clamp.
pub(crate) fn unsold_at_expiry(product: &Product, days_until_expiry: i64) -> f64 {
    f64::from(product.quantity) - product.average_sales_per_day * days_until_expiry as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfwatch_core::ProductId;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        day(2024, 1, 15)
    }

    fn product(quantity: u32, rate: f64, expires_in: i64, cost: f64) -> Product {
        Product {
            id: ProductId::new(),
            name: "Test Product".to_string(),
            category: "Dairy".to_string(),
            quantity,
            expiry_date: Some(today() + chrono::Duration::days(expires_in)),
            average_sales_per_day: rate,
            cost_price: cost,
            selling_price: cost * 1.5,
            date_added: day(2024, 1, 1),
            is_ignored: false,
            ignored_reason: None,
            marked_as_sold: false,
        }
    }

    #[test]
    fn overstocked_product_near_expiry_is_high_risk() {
        // quantity=24, rate=8 -> sold out in 3 days; expires in 2.
        let p = product(24, 8.0, 2, 45.0);
        let analysis = classify_risk(&p, today());

        assert_eq!(analysis.days_until_expiry, ExpiryOutlook::Known(2));
        assert_eq!(analysis.days_until_sold_out, SelloutHorizon::Finite(3));
        assert!(analysis.will_expire);
        assert_eq!(analysis.risk_level, RiskLevel::High);
        assert_eq!(analysis.potential_loss, 360.0);
    }

    #[test]
    fn fast_mover_with_distant_expiry_is_low_risk() {
        // quantity=15, rate=12 -> sold out in 2 days; expires in 10.
        let p = product(15, 12.0, 10, 30.0);
        let analysis = classify_risk(&p, today());

        assert_eq!(analysis.days_until_sold_out, SelloutHorizon::Finite(2));
        assert!(!analysis.will_expire);
        assert_eq!(analysis.risk_level, RiskLevel::Low);
        assert_eq!(analysis.potential_loss, 0.0);
    }

    #[test]
    fn medium_risk_between_three_and_five_days() {
        let p = product(40, 5.0, 4, 10.0);
        let analysis = classify_risk(&p, today());

        assert!(analysis.will_expire);
        assert_eq!(analysis.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn imminent_expiry_is_high_risk_even_without_overstock() {
        // Sells out today (horizon 1) but expires tomorrow: not will-expire,
        // still high via the fallback rule.
        let p = product(5, 5.0, 1, 10.0);
        let analysis = classify_risk(&p, today());

        assert_eq!(analysis.days_until_sold_out, SelloutHorizon::Finite(1));
        assert!(!analysis.will_expire);
        assert_eq!(analysis.risk_level, RiskLevel::High);
        assert_eq!(analysis.potential_loss, 0.0);
    }

    #[test]
    fn zero_sales_rate_never_sells_out() {
        let p = product(10, 0.0, 6, 20.0);
        let analysis = classify_risk(&p, today());

        assert_eq!(analysis.days_until_sold_out, SelloutHorizon::Unbounded);
        assert!(analysis.will_expire);
        // 10 units * 20 cost, nothing sells before expiry.
        assert_eq!(analysis.potential_loss, 200.0);
    }

    #[test]
    fn already_expired_days_are_negative() {
        let p = product(10, 2.0, -3, 20.0);
        let analysis = classify_risk(&p, today());

        assert_eq!(analysis.days_until_expiry, ExpiryOutlook::Known(-3));
        assert!(analysis.will_expire);
        assert_eq!(analysis.risk_level, RiskLevel::High);
        // Unsold estimate exceeds the full quantity; loss uses the raw formula.
        assert_eq!(analysis.potential_loss, (10.0 + 6.0) * 20.0);
    }

    #[test]
    fn invalid_expiry_collapses_to_low_risk() {
        let mut p = product(10, 2.0, 5, 20.0);
        p.expiry_date = None;
        let analysis = classify_risk(&p, today());

        assert_eq!(analysis.days_until_expiry, ExpiryOutlook::Invalid);
        assert!(!analysis.will_expire);
        assert_eq!(analysis.risk_level, RiskLevel::Low);
        assert_eq!(analysis.potential_loss, 0.0);
    }

    #[test]
    fn unbounded_horizon_compares_greater_than_any_finite() {
        assert!(SelloutHorizon::Unbounded > SelloutHorizon::Finite(i64::MAX));
        assert!(SelloutHorizon::Finite(3) > SelloutHorizon::Finite(2));
    }

    #[test]
    fn risk_analysis_serializes_in_camel_case() {
        let p = product(24, 8.0, 2, 45.0);
        let analysis = classify_risk(&p, today());
        let json = serde_json::to_value(&analysis).unwrap();

        assert_eq!(json["riskLevel"], "high");
        assert_eq!(json["willExpire"], true);
        assert_eq!(json["daysUntilSoldOut"], serde_json::json!({"finite": 3}));
        assert_eq!(json["daysUntilExpiry"], serde_json::json!({"known": 2}));
    }

    #[test]
    fn analyze_skips_inactive_and_sorts_by_risk() {
        let high = product(24, 8.0, 2, 45.0);
        let low = product(15, 12.0, 10, 30.0);
        let mut ignored = product(24, 8.0, 1, 45.0);
        ignored.is_ignored = true;

        let products = vec![low.clone(), ignored, high.clone()];
        let analyses = analyze(&products, today());

        assert_eq!(analyses.len(), 2);
        assert_eq!(analyses[0].product.id, high.id);
        assert_eq!(analyses[1].product.id, low.id);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: never medium risk when expiry is at most one day out.
            #[test]
            fn never_medium_when_expiring_within_a_day(
                quantity in 0u32..1000,
                rate in 0.0f64..100.0,
                expires_in in -10i64..=1,
                cost in 0.0f64..500.0,
            ) {
                let p = product(quantity, rate, expires_in, cost);
                let analysis = classify_risk(&p, today());
                prop_assert_ne!(analysis.risk_level, RiskLevel::Medium);
            }

            /// Property: zero sales rate means unbounded horizon, and any
            /// known expiry is outlived.
            #[test]
            fn zero_rate_is_unbounded_and_will_expire(
                quantity in 0u32..1000,
                expires_in in -10i64..30,
            ) {
                let p = product(quantity, 0.0, expires_in, 10.0);
                let analysis = classify_risk(&p, today());
                prop_assert_eq!(analysis.days_until_sold_out, SelloutHorizon::Unbounded);
                prop_assert!(analysis.will_expire);
            }

            /// Property: potential loss is never negative.
            #[test]
            fn potential_loss_is_clamped(
                quantity in 0u32..1000,
                rate in 0.0f64..100.0,
                expires_in in -10i64..30,
                cost in 0.0f64..500.0,
            ) {
                let p = product(quantity, rate, expires_in, cost);
                let analysis = classify_risk(&p, today());
                prop_assert!(analysis.potential_loss >= 0.0);
            }

            /// Property: classification is a pure function of its inputs.
            #[test]
            fn classification_is_deterministic(
                quantity in 0u32..1000,
                rate in 0.0f64..100.0,
                expires_in in -10i64..30,
            ) {
                let p = product(quantity, rate, expires_in, 25.0);
                let first = classify_risk(&p, today());
                let second = classify_risk(&p, today());
                prop_assert_eq!(first, second);
            }
        }
    }
}

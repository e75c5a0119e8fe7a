//! Aggregate analytics over the active product set.
//!
//! Everything here derives from the risk classifier: per-category risk
//! counts, a 14-day expiry timeline, the overall risk distribution, and
//! the headline value/waste totals.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use shelfwatch_catalog::Product;

use crate::risk::{self, ExpiryOutlook, RiskAnalysis, RiskLevel, classify_risk};

/// Days covered by the expiry forecast timeline.
pub const TIMELINE_DAYS: i64 = 14;

/// Risk counts for one category, in first-seen category order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRisk {
    pub category: String,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub total: usize,
}

/// One day of the expiry forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
    pub date: NaiveDate,
    /// Products whose expiry date falls exactly on this day.
    pub expiring: usize,
    /// Products at this expiry offset that are projected to expire before
    /// selling out.
    pub at_risk: usize,
}

/// A non-empty bucket of the overall risk distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskBucket {
    pub level: RiskLevel,
    pub count: usize,
}

/// Aggregated dashboard figures for the active product set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub category_risk: Vec<CategoryRisk>,
    pub expiry_timeline: Vec<TimelinePoint>,
    /// Buckets with a zero count are omitted, highest risk first.
    pub risk_distribution: Vec<RiskBucket>,
    /// Σ quantity × selling price over active products.
    pub total_value: f64,
    /// Σ quantity × cost price over active products projected to expire.
    pub at_risk_value: f64,
    /// Units (not currency) projected to go unsold at expiry.
    pub potential_waste: f64,
}

/// Aggregate the active product set against the reference date.
pub fn compute_analytics(products: &[Product], today: NaiveDate) -> AnalyticsSummary {
    let analyses: Vec<RiskAnalysis<'_>> = products
        .iter()
        .filter(|p| p.is_active())
        .map(|p| classify_risk(p, today))
        .collect();

    AnalyticsSummary {
        category_risk: category_risk(&analyses),
        expiry_timeline: expiry_timeline(&analyses, today),
        risk_distribution: risk_distribution(&analyses),
        total_value: analyses
            .iter()
            .map(|a| f64::from(a.product.quantity) * a.product.selling_price)
            .sum(),
        at_risk_value: analyses
            .iter()
            .filter(|a| a.will_expire)
            .map(|a| f64::from(a.product.quantity) * a.product.cost_price)
            .sum(),
        potential_waste: analyses
            .iter()
            .filter(|a| a.will_expire)
            .filter_map(|a| {
                let days = a.days_until_expiry.days()?;
                Some(risk::unsold_at_expiry(a.product, days).max(0.0))
            })
            .sum(),
    }
}

fn category_risk(analyses: &[RiskAnalysis<'_>]) -> Vec<CategoryRisk> {
    let mut table: Vec<CategoryRisk> = Vec::new();
    for analysis in analyses {
        let category = analysis.product.category.as_str();
        let index = match table.iter().position(|c| c.category == category) {
            Some(index) => index,
            None => {
                table.push(CategoryRisk {
                    category: category.to_string(),
                    high: 0,
                    medium: 0,
                    low: 0,
                    total: 0,
                });
                table.len() - 1
            }
        };
        let entry = &mut table[index];
        match analysis.risk_level {
            RiskLevel::High => entry.high += 1,
            RiskLevel::Medium => entry.medium += 1,
            RiskLevel::Low => entry.low += 1,
        }
        entry.total += 1;
    }
    table
}

fn expiry_timeline(analyses: &[RiskAnalysis<'_>], today: NaiveDate) -> Vec<TimelinePoint> {
    (0..TIMELINE_DAYS)
        .map(|offset| {
            let date = today + Duration::days(offset);
            let expiring = analyses
                .iter()
                .filter(|a| a.product.expiry_date == Some(date))
                .count();
            let at_risk = analyses
                .iter()
                .filter(|a| a.days_until_expiry == ExpiryOutlook::Known(offset) && a.will_expire)
                .count();
            TimelinePoint {
                date,
                expiring,
                at_risk,
            }
        })
        .collect()
}

fn risk_distribution(analyses: &[RiskAnalysis<'_>]) -> Vec<RiskBucket> {
    [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low]
        .into_iter()
        .map(|level| RiskBucket {
            level,
            count: analyses.iter().filter(|a| a.risk_level == level).count(),
        })
        .filter(|bucket| bucket.count > 0)
        .collect()
}

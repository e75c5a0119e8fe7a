//! Risk & Recommendation Engine for perishable inventory.
//!
//! Every entry point is a pure, deterministic function of a read-only
//! product snapshot and a reference date: no I/O, no caching, no state
//! across calls. Data-validity problems never error out of the engine;
//! they collapse into sentinel values (`ExpiryOutlook::Invalid`,
//! `SelloutHorizon::Unbounded`) that downstream consumers rank lowest.

pub mod analytics;
pub mod discount;
pub mod procurement;
pub mod risk;

pub use analytics::{AnalyticsSummary, CategoryRisk, RiskBucket, TimelinePoint, compute_analytics};
pub use discount::{
    CarbonSavings, DiscountSuggestion, suggest_discounts, total_carbon_savings,
};
pub use procurement::{ProcurementRecommendation, recommend_procurement};
pub use risk::{
    ExpiryOutlook, RiskAnalysis, RiskLevel, SelloutHorizon, Urgency, analyze, classify_risk,
    sellout_horizon,
};

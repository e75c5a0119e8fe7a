//! Plain-text rendering of the dashboard report.

use shelfwatch_engine::{
    AnalyticsSummary, DiscountSuggestion, ProcurementRecommendation, RiskAnalysis, RiskLevel,
    SelloutHorizon, Urgency, total_carbon_savings,
};

use crate::role::UserRole;

pub fn print_risk_alerts(analyses: &[RiskAnalysis<'_>]) {
    println!("== Risk Alerts ==");
    let high = count_level(analyses, RiskLevel::High);
    let medium = count_level(analyses, RiskLevel::Medium);
    println!("High Risk: {high}  Medium Risk: {medium}");

    for analysis in analyses {
        let expiry = analysis
            .days_until_expiry
            .days()
            .map(|d| format!("{d} days"))
            .unwrap_or_else(|| "invalid date".to_string());
        println!(
            "[{}] {} ({}): stock {}, expires in {}, sold out in {}",
            level_tag(analysis.risk_level),
            analysis.product.name,
            analysis.product.category,
            analysis.product.quantity,
            expiry,
            horizon(analysis.days_until_sold_out),
        );
        if analysis.will_expire {
            println!(
                "       will expire before selling out! potential loss: {:.2}",
                analysis.potential_loss
            );
        }
    }
    println!();
}

pub fn print_discounts(suggestions: &[DiscountSuggestion<'_>], role: UserRole) {
    println!("== Discount Suggestions ==");
    if suggestions.is_empty() {
        println!("No discount suggestions needed at this time!");
        println!();
        return;
    }

    let carbon = total_carbon_savings(suggestions);
    println!(
        "Carbon savings if applied: {:.1}kg food waste prevented, {:.1}kg CO2e saved",
        carbon.waste_prevented_kg, carbon.co2_saved_kg
    );

    for s in suggestions {
        let gate = if role.can_apply_discount(s.suggested_discount) {
            ""
        } else {
            " [requires admin approval]"
        };
        println!(
            "[{}] {}: {}% off -> {:.2} ({}){gate}",
            urgency_tag(s.urgency),
            s.product.name,
            s.suggested_discount,
            s.new_price,
            s.reason,
        );
        if s.potential_savings > 0.0 {
            println!("       potential loss prevention: {:.2}", s.potential_savings);
        }
    }
    println!();
}

pub fn print_procurement(recommendations: &[ProcurementRecommendation<'_>]) {
    println!("== Procurement Recommendations ==");
    if recommendations.is_empty() {
        println!("All products have sufficient stock levels!");
        println!();
        return;
    }

    for r in recommendations {
        println!(
            "[{}] {}: reorder {} units ({}), est. revenue {:.2}",
            urgency_tag(r.urgency),
            r.product.name,
            r.recommended_quantity,
            r.reason,
            r.estimated_revenue,
        );
    }
    println!();
}

pub fn print_analytics(summary: &AnalyticsSummary) {
    println!("== Analytics ==");
    println!(
        "Total inventory value: {:.2}  At-risk value: {:.2}  Potential waste: {:.0} units",
        summary.total_value, summary.at_risk_value, summary.potential_waste
    );

    for c in &summary.category_risk {
        println!(
            "{}: {} high / {} medium / {} low ({} total)",
            c.category, c.high, c.medium, c.low, c.total
        );
    }

    println!("14-day expiry forecast:");
    for point in &summary.expiry_timeline {
        if point.expiring > 0 || point.at_risk > 0 {
            println!(
                "  {}: {} expiring, {} at risk",
                point.date, point.expiring, point.at_risk
            );
        }
    }
    println!();
}

fn count_level(analyses: &[RiskAnalysis<'_>], level: RiskLevel) -> usize {
    analyses.iter().filter(|a| a.risk_level == level).count()
}

fn horizon(value: SelloutHorizon) -> String {
    match value {
        SelloutHorizon::Finite(days) => format!("{days} days"),
        SelloutHorizon::Unbounded => "never".to_string(),
    }
}

fn level_tag(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::High => "HIGH",
        RiskLevel::Medium => "MED ",
        RiskLevel::Low => "LOW ",
    }
}

fn urgency_tag(urgency: Urgency) -> &'static str {
    match urgency {
        Urgency::High => "HIGH",
        Urgency::Medium => "MED ",
        Urgency::Low => "LOW ",
    }
}

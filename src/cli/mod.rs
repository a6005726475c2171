//! Report rendering for the operator CLI.
//!
//! Turns engine output into terminal text or JSON. Styling degrades to
//! plain text automatically when stdout is not a terminal.

use std::fmt::Write as _;

use console::style;

use crate::anomaly::{
    AnomalyDashboard, PriceAnomaly, PriceOptimizationRecommendation, SpendingInsights,
};
use crate::error::Result;
use crate::health::{HealthScoreReport, ScoreCategory};

// ═══════════════════════════════════════════════════════════════════════════════
// OUTPUT FORMAT
// ═══════════════════════════════════════════════════════════════════════════════

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON format
    Json,
    /// Pretty JSON format
    JsonPretty,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Ok(OutputFormat::JsonPretty),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(rendered)
}

// ═══════════════════════════════════════════════════════════════════════════════
// HEALTH REPORT
// ═══════════════════════════════════════════════════════════════════════════════

/// Render a health score report in the requested format
pub fn render_report(report: &HealthScoreReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(report, false),
        OutputFormat::JsonPretty => to_json(report, true),
        OutputFormat::Text => Ok(report_text(report)),
    }
}

fn report_text(report: &HealthScoreReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", style("Financial Health Report").bold()));
    out.push_str(&format!(
        "Overall score: {}/100 ({})\n",
        score_styled(report.overall_score),
        report.grade.as_str()
    ));
    out.push_str(&format!(
        "Percentile: {} · Industry average: {} · Top quartile: {}\n\n",
        report.peer_comparison.percentile,
        report.peer_comparison.industry_average,
        report.peer_comparison.top_quartile
    ));

    for &category in ScoreCategory::all() {
        let score = report.category_score(category);
        let _ = writeln!(
            out,
            "  {:<14} {:>3}   {}",
            category.as_str(),
            score_styled(score),
            category_detail(report, category)
        );
    }

    if !report.recommendations.is_empty() {
        out.push_str(&format!("\n{}\n", style("Recommendations").bold()));
        for (i, recommendation) in report.recommendations.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, recommendation);
        }
    }

    out
}

fn category_detail(report: &HealthScoreReport, category: ScoreCategory) -> String {
    match category {
        ScoreCategory::Liquidity => format!(
            "runway {:.1}mo, current {:.2}, quick {:.2}",
            report.liquidity.cash_runway_months,
            report.liquidity.current_ratio,
            report.liquidity.quick_ratio
        ),
        ScoreCategory::Growth => format!(
            "MRR {:+.1}%, customers {:+.1}%, pipeline {:.2}",
            report.growth.mrr_growth_pct,
            report.growth.customer_growth_pct,
            report.growth.pipeline_health
        ),
        ScoreCategory::Profitability => format!(
            "margin {:+.1}%, breakeven {:.1}mo, burn multiple {:.2}",
            report.profitability.gross_margin_pct,
            report.profitability.months_to_breakeven,
            report.profitability.burn_multiple
        ),
        ScoreCategory::Efficiency => format!(
            "CAC payback {:.1}mo, magic number {:.2}, rule of 40 {:+.1}",
            report.efficiency.cac_payback_months,
            report.efficiency.magic_number,
            report.efficiency.rule_of_40
        ),
        ScoreCategory::Retention => format!(
            "gross {:.1}%, net {:.1}%, churn trend {:+.1}pts",
            report.retention.gross_retention_pct,
            report.retention.net_retention_pct,
            report.retention.churn_trend_pts
        ),
    }
}

fn score_styled(score: u8) -> String {
    if score >= 70 {
        style(score).green().to_string()
    } else if score >= 50 {
        style(score).yellow().to_string()
    } else {
        style(score).red().to_string()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ANOMALY LISTINGS
// ═══════════════════════════════════════════════════════════════════════════════

/// Render a price anomaly run in the requested format
pub fn render_price_anomalies(
    anomalies: &[PriceAnomaly],
    recommendations: &[PriceOptimizationRecommendation],
    format: OutputFormat,
) -> Result<String> {
    #[derive(serde::Serialize)]
    struct PriceRunDoc<'a> {
        anomalies: &'a [PriceAnomaly],
        recommendations: &'a [PriceOptimizationRecommendation],
        statistics: &'a AnomalyDashboard,
    }

    let dashboard = AnomalyDashboard::summarize(anomalies, recommendations);
    let doc = PriceRunDoc {
        anomalies,
        recommendations,
        statistics: &dashboard,
    };

    match format {
        OutputFormat::Json => to_json(&doc, false),
        OutputFormat::JsonPretty => to_json(&doc, true),
        OutputFormat::Text => {
            let mut out = String::new();
            out.push_str(&format!("{}\n", style("Price Anomaly Report").bold()));
            let _ = writeln!(
                out,
                "{} anomalies ({} critical) · potential savings ${:.2}",
                dashboard.total_anomalies,
                dashboard.critical_anomalies,
                dashboard.potential_savings
            );

            for anomaly in anomalies {
                let _ = writeln!(
                    out,
                    "  [{}] {} / {}: {}",
                    style(anomaly.severity.as_str()).bold(),
                    anomaly.vendor_name,
                    anomaly.item_description,
                    anomaly.description
                );
            }

            if !recommendations.is_empty() {
                out.push_str(&format!(
                    "\n{}\n",
                    style("Vendor switch recommendations").bold()
                ));
                for rec in recommendations {
                    let _ = writeln!(
                        out,
                        "  {}: {} -> {} saves ${:.2} ({:.1}%)",
                        rec.item_description,
                        rec.current_vendor,
                        rec.recommended_vendor,
                        rec.potential_savings,
                        rec.savings_pct
                    );
                }
            }

            Ok(out)
        }
    }
}

/// Render a spending insights roll-up in the requested format
pub fn render_spending_insights(insights: &SpendingInsights, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(insights, false),
        OutputFormat::JsonPretty => to_json(insights, true),
        OutputFormat::Text => {
            let mut out = String::new();
            out.push_str(&format!("{}\n", style("Spending Report").bold()));
            let _ = writeln!(out, "Total this month: ${:.2}", insights.total_spending);

            for share in &insights.top_categories {
                let _ = writeln!(
                    out,
                    "  {:<20} ${:>10.2}  {:>5.1}%",
                    share.category, share.amount, share.percentage
                );
            }

            if !insights.anomalies.is_empty() {
                out.push_str(&format!("\n{}\n", style("Anomalies").bold()));
                for anomaly in &insights.anomalies {
                    let _ = writeln!(
                        out,
                        "  [{}] {}",
                        style(anomaly.severity.as_str()).bold(),
                        anomaly.description
                    );
                }
            }

            if !insights.budget_alerts.is_empty() {
                out.push_str(&format!("\n{}\n", style("Budget alerts").bold()));
                for alert in &insights.budget_alerts {
                    let _ = writeln!(
                        out,
                        "  {}: ${:.2} of ${:.2} used ({:.0}%), projected overspend ${:.2}",
                        alert.category,
                        alert.spent_amount,
                        alert.budget_amount,
                        alert.percentage_used,
                        alert.projected_overspend
                    );
                }
            }

            if !insights.recommendations.is_empty() {
                out.push('\n');
                for recommendation in &insights.recommendations {
                    let _ = writeln!(out, "  · {}", recommendation);
                }
            }

            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::{FinancialSnapshot, HealthScoreEngine};
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    fn report() -> HealthScoreReport {
        let engine = HealthScoreEngine::default();
        let snapshot = FinancialSnapshot {
            cash_balance: Decimal::from(245_000),
            monthly_burn: Decimal::from(38_000),
            revenue: Decimal::from(64_000),
            expenses: Decimal::from(102_000),
            total_customers: 150,
            new_customers: 12,
            mrr_growth_pct: 7.1,
            pipeline_health: 0.75,
            current_ratio: 2.3,
            quick_ratio: 2.1,
            months_to_breakeven: 18.0,
            burn_multiple: 1.2,
            cac_payback_months: 8.2,
            magic_number: 0.89,
            gross_retention_pct: 94.2,
            net_retention_pct: 112.0,
            churn_trend_pts: -5.0,
            ..Default::default()
        };
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        engine.score_at(&snapshot, at).unwrap()
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(
            "json-pretty".parse::<OutputFormat>().unwrap(),
            OutputFormat::JsonPretty
        );
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_text_report_mentions_categories() {
        let text = render_report(&report(), OutputFormat::Text).unwrap();
        assert!(text.contains("liquidity"));
        assert!(text.contains("retention"));
        assert!(text.contains("Recommendations"));
    }

    #[test]
    fn test_json_report_carries_score_fields() {
        let json = render_report(&report(), OutputFormat::Json).unwrap();
        assert!(json.contains("\"overall_score\":72"));
        assert!(json.contains("\"percentile\":72"));
    }
}

//! Vendor price optimization.
//!
//! Compares what different vendors charge for the same item and recommends
//! switching when the gap is material. Also rolls anomalies and
//! recommendations up into dashboard statistics.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::price::{PriceAnomaly, VendorPriceHistory};
use super::types::AnomalySeverity;
use crate::utils::constants::{SAVINGS_MIN_DELTA, SAVINGS_MIN_PCT};
use crate::utils::math::{mean, safe_percent};

// ═══════════════════════════════════════════════════════════════════════════════
// RECOMMENDATION
// ═══════════════════════════════════════════════════════════════════════════════

/// A recommended vendor switch for one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceOptimizationRecommendation {
    /// Item the recommendation refers to
    pub item_description: String,
    /// Identifier of the vendor currently overpaying
    pub current_vendor_id: String,
    /// Name of the vendor currently overpaying
    pub current_vendor: String,
    /// Name of the cheaper vendor
    pub recommended_vendor: String,
    /// Average price with the current vendor
    pub current_price: Decimal,
    /// Average price with the recommended vendor
    pub recommended_price: Decimal,
    /// Average savings per purchase
    pub potential_savings: Decimal,
    /// Savings as a share of the current price (percent)
    pub savings_pct: f64,
    /// Confidence in the recommendation, in [0, 1]
    pub confidence: f64,
    /// Supporting reasoning, one sentence per line
    pub reasoning: Vec<String>,
    /// When the recommendation was generated
    pub created_at: DateTime<Utc>,
}

/// Thresholds for vendor-switch recommendations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationConfig {
    /// Minimum savings share to recommend a switch (percent)
    pub min_savings_pct: f64,
    /// Minimum absolute savings to recommend a switch
    pub min_savings_delta: Decimal,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            min_savings_pct: SAVINGS_MIN_PCT,
            min_savings_delta: Decimal::from(SAVINGS_MIN_DELTA),
        }
    }
}

/// Recommend vendor switches for items purchased from at least two vendors.
///
/// For each item, the dearest vendor (by average price) is compared against
/// the cheapest; a recommendation is emitted when the gap clears both the
/// relative and absolute thresholds.
pub fn recommend_vendor_switches(
    histories: &[VendorPriceHistory],
    config: &OptimizationConfig,
    created_at: DateTime<Utc>,
) -> Vec<PriceOptimizationRecommendation> {
    let mut by_item: BTreeMap<&str, Vec<&VendorPriceHistory>> = BTreeMap::new();
    for history in histories {
        by_item
            .entry(history.item_description.as_str())
            .or_default()
            .push(history);
    }

    let mut recommendations = Vec::new();

    for (item, vendors) in by_item {
        if vendors.len() < 2 {
            continue;
        }

        // max/min on non-empty vendor lists always succeed
        let Some(dearest) = vendors.iter().max_by_key(|h| h.average_price) else {
            continue;
        };
        let Some(cheapest) = vendors.iter().min_by_key(|h| h.average_price) else {
            continue;
        };

        let potential_savings = dearest.average_price - cheapest.average_price;
        let savings_pct = safe_percent(potential_savings, dearest.average_price);

        if savings_pct > config.min_savings_pct && potential_savings > config.min_savings_delta {
            recommendations.push(PriceOptimizationRecommendation {
                item_description: item.to_string(),
                current_vendor_id: dearest.vendor_id.clone(),
                current_vendor: dearest.vendor_name.clone(),
                recommended_vendor: cheapest.vendor_name.clone(),
                current_price: dearest.average_price,
                recommended_price: cheapest.average_price,
                potential_savings,
                savings_pct,
                confidence: (savings_pct / 100.0).min(1.0),
                reasoning: vec![
                    format!(
                        "{} offers {} for ${:.2} vs {}'s ${:.2}",
                        cheapest.vendor_name,
                        item,
                        cheapest.average_price,
                        dearest.vendor_name,
                        dearest.average_price
                    ),
                    format!(
                        "Potential savings of ${:.2} ({:.1}%)",
                        potential_savings, savings_pct
                    ),
                    format!(
                        "Based on {} transactions with {}",
                        cheapest.len(),
                        cheapest.vendor_name
                    ),
                ],
                created_at,
            });
        }
    }

    recommendations
}

// ═══════════════════════════════════════════════════════════════════════════════
// DASHBOARD STATISTICS
// ═══════════════════════════════════════════════════════════════════════════════

/// Roll-up of a price anomaly run for dashboards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyDashboard {
    /// Number of anomalies detected
    pub total_anomalies: usize,
    /// Number of critical anomalies
    pub critical_anomalies: usize,
    /// Total potential savings across recommendations
    pub potential_savings: Decimal,
    /// Mean absolute price change across anomalies (percent)
    pub average_price_variance_pct: f64,
}

impl AnomalyDashboard {
    /// Summarize a detection run
    pub fn summarize(
        anomalies: &[PriceAnomaly],
        recommendations: &[PriceOptimizationRecommendation],
    ) -> Self {
        let changes: Vec<f64> = anomalies.iter().map(|a| a.price_change_pct.abs()).collect();

        Self {
            total_anomalies: anomalies.len(),
            critical_anomalies: anomalies
                .iter()
                .filter(|a| a.severity == AnomalySeverity::Critical)
                .count(),
            potential_savings: recommendations.iter().map(|r| r.potential_savings).sum(),
            average_price_variance_pct: mean(&changes),
        }
    }
}

//! Scoring engine configuration.
//!
//! Weights, tier tables, and peer baselines are plain immutable values
//! handed to the engine at construction, never hidden globals, so a
//! future per-tenant override is an explicit parameter. Defaults come from
//! [`crate::utils::constants`].

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::utils::constants::*;

// ═══════════════════════════════════════════════════════════════════════════════
// CATEGORY WEIGHTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Weights applied to the five category scores; must sum to exactly 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Weight for the liquidity category
    pub liquidity: f64,
    /// Weight for the growth category
    pub growth: f64,
    /// Weight for the profitability category
    pub profitability: f64,
    /// Weight for the efficiency category
    pub efficiency: f64,
    /// Weight for the retention category
    pub retention: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            liquidity: WEIGHT_LIQUIDITY,
            growth: WEIGHT_GROWTH,
            profitability: WEIGHT_PROFITABILITY,
            efficiency: WEIGHT_EFFICIENCY,
            retention: WEIGHT_RETENTION,
        }
    }
}

impl ScoreWeights {
    /// Sum of all five weights
    pub fn sum(&self) -> f64 {
        self.liquidity + self.growth + self.profitability + self.efficiency + self.retention
    }

    /// Validate that the weights sum to 1.0
    pub fn validate(&self) -> Result<()> {
        let sum = self.sum();
        if (sum - 1.0).abs() > 1e-9 {
            return Err(Error::InvalidWeights { sum });
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TIER TABLES
// ═══════════════════════════════════════════════════════════════════════════════

/// Whether a metric earns points by clearing a cutoff from above or below
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BandDirection {
    /// Higher is better: the first tier with `value >= cutoff` wins
    AtLeast,
    /// Lower is better: the first tier with `value <= cutoff` wins
    AtMost,
}

/// One tier of a point scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Cutoff the metric is compared against
    pub cutoff: f64,
    /// Points awarded when the cutoff is cleared
    pub points: u8,
}

/// Tiered point scale for a single metric.
///
/// Tiers are ordered best-first; a metric clearing no tier earns the floor
/// award. NaN clears no tier by definition and also earns the floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    direction: BandDirection,
    bands: Vec<Band>,
    floor: u8,
}

impl BandScale {
    /// Build a higher-is-better scale from `(cutoff, points)` pairs, best first
    pub fn at_least(bands: &[(f64, u8)], floor: u8) -> Self {
        Self::new(BandDirection::AtLeast, bands, floor)
    }

    /// Build a lower-is-better scale from `(cutoff, points)` pairs, best first
    pub fn at_most(bands: &[(f64, u8)], floor: u8) -> Self {
        Self::new(BandDirection::AtMost, bands, floor)
    }

    fn new(direction: BandDirection, bands: &[(f64, u8)], floor: u8) -> Self {
        Self {
            direction,
            bands: bands
                .iter()
                .map(|&(cutoff, points)| Band { cutoff, points })
                .collect(),
            floor,
        }
    }

    /// Points earned by `value` on this scale
    pub fn points(&self, value: f64) -> u8 {
        for band in &self.bands {
            let cleared = match self.direction {
                BandDirection::AtLeast => value >= band.cutoff,
                BandDirection::AtMost => value <= band.cutoff,
            };
            if cleared {
                return band.points;
            }
        }
        self.floor
    }

    /// Maximum points this scale can award
    pub fn max_points(&self) -> u8 {
        self.bands
            .iter()
            .map(|b| b.points)
            .max()
            .unwrap_or(self.floor)
    }
}

/// Tier tables for every scored metric, grouped by category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreTables {
    /// Cash runway in months (liquidity)
    pub cash_runway: BandScale,
    /// Current ratio (liquidity)
    pub current_ratio: BandScale,
    /// Quick ratio (liquidity)
    pub quick_ratio: BandScale,
    /// MRR growth rate in percent (growth)
    pub mrr_growth: BandScale,
    /// Customer growth rate in percent (growth)
    pub customer_growth: BandScale,
    /// Pipeline health ratio (growth)
    pub pipeline_health: BandScale,
    /// Gross margin in percent (profitability)
    pub gross_margin: BandScale,
    /// Months to breakeven (profitability)
    pub months_to_breakeven: BandScale,
    /// Burn multiple (profitability)
    pub burn_multiple: BandScale,
    /// CAC payback in months (efficiency)
    pub cac_payback: BandScale,
    /// Magic number (efficiency)
    pub magic_number: BandScale,
    /// Rule of 40 value (efficiency)
    pub rule_of_40: BandScale,
    /// Gross retention in percent (retention)
    pub gross_retention: BandScale,
    /// Net retention in percent (retention)
    pub net_retention: BandScale,
    /// Churn trend in percentage points (retention)
    pub churn_trend: BandScale,
}

impl Default for ScoreTables {
    fn default() -> Self {
        Self {
            cash_runway: BandScale::at_least(
                &[(18.0, 40), (12.0, 35), (6.0, 25), (3.0, 15)],
                5,
            ),
            current_ratio: BandScale::at_least(&[(2.0, 30), (1.5, 25), (1.0, 15)], 5),
            quick_ratio: BandScale::at_least(&[(1.5, 30), (1.0, 25), (0.5, 15)], 5),
            mrr_growth: BandScale::at_least(
                &[(20.0, 40), (15.0, 35), (10.0, 30), (5.0, 20)],
                10,
            ),
            customer_growth: BandScale::at_least(&[(15.0, 30), (10.0, 25), (5.0, 20)], 10),
            pipeline_health: BandScale::at_least(&[(0.8, 30), (0.6, 25), (0.4, 20)], 10),
            gross_margin: BandScale::at_least(
                &[(80.0, 40), (70.0, 35), (60.0, 30), (50.0, 20)],
                10,
            ),
            months_to_breakeven: BandScale::at_most(&[(6.0, 30), (12.0, 25), (18.0, 20)], 10),
            burn_multiple: BandScale::at_most(&[(1.0, 30), (1.5, 25), (2.0, 20)], 10),
            cac_payback: BandScale::at_most(
                &[(6.0, 40), (12.0, 35), (18.0, 30), (24.0, 20)],
                10,
            ),
            magic_number: BandScale::at_least(&[(1.0, 30), (0.75, 25), (0.5, 20)], 10),
            rule_of_40: BandScale::at_least(&[(40.0, 30), (30.0, 25), (20.0, 20)], 10),
            gross_retention: BandScale::at_least(
                &[(95.0, 40), (90.0, 35), (85.0, 30), (80.0, 20)],
                10,
            ),
            net_retention: BandScale::at_least(&[(120.0, 30), (110.0, 25), (100.0, 20)], 10),
            churn_trend: BandScale::at_most(&[(-10.0, 30), (0.0, 25), (10.0, 20)], 10),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PEER BASELINES
// ═══════════════════════════════════════════════════════════════════════════════

/// Industry benchmark baselines for peer comparison.
///
/// These are fixed estimates, not a real distribution; swapping in a
/// benchmark dataset means replacing these values, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerBaselines {
    /// Industry-average overall score
    pub industry_average: u8,
    /// Top-quartile overall score
    pub top_quartile: u8,
}

impl Default for PeerBaselines {
    fn default() -> Self {
        Self {
            industry_average: INDUSTRY_AVERAGE_SCORE,
            top_quartile: TOP_QUARTILE_SCORE,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ENGINE CONFIGURATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Complete configuration for a [`crate::health::HealthScoreEngine`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Category weights
    pub weights: ScoreWeights,
    /// Tier tables for every scored metric
    pub tables: ScoreTables,
    /// Peer comparison baselines
    pub peer: PeerBaselines,
    /// Categories scoring below this threshold contribute recommendations
    pub recommendation_threshold: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            tables: ScoreTables::default(),
            peer: PeerBaselines::default(),
            recommendation_threshold: RECOMMENDATION_THRESHOLD,
        }
    }
}

impl EngineConfig {
    /// Validate the configuration is internally consistent
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;

        if self.recommendation_threshold > SCORE_MAX {
            return Err(Error::InvalidParameter {
                name: "recommendation_threshold".into(),
                reason: format!(
                    "{} exceeds maximum score {}",
                    self.recommendation_threshold, SCORE_MAX
                ),
            });
        }

        Ok(())
    }
}

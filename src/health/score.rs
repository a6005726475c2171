//! Score records produced by the health engine.
//!
//! Every record here is a fixed-shape struct with named numeric fields so
//! that weighting and recommendation logic stay statically checkable.
//! Records are created fresh on every scoring invocation and carry no
//! persisted identity; storing them is the caller's concern.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════════
// SCORE CATEGORY
// ═══════════════════════════════════════════════════════════════════════════════

/// The five scored categories, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreCategory {
    /// Cash position and runway
    Liquidity,
    /// Revenue and customer growth
    Growth,
    /// Margins and path to breakeven
    Profitability,
    /// Go-to-market efficiency
    Efficiency,
    /// Revenue and customer retention
    Retention,
}

impl ScoreCategory {
    /// All categories in report order
    pub fn all() -> &'static [ScoreCategory] {
        &[
            ScoreCategory::Liquidity,
            ScoreCategory::Growth,
            ScoreCategory::Profitability,
            ScoreCategory::Efficiency,
            ScoreCategory::Retention,
        ]
    }

    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreCategory::Liquidity => "liquidity",
            ScoreCategory::Growth => "growth",
            ScoreCategory::Profitability => "profitability",
            ScoreCategory::Efficiency => "efficiency",
            ScoreCategory::Retention => "retention",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// CATEGORY SCORES
// ═══════════════════════════════════════════════════════════════════════════════

/// Liquidity score with its supporting metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidityScore {
    /// Category score in [0, 100]
    pub score: u8,
    /// Months of runway at the current burn rate
    pub cash_runway_months: f64,
    /// Current ratio
    pub current_ratio: f64,
    /// Quick ratio
    pub quick_ratio: f64,
}

/// Growth score with its supporting metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthScore {
    /// Category score in [0, 100]
    pub score: u8,
    /// MRR growth rate (percent)
    pub mrr_growth_pct: f64,
    /// Customer growth rate (percent)
    pub customer_growth_pct: f64,
    /// Pipeline health ratio in [0, 1]
    pub pipeline_health: f64,
}

/// Profitability score with its supporting metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitabilityScore {
    /// Category score in [0, 100]
    pub score: u8,
    /// Gross margin (percent, may be negative)
    pub gross_margin_pct: f64,
    /// Projected months until breakeven
    pub months_to_breakeven: f64,
    /// Burn multiple
    pub burn_multiple: f64,
}

/// Efficiency score with its supporting metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyScore {
    /// Category score in [0, 100]
    pub score: u8,
    /// CAC payback period (months)
    pub cac_payback_months: f64,
    /// Magic number
    pub magic_number: f64,
    /// Rule of 40 value (percent)
    pub rule_of_40: f64,
}

/// Retention score with its supporting metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetentionScore {
    /// Category score in [0, 100]
    pub score: u8,
    /// Gross retention (percent)
    pub gross_retention_pct: f64,
    /// Net retention (percent)
    pub net_retention_pct: f64,
    /// Churn trend in percentage points; negative means improving
    pub churn_trend_pts: f64,
}

// ═══════════════════════════════════════════════════════════════════════════════
// HEALTH GRADE
// ═══════════════════════════════════════════════════════════════════════════════

/// Qualitative band derived from the overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HealthGrade {
    /// Strong across the board
    Excellent,
    /// Healthy with isolated weak spots
    Good,
    /// Needs attention in several categories
    Fair,
    /// Material weaknesses
    Poor,
    /// Severe financial risk
    Critical,
}

impl HealthGrade {
    /// Derive the grade from an overall score
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=100 => HealthGrade::Excellent,
            70..=89 => HealthGrade::Good,
            50..=69 => HealthGrade::Fair,
            25..=49 => HealthGrade::Poor,
            _ => HealthGrade::Critical,
        }
    }

    /// Minimum score for this grade
    pub fn min_score(&self) -> u8 {
        match self {
            HealthGrade::Excellent => 90,
            HealthGrade::Good => 70,
            HealthGrade::Fair => 50,
            HealthGrade::Poor => 25,
            HealthGrade::Critical => 0,
        }
    }

    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthGrade::Excellent => "EXCELLENT",
            HealthGrade::Good => "GOOD",
            HealthGrade::Fair => "FAIR",
            HealthGrade::Poor => "POOR",
            HealthGrade::Critical => "CRITICAL",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PEER COMPARISON
// ═══════════════════════════════════════════════════════════════════════════════

/// Benchmark comparison for an overall score.
///
/// The percentile is defined as the rounded overall score itself: an
/// estimate, not a position in a measured distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerComparison {
    /// Industry-average overall score
    pub industry_average: u8,
    /// Top-quartile overall score
    pub top_quartile: u8,
    /// This company's estimated percentile
    pub percentile: u8,
}

// ═══════════════════════════════════════════════════════════════════════════════
// HEALTH SCORE REPORT
// ═══════════════════════════════════════════════════════════════════════════════

/// Complete health score report for one snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthScoreReport {
    /// Overall score in [0, 100]
    pub overall_score: u8,
    /// Qualitative grade for the overall score
    pub grade: HealthGrade,
    /// Liquidity category score
    pub liquidity: LiquidityScore,
    /// Growth category score
    pub growth: GrowthScore,
    /// Profitability category score
    pub profitability: ProfitabilityScore,
    /// Efficiency category score
    pub efficiency: EfficiencyScore,
    /// Retention category score
    pub retention: RetentionScore,
    /// Benchmark comparison
    pub peer_comparison: PeerComparison,
    /// Recommendations in category order, two per weak category
    pub recommendations: Vec<String>,
    /// When the report was generated
    pub generated_at: DateTime<Utc>,
}

impl HealthScoreReport {
    /// Score of a single category
    pub fn category_score(&self, category: ScoreCategory) -> u8 {
        match category {
            ScoreCategory::Liquidity => self.liquidity.score,
            ScoreCategory::Growth => self.growth.score,
            ScoreCategory::Profitability => self.profitability.score,
            ScoreCategory::Efficiency => self.efficiency.score,
            ScoreCategory::Retention => self.retention.score,
        }
    }

    /// Categories scoring below `threshold`, in report order
    pub fn weak_categories(&self, threshold: u8) -> Vec<ScoreCategory> {
        ScoreCategory::all()
            .iter()
            .copied()
            .filter(|c| self.category_score(*c) < threshold)
            .collect()
    }
}

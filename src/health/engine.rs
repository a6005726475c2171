//! Health score computation.
//!
//! [`HealthScoreEngine`] turns a [`FinancialSnapshot`] into a
//! [`HealthScoreReport`]: five tiered category scores, a weighted overall
//! score, a peer comparison, and recommendations for weak categories. The
//! engine holds only its immutable configuration, so a single instance can
//! be shared freely across threads.

use chrono::{DateTime, Utc};

use super::config::EngineConfig;
use super::recommendations;
use super::score::{
    EfficiencyScore, GrowthScore, HealthGrade, HealthScoreReport, LiquidityScore, PeerComparison,
    ProfitabilityScore, RetentionScore, ScoreCategory,
};
use super::snapshot::FinancialSnapshot;
use crate::error::Result;
use crate::utils::constants::SCORE_MAX;

// ═══════════════════════════════════════════════════════════════════════════════
// HEALTH SCORE ENGINE
// ═══════════════════════════════════════════════════════════════════════════════

/// Computes financial health scores from snapshots
#[derive(Debug, Clone)]
pub struct HealthScoreEngine {
    config: EngineConfig,
}

impl HealthScoreEngine {
    /// Create an engine with the given configuration.
    ///
    /// Fails if the configuration is inconsistent (e.g. weights not
    /// summing to 1.0).
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The engine's configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Score a snapshot, stamping the report with the current time
    pub fn score(&self, snapshot: &FinancialSnapshot) -> Result<HealthScoreReport> {
        self.score_at(snapshot, Utc::now())
    }

    /// Score a snapshot with a caller-pinned report timestamp.
    ///
    /// Identical snapshots produce identical reports under the same
    /// timestamp.
    pub fn score_at(
        &self,
        snapshot: &FinancialSnapshot,
        generated_at: DateTime<Utc>,
    ) -> Result<HealthScoreReport> {
        snapshot.validate()?;

        let liquidity = self.liquidity_score(snapshot);
        let growth = self.growth_score(snapshot);
        let profitability = self.profitability_score(snapshot);
        let efficiency = self.efficiency_score(snapshot);
        let retention = self.retention_score(snapshot);

        let overall_score = self.overall_score(
            liquidity.score,
            growth.score,
            profitability.score,
            efficiency.score,
            retention.score,
        );

        let recommendations = recommendations::generate(
            &[
                (ScoreCategory::Liquidity, liquidity.score),
                (ScoreCategory::Growth, growth.score),
                (ScoreCategory::Profitability, profitability.score),
                (ScoreCategory::Efficiency, efficiency.score),
                (ScoreCategory::Retention, retention.score),
            ],
            self.config.recommendation_threshold,
        );

        tracing::debug!(
            liquidity = liquidity.score,
            growth = growth.score,
            profitability = profitability.score,
            efficiency = efficiency.score,
            retention = retention.score,
            "category scores computed"
        );
        tracing::info!(overall_score, "financial health score computed");

        Ok(HealthScoreReport {
            overall_score,
            grade: HealthGrade::from_score(overall_score),
            liquidity,
            growth,
            profitability,
            efficiency,
            retention,
            peer_comparison: self.peer_comparison(overall_score),
            recommendations,
            generated_at,
        })
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // CATEGORY SCORERS
    // ═══════════════════════════════════════════════════════════════════════════

    fn liquidity_score(&self, snapshot: &FinancialSnapshot) -> LiquidityScore {
        let tables = &self.config.tables;
        let cash_runway_months = snapshot.cash_runway_months();

        let points = tables.cash_runway.points(cash_runway_months) as u16
            + tables.current_ratio.points(snapshot.current_ratio) as u16
            + tables.quick_ratio.points(snapshot.quick_ratio) as u16;

        LiquidityScore {
            score: clamp_score(points),
            cash_runway_months,
            current_ratio: snapshot.current_ratio,
            quick_ratio: snapshot.quick_ratio,
        }
    }

    fn growth_score(&self, snapshot: &FinancialSnapshot) -> GrowthScore {
        let tables = &self.config.tables;
        let customer_growth_pct = snapshot.customer_growth_pct();

        let points = tables.mrr_growth.points(snapshot.mrr_growth_pct) as u16
            + tables.customer_growth.points(customer_growth_pct) as u16
            + tables.pipeline_health.points(snapshot.pipeline_health) as u16;

        GrowthScore {
            score: clamp_score(points),
            mrr_growth_pct: snapshot.mrr_growth_pct,
            customer_growth_pct,
            pipeline_health: snapshot.pipeline_health,
        }
    }

    fn profitability_score(&self, snapshot: &FinancialSnapshot) -> ProfitabilityScore {
        let tables = &self.config.tables;
        let gross_margin_pct = snapshot.gross_margin_pct();

        let points = tables.gross_margin.points(gross_margin_pct) as u16
            + tables.months_to_breakeven.points(snapshot.months_to_breakeven) as u16
            + tables.burn_multiple.points(snapshot.burn_multiple) as u16;

        ProfitabilityScore {
            score: clamp_score(points),
            gross_margin_pct,
            months_to_breakeven: snapshot.months_to_breakeven,
            burn_multiple: snapshot.burn_multiple,
        }
    }

    fn efficiency_score(&self, snapshot: &FinancialSnapshot) -> EfficiencyScore {
        let tables = &self.config.tables;
        let rule_of_40 = snapshot.rule_of_40();

        let points = tables.cac_payback.points(snapshot.cac_payback_months) as u16
            + tables.magic_number.points(snapshot.magic_number) as u16
            + tables.rule_of_40.points(rule_of_40) as u16;

        EfficiencyScore {
            score: clamp_score(points),
            cac_payback_months: snapshot.cac_payback_months,
            magic_number: snapshot.magic_number,
            rule_of_40,
        }
    }

    fn retention_score(&self, snapshot: &FinancialSnapshot) -> RetentionScore {
        let tables = &self.config.tables;

        let points = tables.gross_retention.points(snapshot.gross_retention_pct) as u16
            + tables.net_retention.points(snapshot.net_retention_pct) as u16
            + tables.churn_trend.points(snapshot.churn_trend_pts) as u16;

        RetentionScore {
            score: clamp_score(points),
            gross_retention_pct: snapshot.gross_retention_pct,
            net_retention_pct: snapshot.net_retention_pct,
            churn_trend_pts: snapshot.churn_trend_pts,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // AGGREGATION
    // ═══════════════════════════════════════════════════════════════════════════

    fn overall_score(
        &self,
        liquidity: u8,
        growth: u8,
        profitability: u8,
        efficiency: u8,
        retention: u8,
    ) -> u8 {
        let weights = &self.config.weights;
        let weighted = weights.liquidity * f64::from(liquidity)
            + weights.growth * f64::from(growth)
            + weights.profitability * f64::from(profitability)
            + weights.efficiency * f64::from(efficiency)
            + weights.retention * f64::from(retention);

        (weighted.round() as u8).min(SCORE_MAX)
    }

    fn peer_comparison(&self, overall_score: u8) -> PeerComparison {
        PeerComparison {
            industry_average: self.config.peer.industry_average,
            top_quartile: self.config.peer.top_quartile,
            percentile: overall_score,
        }
    }
}

impl Default for HealthScoreEngine {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }
}

/// Clamp a category's summed points to the score range
fn clamp_score(points: u16) -> u8 {
    points.min(u16::from(SCORE_MAX)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn snapshot() -> FinancialSnapshot {
        FinancialSnapshot {
            cash_balance: Decimal::from(245_000),
            monthly_burn: Decimal::from(38_000),
            revenue: Decimal::from(64_000),
            expenses: Decimal::from(102_000),
            total_customers: 150,
            new_customers: 12,
            mrr: Decimal::from(67_450),
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
        }
    }

    #[test]
    fn test_liquidity_score_buckets() {
        let engine = HealthScoreEngine::default();
        let liquidity = engine.liquidity_score(&snapshot());
        // runway 6.45mo -> 25, current 2.3 -> 30, quick 2.1 -> 30
        assert_eq!(liquidity.score, 85);
    }

    #[test]
    fn test_growth_score_buckets() {
        let engine = HealthScoreEngine::default();
        let growth = engine.growth_score(&snapshot());
        // mrr 7.1% -> 20, customers 8.0% -> 20, pipeline 0.75 -> 25
        assert_eq!(growth.score, 65);
    }

    #[test]
    fn test_profitability_score_buckets() {
        let engine = HealthScoreEngine::default();
        let profitability = engine.profitability_score(&snapshot());
        // margin -59.4% -> 10, breakeven 18mo -> 20, burn multiple 1.2 -> 25
        assert_eq!(profitability.score, 55);
        assert!(profitability.gross_margin_pct < 0.0);
    }

    #[test]
    fn test_efficiency_score_buckets() {
        let engine = HealthScoreEngine::default();
        let efficiency = engine.efficiency_score(&snapshot());
        // cac 8.2mo -> 35, magic 0.89 -> 25, rule of 40 at -52.3 -> 10
        assert_eq!(efficiency.score, 70);
    }

    #[test]
    fn test_retention_score_buckets() {
        let engine = HealthScoreEngine::default();
        let retention = engine.retention_score(&snapshot());
        // gross 94.2% -> 35, net 112% -> 25, churn -5pts -> 25
        assert_eq!(retention.score, 85);
    }

    #[test]
    fn test_overall_weighted_mean() {
        let engine = HealthScoreEngine::default();
        // 0.25*85 + 0.20*65 + 0.20*55 + 0.20*70 + 0.15*85 = 72.0
        assert_eq!(engine.overall_score(85, 65, 55, 70, 85), 72);
        assert_eq!(engine.overall_score(100, 100, 100, 100, 100), 100);
        assert_eq!(engine.overall_score(0, 0, 0, 0, 0), 0);
    }

    #[test]
    fn test_percentile_equals_overall() {
        let engine = HealthScoreEngine::default();
        let peer = engine.peer_comparison(72);
        assert_eq!(peer.percentile, 72);
        assert_eq!(peer.industry_average, 72);
        assert_eq!(peer.top_quartile, 85);
    }

    #[test]
    fn test_zero_burn_scores_without_panic() {
        let engine = HealthScoreEngine::default();
        let zero_burn = FinancialSnapshot {
            monthly_burn: Decimal::ZERO,
            ..snapshot()
        };
        let report = engine.score_at(&zero_burn, Utc::now()).unwrap();
        assert_eq!(report.liquidity.cash_runway_months, 0.0);
        assert!(report.liquidity.score <= 100);
    }

    #[test]
    fn test_invalid_snapshot_rejected() {
        let engine = HealthScoreEngine::default();
        let bad = FinancialSnapshot {
            revenue: Decimal::from(-1),
            ..FinancialSnapshot::default()
        };
        assert!(engine.score(&bad).is_err());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = EngineConfig::default();
        config.weights.liquidity = 0.5;
        assert!(HealthScoreEngine::new(config).is_err());
    }
}

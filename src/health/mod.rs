//! Financial Health Scoring.
//!
//! Computes a 0–100 health score for a company from a point-in-time
//! financial snapshot, decomposed into five weighted categories:
//!
//! - **Liquidity** (25%): cash runway, current ratio, quick ratio
//! - **Growth** (20%): MRR growth, customer growth, pipeline health
//! - **Profitability** (20%): gross margin, breakeven path, burn multiple
//! - **Efficiency** (20%): CAC payback, magic number, Rule of 40
//! - **Retention** (15%): gross retention, net retention, churn trend
//!
//! The engine is a pure function of its input and configuration: the data
//! layer assembles a [`FinancialSnapshot`], the engine returns a
//! [`HealthScoreReport`], and storing or serving the report is the
//! caller's concern.

pub mod config;
pub mod engine;
pub mod recommendations;
pub mod score;
pub mod snapshot;

pub use config::{BandScale, EngineConfig, PeerBaselines, ScoreTables, ScoreWeights};
pub use engine::HealthScoreEngine;
pub use score::{
    EfficiencyScore, GrowthScore, HealthGrade, HealthScoreReport, LiquidityScore, PeerComparison,
    ProfitabilityScore, RetentionScore, ScoreCategory,
};
pub use snapshot::FinancialSnapshot;

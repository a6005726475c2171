//! # VeriGrade Analytics Core
//!
//! Pure financial-analytics engines for the VeriGrade bookkeeping
//! platform: health scoring and anomaly detection over data the caller
//! supplies.
//!
//! ## Architecture
//!
//! - **Health**: weighted five-category financial health scoring with
//!   peer comparison and recommendations
//! - **Anomaly**: vendor price and category spending anomaly detection
//!   with vendor-switch optimization
//! - **CLI**: output rendering for the `verigrade` operator binary
//! - **Utils**: scoring constants and guarded ratio math
//!
//! ## Design Principles
//!
//! - **Pure**: every engine is a function of its input and configuration;
//!   no I/O, no hidden state, trivially safe to share across threads
//! - **Guarded**: degenerate denominators produce documented sentinels,
//!   never `NaN` or infinity
//! - **Typed**: scores and anomalies are fixed-shape records, not maps
//!
//! ## Example
//!
//! ```rust,ignore
//! use verigrade::prelude::*;
//!
//! let engine = HealthScoreEngine::default();
//! let report = engine.score(&snapshot)?;
//!
//! println!("{} ({})", report.overall_score, report.grade.as_str());
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    trivial_casts,
    unused_lifetimes,
    unused_qualifications
)]

pub mod anomaly;
pub mod cli;
pub mod error;
pub mod health;
pub mod utils;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::anomaly::{
        AnomalyDashboard, AnomalySeverity, AnomalyStatus, MarketPrice, PriceAnomaly,
        PriceAnomalyDetector, PriceSeries, SpendingAnomaly, SpendingAnomalyDetector,
        SpendingInsights, SpendingPattern, Trend, VendorPriceHistory,
    };
    pub use crate::error::{Error, Result};
    pub use crate::health::{
        EngineConfig, FinancialSnapshot, HealthGrade, HealthScoreEngine, HealthScoreReport,
        PeerComparison, ScoreCategory,
    };
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name
pub const ENGINE_NAME: &str = "verigrade";

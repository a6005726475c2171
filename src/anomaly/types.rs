//! Shared anomaly types.

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════════
// SEVERITY
// ═══════════════════════════════════════════════════════════════════════════════

/// Severity of a detected anomaly
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AnomalySeverity {
    /// Worth a look during routine review
    Low,
    /// Should be reviewed this period
    Medium,
    /// Needs prompt attention
    High,
    /// Needs immediate attention
    Critical,
}

impl AnomalySeverity {
    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalySeverity::Low => "LOW",
            AnomalySeverity::Medium => "MEDIUM",
            AnomalySeverity::High => "HIGH",
            AnomalySeverity::Critical => "CRITICAL",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// STATUS
// ═══════════════════════════════════════════════════════════════════════════════

/// Review status of a detected anomaly.
///
/// Detection always yields [`AnomalyStatus::Active`]; later transitions are
/// made by whoever stores and triages the anomaly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnomalyStatus {
    /// Newly detected, not yet reviewed
    #[default]
    Active,
    /// Under review
    Investigating,
    /// Reviewed and addressed
    Resolved,
    /// Reviewed and dismissed
    FalsePositive,
}

impl AnomalyStatus {
    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyStatus::Active => "active",
            AnomalyStatus::Investigating => "investigating",
            AnomalyStatus::Resolved => "resolved",
            AnomalyStatus::FalsePositive => "false_positive",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TREND
// ═══════════════════════════════════════════════════════════════════════════════

/// Direction of a series over time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trend {
    /// Recent values meaningfully above the older baseline
    Increasing,
    /// Recent values meaningfully below the older baseline
    Decreasing,
    /// Within the stable band of the older baseline
    Stable,
}

impl Trend {
    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Increasing => "increasing",
            Trend::Decreasing => "decreasing",
            Trend::Stable => "stable",
        }
    }
}

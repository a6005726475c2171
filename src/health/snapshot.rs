//! Financial snapshot input record.
//!
//! A [`FinancialSnapshot`] is assembled by the calling data layer and holds
//! every financial fact the scoring engine consumes. The engine never
//! fetches data itself; unknown facts must be supplied as zero, not NaN.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::utils::math::{safe_percent, safe_ratio};

// ═══════════════════════════════════════════════════════════════════════════════
// FINANCIAL SNAPSHOT
// ═══════════════════════════════════════════════════════════════════════════════

/// One company's financial and operational facts for a scoring period.
///
/// Currency fields are exact decimal amounts and must be non-negative;
/// signed results (net profit, churn trend) only appear as derived values
/// or percentage metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    /// Current cash balance
    pub cash_balance: Decimal,
    /// Average monthly net cash burn; zero for a breakeven company
    pub monthly_burn: Decimal,
    /// Revenue for the period
    pub revenue: Decimal,
    /// Expenses for the period
    pub expenses: Decimal,
    /// Total active customers
    pub total_customers: u64,
    /// Customers acquired this period
    pub new_customers: u64,
    /// Monthly recurring revenue
    pub mrr: Decimal,
    /// MRR growth rate (percent)
    pub mrr_growth_pct: f64,
    /// Sales pipeline health ratio in [0, 1]
    pub pipeline_health: f64,
    /// Current ratio (current assets / current liabilities)
    pub current_ratio: f64,
    /// Quick ratio (liquid assets / current liabilities)
    pub quick_ratio: f64,
    /// Projected months until breakeven
    pub months_to_breakeven: f64,
    /// Net burn divided by net new revenue for the period
    pub burn_multiple: f64,
    /// Months of gross margin needed to recover customer acquisition cost
    pub cac_payback_months: f64,
    /// Net new annualized revenue over prior-period sales & marketing spend
    pub magic_number: f64,
    /// Recurring revenue retained excluding expansion (percent)
    pub gross_retention_pct: f64,
    /// Recurring revenue retained including expansion (percent)
    pub net_retention_pct: f64,
    /// Churn change in percentage points; negative means improving
    pub churn_trend_pts: f64,
}

impl FinancialSnapshot {
    /// Validate that the snapshot is scoreable.
    ///
    /// Rejects negative currency amounts, non-finite metrics, a pipeline
    /// ratio outside [0, 1], and a new-customer count exceeding the total.
    pub fn validate(&self) -> Result<()> {
        validate_non_negative("cash_balance", self.cash_balance)?;
        validate_non_negative("monthly_burn", self.monthly_burn)?;
        validate_non_negative("revenue", self.revenue)?;
        validate_non_negative("expenses", self.expenses)?;
        validate_non_negative("mrr", self.mrr)?;

        validate_finite("mrr_growth_pct", self.mrr_growth_pct)?;
        validate_finite("pipeline_health", self.pipeline_health)?;
        validate_finite("current_ratio", self.current_ratio)?;
        validate_finite("quick_ratio", self.quick_ratio)?;
        validate_finite("months_to_breakeven", self.months_to_breakeven)?;
        validate_finite("burn_multiple", self.burn_multiple)?;
        validate_finite("cac_payback_months", self.cac_payback_months)?;
        validate_finite("magic_number", self.magic_number)?;
        validate_finite("gross_retention_pct", self.gross_retention_pct)?;
        validate_finite("net_retention_pct", self.net_retention_pct)?;
        validate_finite("churn_trend_pts", self.churn_trend_pts)?;

        if !(0.0..=1.0).contains(&self.pipeline_health) {
            return Err(Error::RatioOutOfRange {
                name: "pipeline_health",
                value: self.pipeline_health,
                min: 0.0,
                max: 1.0,
            });
        }

        if self.new_customers > self.total_customers {
            return Err(Error::InvalidParameter {
                name: "new_customers".into(),
                reason: format!(
                    "count {} exceeds total customers {}",
                    self.new_customers, self.total_customers
                ),
            });
        }

        Ok(())
    }

    /// Months of runway at the current burn rate.
    ///
    /// Zero burn yields a runway of 0 months, landing in the lowest runway
    /// tier. A breakeven company is therefore scored as if it had no
    /// runway; pending product clarification this matches the historical
    /// behavior of the platform.
    pub fn cash_runway_months(&self) -> f64 {
        safe_ratio(self.cash_balance, self.monthly_burn)
    }

    /// Customer growth for the period as a percentage of the total base.
    ///
    /// An empty customer base yields 0%.
    pub fn customer_growth_pct(&self) -> f64 {
        if self.total_customers == 0 {
            0.0
        } else {
            self.new_customers as f64 / self.total_customers as f64 * 100.0
        }
    }

    /// Gross margin as a percentage of revenue; may be negative.
    ///
    /// Zero revenue yields 0%, which lands in the lowest margin tier.
    pub fn gross_margin_pct(&self) -> f64 {
        safe_percent(self.revenue - self.expenses, self.revenue)
    }

    /// Rule of 40: MRR growth rate plus gross margin, both in percent.
    pub fn rule_of_40(&self) -> f64 {
        self.mrr_growth_pct + self.gross_margin_pct()
    }
}

fn validate_non_negative(name: &'static str, value: Decimal) -> Result<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(Error::NegativeAmount { name, value });
    }
    Ok(())
}

fn validate_finite(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::NonFiniteMetric { name });
    }
    Ok(())
}

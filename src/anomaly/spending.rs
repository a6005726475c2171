//! Category spending anomaly detection.
//!
//! Builds a per-category baseline from monthly spending history, then
//! flags current-month spending that departs from it: spikes, drops,
//! deviations beyond the category's usual volatility, and budget overruns
//! projected from the month-to-date run rate. The caller aggregates
//! expenses into monthly category totals; the detector never queries
//! anything.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{AnomalySeverity, AnomalyStatus, Trend};
use crate::utils::constants::*;
use crate::utils::math::{safe_percent, std_dev, to_f64};

// ═══════════════════════════════════════════════════════════════════════════════
// SPENDING SERIES
// ═══════════════════════════════════════════════════════════════════════════════

/// Total spend in one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySpend {
    /// Calendar year
    pub year: i32,
    /// Calendar month, 1–12
    pub month: u32,
    /// Total spent that month
    pub amount: Decimal,
}

/// Monthly spending history for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpending {
    /// Expense category
    pub category: String,
    /// Monthly totals in any order
    pub months: Vec<MonthlySpend>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// SPENDING PATTERN
// ═══════════════════════════════════════════════════════════════════════════════

/// Baseline spending behavior for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingPattern {
    /// Expense category
    pub category: String,
    /// Mean monthly spend over the whole series
    pub average_monthly: Decimal,
    /// Direction of recent months against the older baseline
    pub trend: Trend,
    /// Whether some calendar month consistently deviates from the mean
    pub seasonal: bool,
    /// Population standard deviation of the monthly totals
    pub volatility: f64,
    /// Spend in the most recent month
    pub last_month: Decimal,
    /// Mean over the most recent three months
    pub average_last_3_months: Decimal,
    /// Mean over the whole (up to twelve month) series
    pub average_last_12_months: Decimal,
}

impl SpendingPattern {
    /// Build the pattern for a category series.
    ///
    /// Returns `None` for an empty series; there is no baseline to
    /// compare against.
    pub fn from_series(series: &CategorySpending) -> Option<Self> {
        if series.months.is_empty() {
            return None;
        }

        let mut months = series.months.clone();
        months.sort_by_key(|m| (m.year, m.month));

        let amounts: Vec<Decimal> = months.iter().map(|m| m.amount).collect();
        let count = Decimal::from(amounts.len() as u64);
        let average_monthly = amounts.iter().copied().sum::<Decimal>() / count;

        let recent_start = amounts.len().saturating_sub(3);
        let recent = &amounts[recent_start..];
        let older = &amounts[..recent_start];

        let recent_avg =
            recent.iter().copied().sum::<Decimal>() / Decimal::from(recent.len() as u64);
        let older_avg = if older.is_empty() {
            recent_avg
        } else {
            older.iter().copied().sum::<Decimal>() / Decimal::from(older.len() as u64)
        };

        let band = TREND_BAND_PCT / 100.0;
        let (recent_f, older_f) = (to_f64(recent_avg), to_f64(older_avg));
        let trend = if recent_f > older_f * (1.0 + band) {
            Trend::Increasing
        } else if recent_f < older_f * (1.0 - band) {
            Trend::Decreasing
        } else {
            Trend::Stable
        };

        let amounts_f: Vec<f64> = amounts.iter().map(|a| to_f64(*a)).collect();

        Some(Self {
            category: series.category.clone(),
            average_monthly,
            trend,
            seasonal: detect_seasonality(&months, to_f64(average_monthly)),
            volatility: std_dev(&amounts_f),
            last_month: amounts[amounts.len() - 1],
            average_last_3_months: recent_avg,
            average_last_12_months: average_monthly,
        })
    }
}

/// A calendar month whose samples consistently deviate from the overall
/// mean marks the category as seasonal. Requires a full year of data and
/// at least two samples for the month.
fn detect_seasonality(months: &[MonthlySpend], overall_avg: f64) -> bool {
    if months.len() < SEASONALITY_MIN_MONTHS || overall_avg <= 0.0 {
        return false;
    }

    let mut by_calendar_month: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for entry in months {
        by_calendar_month
            .entry(entry.month)
            .or_default()
            .push(to_f64(entry.amount));
    }

    by_calendar_month.values().any(|samples| {
        if samples.len() < 2 {
            return false;
        }
        let avg = crate::utils::math::mean(samples);
        avg > overall_avg * (1.0 + SEASONALITY_DEVIATION_RATIO)
            || avg < overall_avg * (1.0 - SEASONALITY_DEVIATION_RATIO)
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// SPENDING ANOMALY
// ═══════════════════════════════════════════════════════════════════════════════

/// Kinds of spending anomaly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpendingAnomalyKind {
    /// Spending well above the category baseline
    Spike,
    /// Spending well below the category baseline
    Drop,
    /// Deviation beyond the category's usual volatility
    UnusualPattern,
    /// Spending past or projected past the category budget
    BudgetOverrun,
}

impl SpendingAnomalyKind {
    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            SpendingAnomalyKind::Spike => "spike",
            SpendingAnomalyKind::Drop => "drop",
            SpendingAnomalyKind::UnusualPattern => "unusual_pattern",
            SpendingAnomalyKind::BudgetOverrun => "budget_overrun",
        }
    }
}

/// A detected spending anomaly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingAnomaly {
    /// Expense category
    pub category: String,
    /// Anomaly kind
    pub kind: SpendingAnomalyKind,
    /// Human-readable description
    pub description: String,
    /// Severity
    pub severity: AnomalySeverity,
    /// Spend that triggered the anomaly
    pub current_value: Decimal,
    /// Baseline it was compared against
    pub expected_value: Decimal,
    /// Absolute deviation from the baseline
    pub variance: Decimal,
    /// Relative deviation from the baseline (percent)
    pub variance_pct: f64,
    /// When detection ran
    pub detected_at: DateTime<Utc>,
    /// Review status
    pub status: AnomalyStatus,
}

// ═══════════════════════════════════════════════════════════════════════════════
// BUDGETS
// ═══════════════════════════════════════════════════════════════════════════════

/// Monthly budget for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBudget {
    /// Expense category
    pub category: String,
    /// Budgeted amount for the month
    pub amount: Decimal,
}

/// How urgent a budget alert is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetAlertLevel {
    /// On track to overspend
    Warning,
    /// Budget materially exceeded
    Critical,
}

/// A budget on track to be (or already) exceeded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetAlert {
    /// Expense category
    pub category: String,
    /// Budgeted amount for the month
    pub budget_amount: Decimal,
    /// Spent so far this month
    pub spent_amount: Decimal,
    /// Budget left, floored at zero
    pub remaining_amount: Decimal,
    /// Share of the budget used (percent)
    pub percentage_used: f64,
    /// Days left in the month
    pub days_remaining: u32,
    /// Projected month-end spend past the budget, floored at zero
    pub projected_overspend: Decimal,
    /// Alert level
    pub level: BudgetAlertLevel,
    /// When the check ran
    pub created_at: DateTime<Utc>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// DETECTOR
// ═══════════════════════════════════════════════════════════════════════════════

/// Thresholds for spending anomaly detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingAnomalyConfig {
    /// Variance over the monthly average flagged as a spike (percent)
    pub spike_variance_pct: f64,
    /// Spike also requires spend above this multiple of the average
    pub spike_multiplier: f64,
    /// Variance under the monthly average flagged as a drop (percent, negative)
    pub drop_variance_pct: f64,
    /// Drop also requires spend below this fraction of the average
    pub drop_fraction: f64,
    /// Volatility as a fraction of the average that marks a category volatile
    pub volatile_category_ratio: f64,
    /// Deviations beyond this many volatilities are unusual
    pub unusual_sigma: f64,
    /// Budget usage above this share escalates an alert to critical (percent)
    pub budget_critical_pct: f64,
}

impl Default for SpendingAnomalyConfig {
    fn default() -> Self {
        Self {
            spike_variance_pct: SPENDING_SPIKE_VARIANCE_PCT,
            spike_multiplier: SPENDING_SPIKE_MULTIPLIER,
            drop_variance_pct: SPENDING_DROP_VARIANCE_PCT,
            drop_fraction: SPENDING_DROP_FRACTION,
            volatile_category_ratio: SPENDING_VOLATILITY_RATIO,
            unusual_sigma: UNUSUAL_PATTERN_SIGMA,
            budget_critical_pct: BUDGET_CRITICAL_PCT,
        }
    }
}

/// Detects spending anomalies against category baselines
#[derive(Debug, Clone, Default)]
pub struct SpendingAnomalyDetector {
    config: SpendingAnomalyConfig,
}

impl SpendingAnomalyDetector {
    /// Create a detector with the given thresholds
    pub fn new(config: SpendingAnomalyConfig) -> Self {
        Self { config }
    }

    /// The detector's thresholds
    pub fn config(&self) -> &SpendingAnomalyConfig {
        &self.config
    }

    /// Detect spikes, drops, and unusual patterns in current-month spend.
    ///
    /// Categories with zero current spend are skipped; a month with no
    /// activity yet says nothing about behavior.
    pub fn detect(
        &self,
        patterns: &[SpendingPattern],
        current_spending: &BTreeMap<String, Decimal>,
        detected_at: DateTime<Utc>,
    ) -> Vec<SpendingAnomaly> {
        let mut anomalies = Vec::new();

        for pattern in patterns {
            let current = current_spending
                .get(&pattern.category)
                .copied()
                .unwrap_or(Decimal::ZERO);
            if current.is_zero() {
                continue;
            }

            let variance = current - pattern.average_monthly;
            let variance_pct = safe_percent(variance, pattern.average_monthly);

            if let Some(anomaly) = self.check_spike(pattern, current, variance_pct, detected_at) {
                anomalies.push(anomaly);
            }
            if let Some(anomaly) = self.check_drop(pattern, current, variance_pct, detected_at) {
                anomalies.push(anomaly);
            }
            if let Some(anomaly) = self.check_unusual(pattern, current, detected_at) {
                anomalies.push(anomaly);
            }
        }

        tracing::debug!(count = anomalies.len(), "spending anomaly detection finished");
        anomalies
    }

    /// Detect anomalies and fold projected budget overruns in as
    /// [`SpendingAnomalyKind::BudgetOverrun`] entries.
    pub fn detect_with_budgets(
        &self,
        patterns: &[SpendingPattern],
        current_spending: &BTreeMap<String, Decimal>,
        budgets: &[CategoryBudget],
        as_of: DateTime<Utc>,
    ) -> Vec<SpendingAnomaly> {
        let mut anomalies = self.detect(patterns, current_spending, as_of);

        for alert in self.check_budgets(budgets, current_spending, as_of) {
            anomalies.push(SpendingAnomaly {
                category: alert.category.clone(),
                kind: SpendingAnomalyKind::BudgetOverrun,
                description: format!("Budget overrun detected in {}", alert.category),
                severity: match alert.level {
                    BudgetAlertLevel::Critical => AnomalySeverity::High,
                    BudgetAlertLevel::Warning => AnomalySeverity::Medium,
                },
                current_value: alert.spent_amount,
                expected_value: alert.budget_amount,
                variance: alert.projected_overspend,
                variance_pct: alert.percentage_used - 100.0,
                detected_at: as_of,
                status: AnomalyStatus::Active,
            });
        }

        anomalies
    }

    /// Check month-to-date spend against budgets, projecting month-end
    /// spend from the daily run rate.
    ///
    /// Categories without a positive budget are skipped; there is nothing
    /// meaningful to project against.
    pub fn check_budgets(
        &self,
        budgets: &[CategoryBudget],
        current_spending: &BTreeMap<String, Decimal>,
        as_of: DateTime<Utc>,
    ) -> Vec<BudgetAlert> {
        let day_of_month = as_of.day();
        let month_days = days_in_month(as_of.year(), as_of.month());
        let mut alerts = Vec::new();

        for budget in budgets {
            if budget.amount <= Decimal::ZERO {
                continue;
            }

            let spent = current_spending
                .get(&budget.category)
                .copied()
                .unwrap_or(Decimal::ZERO);
            let percentage_used = safe_percent(spent, budget.amount);

            let daily_rate = spent / Decimal::from(day_of_month);
            let projected = daily_rate * Decimal::from(month_days);
            let projected_overspend = (projected - budget.amount).max(Decimal::ZERO);

            if percentage_used > 100.0 || projected_overspend > Decimal::ZERO {
                alerts.push(BudgetAlert {
                    category: budget.category.clone(),
                    budget_amount: budget.amount,
                    spent_amount: spent,
                    remaining_amount: (budget.amount - spent).max(Decimal::ZERO),
                    percentage_used,
                    days_remaining: month_days - day_of_month,
                    projected_overspend,
                    level: if percentage_used > self.config.budget_critical_pct {
                        BudgetAlertLevel::Critical
                    } else {
                        BudgetAlertLevel::Warning
                    },
                    created_at: as_of,
                });
            }
        }

        alerts
    }

    fn check_spike(
        &self,
        pattern: &SpendingPattern,
        current: Decimal,
        variance_pct: f64,
        detected_at: DateTime<Utc>,
    ) -> Option<SpendingAnomaly> {
        let threshold = to_f64(pattern.average_monthly) * self.config.spike_multiplier;
        if variance_pct <= self.config.spike_variance_pct || to_f64(current) <= threshold {
            return None;
        }

        Some(SpendingAnomaly {
            category: pattern.category.clone(),
            kind: SpendingAnomalyKind::Spike,
            description: format!(
                "Significant spending spike detected in {}",
                pattern.category
            ),
            severity: if variance_pct > 100.0 {
                AnomalySeverity::High
            } else if variance_pct > 75.0 {
                AnomalySeverity::Medium
            } else {
                AnomalySeverity::Low
            },
            current_value: current,
            expected_value: pattern.average_monthly,
            variance: current - pattern.average_monthly,
            variance_pct,
            detected_at,
            status: AnomalyStatus::Active,
        })
    }

    fn check_drop(
        &self,
        pattern: &SpendingPattern,
        current: Decimal,
        variance_pct: f64,
        detected_at: DateTime<Utc>,
    ) -> Option<SpendingAnomaly> {
        let threshold = to_f64(pattern.average_monthly) * self.config.drop_fraction;
        if variance_pct >= self.config.drop_variance_pct || to_f64(current) >= threshold {
            return None;
        }

        Some(SpendingAnomaly {
            category: pattern.category.clone(),
            kind: SpendingAnomalyKind::Drop,
            description: format!(
                "Significant spending drop detected in {}",
                pattern.category
            ),
            severity: if variance_pct.abs() > 75.0 {
                AnomalySeverity::Medium
            } else {
                AnomalySeverity::Low
            },
            current_value: current,
            expected_value: pattern.average_monthly,
            variance: current - pattern.average_monthly,
            variance_pct,
            detected_at,
            status: AnomalyStatus::Active,
        })
    }

    fn check_unusual(
        &self,
        pattern: &SpendingPattern,
        current: Decimal,
        detected_at: DateTime<Utc>,
    ) -> Option<SpendingAnomaly> {
        let average = to_f64(pattern.average_monthly);
        let deviation = (to_f64(current) - average).abs();

        if pattern.volatility <= average * self.config.volatile_category_ratio
            || deviation <= pattern.volatility * self.config.unusual_sigma
        {
            return None;
        }

        Some(SpendingAnomaly {
            category: pattern.category.clone(),
            kind: SpendingAnomalyKind::UnusualPattern,
            description: format!(
                "Unusual spending pattern detected in {}",
                pattern.category
            ),
            severity: AnomalySeverity::Medium,
            current_value: current,
            expected_value: pattern.average_monthly,
            variance: current - pattern.average_monthly,
            variance_pct: safe_percent(current - pattern.average_monthly, pattern.average_monthly),
            detected_at,
            status: AnomalyStatus::Active,
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// INSIGHTS
// ═══════════════════════════════════════════════════════════════════════════════

/// One category's share of current-month spend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    /// Expense category
    pub category: String,
    /// Spend this month
    pub amount: Decimal,
    /// Share of total current spend (percent)
    pub percentage: f64,
}

/// Per-category trend with its recent-vs-baseline delta
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendDelta {
    /// Expense category
    pub category: String,
    /// Direction of the series
    pub trend: Trend,
    /// Three-month average minus the twelve-month average
    pub change: Decimal,
}

/// Current-month spending roll-up with anomalies and budget alerts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingInsights {
    /// Total spend this month across all categories
    pub total_spending: Decimal,
    /// Spend per category
    pub category_breakdown: BTreeMap<String, Decimal>,
    /// Up to five largest categories with their share of spend
    pub top_categories: Vec<CategoryShare>,
    /// Per-category trend deltas
    pub trends: Vec<TrendDelta>,
    /// Detected anomalies, including budget overruns
    pub anomalies: Vec<SpendingAnomaly>,
    /// Budget alerts
    pub budget_alerts: Vec<BudgetAlert>,
    /// Proactive suggestions derived from the roll-up
    pub recommendations: Vec<String>,
}

impl SpendingAnomalyDetector {
    /// Build the full spending roll-up for the current month.
    pub fn insights(
        &self,
        series: &[CategorySpending],
        current_spending: &BTreeMap<String, Decimal>,
        budgets: &[CategoryBudget],
        as_of: DateTime<Utc>,
    ) -> SpendingInsights {
        let patterns: Vec<SpendingPattern> =
            series.iter().filter_map(SpendingPattern::from_series).collect();

        let total_spending: Decimal = current_spending.values().copied().sum();

        let mut top_categories: Vec<CategoryShare> = current_spending
            .iter()
            .map(|(category, &amount)| CategoryShare {
                category: category.clone(),
                amount,
                percentage: safe_percent(amount, total_spending),
            })
            .collect();
        top_categories.sort_by(|a, b| b.amount.cmp(&a.amount));
        top_categories.truncate(5);

        let trends = patterns
            .iter()
            .map(|p| TrendDelta {
                category: p.category.clone(),
                trend: p.trend,
                change: p.average_last_3_months - p.average_last_12_months,
            })
            .collect();

        let anomalies = self.detect_with_budgets(&patterns, current_spending, budgets, as_of);
        let budget_alerts = self.check_budgets(budgets, current_spending, as_of);

        let mut recommendations = Vec::new();
        if let Some(top) = top_categories.first() {
            if top.percentage > TOP_CATEGORY_REVIEW_PCT {
                recommendations.push(format!(
                    "Consider reviewing spending in {} ({:.1}% of total)",
                    top.category, top.percentage
                ));
            }
        }
        if !budget_alerts.is_empty() {
            recommendations.push("Review budget allocations to prevent overspending".to_string());
        }
        if !anomalies.is_empty() {
            recommendations.push("Investigate unusual spending patterns".to_string());
        }

        SpendingInsights {
            total_spending,
            category_breakdown: current_spending.clone(),
            top_categories,
            trends,
            anomalies,
            budget_alerts,
            recommendations,
        }
    }
}

/// Days in a calendar month
fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) {
                29
            } else {
                28
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn series(category: &str, amounts: &[i64]) -> CategorySpending {
        let months = amounts
            .iter()
            .enumerate()
            .map(|(i, &amount)| MonthlySpend {
                year: 2025,
                month: i as u32 + 1,
                amount: Decimal::from(amount),
            })
            .collect();
        CategorySpending {
            category: category.into(),
            months,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
    }

    fn spend(category: &str, amount: i64) -> BTreeMap<String, Decimal> {
        BTreeMap::from([(category.to_string(), Decimal::from(amount))])
    }

    #[test]
    fn test_pattern_from_empty_series() {
        let empty = CategorySpending {
            category: "software".into(),
            months: Vec::new(),
        };
        assert!(SpendingPattern::from_series(&empty).is_none());
    }

    #[test]
    fn test_pattern_basics() {
        let pattern = SpendingPattern::from_series(&series("software", &[100, 200, 300])).unwrap();
        assert_eq!(pattern.average_monthly, Decimal::from(200));
        assert_eq!(pattern.last_month, Decimal::from(300));
        assert_eq!(pattern.average_last_3_months, Decimal::from(200));
    }

    #[test]
    fn test_pattern_trend() {
        let rising =
            SpendingPattern::from_series(&series("ads", &[100, 100, 100, 200, 200, 200])).unwrap();
        assert_eq!(rising.trend, Trend::Increasing);

        let falling =
            SpendingPattern::from_series(&series("ads", &[200, 200, 200, 100, 100, 100])).unwrap();
        assert_eq!(falling.trend, Trend::Decreasing);

        let flat = SpendingPattern::from_series(&series("ads", &[100, 100, 100, 100])).unwrap();
        assert_eq!(flat.trend, Trend::Stable);
    }

    #[test]
    fn test_seasonality_needs_full_year() {
        let short = SpendingPattern::from_series(&series("travel", &[100; 6])).unwrap();
        assert!(!short.seasonal);
    }

    #[test]
    fn test_seasonality_detected_on_recurring_month() {
        // Two Decembers far above the mean of an otherwise flat series
        let mut months: Vec<MonthlySpend> = (1..=12)
            .map(|month| MonthlySpend {
                year: 2024,
                month,
                amount: Decimal::from(if month == 12 { 500 } else { 100 }),
            })
            .collect();
        months.extend((1..=12).map(|month| MonthlySpend {
            year: 2025,
            month,
            amount: Decimal::from(if month == 12 { 500 } else { 100 }),
        }));

        let pattern = SpendingPattern::from_series(&CategorySpending {
            category: "gifts".into(),
            months,
        })
        .unwrap();
        assert!(pattern.seasonal);
    }

    #[test]
    fn test_spike_detected() {
        let detector = SpendingAnomalyDetector::default();
        let patterns =
            vec![SpendingPattern::from_series(&series("software", &[100, 100, 100])).unwrap()];
        let anomalies = detector.detect(&patterns, &spend("software", 250), now());

        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].kind, SpendingAnomalyKind::Spike);
        assert_eq!(anomalies[0].severity, AnomalySeverity::High);
        assert!((anomalies[0].variance_pct - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_moderate_overage_not_a_spike() {
        let detector = SpendingAnomalyDetector::default();
        let patterns =
            vec![SpendingPattern::from_series(&series("software", &[100, 100, 100])).unwrap()];
        // +40% is within normal variation
        assert!(detector.detect(&patterns, &spend("software", 140), now()).is_empty());
    }

    #[test]
    fn test_drop_detected() {
        let detector = SpendingAnomalyDetector::default();
        let patterns =
            vec![SpendingPattern::from_series(&series("payroll", &[1000, 1000, 1000])).unwrap()];
        let anomalies = detector.detect(&patterns, &spend("payroll", 200), now());

        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].kind, SpendingAnomalyKind::Drop);
        assert_eq!(anomalies[0].severity, AnomalySeverity::Medium);
    }

    #[test]
    fn test_zero_current_spend_skipped() {
        let detector = SpendingAnomalyDetector::default();
        let patterns =
            vec![SpendingPattern::from_series(&series("payroll", &[1000, 1000])).unwrap()];
        assert!(detector.detect(&patterns, &BTreeMap::new(), now()).is_empty());
    }

    #[test]
    fn test_unusual_pattern_detected() {
        let detector = SpendingAnomalyDetector::default();
        // Highly volatile series: avg 300, std-dev ~163
        let patterns =
            vec![SpendingPattern::from_series(&series("events", &[100, 300, 500])).unwrap()];
        let anomalies = detector.detect(&patterns, &spend("events", 700), now());

        assert!(anomalies
            .iter()
            .any(|a| a.kind == SpendingAnomalyKind::UnusualPattern));
    }

    #[test]
    fn test_budget_warning_and_critical() {
        let detector = SpendingAnomalyDetector::default();
        let budgets = vec![
            CategoryBudget {
                category: "ads".into(),
                amount: Decimal::from(1000),
            },
            CategoryBudget {
                category: "software".into(),
                amount: Decimal::from(1000),
            },
        ];
        let mut spending = spend("ads", 1300);
        spending.insert("software".into(), Decimal::from(600));

        // Mid-month: software projects to 1240, ads is already 130% used
        let alerts = detector.check_budgets(&budgets, &spending, now());
        assert_eq!(alerts.len(), 2);

        let ads = alerts.iter().find(|a| a.category == "ads").unwrap();
        assert_eq!(ads.level, BudgetAlertLevel::Critical);
        assert_eq!(ads.remaining_amount, Decimal::ZERO);

        let software = alerts.iter().find(|a| a.category == "software").unwrap();
        assert_eq!(software.level, BudgetAlertLevel::Warning);
        assert!(software.projected_overspend > Decimal::ZERO);
    }

    #[test]
    fn test_budget_under_plan_no_alert() {
        let detector = SpendingAnomalyDetector::default();
        let budgets = vec![CategoryBudget {
            category: "ads".into(),
            amount: Decimal::from(1000),
        }];
        // 400 by mid-January projects to ~827
        let alerts = detector.check_budgets(&budgets, &spend("ads", 400), now());
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_overrun_folded_into_anomalies() {
        let detector = SpendingAnomalyDetector::default();
        let budgets = vec![CategoryBudget {
            category: "ads".into(),
            amount: Decimal::from(1000),
        }];
        let anomalies =
            detector.detect_with_budgets(&[], &spend("ads", 1300), &budgets, now());

        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].kind, SpendingAnomalyKind::BudgetOverrun);
        assert_eq!(anomalies[0].severity, AnomalySeverity::High);
        assert!((anomalies[0].variance_pct - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_insights_rollup() {
        let detector = SpendingAnomalyDetector::default();
        let history = vec![
            series("ads", &[100, 100, 100]),
            series("payroll", &[900, 900, 900]),
        ];
        let budgets = vec![CategoryBudget {
            category: "ads".into(),
            amount: Decimal::from(100),
        }];
        let mut spending = spend("ads", 450);
        spending.insert("payroll".into(), Decimal::from(550));

        let insights = detector.insights(&history, &spending, &budgets, now());

        assert_eq!(insights.total_spending, Decimal::from(1000));
        assert_eq!(insights.top_categories.len(), 2);
        assert_eq!(insights.top_categories[0].category, "payroll");
        assert!((insights.top_categories[0].percentage - 55.0).abs() < 1e-9);
        assert_eq!(insights.trends.len(), 2);

        // ads: 450 on a 100 average is a spike and blows the budget
        assert!(insights
            .anomalies
            .iter()
            .any(|a| a.kind == SpendingAnomalyKind::Spike));
        assert!(insights
            .anomalies
            .iter()
            .any(|a| a.kind == SpendingAnomalyKind::BudgetOverrun));
        assert_eq!(insights.budget_alerts.len(), 1);

        // payroll is the top category at 55%: over the review threshold
        assert!(insights.recommendations.iter().any(|r| r.contains("payroll")));
        assert!(insights
            .recommendations
            .iter()
            .any(|r| r.contains("budget allocations")));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2026, 1), 31);
        assert_eq!(days_in_month(2026, 4), 30);
        assert_eq!(days_in_month(2026, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
    }
}

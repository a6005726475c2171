//! Guarded ratio math shared by the scoring and anomaly engines.
//!
//! Every helper here substitutes a defined value for a degenerate
//! denominator so that no `NaN` or infinity can reach a report.

use num_traits::ToPrimitive;
use rust_decimal::Decimal;

// ═══════════════════════════════════════════════════════════════════════════════
// DECIMAL BOUNDARY
// ═══════════════════════════════════════════════════════════════════════════════

/// Convert a decimal amount to `f64` for ratio math.
///
/// Amounts within the decimal range always convert; the zero fallback only
/// exists to keep the conversion total.
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Divide two decimal amounts, returning 0.0 when the denominator is zero.
pub fn safe_ratio(numerator: Decimal, denominator: Decimal) -> f64 {
    if denominator.is_zero() {
        0.0
    } else {
        to_f64(numerator) / to_f64(denominator)
    }
}

/// Express `numerator / denominator` as a percentage, 0.0 on a zero denominator.
pub fn safe_percent(numerator: Decimal, denominator: Decimal) -> f64 {
    safe_ratio(numerator, denominator) * 100.0
}

// ═══════════════════════════════════════════════════════════════════════════════
// FLOAT HELPERS
// ═══════════════════════════════════════════════════════════════════════════════

/// Percentage change from `previous` to `current`, 0.0 when `previous` is zero.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        0.0
    } else {
        (current - previous) / previous * 100.0
    }
}

/// Arithmetic mean, 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation, 0.0 for fewer than two values.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

//! Scoring and detection constants.
//!
//! All engine-wide constants are defined here for easy auditing and
//! modification. Configuration structs default to these values.

// ═══════════════════════════════════════════════════════════════════════════════
// SCORE CONSTANTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Maximum value for any score (overall or per category)
pub const SCORE_MAX: u8 = 100;

/// Category weight for liquidity in the overall score
pub const WEIGHT_LIQUIDITY: f64 = 0.25;

/// Category weight for growth in the overall score
pub const WEIGHT_GROWTH: f64 = 0.20;

/// Category weight for profitability in the overall score
pub const WEIGHT_PROFITABILITY: f64 = 0.20;

/// Category weight for efficiency in the overall score
pub const WEIGHT_EFFICIENCY: f64 = 0.20;

/// Category weight for retention in the overall score
pub const WEIGHT_RETENTION: f64 = 0.15;

/// Categories scoring below this threshold contribute recommendations
pub const RECOMMENDATION_THRESHOLD: u8 = 70;

// ═══════════════════════════════════════════════════════════════════════════════
// PEER BENCHMARK CONSTANTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Industry-average overall score baseline
pub const INDUSTRY_AVERAGE_SCORE: u8 = 72;

/// Top-quartile overall score baseline
pub const TOP_QUARTILE_SCORE: u8 = 85;

// ═══════════════════════════════════════════════════════════════════════════════
// PRICE ANOMALY CONSTANTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Consecutive price increase flagged as a spike (percent)
pub const PRICE_SPIKE_PCT: f64 = 50.0;

/// Minimum absolute increase for a spike (whole currency units)
pub const PRICE_SPIKE_MIN_DELTA: i64 = 10;

/// Consecutive price decrease flagged as a drop (percent, negative)
pub const PRICE_DROP_PCT: f64 = -30.0;

/// Minimum absolute decrease for a drop (whole currency units)
pub const PRICE_DROP_MIN_DELTA: i64 = 5;

/// Premium over market average flagged as above-market (percent)
pub const ABOVE_MARKET_PCT: f64 = 20.0;

/// Minimum absolute premium for above-market (whole currency units)
pub const ABOVE_MARKET_MIN_DELTA: i64 = 10;

/// Round-amount step for suspicious pricing (whole currency units)
pub const ROUND_PRICE_STEP: i64 = 100;

/// Share of round-amount transactions flagged as suspicious
pub const SUSPICIOUS_ROUND_SHARE: f64 = 0.5;

/// Volatility as a fraction of average price flagged as suspicious
pub const SUSPICIOUS_VOLATILITY_RATIO: f64 = 0.5;

/// Minimum price points before pattern checks apply
pub const MIN_POINTS_FOR_PATTERNS: usize = 3;

/// Band around the older average within which a trend counts as stable (percent)
pub const TREND_BAND_PCT: f64 = 10.0;

// ═══════════════════════════════════════════════════════════════════════════════
// PRICE OPTIMIZATION CONSTANTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Minimum savings share to recommend a vendor switch (percent)
pub const SAVINGS_MIN_PCT: f64 = 15.0;

/// Minimum absolute savings to recommend a vendor switch (whole currency units)
pub const SAVINGS_MIN_DELTA: i64 = 5;

// ═══════════════════════════════════════════════════════════════════════════════
// SPENDING ANOMALY CONSTANTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Variance over the monthly average flagged as a spending spike (percent)
pub const SPENDING_SPIKE_VARIANCE_PCT: f64 = 50.0;

/// Current spend must also exceed this multiple of the monthly average
pub const SPENDING_SPIKE_MULTIPLIER: f64 = 1.5;

/// Variance under the monthly average flagged as a spending drop (percent, negative)
pub const SPENDING_DROP_VARIANCE_PCT: f64 = -50.0;

/// Current spend must also fall below this fraction of the monthly average
pub const SPENDING_DROP_FRACTION: f64 = 0.5;

/// Volatility as a fraction of the average that marks a category volatile
pub const SPENDING_VOLATILITY_RATIO: f64 = 0.5;

/// Deviations beyond this many volatilities are unusual
pub const UNUSUAL_PATTERN_SIGMA: f64 = 2.0;

/// Months of history required before seasonality detection applies
pub const SEASONALITY_MIN_MONTHS: usize = 12;

/// Calendar-month deviation from the overall mean that marks seasonality
pub const SEASONALITY_DEVIATION_RATIO: f64 = 0.3;

/// Budget usage above this share escalates an alert to critical (percent)
pub const BUDGET_CRITICAL_PCT: f64 = 120.0;

/// Top-category share of current spend that triggers a review suggestion (percent)
pub const TOP_CATEGORY_REVIEW_PCT: f64 = 40.0;

//! Vendor price anomaly detection.
//!
//! Flags unusual movements in what vendors charge for a recurring item:
//! sudden spikes or drops between consecutive purchases, prices sitting
//! above a market reference, and pricing patterns that warrant a fraud
//! review. The detector is pure: the caller supplies the purchase history
//! (and optionally a market reference) and stores whatever comes back.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{AnomalySeverity, AnomalyStatus, Trend};
use crate::utils::constants::*;
use crate::utils::math::{percent_change, std_dev, to_f64};

// ═══════════════════════════════════════════════════════════════════════════════
// PRICE HISTORY
// ═══════════════════════════════════════════════════════════════════════════════

/// One observed price for a vendor/item pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Price paid
    pub price: Decimal,
    /// When the transaction occurred
    pub observed_at: DateTime<Utc>,
    /// Source transaction reference
    pub transaction_id: String,
}

/// Raw price series as supplied by the data layer.
///
/// Use [`PriceSeries::into_history`] to get a [`VendorPriceHistory`] with
/// its statistics computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    /// Vendor identifier
    pub vendor_id: String,
    /// Vendor display name
    pub vendor_name: String,
    /// Item the prices refer to
    pub item_description: String,
    /// Observed prices in any order
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Compute history statistics from this series
    pub fn into_history(self) -> VendorPriceHistory {
        VendorPriceHistory::new(
            self.vendor_id,
            self.vendor_name,
            self.item_description,
            self.points,
        )
    }
}

/// Price history for a vendor/item pair with derived statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorPriceHistory {
    /// Vendor identifier
    pub vendor_id: String,
    /// Vendor display name
    pub vendor_name: String,
    /// Item the prices refer to
    pub item_description: String,
    /// Observed prices, oldest first
    points: Vec<PricePoint>,
    /// Mean of all observed prices
    pub average_price: Decimal,
    /// Population standard deviation of the prices
    pub volatility: f64,
    /// Direction of the series
    pub trend: Trend,
}

impl VendorPriceHistory {
    /// Build a history, sorting the points chronologically and computing
    /// average, volatility, and trend.
    pub fn new(
        vendor_id: String,
        vendor_name: String,
        item_description: String,
        mut points: Vec<PricePoint>,
    ) -> Self {
        points.sort_by_key(|p| p.observed_at);

        let average_price = if points.is_empty() {
            Decimal::ZERO
        } else {
            points.iter().map(|p| p.price).sum::<Decimal>() / Decimal::from(points.len() as u64)
        };

        let prices: Vec<f64> = points.iter().map(|p| to_f64(p.price)).collect();
        let volatility = std_dev(&prices);
        let trend = Self::compute_trend(&prices);

        Self {
            vendor_id,
            vendor_name,
            item_description,
            points,
            average_price,
            volatility,
            trend,
        }
    }

    /// Observed prices, oldest first
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Number of observed prices
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the history is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recently observed price
    pub fn latest_price(&self) -> Option<Decimal> {
        self.points.last().map(|p| p.price)
    }

    /// Older-half mean vs newer-half mean, with a stable band around the
    /// older baseline.
    fn compute_trend(prices: &[f64]) -> Trend {
        if prices.len() < 2 {
            return Trend::Stable;
        }

        let mid = prices.len() / 2;
        let older = crate::utils::math::mean(&prices[..mid]);
        let newer = crate::utils::math::mean(&prices[mid..]);
        let band = TREND_BAND_PCT / 100.0;

        if newer > older * (1.0 + band) {
            Trend::Increasing
        } else if newer < older * (1.0 - band) {
            Trend::Decreasing
        } else {
            Trend::Stable
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// MARKET REFERENCE
// ═══════════════════════════════════════════════════════════════════════════════

/// Market reference price for an item, supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketPrice {
    /// Item the reference refers to
    pub item_description: String,
    /// Average market price
    pub average: Decimal,
    /// Low end of the observed market range
    pub low: Decimal,
    /// High end of the observed market range
    pub high: Decimal,
    /// Median market price
    pub median: Decimal,
    /// Confidence in the reference, in [0, 1]
    pub confidence: f64,
    /// Where the reference came from
    pub source: String,
    /// When the reference was last refreshed
    pub as_of: DateTime<Utc>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// PRICE ANOMALY
// ═══════════════════════════════════════════════════════════════════════════════

/// Kinds of price anomaly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceAnomalyKind {
    /// Sharp increase between consecutive purchases
    PriceSpike,
    /// Sharp decrease between consecutive purchases
    PriceDrop,
    /// Latest price sits well above the market reference
    AboveMarket,
    /// Pricing pattern warranting a fraud review
    SuspiciousPricing,
}

impl PriceAnomalyKind {
    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceAnomalyKind::PriceSpike => "price_spike",
            PriceAnomalyKind::PriceDrop => "price_drop",
            PriceAnomalyKind::AboveMarket => "above_market",
            PriceAnomalyKind::SuspiciousPricing => "suspicious_pricing",
        }
    }
}

/// A detected price anomaly.
///
/// Carries no identity of its own; the persistence layer assigns one when
/// it stores the anomaly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceAnomaly {
    /// Vendor identifier
    pub vendor_id: String,
    /// Vendor display name
    pub vendor_name: String,
    /// Item the anomaly refers to
    pub item_description: String,
    /// Price that triggered the anomaly
    pub current_price: Decimal,
    /// Price it was compared against (previous purchase or market average)
    pub reference_price: Decimal,
    /// Absolute change against the reference
    pub price_change: Decimal,
    /// Relative change against the reference (percent)
    pub price_change_pct: f64,
    /// Anomaly kind
    pub kind: PriceAnomalyKind,
    /// Severity
    pub severity: AnomalySeverity,
    /// Human-readable description
    pub description: String,
    /// When detection ran
    pub detected_at: DateTime<Utc>,
    /// Review status
    pub status: AnomalyStatus,
}

// ═══════════════════════════════════════════════════════════════════════════════
// DETECTOR
// ═══════════════════════════════════════════════════════════════════════════════

/// Thresholds for price anomaly detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceAnomalyConfig {
    /// Consecutive increase flagged as a spike (percent)
    pub spike_pct: f64,
    /// Minimum absolute increase for a spike
    pub spike_min_delta: Decimal,
    /// Consecutive decrease flagged as a drop (percent, negative)
    pub drop_pct: f64,
    /// Minimum absolute decrease for a drop
    pub drop_min_delta: Decimal,
    /// Premium over the market average flagged as above-market (percent)
    pub above_market_pct: f64,
    /// Minimum absolute premium for above-market
    pub above_market_min_delta: Decimal,
    /// Round-amount step for the suspicious-pricing check
    pub round_price_step: Decimal,
    /// Share of round-amount transactions flagged as suspicious
    pub suspicious_round_share: f64,
    /// Volatility as a fraction of the average price flagged as suspicious
    pub suspicious_volatility_ratio: f64,
    /// Minimum points before pattern checks apply
    pub min_points_for_patterns: usize,
}

impl Default for PriceAnomalyConfig {
    fn default() -> Self {
        Self {
            spike_pct: PRICE_SPIKE_PCT,
            spike_min_delta: Decimal::from(PRICE_SPIKE_MIN_DELTA),
            drop_pct: PRICE_DROP_PCT,
            drop_min_delta: Decimal::from(PRICE_DROP_MIN_DELTA),
            above_market_pct: ABOVE_MARKET_PCT,
            above_market_min_delta: Decimal::from(ABOVE_MARKET_MIN_DELTA),
            round_price_step: Decimal::from(ROUND_PRICE_STEP),
            suspicious_round_share: SUSPICIOUS_ROUND_SHARE,
            suspicious_volatility_ratio: SUSPICIOUS_VOLATILITY_RATIO,
            min_points_for_patterns: MIN_POINTS_FOR_PATTERNS,
        }
    }
}

/// Detects price anomalies in vendor purchase histories
#[derive(Debug, Clone, Default)]
pub struct PriceAnomalyDetector {
    config: PriceAnomalyConfig,
}

impl PriceAnomalyDetector {
    /// Create a detector with the given thresholds
    pub fn new(config: PriceAnomalyConfig) -> Self {
        Self { config }
    }

    /// The detector's thresholds
    pub fn config(&self) -> &PriceAnomalyConfig {
        &self.config
    }

    /// Run every check against a history.
    ///
    /// The above-market check only runs when a market reference is given.
    pub fn detect(
        &self,
        history: &VendorPriceHistory,
        market: Option<&MarketPrice>,
        detected_at: DateTime<Utc>,
    ) -> Vec<PriceAnomaly> {
        let mut anomalies = Vec::new();
        anomalies.extend(self.detect_spikes(history, detected_at));
        anomalies.extend(self.detect_drops(history, detected_at));
        if let Some(market) = market {
            anomalies.extend(self.detect_above_market(history, market, detected_at));
        }
        anomalies.extend(self.detect_suspicious(history, detected_at));

        tracing::debug!(
            vendor = %history.vendor_name,
            item = %history.item_description,
            count = anomalies.len(),
            "price anomaly detection finished"
        );

        anomalies
    }

    /// Run every check against many histories
    pub fn detect_all(
        &self,
        histories: &[VendorPriceHistory],
        markets: &[MarketPrice],
        detected_at: DateTime<Utc>,
    ) -> Vec<PriceAnomaly> {
        histories
            .iter()
            .flat_map(|history| {
                let market = markets
                    .iter()
                    .find(|m| m.item_description == history.item_description);
                self.detect(history, market, detected_at)
            })
            .collect()
    }

    fn detect_spikes(
        &self,
        history: &VendorPriceHistory,
        detected_at: DateTime<Utc>,
    ) -> Vec<PriceAnomaly> {
        let mut anomalies = Vec::new();

        for pair in history.points().windows(2) {
            let previous = pair[0].price;
            let current = pair[1].price;
            let change = current - previous;
            let change_pct = percent_change(to_f64(current), to_f64(previous));

            if change_pct > self.config.spike_pct && change > self.config.spike_min_delta {
                anomalies.push(PriceAnomaly {
                    vendor_id: history.vendor_id.clone(),
                    vendor_name: history.vendor_name.clone(),
                    item_description: history.item_description.clone(),
                    current_price: current,
                    reference_price: previous,
                    price_change: change,
                    price_change_pct: change_pct,
                    kind: PriceAnomalyKind::PriceSpike,
                    severity: severity_for_change(change_pct),
                    description: format!(
                        "Price spike detected: {:.1}% increase from ${:.2} to ${:.2}",
                        change_pct, previous, current
                    ),
                    detected_at,
                    status: AnomalyStatus::Active,
                });
            }
        }

        anomalies
    }

    fn detect_drops(
        &self,
        history: &VendorPriceHistory,
        detected_at: DateTime<Utc>,
    ) -> Vec<PriceAnomaly> {
        let mut anomalies = Vec::new();

        for pair in history.points().windows(2) {
            let previous = pair[0].price;
            let current = pair[1].price;
            let change = current - previous;
            let change_pct = percent_change(to_f64(current), to_f64(previous));

            if change_pct < self.config.drop_pct && change.abs() > self.config.drop_min_delta {
                anomalies.push(PriceAnomaly {
                    vendor_id: history.vendor_id.clone(),
                    vendor_name: history.vendor_name.clone(),
                    item_description: history.item_description.clone(),
                    current_price: current,
                    reference_price: previous,
                    price_change: change,
                    price_change_pct: change_pct,
                    kind: PriceAnomalyKind::PriceDrop,
                    severity: severity_for_change(change_pct.abs()),
                    description: format!(
                        "Price drop detected: {:.1}% decrease from ${:.2} to ${:.2}",
                        change_pct, previous, current
                    ),
                    detected_at,
                    status: AnomalyStatus::Active,
                });
            }
        }

        anomalies
    }

    fn detect_above_market(
        &self,
        history: &VendorPriceHistory,
        market: &MarketPrice,
        detected_at: DateTime<Utc>,
    ) -> Vec<PriceAnomaly> {
        let Some(current) = history.latest_price() else {
            return Vec::new();
        };

        let difference = current - market.average;
        let difference_pct = percent_change(to_f64(current), to_f64(market.average));

        if difference_pct > self.config.above_market_pct
            && difference > self.config.above_market_min_delta
        {
            return vec![PriceAnomaly {
                vendor_id: history.vendor_id.clone(),
                vendor_name: history.vendor_name.clone(),
                item_description: history.item_description.clone(),
                current_price: current,
                reference_price: market.average,
                price_change: difference,
                price_change_pct: difference_pct,
                kind: PriceAnomalyKind::AboveMarket,
                severity: severity_for_change(difference_pct),
                description: format!(
                    "Above market pricing: ${:.2} vs market average ${:.2} ({:.1}% above market)",
                    current, market.average, difference_pct
                ),
                detected_at,
                status: AnomalyStatus::Active,
            }];
        }

        Vec::new()
    }

    fn detect_suspicious(
        &self,
        history: &VendorPriceHistory,
        detected_at: DateTime<Utc>,
    ) -> Vec<PriceAnomaly> {
        if history.len() < self.config.min_points_for_patterns {
            return Vec::new();
        }

        let mut anomalies = Vec::new();
        let current = history.latest_price().unwrap_or(Decimal::ZERO);

        // Round-amount clustering reads as hand-entered or fabricated invoices
        let step = self.config.round_price_step;
        let round_count = history
            .points()
            .iter()
            .filter(|p| p.price >= step && (p.price % step).is_zero())
            .count();

        if (round_count as f64) > history.len() as f64 * self.config.suspicious_round_share {
            anomalies.push(PriceAnomaly {
                vendor_id: history.vendor_id.clone(),
                vendor_name: history.vendor_name.clone(),
                item_description: history.item_description.clone(),
                current_price: current,
                reference_price: Decimal::ZERO,
                price_change: Decimal::ZERO,
                price_change_pct: 0.0,
                kind: PriceAnomalyKind::SuspiciousPricing,
                severity: AnomalySeverity::Medium,
                description: format!(
                    "Suspicious pricing pattern: {}/{} transactions are round dollar amounts",
                    round_count,
                    history.len()
                ),
                detected_at,
                status: AnomalyStatus::Active,
            });
        }

        let average = to_f64(history.average_price);
        if average > 0.0 && history.volatility > average * self.config.suspicious_volatility_ratio {
            anomalies.push(PriceAnomaly {
                vendor_id: history.vendor_id.clone(),
                vendor_name: history.vendor_name.clone(),
                item_description: history.item_description.clone(),
                current_price: current,
                reference_price: Decimal::ZERO,
                price_change: Decimal::ZERO,
                price_change_pct: 0.0,
                kind: PriceAnomalyKind::SuspiciousPricing,
                severity: AnomalySeverity::Medium,
                description: format!(
                    "High price volatility detected: {:.1}% variation",
                    history.volatility / average * 100.0
                ),
                detected_at,
                status: AnomalyStatus::Active,
            });
        }

        anomalies
    }
}

/// Severity from the magnitude of a relative change
fn severity_for_change(change_pct: f64) -> AnomalySeverity {
    if change_pct > 100.0 {
        AnomalySeverity::Critical
    } else if change_pct > 50.0 {
        AnomalySeverity::High
    } else if change_pct > 25.0 {
        AnomalySeverity::Medium
    } else {
        AnomalySeverity::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(n: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, n, 12, 0, 0).unwrap()
    }

    fn point(price: i64, n: u32) -> PricePoint {
        PricePoint {
            price: Decimal::from(price),
            observed_at: day(n),
            transaction_id: format!("txn-{n}"),
        }
    }

    fn history(prices: &[i64]) -> VendorPriceHistory {
        let points = prices
            .iter()
            .enumerate()
            .map(|(i, &p)| point(p, i as u32 + 1))
            .collect();
        VendorPriceHistory::new(
            "v-1".into(),
            "Acme Supplies".into(),
            "printer toner".into(),
            points,
        )
    }

    #[test]
    fn test_history_sorts_points() {
        let points = vec![point(30, 3), point(10, 1), point(20, 2)];
        let history =
            VendorPriceHistory::new("v".into(), "V".into(), "item".into(), points);
        assert_eq!(history.latest_price(), Some(Decimal::from(30)));
        assert_eq!(history.points()[0].price, Decimal::from(10));
    }

    #[test]
    fn test_history_average() {
        let history = history(&[10, 20, 30]);
        assert_eq!(history.average_price, Decimal::from(20));
    }

    #[test]
    fn test_trend_detection() {
        assert_eq!(history(&[100, 100, 150, 160]).trend, Trend::Increasing);
        assert_eq!(history(&[100, 100, 60, 50]).trend, Trend::Decreasing);
        assert_eq!(history(&[100, 101, 99, 100]).trend, Trend::Stable);
        assert_eq!(history(&[100]).trend, Trend::Stable);
    }

    #[test]
    fn test_spike_detected() {
        let detector = PriceAnomalyDetector::default();
        let anomalies = detector.detect(&history(&[100, 200]), None, day(5));

        assert_eq!(anomalies.len(), 1);
        let spike = &anomalies[0];
        assert_eq!(spike.kind, PriceAnomalyKind::PriceSpike);
        assert_eq!(spike.severity, AnomalySeverity::High);
        assert_eq!(spike.price_change, Decimal::from(100));
        assert!((spike.price_change_pct - 100.0).abs() < 1e-9);
        assert!(spike.description.contains("100.0% increase"));
    }

    #[test]
    fn test_small_spike_ignored() {
        let detector = PriceAnomalyDetector::default();
        // +60% but only $6 absolute: under the $10 floor
        let anomalies = detector.detect(&history(&[10, 16]), None, day(5));
        assert!(anomalies.is_empty());
    }

    #[test]
    fn test_drop_detected() {
        let detector = PriceAnomalyDetector::default();
        let anomalies = detector.detect(&history(&[200, 100]), None, day(5));

        assert_eq!(anomalies.len(), 1);
        let drop = &anomalies[0];
        assert_eq!(drop.kind, PriceAnomalyKind::PriceDrop);
        assert!((drop.price_change_pct - (-50.0)).abs() < 1e-9);
        assert_eq!(drop.severity, AnomalySeverity::Medium);
    }

    #[test]
    fn test_above_market_detected() {
        let detector = PriceAnomalyDetector::default();
        let market = MarketPrice {
            item_description: "printer toner".into(),
            average: Decimal::from(50),
            low: Decimal::from(30),
            high: Decimal::from(80),
            median: Decimal::from(50),
            confidence: 0.8,
            source: "market_data_api".into(),
            as_of: day(1),
        };
        let anomalies =
            detector.detect_above_market(&history(&[70, 75]), &market, day(5));

        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].kind, PriceAnomalyKind::AboveMarket);
        assert_eq!(anomalies[0].reference_price, Decimal::from(50));
        assert!((anomalies[0].price_change_pct - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_round_amount_pattern_detected() {
        let detector = PriceAnomalyDetector::default();
        let anomalies = detector.detect_suspicious(&history(&[100, 200, 300, 142]), day(5));

        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].kind, PriceAnomalyKind::SuspiciousPricing);
        assert!(anomalies[0].description.contains("3/4"));
    }

    #[test]
    fn test_pattern_checks_need_three_points() {
        let detector = PriceAnomalyDetector::default();
        assert!(detector.detect_suspicious(&history(&[100, 200]), day(5)).is_empty());
    }

    #[test]
    fn test_volatility_pattern_detected() {
        let detector = PriceAnomalyDetector::default();
        // avg 110, population std-dev ~81.6: well over half the average
        let anomalies = detector.detect_suspicious(&history(&[10, 110, 210]), day(5));

        assert!(anomalies
            .iter()
            .any(|a| a.description.contains("volatility")));
    }

    #[test]
    fn test_severity_bands() {
        assert_eq!(severity_for_change(150.0), AnomalySeverity::Critical);
        assert_eq!(severity_for_change(75.0), AnomalySeverity::High);
        assert_eq!(severity_for_change(30.0), AnomalySeverity::Medium);
        assert_eq!(severity_for_change(20.0), AnomalySeverity::Low);
    }
}

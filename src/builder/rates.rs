//! Hourly rates for staffing resources.
//!
//! The estimator has always priced staffing at a flat placeholder rate rather
//! than the pricing table. [`FlatRate`] keeps that behaviour and is what the
//! canvas aggregation uses by default; [`PricingTable`] performs the real
//! lookup for callers that opt in.

use crate::models::{PricingRecord, ResourceKey};

/// Placeholder rate used by the canvas estimator.
pub const DEFAULT_FLAT_RATE: f64 = 200.0;

/// Placeholder rate the offering detail page prices unpriced activities at.
pub const OFFERING_DETAIL_RATE: f64 = 430.0;

/// Rate used by [`PricingTable`] when no pricing row applies.
pub const PRICING_FALLBACK_RATE: f64 = 100.0;

/// Source of per-hour rates for a resource.
pub trait RateSource: Send + Sync {
    fn rate_for(&self, key: &ResourceKey) -> f64;
}

/// The same rate for every resource.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatRate(pub f64);

impl Default for FlatRate {
    fn default() -> Self {
        Self(DEFAULT_FLAT_RATE)
    }
}

impl FlatRate {
    /// `None` for rates that are negative or not finite.
    pub fn checked(rate: f64) -> Option<Self> {
        (rate.is_finite() && rate >= 0.0).then_some(Self(rate))
    }

    pub fn offering_detail() -> Self {
        Self(OFFERING_DETAIL_RATE)
    }
}

impl RateSource for FlatRate {
    fn rate_for(&self, _key: &ResourceKey) -> f64 {
        self.0
    }
}

/// Rates looked up by country, role and band.
///
/// Prefers the sale price, then the cost, then [`PRICING_FALLBACK_RATE`].
#[derive(Debug, Clone, Default)]
pub struct PricingTable {
    rows: Vec<PricingRecord>,
}

impl PricingTable {
    pub fn new(rows: Vec<PricingRecord>) -> Self {
        Self { rows }
    }

    pub fn find(&self, key: &ResourceKey) -> Option<&PricingRecord> {
        self.rows
            .iter()
            .find(|row| row.matches(&key.role, key.band, &key.country))
    }
}

impl RateSource for PricingTable {
    fn rate_for(&self, key: &ResourceKey) -> f64 {
        self.find(key)
            .and_then(|row| positive(row.sale_price).or(positive(row.cost)))
            .unwrap_or(PRICING_FALLBACK_RATE)
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

//! Offering estimates against the real pricing table.
//!
//! Unlike the canvas estimator, which prices every hour at a flat rate, this
//! looks up cost and sale price for each staffing row by country, role and band.

use crate::models::{EstimateLine, OfferingEstimate, PricingRecord, StaffingRecord};

/// Total hours, cost and sale price for an offering's staffing.
///
/// Every row counts towards `total_hours`; only rows with a matching pricing
/// entry contribute money and appear in the breakdown.
pub fn estimate_offering(
    offering_id: impl Into<String>,
    staffing: &[StaffingRecord],
    pricing: &[PricingRecord],
) -> OfferingEstimate {
    let mut estimate = OfferingEstimate {
        offering_id: offering_id.into(),
        total_hours: 0,
        total_cost: 0.0,
        total_sale_price: 0.0,
        breakdown: Vec::new(),
    };

    for row in staffing {
        let hours = row.hours.unwrap_or(0);
        estimate.total_hours += u64::from(hours);

        let Some(price) = pricing
            .iter()
            .find(|p| p.matches(&row.role, row.band, &row.country))
        else {
            tracing::debug!(role = %row.role, band = row.band, country = %row.country, "No pricing for staffing row");
            continue;
        };

        let cost_per_hour = price.cost.unwrap_or(0.0);
        let sale_price_per_hour = price.sale_price.unwrap_or(0.0);
        let total_cost = cost_per_hour * f64::from(hours);
        let total_sale_price = sale_price_per_hour * f64::from(hours);
        estimate.total_cost += total_cost;
        estimate.total_sale_price += total_sale_price;

        estimate.breakdown.push(EstimateLine {
            staffing_id: row.staffing_id,
            country: row.country.clone(),
            role: row.role.clone(),
            band: row.band,
            hours,
            cost_per_hour,
            sale_price_per_hour,
            total_cost,
            total_sale_price,
        });
    }

    estimate
}

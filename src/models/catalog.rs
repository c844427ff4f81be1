use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An activity row as served by the upstream catalog API.
///
/// Every descriptive field is optional upstream; the defaults are applied by
/// [`crate::catalog::normalize_activity`], never by callers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub activity_id: Uuid,
    pub activity_name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub duration_weeks: Option<u32>,
    #[serde(default)]
    pub duration_hours: Option<u32>,
    #[serde(default)]
    pub effort_hours: Option<u32>,
    #[serde(default)]
    pub fixed_price: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub outcome: Option<String>,
    #[serde(default)]
    pub deliverables: Option<String>,
    #[serde(default)]
    pub ibm_responsibilities: Option<String>,
    #[serde(default)]
    pub client_responsibilities: Option<String>,
    #[serde(default)]
    pub assumptions: Option<String>,
    #[serde(default)]
    pub completion_criteria: Option<String>,
    #[serde(default)]
    pub sequence: Option<i32>,
    #[serde(default)]
    pub is_mandatory: Option<bool>,
}

/// An offering row as served by the upstream catalog API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfferingRecord {
    pub offering_id: Uuid,
    pub offering_name: String,
    #[serde(default)]
    pub offering_summary: Option<String>,
    #[serde(default)]
    pub tag_line: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub product_id: Option<Uuid>,
    #[serde(default)]
    pub saas_type: Option<String>,
    /// Free text such as `"6 weeks"`; sorted as text.
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub part_numbers: Option<String>,
}

/// A staffing row joined to the activity it belongs to
/// (offering → activity → WBS → staffing upstream).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffingRecord {
    #[serde(default)]
    pub staffing_id: Option<Uuid>,
    pub activity_id: Uuid,
    pub country: String,
    pub role: String,
    pub band: u32,
    #[serde(default)]
    pub hours: Option<u32>,
}

/// A pricing row joined with its staffing role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingRecord {
    #[serde(default)]
    pub pricing_id: Option<Uuid>,
    #[serde(default)]
    pub staffing_id: Option<Uuid>,
    pub country: String,
    pub role: String,
    pub band: u32,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub sale_price: Option<f64>,
}

impl PricingRecord {
    pub fn matches(&self, role: &str, band: u32, country: &str) -> bool {
        self.role == role && self.band == band && self.country == country
    }
}

/// Total hours and prices for an offering against the pricing table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferingEstimate {
    pub offering_id: String,
    pub total_hours: u64,
    pub total_cost: f64,
    pub total_sale_price: f64,
    pub breakdown: Vec<EstimateLine>,
}

/// One priced staffing row of an [`OfferingEstimate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateLine {
    pub staffing_id: Option<Uuid>,
    pub country: String,
    pub role: String,
    pub band: u32,
    pub hours: u32,
    pub cost_per_hour: f64,
    pub sale_price_per_hour: f64,
    pub total_cost: f64,
    pub total_sale_price: f64,
}

//! Turning upstream records into [`Activity`] values.
//!
//! This is the only place the fallback chains for hours, cost, duration and
//! the text blocks live. Each chain is a total function: it always produces a
//! value, and a zero or empty upstream value counts as missing.

use crate::builder::RateSource;
use crate::models::{Activity, ActivityRecord, StaffingAllocation, StaffingRecord};

/// Hours in one working week, used to convert hour durations to weeks.
pub const HOURS_PER_WEEK: u32 = 40;

/// Effort assumed when neither staffing nor the record give any hours.
pub const DEFAULT_HOURS: u32 = 40;

const DEFAULT_SCOPE: &str = "Activity scope";
const DEFAULT_OUTCOME: &str = "Activity outcome";
const DEFAULT_ASSUMPTIONS: &str = "Standard assumptions apply";
const DEFAULT_PROVIDER_RESPONSIBILITIES: &str = "IBM responsibilities not specified";
const DEFAULT_CLIENT_RESPONSIBILITIES: &str = "Client responsibilities not specified";

/// Normalise every record of an offering, keeping upstream order.
///
/// `staffing` may hold rows for any activity; each record picks its own.
pub fn normalize_offering(
    records: &[ActivityRecord],
    staffing: &[StaffingRecord],
    rates: &dyn RateSource,
) -> Vec<Activity> {
    records
        .iter()
        .map(|record| normalize_activity(record, staffing, rates))
        .collect()
}

pub fn normalize_activity(
    record: &ActivityRecord,
    staffing: &[StaffingRecord],
    rates: &dyn RateSource,
) -> Activity {
    let allocations: Vec<StaffingAllocation> = staffing
        .iter()
        .filter(|row| row.activity_id == record.activity_id)
        .map(|row| StaffingAllocation {
            role: row.role.clone(),
            country: row.country.clone(),
            band: row.band,
            hours: row.hours.unwrap_or(0),
        })
        .collect();

    Activity {
        id: record.activity_id,
        name: record.activity_name.clone(),
        category: record.category.clone(),
        duration_weeks: duration_weeks(record),
        hours: activity_hours(record, &allocations),
        cost: activity_cost(record, &allocations, rates),
        scope: text(&record.description).unwrap_or(DEFAULT_SCOPE).to_string(),
        outcome: text(&record.outcome)
            .or(text(&record.deliverables))
            .unwrap_or(DEFAULT_OUTCOME)
            .to_string(),
        responsibilities: responsibilities(record),
        assumptions: text(&record.assumptions)
            .unwrap_or(DEFAULT_ASSUMPTIONS)
            .to_string(),
        completion_criteria: text(&record.completion_criteria)
            .or(text(&record.deliverables))
            .or(text(&record.outcome))
            .map(str::to_string),
        staffing: allocations,
    }
}

/// Weeks field, else `ceil(duration_hours / 40)`, else one week.
pub fn duration_weeks(record: &ActivityRecord) -> u32 {
    if let Some(weeks) = positive(record.duration_weeks) {
        return weeks;
    }
    positive(record.duration_hours)
        .map(|hours| hours.div_ceil(HOURS_PER_WEEK))
        .unwrap_or(1)
}

/// Staffing hours, else effort hours, else duration hours, else [`DEFAULT_HOURS`].
pub fn activity_hours(record: &ActivityRecord, staffing: &[StaffingAllocation]) -> u32 {
    let staffed: u64 = staffing.iter().map(|s| u64::from(s.hours)).sum();
    if staffed > 0 {
        return u32::try_from(staffed).unwrap_or(u32::MAX);
    }
    positive(record.effort_hours)
        .or(positive(record.duration_hours))
        .unwrap_or(DEFAULT_HOURS)
}

/// Staffing cost at the given rates, else the fixed price, else zero.
pub fn activity_cost(
    record: &ActivityRecord,
    staffing: &[StaffingAllocation],
    rates: &dyn RateSource,
) -> f64 {
    let staffed: f64 = staffing
        .iter()
        .map(|s| f64::from(s.hours) * rates.rate_for(&s.resource_key()))
        .sum();
    if staffed > 0.0 {
        return staffed;
    }
    record.fixed_price.filter(|p| *p > 0.0).unwrap_or(0.0)
}

fn responsibilities(record: &ActivityRecord) -> String {
    let provider = text(&record.ibm_responsibilities).unwrap_or(DEFAULT_PROVIDER_RESPONSIBILITIES);
    let client = text(&record.client_responsibilities).unwrap_or(DEFAULT_CLIENT_RESPONSIBILITIES);
    format!("IBM: {}\n\nClient: {}", provider, client)
}

fn text(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn positive(value: Option<u32>) -> Option<u32> {
    value.filter(|v| *v > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::FlatRate;
    use uuid::Uuid;

    fn record() -> ActivityRecord {
        ActivityRecord {
            activity_id: Uuid::new_v4(),
            activity_name: "Discovery Workshop".to_string(),
            ..Default::default()
        }
    }

    fn staff(activity_id: Uuid, hours: Option<u32>) -> StaffingRecord {
        StaffingRecord {
            staffing_id: None,
            activity_id,
            country: "US".to_string(),
            role: "Consultant".to_string(),
            band: 8,
            hours,
        }
    }

    #[test]
    fn bare_record_gets_every_default() {
        let activity = normalize_activity(&record(), &[], &FlatRate::default());

        assert_eq!(activity.category, None);
        assert_eq!(activity.duration_weeks, 1);
        assert_eq!(activity.hours, 40);
        assert_eq!(activity.cost, 0.0);
        assert_eq!(activity.scope, "Activity scope");
        assert_eq!(activity.outcome, "Activity outcome");
        assert_eq!(activity.assumptions, "Standard assumptions apply");
        assert_eq!(
            activity.responsibilities,
            "IBM: IBM responsibilities not specified\n\nClient: Client responsibilities not specified"
        );
        assert_eq!(activity.completion_criteria, None);
        assert!(activity.staffing.is_empty());
    }

    #[test]
    fn duration_prefers_weeks_then_converts_hours() {
        let mut r = record();
        r.duration_weeks = Some(3);
        r.duration_hours = Some(200);
        assert_eq!(duration_weeks(&r), 3);

        r.duration_weeks = Some(0);
        assert_eq!(duration_weeks(&r), 5);

        r.duration_hours = Some(41);
        assert_eq!(duration_weeks(&r), 2);
    }

    #[test]
    fn hours_follow_staffing_then_effort_then_duration() {
        let mut r = record();
        r.effort_hours = Some(24);
        r.duration_hours = Some(80);
        assert_eq!(activity_hours(&r, &[]), 24);

        r.effort_hours = None;
        assert_eq!(activity_hours(&r, &[]), 80);

        let staffed = normalize_activity(&r, &[staff(r.activity_id, Some(16))], &FlatRate::default());
        assert_eq!(staffed.hours, 16);
    }

    #[test]
    fn zero_staffing_hours_fall_through_to_record() {
        let mut r = record();
        r.effort_hours = Some(12);
        let activity = normalize_activity(&r, &[staff(r.activity_id, None)], &FlatRate::default());
        assert_eq!(activity.hours, 12);
        assert_eq!(activity.staffing[0].hours, 0);
    }

    #[test]
    fn cost_uses_staffing_then_fixed_price() {
        let mut r = record();
        r.fixed_price = Some(5000.0);
        assert_eq!(activity_cost(&r, &[], &FlatRate::default()), 5000.0);

        let activity = normalize_activity(&r, &[staff(r.activity_id, Some(10))], &FlatRate::default());
        assert_eq!(activity.cost, 2000.0);
    }

    #[test]
    fn only_matching_staffing_rows_are_attached() {
        let r = record();
        let rows = vec![staff(r.activity_id, Some(8)), staff(Uuid::new_v4(), Some(99))];
        let activity = normalize_activity(&r, &rows, &FlatRate::default());
        assert_eq!(activity.staffing.len(), 1);
        assert_eq!(activity.hours, 8);
    }

    #[test]
    fn text_chains_skip_empty_values() {
        let mut r = record();
        r.outcome = Some(String::new());
        r.deliverables = Some("Roadmap".to_string());
        r.description = Some(String::new());
        let activity = normalize_activity(&r, &[], &FlatRate::default());

        assert_eq!(activity.scope, "Activity scope");
        assert_eq!(activity.outcome, "Roadmap");
        assert_eq!(activity.completion_criteria.as_deref(), Some("Roadmap"));
    }

    #[test]
    fn huge_staffing_hours_saturate() {
        let r = record();
        let rows = vec![
            staff(r.activity_id, Some(3_000_000_000)),
            staff(r.activity_id, Some(3_000_000_000)),
        ];
        let activity = normalize_activity(&r, &rows, &FlatRate::default());
        assert_eq!(activity.hours, u32::MAX);
        assert_eq!(activity.staffed_hours(), 6_000_000_000);
    }
}

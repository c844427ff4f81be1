//! Roll-ups over the canvas.
//!
//! Nothing here is cached: each call derives its result from the canvas it is
//! given, so there is no aggregate that can fall out of date.

use std::collections::HashMap;

use serde::Serialize;

use super::rates::RateSource;
use crate::models::{Canvas, ResourceKey, SelectedActivity};

/// Grand totals across the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub weeks: u64,
    pub hours: u64,
    pub cost: f64,
}

/// Activities sharing one raw category, in canvas order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup<'a> {
    /// `None` for activities without a category. Never substituted with a
    /// display default, so it stays distinct from a literal "General".
    pub category: Option<&'a str>,
    pub activities: Vec<&'a SelectedActivity>,
}

/// Staffing hours merged across activities for one resource key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceBucket {
    pub key: ResourceKey,
    /// Key rendered as `"{role} B{band} ({country})"`.
    pub label: String,
    pub hours: u64,
    pub rate: f64,
    pub cost: f64,
}

pub fn compute_totals(canvas: &Canvas) -> Totals {
    canvas.activities().fold(Totals::default(), |acc, a| Totals {
        weeks: acc.weeks + u64::from(a.duration_weeks),
        hours: acc.hours + u64::from(a.hours),
        cost: acc.cost + a.cost,
    })
}

/// Stable partition of the canvas by raw category, groups in order of first appearance.
pub fn group_by_category(canvas: &Canvas) -> Vec<CategoryGroup<'_>> {
    let mut groups: Vec<CategoryGroup<'_>> = Vec::new();
    let mut index: HashMap<Option<&str>, usize> = HashMap::new();

    for selected in canvas.items() {
        let category = selected.activity.category.as_deref();
        let slot = *index.entry(category).or_insert_with(|| {
            groups.push(CategoryGroup {
                category,
                activities: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].activities.push(selected);
    }

    groups
}

/// Merge every staffing allocation on the canvas into one bucket per resource
/// key, buckets in order of first appearance.
pub fn group_by_resource_key(canvas: &Canvas, rates: &dyn RateSource) -> Vec<ResourceBucket> {
    let mut order: Vec<(ResourceKey, u64)> = Vec::new();
    let mut index: HashMap<ResourceKey, usize> = HashMap::new();

    for allocation in canvas.activities().flat_map(|a| a.staffing.iter()) {
        let key = allocation.resource_key();
        match index.get(&key) {
            Some(&slot) => order[slot].1 += u64::from(allocation.hours),
            None => {
                index.insert(key.clone(), order.len());
                order.push((key, u64::from(allocation.hours)));
            }
        }
    }

    order
        .into_iter()
        .map(|(key, hours)| {
            let rate = rates.rate_for(&key);
            ResourceBucket {
                label: key.to_string(),
                cost: hours as f64 * rate,
                key,
                hours,
                rate,
            }
        })
        .collect()
}

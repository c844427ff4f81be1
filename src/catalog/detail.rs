//! Effort and price roll-up for the offering detail page.
//!
//! Unlike the canvas, this view ignores staffing: each activity is priced at
//! its fixed price, or its effort hours at a flat placeholder rate
//! ([`FlatRate::offering_detail`]), rounded to whole dollars.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::normalize::DEFAULT_HOURS;
use crate::builder::FlatRate;
use crate::models::ActivityRecord;

/// Block label for activities without a category.
pub const DEFAULT_BLOCK: &str = "GENERAL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferingActivityLine {
    /// 1-based position in upstream order.
    pub number: usize,
    pub activity_id: Uuid,
    pub name: String,
    pub block: String,
    pub effort: u32,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockSubtotal {
    pub block: String,
    pub activities: Vec<usize>,
    pub effort: u64,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferingDetailSummary {
    pub activities: Vec<OfferingActivityLine>,
    /// Blocks in order of first appearance.
    pub blocks: Vec<BlockSubtotal>,
    pub total_effort: u64,
    pub total_price: f64,
}

/// Effort hours: effort, else duration, else [`DEFAULT_HOURS`].
pub fn detail_effort(record: &ActivityRecord) -> u32 {
    record
        .effort_hours
        .filter(|h| *h > 0)
        .or(record.duration_hours.filter(|h| *h > 0))
        .unwrap_or(DEFAULT_HOURS)
}

/// Fixed price, else effort at `rate`; rounded to whole dollars.
pub fn detail_price(record: &ActivityRecord, rate: &FlatRate) -> f64 {
    let price = record
        .fixed_price
        .filter(|p| *p > 0.0)
        .unwrap_or_else(|| f64::from(detail_effort(record)) * rate.0);
    price.round()
}

pub fn summarize_offering(records: &[ActivityRecord], rate: &FlatRate) -> OfferingDetailSummary {
    let activities: Vec<OfferingActivityLine> = records
        .iter()
        .enumerate()
        .map(|(i, record)| OfferingActivityLine {
            number: i + 1,
            activity_id: record.activity_id,
            name: record.activity_name.clone(),
            block: record
                .category
                .as_deref()
                .filter(|c| !c.is_empty())
                .unwrap_or(DEFAULT_BLOCK)
                .to_string(),
            effort: detail_effort(record),
            price: detail_price(record, rate),
        })
        .collect();

    let mut blocks: Vec<BlockSubtotal> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for line in &activities {
        let slot = *index.entry(line.block.as_str()).or_insert_with(|| {
            blocks.push(BlockSubtotal {
                block: line.block.clone(),
                activities: Vec::new(),
                effort: 0,
                price: 0.0,
            });
            blocks.len() - 1
        });
        let block = &mut blocks[slot];
        block.activities.push(line.number);
        block.effort += u64::from(line.effort);
        block.price += line.price;
    }

    OfferingDetailSummary {
        total_effort: activities.iter().map(|a| u64::from(a.effort)).sum(),
        total_price: activities.iter().map(|a| a.price).sum(),
        activities,
        blocks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, category: Option<&str>) -> ActivityRecord {
        ActivityRecord {
            activity_id: Uuid::new_v4(),
            activity_name: name.to_string(),
            category: category.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn price_prefers_fixed_price() {
        let mut r = record("Plan", None);
        r.effort_hours = Some(10);
        r.fixed_price = Some(1234.4);
        assert_eq!(detail_price(&r, &FlatRate::offering_detail()), 1234.0);

        r.fixed_price = Some(0.0);
        assert_eq!(detail_price(&r, &FlatRate::offering_detail()), 4300.0);
    }

    #[test]
    fn unsized_activity_defaults_to_forty_hours() {
        let r = record("Plan", None);
        assert_eq!(detail_effort(&r), 40);
        assert_eq!(detail_price(&r, &FlatRate::offering_detail()), 17200.0);
    }
}

//! Plain-text exports of the canvas.
//!
//! Both documents come out of one renderer driven by a [`ReportTemplate`]:
//! which blocks to print per activity and how to print the resource totals.
//! [`ReportFormat::Budget`] is the Budget Planning & Estimate (cost oriented),
//! [`ReportFormat::WorkBreakdown`] the Work Breakdown Structure (hours oriented).
//!
//! Example budget output for one unstaffed activity:
//!
//! ```text
//! BUDGET PLANNING & ESTIMATE
//!
//! ================================================================================
//!
//! ACTIVITIES:
//!
//! Activity 1: Design Review
//! --------------------------------------------------------------------------------
//! Description (Scope):
//! Review architecture
//! ...
//! TOTAL CHARGES: $0
//! ================================================================================
//! ```

mod format;

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::builder::{group_by_resource_key, RateSource, ResourceBucket};
use crate::models::{Activity, Canvas};

pub use format::{format_amount, format_number};

const RULE_WIDTH: usize = 80;

/// The two export documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    Budget,
    #[serde(alias = "wbs")]
    WorkBreakdown,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::WorkBreakdown => "wbs",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "budget" | "bpe" => Some(Self::Budget),
            "wbs" | "work_breakdown" => Some(Self::WorkBreakdown),
            _ => None,
        }
    }

    pub fn template(&self) -> ReportTemplate {
        match self {
            Self::Budget => ReportTemplate::BUDGET,
            Self::WorkBreakdown => ReportTemplate::WORK_BREAKDOWN,
        }
    }
}

/// A block printed under each activity heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityBlock {
    Scope,
    Deliverables,
    Responsibilities,
    Assumptions,
    CompletionCriteria,
    /// Each staffing allocation followed by the activity's own hour subtotal.
    Resources,
}

/// How the combined-resource section is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalsStyle {
    /// Hours, rate and cost per bucket, closed by `TOTAL CHARGES`.
    Charges,
    /// Hours per bucket, closed by `TOTAL ESTIMATED HOURS`.
    Hours,
}

#[derive(Debug, Clone, Copy)]
pub struct ReportTemplate {
    pub title: &'static str,
    pub totals_heading: &'static str,
    pub blocks: &'static [ActivityBlock],
    pub totals: TotalsStyle,
}

impl ReportTemplate {
    pub const BUDGET: ReportTemplate = ReportTemplate {
        title: "BUDGET PLANNING & ESTIMATE",
        totals_heading: "BUDGET AND PLANNING ESTIMATED CHARGES:",
        blocks: &[
            ActivityBlock::Scope,
            ActivityBlock::Deliverables,
            ActivityBlock::Responsibilities,
            ActivityBlock::Assumptions,
            ActivityBlock::CompletionCriteria,
        ],
        totals: TotalsStyle::Charges,
    };

    pub const WORK_BREAKDOWN: ReportTemplate = ReportTemplate {
        title: "WORK BREAKDOWN STRUCTURE",
        totals_heading: "TOTALS:",
        blocks: &[ActivityBlock::Scope, ActivityBlock::Resources],
        totals: TotalsStyle::Hours,
    };
}

/// Render `canvas` in the given format. Never fails; an empty canvas yields a
/// complete document with empty sections and zero totals.
pub fn render(canvas: &Canvas, format: ReportFormat, rates: &dyn RateSource) -> String {
    render_template(canvas, &format.template(), rates)
}

pub fn render_template(canvas: &Canvas, template: &ReportTemplate, rates: &dyn RateSource) -> String {
    let mut out = String::new();
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);

    push_line(&mut out, template.title);
    out.push('\n');
    push_line(&mut out, &heavy);
    out.push('\n');
    push_line(&mut out, "ACTIVITIES:");
    out.push('\n');

    for (order, selected) in canvas.ordered() {
        let activity = &selected.activity;
        let _ = writeln!(out, "Activity {}: {}", order + 1, activity.name);
        push_line(&mut out, &light);
        for block in template.blocks {
            render_block(&mut out, *block, activity);
        }
        out.push('\n');
    }

    push_line(&mut out, &heavy);
    out.push('\n');
    push_line(&mut out, template.totals_heading);
    out.push('\n');

    let buckets = group_by_resource_key(canvas, rates);
    match template.totals {
        TotalsStyle::Charges => render_charges(&mut out, &buckets, &light),
        TotalsStyle::Hours => render_hours(&mut out, &buckets, &light),
    }
    push_line(&mut out, &heavy);

    out
}

fn render_block(out: &mut String, block: ActivityBlock, activity: &Activity) {
    match block {
        ActivityBlock::Scope => labeled(out, "Description (Scope)", &activity.scope),
        ActivityBlock::Deliverables => labeled(out, "Deliverables", &activity.outcome),
        ActivityBlock::Responsibilities => {
            labeled(out, "Responsibilities", &activity.responsibilities)
        }
        ActivityBlock::Assumptions => labeled(out, "Assumptions", &activity.assumptions),
        ActivityBlock::CompletionCriteria => {
            labeled(out, "Completion Criteria", activity.completion_text())
        }
        ActivityBlock::Resources => {
            push_line(out, "Resources:");
            for staff in &activity.staffing {
                let _ = writeln!(
                    out,
                    "  Resource: {}, Estimated Hours: {}",
                    staff.resource_key(),
                    staff.hours
                );
            }
            let _ = write!(
                out,
                "\nTotal: {} Estimated Hours\n\n",
                activity.staffed_hours()
            );
        }
    }
}

fn render_charges(out: &mut String, buckets: &[ResourceBucket], rule: &str) {
    let mut grand_total = 0.0;
    for bucket in buckets {
        grand_total += bucket.cost;
        let rate = format_number(bucket.rate);
        let _ = writeln!(out, "Resource: {}", bucket.label);
        let _ = writeln!(out, "  Estimated Hours: {}", bucket.hours);
        let _ = writeln!(out, "  Rate/Hour: ${}", rate);
        let _ = writeln!(
            out,
            "  Total: {} x ${} = ${}\n",
            bucket.hours,
            rate,
            format_amount(bucket.cost)
        );
    }
    push_line(out, rule);
    let _ = writeln!(out, "TOTAL CHARGES: ${}", format_amount(grand_total));
}

fn render_hours(out: &mut String, buckets: &[ResourceBucket], rule: &str) {
    let mut grand_total = 0u64;
    for bucket in buckets {
        grand_total += bucket.hours;
        let _ = writeln!(
            out,
            "Resource: {}, Estimated Hours: {}",
            bucket.label, bucket.hours
        );
    }
    out.push('\n');
    push_line(out, rule);
    let _ = writeln!(out, "TOTAL ESTIMATED HOURS: {}", grand_total);
}

fn labeled(out: &mut String, label: &str, text: &str) {
    let _ = write!(out, "{}:\n{}\n\n", label, text);
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

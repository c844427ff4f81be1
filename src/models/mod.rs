//! Domain models for the Solution Builder.
//!
//! # Core Concepts
//!
//! - [`Activity`]: a unit of work with effort, cost and staffing, normalised
//!   from upstream catalog records.
//! - [`StaffingAllocation`]: a `(role, band, country, hours)` assignment on an activity.
//! - [`SelectedActivity`]: an activity placed on the canvas under its own instance id.
//! - [`Canvas`]: the ordered selection being assembled into a solution. Transient.
//!
//! ## Upstream Records
//!
//! [`ActivityRecord`], [`StaffingRecord`] and [`PricingRecord`] mirror the JSON
//! served by the master-data API. They are only read, never written.

mod activity;
mod canvas;
mod catalog;

pub use activity::*;
pub use canvas::*;
pub use catalog::*;

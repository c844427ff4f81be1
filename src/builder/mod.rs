//! The activity aggregator: canvas mutations and roll-ups.
//!
//! - [`Canvas::add`], [`Canvas::remove`], [`Canvas::reorder`] return new canvases.
//! - [`compute_totals`], [`group_by_category`], [`group_by_resource_key`] are
//!   re-derived from the canvas on every call.
//! - [`RateSource`] supplies the per-hour rate used for resource costs.

mod aggregate;
mod canvas;
mod rates;

pub use aggregate::*;
pub use canvas::DEFAULT_SEED_COUNT;
pub use rates::*;

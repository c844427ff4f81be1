//! The offering and activity catalog: normalisation of upstream records,
//! browsing, the offering detail roll-up, and the client for the master-data API.

mod client;
mod detail;
mod normalize;
mod offerings;
mod search;

pub use client::{CatalogClient, ClientError, OfferingData};
pub use detail::*;
pub use normalize::*;
pub use offerings::*;
pub use search::*;

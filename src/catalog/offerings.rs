//! Browsing the offering catalog: text search, facet filters and sorting.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::OfferingRecord;

/// Offerings shown per catalog page.
pub const OFFERING_PAGE_SIZE: usize = 6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferingSort {
    #[default]
    #[serde(alias = "offering_name")]
    Name,
    Duration,
}

/// Facets selected by the user. An empty facet list matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfferingFilter {
    pub query: String,
    pub brands: Vec<String>,
    pub products: Vec<Uuid>,
    pub saas_types: Vec<String>,
    pub sort: OfferingSort,
}

/// Distinct facet values present in a set of offerings, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfferingFacets {
    pub brands: Vec<String>,
    pub saas_types: Vec<String>,
}

/// Offerings matching every part of `filter`, sorted by `filter.sort`.
///
/// The query matches name, summary or tag line, ignoring case. Sorting is
/// case-insensitive and stable; a missing duration sorts first.
pub fn filter_offerings<'a>(
    offerings: &'a [OfferingRecord],
    filter: &OfferingFilter,
) -> Vec<&'a OfferingRecord> {
    let needle = filter.query.to_lowercase();
    let mut matched: Vec<&OfferingRecord> = offerings
        .iter()
        .filter(|o| matches_query(o, &needle))
        .filter(|o| facet(&filter.brands, o.brand.as_ref()))
        .filter(|o| facet(&filter.products, o.product_id.as_ref()))
        .filter(|o| facet(&filter.saas_types, o.saas_type.as_ref()))
        .collect();

    match filter.sort {
        OfferingSort::Name => matched.sort_by_cached_key(|o| o.offering_name.to_lowercase()),
        OfferingSort::Duration => {
            matched.sort_by_cached_key(|o| o.duration.as_deref().unwrap_or("").to_lowercase())
        }
    }
    matched
}

pub fn offering_facets(offerings: &[OfferingRecord]) -> OfferingFacets {
    let mut facets = OfferingFacets::default();
    for offering in offerings {
        push_unique(&mut facets.brands, offering.brand.as_deref());
        push_unique(&mut facets.saas_types, offering.saas_type.as_deref());
    }
    facets
}

fn matches_query(offering: &OfferingRecord, needle: &str) -> bool {
    [
        Some(offering.offering_name.as_str()),
        offering.offering_summary.as_deref(),
        offering.tag_line.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(needle))
}

fn facet<T: PartialEq>(selected: &[T], value: Option<&T>) -> bool {
    selected.is_empty() || value.is_some_and(|v| selected.contains(v))
}

fn push_unique(values: &mut Vec<String>, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        if !values.iter().any(|v| v == value) {
            values.push(value.to_string());
        }
    }
}

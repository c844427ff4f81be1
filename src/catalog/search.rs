//! Browsing the activities available for an offering.

use serde::{Deserialize, Serialize};

use crate::models::{Activity, Canvas};

/// Activities shown per catalog page.
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// One page of catalog results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number that was requested.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Activities whose name or display category contains `query`
/// (case-insensitive). Activities already on the canvas come first; the
/// relative order within each group is preserved.
pub fn search<'a>(available: &'a [Activity], query: &str, canvas: &Canvas) -> Vec<&'a Activity> {
    let needle = query.to_lowercase();
    let (mut selected, rest): (Vec<&Activity>, Vec<&Activity>) = available
        .iter()
        .filter(|a| {
            a.name.to_lowercase().contains(&needle)
                || a.display_category().to_lowercase().contains(&needle)
        })
        .partition(|a| canvas.contains_activity(a.id));
    selected.extend(rest);
    selected
}

/// Slice `items` into 1-based pages of `per_page`.
///
/// Page 0 is treated as page 1; pages past the end are empty but still report
/// the real page count.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let page = page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);
    let start = (page - 1).saturating_mul(per_page);

    let items = items
        .iter()
        .skip(start)
        .take(per_page)
        .cloned()
        .collect();

    Page {
        items,
        page,
        total_pages,
        total_items,
    }
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::activity::Activity;

/// An activity placed on the solution canvas.
///
/// `instance_id` is a surrogate key for this placement, distinct from the
/// activity's own id, so the same activity can be placed more than once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedActivity {
    pub instance_id: Uuid,
    #[serde(flatten)]
    pub activity: Activity,
}

impl SelectedActivity {
    pub fn new(activity: Activity) -> Self {
        Self {
            instance_id: Uuid::new_v4(),
            activity,
        }
    }
}

/// The user's in-progress, ordered selection of activities.
///
/// The sequence itself is the display order: an item's order is its index,
/// so the order is always dense `0..len`. Canvases are transient and are
/// rebuilt whenever a different offering is chosen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Canvas {
    items: Vec<SelectedActivity>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[SelectedActivity] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate items paired with their 0-based display order.
    pub fn ordered(&self) -> impl Iterator<Item = (usize, &SelectedActivity)> {
        self.items.iter().enumerate()
    }

    pub fn activities(&self) -> impl Iterator<Item = &Activity> {
        self.items.iter().map(|s| &s.activity)
    }

    pub(crate) fn from_items(items: Vec<SelectedActivity>) -> Self {
        Self { items }
    }

    pub(crate) fn into_items(self) -> Vec<SelectedActivity> {
        self.items
    }
}

impl FromIterator<SelectedActivity> for Canvas {
    fn from_iter<I: IntoIterator<Item = SelectedActivity>>(iter: I) -> Self {
        Self::from_items(iter.into_iter().collect())
    }
}

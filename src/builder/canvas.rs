//! Canvas mutations.
//!
//! Every operation takes the canvas by reference and returns a new one, so a
//! caller holding the previous snapshot never observes a change.

use uuid::Uuid;

use crate::models::{Activity, Canvas, SelectedActivity};

/// Number of activities placed on a fresh canvas for a newly chosen offering.
pub const DEFAULT_SEED_COUNT: usize = 3;

impl Canvas {
    /// A canvas holding the first `count` of `available`, each under a fresh
    /// instance id.
    pub fn seeded(available: &[Activity], count: usize) -> Canvas {
        available
            .iter()
            .take(count)
            .cloned()
            .map(SelectedActivity::new)
            .collect()
    }

    /// Append `activity` under a fresh instance id.
    pub fn add(&self, activity: Activity) -> Canvas {
        let mut items = self.items().to_vec();
        items.push(SelectedActivity::new(activity));
        Canvas::from_items(items)
    }

    /// Remove the item placed under `instance_id`. Unknown ids leave the canvas unchanged.
    pub fn remove(&self, instance_id: Uuid) -> Canvas {
        let mut items = self.items().to_vec();
        if let Some(index) = items.iter().position(|s| s.instance_id == instance_id) {
            items.remove(index);
        }
        Canvas::from_items(items)
    }

    /// Move the item at `from` to `to`, shifting the items in between.
    ///
    /// An out-of-range `from` is ignored; `to` is clamped to the last position.
    pub fn reorder(&self, from: usize, to: usize) -> Canvas {
        let mut items = self.items().to_vec();
        if from >= items.len() {
            tracing::debug!(from, len = items.len(), "Ignoring reorder from out-of-range index");
            return Canvas::from_items(items);
        }
        let to = to.min(items.len() - 1);
        let moved = items.remove(from);
        items.insert(to, moved);
        Canvas::from_items(items)
    }

    /// Whether the underlying activity has been placed at least once.
    pub fn contains_activity(&self, activity_id: Uuid) -> bool {
        self.items().iter().any(|s| s.activity.id == activity_id)
    }

    pub fn get(&self, instance_id: Uuid) -> Option<&SelectedActivity> {
        self.items().iter().find(|s| s.instance_id == instance_id)
    }

    /// Position of the item placed under `instance_id`.
    pub fn order_of(&self, instance_id: Uuid) -> Option<usize> {
        self.items().iter().position(|s| s.instance_id == instance_id)
    }
}

impl IntoIterator for Canvas {
    type Item = SelectedActivity;
    type IntoIter = std::vec::IntoIter<SelectedActivity>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_items().into_iter()
    }
}

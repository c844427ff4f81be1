use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Label shown for activities that carry no category.
pub const DEFAULT_CATEGORY: &str = "General";

/// A selectable unit of work belonging to an offering.
///
/// All derived values (`duration_weeks`, `hours`, `cost` and the text blocks)
/// are resolved once when the activity is normalised from upstream records,
/// so every consumer sees the same numbers. See [`crate::catalog::normalize_activity`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: Uuid,
    pub name: String,
    /// Raw category from the catalog. `None` is kept as-is for grouping;
    /// use [`Activity::display_category`] for presentation.
    #[serde(default)]
    pub category: Option<String>,
    pub duration_weeks: u32,
    pub hours: u32,
    pub cost: f64,
    pub scope: String,
    pub outcome: String,
    pub responsibilities: String,
    pub assumptions: String,
    /// Explicit completion criteria. Reports fall back to `outcome` when absent.
    #[serde(default)]
    pub completion_criteria: Option<String>,
    #[serde(default)]
    pub staffing: Vec<StaffingAllocation>,
}

impl Activity {
    pub fn display_category(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }

    /// Completion criteria as printed in the budget document.
    pub fn completion_text(&self) -> &str {
        match self.completion_criteria.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => &self.outcome,
        }
    }

    /// Sum of this activity's own staffing hours.
    pub fn staffed_hours(&self) -> u64 {
        self.staffing.iter().map(|s| u64::from(s.hours)).sum()
    }
}

/// Effort assigned to one role on one activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffingAllocation {
    pub role: String,
    pub country: String,
    pub band: u32,
    pub hours: u32,
}

impl StaffingAllocation {
    pub fn resource_key(&self) -> ResourceKey {
        ResourceKey {
            role: self.role.clone(),
            band: self.band,
            country: self.country.clone(),
        }
    }
}

/// The `(role, band, country)` tuple staffing is merged on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceKey {
    pub role: String,
    pub band: u32,
    pub country: String,
}

impl std::fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} B{} ({})", self.role, self.band, self.country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity() -> Activity {
        Activity {
            id: Uuid::new_v4(),
            name: "Design Review".to_string(),
            category: None,
            duration_weeks: 1,
            hours: 40,
            cost: 0.0,
            scope: "Review architecture".to_string(),
            outcome: "Approved design".to_string(),
            responsibilities: String::new(),
            assumptions: String::new(),
            completion_criteria: None,
            staffing: vec![],
        }
    }

    #[test]
    fn resource_key_renders_role_band_country() {
        let key = ResourceKey {
            role: "Architect".to_string(),
            band: 9,
            country: "India-GDC".to_string(),
        };
        assert_eq!(key.to_string(), "Architect B9 (India-GDC)");
    }

    #[test]
    fn missing_category_displays_as_general() {
        assert_eq!(activity().display_category(), "General");
    }

    #[test]
    fn empty_completion_criteria_falls_back_to_outcome() {
        let mut a = activity();
        a.completion_criteria = Some(String::new());
        assert_eq!(a.completion_text(), "Approved design");

        a.completion_criteria = Some("Sign-off".to_string());
        assert_eq!(a.completion_text(), "Sign-off");
    }
}

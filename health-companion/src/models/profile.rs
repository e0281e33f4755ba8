//! Session-scoped health profile.

use serde::{Deserialize, Serialize};

/// The five free-text attributes the prompts are built from.
///
/// Every field is always present. A profile is replaced as a whole, never
/// patched field by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthProfile {
    pub goals: String,
    pub conditions: String,
    pub routines: String,
    pub preferences: String,
    pub restrictions: String,
}

impl Default for HealthProfile {
    fn default() -> Self {
        Self {
            goals: "Lose 10 pounds in 3 months\nImprove cardiovascular health".to_string(),
            conditions: "None".to_string(),
            routines: "30-min walk 3x/week".to_string(),
            preferences: "Vegetarian\nLow carb".to_string(),
            restrictions: "No dairy\nNo nuts".to_string(),
        }
    }
}

impl HealthProfile {
    /// A profile with every field blank. Not the same as [`Default`].
    pub fn blank() -> Self {
        Self {
            goals: String::new(),
            conditions: String::new(),
            routines: String::new(),
            preferences: String::new(),
            restrictions: String::new(),
        }
    }

    /// True only when all five fields are empty. One filled field is enough
    /// for the profile to be usable.
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, value)| value.is_empty())
    }

    /// Fields in display order, labelled as they appear in the UI and prompts.
    pub fn fields(&self) -> [(&'static str, &str); 5] {
        [
            ("Health Goals", &self.goals),
            ("Medical Conditions", &self.conditions),
            ("Fitness Routines", &self.routines),
            ("Food Preferences", &self.preferences),
            ("Dietary Restrictions", &self.restrictions),
        ]
    }

    /// Pretty JSON for the read-only preview panel.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

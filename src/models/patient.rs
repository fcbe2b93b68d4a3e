use std::fmt;

use serde::{Deserialize, Serialize};

/// A patient's chewing/swallowing capability, parsed once from the free-text
/// meal status recorded by care staff.
///
/// A status can carry several markers ("죽 + 다진찬": porridge staple with
/// minced side dishes). Each item checks them in order: porridge for the rice
/// staple, then minced, then ground for non-staples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextureStatus {
    pub porridge: bool,
    pub minced: bool,
    pub ground: bool,
    /// Non-empty status with no recognised marker.
    pub unrecognised: bool,
}

impl TextureStatus {
    pub const REGULAR: Self = Self::marked(false, false, false);
    pub const PORRIDGE: Self = Self::marked(true, false, false);
    pub const MINCED: Self = Self::marked(false, true, false);
    pub const GROUND: Self = Self::marked(false, false, true);

    const fn marked(porridge: bool, minced: bool, ground: bool) -> Self {
        Self {
            porridge,
            minced,
            ground,
            unrecognised: false,
        }
    }

    /// Parse the recorded meal status.
    pub fn from_status(status: &str) -> Self {
        let s = status.trim().to_lowercase();
        let mut texture = Self::marked(
            s.contains('죽') || s.contains("porridge"),
            s.contains("다진") || s.contains("minced"),
            s.contains('갈') || s.contains("ground") || s.contains("puree"),
        );
        texture.unrecognised = !texture.is_modified()
            && !(s.is_empty() || s.contains("일반") || s.contains("regular"));
        texture
    }

    /// True when any texture marker is set.
    pub fn is_modified(&self) -> bool {
        self.porridge || self.minced || self.ground
    }
}

impl fmt::Display for TextureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unrecognised {
            return f.write_str("other");
        }
        let names: Vec<&str> = [
            (self.porridge, "porridge"),
            (self.minced, "minced"),
            (self.ground, "ground"),
        ]
        .into_iter()
        .filter_map(|(set, name)| set.then_some(name))
        .collect();

        if names.is_empty() {
            f.write_str("regular")
        } else {
            f.write_str(&names.join("+"))
        }
    }
}

/// Medical condition flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Conditions {
    pub hypertension: bool,
    pub diabetes: bool,
    pub dysphagia: bool,
}

impl Conditions {
    /// Human-readable condition names, empty when none are set.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.hypertension {
            names.push("hypertension");
        }
        if self.diabetes {
            names.push("diabetes");
        }
        if self.dysphagia {
            names.push("dysphagia");
        }
        names
    }
}

/// Interpret a condition cell: blank and explicit negatives mean "absent".
pub fn parse_condition_flag(cell: &str) -> bool {
    let v = cell.trim().to_lowercase();
    !matches!(
        v.as_str(),
        "" | "x" | "n" | "no" | "false" | "0" | "-" | "nan"
    )
}

/// Patient profile as read from the resident roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    pub name: String,
    /// Body weight in kg. `None` when the roster cell is blank or unreadable.
    pub weight_kg: Option<f64>,
    pub conditions: Conditions,
    /// Raw meal status text, kept for display.
    pub meal_status: String,
    pub texture: TextureStatus,
}

impl PatientProfile {
    pub fn new(name: impl Into<String>, weight_kg: Option<f64>, meal_status: &str) -> Self {
        Self {
            name: name.into(),
            weight_kg,
            conditions: Conditions::default(),
            meal_status: meal_status.to_string(),
            texture: TextureStatus::from_status(meal_status),
        }
    }

    pub fn with_conditions(mut self, conditions: Conditions) -> Self {
        self.conditions = conditions;
        self
    }
}

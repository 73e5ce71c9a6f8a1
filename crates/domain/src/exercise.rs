use std::fmt;

use crate::Name;

#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub name: Name,
    pub tags: Vec<String>,
    pub timing: Option<Timing>,
    pub notes: Option<String>,
    pub link: Option<String>,
}

impl Exercise {
    /// Whether one of the exercise's tags equals the muscle group, ignoring case.
    #[must_use]
    pub fn targets(&self, muscle_group: &MuscleGroup) -> bool {
        self.tags
            .iter()
            .any(|tag| tag.to_lowercase() == muscle_group.0)
    }

    /// The timing of the exercise if it can be packed, i.e. its cycle time is positive.
    #[must_use]
    pub fn valid_timing(&self) -> Option<Timing> {
        self.timing.filter(|t| t.cycle_time() > 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub set_duration_sec: f64,
    pub rest_duration_sec: f64,
}

impl Timing {
    #[must_use]
    pub fn cycle_time(&self) -> f64 {
        self.set_duration_sec + self.rest_duration_sec
    }
}

/// Case-normalized muscle group used for matching against exercise tags.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MuscleGroup(String);

impl MuscleGroup {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MuscleGroup {
    fn from(value: &str) -> Self {
        Self(value.to_lowercase())
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-group target declared in a catalog's defaults section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDefault {
    pub muscle_group: String,
    pub exercises_count: u32,
    pub sets_per_exercise: u32,
}

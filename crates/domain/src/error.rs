use crate::NameError;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GenerateError {
    #[error("duration must be a finite number of minutes (got {0})")]
    InvalidDuration(f64),
    #[error("invalid time split: {0}")]
    InvalidTimeSplit(TimeSplitError),
    #[error("time split not specified for muscle group: {0}")]
    MissingTimeSplitEntry(String),
    #[error("no exercises found for muscle group: {0}")]
    NoMatchingExercises(String),
    #[error("exercise \"{name}\" has no positive set and rest duration")]
    InvalidExerciseTiming { name: String },
    #[error("sets per exercise must be positive for muscle group: {0}")]
    InvalidDefaults(String),
}

impl From<TimeSplitError> for GenerateError {
    fn from(value: TimeSplitError) -> Self {
        GenerateError::InvalidTimeSplit(value)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TimeSplitError {
    #[error("fractions must sum to 1.0 (got {0})")]
    Sum(f64),
    #[error("fraction for {group} must be between 0 and 1 (got {fraction})")]
    Fraction { group: String, fraction: f64 },
}

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("malformed catalog: {0}")]
    Malformed(String),
    #[error("malformed catalog: exercise {index}: {source}")]
    InvalidName { index: usize, source: NameError },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

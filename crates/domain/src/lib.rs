#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod catalog;
mod error;
mod exercise;
mod generator;
mod name;
mod plan;

pub use catalog::Catalog;
pub use error::{CatalogError, GenerateError, TimeSplitError};
pub use exercise::{Exercise, GroupDefault, MuscleGroup, Timing};
pub use generator::{
    Allocation, MAX_BLOCKS_PER_GROUP, MAX_SETS, MIN_REMAINING_SEC, MIN_SETS, SPLIT_TOLERANCE, allocate, generate,
    generate_from_defaults,
};
pub use name::{Name, NameError};
pub use plan::{
    ExerciseBlock, PlanParameters, Summary, Warmup, WarmupActivity, WorkoutPlan, round_to_tenth,
};

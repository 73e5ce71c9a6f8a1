use log::{debug, info, warn};
use rand::{Rng, seq::SliceRandom};

use crate::{
    Catalog, Exercise, ExerciseBlock, GenerateError, GroupDefault, MuscleGroup, PlanParameters,
    TimeSplitError, Timing, Warmup, WorkoutPlan,
};

pub const SPLIT_TOLERANCE: f64 = 0.01;
/// Remaining time below which no further block is packed.
pub const MIN_REMAINING_SEC: f64 = 30.0;
pub const MIN_SETS: u32 = 3;
pub const MAX_SETS: u32 = 5;
/// Upper bound of the blocks packed for one muscle group.
pub const MAX_BLOCKS_PER_GROUP: usize = 1_000;

/// Time budget of one muscle group.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub muscle_group: String,
    pub budget_sec: f64,
}

/// Validate the time split and compute the time budget of each requested muscle group.
///
/// The warmup is subtracted from the total duration before splitting. Groups keep the
/// requested order; a group requested more than once is allocated only once.
pub fn allocate(parameters: &PlanParameters) -> Result<Vec<Allocation>, GenerateError> {
    if !parameters.duration_minutes.is_finite() {
        return Err(GenerateError::InvalidDuration(parameters.duration_minutes));
    }

    let sum = parameters.time_split.values().sum::<f64>();

    let within_tolerance = (sum - 1.0).abs() <= SPLIT_TOLERANCE;

    if !within_tolerance {
        return Err(TimeSplitError::Sum(sum).into());
    }

    if let Some((group, fraction)) = parameters
        .time_split
        .iter()
        .find(|(_, fraction)| !(0.0..=1.0).contains(*fraction))
    {
        return Err(TimeSplitError::Fraction {
            group: group.clone(),
            fraction: *fraction,
        }
        .into());
    }

    let exercise_time_minutes =
        parameters.duration_minutes - f64::from(Warmup::default().duration_minutes());

    if exercise_time_minutes <= 0.0 {
        warn!(
            "duration of {} minutes leaves no time for exercises",
            parameters.duration_minutes
        );
    }

    let mut allocations: Vec<Allocation> = vec![];

    for group in &parameters.muscle_groups {
        let Some(fraction) = parameters.time_split.get(group) else {
            return Err(GenerateError::MissingTimeSplitEntry(group.clone()));
        };
        if allocations.iter().any(|a| a.muscle_group == *group) {
            continue;
        }
        allocations.push(Allocation {
            muscle_group: group.clone(),
            budget_sec: exercise_time_minutes * fraction * 60.0,
        });
    }

    Ok(allocations)
}

/// Generate a time-boxed workout plan.
///
/// Each muscle group's budget is filled greedily with randomly chosen exercises of 3 to 5
/// sets until less than a minimum viable block remains. Time a group does not use is not
/// passed on to the following groups. A group stops after [`MAX_BLOCKS_PER_GROUP`] blocks.
pub fn generate<R: Rng>(
    parameters: &PlanParameters,
    catalog: &Catalog,
    rng: &mut R,
) -> Result<WorkoutPlan, GenerateError> {
    let allocations = allocate(parameters)?;
    let mut blocks = vec![];

    for allocation in &allocations {
        blocks.extend(pack(allocation, catalog, rng)?);
    }

    let plan = WorkoutPlan::new(parameters.duration_minutes, blocks);

    info!(
        "generated plan with {} exercises and {} sets",
        plan.summary.exercises_count, plan.summary.total_sets
    );

    Ok(plan)
}

fn pack<R: Rng>(
    allocation: &Allocation,
    catalog: &Catalog,
    rng: &mut R,
) -> Result<Vec<ExerciseBlock>, GenerateError> {
    let candidates = candidates_for(catalog, &allocation.muscle_group)?;
    let mut blocks = vec![];
    let mut remaining = allocation.budget_sec;

    while remaining > MIN_REMAINING_SEC {
        let Some(exercise) = candidates.choose(rng) else {
            break;
        };
        let timing = checked_timing(exercise)?;

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let max_sets = (remaining / timing.cycle_time()).floor() as u32;

        if max_sets < MIN_SETS {
            debug!(
                "{:.0}s of {} left unused, {} fits only {max_sets} sets",
                remaining, allocation.muscle_group, exercise.name
            );
            break;
        }

        let sets = rng.gen_range(MIN_SETS..=MAX_SETS).min(max_sets);
        let block = ExerciseBlock::new(exercise, timing, &allocation.muscle_group, sets);

        debug!(
            "packed {} x {} for {} ({}s)",
            sets, exercise.name, allocation.muscle_group, block.total_time_sec
        );

        let next_remaining = remaining - block.total_time_sec;
        blocks.push(block);

        if next_remaining >= remaining {
            warn!(
                "{:.0}s of {} is too large to pack, stopping after one block",
                remaining, allocation.muscle_group
            );
            break;
        }
        if blocks.len() >= MAX_BLOCKS_PER_GROUP {
            warn!(
                "stopped packing {} after {MAX_BLOCKS_PER_GROUP} blocks with {:.0}s left",
                allocation.muscle_group, next_remaining
            );
            break;
        }

        remaining = next_remaining;
    }

    Ok(blocks)
}

/// Generate a plan from per-group exercise counts, e.g. the defaults section of a catalog.
///
/// Within a group an exercise is repeated only after every candidate has been used.
pub fn generate_from_defaults<R: Rng>(
    defaults: &[GroupDefault],
    catalog: &Catalog,
    rng: &mut R,
) -> Result<WorkoutPlan, GenerateError> {
    if let Some(default) = defaults.iter().find(|d| d.sets_per_exercise == 0) {
        return Err(GenerateError::InvalidDefaults(default.muscle_group.clone()));
    }

    let mut blocks = vec![];

    for default in defaults {
        let candidates = candidates_for(catalog, &default.muscle_group)?;
        let mut available = candidates.clone();

        for _ in 0..default.exercises_count {
            if available.is_empty() {
                available.clone_from(&candidates);
            }
            let exercise = available.remove(rng.gen_range(0..available.len()));
            blocks.push(ExerciseBlock::new(
                exercise,
                checked_timing(exercise)?,
                &default.muscle_group,
                default.sets_per_exercise,
            ));
        }
    }

    let exercise_seconds = blocks.iter().fold(0.0, |acc, b| acc + b.total_time_sec);
    let plan = WorkoutPlan::new(
        f64::from(Warmup::default().duration_minutes()) + (exercise_seconds / 60.0).ceil(),
        blocks,
    );

    info!(
        "generated plan from defaults with {} exercises and {} sets",
        plan.summary.exercises_count, plan.summary.total_sets
    );

    Ok(plan)
}

fn candidates_for<'a>(
    catalog: &'a Catalog,
    muscle_group: &str,
) -> Result<Vec<&'a Exercise>, GenerateError> {
    let candidates = catalog.matching(&MuscleGroup::from(muscle_group));

    if candidates.is_empty() {
        return Err(GenerateError::NoMatchingExercises(muscle_group.to_string()));
    }

    Ok(candidates)
}

fn checked_timing(exercise: &Exercise) -> Result<Timing, GenerateError> {
    exercise
        .valid_timing()
        .ok_or_else(|| GenerateError::InvalidExerciseTiming {
            name: exercise.name.to_string(),
        })
}

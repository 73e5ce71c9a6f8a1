use std::collections::BTreeMap;

use crate::{Exercise, Name, Timing};

/// Input of a time-based plan generation.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanParameters {
    pub duration_minutes: f64,
    pub muscle_groups: Vec<String>,
    pub time_split: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutPlan {
    pub total_duration_minutes: f64,
    pub warmup: Warmup,
    pub exercises: Vec<ExerciseBlock>,
    pub summary: Summary,
}

impl WorkoutPlan {
    #[must_use]
    pub fn new(total_duration_minutes: f64, exercises: Vec<ExerciseBlock>) -> Self {
        let summary = Summary::from(exercises.as_slice());
        Self {
            total_duration_minutes,
            warmup: Warmup::default(),
            exercises,
            summary,
        }
    }

    pub fn blocks_for<'a>(
        &'a self,
        muscle_group: &'a str,
    ) -> impl Iterator<Item = &'a ExerciseBlock> + 'a {
        self.exercises
            .iter()
            .filter(move |b| b.muscle_group == muscle_group)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warmup {
    pub cardio: WarmupActivity,
    pub stretching: WarmupActivity,
}

impl Warmup {
    #[must_use]
    pub fn duration_minutes(&self) -> u32 {
        self.cardio.duration_minutes + self.stretching.duration_minutes
    }
}

impl Default for Warmup {
    fn default() -> Self {
        Self {
            cardio: WarmupActivity {
                duration_minutes: 5,
                activity: "Light cardio (jogging in place, jumping jacks)".to_string(),
            },
            stretching: WarmupActivity {
                duration_minutes: 5,
                activity: "Dynamic stretching (arm circles, leg swings, hip circles)".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarmupActivity {
    pub duration_minutes: u32,
    pub activity: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseBlock {
    pub name: Name,
    pub muscle_group: String,
    pub sets: u32,
    pub set_duration_sec: f64,
    pub rest_duration_sec: f64,
    pub total_time_sec: f64,
    pub notes: Option<String>,
    pub link: Option<String>,
}

impl ExerciseBlock {
    #[must_use]
    pub fn new(exercise: &Exercise, timing: Timing, muscle_group: &str, sets: u32) -> Self {
        Self {
            name: exercise.name.clone(),
            muscle_group: muscle_group.to_string(),
            sets,
            set_duration_sec: timing.set_duration_sec,
            rest_duration_sec: timing.rest_duration_sec,
            total_time_sec: f64::from(sets) * timing.cycle_time(),
            notes: exercise.notes.clone(),
            link: exercise.link.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_exercise_time_sec: f64,
    pub total_exercise_time_minutes: f64,
    pub total_sets: u32,
    /// Total time per muscle group in order of first appearance.
    pub muscle_group_breakdown: Vec<(String, f64)>,
    pub exercises_count: usize,
}

impl From<&[ExerciseBlock]> for Summary {
    fn from(blocks: &[ExerciseBlock]) -> Self {
        let total_exercise_time_sec = blocks.iter().fold(0.0, |acc, b| acc + b.total_time_sec);
        let mut muscle_group_breakdown: Vec<(String, f64)> = vec![];

        for block in blocks {
            match muscle_group_breakdown
                .iter_mut()
                .find(|(group, _)| *group == block.muscle_group)
            {
                Some((_, time)) => *time += block.total_time_sec,
                None => {
                    muscle_group_breakdown.push((block.muscle_group.clone(), block.total_time_sec));
                }
            }
        }

        Self {
            total_exercise_time_sec,
            total_exercise_time_minutes: round_to_tenth(total_exercise_time_sec / 60.0),
            total_sets: blocks.iter().map(|b| b.sets).sum(),
            muscle_group_breakdown,
            exercises_count: blocks.len(),
        }
    }
}

/// Round to one decimal place based on the exact binary value, resolving exact ties to even.
///
/// `0.35` is stored slightly below 0.35 and rounds to 0.3, while the exact tie `3.25`
/// rounds to 3.2.
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    let scaled = value * 10.0;
    // Exact rounding error of the multiplication.
    let error = value.mul_add(10.0, -scaled);

    let rounded = if (scaled - scaled.trunc()).abs() == 0.5 {
        if error > 0.0 {
            scaled.ceil()
        } else if error < 0.0 {
            scaled.floor()
        } else {
            scaled.round_ties_even()
        }
    } else {
        scaled.round()
    };

    rounded / 10.0
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn block(name: &str, muscle_group: &str, sets: u32, set: f64, rest: f64) -> ExerciseBlock {
        ExerciseBlock::new(
            &Exercise {
                name: Name::new(name).unwrap(),
                tags: vec![muscle_group.to_string()],
                timing: None,
                notes: Some("slow".to_string()),
                link: None,
            },
            Timing {
                set_duration_sec: set,
                rest_duration_sec: rest,
            },
            muscle_group,
            sets,
        )
    }

    #[test]
    fn test_exercise_block_new() {
        assert_eq!(
            block("Push Up", "chest", 4, 40.0, 20.0),
            ExerciseBlock {
                name: Name::new("Push Up").unwrap(),
                muscle_group: "chest".to_string(),
                sets: 4,
                set_duration_sec: 40.0,
                rest_duration_sec: 20.0,
                total_time_sec: 240.0,
                notes: Some("slow".to_string()),
                link: None,
            }
        );
    }

    #[test]
    fn test_summary_from_blocks() {
        let blocks = [
            block("A", "glutes", 3, 30.0, 30.0),
            block("B", "chest", 5, 40.0, 20.0),
            block("C", "glutes", 4, 45.0, 0.0),
        ];
        let summary = Summary::from(blocks.as_slice());

        assert_approx_eq!(summary.total_exercise_time_sec, 660.0);
        assert_approx_eq!(summary.total_exercise_time_minutes, 11.0);
        assert_eq!(summary.total_sets, 12);
        assert_eq!(
            summary.muscle_group_breakdown,
            vec![("glutes".to_string(), 360.0), ("chest".to_string(), 300.0)]
        );
        assert_eq!(summary.exercises_count, 3);
    }

    #[test]
    fn test_summary_from_no_blocks() {
        assert_eq!(
            Summary::from(&[] as &[ExerciseBlock]),
            Summary {
                total_exercise_time_sec: 0.0,
                total_exercise_time_minutes: 0.0,
                total_sets: 0,
                muscle_group_breakdown: vec![],
                exercises_count: 0,
            }
        );
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(3.04, 3.0)]
    #[case(3.25, 3.2)]
    #[case(0.35, 0.3)]
    #[case(0.25, 0.2)]
    #[case(0.75, 0.8)]
    #[case(5.25, 5.2)]
    #[case(195.0 / 60.0, 3.2)]
    #[case(21.0 / 60.0, 0.3)]
    #[case(315.0 / 60.0, 5.2)]
    #[case(-3.25, -3.2)]
    #[case(19.96, 20.0)]
    fn test_round_to_tenth(#[case] value: f64, #[case] expected: f64) {
        assert_approx_eq!(round_to_tenth(value), expected);
    }

    #[test]
    fn test_summary_minutes_round_ties_to_even() {
        let blocks = [block("A", "chest", 3, 45.0, 20.0)];
        let summary = Summary::from(blocks.as_slice());

        assert_approx_eq!(summary.total_exercise_time_sec, 195.0);
        assert_approx_eq!(summary.total_exercise_time_minutes, 3.2);
    }

    #[test]
    fn test_workout_plan_new() {
        let plan = WorkoutPlan::new(
            30.0,
            vec![
                block("A", "glutes", 3, 30.0, 30.0),
                block("B", "chest", 3, 30.0, 30.0),
            ],
        );

        assert_eq!(plan.warmup.duration_minutes(), 10);
        assert_eq!(plan.summary.exercises_count, 2);
        assert_eq!(
            plan.blocks_for("chest").map(|b| b.name.as_str()).collect::<Vec<_>>(),
            vec!["B"]
        );
    }
}

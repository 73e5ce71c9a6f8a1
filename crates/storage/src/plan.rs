use liftplan_domain as domain;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Serializable form of a workout plan.
#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct Plan {
    pub total_duration: f64,
    pub warmup: Warmup,
    pub exercises: Vec<ExerciseBlock>,
    pub summary: Summary,
}

impl From<&domain::WorkoutPlan> for Plan {
    fn from(value: &domain::WorkoutPlan) -> Self {
        Self {
            total_duration: value.total_duration_minutes,
            warmup: Warmup::from(&value.warmup),
            exercises: value.exercises.iter().map(ExerciseBlock::from).collect(),
            summary: Summary::from(&value.summary),
        }
    }
}

#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Warmup {
    pub cardio: WarmupActivity,
    pub stretching: WarmupActivity,
}

impl From<&domain::Warmup> for Warmup {
    fn from(value: &domain::Warmup) -> Self {
        Self {
            cardio: WarmupActivity::from(&value.cardio),
            stretching: WarmupActivity::from(&value.stretching),
        }
    }
}

#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct WarmupActivity {
    pub duration: u32,
    pub activity: String,
}

impl From<&domain::WarmupActivity> for WarmupActivity {
    fn from(value: &domain::WarmupActivity) -> Self {
        Self {
            duration: value.duration_minutes,
            activity: value.activity.clone(),
        }
    }
}

#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct ExerciseBlock {
    pub name: String,
    pub sets: u32,
    pub set_duration_sec: f64,
    pub rest_duration_sec: f64,
    pub total_time: f64,
    pub muscle_group: String,
    pub notes: Option<String>,
    pub link: Option<String>,
}

impl From<&domain::ExerciseBlock> for ExerciseBlock {
    fn from(value: &domain::ExerciseBlock) -> Self {
        Self {
            name: value.name.to_string(),
            sets: value.sets,
            set_duration_sec: value.set_duration_sec,
            rest_duration_sec: value.rest_duration_sec,
            total_time: value.total_time_sec,
            muscle_group: value.muscle_group.clone(),
            notes: value.notes.clone(),
            link: value.link.clone(),
        }
    }
}

#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_exercise_time_seconds: f64,
    pub total_exercise_time_minutes: f64,
    pub total_sets: u32,
    pub muscle_group_breakdown: Breakdown,
    pub exercises_count: usize,
}

impl From<&domain::Summary> for Summary {
    fn from(value: &domain::Summary) -> Self {
        Self {
            total_exercise_time_seconds: value.total_exercise_time_sec,
            total_exercise_time_minutes: value.total_exercise_time_minutes,
            total_sets: value.total_sets,
            muscle_group_breakdown: Breakdown(value.muscle_group_breakdown.clone()),
            exercises_count: value.exercises_count,
        }
    }
}

/// Time per muscle group, serialized as an object keeping the order of first appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakdown(pub Vec<(String, f64)>);

impl Serialize for Breakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (group, seconds) in &self.0 {
            map.serialize_entry(group, seconds)?;
        }
        map.end()
    }
}

pub fn to_json(plan: &domain::WorkoutPlan) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Plan::from(plan))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::tests::data::workout_plan;

    use super::*;

    #[test]
    fn test_plan_serialize() {
        assert_eq!(
            json!(Plan::from(&workout_plan())),
            json!({
                "total_duration": 20.0,
                "warmup": {
                    "cardio": {
                        "duration": 5,
                        "activity": "Light cardio (jogging in place, jumping jacks)"
                    },
                    "stretching": {
                        "duration": 5,
                        "activity": "Dynamic stretching (arm circles, leg swings, hip circles)"
                    }
                },
                "exercises": [
                    {
                        "name": "Hip Thrust",
                        "sets": 4,
                        "set_duration_sec": 45.0,
                        "rest_duration_sec": 75.0,
                        "total_time": 480.0,
                        "muscle_group": "glutes",
                        "notes": "Pause at the top",
                        "link": null
                    },
                    {
                        "name": "Push Up",
                        "sets": 3,
                        "set_duration_sec": 40.0,
                        "rest_duration_sec": 20.0,
                        "total_time": 180.0,
                        "muscle_group": "chest",
                        "notes": null,
                        "link": "https://example.org/push-up"
                    }
                ],
                "summary": {
                    "total_exercise_time_seconds": 660.0,
                    "total_exercise_time_minutes": 11.0,
                    "total_sets": 7,
                    "muscle_group_breakdown": {"glutes": 480.0, "chest": 180.0},
                    "exercises_count": 2
                }
            })
        );
    }

    #[test]
    fn test_breakdown_keeps_order() {
        let json = serde_json::to_string(&Breakdown(vec![
            ("rear delts".to_string(), 300.0),
            ("chest".to_string(), 240.0),
            ("abs".to_string(), 180.0),
        ]))
        .unwrap();

        assert_eq!(json, r#"{"rear delts":300.0,"chest":240.0,"abs":180.0}"#);
    }

    #[test]
    fn test_to_json() {
        let json = to_json(&workout_plan()).unwrap();

        assert!(json.starts_with("{\n  \"total_duration\": 20.0,"));
        assert!(json.find("\"glutes\"").unwrap() < json.find("\"chest\"").unwrap());
    }
}

use std::collections::BTreeSet;

use crate::{Exercise, GroupDefault, MuscleGroup, Name, Timing};

/// Read-only collection of exercises a plan is generated from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    exercises: Vec<Exercise>,
    defaults: Vec<GroupDefault>,
}

impl Catalog {
    #[must_use]
    pub fn new(exercises: Vec<Exercise>, defaults: Vec<GroupDefault>) -> Self {
        Self {
            exercises,
            defaults,
        }
    }

    /// The catalog compiled into the crate.
    #[must_use]
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    #[must_use]
    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    #[must_use]
    pub fn defaults(&self) -> &[GroupDefault] {
        &self.defaults
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Exercises tagged with the muscle group, in catalog order.
    #[must_use]
    pub fn matching(&self, muscle_group: &MuscleGroup) -> Vec<&Exercise> {
        self.exercises
            .iter()
            .filter(|e| e.targets(muscle_group))
            .collect()
    }

    #[must_use]
    pub fn tags(&self) -> BTreeSet<&str> {
        self.exercises
            .iter()
            .flat_map(|e| e.tags.iter().map(String::as_str))
            .collect()
    }
}

struct BuiltinExercise {
    name: &'static str,
    tags: &'static [&'static str],
    set_duration_sec: u32,
    rest_duration_sec: u32,
    notes: Option<&'static str>,
    link: Option<&'static str>,
}

impl BuiltinExercise {
    const fn new(
        name: &'static str,
        tags: &'static [&'static str],
        set_duration_sec: u32,
        rest_duration_sec: u32,
    ) -> Self {
        Self {
            name,
            tags,
            set_duration_sec,
            rest_duration_sec,
            notes: None,
            link: None,
        }
    }

    const fn notes(mut self, notes: &'static str) -> Self {
        self.notes = Some(notes);
        self
    }

    const fn link(mut self, link: &'static str) -> Self {
        self.link = Some(link);
        self
    }
}

impl From<&BuiltinExercise> for Exercise {
    fn from(value: &BuiltinExercise) -> Self {
        Exercise {
            name: Name::from_static(value.name),
            tags: value.tags.iter().map(ToString::to_string).collect(),
            timing: Some(Timing {
                set_duration_sec: f64::from(value.set_duration_sec),
                rest_duration_sec: f64::from(value.rest_duration_sec),
            }),
            notes: value.notes.map(ToString::to_string),
            link: value.link.map(ToString::to_string),
        }
    }
}

static BUILTIN: std::sync::LazyLock<Catalog> = std::sync::LazyLock::new(|| {
    Catalog::new(
        BUILTIN_EXERCISES.iter().map(Exercise::from).collect(),
        BUILTIN_DEFAULTS
            .iter()
            .map(|(muscle_group, exercises_count, sets_per_exercise)| GroupDefault {
                muscle_group: (*muscle_group).to_string(),
                exercises_count: *exercises_count,
                sets_per_exercise: *sets_per_exercise,
            })
            .collect(),
    )
});

const BUILTIN_DEFAULTS: [(&str, u32, u32); 4] = [
    ("glutes", 2, 3),
    ("rear delts", 2, 3),
    ("chest", 2, 4),
    ("core", 1, 3),
];

const BUILTIN_EXERCISES: [BuiltinExercise; 24] = [
    BuiltinExercise::new("Band Pull Apart", &["rear delts", "upper back"], 40, 20)
        .notes("Keep the arms straight and squeeze the shoulder blades"),
    BuiltinExercise::new("Barbell Bench Press", &["chest", "triceps", "front delts"], 45, 90)
        .link("https://www.youtube.com/watch?v=rT7DgCr-3pg"),
    BuiltinExercise::new("Barbell Hip Thrust", &["glutes", "hamstrings"], 45, 75)
        .notes("Pause for one second at the top"),
    BuiltinExercise::new("Bird Dog", &["core", "lower back"], 40, 20),
    BuiltinExercise::new("Bulgarian Split Squat", &["glutes", "quads"], 60, 60),
    BuiltinExercise::new("Cable Crossover", &["chest"], 40, 45),
    BuiltinExercise::new("Cable Pull Through", &["glutes", "hamstrings"], 40, 45),
    BuiltinExercise::new("Dead Bug", &["core"], 40, 20),
    BuiltinExercise::new("Dumbbell Bench Press", &["chest", "triceps"], 45, 75),
    BuiltinExercise::new("Dumbbell Incline Press", &["chest", "front delts"], 45, 75),
    BuiltinExercise::new("Face Pull", &["rear delts", "upper back"], 40, 40)
        .notes("Pull towards the forehead with the elbows high")
        .link("https://www.youtube.com/watch?v=rep-qVOkqgk"),
    BuiltinExercise::new("Glute Bridge", &["glutes"], 40, 30),
    BuiltinExercise::new("Goblet Squat", &["quads", "glutes"], 45, 60),
    BuiltinExercise::new("Hammer Curl", &["biceps", "forearms"], 40, 45),
    BuiltinExercise::new("Lat Pulldown", &["lats", "biceps"], 45, 75),
    BuiltinExercise::new("Pallof Press", &["core"], 40, 30),
    BuiltinExercise::new("Plank", &["core"], 45, 30),
    BuiltinExercise::new("Push Up", &["chest", "triceps", "core"], 40, 40),
    BuiltinExercise::new("Reverse Dumbbell Fly", &["rear delts"], 40, 40),
    BuiltinExercise::new("Reverse Pec Deck", &["rear delts"], 40, 45),
    BuiltinExercise::new("Romanian Deadlift", &["hamstrings", "glutes", "lower back"], 45, 90)
        .notes("Hinge at the hips and keep the bar close to the legs"),
    BuiltinExercise::new("Seated Cable Row", &["upper back", "lats", "rear delts"], 45, 60),
    BuiltinExercise::new("Side Lying Hip Abduction", &["glutes"], 40, 20),
    BuiltinExercise::new("Triceps Pushdown", &["triceps"], 40, 45),
];

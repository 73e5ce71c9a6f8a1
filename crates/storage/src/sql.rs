use std::io::Write;

use liftplan_domain as domain;

use crate::seed::{Phase, SeedExercise, SeedPlan, SeedRepository};

#[derive(Debug, Clone, Copy, strum::Display)]
pub enum Table {
    Tag,
    Exercise,
    ExerciseTag,
    Plan,
    PlanDefault,
    ExercisePlan,
}

/// Seed repository writing one SQL statement per line.
///
/// Links resolve their IDs by name, so the script does not depend on the IDs assigned
/// by the database.
pub struct SqlScript<W> {
    writer: W,
    started: bool,
}

impl<W: Write> SqlScript<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            started: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn header(&mut self) -> std::io::Result<()> {
        if !self.started {
            self.started = true;
            writeln!(self.writer, "-- Workout Planner Seed Data")?;
            writeln!(self.writer, "-- Generated from JSON exercise files")?;
        }
        Ok(())
    }
}

/// Quote a string for SQL, doubling embedded quotes. Absent values become `NULL`.
#[must_use]
pub fn quote(value: Option<&str>) -> String {
    match value {
        Some(value) => format!("'{}'", value.replace('\'', "''")),
        None => "NULL".to_string(),
    }
}

impl<W: Write> SeedRepository for SqlScript<W> {
    type Error = std::io::Error;

    fn begin_phase(&mut self, phase: Phase) -> Result<(), Self::Error> {
        self.header()?;
        writeln!(self.writer)?;
        writeln!(self.writer, "-- {phase}")
    }

    fn create_tag(&mut self, name: &str) -> Result<(), Self::Error> {
        writeln!(
            self.writer,
            "INSERT INTO {} (name) VALUES ({});",
            Table::Tag,
            quote(Some(name))
        )
    }

    fn create_exercise(&mut self, exercise: &SeedExercise) -> Result<(), Self::Error> {
        writeln!(
            self.writer,
            "INSERT INTO {} (name, notes, link) VALUES ({}, {}, {});",
            Table::Exercise,
            quote(Some(&exercise.name)),
            quote(exercise.notes.as_deref()),
            quote(exercise.link.as_deref())
        )
    }

    fn link_exercise_tag(&mut self, exercise: &str, tag: &str) -> Result<(), Self::Error> {
        writeln!(
            self.writer,
            "INSERT INTO {} (exercise_id, tag_id) SELECT e.id, t.id FROM {} e, {} t \
             WHERE e.name = {} AND t.name = {};",
            Table::ExerciseTag,
            Table::Exercise,
            Table::Tag,
            quote(Some(exercise)),
            quote(Some(tag))
        )
    }

    fn create_plan(&mut self, plan: &SeedPlan) -> Result<(), Self::Error> {
        writeln!(
            self.writer,
            "INSERT INTO {} (name, description) VALUES ({}, {});",
            Table::Plan,
            quote(Some(&plan.name)),
            quote(Some(&plan.description))
        )
    }

    fn create_plan_default(
        &mut self,
        plan: &str,
        default: &domain::GroupDefault,
    ) -> Result<(), Self::Error> {
        writeln!(
            self.writer,
            "INSERT INTO {} (plan_id, tag_id, exercises_count, sets_per_exercise) \
             SELECT p.id, t.id, {}, {} FROM {} p, {} t WHERE p.name = {} AND t.name = {};",
            Table::PlanDefault,
            default.exercises_count,
            default.sets_per_exercise,
            Table::Plan,
            Table::Tag,
            quote(Some(plan)),
            quote(Some(&default.muscle_group))
        )
    }

    fn link_exercise_plan(&mut self, plan: &str, exercise: &str) -> Result<(), Self::Error> {
        writeln!(
            self.writer,
            "INSERT INTO {} (plan_id, exercise_id) SELECT p.id, e.id FROM {} p, {} e \
             WHERE p.name = {} AND e.name = {};",
            Table::ExercisePlan,
            Table::Plan,
            Table::Exercise,
            quote(Some(plan)),
            quote(Some(exercise))
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{
        seed::{SeedData, Source},
        tests::data::{main_catalog, rehab_catalog},
    };

    use super::*;

    #[rstest]
    #[case(Some("chest"), "'chest'")]
    #[case(Some("Elbows high, don't shrug"), "'Elbows high, don''t shrug'")]
    #[case(Some("''"), "''''''")]
    #[case(Some(""), "''")]
    #[case(None, "NULL")]
    fn test_quote(#[case] value: Option<&str>, #[case] expected: &str) {
        assert_eq!(quote(value), expected);
    }

    fn script() -> String {
        let (main, rehab) = (main_catalog(), rehab_catalog());
        let data = SeedData::from_sources(&[
            Source {
                plan_name: "Main Workout Plan".to_string(),
                description: "Default workout plan from exercises.json".to_string(),
                catalog: &main,
            },
            Source {
                plan_name: "Atomic Rehab Plan".to_string(),
                description: "Rehabilitation workout plan from atomic-rehab.json".to_string(),
                catalog: &rehab,
            },
        ]);
        let mut script = SqlScript::new(Vec::new());
        data.apply(&mut script).unwrap();
        String::from_utf8(script.into_inner()).unwrap()
    }

    #[test]
    fn test_sql_script() {
        assert_eq!(
            script(),
            "\
-- Workout Planner Seed Data
-- Generated from JSON exercise files

-- Insert Tags
INSERT INTO Tag (name) VALUES ('chest');
INSERT INTO Tag (name) VALUES ('glutes');
INSERT INTO Tag (name) VALUES ('hamstrings');
INSERT INTO Tag (name) VALUES ('hip');
INSERT INTO Tag (name) VALUES ('rear delts');
INSERT INTO Tag (name) VALUES ('rotator cuff');
INSERT INTO Tag (name) VALUES ('triceps');

-- Insert Exercises
INSERT INTO Exercise (name, notes, link) VALUES ('Clamshell', 'Slow and controlled', NULL);
INSERT INTO Exercise (name, notes, link) VALUES ('Face Pull', 'Elbows high, don''t shrug', NULL);
INSERT INTO Exercise (name, notes, link) VALUES ('Hip Thrust', 'Pause at the top', NULL);
INSERT INTO Exercise (name, notes, link) VALUES ('Push Up', NULL, 'https://example.org/push-up');

-- Insert ExerciseTag relationships
INSERT INTO ExerciseTag (exercise_id, tag_id) SELECT e.id, t.id FROM Exercise e, Tag t WHERE e.name = 'Clamshell' AND t.name = 'glutes';
INSERT INTO ExerciseTag (exercise_id, tag_id) SELECT e.id, t.id FROM Exercise e, Tag t WHERE e.name = 'Clamshell' AND t.name = 'hip';
INSERT INTO ExerciseTag (exercise_id, tag_id) SELECT e.id, t.id FROM Exercise e, Tag t WHERE e.name = 'Face Pull' AND t.name = 'rear delts';
INSERT INTO ExerciseTag (exercise_id, tag_id) SELECT e.id, t.id FROM Exercise e, Tag t WHERE e.name = 'Hip Thrust' AND t.name = 'glutes';
INSERT INTO ExerciseTag (exercise_id, tag_id) SELECT e.id, t.id FROM Exercise e, Tag t WHERE e.name = 'Hip Thrust' AND t.name = 'hamstrings';
INSERT INTO ExerciseTag (exercise_id, tag_id) SELECT e.id, t.id FROM Exercise e, Tag t WHERE e.name = 'Push Up' AND t.name = 'chest';
INSERT INTO ExerciseTag (exercise_id, tag_id) SELECT e.id, t.id FROM Exercise e, Tag t WHERE e.name = 'Push Up' AND t.name = 'triceps';

-- Create plans
INSERT INTO Plan (name, description) VALUES ('Main Workout Plan', 'Default workout plan from exercises.json');
INSERT INTO Plan (name, description) VALUES ('Atomic Rehab Plan', 'Rehabilitation workout plan from atomic-rehab.json');

-- Plan defaults
INSERT INTO PlanDefault (plan_id, tag_id, exercises_count, sets_per_exercise) SELECT p.id, t.id, 2, 3 FROM Plan p, Tag t WHERE p.name = 'Main Workout Plan' AND t.name = 'glutes';
INSERT INTO PlanDefault (plan_id, tag_id, exercises_count, sets_per_exercise) SELECT p.id, t.id, 1, 4 FROM Plan p, Tag t WHERE p.name = 'Main Workout Plan' AND t.name = 'chest';

-- Insert ExercisePlan relationships
INSERT INTO ExercisePlan (plan_id, exercise_id) SELECT p.id, e.id FROM Plan p, Exercise e WHERE p.name = 'Atomic Rehab Plan' AND e.name = 'Clamshell';
INSERT INTO ExercisePlan (plan_id, exercise_id) SELECT p.id, e.id FROM Plan p, Exercise e WHERE p.name = 'Main Workout Plan' AND e.name = 'Face Pull';
INSERT INTO ExercisePlan (plan_id, exercise_id) SELECT p.id, e.id FROM Plan p, Exercise e WHERE p.name = 'Atomic Rehab Plan' AND e.name = 'Face Pull';
INSERT INTO ExercisePlan (plan_id, exercise_id) SELECT p.id, e.id FROM Plan p, Exercise e WHERE p.name = 'Main Workout Plan' AND e.name = 'Hip Thrust';
INSERT INTO ExercisePlan (plan_id, exercise_id) SELECT p.id, e.id FROM Plan p, Exercise e WHERE p.name = 'Main Workout Plan' AND e.name = 'Push Up';
"
        );
    }

    #[test]
    fn test_sql_script_duplicate_exercise() {
        let script = script();

        assert_eq!(
            script
                .lines()
                .filter(|l| l.starts_with("INSERT INTO Exercise (") && l.contains("'Face Pull'"))
                .count(),
            1
        );
        assert_eq!(
            script
                .lines()
                .filter(|l| l.starts_with("INSERT INTO ExercisePlan") && l.contains("'Face Pull'"))
                .count(),
            2
        );
    }
}

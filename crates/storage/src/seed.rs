use std::collections::{BTreeMap, BTreeSet};

use liftplan_domain as domain;

/// A catalog that becomes one plan in the seed data.
pub struct Source<'a> {
    pub plan_name: String,
    pub description: String,
    pub catalog: &'a domain::Catalog,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedExercise {
    pub name: String,
    pub notes: Option<String>,
    pub link: Option<String>,
    pub tags: Vec<String>,
    pub plans: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedPlan {
    pub name: String,
    pub description: String,
    pub defaults: Vec<domain::GroupDefault>,
}

/// Relational view of one or more catalogs.
///
/// Tags and exercises are sorted by name. Exercises are deduplicated by name: the first
/// source an exercise appears in determines its notes, link and tags, every further source
/// only adds a plan membership.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedData {
    pub tags: Vec<String>,
    pub exercises: Vec<SeedExercise>,
    pub plans: Vec<SeedPlan>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter)]
pub enum Phase {
    #[strum(serialize = "Insert Tags")]
    Tags,
    #[strum(serialize = "Insert Exercises")]
    Exercises,
    #[strum(serialize = "Insert ExerciseTag relationships")]
    ExerciseTags,
    #[strum(serialize = "Create plans")]
    Plans,
    #[strum(serialize = "Plan defaults")]
    PlanDefaults,
    #[strum(serialize = "Insert ExercisePlan relationships")]
    ExercisePlans,
}

/// Target of seed data, e.g. a SQL script or a database connection.
///
/// Rows are created in dependency order, so a link is only created after both of its ends.
pub trait SeedRepository {
    type Error;

    fn begin_phase(&mut self, _phase: Phase) -> Result<(), Self::Error> {
        Ok(())
    }
    fn create_tag(&mut self, name: &str) -> Result<(), Self::Error>;
    fn create_exercise(&mut self, exercise: &SeedExercise) -> Result<(), Self::Error>;
    fn link_exercise_tag(&mut self, exercise: &str, tag: &str) -> Result<(), Self::Error>;
    fn create_plan(&mut self, plan: &SeedPlan) -> Result<(), Self::Error>;
    fn create_plan_default(
        &mut self,
        plan: &str,
        default: &domain::GroupDefault,
    ) -> Result<(), Self::Error>;
    fn link_exercise_plan(&mut self, plan: &str, exercise: &str) -> Result<(), Self::Error>;
}

impl SeedData {
    #[must_use]
    pub fn from_sources(sources: &[Source]) -> Self {
        let mut tags = BTreeSet::new();
        let mut exercises: BTreeMap<String, SeedExercise> = BTreeMap::new();
        let mut plans = vec![];

        for source in sources {
            for exercise in source.catalog.exercises() {
                tags.extend(exercise.tags.iter().cloned());

                let entry = exercises
                    .entry(exercise.name.to_string())
                    .or_insert_with(|| SeedExercise {
                        name: exercise.name.to_string(),
                        notes: exercise.notes.clone(),
                        link: exercise.link.clone(),
                        tags: exercise.tags.clone(),
                        plans: vec![],
                    });

                if !entry.plans.contains(&source.plan_name) {
                    entry.plans.push(source.plan_name.clone());
                }
            }

            plans.push(SeedPlan {
                name: source.plan_name.clone(),
                description: source.description.clone(),
                defaults: source.catalog.defaults().to_vec(),
            });
        }

        Self {
            tags: tags.into_iter().collect(),
            exercises: exercises.into_values().collect(),
            plans,
        }
    }

    #[must_use]
    pub fn exercise_plan_links(&self) -> usize {
        self.exercises.iter().map(|e| e.plans.len()).sum()
    }

    /// Write all rows to the repository, phase by phase.
    pub fn apply<R: SeedRepository>(&self, repository: &mut R) -> Result<(), R::Error> {
        repository.begin_phase(Phase::Tags)?;
        for tag in &self.tags {
            repository.create_tag(tag)?;
        }

        repository.begin_phase(Phase::Exercises)?;
        for exercise in &self.exercises {
            repository.create_exercise(exercise)?;
        }

        repository.begin_phase(Phase::ExerciseTags)?;
        for exercise in &self.exercises {
            for tag in &exercise.tags {
                repository.link_exercise_tag(&exercise.name, tag)?;
            }
        }

        repository.begin_phase(Phase::Plans)?;
        for plan in &self.plans {
            repository.create_plan(plan)?;
        }

        repository.begin_phase(Phase::PlanDefaults)?;
        for plan in &self.plans {
            for default in &plan.defaults {
                repository.create_plan_default(&plan.name, default)?;
            }
        }

        repository.begin_phase(Phase::ExercisePlans)?;
        for exercise in &self.exercises {
            for plan in &exercise.plans {
                repository.link_exercise_plan(plan, &exercise.name)?;
            }
        }

        Ok(())
    }
}

use std::{fs::File, io::BufReader, io::Read, path::Path};

use liftplan_domain as domain;
use log::debug;

/// Exercise catalog document as stored on disk.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct CatalogFile {
    pub exercises: Vec<ExerciseEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<Defaults>,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct ExerciseEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub set_duration_sec: Option<f64>,
    #[serde(default)]
    pub rest_duration_sec: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// Either a plain list of group defaults or a section holding it under `muscle_groups`.
///
/// A section without `muscle_groups` declares no defaults.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Defaults {
    List(Vec<GroupDefault>),
    Section {
        #[serde(default)]
        muscle_groups: Vec<GroupDefault>,
    },
}

impl Defaults {
    fn into_list(self) -> Vec<GroupDefault> {
        match self {
            Defaults::List(list) | Defaults::Section { muscle_groups: list } => list,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GroupDefault {
    pub muscle_group: String,
    pub exercises_count: u32,
    pub sets_per_exercise: u32,
}

impl From<GroupDefault> for domain::GroupDefault {
    fn from(value: GroupDefault) -> Self {
        Self {
            muscle_group: value.muscle_group,
            exercises_count: value.exercises_count,
            sets_per_exercise: value.sets_per_exercise,
        }
    }
}

impl From<&domain::GroupDefault> for GroupDefault {
    fn from(value: &domain::GroupDefault) -> Self {
        Self {
            muscle_group: value.muscle_group.clone(),
            exercises_count: value.exercises_count,
            sets_per_exercise: value.sets_per_exercise,
        }
    }
}

impl From<&domain::Exercise> for ExerciseEntry {
    fn from(value: &domain::Exercise) -> Self {
        Self {
            name: Some(value.name.to_string()),
            tags: value.tags.clone(),
            set_duration_sec: value.timing.map(|t| t.set_duration_sec),
            rest_duration_sec: value.timing.map(|t| t.rest_duration_sec),
            notes: value.notes.clone(),
            link: value.link.clone(),
        }
    }
}

impl From<&domain::Catalog> for CatalogFile {
    fn from(value: &domain::Catalog) -> Self {
        Self {
            exercises: value.exercises().iter().map(ExerciseEntry::from).collect(),
            defaults: if value.defaults().is_empty() {
                None
            } else {
                Some(Defaults::List(
                    value.defaults().iter().map(GroupDefault::from).collect(),
                ))
            },
        }
    }
}

impl TryFrom<CatalogFile> for domain::Catalog {
    type Error = domain::CatalogError;

    fn try_from(value: CatalogFile) -> Result<Self, Self::Error> {
        let exercises = value
            .exercises
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let Some(name) = entry.name else {
                    return Err(domain::CatalogError::Malformed(format!(
                        "exercise {index} has no name"
                    )));
                };
                Ok(domain::Exercise {
                    name: domain::Name::new(&name)
                        .map_err(|source| domain::CatalogError::InvalidName { index, source })?,
                    tags: entry.tags,
                    timing: match (entry.set_duration_sec, entry.rest_duration_sec) {
                        (Some(set_duration_sec), Some(rest_duration_sec)) => Some(domain::Timing {
                            set_duration_sec,
                            rest_duration_sec,
                        }),
                        _ => None,
                    },
                    notes: entry.notes,
                    link: entry.link,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(domain::Catalog::new(
            exercises,
            value
                .defaults
                .map(Defaults::into_list)
                .unwrap_or_default()
                .into_iter()
                .map(domain::GroupDefault::from)
                .collect(),
        ))
    }
}

pub fn read_catalog(reader: impl Read) -> Result<domain::Catalog, domain::CatalogError> {
    let file: CatalogFile = serde_json::from_reader(reader)
        .map_err(|err| domain::CatalogError::Malformed(err.to_string()))?;
    domain::Catalog::try_from(file)
}

pub fn parse_catalog(json: &str) -> Result<domain::Catalog, domain::CatalogError> {
    read_catalog(json.as_bytes())
}

pub fn load_catalog(path: &Path) -> Result<domain::Catalog, domain::CatalogError> {
    let catalog = read_catalog(BufReader::new(File::open(path)?))?;
    debug!(
        "loaded {} exercises from {}",
        catalog.len(),
        path.display()
    );
    Ok(catalog)
}

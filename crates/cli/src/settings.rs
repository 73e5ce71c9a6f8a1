use std::{
    collections::BTreeMap,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use liftplan_domain::PlanParameters;
use log::LevelFilter;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub catalog: Option<PathBuf>,
    pub duration_minutes: f64,
    /// Order of the muscle groups in the plan. Falls back to the keys of `time_split`.
    pub muscle_groups: Vec<String>,
    pub time_split: BTreeMap<String, f64>,
    pub seed: Option<u64>,
    #[serde(with = "LevelFilterDef")]
    pub log_level: LevelFilter,
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(remote = "LevelFilter", rename_all = "lowercase")]
enum LevelFilterDef {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog: None,
            duration_minutes: 30.0,
            muscle_groups: vec![
                "glutes".to_string(),
                "rear delts".to_string(),
                "chest".to_string(),
            ],
            time_split: BTreeMap::from([
                ("glutes".to_string(), 0.3),
                ("rear delts".to_string(), 0.3),
                ("chest".to_string(), 0.4),
            ]),
            seed: None,
            log_level: LevelFilter::Warn,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let file = File::open(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Replace the muscle groups and their time split, keeping the given order.
    pub fn set_groups(&mut self, groups: &[(String, f64)]) {
        self.muscle_groups = groups.iter().map(|(group, _)| group.clone()).collect();
        self.time_split = groups.iter().cloned().collect();
    }

    #[must_use]
    pub fn plan_parameters(&self) -> PlanParameters {
        PlanParameters {
            duration_minutes: self.duration_minutes,
            muscle_groups: if self.muscle_groups.is_empty() {
                self.time_split.keys().cloned().collect()
            } else {
                self.muscle_groups.clone()
            },
            time_split: self.time_split.clone(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid settings {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn write_settings(value: &serde_json::Value) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(value.to_string().as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_settings_load() {
        let file = write_settings(&json!({
            "catalog": "exercises.json",
            "duration_minutes": 45,
            "muscle_groups": ["chest", "glutes"],
            "time_split": {"glutes": 0.5, "chest": 0.5},
            "seed": 7,
            "log_level": "debug"
        }));

        assert_eq!(
            Settings::load(file.path()).unwrap(),
            Settings {
                catalog: Some(PathBuf::from("exercises.json")),
                duration_minutes: 45.0,
                muscle_groups: vec!["chest".to_string(), "glutes".to_string()],
                time_split: BTreeMap::from([
                    ("chest".to_string(), 0.5),
                    ("glutes".to_string(), 0.5)
                ]),
                seed: Some(7),
                log_level: LevelFilter::Debug,
            }
        );
    }

    #[test]
    fn test_settings_load_partial() {
        let file = write_settings(&json!({"duration_minutes": 60}));
        let settings = Settings::load(file.path()).unwrap();

        assert_eq!(
            settings,
            Settings {
                duration_minutes: 60.0,
                ..Settings::default()
            }
        );
    }

    #[test]
    fn test_settings_load_invalid() {
        let file = write_settings(&json!({"log_level": "loud"}));

        assert!(matches!(
            Settings::load(file.path()),
            Err(SettingsError::Parse { .. })
        ));
    }

    #[test]
    fn test_settings_load_missing() {
        let dir = tempfile::tempdir().unwrap();

        assert!(matches!(
            Settings::load(&dir.path().join("settings.json")),
            Err(SettingsError::Io { .. })
        ));
    }

    #[test]
    fn test_settings_plan_parameters() {
        let parameters = Settings::default().plan_parameters();

        assert_eq!(parameters.duration_minutes, 30.0);
        assert_eq!(parameters.muscle_groups, vec!["glutes", "rear delts", "chest"]);
        assert!((parameters.time_split.values().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_settings_plan_parameters_without_groups() {
        let settings = Settings {
            muscle_groups: vec![],
            ..Settings::default()
        };

        assert_eq!(
            settings.plan_parameters().muscle_groups,
            vec!["chest", "glutes", "rear delts"]
        );
    }

    #[test]
    fn test_settings_set_groups() {
        let mut settings = Settings::default();
        settings.set_groups(&[("core".to_string(), 0.25), ("back".to_string(), 0.75)]);

        assert_eq!(settings.muscle_groups, vec!["core", "back"]);
        assert_eq!(
            settings.time_split,
            BTreeMap::from([("back".to_string(), 0.75), ("core".to_string(), 0.25)])
        );
    }
}

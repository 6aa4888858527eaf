use crate::records::Kind;
use crate::shared::paths::get_log_dir;
use crate::store::DEFAULT_EXTENSION;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_ENV: &str = "LOGBOOK_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 5;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Missing config key: {0}")]
    MissingKey(&'static str),
    #[error("{key} directory does not exist: {}", path.display())]
    MissingDirectory { key: &'static str, path: PathBuf },
    #[error("refresh_interval_secs must be greater than zero")]
    InvalidInterval,
}

/// File layout as written by the user. Directory keys are optional here so
/// a missing one can be reported by name.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSettings {
    media_dir: Option<PathBuf>,
    workout_dir: Option<PathBuf>,
    template_dir: Option<PathBuf>,
    habits_dir: Option<PathBuf>,
    activities_dir: Option<PathBuf>,
    presets_dir: Option<PathBuf>,
    refresh_interval_secs: Option<u64>,
    file_extension: Option<String>,
    log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub media_dir: PathBuf,
    pub workout_dir: PathBuf,
    pub template_dir: PathBuf,
    pub habits_dir: PathBuf,
    pub activities_dir: PathBuf,
    pub presets_dir: PathBuf,
    pub refresh_interval_secs: u64,
    pub file_extension: String,
    pub log_dir: PathBuf,
}

impl Settings {
    /// Settings with every kind stored in a subdirectory of `root`.
    pub fn rooted_at(root: &Path) -> Self {
        Self {
            media_dir: root.join("media"),
            workout_dir: root.join("workouts"),
            template_dir: root.join("templates"),
            habits_dir: root.join("habits"),
            activities_dir: root.join("activities"),
            presets_dir: root.join("presets"),
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            file_extension: DEFAULT_EXTENSION.to_string(),
            log_dir: get_log_dir(),
        }
    }

    pub fn from_toml_str(contents: &str, path: &Path) -> Result<Self, SettingsError> {
        let raw: RawSettings = toml::from_str(contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let refresh_interval_secs = raw
            .refresh_interval_secs
            .unwrap_or(DEFAULT_REFRESH_INTERVAL_SECS);
        if refresh_interval_secs == 0 {
            return Err(SettingsError::InvalidInterval);
        }

        Ok(Self {
            media_dir: required(raw.media_dir, Kind::Media)?,
            workout_dir: required(raw.workout_dir, Kind::Workout)?,
            template_dir: required(raw.template_dir, Kind::Template)?,
            habits_dir: required(raw.habits_dir, Kind::Habit)?,
            activities_dir: required(raw.activities_dir, Kind::Activity)?,
            presets_dir: required(raw.presets_dir, Kind::Preset)?,
            refresh_interval_secs,
            file_extension: raw
                .file_extension
                .map(|ext| ext.trim_start_matches('.').to_string())
                .filter(|ext| !ext.is_empty())
                .unwrap_or_else(|| DEFAULT_EXTENSION.to_string()),
            log_dir: raw.log_dir.unwrap_or_else(get_log_dir),
        })
    }

    pub fn dir_for(&self, kind: Kind) -> &Path {
        match kind {
            Kind::Media => &self.media_dir,
            Kind::Workout => &self.workout_dir,
            Kind::Template => &self.template_dir,
            Kind::Habit => &self.habits_dir,
            Kind::Activity => &self.activities_dir,
            Kind::Preset => &self.presets_dir,
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    /// Fails on the first configured directory that does not exist.
    pub fn validate_dirs(&self) -> Result<(), SettingsError> {
        for kind in Kind::ALL {
            let dir = self.dir_for(kind);
            if !dir.is_dir() {
                return Err(SettingsError::MissingDirectory {
                    key: kind.config_key(),
                    path: dir.to_path_buf(),
                });
            }
        }
        Ok(())
    }
}

fn required(value: Option<PathBuf>, kind: Kind) -> Result<PathBuf, SettingsError> {
    value.ok_or(SettingsError::MissingKey(kind.config_key()))
}

/// First CLI argument, then `$LOGBOOK_CONFIG`, then `./config.toml`.
pub fn resolve_config_path(arg: Option<String>) -> PathBuf {
    arg.or_else(|| std::env::var(CONFIG_ENV).ok())
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let settings = Settings::from_toml_str(&contents, path)?;
    settings.validate_dirs()?;
    Ok(settings)
}

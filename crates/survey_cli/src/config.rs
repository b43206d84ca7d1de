//! Runtime configuration resolved from flags and environment.
//!
//! # Invariants
//! - `data_dir` is always absolute; logging requires it.

use crate::errors::{CliError, CliResult};
use std::path::{Path, PathBuf};
use survey_core::default_log_level;

const DEFAULT_DATA_DIR_NAME: &str = "survey-data";
const DB_FILE_NAME: &str = "survey.sqlite3";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub data_dir: PathBuf,
    pub log_level: String,
}

impl CliConfig {
    /// Fills defaults: `./survey-data` and the build-mode log level.
    pub fn resolve(data_dir: Option<PathBuf>, log_level: Option<String>) -> CliResult<Self> {
        let cwd = std::env::current_dir()
            .map_err(|err| CliError::Config(format!("cannot read working directory: {err}")))?;
        Ok(Self::resolve_in(&cwd, data_dir, log_level))
    }

    fn resolve_in(cwd: &Path, data_dir: Option<PathBuf>, log_level: Option<String>) -> Self {
        let data_dir = match data_dir {
            Some(dir) if dir.is_absolute() => dir,
            Some(dir) => cwd.join(dir),
            None => cwd.join(DEFAULT_DATA_DIR_NAME),
        };
        let log_level = log_level
            .map(|level| level.trim().to_string())
            .filter(|level| !level.is_empty())
            .unwrap_or_else(|| default_log_level().to_string());

        Self {
            data_dir,
            log_level,
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::CliConfig;
    use std::path::{Path, PathBuf};

    #[test]
    fn relative_data_dir_is_anchored_to_cwd() {
        let config = CliConfig::resolve_in(
            Path::new("/work"),
            Some(PathBuf::from("field")),
            Some(" warn ".to_string()),
        );
        assert_eq!(config.data_dir, PathBuf::from("/work/field"));
        assert_eq!(config.db_path(), PathBuf::from("/work/field/survey.sqlite3"));
        assert_eq!(config.log_dir(), PathBuf::from("/work/field/logs"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = CliConfig::resolve_in(Path::new("/work"), None, Some(String::new()));
        assert_eq!(config.data_dir, PathBuf::from("/work/survey-data"));
        assert_eq!(config.log_level, survey_core::default_log_level());
    }
}

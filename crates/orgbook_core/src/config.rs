//! Store and log locations.
//!
//! # Invariants
//! - Both store files live directly under `data_dir`.
//! - Log directories handed to logging are absolute.

use std::path::{Path, PathBuf};

pub const EMPLOYEE_DB_FILE_NAME: &str = "employees.sqlite3";
pub const TASK_DB_FILE_NAME: &str = "tasks.sqlite3";
pub const DEFAULT_DATA_DIR: &str = "orgbook-data";
const LOG_DIR_NAME: &str = "logs";

/// On-disk layout for one orgbook installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn employee_db_path(&self) -> PathBuf {
        self.data_dir.join(EMPLOYEE_DB_FILE_NAME)
    }

    pub fn task_db_path(&self) -> PathBuf {
        self.data_dir.join(TASK_DB_FILE_NAME)
    }

    /// Default log directory, resolved against `cwd` when relative.
    pub fn default_log_dir(&self, cwd: &Path) -> PathBuf {
        absolutize(&self.data_dir.join(LOG_DIR_NAME), cwd)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

/// Joins relative paths onto `cwd`; absolute paths pass through.
pub fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::{absolutize, StoreConfig, EMPLOYEE_DB_FILE_NAME, TASK_DB_FILE_NAME};
    use std::path::Path;

    #[test]
    fn store_paths_sit_under_data_dir() {
        let config = StoreConfig::new("/srv/orgbook");
        assert_eq!(
            config.employee_db_path(),
            Path::new("/srv/orgbook").join(EMPLOYEE_DB_FILE_NAME)
        );
        assert_eq!(
            config.task_db_path(),
            Path::new("/srv/orgbook").join(TASK_DB_FILE_NAME)
        );
        assert_eq!(
            config.default_log_dir(Path::new("/ignored")),
            Path::new("/srv/orgbook/logs")
        );
    }

    #[test]
    fn relative_paths_resolve_against_cwd() {
        let config = StoreConfig::default();
        let log_dir = config.default_log_dir(Path::new("/home/me"));
        assert_eq!(log_dir, Path::new("/home/me/orgbook-data/logs"));
        assert_eq!(
            absolutize(Path::new("/abs"), Path::new("/home/me")),
            Path::new("/abs")
        );
    }
}

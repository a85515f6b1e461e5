use std::env;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const CONFIG_FILE: &str = "config.yaml";
pub const LOG_FILE: &str = "atlassian-backup.log";
pub const BACKUPS_DIR: &str = "backups";

/// Where the tool keeps its files. Built once at startup and handed to whoever needs a
/// path, so nothing depends on the directory the process was launched from.
#[derive(Debug, Clone)]
pub struct AppContext {
    root_dir: PathBuf,
}

impl AppContext {
    pub fn new(root_dir: impl Into<PathBuf>) -> AppContext {
        AppContext { root_dir: root_dir.into() }
    }

    /// Context rooted at the directory holding the running executable.
    pub fn from_executable() -> Result<AppContext, ConfigError> {
        let exe = env::current_exe().map_err(ConfigError::RootDir)?;
        let root_dir = exe.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
        Ok(AppContext::new(root_dir))
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.root_dir.join(CONFIG_FILE)
    }

    pub fn log_path(&self) -> PathBuf {
        self.root_dir.join(LOG_FILE)
    }

    /// Must already exist; downloads never create it.
    pub fn backups_dir(&self) -> PathBuf {
        self.root_dir.join(BACKUPS_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_root_when_paths_then_files_live_next_to_each_other() {
        let context = AppContext::new("/opt/atlassian-backup");

        assert_eq!(context.config_path(), PathBuf::from("/opt/atlassian-backup/config.yaml"));
        assert_eq!(context.log_path(), PathBuf::from("/opt/atlassian-backup/atlassian-backup.log"));
        assert_eq!(context.backups_dir(), PathBuf::from("/opt/atlassian-backup/backups"));
    }

    #[test]
    fn given_running_executable_when_from_executable_then_root_is_its_directory() {
        let context = AppContext::from_executable().unwrap();
        let exe = env::current_exe().unwrap();

        assert_eq!(context.root_dir(), exe.parent().unwrap());
    }
}

use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn db_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("wordfall");
            Some(state_dir.join("scores.db"))
        } else {
            ProjectDirs::from("", "", "wordfall")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("scores.db"))
        }
    }

    pub fn config_path() -> PathBuf {
        if let Some(pd) = ProjectDirs::from("", "", "wordfall") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("wordfall_config.json")
        }
    }
}

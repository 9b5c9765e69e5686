use std::env;
use std::path::{Path, PathBuf};

/// Environment variable naming the directory that holds the datasets.
pub const DATA_DIR_ENV_VAR: &str = "FLAVOR_GRAPH_DATA_DIR";
const DEFAULT_DATA_DIR: &str = "data";

const RECIPES_FILE: &str = "recipes.json";
const SUBSTITUTIONS_FILE: &str = "substitutions.json";
const INGREDIENT_TAGS_FILE: &str = "ingredient_tags.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub data_dir: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::with_data_dir(DEFAULT_DATA_DIR)
    }
}

impl EngineConfig {
    pub fn with_data_dir(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    /// Reads the data directory from the process environment, falling back to
    /// `./data`. The binary loads `.env` before calling this.
    pub fn from_env() -> Self {
        match env::var(DATA_DIR_ENV_VAR) {
            Ok(dir) if !dir.trim().is_empty() => Self::with_data_dir(dir.trim()),
            _ => Self::default(),
        }
    }

    pub fn recipes_path(&self) -> PathBuf {
        self.data_dir.join(RECIPES_FILE)
    }

    pub fn substitutions_path(&self) -> PathBuf {
        self.data_dir.join(SUBSTITUTIONS_FILE)
    }

    pub fn ingredient_tags_path(&self) -> PathBuf {
        self.data_dir.join(INGREDIENT_TAGS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_paths() {
        let config = EngineConfig::with_data_dir("/srv/flavor");
        assert_eq!(config.recipes_path(), PathBuf::from("/srv/flavor/recipes.json"));
        assert_eq!(config.substitutions_path(), PathBuf::from("/srv/flavor/substitutions.json"));
        assert_eq!(config.ingredient_tags_path(), PathBuf::from("/srv/flavor/ingredient_tags.json"));
    }

    #[test]
    fn test_default_data_dir() {
        assert_eq!(EngineConfig::default().data_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_from_env_reads_process_environment() {
        // Only test touching this variable.
        env::set_var(DATA_DIR_ENV_VAR, "  /srv/pantry  ");
        let config = EngineConfig::from_env();
        env::remove_var(DATA_DIR_ENV_VAR);
        assert_eq!(config.data_dir, PathBuf::from("/srv/pantry"));

        env::set_var(DATA_DIR_ENV_VAR, " ");
        let config = EngineConfig::from_env();
        env::remove_var(DATA_DIR_ENV_VAR);
        assert_eq!(config, EngineConfig::default());
    }
}

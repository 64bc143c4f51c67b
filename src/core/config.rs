use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Optional settings from `config.toml` in the platform config directory.
/// CLI flags and the `GEMINI_API_KEY` environment variable take precedence
/// over everything here.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
}

impl Config {
    pub fn load() -> Result<Config, Box<dyn std::error::Error>> {
        Self::load_from_path(&Self::config_path())
    }

    pub fn load_from_path(config_path: &PathBuf) -> Result<Config, Box<dyn std::error::Error>> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    fn config_path() -> PathBuf {
        let proj_dirs = ProjectDirs::from("org", "permacommons", "causette")
            .expect("Failed to determine config directory");
        proj_dirs.config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from_path(&dir.path().join("config.toml")).unwrap();
        assert!(config.base_url.is_none());
        assert!(config.model.is_none());
        assert!(config.api_key.is_none());
    }

    #[test]
    fn values_parse_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "model = \"gemini-2.5-pro\"\nbase_url = \"http://localhost:8080/v1beta\"\n").unwrap();
        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.model.as_deref(), Some("gemini-2.5-pro"));
        assert_eq!(
            config.base_url.as_deref(),
            Some("http://localhost:8080/v1beta")
        );
        assert!(config.api_key.is_none());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "model = [unclosed").unwrap();
        assert!(Config::load_from_path(&path).is_err());
    }
}

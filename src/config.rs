use crate::errors::{QuarryError, QuarryResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path, path::PathBuf, sync::RwLock};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub search_url: String,
    pub log_level: String,
    pub log_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_url: "http://localhost:5000".to_string(),
            log_level: "info".to_string(),
            log_dir: "logs".to_string(),
        }
    }
}

static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(Config::default()));

/// Loads `~/.config/quarry/config.json`, creating it with defaults on first
/// run. `QUARRY_SEARCH_URL` overrides the configured search url either way.
pub fn initialize_config() -> QuarryResult<()> {
    let config_path = get_config_path()?;

    let mut config = if config_path.exists() {
        load_config(&config_path)?
    } else {
        let config = Config::default();
        save_config(&config, &config_path)?;
        config
    };

    if let Ok(url) = env::var("QUARRY_SEARCH_URL") {
        config.search_url = url;
    }

    validate_config(&config)?;
    *CONFIG.write().unwrap() = config;
    Ok(())
}

pub fn get_config() -> Config {
    CONFIG.read().unwrap().clone()
}

fn load_config(path: &Path) -> QuarryResult<Config> {
    let config_str = fs::read_to_string(path)
        .map_err(|e| QuarryError::config_error(format!("failed to read config file: {}", e)))?;
    serde_json::from_str(&config_str)
        .map_err(|e| QuarryError::config_error(format!("failed to parse config: {}", e)))
}

fn save_config(config: &Config, path: &Path) -> QuarryResult<()> {
    let parent = path
        .parent()
        .ok_or_else(|| QuarryError::config_error("config path has no parent directory"))?;
    fs::create_dir_all(parent)
        .map_err(|e| QuarryError::config_error(format!("failed to create config dir: {}", e)))?;
    let config_str = serde_json::to_string_pretty(config)
        .map_err(|e| QuarryError::config_error(format!("failed to serialize config: {}", e)))?;
    fs::write(path, config_str)
        .map_err(|e| QuarryError::config_error(format!("failed to write config file: {}", e)))?;
    Ok(())
}

fn get_config_path() -> QuarryResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| QuarryError::config_error("could not determine home directory"))?;
    Ok(home_dir.join(".config").join("quarry").join("config.json"))
}

fn validate_config(config: &Config) -> QuarryResult<()> {
    if config.search_url.is_empty() {
        return Err(QuarryError::config_error("search_url is required"));
    }
    if !config.search_url.starts_with("http://") && !config.search_url.starts_with("https://") {
        return Err(QuarryError::config_error(
            "search_url must start with http:// or https://",
        ));
    }
    if config.log_level.is_empty() {
        return Err(QuarryError::config_error("log_level is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn empty_search_url_is_rejected() {
        let mut config = Config::default();
        config.search_url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn non_http_search_url_is_rejected() {
        let mut config = Config::default();
        config.search_url = "localhost:5000".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn config_round_trips_through_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let mut config = Config::default();
        config.search_url = "http://search.internal:8080".to_string();

        save_config(&config, &path).unwrap();
        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.search_url, config.search_url);
        assert_eq!(loaded.log_level, config.log_level);
    }

    #[test]
    fn garbage_config_file_is_a_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            load_config(&path),
            Err(QuarryError::Config(_))
        ));
    }
}

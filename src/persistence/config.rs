use super::files::atomic_write;
use crate::domain::Interval;
use crate::scheduler::{Ladder, DEFAULT_UPCOMING_WINDOW_HOURS};
use anyhow::{Context, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// App settings stored in config.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the `<user>.srs` files
    pub data_dir: PathBuf,

    #[serde(default = "default_upcoming_window_hours")]
    pub upcoming_window_hours: i64,

    /// Custom review ladder, e.g. `["12h", "1", "3"]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ladder: Option<Vec<Interval>>,
}

fn default_upcoming_window_hours() -> i64 {
    DEFAULT_UPCOMING_WINDOW_HOURS
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            upcoming_window_hours: DEFAULT_UPCOMING_WINDOW_HOURS,
            ladder: None,
        }
    }

    /// Look-ahead for upcoming tasks; negative values count as zero
    pub fn upcoming_window(&self) -> Result<Duration> {
        Duration::try_hours(self.upcoming_window_hours.max(0)).with_context(|| {
            format!("upcoming_window_hours is too large: {}", self.upcoming_window_hours)
        })
    }

    /// The configured ladder, or the default one
    pub fn ladder(&self) -> Result<Ladder> {
        match &self.ladder {
            Some(steps) => Ladder::new(steps.clone()).context("Invalid ladder in config"),
            None => Ok(Ladder::default()),
        }
    }
}

/// Default location: `<config dir>/spaced/config.json`
pub fn config_file() -> Result<PathBuf> {
    let dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(dir.join("spaced").join("config.json"))
}

/// Load config, `None` when the file does not exist yet
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Option<Config>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    log::info!("Loaded config from {}", path.display());
    Ok(Some(config))
}

/// Save config, creating its directory if needed
pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }

    let json = serde_json::to_string_pretty(config)?;
    atomic_write(path, &json).with_context(|| format!("Failed to write config file: {}", path.display()))?;
    log::info!("Saved config to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_load_nonexistent_config() {
        let temp_dir = tempdir().unwrap();
        let config = load_config(temp_dir.path().join("config.json")).unwrap();
        assert!(config.is_none());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("spaced").join("config.json");

        let mut config = Config::new(PathBuf::from("/srv/reviews"));
        config.upcoming_window_hours = 24;
        config.ladder = Some(vec![Interval::Hours(6), Interval::Days(2)]);

        save_config(&path, &config).unwrap();
        let loaded = load_config(&path).unwrap().unwrap();

        assert_eq!(loaded, config);
        assert_eq!(loaded.upcoming_window().unwrap(), Duration::hours(24));
        assert_eq!(loaded.ladder().unwrap().steps(), &[Interval::Hours(6), Interval::Days(2)]);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = serde_json::from_str(r#"{ "data_dir": "/tmp/srs" }"#).unwrap();
        assert_eq!(config.upcoming_window().unwrap(), Duration::hours(48));
        assert_eq!(config.ladder().unwrap(), Ladder::default());
    }

    #[test]
    fn test_out_of_range_window_is_reported() {
        let config: Config =
            serde_json::from_str(r#"{ "data_dir": "/tmp/srs", "upcoming_window_hours": 9223372036854775807 }"#)
                .unwrap();
        let err = config.upcoming_window().unwrap_err();
        assert!(err.to_string().contains("too large"));

        let config: Config =
            serde_json::from_str(r#"{ "data_dir": "/tmp/srs", "upcoming_window_hours": -5 }"#).unwrap();
        assert_eq!(config.upcoming_window().unwrap(), Duration::zero());
    }

    #[test]
    fn test_invalid_ladder_is_reported() {
        let config: Config =
            serde_json::from_str(r#"{ "data_dir": "/tmp/srs", "ladder": ["3", "1"] }"#).unwrap();
        assert!(config.ladder().is_err());

        let bad_token = serde_json::from_str::<Config>(r#"{ "data_dir": "/tmp/srs", "ladder": ["3x"] }"#);
        assert!(bad_token.is_err());
    }
}

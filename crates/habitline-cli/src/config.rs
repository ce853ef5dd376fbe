//! TOML-based CLI configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use habitline_core::store::data_dir;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Override for the SQLite database path.
    pub database_path: Option<PathBuf>,
    /// Default number of streaks shown by `show streaks --best`.
    pub default_best: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config { database_path: None, default_best: 5 }
    }
}

impl Config {
    /// Load the config from `~/.config/habitline/config.toml`, falling
    /// back to defaults if the file is missing or unreadable.
    pub fn load() -> Self {
        let Ok(dir) = data_dir() else { return Config::default() };
        let Ok(text) = std::fs::read_to_string(dir.join("config.toml")) else {
            return Config::default();
        };
        toml::from_str(&text).unwrap_or_default()
    }

    /// Write the config back to disk.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let dir = data_dir()?;
        let text = toml::to_string_pretty(self)?;
        std::fs::write(dir.join("config.toml"), text)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "database_path" => Some(
                self.database_path
                    .as_ref()
                    .map_or_else(|| "default".into(), |p| p.display().to_string()),
            ),
            "default_best" => Some(self.default_best.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        match key {
            "database_path" => {
                self.database_path = Some(PathBuf::from(value));
            }
            "default_best" => {
                self.default_best = value.parse()?;
            }
            _ => return Err(format!("unknown key: {key}").into()),
        }
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_fields() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.default_best, 5);
        assert!(config.database_path.is_none());
    }

    #[test]
    fn toml_round_trip() {
        let mut config = Config::default();
        config.database_path = Some(PathBuf::from("/tmp/habits.db"));
        config.default_best = 3;
        let text = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.database_path, config.database_path);
        assert_eq!(back.default_best, 3);
    }
}

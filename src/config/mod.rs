use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not find config directory")]
    NoConfigDir,

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("{control} range is empty ({min} > {max})")]
    EmptyRange {
        control: &'static str,
        min: u32,
        max: u32,
    },

    #[error("{control} default {value} is outside {min}..={max}")]
    DefaultOutOfRange {
        control: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("tip maximum {0} is above 100%")]
    TipTooHigh(u32),

    #[error("split minimum must be 0 or 1, got {0}")]
    SplitMinimum(u32),
}

/// Bounds and starting point of one step slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderRange {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

impl SliderRange {
    /// Clamp a selector value into the range, keeping fractional input intact
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.default as f64;
        }
        value.clamp(self.min as f64, self.max as f64)
    }

    fn validate(&self, control: &'static str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::EmptyRange {
                control,
                min: self.min,
                max: self.max,
            });
        }
        if !(self.min..=self.max).contains(&self.default) {
            return Err(ConfigError::DefaultOutOfRange {
                control,
                value: self.default,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

fn default_tip() -> SliderRange {
    SliderRange { min: 5, max: 25, default: 15 }
}

fn default_split() -> SliderRange {
    SliderRange { min: 1, max: 10, default: 1 }
}

/// Optional color overrides, as `#RRGGBB` or `#RGB`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Tip slider, in percentage points
    #[serde(default = "default_tip")]
    pub tip: SliderRange,

    /// Split slider, in people. `min` may be 0 or 1; the divisor never drops below 1.
    #[serde(default = "default_split")]
    pub split: SliderRange,

    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tip: default_tip(),
            split: default_split(),
            theme: ThemeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Default config file path
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join("gratuity");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a config file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Load config, falling back to defaults on any problem.
    ///
    /// With no explicit path, a missing default file is created.
    pub fn load(path: Option<&Path>) -> Self {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match Self::default_path() {
                Ok(p) => (p, false),
                Err(e) => {
                    tracing::warn!("{}", e);
                    return AppConfig::default();
                }
            },
        };

        if path.exists() {
            match Self::load_from(&path) {
                Ok(config) => {
                    tracing::debug!("Loaded config from {}", path.display());
                    return config;
                }
                Err(e) => tracing::warn!("Ignoring config {}: {}", path.display(), e),
            }
            return AppConfig::default();
        }

        let config = AppConfig::default();
        if explicit {
            tracing::warn!("Config {} not found, using defaults", path.display());
        } else if let Err(e) = config.save_to(&path) {
            tracing::warn!("Could not write default config: {}", e);
        }
        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tip.validate("tip")?;
        if self.tip.max > 100 {
            return Err(ConfigError::TipTooHigh(self.tip.max));
        }
        if self.split.min > 1 {
            return Err(ConfigError::SplitMinimum(self.split.min));
        }
        self.split.validate("split")
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig {
            tip: SliderRange { min: 0, max: 30, default: 20 },
            split: SliderRange { min: 0, max: 12, default: 2 },
            theme: ThemeConfig {
                field: Some("#2FB522".to_string()),
                ..Default::default()
            },
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized = AppConfig::from_toml(&serialized).unwrap();

        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = AppConfig::from_toml("[split]\nmin = 0\nmax = 10\ndefault = 1\n").unwrap();
        assert_eq!(config.tip, default_tip());
        assert_eq!(config.split.min, 0);
        assert_eq!(config.theme, ThemeConfig::default());

        assert_eq!(AppConfig::from_toml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_rejects_bad_ranges() {
        let empty = AppConfig::from_toml("[tip]\nmin = 20\nmax = 10\ndefault = 15\n");
        assert!(matches!(empty, Err(ConfigError::EmptyRange { control: "tip", .. })));

        let outside = AppConfig::from_toml("[split]\nmin = 1\nmax = 10\ndefault = 11\n");
        assert!(matches!(outside, Err(ConfigError::DefaultOutOfRange { value: 11, .. })));

        let split_min = AppConfig::from_toml("[split]\nmin = 2\nmax = 10\ndefault = 2\n");
        assert!(matches!(split_min, Err(ConfigError::SplitMinimum(2))));

        let tip_max = AppConfig::from_toml("[tip]\nmin = 5\nmax = 150\ndefault = 15\n");
        assert!(matches!(tip_max, Err(ConfigError::TipTooHigh(150))));

        assert!(matches!(
            AppConfig::from_toml("[tip]\nmin = \"five\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_slider_clamp() {
        let tip = default_tip();
        assert_eq!(tip.clamp(2.0), 5.0);
        assert_eq!(tip.clamp(40.0), 25.0);
        assert_eq!(tip.clamp(17.5), 17.5);
        assert_eq!(tip.clamp(f64::NAN), 15.0);
    }

    #[test]
    fn test_missing_explicit_path_falls_back() {
        let path = std::env::temp_dir().join("gratuity-test-does-not-exist.toml");
        assert_eq!(AppConfig::load(Some(&path)), AppConfig::default());
        assert!(!path.exists());
    }
}

//! Configuration settings for the fold hash inversion tool

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub hash: HashConfig,
    pub search: SearchConfig,
    pub output: OutputConfig,
}

/// Parameters of the fold hash being inverted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashConfig {
    pub multiplier: i64,
    pub scale: i64,
    pub symbols: Vec<SymbolSpec>,
}

/// One alphabet symbol and its numeric value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolSpec {
    pub token: String,
    pub value: i64,
}

/// Boundary states and the depth bound of the search
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SearchConfig {
    pub terminal_state: i64,
    pub initial_state: i64,
    pub max_string_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub save_results: bool,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hash: HashConfig {
                multiplier: 3,
                scale: 5,
                symbols: vec![
                    SymbolSpec {
                        token: "a".to_string(),
                        value: 1,
                    },
                    SymbolSpec {
                        token: "b".to_string(),
                        value: 2,
                    },
                ],
            },
            search: SearchConfig {
                terminal_state: 1205,
                initial_state: 0,
                max_string_length: 3,
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                save_results: false,
                output_directory: PathBuf::from("output/preimages"),
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.hash.symbols.is_empty() {
            anyhow::bail!("Symbol table must contain at least one symbol");
        }

        for (i, symbol) in self.hash.symbols.iter().enumerate() {
            if symbol.token.is_empty() {
                anyhow::bail!("Symbol {} has an empty token", i);
            }
            if self.hash.symbols[..i].iter().any(|s| s.token == symbol.token) {
                anyhow::bail!("Duplicate symbol token \"{}\"", symbol.token);
            }
        }

        if self.hash.multiplier < 1 {
            anyhow::bail!("Hash multiplier must be positive");
        }

        if self.hash.scale < 1 {
            anyhow::bail!("Hash scale must be positive");
        }

        if self.search.max_string_length == 0 {
            anyhow::bail!("Maximum string length must be positive");
        }

        if self.search.terminal_state == 0 {
            anyhow::bail!("Terminal state must be non-zero (zero is treated as absent)");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(terminal_state) = cli_overrides.terminal_state {
            self.search.terminal_state = terminal_state;
        }
        if let Some(max_string_length) = cli_overrides.max_string_length {
            self.search.max_string_length = max_string_length;
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub terminal_state: Option<i64>,
    pub max_string_length: Option<usize>,
    pub output_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_validation_failures() {
        let mut settings = Settings::default();
        settings.hash.symbols.clear();
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.hash.symbols.push(SymbolSpec {
            token: "a".to_string(),
            value: 7,
        });
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.search.max_string_length = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.search.terminal_state = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.hash.scale = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_yaml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config/settings.yaml");

        let settings = Settings::default();
        settings.to_file(&path).unwrap();
        let restored = Settings::from_file(&path).unwrap();

        assert_eq!(restored.hash.symbols, settings.hash.symbols);
        assert_eq!(
            restored.search.terminal_state,
            settings.search.terminal_state
        );
        assert_eq!(restored.output.format, settings.output.format);
    }

    #[test]
    fn test_cli_overrides() {
        let mut settings = Settings::default();
        let overrides = CliOverrides {
            terminal_state: Some(85),
            max_string_length: Some(5),
            output_dir: Some(PathBuf::from("elsewhere")),
        };

        settings.merge_with_cli(&overrides);

        assert_eq!(settings.search.terminal_state, 85);
        assert_eq!(settings.search.max_string_length, 5);
        assert_eq!(settings.output.output_directory, PathBuf::from("elsewhere"));
    }
}

//! Configuration file support for cigarco.
//!
//! This module provides loading of `.cigarco.toml` configuration files
//! which can set defaults for batch runs.
//!
//! # Example Configuration
//!
//! ```toml
//! [batch]
//! error-mode = "report"
//! cache-capacity = 100000
//! format = "json"
//! ```
//!
//! # Config File Locations
//!
//! Configuration is searched in this order (first valid file wins):
//! 1. `.cigarco.toml` in current directory
//! 2. `~/.config/cigarco/config.toml`
//!
//! A file that exists but cannot be read or parsed is logged at `warn` and
//! skipped. CLI flags take precedence over config file settings.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::batch::{BatchConfig, ErrorMode};
use crate::cli::OutputFormat;

/// Parsed configuration from a .cigarco.toml file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CigarcoConfig {
    /// Batch section of the config file.
    pub batch: BatchSection,
}

/// `[batch]` section of the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSection {
    /// Reaction to bad records.
    pub error_mode: Option<ErrorMode>,
    /// Per-mapper cache bound.
    pub cache_capacity: Option<usize>,
    /// Result output format.
    pub format: Option<OutputFormat>,
}

impl CigarcoConfig {
    /// Load configuration from the default locations.
    ///
    /// Searches for config in:
    /// 1. `.cigarco.toml` in current directory
    /// 2. `~/.config/cigarco/config.toml`
    pub fn load() -> Option<Self> {
        let mut candidates = vec![PathBuf::from(".cigarco.toml")];
        if let Some(home) = dirs_home() {
            candidates.push(home.join(".config").join("cigarco").join("config.toml"));
        }
        Self::load_first(&candidates)
    }

    /// Load the first existing file in `paths` that parses.
    ///
    /// Missing files are skipped quietly; files that fail to load are
    /// skipped with a warning.
    pub fn load_first(paths: &[PathBuf]) -> Option<Self> {
        for path in paths.iter().filter(|path| path.exists()) {
            match Self::load_from_path(path) {
                Ok(config) => return Some(config),
                Err(e) => warn!(path = %path.display(), error = %e, "ignoring config file"),
            }
        }
        None
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML content.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut config = CigarcoConfig::default();
        let mut in_batch = false;

        for (idx, line) in content.lines().enumerate() {
            let line = strip_comment(line).trim();
            if line.is_empty() {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                in_batch = &line[1..line.len() - 1] == "batch";
                continue;
            }

            if !in_batch {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::Parse(format!(
                    "line {}: expected 'key = value'",
                    idx + 1
                )));
            };
            let value = value.trim().trim_matches('"').trim_matches('\'');

            match key.trim() {
                "error-mode" => {
                    let mode = value
                        .parse::<ErrorMode>()
                        .map_err(|e| ConfigError::Parse(format!("line {}: {}", idx + 1, e)))?;
                    config.batch.error_mode = Some(mode);
                }
                "cache-capacity" => {
                    let capacity = value.parse::<usize>().map_err(|_| {
                        ConfigError::Parse(format!(
                            "line {}: invalid cache-capacity '{}'",
                            idx + 1,
                            value
                        ))
                    })?;
                    config.batch.cache_capacity = Some(capacity);
                }
                "format" => match value.to_lowercase().as_str() {
                    "text" => config.batch.format = Some(OutputFormat::Text),
                    "json" => config.batch.format = Some(OutputFormat::Json),
                    other => {
                        return Err(ConfigError::Parse(format!(
                            "line {}: invalid format '{}': expected text or json",
                            idx + 1,
                            other
                        )))
                    }
                },
                _ => {}
            }
        }

        Ok(config)
    }

    /// Convert this config to a [`BatchConfig`].
    pub fn to_batch_config(&self) -> BatchConfig {
        let mut config = BatchConfig::new();
        if let Some(mode) = self.batch.error_mode {
            config = config.error_mode(mode);
        }
        if let Some(format) = self.batch.format {
            config = config.format(format);
        }
        config.cache_capacity(self.batch.cache_capacity)
    }

    /// Merge this config with CLI arguments.
    /// CLI arguments take precedence.
    pub fn merge_with_cli(
        &self,
        cli_mode: Option<ErrorMode>,
        cli_format: Option<OutputFormat>,
        cli_cache_capacity: Option<usize>,
    ) -> BatchConfig {
        let mut config = self.to_batch_config();
        if let Some(mode) = cli_mode {
            config = config.error_mode(mode);
        }
        if let Some(format) = cli_format {
            config = config.format(format);
        }
        if cli_cache_capacity.is_some() {
            config = config.cache_capacity(cli_cache_capacity);
        }
        config
    }
}

/// Configuration loading error.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(String),
    /// Parse error in config file.
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "Config IO error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Config parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Get the user's home directory.
fn dirs_home() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = CigarcoConfig::parse("").unwrap();
        assert_eq!(config, CigarcoConfig::default());
    }

    #[test]
    fn test_parse_batch_section() {
        let content = r#"
# defaults for batch runs
[batch]
error-mode = "fail"
cache-capacity = 1024  # per mapper
format = "json"
"#;
        let config = CigarcoConfig::parse(content).unwrap();
        assert_eq!(config.batch.error_mode, Some(ErrorMode::Fail));
        assert_eq!(config.batch.cache_capacity, Some(1024));
        assert_eq!(config.batch.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_other_sections_ignored() {
        let content = r#"
[other]
error-mode = "nonsense"

[batch]
error-mode = "I"
"#;
        let config = CigarcoConfig::parse(content).unwrap();
        assert_eq!(config.batch.error_mode, Some(ErrorMode::Ignore));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            CigarcoConfig::parse("[batch]\nerror-mode = \"X\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            CigarcoConfig::parse("[batch]\ncache-capacity = -1"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            CigarcoConfig::parse("[batch]\nformat = \"vcf\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            CigarcoConfig::parse("[batch]\nerror-mode"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_to_batch_config() {
        let config = CigarcoConfig::parse("[batch]\nerror-mode = \"ignore\"\ncache-capacity = 8")
            .unwrap()
            .to_batch_config();
        assert_eq!(config.error_mode, ErrorMode::Ignore);
        assert_eq!(config.cache_capacity, Some(8));
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn test_merge_with_cli() {
        let config = CigarcoConfig::parse("[batch]\nerror-mode = \"ignore\"\ncache-capacity = 8")
            .unwrap();

        let merged = config.merge_with_cli(Some(ErrorMode::Fail), None, None);
        assert_eq!(merged.error_mode, ErrorMode::Fail);
        assert_eq!(merged.cache_capacity, Some(8));

        let merged = config.merge_with_cli(None, Some(OutputFormat::Json), Some(2));
        assert_eq!(merged.error_mode, ErrorMode::Ignore);
        assert_eq!(merged.format, OutputFormat::Json);
        assert_eq!(merged.cache_capacity, Some(2));
    }

    #[test]
    fn test_load_first_skips_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join(".cigarco.toml");
        std::fs::write(&broken, "[batch]\nerror-mode = \"sometimes\"\n").unwrap();
        let valid = dir.path().join("config.toml");
        std::fs::write(&valid, "[batch]\nerror-mode = \"fail\"\n").unwrap();
        let missing = dir.path().join("missing.toml");

        let config =
            CigarcoConfig::load_first(&[missing.clone(), broken.clone(), valid]).unwrap();
        assert_eq!(config.batch.error_mode, Some(ErrorMode::Fail));

        assert_eq!(CigarcoConfig::load_first(&[broken, missing]), None);
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".cigarco.toml");
        std::fs::write(&path, "[batch]\nformat = \"json\"\n").unwrap();
        let config = CigarcoConfig::load_from_path(&path).unwrap();
        assert_eq!(config.batch.format, Some(OutputFormat::Json));

        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            CigarcoConfig::load_from_path(&missing),
            Err(ConfigError::Io(_))
        ));
    }
}

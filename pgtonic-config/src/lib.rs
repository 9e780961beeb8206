//! Shared configuration loader for pgtonic.
//!
//! `defaults/pgtonic.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files on
//! top of those defaults via [`Loader`] before deserializing into
//! [`PgtonicConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat};
use pgtonic::MatchOptions;
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/pgtonic.default.toml");

/// Top-level configuration consumed by pgtonic applications.
#[derive(Debug, Clone, Deserialize)]
pub struct PgtonicConfig {
    pub matching: MatchingConfig,
    pub output: OutputConfig,
}

/// Mirrors [`MatchOptions`].
#[derive(Debug, Clone, Deserialize)]
pub struct MatchingConfig {
    pub case_insensitive: bool,
    pub split_alternatives: bool,
    pub size_limit: usize,
}

impl From<&MatchingConfig> for MatchOptions {
    fn from(config: &MatchingConfig) -> Self {
        MatchOptions {
            case_insensitive: config.case_insensitive,
            split_alternatives: config.split_alternatives,
            size_limit: config.size_limit,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl PgtonicConfig {
    pub fn match_options(&self) -> MatchOptions {
        MatchOptions::from(&self.matching)
    }
}

/// Layers user settings over the embedded defaults, lowest precedence first:
/// defaults, then a settings file, then command-line flags.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn with_defaults() -> Self {
        let defaults = File::from_str(DEFAULT_TOML, FileFormat::Toml);
        Self {
            builder: Config::builder().add_source(defaults),
        }
    }

    /// Layer a TOML settings file. When `required` is false a missing file
    /// leaves the layers below it in effect.
    pub fn with_file(self, path: impl AsRef<Path>, required: bool) -> Self {
        let file = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(required);
        Self {
            builder: self.builder.add_source(file),
        }
    }

    /// Layer command-line flags. Unset flags keep the value from below.
    pub fn with_flags(self, flags: &Flags) -> Result<Self, ConfigError> {
        let mut builder = self.builder;
        if flags.case_insensitive {
            builder = builder.set_override("matching.case_insensitive", true)?;
        }
        if let Some(format) = &flags.format {
            builder = builder.set_override("output.format", format.as_str())?;
        }
        Ok(Self { builder })
    }

    pub fn load(self) -> Result<PgtonicConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

/// Settings given on the command line
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// `--case-insensitive`; absent means "as configured", not "off"
    pub case_insensitive: bool,
    /// `--format`, as typed
    pub format: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn flags(case_insensitive: bool, format: Option<&str>) -> Flags {
        Flags {
            case_insensitive,
            format: format.map(str::to_string),
        }
    }

    fn settings_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "{}", contents).expect("write");
        file
    }

    #[test]
    fn defaults_match_core_options() {
        let config = Loader::with_defaults().load().expect("defaults to deserialize");
        assert_eq!(config.match_options(), MatchOptions::default());
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn flags_override_defaults() {
        let config = Loader::with_defaults()
            .with_flags(&flags(true, Some("json")))
            .expect("flags to apply")
            .load()
            .expect("config to build");
        assert!(config.match_options().case_insensitive);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn unset_flags_keep_file_values() {
        let file = settings_file("[matching]\ncase_insensitive = true\n");
        let config = Loader::with_defaults()
            .with_file(file.path(), true)
            .with_flags(&Flags::default())
            .expect("flags to apply")
            .load()
            .expect("config to build");
        assert!(config.matching.case_insensitive);
    }

    #[test]
    fn rejects_unknown_format() {
        let result = Loader::with_defaults()
            .with_flags(&flags(false, Some("yaml")))
            .expect("flags to apply")
            .load();
        assert!(result.is_err());
    }

    #[test]
    fn file_layers_over_defaults() {
        let file = settings_file("[matching]\nsplit_alternatives = false\n");
        let config = Loader::with_defaults()
            .with_file(file.path(), true)
            .load()
            .expect("config to build");
        assert!(!config.matching.split_alternatives);
        // untouched keys keep their defaults
        assert_eq!(config.matching.size_limit, 32 * (1 << 20));
    }

    #[test]
    fn missing_files() {
        let path = std::env::temp_dir().join("pgtonic-config-does-not-exist.toml");
        assert!(Loader::with_defaults().with_file(&path, true).load().is_err());
        assert!(Loader::with_defaults().with_file(&path, false).load().is_ok());
    }
}

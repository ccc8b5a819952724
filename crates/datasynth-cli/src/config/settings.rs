use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use datasynth_core::DEFAULT_MAX_DEPTH;
use datasynth_generate::output::{csv, sql};
use datasynth_generate::{GenerateOptions, OutputFormat, WriterOptions};

use super::atomic::write_bytes_atomic;
use super::{ConfigError, ConfigResult};

pub const DEFAULT_CONFIG_FILE: &str = "datasynth.toml";
const DEFAULT_COUNT: usize = 10;

/// Contents of `datasynth.toml`. Missing sections and keys take defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub generate: GenerateSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateSettings {
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub max_depth: usize,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            seed: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
    pub csv_delimiter: char,
    pub sql_table: String,
    /// Directory for `<entity>.<ext>` files when no `--out` is given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Csv,
            csv_delimiter: csv::DEFAULT_DELIMITER,
            sql_table: sql::DEFAULT_TABLE.to_string(),
            out_dir: None,
        }
    }
}

impl Settings {
    pub fn generate_options(&self, seed_override: Option<u64>) -> GenerateOptions {
        GenerateOptions {
            seed: seed_override.or(self.generate.seed),
            max_depth: self.generate.max_depth,
        }
    }

    pub fn writer_options(&self) -> WriterOptions {
        WriterOptions {
            csv_delimiter: self.output.csv_delimiter,
            sql_table: self.output.sql_table.clone(),
        }
    }
}

/// Load settings. An explicit path must exist; the default file is optional.
pub fn load_settings(explicit: Option<&Path>) -> ConfigResult<Settings> {
    let path = match explicit {
        Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
        Some(path) => path.to_path_buf(),
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !path.exists() {
                return Ok(Settings::default());
            }
            path
        }
    };

    let content = std::fs::read_to_string(&path)?;
    let settings: Settings = toml::from_str(&content)?;
    if settings.generate.max_depth == 0 {
        return Err(ConfigError::Invalid(
            "generate.max_depth must be at least 1".to_string(),
        ));
    }
    Ok(settings)
}

pub fn save_settings(path: &Path, settings: &Settings, force: bool) -> ConfigResult<()> {
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }
    let encoded = toml::to_string_pretty(settings)?;
    write_bytes_atomic(path, encoded.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(label: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("datasynth_cli_{label}_{}", uuid::Uuid::new_v4()))
            .join(DEFAULT_CONFIG_FILE)
    }

    #[test]
    fn partial_files_fill_in_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [generate]
            seed = 7

            [output]
            format = "xml"
            "#,
        )
        .expect("parse settings");
        assert_eq!(settings.generate.count, DEFAULT_COUNT);
        assert_eq!(settings.generate.seed, Some(7));
        assert_eq!(settings.output.format, OutputFormat::Xml);
        assert_eq!(settings.output.sql_table, "generated_data");
    }

    #[test]
    fn save_then_load_and_refuse_overwrite() {
        let path = temp_path("save");
        let mut settings = Settings::default();
        settings.output.csv_delimiter = ';';
        settings.generate.seed = Some(99);

        save_settings(&path, &settings, false).expect("save settings");
        let loaded = load_settings(Some(&path)).expect("load settings");
        assert_eq!(loaded, settings);

        assert!(matches!(
            save_settings(&path, &settings, false),
            Err(ConfigError::AlreadyExists(_))
        ));
        save_settings(&path, &Settings::default(), true).expect("overwrite");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let path = temp_path("missing");
        assert!(matches!(
            load_settings(Some(&path)),
            Err(ConfigError::NotFound(_))
        ));
    }

    #[test]
    fn flags_override_file_seed() {
        let mut settings = Settings::default();
        settings.generate.seed = Some(1);
        assert_eq!(settings.generate_options(None).seed, Some(1));
        assert_eq!(settings.generate_options(Some(2)).seed, Some(2));
        assert_eq!(settings.writer_options().csv_delimiter, ',');
    }
}

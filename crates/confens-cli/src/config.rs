use crate::cli::Cli;
use crate::error::{CliError, Result};
use confens::workflows::analyze::AnalyzeConfig;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Optional values read from a TOML configuration file. Every field can be
/// overridden by an explicit CLI argument.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub name: Option<String>,
    pub plots: Option<bool>,
    #[serde(rename = "folded-delta")]
    pub folded_delta: Option<f64>,
    #[serde(rename = "unfolded-delta")]
    pub unfolded_delta: Option<f64>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("cannot read '{}': {}", path.display(), e))
        })?;
        let parsed: Self = toml::from_str(&content).map_err(|e| {
            CliError::Config(format!("invalid config file '{}': {}", path.display(), e))
        })?;
        debug!(path = %path.display(), "Loaded configuration file.");
        Ok(parsed)
    }
}

/// Resolves the final analysis configuration: explicit CLI arguments win
/// over the config file, which wins over the built-in defaults.
pub fn resolve(cli: &Cli) -> Result<AnalyzeConfig> {
    let file = match &cli.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    let defaults = AnalyzeConfig::default();

    Ok(AnalyzeConfig {
        name: cli.name.clone().or(file.name).unwrap_or(defaults.name),
        generate_plots: cli.plots.or(file.plots).unwrap_or(defaults.generate_plots),
        folded_delta: cli
            .folded_delta
            .or(file.folded_delta)
            .unwrap_or(defaults.folded_delta),
        unfolded_delta: cli
            .unfolded_delta
            .or(file.unfolded_delta)
            .unwrap_or(defaults.unfolded_delta),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;

    fn cli(args: &[&str]) -> Cli {
        let mut full = vec!["confens"];
        full.extend_from_slice(args);
        Cli::parse_from(full)
    }

    #[test]
    fn defaults_apply_without_file_or_arguments() {
        let config = resolve(&cli(&["some/path"])).unwrap();
        assert_eq!(config.name, "mol");
        assert!(config.generate_plots);
        assert_eq!(config.folded_delta, 0.05);
        assert_eq!(config.unfolded_delta, 0.10);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("confens.toml");
        fs::write(
            &path,
            "name = \"hexane\"\nplots = false\nfolded-delta = 0.02\n",
        )
        .unwrap();

        let config = resolve(&cli(&["some/path", "--config", path.to_str().unwrap()])).unwrap();
        assert_eq!(config.name, "hexane");
        assert!(!config.generate_plots);
        assert_eq!(config.folded_delta, 0.02);
        assert_eq!(config.unfolded_delta, 0.10);
    }

    #[test]
    fn cli_arguments_override_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("confens.toml");
        fs::write(&path, "name = \"hexane\"\nplots = false\n").unwrap();

        let config = resolve(&cli(&[
            "some/path",
            "--config",
            path.to_str().unwrap(),
            "--name",
            "octane",
            "--plots",
            "true",
        ]))
        .unwrap();
        assert_eq!(config.name, "octane");
        assert!(config.generate_plots);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("confens.toml");
        fs::write(&path, "molecule = \"typo\"\n").unwrap();

        let err = resolve(&cli(&["some/path", "--config", path.to_str().unwrap()])).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let err = resolve(&cli(&["some/path", "--config", "/no/such/file.toml"])).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}

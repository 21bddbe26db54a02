use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "notegraph.toml";

/// Contents of `notegraph.toml`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub skip_blank_notes: Option<bool>,
    pub clear_output: Option<bool>,
}

impl FileConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).context("invalid notegraph config")
    }

    /// Load an explicit config file, or the default one if it exists.
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file yields an empty config.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        if !required && !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_toml_str(&raw)
            .with_context(|| format!("in config file {}", path.display()))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

/// Values given on the command line or through the environment.
/// They win over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub skip_blank_notes: Option<bool>,
    pub keep_output: bool,
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub input_dir: PathBuf,
    pub output_dir: Option<PathBuf>,
    pub skip_blank_notes: bool,
    pub clear_output: bool,
}

impl Settings {
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Result<Self> {
        let input_dir = overrides
            .input_dir
            .or(file.input_dir)
            .ok_or_else(|| {
                anyhow!(
                    "no input directory: pass --input or set input_dir in {}",
                    DEFAULT_CONFIG_FILE
                )
            })?;
        let settings = Settings {
            input_dir,
            output_dir: overrides.output_dir.or(file.output_dir),
            skip_blank_notes: overrides
                .skip_blank_notes
                .or(file.skip_blank_notes)
                .unwrap_or(true),
            clear_output: !overrides.keep_output && file.clear_output.unwrap_or(true),
        };
        settings.check_output_overlap()?;
        Ok(settings)
    }

    /// The output directory must never be the input directory, and must not
    /// contain it when it is cleared before writing.
    fn check_output_overlap(&self) -> Result<()> {
        let Some(output_dir) = &self.output_dir else {
            return Ok(());
        };
        let input = comparable_path(&self.input_dir)?;
        let output = comparable_path(output_dir)?;
        if input == output {
            return Err(anyhow!(
                "output directory {} is the input directory",
                output_dir.display()
            ));
        }
        if self.clear_output && input.starts_with(&output) {
            return Err(anyhow!(
                "output directory {} contains input directory {} and would be cleared; \
                 pick another output or pass --keep-output",
                output_dir.display(),
                self.input_dir.display()
            ));
        }
        Ok(())
    }

    /// The output directory, required by commands that write.
    pub fn require_output_dir(&self) -> Result<&Path> {
        self.output_dir
            .as_deref()
            .ok_or_else(|| {
                anyhow!(
                    "no output directory: pass --output or set output_dir in {}",
                    DEFAULT_CONFIG_FILE
                )
            })
    }
}

/// Canonical form when the path exists, otherwise absolute against the
/// working directory.
fn comparable_path(path: &Path) -> Result<PathBuf> {
    match path.canonicalize() {
        Ok(canonical) => Ok(canonical),
        Err(_) => std::path::absolute(path)
            .with_context(|| format!("failed to resolve {}", path.display())),
    }
}

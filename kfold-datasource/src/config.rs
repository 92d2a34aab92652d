//! TOML settings for the CLI.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::data::DatasetSpec;
use crate::fold::{FoldResult, KFoldPartitioner, SplitStrategy};

/// Settings file read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "kfold.toml";

/// K-fold run settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct KFoldSettings {
    /// Label printed in the run summary and manifest.
    #[serde(default = "KFoldSettings::default_app_name")]
    pub app_name: String,
    /// Number of folds.
    #[serde(default = "KFoldSettings::default_kfolds")]
    pub kfolds: u32,
    /// Splitting strategy passed to the provider.
    #[serde(default)]
    pub strategy: SplitStrategy,
    /// Seed for the random strategy.
    #[serde(default = "KFoldSettings::default_random_seed")]
    pub random_seed: u64,
    /// Dataset to partition.
    #[serde(default)]
    pub dataset: Option<DatasetSpec>,
    /// Where the fold manifest is written.
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl KFoldSettings {
    fn default_app_name() -> String {
        "kfold".to_string()
    }

    fn default_kfolds() -> u32 {
        5
    }

    fn default_random_seed() -> u64 {
        1
    }

    /// Validate the fold count and build a partitioner.
    pub fn partitioner(&self) -> FoldResult<KFoldPartitioner> {
        KFoldPartitioner::new(self.kfolds, self.strategy, self.random_seed)
    }
}

impl Default for KFoldSettings {
    fn default() -> Self {
        Self {
            app_name: Self::default_app_name(),
            kfolds: Self::default_kfolds(),
            strategy: SplitStrategy::default(),
            random_seed: Self::default_random_seed(),
            dataset: None,
            output: None,
        }
    }
}

/// Load settings, falling back to defaults when the implicit file is absent.
///
/// A missing file is only an error when its path was given explicitly.
pub fn load_settings(explicit: Option<&Path>) -> Result<KFoldSettings> {
    let (candidate, explicit_provided) = match explicit {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };

    if candidate.exists() {
        let raw = std::fs::read_to_string(&candidate)
            .with_context(|| format!("failed to read settings from {}", candidate.display()))?;
        let parsed = toml::from_str(&raw)
            .with_context(|| format!("failed to parse TOML settings at {}", candidate.display()))?;
        Ok(parsed)
    } else if explicit_provided {
        bail!("settings file not found at {}", candidate.display());
    } else {
        Ok(KFoldSettings::default())
    }
}

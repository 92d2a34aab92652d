//! Record of the data sources created for a k-fold run.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::data::DatasetSpec;
use crate::fold::{KFoldPartitioner, SplitStrategy};

use super::fold::FoldDataSources;

#[derive(Debug, Clone, Serialize)]
pub struct FoldManifest {
    pub app_name: String,
    pub generated_at: DateTime<Utc>,
    pub dataset: DatasetSpec,
    pub kfolds: u32,
    pub strategy: SplitStrategy,
    pub random_seed: u64,
    pub folds: Vec<FoldDataSources>,
}

impl FoldManifest {
    pub fn new(
        app_name: &str,
        partitioner: &KFoldPartitioner,
        dataset: &DatasetSpec,
        folds: Vec<FoldDataSources>,
    ) -> Self {
        Self {
            app_name: app_name.to_string(),
            generated_at: Utc::now(),
            dataset: dataset.clone(),
            kfolds: partitioner.total_folds(),
            strategy: partitioner.strategy(),
            random_seed: partitioner.random_seed(),
            folds,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write the manifest as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

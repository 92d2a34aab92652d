//! K-fold percentage partitioning.
//!
//! Derives the evaluation range of each fold from its index. The training
//! split of a fold is always the complement of that range.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::DatasetSpec;

use super::descriptor::{build_split_descriptor, SplitDescriptor, SplitStrategy};
use super::naming::{build_descriptive_name, generate_split_id};

/// Smallest fold count that still leaves a training split.
pub const MIN_FOLDS: u32 = 2;

/// Largest fold count before a fold's range collapses to zero width.
pub const MAX_FOLDS: u32 = 100;

/// Errors raised while partitioning or naming folds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FoldError {
    #[error("Invalid fold count {0}: must be between 2 and 100")]
    InvalidFoldCount(u32),

    #[error("Invalid fold index {index} for {total} folds")]
    InvalidFoldIndex { index: u32, total: u32 },

    #[error("Entropy source unavailable: {0}")]
    EntropySourceUnavailable(String),

    #[error("Malformed descriptive name: {0}")]
    MalformedName(String),
}

pub type FoldResult<T> = Result<T, FoldError>;

/// Half-open percentage interval `[begin, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PercentRange {
    pub begin: u32,
    pub end: u32,
}

impl PercentRange {
    /// Width of the range in percentage points.
    pub fn width(&self) -> u32 {
        self.end - self.begin
    }

    /// Check whether a percentage point falls inside the range.
    pub fn contains(&self, percent: u32) -> bool {
        percent >= self.begin && percent < self.end
    }
}

/// Compute the evaluation range for a fold.
///
/// Uses integer division, so the provider only ever sees whole-number
/// percentages. When 100 is not divisible by `total_folds` the last
/// `100 % total_folds` points are never evaluated.
pub fn compute_range(fold_index: u32, total_folds: u32) -> FoldResult<PercentRange> {
    validate_fold_count(total_folds)?;
    if fold_index >= total_folds {
        return Err(FoldError::InvalidFoldIndex {
            index: fold_index,
            total: total_folds,
        });
    }

    let width = 100 / total_folds;
    Ok(PercentRange {
        begin: fold_index * width,
        end: (fold_index + 1) * width,
    })
}

/// Reject fold counts outside `[MIN_FOLDS, MAX_FOLDS]`.
pub fn validate_fold_count(total_folds: u32) -> FoldResult<()> {
    if (MIN_FOLDS..=MAX_FOLDS).contains(&total_folds) {
        Ok(())
    } else {
        Err(FoldError::InvalidFoldCount(total_folds))
    }
}

/// A single fold with its evaluation range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldSpec {
    /// Fold number (1-indexed).
    pub ordinal: u32,
    /// Total number of folds in the sequence.
    pub total_folds: u32,
    /// Range used by the evaluation split.
    pub eval_range: PercentRange,
    /// Training takes the complement of `eval_range`. Always true.
    pub train_is_complement: bool,
}

impl FoldSpec {
    /// Build the fold at a 0-based index.
    pub fn new(fold_index: u32, total_folds: u32) -> FoldResult<Self> {
        let eval_range = compute_range(fold_index, total_folds)?;
        Ok(Self {
            ordinal: fold_index + 1,
            total_folds,
            eval_range,
            train_is_complement: true,
        })
    }

    /// 0-based position of this fold.
    pub fn index(&self) -> u32 {
        self.ordinal - 1
    }
}

/// Which side of a fold a split represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitRole {
    Training,
    Evaluation,
}

impl SplitRole {
    /// Whether this split takes the complement of the fold's range.
    pub fn is_complement(&self) -> bool {
        matches!(self, Self::Training)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Training => "Training",
            Self::Evaluation => "Evaluation",
        }
    }
}

/// Everything needed to request one split from the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitPlan {
    pub role: SplitRole,
    pub id: String,
    pub name: String,
    pub descriptor: SplitDescriptor,
}

impl SplitPlan {
    fn build(
        dataset: &DatasetSpec,
        fold: &FoldSpec,
        role: SplitRole,
        strategy: SplitStrategy,
        random_seed: u64,
    ) -> FoldResult<Self> {
        let complement = role.is_complement();
        Ok(Self {
            role,
            id: generate_split_id()?,
            name: build_descriptive_name(&dataset.name, fold.eval_range, complement),
            descriptor: build_split_descriptor(fold.eval_range, complement, strategy, random_seed),
        })
    }
}

/// Train/eval split pair for one fold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoldPlan {
    pub fold: FoldSpec,
    pub train: SplitPlan,
    pub eval: SplitPlan,
}

/// Validated k-fold configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KFoldPartitioner {
    total_folds: u32,
    strategy: SplitStrategy,
    random_seed: u64,
}

impl KFoldPartitioner {
    /// Create a partitioner, failing fast on an invalid fold count.
    pub fn new(total_folds: u32, strategy: SplitStrategy, random_seed: u64) -> FoldResult<Self> {
        validate_fold_count(total_folds)?;
        Ok(Self {
            total_folds,
            strategy,
            random_seed,
        })
    }

    pub fn total_folds(&self) -> u32 {
        self.total_folds
    }

    pub fn strategy(&self) -> SplitStrategy {
        self.strategy
    }

    pub fn random_seed(&self) -> u64 {
        self.random_seed
    }

    /// Build the fold at a 0-based index.
    pub fn fold(&self, fold_index: u32) -> FoldResult<FoldSpec> {
        FoldSpec::new(fold_index, self.total_folds)
    }

    /// All folds in order.
    pub fn folds(&self) -> Vec<FoldSpec> {
        (0..self.total_folds)
            .filter_map(|i| self.fold(i).ok())
            .collect()
    }

    /// Build the train/eval plan for a single fold.
    pub fn plan_fold(&self, dataset: &DatasetSpec, fold_index: u32) -> FoldResult<FoldPlan> {
        let fold = self.fold(fold_index)?;
        let train = SplitPlan::build(dataset, &fold, SplitRole::Training, self.strategy, self.random_seed)?;
        let eval = SplitPlan::build(dataset, &fold, SplitRole::Evaluation, self.strategy, self.random_seed)?;
        Ok(FoldPlan { fold, train, eval })
    }

    /// Build plans for every fold. Folds share no state, so they are
    /// computed in parallel and returned in ordinal order.
    pub fn plan(&self, dataset: &DatasetSpec) -> FoldResult<Vec<FoldPlan>> {
        (0..self.total_folds)
            .into_par_iter()
            .map(|i| self.plan_fold(dataset, i))
            .collect()
    }
}

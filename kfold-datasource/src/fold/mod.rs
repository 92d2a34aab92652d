//! K-fold partitioning module.
//!
//! Derives train/evaluation split pairs from a single dataset:
//! - Evaluation: the fold's own percentage range
//! - Training: the complement of that range
//!
//! Everything here is pure apart from split ID generation, which reads the
//! operating system's entropy source.

pub mod descriptor;
pub mod naming;
pub mod partition;

pub use descriptor::{build_split_descriptor, SplitDescriptor, SplitStrategy, Splitting, StrategyParams};
pub use naming::{build_descriptive_name, generate_split_id, parse_descriptive_name, ParsedName};
pub use partition::{
    compute_range, FoldError, FoldPlan, FoldResult, FoldSpec, KFoldPartitioner, PercentRange,
    SplitPlan, SplitRole,
};

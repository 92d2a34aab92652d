pub mod config;
pub mod data;
pub mod datasource;
pub mod fold;

// Re-export commonly used types
pub use data::{DataSchema, DatasetSpec};
pub use datasource::{
    create_all, CreateDataSourceRequest, DataSourceApi, DataSourceError, FoldDataSources,
    FoldManifest, InMemoryDataSources,
};
pub use fold::{
    build_descriptive_name, build_split_descriptor, compute_range, generate_split_id,
    parse_descriptive_name, FoldError, FoldSpec, KFoldPartitioner, PercentRange, SplitDescriptor,
    SplitStrategy,
};

//! Data-source module.
//!
//! Turns fold plans into create/delete requests against the provider:
//! - `client`: request shapes and the `DataSourceApi` trait
//! - `memory`: recording store for dry runs
//! - `fold`: per-fold creation with rollback and cleanup
//! - `manifest`: JSON record of a run

pub mod client;
pub mod fold;
pub mod manifest;
pub mod memory;

pub use client::{CreateDataSourceRequest, DataSourceApi, DataSourceError, DataSourceResult, DataSpec};
pub use fold::{create_all, FoldDataSources};
pub use manifest::FoldManifest;
pub use memory::{InMemoryDataSources, RecordedCall};

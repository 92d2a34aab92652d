pub mod dataset;

pub use dataset::{DataSchema, DatasetSpec};

//! Boundary to the provider's data-source API.
//!
//! Request shapes mirror the provider's create-data-source-from-S3 call.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::DatasetSpec;
use crate::fold::{FoldError, SplitPlan};

/// Data-source API errors.
#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("Fold error: {0}")]
    Fold(#[from] FoldError),

    #[error("Failed to create data source {id}: {reason}")]
    CreateFailed { id: String, reason: String },

    #[error("Failed to delete data source {id}: {reason}")]
    DeleteFailed { id: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type DataSourceResult<T> = Result<T, DataSourceError>;

/// `DataSpec` block of a create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DataSpec {
    #[serde(rename = "DataLocationS3")]
    pub data_location_s3: String,
    pub data_schema: String,
    pub data_rearrangement: String,
}

/// Create-data-source request for one split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateDataSourceRequest {
    pub data_source_id: String,
    pub data_source_name: String,
    pub data_spec: DataSpec,
    pub compute_statistics: bool,
}

impl CreateDataSourceRequest {
    /// Build the request for a planned split of `dataset`.
    pub fn from_split(dataset: &DatasetSpec, split: &SplitPlan) -> DataSourceResult<Self> {
        Ok(Self {
            data_source_id: split.id.clone(),
            data_source_name: split.name.clone(),
            data_spec: DataSpec {
                data_location_s3: dataset.data_location.clone(),
                data_schema: dataset.schema.to_wire_string()?,
                data_rearrangement: split.descriptor.to_rearrangement()?,
            },
            compute_statistics: true,
        })
    }
}

/// Operations the provider exposes for data sources.
///
/// Implementations own any retry or backoff; callers issue each request once.
pub trait DataSourceApi {
    /// Create a data source from the request.
    fn create_data_source(&mut self, request: &CreateDataSourceRequest) -> DataSourceResult<()>;

    /// Delete a previously created data source.
    fn delete_data_source(&mut self, data_source_id: &str) -> DataSourceResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fold::{KFoldPartitioner, SplitStrategy};

    #[test]
    fn test_request_wire_format() {
        let dataset = DatasetSpec::new("banking", "s3://bucket/banking.csv", "schema-text");
        let partitioner = KFoldPartitioner::new(4, SplitStrategy::Sequential, 0).unwrap();
        let plan = partitioner.plan_fold(&dataset, 0).unwrap();

        let request = CreateDataSourceRequest::from_split(&dataset, &plan.eval).unwrap();
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["DataSourceId"], plan.eval.id.as_str());
        assert_eq!(
            value["DataSourceName"],
            "banking [percentBegin=0, percentEnd=25, complement=false]"
        );
        assert_eq!(value["DataSpec"]["DataLocationS3"], "s3://bucket/banking.csv");
        assert_eq!(value["DataSpec"]["DataSchema"], "schema-text");
        assert_eq!(
            value["DataSpec"]["DataRearrangement"],
            r#"{"splitting":{"percentBegin":0,"percentEnd":25,"complement":false,"strategy":"sequential"}}"#
        );
        assert_eq!(value["ComputeStatistics"], true);
    }
}

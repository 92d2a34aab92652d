//! In-memory data-source store.
//!
//! Records every request instead of calling the provider. Used for dry runs
//! and for exercising rollback paths.

use std::collections::BTreeMap;

use super::client::{CreateDataSourceRequest, DataSourceApi, DataSourceError, DataSourceResult};

/// A call observed by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Create(String),
    Delete(String),
}

#[derive(Debug, Default)]
pub struct InMemoryDataSources {
    sources: BTreeMap<String, CreateDataSourceRequest>,
    calls: Vec<RecordedCall>,
    create_count: usize,
    fail_on_create: Option<usize>,
}

impl InMemoryDataSources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the n-th create call (1-based).
    pub fn failing_on_create(mut self, nth: usize) -> Self {
        self.fail_on_create = Some(nth);
        self
    }

    /// Data sources currently alive.
    pub fn sources(&self) -> impl Iterator<Item = &CreateDataSourceRequest> {
        self.sources.values()
    }

    pub fn get(&self, data_source_id: &str) -> Option<&CreateDataSourceRequest> {
        self.sources.get(data_source_id)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Every call in the order it was issued.
    pub fn calls(&self) -> &[RecordedCall] {
        &self.calls
    }
}

impl DataSourceApi for InMemoryDataSources {
    fn create_data_source(&mut self, request: &CreateDataSourceRequest) -> DataSourceResult<()> {
        let id = request.data_source_id.clone();
        self.calls.push(RecordedCall::Create(id.clone()));
        self.create_count += 1;

        if self.fail_on_create == Some(self.create_count) {
            return Err(DataSourceError::CreateFailed {
                id,
                reason: "injected failure".to_string(),
            });
        }
        if self.sources.contains_key(&id) {
            return Err(DataSourceError::CreateFailed {
                id,
                reason: "data source already exists".to_string(),
            });
        }

        self.sources.insert(id, request.clone());
        Ok(())
    }

    fn delete_data_source(&mut self, data_source_id: &str) -> DataSourceResult<()> {
        self.calls.push(RecordedCall::Delete(data_source_id.to_string()));

        match self.sources.remove(data_source_id) {
            Some(_) => Ok(()),
            None => Err(DataSourceError::DeleteFailed {
                id: data_source_id.to_string(),
                reason: "no such data source".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::client::DataSpec;

    fn request(id: &str) -> CreateDataSourceRequest {
        CreateDataSourceRequest {
            data_source_id: id.to_string(),
            data_source_name: format!("{} name", id),
            data_spec: DataSpec {
                data_location_s3: "s3://bucket/data.csv".to_string(),
                data_schema: "{}".to_string(),
                data_rearrangement: "{}".to_string(),
            },
            compute_statistics: true,
        }
    }

    #[test]
    fn test_create_and_delete() {
        let mut store = InMemoryDataSources::new();
        store.create_data_source(&request("ds-A")).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.get("ds-A").is_some());

        store.delete_data_source("ds-A").unwrap();
        assert!(store.is_empty());
        assert_eq!(
            store.calls(),
            &[
                RecordedCall::Create("ds-A".to_string()),
                RecordedCall::Delete("ds-A".to_string())
            ]
        );
    }

    #[test]
    fn test_duplicate_create_fails() {
        let mut store = InMemoryDataSources::new();
        store.create_data_source(&request("ds-A")).unwrap();
        assert!(matches!(
            store.create_data_source(&request("ds-A")),
            Err(DataSourceError::CreateFailed { .. })
        ));
    }

    #[test]
    fn test_delete_missing_fails() {
        let mut store = InMemoryDataSources::new();
        assert!(matches!(
            store.delete_data_source("ds-missing"),
            Err(DataSourceError::DeleteFailed { .. })
        ));
    }

    #[test]
    fn test_injected_failure() {
        let mut store = InMemoryDataSources::new().failing_on_create(2);
        store.create_data_source(&request("ds-A")).unwrap();
        assert!(store.create_data_source(&request("ds-B")).is_err());
        assert_eq!(store.len(), 1);
    }
}

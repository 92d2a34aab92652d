//! Per-fold data-source creation and cleanup.
//!
//! Each fold issues two create requests, training first. If the evaluation
//! request fails the training data source is deleted again so no half-built
//! fold is left behind on the provider.

use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

use crate::data::DatasetSpec;
use crate::fold::{FoldPlan, FoldSpec, KFoldPartitioner};

use super::client::{CreateDataSourceRequest, DataSourceApi, DataSourceResult};

/// Data sources created on the provider for one fold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoldDataSources {
    pub fold: FoldSpec,
    pub train: CreateDataSourceRequest,
    pub eval: CreateDataSourceRequest,
}

impl FoldDataSources {
    /// Create the training and evaluation data sources for a planned fold.
    pub fn create<C: DataSourceApi>(
        client: &mut C,
        dataset: &DatasetSpec,
        plan: &FoldPlan,
    ) -> DataSourceResult<Self> {
        let train = CreateDataSourceRequest::from_split(dataset, &plan.train)?;
        let eval = CreateDataSourceRequest::from_split(dataset, &plan.eval)?;

        client.create_data_source(&train)?;
        info!("Created Training Datasource {}", train.data_source_id);

        if let Err(e) = client.create_data_source(&eval) {
            warn!(
                "Evaluation Datasource {} failed, rolling back {}",
                eval.data_source_id, train.data_source_id
            );
            if let Err(rollback) = client.delete_data_source(&train.data_source_id) {
                warn!("Rollback of {} failed: {}", train.data_source_id, rollback);
            }
            return Err(e);
        }
        info!("Created Evaluation Datasource {}", eval.data_source_id);

        Ok(Self {
            fold: plan.fold.clone(),
            train,
            eval,
        })
    }

    /// Delete both data sources of this fold.
    ///
    /// Both deletes are attempted; the first error is returned.
    pub fn cleanup<C: DataSourceApi>(&self, client: &mut C) -> DataSourceResult<()> {
        let train = client.delete_data_source(&self.train.data_source_id);
        match &train {
            Ok(()) => info!("Deleted Training Datasource {}", self.train.data_source_id),
            Err(e) => warn!("{}", e),
        }

        let eval = client.delete_data_source(&self.eval.data_source_id);
        match &eval {
            Ok(()) => info!("Deleted Evaluation Datasource {}", self.eval.data_source_id),
            Err(e) => warn!("{}", e),
        }

        train.and(eval)
    }
}

impl fmt::Display for FoldDataSources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Fold {} of {}:\n - Training Datasource ID: {}\n - Evaluation Datasource ID: {}",
            self.fold.ordinal,
            self.fold.total_folds,
            self.train.data_source_id,
            self.eval.data_source_id
        )
    }
}

/// Create data sources for every fold in order.
///
/// On failure the folds already created are cleaned up before the error is
/// returned.
pub fn create_all<C: DataSourceApi>(
    client: &mut C,
    partitioner: &KFoldPartitioner,
    dataset: &DatasetSpec,
) -> DataSourceResult<Vec<FoldDataSources>> {
    let plans = partitioner.plan(dataset)?;
    info!(
        "Creating data sources for {} folds of {}",
        plans.len(),
        dataset.name
    );

    let mut created = Vec::with_capacity(plans.len());
    for plan in &plans {
        match FoldDataSources::create(client, dataset, plan) {
            Ok(fold) => created.push(fold),
            Err(e) => {
                warn!(
                    "Fold {} of {} failed, cleaning up {} completed folds",
                    plan.fold.ordinal,
                    plan.fold.total_folds,
                    created.len()
                );
                for fold in &created {
                    let _ = fold.cleanup(client);
                }
                return Err(e);
            }
        }
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::{DataSourceError, InMemoryDataSources, RecordedCall};
    use crate::fold::SplitStrategy;

    fn dataset() -> DatasetSpec {
        DatasetSpec::new("banking", "s3://bucket/banking.csv", "{}")
    }

    fn plan(total: u32, index: u32) -> FoldPlan {
        KFoldPartitioner::new(total, SplitStrategy::Random, 1)
            .unwrap()
            .plan_fold(&dataset(), index)
            .unwrap()
    }

    #[test]
    fn test_create_fold() {
        let mut store = InMemoryDataSources::new();
        let fold = FoldDataSources::create(&mut store, &dataset(), &plan(5, 0)).unwrap();

        assert_eq!(store.len(), 2);
        assert!(store.get(&fold.train.data_source_id).is_some());
        assert!(store.get(&fold.eval.data_source_id).is_some());
        assert_eq!(
            store.calls()[0],
            RecordedCall::Create(fold.train.data_source_id.clone())
        );
    }

    #[test]
    fn test_eval_failure_rolls_back_train() {
        let mut store = InMemoryDataSources::new().failing_on_create(2);
        let plan = plan(5, 1);

        let result = FoldDataSources::create(&mut store, &dataset(), &plan);

        assert!(matches!(result, Err(DataSourceError::CreateFailed { .. })));
        assert!(store.is_empty());
        assert_eq!(
            store.calls().last(),
            Some(&RecordedCall::Delete(plan.train.id.clone()))
        );
    }

    #[test]
    fn test_cleanup_deletes_both() {
        let mut store = InMemoryDataSources::new();
        let fold = FoldDataSources::create(&mut store, &dataset(), &plan(3, 2)).unwrap();

        fold.cleanup(&mut store).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_cleanup_reports_missing() {
        let mut store = InMemoryDataSources::new();
        let fold = FoldDataSources::create(&mut store, &dataset(), &plan(3, 0)).unwrap();
        store.delete_data_source(&fold.train.data_source_id).unwrap();

        assert!(fold.cleanup(&mut store).is_err());
        // Eval is still deleted even though train was already gone
        assert!(store.is_empty());
    }

    #[test]
    fn test_display() {
        let mut store = InMemoryDataSources::new();
        let fold = FoldDataSources::create(&mut store, &dataset(), &plan(4, 1)).unwrap();

        let text = fold.to_string();
        assert!(text.starts_with("Fold 2 of 4:\n"));
        assert!(text.contains(&format!(" - Training Datasource ID: {}", fold.train.data_source_id)));
        assert!(text.contains(&format!(" - Evaluation Datasource ID: {}", fold.eval.data_source_id)));
    }

    #[test]
    fn test_create_all_cleans_up_on_failure() {
        // Fold 2's evaluation create is the 4th call
        let mut store = InMemoryDataSources::new().failing_on_create(4);
        let partitioner = KFoldPartitioner::new(3, SplitStrategy::Sequential, 0).unwrap();

        assert!(create_all(&mut store, &partitioner, &dataset()).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_all() {
        let mut store = InMemoryDataSources::new();
        let partitioner = KFoldPartitioner::new(5, SplitStrategy::Random, 3).unwrap();

        let folds = create_all(&mut store, &partitioner, &dataset()).unwrap();
        assert_eq!(folds.len(), 5);
        assert_eq!(store.len(), 10);
    }
}

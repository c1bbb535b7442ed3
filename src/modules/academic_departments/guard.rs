use tracing::{instrument, warn};

use registrar_core::{AppError, AppResult};
use registrar_models::{DepartmentFilter, NewDepartment};

use crate::store::DepartmentStore;

/// Existence checks run around department writes.
///
/// Each check is a single fresh read. Nothing is held between the read and
/// the write that follows, so two concurrent creates can both pass
/// [`before_create`](Self::before_create); the unique index on `name` decides
/// the loser.
pub struct DepartmentGuard;

impl DepartmentGuard {
    #[instrument(skip(store))]
    pub async fn before_create<S>(store: &S, candidate: &NewDepartment) -> AppResult<()>
    where
        S: DepartmentStore + ?Sized,
    {
        let existing = store
            .find_one(&DepartmentFilter::by_name(candidate.name.clone()))
            .await?;

        if existing.is_some() {
            warn!(name = %candidate.name, "rejecting duplicate department");
            return Err(AppError::duplicate("This department already exists"));
        }

        Ok(())
    }

    #[instrument(skip(store))]
    pub async fn before_update<S>(store: &S, filter: &DepartmentFilter) -> AppResult<()>
    where
        S: DepartmentStore + ?Sized,
    {
        if store.find_one(filter).await?.is_none() {
            warn!("update target department does not exist");
            return Err(AppError::not_found("This department does not exist"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryDepartmentStore;
    use registrar_models::DepartmentId;

    fn candidate(name: &str) -> NewDepartment {
        NewDepartment {
            name: name.to_string(),
            academic_faculty_id: None,
        }
    }

    #[tokio::test]
    async fn before_create_passes_for_unused_name() {
        let store = MemoryDepartmentStore::new();

        assert!(
            DepartmentGuard::before_create(&store, &candidate("Physics"))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn before_create_rejects_taken_name() {
        let store = MemoryDepartmentStore::new();
        store.create(candidate("Physics")).await.unwrap();

        let result = DepartmentGuard::before_create(&store, &candidate("Physics")).await;

        assert!(matches!(result, Err(AppError::DuplicateRecord(_))));
    }

    #[tokio::test]
    async fn before_update_rejects_missing_target() {
        let store = MemoryDepartmentStore::new();
        store.create(candidate("Physics")).await.unwrap();

        let filter = DepartmentFilter::by_id(DepartmentId::new());
        let result = DepartmentGuard::before_update(&store, &filter).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn before_update_passes_for_existing_target() {
        let store = MemoryDepartmentStore::new();
        let physics = store.create(candidate("Physics")).await.unwrap();

        let result =
            DepartmentGuard::before_update(&store, &DepartmentFilter::by_id(physics.id)).await;

        assert!(result.is_ok());
    }
}

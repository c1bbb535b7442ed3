use tracing::{info, instrument};
use validator::Validate;

use registrar_core::{AppError, AppResult};
use registrar_models::{AcademicDepartment, DepartmentFilter, DepartmentId, NewDepartment};

use super::guard::DepartmentGuard;
use super::model::{CreateDepartmentDto, UpdateDepartmentDto};
use crate::store::DepartmentStore;

pub struct DepartmentService;

impl DepartmentService {
    #[instrument(skip(store))]
    pub async fn create_department<S>(
        store: &S,
        dto: CreateDepartmentDto,
    ) -> AppResult<AcademicDepartment>
    where
        S: DepartmentStore + ?Sized,
    {
        dto.validate()?;
        let candidate = NewDepartment::from(dto);

        DepartmentGuard::before_create(store, &candidate).await?;
        let department = store.create(candidate).await?;

        info!(department_id = %department.id, name = %department.name, "department created");
        Ok(department)
    }

    #[instrument(skip(store))]
    pub async fn update_department<S>(
        store: &S,
        filter: DepartmentFilter,
        dto: UpdateDepartmentDto,
    ) -> AppResult<AcademicDepartment>
    where
        S: DepartmentStore + ?Sized,
    {
        dto.validate()?;

        DepartmentGuard::before_update(store, &filter).await?;
        let department = store
            .find_one_and_update(&filter, dto.into())
            .await?
            // Removed between the guard's read and this write
            .ok_or_else(|| AppError::not_found("This department does not exist"))?;

        info!(department_id = %department.id, "department updated");
        Ok(department)
    }

    #[instrument(skip(store))]
    pub async fn get_department<S>(store: &S, id: DepartmentId) -> AppResult<AcademicDepartment>
    where
        S: DepartmentStore + ?Sized,
    {
        store
            .find_one(&DepartmentFilter::by_id(id))
            .await?
            .ok_or_else(|| AppError::not_found("Department not found"))
    }

    #[instrument(skip(store))]
    pub async fn list_departments<S>(
        store: &S,
        filter: DepartmentFilter,
    ) -> AppResult<Vec<AcademicDepartment>>
    where
        S: DepartmentStore + ?Sized,
    {
        store.find(&filter).await
    }
}

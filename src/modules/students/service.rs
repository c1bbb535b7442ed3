use tracing::{info, instrument};

use registrar_core::{AppError, AppResult};
use registrar_models::{Student, StudentFilter, StudentPatch, StudentStatus};

use super::model::CreateStudentDto;
use super::validator::StudentRecordValidator;
use crate::store::StudentStore;

pub struct StudentService;

impl StudentService {
    #[instrument(skip(store, dto), fields(student_id = %dto.id))]
    pub async fn create_student<S>(store: &S, dto: CreateStudentDto) -> AppResult<Student>
    where
        S: StudentStore + ?Sized,
    {
        let candidate = StudentRecordValidator::validate(&dto)?;
        let student = store.create(candidate).await?;

        info!(student_id = %student.id, email = %student.email, "student created");
        Ok(student)
    }

    #[instrument(skip(store))]
    pub async fn get_student<S>(store: &S, id: &str) -> AppResult<Student>
    where
        S: StudentStore + ?Sized,
    {
        store
            .find_one(&StudentFilter::by_id(id))
            .await?
            .ok_or_else(|| AppError::not_found("Student not found"))
    }

    #[instrument(skip(store))]
    pub async fn set_student_status<S>(
        store: &S,
        id: &str,
        status: StudentStatus,
    ) -> AppResult<Student>
    where
        S: StudentStore + ?Sized,
    {
        let patch = StudentPatch {
            is_active: Some(status),
            ..StudentPatch::default()
        };

        let student = store
            .find_one_and_update(&StudentFilter::by_id(id), patch)
            .await?
            .ok_or_else(|| AppError::not_found("Student not found"))?;

        info!(student_id = %student.id, status = %student.is_active, "student status changed");
        Ok(student)
    }
}

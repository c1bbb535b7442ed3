//! Administrative commands behind `registrar-cli`.

pub mod seeder;

use registrar_config::BcryptConfig;
use registrar_core::AppResult;
use registrar_models::{AcademicDepartment, FacultyId, UserAccount, UserRole, UserStatus};

use crate::modules::academic_departments::{CreateDepartmentDto, DepartmentService};
use crate::modules::users::{CreateUserDto, UserService};
use crate::store::{DepartmentStore, UserStore};

/// Creates an admin account that must change its password on first login.
pub async fn create_admin<S>(
    store: &S,
    config: &BcryptConfig,
    id: &str,
    email: &str,
    password: &str,
) -> AppResult<UserAccount>
where
    S: UserStore + ?Sized,
{
    let dto = CreateUserDto {
        id: id.trim().to_string(),
        email: email.trim().to_string(),
        password: password.to_string(),
        needs_password_change: true,
        role: UserRole::Admin,
        status: UserStatus::InProgress,
    };

    UserService::create_user(store, config, dto).await
}

pub async fn create_department<S>(
    store: &S,
    name: &str,
    faculty_id: Option<FacultyId>,
) -> AppResult<AcademicDepartment>
where
    S: DepartmentStore + ?Sized,
{
    let dto = CreateDepartmentDto {
        name: name.trim().to_string(),
        academic_faculty_id: faculty_id,
    };

    DepartmentService::create_department(store, dto).await
}

//! The document-store seam.
//!
//! Guards and services only see these traits. Each trait covers one entity
//! collection and mirrors the operations the guards need: `create`,
//! `find_one`, `find` and `find_one_and_update`. Implementations must enforce
//! the unique indexes themselves and report violations as
//! [`AppError::DuplicateRecord`](registrar_core::AppError::DuplicateRecord);
//! the guards' read-then-write checks are not atomic and cannot stand in for
//! them.
//!
//! - [`postgres`]: SQLx-backed stores over a shared [`PgPool`](sqlx::PgPool)
//! - [`memory`]: In-process stores for tests (feature `test-utils`)

use async_trait::async_trait;
use registrar_core::AppResult;
use registrar_models::{
    AcademicDepartment, DepartmentFilter, DepartmentPatch, NewDepartment, NewStudent, NewUser,
    PasswordSelection, Student, StudentFilter, StudentPatch, UserAccount, UserFilter, UserPatch,
};

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod postgres;

#[cfg(any(test, feature = "test-utils"))]
pub use memory::{MemoryDepartmentStore, MemoryStudentStore, MemoryUserStore};
pub use postgres::{PgDepartmentStore, PgStudentStore, PgUserStore};

#[async_trait]
pub trait DepartmentStore: Send + Sync {
    async fn create(&self, department: NewDepartment) -> AppResult<AcademicDepartment>;

    async fn find_one(&self, filter: &DepartmentFilter) -> AppResult<Option<AcademicDepartment>>;

    /// All matching departments ordered by name.
    async fn find(&self, filter: &DepartmentFilter) -> AppResult<Vec<AcademicDepartment>>;

    /// Applies `patch` to the first match and returns the updated record.
    async fn find_one_and_update(
        &self,
        filter: &DepartmentFilter,
        patch: DepartmentPatch,
    ) -> AppResult<Option<AcademicDepartment>>;
}

#[async_trait]
pub trait StudentStore: Send + Sync {
    async fn create(&self, student: NewStudent) -> AppResult<Student>;

    async fn find_one(&self, filter: &StudentFilter) -> AppResult<Option<Student>>;

    async fn find_one_and_update(
        &self,
        filter: &StudentFilter,
        patch: StudentPatch,
    ) -> AppResult<Option<Student>>;
}

/// Account storage. Reads leave `password` empty unless
/// [`PasswordSelection::Included`] is asked for; writes return the stored
/// row including the hash.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: NewUser) -> AppResult<UserAccount>;

    async fn find_one(
        &self,
        filter: &UserFilter,
        selection: PasswordSelection,
    ) -> AppResult<Option<UserAccount>>;

    async fn find_one_and_update(
        &self,
        filter: &UserFilter,
        patch: UserPatch,
    ) -> AppResult<Option<UserAccount>>;
}

//! # Registrar Models
//!
//! Persisted entities and the filters/patches the stores accept.
//!
//! - [`departments`]: Academic departments
//! - [`students`]: Students with nested name and guardian sub-records
//! - [`users`]: User accounts and their write-only password
//! - [`enums`]: Closed value sets (gender, blood group, role, statuses)
//! - [`ids`]: UUID newtypes for department and faculty references

pub mod departments;
pub mod enums;
pub mod ids;
pub mod students;
pub mod users;

pub use departments::{AcademicDepartment, DepartmentFilter, DepartmentPatch, NewDepartment};
pub use enums::{BloodGroup, Gender, StudentStatus, UnknownVariant, UserRole, UserStatus};
pub use ids::{DepartmentId, FacultyId};
pub use students::{
    Guardian, LocalGuardian, NewStudent, Student, StudentFilter, StudentPatch, UserName,
};
pub use users::{NewUser, PasswordSelection, UserAccount, UserFilter, UserPatch};

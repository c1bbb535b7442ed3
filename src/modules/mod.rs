pub mod academic_departments;
pub mod students;
pub mod users;

pub use self::academic_departments::{DepartmentGuard, DepartmentService};
pub use self::students::{StudentRecordValidator, StudentService};
pub use self::users::{UserCredentialGuard, UserService};

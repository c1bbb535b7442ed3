pub mod model;
pub mod service;
pub mod validator;

pub use model::{CreateStudentDto, GuardianDto, LocalGuardianDto, UserNameDto};
pub use service::StudentService;
pub use self::validator::StudentRecordValidator;

pub mod guard;
pub mod model;
pub mod service;

pub use guard::DepartmentGuard;
pub use model::{CreateDepartmentDto, UpdateDepartmentDto};
pub use service::DepartmentService;

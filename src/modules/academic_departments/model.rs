use serde::Deserialize;
use validator::Validate;

use registrar_core::serde::{trim_optional_string, trim_string};
use registrar_models::{DepartmentPatch, FacultyId, NewDepartment};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDepartmentDto {
    #[serde(deserialize_with = "trim_string")]
    #[validate(length(min = 1, max = 100, message = "Department name is required"))]
    pub name: String,
    pub academic_faculty_id: Option<FacultyId>,
}

impl From<CreateDepartmentDto> for NewDepartment {
    fn from(dto: CreateDepartmentDto) -> Self {
        Self {
            name: dto.name,
            academic_faculty_id: dto.academic_faculty_id,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateDepartmentDto {
    #[serde(default, deserialize_with = "trim_optional_string")]
    #[validate(length(min = 1, max = 100, message = "Department name cannot be empty"))]
    pub name: Option<String>,
    pub academic_faculty_id: Option<FacultyId>,
}

impl From<UpdateDepartmentDto> for DepartmentPatch {
    fn from(dto: UpdateDepartmentDto) -> Self {
        Self {
            name: dto.name.map(|name| name.trim().to_string()),
            academic_faculty_id: dto.academic_faculty_id,
        }
    }
}

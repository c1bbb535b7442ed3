use serde::Deserialize;
use validator::Validate;

use registrar_core::serde::{trim_optional_string, trim_string};
use registrar_models::{Guardian, LocalGuardian, UserName};

use super::validator::{
    validate_blood_group, validate_email_domain, validate_first_name, validate_gender,
    validate_last_name, validate_required, validate_student_status,
};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserNameDto {
    #[serde(deserialize_with = "trim_string")]
    #[validate(
        length(max = 20, message = "First name cannot be more than 20 characters"),
        custom(function = "validate_first_name")
    )]
    pub first_name: String,
    #[serde(default, deserialize_with = "trim_optional_string")]
    pub middle_name: Option<String>,
    #[serde(deserialize_with = "trim_string")]
    #[validate(custom(function = "validate_last_name"))]
    pub last_name: String,
}

impl From<&UserNameDto> for UserName {
    fn from(dto: &UserNameDto) -> Self {
        Self {
            first_name: dto.first_name.clone(),
            middle_name: dto
                .middle_name
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            last_name: dto.last_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GuardianDto {
    #[serde(deserialize_with = "trim_string")]
    #[validate(custom(function = "validate_required", message = "Father name is required"))]
    pub father_name: String,
    #[serde(deserialize_with = "trim_string")]
    #[validate(custom(function = "validate_required", message = "Father occupation is required"))]
    pub father_occupation: String,
    #[serde(deserialize_with = "trim_string")]
    #[validate(custom(function = "validate_required", message = "Father contact number is required"))]
    pub father_contact_no: String,
    #[serde(deserialize_with = "trim_string")]
    #[validate(custom(function = "validate_required", message = "Mother name is required"))]
    pub mother_name: String,
    #[serde(deserialize_with = "trim_string")]
    #[validate(custom(function = "validate_required", message = "Mother occupation is required"))]
    pub mother_occupation: String,
    #[serde(deserialize_with = "trim_string")]
    #[validate(custom(function = "validate_required", message = "Mother contact number is required"))]
    pub mother_contact_no: String,
}

impl From<&GuardianDto> for Guardian {
    fn from(dto: &GuardianDto) -> Self {
        Self {
            father_name: dto.father_name.clone(),
            father_occupation: dto.father_occupation.clone(),
            father_contact_no: dto.father_contact_no.clone(),
            mother_name: dto.mother_name.clone(),
            mother_occupation: dto.mother_occupation.clone(),
            mother_contact_no: dto.mother_contact_no.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LocalGuardianDto {
    #[serde(deserialize_with = "trim_string")]
    #[validate(custom(function = "validate_required", message = "Local guardian name is required"))]
    pub name: String,
    #[serde(deserialize_with = "trim_string")]
    #[validate(custom(function = "validate_required", message = "Local guardian occupation is required"))]
    pub occupation: String,
    #[serde(deserialize_with = "trim_string")]
    #[validate(custom(function = "validate_required", message = "Local guardian contact number is required"))]
    pub contact_no: String,
    #[serde(deserialize_with = "trim_string")]
    #[validate(custom(function = "validate_required", message = "Local guardian address is required"))]
    pub address: String,
}

impl From<&LocalGuardianDto> for LocalGuardian {
    fn from(dto: &LocalGuardianDto) -> Self {
        Self {
            name: dto.name.clone(),
            occupation: dto.occupation.clone(),
            contact_no: dto.contact_no.clone(),
            address: dto.address.clone(),
        }
    }
}

/// An incoming student record before validation.
///
/// Enumerated fields stay as raw text here so that a bad value is reported
/// against its field instead of failing the whole document at decode time.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStudentDto {
    #[serde(deserialize_with = "trim_string")]
    #[validate(custom(function = "validate_required", message = "Student id is required"))]
    pub id: String,
    #[validate(nested)]
    pub name: UserNameDto,
    #[serde(deserialize_with = "trim_string")]
    #[validate(custom(function = "validate_gender"))]
    pub gender: String,
    #[serde(default, deserialize_with = "trim_optional_string")]
    pub date_of_birth: Option<String>,
    #[serde(deserialize_with = "trim_string")]
    #[validate(
        email(message = "Not a valid email address"),
        custom(function = "validate_email_domain")
    )]
    pub email: String,
    #[serde(deserialize_with = "trim_string")]
    #[validate(custom(function = "validate_required", message = "Student contact number is required"))]
    pub contact_no: String,
    #[serde(deserialize_with = "trim_string")]
    #[validate(custom(
        function = "validate_required",
        message = "Student emergency contact number is required"
    ))]
    pub emergency_contact_no: String,
    #[serde(default, deserialize_with = "trim_optional_string")]
    #[validate(custom(function = "validate_blood_group"))]
    pub blood_group: Option<String>,
    #[serde(deserialize_with = "trim_string")]
    #[validate(custom(function = "validate_required", message = "Student present address is required"))]
    pub present_address: String,
    #[serde(deserialize_with = "trim_string")]
    #[validate(custom(
        function = "validate_required",
        message = "Student permanent address is required"
    ))]
    pub permanent_address: String,
    #[validate(nested)]
    pub guardian: GuardianDto,
    #[validate(nested)]
    pub local_guardian: LocalGuardianDto,
    #[serde(default, deserialize_with = "trim_optional_string")]
    pub profile_img: Option<String>,
    #[serde(default, deserialize_with = "trim_optional_string")]
    #[validate(custom(function = "validate_student_status"))]
    pub is_active: Option<String>,
}

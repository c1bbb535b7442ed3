#![allow(dead_code)]

use registrar::modules::academic_departments::CreateDepartmentDto;
use registrar::modules::students::{CreateStudentDto, GuardianDto, LocalGuardianDto, UserNameDto};
use registrar::modules::users::CreateUserDto;
use registrar::registrar_config::BcryptConfig;
use registrar::registrar_models::{UserRole, UserStatus};

/// Lowest bcrypt cost, keeps hashing fast in tests.
pub fn test_bcrypt() -> BcryptConfig {
    BcryptConfig::new(4)
}

pub fn department_dto(name: &str) -> CreateDepartmentDto {
    CreateDepartmentDto {
        name: name.to_string(),
        academic_faculty_id: None,
    }
}

pub fn user_dto(id: &str, email: &str, password: &str) -> CreateUserDto {
    CreateUserDto {
        id: id.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        needs_password_change: true,
        role: UserRole::Student,
        status: UserStatus::InProgress,
    }
}

pub fn valid_student_dto(id: &str, email: &str) -> CreateStudentDto {
    CreateStudentDto {
        id: id.to_string(),
        name: UserNameDto {
            first_name: "Amina".to_string(),
            middle_name: Some("Grace".to_string()),
            last_name: "Okafor".to_string(),
        },
        gender: "female".to_string(),
        date_of_birth: Some("2005-09-01".to_string()),
        email: email.to_string(),
        contact_no: "+2348010000000".to_string(),
        emergency_contact_no: "+2348020000000".to_string(),
        blood_group: Some("AB-".to_string()),
        present_address: "3 Marina Road, Lagos".to_string(),
        permanent_address: "18 Ring Road, Ibadan".to_string(),
        guardian: GuardianDto {
            father_name: "Chidi Okafor".to_string(),
            father_occupation: "Accountant".to_string(),
            father_contact_no: "+2348030000000".to_string(),
            mother_name: "Ngozi Okafor".to_string(),
            mother_occupation: "Pharmacist".to_string(),
            mother_contact_no: "+2348040000000".to_string(),
        },
        local_guardian: LocalGuardianDto {
            name: "Tunde Bello".to_string(),
            occupation: "Lecturer".to_string(),
            contact_no: "+2348050000000".to_string(),
            address: "9 Allen Avenue, Lagos".to_string(),
        },
        profile_img: None,
        is_active: None,
    }
}

//! Student entity with its nested name and guardian sub-records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{BloodGroup, Gender, StudentStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserName {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guardian {
    pub father_name: String,
    pub father_occupation: String,
    pub father_contact_no: String,
    pub mother_name: String,
    pub mother_occupation: String,
    pub mother_contact_no: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalGuardian {
    pub name: String,
    pub occupation: String,
    pub contact_no: String,
    pub address: String,
}

/// A student as stored. `id` and `email` are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: UserName,
    pub gender: Gender,
    /// Free text as supplied; no date format is imposed.
    pub date_of_birth: Option<String>,
    pub email: String,
    pub contact_no: String,
    pub emergency_contact_no: String,
    pub blood_group: Option<BloodGroup>,
    pub present_address: String,
    pub permanent_address: String,
    pub guardian: Guardian,
    pub local_guardian: LocalGuardian,
    pub profile_img: Option<String>,
    pub is_active: StudentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A student record that passed validation and is ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub id: String,
    pub name: UserName,
    pub gender: Gender,
    pub date_of_birth: Option<String>,
    pub email: String,
    pub contact_no: String,
    pub emergency_contact_no: String,
    pub blood_group: Option<BloodGroup>,
    pub present_address: String,
    pub permanent_address: String,
    pub guardian: Guardian,
    pub local_guardian: LocalGuardian,
    pub profile_img: Option<String>,
    pub is_active: StudentStatus,
}

impl NewStudent {
    /// Stamps both timestamps with `now`.
    pub fn into_student(self, now: DateTime<Utc>) -> Student {
        Student {
            id: self.id,
            name: self.name,
            gender: self.gender,
            date_of_birth: self.date_of_birth,
            email: self.email,
            contact_no: self.contact_no,
            emergency_contact_no: self.emergency_contact_no,
            blood_group: self.blood_group,
            present_address: self.present_address,
            permanent_address: self.permanent_address,
            guardian: self.guardian,
            local_guardian: self.local_guardian,
            profile_img: self.profile_img,
            is_active: self.is_active,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentPatch {
    pub is_active: Option<StudentStatus>,
    pub profile_img: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentFilter {
    pub id: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<StudentStatus>,
}

impl StudentFilter {
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    pub fn matches(&self, student: &Student) -> bool {
        self.id.as_deref().is_none_or(|id| id == student.id)
            && self
                .email
                .as_deref()
                .is_none_or(|email| email == student.email)
            && self
                .is_active
                .is_none_or(|status| status == student.is_active)
    }
}

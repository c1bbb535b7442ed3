//! Academic department entity and its store filter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::ids::{DepartmentId, FacultyId};

/// A department as stored. `name` is unique across all departments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AcademicDepartment {
    pub id: DepartmentId,
    pub name: String,
    pub academic_faculty_id: Option<FacultyId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A department that passed its guards and is ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDepartment {
    pub name: String,
    pub academic_faculty_id: Option<FacultyId>,
}

/// Field changes applied by `find_one_and_update`. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentPatch {
    pub name: Option<String>,
    pub academic_faculty_id: Option<FacultyId>,
}

/// Equality filter over departments. Unset fields match anything, so the
/// default filter matches every department.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentFilter {
    pub id: Option<DepartmentId>,
    pub name: Option<String>,
    pub academic_faculty_id: Option<FacultyId>,
}

impl DepartmentFilter {
    pub fn by_id(id: DepartmentId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn matches(&self, department: &AcademicDepartment) -> bool {
        self.id.is_none_or(|id| id == department.id)
            && self
                .name
                .as_deref()
                .is_none_or(|name| name == department.name)
            && self
                .academic_faculty_id
                .is_none_or(|faculty| Some(faculty) == department.academic_faculty_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn department(name: &str) -> AcademicDepartment {
        let now = Utc::now();
        AcademicDepartment {
            id: DepartmentId::new(),
            name: name.to_string(),
            academic_faculty_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(DepartmentFilter::default().matches(&department("Physics")));
    }

    #[test]
    fn name_filter_is_exact() {
        let physics = department("Physics");

        assert!(DepartmentFilter::by_name("Physics").matches(&physics));
        assert!(!DepartmentFilter::by_name("physics").matches(&physics));
    }

    #[test]
    fn faculty_filter_rejects_unassigned_departments() {
        let filter = DepartmentFilter {
            academic_faculty_id: Some(FacultyId::new()),
            ..DepartmentFilter::default()
        };

        assert!(!filter.matches(&department("Physics")));
    }
}

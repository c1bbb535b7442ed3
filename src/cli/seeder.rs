//! Fake departments and students for local development.
//!
//! Everything goes through the regular services, so seeded records satisfy
//! the same rules as real ones. Generated names that the student rules would
//! reject are redrawn.

use std::time::Instant;

use fake::Fake;
use fake::faker::address::en::{CityName, StreetName, StreetSuffix};
use fake::faker::company::en::Profession;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use tracing::{info, warn};

use registrar_core::{AppError, AppResult};
use registrar_models::{AcademicDepartment, BloodGroup, Gender, Student};

use crate::modules::academic_departments::{CreateDepartmentDto, DepartmentService};
use crate::modules::students::validator::capitalize;
use crate::modules::students::{
    CreateStudentDto, GuardianDto, LocalGuardianDto, StudentService, UserNameDto,
};
use crate::store::{DepartmentStore, StudentStore};

const MAX_ATTEMPTS_PER_RECORD: usize = 10;

#[derive(Debug, Clone, Copy)]
pub struct SeedCounts {
    pub departments: usize,
    pub students: usize,
}

impl Default for SeedCounts {
    fn default() -> Self {
        Self {
            departments: 5,
            students: 20,
        }
    }
}

#[derive(Debug, Default)]
pub struct SeedReport {
    pub departments: Vec<AcademicDepartment>,
    pub students: Vec<Student>,
}

fn first_name() -> String {
    loop {
        let name: String = FirstName().fake();
        if name.len() <= 20 && name.chars().all(|c| c.is_ascii_alphabetic()) {
            return capitalize(&name);
        }
    }
}

fn last_name() -> String {
    loop {
        let name: String = LastName().fake();
        if name.chars().all(|c| c.is_ascii_alphabetic()) {
            return name;
        }
    }
}

fn address() -> String {
    let number: u16 = (1..999).fake();
    let street: String = StreetName().fake();
    let suffix: String = StreetSuffix().fake();
    let city: String = CityName().fake();
    format!("{} {} {}, {}", number, street, suffix, city)
}

fn full_name() -> String {
    format!("{} {}", first_name(), last_name())
}

pub fn fake_student(sequence: usize) -> CreateStudentDto {
    let first = first_name();
    let last = last_name();
    let gender = Gender::ALL[sequence % Gender::ALL.len()];
    let blood_group = BloodGroup::ALL[sequence % BloodGroup::ALL.len()];
    let year: i32 = (1998..2008).fake();
    let month: u32 = (1..13).fake();
    let day: u32 = (1..29).fake();

    CreateStudentDto {
        id: format!("S-{:06}", sequence + 1),
        email: format!(
            "{}.{}.{}@example.com",
            first.to_lowercase(),
            last.to_lowercase(),
            sequence + 1
        ),
        name: UserNameDto {
            first_name: first,
            middle_name: None,
            last_name: last,
        },
        gender: gender.to_string(),
        date_of_birth: Some(format!("{:04}-{:02}-{:02}", year, month, day)),
        contact_no: PhoneNumber().fake(),
        emergency_contact_no: PhoneNumber().fake(),
        blood_group: Some(blood_group.to_string()),
        present_address: address(),
        permanent_address: address(),
        guardian: GuardianDto {
            father_name: full_name(),
            father_occupation: Profession().fake(),
            father_contact_no: PhoneNumber().fake(),
            mother_name: full_name(),
            mother_occupation: Profession().fake(),
            mother_contact_no: PhoneNumber().fake(),
        },
        local_guardian: LocalGuardianDto {
            name: full_name(),
            occupation: Profession().fake(),
            contact_no: PhoneNumber().fake(),
            address: address(),
        },
        profile_img: None,
        is_active: None,
    }
}

pub async fn seed_departments<S>(store: &S, count: usize) -> AppResult<Vec<AcademicDepartment>>
where
    S: DepartmentStore + ?Sized,
{
    let mut created = Vec::with_capacity(count);
    let mut attempts = 0;

    while created.len() < count && attempts < count * MAX_ATTEMPTS_PER_RECORD {
        attempts += 1;
        let profession: String = Profession().fake();
        let dto = CreateDepartmentDto {
            name: format!("Department of {}", profession),
            academic_faculty_id: None,
        };

        match DepartmentService::create_department(store, dto).await {
            Ok(department) => created.push(department),
            Err(AppError::DuplicateRecord(_)) => continue,
            Err(err) => return Err(err),
        }
    }

    if created.len() < count {
        warn!(requested = count, created = created.len(), "ran out of unique department names");
    }

    Ok(created)
}

/// Ids start at `S-000001`; ids already taken are skipped.
pub async fn seed_students<S>(store: &S, count: usize) -> AppResult<Vec<Student>>
where
    S: StudentStore + ?Sized,
{
    let mut created = Vec::with_capacity(count);
    let mut sequence = 0;

    while created.len() < count && sequence < count * MAX_ATTEMPTS_PER_RECORD {
        let dto = fake_student(sequence);
        sequence += 1;

        match StudentService::create_student(store, dto).await {
            Ok(student) => created.push(student),
            Err(AppError::DuplicateRecord(_)) => continue,
            Err(err) => return Err(err),
        }
    }

    Ok(created)
}

pub async fn seed_database<D, S>(
    departments: &D,
    students: &S,
    counts: SeedCounts,
) -> AppResult<SeedReport>
where
    D: DepartmentStore + ?Sized,
    S: StudentStore + ?Sized,
{
    let start_time = Instant::now();
    info!(
        departments = counts.departments,
        students = counts.students,
        "starting database seeding"
    );

    let report = SeedReport {
        departments: seed_departments(departments, counts.departments).await?,
        students: seed_students(students, counts.students).await?,
    };

    info!(
        departments = report.departments.len(),
        students = report.students.len(),
        elapsed = ?start_time.elapsed(),
        "seeding complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::students::StudentRecordValidator;
    use crate::store::{MemoryDepartmentStore, MemoryStudentStore};

    #[test]
    fn fake_students_pass_validation() {
        for sequence in 0..50 {
            let dto = fake_student(sequence);
            assert!(
                StudentRecordValidator::validate(&dto).is_ok(),
                "generated student rejected: {:?}",
                dto
            );
        }
    }

    #[tokio::test]
    async fn seeds_requested_counts() {
        let departments = MemoryDepartmentStore::new();
        let students = MemoryStudentStore::new();

        let report = seed_database(
            &departments,
            &students,
            SeedCounts {
                departments: 3,
                students: 5,
            },
        )
        .await
        .unwrap();

        assert_eq!(report.students.len(), 5);
        assert_eq!(students.len().await, 5);
        assert_eq!(departments.len().await, report.departments.len());
        assert!(!report.departments.is_empty());
    }
}

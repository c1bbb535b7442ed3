//! In-process stores with the same unique indexes as the PostgreSQL schema.
//!
//! Intended for tests and local experiments; data lives as long as the store.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use registrar_core::{AppError, AppResult};
use registrar_models::{
    AcademicDepartment, DepartmentFilter, DepartmentId, DepartmentPatch, NewDepartment,
    NewStudent, NewUser, PasswordSelection, Student, StudentFilter, StudentPatch, UserAccount,
    UserFilter, UserPatch,
};

use super::{DepartmentStore, StudentStore, UserStore};

#[derive(Debug, Default)]
pub struct MemoryDepartmentStore {
    rows: Mutex<Vec<AcademicDepartment>>,
}

impl MemoryDepartmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.lock().await.is_empty()
    }
}

#[async_trait]
impl DepartmentStore for MemoryDepartmentStore {
    async fn create(&self, department: NewDepartment) -> AppResult<AcademicDepartment> {
        let mut rows = self.rows.lock().await;
        if rows.iter().any(|row| row.name == department.name) {
            return Err(AppError::duplicate("This department already exists"));
        }

        let now = Utc::now();
        let row = AcademicDepartment {
            id: DepartmentId::new(),
            name: department.name,
            academic_faculty_id: department.academic_faculty_id,
            created_at: now,
            updated_at: now,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn find_one(&self, filter: &DepartmentFilter) -> AppResult<Option<AcademicDepartment>> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().find(|row| filter.matches(row)).cloned())
    }

    async fn find(&self, filter: &DepartmentFilter) -> AppResult<Vec<AcademicDepartment>> {
        let rows = self.rows.lock().await;
        let mut found: Vec<_> = rows.iter().filter(|row| filter.matches(row)).cloned().collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }

    async fn find_one_and_update(
        &self,
        filter: &DepartmentFilter,
        patch: DepartmentPatch,
    ) -> AppResult<Option<AcademicDepartment>> {
        let mut rows = self.rows.lock().await;
        let Some(index) = rows.iter().position(|row| filter.matches(row)) else {
            return Ok(None);
        };

        if let Some(name) = &patch.name {
            let target_id = rows[index].id;
            if rows.iter().any(|row| row.id != target_id && &row.name == name) {
                return Err(AppError::duplicate("This department already exists"));
            }
        }

        let row = &mut rows[index];
        if let Some(name) = patch.name {
            row.name = name;
        }
        if let Some(faculty_id) = patch.academic_faculty_id {
            row.academic_faculty_id = Some(faculty_id);
        }
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }
}

#[derive(Debug, Default)]
pub struct MemoryStudentStore {
    rows: Mutex<Vec<Student>>,
}

impl MemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.lock().await.is_empty()
    }
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    async fn create(&self, student: NewStudent) -> AppResult<Student> {
        let mut rows = self.rows.lock().await;
        if rows
            .iter()
            .any(|row| row.id == student.id || row.email == student.email)
        {
            return Err(AppError::duplicate(
                "A student with this id or email already exists",
            ));
        }

        let row = student.into_student(Utc::now());
        rows.push(row.clone());
        Ok(row)
    }

    async fn find_one(&self, filter: &StudentFilter) -> AppResult<Option<Student>> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().find(|row| filter.matches(row)).cloned())
    }

    async fn find_one_and_update(
        &self,
        filter: &StudentFilter,
        patch: StudentPatch,
    ) -> AppResult<Option<Student>> {
        let mut rows = self.rows.lock().await;
        let Some(row) = rows.iter_mut().find(|row| filter.matches(row)) else {
            return Ok(None);
        };

        if let Some(status) = patch.is_active {
            row.is_active = status;
        }
        if let Some(profile_img) = patch.profile_img {
            row.profile_img = Some(profile_img);
        }
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }
}

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    rows: Mutex<Vec<UserAccount>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.lock().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: NewUser) -> AppResult<UserAccount> {
        let mut rows = self.rows.lock().await;
        if rows
            .iter()
            .any(|row| row.id == user.id || row.email == user.email)
        {
            return Err(AppError::duplicate(
                "A user with this id or email already exists",
            ));
        }

        let row = user.into_account(Utc::now());
        rows.push(row.clone());
        Ok(row)
    }

    async fn find_one(
        &self,
        filter: &UserFilter,
        selection: PasswordSelection,
    ) -> AppResult<Option<UserAccount>> {
        let rows = self.rows.lock().await;
        let found = rows.iter().find(|row| filter.matches(row)).cloned();

        Ok(found.map(|mut user| {
            if selection == PasswordSelection::Excluded {
                user.password.clear();
            }
            user
        }))
    }

    async fn find_one_and_update(
        &self,
        filter: &UserFilter,
        patch: UserPatch,
    ) -> AppResult<Option<UserAccount>> {
        let mut rows = self.rows.lock().await;
        let Some(row) = rows.iter_mut().find(|row| filter.matches(row)) else {
            return Ok(None);
        };

        if let Some(password) = patch.password {
            row.password = password;
        }
        if let Some(needs_change) = patch.needs_password_change {
            row.needs_password_change = needs_change;
        }
        if let Some(changed_at) = patch.password_changed_at {
            row.password_changed_at = Some(changed_at);
        }
        if let Some(status) = patch.status {
            row.status = status;
        }
        if let Some(is_deleted) = patch.is_deleted {
            row.is_deleted = is_deleted;
        }
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }
}

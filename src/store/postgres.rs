use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, types::Json};
use tracing::instrument;

use registrar_core::{AppError, AppResult};
use registrar_models::{
    AcademicDepartment, BloodGroup, DepartmentFilter, DepartmentPatch, Gender, Guardian,
    LocalGuardian, NewDepartment, NewStudent, NewUser, PasswordSelection, Student, StudentFilter,
    StudentPatch, StudentStatus, UserAccount, UserFilter, UserName, UserPatch,
};

use super::{DepartmentStore, StudentStore, UserStore};

const DEPARTMENT_COLUMNS: &str = "id, name, academic_faculty_id, created_at, updated_at";

const STUDENT_COLUMNS: &str = "id, name, gender, date_of_birth, email, contact_no, \
     emergency_contact_no, blood_group, present_address, permanent_address, guardian, \
     local_guardian, profile_img, is_active, created_at, updated_at";

const USER_COLUMNS: &str = "id, email, needs_password_change, password_changed_at, role, \
     status, is_deleted, created_at, updated_at";

const USER_COLUMNS_WITH_PASSWORD: &str = "id, email, password, needs_password_change, \
     password_changed_at, role, status, is_deleted, created_at, updated_at";

/// Maps a unique-index violation to `DuplicateRecord`; everything else passes
/// through as a store failure.
fn map_write_error(err: sqlx::Error, duplicate_message: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_unique_violation()
    {
        return AppError::duplicate(duplicate_message);
    }
    AppError::database(err)
}

// ============================================================================
// Departments
// ============================================================================

#[derive(Clone, Debug)]
pub struct PgDepartmentStore {
    pool: PgPool,
}

impl PgDepartmentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_department_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &DepartmentFilter) {
    qb.push(" WHERE TRUE");
    if let Some(id) = filter.id {
        qb.push(" AND id = ").push_bind(id);
    }
    if let Some(name) = &filter.name {
        qb.push(" AND name = ").push_bind(name.clone());
    }
    if let Some(faculty_id) = filter.academic_faculty_id {
        qb.push(" AND academic_faculty_id = ").push_bind(faculty_id);
    }
}

#[async_trait]
impl DepartmentStore for PgDepartmentStore {
    #[instrument(skip(self))]
    async fn create(&self, department: NewDepartment) -> AppResult<AcademicDepartment> {
        sqlx::query_as::<_, AcademicDepartment>(&format!(
            "INSERT INTO academic_departments (id, name, academic_faculty_id) \
             VALUES ($1, $2, $3) RETURNING {}",
            DEPARTMENT_COLUMNS
        ))
        .bind(registrar_models::DepartmentId::new())
        .bind(&department.name)
        .bind(department.academic_faculty_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "This department already exists"))
    }

    #[instrument(skip(self))]
    async fn find_one(&self, filter: &DepartmentFilter) -> AppResult<Option<AcademicDepartment>> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT {} FROM academic_departments",
            DEPARTMENT_COLUMNS
        ));
        push_department_filter(&mut qb, filter);
        qb.push(" LIMIT 1");

        qb.build_query_as::<AcademicDepartment>()
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn find(&self, filter: &DepartmentFilter) -> AppResult<Vec<AcademicDepartment>> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT {} FROM academic_departments",
            DEPARTMENT_COLUMNS
        ));
        push_department_filter(&mut qb, filter);
        qb.push(" ORDER BY name");

        qb.build_query_as::<AcademicDepartment>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn find_one_and_update(
        &self,
        filter: &DepartmentFilter,
        patch: DepartmentPatch,
    ) -> AppResult<Option<AcademicDepartment>> {
        let mut qb = QueryBuilder::new("UPDATE academic_departments SET updated_at = NOW()");
        if let Some(name) = patch.name {
            qb.push(", name = ").push_bind(name);
        }
        if let Some(faculty_id) = patch.academic_faculty_id {
            qb.push(", academic_faculty_id = ").push_bind(faculty_id);
        }
        qb.push(" WHERE id = (SELECT id FROM academic_departments");
        push_department_filter(&mut qb, filter);
        qb.push(" LIMIT 1) RETURNING ");
        qb.push(DEPARTMENT_COLUMNS);

        qb.build_query_as::<AcademicDepartment>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "This department already exists"))
    }
}

// ============================================================================
// Students
// ============================================================================

#[derive(Clone, Debug)]
pub struct PgStudentStore {
    pool: PgPool,
}

impl PgStudentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Row shape of `students`; nested sub-records live in JSONB columns.
#[derive(FromRow)]
struct StudentRow {
    id: String,
    name: Json<UserName>,
    gender: Gender,
    date_of_birth: Option<String>,
    email: String,
    contact_no: String,
    emergency_contact_no: String,
    blood_group: Option<BloodGroup>,
    present_address: String,
    permanent_address: String,
    guardian: Json<Guardian>,
    local_guardian: Json<LocalGuardian>,
    profile_img: Option<String>,
    is_active: StudentStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        Student {
            id: row.id,
            name: row.name.0,
            gender: row.gender,
            date_of_birth: row.date_of_birth,
            email: row.email,
            contact_no: row.contact_no,
            emergency_contact_no: row.emergency_contact_no,
            blood_group: row.blood_group,
            present_address: row.present_address,
            permanent_address: row.permanent_address,
            guardian: row.guardian.0,
            local_guardian: row.local_guardian.0,
            profile_img: row.profile_img,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn push_student_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &StudentFilter) {
    qb.push(" WHERE TRUE");
    if let Some(id) = &filter.id {
        qb.push(" AND id = ").push_bind(id.clone());
    }
    if let Some(email) = &filter.email {
        qb.push(" AND email = ").push_bind(email.clone());
    }
    if let Some(status) = filter.is_active {
        qb.push(" AND is_active = ").push_bind(status);
    }
}

#[async_trait]
impl StudentStore for PgStudentStore {
    #[instrument(skip(self, student), fields(student_id = %student.id))]
    async fn create(&self, student: NewStudent) -> AppResult<Student> {
        let row = sqlx::query_as::<_, StudentRow>(&format!(
            "INSERT INTO students (id, name, gender, date_of_birth, email, contact_no, \
             emergency_contact_no, blood_group, present_address, permanent_address, guardian, \
             local_guardian, profile_img, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING {}",
            STUDENT_COLUMNS
        ))
        .bind(&student.id)
        .bind(Json(&student.name))
        .bind(student.gender)
        .bind(&student.date_of_birth)
        .bind(&student.email)
        .bind(&student.contact_no)
        .bind(&student.emergency_contact_no)
        .bind(student.blood_group)
        .bind(&student.present_address)
        .bind(&student.permanent_address)
        .bind(Json(&student.guardian))
        .bind(Json(&student.local_guardian))
        .bind(&student.profile_img)
        .bind(student.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "A student with this id or email already exists"))?;

        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn find_one(&self, filter: &StudentFilter) -> AppResult<Option<Student>> {
        let mut qb = QueryBuilder::new(format!("SELECT {} FROM students", STUDENT_COLUMNS));
        push_student_filter(&mut qb, filter);
        qb.push(" LIMIT 1");

        let row = qb
            .build_query_as::<StudentRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::database)?;

        Ok(row.map(Student::from))
    }

    #[instrument(skip(self))]
    async fn find_one_and_update(
        &self,
        filter: &StudentFilter,
        patch: StudentPatch,
    ) -> AppResult<Option<Student>> {
        let mut qb = QueryBuilder::new("UPDATE students SET updated_at = NOW()");
        if let Some(status) = patch.is_active {
            qb.push(", is_active = ").push_bind(status);
        }
        if let Some(profile_img) = patch.profile_img {
            qb.push(", profile_img = ").push_bind(profile_img);
        }
        qb.push(" WHERE id = (SELECT id FROM students");
        push_student_filter(&mut qb, filter);
        qb.push(" LIMIT 1) RETURNING ");
        qb.push(STUDENT_COLUMNS);

        let row = qb
            .build_query_as::<StudentRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::database)?;

        Ok(row.map(Student::from))
    }
}

// ============================================================================
// Users
// ============================================================================

#[derive(Clone, Debug)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_user_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &UserFilter) {
    qb.push(" WHERE TRUE");
    if let Some(id) = &filter.id {
        qb.push(" AND id = ").push_bind(id.clone());
    }
    if let Some(email) = &filter.email {
        qb.push(" AND email = ").push_bind(email.clone());
    }
    if let Some(is_deleted) = filter.is_deleted {
        qb.push(" AND is_deleted = ").push_bind(is_deleted);
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn create(&self, user: NewUser) -> AppResult<UserAccount> {
        sqlx::query_as::<_, UserAccount>(&format!(
            "INSERT INTO users (id, email, password, needs_password_change, role, status) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            USER_COLUMNS_WITH_PASSWORD
        ))
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.needs_password_change)
        .bind(user.role)
        .bind(user.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "A user with this id or email already exists"))
    }

    #[instrument(skip(self))]
    async fn find_one(
        &self,
        filter: &UserFilter,
        selection: PasswordSelection,
    ) -> AppResult<Option<UserAccount>> {
        let columns = match selection {
            PasswordSelection::Excluded => USER_COLUMNS,
            PasswordSelection::Included => USER_COLUMNS_WITH_PASSWORD,
        };
        let mut qb = QueryBuilder::new(format!("SELECT {} FROM users", columns));
        push_user_filter(&mut qb, filter);
        qb.push(" LIMIT 1");

        qb.build_query_as::<UserAccount>()
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn find_one_and_update(
        &self,
        filter: &UserFilter,
        patch: UserPatch,
    ) -> AppResult<Option<UserAccount>> {
        let mut qb = QueryBuilder::new("UPDATE users SET updated_at = NOW()");
        if let Some(password) = patch.password {
            qb.push(", password = ").push_bind(password);
        }
        if let Some(needs_change) = patch.needs_password_change {
            qb.push(", needs_password_change = ").push_bind(needs_change);
        }
        if let Some(changed_at) = patch.password_changed_at {
            qb.push(", password_changed_at = ").push_bind(changed_at);
        }
        if let Some(status) = patch.status {
            qb.push(", status = ").push_bind(status);
        }
        if let Some(is_deleted) = patch.is_deleted {
            qb.push(", is_deleted = ").push_bind(is_deleted);
        }
        qb.push(" WHERE id = (SELECT id FROM users");
        push_user_filter(&mut qb, filter);
        qb.push(" LIMIT 1) RETURNING ");
        qb.push(USER_COLUMNS_WITH_PASSWORD);

        qb.build_query_as::<UserAccount>()
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::database)
    }
}

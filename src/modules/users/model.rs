use serde::Deserialize;
use validator::Validate;

use registrar_core::serde::trim_string;
use registrar_models::{NewUser, UserRole, UserStatus};

fn default_needs_password_change() -> bool {
    true
}

/// An account request carrying the plaintext password.
#[derive(Clone, Deserialize, Validate)]
pub struct CreateUserDto {
    #[serde(deserialize_with = "trim_string")]
    #[validate(length(min = 1, message = "User id is required"))]
    pub id: String,
    #[serde(deserialize_with = "trim_string")]
    #[validate(email(message = "Not a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[serde(default = "default_needs_password_change")]
    pub needs_password_change: bool,
    pub role: UserRole,
    #[serde(default)]
    pub status: UserStatus,
}

impl std::fmt::Debug for CreateUserDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserDto")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("needs_password_change", &self.needs_password_change)
            .field("role", &self.role)
            .field("status", &self.status)
            .finish()
    }
}

impl From<CreateUserDto> for NewUser {
    fn from(dto: CreateUserDto) -> Self {
        Self {
            id: dto.id,
            email: dto.email,
            password: dto.password,
            needs_password_change: dto.needs_password_change,
            role: dto.role,
            status: dto.status,
        }
    }
}

#[derive(Clone, Deserialize, Validate)]
pub struct ChangePasswordDto {
    #[validate(length(min = 1, message = "Old password is required"))]
    pub old_password: String,
    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}

impl std::fmt::Debug for ChangePasswordDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangePasswordDto")
            .field("old_password", &"[REDACTED]")
            .field("new_password", &"[REDACTED]")
            .finish()
    }
}

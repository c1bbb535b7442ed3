//! User account entity.
//!
//! The password column is write-only from the caller's point of view: default
//! reads leave [`UserAccount::password`] empty and it is never serialized.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::enums::{UserRole, UserStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserAccount {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    #[sqlx(default)]
    pub password: String,
    pub needs_password_change: bool,
    pub password_changed_at: Option<DateTime<Utc>>,
    pub role: UserRole,
    pub status: UserStatus,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An account ready to be inserted. `password` must already be hashed.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub id: String,
    pub email: String,
    pub password: String,
    pub needs_password_change: bool,
    pub role: UserRole,
    pub status: UserStatus,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("needs_password_change", &self.needs_password_change)
            .field("role", &self.role)
            .field("status", &self.status)
            .finish()
    }
}

impl NewUser {
    /// Stamps both timestamps with `now`. The account starts undeleted.
    pub fn into_account(self, now: DateTime<Utc>) -> UserAccount {
        UserAccount {
            id: self.id,
            email: self.email,
            password: self.password,
            needs_password_change: self.needs_password_change,
            password_changed_at: None,
            role: self.role,
            status: self.status,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub password: Option<String>,
    pub needs_password_change: Option<bool>,
    pub password_changed_at: Option<DateTime<Utc>>,
    pub status: Option<UserStatus>,
    pub is_deleted: Option<bool>,
}

impl std::fmt::Debug for UserPatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserPatch")
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("needs_password_change", &self.needs_password_change)
            .field("password_changed_at", &self.password_changed_at)
            .field("status", &self.status)
            .field("is_deleted", &self.is_deleted)
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFilter {
    pub id: Option<String>,
    pub email: Option<String>,
    pub is_deleted: Option<bool>,
}

impl UserFilter {
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

    /// Restricts the filter to accounts that are not soft-deleted.
    pub fn live(mut self) -> Self {
        self.is_deleted = Some(false);
        self
    }

    pub fn matches(&self, user: &UserAccount) -> bool {
        self.id.as_deref().is_none_or(|id| id == user.id)
            && self.email.as_deref().is_none_or(|email| email == user.email)
            && self.is_deleted.is_none_or(|deleted| deleted == user.is_deleted)
    }
}

/// Whether a read brings back the password hash.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PasswordSelection {
    #[default]
    Excluded,
    Included,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> UserAccount {
        NewUser {
            id: "A-0001".to_string(),
            email: "admin@example.com".to_string(),
            password: "$2b$04$hash".to_string(),
            needs_password_change: true,
            role: UserRole::Admin,
            status: UserStatus::InProgress,
        }
        .into_account(Utc::now())
    }

    #[test]
    fn password_is_never_serialized() {
        let json = serde_json::to_value(account()).unwrap();

        assert!(json.get("password").is_none());
        assert_eq!(json["status"], "in-progress");
    }

    #[test]
    fn live_filter_skips_soft_deleted_accounts() {
        let mut user = account();
        user.is_deleted = true;

        assert!(UserFilter::by_id("A-0001").matches(&user));
        assert!(!UserFilter::by_id("A-0001").live().matches(&user));
    }

    #[test]
    fn debug_output_redacts_password() {
        let patch = UserPatch {
            password: Some("$2b$04$secret".to_string()),
            ..UserPatch::default()
        };

        assert!(!format!("{:?}", patch).contains("secret"));
    }
}

use chrono::Utc;
use tracing::{info, instrument, warn};
use validator::Validate;

use registrar_config::BcryptConfig;
use registrar_core::{AppError, AppResult, hash_password_async};
use registrar_models::{NewUser, PasswordSelection, UserAccount, UserFilter, UserPatch, UserStatus};

use super::guard::UserCredentialGuard;
use super::model::{ChangePasswordDto, CreateUserDto};
use crate::store::UserStore;

pub struct UserService;

impl UserService {
    #[instrument(skip(store, config))]
    pub async fn create_user<S>(
        store: &S,
        config: &BcryptConfig,
        dto: CreateUserDto,
    ) -> AppResult<UserAccount>
    where
        S: UserStore + ?Sized,
    {
        dto.validate()?;

        let candidate = UserCredentialGuard::before_create(store, config, NewUser::from(dto)).await?;
        let stored = store.create(candidate).await?;

        info!(user_id = %stored.id, role = %stored.role, "user created");
        Ok(UserCredentialGuard::after_create(stored))
    }

    #[instrument(skip(store))]
    pub async fn get_user<S>(store: &S, id: &str) -> AppResult<UserAccount>
    where
        S: UserStore + ?Sized,
    {
        store
            .find_one(&UserFilter::by_id(id).live(), PasswordSelection::Excluded)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Replaces the password after checking the current one, and clears the
    /// forced-change flag.
    #[instrument(skip(store, config))]
    pub async fn change_password<S>(
        store: &S,
        config: &BcryptConfig,
        id: &str,
        dto: ChangePasswordDto,
    ) -> AppResult<UserAccount>
    where
        S: UserStore + ?Sized,
    {
        dto.validate()?;

        let user = UserCredentialGuard::find_by_custom_id(store, id)
            .await?
            .filter(|user| !user.is_deleted)
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if !UserCredentialGuard::is_password_match(&dto.old_password, &user.password).await? {
            warn!(user_id = %id, "password change rejected: old password mismatch");
            return Err(AppError::validation(
                "old_password",
                serde_json::Value::Null,
                "Old password does not match",
            ));
        }

        let patch = UserPatch {
            password: Some(hash_password_async(dto.new_password, config.salt_rounds).await?),
            needs_password_change: Some(false),
            password_changed_at: Some(Utc::now()),
            ..UserPatch::default()
        };

        let updated = store
            .find_one_and_update(&UserFilter::by_id(id).live(), patch)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(user_id = %updated.id, "password changed");
        Ok(UserCredentialGuard::after_create(updated))
    }

    #[instrument(skip(store))]
    pub async fn set_status<S>(store: &S, id: &str, status: UserStatus) -> AppResult<UserAccount>
    where
        S: UserStore + ?Sized,
    {
        let patch = UserPatch {
            status: Some(status),
            ..UserPatch::default()
        };

        let updated = store
            .find_one_and_update(&UserFilter::by_id(id).live(), patch)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(user_id = %updated.id, status = %updated.status, "user status changed");
        Ok(UserCredentialGuard::after_create(updated))
    }

    #[instrument(skip(store))]
    pub async fn soft_delete<S>(store: &S, id: &str) -> AppResult<UserAccount>
    where
        S: UserStore + ?Sized,
    {
        let patch = UserPatch {
            is_deleted: Some(true),
            ..UserPatch::default()
        };

        let deleted = store
            .find_one_and_update(&UserFilter::by_id(id).live(), patch)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(user_id = %deleted.id, "user soft-deleted");
        Ok(UserCredentialGuard::after_create(deleted))
    }
}

use chrono::{DateTime, Utc};
use tracing::{debug, instrument, warn};

use registrar_config::BcryptConfig;
use registrar_core::{AppError, AppResult, hash_password_async, verify_password_async};
use registrar_models::{NewUser, PasswordSelection, UserAccount, UserFilter};

use crate::store::UserStore;

/// Credential handling around account writes and the lookups an
/// authentication flow needs.
///
/// The plaintext password never reaches the store: [`before_create`] swaps it
/// for a bcrypt hash, and [`after_create`] scrubs the hash from the record
/// handed back to the caller.
///
/// [`before_create`]: Self::before_create
/// [`after_create`]: Self::after_create
pub struct UserCredentialGuard;

impl UserCredentialGuard {
    /// Rejects a taken id or email, then hashes the password with the
    /// configured cost.
    #[instrument(skip(store, config, candidate), fields(user_id = %candidate.id))]
    pub async fn before_create<S>(
        store: &S,
        config: &BcryptConfig,
        mut candidate: NewUser,
    ) -> AppResult<NewUser>
    where
        S: UserStore + ?Sized,
    {
        for filter in [
            UserFilter::by_id(candidate.id.clone()),
            UserFilter::by_email(candidate.email.clone()),
        ] {
            if store
                .find_one(&filter, PasswordSelection::Excluded)
                .await?
                .is_some()
            {
                warn!(email = %candidate.email, "rejecting duplicate user");
                return Err(AppError::duplicate("A user with this id or email already exists"));
            }
        }

        let plaintext = std::mem::take(&mut candidate.password);
        candidate.password = hash_password_async(plaintext, config.salt_rounds).await?;
        debug!(cost = config.salt_rounds, "password hashed");

        Ok(candidate)
    }

    /// The stored hash is untouched; only the returned copy is scrubbed.
    pub fn after_create(mut stored: UserAccount) -> UserAccount {
        stored.password.clear();
        stored
    }

    /// Looks an account up by id with its password hash included.
    ///
    /// Soft-deleted accounts are returned too; callers decide what deletion
    /// means for them.
    #[instrument(skip(store))]
    pub async fn find_by_custom_id<S>(store: &S, id: &str) -> AppResult<Option<UserAccount>>
    where
        S: UserStore + ?Sized,
    {
        store
            .find_one(&UserFilter::by_id(id), PasswordSelection::Included)
            .await
    }

    pub async fn is_password_match(plain_text: &str, hashed: &str) -> AppResult<bool> {
        verify_password_async(plain_text.to_string(), hashed.to_string()).await
    }

    /// True when the password changed after the token was issued, making the
    /// token stale. Sub-second precision of the change time is kept.
    pub fn is_issued_before_password_change(
        password_changed_at: DateTime<Utc>,
        issued_at: i64,
    ) -> bool {
        password_changed_at.timestamp_millis() > issued_at.saturating_mul(1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryUserStore;
    use chrono::TimeZone;
    use registrar_models::{UserRole, UserStatus};

    fn candidate(id: &str, email: &str) -> NewUser {
        NewUser {
            id: id.to_string(),
            email: email.to_string(),
            password: "correct horse".to_string(),
            needs_password_change: true,
            role: UserRole::Student,
            status: UserStatus::InProgress,
        }
    }

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn before_create_replaces_plaintext_with_hash() {
        let store = MemoryUserStore::new();

        let hashed = UserCredentialGuard::before_create(
            &store,
            &BcryptConfig::new(4),
            candidate("S-1", "s1@example.com"),
        )
        .await
        .unwrap();

        assert_ne!(hashed.password, "correct horse");
        assert!(
            UserCredentialGuard::is_password_match("correct horse", &hashed.password)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn before_create_rejects_taken_email() {
        let store = MemoryUserStore::new();
        store.create(candidate("S-1", "s1@example.com")).await.unwrap();

        let result = UserCredentialGuard::before_create(
            &store,
            &BcryptConfig::new(4),
            candidate("S-2", "s1@example.com"),
        )
        .await;

        assert!(matches!(result, Err(AppError::DuplicateRecord(_))));
    }

    #[test]
    fn after_create_clears_password() {
        let account = candidate("S-1", "s1@example.com").into_account(Utc::now());

        assert_eq!(UserCredentialGuard::after_create(account).password, "");
    }

    #[tokio::test]
    async fn find_by_custom_id_includes_password() {
        let store = MemoryUserStore::new();
        store.create(candidate("S-1", "s1@example.com")).await.unwrap();

        let found = UserCredentialGuard::find_by_custom_id(&store, "S-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.password, "correct horse");

        assert!(
            UserCredentialGuard::find_by_custom_id(&store, "S-9")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn corrupt_stored_hash_does_not_match() {
        for hashed in ["not-a-bcrypt-hash", ""] {
            let matched = UserCredentialGuard::is_password_match("secret", hashed).await;

            assert!(matches!(matched, Ok(false)));
        }
    }

    #[test]
    fn token_issued_before_change_is_stale() {
        assert!(UserCredentialGuard::is_issued_before_password_change(
            at(2),
            at(1).timestamp()
        ));
        assert!(!UserCredentialGuard::is_issued_before_password_change(
            at(2),
            at(3).timestamp()
        ));
    }

    #[test]
    fn token_issued_in_the_same_second_is_stale_only_past_the_second() {
        let issued = at(2).timestamp();

        assert!(!UserCredentialGuard::is_issued_before_password_change(at(2), issued));
        assert!(UserCredentialGuard::is_issued_before_password_change(
            at(2) + chrono::Duration::milliseconds(1),
            issued
        ));
    }
}

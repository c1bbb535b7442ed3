use registrar::registrar_core::{
    AppError, hash_password, hash_password_async, verify_password, verify_password_async,
};

const COST: u32 = 4;

#[test]
fn test_hash_password_success() {
    let password = "testpassword123";
    let result = hash_password(password, COST);

    assert!(result.is_ok());
    let hash = result.unwrap();
    assert!(!hash.is_empty());
    assert_ne!(hash, password);
}

#[test]
fn test_hash_records_cost_factor() {
    let hash = hash_password("testpassword", COST).unwrap();

    assert!(hash.starts_with("$2b$04$"));
}

#[test]
fn test_verify_password_correct() {
    let password = "correctpassword";
    let hash = hash_password(password, COST).unwrap();

    let result = verify_password(password, &hash);

    assert!(result.is_ok());
    assert!(result.unwrap());
}

#[test]
fn test_verify_password_incorrect() {
    let hash = hash_password("correctpassword", COST).unwrap();

    let result = verify_password("wrongpassword", &hash);

    assert!(result.is_ok());
    assert!(!result.unwrap());
}

#[test]
fn test_verify_password_invalid_hash() {
    let result = verify_password("testpassword", "not_a_valid_bcrypt_hash");

    assert!(matches!(result, Ok(false)));
    assert!(matches!(verify_password("testpassword", ""), Ok(false)));
}

#[test]
fn test_hash_rejects_cost_below_minimum() {
    let result = hash_password("testpassword", 3);

    assert!(matches!(result, Err(AppError::HashingFailure(_))));
}

#[test]
fn test_hash_generates_unique_hashes() {
    let password = "samepassword";
    let hash1 = hash_password(password, COST).unwrap();
    let hash2 = hash_password(password, COST).unwrap();

    assert_ne!(hash1, hash2);
    assert!(verify_password(password, &hash1).unwrap());
    assert!(verify_password(password, &hash2).unwrap());
}

#[test]
fn test_hash_special_and_unicode_characters() {
    for password in ["p@ssw0rd!#$%^&*()", "пароль密码🔒"] {
        let hash = hash_password(password, COST).unwrap();

        assert!(verify_password(password, &hash).unwrap());
    }
}

#[tokio::test]
async fn test_async_variants_agree_with_sync() {
    let hash = hash_password_async("asyncpassword".to_string(), COST)
        .await
        .unwrap();

    assert!(verify_password("asyncpassword", &hash).unwrap());
    assert!(
        verify_password_async("asyncpassword".to_string(), hash)
            .await
            .unwrap()
    );
}

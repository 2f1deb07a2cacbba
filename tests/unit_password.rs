use learnhub::utils::password::{hash_password, verify_password};

#[test]
fn test_hash_password_not_plaintext() {
    let password = "password123";
    let hash = hash_password(password).unwrap();

    assert_ne!(hash, password);
    assert!(hash.starts_with("$2"));
}

#[test]
fn test_verify_password_correct() {
    let password = "password123";
    let hash = hash_password(password).unwrap();

    assert!(verify_password(password, &hash).unwrap());
}

#[test]
fn test_verify_password_incorrect() {
    let hash = hash_password("password123").unwrap();

    assert!(!verify_password("wrongpassword", &hash).unwrap());
}

#[test]
fn test_hashes_are_salted() {
    let first = hash_password("password123").unwrap();
    let second = hash_password("password123").unwrap();

    assert_ne!(first, second);
    assert!(verify_password("password123", &first).unwrap());
    assert!(verify_password("password123", &second).unwrap());
}

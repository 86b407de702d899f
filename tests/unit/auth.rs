// Validation and session-token tests that need no database

use roadmap_backend::db::models::auth::{LoginRequest, RegisterRequest};
use roadmap_backend::middleware::auth::{generate_token, hash_token};
use validator::Validate;

fn register(username: &str, email: &str, password: &str, confirm: &str) -> RegisterRequest {
    RegisterRequest {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        password_confirm: confirm.to_string(),
    }
}

#[test]
fn validate_register_inputs() {
    assert!(
        register("john_doe", "john@example.com", "StrongP4ss!", "StrongP4ss!")
            .validate()
            .is_ok()
    );

    // bad username shapes
    assert!(
        register("1john", "john@example.com", "StrongP4ss!", "StrongP4ss!")
            .validate()
            .is_err()
    );
    assert!(
        register("john doe", "john@example.com", "StrongP4ss!", "StrongP4ss!")
            .validate()
            .is_err()
    );

    // bad email
    assert!(
        register("john", "not-an-email", "StrongP4ss!", "StrongP4ss!")
            .validate()
            .is_err()
    );

    // short password
    assert!(
        register("john", "john@example.com", "short", "short")
            .validate()
            .is_err()
    );

    // mismatched confirmation
    assert!(
        register("john", "john@example.com", "StrongP4ss!", "Different1!")
            .validate()
            .is_err()
    );
}

#[test]
fn validate_login_inputs() {
    let ok = LoginRequest {
        email: "john@example.com".to_string(),
        password: "x".to_string(),
    };
    assert!(ok.validate().is_ok());

    let no_email = LoginRequest {
        email: String::new(),
        password: "x".to_string(),
    };
    assert!(no_email.validate().is_err());

    let no_password = LoginRequest {
        email: "john@example.com".to_string(),
        password: String::new(),
    };
    assert!(no_password.validate().is_err());
}

#[test]
fn session_tokens_are_random_and_hash_deterministically() {
    let a = generate_token();
    let b = generate_token();
    assert_eq!(a.len(), 64);
    assert_ne!(a, b);

    assert_eq!(hash_token(&a), hash_token(&a));
    assert_ne!(hash_token(&a), hash_token(&b));
    // the stored digest never equals the cookie value
    assert_ne!(hash_token(&a), a);
}

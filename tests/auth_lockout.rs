//! Lockout state machine walk-through for slotbook.
//!
//! Drives the authentication guard through the documented lockout scenario
//! with an explicit clock, end to end against a real database.

use chrono::{NaiveDate, NaiveDateTime};

use slotbook::db::seed;
use slotbook::{AuthError, AuthService, Database};

async fn setup() -> Database {
    let db = Database::open_in_memory().await.unwrap();
    seed::seed_defaults(&db).await.unwrap();
    db
}

fn at(minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 1, 25)
        .unwrap()
        .and_hms_opt(12, minute, 0)
        .unwrap()
}

#[tokio::test]
async fn test_five_failures_lock_then_expiry_admits() {
    let db = setup().await;
    let auth = AuthService::new(&db);

    // Five consecutive wrong passwords
    for i in 0..5u32 {
        let err = auth
            .authenticate_at("admin", "wrong", at(i))
            .await
            .unwrap_err();
        match err {
            AuthError::InvalidCredentials { attempts_remaining } => {
                assert_eq!(attempts_remaining, Some(4 - i as i64));
            }
            other => panic!("expected InvalidCredentials, got {other:?}"),
        }
    }

    // A sixth attempt within the window is rejected even with the correct
    // password
    let err = auth
        .authenticate_at("admin", "admin", at(6))
        .await
        .unwrap_err();
    match err {
        AuthError::AccountLocked { minutes_remaining } => {
            assert!(minutes_remaining >= 1);
        }
        other => panic!("expected AccountLocked, got {other:?}"),
    }

    // After the lockout window elapses, the correct password succeeds and
    // the counter resets
    let account = auth.authenticate_at("admin", "admin", at(10)).await.unwrap();
    assert_eq!(account.failed_attempts, 0);
    assert!(account.locked_until.is_none());
}

#[tokio::test]
async fn test_unlock_then_correct_password_succeeds() {
    let db = setup().await;
    let auth = AuthService::new(&db);

    for i in 0..5u32 {
        let _ = auth.authenticate_at("admin", "wrong", at(i)).await;
    }

    // Still inside the lockout window
    assert!(matches!(
        auth.authenticate_at("admin", "admin", at(5)).await,
        Err(AuthError::AccountLocked { .. })
    ));

    assert!(auth.unlock("admin").await.unwrap());

    let account = auth.authenticate_at("admin", "admin", at(5)).await.unwrap();
    assert_eq!(account.failed_attempts, 0);
}

#[tokio::test]
async fn test_forced_password_change_flow() {
    let db = setup().await;
    let auth = AuthService::new(&db);

    // The seeded admin must change its password
    let account = auth.authenticate_at("admin", "admin", at(0)).await.unwrap();
    assert!(account.must_change_password);

    // Short replacement is rejected, proper one accepted
    assert!(matches!(
        auth.change_password(account.id, "short").await,
        Err(AuthError::WeakPassword)
    ));
    auth.change_password(account.id, "longer-password")
        .await
        .unwrap();

    let account = auth
        .authenticate_at("admin", "longer-password", at(1))
        .await
        .unwrap();
    assert!(!account.must_change_password);

    // The default credential is dead
    assert!(auth.authenticate_at("admin", "admin", at(2)).await.is_err());
}

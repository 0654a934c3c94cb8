//! Sign-up, email confirmation, password reset and credential maintenance.

mod common;

use std::time::Duration;

use assert_matches::assert_matches;
use common::*;
use faker_core::directory::UserDirectory;
use faker_core::error::CoreError;
use faker_core::notify::subjects;
use faker_core::user::Role;

// ---------------------------------------------------------------------------
// Sign-up and confirmation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_sign_up_creates_unconfirmed_basic_user_and_emails_code() {
    let h = harness();
    let user = h
        .coordinator
        .sign_up(sign_up_input("ada@example.com"))
        .await
        .unwrap();

    assert!(!user.is_confirmed);
    assert_eq!(user.role, Role::Basic);
    assert_eq!(user.plan_id, 1);
    assert!(!user.external_credential.is_empty());
    assert_ne!(user.password_hash, PASSWORD);

    let mail = h.notifier.last_to("ada@example.com").unwrap();
    assert_eq!(mail.subject, subjects::CONFIRM_EMAIL);
    assert!(mail.body.contains("Hello, Ada Lovelace!"));
    assert!(mail.body.contains("10 minutes"));
    assert_eq!(last_code_sent_to(&h, "ada@example.com").len(), 8);
}

#[tokio::test]
async fn test_sign_up_rejects_duplicate_email() {
    let h = harness();
    h.coordinator
        .sign_up(sign_up_input("ada@example.com"))
        .await
        .unwrap();

    assert_matches!(
        h.coordinator.sign_up(sign_up_input("ada@example.com")).await,
        Err(CoreError::AlreadyExists(_))
    );
}

#[tokio::test]
async fn test_sign_up_rejects_weak_password() {
    let h = harness();
    let mut input = sign_up_input("ada@example.com");
    input.password = "short".to_string();

    assert_matches!(h.coordinator.sign_up(input).await, Err(CoreError::Validation(_)));
    assert!(h.notifier.sent().is_empty());
}

#[tokio::test]
async fn test_confirm_email_checks_the_code() {
    let h = harness();
    h.coordinator
        .sign_up(sign_up_input("ada@example.com"))
        .await
        .unwrap();
    let code = last_code_sent_to(&h, "ada@example.com");
    let wrong = if code == "00000000" { "11111111" } else { "00000000" };

    assert_matches!(
        h.coordinator.confirm_user_email("ada@example.com", wrong).await,
        Err(CoreError::InvalidCode)
    );

    h.coordinator
        .confirm_user_email("ada@example.com", &code)
        .await
        .unwrap();
    assert!(h.directory.get_by_email("ada@example.com").await.unwrap().is_confirmed);

    // The code is spent.
    assert_matches!(
        h.coordinator.confirm_user_email("ada@example.com", &code).await,
        Err(CoreError::ExpiredCode)
    );
}

#[tokio::test(start_paused = true)]
async fn test_confirmation_code_expires() {
    let h = harness();
    h.coordinator
        .sign_up(sign_up_input("ada@example.com"))
        .await
        .unwrap();
    let code = last_code_sent_to(&h, "ada@example.com");

    tokio::time::advance(CODE_TTL).await;

    assert_matches!(
        h.coordinator.confirm_user_email("ada@example.com", &code).await,
        Err(CoreError::ExpiredCode)
    );
}

// ---------------------------------------------------------------------------
// Password reset
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_password_reset_requires_verification() {
    let h = harness();
    confirmed_user(&h, "ada@example.com").await;

    assert_matches!(
        h.coordinator
            .password_reset("ada@example.com", "brand-new-password")
            .await,
        Err(CoreError::ExpiredCode)
    );

    h.coordinator
        .password_reset_request("ada@example.com")
        .await
        .unwrap();
    let mail = h.notifier.last_to("ada@example.com").unwrap();
    assert_eq!(mail.subject, subjects::PASSWORD_RESET);

    // Requested but not yet verified.
    assert_matches!(
        h.coordinator
            .password_reset("ada@example.com", "brand-new-password")
            .await,
        Err(CoreError::UnverifiedPasswordReset)
    );
}

#[tokio::test]
async fn test_full_password_reset() {
    let h = harness();
    confirmed_user(&h, "ada@example.com").await;

    h.coordinator
        .password_reset_request("ada@example.com")
        .await
        .unwrap();
    let code = last_code_sent_to(&h, "ada@example.com");
    let wrong = if code == "00000000" { "11111111" } else { "00000000" };

    assert_matches!(
        h.coordinator
            .verify_password_reset("ada@example.com", wrong)
            .await,
        Err(CoreError::InvalidCode)
    );
    h.coordinator
        .verify_password_reset("ada@example.com", &code)
        .await
        .unwrap();
    h.coordinator
        .password_reset("ada@example.com", "brand-new-password")
        .await
        .unwrap();

    assert_matches!(
        h.coordinator
            .sign_in(sign_in_input("ada@example.com", PASSWORD))
            .await,
        Err(CoreError::InvalidCredentials)
    );
    h.coordinator
        .sign_in(sign_in_input("ada@example.com", "brand-new-password"))
        .await
        .unwrap();

    // The verification cannot be replayed.
    assert_matches!(
        h.coordinator
            .password_reset("ada@example.com", "another-password")
            .await,
        Err(CoreError::ExpiredCode)
    );
}

#[tokio::test(start_paused = true)]
async fn test_verified_reset_expires() {
    let h = harness();
    confirmed_user(&h, "ada@example.com").await;
    h.coordinator
        .password_reset_request("ada@example.com")
        .await
        .unwrap();
    let code = last_code_sent_to(&h, "ada@example.com");
    h.coordinator
        .verify_password_reset("ada@example.com", &code)
        .await
        .unwrap();

    tokio::time::advance(CODE_TTL + Duration::from_secs(1)).await;

    assert_matches!(
        h.coordinator
            .password_reset("ada@example.com", "brand-new-password")
            .await,
        Err(CoreError::ExpiredCode)
    );
}

#[tokio::test]
async fn test_password_reset_request_for_unknown_email() {
    let h = harness();
    assert_matches!(
        h.coordinator.password_reset_request("nobody@example.com").await,
        Err(CoreError::NotFound { .. })
    );
    assert!(h.notifier.sent().is_empty());
}

// ---------------------------------------------------------------------------
// Password change and external credential
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_change_password() {
    let h = harness();
    let user = confirmed_user(&h, "ada@example.com").await;

    assert_matches!(
        h.coordinator
            .change_password(user.id, "not-my-password", "brand-new-password")
            .await,
        Err(CoreError::InvalidCurrentPassword)
    );

    h.coordinator
        .change_password(user.id, PASSWORD, "brand-new-password")
        .await
        .unwrap();
    h.coordinator
        .sign_in(sign_in_input("ada@example.com", "brand-new-password"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_regenerate_external_credential() {
    let h = harness();
    let user = confirmed_user(&h, "ada@example.com").await;
    let old = user.external_credential.clone();

    let updated = h
        .coordinator
        .regenerate_external_credential(user.id)
        .await
        .unwrap();
    assert_ne!(updated.external_credential, old);

    assert_matches!(
        h.coordinator.validate_external_token(&old).await,
        Err(CoreError::InvalidToken)
    );
    assert_eq!(
        h.coordinator
            .validate_external_token(&updated.external_credential)
            .await
            .unwrap(),
        user.id
    );
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_update_profile_changes_only_given_names() {
    let h = harness();
    let user = confirmed_user(&h, "ada@example.com").await;

    let updated = h
        .coordinator
        .update_profile(user.id, Some("  Augusta ".to_string()), None)
        .await
        .unwrap();
    assert_eq!(updated.first_name, "Augusta");
    assert_eq!(updated.last_name, user.last_name);

    let stored = h.directory.get_by_id(user.id).await.unwrap();
    assert_eq!(stored.first_name, "Augusta");
    assert_eq!(stored.email, user.email);
    assert_eq!(stored.password_hash, user.password_hash);
}

#[tokio::test]
async fn test_update_profile_rejects_blank_names() {
    let h = harness();
    let user = confirmed_user(&h, "ada@example.com").await;

    assert_matches!(
        h.coordinator
            .update_profile(user.id, None, Some("   ".to_string()))
            .await,
        Err(CoreError::Validation(_))
    );
    assert_eq!(
        h.directory.get_by_id(user.id).await.unwrap().last_name,
        user.last_name
    );
}

#[tokio::test]
async fn test_set_receive_notification() {
    let h = harness();
    let user = confirmed_user(&h, "ada@example.com").await;
    assert!(user.receive_notification);

    let updated = h
        .coordinator
        .set_receive_notification(user.id, false)
        .await
        .unwrap();
    assert!(!updated.receive_notification);
    assert!(!h.directory.get_by_id(user.id).await.unwrap().receive_notification);

    assert_matches!(
        h.coordinator.set_receive_notification(9999, true).await,
        Err(CoreError::NotFound { entity: "User" })
    );
}

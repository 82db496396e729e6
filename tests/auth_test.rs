mod common;

use gymkeeper::{auth::AuthService, domain::UserRole, error::AppError};

use common::setup;

#[tokio::test]
async fn register_login_validate_logout() -> anyhow::Result<()> {
    let ctx = setup().await?;
    let auth = &ctx.auth_service;

    let user = auth
        .register("front-desk@example.com", "hunter2hunter2", UserRole::Admin)
        .await?;
    assert_eq!(user.email, "front-desk@example.com");
    assert_eq!(user.role, UserRole::Admin);

    let (signed_in, token) = auth
        .login("front-desk@example.com", "hunter2hunter2")
        .await?;
    assert_eq!(signed_in.id, user.id);

    let validated = auth
        .validate_session(&token)
        .await?
        .expect("session should be valid");
    assert_eq!(validated.id, user.id);

    auth.logout(&token).await?;
    assert!(auth.validate_session(&token).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() -> anyhow::Result<()> {
    let ctx = setup().await?;
    let auth = &ctx.auth_service;

    auth.register("front-desk@example.com", "hunter2hunter2", UserRole::Trainer)
        .await?;
    let result = auth
        .register("front-desk@example.com", "different-pass", UserRole::Trainer)
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    Ok(())
}

#[tokio::test]
async fn wrong_password_and_unknown_email_are_unauthorized() -> anyhow::Result<()> {
    let ctx = setup().await?;
    let auth = &ctx.auth_service;

    auth.register("front-desk@example.com", "hunter2hunter2", UserRole::Trainer)
        .await?;

    let wrong = auth.login("front-desk@example.com", "wrong").await;
    assert!(matches!(wrong, Err(AppError::Unauthorized)));

    let unknown = auth.login("nobody@example.com", "hunter2hunter2").await;
    assert!(matches!(unknown, Err(AppError::Unauthorized)));

    Ok(())
}

#[tokio::test]
async fn password_hashing_round_trip() -> anyhow::Result<()> {
    let hash = AuthService::hash_password("my_secure_password")?;

    assert!(AuthService::verify_password("my_secure_password", &hash)?);
    assert!(!AuthService::verify_password("wrong_password", &hash)?);

    Ok(())
}

#[tokio::test]
async fn garbage_session_token_is_rejected() -> anyhow::Result<()> {
    let ctx = setup().await?;

    assert!(ctx
        .auth_service
        .validate_session("not-a-real-token")
        .await?
        .is_none());

    Ok(())
}

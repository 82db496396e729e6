mod common;

use chrono::Duration;
use gymkeeper::{
    domain::{MemberContactUpdate, NewMember},
    error::AppError,
};
use uuid::Uuid;

use common::{date, seed_member, seed_package, setup};

#[tokio::test]
async fn member_crud_round_trip() -> anyhow::Result<()> {
    let ctx = setup().await?;
    let package = seed_package(&ctx, 30).await?;

    let member = seed_member(&ctx, &package, "GM12345", date(2024, 3, 1)).await?;
    assert_eq!(member.member_code, "GM12345");
    assert_eq!(member.name, "Jordan Blake");
    assert_eq!(member.package_id, package.id);
    assert_eq!(member.package_name, package.name);
    assert_eq!(member.start_date, date(2024, 3, 1));
    // 30-day package starting March 1 expires March 31
    assert_eq!(member.expiry_date, date(2024, 3, 31));

    // Fetch returns the record field-for-field
    let found = ctx
        .member_repo
        .find_by_id(member.id)
        .await?
        .expect("member should exist");
    assert_eq!(found.id, member.id);
    assert_eq!(found.name, member.name);
    assert_eq!(found.email, member.email);
    assert_eq!(found.start_date, member.start_date);
    assert_eq!(found.expiry_date, member.expiry_date);
    assert_eq!(found.created_at, member.created_at);

    // Contact update touches contact fields only
    let updated = ctx
        .member_repo
        .update_contact(
            member.id,
            MemberContactUpdate {
                phone: Some("555-0199".to_string()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(updated.phone, "555-0199");
    assert_eq!(updated.name, member.name);
    assert_eq!(updated.expiry_date, member.expiry_date);

    // Delete, then the record is absent; deleting again does not fail
    ctx.member_repo.delete(member.id).await?;
    assert!(ctx.member_repo.find_by_id(member.id).await?.is_none());
    ctx.member_repo.delete(member.id).await?;

    Ok(())
}

#[tokio::test]
async fn enroll_rejects_dangling_package() -> anyhow::Result<()> {
    let ctx = setup().await?;

    let result = ctx
        .member_service
        .enroll(NewMember {
            member_code: None,
            name: "Casey Fox".to_string(),
            email: "casey@example.com".to_string(),
            phone: String::new(),
            address: String::new(),
            package_id: Uuid::new_v4(),
            start_date: date(2024, 3, 1),
            notes: None,
        })
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn enroll_generates_member_code_when_blank() -> anyhow::Result<()> {
    let ctx = setup().await?;
    let package = seed_package(&ctx, 30).await?;

    let member = ctx
        .member_service
        .enroll(NewMember {
            member_code: None,
            name: "Casey Fox".to_string(),
            email: "casey@example.com".to_string(),
            phone: String::new(),
            address: String::new(),
            package_id: package.id,
            start_date: date(2024, 3, 1),
            notes: None,
        })
        .await?;

    assert!(member.member_code.starts_with("GM"));
    assert!(member.member_code.len() > 2);
    Ok(())
}

#[tokio::test]
async fn find_by_code_absent_unique_and_ambiguous() -> anyhow::Result<()> {
    let ctx = setup().await?;
    let package = seed_package(&ctx, 30).await?;

    // Zero matches: absent, not an error
    assert!(ctx.member_repo.find_by_code("GM99999").await?.is_none());

    // Exactly one match
    let member = seed_member(&ctx, &package, "GM12345", date(2024, 3, 1)).await?;
    let found = ctx
        .member_repo
        .find_by_code("GM12345")
        .await?
        .expect("member should be found");
    assert_eq!(found.id, member.id);

    // Duplicate codes are a conflict, never first-match-wins
    seed_member(&ctx, &package, "GM12345", date(2024, 4, 1)).await?;
    let result = ctx.member_repo.find_by_code("GM12345").await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

#[tokio::test]
async fn renew_moves_membership_window() -> anyhow::Result<()> {
    let ctx = setup().await?;
    let monthly = seed_package(&ctx, 30).await?;
    let annual = seed_package(&ctx, 365).await?;

    let member = seed_member(&ctx, &monthly, "GM10001", date(2024, 1, 1)).await?;

    let renewed = ctx
        .member_service
        .renew(member.id, annual.id, date(2024, 3, 1))
        .await?;

    assert_eq!(renewed.package_id, annual.id);
    assert_eq!(renewed.package_name, annual.name);
    assert_eq!(renewed.start_date, date(2024, 3, 1));
    assert_eq!(renewed.expiry_date, date(2024, 3, 1) + Duration::days(365));

    Ok(())
}

#[tokio::test]
async fn renew_with_dangling_package_leaves_member_unchanged() -> anyhow::Result<()> {
    let ctx = setup().await?;
    let package = seed_package(&ctx, 30).await?;
    let member = seed_member(&ctx, &package, "GM10002", date(2024, 1, 1)).await?;

    let result = ctx
        .member_service
        .renew(member.id, Uuid::new_v4(), date(2024, 3, 1))
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let unchanged = ctx
        .member_repo
        .find_by_id(member.id)
        .await?
        .expect("member should exist");
    assert_eq!(unchanged.package_id, package.id);
    assert_eq!(unchanged.start_date, member.start_date);
    assert_eq!(unchanged.expiry_date, member.expiry_date);

    Ok(())
}

#[tokio::test]
async fn update_contact_on_missing_member_is_not_found() -> anyhow::Result<()> {
    let ctx = setup().await?;

    let result = ctx
        .member_repo
        .update_contact(Uuid::new_v4(), MemberContactUpdate::default())
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn expiring_window_excludes_expired_and_far_future() -> anyhow::Result<()> {
    let ctx = setup().await?;
    let monthly = seed_package(&ctx, 30).await?;

    let now = date(2024, 6, 15);

    // Expired two weeks before `now`
    seed_member(&ctx, &monthly, "GM20001", now - Duration::days(45)).await?;
    // Expires five days after `now`
    let expiring = seed_member(&ctx, &monthly, "GM20002", now - Duration::days(25)).await?;
    // Expires well past the window
    seed_member(&ctx, &monthly, "GM20003", now).await?;

    let window = ctx.member_repo.list_expiring_within(now, 10).await?;
    assert_eq!(window.len(), 1);
    assert_eq!(window[0].id, expiring.id);

    for member in &window {
        assert!(member.expiry_date > now);
        assert!(member.expiry_date <= now + Duration::days(10));
    }

    Ok(())
}

mod common;

use chrono::{Duration, Utc};
use gymkeeper::{
    domain::{CheckIn, CheckInMethod},
    error::AppError,
};
use uuid::Uuid;

use common::{date, seed_member, seed_package, setup};

fn check_in_for(member_id: Uuid) -> CheckIn {
    CheckIn {
        member_id,
        member_name: None,
        member_code: None,
        class_id: None,
        date: None,
        check_in_method: CheckInMethod::Qr,
        notes: None,
    }
}

#[tokio::test]
async fn check_in_backfills_member_name_and_code() -> anyhow::Result<()> {
    let ctx = setup().await?;
    let package = seed_package(&ctx, 30).await?;
    let member = seed_member(&ctx, &package, "GM12345", date(2024, 3, 1)).await?;

    let record = ctx
        .attendance_service
        .check_in(check_in_for(member.id))
        .await?;

    assert_eq!(record.member_id, member.id);
    assert_eq!(record.member_name.as_deref(), Some("Jordan Blake"));
    assert_eq!(record.member_code.as_deref(), Some("GM12345"));
    assert_eq!(record.check_in_method, CheckInMethod::Qr);
    assert!(record.check_out_time.is_none());

    Ok(())
}

#[tokio::test]
async fn check_in_proceeds_when_member_lookup_comes_back_empty() -> anyhow::Result<()> {
    let ctx = setup().await?;

    // No such member: the enrichment step finds nothing, but the check-in
    // is still recorded with the display fields left empty.
    let record = ctx
        .attendance_service
        .check_in(check_in_for(Uuid::new_v4()))
        .await?;

    assert!(record.member_name.is_none());
    assert!(record.member_code.is_none());
    assert_eq!(record.check_in_method, CheckInMethod::Qr);

    Ok(())
}

#[tokio::test]
async fn check_in_keeps_caller_supplied_display_fields() -> anyhow::Result<()> {
    let ctx = setup().await?;
    let package = seed_package(&ctx, 30).await?;
    let member = seed_member(&ctx, &package, "GM12345", date(2024, 3, 1)).await?;

    let mut check_in = check_in_for(member.id);
    check_in.member_name = Some("Walk-in alias".to_string());
    check_in.member_code = Some("GM00000".to_string());
    check_in.check_in_method = CheckInMethod::Manual;

    let record = ctx.attendance_service.check_in(check_in).await?;
    assert_eq!(record.member_name.as_deref(), Some("Walk-in alias"));
    assert_eq!(record.member_code.as_deref(), Some("GM00000"));
    assert_eq!(record.check_in_method, CheckInMethod::Manual);

    Ok(())
}

#[tokio::test]
async fn check_out_completes_the_record_once() -> anyhow::Result<()> {
    let ctx = setup().await?;
    let package = seed_package(&ctx, 30).await?;
    let member = seed_member(&ctx, &package, "GM12345", date(2024, 3, 1)).await?;

    let record = ctx
        .attendance_service
        .check_in(check_in_for(member.id))
        .await?;

    let completed = ctx.attendance_service.check_out(record.id).await?;
    assert!(completed.check_out_time.is_some());

    let missing = ctx.attendance_service.check_out(Uuid::new_v4()).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    Ok(())
}

#[tokio::test]
async fn daily_listing_buckets_by_calendar_day() -> anyhow::Result<()> {
    let ctx = setup().await?;
    let package = seed_package(&ctx, 30).await?;
    let member = seed_member(&ctx, &package, "GM12345", date(2024, 3, 1)).await?;

    let mut yesterday = check_in_for(member.id);
    yesterday.date = Some(Utc::now() - Duration::days(1));
    ctx.attendance_service.check_in(yesterday).await?;

    let today = ctx
        .attendance_service
        .check_in(check_in_for(member.id))
        .await?;

    let listed = ctx.attendance_repo.list_for_day(Utc::now()).await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, today.id);

    let history = ctx.attendance_repo.list_by_member(member.id).await?;
    assert_eq!(history.len(), 2);

    Ok(())
}

#[tokio::test]
async fn history_survives_member_deletion() -> anyhow::Result<()> {
    let ctx = setup().await?;
    let package = seed_package(&ctx, 30).await?;
    let member = seed_member(&ctx, &package, "GM12345", date(2024, 3, 1)).await?;

    ctx.attendance_service
        .check_in(check_in_for(member.id))
        .await?;

    ctx.member_service.delete(member.id).await?;

    let history = ctx.attendance_repo.list_by_member(member.id).await?;
    assert_eq!(history.len(), 1);

    Ok(())
}

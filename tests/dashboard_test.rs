mod common;

use chrono::{Duration, Utc};
use gymkeeper::domain::{
    AvailabilitySlot, MembershipStatus, NewClass, NewTrainer, TrainerUpdate,
};

use common::{seed_member, seed_package, setup};

#[tokio::test]
async fn summary_counts_each_collection_independently() -> anyhow::Result<()> {
    let ctx = setup().await?;
    let now = Utc::now();
    let monthly = seed_package(&ctx, 30).await?;

    // One current membership, one expired
    seed_member(&ctx, &monthly, "GM30001", now - Duration::days(5)).await?;
    seed_member(&ctx, &monthly, "GM30002", now - Duration::days(60)).await?;

    // One active trainer, one deactivated
    let active = ctx
        .trainer_repo
        .create(trainer("Sara Lindqvist", "sara@example.com"))
        .await?;
    let inactive = ctx
        .trainer_repo
        .create(trainer("Marco Reyes", "marco@example.com"))
        .await?;
    ctx.trainer_repo
        .update(
            inactive.id,
            TrainerUpdate {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await?;

    // One upcoming class, one past
    let mut upcoming = class(active.id);
    upcoming.date = now + Duration::days(2);
    ctx.class_service.create(upcoming).await?;
    let mut past = class(active.id);
    past.date = now - Duration::days(2);
    ctx.class_service.create(past).await?;

    let summary = ctx.dashboard_service.summary(now).await?;
    assert_eq!(summary.total_members, 2);
    assert_eq!(summary.active_members, 1);
    assert_eq!(summary.upcoming_classes, 1);
    assert_eq!(summary.active_trainers, 1);

    Ok(())
}

#[tokio::test]
async fn expiring_memberships_are_tagged_and_bounded() -> anyhow::Result<()> {
    let ctx = setup().await?;
    let now = Utc::now();
    let monthly = seed_package(&ctx, 30).await?;

    // Expires in 3 days: inside the default 30-day horizon and the 7-day
    // expiring-soon window
    seed_member(&ctx, &monthly, "GM30010", now - Duration::days(27)).await?;
    // Expires in 20 days: inside the horizon, outside the window
    seed_member(&ctx, &monthly, "GM30011", now - Duration::days(10)).await?;
    // Already expired: never listed
    seed_member(&ctx, &monthly, "GM30012", now - Duration::days(90)).await?;

    let expiring = ctx.dashboard_service.expiring_memberships(now, None).await?;
    assert_eq!(expiring.len(), 2);

    // Ordered soonest-first
    assert_eq!(expiring[0].member.member_code, "GM30010");
    assert_eq!(expiring[0].status, MembershipStatus::ExpiringSoon);
    assert_eq!(expiring[1].member.member_code, "GM30011");
    assert_eq!(expiring[1].status, MembershipStatus::Active);

    for entry in &expiring {
        assert!(entry.member.expiry_date > now);
        assert!(entry.member.expiry_date <= now + Duration::days(30));
    }

    // A narrower horizon drops the later expiry
    let narrow = ctx
        .dashboard_service
        .expiring_memberships(now, Some(5))
        .await?;
    assert_eq!(narrow.len(), 1);
    assert_eq!(narrow[0].member.member_code, "GM30010");

    Ok(())
}

fn trainer(name: &str, email: &str) -> NewTrainer {
    NewTrainer {
        user_id: None,
        name: name.to_string(),
        email: email.to_string(),
        phone: String::new(),
        specialization: "Strength".to_string(),
        bio: String::new(),
        hourly_rate_cents: 6_000,
        availability: vec![AvailabilitySlot {
            day: "monday".to_string(),
            start_time: "09:00".to_string(),
            end_time: "17:00".to_string(),
        }],
        is_active: true,
        join_date: Utc::now() - Duration::days(100),
    }
}

fn class(trainer_id: uuid::Uuid) -> NewClass {
    NewClass {
        trainer_id,
        name: "Barbell Basics".to_string(),
        description: String::new(),
        date: Utc::now(),
        start_time: "18:00".to_string(),
        end_time: "19:00".to_string(),
        capacity: 10,
        location: "Free weights area".to_string(),
        price_cents: 0,
        is_recurring: false,
        recurring_days: vec![],
    }
}

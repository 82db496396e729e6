mod common;

use chrono::{Duration, Utc};
use gymkeeper::{
    domain::{AvailabilitySlot, ClassUpdate, NewClass, NewTrainer, Trainer},
    error::AppError,
    service::ServiceContext,
};
use uuid::Uuid;

use common::setup;

async fn seed_trainer(ctx: &ServiceContext) -> anyhow::Result<Trainer> {
    let trainer = ctx
        .trainer_repo
        .create(NewTrainer {
            user_id: None,
            name: "Sara Lindqvist".to_string(),
            email: "sara@example.com".to_string(),
            phone: "555-0102".to_string(),
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
        })
        .await?;

    Ok(trainer)
}

fn class_for(trainer_id: Uuid, capacity: i64) -> NewClass {
    NewClass {
        trainer_id,
        name: "Barbell Basics".to_string(),
        description: String::new(),
        date: Utc::now() + Duration::days(3),
        start_time: "18:00".to_string(),
        end_time: "19:00".to_string(),
        capacity,
        location: "Free weights area".to_string(),
        price_cents: 0,
        is_recurring: false,
        recurring_days: vec![],
    }
}

#[tokio::test]
async fn create_requires_existing_trainer() -> anyhow::Result<()> {
    let ctx = setup().await?;

    let result = ctx.class_service.create(class_for(Uuid::new_v4(), 10)).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

#[tokio::test]
async fn recurring_class_needs_weekdays() -> anyhow::Result<()> {
    let ctx = setup().await?;
    let trainer = seed_trainer(&ctx).await?;

    let mut class = class_for(trainer.id, 10);
    class.is_recurring = true;
    let result = ctx.class_service.create(class).await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    // Same invariant on update, against the merged state
    let created = ctx.class_service.create(class_for(trainer.id, 10)).await?;
    let result = ctx
        .class_service
        .update(
            created.id,
            ClassUpdate {
                is_recurring: Some(true),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    let updated = ctx
        .class_service
        .update(
            created.id,
            ClassUpdate {
                is_recurring: Some(true),
                recurring_days: Some(vec!["monday".to_string(), "thursday".to_string()]),
                ..Default::default()
            },
        )
        .await?;
    assert!(updated.is_recurring);
    assert_eq!(updated.recurring_days.len(), 2);

    Ok(())
}

#[tokio::test]
async fn enrollment_is_bounded_by_capacity() -> anyhow::Result<()> {
    let ctx = setup().await?;
    let trainer = seed_trainer(&ctx).await?;
    let class = ctx.class_service.create(class_for(trainer.id, 2)).await?;
    assert_eq!(class.enrolled, 0);

    ctx.class_service.enroll(class.id).await?;
    let full = ctx.class_service.enroll(class.id).await?;
    assert_eq!(full.enrolled, 2);

    let over = ctx.class_service.enroll(class.id).await;
    assert!(matches!(over, Err(AppError::Conflict(_))));

    ctx.class_service.cancel_enrollment(class.id).await?;
    let reopened = ctx.class_service.enroll(class.id).await?;
    assert_eq!(reopened.enrolled, 2);

    Ok(())
}

#[tokio::test]
async fn cancel_enrollment_never_goes_negative() -> anyhow::Result<()> {
    let ctx = setup().await?;
    let trainer = seed_trainer(&ctx).await?;
    let class = ctx.class_service.create(class_for(trainer.id, 5)).await?;

    let result = ctx.class_service.cancel_enrollment(class.id).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

#[tokio::test]
async fn upcoming_excludes_past_classes_and_orders_ascending() -> anyhow::Result<()> {
    let ctx = setup().await?;
    let trainer = seed_trainer(&ctx).await?;

    let mut past = class_for(trainer.id, 10);
    past.date = Utc::now() - Duration::days(2);
    past.name = "Past session".to_string();
    ctx.class_service.create(past).await?;

    let mut next_week = class_for(trainer.id, 10);
    next_week.date = Utc::now() + Duration::days(7);
    next_week.name = "Next week".to_string();
    ctx.class_service.create(next_week).await?;

    let mut tomorrow = class_for(trainer.id, 10);
    tomorrow.date = Utc::now() + Duration::days(1);
    tomorrow.name = "Tomorrow".to_string();
    ctx.class_service.create(tomorrow).await?;

    let upcoming = ctx.class_repo.list_upcoming(Utc::now(), 50).await?;
    assert_eq!(upcoming.len(), 2);
    assert_eq!(upcoming[0].name, "Tomorrow");
    assert_eq!(upcoming[1].name, "Next week");

    let count = ctx.class_repo.count_upcoming(Utc::now()).await?;
    assert_eq!(count, 2);

    Ok(())
}

#[tokio::test]
async fn availability_round_trips_through_storage() -> anyhow::Result<()> {
    let ctx = setup().await?;
    let trainer = seed_trainer(&ctx).await?;

    let found = ctx
        .trainer_repo
        .find_by_id(trainer.id)
        .await?
        .expect("trainer should exist");

    assert_eq!(found.availability, trainer.availability);
    assert_eq!(found.availability[0].day, "monday");

    Ok(())
}

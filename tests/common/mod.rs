#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use sqlx::sqlite::SqlitePoolOptions;

use gymkeeper::{
    auth::AuthService,
    config::GymConfig,
    domain::{Member, NewMember, NewPackage, Package},
    service::ServiceContext,
};

/// In-memory database with migrations applied. A single connection keeps
/// every query on the same memory database.
pub async fn setup() -> anyhow::Result<Arc<ServiceContext>> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let auth_service = Arc::new(AuthService::new(pool.clone(), 24));
    Ok(Arc::new(ServiceContext::new(
        pool,
        GymConfig::default(),
        auth_service,
    )))
}

pub fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

pub async fn seed_package(ctx: &ServiceContext, duration_days: i64) -> anyhow::Result<Package> {
    let package = ctx
        .package_repo
        .create(NewPackage {
            name: format!("{}-day pass", duration_days),
            description: "Test package".to_string(),
            price_cents: 4_900,
            duration_days,
            features: vec!["Gym floor access".to_string()],
        })
        .await?;

    Ok(package)
}

pub async fn seed_member(
    ctx: &ServiceContext,
    package: &Package,
    code: &str,
    start_date: DateTime<Utc>,
) -> anyhow::Result<Member> {
    let member = ctx
        .member_service
        .enroll(NewMember {
            member_code: Some(code.to_string()),
            name: "Jordan Blake".to_string(),
            email: "jordan@example.com".to_string(),
            phone: "555-0101".to_string(),
            address: "12 Harbor Road".to_string(),
            package_id: package.id,
            start_date,
            notes: None,
        })
        .await?;

    Ok(member)
}

use chrono::{Duration, Utc};
use clap::Parser;
use fake::faker::address::en::StreetName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::Rng;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;

use gymkeeper::{
    auth::AuthService,
    config::GymConfig,
    domain::{
        AvailabilitySlot, CheckIn, CheckInMethod, NewClass, NewMember, NewPackage, NewPayment,
        NewTrainer, PaymentStatus, UserRole,
    },
    service::ServiceContext,
};

/// Seeds a gymkeeper database with demo data.
#[derive(Parser, Debug)]
struct Args {
    /// Database to seed; falls back to DATABASE_URL, then a local file.
    #[arg(long)]
    database_url: Option<String>,

    /// Number of members to create.
    #[arg(long, default_value_t = 20)]
    members: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let database_url = args
        .database_url
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| "sqlite:gymkeeper.db".to_string());

    println!("🌱 Seeding {}", database_url);

    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    println!("📋 Running migrations...");
    sqlx::migrate!("./migrations").run(&db_pool).await?;

    let auth_service = Arc::new(AuthService::new(db_pool.clone(), 24));
    let ctx = ServiceContext::new(db_pool, GymConfig::default(), auth_service.clone());

    // Staff accounts
    println!("🔑 Creating staff accounts...");
    auth_service
        .register("admin@gymkeeper.local", "admin123", UserRole::Admin)
        .await?;
    let trainer_user = auth_service
        .register("trainer@gymkeeper.local", "trainer123", UserRole::Trainer)
        .await?;
    println!("  ✅ admin@gymkeeper.local / admin123");
    println!("  ✅ trainer@gymkeeper.local / trainer123");

    // Membership packages
    println!("📦 Creating packages...");
    let monthly = ctx
        .package_repo
        .create(NewPackage {
            name: "Monthly".to_string(),
            description: "Month-to-month gym access".to_string(),
            price_cents: 4_900,
            duration_days: 30,
            features: vec![
                "Gym floor access".to_string(),
                "Locker room".to_string(),
            ],
        })
        .await?;
    let quarterly = ctx
        .package_repo
        .create(NewPackage {
            name: "Quarterly".to_string(),
            description: "Three months, one free group class per week".to_string(),
            price_cents: 12_900,
            duration_days: 90,
            features: vec![
                "Gym floor access".to_string(),
                "Locker room".to_string(),
                "Weekly group class".to_string(),
            ],
        })
        .await?;
    let annual = ctx
        .package_repo
        .create(NewPackage {
            name: "Annual".to_string(),
            description: "Full year, all classes included".to_string(),
            price_cents: 39_900,
            duration_days: 365,
            features: vec![
                "Gym floor access".to_string(),
                "Locker room".to_string(),
                "All group classes".to_string(),
                "One PT session per month".to_string(),
            ],
        })
        .await?;
    println!("  ✅ Created 3 packages");

    // Trainers
    println!("🏋️ Creating trainers...");
    let weekday_slots = vec![
        AvailabilitySlot {
            day: "monday".to_string(),
            start_time: "09:00".to_string(),
            end_time: "17:00".to_string(),
        },
        AvailabilitySlot {
            day: "wednesday".to_string(),
            start_time: "09:00".to_string(),
            end_time: "17:00".to_string(),
        },
        AvailabilitySlot {
            day: "friday".to_string(),
            start_time: "09:00".to_string(),
            end_time: "13:00".to_string(),
        },
    ];

    let sara = ctx
        .trainer_repo
        .create(NewTrainer {
            user_id: Some(trainer_user.id),
            name: "Sara Lindqvist".to_string(),
            email: "trainer@gymkeeper.local".to_string(),
            phone: PhoneNumber().fake(),
            specialization: "Strength & conditioning".to_string(),
            bio: "Former powerlifting coach, ten years on the gym floor.".to_string(),
            hourly_rate_cents: 6_500,
            availability: weekday_slots.clone(),
            is_active: true,
            join_date: Utc::now() - Duration::days(400),
        })
        .await?;

    let marco = ctx
        .trainer_repo
        .create(NewTrainer {
            user_id: None,
            name: "Marco Reyes".to_string(),
            email: SafeEmail().fake(),
            phone: PhoneNumber().fake(),
            specialization: "Yoga & mobility".to_string(),
            bio: "Teaches vinyasa and mobility work.".to_string(),
            hourly_rate_cents: 5_500,
            availability: vec![AvailabilitySlot {
                day: "tuesday".to_string(),
                start_time: "07:00".to_string(),
                end_time: "12:00".to_string(),
            }],
            is_active: true,
            join_date: Utc::now() - Duration::days(120),
        })
        .await?;
    println!("  ✅ Created 2 trainers");

    // Members
    println!("👥 Creating {} members...", args.members);
    let packages = [&monthly, &quarterly, &annual];
    let mut rng = rand::thread_rng();
    let mut member_ids = Vec::new();

    for _ in 0..args.members {
        let package = packages[rng.gen_range(0..packages.len())];
        // Spread start dates so some memberships are already expired and
        // some expire within the dashboard window.
        let days_ago = rng.gen_range(0..package.duration_days + 30);
        let member = ctx
            .member_service
            .enroll(NewMember {
                member_code: None,
                name: Name().fake(),
                email: SafeEmail().fake(),
                phone: PhoneNumber().fake(),
                address: StreetName().fake(),
                package_id: package.id,
                start_date: Utc::now() - Duration::days(days_ago),
                notes: None,
            })
            .await?;
        member_ids.push(member.id);
    }
    println!("  ✅ Created {} members", member_ids.len());

    // Classes over the next two weeks
    println!("📅 Creating classes...");
    ctx.class_service
        .create(NewClass {
            trainer_id: sara.id,
            name: "Barbell Basics".to_string(),
            description: "Squat, bench and deadlift technique for beginners.".to_string(),
            date: Utc::now() + Duration::days(2),
            start_time: "18:00".to_string(),
            end_time: "19:00".to_string(),
            capacity: 12,
            location: "Free weights area".to_string(),
            price_cents: 0,
            is_recurring: true,
            recurring_days: vec!["monday".to_string(), "thursday".to_string()],
        })
        .await?;
    let flow = ctx
        .class_service
        .create(NewClass {
            trainer_id: marco.id,
            name: "Morning Flow".to_string(),
            description: "45-minute vinyasa flow, all levels.".to_string(),
            date: Utc::now() + Duration::days(1),
            start_time: "07:30".to_string(),
            end_time: "08:15".to_string(),
            capacity: 20,
            location: "Studio 2".to_string(),
            price_cents: 800,
            is_recurring: false,
            recurring_days: vec![],
        })
        .await?;
    println!("  ✅ Created 2 classes");

    // Today's check-ins and a few class enrollments
    println!("🚪 Recording attendance...");
    for member_id in member_ids.iter().take(5) {
        ctx.attendance_service
            .check_in(CheckIn {
                member_id: *member_id,
                member_name: None,
                member_code: None,
                class_id: None,
                date: None,
                check_in_method: CheckInMethod::Qr,
                notes: None,
            })
            .await?;
    }
    for _ in 0..3 {
        ctx.class_service.enroll(flow.id).await?;
    }
    println!("  ✅ Recorded 5 check-ins and 3 enrollments");

    // A couple of payments
    println!("💳 Recording payments...");
    if let Some(member_id) = member_ids.first() {
        let payment = ctx
            .payment_service
            .record(NewPayment {
                member_id: *member_id,
                package_id: monthly.id,
                amount_cents: monthly.price_cents,
                payment_date: Utc::now(),
                payment_method: "card".to_string(),
                transaction_id: None,
                status: PaymentStatus::Pending,
                notes: None,
            })
            .await?;
        ctx.payment_service
            .update_status(payment.id, PaymentStatus::Completed, None)
            .await?;
    }
    println!("  ✅ Recorded payments");

    println!("🎉 Done.");

    Ok(())
}

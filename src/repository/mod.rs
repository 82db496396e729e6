use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::*;
use crate::error::Result;

pub mod attendance_repository;
pub mod class_repository;
pub mod member_repository;
pub mod package_repository;
pub mod payment_repository;
pub mod trainer_repository;
pub mod user_repository;

pub use attendance_repository::SqliteAttendanceRepository;
pub use class_repository::SqliteClassRepository;
pub use member_repository::SqliteMemberRepository;
pub use package_repository::SqlitePackageRepository;
pub use payment_repository::SqlitePaymentRepository;
pub use trainer_repository::SqliteTrainerRepository;
pub use user_repository::SqliteUserRepository;

#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn create(&self, member: CreateMember) -> Result<Member>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Member>>;
    /// Lookup by the human-facing member code. Zero matches is `None`;
    /// more than one match is a `Conflict` (codes are expected unique but
    /// the store does not enforce it, so "first match wins" is never
    /// silently applied).
    async fn find_by_code(&self, code: &str) -> Result<Option<Member>>;
    async fn list(&self) -> Result<Vec<Member>>;
    /// Members whose expiry falls in (now, now + days], soonest first.
    async fn list_expiring_within(&self, now: DateTime<Utc>, days: i64) -> Result<Vec<Member>>;
    async fn update_contact(&self, id: Uuid, update: MemberContactUpdate) -> Result<Member>;
    /// Re-reads the package and rewrites the membership window in a single
    /// storage transaction. The only write path for package_id,
    /// package_name, start_date and expiry_date.
    async fn renew(
        &self,
        id: Uuid,
        package_id: Uuid,
        start_date: DateTime<Utc>,
    ) -> Result<Member>;
    async fn delete(&self, id: Uuid) -> Result<()>;
    async fn count(&self) -> Result<i64>;
    async fn count_active(&self, now: DateTime<Utc>) -> Result<i64>;
}

#[async_trait]
pub trait PackageRepository: Send + Sync {
    async fn create(&self, package: NewPackage) -> Result<Package>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Package>>;
    async fn list(&self) -> Result<Vec<Package>>;
    async fn update(&self, id: Uuid, update: PackageUpdate) -> Result<Package>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait TrainerRepository: Send + Sync {
    async fn create(&self, trainer: NewTrainer) -> Result<Trainer>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Trainer>>;
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Trainer>>;
    async fn list(&self) -> Result<Vec<Trainer>>;
    async fn list_active(&self) -> Result<Vec<Trainer>>;
    async fn update(&self, id: Uuid, update: TrainerUpdate) -> Result<Trainer>;
    async fn delete(&self, id: Uuid) -> Result<()>;
    async fn count_active(&self) -> Result<i64>;
}

#[async_trait]
pub trait ClassRepository: Send + Sync {
    async fn create(&self, class: NewClass) -> Result<TrainerClass>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<TrainerClass>>;
    async fn list(&self) -> Result<Vec<TrainerClass>>;
    async fn list_by_trainer(&self, trainer_id: Uuid) -> Result<Vec<TrainerClass>>;
    /// Classes dated today or later, soonest first.
    async fn list_upcoming(&self, now: DateTime<Utc>, limit: i64) -> Result<Vec<TrainerClass>>;
    async fn update(&self, id: Uuid, update: ClassUpdate) -> Result<TrainerClass>;
    async fn set_enrolled(&self, id: Uuid, enrolled: i64) -> Result<TrainerClass>;
    async fn delete(&self, id: Uuid) -> Result<()>;
    async fn count_upcoming(&self, now: DateTime<Utc>) -> Result<i64>;
}

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Writes a new attendance record with a server-assigned check-in
    /// timestamp. The caller has already run (or skipped) name enrichment.
    async fn create(&self, check_in: CheckIn) -> Result<Attendance>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Attendance>>;
    async fn list_by_member(&self, member_id: Uuid) -> Result<Vec<Attendance>>;
    /// Records whose day bucket falls on the same calendar day as `day`.
    async fn list_for_day(&self, day: DateTime<Utc>) -> Result<Vec<Attendance>>;
    async fn set_check_out(&self, id: Uuid) -> Result<Attendance>;
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn create(&self, payment: NewPayment) -> Result<Payment>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>>;
    async fn list_by_member(&self, member_id: Uuid) -> Result<Vec<Payment>>;
    async fn update_status(
        &self,
        id: Uuid,
        status: PaymentStatus,
        notes: Option<String>,
    ) -> Result<Payment>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, email: &str, password_hash: &str, role: UserRole) -> Result<User>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
}

pub mod attendance_service;
pub mod class_service;
pub mod dashboard_service;
pub mod member_service;
pub mod payment_service;

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::AuthService;
use crate::config::GymConfig;
use crate::repository::*;

pub use attendance_service::AttendanceService;
pub use class_service::ClassService;
pub use dashboard_service::{DashboardService, DashboardSummary};
pub use member_service::MemberService;
pub use payment_service::PaymentService;

pub struct ServiceContext {
    pub member_repo: Arc<dyn MemberRepository>,
    pub package_repo: Arc<dyn PackageRepository>,
    pub trainer_repo: Arc<dyn TrainerRepository>,
    pub class_repo: Arc<dyn ClassRepository>,
    pub attendance_repo: Arc<dyn AttendanceRepository>,
    pub payment_repo: Arc<dyn PaymentRepository>,
    pub member_service: Arc<MemberService>,
    pub attendance_service: Arc<AttendanceService>,
    pub class_service: Arc<ClassService>,
    pub payment_service: Arc<PaymentService>,
    pub dashboard_service: Arc<DashboardService>,
    pub auth_service: Arc<AuthService>,
    pub db_pool: SqlitePool,
}

impl ServiceContext {
    pub fn new(pool: SqlitePool, gym: GymConfig, auth_service: Arc<AuthService>) -> Self {
        let member_repo: Arc<dyn MemberRepository> =
            Arc::new(SqliteMemberRepository::new(pool.clone()));
        let package_repo: Arc<dyn PackageRepository> =
            Arc::new(SqlitePackageRepository::new(pool.clone()));
        let trainer_repo: Arc<dyn TrainerRepository> =
            Arc::new(SqliteTrainerRepository::new(pool.clone()));
        let class_repo: Arc<dyn ClassRepository> =
            Arc::new(SqliteClassRepository::new(pool.clone()));
        let attendance_repo: Arc<dyn AttendanceRepository> =
            Arc::new(SqliteAttendanceRepository::new(pool.clone()));
        let payment_repo: Arc<dyn PaymentRepository> =
            Arc::new(SqlitePaymentRepository::new(pool.clone()));

        let member_service = Arc::new(MemberService::new(
            member_repo.clone(),
            package_repo.clone(),
            gym.member_code_prefix.clone(),
        ));
        let attendance_service = Arc::new(AttendanceService::new(
            attendance_repo.clone(),
            member_repo.clone(),
        ));
        let class_service = Arc::new(ClassService::new(class_repo.clone(), trainer_repo.clone()));
        let payment_service = Arc::new(PaymentService::new(
            payment_repo.clone(),
            member_repo.clone(),
            package_repo.clone(),
        ));
        let dashboard_service = Arc::new(DashboardService::new(
            member_repo.clone(),
            class_repo.clone(),
            trainer_repo.clone(),
            gym.expiring_window_days,
        ));

        Self {
            member_repo,
            package_repo,
            trainer_repo,
            class_repo,
            attendance_repo,
            payment_repo,
            member_service,
            attendance_service,
            class_service,
            payment_service,
            dashboard_service,
            auth_service,
            db_pool: pool,
        }
    }
}

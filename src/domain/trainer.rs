use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// One weekly availability window, e.g. { day: "monday", 09:00-17:00 }.
/// One conflict-free slot per day is a convention, not an enforced rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trainer {
    pub id: Uuid,
    /// Optional link to the auth user the trainer signs in as.
    pub user_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub specialization: String,
    pub bio: String,
    pub hourly_rate_cents: i64,
    pub availability: Vec<AvailabilitySlot>,
    pub is_active: bool,
    pub join_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewTrainer {
    pub user_id: Option<Uuid>,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: String,
    pub specialization: String,
    #[serde(default)]
    pub bio: String,
    #[validate(range(min = 1, message = "hourly rate must be positive"))]
    pub hourly_rate_cents: i64,
    #[serde(default)]
    pub availability: Vec<AvailabilitySlot>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub join_date: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrainerUpdate {
    pub user_id: Option<Uuid>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub bio: Option<String>,
    pub hourly_rate_cents: Option<i64>,
    pub availability: Option<Vec<AvailabilitySlot>>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerClass {
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub name: String,
    pub description: String,
    pub date: DateTime<Utc>,
    /// Time-of-day strings in "HH:MM", as entered on the schedule form.
    pub start_time: String,
    pub end_time: String,
    pub capacity: i64,
    pub enrolled: i64,
    pub location: String,
    pub price_cents: i64,
    pub is_recurring: bool,
    /// Weekday tags ("monday", ...); non-empty whenever is_recurring.
    pub recurring_days: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewClass {
    pub trainer_id: Uuid,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub start_time: String,
    pub end_time: String,
    #[validate(range(min = 1, message = "capacity must be positive"))]
    pub capacity: i64,
    pub location: String,
    #[validate(range(min = 0, message = "price must not be negative"))]
    pub price_cents: i64,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub recurring_days: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassUpdate {
    pub trainer_id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub capacity: Option<i64>,
    pub location: Option<String>,
    pub price_cents: Option<i64>,
    pub is_recurring: Option<bool>,
    pub recurring_days: Option<Vec<String>>,
}

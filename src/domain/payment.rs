use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub member_id: Uuid,
    pub package_id: Uuid,
    pub amount_cents: i64,
    pub payment_date: DateTime<Utc>,
    pub payment_method: String,
    pub transaction_id: Option<String>,
    pub status: PaymentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewPayment {
    pub member_id: Uuid,
    pub package_id: Uuid,
    #[validate(range(min = 0, message = "amount must not be negative"))]
    pub amount_cents: i64,
    pub payment_date: DateTime<Utc>,
    #[validate(length(min = 1, message = "payment method must not be empty"))]
    pub payment_method: String,
    pub transaction_id: Option<String>,
    #[serde(default = "default_status")]
    pub status: PaymentStatus,
    pub notes: Option<String>,
}

fn default_status() -> PaymentStatus {
    PaymentStatus::Pending
}

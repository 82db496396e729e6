use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckInMethod {
    Qr,
    Manual,
}

/// A single visit. Created at check-in, updated at most once to set the
/// check-out time, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attendance {
    pub id: Uuid,
    pub member_id: Uuid,
    /// Denormalized for the daily list; backfilled best-effort at check-in.
    pub member_name: Option<String>,
    pub member_code: Option<String>,
    pub class_id: Option<Uuid>,
    /// Day bucket the visit counts toward.
    pub date: DateTime<Utc>,
    pub check_in_time: DateTime<Utc>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub check_in_method: CheckInMethod,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Check-in input. The check-in timestamp is always server-assigned; the
/// date bucket defaults to "now" when the front desk leaves it out.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckIn {
    pub member_id: Uuid,
    pub member_name: Option<String>,
    pub member_code: Option<String>,
    pub class_id: Option<Uuid>,
    pub date: Option<DateTime<Utc>>,
    pub check_in_method: CheckInMethod,
    pub notes: Option<String>,
}

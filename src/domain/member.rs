use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    /// Human-facing member code printed on the membership card (e.g. "GM12345").
    /// Distinct from the storage id; expected unique but not enforced.
    pub member_code: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub package_id: Uuid,
    /// Denormalized from the package at enroll/renew time, not kept in sync.
    pub package_name: String,
    pub start_date: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Enrollment input. The expiry date is never caller-supplied; it is
/// computed from the package duration when the member is written.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewMember {
    pub member_code: Option<String>,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: String,
    pub address: String,
    pub package_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Fully-resolved create command handed to the repository: the service has
/// already resolved the package and computed the membership window.
#[derive(Debug, Clone)]
pub struct CreateMember {
    pub member_code: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub package_id: Uuid,
    pub package_name: String,
    pub start_date: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Contact-field edit. Deliberately cannot express a membership-window
/// change; the package/start/expiry fields are only written by the
/// renewal operation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberContactUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    Active,
    ExpiringSoon,
    Expired,
}

/// Classifies a membership from its expiry date. `Expired` when the expiry
/// is strictly in the past; `ExpiringSoon` when it falls within the next
/// `window_days` (days remaining rounded up); otherwise `Active`.
pub fn membership_status(
    expiry_date: DateTime<Utc>,
    now: DateTime<Utc>,
    window_days: i64,
) -> MembershipStatus {
    if expiry_date < now {
        return MembershipStatus::Expired;
    }

    let seconds_left = (expiry_date - now).num_seconds();
    let days_left = (seconds_left + 86_399) / 86_400;

    if days_left <= window_days {
        MembershipStatus::ExpiringSoon
    } else {
        MembershipStatus::Active
    }
}

/// Membership window rule: expiry = start + package duration in days.
pub fn expiry_for(start_date: DateTime<Utc>, duration_days: i64) -> DateTime<Utc> {
    start_date + Duration::days(duration_days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const WINDOW: i64 = 7;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn expired_when_expiry_in_the_past() {
        let now = date(2024, 1, 10);
        let status = membership_status(date(2024, 1, 9), now, WINDOW);
        assert_eq!(status, MembershipStatus::Expired);
    }

    #[test]
    fn expiring_soon_two_days_out() {
        let now = date(2024, 1, 10);
        let status = membership_status(date(2024, 1, 12), now, WINDOW);
        assert_eq!(status, MembershipStatus::ExpiringSoon);
    }

    #[test]
    fn expiring_soon_at_exact_expiry_instant() {
        let now = date(2024, 1, 10);
        let status = membership_status(now, now, WINDOW);
        assert_eq!(status, MembershipStatus::ExpiringSoon);
    }

    #[test]
    fn expiring_soon_at_window_boundary() {
        let now = date(2024, 1, 10);
        let status = membership_status(date(2024, 1, 17), now, WINDOW);
        assert_eq!(status, MembershipStatus::ExpiringSoon);
    }

    #[test]
    fn active_past_window_boundary() {
        let now = date(2024, 1, 10);
        let status = membership_status(date(2024, 1, 18), now, WINDOW);
        assert_eq!(status, MembershipStatus::Active);
    }

    #[test]
    fn partial_day_rounds_up() {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        // 7.5 days away rounds up to 8 -> Active
        let expiry = date(2024, 1, 18);
        assert_eq!(
            membership_status(expiry, now, WINDOW),
            MembershipStatus::Active
        );
    }

    #[test]
    fn renewal_expiry_is_start_plus_duration() {
        let start = date(2024, 3, 1);
        assert_eq!(expiry_for(start, 30), date(2024, 3, 31));
    }
}

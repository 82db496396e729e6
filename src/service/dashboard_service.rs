use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    domain::{membership_status, Member, MembershipStatus},
    error::Result,
    repository::{ClassRepository, MemberRepository, TrainerRepository},
};

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_members: i64,
    pub active_members: i64,
    pub upcoming_classes: i64,
    pub active_trainers: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpiringMembership {
    #[serde(flatten)]
    pub member: Member,
    pub status: MembershipStatus,
}

pub struct DashboardService {
    members: Arc<dyn MemberRepository>,
    classes: Arc<dyn ClassRepository>,
    trainers: Arc<dyn TrainerRepository>,
    expiring_window_days: i64,
}

impl DashboardService {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        classes: Arc<dyn ClassRepository>,
        trainers: Arc<dyn TrainerRepository>,
        expiring_window_days: i64,
    ) -> Self {
        Self {
            members,
            classes,
            trainers,
            expiring_window_days,
        }
    }

    /// Four independent count queries; each fires on its own, so there is no
    /// snapshot guarantee across the counters.
    pub async fn summary(&self, now: DateTime<Utc>) -> Result<DashboardSummary> {
        let total_members = self.members.count().await?;
        let active_members = self.members.count_active(now).await?;
        let upcoming_classes = self.classes.count_upcoming(now).await?;
        let active_trainers = self.trainers.count_active().await?;

        Ok(DashboardSummary {
            total_members,
            active_members,
            upcoming_classes,
            active_trainers,
        })
    }

    /// Memberships expiring within the next `days` (default 30), soonest
    /// first, each tagged with its derived status.
    pub async fn expiring_memberships(
        &self,
        now: DateTime<Utc>,
        days: Option<i64>,
    ) -> Result<Vec<ExpiringMembership>> {
        let days = days.unwrap_or(30);
        let members = self.members.list_expiring_within(now, days).await?;

        Ok(members
            .into_iter()
            .map(|member| {
                let status =
                    membership_status(member.expiry_date, now, self.expiring_window_days);
                ExpiringMembership { member, status }
            })
            .collect())
    }
}

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    domain::{Attendance, CheckIn, Member},
    error::Result,
    repository::{AttendanceRepository, MemberRepository},
};

pub struct AttendanceService {
    attendance: Arc<dyn AttendanceRepository>,
    members: Arc<dyn MemberRepository>,
}

impl AttendanceService {
    pub fn new(
        attendance: Arc<dyn AttendanceRepository>,
        members: Arc<dyn MemberRepository>,
    ) -> Self {
        Self {
            attendance,
            members,
        }
    }

    /// Records a check-in. When the display name/code are missing they are
    /// backfilled from the member record; a failed lookup is logged and
    /// swallowed so that a front-desk check-in is never blocked by a
    /// display-only enrichment step.
    pub async fn check_in(&self, mut check_in: CheckIn) -> Result<Attendance> {
        if check_in.member_name.is_none() || check_in.member_code.is_none() {
            match self.members.find_by_id(check_in.member_id).await {
                Ok(Some(member)) => {
                    check_in.member_name.get_or_insert(member.name);
                    check_in.member_code.get_or_insert(member.member_code);
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(
                        member_id = %check_in.member_id,
                        "Member lookup failed during check-in, recording without name: {}",
                        e
                    );
                }
            }
        }

        self.attendance.create(check_in).await
    }

    /// Completes an attendance record with a server-assigned check-out time.
    pub async fn check_out(&self, id: Uuid) -> Result<Attendance> {
        self.attendance.set_check_out(id).await
    }

    /// Front-desk lookup by the code scanned off a membership card.
    pub async fn find_member_by_code(&self, code: &str) -> Result<Option<Member>> {
        self.members.find_by_code(code).await
    }
}

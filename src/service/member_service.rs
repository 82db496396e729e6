use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;
use uuid::Uuid;
use validator::Validate;

use crate::{
    domain::{expiry_for, CreateMember, Member, MemberContactUpdate, NewMember},
    error::{AppError, Result},
    repository::{MemberRepository, PackageRepository},
};

pub struct MemberService {
    members: Arc<dyn MemberRepository>,
    packages: Arc<dyn PackageRepository>,
    member_code_prefix: String,
}

impl MemberService {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        packages: Arc<dyn PackageRepository>,
        member_code_prefix: String,
    ) -> Self {
        Self {
            members,
            packages,
            member_code_prefix,
        }
    }

    /// Enrolls a new member. The referenced package must exist; its name is
    /// denormalized onto the member and the expiry date is computed from its
    /// duration. A member code is generated when the form leaves it blank.
    pub async fn enroll(&self, new_member: NewMember) -> Result<Member> {
        new_member.validate()?;

        let package = self
            .packages
            .find_by_id(new_member.package_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Package not found".to_string()))?;

        let member_code = match new_member.member_code {
            Some(code) if !code.is_empty() => code,
            _ => self.generate_member_code(),
        };

        let expiry_date = expiry_for(new_member.start_date, package.duration_days);

        self.members
            .create(CreateMember {
                member_code,
                name: new_member.name,
                email: new_member.email,
                phone: new_member.phone,
                address: new_member.address,
                package_id: package.id,
                package_name: package.name,
                start_date: new_member.start_date,
                expiry_date,
                notes: new_member.notes,
            })
            .await
    }

    pub async fn update_contact(&self, id: Uuid, update: MemberContactUpdate) -> Result<Member> {
        self.members.update_contact(id, update).await
    }

    /// Renews a membership onto a (possibly different) package starting at
    /// `start_date`. The package read and membership-window write run inside
    /// a single storage transaction.
    pub async fn renew(
        &self,
        id: Uuid,
        package_id: Uuid,
        start_date: DateTime<Utc>,
    ) -> Result<Member> {
        self.members.renew(id, package_id, start_date).await
    }

    /// Removes the member record only. Attendance and payment history
    /// referencing the member is kept as historical record.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.members.delete(id).await
    }

    fn generate_member_code(&self) -> String {
        let number: u32 = rand::thread_rng().gen_range(10_000..100_000);
        format!("{}{}", self.member_code_prefix, number)
    }
}

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    domain::{NewPayment, Payment, PaymentStatus},
    error::{AppError, Result},
    repository::{MemberRepository, PackageRepository, PaymentRepository},
};

pub struct PaymentService {
    payments: Arc<dyn PaymentRepository>,
    members: Arc<dyn MemberRepository>,
    packages: Arc<dyn PackageRepository>,
}

impl PaymentService {
    pub fn new(
        payments: Arc<dyn PaymentRepository>,
        members: Arc<dyn MemberRepository>,
        packages: Arc<dyn PackageRepository>,
    ) -> Self {
        Self {
            payments,
            members,
            packages,
        }
    }

    /// Records a payment against a member and package. Both references are
    /// re-resolved at the boundary rather than trusting caller-supplied ids.
    pub async fn record(&self, payment: NewPayment) -> Result<Payment> {
        payment.validate()?;

        self.members
            .find_by_id(payment.member_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Member not found".to_string()))?;

        self.packages
            .find_by_id(payment.package_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Package not found".to_string()))?;

        self.payments.create(payment).await
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: PaymentStatus,
        notes: Option<String>,
    ) -> Result<Payment> {
        self.payments.update_status(id, status, notes).await
    }
}

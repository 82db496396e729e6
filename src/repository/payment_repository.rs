use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{NewPayment, Payment, PaymentStatus},
    error::{AppError, Result},
    repository::PaymentRepository,
};

const PAYMENT_COLUMNS: &str = r#"
    id, member_id, package_id, amount_cents, payment_date, payment_method,
    transaction_id, status, notes, created_at, updated_at
"#;

#[derive(FromRow)]
struct PaymentRow {
    id: String,
    member_id: String,
    package_id: String,
    amount_cents: i64,
    payment_date: NaiveDateTime,
    payment_method: String,
    transaction_id: Option<String>,
    status: String,
    notes: Option<String>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqlitePaymentRepository {
    pool: SqlitePool,
}

impl SqlitePaymentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_payment(row: PaymentRow) -> Result<Payment> {
        Ok(Payment {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            member_id: Uuid::parse_str(&row.member_id)
                .map_err(|e| AppError::Database(e.to_string()))?,
            package_id: Uuid::parse_str(&row.package_id)
                .map_err(|e| AppError::Database(e.to_string()))?,
            amount_cents: row.amount_cents,
            payment_date: DateTime::from_naive_utc_and_offset(row.payment_date, Utc),
            payment_method: row.payment_method,
            transaction_id: row.transaction_id,
            status: Self::parse_payment_status(&row.status)?,
            notes: row.notes,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }

    fn parse_payment_status(s: &str) -> Result<PaymentStatus> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "completed" => Ok(PaymentStatus::Completed),
            "failed" => Ok(PaymentStatus::Failed),
            "refunded" => Ok(PaymentStatus::Refunded),
            _ => Err(AppError::Database(format!("Invalid payment status: {}", s))),
        }
    }

    fn payment_status_to_str(status: PaymentStatus) -> &'static str {
        match status {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

#[async_trait]
impl PaymentRepository for SqlitePaymentRepository {
    async fn create(&self, payment: NewPayment) -> Result<Payment> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let member_id_str = payment.member_id.to_string();
        let package_id_str = payment.package_id.to_string();
        let payment_date_naive = payment.payment_date.naive_utc();
        let status_str = Self::payment_status_to_str(payment.status);
        let now_naive = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO payments (
                id, member_id, package_id, amount_cents, payment_date,
                payment_method, transaction_id, status, notes,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&member_id_str)
        .bind(&package_id_str)
        .bind(payment.amount_cents)
        .bind(payment_date_naive)
        .bind(&payment.payment_method)
        .bind(&payment.transaction_id)
        .bind(status_str)
        .bind(&payment.notes)
        .bind(now_naive)
        .bind(now_naive)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve created payment".to_string()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>> {
        let id_str = id.to_string();
        let row = sqlx::query_as::<_, PaymentRow>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE id = ?"
        ))
        .bind(id_str)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(Self::row_to_payment(r)?)),
            None => Ok(None),
        }
    }

    async fn list_by_member(&self, member_id: Uuid) -> Result<Vec<Payment>> {
        let member_id_str = member_id.to_string();
        let rows = sqlx::query_as::<_, PaymentRow>(&format!(
            r#"
            SELECT {PAYMENT_COLUMNS} FROM payments
            WHERE member_id = ?
            ORDER BY payment_date DESC
            "#
        ))
        .bind(member_id_str)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_payment).collect()
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: PaymentStatus,
        notes: Option<String>,
    ) -> Result<Payment> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Payment not found".to_string()))?;

        let id_str = id.to_string();
        let status_str = Self::payment_status_to_str(status);
        let now_naive = Utc::now().naive_utc();

        sqlx::query(
            r#"
            UPDATE payments
            SET status = ?,
                notes = COALESCE(?, notes),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(status_str)
        .bind(&notes)
        .bind(now_naive)
        .bind(&id_str)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve updated payment".to_string()))
    }
}

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{AvailabilitySlot, NewTrainer, Trainer, TrainerUpdate},
    error::{AppError, Result},
    repository::TrainerRepository,
};

const TRAINER_COLUMNS: &str = r#"
    id, user_id, name, email, phone, specialization, bio, hourly_rate_cents,
    availability, is_active, join_date, created_at, updated_at
"#;

#[derive(FromRow)]
struct TrainerRow {
    id: String,
    user_id: Option<String>,
    name: String,
    email: String,
    phone: String,
    specialization: String,
    bio: String,
    hourly_rate_cents: i64,
    // JSON array of weekly slots
    availability: String,
    is_active: i64,
    join_date: NaiveDateTime,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteTrainerRepository {
    pool: SqlitePool,
}

impl SqliteTrainerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_trainer(row: TrainerRow) -> Result<Trainer> {
        let user_id = match row.user_id {
            Some(s) => {
                Some(Uuid::parse_str(&s).map_err(|e| AppError::Database(e.to_string()))?)
            }
            None => None,
        };

        Ok(Trainer {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            user_id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            specialization: row.specialization,
            bio: row.bio,
            hourly_rate_cents: row.hourly_rate_cents,
            availability: serde_json::from_str(&row.availability)
                .map_err(|e| AppError::Database(format!("Invalid availability column: {}", e)))?,
            is_active: row.is_active != 0,
            join_date: DateTime::from_naive_utc_and_offset(row.join_date, Utc),
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }

    fn availability_to_json(slots: &[AvailabilitySlot]) -> Result<String> {
        serde_json::to_string(slots)
            .map_err(|e| AppError::Internal(format!("Failed to encode availability: {}", e)))
    }
}

#[async_trait]
impl TrainerRepository for SqliteTrainerRepository {
    async fn create(&self, trainer: NewTrainer) -> Result<Trainer> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let user_id_str = trainer.user_id.map(|u| u.to_string());
        let availability_json = Self::availability_to_json(&trainer.availability)?;
        let join_naive = trainer.join_date.naive_utc();
        let now_naive = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO trainers (
                id, user_id, name, email, phone, specialization, bio,
                hourly_rate_cents, availability, is_active, join_date,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&user_id_str)
        .bind(&trainer.name)
        .bind(&trainer.email)
        .bind(&trainer.phone)
        .bind(&trainer.specialization)
        .bind(&trainer.bio)
        .bind(trainer.hourly_rate_cents)
        .bind(&availability_json)
        .bind(if trainer.is_active { 1i64 } else { 0i64 })
        .bind(join_naive)
        .bind(now_naive)
        .bind(now_naive)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve created trainer".to_string()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Trainer>> {
        let id_str = id.to_string();
        let row = sqlx::query_as::<_, TrainerRow>(&format!(
            "SELECT {TRAINER_COLUMNS} FROM trainers WHERE id = ?"
        ))
        .bind(id_str)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(Self::row_to_trainer(r)?)),
            None => Ok(None),
        }
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Trainer>> {
        let user_id_str = user_id.to_string();
        let row = sqlx::query_as::<_, TrainerRow>(&format!(
            "SELECT {TRAINER_COLUMNS} FROM trainers WHERE user_id = ?"
        ))
        .bind(user_id_str)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(Self::row_to_trainer(r)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Trainer>> {
        let rows = sqlx::query_as::<_, TrainerRow>(&format!(
            "SELECT {TRAINER_COLUMNS} FROM trainers"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_trainer).collect()
    }

    async fn list_active(&self) -> Result<Vec<Trainer>> {
        let rows = sqlx::query_as::<_, TrainerRow>(&format!(
            "SELECT {TRAINER_COLUMNS} FROM trainers WHERE is_active = 1"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_trainer).collect()
    }

    async fn update(&self, id: Uuid, update: TrainerUpdate) -> Result<Trainer> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Trainer not found".to_string()))?;

        let id_str = id.to_string();
        let now_naive = Utc::now().naive_utc();
        let user_id_str = update.user_id.map(|u| u.to_string());
        let availability_json = match &update.availability {
            Some(slots) => Some(Self::availability_to_json(slots)?),
            None => None,
        };
        let is_active_int = update.is_active.map(|b| if b { 1i64 } else { 0i64 });

        sqlx::query(
            r#"
            UPDATE trainers
            SET user_id = COALESCE(?, user_id),
                name = COALESCE(?, name),
                email = COALESCE(?, email),
                phone = COALESCE(?, phone),
                specialization = COALESCE(?, specialization),
                bio = COALESCE(?, bio),
                hourly_rate_cents = COALESCE(?, hourly_rate_cents),
                availability = COALESCE(?, availability),
                is_active = COALESCE(?, is_active),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&user_id_str)
        .bind(&update.name)
        .bind(&update.email)
        .bind(&update.phone)
        .bind(&update.specialization)
        .bind(&update.bio)
        .bind(update.hourly_rate_cents)
        .bind(&availability_json)
        .bind(is_active_int)
        .bind(now_naive)
        .bind(&id_str)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve updated trainer".to_string()))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let id_str = id.to_string();
        sqlx::query("DELETE FROM trainers WHERE id = ?")
            .bind(&id_str)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn count_active(&self) -> Result<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM trainers WHERE is_active = 1")
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}

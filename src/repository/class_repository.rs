use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{ClassUpdate, NewClass, TrainerClass},
    error::{AppError, Result},
    repository::ClassRepository,
};

const CLASS_COLUMNS: &str = r#"
    id, trainer_id, name, description, date, start_time, end_time, capacity,
    enrolled, location, price_cents, is_recurring, recurring_days,
    created_at, updated_at
"#;

#[derive(FromRow)]
struct ClassRow {
    id: String,
    trainer_id: String,
    name: String,
    description: String,
    date: NaiveDateTime,
    start_time: String,
    end_time: String,
    capacity: i64,
    enrolled: i64,
    location: String,
    price_cents: i64,
    is_recurring: i64,
    // JSON array of weekday tags
    recurring_days: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteClassRepository {
    pool: SqlitePool,
}

impl SqliteClassRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_class(row: ClassRow) -> Result<TrainerClass> {
        Ok(TrainerClass {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            trainer_id: Uuid::parse_str(&row.trainer_id)
                .map_err(|e| AppError::Database(e.to_string()))?,
            name: row.name,
            description: row.description,
            date: DateTime::from_naive_utc_and_offset(row.date, Utc),
            start_time: row.start_time,
            end_time: row.end_time,
            capacity: row.capacity,
            enrolled: row.enrolled,
            location: row.location,
            price_cents: row.price_cents,
            is_recurring: row.is_recurring != 0,
            recurring_days: serde_json::from_str(&row.recurring_days).map_err(|e| {
                AppError::Database(format!("Invalid recurring_days column: {}", e))
            })?,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }

    fn days_to_json(days: &[String]) -> Result<String> {
        serde_json::to_string(days)
            .map_err(|e| AppError::Internal(format!("Failed to encode recurring days: {}", e)))
    }
}

#[async_trait]
impl ClassRepository for SqliteClassRepository {
    async fn create(&self, class: NewClass) -> Result<TrainerClass> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let trainer_id_str = class.trainer_id.to_string();
        let date_naive = class.date.naive_utc();
        let days_json = Self::days_to_json(&class.recurring_days)?;
        let now_naive = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO classes (
                id, trainer_id, name, description, date, start_time, end_time,
                capacity, enrolled, location, price_cents, is_recurring,
                recurring_days, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, 0, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&trainer_id_str)
        .bind(&class.name)
        .bind(&class.description)
        .bind(date_naive)
        .bind(&class.start_time)
        .bind(&class.end_time)
        .bind(class.capacity)
        .bind(&class.location)
        .bind(class.price_cents)
        .bind(if class.is_recurring { 1i64 } else { 0i64 })
        .bind(&days_json)
        .bind(now_naive)
        .bind(now_naive)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve created class".to_string()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TrainerClass>> {
        let id_str = id.to_string();
        let row = sqlx::query_as::<_, ClassRow>(&format!(
            "SELECT {CLASS_COLUMNS} FROM classes WHERE id = ?"
        ))
        .bind(id_str)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(Self::row_to_class(r)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<TrainerClass>> {
        let rows = sqlx::query_as::<_, ClassRow>(&format!(
            "SELECT {CLASS_COLUMNS} FROM classes"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_class).collect()
    }

    async fn list_by_trainer(&self, trainer_id: Uuid) -> Result<Vec<TrainerClass>> {
        let trainer_id_str = trainer_id.to_string();
        let rows = sqlx::query_as::<_, ClassRow>(&format!(
            "SELECT {CLASS_COLUMNS} FROM classes WHERE trainer_id = ?"
        ))
        .bind(trainer_id_str)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_class).collect()
    }

    async fn list_upcoming(&self, now: DateTime<Utc>, limit: i64) -> Result<Vec<TrainerClass>> {
        let now_naive = now.naive_utc();
        let rows = sqlx::query_as::<_, ClassRow>(&format!(
            r#"
            SELECT {CLASS_COLUMNS} FROM classes
            WHERE date >= ?
            ORDER BY date ASC
            LIMIT ?
            "#
        ))
        .bind(now_naive)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_class).collect()
    }

    async fn update(&self, id: Uuid, update: ClassUpdate) -> Result<TrainerClass> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Class not found".to_string()))?;

        let id_str = id.to_string();
        let now_naive = Utc::now().naive_utc();
        let trainer_id_str = update.trainer_id.map(|t| t.to_string());
        let date_naive = update.date.map(|d| d.naive_utc());
        let is_recurring_int = update.is_recurring.map(|b| if b { 1i64 } else { 0i64 });
        let days_json = match &update.recurring_days {
            Some(days) => Some(Self::days_to_json(days)?),
            None => None,
        };

        sqlx::query(
            r#"
            UPDATE classes
            SET trainer_id = COALESCE(?, trainer_id),
                name = COALESCE(?, name),
                description = COALESCE(?, description),
                date = COALESCE(?, date),
                start_time = COALESCE(?, start_time),
                end_time = COALESCE(?, end_time),
                capacity = COALESCE(?, capacity),
                location = COALESCE(?, location),
                price_cents = COALESCE(?, price_cents),
                is_recurring = COALESCE(?, is_recurring),
                recurring_days = COALESCE(?, recurring_days),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&trainer_id_str)
        .bind(&update.name)
        .bind(&update.description)
        .bind(date_naive)
        .bind(&update.start_time)
        .bind(&update.end_time)
        .bind(update.capacity)
        .bind(&update.location)
        .bind(update.price_cents)
        .bind(is_recurring_int)
        .bind(&days_json)
        .bind(now_naive)
        .bind(&id_str)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve updated class".to_string()))
    }

    async fn set_enrolled(&self, id: Uuid, enrolled: i64) -> Result<TrainerClass> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Class not found".to_string()))?;

        let id_str = id.to_string();
        let now_naive = Utc::now().naive_utc();

        sqlx::query("UPDATE classes SET enrolled = ?, updated_at = ? WHERE id = ?")
            .bind(enrolled)
            .bind(now_naive)
            .bind(&id_str)
            .execute(&self.pool)
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve updated class".to_string()))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let id_str = id.to_string();
        sqlx::query("DELETE FROM classes WHERE id = ?")
            .bind(&id_str)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn count_upcoming(&self, now: DateTime<Utc>) -> Result<i64> {
        let now_naive = now.naive_utc();
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM classes WHERE date >= ?")
            .bind(now_naive)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

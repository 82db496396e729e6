use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDateTime, NaiveTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{Attendance, CheckIn, CheckInMethod},
    error::{AppError, Result},
    repository::AttendanceRepository,
};

const ATTENDANCE_COLUMNS: &str = r#"
    id, member_id, member_name, member_code, class_id, date, check_in_time,
    check_out_time, check_in_method, notes, created_at
"#;

#[derive(FromRow)]
struct AttendanceRow {
    id: String,
    member_id: String,
    member_name: Option<String>,
    member_code: Option<String>,
    class_id: Option<String>,
    date: NaiveDateTime,
    check_in_time: NaiveDateTime,
    check_out_time: Option<NaiveDateTime>,
    check_in_method: String,
    notes: Option<String>,
    created_at: NaiveDateTime,
}

pub struct SqliteAttendanceRepository {
    pool: SqlitePool,
}

impl SqliteAttendanceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_attendance(row: AttendanceRow) -> Result<Attendance> {
        let class_id = match row.class_id {
            Some(s) => {
                Some(Uuid::parse_str(&s).map_err(|e| AppError::Database(e.to_string()))?)
            }
            None => None,
        };

        Ok(Attendance {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            member_id: Uuid::parse_str(&row.member_id)
                .map_err(|e| AppError::Database(e.to_string()))?,
            member_name: row.member_name,
            member_code: row.member_code,
            class_id,
            date: DateTime::from_naive_utc_and_offset(row.date, Utc),
            check_in_time: DateTime::from_naive_utc_and_offset(row.check_in_time, Utc),
            check_out_time: row
                .check_out_time
                .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc)),
            check_in_method: Self::parse_check_in_method(&row.check_in_method)?,
            notes: row.notes,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
        })
    }

    fn parse_check_in_method(s: &str) -> Result<CheckInMethod> {
        match s {
            "qr" => Ok(CheckInMethod::Qr),
            "manual" => Ok(CheckInMethod::Manual),
            _ => Err(AppError::Database(format!("Invalid check-in method: {}", s))),
        }
    }

    fn check_in_method_to_str(method: CheckInMethod) -> &'static str {
        match method {
            CheckInMethod::Qr => "qr",
            CheckInMethod::Manual => "manual",
        }
    }
}

#[async_trait]
impl AttendanceRepository for SqliteAttendanceRepository {
    async fn create(&self, check_in: CheckIn) -> Result<Attendance> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let member_id_str = check_in.member_id.to_string();
        let class_id_str = check_in.class_id.map(|c| c.to_string());
        let now = Utc::now();
        let now_naive = now.naive_utc();
        let date_naive = check_in.date.unwrap_or(now).naive_utc();
        let method_str = Self::check_in_method_to_str(check_in.check_in_method);

        sqlx::query(
            r#"
            INSERT INTO attendance (
                id, member_id, member_name, member_code, class_id, date,
                check_in_time, check_out_time, check_in_method, notes, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, NULL, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&member_id_str)
        .bind(&check_in.member_name)
        .bind(&check_in.member_code)
        .bind(&class_id_str)
        .bind(date_naive)
        .bind(now_naive)
        .bind(method_str)
        .bind(&check_in.notes)
        .bind(now_naive)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created attendance record".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Attendance>> {
        let id_str = id.to_string();
        let row = sqlx::query_as::<_, AttendanceRow>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendance WHERE id = ?"
        ))
        .bind(id_str)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(Self::row_to_attendance(r)?)),
            None => Ok(None),
        }
    }

    async fn list_by_member(&self, member_id: Uuid) -> Result<Vec<Attendance>> {
        let member_id_str = member_id.to_string();
        let rows = sqlx::query_as::<_, AttendanceRow>(&format!(
            r#"
            SELECT {ATTENDANCE_COLUMNS} FROM attendance
            WHERE member_id = ?
            ORDER BY date DESC
            "#
        ))
        .bind(member_id_str)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_attendance).collect()
    }

    async fn list_for_day(&self, day: DateTime<Utc>) -> Result<Vec<Attendance>> {
        let start_of_day = day.date_naive().and_time(NaiveTime::MIN);
        let next_day = start_of_day + Duration::days(1);

        let rows = sqlx::query_as::<_, AttendanceRow>(&format!(
            r#"
            SELECT {ATTENDANCE_COLUMNS} FROM attendance
            WHERE date >= ? AND date < ?
            ORDER BY date DESC
            "#
        ))
        .bind(start_of_day)
        .bind(next_day)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_attendance).collect()
    }

    async fn set_check_out(&self, id: Uuid) -> Result<Attendance> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Attendance record not found".to_string()))?;

        let id_str = id.to_string();
        let now_naive = Utc::now().naive_utc();

        sqlx::query("UPDATE attendance SET check_out_time = ? WHERE id = ?")
            .bind(now_naive)
            .bind(&id_str)
            .execute(&self.pool)
            .await?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve updated attendance record".to_string())
        })
    }
}

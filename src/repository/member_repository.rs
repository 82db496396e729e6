use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{expiry_for, CreateMember, Member, MemberContactUpdate},
    error::{AppError, Result},
    repository::MemberRepository,
};

const MEMBER_COLUMNS: &str = r#"
    id, member_code, name, email, phone, address, package_id, package_name,
    start_date, expiry_date, notes, created_at, updated_at
"#;

// Database row struct that matches the SQLite schema
#[derive(FromRow)]
struct MemberRow {
    id: String,
    member_code: String,
    name: String,
    email: String,
    phone: String,
    address: String,
    package_id: String,
    package_name: String,
    start_date: NaiveDateTime,
    expiry_date: NaiveDateTime,
    notes: Option<String>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

#[derive(FromRow)]
struct PackageRef {
    name: String,
    duration_days: i64,
}

pub struct SqliteMemberRepository {
    pool: SqlitePool,
}

impl SqliteMemberRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_member(row: MemberRow) -> Result<Member> {
        Ok(Member {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            member_code: row.member_code,
            name: row.name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            package_id: Uuid::parse_str(&row.package_id)
                .map_err(|e| AppError::Database(e.to_string()))?,
            package_name: row.package_name,
            start_date: DateTime::from_naive_utc_and_offset(row.start_date, Utc),
            expiry_date: DateTime::from_naive_utc_and_offset(row.expiry_date, Utc),
            notes: row.notes,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }
}

#[async_trait]
impl MemberRepository for SqliteMemberRepository {
    async fn create(&self, member: CreateMember) -> Result<Member> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let package_id_str = member.package_id.to_string();
        let start_naive = member.start_date.naive_utc();
        let expiry_naive = member.expiry_date.naive_utc();
        let now_naive = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO members (
                id, member_code, name, email, phone, address,
                package_id, package_name, start_date, expiry_date, notes,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&member.member_code)
        .bind(&member.name)
        .bind(&member.email)
        .bind(&member.phone)
        .bind(&member.address)
        .bind(&package_id_str)
        .bind(&member.package_name)
        .bind(start_naive)
        .bind(expiry_naive)
        .bind(&member.notes)
        .bind(now_naive)
        .bind(now_naive)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve created member".to_string()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Member>> {
        let id_str = id.to_string();
        let row = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE id = ?"
        ))
        .bind(id_str)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(Self::row_to_member(r)?)),
            None => Ok(None),
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Member>> {
        let rows = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE member_code = ?"
        ))
        .bind(code)
        .fetch_all(&self.pool)
        .await?;

        if rows.len() > 1 {
            return Err(AppError::Conflict(format!(
                "Member code {} matches more than one member",
                code
            )));
        }

        match rows.into_iter().next() {
            Some(r) => Ok(Some(Self::row_to_member(r)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Member>> {
        let rows = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_member).collect()
    }

    async fn list_expiring_within(&self, now: DateTime<Utc>, days: i64) -> Result<Vec<Member>> {
        let lower = now.naive_utc();
        let upper = (now + chrono::Duration::days(days)).naive_utc();

        let rows = sqlx::query_as::<_, MemberRow>(&format!(
            r#"
            SELECT {MEMBER_COLUMNS} FROM members
            WHERE expiry_date > ? AND expiry_date <= ?
            ORDER BY expiry_date ASC
            "#
        ))
        .bind(lower)
        .bind(upper)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_member).collect()
    }

    async fn update_contact(&self, id: Uuid, update: MemberContactUpdate) -> Result<Member> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Member not found".to_string()))?;

        let id_str = id.to_string();
        let now_naive = Utc::now().naive_utc();

        sqlx::query(
            r#"
            UPDATE members
            SET name = COALESCE(?, name),
                email = COALESCE(?, email),
                phone = COALESCE(?, phone),
                address = COALESCE(?, address),
                notes = COALESCE(?, notes),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&update.name)
        .bind(&update.email)
        .bind(&update.phone)
        .bind(&update.address)
        .bind(&update.notes)
        .bind(now_naive)
        .bind(&id_str)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve updated member".to_string()))
    }

    async fn renew(
        &self,
        id: Uuid,
        package_id: Uuid,
        start_date: DateTime<Utc>,
    ) -> Result<Member> {
        let id_str = id.to_string();
        let package_id_str = package_id.to_string();

        let mut tx = self.pool.begin().await?;

        let exists: Option<(String,)> = sqlx::query_as("SELECT id FROM members WHERE id = ?")
            .bind(&id_str)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(AppError::NotFound("Member not found".to_string()));
        }

        let package = sqlx::query_as::<_, PackageRef>(
            "SELECT name, duration_days FROM packages WHERE id = ?",
        )
        .bind(&package_id_str)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Package not found".to_string()))?;

        let expiry_date = expiry_for(start_date, package.duration_days);
        let now_naive = Utc::now().naive_utc();

        sqlx::query(
            r#"
            UPDATE members
            SET package_id = ?,
                package_name = ?,
                start_date = ?,
                expiry_date = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&package_id_str)
        .bind(&package.name)
        .bind(start_date.naive_utc())
        .bind(expiry_date.naive_utc())
        .bind(now_naive)
        .bind(&id_str)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve renewed member".to_string()))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let id_str = id.to_string();
        sqlx::query("DELETE FROM members WHERE id = ?")
            .bind(&id_str)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM members")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn count_active(&self, now: DateTime<Utc>) -> Result<i64> {
        let now_naive = now.naive_utc();
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM members WHERE expiry_date > ?")
                .bind(now_naive)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{NewPackage, Package, PackageUpdate},
    error::{AppError, Result},
    repository::PackageRepository,
};

#[derive(FromRow)]
struct PackageRow {
    id: String,
    name: String,
    description: String,
    price_cents: i64,
    duration_days: i64,
    // JSON array of feature strings
    features: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqlitePackageRepository {
    pool: SqlitePool,
}

impl SqlitePackageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_package(row: PackageRow) -> Result<Package> {
        Ok(Package {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            name: row.name,
            description: row.description,
            price_cents: row.price_cents,
            duration_days: row.duration_days,
            features: serde_json::from_str(&row.features)
                .map_err(|e| AppError::Database(format!("Invalid features column: {}", e)))?,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }

    fn features_to_json(features: &[String]) -> Result<String> {
        serde_json::to_string(features)
            .map_err(|e| AppError::Internal(format!("Failed to encode features: {}", e)))
    }
}

#[async_trait]
impl PackageRepository for SqlitePackageRepository {
    async fn create(&self, package: NewPackage) -> Result<Package> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let features_json = Self::features_to_json(&package.features)?;
        let now_naive = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO packages (
                id, name, description, price_cents, duration_days, features,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&package.name)
        .bind(&package.description)
        .bind(package.price_cents)
        .bind(package.duration_days)
        .bind(&features_json)
        .bind(now_naive)
        .bind(now_naive)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve created package".to_string()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Package>> {
        let id_str = id.to_string();
        let row = sqlx::query_as::<_, PackageRow>(
            r#"
            SELECT id, name, description, price_cents, duration_days, features,
                   created_at, updated_at
            FROM packages
            WHERE id = ?
            "#,
        )
        .bind(id_str)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(Self::row_to_package(r)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Package>> {
        let rows = sqlx::query_as::<_, PackageRow>(
            r#"
            SELECT id, name, description, price_cents, duration_days, features,
                   created_at, updated_at
            FROM packages
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_package).collect()
    }

    async fn update(&self, id: Uuid, update: PackageUpdate) -> Result<Package> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Package not found".to_string()))?;

        let id_str = id.to_string();
        let now_naive = Utc::now().naive_utc();
        let features_json = match &update.features {
            Some(features) => Some(Self::features_to_json(features)?),
            None => None,
        };

        sqlx::query(
            r#"
            UPDATE packages
            SET name = COALESCE(?, name),
                description = COALESCE(?, description),
                price_cents = COALESCE(?, price_cents),
                duration_days = COALESCE(?, duration_days),
                features = COALESCE(?, features),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&update.name)
        .bind(&update.description)
        .bind(update.price_cents)
        .bind(update.duration_days)
        .bind(&features_json)
        .bind(now_naive)
        .bind(&id_str)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve updated package".to_string()))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let id_str = id.to_string();
        sqlx::query("DELETE FROM packages WHERE id = ?")
            .bind(&id_str)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

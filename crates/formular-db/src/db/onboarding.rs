use chrono::{DateTime, Utc};
use formular_core::{
    models::{merge_form_data_section, OnboardingProgress},
    AppError,
};
use serde_json::Value as JsonValue;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

#[derive(sqlx::FromRow)]
struct OnboardingProgressRow {
    subsidiary_id: Uuid,
    current_step: i32,
    form_data: JsonValue,
    updated_at: DateTime<Utc>,
}

impl From<OnboardingProgressRow> for OnboardingProgress {
    fn from(row: OnboardingProgressRow) -> Self {
        OnboardingProgress {
            subsidiary_id: row.subsidiary_id,
            current_step: row.current_step,
            form_data: row.form_data,
            last_updated: row.updated_at,
        }
    }
}

/// Repository for the per-subsidiary onboarding progress record.
///
/// Writes are read-modify-write without optimistic concurrency; the last
/// writer wins per section key.
#[derive(Clone)]
pub struct OnboardingRepository {
    pool: PgPool,
}

impl OnboardingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the progress record for a subsidiary
    #[tracing::instrument(skip(self), fields(db.table = "onboarding_progress", db.operation = "select", db.record_id = %subsidiary_id))]
    pub async fn get(&self, subsidiary_id: Uuid) -> Result<Option<OnboardingProgress>, AppError> {
        let row = sqlx::query_as::<Postgres, OnboardingProgressRow>(
            "SELECT subsidiary_id, current_step, form_data, updated_at FROM onboarding_progress WHERE subsidiary_id = $1"
        )
        .bind(subsidiary_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(OnboardingProgress::from))
    }

    /// Upsert the current wizard step, creating the record on first write
    #[tracing::instrument(skip(self), fields(db.table = "onboarding_progress", db.operation = "upsert", db.record_id = %subsidiary_id))]
    pub async fn upsert_step(
        &self,
        subsidiary_id: Uuid,
        current_step: i32,
    ) -> Result<OnboardingProgress, AppError> {
        let row = sqlx::query_as::<Postgres, OnboardingProgressRow>(
            r#"
            INSERT INTO onboarding_progress (subsidiary_id, current_step, form_data, updated_at)
            VALUES ($1, $2, '{}'::jsonb, NOW())
            ON CONFLICT (subsidiary_id)
            DO UPDATE SET current_step = EXCLUDED.current_step, updated_at = NOW()
            RETURNING subsidiary_id, current_step, form_data, updated_at
            "#,
        )
        .bind(subsidiary_id)
        .bind(current_step)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    /// Shallow-merge `value` into one section of the form data
    /// (e.g. `documents`, `orderForms`) and persist the result.
    #[tracing::instrument(skip(self, value), fields(db.table = "onboarding_progress", db.operation = "upsert", db.record_id = %subsidiary_id, section = %section))]
    pub async fn merge_form_data(
        &self,
        subsidiary_id: Uuid,
        section: &str,
        value: &JsonValue,
    ) -> Result<OnboardingProgress, AppError> {
        let mut form_data = self
            .get(subsidiary_id)
            .await?
            .map(|p| p.form_data)
            .unwrap_or_else(|| JsonValue::Object(serde_json::Map::new()));

        merge_form_data_section(&mut form_data, section, value);

        let row = sqlx::query_as::<Postgres, OnboardingProgressRow>(
            r#"
            INSERT INTO onboarding_progress (subsidiary_id, current_step, form_data, updated_at)
            VALUES ($1, 0, $2, NOW())
            ON CONFLICT (subsidiary_id)
            DO UPDATE SET form_data = EXCLUDED.form_data, updated_at = NOW()
            RETURNING subsidiary_id, current_step, form_data, updated_at
            "#,
        )
        .bind(subsidiary_id)
        .bind(&form_data)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    /// Replace an entire section of the form data (no per-key merge).
    #[tracing::instrument(skip(self, value), fields(db.table = "onboarding_progress", db.operation = "update", db.record_id = %subsidiary_id, section = %section))]
    pub async fn replace_section(
        &self,
        subsidiary_id: Uuid,
        section: &str,
        value: &JsonValue,
    ) -> Result<OnboardingProgress, AppError> {
        let mut form_data = self
            .get(subsidiary_id)
            .await?
            .map(|p| p.form_data)
            .unwrap_or_else(|| JsonValue::Object(serde_json::Map::new()));

        if !form_data.is_object() {
            form_data = JsonValue::Object(serde_json::Map::new());
        }
        if let JsonValue::Object(root) = &mut form_data {
            root.insert(section.to_string(), value.clone());
        }

        let row = sqlx::query_as::<Postgres, OnboardingProgressRow>(
            r#"
            INSERT INTO onboarding_progress (subsidiary_id, current_step, form_data, updated_at)
            VALUES ($1, 0, $2, NOW())
            ON CONFLICT (subsidiary_id)
            DO UPDATE SET form_data = EXCLUDED.form_data, updated_at = NOW()
            RETURNING subsidiary_id, current_step, form_data, updated_at
            "#,
        )
        .bind(subsidiary_id)
        .bind(&form_data)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }
}

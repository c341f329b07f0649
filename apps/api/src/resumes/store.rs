//! Persistence seam for saved resumes.
//!
//! Every operation is scoped to the owning user: a resume that exists but
//! belongs to someone else is indistinguishable from one that does not exist.
//! "Not found" is `None`/`false`; failures are `Err`.
//!
//! `AppState` holds an `Arc<dyn ResumeStore>`; production uses `PgResumeStore`.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{ResumeInput, SavedResume, SavedResumeRow};

#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn create(&self, user_id: &str, input: &ResumeInput) -> Result<SavedResume, AppError>;

    /// Most recently updated first.
    async fn list(&self, user_id: &str) -> Result<Vec<SavedResume>, AppError>;

    async fn get(&self, user_id: &str, id: Uuid) -> Result<Option<SavedResume>, AppError>;

    async fn update(
        &self,
        user_id: &str,
        id: Uuid,
        input: &ResumeInput,
    ) -> Result<Option<SavedResume>, AppError>;

    /// Returns `false` when nothing matched.
    async fn delete(&self, user_id: &str, id: Uuid) -> Result<bool, AppError>;
}

/// PostgreSQL-backed store over the `saved_resumes` table.
#[derive(Clone)]
pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn create(&self, user_id: &str, input: &ResumeInput) -> Result<SavedResume, AppError> {
        let row = sqlx::query_as::<_, SavedResumeRow>(
            r#"
            INSERT INTO saved_resumes (id, user_id, title, target_role, template, data)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(input.title.trim())
        .bind(input.target_role_normalized())
        .bind(input.template_or_default())
        .bind(Json(&input.data))
        .fetch_one(&self.pool)
        .await?;

        info!("Created resume {} for user {user_id}", row.id);
        Ok(row.into())
    }

    async fn list(&self, user_id: &str) -> Result<Vec<SavedResume>, AppError> {
        let rows = sqlx::query_as::<_, SavedResumeRow>(
            "SELECT * FROM saved_resumes WHERE user_id = $1 ORDER BY updated_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        debug!("Loaded {} resumes for user {user_id}", rows.len());
        Ok(rows.into_iter().map(SavedResume::from).collect())
    }

    async fn get(&self, user_id: &str, id: Uuid) -> Result<Option<SavedResume>, AppError> {
        let row = sqlx::query_as::<_, SavedResumeRow>(
            "SELECT * FROM saved_resumes WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SavedResume::from))
    }

    async fn update(
        &self,
        user_id: &str,
        id: Uuid,
        input: &ResumeInput,
    ) -> Result<Option<SavedResume>, AppError> {
        let row = sqlx::query_as::<_, SavedResumeRow>(
            r#"
            UPDATE saved_resumes
            SET title = $1, target_role = $2, template = $3, data = $4, updated_at = NOW()
            WHERE id = $5 AND user_id = $6
            RETURNING *
            "#,
        )
        .bind(input.title.trim())
        .bind(input.target_role_normalized())
        .bind(input.template_or_default())
        .bind(Json(&input.data))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        if row.is_some() {
            info!("Updated resume {id} for user {user_id}");
        }
        Ok(row.map(SavedResume::from))
    }

    async fn delete(&self, user_id: &str, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM saved_resumes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("Deleted resume {id} for user {user_id}");
        }
        Ok(deleted)
    }
}

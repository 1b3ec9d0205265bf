//! User profile lookups.
//!
//! Profiles are owned upstream; this repository only reads the public
//! fields that roster views need.

use domain::models::UserProfile;
use domain::EngineError;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::UserProfileEntity;
use crate::metrics::QueryTimer;

/// Read-only repository over the users table.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user's public profile by id.
    pub async fn find_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>, EngineError> {
        let timer = QueryTimer::new("find_user_profile");
        let result = sqlx::query_as::<_, UserProfileEntity>(
            r#"
            SELECT id, nickname, avatar, mobile, gender
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        timer.record();
        Ok(result.map(Into::into))
    }

    /// Batch profile lookup. Unknown ids are silently absent from the result.
    pub async fn find_profiles(&self, user_ids: &[Uuid]) -> Result<Vec<UserProfile>, EngineError> {
        let timer = QueryTimer::new("find_user_profiles");
        let result = sqlx::query_as::<_, UserProfileEntity>(
            r#"
            SELECT id, nickname, avatar, mobile, gender
            FROM users
            WHERE id = ANY($1)
            ORDER BY nickname ASC
            "#,
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await?;
        timer.record();
        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    // UserRepository queries need a database connection and are covered by
    // the integration tests.
}

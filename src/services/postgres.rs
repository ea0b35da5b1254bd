use crate::models::{CreateMatchRequest, DemoUser, Match, MatchStatus, UpdateScoreRequest};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),
}

const MATCH_COLUMNS: &str = "id, sport, home_team, away_team, status, start_time, end_time, home_score, away_score, created_at";

fn match_from_row(row: &PgRow) -> Result<Match, sqlx::Error> {
    Ok(Match {
        id: row.try_get("id")?,
        sport: row.try_get("sport")?,
        home_team: row.try_get("home_team")?,
        away_team: row.try_get("away_team")?,
        status: row.try_get("status")?,
        start_time: row.try_get("start_time")?,
        end_time: row.try_get("end_time")?,
        home_score: row.try_get("home_score")?,
        away_score: row.try_get("away_score")?,
        created_at: row.try_get("created_at")?,
    })
}

fn demo_user_from_row(row: &PgRow) -> Result<DemoUser, sqlx::Error> {
    Ok(DemoUser {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        created_at: row.try_get("created_at")?,
    })
}

/// PostgreSQL client for the matches and demo users tables
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Connect, then run embedded migrations
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Wrap an existing pool without running migrations
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List matches, newest first
    pub async fn list_matches(&self, limit: u32) -> Result<Vec<Match>, PostgresError> {
        let query = format!(
            "SELECT {} FROM matches ORDER BY created_at DESC, id DESC LIMIT $1",
            MATCH_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;

        let matches = rows
            .iter()
            .map(match_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Listed {} matches (limit {})", matches.len(), limit);

        Ok(matches)
    }

    /// Fetch a single match by id
    pub async fn get_match(&self, id: i64) -> Result<Match, PostgresError> {
        let query = format!("SELECT {} FROM matches WHERE id = $1", MATCH_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| PostgresError::NotFound(format!("match {}", id)))?;

        Ok(match_from_row(&row)?)
    }

    /// Insert a validated match with its initial status
    pub async fn create_match(
        &self,
        req: &CreateMatchRequest,
        status: MatchStatus,
    ) -> Result<Match, PostgresError> {
        let query = format!(
            r#"
            INSERT INTO matches (sport, home_team, away_team, status, start_time, end_time, home_score, away_score)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            MATCH_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(&req.sport)
            .bind(&req.home_team)
            .bind(&req.away_team)
            .bind(status)
            .bind(req.start_time)
            .bind(req.end_time)
            .bind(req.home_score.unwrap_or(0))
            .bind(req.away_score.unwrap_or(0))
            .fetch_one(&self.pool)
            .await?;

        let created = match_from_row(&row)?;

        tracing::info!(
            "Created match {}: {} vs {} ({})",
            created.id,
            created.home_team,
            created.away_team,
            created.status
        );

        Ok(created)
    }

    /// Overwrite the score of a match
    pub async fn update_score(
        &self,
        id: i64,
        req: &UpdateScoreRequest,
    ) -> Result<Match, PostgresError> {
        let query = format!(
            r#"
            UPDATE matches
            SET home_score = $2, away_score = $3
            WHERE id = $1
            RETURNING {}
            "#,
            MATCH_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(id)
            .bind(req.home_score)
            .bind(req.away_score)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| PostgresError::NotFound(format!("match {}", id)))?;

        tracing::debug!("Updated score for match {}: {}-{}", id, req.home_score, req.away_score);

        Ok(match_from_row(&row)?)
    }

    /// Insert a demo user
    pub async fn create_demo_user(&self, name: &str, email: &str) -> Result<DemoUser, PostgresError> {
        let query = r#"
            INSERT INTO demo_users (name, email)
            VALUES ($1, $2)
            RETURNING id, name, email, created_at
        "#;

        let row = sqlx::query(query)
            .bind(name)
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(demo_user_from_row(&row)?)
    }

    /// Fetch a demo user by id
    pub async fn get_demo_user(&self, id: i64) -> Result<Option<DemoUser>, PostgresError> {
        let query = r#"
            SELECT id, name, email, created_at
            FROM demo_users
            WHERE id = $1
        "#;

        let row = sqlx::query(query).bind(id).fetch_optional(&self.pool).await?;

        Ok(row.as_ref().map(demo_user_from_row).transpose()?)
    }

    /// Rename a demo user
    pub async fn rename_demo_user(&self, id: i64, name: &str) -> Result<DemoUser, PostgresError> {
        let query = r#"
            UPDATE demo_users
            SET name = $2
            WHERE id = $1
            RETURNING id, name, email, created_at
        "#;

        let row = sqlx::query(query)
            .bind(id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| PostgresError::NotFound(format!("demo user {}", id)))?;

        Ok(demo_user_from_row(&row)?)
    }

    /// Delete a demo user, returning whether a row was removed
    pub async fn delete_demo_user(&self, id: i64) -> Result<bool, PostgresError> {
        let result = sqlx::query("DELETE FROM demo_users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

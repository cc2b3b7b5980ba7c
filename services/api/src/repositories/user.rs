//! User repository for database operations

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use tracing::info;

use crate::models::{NewUser, Preferences, User};
use crate::password::hash_password;

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user.
    ///
    /// Uniqueness of username and email is enforced by the database, so a
    /// duplicate signup fails without a partial write.
    pub async fn create(&self, new_user: &NewUser) -> Result<User, sqlx::Error> {
        info!("Creating new user: {}", new_user.username);

        let password_hash = hash_password(&new_user.password);

        let row = sqlx::query(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING username, email, password_hash, created_at, points, streak,
                      last_login, last_email_sent, preferences
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user_from_row(&row))
    }

    /// Find a user by username
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT username, email, password_hash, created_at, points, streak,
                   last_login, last_email_sent, preferences
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| user_from_row(&row)))
    }

    /// Replace the user's preferences wholesale
    pub async fn update_preferences(
        &self,
        username: &str,
        preferences: &Preferences,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET preferences = $2
            WHERE username = $1
            "#,
        )
        .bind(username)
        .bind(Json(preferences))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Store a new password hash
    pub async fn update_password(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $2
            WHERE username = $1
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Persist the streak computed for this login and stamp last_login
    pub async fn record_login(
        &self,
        username: &str,
        streak: i64,
        now: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE users
            SET streak = $2, last_login = $3
            WHERE username = $1
            "#,
        )
        .bind(username)
        .bind(streak)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Stamp the time a digest email was last sent
    pub async fn record_email_sent(
        &self,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE users
            SET last_email_sent = $2
            WHERE username = $1
            "#,
        )
        .bind(username)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Add points to the user's total, returning the new total
    pub async fn add_points(
        &self,
        username: &str,
        points: i64,
    ) -> Result<Option<i64>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            UPDATE users
            SET points = points + $2
            WHERE username = $1
            RETURNING points
            "#,
        )
        .bind(username)
        .bind(points)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| row.get("points")))
    }

    /// Delete a user
    pub async fn delete(&self, username: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn user_from_row(row: &PgRow) -> User {
    let preferences: Option<Json<Preferences>> = row.get("preferences");

    User {
        username: row.get("username"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        created_at: row.get("created_at"),
        points: row.get("points"),
        streak: row.get("streak"),
        last_login: row.get("last_login"),
        last_email_sent: row.get("last_email_sent"),
        preferences: preferences.map(|p| p.0),
    }
}

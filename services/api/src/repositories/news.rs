//! News cache repository for database operations

use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use tracing::info;

use crate::models::{Article, NewsCacheEntry, Preferences};

/// News cache repository; one live entry per user, keyed by username
#[derive(Clone)]
pub struct NewsCacheRepository {
    pool: PgPool,
}

impl NewsCacheRepository {
    /// Create a new news cache repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the cache entry for a user
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<NewsCacheEntry>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT username, fetched_at, preferences, articles
            FROM news_cache
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| entry_from_row(&row)))
    }

    /// Replace the user's cache entry with a freshly fetched one.
    ///
    /// Prior isRead/readingTime state is discarded with the old article set.
    pub async fn upsert(&self, entry: &NewsCacheEntry) -> Result<(), sqlx::Error> {
        info!("Storing fetched articles for user: {}", entry.username);

        sqlx::query(
            r#"
            INSERT INTO news_cache (username, fetched_at, preferences, articles)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (username) DO UPDATE
            SET fetched_at = EXCLUDED.fetched_at,
                preferences = EXCLUDED.preferences,
                articles = EXCLUDED.articles
            "#,
        )
        .bind(&entry.username)
        .bind(entry.fetched_at)
        .bind(Json(&entry.preferences))
        .bind(Json(&entry.articles))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Rewrite the article list of an existing entry, keeping its fetch
    /// timestamp and preferences snapshot
    pub async fn update_articles(
        &self,
        username: &str,
        articles: &[Article],
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE news_cache
            SET articles = $2
            WHERE username = $1
            "#,
        )
        .bind(username)
        .bind(Json(articles))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Dump every cache entry (admin/debug)
    pub async fn all(&self) -> Result<Vec<NewsCacheEntry>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT username, fetched_at, preferences, articles
            FROM news_cache
            ORDER BY username
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(entry_from_row).collect())
    }

    /// Delete the cache entry for a user
    pub async fn delete(&self, username: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM news_cache
            WHERE username = $1
            "#,
        )
        .bind(username)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn entry_from_row(row: &PgRow) -> NewsCacheEntry {
    let preferences: Json<Preferences> = row.get("preferences");
    let articles: Json<Vec<Article>> = row.get("articles");

    NewsCacheEntry {
        username: row.get("username"),
        fetched_at: row.get("fetched_at"),
        preferences: preferences.0,
        articles: articles.0,
    }
}

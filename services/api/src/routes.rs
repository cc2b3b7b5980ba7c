//! HTTP API routes and handlers

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch, post, put},
};
use axum_extra::extract::CookieJar;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};

use crate::{
    error::{ApiError, ApiResult},
    models::{
        NewUser, Preferences, User,
        news::{self, Article, NewsCacheEntry},
    },
    password, refresh,
    state::AppState,
    streak, validation,
};

/// Request for user login
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request for password update
#[derive(Deserialize)]
pub struct UpdatePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Query parameters for the mark-as-read operation
#[derive(Deserialize)]
pub struct MarkAsReadParams {
    pub article_url: String,
    #[serde(rename = "readingTime", default)]
    pub reading_time: i64,
}

/// Query parameters for the points update operation
#[derive(Deserialize)]
pub struct PointsUpdateParams {
    pub username: String,
    pub points: i64,
}

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/status", get(status))
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/preferences/:username", put(update_preferences))
        .route("/news/:username", get(get_news))
        .route("/news/:username/mark_as_read", patch(mark_as_read))
        .route("/news/:username/statistics", get(news_statistics))
        .route("/user/:username", get(get_user_preferences).delete(delete_user))
        .route("/user/:username/password", put(update_password))
        .route("/news_articles/", get(all_news_articles))
        .route("/podcast_script/:username", get(podcast_script))
        .route("/points/update", post(update_points))
        .route("/points/:username", get(get_points))
        .route("/streak/:username", get(get_streak))
        .with_state(state)
}

/// Report whether an identity cookie is present
pub async fn status(jar: CookieJar) -> Json<serde_json::Value> {
    match jar.get("username") {
        Some(cookie) => Json(json!({"isLoggedIn": true, "username": cookie.value()})),
        None => Json(json!({"isLoggedIn": false, "username": null})),
    }
}

/// Register a new account
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> ApiResult<Json<serde_json::Value>> {
    validation::validate_username(&payload.username).map_err(ApiError::Validation)?;
    validation::validate_email(&payload.email).map_err(ApiError::Validation)?;
    validation::validate_password(&payload.password).map_err(ApiError::Validation)?;

    info!("Signup attempt for user: {}", payload.username);

    state
        .user_repository
        .create(&payload)
        .await
        .map_err(conflict_on_unique)?;

    Ok(Json(json!({"message": "User created successfully"})))
}

/// Log a user in, update the login streak, and send a digest when one is due
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    info!("Login attempt for user: {}", payload.username);

    let user = state
        .user_repository
        .find_by_username(&payload.username)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !password::verify_password(&user.password_hash, &payload.password) {
        return Err(ApiError::InvalidCredentials);
    }

    let now = Utc::now();
    let streak = streak::next_streak(user.streak, user.last_login, now);
    state
        .user_repository
        .record_login(&user.username, streak, now)
        .await?;

    maybe_send_digest(&state, &user, now).await;

    Ok(Json(json!({"message": "Login successful", "username": user.username})))
}

/// Replace the user's preferences
pub async fn update_preferences(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(payload): Json<Preferences>,
) -> ApiResult<Json<serde_json::Value>> {
    validation::validate_frequency(payload.frequency).map_err(ApiError::Validation)?;

    let updated = state
        .user_repository
        .update_preferences(&username, &payload)
        .await?;

    if updated {
        Ok(Json(json!({"message": "Preferences updated successfully"})))
    } else {
        Err(ApiError::NotFound("User not found".to_string()))
    }
}

/// Return the user's current article set, refetching when the cache is stale
pub async fn get_news(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let user = find_user(&state, &username).await?;
    let preferences = user
        .preferences
        .as_ref()
        .ok_or_else(|| ApiError::InvalidState("User preferences not set".to_string()))?;

    let entry = resolve_news(&state, &user.username, preferences).await?;

    Ok(Json(json!({"articles": entry.articles})))
}

/// Flip an article to read and record its reading time.
///
/// A url with no match in the cached set is a silent no-op that still
/// returns success.
pub async fn mark_as_read(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(params): Query<MarkAsReadParams>,
) -> ApiResult<Json<serde_json::Value>> {
    let mut entry = state
        .news_repository
        .find_by_username(&username)
        .await?
        .ok_or_else(|| ApiError::NotFound("No cached news for user".to_string()))?;

    let matched = news::mark_article_read(&mut entry.articles, &params.article_url, params.reading_time);
    if !matched {
        info!(
            "No cached article with url {} for user {}",
            params.article_url, username
        );
    }
    state
        .news_repository
        .update_articles(&username, &entry.articles)
        .await?;

    Ok(Json(json!({"message": "Article marked as read"})))
}

/// Aggregate read/unread counts and summed reading time
pub async fn news_statistics(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let entry = state
        .news_repository
        .find_by_username(&username)
        .await?
        .ok_or_else(|| ApiError::NotFound("No cached news for user".to_string()))?;

    let stats = news::reading_stats(&entry.articles);

    Ok(Json(json!({
        "username": username,
        "read_count": stats.read_count,
        "unread_count": stats.unread_count,
        "total_reading_time": stats.total_reading_time,
    })))
}

/// Return the stored preferences for the profile page
pub async fn get_user_preferences(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let user = find_user(&state, &username).await?;

    Ok(Json(json!({"username": user.username, "preferences": user.preferences})))
}

/// Change the user's password after checking the current one
pub async fn update_password(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(payload): Json<UpdatePasswordRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let user = find_user(&state, &username).await?;

    if !password::verify_password(&user.password_hash, &payload.current_password) {
        return Err(ApiError::InvalidState(
            "Current password is incorrect".to_string(),
        ));
    }

    state
        .user_repository
        .update_password(&username, &password::hash_password(&payload.new_password))
        .await?;

    Ok(Json(json!({"message": "Password updated successfully"})))
}

/// Delete a user together with their cached articles
pub async fn delete_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    // Cache entry first, so the user row is always the last thing to go
    state.news_repository.delete(&username).await?;

    let deleted = state.user_repository.delete(&username).await?;
    if !deleted {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    Ok(Json(json!({
        "message": format!("User {username} and articles associated with the account are deleted"),
    })))
}

/// Dump every cached entry (admin/debug, no auth)
pub async fn all_news_articles(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<NewsCacheEntry>>> {
    let entries = state.news_repository.all().await?;
    Ok(Json(entries))
}

/// Generate a podcast script from the user's cached article set
pub async fn podcast_script(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let user = find_user(&state, &username).await?;

    let script_client = state.script_client.as_ref().ok_or_else(|| {
        ApiError::InvalidState("Podcast generation is not configured".to_string())
    })?;

    let entry = state
        .news_repository
        .find_by_username(&user.username)
        .await?
        .ok_or_else(|| {
            ApiError::InvalidState("No cached news for user; fetch news first".to_string())
        })?;

    if entry.articles.is_empty() {
        return Err(ApiError::InvalidState(
            "No cached news for user; fetch news first".to_string(),
        ));
    }

    let script = script_client.generate(&user.username, &entry.articles).await?;

    Ok(Json(json!({"podcast_script": script})))
}

/// Add points to the user's total
pub async fn update_points(
    State(state): State<AppState>,
    Query(params): Query<PointsUpdateParams>,
) -> ApiResult<Json<serde_json::Value>> {
    let total = state
        .user_repository
        .add_points(&params.username, params.points)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(json!({"username": params.username, "points": total})))
}

/// Return the user's point total
pub async fn get_points(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let user = find_user(&state, &username).await?;
    Ok(Json(json!({"username": user.username, "points": user.points})))
}

/// Return the user's login streak
pub async fn get_streak(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let user = find_user(&state, &username).await?;
    Ok(Json(json!({"username": user.username, "streak": user.streak})))
}

async fn find_user(state: &AppState, username: &str) -> ApiResult<User> {
    state
        .user_repository
        .find_by_username(username)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
}

/// Run the refresh policy for one user and return the live cache entry.
///
/// On a refetch the new entry replaces the old one wholesale; previously
/// recorded isRead/readingTime state is discarded.
async fn resolve_news(
    state: &AppState,
    username: &str,
    preferences: &Preferences,
) -> ApiResult<NewsCacheEntry> {
    let cached = state.news_repository.find_by_username(username).await?;
    let now = Utc::now();

    if !refresh::needs_refetch(cached.as_ref(), preferences, now) {
        if let Some(entry) = cached {
            return Ok(entry);
        }
    }

    let articles: Vec<Article> = state
        .news_client
        .fetch_headlines(preferences)
        .await
        .into_iter()
        .map(|raw| Article::from_raw(raw, preferences.summary_style))
        .collect();

    let entry = NewsCacheEntry {
        username: username.to_string(),
        fetched_at: now,
        preferences: preferences.clone(),
        articles,
    };
    state.news_repository.upsert(&entry).await?;

    Ok(entry)
}

/// Send a digest on login when one is due.
///
/// Failures are logged and never fail the login itself.
async fn maybe_send_digest(state: &AppState, user: &User, now: DateTime<Utc>) {
    let Some(email_client) = &state.email_client else {
        return;
    };
    let Some(preferences) = &user.preferences else {
        return;
    };

    if !refresh::digest_due(user.last_email_sent, preferences.frequency, now) {
        return;
    }

    let entry = match resolve_news(state, &user.username, preferences).await {
        Ok(entry) => entry,
        Err(e) => {
            warn!("Skipping digest for {}: {}", user.username, e);
            return;
        }
    };

    let sent = email_client
        .send_digest(
            &user.email,
            &user.username,
            &entry.articles,
            preferences.summary_style,
        )
        .await;

    if sent {
        if let Err(e) = state
            .user_repository
            .record_email_sent(&user.username, now)
            .await
        {
            error!("Failed to record digest timestamp for {}: {}", user.username, e);
        }
    }
}

fn conflict_on_unique(e: sqlx::Error) -> ApiError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            ApiError::Conflict("Username or email already exists".to_string())
        }
        _ => ApiError::from(e),
    }
}

//! Application state shared across handlers

use sqlx::PgPool;

use crate::{
    clients::{EmailClient, NewsClient, ScriptClient},
    repositories::{NewsCacheRepository, UserRepository},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub user_repository: UserRepository,
    pub news_repository: NewsCacheRepository,
    pub news_client: NewsClient,
    /// Absent when the email provider is not configured
    pub email_client: Option<EmailClient>,
    /// Absent when the language-model provider is not configured
    pub script_client: Option<ScriptClient>,
}

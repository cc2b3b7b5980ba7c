use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

mod clients;
mod config;
mod error;
mod models;
mod password;
mod refresh;
mod repositories;
mod routes;
mod state;
mod streak;
mod summary;
mod validation;

use axum::http::{HeaderValue, Method, header::CONTENT_TYPE};
use common::database::{DatabaseConfig, health_check, init_pool};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::{
    clients::{EmailClient, NewsClient, ScriptClient},
    config::AppConfig,
    repositories::{NewsCacheRepository, UserRepository},
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting news API service");

    let config = AppConfig::from_env();

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    sqlx::migrate!().run(&pool).await?;

    info!("News API service initialized successfully");

    // Initialize repositories
    let user_repository = UserRepository::new(pool.clone());
    let news_repository = NewsCacheRepository::new(pool.clone());

    // Initialize upstream clients
    let news_client = NewsClient::new(config.news_api_key.clone());

    let email_client = match (config.email_api_key.clone(), config.email_sender.clone()) {
        (Some(api_key), Some(sender)) => Some(EmailClient::new(api_key, sender)),
        _ => {
            info!("Email provider not configured, login digests disabled");
            None
        }
    };

    let script_client = match config.llm_api_key.clone() {
        Some(api_key) => Some(ScriptClient::new(api_key)),
        None => {
            info!("Language-model provider not configured, podcast scripts disabled");
            None
        }
    };

    let app_state = AppState {
        db_pool: pool,
        user_repository,
        news_repository,
        news_client,
        email_client,
        script_client,
    };

    let cors = CorsLayer::new()
        .allow_origin(config.client_origin.parse::<HeaderValue>()?)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true);

    // Start the web server
    let app = routes::create_router(app_state).layer(cors);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!("News API service listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

//! Repositories for database operations

pub mod news;
pub mod user;

// Re-export for convenience
pub use news::NewsCacheRepository;
pub use user::UserRepository;

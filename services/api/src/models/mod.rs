//! Domain models

pub mod news;
pub mod user;

// Re-export for convenience
pub use news::{Article, NewsCacheEntry, ReadingStats};
pub use user::{NewUser, Preferences, User};

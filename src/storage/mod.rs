//! Score persistence

pub mod db;

// Re-exports for convenience
pub use db::{create_pool, get_connection, record_score, top_scores, DbConnection, DbPool, ScoreRecord};

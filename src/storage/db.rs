use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Result;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

/// A single submitted score. Append-only: rows are never updated or
/// deleted, so the rowid doubles as the insertion-order tiebreak.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRecord {
    pub id: i64,
    /// Player identifier as reported by the game (Telegram username).
    pub username: String,
    pub score: i64,
    pub recorded_at: String,
}

/// Create a new database connection pool
///
/// Initializes a connection pool with up to 10 connections and ensures
/// the scores table exists.
///
/// # Arguments
///
/// * `database_path` - Path to SQLite database file
///
/// # Returns
///
/// Returns a `DbPool` on success or an `r2d2::Error` if pool creation fails.
pub fn create_pool(database_path: &str) -> Result<DbPool, r2d2::Error> {
    let manager = SqliteConnectionManager::file(database_path);
    let pool = Pool::builder()
        .max_size(10) // Maximum 10 connections in the pool
        .build(manager)?;

    let conn = pool.get()?;
    if let Err(e) = ensure_schema(&conn) {
        log::warn!("Failed to ensure database schema: {}", e);
    }

    Ok(pool)
}

/// Get a connection from the pool
///
/// The connection is automatically returned to the pool when dropped.
pub fn get_connection(pool: &DbPool) -> Result<DbConnection, r2d2::Error> {
    pool.get()
}

/// Create the scores table if it is missing. Safe to call on every
/// startup; existing data is left untouched.
fn ensure_schema(conn: &rusqlite::Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS scores (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            username    TEXT NOT NULL,
            score       INTEGER NOT NULL,
            recorded_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;
    Ok(())
}

/// Append a score record.
///
/// Records are immutable once written: a player submitting twice gets
/// two rows, and `top_scores` decides which ones surface.
pub fn record_score(conn: &DbConnection, username: &str, score: i64) -> Result<()> {
    conn.execute(
        "INSERT INTO scores (username, score) VALUES (?1, ?2)",
        rusqlite::params![username, score],
    )?;
    Ok(())
}

/// Get the top `limit` scores, highest first.
///
/// Ties are broken by insertion order (earlier submission ranks
/// first). Returns fewer than `limit` rows if the table is small.
pub fn top_scores(conn: &DbConnection, limit: u32) -> Result<Vec<ScoreRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, username, score, recorded_at FROM scores
         ORDER BY score DESC, id ASC LIMIT ?",
    )?;
    let rows = stmt.query_map([limit], |row| {
        Ok(ScoreRecord {
            id: row.get(0)?,
            username: row.get(1)?,
            score: row.get(2)?,
            recorded_at: row.get(3)?,
        })
    })?;

    let mut records = Vec::new();
    for row in rows {
        records.push(row?);
    }
    Ok(records)
}

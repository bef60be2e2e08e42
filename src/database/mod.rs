use chrono::{DateTime, Utc};
use sqlx::any::AnyPoolOptions;

mod schema;
mod score;
pub mod scores;
mod user;
pub mod users;

pub use score::ScoreRecord;
pub use user::NewUser;
#[cfg(test)]
pub use user::UserRecord;

pub type DatabasePool = sqlx::AnyPool;
pub type DatabaseResult<T> = Result<T, sqlx::Error>;

/// Connects to the database behind `database_url` and makes sure the tables exist.
/// The url scheme picks the backend (`sqlite:` or `postgres:`).
pub async fn connect(database_url: &str, max_connections: u32) -> DatabaseResult<DatabasePool> {
    sqlx::any::install_default_drivers();

    let pool = AnyPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    schema::create_tables(&pool).await?;

    Ok(pool)
}

// Timestamps are stored as unix milliseconds
fn to_millis(timestamp: DateTime<Utc>) -> i64 {
    timestamp.timestamp_millis()
}

fn from_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

/// Reads a column selected as `COALESCE(column, '')`, mapping the empty string back to `None`.
fn optional_text(row: &sqlx::any::AnyRow, column: &str) -> Result<Option<String>, sqlx::Error> {
    use sqlx::Row;

    let value: String = row.try_get(column)?;
    Ok(Some(value).filter(|value| !value.is_empty()))
}

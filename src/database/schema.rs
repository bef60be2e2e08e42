use super::*;

const STATEMENTS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS scores (
        game_name TEXT NOT NULL,
        user_email TEXT NOT NULL,
        user_name TEXT,
        score BIGINT NOT NULL,
        twitter_handle TEXT,
        facebook_handle TEXT,
        image_url TEXT NOT NULL,
        created_at BIGINT NOT NULL,
        PRIMARY KEY (game_name, user_email)
    )",
    "CREATE INDEX IF NOT EXISTS scores_by_user_score ON scores (user_email, score)",
    "CREATE INDEX IF NOT EXISTS scores_by_game_time ON scores (game_name, created_at)",
    "CREATE TABLE IF NOT EXISTS users (
        user_email TEXT NOT NULL PRIMARY KEY,
        user_name TEXT,
        facebook_handle TEXT,
        twitter_handle TEXT,
        is_logged_in BIGINT NOT NULL DEFAULT 0,
        created_at BIGINT NOT NULL
    )",
];

pub(super) async fn create_tables(pool: &DatabasePool) -> DatabaseResult<()> {
    // One statement per query, postgres refuses to prepare several at once
    for statement in STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

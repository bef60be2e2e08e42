use chrono::{DateTime, Utc};

use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    Inserted,
    Updated,
}

// Optional columns come back as empty strings, the `Any` driver cannot decode a NULL
const SELECT_SCORES: &str = "SELECT score, game_name, COALESCE(user_name, '') AS user_name, \
    user_email, COALESCE(twitter_handle, '') AS twitter_handle, \
    COALESCE(facebook_handle, '') AS facebook_handle, image_url, created_at FROM scores";

/// Stores `record` as the current score of its user in its game,
/// replacing every field of an existing one.
pub async fn save_score(pool: &DatabasePool, record: &ScoreRecord) -> DatabaseResult<SaveOutcome> {
    let mut transaction = pool.begin().await?;

    let existing = sqlx::query("SELECT 1 FROM scores WHERE game_name = $1 AND user_email = $2")
        .bind(record.game_name.as_str())
        .bind(record.logged_in_user_email.as_str())
        .fetch_optional(&mut *transaction)
        .await?;

    sqlx::query(
        "INSERT INTO scores (game_name, user_email, user_name, score, twitter_handle, \
            facebook_handle, image_url, created_at) \
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
        ON CONFLICT (game_name, user_email) DO UPDATE SET \
            user_name = excluded.user_name, \
            score = excluded.score, \
            twitter_handle = excluded.twitter_handle, \
            facebook_handle = excluded.facebook_handle, \
            image_url = excluded.image_url, \
            created_at = excluded.created_at",
    )
    .bind(record.game_name.as_str())
    .bind(record.logged_in_user_email.as_str())
    .bind(record.logged_in_user_name.as_deref())
    .bind(record.score)
    .bind(record.twitter_handle.as_deref())
    .bind(record.facebook_handle.as_deref())
    .bind(record.image_url.as_str())
    .bind(to_millis(record.timestamp))
    .execute(&mut *transaction)
    .await?;

    transaction.commit().await?;

    Ok(match existing {
        Some(_) => SaveOutcome::Updated,
        None => SaveOutcome::Inserted,
    })
}

/// Checks whether the user already holds exactly this score in any game.
pub async fn score_exists(
    pool: &DatabasePool,
    score: i64,
    user_email: &str,
) -> DatabaseResult<bool> {
    let response = sqlx::query("SELECT 1 FROM scores WHERE score = $1 AND user_email = $2 LIMIT 1")
        .bind(score)
        .bind(user_email)
        .fetch_optional(pool)
        .await?;
    Ok(response.is_some())
}

#[cfg(test)]
pub async fn find_score(
    pool: &DatabasePool,
    game_name: &str,
    user_email: &str,
) -> DatabaseResult<Option<ScoreRecord>> {
    sqlx::query_as::<_, ScoreRecord>(&format!(
        "{} WHERE game_name = $1 AND user_email = $2",
        SELECT_SCORES
    ))
    .bind(game_name)
    .bind(user_email)
    .fetch_optional(pool)
    .await
}

/// Fetches the best `limit` scores of a game recorded at or after `since`.
pub async fn top_scores_for_game(
    pool: &DatabasePool,
    game_name: &str,
    since: DateTime<Utc>,
    limit: i64,
) -> DatabaseResult<Vec<ScoreRecord>> {
    sqlx::query_as::<_, ScoreRecord>(&format!(
        "{} WHERE game_name = $1 AND created_at >= $2 \
        ORDER BY score DESC, created_at ASC LIMIT $3",
        SELECT_SCORES
    ))
    .bind(game_name)
    .bind(to_millis(since))
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Fetches the best `limit` scores across all games.
pub async fn top_scores(pool: &DatabasePool, limit: i64) -> DatabaseResult<Vec<ScoreRecord>> {
    sqlx::query_as::<_, ScoreRecord>(&format!(
        "{} ORDER BY score DESC, created_at ASC LIMIT $1",
        SELECT_SCORES
    ))
    .bind(limit)
    .fetch_all(pool)
    .await
}

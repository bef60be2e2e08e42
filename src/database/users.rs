use chrono::Utc;

use super::*;

/// Creates the user or updates the supplied fields of an existing one.
pub async fn upsert_user(pool: &DatabasePool, user: &NewUser) -> DatabaseResult<()> {
    sqlx::query(
        "INSERT INTO users (user_email, user_name, facebook_handle, twitter_handle, is_logged_in, created_at) \
        VALUES ($1, $2, $3, $4, 0, $5) \
        ON CONFLICT (user_email) DO UPDATE SET \
            user_name = COALESCE(excluded.user_name, users.user_name), \
            facebook_handle = COALESCE(excluded.facebook_handle, users.facebook_handle), \
            twitter_handle = COALESCE(excluded.twitter_handle, users.twitter_handle)",
    )
    .bind(user.logged_in_user_email.as_str())
    .bind(user.logged_in_user_name.as_deref())
    .bind(user.facebook_handle.as_deref())
    .bind(user.twitter_handle.as_deref())
    .bind(to_millis(Utc::now()))
    .execute(pool)
    .await?;

    Ok(())
}

/// Creates the user unless one with the same email exists.
/// Returns whether a user was created.
pub async fn insert_user_if_absent(pool: &DatabasePool, user: &NewUser) -> DatabaseResult<bool> {
    let response = sqlx::query(
        "INSERT INTO users (user_email, user_name, facebook_handle, twitter_handle, is_logged_in, created_at) \
        VALUES ($1, $2, $3, $4, 0, $5) \
        ON CONFLICT (user_email) DO NOTHING",
    )
    .bind(user.logged_in_user_email.as_str())
    .bind(user.logged_in_user_name.as_deref())
    .bind(user.facebook_handle.as_deref())
    .bind(user.twitter_handle.as_deref())
    .bind(to_millis(Utc::now()))
    .execute(pool)
    .await?;

    Ok(response.rows_affected() > 0)
}

/// Sets the login flag of a user. Unknown emails are left alone.
/// Returns the number of users changed.
pub async fn set_logged_in(
    pool: &DatabasePool,
    user_email: &str,
    logged_in: bool,
) -> DatabaseResult<u64> {
    let response = sqlx::query("UPDATE users SET is_logged_in = $1 WHERE user_email = $2")
        .bind(i64::from(logged_in))
        .bind(user_email)
        .execute(pool)
        .await?;

    Ok(response.rows_affected())
}

#[cfg(test)]
pub async fn find_user(
    pool: &DatabasePool,
    user_email: &str,
) -> DatabaseResult<Option<UserRecord>> {
    sqlx::query_as::<_, UserRecord>(
        "SELECT COALESCE(user_name, '') AS user_name, user_email, \
            COALESCE(facebook_handle, '') AS facebook_handle, \
            COALESCE(twitter_handle, '') AS twitter_handle, is_logged_in, created_at \
        FROM users WHERE user_email = $1",
    )
    .bind(user_email)
    .fetch_optional(pool)
    .await
}

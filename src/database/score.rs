use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use rocket::serde::{Deserialize, Serialize};
use sqlx::{any::AnyRow, FromRow, Row};

use crate::leaderboard::LeaderboardItem;

/// The current score of a user in a game.
/// There is at most one per (`game_name`, `logged_in_user_email`).
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct ScoreRecord {
    pub score: i64,
    pub game_name: String,
    pub logged_in_user_name: Option<String>,
    pub logged_in_user_email: String,
    pub twitter_handle: Option<String>,
    pub facebook_handle: Option<String>,
    pub image_url: String,
    pub timestamp: DateTime<Utc>,
}

impl<'r> FromRow<'r, AnyRow> for ScoreRecord {
    fn from_row(row: &'r AnyRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            score: row.try_get("score")?,
            game_name: row.try_get("game_name")?,
            logged_in_user_name: super::optional_text(row, "user_name")?,
            logged_in_user_email: row.try_get("user_email")?,
            twitter_handle: super::optional_text(row, "twitter_handle")?,
            facebook_handle: super::optional_text(row, "facebook_handle")?,
            image_url: row.try_get("image_url")?,
            timestamp: super::from_millis(row.try_get("created_at")?),
        })
    }
}

impl LeaderboardItem for ScoreRecord {
    // Higher score first, older first among equal scores
    type Rank = (Reverse<i64>, DateTime<Utc>);

    fn rank(&self) -> Self::Rank {
        (Reverse(self.score), self.timestamp)
    }
}

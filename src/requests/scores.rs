use chrono::Utc;
use log::info;
use rocket::{
    post,
    serde::{json::Json, Deserialize},
    State,
};

use super::*;
use crate::{
    config::Config,
    database::{
        scores::{self as score_store, SaveOutcome},
        DatabasePool, ScoreRecord,
    },
};

#[derive(Deserialize, Debug, Default)]
#[serde(crate = "rocket::serde", rename_all = "camelCase", default)]
pub struct SaveScoreBody {
    pub score: Option<i64>,
    pub game_name: Option<String>,
    pub logged_in_user_name: Option<String>,
    pub logged_in_user_email: Option<String>,
    pub twitter_handle: Option<String>,
    pub facebook_handle: Option<String>,
    pub image_url: Option<String>,
}

/// Saves the score of a user, replacing their previous score in the same game.
#[post("/save-score", format = "json", data = "<body>")]
pub async fn save_score(
    body: Json<SaveScoreBody>,
    config: &State<Config>,
    database: &State<DatabasePool>,
) -> RequestResult<Json<Message>> {
    let record = validate(body.into_inner(), config.game_name_required)?;

    let outcome = score_store::save_score(database, &record)
        .await
        .map_err(RequestError::internal("Failed to save score to database"))?;

    match outcome {
        SaveOutcome::Inserted => {
            info!(
                "New score {} in {:?} for {}",
                record.score, record.game_name, record.logged_in_user_email
            );
            Ok(Message::new("Score saved successfully"))
        }
        SaveOutcome::Updated => {
            info!(
                "Updated score {} in {:?} for {}",
                record.score, record.game_name, record.logged_in_user_email
            );
            Ok(Message::new("Score updated successfully"))
        }
    }
}

fn validate(body: SaveScoreBody, game_name_required: bool) -> RequestResult<ScoreRecord> {
    let score = body.score.ok_or(RequestError::MissingField("Score"))?;
    let user_email = present(body.logged_in_user_email)
        .ok_or(RequestError::MissingField("loggedInUserEmail"))?;
    let image_url = present(body.image_url).ok_or(RequestError::MissingField("imageUrl"))?;

    // Without a game name the score is only visible on the global leaderboard
    let game_name = match present(body.game_name) {
        Some(game_name) => game_name,
        None if game_name_required => return Err(RequestError::MissingField("gameName")),
        None => String::new(),
    };

    Ok(ScoreRecord {
        score,
        game_name,
        logged_in_user_name: present(body.logged_in_user_name),
        logged_in_user_email: user_email,
        twitter_handle: present(body.twitter_handle),
        facebook_handle: present(body.facebook_handle),
        image_url,
        timestamp: Utc::now(),
    })
}

use chrono::Utc;
use rocket::{get, serde::json::Json, State};

use super::*;
use crate::{
    config::Config,
    database::{scores, DatabasePool, ScoreRecord},
    extraction::ScoreRules,
    leaderboard::{GameLeaderboards, Leaderboard, LeaderboardPolicy, Standings},
};

/// Serves the standings selected by the configured leaderboard policy.
#[get("/leaderboard")]
pub async fn leaderboard(
    config: &State<Config>,
    rules: &State<ScoreRules>,
    database: &State<DatabasePool>,
) -> RequestResult<Json<Standings<ScoreRecord>>> {
    let settings = &config.leaderboard;

    let standings = match settings.policy {
        LeaderboardPolicy::Windowed => {
            let since = Utc::now() - settings.window;
            let mut boards = GameLeaderboards::default();
            for game_name in rules.game_names() {
                let top =
                    scores::top_scores_for_game(database, game_name, since, settings.per_game)
                        .await
                        .map_err(RequestError::internal("Failed to fetch leaderboard"))?;
                boards.insert(game_name, Leaderboard::new(top));
            }
            Standings::PerGame(boards)
        }
        LeaderboardPolicy::Global => {
            let top = scores::top_scores(database, settings.global_limit)
                .await
                .map_err(RequestError::internal("Failed to fetch leaderboard"))?;
            Standings::Global(Leaderboard::new(top))
        }
    };

    Ok(Json(standings))
}

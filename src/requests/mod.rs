use rocket::{
    catch, catchers,
    http::Status,
    response::status::Custom,
    routes,
    serde::{json::Json, Serialize},
    Catcher, Request, Route,
};

pub mod leaderboard;
mod request_error;
pub mod scores;
pub mod upload;
pub mod users;

pub use request_error::*;

pub fn routes() -> Vec<Route> {
    routes![
        upload::upload,
        scores::save_score,
        leaderboard::leaderboard,
        users::add_user,
        users::login,
        users::logout,
    ]
}

pub fn catchers() -> Vec<Catcher> {
    catchers![default_catcher]
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct Message {
    pub message: &'static str,
}

impl Message {
    pub fn new(message: &'static str) -> Json<Self> {
        Json(Self { message })
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Treats blank strings the same as missing ones.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

/// Turns everything that fails outside of a handler into a JSON error.
/// Bodies that cannot be parsed are reported as bad requests.
#[catch(default)]
fn default_catcher(status: Status, _request: &Request<'_>) -> Custom<Json<ErrorBody>> {
    match status.code {
        400 | 422 => Custom(
            Status::BadRequest,
            Json(ErrorBody::new("Malformed request body")),
        ),
        500 => Custom(status, Json(ErrorBody::new("Internal Server Error"))),
        _ => Custom(
            status,
            Json(ErrorBody::new(status.reason().unwrap_or("Request failed"))),
        ),
    }
}

use log::info;
use rocket::{
    post,
    serde::{json::Json, Deserialize},
    State,
};

use super::*;
use crate::database::{users, DatabasePool, NewUser};

#[derive(Deserialize, Debug, Default)]
#[serde(crate = "rocket::serde", rename_all = "camelCase", default)]
pub struct AddUserBody {
    pub logged_in_user_name: Option<String>,
    pub logged_in_user_email: Option<String>,
    pub facebook_handle: Option<String>,
    pub twitter_handle: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(crate = "rocket::serde", rename_all = "camelCase", default)]
pub struct LoginBody {
    pub logged_in_user_email: Option<String>,
}

/// Registers a user. Social handles, when given, are written over the stored ones;
/// otherwise an existing user is left untouched.
#[post("/adduser", format = "json", data = "<body>")]
pub async fn add_user(
    body: Json<AddUserBody>,
    database: &State<DatabasePool>,
) -> RequestResult<Json<Message>> {
    let body = body.into_inner();
    let user = NewUser {
        logged_in_user_email: present(body.logged_in_user_email)
            .ok_or(RequestError::MissingField("loggedInUserEmail"))?,
        logged_in_user_name: present(body.logged_in_user_name),
        facebook_handle: present(body.facebook_handle),
        twitter_handle: present(body.twitter_handle),
    };

    if user.has_handles() {
        users::upsert_user(database, &user)
            .await
            .map_err(RequestError::internal("Failed to create/update user"))?;
    } else {
        let created = users::insert_user_if_absent(database, &user)
            .await
            .map_err(RequestError::internal("Failed to create/update user"))?;
        if !created {
            return Ok(Message::new("User already exists"));
        }
    }

    info!("User {} created/updated", user.logged_in_user_email);
    Ok(Message::new("User created/updated successfully"))
}

/// Marks a user as logged in. Nothing is verified.
#[post("/login", format = "json", data = "<body>")]
pub async fn login(
    body: Json<LoginBody>,
    database: &State<DatabasePool>,
) -> RequestResult<Json<Message>> {
    set_login_status(body.into_inner(), true, database).await?;
    Ok(Message::new("User login status updated"))
}

#[post("/logout", format = "json", data = "<body>")]
pub async fn logout(
    body: Json<LoginBody>,
    database: &State<DatabasePool>,
) -> RequestResult<Json<Message>> {
    set_login_status(body.into_inner(), false, database).await?;
    Ok(Message::new("User logout status updated"))
}

async fn set_login_status(
    body: LoginBody,
    logged_in: bool,
    database: &DatabasePool,
) -> RequestResult<()> {
    let user_email = present(body.logged_in_user_email)
        .ok_or(RequestError::MissingField("loggedInUserEmail"))?;

    let changed = users::set_logged_in(database, &user_email, logged_in)
        .await
        .map_err(RequestError::internal("Failed to update login status"))?;
    info!("Set logged in = {} for {} ({} user(s))", logged_in, user_email, changed);

    Ok(())
}

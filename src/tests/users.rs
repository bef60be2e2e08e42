use rocket::{http::Status, serde::json::serde_json::json};

use super::*;
use crate::database::users;

#[rocket::async_test]
async fn adding_twice_without_handles_reports_existing_user() {
    let server = spawn_server().await;
    let body = json!({
        "loggedInUserName": "Player One",
        "loggedInUserEmail": "player@example.com",
    });

    let (status, response) = post_json(&server.client, "/adduser", body.clone()).await;
    assert_eq!(status, Status::Ok);
    assert_eq!(response["message"], "User created/updated successfully");

    let mut renamed = body;
    renamed["loggedInUserName"] = json!("Someone Else");
    let (status, response) = post_json(&server.client, "/adduser", renamed).await;
    assert_eq!(status, Status::Ok);
    assert_eq!(response["message"], "User already exists");

    let user = users::find_user(server.database(), "player@example.com")
        .await
        .unwrap()
        .expect("user is stored");
    assert_eq!(user.logged_in_user_name.as_deref(), Some("Player One"));
    assert!(!user.is_logged_in);
}

#[rocket::async_test]
async fn handles_update_existing_user() {
    let server = spawn_server().await;

    let (status, _) = post_json(
        &server.client,
        "/adduser",
        json!({
            "loggedInUserName": "Player One",
            "loggedInUserEmail": "player@example.com",
            "twitterHandle": "@one",
        }),
    )
    .await;
    assert_eq!(status, Status::Ok);

    let (status, response) = post_json(
        &server.client,
        "/adduser",
        json!({
            "loggedInUserEmail": "player@example.com",
            "facebookHandle": "player.one",
        }),
    )
    .await;
    assert_eq!(status, Status::Ok);
    assert_eq!(response["message"], "User created/updated successfully");

    let user = users::find_user(server.database(), "player@example.com")
        .await
        .unwrap()
        .expect("user is stored");
    assert_eq!(user.logged_in_user_name.as_deref(), Some("Player One"));
    assert_eq!(user.twitter_handle.as_deref(), Some("@one"));
    assert_eq!(user.facebook_handle.as_deref(), Some("player.one"));
}

#[rocket::async_test]
async fn login_and_logout_toggle_the_flag() {
    let server = spawn_server().await;
    let email = json!({ "loggedInUserEmail": "player@example.com" });

    post_json(
        &server.client,
        "/adduser",
        json!({ "loggedInUserName": "Player", "loggedInUserEmail": "player@example.com" }),
    )
    .await;

    let (status, response) = post_json(&server.client, "/login", email.clone()).await;
    assert_eq!(status, Status::Ok);
    assert_eq!(response["message"], "User login status updated");
    let user = users::find_user(server.database(), "player@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(user.is_logged_in);

    let (status, response) = post_json(&server.client, "/logout", email).await;
    assert_eq!(status, Status::Ok);
    assert_eq!(response["message"], "User logout status updated");
    let user = users::find_user(server.database(), "player@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(!user.is_logged_in);
}

#[rocket::async_test]
async fn login_of_unknown_user_changes_nothing() {
    let server = spawn_server().await;

    let (status, _) = post_json(
        &server.client,
        "/login",
        json!({ "loggedInUserEmail": "nobody@example.com" }),
    )
    .await;
    assert_eq!(status, Status::Ok);

    let user = users::find_user(server.database(), "nobody@example.com")
        .await
        .unwrap();
    assert!(user.is_none());
}

#[rocket::async_test]
async fn email_is_required() {
    let server = spawn_server().await;

    for uri in ["/adduser", "/login", "/logout"] {
        let (status, response) =
            post_json(&server.client, uri, json!({ "loggedInUserName": "Player" })).await;
        assert_eq!(status, Status::BadRequest, "{}", uri);
        assert_eq!(response["error"], "loggedInUserEmail is required");
    }
}

#[rocket::async_test]
async fn unknown_routes_get_json_errors_and_cors_headers() {
    let server = spawn_server().await;

    let response = server.client.get("/no-such-route").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Origin"),
        Some("*")
    );
    let body = json_body(response).await;
    assert!(body["error"].is_string());

    let response = server.client.options("/save-score").dispatch().await;
    assert_eq!(response.status(), Status::NoContent);
}

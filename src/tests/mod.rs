use std::path::Path;

use rocket::{
    http::{ContentType, Status},
    local::asynchronous::{Client, LocalResponse},
    serde::json::{serde_json, Value},
};
use tempfile::TempDir;

use crate::{
    assets::{self, AssetError, AssetStore, Assets},
    config::Config,
    database::DatabasePool,
    ocr::{OcrError, Recognizer, TextRecognizer},
};

mod extraction;
mod users;

/// Stands in for the ocr engine: the uploaded "image" is the text it shows.
struct FileText;

#[rocket::async_trait]
impl TextRecognizer for FileText {
    async fn recognize(&self, image: &Path) -> Result<String, OcrError> {
        Ok(tokio::fs::read_to_string(image).await?)
    }
}

/// An ocr engine that always fails.
struct BrokenEngine;

#[rocket::async_trait]
impl TextRecognizer for BrokenEngine {
    async fn recognize(&self, _image: &Path) -> Result<String, OcrError> {
        Err(OcrError::Engine("no language data".to_owned()))
    }
}

/// An asset store that never accepts a file.
struct FullDisk;

#[rocket::async_trait]
impl AssetStore for FullDisk {
    async fn store(&self, _source: &Path, _key: &str) -> Result<String, AssetError> {
        Err(std::io::Error::other("no space left on device").into())
    }
}

/// A running server backed by its own database and public directory.
struct TestServer {
    client: Client,
    workspace: TempDir,
}

impl TestServer {
    fn database(&self) -> &DatabasePool {
        self.client
            .rocket()
            .state::<DatabasePool>()
            .expect("database is managed")
    }

    fn uploads_dir(&self) -> std::path::PathBuf {
        self.workspace.path().join("public").join("uploads")
    }
}

async fn spawn_server() -> TestServer {
    spawn_server_with(|_| ()).await
}

async fn spawn_server_with(configure: impl FnOnce(&mut Config)) -> TestServer {
    spawn_server_from(configure, |_| Box::new(FileText), assets::from_config).await
}

/// Spawns a server whose ocr engine and asset store are built by the given functions.
async fn spawn_server_from(
    configure: impl FnOnce(&mut Config),
    recognizer: impl FnOnce(&Config) -> Recognizer,
    assets: impl FnOnce(&Config) -> Assets,
) -> TestServer {
    let workspace = tempfile::tempdir().expect("temporary directory");
    let database_url = format!(
        "sqlite://{}?mode=rwc",
        workspace.path().join("scores.db").display()
    );

    let mut config = Config::new(database_url);
    config.public_dir = workspace.path().join("public");
    configure(&mut config);
    let recognizer = recognizer(&config);
    let assets = assets(&config);

    let rocket = crate::build(config, recognizer, assets)
        .await
        .expect("valid rocket instance");
    let client = Client::tracked(rocket)
        .await
        .expect("valid rocket instance");

    TestServer { client, workspace }
}

async fn json_body(response: LocalResponse<'_>) -> Value {
    let string = response.into_string().await.unwrap();
    serde_json::from_str(&string).unwrap()
}

/// Posts `body` as JSON and returns the status with the parsed response.
async fn post_json(client: &Client, uri: &'static str, body: Value) -> (Status, Value) {
    let response = client.post(uri).json(&body).dispatch().await;
    let status = response.status();
    (status, json_body(response).await)
}

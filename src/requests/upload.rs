use chrono::Utc;
use log::info;
use rocket::{
    form::Form,
    fs::TempFile,
    post,
    serde::{json::Json, Serialize},
    FromForm, State,
};

use super::*;
use crate::{
    assets::{self, Assets},
    database::{scores, DatabasePool},
    extraction::ScoreRules,
    ocr::Recognizer,
};

#[derive(FromForm)]
pub struct Upload<'r> {
    image: Option<TempFile<'r>>,
    #[field(name = "loggedInUserEmail")]
    logged_in_user_email: Option<String>,
}

#[derive(Serialize, Debug)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct UploadResponse {
    pub text: String,
    pub score: i64,
    pub game_name: String,
    pub image_url: String,
}

/// Reads the score off an uploaded screenshot.
/// The screenshot is kept in the asset store only once the score is known to be new;
/// the score itself is saved separately through `/save-score`.
#[post("/upload", data = "<upload>")]
pub async fn upload(
    upload: Form<Upload<'_>>,
    recognizer: &State<Recognizer>,
    rules: &State<ScoreRules>,
    assets: &State<Assets>,
    database: &State<DatabasePool>,
) -> RequestResult<Json<UploadResponse>> {
    let Upload {
        image,
        logged_in_user_email,
    } = upload.into_inner();

    let mut image = image
        .filter(|image| image.len() > 0)
        .ok_or(RequestError::NoFile)?;
    let user_email =
        present(logged_in_user_email).ok_or(RequestError::MissingField("loggedInUserEmail"))?;

    let file_name = original_file_name(&image);

    // Spool the upload to a file the ocr engine can read, removed on drop
    let scratch = tempfile::Builder::new()
        .prefix("score-upload-")
        .suffix(assets::file_extension(&file_name))
        .tempfile()
        .map_err(RequestError::internal("Failed to extract text from image"))?;
    image
        .copy_to(scratch.path())
        .await
        .map_err(RequestError::internal("Failed to extract text from image"))?;

    let text = recognizer
        .recognize(scratch.path())
        .await
        .map_err(RequestError::internal("Failed to extract text from image"))?;
    info!("Extracted text: {:?}", text);

    let extracted = rules.extract(&text)?;
    info!("Score: {} ({})", extracted.score, extracted.game_name);

    let duplicate = scores::score_exists(database, extracted.score, &user_email)
        .await
        .map_err(RequestError::internal("Failed to check existing scores"))?;
    if duplicate {
        return Err(RequestError::DuplicateScore);
    }

    let key = assets::asset_key(&file_name, Utc::now());
    let image_url = assets
        .store(scratch.path(), &key)
        .await
        .map_err(RequestError::internal("Failed to store uploaded image"))?;
    info!("Stored {} as {}", file_name, image_url);

    Ok(Json(UploadResponse {
        text,
        score: extracted.score,
        game_name: extracted.game_name,
        image_url,
    }))
}

/// The file name the client sent, or a generic one carrying the extension of the content type.
fn original_file_name(image: &TempFile<'_>) -> String {
    if let Some(name) = image.raw_name() {
        let name = name.dangerous_unsafe_unsanitized_raw().as_str();
        if !name.is_empty() {
            return name.to_owned();
        }
    }

    match image.content_type().and_then(|content_type| content_type.extension()) {
        Some(extension) => format!("upload.{}", extension),
        None => "upload".to_owned(),
    }
}

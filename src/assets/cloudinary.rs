use reqwest::multipart::{Form, Part};
use rocket::serde::Deserialize;

use super::*;

/// Uploads to a Cloudinary account through an unsigned upload preset.
pub struct CloudinaryAssets {
    client: reqwest::Client,
    upload_url: String,
    upload_preset: String,
    folder: String,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
struct UploadResponse {
    secure_url: String,
}

impl CloudinaryAssets {
    pub fn new(api_base: &str, cloud_name: &str, upload_preset: &str, folder: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            upload_url: format!(
                "{}/{}/image/upload",
                api_base.trim_end_matches('/'),
                cloud_name
            ),
            upload_preset: upload_preset.to_owned(),
            folder: folder.to_owned(),
        }
    }
}

/// Cloudinary appends the format itself, so the public id has no extension.
fn public_id(key: &str) -> &str {
    &key[..key.len() - file_extension(key).len()]
}

#[rocket::async_trait]
impl AssetStore for CloudinaryAssets {
    async fn store(&self, source: &Path, key: &str) -> Result<String, AssetError> {
        let bytes = tokio::fs::read(source).await?;

        let form = Form::new()
            .text("upload_preset", self.upload_preset.clone())
            .text("folder", self.folder.clone())
            .text("public_id", public_id(key).to_owned())
            .part("file", Part::bytes(bytes).file_name(key.to_owned()));

        let response: UploadResponse = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.secure_url)
    }
}

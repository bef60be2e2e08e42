use std::path::Path;

mod cloudinary;
mod key;
mod local;

pub use cloudinary::CloudinaryAssets;
pub use key::{asset_key, file_extension};
pub use local::LocalAssets;

use crate::config::{AssetStoreConfig, Config};

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("asset upload failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Somewhere uploaded screenshots are kept for good.
#[rocket::async_trait]
pub trait AssetStore: Send + Sync {
    /// Stores the file at `source` under `key` and returns the url it can be fetched from.
    async fn store(&self, source: &Path, key: &str) -> Result<String, AssetError>;
}

pub type Assets = Box<dyn AssetStore>;

pub fn from_config(config: &Config) -> Assets {
    match &config.asset_store {
        AssetStoreConfig::Local => Box::new(LocalAssets::new(
            config.public_dir.join("uploads"),
            format!("{}/uploads", config.public_base_url.trim_end_matches('/')),
        )),
        AssetStoreConfig::Cloudinary {
            api_base,
            cloud_name,
            upload_preset,
            folder,
        } => Box::new(CloudinaryAssets::new(
            api_base,
            cloud_name,
            upload_preset,
            folder,
        )),
    }
}

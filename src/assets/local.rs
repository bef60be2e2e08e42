use std::{io::ErrorKind, path::PathBuf};

use tokio::fs::{self, File, OpenOptions};

use super::*;

const SUFFIX_LENGTH: usize = 6;

/// Keeps uploads in a local directory that is served as static files.
pub struct LocalAssets {
    root: PathBuf,
    base_url: String,
}

impl LocalAssets {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into(),
        }
    }

    /// Creates a file for `key` that did not exist before,
    /// renaming the key when it is taken.
    async fn create_unique(&self, key: &str) -> Result<(File, String), AssetError> {
        let mut key = key.to_owned();
        loop {
            let created = OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.root.join(&key))
                .await;
            match created {
                Ok(file) => return Ok((file, key)),
                Err(error) if error.kind() == ErrorKind::AlreadyExists => {
                    key = super::key::with_random_suffix(&key, SUFFIX_LENGTH);
                }
                Err(error) => return Err(error.into()),
            }
        }
    }
}

#[rocket::async_trait]
impl AssetStore for LocalAssets {
    async fn store(&self, source: &Path, key: &str) -> Result<String, AssetError> {
        fs::create_dir_all(&self.root).await?;

        let (mut target, key) = self.create_unique(key).await?;
        let mut source = File::open(source).await?;
        tokio::io::copy(&mut source, &mut target).await?;

        Ok(format!("{}/{}", self.base_url, key))
    }
}

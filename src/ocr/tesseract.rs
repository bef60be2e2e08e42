use std::{
    path::{Path, PathBuf},
    process::Output,
    time::Duration,
};

use tokio::process::Command;

use super::*;
use crate::config::OcrConfig;

/// Runs the `tesseract` executable, one process per image.
pub struct Tesseract {
    executable: PathBuf,
    tessdata_dir: Option<PathBuf>,
    language: String,
    timeout: Option<Duration>,
}

impl Tesseract {
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            executable: config.tesseract_path.clone(),
            tessdata_dir: config.tessdata_dir.clone(),
            language: config.language.clone(),
            timeout: config.timeout,
        }
    }

    fn command(&self, image: &Path) -> Command {
        let mut command = Command::new(&self.executable);
        command.arg(image).arg("stdout").arg("-l").arg(&self.language);
        if let Some(tessdata_dir) = &self.tessdata_dir {
            command.arg("--tessdata-dir").arg(tessdata_dir);
        }
        // The process must not outlive an abandoned request
        command.kill_on_drop(true);
        command
    }
}

#[rocket::async_trait]
impl TextRecognizer for Tesseract {
    async fn recognize(&self, image: &Path) -> Result<String, OcrError> {
        let mut command = self.command(image);
        let output: Output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, command.output())
                .await
                .map_err(|_| OcrError::TimedOut(limit))??,
            None => command.output().await?,
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::Engine(stderr.trim().to_owned()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

use std::{path::Path, time::Duration};

mod tesseract;

pub use tesseract::Tesseract;

#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("failed to run the ocr engine: {0}")]
    Io(#[from] std::io::Error),
    #[error("ocr engine exited with an error: {0}")]
    Engine(String),
    #[error("ocr engine did not finish within {0:?}")]
    TimedOut(Duration),
}

/// Turns an image on disk into the plain text it shows.
#[rocket::async_trait]
pub trait TextRecognizer: Send + Sync {
    async fn recognize(&self, image: &Path) -> Result<String, OcrError>;
}

pub type Recognizer = Box<dyn TextRecognizer>;

use std::error::Error;

use log::{error, warn};
use rocket::{
    http::Status,
    response::{self, status::Custom, Responder},
    serde::json::Json,
    Request,
};

use super::ErrorBody;
use crate::extraction::ExtractionError;

type BoxError = Box<dyn Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("No file uploaded")]
    NoFile,
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("No score found in the extracted text")]
    NoScore,
    #[error("Score not found or invalid")]
    InvalidScore,
    #[error("Score already exists. Please try the game again and score differently.")]
    DuplicateScore,
    /// A downstream service failed. Only `context` reaches the client.
    #[error("{context}")]
    Internal {
        context: &'static str,
        #[source]
        source: BoxError,
    },
}

impl RequestError {
    /// Wraps a downstream failure, for use with `map_err`.
    pub fn internal<E: Into<BoxError>>(context: &'static str) -> impl FnOnce(E) -> Self {
        move |source| Self::Internal {
            context,
            source: source.into(),
        }
    }

    pub fn status(&self) -> Status {
        match self {
            Self::Internal { .. } => Status::InternalServerError,
            _ => Status::BadRequest,
        }
    }
}

impl From<ExtractionError> for RequestError {
    fn from(error: ExtractionError) -> Self {
        match error {
            ExtractionError::NoMatch => Self::NoScore,
            ExtractionError::InvalidScore { .. } => Self::InvalidScore,
        }
    }
}

impl<'r> Responder<'r, 'static> for RequestError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        match &self {
            Self::Internal { context, source } => {
                error!("{} {}: {}: {}", request.method(), request.uri(), context, source);
            }
            rejection => warn!("{} {}: {}", request.method(), request.uri(), rejection),
        }

        Custom(self.status(), Json(ErrorBody::new(self.to_string()))).respond_to(request)
    }
}

pub type RequestResult<T, E = RequestError> = std::result::Result<T, E>;

use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::Request;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Email query is required")]
    MissingEmail,

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Body of every error response.
#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorBody {
            message: message.into(),
            error: None,
        }
    }
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::MissingEmail | ApiError::InvalidIdentifier(_) => Status::BadRequest,
            ApiError::Store(_) => Status::InternalServerError,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            ApiError::MissingEmail => ErrorBody::new(self.to_string()),
            ApiError::InvalidIdentifier(raw) => ErrorBody {
                message: "Invalid identifier".to_string(),
                error: Some(format!("'{raw}' is not a 24-character hex ObjectId")),
            },
            ApiError::Store(err) => ErrorBody {
                message: "Server Error".to_string(),
                error: Some(err.to_string()),
            },
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        if let ApiError::Store(err) = &self {
            error!(method = %request.method(), uri = %request.uri(), "store error: {err}");
        }
        (self.status(), Json(self.body())).respond_to(request)
    }
}

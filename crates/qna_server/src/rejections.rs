//! Domain-outcome to HTTP status translation.
//!
//! # Responsibility
//! - Carry domain errors through warp rejections.
//! - Render every failure as a status code plus `{"error": message}` body.

use log::{error, warn};
use qna_core::{QnaServiceError, RepoError};
use serde::Serialize;
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use warp::filters::body::BodyDeserializeError;
use warp::http::StatusCode;
use warp::reject::Reject;
use warp::{Rejection, Reply};

/// API-level error carried through warp rejections.
#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    NotFound(String),
    Internal(String),
}

impl ApiError {
    /// Wraps a domain service error into a rejection.
    pub fn reject(err: QnaServiceError) -> Rejection {
        warp::reject::custom(Self::from(err))
    }

    /// Wraps a repository bootstrap error into an internal rejection.
    pub fn internal(err: RepoError) -> Rejection {
        warp::reject::custom(Self::Internal(err.to_string()))
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) | Self::NotFound(message) | Self::Internal(message) => {
                write!(f, "{message}")
            }
        }
    }
}

impl Reject for ApiError {}

impl From<QnaServiceError> for ApiError {
    fn from(value: QnaServiceError) -> Self {
        match value {
            QnaServiceError::Validation(err) => Self::Validation(err.to_string()),
            QnaServiceError::QuestionNotFound(_) | QnaServiceError::AnswerNotFound(_) => {
                Self::NotFound(value.to_string())
            }
            QnaServiceError::Repo(err) => Self::Internal(err.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Translates rejections into status codes with a JSON error body.
pub async fn handle_rejection(r: Rejection) -> Result<impl Reply, Infallible> {
    if let Some(err) = r.find::<ApiError>() {
        let status = match err {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Domain-level outcomes are already logged by the service; only
        // internal failures are worth a server-side event here.
        if let ApiError::Internal(message) = err {
            error!("event=request_failed module=server status=error error={message}");
        }
        Ok(error_reply(status, &err.to_string()))
    } else if let Some(err) = r.find::<BodyDeserializeError>() {
        warn!("event=request_rejected module=server status=bad_body error={err}");
        Ok(error_reply(StatusCode::BAD_REQUEST, &err.to_string()))
    } else {
        Ok(error_reply(StatusCode::NOT_FOUND, "route not found"))
    }
}

fn error_reply(status: StatusCode, message: &str) -> impl Reply {
    warp::reply::with_status(
        warp::reply::json(&ErrorBody {
            error: message.to_string(),
        }),
        status,
    )
}

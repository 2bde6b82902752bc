use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::{config::ConfigError, database::StoreError, utils::MAX_DISPLAY_ORDER};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Invalid category: {0:?}")]
    InvalidCategory(String),

    #[error("Invalid display order {0}, must be between 1 and {max}", max = MAX_DISPLAY_ORDER)]
    InvalidOrder(i64),

    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => AppError::NotFound(id),
            StoreError::AlreadyExists(id) => AppError::Conflict(format!("product {id} already exists")),
            StoreError::NotInCategory { id, category_id } => {
                AppError::Conflict(format!("product {id} is no longer in category {category_id}"))
            }
            other => AppError::Store(other),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::MalformedPayload(_)
            | AppError::InvalidCategory(_)
            | AppError::InvalidOrder(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("{self}");
        }

        let body = ErrorBody {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Failures that stop the server from starting or keep it from serving.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Server I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::MalformedPayload("eof".into()), StatusCode::BAD_REQUEST),
            (AppError::InvalidCategory("!!".into()), StatusCode::BAD_REQUEST),
            (AppError::InvalidOrder(0), StatusCode::BAD_REQUEST),
            (AppError::NotFound("p1".into()), StatusCode::NOT_FOUND),
            (AppError::Conflict("p1".into()), StatusCode::CONFLICT),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_store_errors_keep_their_meaning() {
        assert!(matches!(
            AppError::from(StoreError::NotFound("p1".into())),
            AppError::NotFound(id) if id == "p1"
        ));
        assert!(matches!(
            AppError::from(StoreError::AlreadyExists("p1".into())),
            AppError::Conflict(_)
        ));
        assert!(matches!(
            AppError::from(StoreError::NotInCategory {
                id: "p1".into(),
                category_id: "benches".into(),
            }),
            AppError::Conflict(_)
        ));
    }
}

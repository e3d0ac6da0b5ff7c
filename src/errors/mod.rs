use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::db::StoreError;
use crate::roster::aggregate::AggregateError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    InternalServerError(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    message: String,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl AppError {
    fn message(&self) -> &str {
        match self {
            AppError::BadRequest(msg) | AppError::NotFound(msg) | AppError::InternalServerError(msg) => msg,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            message: self.message().to_string(),
        })
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(msg) => AppError::BadRequest(msg),
            ServiceError::NotFound(msg) => AppError::NotFound(msg),
            ServiceError::Storage(err) => {
                log::error!("Roster storage failure: {}", err);
                AppError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<AggregateError> for AppError {
    fn from(err: AggregateError) -> Self {
        AppError::NotFound(err.to_string())
    }
}

impl From<BlockingError> for AppError {
    fn from(err: BlockingError) -> Self {
        log::error!("Blocking task failed: {}", err);
        AppError::InternalServerError("Internal server error".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_errors_map_to_status_codes() {
        let bad = AppError::from(ServiceError::Validation("NOME is required".to_string()));
        assert_eq!(bad.status_code(), StatusCode::BAD_REQUEST);

        let missing = AppError::from(ServiceError::NotFound("Employee not found".to_string()));
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

        let storage = AppError::from(ServiceError::Storage(StoreError::Missing("x.xlsx".to_string())));
        assert_eq!(storage.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        assert_eq!(AppError::from(AggregateError::NoData).status_code(), StatusCode::NOT_FOUND);
    }
}

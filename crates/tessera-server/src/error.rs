//! Error-to-response mapping for the HTTP layer

use std::fmt::{Display, Formatter};

use actix_web::HttpResponse;

use tessera_common::TesseraError;

/// Wrapper for application errors to implement actix-web error handling
#[derive(Debug)]
pub struct AppError {
    inner: anyhow::Error,
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(value: anyhow::Error) -> Self {
        AppError { inner: value }
    }
}

impl From<TesseraError> for AppError {
    fn from(value: TesseraError) -> Self {
        AppError {
            inner: anyhow::Error::new(value),
        }
    }
}

impl actix_web::error::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        if let Some(e) = self.inner.downcast_ref::<TesseraError>() {
            match e {
                TesseraError::InvalidParam { .. } => HttpResponse::BadRequest().body(e.to_string()),
                TesseraError::UniqueViolation { .. } => {
                    HttpResponse::UnprocessableEntity().body(e.to_string())
                }
                TesseraError::NotFound { .. } => HttpResponse::NotFound().body(e.to_string()),
                TesseraError::Internal(message) => {
                    tracing::error!(error = %message, "internal error");
                    HttpResponse::InternalServerError().body("internal error")
                }
            }
        } else {
            // storage failures and other unclassified errors: log the full
            // chain, report generically
            tracing::error!(error = %self.inner, "unhandled internal error");
            HttpResponse::InternalServerError().body("internal error")
        }
    }
}

//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog::CatalogError;
use domain::{ApplicationError, FieldError};
use submission::SubmissionError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from the client.
    BadRequest(String),
    /// Wizard rule violation.
    Application(ApplicationError),
    /// Catalog lookup error.
    Catalog(CatalogError),
    /// Submission backend error.
    Submission(SubmissionError),
    /// Unexpected server-side failure.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, fields) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, Vec::new()),
            ApiError::Application(err) => application_error_to_response(err),
            ApiError::Catalog(err) => catalog_error_to_response(err),
            ApiError::Submission(err) => submission_error_to_response(err),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, Vec::new()),
        };

        if status.is_server_error() {
            tracing::error!(%status, error = %message, "request failed");
        }

        let body = serde_json::json!({ "error": message, "fields": fields });
        (status, axum::Json(body)).into_response()
    }
}

fn application_error_to_response(err: ApplicationError) -> (StatusCode, String, Vec<FieldError>) {
    let status = match &err {
        ApplicationError::PayloadMismatch { .. }
        | ApplicationError::NotAtSummary { .. }
        | ApplicationError::SubmissionInProgress
        | ApplicationError::AlreadySubmitted
        | ApplicationError::NoSubmissionInProgress => StatusCode::CONFLICT,
        ApplicationError::Validation(_)
        | ApplicationError::NoProductsSelected
        | ApplicationError::NoMachinesSelected
        | ApplicationError::UnsupportedDuration { .. }
        | ApplicationError::MissingProductConfig { .. }
        | ApplicationError::UnknownProductConfig { .. }
        | ApplicationError::DuplicateProductConfig { .. }
        | ApplicationError::TermsNotAccepted
        | ApplicationError::MissingCompanyInfo => StatusCode::BAD_REQUEST,
    };
    let fields = match &err {
        ApplicationError::Validation(errors) => errors.fields().to_vec(),
        _ => Vec::new(),
    };
    (status, err.to_string(), fields)
}

fn catalog_error_to_response(err: CatalogError) -> (StatusCode, String, Vec<FieldError>) {
    let status = match &err {
        CatalogError::UnknownProduct(_) | CatalogError::UnknownMachine(_) => StatusCode::NOT_FOUND,
        CatalogError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string(), Vec::new())
}

fn submission_error_to_response(err: SubmissionError) -> (StatusCode, String, Vec<FieldError>) {
    match err {
        SubmissionError::Application(err) => application_error_to_response(err),
        SubmissionError::Rejected(_) => (StatusCode::BAD_GATEWAY, err.to_string(), Vec::new()),
        SubmissionError::TimedOut(_) => (StatusCode::GATEWAY_TIMEOUT, err.to_string(), Vec::new()),
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        ApiError::Application(err)
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::Catalog(err)
    }
}

impl From<SubmissionError> for ApiError {
    fn from(err: SubmissionError) -> Self {
        ApiError::Submission(err)
    }
}

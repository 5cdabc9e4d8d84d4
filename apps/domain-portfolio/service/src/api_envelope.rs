use std::any::Any;

use axum::Json;
use axum::body::Body;
use axum::http::{Response, StatusCode, header};
use axum::response::IntoResponse;
use portfolio_domain::ParseError;
use serde::Serialize;

use crate::portfolio_store::PortfolioStoreError;

pub type ApiErrorTuple = (StatusCode, Json<ApiErrorResponse>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    InvalidRequest,
    NotFound,
    InternalError,
}

impl ApiErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::NotFound => "not_found",
            Self::InternalError => "internal_error",
        }
    }

    pub const fn default_status(self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// `{ "success": true, ...payload }`.
#[derive(Debug, Serialize)]
pub struct ApiSuccess<T> {
    pub success: bool,
    #[serde(flatten)]
    pub payload: T,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub message: String,
    pub code: &'static str,
}

pub fn ok_payload<T: Serialize>(payload: T) -> Json<ApiSuccess<T>> {
    Json(ApiSuccess {
        success: true,
        payload,
    })
}

pub fn error_response(code: ApiErrorCode, message: impl Into<String>) -> ApiErrorTuple {
    (
        code.default_status(),
        Json(ApiErrorResponse {
            success: false,
            message: message.into(),
            code: code.as_str(),
        }),
    )
}

/// Every failure an API handler can return. Store and parse errors convert
/// in with `?`. Internal failures surface as panics and go through
/// `api_panic_response`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
}

impl ApiError {
    pub const fn code(&self) -> ApiErrorCode {
        match self {
            Self::Validation(_) => ApiErrorCode::InvalidRequest,
            Self::NotFound(_) => ApiErrorCode::NotFound,
        }
    }
}

impl From<ParseError> for ApiError {
    fn from(error: ParseError) -> Self {
        Self::Validation(error.to_string())
    }
}

impl From<PortfolioStoreError> for ApiError {
    fn from(error: PortfolioStoreError) -> Self {
        match error {
            PortfolioStoreError::DomainNotFound { .. } => Self::NotFound("Domain not found".to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let code = self.code();
        let (Self::Validation(message) | Self::NotFound(message)) = self;
        error_response(code, message).into_response()
    }
}

/// Panic handler for the API sub-router. The payload is logged, the client
/// gets the generic JSON envelope.
pub fn api_panic_response(panic: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = panic_detail(panic.as_ref());
    tracing::error!(target: "domain_portfolio.http", detail = %detail, "api handler panicked");

    let body = serde_json::to_vec(&ApiErrorResponse {
        success: false,
        message: "Internal server error".to_string(),
        code: ApiErrorCode::InternalError.as_str(),
    })
    .unwrap_or_default();

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    response
}

pub fn panic_detail(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "unknown panic payload".to_string()
    }
}

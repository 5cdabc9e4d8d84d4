use axum::async_trait;
use axum::extract::{Form, FromRequest, Json, Request};
use axum::http::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;

use crate::api_envelope::ApiError;

const INVALID_BODY_MESSAGE: &str = "Invalid request body";

/// Request body sent either as JSON or as an urlencoded HTML form.
#[derive(Debug, Clone)]
pub struct ApiBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json_content(&request) {
            let Json(value) = Json::<T>::from_request(request, state)
                .await
                .map_err(|rejection| {
                    tracing::debug!(target: "domain_portfolio.http", error = %rejection, "json body rejected");
                    ApiError::Validation(INVALID_BODY_MESSAGE.to_string())
                })?;
            return Ok(Self(value));
        }

        let Form(value) = Form::<T>::from_request(request, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(target: "domain_portfolio.http", error = %rejection, "form body rejected");
                ApiError::Validation(INVALID_BODY_MESSAGE.to_string())
            })?;
        Ok(Self(value))
    }
}

fn is_json_content(request: &Request) -> bool {
    request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| mime.trim().to_ascii_lowercase())
        .is_some_and(|mime| mime == "application/json" || mime.ends_with("+json"))
}

use axum::extract::Request;
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;

const HX_REFRESH_HEADER: &str = "HX-Refresh";
const HX_TRIGGER_HEADER: &str = "HX-Trigger";
const API_ERROR_EVENT: &str = "portfolio-api-error";

pub fn is_hx_request(headers: &HeaderMap) -> bool {
    header_is_true(headers, "hx-request")
}

/// Page forms post straight to the JSON API with `hx-swap="none"`. A
/// successful write asks htmx to reload the page; a failed one fires an
/// event the page can listen for.
pub async fn api_htmx_headers(request: Request, next: Next) -> Response {
    let hx = is_hx_request(request.headers());
    let mut response = next.run(request).await;
    if !hx {
        return response;
    }
    if response.status().is_success() {
        set_refresh_header(&mut response);
    } else {
        set_trigger_header(&mut response, API_ERROR_EVENT);
    }
    response
}

pub fn set_refresh_header(response: &mut Response) {
    response
        .headers_mut()
        .insert(HX_REFRESH_HEADER, HeaderValue::from_static("true"));
}

pub fn set_trigger_header(response: &mut Response, event: &str) {
    if let Ok(value) = HeaderValue::from_str(event) {
        response.headers_mut().insert(HX_TRIGGER_HEADER, value);
    }
}

fn header_text(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}

fn header_is_true(headers: &HeaderMap, name: &str) -> bool {
    header_text(headers, name).is_some_and(|value| value.eq_ignore_ascii_case("true"))
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode};
    use axum::middleware;
    use axum::routing::post;
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        Router::new()
            .route("/ok", post(|| async { StatusCode::OK }))
            .route("/bad", post(|| async { StatusCode::BAD_REQUEST }))
            .layer(middleware::from_fn(api_htmx_headers))
    }

    fn hx_post(uri: &str, hx: bool) -> Result<HttpRequest<Body>, axum::http::Error> {
        let builder = HttpRequest::builder().method("POST").uri(uri);
        let builder = if hx {
            builder.header("hx-request", "true")
        } else {
            builder
        };
        builder.body(Body::empty())
    }

    fn header<'a>(response: &'a Response, name: &str) -> Option<&'a str> {
        response.headers().get(name).and_then(|value| value.to_str().ok())
    }

    #[test]
    fn hx_request_header_is_matched_case_insensitively() {
        let mut headers = HeaderMap::new();
        headers.insert("hx-request", HeaderValue::from_static(" TRUE "));
        assert!(is_hx_request(&headers));

        headers.insert("hx-request", HeaderValue::from_static("false"));
        assert!(!is_hx_request(&headers));
        assert!(!is_hx_request(&HeaderMap::new()));
    }

    #[tokio::test]
    async fn successful_hx_writes_request_a_refresh() -> Result<(), Box<dyn std::error::Error>> {
        let response = app().oneshot(hx_post("/ok", true)?).await?;
        assert_eq!(header(&response, "HX-Refresh"), Some("true"));
        assert_eq!(header(&response, "HX-Trigger"), None);
        Ok(())
    }

    #[tokio::test]
    async fn failed_hx_writes_fire_the_error_event() -> Result<(), Box<dyn std::error::Error>> {
        let response = app().oneshot(hx_post("/bad", true)?).await?;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(header(&response, "HX-Refresh"), None);
        assert_eq!(header(&response, "HX-Trigger"), Some(API_ERROR_EVENT));
        Ok(())
    }

    #[tokio::test]
    async fn plain_requests_pass_through_untouched() -> Result<(), Box<dyn std::error::Error>> {
        let response = app().oneshot(hx_post("/ok", false)?).await?;
        assert_eq!(header(&response, "HX-Refresh"), None);
        Ok(())
    }
}

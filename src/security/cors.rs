//! Cross-origin policy.
//!
//! Fixed and permissive: any origin, method and header, with credentials.
//! Origins and request headers are mirrored because a literal `*` is not
//! allowed together with credentials.
//!
//! `tower_http`'s layer answers every `OPTIONS` request itself. Only real
//! preflights (`OPTIONS` + `Access-Control-Request-Method`) are handed to
//! it here; a plain `OPTIONS` is forwarded like any other method.

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower::{Layer, ServiceExt};
use tower_http::cors::CorsLayer;

/// The policy applied to preflights and ordinary requests.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::very_permissive()
}

pub fn is_preflight(request: &Request) -> bool {
    request.method() == Method::OPTIONS
        && request
            .headers()
            .contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}

/// Middleware for `axum::middleware::from_fn_with_state(cors_layer(), cors)`.
pub async fn cors(State(layer): State<CorsLayer>, request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS && !is_preflight(&request) {
        let origin = request.headers().get(header::ORIGIN).cloned();
        let mut response = next.run(request).await;
        if let Some(origin) = origin {
            allow_origin(&mut response, origin);
        }
        return response;
    }

    match layer.layer(next).oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

fn allow_origin(response: &mut Response, origin: HeaderValue) {
    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    headers.append(header::VARY, HeaderValue::from_static("origin"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;

    #[test]
    fn preflight_needs_request_method_header() {
        let plain = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/v1/teams")
            .body(Body::empty())
            .unwrap();
        assert!(!is_preflight(&plain));

        let preflight = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/v1/teams")
            .header(header::ORIGIN, "http://app.example.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();
        assert!(is_preflight(&preflight));
    }
}

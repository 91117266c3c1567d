use axum::http::{header, HeaderValue, Method};
use log::warn;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Build the CORS layer for the API.
///
/// An empty origin list, or a single `*`, allows any origin. Origins that
/// are not valid header values are skipped; if none survive, any origin
/// is allowed.
pub fn setup_cors(allowed_origins: &[String]) -> CorsLayer {
    let allow_origin = if allowed_origins.is_empty() || allowed_origins == ["*"] {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| {
                let trimmed = origin.trim();
                if trimmed.is_empty() {
                    return None;
                }
                HeaderValue::from_str(trimmed)
                    .inspect_err(|_| warn!("Ignoring invalid CORS origin '{trimmed}'"))
                    .ok()
            })
            .collect();

        if origins.is_empty() {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(origins)
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
        .expose_headers([header::CONTENT_DISPOSITION])
}

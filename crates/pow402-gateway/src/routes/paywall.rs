//! The gated catch-all: every path not claimed by an API route pays
//! for access with share evidence, unless it is a free endpoint.

use std::path::PathBuf;
use std::sync::Arc;

use actix_web::http::header::CONTENT_TYPE;
use actix_web::{web, HttpRequest, HttpResponse};

use pow402::evidence::EvidenceSources;
use pow402::gate::GateDecision;

use crate::error::GatewayError;
use crate::metrics::GATE_DECISIONS;
use crate::state::AppState;

/// Pull the named field out of a urlencoded string (query or form body).
fn find_param(raw: &str, field: &str) -> Option<String> {
    url::form_urlencoded::parse(raw.as_bytes())
        .find(|(name, _)| name == field)
        .map(|(_, value)| value.into_owned())
}

/// Gather candidate evidence from the three transport locations.
fn evidence_sources(req: &HttpRequest, body: &web::Bytes, field: &str) -> EvidenceSources {
    let query = find_param(req.query_string(), field);

    let form = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .filter(|content_type| content_type.starts_with("application/x-www-form-urlencoded"))
        .and_then(|_| std::str::from_utf8(body).ok())
        .and_then(|body| find_param(body, field));

    // headers().get() yields the first value of a repeated header.
    let header = req
        .headers()
        .get(field)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    EvidenceSources {
        query,
        form,
        header,
    }
}

/// Decode and validate a request path. Returns the relative path under
/// the static root, or `None` when the path is unsafe to serve.
fn sanitize_path(path: &str) -> Option<String> {
    let decoded = urlencoding::decode(path).ok()?;
    if decoded.contains("..")
        || decoded.contains('\0')
        || decoded.contains('\r')
        || decoded.contains('\n')
    {
        return None;
    }
    Some(decoded.trim_start_matches('/').to_string())
}

/// Resolve and serve a file beneath the configured static root.
/// Directory requests fall back to `index.html`.
async fn serve_static(req: &HttpRequest, www_dir: &str) -> HttpResponse {
    let Some(relative) = sanitize_path(req.path()) else {
        return HttpResponse::NotFound().body("Not found.");
    };

    let mut full_path = PathBuf::from(www_dir);
    if !relative.is_empty() {
        full_path.push(&relative);
    }
    if full_path.is_dir() {
        full_path.push("index.html");
    }

    match actix_files::NamedFile::open_async(&full_path).await {
        Ok(file) => file.into_response(req),
        Err(_) => HttpResponse::NotFound().body("Not found."),
    }
}

/// Default service handler: run the monetization gate, then serve.
pub async fn gated(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, GatewayError> {
    let sources = evidence_sources(&req, &body, &state.config.monetization_field);

    // The coordinator submission inside the gate may block; keep it off
    // the async workers.
    let gate = Arc::clone(&state.gate);
    let path = req.path().to_string();
    let decision = match web::block(move || gate.evaluate(&path, &sources)).await {
        Ok(decision) => decision,
        Err(_) => GateDecision::InvalidEvidence,
    };

    GATE_DECISIONS.with_label_values(&[decision.as_str()]).inc();

    if !decision.allows_access() {
        tracing::debug!(path = %req.path(), "payment required");
        return Err(GatewayError::PaymentRequired);
    }

    Ok(serve_static(&req, &state.config.www_dir).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_param() {
        let raw = "Monetization=%5B%22alice%22%5D&other=1";
        assert_eq!(find_param(raw, "Monetization"), Some(r#"["alice"]"#.to_string()));
        assert_eq!(find_param(raw, "other"), Some("1".to_string()));
        assert_eq!(find_param(raw, "missing"), None);
    }

    #[test]
    fn test_sanitize_path() {
        assert_eq!(sanitize_path("/"), Some(String::new()));
        assert_eq!(sanitize_path("/js/monetize.js"), Some("js/monetize.js".to_string()));
        assert!(sanitize_path("/../etc/passwd").is_none());
        assert!(sanitize_path("/%2e%2e/etc/passwd").is_none());
        assert!(sanitize_path("/file%00.txt").is_none());
    }
}

//! HTTP Basic Auth for the viewer endpoints
//!
//! The facility itself has no credential awareness; this middleware is the
//! only access control, applied before any viewer handler runs.

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// Credentials the viewer endpoints are gated behind
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: String,
    pub pass: String,
}

/// Middleware enforcing Basic Auth against the configured credentials
pub async fn require_basic_auth(
    State(credentials): State<Credentials>,
    request: Request,
    next: Next,
) -> Response {
    if authorized(request.headers().get(header::AUTHORIZATION), &credentials) {
        next.run(request).await
    } else {
        (
            StatusCode::UNAUTHORIZED,
            [(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(r#"Basic realm="Restricted""#),
            )],
            "Unauthorized",
        )
            .into_response()
    }
}

fn authorized(header: Option<&HeaderValue>, credentials: &Credentials) -> bool {
    let Some(value) = header.and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let Some(encoded) = value.strip_prefix("Basic ") else {
        return false;
    };
    let Ok(decoded) = BASE64.decode(encoded) else {
        return false;
    };
    let Ok(decoded) = String::from_utf8(decoded) else {
        return false;
    };
    match decoded.split_once(':') {
        Some((user, pass)) => user == credentials.user && pass == credentials.pass,
        None => false,
    }
}

/// Encode a `user:pass` pair as an `Authorization` header value
#[cfg(test)]
pub fn basic_auth_header(user: &str, pass: &str) -> String {
    format!("Basic {}", BASE64.encode(format!("{user}:{pass}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> Credentials {
        Credentials {
            user: "admin".to_string(),
            pass: "s3cret".to_string(),
        }
    }

    fn header_for(user: &str, pass: &str) -> HeaderValue {
        HeaderValue::from_str(&basic_auth_header(user, pass)).unwrap()
    }

    #[test]
    fn test_authorized_with_correct_credentials() {
        let header = header_for("admin", "s3cret");
        assert!(authorized(Some(&header), &creds()));
    }

    #[test]
    fn test_rejects_wrong_password() {
        let header = header_for("admin", "wrong");
        assert!(!authorized(Some(&header), &creds()));
    }

    #[test]
    fn test_rejects_missing_header() {
        assert!(!authorized(None, &creds()));
    }

    #[test]
    fn test_rejects_non_basic_scheme() {
        let header = HeaderValue::from_static("Bearer token");
        assert!(!authorized(Some(&header), &creds()));
    }

    #[test]
    fn test_rejects_invalid_base64() {
        let header = HeaderValue::from_static("Basic not-base64!!!");
        assert!(!authorized(Some(&header), &creds()));
    }

    #[test]
    fn test_rejects_payload_without_colon() {
        let header = HeaderValue::from_str(&format!("Basic {}", BASE64.encode("admins3cret")))
            .unwrap();
        assert!(!authorized(Some(&header), &creds()));
    }
}

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};

use jewelstore_core::SessionId;

use crate::context::SessionContext;

pub const SESSION_COOKIE: &str = "jewelstore_session";

/// Session cookie attributes.
#[derive(Debug, Clone, Copy)]
pub struct SessionCookie {
    /// Adds `Secure` (production deployments behind TLS).
    pub secure: bool,
}

impl SessionCookie {
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    fn header_value(&self, session_id: SessionId) -> String {
        let mut cookie = format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax");
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

/// Resolve the visitor's session from the cookie, issuing a new one when it is
/// absent or unparseable.
pub async fn session_middleware(
    State(cookie): State<SessionCookie>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let (session_id, issued) = match session_from_headers(req.headers()) {
        Some(id) => (id, false),
        None => (SessionId::new(), true),
    };

    req.extensions_mut().insert(SessionContext::new(session_id));
    let mut res = next.run(req).await;

    if issued {
        match HeaderValue::from_str(&cookie.header_value(session_id)) {
            Ok(value) => {
                res.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::warn!("failed to encode session cookie: {e}"),
        }
    }

    res
}

fn session_from_headers(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| value.trim().parse().ok())
}

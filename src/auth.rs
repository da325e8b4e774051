//! HTTP basic authentication with a single shared username and password.

use axum::{
    extract::{Request, State},
    http::{StatusCode, header::WWW_AUTHENTICATE},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Basic};
use sha2::{Digest, Sha512};

use crate::endpoints;

/// The challenge sent with every rejected request.
pub const BASIC_AUTH_CHALLENGE: &str = "Basic realm=\"Secure Area\"";

/// Path prefixes that are served without credentials.
const PUBLIC_PATH_PREFIXES: [&str; 2] = [endpoints::STATIC, endpoints::FAVICON];

/// The credentials that requests must present.
///
/// Only digests are kept so comparisons take the same time regardless of
/// where the submitted credentials differ.
#[derive(Clone)]
pub struct BasicAuthState {
    username_digest: Vec<u8>,
    password_digest: Vec<u8>,
}

impl BasicAuthState {
    /// Require `username` and `password` on every gated request.
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username_digest: Sha512::digest(username).to_vec(),
            password_digest: Sha512::digest(password).to_vec(),
        }
    }

    /// Whether `username` and `password` match the configured credentials.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let username_matches = Sha512::digest(username).as_slice() == self.username_digest;
        let password_matches = Sha512::digest(password).as_slice() == self.password_digest;

        username_matches & password_matches
    }
}

impl std::fmt::Debug for BasicAuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BasicAuthState { .. }")
    }
}

/// Middleware that lets a request through only if it carries the configured
/// basic auth credentials, or asks for static assets.
///
/// Missing, undecodable and wrong credentials all get the same 401 response.
pub async fn basic_auth_guard(
    State(state): State<BasicAuthState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();
    if PUBLIC_PATH_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
    {
        return next.run(request).await;
    }

    match request.headers().typed_get::<Authorization<Basic>>() {
        Some(Authorization(credentials))
            if state.verify(credentials.username(), credentials.password()) =>
        {
            next.run(request).await
        }
        Some(_) => {
            tracing::warn!("rejected request to {path} with invalid credentials");
            auth_required_response()
        }
        None => {
            tracing::debug!("request to {path} had no usable credentials");
            auth_required_response()
        }
    }
}

fn auth_required_response() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(WWW_AUTHENTICATE, BASIC_AUTH_CHALLENGE)],
        "Auth Required.",
    )
        .into_response()
}

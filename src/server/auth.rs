//! HTTP Basic authentication against a single configured credential pair.
//!
//! # Scheme
//!
//! Callers send the standard header:
//!
//! ```text
//! Authorization: Basic base64("{username}:{password}")
//! ```
//!
//! The decoded username and password are compared against the configured pair.
//! Every rejection carries a `WWW-Authenticate: Basic` challenge.
//!
//! # Security Properties
//!
//! - **Constant-time comparison**: both fields are compared with `subtle`, and the
//!   two results are combined without short-circuiting
//! - **No field disclosure**: a wrong username and a wrong password produce the
//!   same error
//! - **Stateless**: no lockout or attempt tracking
//!
//! # Example
//!
//! ```rust
//! use upload_gateway::server::auth::BasicAuth;
//!
//! let auth = BasicAuth::new("admin", "s3cret");
//!
//! assert_eq!(auth.verify("admin", "s3cret").unwrap(), "admin");
//! assert!(auth.verify("admin", "wrong").is_err());
//! ```

use std::fmt;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose, Engine as _};
use subtle::ConstantTimeEq;
use tracing::debug;

use super::handlers::ErrorResponse;

// =============================================================================
// Types
// =============================================================================

/// Authentication error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No `Authorization` header, or a scheme other than Basic
    MissingCredentials,

    /// Basic payload is not valid base64 / UTF-8, or has no `:` separator
    MalformedCredentials,

    /// Username or password does not match
    InvalidCredentials,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingCredentials => write!(f, "Not authenticated"),
            AuthError::MalformedCredentials => write!(f, "Invalid authentication credentials"),
            AuthError::InvalidCredentials => write!(f, "Credenciais de acesso inválidas."),
        }
    }
}

impl std::error::Error for AuthError {}

impl AuthError {
    fn error_type(&self) -> &'static str {
        match self {
            AuthError::MissingCredentials => "missing_credentials",
            AuthError::MalformedCredentials => "malformed_credentials",
            AuthError::InvalidCredentials => "invalid_credentials",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = StatusCode::UNAUTHORIZED;
        let error_type = self.error_type();
        let message = self.to_string();

        // Not an audit trail: rejections are only visible with debug logging on
        debug!(
            error_type = error_type,
            status = status.as_u16(),
            "Authentication failed: {}",
            message
        );

        let error_response = ErrorResponse::with_status(error_type, message, status);
        (
            status,
            [(header::WWW_AUTHENTICATE, HeaderValue::from_static("Basic"))],
            Json(error_response),
        )
            .into_response()
    }
}

/// Username of the caller that passed the credential check.
///
/// Inserted into request extensions by [`basic_auth_middleware`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub String);

impl AuthenticatedUser {
    pub fn username(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// Basic Authentication
// =============================================================================

/// Verifier for one fixed username/password pair.
///
/// Cloning is cheap; the pair is shared behind an `Arc` and never changes.
#[derive(Clone)]
pub struct BasicAuth {
    inner: Arc<Credentials>,
}

struct Credentials {
    username: Vec<u8>,
    password: Vec<u8>,
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &String::from_utf8_lossy(&self.inner.username))
            .field("password", &"<redacted>")
            .finish()
    }
}

impl BasicAuth {
    /// Create a verifier for the given expected username and password.
    pub fn new(username: impl AsRef<str>, password: impl AsRef<str>) -> Self {
        Self {
            inner: Arc::new(Credentials {
                username: username.as_ref().as_bytes().to_vec(),
                password: password.as_ref().as_bytes().to_vec(),
            }),
        }
    }

    /// Check a username and password against the configured pair.
    ///
    /// Returns the authenticated username on success.
    pub fn verify(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let user_ok = username.as_bytes().ct_eq(&self.inner.username);
        let pass_ok = password.as_bytes().ct_eq(&self.inner.password);

        if (user_ok & pass_ok).into() {
            Ok(username.to_string())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    /// Extract Basic credentials from request headers and verify them.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<AuthenticatedUser, AuthError> {
        let (username, password) = parse_basic_header(headers)?;
        self.verify(&username, &password).map(AuthenticatedUser)
    }
}

/// Decode the `Authorization: Basic ...` header into (username, password).
pub fn parse_basic_header(headers: &HeaderMap) -> Result<(String, String), AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let (scheme, encoded) = value
        .trim()
        .split_once(' ')
        .unwrap_or((value.trim(), ""));
    if !scheme.eq_ignore_ascii_case("basic") {
        return Err(AuthError::MissingCredentials);
    }

    let decoded = general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|_| AuthError::MalformedCredentials)?;
    let decoded = String::from_utf8(decoded).map_err(|_| AuthError::MalformedCredentials)?;

    let (username, password) = decoded
        .split_once(':')
        .ok_or(AuthError::MalformedCredentials)?;

    Ok((username.to_string(), password.to_string()))
}

/// Build an `Authorization` header value for the given pair.
pub fn basic_header_value(username: &str, password: &str) -> String {
    format!(
        "Basic {}",
        general_purpose::STANDARD.encode(format!("{}:{}", username, password))
    )
}

// =============================================================================
// Axum Middleware
// =============================================================================

/// Axum middleware requiring valid Basic credentials.
///
/// Runs before the handler; on success the caller's username is available to
/// handlers as `Extension<AuthenticatedUser>`.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, middleware, routing::post};
/// use upload_gateway::server::auth::{BasicAuth, basic_auth_middleware};
///
/// let auth = BasicAuth::new("admin", "s3cret");
/// let app = Router::new()
///     .route("/api/v1/docs-principais", post(upload_handler))
///     .route_layer(middleware::from_fn_with_state(auth, basic_auth_middleware));
/// ```
pub async fn basic_auth_middleware(
    State(auth): State<BasicAuth>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let user = auth.authenticate(request.headers())?;
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

// =============================================================================
// Tests
// =============================================================================

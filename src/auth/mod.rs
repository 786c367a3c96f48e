//! Session lifecycle against the J-Novel Club API: email/password login and
//! token invalidation on logout.
//!
//! Single sign-on accounts (Google, Facebook, ...) cannot log in this way and
//! are not supported.

pub mod endpoints;
pub mod error;
pub mod responses;
pub mod session;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde_json::{json, Value};

use self::endpoints::Endpoints;
use self::error::AuthError;
use self::responses::{ApiErrorDetail, LoginResponse};
pub use self::session::{Credentials, Session};

/// Authenticate with email and password.
///
/// A response is a failure when it carries an explicit `error` member or a
/// non-success status; only then is the body decoded into the token and
/// account identity.
pub async fn login(
    client: &Client,
    endpoints: &Endpoints,
    credentials: &Credentials,
) -> Result<Session, AuthError> {
    tracing::debug!("Authenticating as {}", credentials.email);

    let response = client
        .post(endpoints.login())
        .header(ACCEPT, "application/json")
        .json(&json!({
            "email": credentials.email,
            "password": credentials.password,
        }))
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?;
    let body: Option<Value> = serde_json::from_str(&text).ok();

    if let Some(detail) = body.as_ref().and_then(ApiErrorDetail::from_body) {
        return Err(AuthError::FailedLogin(detail.describe()));
    }
    if !status.is_success() {
        return Err(AuthError::FailedLogin(format!(
            "HTTP {}",
            status.as_u16()
        )));
    }

    let body =
        body.ok_or_else(|| AuthError::InvalidResponse("response body is not JSON".into()))?;
    let data: LoginResponse =
        serde_json::from_value(body).map_err(|e| AuthError::InvalidResponse(e.to_string()))?;
    if data.id.is_empty() {
        return Err(AuthError::InvalidResponse("empty access token".into()));
    }

    tracing::info!(account = %data.user.username, "Logged in");
    Ok(Session::new(data.id, data.user.id, data.user.username))
}

/// Invalidate the session's token on the server.
///
/// Takes the session by value: once logout has been attempted the token is
/// unusable whether or not the request succeeded.
pub async fn logout(
    client: &Client,
    endpoints: &Endpoints,
    session: Session,
) -> Result<(), AuthError> {
    let response = client
        .post(endpoints.logout())
        .header(AUTHORIZATION, session.access_token())
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(AuthError::ApiError {
            code: status.as_u16(),
            message,
        });
    }

    tracing::info!(account = %session.account_name(), "Logged out");
    Ok(())
}

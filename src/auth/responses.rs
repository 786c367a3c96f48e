use serde::Deserialize;
use serde_json::Value;

/// Successful response from `/users/login?include=user`.
///
/// Only the fields the sync needs are decoded; the service sends many more
/// (credits, subscription, preferences) which are ignored.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    /// The access token.
    pub id: String,
    pub user: LoginUser,
}

#[derive(Debug, Deserialize)]
pub struct LoginUser {
    pub id: String,
    pub username: String,
}

/// Error envelope returned by the API on failure:
/// `{"error": {"statusCode": 401, "code": "LOGIN_FAILED", "message": "login failed"}}`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorDetail {
    /// Extract the `error` member from a response body, if the body carries one.
    ///
    /// The member may be an object or, on some endpoints, a bare string.
    pub fn from_body(body: &Value) -> Option<Self> {
        match body.get("error")? {
            Value::Null => None,
            Value::String(s) => Some(Self {
                message: Some(s.clone()),
                ..Self::default()
            }),
            other => Some(serde_json::from_value(other.clone()).unwrap_or_default()),
        }
    }

    /// Human-readable description for logs and error messages.
    pub fn describe(&self) -> String {
        match (&self.message, &self.code) {
            (Some(message), Some(code)) => format!("{} ({})", message, code),
            (Some(message), None) => message.clone(),
            (None, Some(code)) => code.clone(),
            (None, None) => "service reported an error".to_string(),
        }
    }
}

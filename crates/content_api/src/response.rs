use serde::Deserialize;
use tour::Tour;

use crate::error::ApiError;
use crate::wire::WireUser;

/// Raw HTTP response as handed back by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    jwt: Option<String>,
}

/// Message from an `{"error": {"message": ...}}` body, if there is one.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()?
        .error?
        .message
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}

/// Maps a non-success response to an error, preferring the API's message.
pub fn check_status(resp: &ApiResponse, default_message: &str) -> Result<(), ApiError> {
    if resp.is_success() {
        return Ok(());
    }
    let message = error_message(&resp.body).unwrap_or_else(|| default_message.to_string());
    if resp.status == 401 {
        Err(ApiError::Unauthorized(message))
    } else {
        Err(ApiError::Status {
            status: resp.status,
            message,
        })
    }
}

/// Extracts the credential from a successful `auth/local` response.
///
/// Login failures never surface as [`ApiError::Unauthorized`]: a rejected
/// password is a form error, not an expired session.
pub fn decode_login(resp: &ApiResponse, default_message: &str) -> Result<String, ApiError> {
    check_status(resp, default_message).map_err(|err| match err {
        ApiError::Unauthorized(message) => ApiError::Status {
            status: resp.status,
            message,
        },
        other => other,
    })?;
    let body: LoginBody =
        serde_json::from_str(&resp.body).map_err(|e| ApiError::Decode(e.to_string()))?;
    body.jwt
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::Decode("response carries no token".to_string()))
}

pub fn decode_tour(resp: &ApiResponse, default_message: &str) -> Result<Tour, ApiError> {
    check_status(resp, default_message)?;
    let user: WireUser =
        serde_json::from_str(&resp.body).map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(user.into_tour())
}

#[cfg(test)]
mod tests {
    use super::{ApiResponse, decode_login, decode_tour};
    use crate::error::{ApiError, messages};
    use pretty_assertions::assert_eq;
    use tour::UserId;

    #[test]
    fn login_returns_token() {
        let resp = ApiResponse::new(200, r#"{ "jwt": "abc.def", "user": { "id": 3 } }"#);
        assert_eq!(
            decode_login(&resp, messages::LOGIN_FAILED),
            Ok("abc.def".to_string())
        );
    }

    #[test]
    fn login_failure_uses_api_message() {
        let resp = ApiResponse::new(
            400,
            r#"{ "data": null, "error": { "status": 400, "message": "Invalid identifier or password" } }"#,
        );
        assert_eq!(
            decode_login(&resp, messages::LOGIN_FAILED),
            Err(ApiError::Status {
                status: 400,
                message: "Invalid identifier or password".to_string()
            })
        );
    }

    #[test]
    fn login_failure_without_message_uses_default() {
        let resp = ApiResponse::new(401, "<html>nope</html>");
        let err = decode_login(&resp, messages::LOGIN_FAILED).unwrap_err();
        assert!(!err.is_unauthorized());
        assert_eq!(err.to_string(), messages::LOGIN_FAILED);
    }

    #[test]
    fn expired_credential_is_unauthorized() {
        let resp = ApiResponse::new(401, r#"{ "error": { "message": "Missing or invalid credentials" } }"#);
        let err = decode_tour(&resp, messages::USER_FETCH_FAILED).unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Missing or invalid credentials");
    }

    #[test]
    fn server_error_keeps_status() {
        let resp = ApiResponse::new(500, "");
        assert_eq!(
            decode_tour(&resp, messages::PUBLIC_FETCH_FAILED),
            Err(ApiError::Status {
                status: 500,
                message: messages::PUBLIC_FETCH_FAILED.to_string()
            })
        );
    }

    #[test]
    fn decodes_tour_tree() {
        let resp = ApiResponse::new(200, r#"{ "id": 4, "Org": [] }"#);
        let tour = decode_tour(&resp, messages::USER_FETCH_FAILED).expect("tour");
        assert_eq!(tour.user_id, UserId(4));
        assert!(tour.is_empty());
    }

    #[test]
    fn malformed_body_is_decode_error() {
        let resp = ApiResponse::new(200, "not json");
        assert!(matches!(
            decode_tour(&resp, messages::USER_FETCH_FAILED),
            Err(ApiError::Decode(_))
        ));
    }
}

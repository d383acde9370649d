use thiserror::Error;

/// Default messages shown when the API does not provide one.
pub mod messages {
    pub const LOGIN_FAILED: &str = "Ошибка авторизации";
    pub const NOT_AUTHENTICATED: &str = "Не авторизован";
    pub const USER_FETCH_FAILED: &str = "Ошибка получения данных пользователя";
    pub const PUBLIC_FETCH_FAILED: &str = "Ошибка получения публичных данных";
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 401 from the API: the stored credential is expired or invalid.
    #[error("{0}")]
    Unauthorized(String),
    /// No credential to send in the first place.
    #[error("{}", messages::NOT_AUTHENTICATED)]
    NotAuthenticated,
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("network error: {0}")]
    Transport(String),
    #[error("HTTP transport unavailable on this target")]
    TransportUnavailable,
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Errors after which the stored credential must be dropped.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_) | ApiError::NotAuthenticated)
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::InvalidUrl(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;

    #[test]
    fn unauthorized_variants() {
        assert!(ApiError::Unauthorized("expired".into()).is_unauthorized());
        assert!(ApiError::NotAuthenticated.is_unauthorized());
        assert!(
            !ApiError::Status {
                status: 500,
                message: "boom".into()
            }
            .is_unauthorized()
        );
    }

    #[test]
    fn display_uses_api_message() {
        let err = ApiError::Status {
            status: 400,
            message: "Invalid identifier or password".into(),
        };
        assert_eq!(err.to_string(), "Invalid identifier or password");
        assert_eq!(ApiError::NotAuthenticated.to_string(), "Не авторизован");
    }
}

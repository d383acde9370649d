use tour::{Tour, UserId};

use crate::config::ApiConfig;
use crate::error::{ApiError, messages};
use crate::request::{self, ApiRequest};
use crate::response::{self, ApiResponse};

/// Sends one request and hands back the raw response.
///
/// Non-2xx statuses are responses, not errors; only failures to reach the
/// server at all are reported as `Err`.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// The three calls the tour front-end makes.
#[derive(Debug, Clone)]
pub struct ContentClient<T> {
    config: ApiConfig,
    transport: T,
}

impl<T: Transport> ContentClient<T> {
    pub fn new(config: ApiConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Exchanges credentials for a bearer token.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<String, ApiError> {
        let req = request::login(&self.config, identifier.trim(), password)?;
        let resp = self.transport.send(req).await?;
        let token = response::decode_login(&resp, messages::LOGIN_FAILED)?;
        tracing::info!("login succeeded");
        Ok(token)
    }

    /// Loads the signed-in user's tour tree.
    pub async fn current_user(&self, token: &str) -> Result<Tour, ApiError> {
        let req = request::current_user(&self.config, token)?;
        let resp = self.transport.send(req).await?;
        let tour = response::decode_tour(&resp, messages::USER_FETCH_FAILED)?;
        tracing::info!(
            user = %tour.user_id,
            organizations = tour.organizations.len(),
            "tour loaded"
        );
        Ok(tour)
    }

    /// Loads another user's tour without authentication.
    pub async fn public_user(&self, user: UserId) -> Result<Tour, ApiError> {
        let req = request::public_user(&self.config, user)?;
        let resp = self.transport.send(req).await?;
        let tour = response::decode_tour(&resp, messages::PUBLIC_FETCH_FAILED)?;
        tracing::info!(
            user = %tour.user_id,
            organizations = tour.organizations.len(),
            "public tour loaded"
        );
        Ok(tour)
    }
}

#[cfg(test)]
mod tests {
    use super::{ContentClient, Transport};
    use crate::config::ApiConfig;
    use crate::error::{ApiError, messages};
    use crate::request::{ApiRequest, Method};
    use crate::response::ApiResponse;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use tour::UserId;

    /// Replays canned responses and records what was sent.
    struct FakeTransport {
        responses: RefCell<Vec<Result<ApiResponse, ApiError>>>,
        sent: RefCell<Vec<ApiRequest>>,
    }

    impl FakeTransport {
        fn new(responses: Vec<Result<ApiResponse, ApiError>>) -> Self {
            Self {
                responses: RefCell::new(responses),
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for FakeTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
            self.sent.borrow_mut().push(request);
            self.responses.borrow_mut().remove(0)
        }
    }

    fn client(responses: Vec<Result<ApiResponse, ApiError>>) -> ContentClient<FakeTransport> {
        ContentClient::new(ApiConfig::default(), FakeTransport::new(responses))
    }

    #[test]
    fn login_trims_identifier() {
        let c = client(vec![Ok(ApiResponse::new(200, r#"{ "jwt": "t1" }"#))]);
        let token = pollster::block_on(c.login("  alice ", "pw")).expect("token");
        assert_eq!(token, "t1");

        let sent = c.transport.sent.borrow();
        assert_eq!(sent[0].method, Method::Post);
        assert!(sent[0].body.as_deref().unwrap_or_default().contains("\"alice\""));
    }

    #[test]
    fn wrong_password_is_a_form_error() {
        let c = client(vec![Ok(ApiResponse::new(
            400,
            r#"{ "error": { "message": "Invalid identifier or password" } }"#,
        ))]);
        let err = pollster::block_on(c.login("alice", "nope")).unwrap_err();
        assert!(!err.is_unauthorized());
        assert_eq!(err.to_string(), "Invalid identifier or password");
    }

    #[test]
    fn current_user_sends_bearer() {
        let c = client(vec![Ok(ApiResponse::new(
            200,
            r#"{ "id": 7, "Org": [{ "id": 1, "Title": "HQ" }] }"#,
        ))]);
        let tour = pollster::block_on(c.current_user("tok")).expect("tour");
        assert_eq!(tour.user_id, UserId(7));
        assert_eq!(tour.organizations[0].title, "HQ");
        assert_eq!(c.transport.sent.borrow()[0].bearer.as_deref(), Some("tok"));
    }

    #[test]
    fn current_user_without_token_sends_nothing() {
        let c = client(vec![]);
        let err = pollster::block_on(c.current_user("")).unwrap_err();
        assert_eq!(err, ApiError::NotAuthenticated);
        assert!(c.transport.sent.borrow().is_empty());
    }

    #[test]
    fn expired_token_is_unauthorized() {
        let c = client(vec![Ok(ApiResponse::new(401, "{}"))]);
        let err = pollster::block_on(c.current_user("stale")).unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), messages::USER_FETCH_FAILED);
    }

    #[test]
    fn public_user_failure_uses_public_message() {
        let c = client(vec![Ok(ApiResponse::new(404, ""))]);
        let err = pollster::block_on(c.public_user(UserId(99))).unwrap_err();
        assert_eq!(err.to_string(), messages::PUBLIC_FETCH_FAILED);
    }

    #[test]
    fn network_failure_propagates() {
        let c = client(vec![Err(ApiError::Transport("offline".into()))]);
        let err = pollster::block_on(c.public_user(UserId(1))).unwrap_err();
        assert_eq!(err, ApiError::Transport("offline".into()));
    }
}

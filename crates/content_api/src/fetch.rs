//! Browser HTTP transport.
//!
//! On wasm32 this goes through `gloo-net`; host builds get a transport that
//! always reports [`ApiError::TransportUnavailable`] so the rest of the crate
//! still compiles and tests with a fake.

use crate::client::Transport;
use crate::error::ApiError;
use crate::request::ApiRequest;
use crate::response::ApiResponse;

#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserTransport;

impl BrowserTransport {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_arch = "wasm32")]
impl Transport for BrowserTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        use crate::request::Method;
        use gloo_net::http::Request;

        let transport = |e: gloo_net::Error| ApiError::Transport(e.to_string());

        let mut builder = match request.method {
            Method::Get => Request::get(request.url.as_str()),
            Method::Post => Request::post(request.url.as_str()),
        };
        if let Some(token) = &request.bearer {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }
        let resp = match request.body {
            Some(body) => {
                builder
                    .header("Content-Type", "application/json")
                    .body(body)
                    .map_err(transport)?
                    .send()
                    .await
            }
            None => builder.send().await,
        }
        .map_err(transport)?;

        let status = resp.status();
        let body = resp.text().await.map_err(transport)?;
        tracing::debug!(status, url = %request.url, "api response");
        Ok(ApiResponse { status, body })
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Transport for BrowserTransport {
    async fn send(&self, _request: ApiRequest) -> Result<ApiResponse, ApiError> {
        Err(ApiError::TransportUnavailable)
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::BrowserTransport;
    use crate::client::Transport;
    use crate::config::ApiConfig;
    use crate::error::ApiError;
    use crate::request;
    use tour::UserId;

    #[test]
    fn host_transport_is_unavailable() {
        let req = request::public_user(&ApiConfig::default(), UserId(1)).expect("request");
        let result = pollster::block_on(BrowserTransport::new().send(req));
        assert_eq!(result, Err(ApiError::TransportUnavailable));
    }
}

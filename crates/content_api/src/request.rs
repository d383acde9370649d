use serde::Serialize;
use tour::UserId;
use url::Url;

use crate::config::ApiConfig;
use crate::error::ApiError;

/// Relations the API must expand so one call returns the whole tour tree.
pub const TOUR_POPULATE: [&str; 4] = [
    "populate[Org][populate][Floor][populate][ImageMap]",
    "populate[Org][populate][Floor][populate][Room][populate][ImageRoom]",
    "populate[Org][populate][Floor][populate][audioFile]",
    "populate[Org][populate][Floor][populate][Room][populate][audioFile]",
];

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    /// Bearer token for the `Authorization` header.
    pub bearer: Option<String>,
    /// JSON body.
    pub body: Option<String>,
}

#[derive(Debug, Serialize)]
struct LoginBody<'a> {
    identifier: &'a str,
    password: &'a str,
}

pub fn login(config: &ApiConfig, identifier: &str, password: &str) -> Result<ApiRequest, ApiError> {
    let body = serde_json::to_string(&LoginBody {
        identifier,
        password,
    })
    .map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(ApiRequest {
        method: Method::Post,
        url: config.endpoint("auth/local")?,
        bearer: None,
        body: Some(body),
    })
}

pub fn current_user(config: &ApiConfig, token: &str) -> Result<ApiRequest, ApiError> {
    if token.trim().is_empty() {
        return Err(ApiError::NotAuthenticated);
    }
    Ok(ApiRequest {
        method: Method::Get,
        url: with_tour_populate(config.endpoint("users/me")?),
        bearer: Some(token.to_string()),
        body: None,
    })
}

pub fn public_user(config: &ApiConfig, user: UserId) -> Result<ApiRequest, ApiError> {
    Ok(ApiRequest {
        method: Method::Get,
        url: with_tour_populate(config.endpoint(&format!("users/{user}"))?),
        bearer: None,
        body: None,
    })
}

fn with_tour_populate(mut url: Url) -> Url {
    {
        let mut pairs = url.query_pairs_mut();
        for key in TOUR_POPULATE {
            pairs.append_pair(key, "*");
        }
    }
    url
}

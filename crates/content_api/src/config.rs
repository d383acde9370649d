use serde::{Deserialize, Serialize};
use tour::{AssetRef, UserId};
use url::Url;

use crate::error::ApiError;

pub const DEFAULT_API_BASE: &str = "http://localhost:1337/api";
pub const DEFAULT_MEDIA_HOST: &str = "http://localhost:1337";
pub const DEFAULT_PUBLIC_USER: UserId = UserId(1);

/// Where the content API and its media live.
///
/// Every field is optional in serialized form; missing fields keep their
/// defaults so a page can override just one of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiConfig {
    pub api_base: String,
    /// Host that relative media references (`/uploads/...`) resolve against.
    pub media_host: String,
    /// User shown by the public view when the link carries no `userId`.
    pub public_user_fallback: UserId,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            media_host: DEFAULT_MEDIA_HOST.to_string(),
            public_user_fallback: DEFAULT_PUBLIC_USER,
        }
    }
}

impl ApiConfig {
    pub fn from_json(raw: &str) -> Result<Self, ApiError> {
        serde_json::from_str(raw).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Resolves an API path such as `users/me` below `api_base`.
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(directory_url(&self.api_base)?.join(path.trim_start_matches('/'))?)
    }

    pub fn asset_url(&self, asset: &AssetRef) -> Result<Url, ApiError> {
        Ok(directory_url(&self.media_host)?.join(asset.as_str())?)
    }
}

/// Parses `base` so that joining appends to it instead of replacing its
/// last path segment.
fn directory_url(base: &str) -> Result<Url, ApiError> {
    let base = base.trim();
    if base.ends_with('/') {
        Ok(Url::parse(base)?)
    } else {
        Ok(Url::parse(&format!("{base}/"))?)
    }
}

#[cfg(test)]
mod tests {
    use super::ApiConfig;
    use pretty_assertions::assert_eq;
    use tour::{AssetRef, UserId};

    #[test]
    fn endpoint_keeps_api_prefix() {
        let cfg = ApiConfig::default();
        assert_eq!(
            cfg.endpoint("users/me").expect("url").as_str(),
            "http://localhost:1337/api/users/me"
        );
        assert_eq!(
            cfg.endpoint("/auth/local").expect("url").as_str(),
            "http://localhost:1337/api/auth/local"
        );
    }

    #[test]
    fn relative_assets_resolve_against_media_host() {
        let cfg = ApiConfig {
            media_host: "https://cms.example.org/".to_string(),
            ..ApiConfig::default()
        };
        let url = cfg.asset_url(&AssetRef::new("/uploads/hall.jpg")).expect("url");
        assert_eq!(url.as_str(), "https://cms.example.org/uploads/hall.jpg");

        let absolute = cfg
            .asset_url(&AssetRef::new("https://cdn.example.org/a.mp3"))
            .expect("url");
        assert_eq!(absolute.as_str(), "https://cdn.example.org/a.mp3");
    }

    #[test]
    fn partial_json_overrides_defaults() {
        let cfg = ApiConfig::from_json(r#"{ "apiBase": "https://api.example.org/api" }"#)
            .expect("config");
        assert_eq!(cfg.api_base, "https://api.example.org/api");
        assert_eq!(cfg.media_host, "http://localhost:1337");
        assert_eq!(cfg.public_user_fallback, UserId(1));
    }

    #[test]
    fn invalid_base_is_reported() {
        let cfg = ApiConfig {
            api_base: "not a url".to_string(),
            ..ApiConfig::default()
        };
        assert!(cfg.endpoint("users/me").is_err());
    }
}

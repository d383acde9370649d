use content_api::ApiConfig;

use crate::dom;

/// Name of the optional page global overriding [`ApiConfig`] fields.
pub const CONFIG_GLOBAL: &str = "__tourConfig";

/// Reads `window.__tourConfig`, falling back to defaults field by field.
pub fn read_config() -> ApiConfig {
    let Some(raw) = dom::global_json(CONFIG_GLOBAL) else {
        return ApiConfig::default();
    };
    match ApiConfig::from_json(&raw) {
        Ok(config) => {
            tracing::info!(api = %config.api_base, media = %config.media_host, "using page config");
            config
        }
        Err(err) => {
            tracing::warn!(%err, "ignoring malformed {CONFIG_GLOBAL}");
            ApiConfig::default()
        }
    }
}

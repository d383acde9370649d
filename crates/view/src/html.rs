use content_api::ApiConfig;
use tour::AssetRef;

/// Escapes text for use in element content and quoted attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Absolute, escaped media URL, or `None` if the reference does not resolve.
pub fn media_src(config: &ApiConfig, asset: &AssetRef) -> Option<String> {
    match config.asset_url(asset) {
        Ok(url) => Some(escape(url.as_str())),
        Err(err) => {
            tracing::warn!(%err, asset = asset.as_str(), "unresolvable media reference");
            None
        }
    }
}

/// `main-btn` for the active entry, outlined otherwise.
pub(crate) fn button_class(active: bool) -> &'static str {
    if active {
        "main-btn"
    } else {
        "main-btn main-btn-outline"
    }
}

/// Card with a header, as used by every sidebar section.
pub(crate) fn card(icon: &str, title: &str, body: &str) -> String {
    format!(
        r#"<div class="main-card mb-3">
    <div class="main-card-header"><i class="bi bi-{icon} me-2"></i><h5 class="mb-0">{title}</h5></div>
    <div class="main-card-body">{body}</div>
</div>"#
    )
}

pub(crate) fn muted(text: &str) -> String {
    format!(r#"<p class="text-muted">{text}</p>"#)
}

use crate::html::escape;
use crate::text;

/// How long a notification stays before it fades.
pub const NOTICE_TIMEOUT_MS: i32 = 3_000;
/// Fade-out duration before the element is removed.
pub const NOTICE_FADE_MS: i32 = 300;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

impl NoticeKind {
    pub fn alert_class(self) -> &'static str {
        match self {
            NoticeKind::Success => "alert-success",
            NoticeKind::Warning => "alert-warning",
            NoticeKind::Error => "alert-danger",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            NoticeKind::Success => "check-circle-fill",
            NoticeKind::Warning => "exclamation-triangle-fill",
            NoticeKind::Error => "x-circle-fill",
        }
    }
}

/// Result of a clipboard copy as reported by the browser glue.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// The fallback ran but the browser declined to copy.
    Declined,
    Failed,
}

impl CopyOutcome {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "ok" => CopyOutcome::Copied,
            "warning" => CopyOutcome::Declined,
            _ => CopyOutcome::Failed,
        }
    }

    pub fn notice(self) -> (&'static str, NoticeKind) {
        match self {
            CopyOutcome::Copied => (text::LINK_COPIED, NoticeKind::Success),
            CopyOutcome::Declined => (text::LINK_COPY_RETRY, NoticeKind::Warning),
            CopyOutcome::Failed => (text::LINK_COPY_FAILED, NoticeKind::Error),
        }
    }
}

/// Inner markup of a transient notification; the element itself carries
/// the `copy-notification` and [`NoticeKind::alert_class`] classes.
pub fn notification(message: &str, kind: NoticeKind) -> String {
    format!(
        r#"<div class="d-flex align-items-center"><i class="bi bi-{} me-2"></i><span>{}</span></div>"#,
        kind.icon(),
        escape(message)
    )
}

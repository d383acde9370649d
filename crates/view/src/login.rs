use crate::html::escape;
use crate::text;

/// Login form. `error` is shown above the fields and escaped.
///
/// While `pending`, the submit button is disabled and shows a spinner.
pub fn login_view(error: Option<&str>, pending: bool) -> String {
    let error_block = match error {
        Some(message) => format!(
            r#"<div id="login-error" class="auth-error" role="alert"><i class="bi bi-exclamation-circle me-2"></i><span id="error-message">{}</span></div>"#,
            escape(message)
        ),
        None => String::new(),
    };
    let (disabled, submit) = if pending {
        (
            " disabled",
            format!(
                r#"<span class="spinner-border spinner-border-sm me-2" role="status" aria-hidden="true"></span> {}"#,
                text::LOGIN_PENDING
            ),
        )
    } else {
        (
            "",
            format!(
                r#"<span class="auth-btn-text">{}</span> <i class="bi bi-arrow-right-circle ms-2"></i>"#,
                text::LOGIN_SUBMIT
            ),
        )
    };
    let card_class = if error.is_some() {
        "auth-card auth-shake"
    } else {
        "auth-card"
    };

    format!(
        r#"<div id="login-container" class="auth-container">
    <div class="{card_class}">
        <h2 class="auth-title">{title}</h2>
        {error_block}
        <form id="login-form" data-action="login">
            <div class="auth-input-wrap">
                <i class="bi bi-person auth-input-icon"></i>
                <input id="identifier" name="identifier" class="auth-input" type="text" autocomplete="username" placeholder="{identifier}" required>
            </div>
            <div class="auth-input-wrap">
                <i class="bi bi-lock auth-input-icon"></i>
                <input id="password" name="password" class="auth-input" type="password" autocomplete="current-password" placeholder="{password}" required>
                <button id="toggle-password" type="button" class="auth-eye" data-action="toggle-password"><i class="bi bi-eye"></i></button>
            </div>
            <button type="submit" class="auth-btn"{disabled}>{submit}</button>
        </form>
    </div>
</div>"#,
        title = text::LOGIN_TITLE,
        identifier = text::LOGIN_IDENTIFIER,
        password = text::LOGIN_PASSWORD,
    )
}

/// Screen shown while a stored credential is being checked.
pub fn loading_view() -> String {
    format!(
        r#"<div class="loading-container d-flex justify-content-center align-items-center">
    <div class="spinner-border" role="status"><span class="visually-hidden">{}</span></div>
</div>"#,
        text::LOADING
    )
}

#[cfg(test)]
mod tests {
    use super::login_view;

    #[test]
    fn clean_form_has_no_error_block() {
        let html = login_view(None, false);
        assert!(html.contains(r#"id="login-form""#));
        assert!(!html.contains("login-error"));
        assert!(!html.contains(" disabled"));
    }

    #[test]
    fn error_is_escaped_and_shown() {
        let html = login_view(Some("<bad> password"), false);
        assert!(html.contains("&lt;bad&gt; password"));
        assert!(html.contains("auth-shake"));
    }

    #[test]
    fn pending_disables_submit() {
        let html = login_view(None, true);
        assert!(html.contains(" disabled>"));
        assert!(html.contains("Вход..."));
    }
}

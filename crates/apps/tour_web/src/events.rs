//! Delegated event handling. One listener per event type sits on the root;
//! targets are found through their `data-action` attribute.

use std::sync::atomic::{AtomicBool, Ordering};

use tour::audio::AudioScope;
use view::notice::{CopyOutcome, NOTICE_FADE_MS, NOTICE_TIMEOUT_MS, NoticeKind, notification};
use view::public::sidebar_toggle_icon;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Element, Event, HtmlInputElement, HtmlSelectElement};

use crate::audio::AudioPlayer;
use crate::{Mode, dom, js, with_state};

static INSTALLED: AtomicBool = AtomicBool::new(false);

pub fn install(root_id: &str) -> Result<(), JsValue> {
    if INSTALLED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    let root = dom::require_element(root_id)?;
    let listeners: [(&str, fn(Event)); 3] = [
        ("click", on_click),
        ("change", on_change),
        ("submit", on_submit),
    ];
    for (kind, handler) in listeners {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        root.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        // The root lives as long as the page.
        closure.forget();
    }
    Ok(())
}

fn parse_index(raw: Option<String>) -> Option<usize> {
    raw?.trim().parse().ok()
}

fn index_of(el: &Element) -> Option<usize> {
    let index = parse_index(el.get_attribute("data-index"));
    if index.is_none() {
        tracing::warn!(action = ?el.get_attribute("data-action"), "missing data-index");
    }
    index
}

fn on_click(event: Event) {
    let Some((el, action)) = dom::action_target(&event) else {
        return;
    };
    match action.as_str() {
        "select-floor" => {
            if let Some(i) = index_of(&el) {
                crate::navigate(|t| {
                    t.select_floor(i);
                    true
                });
            }
        }
        "select-room" => {
            if let Some(i) = index_of(&el) {
                crate::navigate(|t| {
                    t.select_room(i);
                    true
                });
            }
        }
        "hotspot" => {
            if let Some(i) = index_of(&el) {
                crate::navigate(|t| t.activate_hotspot(i));
            }
        }
        "toggle-audio" => {
            match el
                .get_attribute("data-scope")
                .as_deref()
                .and_then(AudioScope::from_element_id)
            {
                Some(scope) => crate::with_player(scope, AudioPlayer::toggle),
                None => tracing::warn!("audio button without a scope"),
            }
        }
        "logout" => crate::logout(),
        "share" => share(),
        "copy-link" => match dom::input_value("public-link-input") {
            Ok(link) => spawn_local(copy_text(link)),
            Err(err) => dom::log_error("copy link", &err),
        },
        "toggle-sidebar" => toggle_sidebar(),
        "toggle-password" => toggle_password(&el),
        "reload" => {
            if let Err(err) = dom::reload() {
                dom::log_error("reload", &err);
            }
        }
        _ => {}
    }
}

fn on_change(event: Event) {
    let Some((el, action)) = dom::action_target(&event) else {
        return;
    };
    if action != "select-org" {
        return;
    }
    let Ok(select) = el.dyn_into::<HtmlSelectElement>() else {
        return;
    };
    if let Some(i) = parse_index(Some(select.value())) {
        crate::navigate(|t| {
            t.select_organization(i);
            true
        });
    }
}

fn on_submit(event: Event) {
    let Some((_, action)) = dom::action_target(&event) else {
        return;
    };
    if action != "login" {
        return;
    }
    event.prevent_default();
    match (dom::input_value("identifier"), dom::input_value("password")) {
        (Ok(identifier), Ok(password)) => crate::login(identifier, password),
        (Err(err), _) | (_, Err(err)) => dom::log_error("login form", &err),
    }
}

/// Native share sheet when the browser has one, clipboard otherwise.
fn share() {
    let target = with_state(|cell| {
        let state = cell.borrow();
        state
            .tour_state()
            .and_then(|t| crate::share_target(t, state.page_url.as_ref()))
    });
    let Some((title, link)) = target else {
        tracing::warn!("nothing to share");
        return;
    };
    spawn_local(async move {
        match JsFuture::from(js::tour_share(&title, &link)).await {
            Ok(shared) if shared.as_bool() == Some(true) => {}
            Ok(_) => copy_text(link).await,
            Err(err) => {
                dom::log_error("share", &err);
                copy_text(link).await;
            }
        }
    });
}

async fn copy_text(text: String) {
    let outcome = match JsFuture::from(js::tour_copy_text(&text)).await {
        Ok(raw) => CopyOutcome::parse(&raw.as_string().unwrap_or_default()),
        Err(err) => {
            dom::log_error("copy", &err);
            CopyOutcome::Failed
        }
    };
    let (message, kind) = outcome.notice();
    notify(message, kind);
}

/// Shows a transient notification that fades out and removes itself.
fn notify(message: &str, kind: NoticeKind) {
    if let Err(err) = try_notify(message, kind) {
        dom::log_error("notification", &err);
    }
}

fn try_notify(message: &str, kind: NoticeKind) -> Result<(), JsValue> {
    let window = dom::window()?;
    let document = dom::document()?;
    let el = document.create_element("div")?;
    el.set_class_name(&format!("copy-notification alert {}", kind.alert_class()));
    el.set_inner_html(&notification(message, kind));
    document
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?
        .append_child(&el)?;

    let fade = Closure::once_into_js(move || {
        let _ = el.class_list().add_1("fade-out");
        let remove = Closure::once_into_js(move || el.remove());
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                remove.unchecked_ref(),
                NOTICE_FADE_MS,
            );
        }
    });
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        fade.unchecked_ref(),
        NOTICE_TIMEOUT_MS,
    )?;
    Ok(())
}

/// Collapses or expands the public sidebar without re-rendering, so the
/// mounted scene keeps its camera.
fn toggle_sidebar() {
    let hidden = with_state(|cell| match &mut cell.borrow_mut().mode {
        Mode::Public { chrome, .. } => {
            chrome.sidebar_hidden = !chrome.sidebar_hidden;
            Some(chrome.sidebar_hidden)
        }
        _ => None,
    });
    let Some(hidden) = hidden else {
        return;
    };
    let Ok(document) = dom::document() else {
        return;
    };
    for selector in [".container-fluid", ".sidebar-panel", "#toggle-sidebar"] {
        if let Ok(Some(el)) = document.query_selector(selector) {
            let _ = el.class_list().toggle_with_force("sidebar-hidden", hidden);
        }
    }
    if let Some(button) = dom::element_by_id("toggle-sidebar") {
        button.set_inner_html(&format!(
            r#"<i class="bi bi-{}"></i>"#,
            sidebar_toggle_icon(hidden)
        ));
    }
}

fn toggle_password(button: &Element) {
    let Some(input) = dom::element_by_id("password")
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    else {
        return;
    };
    let reveal = input.type_() == "password";
    input.set_type(if reveal { "text" } else { "password" });
    let icon = if reveal { "eye-slash" } else { "eye" };
    button.set_inner_html(&format!(r#"<i class="bi bi-{icon}"></i>"#));
}

#[cfg(test)]
mod tests {
    use super::parse_index;
    use pretty_assertions::assert_eq;

    #[test]
    fn indices_come_from_data_attributes() {
        assert_eq!(parse_index(Some("3".to_string())), Some(3));
        assert_eq!(parse_index(Some(" 0 ".to_string())), Some(0));
        assert_eq!(parse_index(Some("-1".to_string())), None);
        assert_eq!(parse_index(Some("abc".to_string())), None);
        assert_eq!(parse_index(None), None);
    }
}

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlInputElement, Window};

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub fn element_by_id(id: &str) -> Option<Element> {
    document().ok()?.get_element_by_id(id)
}

pub fn require_element(id: &str) -> Result<Element, JsValue> {
    element_by_id(id).ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))
}

pub fn set_html(id: &str, html: &str) -> Result<(), JsValue> {
    require_element(id)?.set_inner_html(html);
    Ok(())
}

pub fn input_value(id: &str) -> Result<String, JsValue> {
    Ok(require_element(id)?.dyn_into::<HtmlInputElement>()?.value())
}

/// The element an event was meant for: the nearest ancestor carrying
/// `data-action`, and that action.
pub fn action_target(event: &web_sys::Event) -> Option<(Element, String)> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let el = target.closest("[data-action]").ok()??;
    let action = el.get_attribute("data-action")?;
    Some((el, action))
}

pub fn page_href() -> Option<String> {
    window().ok()?.location().href().ok()
}

pub fn page_query() -> String {
    window()
        .ok()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

pub fn reload() -> Result<(), JsValue> {
    window()?.location().reload()
}

/// Global config object set by the hosting page, serialized to JSON.
pub fn global_json(name: &str) -> Option<String> {
    let window = web_sys::window()?;
    let val = js_sys::Reflect::get(&window, &JsValue::from_str(name)).ok()?;
    if val.is_undefined() || val.is_null() {
        return None;
    }
    js_sys::JSON::stringify(&val).ok()?.as_string()
}

pub fn log_error(context: &str, err: &JsValue) {
    tracing::error!("{context}: {err:?}");
}

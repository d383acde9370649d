//! Audio-guide players. One per scope; each owns its `<audio>` element,
//! its listeners and its countdown interval.

use tour::audio::{AudioScope, Playback};
use view::panorama::{audio_button_content, audio_button_id};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlAudioElement;

use crate::dom;

const TICK_MS: i32 = 1_000;

pub struct AudioPlayer {
    scope: AudioScope,
    element: HtmlAudioElement,
    playback: Playback,
    interval: Option<i32>,
    on_tick: Closure<dyn FnMut()>,
    on_metadata: Closure<dyn FnMut()>,
    on_ended: Closure<dyn FnMut()>,
}

impl AudioPlayer {
    /// Creates the scope's audio element, replacing any stray one with the
    /// same id.
    pub fn new(scope: AudioScope, src: &str) -> Result<Self, JsValue> {
        let document = dom::document()?;
        if let Some(stale) = document.get_element_by_id(scope.element_id()) {
            stale.remove();
        }
        let element = HtmlAudioElement::new_with_src(src)?;
        element.set_id(scope.element_id());
        element.set_preload("auto");
        document
            .body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .append_child(&element)?;

        let on_tick = Closure::wrap(Box::new(move || crate::with_player(scope, AudioPlayer::sync))
            as Box<dyn FnMut()>);
        let on_metadata = Closure::wrap(
            Box::new(move || crate::with_player(scope, AudioPlayer::sync)) as Box<dyn FnMut()>,
        );
        let on_ended = Closure::wrap(
            Box::new(move || crate::with_player(scope, AudioPlayer::finish)) as Box<dyn FnMut()>,
        );
        element
            .add_event_listener_with_callback("loadedmetadata", on_metadata.as_ref().unchecked_ref())?;
        element.add_event_listener_with_callback("ended", on_ended.as_ref().unchecked_ref())?;

        tracing::debug!(scope = scope.element_id(), src, "audio guide ready");
        Ok(Self {
            scope,
            element,
            playback: Playback::Idle,
            interval: None,
            on_tick,
            on_metadata,
            on_ended,
        })
    }

    pub fn scope(&self) -> AudioScope {
        self.scope
    }

    pub fn toggle(&mut self) {
        if self.playback.toggle() {
            if let Err(err) = self.element.play() {
                dom::log_error("audio play", &err);
            }
            self.start_timer();
        } else {
            if let Err(err) = self.element.pause() {
                dom::log_error("audio pause", &err);
            }
            self.stop_timer();
        }
        self.refresh_button();
    }

    fn sync(&mut self) {
        self.playback
            .update(self.element.duration(), self.element.current_time());
        self.refresh_button();
    }

    fn finish(&mut self) {
        self.playback.ended();
        self.stop_timer();
        self.refresh_button();
    }

    fn start_timer(&mut self) {
        self.stop_timer();
        let Ok(window) = dom::window() else {
            return;
        };
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            self.on_tick.as_ref().unchecked_ref(),
            TICK_MS,
        ) {
            Ok(handle) => self.interval = Some(handle),
            Err(err) => dom::log_error("audio timer", &err),
        }
    }

    fn stop_timer(&mut self) {
        if let (Some(handle), Ok(window)) = (self.interval.take(), dom::window()) {
            window.clear_interval_with_handle(handle);
        }
    }

    fn refresh_button(&self) {
        if let Some(button) = dom::element_by_id(&audio_button_id(self.scope)) {
            button.set_inner_html(&audio_button_content(self.scope, self.playback));
        }
    }
}

impl Drop for AudioPlayer {
    fn drop(&mut self) {
        self.stop_timer();
        let _ = self.element.pause();
        let _ = self.element.remove_event_listener_with_callback(
            "loadedmetadata",
            self.on_metadata.as_ref().unchecked_ref(),
        );
        let _ = self
            .element
            .remove_event_listener_with_callback("ended", self.on_ended.as_ref().unchecked_ref());
        self.element.remove();
    }
}

//! Panorama mounting. The image is preloaded off-DOM first; the scene is
//! only built once it has arrived, and only if no newer render happened
//! in between.

use content_api::ApiConfig;
use tour::TourState;
use tour::audio::guide_for;
use view::panorama::{PANORAMA_SLOT_ID, PanoramaSource, load_error, overlays, panorama_source, scene};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlImageElement;

use crate::audio::AudioPlayer;
use crate::{dom, with_state};

/// An image being preloaded for one render generation.
pub struct PendingImage {
    img: HtmlImageElement,
    _onload: Closure<dyn FnMut()>,
    _onerror: Closure<dyn FnMut()>,
}

impl Drop for PendingImage {
    fn drop(&mut self) {
        self.img.set_onload(None);
        self.img.set_onerror(None);
    }
}

pub fn preload(generation: u64, url: &str) -> Result<PendingImage, JsValue> {
    let img = HtmlImageElement::new()?;
    img.set_cross_origin(Some("anonymous"));
    let onload = Closure::wrap(Box::new(move || mount_scene(generation)) as Box<dyn FnMut()>);
    let onerror = Closure::wrap(Box::new(move || show_load_error(generation)) as Box<dyn FnMut()>);
    img.set_onload(Some(onload.as_ref().unchecked_ref()));
    img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    img.set_src(url);
    Ok(PendingImage {
        img,
        _onload: onload,
        _onerror: onerror,
    })
}

fn mount_scene(generation: u64) {
    with_state(|cell| {
        let mut state = cell.borrow_mut();
        if state.render_generation != generation {
            return;
        }
        let player = {
            let Some(tour) = state.tour_state() else {
                return;
            };
            let PanoramaSource::Ready { url } = panorama_source(tour, &state.config) else {
                return;
            };
            let image_id = format!("panorama-img-{generation}");
            let html = format!(
                "{}{}",
                scene(tour, &image_id, &url, state.look_controls()),
                overlays(tour, &state.config)
            );
            if let Err(err) = dom::set_html(PANORAMA_SLOT_ID, &html) {
                dom::log_error("mount panorama", &err);
                return;
            }
            tracing::debug!(generation, %url, "panorama mounted");
            audio_player(tour, &state.config)
        };
        state.players.extend(player);
    });
}

fn show_load_error(generation: u64) {
    let current = with_state(|cell| cell.borrow().render_generation == generation);
    if !current {
        return;
    }
    tracing::warn!(generation, "panorama image failed to load");
    if let Err(err) = dom::set_html(PANORAMA_SLOT_ID, &load_error()) {
        dom::log_error("panorama error", &err);
    }
}

fn audio_player(tour: &TourState, config: &ApiConfig) -> Option<AudioPlayer> {
    let floor = tour.current_floor()?;
    let guide = guide_for(floor, tour.current_room())?;
    let src = config
        .asset_url(guide.track)
        .inspect_err(|err| tracing::warn!(%err, "audio guide has no usable url"))
        .ok()?;
    AudioPlayer::new(guide.scope, src.as_str())
        .inspect_err(|err| dom::log_error("audio guide", err))
        .ok()
}

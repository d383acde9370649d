//! Panorama slot, A-Frame scene markup and the overlays drawn above it.

use content_api::ApiConfig;
use tour::audio::{AudioScope, Playback, format_remaining, guide_for};
use tour::hotspot::markers;
use tour::TourState;

use crate::html::{escape, media_src};
use crate::text;

/// Element the scene is mounted into once the image has loaded.
pub const PANORAMA_SLOT_ID: &str = "simple-panorama";

pub const AUTH_LOOK_CONTROLS: &str = "reverseMouseDrag: true";
pub const PUBLIC_LOOK_CONTROLS: &str =
    "touchEnabled: true; mouseEnabled: true; pointerLockEnabled: true;";

/// What the panorama area can show for the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanoramaSource {
    /// The floor has no rooms (or there is no floor).
    NoRooms,
    /// The room exists but has no usable image.
    Unavailable,
    Ready { url: String },
}

pub fn panorama_source(state: &TourState, config: &ApiConfig) -> PanoramaSource {
    let Some(room) = state.current_room() else {
        return PanoramaSource::NoRooms;
    };
    room.panorama
        .as_ref()
        .and_then(|asset| config.asset_url(asset).ok())
        .map_or(PanoramaSource::Unavailable, |url| PanoramaSource::Ready {
            url: url.to_string(),
        })
}

fn placeholder(message: &str, failed: bool) -> String {
    let (class, icon) = if failed {
        ("panorama-placeholder panorama-error", "exclamation-triangle-fill")
    } else {
        ("panorama-placeholder", "exclamation-circle")
    };
    format!(
        r#"<div class="main-card m-3 {class}"><div class="main-card-body"><i class="bi bi-{icon} me-2"></i>{message}</div></div>"#
    )
}

/// Shown in place of the scene when the image fails to load.
pub fn load_error() -> String {
    placeholder(text::PANORAMA_LOAD_FAILED, true)
}

/// Initial content of the panorama area: a placeholder, or the mount slot
/// with a spinner until the image arrives.
pub fn panorama_slot(source: &PanoramaSource) -> String {
    match source {
        PanoramaSource::NoRooms => placeholder(text::NO_PANORAMAS, false),
        PanoramaSource::Unavailable => placeholder(text::NO_ROOM_PANORAMA, false),
        PanoramaSource::Ready { .. } => format!(
            r#"<div id="{PANORAMA_SLOT_ID}" class="w-100 h-100"><div class="loading-container d-flex justify-content-center align-items-center"><div class="spinner-border" role="status"><span class="visually-hidden">{}</span></div></div></div>"#,
            text::LOADING
        ),
    }
}

/// The A-Frame scene for the current room with one entity per hotspot.
///
/// Hotspot entities carry `data-action="hotspot"` and their index into
/// [`TourState::hotspots`]; the `face-camera` component keeps them upright
/// and turned towards the viewer.
pub fn scene(state: &TourState, image_id: &str, image_url: &str, look_controls: &str) -> String {
    let image_id = escape(image_id);
    let mut out = format!(
        r##"<a-scene embedded vr-mode-ui="enabled: false" style="width: 100%; height: 100%;">
<a-assets><img id="{image_id}" src="{src}" crossorigin="anonymous"></a-assets>
<a-sky src="#{image_id}" rotation="0 -90 0"></a-sky>
<a-camera position="0 0 0" look-controls="{look}"><a-cursor color="#fff" fuse="true" fuse-timeout="1000" animation__mouseenter="property: scale; to: 1.5 1.5 1; startEvents: mouseenter; dur: 150" animation__mouseleave="property: scale; to: 1 1 1; startEvents: mouseleave; dur: 150"></a-cursor></a-camera>
"##,
        src = escape(image_url),
        look = escape(look_controls),
    );

    let hotspots = state.hotspots();
    for marker in markers(&hotspots) {
        let [x, y, z] = marker.position.as_array();
        let title = escape(&marker.hotspot.title);
        out.push_str(&format!(
            r##"<a-entity class="panorama-hotspot" data-action="hotspot" data-index="{index}" title="{title}" position="{x:.3} {y:.3} {z:.3}" geometry="primitive: circle; radius: 0.3" material="color: #ff5e62; opacity: 0.85; side: double" face-camera event-set__mouseenter="scale: 1.5 1.5 1" event-set__mouseleave="scale: 1 1 1"><a-text value="{title}" align="center" color="#fff" width="10" position="0 0.6 0" side="double"></a-text></a-entity>
"##,
            index = marker.index,
        ));
    }
    out.push_str("</a-scene>");
    out
}

pub fn audio_button_id(scope: AudioScope) -> String {
    format!("{}-btn", scope.element_id())
}

pub fn audio_label(scope: AudioScope, playback: Playback) -> String {
    match playback {
        Playback::Idle => match scope {
            AudioScope::Room => text::AUDIO_GUIDE.to_string(),
            AudioScope::Floor => text::FLOOR_AUDIO_GUIDE.to_string(),
        },
        Playback::Playing { remaining_s: None } => {
            format!("{} ({})", text::AUDIO_PAUSE, text::AUDIO_LOADING)
        }
        Playback::Playing {
            remaining_s: Some(left),
        } => format!("{} ({})", text::AUDIO_PAUSE, format_remaining(left)),
    }
}

/// Inner markup of the audio button, re-rendered on every playback change.
pub fn audio_button_content(scope: AudioScope, playback: Playback) -> String {
    let icon = if playback.is_playing() {
        "pause-fill"
    } else {
        "play-fill"
    };
    format!(
        r#"<i class="bi bi-{icon} me-1"></i>{}"#,
        audio_label(scope, playback)
    )
}

fn audio_button(scope: AudioScope) -> String {
    let class = match scope {
        AudioScope::Room => "audio-guide-btn",
        AudioScope::Floor => "audio-guide-floor-btn",
    };
    format!(
        r#"<div id="{id}" class="position-absolute {class}" data-action="toggle-audio" data-scope="{element}">{content}</div>"#,
        id = audio_button_id(scope),
        element = scope.element_id(),
        content = audio_button_content(scope, Playback::Idle),
    )
}

/// Room badge, mini-map and audio button drawn over a mounted scene.
pub fn overlays(state: &TourState, config: &ApiConfig) -> String {
    let (Some(floor), Some(room)) = (state.current_floor(), state.current_room()) else {
        return String::new();
    };
    let mut out = format!(
        r#"<div class="position-absolute room-badge"><i class="bi bi-geo-alt-fill me-1"></i>{}</div>"#,
        escape(&room.title)
    );

    if let Some(src) = floor.map_image.as_ref().and_then(|m| media_src(config, m)) {
        let marker = room
            .map_position
            .map(|p| {
                format!(
                    r#"<div class="mini-map-marker" style="left: {}%; top: {}%;"></div>"#,
                    p.x, p.y
                )
            })
            .unwrap_or_default();
        out.push_str(&format!(
            r#"<div class="mini-map"><div class="mini-map-content"><img src="{src}" class="img-fluid" alt="{alt}">{marker}</div></div>"#,
            alt = text::MINI_MAP_ALT,
        ));
    }

    if let Some(guide) = guide_for(floor, Some(room)) {
        out.push_str(&audio_button(guide.scope));
    }
    out
}

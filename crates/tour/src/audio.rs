//! Audio-guide selection and playback state.
//!
//! The browser owns the actual audio element; this module only decides which
//! track belongs to the current view and what the play button should show.

use crate::model::{AssetRef, Floor, Room};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AudioScope {
    Room,
    Floor,
}

impl AudioScope {
    /// DOM id of the single audio element allowed for this scope.
    pub fn element_id(self) -> &'static str {
        match self {
            AudioScope::Room => "room-audio",
            AudioScope::Floor => "floor-audio",
        }
    }

    pub fn from_element_id(id: &str) -> Option<Self> {
        [AudioScope::Room, AudioScope::Floor]
            .into_iter()
            .find(|scope| scope.element_id() == id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AudioGuide<'a> {
    pub scope: AudioScope,
    pub track: &'a AssetRef,
}

/// The room's own track wins; otherwise the floor's first track.
pub fn guide_for<'a>(floor: &'a Floor, room: Option<&'a Room>) -> Option<AudioGuide<'a>> {
    if let Some(track) = room.and_then(|r| r.audio.as_ref()) {
        return Some(AudioGuide {
            scope: AudioScope::Room,
            track,
        });
    }
    floor.audio_tracks.first().map(|track| AudioGuide {
        scope: AudioScope::Floor,
        track,
    })
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub enum Playback {
    #[default]
    Idle,
    /// `remaining_s` stays `None` until the track duration is known.
    Playing { remaining_s: Option<f64> },
}

impl Playback {
    pub fn is_playing(&self) -> bool {
        matches!(self, Playback::Playing { .. })
    }

    /// Play/pause button press. Returns `true` when playback should start.
    pub fn toggle(&mut self) -> bool {
        *self = match self {
            Playback::Idle => Playback::Playing { remaining_s: None },
            Playback::Playing { .. } => Playback::Idle,
        };
        self.is_playing()
    }

    /// Timer tick or metadata event. Non-finite values (unknown duration)
    /// keep the previous countdown.
    pub fn update(&mut self, duration_s: f64, current_s: f64) {
        if let Playback::Playing { remaining_s } = self {
            let left = duration_s - current_s;
            if left.is_finite() {
                *remaining_s = Some(left.max(0.0));
            }
        }
    }

    pub fn ended(&mut self) {
        *self = Playback::Idle;
    }
}

/// Formats seconds as `m:ss`.
pub fn format_remaining(seconds: f64) -> String {
    let total = if seconds.is_finite() {
        seconds.max(0.0).floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::{AudioScope, Playback, format_remaining, guide_for};
    use crate::model::AssetRef;
    use crate::model::fixtures::{floor, room};

    #[test]
    fn room_track_takes_precedence() {
        let mut r = room(1, "r");
        r.audio = Some(AssetRef::new("/uploads/room.mp3"));
        let mut f = floor(1, "f", vec![]);
        f.audio_tracks = vec![AssetRef::new("/uploads/floor.mp3")];

        let guide = guide_for(&f, Some(&r)).expect("guide");
        assert_eq!(guide.scope, AudioScope::Room);
        assert_eq!(guide.track.as_str(), "/uploads/room.mp3");

        r.audio = None;
        let guide = guide_for(&f, Some(&r)).expect("guide");
        assert_eq!(guide.scope, AudioScope::Floor);
        assert_eq!(guide.track.as_str(), "/uploads/floor.mp3");
    }

    #[test]
    fn no_tracks_means_no_guide() {
        let f = floor(1, "f", vec![]);
        assert!(guide_for(&f, Some(&room(1, "r"))).is_none());
        assert!(guide_for(&f, None).is_none());
    }

    #[test]
    fn playback_cycle() {
        let mut p = Playback::default();
        assert!(p.toggle());
        assert_eq!(p, Playback::Playing { remaining_s: None });

        p.update(f64::NAN, 0.0);
        assert_eq!(p, Playback::Playing { remaining_s: None });

        p.update(125.0, 10.5);
        assert_eq!(p, Playback::Playing { remaining_s: Some(114.5) });

        assert!(!p.toggle());
        p.update(125.0, 20.0);
        assert_eq!(p, Playback::Idle);

        p.toggle();
        p.ended();
        assert!(!p.is_playing());
    }

    #[test]
    fn remaining_time_format() {
        assert_eq!(format_remaining(0.0), "0:00");
        assert_eq!(format_remaining(9.9), "0:09");
        assert_eq!(format_remaining(65.0), "1:05");
        assert_eq!(format_remaining(754.2), "12:34");
        assert_eq!(format_remaining(f64::INFINITY), "0:00");
    }

    #[test]
    fn scopes_have_distinct_elements() {
        assert_ne!(AudioScope::Room.element_id(), AudioScope::Floor.element_id());
        assert_eq!(AudioScope::from_element_id("floor-audio"), Some(AudioScope::Floor));
        assert_eq!(AudioScope::from_element_id("video"), None);
    }
}

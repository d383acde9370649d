//! Wire format of the `users/{id}` payload and its conversion into the typed
//! tour tree.
//!
//! The API omits relations that were not populated and sends `null` for empty
//! media fields, so every nested field here is optional. Conversion applies
//! all defaults in one place.

use foundation::math::{Spherical, Vec2};
use serde::Deserialize;
use tour::hotspot::GO_TO_PREFIX;
use tour::lookup::find_room;
use tour::{
    AssetRef, Floor, FloorId, Hotspot, HotspotTarget, OrgId, Organization, Room, RoomId, Tour,
    UserId,
};

pub const DEFAULT_HOTSPOT_TITLE: &str = "Hotspot";

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(v) => vec![v],
            OneOrMany::Many(v) => v,
        }
    }
}

/// Scalar fields of hand-edited content. Numbers may arrive as strings and
/// anything else lands in `Other`, so one bad value never fails the payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Lenient {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl Lenient {
    pub fn as_f64(&self) -> Option<f64> {
        let v = match self {
            Lenient::Number(n) => *n,
            Lenient::Text(s) => s.trim().parse().ok()?,
            Lenient::Other(_) => return None,
        };
        v.is_finite().then_some(v)
    }

    /// Non-negative whole number, from a number or a numeric string.
    pub fn as_id(&self) -> Option<u64> {
        whole(self.as_f64()?)
    }

    /// Only real numbers count as indices; `"2"` does not.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Lenient::Number(n) if n.is_finite() => whole(*n).map(|v| v as usize),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Lenient::Text(s) => Some(s),
            _ => None,
        }
    }
}

fn whole(v: f64) -> Option<u64> {
    (v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64).then_some(v as u64)
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireMedia {
    #[serde(default)]
    pub url: Option<String>,
}

impl WireMedia {
    fn into_asset(self) -> Option<AssetRef> {
        self.url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .map(AssetRef)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireHotspot {
    #[serde(default)]
    pub yaw: Option<Lenient>,
    #[serde(default)]
    pub pitch: Option<Lenient>,
    #[serde(default)]
    pub title: Option<Lenient>,
    #[serde(default, rename = "targetRoomId")]
    pub target_room_id: Option<Lenient>,
    #[serde(default, rename = "targetRoomIndex")]
    pub target_room_index: Option<Lenient>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireRoom {
    pub id: u64,
    #[serde(default, rename = "Title")]
    pub title: Option<String>,
    #[serde(default, rename = "ImageRoom")]
    pub image: Option<WireMedia>,
    #[serde(default, rename = "pointX")]
    pub point_x: Option<Lenient>,
    #[serde(default, rename = "pointY")]
    pub point_y: Option<Lenient>,
    #[serde(default, rename = "audioFile")]
    pub audio: Option<OneOrMany<WireMedia>>,
    #[serde(default)]
    pub hotspots: Option<Vec<WireHotspot>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireFloor {
    pub id: u64,
    #[serde(default, rename = "Title")]
    pub title: Option<String>,
    #[serde(default, rename = "ImageMap")]
    pub map_image: Option<WireMedia>,
    #[serde(default, rename = "audioFile")]
    pub audio: Option<OneOrMany<WireMedia>>,
    #[serde(default, rename = "Room")]
    pub rooms: Option<Vec<WireRoom>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireOrganization {
    pub id: u64,
    #[serde(default, rename = "Title")]
    pub title: Option<String>,
    #[serde(default, rename = "Floor")]
    pub floors: Option<Vec<WireFloor>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireUser {
    pub id: u64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, rename = "Org")]
    pub organizations: Option<Vec<WireOrganization>>,
}

impl WireUser {
    pub fn into_tour(self) -> Tour {
        let organizations = self
            .organizations
            .unwrap_or_default()
            .into_iter()
            .map(WireOrganization::into_organization)
            .collect();
        let tour = Tour::new(UserId(self.id), organizations);
        match self.username.filter(|u| !u.trim().is_empty()) {
            Some(name) => tour.with_username(name),
            None => tour,
        }
    }
}

impl WireOrganization {
    pub fn into_organization(self) -> Organization {
        let mut org = Organization::new(OrgId(self.id), self.title.unwrap_or_default());
        org.floors = self
            .floors
            .unwrap_or_default()
            .into_iter()
            .map(WireFloor::into_floor)
            .collect();
        fill_hotspot_titles(&mut org);
        org
    }
}

impl WireFloor {
    pub fn into_floor(self) -> Floor {
        let mut floor = Floor::new(FloorId(self.id), self.title.unwrap_or_default());
        floor.map_image = self.map_image.and_then(WireMedia::into_asset);
        floor.audio_tracks = self
            .audio
            .map(OneOrMany::into_vec)
            .unwrap_or_default()
            .into_iter()
            .filter_map(WireMedia::into_asset)
            .collect();
        floor.rooms = self
            .rooms
            .unwrap_or_default()
            .into_iter()
            .map(WireRoom::into_room)
            .collect();
        floor
    }
}

impl WireRoom {
    pub fn into_room(self) -> Room {
        let mut room = Room::new(RoomId(self.id), self.title.unwrap_or_default());
        room.panorama = self.image.and_then(WireMedia::into_asset);
        room.map_position = match (
            self.point_x.as_ref().and_then(Lenient::as_f64),
            self.point_y.as_ref().and_then(Lenient::as_f64),
        ) {
            (Some(x), Some(y)) => Some(Vec2::new(x, y).clamp(0.0, 100.0)),
            _ => None,
        };
        room.audio = self
            .audio
            .map(OneOrMany::into_vec)
            .unwrap_or_default()
            .into_iter()
            .find_map(WireMedia::into_asset);
        room.hotspots = self
            .hotspots
            .unwrap_or_default()
            .into_iter()
            .map(WireHotspot::into_hotspot)
            .collect();
        room
    }
}

impl WireHotspot {
    /// Identifier targets win over index targets. The title may be empty
    /// here; [`fill_hotspot_titles`] completes it once the tree exists.
    pub fn into_hotspot(self) -> Hotspot {
        let angle = |v: Option<Lenient>| v.as_ref().and_then(Lenient::as_f64).unwrap_or(0.0);
        let target = match (
            self.target_room_id.as_ref().and_then(Lenient::as_id),
            self.target_room_index.as_ref().and_then(Lenient::as_index),
        ) {
            (Some(id), _) => HotspotTarget::Room(RoomId(id)),
            (None, Some(index)) => HotspotTarget::Index(index),
            (None, None) => HotspotTarget::None,
        };
        Hotspot {
            direction: Spherical::new(angle(self.yaw), angle(self.pitch)),
            title: self
                .title
                .as_ref()
                .and_then(Lenient::as_text)
                .map(|t| t.trim().to_string())
                .unwrap_or_default(),
            target,
        }
    }
}

/// Names untitled hotspots after the room they lead to, or
/// [`DEFAULT_HOTSPOT_TITLE`] when the target does not resolve.
fn fill_hotspot_titles(org: &mut Organization) {
    let mut titles = Vec::new();
    for (f, floor) in org.floors.iter().enumerate() {
        for (r, room) in floor.rooms.iter().enumerate() {
            for (h, hotspot) in room.hotspots.iter().enumerate() {
                if !hotspot.title.is_empty() {
                    continue;
                }
                let target_title = match hotspot.target {
                    HotspotTarget::Room(id) => find_room(org, id)
                        .map(|loc| org.floors[loc.floor].rooms[loc.room].title.as_str()),
                    HotspotTarget::Index(i) => floor.rooms.get(i).map(|t| t.title.as_str()),
                    HotspotTarget::None => None,
                };
                let title = match target_title {
                    Some(t) if !t.is_empty() => format!("{GO_TO_PREFIX} {t}"),
                    _ => DEFAULT_HOTSPOT_TITLE.to_string(),
                };
                titles.push((f, r, h, title));
            }
        }
    }
    for (f, r, h, title) in titles {
        org.floors[f].rooms[r].hotspots[h].title = title;
    }
}

//! Typed tour tree.
//!
//! The tree is built once from the content API response and is immutable
//! afterwards. Absent collections are empty and absent optional references
//! are `None`, so consumers never re-check the raw payload.

use foundation::math::{Spherical, Vec2};
use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(UserId);
entity_id!(OrgId);
entity_id!(FloorId);
entity_id!(
    /// Room identifier, unique within an organization.
    RoomId
);

/// Media reference relative to the media host (e.g. `/uploads/hall.jpg`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRef(pub String);

impl AssetRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HotspotTarget {
    /// Room identifier resolved against the whole organization.
    Room(RoomId),
    /// Room index within the floor the hotspot is shown on.
    Index(usize),
    /// Decorative marker; clicking it does nothing.
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hotspot {
    pub direction: Spherical,
    pub title: String,
    pub target: HotspotTarget,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: RoomId,
    pub title: String,
    pub panorama: Option<AssetRef>,
    /// Position on the floor map in percent, both axes within `[0, 100]`.
    pub map_position: Option<Vec2>,
    pub audio: Option<AssetRef>,
    pub hotspots: Vec<Hotspot>,
}

impl Room {
    pub fn new(id: RoomId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            panorama: None,
            map_position: None,
            audio: None,
            hotspots: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Floor {
    pub id: FloorId,
    pub title: String,
    pub map_image: Option<AssetRef>,
    pub audio_tracks: Vec<AssetRef>,
    pub rooms: Vec<Room>,
}

impl Floor {
    pub fn new(id: FloorId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            map_image: None,
            audio_tracks: Vec::new(),
            rooms: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Organization {
    pub id: OrgId,
    pub title: String,
    pub floors: Vec<Floor>,
}

impl Organization {
    pub fn new(id: OrgId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            floors: Vec::new(),
        }
    }
}

/// Everything one user can tour.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    pub user_id: UserId,
    pub username: Option<String>,
    pub organizations: Vec<Organization>,
}

impl Tour {
    pub fn new(user_id: UserId, organizations: Vec<Organization>) -> Self {
        Self {
            user_id,
            username: None,
            organizations,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.organizations.is_empty()
    }

    pub fn organization_index(&self, id: OrgId) -> Option<usize> {
        self.organizations.iter().position(|org| org.id == id)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn room(id: u64, title: &str) -> Room {
        Room::new(RoomId(id), title)
    }

    pub fn floor(id: u64, title: &str, rooms: Vec<Room>) -> Floor {
        let mut f = Floor::new(FloorId(id), title);
        f.rooms = rooms;
        f
    }

    pub fn org(id: u64, title: &str, floors: Vec<Floor>) -> Organization {
        let mut o = Organization::new(OrgId(id), title);
        o.floors = floors;
        o
    }

    /// One organization, floor 0 = [R1, R2], floor 1 = [R3].
    pub fn two_floor_tour() -> Tour {
        Tour::new(
            UserId(7),
            vec![org(
                10,
                "Main building",
                vec![
                    floor(100, "Ground", vec![room(1, "R1"), room(2, "R2")]),
                    floor(101, "First", vec![room(3, "R3")]),
                ],
            )],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::two_floor_tour;
    use super::{OrgId, RoomId};

    #[test]
    fn ids_display_as_plain_numbers() {
        assert_eq!(RoomId(42).to_string(), "42");
    }

    #[test]
    fn organization_index_by_id() {
        let tour = two_floor_tour();
        assert_eq!(tour.organization_index(OrgId(10)), Some(0));
        assert_eq!(tour.organization_index(OrgId(999)), None);
        assert!(!tour.is_empty());
    }
}

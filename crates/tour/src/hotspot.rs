//! Hotspot projection and click resolution.
//!
//! Markers sit on a sphere of radius [`SPHERE_RADIUS`] around the camera,
//! which the panorama engine places at the origin.

use std::borrow::Cow;

use foundation::math::{Spherical, Vec3, spherical_to_cartesian, yaw_towards};
use tracing::debug;

use crate::lookup::{RoomLocation, find_room};
use crate::model::{Floor, Hotspot, HotspotTarget, Organization};
use crate::navigation::{Selection, TourState};

pub const SPHERE_RADIUS: f64 = 5.0;

/// Title prefix for hotspots generated between rooms of one floor.
pub const GO_TO_PREFIX: &str = "Перейти в";

/// A hotspot ready to be placed in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker<'a> {
    /// Index into the room's effective hotspot list; clicks report it back.
    pub index: usize,
    pub position: Vec3,
    pub hotspot: &'a Hotspot,
}

pub fn project(hotspot: &Hotspot) -> Vec3 {
    spherical_to_cartesian(hotspot.direction, SPHERE_RADIUS)
}

pub fn markers(hotspots: &[Hotspot]) -> Vec<Marker<'_>> {
    hotspots
        .iter()
        .enumerate()
        .map(|(index, hotspot)| Marker {
            index,
            position: project(hotspot),
            hotspot,
        })
        .collect()
}

/// Per-frame orientation of a marker: rotation about the vertical axis only,
/// so the marker faces `camera` and never turns upside down.
pub fn billboard_yaw(marker: Vec3, camera: Vec3) -> f64 {
    yaw_towards(marker, camera)
}

/// Hotspots linking the room at `current` to every other room on `floor`.
///
/// Used for rooms without authored hotspots: room `r` is placed at
/// `yaw = 45 + 90 * r` on the horizon.
pub fn neighbor_hotspots(floor: &Floor, current: usize) -> Vec<Hotspot> {
    floor
        .rooms
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != current)
        .map(|(index, room)| Hotspot {
            direction: Spherical::new(45.0 + index as f64 * 90.0, 0.0),
            title: format!("{GO_TO_PREFIX} {}", room.title),
            target: HotspotTarget::Room(room.id),
        })
        .collect()
}

/// Resolves a hotspot target to the room it leads to.
///
/// Identifier targets are looked up across the whole organization; index
/// targets address the floor in `current`. Unknown identifiers and
/// out-of-range indices resolve to `None`.
pub fn resolve_target(
    org: &Organization,
    current: Selection,
    target: &HotspotTarget,
) -> Option<RoomLocation> {
    match target {
        HotspotTarget::Room(id) => find_room(org, *id),
        HotspotTarget::Index(index) => {
            let floor = org.floors.get(current.floor)?;
            (*index < floor.rooms.len()).then(|| RoomLocation::new(current.floor, *index))
        }
        HotspotTarget::None => None,
    }
}

impl TourState {
    /// Hotspots shown in the current room: the authored ones, or links to
    /// the other rooms of the floor when none were authored.
    pub fn hotspots(&self) -> Cow<'_, [Hotspot]> {
        let Some(floor) = self.current_floor() else {
            return Cow::Borrowed(&[]);
        };
        let room_index = self.selection().room;
        match floor.rooms.get(room_index) {
            Some(room) if !room.hotspots.is_empty() => Cow::Borrowed(&room.hotspots),
            Some(_) => Cow::Owned(neighbor_hotspots(floor, room_index)),
            None => Cow::Borrowed(&[]),
        }
    }

    /// Follows the hotspot at `index` of [`TourState::hotspots`].
    ///
    /// Returns whether the selection changed. Dead hotspots are a silent no-op.
    pub fn activate_hotspot(&mut self, index: usize) -> bool {
        let target = match self.hotspots().get(index) {
            Some(hotspot) => hotspot.target.clone(),
            None => return false,
        };
        self.follow(&target)
    }

    pub fn follow(&mut self, target: &HotspotTarget) -> bool {
        let Some(org) = self.current_organization() else {
            return false;
        };
        match resolve_target(org, self.selection(), target) {
            Some(location) => {
                let before = self.selection();
                self.go_to(location);
                self.selection() != before
            }
            None => {
                debug!("hotspot target {target:?} did not resolve");
                false
            }
        }
    }
}

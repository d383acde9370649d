use crate::model::{Organization, RoomId};

/// Position of a room inside its organization.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RoomLocation {
    pub floor: usize,
    pub room: usize,
}

impl RoomLocation {
    pub fn new(floor: usize, room: usize) -> Self {
        Self { floor, room }
    }
}

/// Finds the floor/room indices of `id` within `org`.
///
/// Ordering contract:
/// - Floors are scanned in order, then rooms in order within each floor.
/// - The first match wins, so duplicated identifiers resolve to the earliest room.
pub fn find_room(org: &Organization, id: RoomId) -> Option<RoomLocation> {
    org.floors.iter().enumerate().find_map(|(floor_index, floor)| {
        floor
            .rooms
            .iter()
            .position(|room| room.id == id)
            .map(|room_index| RoomLocation::new(floor_index, room_index))
    })
}

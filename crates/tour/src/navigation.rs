use tracing::debug;

use crate::lookup::RoomLocation;
use crate::model::{Floor, OrgId, Organization, Room, Tour};

/// The (organization, floor, room) triple driving the current render.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub org: usize,
    pub floor: usize,
    pub room: usize,
}

impl Selection {
    pub fn new(org: usize, floor: usize, room: usize) -> Self {
        Self { org, floor, room }
    }
}

/// Immutable tour tree plus the mutable selection over it.
///
/// Every selector clamps into the valid range of the level it changes, so an
/// out-of-range index from the UI never panics. Ancestor changes reset the
/// levels below them to 0.
#[derive(Debug, Clone, PartialEq)]
pub struct TourState {
    tour: Tour,
    selection: Selection,
}

impl TourState {
    pub fn new(tour: Tour) -> Self {
        Self {
            tour,
            selection: Selection::default(),
        }
    }

    pub fn tour(&self) -> &Tour {
        &self.tour
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn select_organization(&mut self, index: usize) {
        self.selection = Selection::new(clamp_index(index, self.tour.organizations.len()), 0, 0);
    }

    pub fn select_floor(&mut self, index: usize) {
        let floors = self.current_organization().map_or(0, |org| org.floors.len());
        self.selection.floor = clamp_index(index, floors);
        self.selection.room = 0;
    }

    pub fn select_room(&mut self, index: usize) {
        let rooms = self.current_floor().map_or(0, |floor| floor.rooms.len());
        self.selection.room = clamp_index(index, rooms);
    }

    /// Selects the organization with identifier `id`.
    ///
    /// Unknown identifiers fall back to the first organization; returns
    /// whether the identifier matched.
    pub fn focus_organization_id(&mut self, id: OrgId) -> bool {
        match self.tour.organization_index(id) {
            Some(index) => {
                self.select_organization(index);
                true
            }
            None => {
                debug!("organization {id} not found, using the first one");
                self.select_organization(0);
                false
            }
        }
    }

    /// Moves to a resolved room: floor first, then room.
    pub fn go_to(&mut self, location: RoomLocation) {
        self.select_floor(location.floor);
        self.select_room(location.room);
    }

    pub fn current_organization(&self) -> Option<&Organization> {
        self.tour.organizations.get(self.selection.org)
    }

    pub fn current_floor(&self) -> Option<&Floor> {
        self.current_organization()?
            .floors
            .get(self.selection.floor)
    }

    /// The room under the current selection, or `None` when the floor has
    /// no rooms (or there is no floor at all).
    pub fn current_room(&self) -> Option<&Room> {
        self.current_floor()?.rooms.get(self.selection.room)
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

//! Public view: full-screen panorama with a collapsible sidebar.

use content_api::ApiConfig;
use tour::TourState;

use crate::html::{card, escape};
use crate::panorama::{panorama_slot, panorama_source};
use crate::text;
use crate::tour_page::{floor_buttons, room_buttons};

/// UI state of the public page that lives outside the navigation triple.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PublicChrome {
    /// A credential is stored, so offer a way back to the signed-in app.
    pub signed_in: bool,
    pub sidebar_hidden: bool,
}

pub fn error_view(message: &str) -> String {
    format!(
        r#"<div class="container main-content py-5 text-center">
    <div class="main-card mx-auto error-card">
        <div class="main-card-header"><h5 class="mb-0">{title}</h5></div>
        <div class="main-card-body text-center">
            <i class="bi bi-exclamation-triangle-fill text-danger display-4 mb-3"></i>
            <p class="mb-4">{message}</p>
            <button type="button" class="main-btn" data-action="reload"><i class="bi bi-arrow-clockwise me-2"></i>{reload}</button>
        </div>
    </div>
</div>"#,
        title = text::ERROR_TITLE,
        message = escape(message),
        reload = text::RELOAD,
    )
}

fn location_card(state: &TourState) -> String {
    let Some(floor) = state.current_floor() else {
        return String::new();
    };
    if floor.rooms.is_empty() {
        return String::new();
    }
    let room = state
        .current_room()
        .map(|r| escape(&r.title))
        .unwrap_or_else(|| text::ROOM_NOT_SELECTED.to_string());
    format!(
        r#"<div class="main-card"><div class="main-card-body"><div class="d-flex align-items-center"><i class="bi bi-geo-alt-fill me-2"></i><div><div><strong>{}:</strong> {}</div><div><strong>{}:</strong> {room}</div></div></div></div></div>"#,
        text::FLOOR,
        escape(&floor.title),
        text::ROOM,
    )
}

pub fn sidebar_toggle_icon(hidden: bool) -> &'static str {
    if hidden { "chevron-right" } else { "chevron-left" }
}

/// The public page for a loaded tour. Empty tours get [`error_view`].
pub fn public_view(state: &TourState, chrome: PublicChrome, config: &ApiConfig) -> String {
    let Some(org) = state.current_organization() else {
        return error_view(text::PUBLIC_NO_ORGANIZATIONS);
    };
    let home = if chrome.signed_in {
        format!(
            r#"<a href="index.html" class="main-btn main-btn-outline w-100 mb-4"><i class="bi bi-house-door me-2"></i>{}</a>"#,
            text::HOME
        )
    } else {
        String::new()
    };
    let hidden = if chrome.sidebar_hidden {
        " sidebar-hidden"
    } else {
        ""
    };

    format!(
        r#"<div class="container-fluid p-0{hidden}">
    <div id="public-panorama" class="public-panorama-container">{panorama}</div>
    <div class="position-fixed top-0 start-0 h-100 sidebar-panel p-3{hidden}">
        <h4 class="org-title mb-4 text-center"><i class="bi bi-building me-2"></i>{org_title}</h4>
        {home}
        {floors}
        {rooms}
        {location}
    </div>
    <button id="toggle-sidebar" type="button" class="main-btn position-fixed{hidden}" data-action="toggle-sidebar"><i class="bi bi-{icon}"></i></button>
</div>"#,
        panorama = panorama_slot(&panorama_source(state, config)),
        org_title = escape(&org.title),
        floors = card("layers", text::FLOORS, &floor_buttons(state, "public-floor-btn")),
        rooms = card("door-open", text::ROOMS, &room_buttons(state, "public-room-btn")),
        location = location_card(state),
        icon = sidebar_toggle_icon(chrome.sidebar_hidden),
    )
}

#[cfg(test)]
mod tests {
    use super::{PublicChrome, error_view, public_view};
    use crate::text;
    use content_api::ApiConfig;
    use tour::{Floor, FloorId, OrgId, Organization, Room, RoomId, Tour, TourState, UserId};

    fn state() -> TourState {
        let mut floor = Floor::new(FloorId(1), "Ground");
        floor.rooms = vec![Room::new(RoomId(1), "Hall"), Room::new(RoomId(2), "Lab")];
        let mut org = Organization::new(OrgId(12), "Museum");
        org.floors = vec![floor];
        TourState::new(Tour::new(UserId(3), vec![org]))
    }

    #[test]
    fn home_link_only_when_signed_in() {
        let cfg = ApiConfig::default();
        let anon = public_view(&state(), PublicChrome::default(), &cfg);
        assert!(!anon.contains("index.html"));

        let chrome = PublicChrome {
            signed_in: true,
            sidebar_hidden: false,
        };
        let signed = public_view(&state(), chrome, &cfg);
        assert!(signed.contains(r#"href="index.html""#));
        assert!(signed.contains(text::HOME));
    }

    #[test]
    fn sidebar_state_is_reflected() {
        let cfg = ApiConfig::default();
        let shown = public_view(&state(), PublicChrome::default(), &cfg);
        assert!(shown.contains("chevron-left"));
        assert!(!shown.contains("sidebar-hidden"));

        let chrome = PublicChrome {
            signed_in: false,
            sidebar_hidden: true,
        };
        let hidden = public_view(&state(), chrome, &cfg);
        assert!(hidden.contains("sidebar-panel p-3 sidebar-hidden"));
        assert!(hidden.contains("chevron-right"));
    }

    #[test]
    fn location_card_names_floor_and_room() {
        let mut s = state();
        s.select_room(1);
        let html = public_view(&s, PublicChrome::default(), &ApiConfig::default());
        assert!(html.contains("<strong>Этаж:</strong> Ground"));
        assert!(html.contains("<strong>Комната:</strong> Lab"));
        assert!(html.contains(r#"public-room-btn" data-action="select-room" data-index="1""#));
    }

    #[test]
    fn empty_tour_is_an_error_screen() {
        let s = TourState::new(Tour::new(UserId(3), vec![]));
        let html = public_view(&s, PublicChrome::default(), &ApiConfig::default());
        assert!(html.contains(text::PUBLIC_NO_ORGANIZATIONS));
        assert!(html.contains(r#"data-action="reload""#));
    }

    #[test]
    fn error_message_is_escaped() {
        assert!(error_view("<x>").contains("&lt;x&gt;"));
    }
}

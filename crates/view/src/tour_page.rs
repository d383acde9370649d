//! Authenticated layout: organization picker, floors, rooms, floor map and
//! the panorama area.

use content_api::ApiConfig;
use tour::share::PublicViewParams;
use tour::{Floor, TourState};

use crate::html::{button_class, escape, media_src};
use crate::panorama::{panorama_slot, panorama_source};
use crate::text;

/// Page-level inputs that are not part of the navigation state.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub config: &'a ApiConfig,
    /// Absolute public link for the current organization, if one could be
    /// built from the page URL.
    pub public_link: Option<&'a str>,
}

pub fn no_organizations_view() -> String {
    format!(
        r#"<div class="container mt-5"><div class="alert alert-info" role="alert"><h4 class="alert-heading">{}</h4><p>{}</p></div></div>"#,
        text::NO_ORGANIZATIONS_TITLE,
        text::NO_ORGANIZATIONS
    )
}

fn organization_select(state: &TourState) -> String {
    let selected = state.selection().org;
    let options: String = state
        .tour()
        .organizations
        .iter()
        .enumerate()
        .map(|(i, org)| {
            let sel = if i == selected { " selected" } else { "" };
            format!(r#"<option value="{i}"{sel}>{}</option>"#, escape(&org.title))
        })
        .collect();
    format!(r#"<select id="org-select" class="main-select mb-3" data-action="select-org">{options}</select>"#)
}

fn public_link_group(state: &TourState, ctx: &PageContext<'_>) -> String {
    let Some(org) = state.current_organization() else {
        return String::new();
    };
    let relative = escape(&PublicViewParams::new(state.tour().user_id, Some(org.id)).relative_link());
    let value = escape(ctx.public_link.unwrap_or(""));
    format!(
        r#"<div class="main-input-group mb-3">
    <input type="text" class="main-input" value="{value}" readonly id="public-link-input">
    <div class="main-input-actions">
        <a href="{relative}" class="main-btn" target="_blank" title="{open}"><i class="bi bi-eye"></i></a>
        <button class="main-btn share-btn" type="button" data-action="share" data-org-id="{org_id}" title="{share}"><i class="bi bi-share"></i></button>
        <button class="main-btn copy-link-input-btn" type="button" data-action="copy-link" title="{copy}"><i class="bi bi-clipboard"></i></button>
    </div>
</div>"#,
        org_id = org.id,
        open = text::OPEN_PUBLIC_VIEW,
        share = text::SHARE,
        copy = text::COPY_LINK,
    )
}

/// Floor buttons, shared with the public sidebar (`button_class` differs).
pub(crate) fn floor_buttons(state: &TourState, extra_class: &str) -> String {
    let Some(org) = state.current_organization() else {
        return crate::html::muted(text::NO_FLOORS);
    };
    if org.floors.is_empty() {
        return crate::html::muted(text::NO_FLOORS);
    }
    let current = state.selection().floor;
    let buttons: String = org
        .floors
        .iter()
        .enumerate()
        .map(|(i, floor)| {
            format!(
                r#"<button type="button" class="{} {extra_class}" data-action="select-floor" data-index="{i}"><i class="bi bi-stack me-1"></i> {}</button>"#,
                button_class(i == current),
                escape(&floor.title)
            )
        })
        .collect();
    format!(r#"<div class="d-flex flex-wrap gap-2">{buttons}</div>"#)
}

pub(crate) fn room_buttons(state: &TourState, extra_class: &str) -> String {
    let rooms = state.current_floor().map(|f| f.rooms.as_slice()).unwrap_or(&[]);
    if rooms.is_empty() {
        return crate::html::muted(text::NO_ROOMS);
    }
    let current = state.selection().room;
    let buttons: String = rooms
        .iter()
        .enumerate()
        .map(|(i, room)| {
            format!(
                r#"<button type="button" class="{} {extra_class}" data-action="select-room" data-index="{i}"><i class="bi bi-door-closed me-2"></i> {}</button>"#,
                button_class(i == current),
                escape(&room.title)
            )
        })
        .collect();
    format!(r#"<div class="d-flex flex-wrap gap-2">{buttons}</div>"#)
}

/// Floor plan with a clickable marker per positioned room.
fn floor_map(floor: Option<&Floor>, current_room: usize, config: &ApiConfig) -> String {
    let Some((floor, src)) =
        floor.and_then(|f| f.map_image.as_ref().and_then(|m| media_src(config, m)).map(|s| (f, s)))
    else {
        return format!("<p>{}</p>", text::NO_FLOOR_MAP);
    };
    let markers: String = floor
        .rooms
        .iter()
        .enumerate()
        .filter_map(|(i, room)| room.map_position.map(|p| (i, room, p)))
        .map(|(i, room, p)| {
            let active = if i == current_room { " active" } else { "" };
            format!(
                r#"<button type="button" class="position-absolute room-map-marker{active}" style="left: {}%; top: {}%;" data-action="select-room" data-index="{i}">{}</button>"#,
                p.x,
                p.y,
                escape(&room.title)
            )
        })
        .collect();
    format!(
        r#"<div class="position-relative"><img src="{src}" class="img-fluid" alt="{}">{markers}</div>"#,
        text::FLOOR_MAP_ALT
    )
}

/// The whole authenticated screen for a non-empty tour.
pub fn tour_view(state: &TourState, ctx: &PageContext<'_>) -> String {
    if state.tour().is_empty() {
        return no_organizations_view();
    }
    let username = escape(state.tour().username.as_deref().unwrap_or_default());
    let public_href = state
        .current_organization()
        .map(|org| {
            escape(&PublicViewParams::new(state.tour().user_id, Some(org.id)).relative_link())
        })
        .unwrap_or_default();

    format!(
        r#"<div class="main-bg"></div>
<div class="container-fluid main-content mt-3 mb-5">
    <div class="d-flex justify-content-between align-items-center mb-4">
        <h3 class="main-title"><i class="bi bi-person-circle"></i> {greeting}</h3>
        <div>
            <a href="{public_href}" class="main-btn me-2" target="_blank"><i class="bi bi-eye me-1"></i> {public_view}</a>
            <button id="logout-button" type="button" class="main-btn main-btn-outline" data-action="logout"><i class="bi bi-box-arrow-right me-1"></i> {logout}</button>
        </div>
    </div>
    <div class="row">
        <div class="col-md-3">
            <div class="main-card mb-3">
                <div class="main-card-header"><h5 class="mb-0"><i class="bi bi-building me-2"></i>{organization}</h5></div>
                <div class="main-card-body">
                    {org_select}
                    {link_group}
                    <h5 class="mt-4 mb-3"><i class="bi bi-layers me-2"></i>{floor}</h5>
                    <div id="floor-buttons">{floors}</div>
                    <h5 class="mt-4 mb-3"><i class="bi bi-door-open me-2"></i>{rooms_title}</h5>
                    <div id="room-list">{rooms}</div>
                </div>
            </div>
        </div>
        <div class="col-md-9">
            <div class="main-card mb-3">
                <div class="main-card-header"><h5 class="mb-0"><i class="bi bi-map me-2"></i>{floor_map_title}</h5></div>
                <div class="main-card-body overflow-auto floor-map-body">{floor_map}</div>
            </div>
            <div class="main-card mb-5">
                <div class="main-card-header"><h5 class="mb-0"><i class="bi bi-camera-video me-2"></i>{panorama_title}</h5></div>
                <div class="main-card-body p-0 panorama-container">
                    <div id="panorama-container">{panorama}</div>
                </div>
            </div>
        </div>
    </div>
</div>"#,
        greeting = text::greeting(&username),
        public_view = text::PUBLIC_VIEW,
        logout = text::LOGOUT,
        organization = text::ORGANIZATION,
        org_select = organization_select(state),
        link_group = public_link_group(state, ctx),
        floor = text::FLOOR,
        floors = floor_buttons(state, "floor-btn"),
        rooms_title = text::ROOMS,
        rooms = room_buttons(state, "room-btn"),
        floor_map_title = text::FLOOR_MAP,
        floor_map = floor_map(state.current_floor(), state.selection().room, ctx.config),
        panorama_title = text::PANORAMA,
        panorama = panorama_slot(&panorama_source(state, ctx.config)),
    )
}

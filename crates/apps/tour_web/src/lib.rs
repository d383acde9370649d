use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};

use content_api::{ApiConfig, BrowserTransport, ContentClient};
use session::{BootAction, BrowserCredentialStore, CredentialStore, SessionGate, SessionView};
use tour::TourState;
use tour::audio::AudioScope;
use tour::share::PublicViewParams;
use url::Url;
use view::panorama::{AUTH_LOOK_CONTROLS, PUBLIC_LOOK_CONTROLS, PanoramaSource, panorama_source};
use view::public::{PublicChrome, error_view, public_view};
use view::tour_page::{PageContext, tour_view};
use view::{login, text};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod audio;
mod config;
mod dom;
mod events;
mod js;
mod panorama;

use audio::AudioPlayer;
use panorama::PendingImage;

// Guard against double initialization when the module is re-imported.
static STARTED: AtomicBool = AtomicBool::new(false);

#[wasm_bindgen(start)]
pub fn start() {
    if STARTED.swap(true, Ordering::SeqCst) {
        return;
    }
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    js::register_face_camera();
}

/// Which page is running and what it currently shows.
#[derive(Default)]
enum Mode {
    #[default]
    Idle,
    Authenticated {
        gate: SessionGate<BrowserCredentialStore>,
        login_pending: bool,
    },
    Public {
        tour: Option<TourState>,
        chrome: PublicChrome,
        error: Option<String>,
    },
}

#[derive(Default)]
struct AppState {
    root_id: String,
    config: ApiConfig,
    page_url: Option<Url>,
    mode: Mode,
    /// Bumped on every render; async image callbacks from older renders
    /// compare against it and bail out.
    render_generation: u64,
    players: Vec<AudioPlayer>,
    pending_image: Option<PendingImage>,
}

/// Markup for the root plus the panorama to preload, if any.
struct Page {
    html: String,
    panorama: Option<String>,
}

impl AppState {
    fn tour_state(&self) -> Option<&TourState> {
        match &self.mode {
            Mode::Authenticated { gate, .. } => gate.tour(),
            Mode::Public { tour, .. } => tour.as_ref(),
            Mode::Idle => None,
        }
    }

    fn tour_state_mut(&mut self) -> Option<&mut TourState> {
        match &mut self.mode {
            Mode::Authenticated { gate, .. } => gate.tour_mut(),
            Mode::Public { tour, .. } => tour.as_mut(),
            Mode::Idle => None,
        }
    }

    fn look_controls(&self) -> &'static str {
        match self.mode {
            Mode::Public { .. } => PUBLIC_LOOK_CONTROLS,
            _ => AUTH_LOOK_CONTROLS,
        }
    }

    fn ready_panorama(&self, state: &TourState) -> Option<String> {
        match panorama_source(state, &self.config) {
            PanoramaSource::Ready { url } => Some(url),
            _ => None,
        }
    }

    fn page(&self) -> Page {
        let mut panorama = None;
        let html = match &self.mode {
            Mode::Idle => String::new(),
            Mode::Authenticated {
                gate,
                login_pending,
            } => match gate.view() {
                SessionView::Login { error } => login::login_view(error.as_deref(), *login_pending),
                SessionView::Loading => login::loading_view(),
                SessionView::Failed { message } => error_view(message),
                SessionView::Tour(state) => {
                    let link = share_target(state, self.page_url.as_ref()).map(|(_, url)| url);
                    let ctx = PageContext {
                        config: &self.config,
                        public_link: link.as_deref(),
                    };
                    panorama = self.ready_panorama(state);
                    tour_view(state, &ctx)
                }
            },
            Mode::Public {
                tour,
                chrome,
                error,
            } => match (tour, error) {
                (_, Some(message)) => error_view(message),
                (None, None) => login::loading_view(),
                (Some(state), None) => {
                    panorama = self.ready_panorama(state);
                    public_view(state, *chrome, &self.config)
                }
            },
        };
        Page { html, panorama }
    }
}

thread_local! {
    static STATE: RefCell<AppState> = RefCell::new(AppState::default());
}

/// Runs `f` against the app state; yields `R::default()` once the
/// thread-local has been torn down.
fn with_state<F, R>(f: F) -> R
where
    F: FnOnce(&RefCell<AppState>) -> R,
    R: Default,
{
    STATE.try_with(f).unwrap_or_default()
}

/// Applies `f` to the live player for `scope`, if there is one.
fn with_player(scope: AudioScope, f: fn(&mut AudioPlayer)) {
    with_state(|cell| {
        let mut state = cell.borrow_mut();
        if let Some(player) = state.players.iter_mut().find(|p| p.scope() == scope) {
            f(player);
        }
    });
}

/// Title and absolute public link for the current organization.
fn share_target(state: &TourState, page_url: Option<&Url>) -> Option<(String, String)> {
    let org = state.current_organization()?;
    let params = PublicViewParams::new(state.tour().user_id, Some(org.id));
    let link = params.absolute_link(page_url?).ok()?;
    Some((text::share_title(&org.title), link.to_string()))
}

fn client() -> ContentClient<BrowserTransport> {
    let config = with_state(|cell| cell.borrow().config.clone());
    ContentClient::new(config, BrowserTransport::new())
}

fn init(root_id: &str, config: ApiConfig, mode: Mode) -> Result<(), JsValue> {
    let page_url = dom::page_href().and_then(|href| Url::parse(&href).ok());
    with_state(|cell| {
        let mut state = cell.borrow_mut();
        state.root_id = root_id.to_string();
        state.config = config;
        state.page_url = page_url;
        state.mode = mode;
    });
    events::install(root_id)
}

/// Entry point of the signed-in page.
#[wasm_bindgen]
pub fn boot_tour_app(root_id: &str) -> Result<(), JsValue> {
    let mut gate = SessionGate::new(BrowserCredentialStore::new());
    let action = gate.boot();
    init(
        root_id,
        config::read_config(),
        Mode::Authenticated {
            gate,
            login_pending: false,
        },
    )?;
    render();
    follow_up(action);
    Ok(())
}

/// Entry point of the public page; reads `userId`/`orgId` from the query.
#[wasm_bindgen]
pub fn boot_public_app(root_id: &str) -> Result<(), JsValue> {
    let config = config::read_config();
    let params = PublicViewParams::from_query(&dom::page_query(), config.public_user_fallback);
    let signed_in = BrowserCredentialStore::new().has_credential();
    init(
        root_id,
        config,
        Mode::Public {
            tour: None,
            chrome: PublicChrome {
                signed_in,
                sidebar_hidden: false,
            },
            error: None,
        },
    )?;
    render();
    spawn_local(load_public(params));
    Ok(())
}

fn follow_up(action: BootAction) {
    if let BootAction::FetchUser { token } = action {
        spawn_local(fetch_user(token));
    }
}

async fn fetch_user(token: String) {
    let result = client().current_user(&token).await;
    with_state(|cell| {
        if let Mode::Authenticated { gate, .. } = &mut cell.borrow_mut().mode {
            gate.user_loaded(result);
        }
    });
    render();
}

async fn load_public(params: PublicViewParams) {
    let result = client().public_user(params.user_id).await;
    with_state(|cell| {
        let mut state = cell.borrow_mut();
        let Mode::Public { tour, error, .. } = &mut state.mode else {
            return;
        };
        match result {
            Ok(loaded) => {
                let mut loaded = TourState::new(loaded);
                if let Some(org) = params.org_id {
                    loaded.focus_organization_id(org);
                }
                *tour = Some(loaded);
            }
            Err(err) => {
                tracing::error!(%err, user = %params.user_id, "public tour failed to load");
                *error = Some(text::PUBLIC_LOAD_FAILED.to_string());
            }
        }
    });
    render();
}

/// Submits the login form.
fn login(identifier: String, password: String) {
    let started = with_state(|cell| match &mut cell.borrow_mut().mode {
        Mode::Authenticated { login_pending, .. } if !*login_pending => {
            *login_pending = true;
            true
        }
        _ => false,
    });
    if !started {
        return;
    }
    render();
    spawn_local(async move {
        let result = client().login(&identifier, &password).await;
        let action = with_state(|cell| match &mut cell.borrow_mut().mode {
            Mode::Authenticated {
                gate,
                login_pending,
            } => {
                *login_pending = false;
                Some(gate.login_finished(result))
            }
            _ => None,
        });
        render();
        if let Some(action) = action {
            follow_up(action);
        }
    });
}

fn logout() {
    with_state(|cell| {
        if let Mode::Authenticated { gate, .. } = &mut cell.borrow_mut().mode {
            gate.logout();
        }
    });
    render();
}

/// Applies a navigation change and re-renders when it took effect.
fn navigate(f: impl FnOnce(&mut TourState) -> bool) {
    let changed = with_state(|cell| cell.borrow_mut().tour_state_mut().is_some_and(f));
    if changed {
        render();
    }
}

/// Rebuilds the root from state. Stops audio and abandons any image still
/// loading for the previous selection.
fn render() {
    with_state(|cell| {
        let mut state = cell.borrow_mut();
        state.players.clear();
        state.pending_image = None;
        state.render_generation += 1;
        let generation = state.render_generation;

        let page = state.page();
        if let Err(err) = dom::set_html(&state.root_id, &page.html) {
            dom::log_error("render", &err);
            return;
        }
        if let Some(url) = page.panorama {
            match panorama::preload(generation, &url) {
                Ok(pending) => state.pending_image = Some(pending),
                Err(err) => dom::log_error("panorama preload", &err),
            }
        }
    });
}

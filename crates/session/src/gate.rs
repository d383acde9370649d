//! Login vs. tour view, driven by credential presence and API outcomes.
//!
//! The gate never performs I/O itself: it tells the caller what to fetch
//! ([`BootAction`]) and is fed the results.

use content_api::ApiError;
use tour::{Tour, TourState};

use crate::store::CredentialStore;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionView {
    Login { error: Option<String> },
    /// Credential present, tour tree in flight.
    Loading,
    Tour(TourState),
    /// Fetch failed for a reason other than authentication.
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootAction {
    ShowLogin,
    FetchUser { token: String },
}

#[derive(Debug)]
pub struct SessionGate<S> {
    store: S,
    view: SessionView,
}

impl<S: CredentialStore> SessionGate<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            view: SessionView::Login { error: None },
        }
    }

    pub fn view(&self) -> &SessionView {
        &self.view
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn tour(&self) -> Option<&TourState> {
        match &self.view {
            SessionView::Tour(state) => Some(state),
            _ => None,
        }
    }

    pub fn tour_mut(&mut self) -> Option<&mut TourState> {
        match &mut self.view {
            SessionView::Tour(state) => Some(state),
            _ => None,
        }
    }

    /// Picks the first screen from whatever credential survived the reload.
    pub fn boot(&mut self) -> BootAction {
        match self.store.get() {
            Ok(Some(token)) => {
                self.view = SessionView::Loading;
                BootAction::FetchUser { token }
            }
            Ok(None) => self.show_login(None),
            Err(err) => {
                tracing::warn!(%err, "credential store unreadable");
                self.show_login(None)
            }
        }
    }

    /// Applies the outcome of the `users/me` fetch.
    pub fn user_loaded(&mut self, result: Result<Tour, ApiError>) {
        match result {
            Ok(tour) => {
                self.view = SessionView::Tour(TourState::new(tour));
            }
            Err(err) if err.is_unauthorized() => {
                tracing::info!(%err, "credential rejected, signing out");
                self.clear_credential();
                self.show_login(None);
            }
            Err(err) => {
                tracing::error!(%err, "failed to load tour");
                self.view = SessionView::Failed {
                    message: err.to_string(),
                };
            }
        }
    }

    /// Applies the outcome of `auth/local`.
    ///
    /// On success the token is stored and the caller fetches the tour with
    /// it. On failure the stored credential is left as it was.
    pub fn login_finished(&mut self, result: Result<String, ApiError>) -> BootAction {
        match result {
            Ok(token) => {
                if let Err(err) = self.store.set(&token) {
                    // The session still works for this page load.
                    tracing::warn!(%err, "could not persist credential");
                }
                self.view = SessionView::Loading;
                BootAction::FetchUser { token }
            }
            Err(err) => {
                tracing::info!(%err, "login rejected");
                self.show_login(Some(err.to_string()))
            }
        }
    }

    pub fn logout(&mut self) {
        self.clear_credential();
        self.show_login(None);
    }

    fn show_login(&mut self, error: Option<String>) -> BootAction {
        self.view = SessionView::Login { error };
        BootAction::ShowLogin
    }

    fn clear_credential(&mut self) {
        if let Err(err) = self.store.clear() {
            tracing::warn!(%err, "could not clear credential");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BootAction, SessionGate, SessionView};
    use crate::store::{CredentialStore, InMemoryCredentialStore};
    use content_api::{ApiError, messages};
    use pretty_assertions::assert_eq;
    use tour::{OrgId, Organization, Tour, UserId};

    fn tour() -> Tour {
        Tour::new(UserId(7), vec![Organization::new(OrgId(1), "HQ")])
    }

    #[test]
    fn boot_without_credential_shows_login() {
        let mut gate = SessionGate::new(InMemoryCredentialStore::new());
        assert_eq!(gate.boot(), BootAction::ShowLogin);
        assert_eq!(gate.view(), &SessionView::Login { error: None });
    }

    #[test]
    fn boot_with_credential_fetches_user() {
        let mut gate = SessionGate::new(InMemoryCredentialStore::with_token("tok"));
        assert_eq!(
            gate.boot(),
            BootAction::FetchUser {
                token: "tok".to_string()
            }
        );
        assert_eq!(gate.view(), &SessionView::Loading);

        gate.user_loaded(Ok(tour()));
        let state = gate.tour().expect("tour view");
        assert_eq!(state.tour().user_id, UserId(7));
    }

    #[test]
    fn rejected_credential_is_cleared() {
        let mut gate = SessionGate::new(InMemoryCredentialStore::with_token("stale"));
        gate.boot();
        gate.user_loaded(Err(ApiError::Unauthorized("expired".into())));
        assert_eq!(gate.view(), &SessionView::Login { error: None });
        assert!(!gate.store().has_credential());
    }

    #[test]
    fn other_fetch_errors_keep_credential() {
        let mut gate = SessionGate::new(InMemoryCredentialStore::with_token("tok"));
        gate.boot();
        gate.user_loaded(Err(ApiError::Transport("offline".into())));
        assert!(matches!(gate.view(), SessionView::Failed { .. }));
        assert!(gate.store().has_credential());
    }

    #[test]
    fn login_success_stores_token() {
        let mut gate = SessionGate::new(InMemoryCredentialStore::new());
        gate.boot();
        let next = gate.login_finished(Ok("fresh".to_string()));
        assert_eq!(
            next,
            BootAction::FetchUser {
                token: "fresh".to_string()
            }
        );
        assert_eq!(gate.store().get(), Ok(Some("fresh".to_string())));
    }

    #[test]
    fn wrong_password_leaves_everything_untouched() {
        let mut gate = SessionGate::new(InMemoryCredentialStore::with_token("previous"));
        let next = gate.login_finished(Err(ApiError::Status {
            status: 400,
            message: messages::LOGIN_FAILED.to_string(),
        }));
        assert_eq!(next, BootAction::ShowLogin);
        assert_eq!(
            gate.view(),
            &SessionView::Login {
                error: Some(messages::LOGIN_FAILED.to_string())
            }
        );
        assert_eq!(gate.store().get(), Ok(Some("previous".to_string())));
        assert!(gate.tour().is_none());
    }

    #[test]
    fn logout_clears_credential() {
        let mut gate = SessionGate::new(InMemoryCredentialStore::with_token("tok"));
        gate.boot();
        gate.user_loaded(Ok(tour()));
        gate.logout();
        assert_eq!(gate.view(), &SessionView::Login { error: None });
        assert!(!gate.store().has_credential());
        assert!(gate.tour_mut().is_none());
    }
}

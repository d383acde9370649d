//! Credential storage and the login/tour gate of the authenticated app.

pub mod gate;
pub mod store;

pub use gate::{BootAction, SessionGate, SessionView};
pub use store::*;

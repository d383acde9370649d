//! HTML rendering of every screen.
//!
//! Each view is a pure function of state returning markup. Interactive
//! elements carry `data-action` (and `data-index` where needed) so the app
//! wires one delegated listener per root instead of one per element.

pub mod html;
pub mod login;
pub mod notice;
pub mod panorama;
pub mod public;
pub mod text;
pub mod tour_page;

pub use html::escape;

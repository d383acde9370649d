//! Client side of the tour content API.
//!
//! Requests are plain values ([`ApiRequest`]) and responses are decoded from
//! plain values ([`ApiResponse`]), so everything except the browser transport
//! is testable on the host.

pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod request;
pub mod response;
pub mod wire;

pub use client::*;
pub use config::*;
pub use error::*;
pub use fetch::BrowserTransport;
pub use request::{ApiRequest, Method};
pub use response::ApiResponse;

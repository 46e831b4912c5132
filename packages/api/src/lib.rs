//! # API crate: backend access and the client-side managers for Waypoint
//!
//! Everything the views need from the network lives here: the [`Backend`] seam,
//! its HTTP and in-memory implementations, and the [`Client`] whose async methods
//! turn user intents into backend calls and [`store::Action`]s.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`backend`] | `Backend` trait: every REST operation the client consumes |
//! | [`http`] | `HttpClient`: reqwest implementation with bearer credentials |
//! | [`legacy`] | `/userlist` favourites/planned endpoints for older deployments |
//! | [`memory`] | `MemoryBackend`: in-memory implementation with call recording |
//! | [`error`] | `ApiError` taxonomy and `detail` extraction |
//! | [`client`] | `Client`: backend + token store, failure routing |
//!
//! The manager operations are spread over `session`, `lists`, `search` and
//! `membership`, each an `impl Client` block.

pub mod backend;
pub mod client;
pub mod error;
pub mod http;
pub mod legacy;
pub mod memory;

mod lists;
mod membership;
mod search;
mod session;

pub use backend::{Backend, LoginResponse};
pub use client::Client;
pub use error::{ApiError, GENERIC_FAILURE};
pub use http::HttpClient;
pub use legacy::{LegacyCategory, LegacyEntry};
pub use membership::Membership;
pub use memory::MemoryBackend;

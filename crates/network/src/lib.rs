// crates/network/src/lib.rs
//! Plex Media Server access over HTTP
//!
//! `PlexCatalog` implements the core `MediaCatalog` trait with blocking
//! requests against the Plex JSON API.

mod client;
mod error;
mod models;
mod plex;

pub use client::{ClientConfig, PlexHttpClient};
pub use error::{NetworkError, NetworkResult};
pub use models::{SectionEntry, ServerIdentity};
pub use plex::PlexCatalog;

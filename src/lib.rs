//! Library crate for userdeck.
//!
//! This crate exposes the building blocks of the TUI:
//! - User records and their wire format (`model`)
//! - The in-memory collection cache (`store`)
//! - Form validation (`validation`)
//! - The fetch-once initial load (`fetch`)
//! - The session tying those together for the UI (`session`)
//! - Application state, keymap and update loop (`app`)
//! - Search helpers (`search`)
//! - UI rendering (`ui`)
//! - Error and result types (`error`), CLI config (`config`), log setup (`logging`)
//!
//! It is used by the `userdeck` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod app;
pub mod config;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod model;
pub mod search;
pub mod session;
pub mod store;
pub mod ui;
pub mod validation;

// Re-export commonly used items at the crate root for convenience
/// Convenient error and result types shared across the crate.
pub use error::{DynError, FetchError, Result};
pub use model::{User, UserId};
pub use session::Session;
pub use store::UserStore;

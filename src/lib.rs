//! Client-side mirror of a remote todo collection.
//!
//! [`store::TaskStore`] owns the visible list, the inspected item and the
//! list/detail view flag; [`client::ApiClient`] talks to the REST resource.
//! The TUI (feature `tui`, on by default) is a thin renderer over the store.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod store;

#[cfg(feature = "tui")]
pub mod tui;

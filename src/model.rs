// File: src/model.rs
use serde::{Deserialize, Serialize};

/// A single todo item as served by the remote collection.
///
/// The server assigns `id` (wire key `_id`) and is the only party that ever
/// generates one. `completed` defaults to false on the wire because the
/// create endpoint omits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// Which of the two screens the presentation layer should show. Owned and
/// set exclusively by [`crate::store::TaskStore`] transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    List,
    Detail,
}

//! Viewer identity
//!
//! The host owns viewers and shares them as `Rc<Viewer>`. Inventories only
//! hold weak handles, so a viewer the host forgets stops being tracked.
//! Sessions are keyed by the handle, not by `ViewerId`: the host keeps one
//! `Rc<Viewer>` per connected viewer.

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;

/// Stable host-assigned viewer identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ViewerId(pub u64);

impl fmt::Display for ViewerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "viewer#{}", self.0)
    }
}

/// Someone who can look at and click an inventory
#[derive(Debug)]
pub struct Viewer {
    id: ViewerId,
    name: String,
    connected: Cell<bool>,
}

impl Viewer {
    pub fn new(id: ViewerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            connected: Cell::new(true),
        }
    }

    pub fn id(&self) -> ViewerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the host can still show inventories to this viewer
    pub fn is_connected(&self) -> bool {
        self.connected.get()
    }

    /// Mark the viewer as gone; later opens fail
    pub fn disconnect(&self) {
        self.connected.set(false);
    }
}

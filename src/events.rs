//! Host notifications
//!
//! The host owns event delivery. It builds a `ClickEvent` or `CloseEvent`
//! and hands it to an `InventoryListener`; after a click returns, a cancelled
//! event means the host must skip its own default click handling.

use crate::viewer::Viewer;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// How the viewer activated a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickType {
    Left,
    Right,
    Middle,
    ShiftLeft,
    ShiftRight,
    DoubleClick,
    /// Hotbar number key, 0-based
    NumberKey(u8),
    Drop,
}

impl ClickType {
    pub fn is_shift(&self) -> bool {
        matches!(self, ClickType::ShiftLeft | ClickType::ShiftRight)
    }

    pub fn is_right(&self) -> bool {
        matches!(self, ClickType::Right | ClickType::ShiftRight)
    }
}

/// A viewer clicked a slot
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub viewer: Rc<Viewer>,
    /// Raw slot index as reported by the host
    pub slot: usize,
    pub click: ClickType,
    cancelled: bool,
}

impl ClickEvent {
    pub fn new(viewer: Rc<Viewer>, slot: usize, click: ClickType) -> Self {
        Self {
            viewer,
            slot,
            click,
            cancelled: false,
        }
    }

    /// Suppress the host's default click behavior
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

/// A viewer closed whatever inventory they were looking at
#[derive(Debug, Clone)]
pub struct CloseEvent {
    pub viewer: Rc<Viewer>,
}

impl CloseEvent {
    pub fn new(viewer: Rc<Viewer>) -> Self {
        Self { viewer }
    }
}

/// Receiver for host notifications
pub trait InventoryListener {
    /// Route a click; cancels the event when an inventory consumed it
    fn on_click(&self, event: &mut ClickEvent);

    /// End the viewer's session wherever it is open
    fn on_close(&self, event: &CloseEvent);

    /// The viewer left the host entirely
    fn on_disconnect(&self, viewer: &Rc<Viewer>) {
        self.on_close(&CloseEvent::new(Rc::clone(viewer)));
    }

    fn listener_name(&self) -> &str {
        "unnamed_listener"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::ViewerId;
    use std::cell::Cell;

    struct CountingListener {
        closes: Cell<u32>,
    }

    impl InventoryListener for CountingListener {
        fn on_click(&self, event: &mut ClickEvent) {
            event.cancel();
        }

        fn on_close(&self, _event: &CloseEvent) {
            self.closes.set(self.closes.get() + 1);
        }
    }

    #[test]
    fn test_click_type_modifiers() {
        assert!(ClickType::ShiftLeft.is_shift());
        assert!(ClickType::ShiftRight.is_shift());
        assert!(!ClickType::Left.is_shift());
        assert!(ClickType::Right.is_right());
        assert!(ClickType::ShiftRight.is_right());
        assert!(!ClickType::NumberKey(2).is_right());
    }

    #[test]
    fn test_listener_defaults() {
        let listener = CountingListener { closes: Cell::new(0) };
        let viewer = Rc::new(Viewer::new(ViewerId(1), "alex"));

        let mut event = ClickEvent::new(Rc::clone(&viewer), 0, ClickType::Left);
        assert!(!event.is_cancelled());
        listener.on_click(&mut event);
        assert!(event.is_cancelled());

        listener.on_disconnect(&viewer);
        assert_eq!(listener.closes.get(), 1);
        assert_eq!(listener.listener_name(), "unnamed_listener");
    }
}

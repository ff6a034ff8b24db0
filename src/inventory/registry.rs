use super::menu::Inventory;
use crate::config::MenuConfig;
use crate::error::{MenuError, MenuResult};
use crate::events::{ClickEvent, CloseEvent, InventoryListener};
use crate::render::{RenderSink, MAX_LINES, ROW_WIDTH};
use crate::utils::WeakCollection;
use crate::viewer::Viewer;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// The inventories one integrator created, and the router for their clicks
///
/// The registry only tracks inventories weakly: an inventory the integrator
/// stops holding drops out of routing on its own.
pub struct InventoryRegistry {
    owner: String,
    config: MenuConfig,
    sink: Rc<dyn RenderSink>,
    inventories: RefCell<WeakCollection<Inventory>>,
}

impl InventoryRegistry {
    pub fn new(owner: impl Into<String>, sink: Rc<dyn RenderSink>, config: MenuConfig) -> Self {
        Self {
            owner: owner.into(),
            config,
            sink,
            inventories: RefCell::new(WeakCollection::new()),
        }
    }

    /// Name of the integrator this registry belongs to
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// Create and track an inventory with `lines` rows of nine slots
    pub fn create_inventory(&self, lines: usize) -> MenuResult<Rc<Inventory>> {
        if !(1..=MAX_LINES).contains(&lines) {
            log::warn!("[{}] Rejected inventory with {} lines", self.owner, lines);
            return Err(MenuError::InvalidLineCount { lines });
        }
        let inventory = Inventory::new(lines * ROW_WIDTH, Rc::clone(&self.sink), self.config.clone())?;
        self.inventories.borrow_mut().add(&inventory);
        log::debug!("[{}] Created inventory of {} lines", self.owner, lines);
        Ok(inventory)
    }

    /// Live inventories created through this registry
    pub fn inventories(&self) -> Vec<Rc<Inventory>> {
        self.inventories.borrow().snapshot()
    }

    pub fn len(&self) -> usize {
        self.inventories.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inventory the viewer currently has open, if any
    pub fn open_inventory(&self, viewer: &Rc<Viewer>) -> Option<Rc<Inventory>> {
        self.inventories().into_iter().find(|inventory| inventory.is_open(viewer))
    }
}

impl InventoryListener for InventoryRegistry {
    fn on_click(&self, event: &mut ClickEvent) {
        // Snapshot first: actions may create inventories through this registry
        for inventory in self.inventories() {
            let outcome = inventory.dispatch(event);
            if outcome.is_handled() || inventory.is_open(&event.viewer) {
                log::trace!("[{}] Click at slot {} consumed ({:?})", self.owner, event.slot, outcome);
                event.cancel();
                break;
            }
        }
    }

    fn on_close(&self, event: &CloseEvent) {
        for inventory in self.inventories() {
            inventory.close(&event.viewer);
        }
    }

    fn listener_name(&self) -> &str {
        &self.owner
    }
}

impl fmt::Debug for InventoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InventoryRegistry")
            .field("owner", &self.owner)
            .field("inventories", &self.len())
            .finish()
    }
}

//! Declarative slot-grid menus for game servers
//!
//! An integrator creates inventories through its `InventoryRegistry`, fills
//! slots and attaches buttons, then opens them for viewers. The host renders
//! through a `RenderSink` and feeds click and close notifications back through
//! `InventoryListener`.

pub mod config;
pub mod error;
pub mod events;
pub mod inventory;
pub mod render;
pub mod utils;
pub mod viewer;

pub use config::MenuConfig;
pub use error::{MenuError, MenuResult};
pub use events::{ClickEvent, ClickType, CloseEvent, InventoryListener};
pub use inventory::{
    Button, ButtonActions, ButtonKind, DispatchOutcome, Integrator, Inventory, InventoryRegistry,
    ItemId, ItemStack, RegistryDirectory,
};
pub use render::{InventoryView, RenderSink};
pub use utils::WeakCollection;
pub use viewer::{Viewer, ViewerId};

pub mod button;
pub mod directory;
pub mod item;
pub mod menu;
pub mod registry;

pub use button::{Button, ButtonActions, ButtonKind, ClickAction, EditAction, EventAction};
pub use directory::{Integrator, RegistryDirectory};
pub use item::{ItemId, ItemStack, MAX_STACK_SIZE};
pub use menu::{DispatchOutcome, Inventory};
pub use registry::InventoryRegistry;

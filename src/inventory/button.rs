//! Clickable slots
//!
//! Buttons are only built by their owning `Inventory`. Identity is the pair
//! (owning inventory, slot): two buttons compare equal when both match,
//! whatever their actions or visuals.

use super::item::ItemStack;
use super::menu::Inventory;
use crate::events::ClickEvent;
use crate::viewer::Viewer;
use std::fmt;
use std::rc::{Rc, Weak};

/// Called with the pressed button and the viewer who clicked it
pub type ClickAction = Rc<dyn Fn(&Button, &Rc<Viewer>)>;
/// Called with the raw click notification, after the click action
pub type EventAction = Rc<dyn Fn(&ClickEvent)>;
/// Builds a viewer's copy of a button's visual from a fresh clone of the template
pub type EditAction = Rc<dyn Fn(&Viewer, ItemStack) -> ItemStack>;

/// The activation pair attached to a button or used as an inventory's default
#[derive(Clone, Default)]
pub struct ButtonActions {
    on_click: Option<ClickAction>,
    on_event: Option<EventAction>,
}

impl ButtonActions {
    /// No actions; the click is still consumed
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for `ButtonActions::new().on_click(action)`
    pub fn click(action: impl Fn(&Button, &Rc<Viewer>) + 'static) -> Self {
        Self::new().on_click(action)
    }

    pub fn on_click(mut self, action: impl Fn(&Button, &Rc<Viewer>) + 'static) -> Self {
        self.on_click = Some(Rc::new(action));
        self
    }

    pub fn on_event(mut self, action: impl Fn(&ClickEvent) + 'static) -> Self {
        self.on_event = Some(Rc::new(action));
        self
    }

    pub fn has_click_action(&self) -> bool {
        self.on_click.is_some()
    }

    pub fn has_event_action(&self) -> bool {
        self.on_event.is_some()
    }
}

impl fmt::Debug for ButtonActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonActions")
            .field("on_click", &self.on_click.is_some())
            .field("on_event", &self.on_event.is_some())
            .finish()
    }
}

/// What a button shows in its slot
#[derive(Clone)]
pub enum ButtonKind {
    /// No visual of its own; the slot shows its explicit content
    Plain,
    /// A fixed visual
    Item(ItemStack),
    /// A visual edited per viewer before it is shown
    CustomItem { item: ItemStack, edit: EditAction },
}

impl fmt::Debug for ButtonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonKind::Plain => f.write_str("Plain"),
            ButtonKind::Item(item) => f.debug_tuple("Item").field(item).finish(),
            ButtonKind::CustomItem { item, .. } => {
                f.debug_struct("CustomItem").field("item", item).finish_non_exhaustive()
            }
        }
    }
}

/// A slot-bound click handler, optionally with a visual
pub struct Button {
    inventory: Weak<Inventory>,
    slot: usize,
    kind: ButtonKind,
    actions: ButtonActions,
}

impl Button {
    pub(crate) fn new(
        inventory: Weak<Inventory>,
        slot: usize,
        kind: ButtonKind,
        actions: ButtonActions,
    ) -> Self {
        Self {
            inventory,
            slot,
            kind,
            actions,
        }
    }

    /// Slot this button occupies, 0-based
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// The owning inventory, if it is still alive
    pub fn inventory(&self) -> Option<Rc<Inventory>> {
        self.inventory.upgrade()
    }

    pub fn kind(&self) -> &ButtonKind {
        &self.kind
    }

    pub fn actions(&self) -> &ButtonActions {
        &self.actions
    }

    /// Whether the button renders a visual of its own
    pub fn has_item(&self) -> bool {
        !matches!(self.kind, ButtonKind::Plain)
    }

    /// A clone of the visual template, before any per-viewer edit
    pub fn item(&self) -> Option<ItemStack> {
        match &self.kind {
            ButtonKind::Plain => None,
            ButtonKind::Item(item) | ButtonKind::CustomItem { item, .. } => Some(item.clone()),
        }
    }

    /// The visual as `viewer` should see it
    pub fn item_for(&self, viewer: &Viewer) -> Option<ItemStack> {
        match &self.kind {
            ButtonKind::Plain => None,
            ButtonKind::Item(item) => Some(item.clone()),
            ButtonKind::CustomItem { item, edit } => Some(edit(viewer, item.clone())),
        }
    }

    /// Remove this button from its inventory, returns false if it was already gone
    pub fn remove(&self) -> bool {
        self.inventory()
            .map_or(false, |inventory| inventory.remove_button(self.slot))
    }

    /// Run the click action, then the raw event action
    pub(crate) fn press(&self, event: &ClickEvent) {
        if let Some(on_click) = &self.actions.on_click {
            on_click(self, &event.viewer);
        }
        if let Some(on_event) = &self.actions.on_event {
            on_event(event);
        }
    }
}

impl PartialEq for Button {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot && Weak::ptr_eq(&self.inventory, &other.inventory)
    }
}

impl Eq for Button {}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("slot", &self.slot)
            .field("kind", &self.kind)
            .field("actions", &self.actions)
            .finish()
    }
}

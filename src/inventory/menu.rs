//! Inventory entity: slot contents, buttons, viewer sessions and click routing
//!
//! Every slot index is 0-based and must lie in `[0, size)`. All state sits
//! behind `RefCell`s that are released before any integrator callback runs,
//! so callbacks may freely mutate the inventory that invoked them.

use super::button::{Button, ButtonActions, ButtonKind, EditAction};
use super::item::ItemStack;
use crate::config::MenuConfig;
use crate::error::{MenuError, MenuResult};
use crate::events::ClickEvent;
use crate::render::{validate_size, InventoryView, RenderSink, ROW_WIDTH};
use crate::utils::WeakKeyMap;
use crate::viewer::Viewer;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

/// How a click was routed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The viewer has no open session here; the click belongs elsewhere
    NotOpen,
    /// A registered button ran
    Button,
    /// No button at the slot; the default button ran
    DefaultButton,
    /// No button and no default; the click was swallowed
    Absorbed,
}

impl DispatchOutcome {
    /// Whether the host should suppress its own click handling
    pub fn is_handled(&self) -> bool {
        !matches!(self, DispatchOutcome::NotOpen)
    }
}

/// A fixed-size grid of slots with optional buttons
pub struct Inventory {
    this: Weak<Inventory>,
    size: usize,
    config: MenuConfig,
    sink: Rc<dyn RenderSink>,
    contents: RefCell<Vec<Option<ItemStack>>>,
    fill_item: RefCell<Option<ItemStack>>,
    buttons: RefCell<BTreeMap<usize, Rc<Button>>>,
    default_button: RefCell<Option<ButtonActions>>,
    /// Open sessions keyed by viewer handle, with the title each was shown
    sessions: RefCell<WeakKeyMap<Viewer, Option<String>>>,
}

impl Inventory {
    /// Create an inventory of `size` slots
    pub fn new(size: usize, sink: Rc<dyn RenderSink>, config: MenuConfig) -> MenuResult<Rc<Self>> {
        validate_size(size)?;
        Ok(Rc::new_cyclic(|this| Self {
            this: this.clone(),
            size,
            config,
            sink,
            contents: RefCell::new(vec![None; size]),
            fill_item: RefCell::new(None),
            buttons: RefCell::new(BTreeMap::new()),
            default_button: RefCell::new(None),
            sessions: RefCell::new(WeakKeyMap::new()),
        }))
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of 9-wide rows
    pub fn lines(&self) -> usize {
        self.size / ROW_WIDTH
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    fn check_slot(&self, slot: usize) -> MenuResult<()> {
        if slot >= self.size {
            log::warn!("[Inventory] Slot {} rejected for size {}", slot, self.size);
            return Err(MenuError::InvalidSlot { slot, size: self.size });
        }
        Ok(())
    }

    // Contents

    /// Set or clear the explicit content of a slot
    pub fn set_item(&self, slot: usize, item: impl Into<Option<ItemStack>>) -> MenuResult<()> {
        self.check_slot(slot)?;
        self.contents.borrow_mut()[slot] = item.into();
        self.changed();
        Ok(())
    }

    /// Explicit content of a slot, ignoring buttons and the fill item
    pub fn content(&self, slot: usize) -> Option<ItemStack> {
        self.contents.borrow().get(slot).cloned().flatten()
    }

    /// Put `item` in every slot of a row
    pub fn set_row(&self, row: usize, item: ItemStack) -> MenuResult<()> {
        if row >= self.lines() {
            log::warn!("[Inventory] Row {} rejected for {} lines", row, self.lines());
            return Err(MenuError::InvalidRow { row });
        }
        {
            let mut contents = self.contents.borrow_mut();
            let start = row * ROW_WIDTH;
            for slot in &mut contents[start..start + ROW_WIDTH] {
                *slot = Some(item.clone());
            }
        }
        self.changed();
        Ok(())
    }

    /// Put `item` in every slot of a column
    pub fn set_column(&self, column: usize, item: ItemStack) -> MenuResult<()> {
        if column >= ROW_WIDTH {
            log::warn!("[Inventory] Column {} rejected", column);
            return Err(MenuError::InvalidColumn { column });
        }
        {
            let mut contents = self.contents.borrow_mut();
            for slot in contents.iter_mut().skip(column).step_by(ROW_WIDTH) {
                *slot = Some(item.clone());
            }
        }
        self.changed();
        Ok(())
    }

    /// Show `item` in every slot with neither content nor a button
    pub fn fill_inventory(&self, item: ItemStack) {
        *self.fill_item.borrow_mut() = Some(item);
        self.changed();
    }

    pub fn fill_item(&self) -> Option<ItemStack> {
        self.fill_item.borrow().clone()
    }

    /// Reset contents and the fill item
    pub fn clear_items(&self) {
        self.contents.borrow_mut().iter_mut().for_each(|slot| *slot = None);
        *self.fill_item.borrow_mut() = None;
        self.changed();
    }

    /// Remove every slot button; the default button stays
    pub fn clear_buttons(&self) {
        self.buttons.borrow_mut().clear();
        self.changed();
    }

    /// Reset contents, fill item and buttons
    pub fn clear(&self) {
        self.contents.borrow_mut().iter_mut().for_each(|slot| *slot = None);
        *self.fill_item.borrow_mut() = None;
        self.buttons.borrow_mut().clear();
        self.changed();
    }

    // Buttons

    fn insert_button(&self, slot: usize, kind: ButtonKind, actions: ButtonActions) -> MenuResult<Rc<Button>> {
        self.check_slot(slot)?;
        let button = {
            let mut buttons = self.buttons.borrow_mut();
            if buttons.contains_key(&slot) {
                log::warn!("[Inventory] Slot {} already holds a button", slot);
                return Err(MenuError::DuplicateButton { slot });
            }
            let button = Rc::new(Button::new(self.this.clone(), slot, kind, actions));
            buttons.insert(slot, Rc::clone(&button));
            button
        };
        log::debug!("[Inventory] Button registered at slot {}", slot);
        self.changed();
        Ok(button)
    }

    /// Register a button without a visual of its own
    pub fn create_button(&self, slot: usize, actions: ButtonActions) -> MenuResult<Rc<Button>> {
        self.insert_button(slot, ButtonKind::Plain, actions)
    }

    /// Register a button showing a fixed item
    pub fn create_item_button(&self, slot: usize, item: ItemStack, actions: ButtonActions) -> MenuResult<Rc<Button>> {
        self.insert_button(slot, ButtonKind::Item(item), actions)
    }

    /// Register a button whose item is edited per viewer before it is shown
    pub fn create_custom_item_button(
        &self,
        slot: usize,
        item: ItemStack,
        edit: impl Fn(&Viewer, ItemStack) -> ItemStack + 'static,
        actions: ButtonActions,
    ) -> MenuResult<Rc<Button>> {
        let edit: EditAction = Rc::new(edit);
        self.insert_button(slot, ButtonKind::CustomItem { item, edit }, actions)
    }

    /// Handle clicks on slots without a button, replacing any previous default
    ///
    /// Only clicks inside the grid reach it; clicks at `slot >= size` are absorbed.
    pub fn create_default_button(&self, actions: ButtonActions) {
        *self.default_button.borrow_mut() = Some(actions);
    }

    /// Drop the default button, returns whether there was one
    pub fn remove_default_button(&self) -> bool {
        self.default_button.borrow_mut().take().is_some()
    }

    pub fn has_default_button(&self) -> bool {
        self.default_button.borrow().is_some()
    }

    /// The default button as it would be pressed at `slot`
    pub fn default_button_view(&self, slot: usize) -> Option<Button> {
        let actions = self.default_button.borrow().clone()?;
        Some(Button::new(self.this.clone(), slot, ButtonKind::Plain, actions))
    }

    /// Button registered at a slot
    pub fn button(&self, slot: usize) -> Option<Rc<Button>> {
        self.buttons.borrow().get(&slot).cloned()
    }

    /// Registered buttons in slot order
    pub fn buttons(&self) -> Vec<Rc<Button>> {
        self.buttons.borrow().values().cloned().collect()
    }

    /// Unregister the button at a slot without running it
    pub fn remove_button(&self, slot: usize) -> bool {
        let removed = self.buttons.borrow_mut().remove(&slot).is_some();
        if removed {
            log::debug!("[Inventory] Button removed from slot {}", slot);
            self.changed();
        }
        removed
    }

    // Rendering

    /// What `viewer` sees in a slot: a button's visual, else explicit content,
    /// else the fill item. Button slots without a visual never show the fill.
    pub fn get_item(&self, slot: usize, viewer: &Viewer) -> MenuResult<Option<ItemStack>> {
        self.check_slot(slot)?;
        if let Some(button) = self.button(slot) {
            return Ok(button.item_for(viewer).or_else(|| self.content(slot)));
        }
        Ok(self.content(slot).or_else(|| self.fill_item()))
    }

    /// Build the snapshot `open` would send to `viewer`
    pub fn render(&self, viewer: &Viewer, title: Option<&str>) -> InventoryView {
        let mut view = InventoryView::empty(self.size, Some(self.title_or_default(title)));
        let fill = self.fill_item();
        let buttons = self.buttons();

        {
            let contents = self.contents.borrow();
            for (slot, shown) in view.slots.iter_mut().enumerate() {
                *shown = contents[slot].clone();
            }
        }
        for button in &buttons {
            if let Some(item) = button.item_for(viewer) {
                log::trace!("[Inventory] Slot {} shows button item {}", button.slot(), item.item_id);
                view.slots[button.slot()] = Some(item);
            }
        }
        if let Some(fill) = fill {
            let button_slots: Vec<usize> = buttons.iter().map(|button| button.slot()).collect();
            for (slot, shown) in view.slots.iter_mut().enumerate() {
                if shown.is_none() && !button_slots.contains(&slot) {
                    *shown = Some(fill.clone());
                }
            }
        }
        view
    }

    fn title_or_default(&self, title: Option<&str>) -> String {
        title.unwrap_or(self.config.default_title.as_str()).to_string()
    }

    fn show(&self, viewer: &Viewer, title: Option<&str>) -> MenuResult<()> {
        let view = self.render(viewer, title);
        view.validate()?;
        self.sink.show(viewer, &view).map_err(|e| {
            log::warn!("[Inventory] Failed to show inventory to {}: {}", viewer.id(), e);
            e
        })
    }

    // Sessions

    /// Show this inventory to a viewer and start their session
    ///
    /// Re-opening for a viewer who already has it open replaces the old
    /// session. On error nothing changes, including an existing session.
    /// Sessions belong to the `Rc<Viewer>` handle, so hosts share one handle
    /// per viewer.
    pub fn open(&self, viewer: &Rc<Viewer>, title: Option<&str>) -> MenuResult<()> {
        validate_size(self.size)?;
        if !viewer.is_connected() {
            log::warn!("[Inventory] Cannot open for disconnected {}", viewer.id());
            return Err(MenuError::ViewerMissing { viewer: viewer.id() });
        }

        self.show(viewer, title)?;

        if self.close(viewer) {
            log::debug!("[Inventory] Re-open closed the previous session of {}", viewer.id());
        }
        self.sessions.borrow_mut().insert(viewer, title.map(str::to_string));
        log::debug!("[Inventory] Opened for {} ({} viewers)", viewer.id(), self.sessions.borrow().len());
        Ok(())
    }

    /// End a viewer's session, returns whether they had one
    pub fn close(&self, viewer: &Rc<Viewer>) -> bool {
        let removed = self.sessions.borrow_mut().remove(viewer).is_some();
        if removed {
            log::debug!("[Inventory] Closed for {}", viewer.id());
        }
        removed
    }

    pub fn is_open(&self, viewer: &Rc<Viewer>) -> bool {
        self.sessions.borrow().contains_key(viewer)
    }

    /// Viewers with an open session that are still alive
    pub fn viewers(&self) -> Vec<Rc<Viewer>> {
        let mut sessions = self.sessions.borrow_mut();
        sessions.purge();
        sessions.keys()
    }

    /// End every session, returns how many ended
    pub fn close_all(&self) -> usize {
        let viewers = self.viewers();
        viewers.iter().filter(|viewer| self.close(viewer)).count()
    }

    /// Send the current snapshot again to an open viewer
    pub fn refresh(&self, viewer: &Rc<Viewer>) -> MenuResult<()> {
        if !self.is_open(viewer) || !viewer.is_connected() {
            return Err(MenuError::ViewerMissing { viewer: viewer.id() });
        }
        let title = self.sessions.borrow().get(viewer).cloned().flatten();
        self.show(viewer, title.as_deref())
    }

    /// Refresh every open viewer, returns how many were refreshed
    pub fn refresh_all(&self) -> usize {
        self.viewers()
            .iter()
            .filter(|viewer| self.refresh(viewer).is_ok())
            .count()
    }

    fn changed(&self) {
        if self.config.refresh_on_change {
            self.refresh_all();
        }
    }

    // Dispatch

    /// Route a click to the button at its slot, or the default button
    ///
    /// The click action runs before the raw event action. Clicks from
    /// viewers with an open session are always handled, even when nothing
    /// runs. Slots outside the grid never reach the default button.
    pub fn dispatch(&self, event: &ClickEvent) -> DispatchOutcome {
        if !self.is_open(&event.viewer) {
            return DispatchOutcome::NotOpen;
        }

        if let Some(button) = self.button(event.slot) {
            log::debug!("[Inventory] {} pressed button at slot {}", event.viewer.id(), event.slot);
            button.press(event);
            return DispatchOutcome::Button;
        }

        if event.slot < self.size {
            if let Some(button) = self.default_button_view(event.slot) {
                log::debug!("[Inventory] {} pressed default button at slot {}", event.viewer.id(), event.slot);
                button.press(event);
                return DispatchOutcome::DefaultButton;
            }
        }

        log::trace!("[Inventory] Click at slot {} absorbed", event.slot);
        DispatchOutcome::Absorbed
    }
}

impl fmt::Debug for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inventory")
            .field("size", &self.size)
            .field("buttons", &self.buttons.borrow().len())
            .field("default_button", &self.has_default_button())
            .field("viewers", &self.sessions.borrow().len())
            .finish()
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum items in a single stack
pub const MAX_STACK_SIZE: u32 = 64;

/// Host-side item type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// A renderable stack of items shown in a slot
///
/// Stored stacks are templates: the inventory clones them before they reach
/// a caller or the render sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item_id: ItemId,
    pub count: u32,
    pub display_name: Option<String>,
    pub lore: Vec<String>,
}

impl ItemStack {
    /// Create a new item stack
    pub fn new(item_id: ItemId, count: u32) -> Self {
        Self {
            item_id,
            count: count.min(MAX_STACK_SIZE),
            display_name: None,
            lore: Vec::new(),
        }
    }

    /// Create a single item
    pub fn single(item_id: ItemId) -> Self {
        Self::new(item_id, 1)
    }

    /// Set the name shown instead of the item type's own name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Replace the lore lines
    pub fn with_lore<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lore = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Set the stack size, clamped to the maximum
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count.min(MAX_STACK_SIZE);
        self
    }

    /// Check if stack is empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Check if stack is full
    pub fn is_full(&self) -> bool {
        self.count >= MAX_STACK_SIZE
    }
}

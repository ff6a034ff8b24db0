//! Render sink collaborator
//!
//! The host draws inventories; the core only builds a per-viewer snapshot
//! and hands it over.

use crate::error::{MenuError, MenuResult};
use crate::inventory::ItemStack;
use crate::viewer::Viewer;

/// Slots in one inventory row
pub const ROW_WIDTH: usize = 9;
/// Largest inventory the host can display
pub const MAX_LINES: usize = 6;
pub const MAX_SIZE: usize = ROW_WIDTH * MAX_LINES;

/// Check that a size is a whole number of rows between one and six
pub fn validate_size(size: usize) -> MenuResult<()> {
    if size == 0 || size > MAX_SIZE || size % ROW_WIDTH != 0 {
        return Err(MenuError::InvalidSize { size });
    }
    Ok(())
}

/// A finished snapshot of an inventory as one viewer sees it
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryView {
    pub title: Option<String>,
    pub size: usize,
    pub slots: Vec<Option<ItemStack>>,
}

impl InventoryView {
    /// Empty view of the given size
    pub fn empty(size: usize, title: Option<String>) -> Self {
        Self {
            title,
            size,
            slots: vec![None; size],
        }
    }

    /// Item shown in a slot
    pub fn item(&self, slot: usize) -> Option<&ItemStack> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Number of slots showing something
    pub fn filled_slots(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Check the view is something the host can display
    pub fn validate(&self) -> MenuResult<()> {
        validate_size(self.size)?;
        if self.slots.len() != self.size {
            return Err(MenuError::InvalidView {
                message: format!("{} slots for size {}", self.slots.len(), self.size),
            });
        }
        Ok(())
    }
}

/// Displays inventory views to viewers
pub trait RenderSink {
    /// Show a view to a viewer, replacing whatever they currently see
    fn show(&self, viewer: &Viewer, view: &InventoryView) -> MenuResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_size() {
        for lines in 1..=MAX_LINES {
            assert!(validate_size(lines * ROW_WIDTH).is_ok());
        }
        assert!(validate_size(0).is_err());
        assert!(validate_size(10).is_err());
        assert!(validate_size(63).is_err());
    }

    #[test]
    fn test_view_validation() {
        let mut view = InventoryView::empty(18, None);
        assert!(view.validate().is_ok());
        assert_eq!(view.filled_slots(), 0);

        view.slots.pop();
        assert!(matches!(view.validate(), Err(MenuError::InvalidView { .. })));
    }
}

//! Error types shared by every menu operation
//!
//! All checks run before any state is touched, so an `Err` from this crate
//! always means the inventory, registry and viewer sets are unchanged.

use crate::viewer::ViewerId;

/// Result type for menu operations
pub type MenuResult<T> = Result<T, MenuError>;

/// Errors that can occur while building, opening or routing inventories
#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    #[error("Slot {slot} is outside an inventory of size {size}")]
    InvalidSlot { slot: usize, size: usize },

    #[error("Inventory size {size} must be a multiple of 9 between 9 and 54")]
    InvalidSize { size: usize },

    #[error("Line count {lines} must be between 1 and 6")]
    InvalidLineCount { lines: usize },

    #[error("Row {row} is outside the inventory")]
    InvalidRow { row: usize },

    #[error("Column {column} is outside the inventory")]
    InvalidColumn { column: usize },

    #[error("Slot {slot} already holds a button")]
    DuplicateButton { slot: usize },

    #[error("Viewer {viewer} is not available")]
    ViewerMissing { viewer: ViewerId },

    #[error("Render sink failed: {message}")]
    RenderFailed { message: String },

    #[error("Rendered view is invalid: {message}")]
    InvalidView { message: String },

    #[error("Invalid menu configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Create a render failure
pub fn render_error(error: impl std::fmt::Display) -> MenuError {
    MenuError::RenderFailed {
        message: error.to_string(),
    }
}

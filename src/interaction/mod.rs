//! # Interaction Module
//!
//! The pick-select-highlight-focus state machine that turns mouse input
//! into scene interactions.
//!
//! ## Behavior
//!
//! A primary-button click while idle is resolved through the
//! [`picking`](crate::gfx::picking) service to the nearest mesh under the
//! cursor, checked against the inherited selectability flags, and walked up
//! to its top-level unit. Depending on the unit, the click either:
//!
//! - flips a designated light's visibility (the *toggle unit*),
//! - selects, highlights, and focuses, additionally opening the info panel
//!   (the *info unit*), or
//! - selects, highlights, and focuses (everything else).
//!
//! Focusing moves the camera's orbit target to the unit's bounding-box
//! center, eases the field-of-view toward the zoom value, and locks manual
//! rotate/pan until released. Wheel input or dismissing the info panel
//! releases: highlight removed, selection cleared, camera targets reset.
//!
//! ## State
//!
//! Everything lives in one [`SelectionController`] per scene — selection,
//! the material side-table, the picker cache — so multiple viewers can run
//! side by side.

pub mod controller;
pub mod highlight;

// Re-export main types
pub use controller::{
    ClickOutcome, ControllerConfig, FocusState, SelectionController, WORLD_CENTER,
};
pub use highlight::HighlightTable;

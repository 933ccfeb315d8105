//! # User Interface Module
//!
//! The viewer's UI surface is a single overlay: the info panel shown when
//! the designated info unit is focused. The panel here is only the model —
//! visibility, content, and a dismissal signal — drawn by whatever UI layer
//! the host pairs with its render backend.
//!
//! Dismissing the panel is equivalent to wheel input: the application shell
//! polls [`InfoPanel::take_dismissed`] every frame and routes it into the
//! same release transition.

pub mod panel;

// Re-export main types
pub use panel::InfoPanel;

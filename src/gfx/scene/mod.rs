//! # Scene Management Module
//!
//! This module provides 3D scene management: an arena-backed node hierarchy
//! with parent back-links, lights, and centralized material storage.
//!
//! ## Key Components
//!
//! - [`Scene`] - The main scene container that manages the node arena, lights, and materials
//! - [`Node`] - Individual hierarchy nodes with transforms, optional meshes, and selectability
//! - [`NodeId`] - Stable arena handle used to reference nodes from side-tables
//! - [`Light`] - Named light sources whose visibility the interaction layer can flip
//!
//! ## Hierarchy Rules
//!
//! Top-level nodes are the *selectable units* that click interactions resolve
//! to. The [`Selectable`] flag is a tri-state inherited downward: an explicit
//! `No` anywhere on the ancestor chain makes the whole subtree unpickable,
//! while `Unset` defaults to selectable. Parent links are back-references for
//! traversal only; the arena owns every node.

pub mod light;
pub mod node;
pub mod scene;

// Re-export main types
pub use light::{Light, LightKind};
pub use node::{Mesh, Node, NodeId, Selectable};
pub use scene::Scene;

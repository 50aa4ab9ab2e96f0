//! Node identity.
//!
//! Every node in the container tree (root, outputs, workspaces, containers, views) lives in one
//! generation-checked arena and is addressed by a [`NodeId`]. Using an arena rather than hand
//! rolled indices means a stale id from a node that has since been destroyed and its slot reused
//! fails lookups with [`crate::err::CoreError::StaleNode`] instead of silently aliasing whatever
//! now occupies that slot.

/// A stable identifier for a node in a [`crate::tree::Tree`].
///
/// Copy, cheap to pass around, and meaningless outside the arena that produced it.
pub type NodeId = generational_arena::Index;

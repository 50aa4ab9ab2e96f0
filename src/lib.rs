//! A tiling window manager's layout core: the container tree, its geometry computation, the
//! layout engine that walks it, and the movement/focus-navigation operations built on top.
//!
//! This crate owns none of the actual windowing. It has no idea what X11 or Wayland is; it talks
//! to its host compositor exclusively through the narrow traits in [`compositor`]
//! ([`compositor::CompositorSink`], [`compositor::PanelRegistry`], [`compositor::EventSink`]).
//! Everything else -- IPC, input binding, configuration loading, the actual backend -- lives
//! outside this crate and drives it by constructing a [`tree::Tree`], mutating it through the
//! operations below, and calling [`layout::arrange_windows`] after every change.
//!
//! # Layout
//!
//! A [`tree::Tree`] is a `Root` with one `Output` child per display, each holding one or more
//! `Workspace`s, each holding a tree of `Container`s and `View`s plus an independent floating
//! list. [`tree::Layout`] names how a node arranges its tiled children: `Horiz`/`Vert` split
//! evenly along one axis, `Tabbed`/`Stacked` show one child at a time, and the four `Auto*`
//! variants partition children into a master group and `N` slave groups (see [`group`]).
//!
//! # Navigation
//!
//! [`direction::get_in_direction`] answers "what should be focused next" without touching the
//! tree; [`movement::move_container`] (and its bulk siblings `move_container_to`/
//! `move_workspace_to`) relocate nodes and re-arrange whatever changed.

pub mod compositor;
pub mod config;
pub mod direction;
pub mod err;
pub mod geometry;
pub mod group;
pub mod ids;
pub mod layout;
pub mod movement;
pub mod tree;

pub use compositor::{CompositorSink, EventSink, NullEventSink, PanelRegistry, RenderMask};
pub use config::Config;
pub use direction::{get_in_direction, Direction};
pub use err::CoreError;
pub use geometry::Geometry;
pub use ids::NodeId;
pub use layout::{arrange_windows, default_layout, recursive_resize, Edge};
pub use movement::{move_container, move_container_to, move_workspace_to};
pub use tree::{is_auto_layout, BorderType, Layout, Node, NodeKind, Tree};

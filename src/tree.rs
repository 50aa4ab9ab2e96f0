//! The container tree: node storage and the mutation primitives of §4.A.
//!
//! Nodes live in one generation-checked [`generational_arena::Arena`] regardless of kind (`Root`,
//! `Output`, `Workspace`, `Container`, `View`); a [`NodeKind`]-tagged [`Node`] carries the shared
//! geometry/parent/children header every kind needs, per the data model's design note on
//! heterogeneous children. `parent` and `focused` are lookup links refreshed on every structural
//! mutation, not ownership -- ownership flows top-down from [`Tree::root`].

use generational_arena::Arena;

use crate::config::Config;
use crate::err::{assert_invariant, CoreError};
use crate::geometry::Geometry;
use crate::ids::NodeId;

/// The kind of a node in the tree (invariant 1-2 in the data model).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Root,
    Output,
    Workspace,
    Container,
    View,
}

/// A node's layout: how it arranges its tiled children.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Layout {
    None,
    Horiz,
    Vert,
    Tabbed,
    Stacked,
    AutoLeft,
    AutoRight,
    AutoTop,
    AutoBottom,
}

impl Layout {
    /// `is_auto_layout(layout)` from §6.
    pub fn is_auto(self) -> bool {
        matches!(
            self,
            Layout::AutoLeft | Layout::AutoRight | Layout::AutoTop | Layout::AutoBottom
        )
    }

    /// Whether this auto layout's major axis runs horizontally (master/slave groups arranged
    /// left-to-right) as opposed to vertically (groups stacked top-to-bottom).
    ///
    /// Panics if `self` is not an auto layout; callers should check [`Layout::is_auto`] first.
    pub fn auto_major_axis_is_horizontal(self) -> bool {
        match self {
            Layout::AutoLeft | Layout::AutoRight => true,
            Layout::AutoTop | Layout::AutoBottom => false,
            _ => panic!("auto_major_axis_is_horizontal called on a non-auto layout"),
        }
    }

    /// `true` for `AutoLeft`/`AutoTop`, where the master group leads the major axis; `false` for
    /// `AutoRight`/`AutoBottom`, where it trails.
    pub fn auto_master_leads(self) -> bool {
        matches!(self, Layout::AutoLeft | Layout::AutoTop)
    }

    /// Whether a parent with this layout answers `Left`/`Right` movement and focus requests.
    pub fn answers_horizontal(self) -> bool {
        matches!(self, Layout::Horiz | Layout::Tabbed) || self.is_auto()
    }

    /// Whether a parent with this layout answers `Up`/`Down` movement and focus requests.
    pub fn answers_vertical(self) -> bool {
        matches!(self, Layout::Vert | Layout::Stacked) || self.is_auto()
    }

    /// Whether this layout shows only the focused child (so siblings must be hidden/masked).
    pub fn is_single_visible(self) -> bool {
        matches!(self, Layout::Tabbed | Layout::Stacked)
    }
}

/// `is_auto_layout(layout)`, exposed as a free function to match the external-interfaces list in
/// §6 verbatim.
pub fn is_auto_layout(layout: Layout) -> bool {
    layout.is_auto()
}

/// A node's border rendering policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BorderType {
    None,
    Pixel,
    Normal,
}

impl Default for BorderType {
    fn default() -> Self {
        BorderType::Normal
    }
}

/// A node in the container tree.
///
/// One struct serves every [`NodeKind`]; fields irrelevant to a given kind simply sit unused
/// (e.g. `floating` is only ever populated on a `Workspace`, `nb_master`/`nb_slave_groups` only
/// matter when `layout` is an auto layout). This mirrors the data model's own framing: a tagged
/// variant with a shared geometry/parent header.
#[derive(Debug)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) name: String,
    /// Opaque compositor handle: an output or view id. `None` for `Root`/`Workspace`/`Container`.
    pub(crate) handle: Option<u64>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    /// Only ever non-empty on a `Workspace`.
    pub(crate) floating: Vec<NodeId>,
    pub(crate) focused: Option<NodeId>,

    pub(crate) geometry: Geometry,
    pub(crate) actual_geometry: Geometry,
    pub(crate) border_geometry: Geometry,
    pub(crate) title_bar_geometry: Geometry,
    pub(crate) cached_geometry: Geometry,

    pub(crate) layout: Layout,
    pub(crate) workspace_layout: Layout,
    pub(crate) nb_master: u32,
    pub(crate) nb_slave_groups: u32,

    pub(crate) border_type: BorderType,
    pub(crate) border_thickness: i32,

    pub(crate) fullscreen: bool,
    pub(crate) is_floating: bool,
    pub(crate) visible: bool,
}

impl Node {
    fn new(kind: NodeKind, name: impl Into<String>) -> Self {
        Node {
            kind,
            name: name.into(),
            handle: None,
            parent: None,
            children: Vec::new(),
            floating: Vec::new(),
            focused: None,
            geometry: Geometry::default(),
            actual_geometry: Geometry::default(),
            border_geometry: Geometry::default(),
            title_bar_geometry: Geometry::default(),
            cached_geometry: Geometry::default(),
            layout: Layout::None,
            workspace_layout: Layout::None,
            nb_master: 1,
            nb_slave_groups: 1,
            border_type: BorderType::Normal,
            border_thickness: 2,
            fullscreen: false,
            is_floating: false,
            visible: true,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> Option<u64> {
        self.handle
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn floating(&self) -> &[NodeId] {
        &self.floating
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn actual_geometry(&self) -> Geometry {
        self.actual_geometry
    }

    pub fn border_geometry(&self) -> Geometry {
        self.border_geometry
    }

    pub fn title_bar_geometry(&self) -> Geometry {
        self.title_bar_geometry
    }

    pub fn nb_master(&self) -> u32 {
        self.nb_master
    }

    pub fn nb_slave_groups(&self) -> u32 {
        self.nb_slave_groups
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn workspace_layout(&self) -> Layout {
        self.workspace_layout
    }

    pub fn is_floating(&self) -> bool {
        self.is_floating
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn border_type(&self) -> BorderType {
        self.border_type
    }

    /// Whether this output is the one currently shown to the user (irrelevant for non-`Output`
    /// kinds, which default to visible).
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// The container tree.
///
/// Always has exactly one `Root` node (invariant 1); every other node is reachable from it.
pub struct Tree {
    arena: Arena<Node>,
    root: NodeId,
    /// `config.title_bar_height()` from the most recent `update_geometry`/`arrange` call,
    /// stashed because the floating border path needs it but takes no `Config` of its own.
    font_height_hint: i32,
}

impl Tree {
    /// Create an empty tree: just the `Root` node, with no outputs.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(Node::new(NodeKind::Root, "root"));
        Tree { arena, root, font_height_hint: 18 }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.arena.get(id)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.arena.get_mut(id)
    }

    fn kind_of(&self, id: NodeId) -> Option<NodeKind> {
        self.arena.get(id).map(|n| n.kind)
    }

    // ---- lifecycle -----------------------------------------------------------------------

    /// Create and attach a new `Output` under `Root`, with one freshly synthesized `Workspace`.
    ///
    /// Returns the new output's id.
    pub fn add_output(
        &mut self,
        name: impl Into<String>,
        handle: u64,
        config: &Config,
        events: &mut dyn crate::compositor::EventSink,
    ) -> NodeId {
        let mut output = Node::new(NodeKind::Output, name);
        output.handle = Some(handle);
        let output_id = self.arena.insert(output);

        self.attach_tiled(self.root, output_id);

        self.ensure_workspace(output_id, config, events);
        output_id
    }

    /// Guarantee `output` has at least one workspace, synthesizing one with the next available
    /// name if it currently has none (lifecycle rule in §3: an output never sits empty), and
    /// emitting `workspace("init", ws)` when it does.
    pub fn ensure_workspace(
        &mut self,
        output: NodeId,
        config: &Config,
        events: &mut dyn crate::compositor::EventSink,
    ) -> NodeId {
        if let Some(node) = self.arena.get(output) {
            if let Some(&first) = node.children.first() {
                return first;
            }
        }

        let name = self.next_workspace_name();
        let mut ws = Node::new(NodeKind::Workspace, name.clone());
        ws.layout = config.default_layout;
        ws.workspace_layout = config.default_layout;
        let ws_id = self.arena.insert(ws);
        self.attach_tiled(output, ws_id);
        log::debug!("synthesized workspace {name} on output {output:?}");
        events.workspace_init(&name);
        ws_id
    }

    /// The lowest positive integer not already in use as a workspace name anywhere in the tree.
    fn next_workspace_name(&self) -> String {
        let used: std::collections::HashSet<&str> = self
            .arena
            .iter()
            .filter(|(_, n)| n.kind == NodeKind::Workspace)
            .map(|(_, n)| n.name.as_str())
            .collect();

        let mut candidate = 1u32;
        loop {
            let name = candidate.to_string();
            if !used.contains(name.as_str()) {
                return name;
            }
            candidate += 1;
        }
    }

    /// Create a new, unattached `Container` node with the given layout.
    pub fn new_container(&mut self, layout: Layout) -> NodeId {
        let mut c = Node::new(NodeKind::Container, "container");
        c.layout = layout;
        self.arena.insert(c)
    }

    /// Create a new, unattached `View` node wrapping the given compositor handle.
    pub fn new_view(&mut self, name: impl Into<String>, handle: u64) -> NodeId {
        let mut v = Node::new(NodeKind::View, name);
        v.handle = Some(handle);
        self.arena.insert(v)
    }

    /// Destroy a node. Only valid once it is detached (no parent) and has no children -- callers
    /// are responsible for detaching first, per the lifecycle rule in §3.
    pub fn destroy(&mut self, id: NodeId) -> bool {
        let ok = match self.arena.get(id) {
            Some(n) => n.parent.is_none() && n.children.is_empty() && n.floating.is_empty(),
            None => false,
        };

        if !assert_invariant(ok, "destroy called on an attached or non-empty node") {
            return false;
        }

        self.arena.remove(id);
        true
    }

    // ---- §4.A: tree primitives -------------------------------------------------------------

    /// `add_child(parent, c)`.
    pub fn add_child(&mut self, parent: NodeId, c: NodeId) -> bool {
        let len = match self.arena.get(parent) {
            Some(p) => p.children.len(),
            None => return false,
        };
        self.insert_child(parent, c, len)
    }

    /// `insert_child(parent, c, i)`.
    pub fn insert_child(&mut self, parent: NodeId, c: NodeId, index: usize) -> bool {
        if !assert_invariant(
            self.arena.get(c).map(|n| n.parent.is_none()).unwrap_or(false),
            "insert_child called on an already-attached node",
        ) {
            return false;
        }

        let c = self.maybe_wrap_for_workspace_layout(parent, c);

        let parent_node = match self.arena.get(parent) {
            Some(p) => p,
            None => return false,
        };
        let i = index.min(parent_node.children.len());
        let is_auto = parent_node.layout.is_auto();
        let group_minor_weight = self.fair_share_weight(parent, i);

        if let Some(parent_node) = self.arena.get_mut(parent) {
            parent_node.children.insert(i, c);
            if parent_node.focused.is_none() {
                parent_node.focused = Some(c);
            }
        }
        if let Some(node) = self.arena.get_mut(c) {
            node.parent = Some(parent);
        }

        if is_auto {
            self.rebalance_group_after_insert(parent, i, group_minor_weight);
        }

        true
    }

    /// If `parent` is a `Workspace` whose `workspace_layout` is `Tabbed`/`Stacked` and `c` is a
    /// bare `View`, wrap it in a fresh `Container` of that layout first, per §4.A.
    fn maybe_wrap_for_workspace_layout(&mut self, parent: NodeId, c: NodeId) -> NodeId {
        let should_wrap = match self.arena.get(parent) {
            Some(p) => {
                p.kind == NodeKind::Workspace
                    && p.workspace_layout.is_single_visible()
                    && self.arena.get(c).map(|n| n.kind == NodeKind::View).unwrap_or(false)
            }
            None => false,
        };

        if !should_wrap {
            return c;
        }

        let layout = self.arena[parent].workspace_layout;
        let wrapper = self.new_container(layout);
        self.attach_tiled(wrapper, c);
        wrapper
    }

    /// Internal helper: attach `c` as the last tiled child of `parent` without any layout-aware
    /// wrapping or rebalancing (used for structural bootstrapping: outputs, workspaces, and
    /// `Tabbed`/`Stacked` wrapper containers).
    fn attach_tiled(&mut self, parent: NodeId, c: NodeId) {
        if let Some(p) = self.arena.get_mut(parent) {
            p.children.push(c);
            if p.focused.is_none() {
                p.focused = Some(c);
            }
        }
        if let Some(node) = self.arena.get_mut(c) {
            node.parent = Some(parent);
        }
    }

    /// `add_floating(ws, c)`.
    pub fn add_floating(&mut self, ws: NodeId, c: NodeId, events: &mut dyn crate::compositor::EventSink) -> bool {
        if !assert_invariant(
            self.kind_of(ws) == Some(NodeKind::Workspace),
            "add_floating called on a non-workspace parent",
        ) {
            return false;
        }

        if let Some(node) = self.arena.get_mut(ws) {
            node.floating.push(c);
        }
        if let Some(node) = self.arena.get_mut(c) {
            node.parent = Some(ws);
            node.is_floating = true;
        }

        if let Some(handle) = self.arena.get(c).and_then(|n| n.handle) {
            events.window_floating(crate::compositor::ViewHandle(handle), true);
        }
        true
    }

    /// `add_sibling(anchor, c)`.
    pub fn add_sibling(&mut self, anchor: NodeId, c: NodeId) -> bool {
        let parent = match self.arena.get(anchor).and_then(|n| n.parent) {
            Some(p) => p,
            None => return false,
        };

        let anchor_floating = self.arena.get(anchor).map(|n| n.is_floating).unwrap_or(false);
        if anchor_floating {
            let ws = self.nearest_workspace(parent);
            return match ws {
                Some(ws) => {
                    let mut sink = crate::compositor::NullEventSink;
                    self.add_floating(ws, c, &mut sink)
                }
                None => false,
            };
        }

        let (is_auto, anchor_index) = match self.arena.get(parent) {
            Some(p) => (p.layout.is_auto(), p.children.iter().position(|&x| x == anchor)),
            None => return false,
        };

        let anchor_index = match anchor_index {
            Some(i) => i,
            None => return false,
        };

        // Non-auto layouts insert right after the anchor; auto layouts always append, per the
        // retained-behavior note in the spec's design notes (Open Question iii).
        if is_auto {
            self.add_child(parent, c)
        } else {
            self.insert_child(parent, c, anchor_index + 1)
        }
    }

    /// `replace_child(old, new)`.
    pub fn replace_child(&mut self, old: NodeId, new: NodeId, sink: &mut dyn crate::compositor::CompositorSink) -> bool {
        let parent = match self.arena.get(old).and_then(|n| n.parent) {
            Some(p) => p,
            None => return false,
        };

        let old_geometry = self.arena.get(old).map(|n| n.geometry).unwrap_or_default();

        let was_focused = self.arena.get(parent).map(|p| p.focused == Some(old)).unwrap_or(false);

        if let Some(p) = self.arena.get_mut(parent) {
            if let Some(slot) = p.children.iter_mut().find(|x| **x == old) {
                *slot = new;
            } else if let Some(slot) = p.floating.iter_mut().find(|x| **x == old) {
                *slot = new;
            } else {
                return false;
            }
            if was_focused {
                p.focused = Some(new);
            }
        }

        let old_kind = self.kind_of(old);
        let old_handle = self.arena.get(old).and_then(|n| n.handle);
        let old_was_floating = self.arena.get(old).map(|n| n.is_floating).unwrap_or(false);

        if let Some(n) = self.arena.get_mut(new) {
            n.parent = Some(parent);
            n.geometry = old_geometry;
            n.is_floating = old_was_floating;
        }
        if let Some(n) = self.arena.get_mut(old) {
            n.parent = None;
            n.geometry = Geometry::default();
        }

        if old_kind == Some(NodeKind::View) {
            if let Some(handle) = old_handle {
                sink.view_set_state(crate::compositor::ViewHandle(handle), crate::compositor::ViewState::Activated, false);
            }
        }

        true
    }

    /// `remove_child(c)`.
    pub fn remove_child(&mut self, c: NodeId) -> bool {
        let parent = match self.arena.get(c).and_then(|n| n.parent) {
            Some(p) => p,
            None => return false,
        };

        let was_floating = self.arena.get(c).map(|n| n.is_floating).unwrap_or(false);

        if was_floating {
            if let Some(p) = self.arena.get_mut(parent) {
                p.floating.retain(|&x| x != c);
                if p.focused == Some(c) {
                    p.focused = p.children.first().copied().or_else(|| p.floating.last().copied());
                }
            }
        } else {
            let (index, is_auto) = match self.arena.get(parent) {
                Some(p) => (p.children.iter().position(|&x| x == c), p.layout.is_auto()),
                None => return false,
            };
            let index = match index {
                Some(i) => i,
                None => {
                    assert_invariant(false, "remove_child called on a node not in its parent's list");
                    return false;
                }
            };

            if let Some(p) = self.arena.get_mut(parent) {
                p.children.remove(index);
                if p.focused == Some(c) {
                    p.focused = if index > 0 {
                        p.children.get(index - 1).copied()
                    } else {
                        p.children.first().copied()
                    };
                }
            }

            if is_auto {
                self.rebalance_group_after_remove(parent, index);
            }
        }

        if let Some(n) = self.arena.get_mut(c) {
            n.parent = None;
            n.is_floating = false;
        }

        true
    }

    /// `swap_container(a, b)`.
    pub fn swap_container(&mut self, a: NodeId, b: NodeId) -> bool {
        if a == b {
            return true;
        }

        let (parent_a, parent_b) = match (
            self.arena.get(a).and_then(|n| n.parent),
            self.arena.get(b).and_then(|n| n.parent),
        ) {
            (Some(pa), Some(pb)) => (pa, pb),
            _ => {
                assert_invariant(false, "swap_container called with an orphaned node");
                return false;
            }
        };

        if !assert_invariant(
            !self.is_ancestor(a, b) && !self.is_ancestor(b, a),
            "swap_container called with one node an ancestor of the other",
        ) {
            return false;
        }

        let geom_a = self.arena.get(a).map(|n| n.geometry).unwrap_or_default();
        let geom_b = self.arena.get(b).map(|n| n.geometry).unwrap_or_default();

        #[derive(Clone, Copy)]
        enum Slot {
            Children(usize),
            Floating(usize),
        }

        fn find_slot(arena: &Arena<Node>, parent: NodeId, node: NodeId) -> Option<Slot> {
            let p = arena.get(parent)?;
            if let Some(i) = p.children.iter().position(|&x| x == node) {
                Some(Slot::Children(i))
            } else if let Some(i) = p.floating.iter().position(|&x| x == node) {
                Some(Slot::Floating(i))
            } else {
                None
            }
        }

        fn write_slot(node: &mut Node, slot: Slot, value: NodeId) {
            match slot {
                Slot::Children(i) => node.children[i] = value,
                Slot::Floating(i) => node.floating[i] = value,
            }
        }

        let (slot_a, slot_b) = (
            find_slot(&self.arena, parent_a, a),
            find_slot(&self.arena, parent_b, b),
        );
        let (slot_a, slot_b) = match (slot_a, slot_b) {
            (Some(sa), Some(sb)) => (sa, sb),
            _ => {
                assert_invariant(false, "swap_container called with a node missing from its parent's list");
                return false;
            }
        };

        if parent_a == parent_b {
            if let Some(p) = self.arena.get_mut(parent_a) {
                write_slot(p, slot_a, b);
                write_slot(p, slot_b, a);
            }
        } else {
            if let Some(p) = self.arena.get_mut(parent_a) {
                write_slot(p, slot_a, b);
            }
            if let Some(p) = self.arena.get_mut(parent_b) {
                write_slot(p, slot_b, a);
            }
        }

        // Rewrite focus: whichever of a/b was focused in its parent is replaced by its
        // counterpart, taking care not to double-swap when a and b share a parent.
        let a_was_focused_in_pa = self.arena.get(parent_a).map(|p| p.focused == Some(a)).unwrap_or(false);
        let b_was_focused_in_pb = self.arena.get(parent_b).map(|p| p.focused == Some(b)).unwrap_or(false);

        if let Some(p) = self.arena.get_mut(parent_a) {
            if a_was_focused_in_pa {
                p.focused = Some(b);
            }
        }
        if let Some(p) = self.arena.get_mut(parent_b) {
            if b_was_focused_in_pb {
                p.focused = Some(a);
            }
        }

        if let (Some(na), Some(nb)) = self.arena.get2_mut(a, b) {
            na.parent = Some(parent_b);
            nb.parent = Some(parent_a);
            na.geometry = geom_b;
            nb.geometry = geom_a;
        }

        true
    }

    // ---- helpers ---------------------------------------------------------------------------

    /// Whether `maybe_ancestor` is an ancestor of `node` (used to reject self-nesting swaps and
    /// moves).
    pub(crate) fn is_ancestor(&self, maybe_ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = self.arena.get(node).and_then(|n| n.parent);
        while let Some(p) = cur {
            if p == maybe_ancestor {
                return true;
            }
            cur = self.arena.get(p).and_then(|n| n.parent);
        }
        false
    }

    /// The nearest `Workspace` ancestor of `id` (or `id` itself if it is one).
    pub(crate) fn nearest_workspace(&self, id: NodeId) -> Option<NodeId> {
        let mut cur = Some(id);
        while let Some(n) = cur {
            if self.kind_of(n) == Some(NodeKind::Workspace) {
                return Some(n);
            }
            cur = self.arena.get(n).and_then(|node| node.parent);
        }
        None
    }

    /// The nearest `Output` ancestor of `id`.
    pub(crate) fn nearest_output(&self, id: NodeId) -> Option<NodeId> {
        let mut cur = Some(id);
        while let Some(n) = cur {
            if self.kind_of(n) == Some(NodeKind::Output) {
                return Some(n);
            }
            cur = self.arena.get(n).and_then(|node| node.parent);
        }
        None
    }

    pub fn resolve(&self, id: NodeId) -> Result<&Node, CoreError> {
        self.arena.get(id).ok_or(CoreError::StaleNode(id))
    }

    pub(crate) fn major_weight(&self, id: NodeId, horizontal_major: bool) -> i32 {
        self.arena
            .get(id)
            .map(|n| if horizontal_major { n.geometry.w } else { n.geometry.h })
            .unwrap_or(0)
    }

    fn fair_share_weight(&self, parent: NodeId, index: usize) -> i32 {
        let _ = index;
        // A fair starting budget for a newly inserted auto-layout sibling: an even split of
        // whatever minor-axis extent the parent currently occupies, refined once the group it
        // lands in is known (`rebalance_group_after_insert`).
        self.arena.get(parent).map(|n| {
            let count = (n.children.len() + 1).max(1) as i32;
            if n.layout.is_auto() && n.layout.auto_major_axis_is_horizontal() {
                n.geometry.h / count
            } else {
                n.geometry.w / count
            }
        }).unwrap_or(0)
    }

    /// Best-effort implementation of §4.A's insertion rebalance: the newcomer is budgeted a fair
    /// share of its group's minor-axis extent, and the group's first child absorbs whatever is
    /// left after every other member (including the newcomer) takes its existing share. This
    /// keeps `Σ group minor extents` stable across the insertion so the very next `arrange` does
    /// not have to invent geometry for the new child out of thin air.
    fn rebalance_group_after_insert(&mut self, parent: NodeId, inserted_index: usize, fair_share: i32) {
        let (counts, master_pos, horizontal_major, n) = match self.auto_layout_context(parent) {
            Some(ctx) => ctx,
            None => return,
        };

        let gidx = match crate::group::group_index(n, counts, master_pos, inserted_index) {
            Some(g) => g,
            None => return,
        };
        let (start, end) = match crate::group::group_bounds(n, counts, master_pos, gidx) {
            Some(bounds) => bounds,
            None => return,
        };

        let children = match self.arena.get(parent) {
            Some(p) => p.children.clone(),
            None => return,
        };
        let group_minor_total: i32 = children[start..end]
            .iter()
            .map(|&c| self.minor_weight(c, horizontal_major))
            .sum();

        if let Some(new_node) = self.arena.get_mut(children[inserted_index]) {
            self.set_minor_weight_on(new_node, horizontal_major, fair_share);
        }

        let first = children[start];
        let rest_sum: i32 = children[start..end]
            .iter()
            .filter(|&&c| c != first)
            .map(|&c| self.minor_weight(c, horizontal_major))
            .sum();
        let first_share = (group_minor_total + fair_share - rest_sum).max(0);
        if let Some(first_node) = self.arena.get_mut(first) {
            self.set_minor_weight_on(first_node, horizontal_major, first_share);
        }
    }

    /// Best-effort implementation of §4.A's removal rebalance: the left boundary of each
    /// affected group inherits the major-axis extent freed up, and the last child of each
    /// non-terminal group absorbs the remaining minor-axis pixels.
    fn rebalance_group_after_remove(&mut self, parent: NodeId, removed_index: usize) {
        let (counts, master_pos, horizontal_major, n) = match self.auto_layout_context(parent) {
            Some(ctx) => ctx,
            None => return,
        };

        if n == 0 {
            return;
        }

        let probe_index = removed_index.min(n - 1);
        let gidx = match crate::group::group_index(n, counts, master_pos, probe_index) {
            Some(g) => g,
            None => return,
        };
        let group_count = counts.group_count();
        let (start, end) = match crate::group::group_bounds(n, counts, master_pos, gidx) {
            Some(bounds) => bounds,
            None => return,
        };

        let children = match self.arena.get(parent) {
            Some(p) => p.children.clone(),
            None => return,
        };
        if children.is_empty() || start >= end {
            return;
        }

        let first = children[start];
        let first_weight = self.minor_weight(first, horizontal_major);
        if let Some(first_node) = self.arena.get_mut(first) {
            self.set_minor_weight_on(first_node, horizontal_major, first_weight);
        }

        if gidx + 1 < group_count {
            let last = children[end - 1];
            let parent_minor = self.arena.get(parent).map(|p| {
                if horizontal_major { p.geometry.h } else { p.geometry.w }
            }).unwrap_or(0);
            let others: i32 = children[start..end - 1]
                .iter()
                .map(|&c| self.minor_weight(c, horizontal_major))
                .sum();
            let last_share = (parent_minor - others).max(0);
            if let Some(last_node) = self.arena.get_mut(last) {
                self.set_minor_weight_on(last_node, horizontal_major, last_share);
            }
        }
    }

    fn auto_layout_context(&self, parent: NodeId) -> Option<(crate::group::GroupCounts, crate::group::MasterPosition, bool, usize)> {
        let node = self.arena.get(parent)?;
        if !node.layout.is_auto() {
            return None;
        }
        let n = node.children.len();
        let counts = crate::group::GroupCounts::new(n, node.nb_master, node.nb_slave_groups);
        let master_pos = if node.layout.auto_master_leads() {
            crate::group::MasterPosition::First
        } else {
            crate::group::MasterPosition::Last
        };
        let horizontal_major = node.layout.auto_major_axis_is_horizontal();
        Some((counts, master_pos, horizontal_major, n))
    }

    fn minor_weight(&self, id: NodeId, horizontal_major: bool) -> i32 {
        self.arena.get(id).map(|n| if horizontal_major { n.geometry.h } else { n.geometry.w }).unwrap_or(0)
    }

    fn set_minor_weight_on(&self, node: &mut Node, horizontal_major: bool, value: i32) {
        if horizontal_major {
            node.geometry.h = value;
        } else {
            node.geometry.w = value;
        }
    }

    // ---- mutators exposed to the rest of the WM --------------------------------------------
    //
    // `Node`'s fields are `pub(crate)` so the arena stays the only place that touches them
    // directly; these narrow setters are the public surface the layout engine, movement, and
    // directional lookup modules (and any external caller) mutate the tree through.

    /// Set a node's logical `(x, y, w, h)`. Most callers go through `arrange` instead; this is
    /// for bootstrapping an `Output`'s position (arrange only ever recomputes its *size* from
    /// `output_resolution`, never its position in the compositor's global space) and for tests.
    pub fn set_geometry(&mut self, id: NodeId, geometry: Geometry) -> bool {
        match self.arena.get_mut(id) {
            Some(n) => {
                n.geometry = geometry;
                true
            }
            None => false,
        }
    }

    pub fn set_layout(&mut self, id: NodeId, layout: Layout) -> bool {
        let prev_layout = match self.arena.get_mut(id) {
            Some(n) => {
                let prev = n.layout;
                n.layout = layout;
                prev
            }
            None => return false,
        };
        self.update_layout_geometry(id, prev_layout);
        true
    }

    /// Cache or restore children's tiled geometry across a `Tabbed`/`Stacked` transition, mirroring
    /// sway's `update_layout_geometry`: entering `Tabbed`/`Stacked` from something else stashes each
    /// child's current rectangle away, since the tabbed pass is about to collapse them all onto the
    /// same rectangle; leaving it restores whatever was stashed, so a parent that cycles back to
    /// `Horiz`/`Vert` doesn't inherit the tabbed rectangle for every child.
    fn update_layout_geometry(&mut self, parent: NodeId, prev_layout: Layout) {
        let layout = match self.arena.get(parent) {
            Some(n) => n.layout,
            None => return,
        };
        if layout.is_single_visible() == prev_layout.is_single_visible() {
            return;
        }
        let children = match self.arena.get(parent) {
            Some(n) => n.children.clone(),
            None => return,
        };

        if layout.is_single_visible() {
            for c in children {
                let geometry = self.arena.get(c).map(|n| n.geometry).unwrap_or_default();
                self.set_cached_geometry(c, geometry);
            }
        } else {
            for c in children {
                let cached = self.cached_geometry(c);
                if cached != Geometry::default() {
                    if let Some(n) = self.arena.get_mut(c) {
                        n.geometry = cached;
                    }
                }
            }
        }
    }

    pub fn set_workspace_layout(&mut self, id: NodeId, layout: Layout) -> bool {
        match self.arena.get_mut(id) {
            Some(n) if n.kind == NodeKind::Workspace => {
                n.workspace_layout = layout;
                true
            }
            _ => false,
        }
    }

    /// Set the raw `nb_master`/`nb_slave_groups` auto-layout parameters (invariant 6 clamps
    /// them against the live child count whenever the group algebra actually runs).
    pub fn set_auto_params(&mut self, id: NodeId, nb_master: u32, nb_slave_groups: u32) -> bool {
        match self.arena.get_mut(id) {
            Some(n) => {
                n.nb_master = nb_master;
                n.nb_slave_groups = nb_slave_groups.max(1);
                true
            }
            None => false,
        }
    }

    pub fn set_border(&mut self, id: NodeId, border_type: BorderType, thickness: i32) -> bool {
        match self.arena.get_mut(id) {
            Some(n) => {
                n.border_type = border_type;
                n.border_thickness = thickness;
                true
            }
            None => false,
        }
    }

    /// Set or clear the fullscreen flag. Per invariant 8, setting it clears fullscreen on any
    /// other view in the same workspace first.
    pub fn set_fullscreen(&mut self, id: NodeId, fullscreen: bool) -> bool {
        if fullscreen {
            if let Some(ws) = self.nearest_workspace(id) {
                if let Some(existing) = self.fullscreen_view_in_workspace(ws) {
                    if existing != id {
                        if let Some(n) = self.arena.get_mut(existing) {
                            n.fullscreen = false;
                        }
                    }
                }
            }
        }
        match self.arena.get_mut(id) {
            Some(n) => {
                n.fullscreen = fullscreen;
                true
            }
            None => false,
        }
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> bool {
        match self.arena.get_mut(id) {
            Some(n) => {
                n.visible = visible;
                true
            }
            None => false,
        }
    }

    pub(crate) fn cached_geometry(&self, id: NodeId) -> Geometry {
        self.arena.get(id).map(|n| n.cached_geometry).unwrap_or_default()
    }

    pub(crate) fn set_cached_geometry(&mut self, id: NodeId, geometry: Geometry) {
        if let Some(n) = self.arena.get_mut(id) {
            n.cached_geometry = geometry;
        }
    }

    /// The single fullscreen `View` within `ws`'s subtree (tiled or floating), if any (invariant
    /// 8: at most one).
    pub fn fullscreen_view_in_workspace(&self, ws: NodeId) -> Option<NodeId> {
        fn walk(arena: &Arena<Node>, id: NodeId) -> Option<NodeId> {
            let n = arena.get(id)?;
            if n.kind == NodeKind::View && n.fullscreen {
                return Some(id);
            }
            for &c in &n.children {
                if let Some(found) = walk(arena, c) {
                    return Some(found);
                }
            }
            None
        }

        let n = self.arena.get(ws)?;
        if n.kind != NodeKind::Workspace {
            return None;
        }
        for &c in &n.children {
            if let Some(found) = walk(&self.arena, c) {
                return Some(found);
            }
        }
        for &c in &n.floating {
            if self.arena.get(c).map(|v| v.fullscreen).unwrap_or(false) {
                return Some(c);
            }
        }
        None
    }

    /// Whether `id`'s immediate parent is a `Tabbed`/`Stacked` container -- the gap step of
    /// `update_geometry` (§4.C step 2) is skipped for such children since their spacing is
    /// already accounted for by the title bar inset.
    pub(crate) fn parent_is_single_visible(&self, id: NodeId) -> bool {
        self.arena
            .get(id)
            .and_then(|n| n.parent)
            .and_then(|p| self.arena.get(p))
            .map(|p| p.layout.is_single_visible())
            .unwrap_or(false)
    }

    /// The first (inclusive) `Output` ancestor's `Root`-relative geometry, used to clamp a
    /// node's origin (§4.C step 1) and as the bound for `update_gap_geometry`.
    /// Make `id` the focused path all the way to the root: every ancestor's `focused` becomes the
    /// child on the path to `id`. Used after a structural move so the moved node stays focused.
    pub(crate) fn refocus_path(&mut self, id: NodeId) {
        let mut child = id;
        while let Some(parent) = self.arena.get(child).and_then(|n| n.parent) {
            if let Some(p) = self.arena.get_mut(parent) {
                p.focused = Some(child);
            }
            child = parent;
        }
    }

    pub(crate) fn output_geometry(&self, id: NodeId) -> Geometry {
        self.nearest_output(id)
            .and_then(|o| self.arena.get(o))
            .map(|o| o.geometry)
            .unwrap_or_default()
    }

    // ---- §4.C geometry computation ----------------------------------------------------------

    /// The effective gap for `c`: `0` while floating (floating geometry uses the border policy
    /// instead), otherwise the configured gap rounded down to even.
    fn swayc_gap(&self, id: NodeId, config: &Config) -> i32 {
        if self.arena.get(id).map(|n| n.is_floating).unwrap_or(false) {
            0
        } else {
            config.effective_gap()
        }
    }

    /// Inset `geometry` by the container's gap, honoring `edge_gaps`/`smart_gaps`, per
    /// `update_gap_geometry` in the original implementation. Returns the gap actually applied
    /// (used downstream to decide whether `hide_edge_borders` still suppresses a border).
    fn update_gap_geometry(&self, id: NodeId, config: &Config, ws: NodeId, node_geom: Geometry) -> (Geometry, i32) {
        let op_geom = self.output_geometry(id);
        let ws_geom = self.arena.get(ws).map(|n| n.geometry).unwrap_or_default();
        let gap = self.swayc_gap(id, config);
        let half = gap / 2;

        let mut g = Geometry {
            x: (node_geom.x + half).min(op_geom.w - 1),
            y: (node_geom.y + half).min(op_geom.h - 1),
            w: (node_geom.w - gap).max(1),
            h: (node_geom.h - gap).max(1),
        };

        let single_child = self.arena.get(ws).map(|n| n.children.len() == 1).unwrap_or(false);
        if (!config.edge_gaps && gap > 0) || (config.smart_gaps && single_child) {
            if node_geom.x - gap <= ws_geom.x {
                g.x = ws_geom.x;
                g.w = node_geom.w - half;
            }
            if node_geom.y - gap <= ws_geom.y {
                g.y = ws_geom.y;
                g.h = node_geom.h - half;
            }
            if node_geom.x + node_geom.w + gap >= ws_geom.x + ws_geom.w {
                g.w = ws_geom.x + ws_geom.w - g.x;
            }
            if node_geom.y + node_geom.h + gap >= ws_geom.y + ws_geom.h {
                g.h = ws_geom.y + ws_geom.h - g.y;
            }
        }

        (g, gap)
    }

    /// Floating-view border allocation: `B_NONE`/`B_PIXEL`/`B_NORMAL`, clamped to the output,
    /// per `update_border_geometry_floating`.
    fn update_border_geometry_floating(&mut self, id: NodeId, geometry: Geometry) {
        let op_geom = self.output_geometry(id);
        let (border_type, thickness) = self
            .arena
            .get(id)
            .map(|n| (n.border_type, n.border_thickness))
            .unwrap_or((BorderType::None, 0));

        let mut g = geometry;
        let mut title_bar = Geometry::default();

        match border_type {
            BorderType::None => {}
            BorderType::Pixel => {
                g = adjust_border_geometry(g, op_geom, thickness, thickness, thickness, thickness);
            }
            BorderType::Normal => {
                let title_h = self.title_bar_height(id);
                g = adjust_border_geometry(g, op_geom, thickness, thickness, title_h, thickness);
                title_bar = Geometry::new(geometry.x - thickness, geometry.y - title_h, geometry.w + 2 * thickness, title_h);
            }
        }

        if let Some(n) = self.arena.get_mut(id) {
            n.actual_geometry = g;
            n.border_geometry = g;
            n.title_bar_geometry = title_bar;
        }
    }

    /// `font_height + 4`, stashed from the `Config` passed to the most recent `update_geometry`
    /// call (the floating border path doesn't take a `Config` of its own).
    fn title_bar_height(&self, _id: NodeId) -> i32 {
        self.font_height_hint
    }

    /// `update_geometry(container)`: the single entry point that turns a node's logical
    /// `(x,y,w,h)` into compositor-ready `actual_geometry`/`border_geometry`/`title_bar_geometry`,
    /// and pushes the result to the view sink. Only meaningful for `View`/`Container` nodes.
    pub fn update_geometry(&mut self, id: NodeId, config: &Config, sink: &mut dyn crate::compositor::CompositorSink) {
        self.font_height_hint = config.title_bar_height();

        let (kind, is_floating, node_geom) = match self.arena.get(id) {
            Some(n) => (n.kind, n.is_floating, n.geometry),
            None => return,
        };
        if kind != NodeKind::View && kind != NodeKind::Container {
            return;
        }

        let ws = match self.nearest_workspace(id) {
            Some(ws) => ws,
            None => return,
        };
        let op_geom = self.output_geometry(id);

        let mut geometry = Geometry {
            x: node_geom.x.min((op_geom.w - 1).max(0)),
            y: node_geom.y.min((op_geom.h - 1).max(0)),
            w: node_geom.w,
            h: node_geom.h,
        };

        let mut gap = 0;
        if !is_floating && !self.parent_is_single_visible(id) {
            let (gapped, applied) = self.update_gap_geometry(id, config, ws, node_geom);
            geometry = gapped;
            gap = applied;
        }

        let is_fullscreen = self.arena.get(id).map(|n| n.fullscreen).unwrap_or(false);
        let handle = self.arena.get(id).and_then(|n| n.handle);

        if is_fullscreen {
            geometry = Geometry::new(0, 0, op_geom.w, op_geom.h);
            if let Some(n) = self.arena.get_mut(id) {
                n.actual_geometry = geometry;
                n.border_geometry = Geometry::default();
                n.title_bar_geometry = Geometry::default();
            }
            let ws_focused = self
                .nearest_output(ws)
                .and_then(|op| self.arena.get(op))
                .map(|op| op.focused == Some(ws))
                .unwrap_or(false);
            if ws_focused {
                if let Some(h) = handle {
                    sink.view_bring_to_front(crate::compositor::ViewHandle(h));
                }
            }
        } else if is_floating {
            self.update_border_geometry_floating(id, geometry);
            geometry = self.arena.get(id).map(|n| n.actual_geometry).unwrap_or(geometry);
        } else {
            geometry = self.update_tiled_border_geometry(id, config, ws, geometry, gap);
        }

        if kind == NodeKind::View {
            if let Some(h) = handle {
                sink.view_set_geometry(crate::compositor::ViewHandle(h), geometry);
            }
        }
    }

    /// The tiled (non-floating, non-fullscreen) branch of `update_geometry`: edge-border
    /// suppression, then the Tabbed/Stacked title-bar case or the plain single-border case.
    fn update_tiled_border_geometry(&mut self, id: NodeId, config: &Config, ws: NodeId, geometry: Geometry, gap: i32) -> Geometry {
        if let Some(n) = self.arena.get_mut(id) {
            n.border_geometry = geometry;
        }

        let thickness = self.arena.get(id).map(|n| n.border_thickness).unwrap_or(0);
        let (mut bl, mut bt, mut br, mut bb) = (thickness, thickness, thickness, thickness);

        let ws_geom = self.arena.get(ws).map(|n| n.geometry).unwrap_or_default();
        let single_child = self.arena.get(ws).map(|n| n.children.len() == 1).unwrap_or(false);

        if config.hide_edge_borders != crate::config::HideEdgeBorders::None
            && (gap <= 0 || (config.smart_gaps && single_child))
        {
            use crate::config::HideEdgeBorders::*;
            if matches!(config.hide_edge_borders, Vertical | Both) {
                if geometry.x == ws_geom.x {
                    bl = 0;
                }
                if geometry.x + geometry.w == ws_geom.x + ws_geom.w {
                    br = 0;
                }
            }
            if matches!(config.hide_edge_borders, Horizontal | Both) {
                if geometry.y == ws_geom.y {
                    bt = 0;
                }
                if geometry.y + geometry.h == ws_geom.y + ws_geom.h {
                    bb = 0;
                }
            }
            if matches!(config.hide_edge_borders, Smart) && single_child {
                bl = 0;
                bt = 0;
                br = 0;
                bb = 0;
            }
        }

        let title_h = config.title_bar_height();
        let parent = self.arena.get(id).and_then(|n| n.parent);
        let parent_layout = parent.and_then(|p| self.arena.get(p)).map(|p| p.layout);
        let siblings = parent.and_then(|p| self.arena.get(p)).map(|p| p.children.clone()).unwrap_or_default();
        let sibling_count = siblings.len();

        let (content, title_bar) = match parent_layout {
            Some(Layout::Tabbed) if sibling_count > 1 => {
                let idx = siblings.iter().position(|&c| c == id).unwrap_or(0);
                let n = sibling_count as i32;
                let w = geometry.w / n;
                let r = geometry.w % n;
                let x = w * idx as i32;
                let this_w = if idx as i32 == n - 1 { w + r } else { w };
                let title_bar = Geometry::new(geometry.x + x, geometry.y, this_w, title_h);
                let content = Geometry::new(geometry.x + bl, geometry.y + title_h, (geometry.w - bl - br).max(0), (geometry.h - bb - title_h).max(0));
                (content, title_bar)
            }
            Some(Layout::Stacked) if sibling_count > 1 => {
                let idx = siblings.iter().position(|&c| c == id).unwrap_or(0);
                let y = title_h * idx as i32;
                let title_bar = Geometry::new(geometry.x, geometry.y + y, geometry.w, title_h);
                let stack_h = title_h * sibling_count as i32;
                let content = Geometry::new(geometry.x + bl, geometry.y + stack_h, (geometry.w - bl - br).max(0), (geometry.h - bb - stack_h).max(0));
                (content, title_bar)
            }
            _ => {
                let border_type = self.arena.get(id).map(|n| n.border_type).unwrap_or(BorderType::None);
                match border_type {
                    BorderType::None => (geometry, Geometry::default()),
                    BorderType::Pixel => {
                        let content = Geometry::new(geometry.x + bl, geometry.y + bt, (geometry.w - bl - br).max(0), (geometry.h - bt - bb).max(0));
                        (content, Geometry::default())
                    }
                    BorderType::Normal => {
                        let title_bar = Geometry::new(geometry.x, geometry.y, geometry.w, title_h);
                        let content = Geometry::new(geometry.x + bl, geometry.y + title_h, (geometry.w - bl - br).max(0), (geometry.h - bb - title_h).max(0));
                        (content, title_bar)
                    }
                }
            }
        };

        if let Some(n) = self.arena.get_mut(id) {
            n.actual_geometry = content;
            n.title_bar_geometry = title_bar;
        }

        content
    }
}

/// `adjust_border_geometry`: inset a rectangle by independent per-side border thicknesses,
/// clamping against the output's resolution. Mirrors the original implementation verbatim,
/// including Open Question (i) in the spec's design notes: the height branch below compares
/// `origin.y + size.h - top > res.h`, which looks like it should read `- bottom`; preserved
/// as-is since the spec says not to guess at a fix without a recorded decision (none is).
fn adjust_border_geometry(mut g: Geometry, res: Geometry, left: i32, right: i32, top: i32, bottom: i32) -> Geometry {
    g.w += left + right;
    if g.x - left < 0 {
        g.w += g.x - left;
    } else if g.x + g.w - right > res.w {
        g.w = res.w - g.x + right;
    }

    g.h += top + bottom;
    if g.y - top < 0 {
        g.h += g.y - top;
    } else if g.y + g.h - top > res.h {
        g.h = res.h - g.y + top;
    }

    g.x = (g.x - left).max(0).min(res.w);
    g.y = (g.y - top).max(0).min(res.h);
    g
}

impl Default for Tree {
    fn default() -> Self {
        Tree::new()
    }
}

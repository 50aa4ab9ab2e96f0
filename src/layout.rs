//! The layout engine: §4.D's `arrange_windows`, the per-layout sub-arrangements it dispatches to,
//! and the two named supplements (`recursive_resize`, `default_layout`).
//!
//! Recursion is top-down: a node's own geometry is fixed first, then its children's, so every
//! level only ever divides the rectangle its parent just handed it. Nothing here talks to the
//! compositor directly except through [`CompositorSink`]/[`PanelRegistry`] -- the same boundary
//! `update_geometry` already draws in `tree.rs`.

use crate::compositor::{CompositorSink, OutputHandle, PanelPosition, PanelRegistry, RenderMask, ViewHandle};
use crate::config::Config;
use crate::geometry::{scale_factor, split_weighted, Geometry, COLLAPSE_GUARD_THRESHOLD};
use crate::group::{self, GroupCounts, MasterPosition};
use crate::ids::NodeId;
use crate::tree::{BorderType, Layout, NodeKind, Tree};

/// The edge an interactive resize drags, per `recursive_resize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

/// `arrange_windows(node, w, h)`: recompute geometry for `node` and its whole subtree, using the
/// given `(w, h)` or, if either is negative, the node's own current extent.
pub fn arrange_windows(
    tree: &mut Tree,
    node: NodeId,
    w: i32,
    h: i32,
    config: &Config,
    panels: &dyn PanelRegistry,
    sink: &mut dyn CompositorSink,
) {
    let (kind, existing) = match tree.node(node) {
        Some(n) => (n.kind(), n.geometry()),
        None => return,
    };
    let (w, h) = if w < 0 || h < 0 { (existing.w, existing.h) } else { (w, h) };

    match kind {
        NodeKind::Root => {
            let children = tree.node(node).map(|n| n.children().to_vec()).unwrap_or_default();
            for output in children {
                arrange_windows(tree, output, -1, -1, config, panels, sink);
            }
        }
        NodeKind::Output => arrange_output(tree, node, config, panels, sink),
        NodeKind::Workspace => arrange_workspace(tree, node, config, panels, sink),
        NodeKind::Container => arrange_container(tree, node, w, h, config, panels, sink),
        NodeKind::View => arrange_view(tree, node, w, h, config, sink),
    }
}

fn arrange_output(tree: &mut Tree, id: NodeId, config: &Config, panels: &dyn PanelRegistry, sink: &mut dyn CompositorSink) {
    let handle = tree.node(id).and_then(|n| n.handle());
    if let Some(handle) = handle {
        let (rw, rh) = sink.output_resolution(OutputHandle(handle));
        let g = tree.node(id).map(|n| n.geometry()).unwrap_or_default();
        tree.set_geometry(id, Geometry::new(g.x, g.y, rw, rh));
    }

    let children = tree.node(id).map(|n| n.children().to_vec()).unwrap_or_default();
    for ws in children {
        arrange_windows(tree, ws, -1, -1, config, panels, sink);
    }
}

/// A workspace always renders in its output's local coordinate space starting at `(0, 0)`; the
/// output's own `(x, y)` is only ever used for cross-output adjacency, never added in here.
fn arrange_workspace(tree: &mut Tree, id: NodeId, config: &Config, panels: &dyn PanelRegistry, sink: &mut dyn CompositorSink) {
    let output = match tree.nearest_output(id) {
        Some(o) => o,
        None => return,
    };
    let (out_geom, out_handle) = match tree.node(output) {
        Some(n) => (n.geometry(), n.handle()),
        None => return,
    };

    let mut x = 0;
    let mut y = 0;
    let mut w = out_geom.w;
    let mut h = out_geom.h;

    if let Some(handle) = out_handle {
        for panel in panels.panels_for(OutputHandle(handle)) {
            let (pw, ph) = panels.surface_size(panel.surface);
            match panel.position {
                PanelPosition::Top => {
                    y += ph;
                    h -= ph;
                }
                PanelPosition::Bottom => h -= ph,
                PanelPosition::Left => {
                    x += pw;
                    w -= pw;
                }
                PanelPosition::Right => w -= pw,
            }
        }
    }

    let gap = config.effective_gap();
    x += gap;
    y += gap;
    w = (w - 2 * gap).max(0);
    h = (h - 2 * gap).max(0);

    tree.set_geometry(id, Geometry::new(x, y, w, h));
    dispatch_layout(tree, id, x, y, w, h, config, panels, sink);
    arrange_floating(tree, id, config, sink);
}

fn arrange_container(
    tree: &mut Tree,
    id: NodeId,
    w: i32,
    h: i32,
    config: &Config,
    panels: &dyn PanelRegistry,
    sink: &mut dyn CompositorSink,
) {
    let (existing, parent, layout) = match tree.node(id) {
        Some(n) => (n.geometry(), n.parent(), n.layout()),
        None => return,
    };
    tree.set_geometry(id, Geometry::new(existing.x, existing.y, w, h));

    let mut x = existing.x;
    let mut y = existing.y;
    let mut cw = w;
    let mut ch = h;

    let parent_is_workspace = parent.and_then(|p| tree.node(p)).map(|p| p.kind() == NodeKind::Workspace).unwrap_or(false);

    // A top-level Tabbed/Stacked container under a workspace gets its own border/title rect
    // computed first; its children then arrange inside that, not the bare workspace rectangle.
    if parent_is_workspace && layout.is_single_visible() {
        tree.update_geometry(id, config, sink);
        let bg = tree.node(id).map(|n| n.border_geometry()).unwrap_or_default();
        x = bg.x;
        y = bg.y;
        cw = bg.w;
        ch = bg.h;
    }

    // A direct child of a Tabbed/Stacked container (that isn't itself the workspace's direct
    // child handled above) inherits its parent's actual (content) rectangle.
    if let Some((p_kind, p_layout, pg)) =
        parent.and_then(|p| tree.node(p)).map(|p| (p.kind(), p.layout(), p.actual_geometry()))
    {
        if p_kind != NodeKind::Workspace && p_layout.is_single_visible() {
            tree.set_geometry(id, pg);
            tree.update_geometry(id, config, sink);
            let ag = tree.node(id).map(|n| n.actual_geometry()).unwrap_or_default();
            x = ag.x;
            y = ag.y;
            cw = ag.w;
            ch = ag.h;
        }
    }

    dispatch_layout(tree, id, x, y, cw, ch, config, panels, sink);
}

fn arrange_view(tree: &mut Tree, id: NodeId, w: i32, h: i32, config: &Config, sink: &mut dyn CompositorSink) {
    let existing = match tree.node(id) {
        Some(n) => n.geometry(),
        None => return,
    };
    tree.set_geometry(id, Geometry::new(existing.x, existing.y, w, h));
    tree.update_geometry(id, config, sink);

    let handle = match tree.node(id).and_then(|n| n.handle()) {
        Some(h) => h,
        None => return,
    };

    // VISIBLE combines two independent reasons a view might be hidden: its output isn't the
    // one currently shown, or it sits behind the focused sibling of a Tabbed/Stacked parent.
    let output_visible = tree.nearest_output(id).and_then(|op| tree.node(op)).map(|n| n.is_visible()).unwrap_or(true);
    let hidden_behind_tab = tree
        .node(id)
        .and_then(|n| n.parent())
        .and_then(|p| tree.node(p))
        .map(|parent| parent.layout().is_single_visible() && parent.focused() != Some(id))
        .unwrap_or(false);

    let (is_fullscreen, is_floating) =
        tree.node(id).map(|n| (n.is_fullscreen(), n.is_floating())).unwrap_or((false, false));

    let mut mask = RenderMask::empty();
    if output_visible && !hidden_behind_tab {
        mask |= RenderMask::VISIBLE;
    }
    if is_fullscreen {
        mask |= RenderMask::FULLSCREEN;
    }
    if is_floating {
        mask |= RenderMask::FLOATING;
    }
    sink.view_set_mask(ViewHandle(handle), mask);
}

fn arrange_floating(tree: &mut Tree, ws: NodeId, config: &Config, sink: &mut dyn CompositorSink) {
    let (floating, focused) = match tree.node(ws) {
        Some(n) => (n.floating().to_vec(), n.focused()),
        None => return,
    };
    let focused_is_fullscreen = focused
        .and_then(|f| tree.node(f))
        .map(|n| n.is_fullscreen())
        .unwrap_or(false);

    for view in floating {
        if tree.node(view).map(|n| n.kind() == NodeKind::View).unwrap_or(false) {
            tree.update_geometry(view, config, sink);
            if let Some((handle, is_fullscreen)) = tree.node(view).map(|n| (n.handle(), n.is_fullscreen())) {
                if let Some(handle) = handle {
                    if is_fullscreen || !focused_is_fullscreen {
                        sink.view_bring_to_front(ViewHandle(handle));
                    }
                }
            }
        }
    }
}

fn dispatch_layout(
    tree: &mut Tree,
    parent: NodeId,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    config: &Config,
    panels: &dyn PanelRegistry,
    sink: &mut dyn CompositorSink,
) {
    let (layout, n) = match tree.node(parent) {
        Some(node) => (node.layout(), node.children().len()),
        None => return,
    };

    match layout {
        Layout::None => {}
        Layout::Horiz => apply_linear(tree, parent, x, y, w, h, 0, n, true, config, panels, sink),
        Layout::Vert => apply_linear(tree, parent, x, y, w, h, 0, n, false, config, panels, sink),
        Layout::Tabbed | Layout::Stacked => apply_tabbed_or_stacked(tree, parent, x, y, w, h, config, panels, sink),
        _ if layout.is_auto() => apply_auto(tree, parent, x, y, w, h, config, panels, sink),
        _ => {}
    }
}

/// `apply_horiz_layout`/`apply_vert_layout` generalized over axis: seed each child's weight from
/// its current extent along the major axis, split proportionally (remainder to the last child),
/// and recurse. Skips the sub-arrangement entirely if the resulting scale would fall at or below
/// the collapse-guard threshold.
fn apply_linear(
    tree: &mut Tree,
    parent: NodeId,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    start: usize,
    end: usize,
    horizontal: bool,
    config: &Config,
    panels: &dyn PanelRegistry,
    sink: &mut dyn CompositorSink,
) {
    let children: Vec<NodeId> = match tree.node(parent) {
        Some(n) => n.children()[start..end].to_vec(),
        None => return,
    };
    if children.is_empty() {
        return;
    }

    let major = if horizontal { w } else { h };
    let weights: Vec<i32> = children
        .iter()
        .map(|&c| {
            let g = tree.node(c).map(|n| n.geometry()).unwrap_or_default();
            if horizontal { g.w } else { g.h }
        })
        .collect();

    let positive_sum: i32 = weights.iter().copied().filter(|&v| v > 0).sum();
    if positive_sum > 0 && scale_factor(major, positive_sum) <= COLLAPSE_GUARD_THRESHOLD {
        return;
    }

    let extents = split_weighted(major, &weights);
    let mut cursor = if horizontal { x } else { y };
    for (i, &c) in children.iter().enumerate() {
        let extent = extents[i];
        let (cx, cy, cw, ch) = if horizontal { (cursor, y, extent, h) } else { (x, cursor, w, extent) };
        tree.set_geometry(c, Geometry::new(cx, cy, cw, ch));
        arrange_windows(tree, c, cw, ch, config, panels, sink);
        cursor += extent;
    }
}

/// `apply_tabbed_or_stacked_layout`: every child shares the parent's rectangle; non-focused
/// children arrange first so the focused child's own border computation runs against settled
/// sibling state.
fn apply_tabbed_or_stacked(
    tree: &mut Tree,
    parent: NodeId,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    config: &Config,
    panels: &dyn PanelRegistry,
    sink: &mut dyn CompositorSink,
) {
    let (children, focused) = match tree.node(parent) {
        Some(n) => (n.children().to_vec(), n.focused()),
        None => return,
    };
    if children.is_empty() {
        return;
    }

    for &c in &children {
        let g = tree.node(c).map(|n| n.geometry()).unwrap_or_default();
        tree.set_geometry(c, Geometry::new(x, y, g.w, g.h));
    }

    for &c in &children {
        if Some(c) != focused {
            arrange_windows(tree, c, w, h, config, panels, sink);
        }
    }
    if let Some(f) = focused {
        if children.contains(&f) {
            arrange_windows(tree, f, w, h, config, panels, sink);
        }
    }
}

/// `apply_auto_layout`: partition children into master/slave groups via the group algebra, scale
/// group extents along the major axis (last group absorbs the remainder), then run the minor-axis
/// sub-arrangement (`Vert` for a horizontal major axis, `Horiz` for a vertical one) within each.
fn apply_auto(
    tree: &mut Tree,
    parent: NodeId,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    config: &Config,
    panels: &dyn PanelRegistry,
    sink: &mut dyn CompositorSink,
) {
    let (n, nb_master, nb_slave_groups, layout, children) = match tree.node(parent) {
        Some(p) => (p.children().len(), p.nb_master(), p.nb_slave_groups(), p.layout(), p.children().to_vec()),
        None => return,
    };
    if n == 0 {
        return;
    }

    let counts = GroupCounts::new(n, nb_master, nb_slave_groups);
    let master_pos = if layout.auto_master_leads() { MasterPosition::First } else { MasterPosition::Last };
    let horizontal_major = layout.auto_major_axis_is_horizontal();

    let bounds = group::groups(n, counts, master_pos);
    if bounds.is_empty() {
        return;
    }

    let major = if horizontal_major { w } else { h };
    let pos0 = if horizontal_major { x } else { y };

    let mut old_dims = Vec::with_capacity(bounds.len());
    for &(start, _end) in &bounds {
        let first = children[start];
        let mut dim = tree.major_weight(first, horizontal_major);
        if dim <= 0 {
            dim = if bounds.len() > 1 { major / (bounds.len() as i32 - 1).max(1) } else { major };
        }
        old_dims.push(dim.max(1));
    }
    let total: i64 = old_dims.iter().map(|&d| d as i64).sum();
    if total <= 0 {
        return;
    }

    let scale = major as f64 / total as f64;
    if scale <= COLLAPSE_GUARD_THRESHOLD {
        return;
    }

    let last = bounds.len() - 1;
    let mut pos = pos0;
    for (gi, &(start, end)) in bounds.iter().enumerate() {
        let group_dim = if gi == last {
            pos0 + major - pos
        } else {
            ((old_dims[gi] as f64) * scale).floor() as i32
        };

        let (gx, gy, gw, gh) = if horizontal_major { (pos, y, group_dim, h) } else { (x, pos, w, group_dim) };

        if horizontal_major {
            apply_linear(tree, parent, gx, gy, gw, gh, start, end, false, config, panels, sink);
        } else {
            apply_linear(tree, parent, gx, gy, gw, gh, start, end, true, config, panels, sink);
        }

        pos += group_dim;
    }
}

/// `[SUPPLEMENT]` `recursive_resize(container, amount, edge)`: climb from `container` towards the
/// root to the first ancestor whose layout owns `edge`'s axis, nudge the boundary between the
/// child containing `container` and its neighbor on the `edge` side by `amount` pixels (clamped
/// so neither side's extent underflows one pixel), then re-arrange that ancestor. A benign no-op
/// if no such ancestor exists or the relevant child is the lone child of its parent.
///
/// For an auto layout the "neighbor" on the major axis is the adjacent group's leading child
/// (groups, not individual siblings, are what shares that axis); on the minor axis it is the
/// ordinary next/previous sibling within the same group.
pub fn recursive_resize(
    tree: &mut Tree,
    container: NodeId,
    amount: i32,
    edge: Edge,
    config: &Config,
    panels: &dyn PanelRegistry,
    sink: &mut dyn CompositorSink,
) {
    let horizontal = matches!(edge, Edge::Left | Edge::Right);
    let grows_towards_end = matches!(edge, Edge::Right | Edge::Bottom);

    let mut cur = container;
    let ancestor = loop {
        let parent = match tree.node(cur).and_then(|n| n.parent()) {
            Some(p) => p,
            None => return,
        };
        let parent_layout = match tree.node(parent) {
            Some(n) => n.layout(),
            None => return,
        };
        let owns_edge = if parent_layout.is_auto() {
            parent_layout.auto_major_axis_is_horizontal() == horizontal
        } else {
            (horizontal && parent_layout == Layout::Horiz) || (!horizontal && parent_layout == Layout::Vert)
        };
        if owns_edge {
            break parent;
        }
        cur = parent;
    };

    let (siblings, ancestor_layout, nb_master, nb_slave_groups) = match tree.node(ancestor) {
        Some(n) => (n.children().to_vec(), n.layout(), n.nb_master(), n.nb_slave_groups()),
        None => return,
    };
    if siblings.len() < 2 {
        return;
    }
    let idx = match siblings.iter().position(|&c| c == cur) {
        Some(i) => i,
        None => return,
    };

    let (a, b) = if ancestor_layout.is_auto() {
        let n = siblings.len();
        let counts = GroupCounts::new(n, nb_master, nb_slave_groups);
        let master_pos = if ancestor_layout.auto_master_leads() { MasterPosition::First } else { MasterPosition::Last };

        let gidx = match group::group_index(n, counts, master_pos, idx) {
            Some(g) => g,
            None => return,
        };
        let bounds = group::groups(n, counts, master_pos);
        let neighbor_gidx = if grows_towards_end { gidx.checked_add(1) } else { gidx.checked_sub(1) };
        let neighbor_gidx = match neighbor_gidx {
            Some(g) if g < bounds.len() => g,
            _ => return,
        };
        (siblings[bounds[gidx].0], siblings[bounds[neighbor_gidx].0])
    } else {
        let neighbor_idx = if grows_towards_end { idx.checked_add(1) } else { idx.checked_sub(1) };
        let neighbor_idx = match neighbor_idx {
            Some(i) if i < siblings.len() => i,
            _ => return,
        };
        (siblings[idx], siblings[neighbor_idx])
    };

    const MIN_EXTENT: i32 = 1;
    let (a_geom, b_geom) = match (tree.node(a), tree.node(b)) {
        (Some(a), Some(b)) => (a.geometry(), b.geometry()),
        _ => return,
    };
    let a_extent = if horizontal { a_geom.w } else { a_geom.h };
    let b_extent = if horizontal { b_geom.w } else { b_geom.h };

    let delta = amount.clamp(MIN_EXTENT - a_extent, b_extent - MIN_EXTENT);
    if delta == 0 {
        return;
    }

    let mut a_geom = a_geom;
    let mut b_geom = b_geom;
    if horizontal {
        a_geom.w += delta;
        b_geom.w -= delta;
    } else {
        a_geom.h += delta;
        b_geom.h -= delta;
    }
    tree.set_geometry(a, a_geom);
    tree.set_geometry(b, b_geom);

    arrange_windows(tree, ancestor, -1, -1, config, panels, sink);
}

/// `[SUPPLEMENT]` `default_layout(output)`: the layout a freshly synthesized workspace or
/// `Tabbed`/`Stacked` wrapper starts with -- `config.default_layout` if set, otherwise
/// `config.default_orientation` resolved against the output's current aspect ratio.
pub fn default_layout(tree: &Tree, output: NodeId, config: &Config) -> Layout {
    if config.default_layout != Layout::None {
        return config.default_layout;
    }
    let g = tree.node(output).map(|n| n.geometry()).unwrap_or_default();
    config.default_orientation.resolve(g.w, g.h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::{NullEventSink, PanelReservation, SurfaceHandle, ViewState};

    struct RecordingSink {
        geometries: std::collections::HashMap<u64, Geometry>,
        masks: std::collections::HashMap<u64, RenderMask>,
    }

    impl RecordingSink {
        fn new() -> Self {
            RecordingSink { geometries: Default::default(), masks: Default::default() }
        }
    }

    impl CompositorSink for RecordingSink {
        fn output_scaled_size(&self, _output: OutputHandle) -> (i32, i32) {
            (1920, 1080)
        }
        fn output_resolution(&self, _output: OutputHandle) -> (i32, i32) {
            (1920, 1080)
        }
        fn view_set_geometry(&mut self, view: ViewHandle, geometry: Geometry) {
            self.geometries.insert(view.0, geometry);
        }
        fn view_set_state(&mut self, _view: ViewHandle, _state: ViewState, _value: bool) {}
        fn view_set_mask(&mut self, view: ViewHandle, mask: RenderMask) {
            self.masks.insert(view.0, mask);
        }
        fn view_bring_to_front(&mut self, _view: ViewHandle) {}
        fn view_send_to_back(&mut self, _view: ViewHandle) {}
    }

    struct NoPanels;
    impl PanelRegistry for NoPanels {
        fn panels_for(&self, _output: OutputHandle) -> Vec<PanelReservation> {
            Vec::new()
        }
        fn surface_size(&self, _surface: SurfaceHandle) -> (i32, i32) {
            (0, 0)
        }
    }

    fn sample_tree() -> (Tree, NodeId, NodeId) {
        let mut tree = Tree::new();
        let config = Config::default();
        let mut events = NullEventSink;
        let output = tree.add_output("eDP-1", 1, &config, &mut events);
        let ws = tree.ensure_workspace(output, &config, &mut events);
        (tree, output, ws)
    }

    #[test]
    fn scenario_1_horizontal_even_split_of_three_views() {
        let (mut tree, _output, ws) = sample_tree();
        tree.set_layout(ws, Layout::Horiz);
        let views: Vec<_> = (0..3).map(|i| tree.new_view(format!("v{i}"), i)).collect();
        for &v in &views {
            tree.add_child(ws, v);
            tree.set_border(v, BorderType::None, 0);
        }

        let config = Config::default();
        let mut sink = RecordingSink::new();
        arrange_windows(&mut tree, tree.root(), -1, -1, &config, &NoPanels, &mut sink);

        // Border-less views here, so `actual_geometry` reflects the split alone, matching the
        // 640/640/640 widths the scenario describes.
        let widths: Vec<i32> = views.iter().map(|&v| tree.node(v).unwrap().actual_geometry().w).collect();
        assert_eq!(widths.iter().sum::<i32>(), tree.node(ws).unwrap().geometry().w);
        assert_eq!(widths[0], widths[1]);
    }

    #[test]
    fn fullscreen_view_covers_the_whole_output() {
        let (mut tree, output, ws) = sample_tree();
        tree.set_layout(ws, Layout::Horiz);
        let a = tree.new_view("a", 1);
        let b = tree.new_view("b", 2);
        tree.add_child(ws, a);
        tree.add_child(ws, b);
        tree.set_fullscreen(a, true);

        let config = Config::default();
        let mut sink = RecordingSink::new();
        arrange_windows(&mut tree, tree.root(), -1, -1, &config, &NoPanels, &mut sink);

        let out_geom = tree.node(output).unwrap().geometry();
        assert_eq!(tree.node(a).unwrap().actual_geometry(), Geometry::new(0, 0, out_geom.w, out_geom.h));
    }

    #[test]
    fn tabbed_children_share_the_same_rectangle() {
        let (mut tree, _output, ws) = sample_tree();
        tree.set_layout(ws, Layout::Tabbed);
        let a = tree.new_view("a", 1);
        let b = tree.new_view("b", 2);
        tree.add_child(ws, a);
        tree.add_child(ws, b);

        let config = Config::default();
        let mut sink = RecordingSink::new();
        arrange_windows(&mut tree, tree.root(), -1, -1, &config, &NoPanels, &mut sink);

        let ga = tree.node(a).unwrap().geometry();
        let gb = tree.node(b).unwrap().geometry();
        assert_eq!((ga.x, ga.y, ga.w, ga.h), (gb.x, gb.y, gb.w, gb.h));
        // Only the focused (most-recently-added) child's mask should be VISIBLE.
        assert!(sink.masks[&2].contains(RenderMask::VISIBLE));
        assert!(!sink.masks[&1].contains(RenderMask::VISIBLE));
    }

    #[test]
    fn scenario_3_auto_layout_partitions_children_into_groups() {
        let (mut tree, _output, ws) = sample_tree();
        tree.set_layout(ws, Layout::AutoLeft);
        tree.set_auto_params(ws, 2, 3);
        let views: Vec<_> = (0..7).map(|i| tree.new_view(format!("v{i}"), i)).collect();
        for &v in &views {
            tree.add_child(ws, v);
        }

        let config = Config::default();
        let mut sink = RecordingSink::new();
        arrange_windows(&mut tree, tree.root(), -1, -1, &config, &NoPanels, &mut sink);

        let ws_geom = tree.node(ws).unwrap().geometry();
        // master group (views 0, 1) sits on the left: it should be narrower than the total width
        // and every master child should share the same x origin.
        let x0 = tree.node(views[0]).unwrap().geometry().x;
        let x1 = tree.node(views[1]).unwrap().geometry().x;
        assert_eq!(x0, x1);
        assert!(x0 < ws_geom.x + ws_geom.w);
    }

    #[test]
    fn recursive_resize_shrinks_the_neighbor_by_the_same_amount() {
        let (mut tree, _output, ws) = sample_tree();
        tree.set_layout(ws, Layout::Horiz);
        let a = tree.new_view("a", 1);
        let b = tree.new_view("b", 2);
        tree.add_child(ws, a);
        tree.add_child(ws, b);

        let config = Config::default();
        let mut sink = RecordingSink::new();
        arrange_windows(&mut tree, tree.root(), -1, -1, &config, &NoPanels, &mut sink);

        let total_before = tree.node(a).unwrap().geometry().w + tree.node(b).unwrap().geometry().w;
        recursive_resize(&mut tree, a, 50, Edge::Right, &config, &NoPanels, &mut sink);
        let total_after = tree.node(a).unwrap().geometry().w + tree.node(b).unwrap().geometry().w;

        assert_eq!(total_before, total_after);
        assert_eq!(tree.node(a).unwrap().geometry().w, total_before / 2 + 50);
    }

    #[test]
    fn recursive_resize_is_a_no_op_for_a_lone_child() {
        let (mut tree, _output, ws) = sample_tree();
        tree.set_layout(ws, Layout::Horiz);
        let a = tree.new_view("a", 1);
        tree.add_child(ws, a);

        let config = Config::default();
        let mut sink = RecordingSink::new();
        arrange_windows(&mut tree, tree.root(), -1, -1, &config, &NoPanels, &mut sink);

        let before = tree.node(a).unwrap().geometry();
        recursive_resize(&mut tree, a, 200, Edge::Right, &config, &NoPanels, &mut sink);
        assert_eq!(tree.node(a).unwrap().geometry(), before);
    }

    #[test]
    fn default_layout_follows_orientation_when_unset() {
        let (mut tree, output, _ws) = sample_tree();
        tree.set_geometry(output, Geometry::new(0, 0, 1920, 1080));
        let mut config = Config::default();
        config.default_layout = Layout::None;
        assert_eq!(default_layout(&tree, output, &config), Layout::Horiz);

        tree.set_geometry(output, Geometry::new(0, 0, 1080, 1920));
        assert_eq!(default_layout(&tree, output, &config), Layout::Vert);
    }
}

//! Container and workspace movement.
//!
//! `move_container` relocates a single tiled or floating node one step in a direction;
//! `move_container_to`/`move_workspace_to` are bulk relocations used by "send to workspace N" /
//! "send to output" style commands. All three share the same detach/attach/re-arrange discipline:
//! remove from the old parent, attach to the new one, re-arrange whatever changed, then refocus
//! the moved node and emit a "move" event.

use crate::compositor::{CompositorSink, EventSink, NullEventSink, ViewHandle};
use crate::config::Config;
use crate::direction::{adjacent_output, Direction};
use crate::err::assert_invariant;
use crate::geometry::Geometry;
use crate::ids::NodeId;
use crate::layout::arrange_windows;
use crate::compositor::PanelRegistry;
use crate::tree::{Layout, NodeKind, Tree};

/// Move `c` one step in `dir`. For a floating node, `Left`/`Right`/`Up`/`Down` translate it by
/// `amount` pixels (clamped to its output); every other direction is a no-op on a floating node.
/// For a tiled node this climbs the tree per §4.E.
pub fn move_container(
    tree: &mut Tree,
    c: NodeId,
    dir: Direction,
    amount: i32,
    config: &Config,
    panels: &dyn PanelRegistry,
    sink: &mut dyn CompositorSink,
    events: &mut dyn EventSink,
) {
    let is_floating = tree.node(c).map(|n| n.is_floating()).unwrap_or(false);

    if is_floating {
        move_floating(tree, c, dir, amount, config, sink, events);
        return;
    }

    match dir {
        Direction::MoveFirst => move_first(tree, c, config, panels, sink, events),
        Direction::Left | Direction::Right | Direction::Up | Direction::Down | Direction::Next | Direction::Prev => {
            move_tiled(tree, c, dir, config, panels, sink, events)
        }
        Direction::Parent | Direction::Child => {}
    }
}

fn move_floating(
    tree: &mut Tree,
    c: NodeId,
    dir: Direction,
    amount: i32,
    config: &Config,
    sink: &mut dyn CompositorSink,
    events: &mut dyn EventSink,
) {
    let (dx, dy) = match dir {
        Direction::Left => (-amount, 0),
        Direction::Right => (amount, 0),
        Direction::Up => (0, -amount),
        Direction::Down => (0, amount),
        _ => return,
    };

    let g = match tree.node(c) {
        Some(n) => n.geometry(),
        None => return,
    };
    let op_geom = tree.output_geometry(c);
    let new_x = (g.x + dx).clamp(0, (op_geom.w - g.w).max(0));
    let new_y = (g.y + dy).clamp(0, (op_geom.h - g.h).max(0));

    tree.set_geometry(c, Geometry::new(new_x, new_y, g.w, g.h));
    tree.update_geometry(c, config, sink);
    notify_moved(tree, c, events);
}

fn move_first(
    tree: &mut Tree,
    c: NodeId,
    config: &Config,
    panels: &dyn PanelRegistry,
    sink: &mut dyn CompositorSink,
    events: &mut dyn EventSink,
) {
    let Some(parent) = tree.node(c).and_then(|n| n.parent()) else { return };
    if !tree.node(parent).map(|n| n.layout().is_auto()).unwrap_or(false) {
        return;
    }
    let Some(first) = tree.node(parent).and_then(|n| n.children().first().copied()) else { return };
    if first == c {
        return;
    }

    tree.swap_container(c, first);

    if let Some(grandparent) = tree.node(parent).and_then(|n| n.parent()) {
        arrange_windows(tree, grandparent, -1, -1, config, panels, sink);
    }
    tree.refocus_path(c);
    notify_moved(tree, c, events);
}

fn move_tiled(
    tree: &mut Tree,
    c: NodeId,
    dir: Direction,
    config: &Config,
    panels: &dyn PanelRegistry,
    sink: &mut dyn CompositorSink,
    events: &mut dyn EventSink,
) {
    let mut moving = c;

    loop {
        let Some(parent) = tree.node(moving).and_then(|n| n.parent()) else { return };
        let Some((parent_kind, parent_layout, siblings)) =
            tree.node(parent).map(|n| (n.kind(), n.layout(), n.children().to_vec()))
        else {
            return;
        };

        if axis_matches(parent_layout, dir) {
            let n = siblings.len();
            let Some(idx) = siblings.iter().position(|&x| x == moving) else { return };

            let target_idx = match dir {
                Direction::Next => Some((idx + 1) % n),
                Direction::Prev => Some((idx + n - 1) % n),
                Direction::Left | Direction::Up => idx.checked_sub(1),
                Direction::Right | Direction::Down => (idx + 1 < n).then_some(idx + 1),
                _ => None,
            };

            if let Some(target_idx) = target_idx {
                relocate(tree, parent, moving, siblings[target_idx], target_idx, dir, config, panels, sink);
                tree.refocus_path(c);
                notify_moved(tree, c, events);
                return;
            }

            if parent_kind == NodeKind::Workspace {
                if try_move_to_adjacent_output(tree, parent, moving, dir, config, panels, sink, events) {
                    tree.refocus_path(c);
                    notify_moved(tree, c, events);
                }
                return;
            }

            moving = parent;
            continue;
        }

        if parent_kind == NodeKind::Workspace {
            if try_move_to_adjacent_output(tree, parent, moving, dir, config, panels, sink, events) {
                tree.refocus_path(c);
                notify_moved(tree, c, events);
                return;
            }
            if let Some(desired) = axis_layout_for(dir) {
                if wrap_workspace_contents(tree, parent, desired) {
                    continue;
                }
            }
            return;
        }

        if siblings.len() == 1 {
            if let Some(desired) = axis_layout_for(dir) {
                tree.set_layout(parent, desired);
            }
        }

        moving = parent;
    }
}

/// Whether a parent's layout owns the axis `dir` moves along. `Next`/`Prev` match any
/// Container/Workspace parent (the only kinds reachable here).
fn axis_matches(layout: Layout, dir: Direction) -> bool {
    match dir {
        Direction::Left | Direction::Right => layout.answers_horizontal(),
        Direction::Up | Direction::Down => layout.answers_vertical(),
        Direction::Next | Direction::Prev => true,
        _ => false,
    }
}

fn axis_layout_for(dir: Direction) -> Option<Layout> {
    match dir {
        Direction::Left | Direction::Right => Some(Layout::Horiz),
        Direction::Up | Direction::Down => Some(Layout::Vert),
        _ => None,
    }
}

/// Swap `moving` into `target`'s slot (index `target_idx`) within `parent`, descending into
/// `target` first if it is itself a `Container`. Destroys `parent` if the move leaves it empty.
fn relocate(
    tree: &mut Tree,
    parent: NodeId,
    moving: NodeId,
    target: NodeId,
    target_idx: usize,
    dir: Direction,
    config: &Config,
    panels: &dyn PanelRegistry,
    sink: &mut dyn CompositorSink,
) {
    let Some((target_kind, target_layout)) = tree.node(target).map(|n| (n.kind(), n.layout())) else {
        return;
    };
    if target_kind == NodeKind::Container {
        tree.remove_child(moving);
        tree.set_geometry(moving, Geometry::default());

        if axis_matches(target_layout, dir) {
            let at_end = matches!(dir, Direction::Left | Direction::Up | Direction::Prev);
            let insert_at =
                if at_end { tree.node(target).map(|n| n.children().len()).unwrap_or(0) } else { 0 };
            tree.insert_child(target, moving, insert_at);
        } else if let Some(focused) = tree.node(target).and_then(|n| n.focused()) {
            tree.add_sibling(focused, moving);
        } else {
            tree.add_child(target, moving);
        }
    } else {
        tree.remove_child(moving);
        tree.insert_child(parent, moving, target_idx);
    }

    if tree.node(parent).map(|n| n.children().is_empty()).unwrap_or(true) {
        if let Some(grandparent) = tree.node(parent).and_then(|n| n.parent()) {
            tree.remove_child(parent);
            tree.destroy(parent);
            arrange_windows(tree, grandparent, -1, -1, config, panels, sink);
            return;
        }
    }
    arrange_windows(tree, parent, -1, -1, config, panels, sink);
}

/// Wrap all of `ws`'s tiled children into one new `Container` of `desired` layout, so the next
/// pass through the climbing loop finds a parent whose layout matches. No-op (returns `false`)
/// if `ws` has fewer than two children, since wrapping a single child achieves nothing.
fn wrap_workspace_contents(tree: &mut Tree, ws: NodeId, desired: Layout) -> bool {
    let children = tree.node(ws).map(|n| n.children().to_vec()).unwrap_or_default();
    if children.len() <= 1 {
        return false;
    }

    let wrapper = tree.new_container(desired);
    for child in children {
        tree.remove_child(child);
        tree.add_child(wrapper, child);
    }
    tree.add_child(ws, wrapper)
}

/// Relocate `moving` from workspace `ws` to the adjacent output's focused workspace, per §4.E:
/// `add_child` for `Left`/`Up`, `insert_child(0)` for `Right`/`Down`. Returns whether an adjacent
/// output existed.
fn try_move_to_adjacent_output(
    tree: &mut Tree,
    ws: NodeId,
    moving: NodeId,
    dir: Direction,
    config: &Config,
    panels: &dyn PanelRegistry,
    sink: &mut dyn CompositorSink,
    events: &mut dyn EventSink,
) -> bool {
    let Some(output) = tree.nearest_output(ws) else { return false };
    let Some(target_output) = adjacent_output(tree, output, dir) else { return false };
    let dest_ws = tree.ensure_workspace(target_output, config, events);

    tree.remove_child(moving);
    tree.set_geometry(moving, Geometry::default());

    let attached = match dir {
        Direction::Left | Direction::Up => tree.add_child(dest_ws, moving),
        _ => tree.insert_child(dest_ws, moving, 0),
    };
    assert_invariant(attached, "failed to attach moved container to adjacent output's workspace");

    arrange_windows(tree, output, -1, -1, config, panels, sink);
    arrange_windows(tree, target_output, -1, -1, config, panels, sink);
    true
}

fn notify_moved(tree: &Tree, c: NodeId, events: &mut dyn EventSink) {
    if let Some(handle) = tree.node(c).and_then(|n| n.handle()) {
        events.window_moved(ViewHandle(handle));
    }
}

/// Relocate `c` (tiled or floating) directly under `dst`, re-arranging both the old and new
/// outputs. Used by "move to workspace"/"move to output" style commands rather than single-step
/// directional movement.
pub fn move_container_to(
    tree: &mut Tree,
    c: NodeId,
    dst: NodeId,
    config: &Config,
    panels: &dyn PanelRegistry,
    sink: &mut dyn CompositorSink,
    events: &mut dyn EventSink,
) {
    if c == dst || tree.is_ancestor(c, dst) {
        return;
    }
    let Some(src_parent) = tree.node(c).and_then(|n| n.parent()) else { return };
    if src_parent == dst {
        return;
    }

    let is_floating = tree.node(c).map(|n| n.is_floating()).unwrap_or(false);
    let dst_is_workspace = tree.node(dst).map(|n| n.kind() == NodeKind::Workspace).unwrap_or(false);

    tree.remove_child(c);
    tree.set_geometry(c, Geometry::default());

    let attached = if is_floating && dst_is_workspace {
        let mut discard = NullEventSink;
        tree.add_floating(dst, c, &mut discard)
    } else {
        tree.add_child(dst, c)
    };
    if !assert_invariant(attached, "move_container_to failed to attach to destination") {
        return;
    }

    if let Some(old_output) = tree.nearest_output(src_parent) {
        arrange_windows(tree, old_output, -1, -1, config, panels, sink);
    }
    if let Some(new_output) = tree.nearest_output(dst) {
        arrange_windows(tree, new_output, -1, -1, config, panels, sink);
    }

    tree.refocus_path(c);
    notify_moved(tree, c, events);
}

/// Relocate an entire workspace to a different output. If this empties its source output of
/// workspaces, a fresh one is synthesized there so the output is never left without one.
pub fn move_workspace_to(
    tree: &mut Tree,
    ws: NodeId,
    dst_output: NodeId,
    config: &Config,
    panels: &dyn PanelRegistry,
    sink: &mut dyn CompositorSink,
    events: &mut dyn EventSink,
) {
    let Some(src_output) = tree.node(ws).and_then(|n| n.parent()) else { return };
    if src_output == dst_output {
        return;
    }

    tree.remove_child(ws);
    tree.add_child(dst_output, ws);
    tree.ensure_workspace(src_output, config, events);

    arrange_windows(tree, src_output, -1, -1, config, panels, sink);
    arrange_windows(tree, dst_output, -1, -1, config, panels, sink);
}

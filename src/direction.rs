//! Directional focus lookup.
//!
//! `get_in_direction` answers "what should receive focus if the user presses left/right/up/down
//! (or next/prev/parent/child) from here". It never mutates the tree; it only walks it. The hard
//! part is the climb: a press that can't be satisfied by the immediate parent has to keep
//! ascending through containers, skip straight to output adjacency for fullscreen views, and
//! remember a wrap candidate in case `force_focus_wrapping` is set.

use crate::config::Config;
use crate::err::assert_invariant;
use crate::group::{self, GroupCounts, MasterPosition};
use crate::ids::NodeId;
use crate::tree::{Layout, NodeKind, Tree};

/// A focus-movement request. `MoveFirst` only has meaning for [`crate::movement::move_container`]
/// and is never produced by [`get_in_direction`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
    Next,
    Prev,
    Parent,
    Child,
    MoveFirst,
}

/// Resolve a directional focus request from `c`, or `None` if there is nowhere to go.
pub fn get_in_direction(tree: &Tree, c: NodeId, dir: Direction, config: &Config) -> Option<NodeId> {
    match dir {
        Direction::Child => return tree.node(c)?.focused(),
        Direction::Parent => {
            let parent = tree.node(c)?.parent()?;
            return if tree.node(parent).map(|n| n.kind() == NodeKind::Output).unwrap_or(false) {
                None
            } else {
                Some(parent)
            };
        }
        Direction::Next | Direction::Prev => return cyclic_sibling(tree, c, dir),
        Direction::MoveFirst => return None,
        _ => {}
    }

    if tree.node(c).map(|n| n.kind() == NodeKind::Workspace).unwrap_or(false) {
        if let Some(fullscreen) = tree.fullscreen_view_in_workspace(c) {
            return Some(fullscreen);
        }
    }
    if tree.node(c).map(|n| n.is_fullscreen()).unwrap_or(false) {
        let output = tree.nearest_output(c)?;
        return cross_output_entry(tree, output, dir);
    }

    let mut current = c;
    let mut wrap_candidate: Option<NodeId> = None;

    loop {
        let parent = tree.node(current).and_then(|n| n.parent())?;
        let parent_kind = tree.node(parent)?.kind();

        if parent_kind == NodeKind::Output {
            // `current` is itself an Output (we already climbed past its workspace); consult
            // the adjacency oracle.
            return cross_output_entry(tree, current, dir);
        }

        let parent_layout = tree.node(parent)?.layout();
        let axis_matches = match dir {
            Direction::Left | Direction::Right => parent_layout.answers_horizontal(),
            Direction::Up | Direction::Down => parent_layout.answers_vertical(),
            _ => false,
        };

        if axis_matches {
            let idx = tree.node(parent)?.children().iter().position(|&x| x == current)?;

            if let Some(target) = direction_target(tree, parent, parent_layout, idx, dir) {
                return Some(descend_to_focus(tree, target));
            }

            if wrap_candidate.is_none() {
                wrap_candidate = wrap_candidate_at(tree, parent, parent_layout, idx, dir);
            }
            if config.force_focus_wrapping {
                return wrap_candidate.map(|w| descend_to_focus(tree, w));
            }
        }

        current = parent;
    }
}

/// The sibling (or group-mate) directly in `dir` from child `idx` of `parent`, or `None` if
/// that edge of `parent`'s children has been reached.
fn direction_target(tree: &Tree, parent: NodeId, layout: Layout, idx: usize, dir: Direction) -> Option<NodeId> {
    let siblings = tree.node(parent)?.children();
    let n = siblings.len();
    let step: i32 = match dir {
        Direction::Left | Direction::Up => -1,
        _ => 1,
    };

    if !layout.is_auto() {
        let target = idx as i32 + step;
        if target < 0 || target as usize >= n {
            return None;
        }
        return Some(siblings[target as usize]);
    }

    let counts = GroupCounts::new(n, tree.node(parent)?.nb_master(), tree.node(parent)?.nb_slave_groups());
    let master_pos = if layout.auto_master_leads() { MasterPosition::First } else { MasterPosition::Last };
    let horizontal_major = layout.auto_major_axis_is_horizontal();
    let is_major_move = (horizontal_major && matches!(dir, Direction::Left | Direction::Right))
        || (!horizontal_major && matches!(dir, Direction::Up | Direction::Down));

    if is_major_move {
        let gidx = group::group_index(n, counts, master_pos, idx)?;
        let target_g = gidx as i32 + step;
        if target_g < 0 {
            return None;
        }
        let bounds = group::groups(n, counts, master_pos);
        let (start, _) = *bounds.get(target_g as usize)?;
        Some(siblings[start])
    } else {
        let (start, end) = group::group_bounds(n, counts, master_pos, idx)?;
        let target = idx as i32 + step;
        if target < start as i32 || target >= end as i32 {
            return None;
        }
        Some(siblings[target as usize])
    }
}

/// The opposite-end child to remember as a wrap candidate when `direction_target` runs out of
/// room: the other end of the whole child list for a linear layout, or the other end of the
/// relevant group for an auto layout.
fn wrap_candidate_at(tree: &Tree, parent: NodeId, layout: Layout, idx: usize, dir: Direction) -> Option<NodeId> {
    let siblings = tree.node(parent)?.children();
    let n = siblings.len();
    if n == 0 {
        return None;
    }
    let towards_start = matches!(dir, Direction::Left | Direction::Up);

    if !layout.is_auto() {
        return if towards_start { siblings.first().copied() } else { siblings.last().copied() };
    }

    let counts = GroupCounts::new(n, tree.node(parent)?.nb_master(), tree.node(parent)?.nb_slave_groups());
    let master_pos = if layout.auto_master_leads() { MasterPosition::First } else { MasterPosition::Last };
    let horizontal_major = layout.auto_major_axis_is_horizontal();
    let is_major_move = (horizontal_major && matches!(dir, Direction::Left | Direction::Right))
        || (!horizontal_major && matches!(dir, Direction::Up | Direction::Down));
    let bounds = group::groups(n, counts, master_pos);

    if is_major_move {
        let (start, _) = if towards_start { *bounds.first()? } else { *bounds.last()? };
        Some(siblings[start])
    } else {
        let gidx = group::group_index(n, counts, master_pos, idx)?;
        let (start, end) = bounds[gidx];
        Some(siblings[if towards_start { start } else { end - 1 }])
    }
}

/// Cyclic `Next`/`Prev` lookup within `c`'s own sibling list.
fn cyclic_sibling(tree: &Tree, c: NodeId, dir: Direction) -> Option<NodeId> {
    let parent = tree.node(c)?.parent()?;
    let siblings = tree.node(parent)?.children();
    let n = siblings.len();
    if n == 0 {
        return None;
    }
    let idx = siblings.iter().position(|&x| x == c)?;
    let step: i32 = if dir == Direction::Next { 1 } else { -1 };
    let next = (idx as i32 + step).rem_euclid(n as i32) as usize;
    Some(siblings[next])
}

/// Follow a node's own focus chain down to the leaf it ultimately points at (a container's
/// `focused` may itself point at another container).
pub(crate) fn descend_to_focus(tree: &Tree, mut node: NodeId) -> NodeId {
    loop {
        let n = match tree.node(node) {
            Some(n) => n,
            None => return node,
        };
        if n.children().is_empty() {
            return node;
        }
        match n.focused() {
            Some(f) => node = f,
            None => return node,
        }
    }
}

/// Entered once the climb reaches an output's own level: find the adjacent output in `dir` and
/// descend into it per the rule in §4.F (last child for `Left`, first for `Right`, and for
/// `Up`/`Down` the focused view's own vertical neighborhood if it has one).
fn cross_output_entry(tree: &Tree, current_output: NodeId, dir: Direction) -> Option<NodeId> {
    let target_output = adjacent_output(tree, current_output, dir)?;
    let ws = tree.node(target_output)?.focused()?;

    match dir {
        Direction::Left => tree.node(ws)?.children().last().copied().map(|c| descend_to_focus(tree, c)),
        Direction::Right => tree.node(ws)?.children().first().copied().map(|c| descend_to_focus(tree, c)),
        Direction::Up | Direction::Down => {
            let anchor = tree.node(ws)?.focused().unwrap_or(ws);
            let view = descend_to_focus(tree, anchor);
            if let Some(parent) = tree.node(view).and_then(|n| n.parent()) {
                if tree.node(parent)?.layout().answers_vertical() {
                    let siblings = tree.node(parent)?.children();
                    let pick = if dir == Direction::Up { siblings.last() } else { siblings.first() };
                    if let Some(&pick) = pick {
                        return Some(pick);
                    }
                }
            }
            Some(view)
        }
        _ => None,
    }
}

/// The output bordering `output` on side `dir`, nearest first if several outputs share that
/// border. Self-contained geometric adjacency over the tree's own `Output` nodes -- no separate
/// compositor query is needed since every output's global `(x, y, w, h)` already lives in the
/// tree.
pub(crate) fn adjacent_output(tree: &Tree, output: NodeId, dir: Direction) -> Option<NodeId> {
    let og = tree.node(output)?.geometry();
    let root = tree.root();
    let siblings = tree.node(root)?.children();

    let mut best: Option<(NodeId, i32)> = None;
    for &other in siblings {
        if other == output {
            continue;
        }
        let g = match tree.node(other) {
            Some(n) => n.geometry(),
            None => continue,
        };

        let overlaps_perp = match dir {
            Direction::Left | Direction::Right => g.y < og.y + og.h && g.y + g.h > og.y,
            Direction::Up | Direction::Down => g.x < og.x + og.w && g.x + g.w > og.x,
            _ => false,
        };
        if !overlaps_perp {
            continue;
        }

        let (borders, distance) = match dir {
            Direction::Left => (g.x + g.w <= og.x, og.x - (g.x + g.w)),
            Direction::Right => (g.x >= og.x + og.w, g.x - (og.x + og.w)),
            Direction::Up => (g.y + g.h <= og.y, og.y - (g.y + g.h)),
            Direction::Down => (g.y >= og.y + og.h, g.y - (og.y + og.h)),
            _ => (false, 0),
        };
        if !borders {
            continue;
        }

        if best.map(|(_, d)| distance < d).unwrap_or(true) {
            best = Some((other, distance));
        }
    }

    assert_invariant(tree.node(root).map(|n| n.kind() == NodeKind::Root).unwrap_or(false), "adjacent_output called with a corrupt root");
    best.map(|(id, _)| id)
}

//! Property sweeps for the invariants listed in the layout core's design notes, §8 (P1-P7).
//!
//! These build small trees through the public API and check the invariant holds for every
//! generated shape, rather than pinning one hand-picked scenario.

mod support;

use proptest::prelude::*;
use support::{output_and_workspace, NoPanels, RecordingSink};
use tilecore::group::{group_bounds, groups, Bounds, GroupCounts, MasterPosition};
use tilecore::{arrange_windows, get_in_direction, Direction, Layout, NodeKind};

// P1: for every node `n`, `n.parent.children` or `n.parent.floating` contains `n` exactly once.
proptest! {
    #[test]
    fn p1_children_contain_node_exactly_once(n in 1usize..12) {
        let (mut tree, _output, ws) = output_and_workspace();
        tree.set_layout(ws, Layout::Horiz);
        let mut children = Vec::new();
        for i in 0..n {
            let v = tree.new_view(format!("v{i}"), i as u64);
            tree.add_child(ws, v);
            children.push(v);
        }
        for &c in &children {
            let parent = tree.node(c).unwrap().parent().unwrap();
            let count = tree.node(parent).unwrap().children().iter().filter(|&&x| x == c).count();
            prop_assert_eq!(count, 1);
        }
    }
}

// P2: under Horiz (resp. Vert), the children's widths (resp. heights) sum to the parent's,
// to the pixel, after `arrange`.
proptest! {
    #[test]
    fn p2_linear_split_sums_to_parent_exactly(n in 1usize..8, horizontal in any::<bool>()) {
        let (mut tree, output, ws) = output_and_workspace();
        tree.set_layout(ws, if horizontal { Layout::Horiz } else { Layout::Vert });
        let mut children = Vec::new();
        for i in 0..n {
            let v = tree.new_view(format!("v{i}"), i as u64);
            tree.add_child(ws, v);
            children.push(v);
        }

        let panels = NoPanels;
        let mut sink = RecordingSink::default();
        let config = tilecore::Config::default();
        arrange_windows(&mut tree, output, 1920, 1080, &config, &panels, &mut sink);

        let parent_geom = tree.node(ws).unwrap().geometry();
        let sum: i32 = children
            .iter()
            .map(|&c| {
                let g = tree.node(c).unwrap().geometry();
                if horizontal { g.w } else { g.h }
            })
            .sum();
        if horizontal {
            prop_assert_eq!(sum, parent_geom.w);
        } else {
            prop_assert_eq!(sum, parent_geom.h);
        }
    }
}

// P3: group_count = effective-G + (N>0 && effective-M>0); bounds tile [0,N) exactly and
// disjointly, for every (n, master_pos) combination.
proptest! {
    #[test]
    fn p3_auto_group_bounds_partition_the_range(
        n in 0usize..20,
        nb_master in 0u32..5,
        nb_slave_groups in 0u32..6,
        master_last in any::<bool>(),
    ) {
        let counts = GroupCounts::new(n, nb_master, nb_slave_groups);
        let master_pos = if master_last { MasterPosition::Last } else { MasterPosition::First };

        prop_assert_eq!(
            counts.group_count(),
            counts.slave_groups + usize::from(n > 0 && counts.master > 0)
        );

        let all: Vec<Bounds> = groups(n, counts, master_pos);
        prop_assert_eq!(all.len(), counts.group_count());

        // bounds cover [0, n) exactly, disjointly, with no gaps. `all` is in major-axis draw
        // order, not necessarily increasing physical-index order (the master group can be drawn
        // last while still occupying the lowest indices), so sort a copy by `start` first.
        let mut sorted = all.clone();
        sorted.sort_by_key(|&(start, _)| start);
        let mut cursor = 0usize;
        for &(start, end) in &sorted {
            prop_assert_eq!(start, cursor);
            prop_assert!(end >= start);
            cursor = end;
        }
        prop_assert_eq!(cursor, n);

        for g in 0..counts.group_count() {
            prop_assert_eq!(group_bounds(n, counts, master_pos, g), Some(all[g]));
        }
    }
}

// P4: remove_child followed by insert_child at the same index restores the child list exactly,
// provided the parent's layout isn't an auto variant (which would rebalance groups in between).
proptest! {
    #[test]
    fn p4_remove_then_insert_restores_child_list(n in 1usize..10, victim in 0usize..10) {
        let victim = victim % n;
        let (mut tree, _output, ws) = output_and_workspace();
        tree.set_layout(ws, Layout::Horiz);
        let mut children = Vec::new();
        for i in 0..n {
            let v = tree.new_view(format!("v{i}"), i as u64);
            tree.add_child(ws, v);
            children.push(v);
        }

        let before = tree.node(ws).unwrap().children().to_vec();
        let removed = children[victim];
        tree.remove_child(removed);
        tree.insert_child(ws, removed, victim);
        let after = tree.node(ws).unwrap().children().to_vec();
        prop_assert_eq!(before, after);
    }
}

// P5: under a tiled layout, every view's actual_geometry sits inside its workspace's usable
// rectangle.
proptest! {
    #[test]
    fn p5_view_geometry_contained_in_workspace(n in 1usize..8, layout_idx in 0usize..5) {
        let layouts = [Layout::Horiz, Layout::Vert, Layout::Tabbed, Layout::Stacked, Layout::AutoLeft];
        let (mut tree, output, ws) = output_and_workspace();
        tree.set_layout(ws, layouts[layout_idx]);
        let mut children = Vec::new();
        for i in 0..n {
            let v = tree.new_view(format!("v{i}"), i as u64);
            tree.add_child(ws, v);
            children.push(v);
        }

        let panels = NoPanels;
        let mut sink = RecordingSink::default();
        let config = tilecore::Config::default();
        arrange_windows(&mut tree, output, 1920, 1080, &config, &panels, &mut sink);

        let usable = tree.node(ws).unwrap().geometry();
        for &c in &children {
            let g = tree.node(c).unwrap().actual_geometry();
            prop_assert!(g.contained_in(usable), "{:?} not contained in {:?}", g, usable);
        }
    }
}

// P6: swap_container(a, b) applied twice is the identity on the tree and on focus pointers.
proptest! {
    #[test]
    fn p6_double_swap_is_identity(n in 2usize..10, i in 0usize..10, j in 0usize..10) {
        let (mut tree, _output, ws) = output_and_workspace();
        tree.set_layout(ws, Layout::Horiz);
        let mut children = Vec::new();
        for k in 0..n {
            let v = tree.new_view(format!("v{k}"), k as u64);
            tree.add_child(ws, v);
            children.push(v);
        }
        let a = children[i % n];
        let b = children[j % n];

        let before_children = tree.node(ws).unwrap().children().to_vec();
        let before_focus = tree.node(ws).unwrap().focused();

        tree.swap_container(a, b);
        tree.swap_container(a, b);

        let after_children = tree.node(ws).unwrap().children().to_vec();
        let after_focus = tree.node(ws).unwrap().focused();

        prop_assert_eq!(before_children, after_children);
        prop_assert_eq!(before_focus, after_focus);
    }
}

// P7: get_in_direction(c, Next) cycles through every sibling and returns to `c` after
// `|siblings|` steps.
proptest! {
    #[test]
    fn p7_next_cycles_through_every_sibling(n in 2usize..10, start in 0usize..10) {
        let (mut tree, _output, ws) = output_and_workspace();
        tree.set_layout(ws, Layout::Horiz);
        let mut children = Vec::new();
        for k in 0..n {
            let v = tree.new_view(format!("v{k}"), k as u64);
            tree.add_child(ws, v);
            children.push(v);
        }

        let config = tilecore::Config::default();
        let start = children[start % n];
        let mut visited = vec![start];
        let mut cur = start;
        for _ in 0..n {
            cur = get_in_direction(&tree, cur, Direction::Next, &config).expect("sibling exists");
            visited.push(cur);
        }
        prop_assert_eq!(*visited.last().unwrap(), start);
        // every sibling appears exactly once before the cycle closes, i.e. it doesn't skip or
        // repeat early.
        let visited_set: std::collections::HashSet<_> = visited[..n].iter().copied().collect();
        let expected_set: std::collections::HashSet<_> = children.iter().copied().collect();
        prop_assert_eq!(visited_set.len(), n);
        prop_assert_eq!(visited_set, expected_set);
    }
}

#[test]
fn workspace_layout_is_one_of_the_tiled_variants() {
    let (tree, _output, ws) = output_and_workspace();
    assert!(matches!(tree.node(ws).unwrap().kind(), NodeKind::Workspace));
}

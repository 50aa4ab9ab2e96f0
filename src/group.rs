//! The auto-layout grouping algebra.
//!
//! An auto layout (`AutoLeft`, `AutoRight`, `AutoTop`, `AutoBottom`) partitions a container's
//! `N` children into a master group of `M` children and `G` slave groups, laid out along the
//! container's major axis. This module computes that partition deterministically from `(N, M,
//! G)` alone; it holds no state of its own, so the partition is always recomputed rather than
//! cached, and can never drift out of sync with the child list.

/// The effective master/slave-group counts for a container with `n` children, given its
/// configured `nb_master` and `nb_slave_groups` parameters (invariant 6 in the data model).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GroupCounts {
    /// Number of children in the master group (0 if there is no master group).
    pub master: usize,
    /// Number of slave groups (0 if all children are masters, or there are no children).
    pub slave_groups: usize,
}

impl GroupCounts {
    /// Compute the effective counts for `n` children given the raw `nb_master`/`nb_slave_groups`
    /// auto-layout parameters.
    pub fn new(n: usize, nb_master: u32, nb_slave_groups: u32) -> Self {
        let master = (nb_master as usize).min(n);
        let slaves = n - master;
        let slave_groups = if slaves == 0 {
            0
        } else {
            (nb_slave_groups.max(1) as usize).min(slaves)
        };

        GroupCounts { master, slave_groups }
    }

    /// `group_count(c)` from the spec: the master group (if any) plus every slave group.
    pub fn group_count(&self) -> usize {
        self.slave_groups + if self.master > 0 { 1 } else { 0 }
    }
}

/// Whether the master group comes first or last along the major axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MasterPosition {
    /// `AutoLeft` / `AutoTop`: master group first.
    First,
    /// `AutoRight` / `AutoBottom`: master group last.
    Last,
}

/// A contiguous, half-open range of child indices `[start, end)` belonging to one group.
pub type Bounds = (usize, usize);

/// Size of each of the `G` slave groups splitting `slaves` slave children as evenly as possible.
///
/// Returns a prefix of groups sized `floor(slaves/G)` followed by a suffix of groups sized
/// `floor(slaves/G) + 1`, per §4.B. The suffix absorbs the remainder so that later groups (which
/// sit further from the master group when reading left-to-right) are never smaller than earlier
/// ones.
fn slave_group_sizes(slaves: usize, groups: usize) -> Vec<usize> {
    if groups == 0 {
        return Vec::new();
    }

    let base = slaves / groups;
    let remainder = slaves % groups;
    let small_groups = groups - remainder;

    let mut sizes = Vec::with_capacity(groups);
    sizes.extend(std::iter::repeat(base).take(small_groups));
    sizes.extend(std::iter::repeat(base + 1).take(remainder));
    sizes
}

/// Build the full ordered list of group bounds (including the master group, if any) in
/// major-axis order, given the master's position relative to the slave groups.
fn all_group_bounds(n: usize, counts: GroupCounts, master_pos: MasterPosition) -> Vec<Bounds> {
    let slaves = n - counts.master;
    let sizes = slave_group_sizes(slaves, counts.slave_groups);

    // The master group's physical child indices are always `[0, master)`: `master_pos` only
    // changes which major-axis position (the order of this Vec) the master group is drawn at,
    // never which children belong to it.
    let master_bounds = if counts.master > 0 { Some((0, counts.master)) } else { None };

    let mut slave_bounds = Vec::with_capacity(sizes.len());
    let mut cursor = counts.master;
    for size in sizes {
        slave_bounds.push((cursor, cursor + size));
        cursor += size;
    }

    let mut bounds = Vec::with_capacity(counts.group_count());
    match master_pos {
        MasterPosition::First => {
            bounds.extend(master_bounds);
            bounds.extend(slave_bounds);
        }
        MasterPosition::Last => {
            bounds.extend(slave_bounds);
            bounds.extend(master_bounds);
        }
    }

    bounds
}

/// `group_bounds(c, g)`: the `[start, end)` index range of the `g`-th group along the major
/// axis, or `None` if `g` is out of range.
pub fn group_bounds(n: usize, counts: GroupCounts, master_pos: MasterPosition, g: usize) -> Option<Bounds> {
    all_group_bounds(n, counts, master_pos).get(g).copied()
}

/// `group_index(c, i)`: the 0-based major-axis position of the group containing child `i`.
pub fn group_index(n: usize, counts: GroupCounts, master_pos: MasterPosition, i: usize) -> Option<usize> {
    all_group_bounds(n, counts, master_pos)
        .iter()
        .position(|&(start, end)| i >= start && i < end)
}

/// `group_start(c, i)`: the first child index of the group containing child `i`.
pub fn group_start(n: usize, counts: GroupCounts, master_pos: MasterPosition, i: usize) -> Option<usize> {
    all_group_bounds(n, counts, master_pos)
        .into_iter()
        .find(|&(start, end)| i >= start && i < end)
        .map(|(start, _)| start)
}

/// `group_end(c, i)`: one past the last child index of the group containing child `i`.
pub fn group_end(n: usize, counts: GroupCounts, master_pos: MasterPosition, i: usize) -> Option<usize> {
    all_group_bounds(n, counts, master_pos)
        .into_iter()
        .find(|&(start, end)| i >= start && i < end)
        .map(|(_, end)| end)
}

/// All group bounds in major-axis order; the main entry point used by the layout engine to
/// iterate groups when arranging an auto layout.
pub fn groups(n: usize, counts: GroupCounts, master_pos: MasterPosition) -> Vec<Bounds> {
    all_group_bounds(n, counts, master_pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_3_auto_layout_partition() {
        // 7 children, nb_master=2, nb_slave_groups=3.
        let counts = GroupCounts::new(7, 2, 3);
        assert_eq!(counts.master, 2);
        assert_eq!(counts.slave_groups, 3);
        assert_eq!(counts.group_count(), 4);

        let bounds = groups(7, counts, MasterPosition::First);
        assert_eq!(bounds, vec![(0, 2), (2, 3), (3, 5), (5, 7)]);
    }

    #[test]
    fn master_last_keeps_master_physical_indices_but_draws_it_last() {
        // `master_pos` only changes where in the major-axis order the master group is drawn;
        // it never moves which children are masters. The master group's physical indices stay
        // `[0, 2)` regardless, only its position in the returned Vec moves to the end.
        let counts = GroupCounts::new(7, 2, 3);
        let bounds = groups(7, counts, MasterPosition::Last);
        assert_eq!(bounds, vec![(2, 3), (3, 5), (5, 7), (0, 2)]);
    }

    #[test]
    fn no_master_collapses_to_pure_slave_groups() {
        let counts = GroupCounts::new(5, 0, 2);
        assert_eq!(counts.master, 0);
        assert_eq!(counts.group_count(), 2);
        let bounds = groups(5, counts, MasterPosition::First);
        assert_eq!(bounds, vec![(0, 3), (3, 5)]);
    }

    #[test]
    fn empty_container_has_no_groups() {
        let counts = GroupCounts::new(0, 3, 2);
        assert_eq!(counts.master, 0);
        assert_eq!(counts.slave_groups, 0);
        assert_eq!(counts.group_count(), 0);
        assert!(groups(0, counts, MasterPosition::First).is_empty());
    }

    #[test]
    fn effective_counts_are_clamped_to_child_count() {
        // invariant 6: nb_master and nb_slave_groups are clamped against the actual child count.
        let counts = GroupCounts::new(3, 10, 10);
        assert_eq!(counts.master, 3);
        assert_eq!(counts.slave_groups, 0);
    }

    #[test]
    fn group_lookups_round_trip() {
        let n = 11;
        let counts = GroupCounts::new(n, 3, 4);
        for master_pos in [MasterPosition::First, MasterPosition::Last] {
            let all = groups(n, counts, master_pos);
            for i in 0..n {
                let gidx = group_index(n, counts, master_pos, i).unwrap();
                let bounds_via_index = group_bounds(n, counts, master_pos, gidx).unwrap();
                let start = group_start(n, counts, master_pos, i).unwrap();
                let end = group_end(n, counts, master_pos, i).unwrap();
                assert_eq!(bounds_via_index, (start, end));
                assert!(i >= start && i < end);
                assert_eq!(all[gidx], (start, end));
            }

            // P3: the groups partition [0, n) exactly, with no gaps or overlaps. `all` is in
            // major-axis draw order, not necessarily increasing physical-index order (the master
            // group can be drawn last while still physically occupying the lowest indices), so
            // sort a copy by `start` before checking contiguity.
            let mut sorted = all.clone();
            sorted.sort_by_key(|&(start, _)| start);
            let mut covered = 0;
            for &(start, end) in &sorted {
                assert_eq!(start, covered);
                assert!(end > start);
                covered = end;
            }
            assert_eq!(covered, n);
        }
    }
}

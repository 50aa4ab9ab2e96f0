//! The configuration record consumed by the layout core.
//!
//! Loading this from a file, environment, or IPC command is somebody else's job (the
//! configuration loader is an external collaborator, per the spec's scope); this module only
//! defines the shape the loader hands us, immutable for the duration of one `arrange` pass.

use crate::tree::Layout;

/// Policy for suppressing borders on tiled views flush with a workspace edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HideEdgeBorders {
    /// Never suppress edge borders.
    None,
    /// Suppress left/right borders flush with the workspace edge.
    Vertical,
    /// Suppress top/bottom borders flush with the workspace edge.
    Horizontal,
    /// Suppress all borders flush with the workspace edge.
    Both,
    /// Suppress all borders, but only while the workspace has a single child.
    Smart,
}

impl Default for HideEdgeBorders {
    fn default() -> Self {
        HideEdgeBorders::None
    }
}

/// The split axis newly created workspaces default to when their layout isn't otherwise
/// determined. `Auto` picks horizontal for landscape outputs and vertical for portrait ones,
/// mirroring how a new workspace on the wide edge of a display should default.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
    Auto,
}

impl Orientation {
    /// Resolve `Auto` against an output's `(w, h)`, leaving `Horizontal`/`Vertical` untouched.
    pub fn resolve(self, output_w: i32, output_h: i32) -> Layout {
        match self {
            Orientation::Horizontal => Layout::Horiz,
            Orientation::Vertical => Layout::Vert,
            Orientation::Auto => {
                if output_w >= output_h {
                    Layout::Horiz
                } else {
                    Layout::Vert
                }
            }
        }
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::Auto
    }
}

/// Immutable-per-arrange configuration consumed from the (external) config loader.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Pixel gap inset around and between tiled views. Rounded down to even before use (§4.C).
    pub gap: u32,
    /// Collapse the inner gap entirely while a workspace has exactly one tiled child.
    pub smart_gaps: bool,
    /// Whether gaps apply along edges flush with the workspace boundary at all.
    pub edge_gaps: bool,
    /// Border-suppression policy for tiled views flush with a workspace edge.
    pub hide_edge_borders: HideEdgeBorders,
    /// Font height in pixels, used to derive title bar height (`font_height + 4`).
    pub font_height: u32,
    /// The layout newly created workspaces start with.
    pub default_layout: Layout,
    /// The split axis newly created workspaces default to.
    pub default_orientation: Orientation,
    /// If set, directional focus lookup wraps immediately instead of only on request (§4.F).
    pub force_focus_wrapping: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            gap: 0,
            smart_gaps: false,
            edge_gaps: true,
            hide_edge_borders: HideEdgeBorders::None,
            font_height: 14,
            default_layout: Layout::Horiz,
            default_orientation: Orientation::Auto,
            force_focus_wrapping: false,
        }
    }
}

impl Config {
    /// The effective gap in pixels: the configured gap, rounded down to even (§4.C step 2).
    pub fn effective_gap(&self) -> i32 {
        (self.gap as i32) & !1
    }

    /// `B_NORMAL` title bar height: `font_height + 4`, per §4.C step 4.
    pub fn title_bar_height(&self) -> i32 {
        self.font_height as i32 + 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_gap_rounds_down_to_even() {
        let cfg = Config { gap: 11, ..Config::default() };
        assert_eq!(cfg.effective_gap(), 10);
        let cfg = Config { gap: 10, ..Config::default() };
        assert_eq!(cfg.effective_gap(), 10);
    }

    #[test]
    fn title_bar_height_matches_tabbed_scenario() {
        let cfg = Config { font_height: 14, ..Config::default() };
        assert_eq!(cfg.title_bar_height(), 18);
    }

    #[test]
    fn orientation_auto_follows_aspect_ratio() {
        assert_eq!(Orientation::Auto.resolve(1920, 1080), Layout::Horiz);
        assert_eq!(Orientation::Auto.resolve(1080, 1920), Layout::Vert);
    }
}

//! Abstract interfaces consumed from (and exposed to) the compositor backend.
//!
//! None of this crate talks to X11, Wayland, or any concrete compositor -- that plumbing is an
//! external collaborator per the spec's scope. What lives here are the narrow traits the layout
//! engine calls through: "what's this output's resolution", "push this view's geometry", "bring
//! this view to the front". A real window manager implements [`CompositorSink`] and
//! [`EventSink`] against its actual backend; tests in this crate implement them against a
//! recording stub.

use crate::geometry::Geometry;

/// An opaque handle to an output (display), owned by the compositor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OutputHandle(pub u64);

/// An opaque handle to a view's underlying surface, owned by the compositor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewHandle(pub u64);

/// An opaque handle to an arbitrary surface (used for panels/backgrounds), owned by the
/// compositor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceHandle(pub u64);

/// Per-view boolean state bits the compositor tracks on our behalf.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewState {
    /// Whether the view is the one that should render as focused/active.
    Activated,
}

bitflags::bitflags! {
    /// The render mask passed to [`CompositorSink::view_set_mask`].
    ///
    /// Bits rather than a single boolean because a view can be simultaneously hidden because its
    /// output is inactive *and* because it sits behind the focused child of a `Tabbed`/`Stacked`
    /// parent; the compositor decides how to combine them.
    #[derive(Default)]
    pub struct RenderMask: u32 {
        /// The view should actually be presented on screen.
        const VISIBLE = 1 << 0;
        /// The view is the fullscreen view of its workspace.
        const FULLSCREEN = 1 << 1;
        /// The view is floating.
        const FLOATING = 1 << 2;
    }
}

/// Where a panel surface is docked on its output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelPosition {
    Top,
    Bottom,
    Left,
    Right,
}

/// A single panel reservation: `(panel_surface, output, position)` from §6.
#[derive(Clone, Copy, Debug)]
pub struct PanelReservation {
    pub surface: SurfaceHandle,
    pub output: OutputHandle,
    pub position: PanelPosition,
}

/// Registry of panel (and background) surfaces, consumed from extensions per §6.
///
/// Backgrounds are not geometry-relevant to `arrange` (they don't reserve screen space), so only
/// panel reservations are queried by the layout engine; a full registry implementation may track
/// backgrounds too for its own purposes.
pub trait PanelRegistry {
    /// All panels currently registered for `output`, in no particular order.
    fn panels_for(&self, output: OutputHandle) -> Vec<PanelReservation>;

    /// The on-screen thickness of a panel surface, queried via `surface_size`.
    fn surface_size(&self, surface: SurfaceHandle) -> (i32, i32);
}

/// The sink the layout engine pushes final geometry and visibility decisions through.
pub trait CompositorSink {
    /// The output's current scaled resolution, in logical pixels.
    fn output_scaled_size(&self, output: OutputHandle) -> (i32, i32);

    /// The output's raw resolution, in physical pixels.
    fn output_resolution(&self, output: OutputHandle) -> (i32, i32);

    /// Push a view's final, compositor-ready geometry.
    fn view_set_geometry(&mut self, view: ViewHandle, geometry: Geometry);

    /// Set or clear a boolean state bit on a view.
    fn view_set_state(&mut self, view: ViewHandle, state: ViewState, value: bool);

    /// Replace a view's render mask.
    fn view_set_mask(&mut self, view: ViewHandle, mask: RenderMask);

    /// Raise a view to the top of its output's stacking order.
    fn view_bring_to_front(&mut self, view: ViewHandle);

    /// Lower a view to the bottom of its output's stacking order.
    fn view_send_to_back(&mut self, view: ViewHandle);
}

/// Events emitted to the (external) IPC bus, per §6.
pub trait EventSink {
    /// A tiled view finished a `move_container` step.
    fn window_moved(&mut self, view: ViewHandle);

    /// A view's floating state changed.
    fn window_floating(&mut self, view: ViewHandle, floating: bool);

    /// A workspace was created (including ones synthesized on last-workspace-removal).
    fn workspace_init(&mut self, workspace_name: &str);
}

/// An [`EventSink`] that discards everything, for call sites that have no IPC bus handy (e.g.
/// internal helpers that only conditionally need to emit an event).
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn window_moved(&mut self, _view: ViewHandle) {}
    fn window_floating(&mut self, _view: ViewHandle, _floating: bool) {}
    fn workspace_init(&mut self, _workspace_name: &str) {}
}

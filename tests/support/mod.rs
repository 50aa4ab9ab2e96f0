//! Shared test doubles for the top-level integration suite.

use tilecore::compositor::{
    CompositorSink, OutputHandle, PanelRegistry, PanelReservation, RenderMask, SurfaceHandle,
    ViewHandle, ViewState,
};
use tilecore::{Config, NodeId, Tree};

pub struct NoPanels;

impl PanelRegistry for NoPanels {
    fn panels_for(&self, _output: OutputHandle) -> Vec<PanelReservation> {
        Vec::new()
    }

    fn surface_size(&self, _surface: SurfaceHandle) -> (i32, i32) {
        (0, 0)
    }
}

#[derive(Default)]
pub struct RecordingSink;

impl CompositorSink for RecordingSink {
    fn output_scaled_size(&self, _output: OutputHandle) -> (i32, i32) {
        (1920, 1080)
    }

    fn output_resolution(&self, _output: OutputHandle) -> (i32, i32) {
        (1920, 1080)
    }

    fn view_set_geometry(&mut self, _view: ViewHandle, _geometry: tilecore::Geometry) {}
    fn view_set_state(&mut self, _view: ViewHandle, _state: ViewState, _value: bool) {}
    fn view_set_mask(&mut self, _view: ViewHandle, _mask: RenderMask) {}
    fn view_bring_to_front(&mut self, _view: ViewHandle) {}
    fn view_send_to_back(&mut self, _view: ViewHandle) {}
}

/// A single output with a single workspace, sized to the output, ready to hold children.
pub fn output_and_workspace() -> (Tree, NodeId, NodeId) {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut tree = Tree::new();
    let config = Config::default();
    let mut events = tilecore::compositor::NullEventSink;
    let output = tree.add_output("eDP-1", 1, &config, &mut events);
    tree.set_geometry(output, tilecore::Geometry::new(0, 0, 1920, 1080));
    let ws = tree.ensure_workspace(output, &config, &mut events);
    (tree, output, ws)
}

use super::model::{FilterControl, PageView, PanelState, SelectOption};
use crate::map::model::{LatLng, LatLngBounds, TileLayer};
use crate::map::view::{MapView, MarkerId, MarkerSpec};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Headless view that renders everything to the log
#[derive(Debug, Default)]
pub struct LogView {
    pub markers: BTreeMap<MarkerId, LatLng>,
}

impl MapView for LogView {
    fn set_view(&mut self, center: LatLng, zoom: u8) {
        info!("Map centered at {} with zoom {}", center, zoom);
    }

    fn add_tile_layer(&mut self, layer: &TileLayer) {
        debug!("Tile layer {}", layer.url_template);
    }

    fn add_marker(&mut self, marker: &MarkerSpec) {
        debug!("{} at {}: {}", marker.id, marker.position, marker.popup_html);
        self.markers.insert(marker.id, marker.position);
    }

    fn remove_marker(&mut self, id: MarkerId) {
        self.markers.remove(&id);
    }

    fn fit_bounds(&mut self, bounds: LatLngBounds) {
        info!(
            "Map fitted to {} - {}",
            bounds.south_west, bounds.north_east
        );
    }
}

impl PageView for LogView {
    fn fill_select(&mut self, control: FilterControl, options: &[SelectOption]) {
        info!(
            "{:?} select: {}",
            control,
            options.iter().map(|option| option.label.as_str()).collect::<Vec<_>>().join(", ")
        );
    }

    fn clear_filter_inputs(&mut self) {
        debug!("Filter inputs cleared");
    }

    fn render_panel(&mut self, panel: &PanelState) {
        info!("Panel: {}", panel);
    }
}

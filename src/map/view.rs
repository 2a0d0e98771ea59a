use super::model::{LatLng, LatLngBounds, TileLayer};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u64);

impl Display for MarkerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "marker-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub id: MarkerId,
    pub position: LatLng,
    pub popup_html: String,
    /// Popup carries a button that requests the analysis
    pub analyze_button: bool,
}

/// The interactive map widget. Implementations forward popup opens and analyze
/// button clicks back to the controller with the marker's [`MarkerId`].
pub trait MapView {
    fn set_view(&mut self, center: LatLng, zoom: u8);

    fn add_tile_layer(&mut self, layer: &TileLayer);

    fn add_marker(&mut self, marker: &MarkerSpec);

    fn remove_marker(&mut self, id: MarkerId);

    fn fit_bounds(&mut self, bounds: LatLngBounds);
}

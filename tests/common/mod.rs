#![allow(dead_code)]

use async_trait::async_trait;
use eventmap::backend::api::{ApiError, DashboardApi};
use eventmap::backend::model::{AnalysisRequest, Event, EventQuery, Startup};
use eventmap::dashboard::model::{FilterControl, PageView, PanelState, SelectOption};
use eventmap::map::model::{LatLng, LatLngBounds, TileLayer};
use eventmap::map::view::{MapView, MarkerId, MarkerSpec};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Startups,
    EventNames,
    EventDates,
    Events(EventQuery),
    Analysis(AnalysisRequest),
}

struct Reply<T> {
    delay: Duration,
    result: Result<T, ApiError>,
}

struct FakeApiState {
    startups: Result<Vec<Startup>, ApiError>,
    event_names: Result<Vec<String>, ApiError>,
    event_dates: Result<Vec<String>, ApiError>,
    events: VecDeque<Reply<Vec<Event>>>,
    analyses: VecDeque<Reply<String>>,
    calls: Vec<Call>,
}

/// Backend double answering from queued replies
#[derive(Clone)]
pub struct FakeApi {
    state: Arc<Mutex<FakeApiState>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeApiState {
                startups: Ok(Vec::new()),
                event_names: Ok(Vec::new()),
                event_dates: Ok(Vec::new()),
                events: VecDeque::new(),
                analyses: VecDeque::new(),
                calls: Vec::new(),
            })),
        }
    }

    pub fn with_startups(self, startups: Result<Vec<Startup>, ApiError>) -> Self {
        self.state.lock().unwrap().startups = startups;
        self
    }

    pub fn with_event_names(self, names: Result<Vec<String>, ApiError>) -> Self {
        self.state.lock().unwrap().event_names = names;
        self
    }

    pub fn with_event_dates(self, dates: Result<Vec<String>, ApiError>) -> Self {
        self.state.lock().unwrap().event_dates = dates;
        self
    }

    pub fn reply_events(&self, result: Result<Vec<Event>, ApiError>) -> &Self {
        self.reply_events_after(Duration::ZERO, result)
    }

    pub fn reply_events_after(&self, delay: Duration, result: Result<Vec<Event>, ApiError>) -> &Self {
        self.state
            .lock()
            .unwrap()
            .events
            .push_back(Reply { delay, result });
        self
    }

    pub fn reply_analysis(&self, result: Result<String, ApiError>) -> &Self {
        self.reply_analysis_after(Duration::ZERO, result)
    }

    pub fn reply_analysis_after(&self, delay: Duration, result: Result<String, ApiError>) -> &Self {
        self.state
            .lock()
            .unwrap()
            .analyses
            .push_back(Reply { delay, result });
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn event_queries(&self) -> Vec<EventQuery> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Events(query) => Some(query),
                _ => None,
            })
            .collect()
    }

    pub fn analysis_requests(&self) -> Vec<AnalysisRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Analysis(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }
}

#[async_trait]
impl DashboardApi for FakeApi {
    async fn get_startups(&self) -> Result<Vec<Startup>, ApiError> {
        self.record(Call::Startups);
        self.state.lock().unwrap().startups.clone()
    }

    async fn get_event_names(&self) -> Result<Vec<String>, ApiError> {
        self.record(Call::EventNames);
        self.state.lock().unwrap().event_names.clone()
    }

    async fn get_event_dates(&self) -> Result<Vec<String>, ApiError> {
        self.record(Call::EventDates);
        self.state.lock().unwrap().event_dates.clone()
    }

    async fn get_events(&self, query: &EventQuery) -> Result<Vec<Event>, ApiError> {
        self.record(Call::Events(query.clone()));

        let reply = self.state.lock().unwrap().events.pop_front();

        match reply {
            Some(reply) => {
                tokio::time::sleep(reply.delay).await;
                reply.result
            }
            None => Ok(Vec::new()),
        }
    }

    async fn request_analysis(&self, request: &AnalysisRequest) -> Result<String, ApiError> {
        self.record(Call::Analysis(request.clone()));

        let reply = self.state.lock().unwrap().analyses.pop_front();

        match reply {
            Some(reply) => {
                tokio::time::sleep(reply.delay).await;
                reply.result
            }
            None => Ok(format!("Analysis of {}", request.event_name)),
        }
    }
}

#[derive(Debug, Default)]
pub struct ViewLog {
    pub center: Option<(LatLng, u8)>,
    pub tile_layers: Vec<TileLayer>,
    pub markers: BTreeMap<MarkerId, MarkerSpec>,
    pub removed: Vec<MarkerId>,
    pub fitted: Option<LatLngBounds>,
    pub selects: HashMap<FilterControl, Vec<SelectOption>>,
    pub cleared_inputs: usize,
    pub panels: Vec<PanelState>,
}

impl ViewLog {
    pub fn panel(&self) -> Option<&PanelState> {
        self.panels.last()
    }

    pub fn positions(&self) -> Vec<LatLng> {
        self.markers.values().map(|marker| marker.position).collect()
    }
}

/// View double remembering what the controller drew
#[derive(Clone, Default)]
pub struct RecordingView {
    pub log: Arc<Mutex<ViewLog>>,
}

impl RecordingView {
    pub fn snapshot<T>(&self, read: impl FnOnce(&ViewLog) -> T) -> T {
        read(&self.log.lock().unwrap())
    }
}

impl MapView for RecordingView {
    fn set_view(&mut self, center: LatLng, zoom: u8) {
        let mut log = self.log.lock().unwrap();
        log.center = Some((center, zoom));
        log.fitted = None;
    }

    fn add_tile_layer(&mut self, layer: &TileLayer) {
        self.log.lock().unwrap().tile_layers.push(layer.clone());
    }

    fn add_marker(&mut self, marker: &MarkerSpec) {
        self.log
            .lock()
            .unwrap()
            .markers
            .insert(marker.id, marker.clone());
    }

    fn remove_marker(&mut self, id: MarkerId) {
        let mut log = self.log.lock().unwrap();
        log.markers.remove(&id);
        log.removed.push(id);
    }

    fn fit_bounds(&mut self, bounds: LatLngBounds) {
        self.log.lock().unwrap().fitted = Some(bounds);
    }
}

impl PageView for RecordingView {
    fn fill_select(&mut self, control: FilterControl, options: &[SelectOption]) {
        self.log
            .lock()
            .unwrap()
            .selects
            .insert(control, options.to_vec());
    }

    fn clear_filter_inputs(&mut self) {
        self.log.lock().unwrap().cleared_inputs += 1;
    }

    fn render_panel(&mut self, panel: &PanelState) {
        self.log.lock().unwrap().panels.push(panel.clone());
    }
}

pub fn event(name: &str, coordinates: Option<[f64; 2]>) -> Event {
    Event {
        id: None,
        name: name.to_string(),
        initial_date: "2025-05-21T00:00:00Z".to_string(),
        final_date: "2025-05-23T00:00:00Z".to_string(),
        location: "Tallinn".to_string(),
        website: format!("https://{}.example/", name.to_lowercase().replace(' ', "")),
        position: coordinates.map(LatLng::from_geojson),
        description: None,
        theme: None,
    }
}

pub fn startup(company: &str) -> Startup {
    Startup {
        company: company.to_string(),
        description: format!("{} builds AI tooling", company),
        sector: "AI".to_string(),
        website: format!("https://{}.example/", company.to_lowercase()),
    }
}

use super::format::{format_date, popup_html};
use super::model::{
    AnalysisOutcome, DashboardView, EventFilters, FetchOutcome, PanelState, SelectOption,
    SELECT_STARTUP_PROMPT,
};
use super::profile::{AnalysisTrigger, Profile, Vocabulary, DEFAULT_EVENT_THEME};
use crate::backend::api::{ApiError, DashboardApi};
use crate::backend::model::{AnalysisRequest, Event, Startup};
use crate::map::model::{LatLng, LatLngBounds, TileLayer, DEFAULT_CENTER, DEFAULT_ZOOM, FIT_PADDING};
use crate::map::view::{MarkerId, MarkerSpec};
use itertools::Itertools;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};

pub const DEFAULT_STARTUP_DESCRIPTION: &str =
    "Technology startup looking for events about innovation, investment and networking.";

#[derive(Debug, Clone)]
pub struct DashboardSettings {
    pub profile: Profile,
    pub center: LatLng,
    pub zoom: u8,
    pub tile_layer: TileLayer,
    /// Sent as the startup context by profiles without a startup select
    pub startup_description: String,
}

impl DashboardSettings {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            tile_layer: TileLayer::default(),
            startup_description: DEFAULT_STARTUP_DESCRIPTION.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct PlacedMarker {
    id: MarkerId,
    event: Event,
}

struct DashboardState<V> {
    view: V,
    panel: PanelState,
    filters: EventFilters,
    markers: Vec<PlacedMarker>,
    startups: Vec<Startup>,
    next_marker: u64,
    latest_fetch: u64,
    latest_analysis: u64,
}

impl<V: DashboardView> DashboardState<V> {
    fn show(&mut self, panel: PanelState) {
        self.view.render_panel(&panel);
        self.panel = panel;
    }

    fn clear_markers(&mut self) {
        for marker in self.markers.drain(..) {
            self.view.remove_marker(marker.id);
        }
    }

    fn render_events(&mut self, events: Vec<Event>, settings: &DashboardSettings) -> FetchOutcome {
        let analyze_button = settings.profile.analysis_trigger() == AnalysisTrigger::Button;
        let mut skipped = 0;

        for event in events {
            let Some(position) = event.position else {
                warn!("Event '{}' has no valid coordinates (skipping it)", event.name);
                skipped += 1;
                continue;
            };

            self.next_marker += 1;

            let marker = MarkerSpec {
                id: MarkerId(self.next_marker),
                position,
                popup_html: popup_html(&event, analyze_button),
                analyze_button,
            };

            self.view.add_marker(&marker);
            self.markers.push(PlacedMarker {
                id: marker.id,
                event,
            });
        }

        match LatLngBounds::from_points(
            self.markers
                .iter()
                .filter_map(|marker| marker.event.position.as_ref()),
        ) {
            Some(bounds) => self.view.fit_bounds(bounds.pad(FIT_PADDING)),
            None => self.view.set_view(settings.center, settings.zoom),
        }

        if self.panel == PanelState::NoEvents {
            self.show(PanelState::default_prompt());
        }

        info!(
            "Placed {} markers, skipped {} events without coordinates",
            self.markers.len(),
            skipped
        );

        FetchOutcome::Rendered {
            placed: self.markers.len(),
            skipped,
        }
    }
}

/// Drives the map, the filter selects and the analysis panel of one page.
///
/// State sits behind a lock that is never held while waiting on the backend,
/// so requests may overlap. Every fetch and analysis is tagged with a sequence
/// number and only the latest one issued gets to touch the view.
pub struct DashboardController<A, V> {
    api: A,
    settings: DashboardSettings,
    state: Mutex<DashboardState<V>>,
}

impl<A: DashboardApi, V: DashboardView> DashboardController<A, V> {
    pub fn new(api: A, view: V, settings: DashboardSettings) -> Self {
        Self {
            api,
            settings,
            state: Mutex::new(DashboardState {
                view,
                panel: PanelState::default_prompt(),
                filters: EventFilters::default(),
                markers: Vec::new(),
                startups: Vec::new(),
                next_marker: 0,
                latest_fetch: 0,
                latest_analysis: 0,
            }),
        }
    }

    pub fn profile(&self) -> Profile {
        self.settings.profile
    }

    /// Sets up the map, fills the profile's selects one after the other and
    /// then runs the first unfiltered fetch.
    #[instrument(skip(self), fields(profile = ?self.settings.profile))]
    pub async fn init(&self) -> FetchOutcome {
        {
            let mut state = self.state.lock().await;

            state
                .view
                .set_view(self.settings.center, self.settings.zoom);
            state.view.add_tile_layer(&self.settings.tile_layer);
            state.show(PanelState::default_prompt());
        }

        for vocabulary in self.settings.profile.vocabularies() {
            self.populate(*vocabulary).await;
        }

        self.refresh().await
    }

    /// Returns whether the select got filled
    #[instrument(skip(self))]
    pub async fn populate(&self, vocabulary: Vocabulary) -> bool {
        let result: Result<(Vec<SelectOption>, Option<Vec<Startup>>), ApiError> = match vocabulary
        {
            Vocabulary::Startups => self.api.get_startups().await.map(|startups| {
                let options = to_options(
                    startups
                        .iter()
                        .map(|startup| (startup.company.clone(), startup.company.clone())),
                );

                (options, Some(startups))
            }),
            Vocabulary::EventNames => self.api.get_event_names().await.map(|names| {
                (
                    to_options(names.into_iter().map(|name| (name.clone(), name))),
                    None,
                )
            }),
            Vocabulary::EventDates => self.api.get_event_dates().await.map(|dates| {
                (
                    to_options(dates.into_iter().map(|date| {
                        let label = format_date(&date);
                        (date, label)
                    })),
                    None,
                )
            }),
        };

        let mut state = self.state.lock().await;

        match result {
            Ok((options, startups)) => {
                if let Some(startups) = startups {
                    state.startups = startups;
                }

                info!("Got {} options for {:?}", options.len(), vocabulary.control());

                let options = std::iter::once(SelectOption::sentinel(vocabulary.sentinel_label()))
                    .chain(options)
                    .collect_vec();

                state.view.fill_select(vocabulary.control(), &options);
                true
            }
            Err(err) => {
                error!("Failed to load {:?} options: {}", vocabulary, err);
                state.show(PanelState::Error(format!("Error loading filters: {}", err)));
                false
            }
        }
    }

    /// Clears the map and shows the events matching the current filters
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> FetchOutcome {
        let (sequence, query) = {
            let mut state = self.state.lock().await;

            state.latest_fetch += 1;
            state.clear_markers();

            (
                state.latest_fetch,
                self.settings.profile.event_query(&state.filters),
            )
        };

        debug!("Fetch #{} with {:?}", sequence, query.params);

        let result = self.api.get_events(&query).await;

        let mut state = self.state.lock().await;

        if sequence != state.latest_fetch {
            debug!(
                "Discarding fetch #{}, #{} is the latest",
                sequence, state.latest_fetch
            );
            return FetchOutcome::Stale;
        }

        match result {
            Err(err) => {
                error!("Failed to fetch events: {}", err);
                state.show(PanelState::Error(format!("Error loading events: {}", err)));
                FetchOutcome::Failed
            }
            Ok(events) if events.is_empty() => {
                info!("No events found");
                state.show(PanelState::NoEvents);
                FetchOutcome::Empty
            }
            Ok(events) => state.render_events(events, &self.settings),
        }
    }

    pub async fn apply_filters(&self, filters: EventFilters) -> FetchOutcome {
        info!("Applying filters {:?}", filters);

        self.state.lock().await.filters = filters;

        self.refresh().await
    }

    pub async fn reset(&self) -> FetchOutcome {
        info!("Resetting filters");

        {
            let mut state = self.state.lock().await;

            state.filters = EventFilters::default();
            state.view.clear_filter_inputs();
            state.show(PanelState::default_prompt());
        }

        self.refresh().await
    }

    pub async fn select_startup(&self, company: Option<String>) {
        debug!("Selected startup {:?}", company);

        self.state.lock().await.filters.startup = company;
    }

    pub async fn on_popup_open(&self, marker: MarkerId) -> AnalysisOutcome {
        match self.settings.profile.analysis_trigger() {
            AnalysisTrigger::PopupOpen => self.analyze(marker).await,
            AnalysisTrigger::Button => AnalysisOutcome::Ignored,
        }
    }

    pub async fn on_analyze_clicked(&self, marker: MarkerId) -> AnalysisOutcome {
        match self.settings.profile.analysis_trigger() {
            AnalysisTrigger::Button => self.analyze(marker).await,
            AnalysisTrigger::PopupOpen => AnalysisOutcome::Ignored,
        }
    }

    #[instrument(skip(self))]
    async fn analyze(&self, marker: MarkerId) -> AnalysisOutcome {
        let (sequence, request) = {
            let mut state = self.state.lock().await;

            let Some(event) = state
                .markers
                .iter()
                .find(|placed| placed.id == marker)
                .map(|placed| placed.event.clone())
            else {
                debug!("{} is no longer on the map", marker);
                return AnalysisOutcome::Ignored;
            };

            let Some(request) = self.analysis_request(&state, &event) else {
                info!("No startup selected for '{}'", event.name);
                state.show(PanelState::Prompt(SELECT_STARTUP_PROMPT.to_string()));
                return AnalysisOutcome::MissingSelection;
            };

            state.latest_analysis += 1;
            state.show(PanelState::Loading);

            (state.latest_analysis, request)
        };

        let result = self.api.request_analysis(&request).await;

        let mut state = self.state.lock().await;

        if sequence != state.latest_analysis {
            debug!("Discarding analysis #{} for '{}'", sequence, request.event_name);
            return AnalysisOutcome::Stale;
        }

        match result {
            Ok(analysis) => {
                info!("Got analysis for '{}'", request.event_name);
                state.show(PanelState::Analysis(analysis));
                AnalysisOutcome::Displayed
            }
            Err(err) => {
                error!("Analysis failed for '{}': {}", request.event_name, err);
                state.show(PanelState::Error(format!("Error requesting analysis: {}", err)));
                AnalysisOutcome::Failed
            }
        }
    }

    fn analysis_request(&self, state: &DashboardState<V>, event: &Event) -> Option<AnalysisRequest> {
        if !self.settings.profile.requires_startup() {
            return Some(AnalysisRequest::for_theme(
                event,
                DEFAULT_EVENT_THEME,
                &self.settings.startup_description,
            ));
        }

        let company = state.filters.selected_startup()?;

        match state.startups.iter().find(|startup| startup.company == company) {
            Some(startup) => Some(AnalysisRequest::for_startup(event, startup)),
            None => {
                warn!("Startup '{}' is not among the loaded startups", company);
                None
            }
        }
    }

    pub async fn panel(&self) -> PanelState {
        self.state.lock().await.panel.clone()
    }

    pub async fn filters(&self) -> EventFilters {
        self.state.lock().await.filters.clone()
    }

    pub async fn displayed_events(&self) -> Vec<(MarkerId, Event)> {
        self.state
            .lock()
            .await
            .markers
            .iter()
            .map(|placed| (placed.id, placed.event.clone()))
            .collect()
    }
}

fn to_options(values: impl Iterator<Item = (String, String)>) -> Vec<SelectOption> {
    values
        .filter(|(value, _)| !value.is_empty())
        .unique_by(|(value, _)| value.clone())
        .map(|(value, label)| SelectOption { value, label })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn options_should_drop_blank_and_repeated_values() {
        let options = to_options(
            ["2025-05-21", "", "2025-11-11", "2025-05-21"]
                .into_iter()
                .map(|date| (date.to_string(), format_date(date))),
        );

        assert_eq!(
            options,
            vec![
                SelectOption::new("2025-05-21", "21/05/2025"),
                SelectOption::new("2025-11-11", "11/11/2025"),
            ]
        );
    }
}

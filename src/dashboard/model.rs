use crate::map::view::MapView;
use std::fmt::{Display, Formatter};

pub const DEFAULT_PROMPT: &str = "Click on an event marker to see its relevance analysis.";
pub const SELECT_STARTUP_PROMPT: &str = "Select a startup before requesting an analysis.";
pub const NO_EVENTS_MESSAGE: &str = "No events found for the selected filters.";
pub const LOADING_MESSAGE: &str = "Analyzing event...";

/// Current values of the filter inputs. Empty strings count as unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilters {
    pub startup: Option<String>,
    pub event_name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
}

impl EventFilters {
    pub fn selected_startup(&self) -> Option<&str> {
        self.startup
            .as_deref()
            .map(str::trim)
            .filter(|company| !company.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterControl {
    Startup,
    EventName,
    Date,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }

    /// The "nothing selected" entry heading every select
    pub fn sentinel(label: &str) -> Self {
        Self::new("", label)
    }
}

/// What the analysis panel shows. The loading indicator lives inside it.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelState {
    Prompt(String),
    Loading,
    NoEvents,
    Analysis(String),
    Error(String),
}

impl PanelState {
    pub fn default_prompt() -> Self {
        PanelState::Prompt(DEFAULT_PROMPT.to_string())
    }

    pub fn message(&self) -> &str {
        match self {
            PanelState::Prompt(message)
            | PanelState::Analysis(message)
            | PanelState::Error(message) => message,
            PanelState::Loading => LOADING_MESSAGE,
            PanelState::NoEvents => NO_EVENTS_MESSAGE,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PanelState::Loading)
    }
}

impl Display for PanelState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// The page around the map: filter selects and the analysis panel
pub trait PageView {
    fn fill_select(&mut self, control: FilterControl, options: &[SelectOption]);

    fn clear_filter_inputs(&mut self);

    fn render_panel(&mut self, panel: &PanelState);
}

pub trait DashboardView: MapView + PageView + Send {}

impl<T: MapView + PageView + Send> DashboardView for T {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Rendered { placed: usize, skipped: usize },
    Empty,
    Failed,
    /// A newer fetch was issued while this one was in flight
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Displayed,
    Failed,
    MissingSelection,
    /// Marker is no longer on the map, or the profile uses the other trigger
    Ignored,
    Stale,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn only_the_loading_state_should_show_the_indicator() {
        assert!(PanelState::Loading.is_loading());
        assert!(!PanelState::Error("boom".to_string()).is_loading());
        assert!(!PanelState::Analysis("great fit".to_string()).is_loading());
    }

    #[test_log::test]
    fn blank_startup_selection_should_count_as_none() {
        let filters = EventFilters {
            startup: Some("  ".to_string()),
            ..EventFilters::default()
        };

        assert_eq!(filters.selected_startup(), None);
    }
}

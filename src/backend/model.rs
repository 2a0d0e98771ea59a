use crate::map::model::LatLng;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: Option<String>,
    pub name: String,
    pub initial_date: String,
    pub final_date: String,
    pub location: String,
    pub website: String,
    /// `None` when the backend sent no usable coordinate pair
    pub position: Option<LatLng>,
    pub description: Option<String>,
    pub theme: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Startup {
    pub company: String,
    pub description: String,
    pub sector: String,
    pub website: String,
}

/// Query parameters for `/api/events`, empty values already left out
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventQuery {
    pub params: Vec<(&'static str, String)>,
}

impl EventQuery {
    pub fn unfiltered() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) {
            self.params.push((name, value.to_string()));
        }
        self
    }

    pub fn is_unfiltered(&self) -> bool {
        self.params.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(param, _)| *param == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub event_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub startup_company: Option<String>,
    pub startup_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub startup_sector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub startup_website: Option<String>,
}

impl AnalysisRequest {
    pub fn for_startup(event: &Event, startup: &Startup) -> Self {
        Self {
            event_name: event.name.clone(),
            event_website: Some(event.website.clone()),
            event_theme: None,
            startup_company: Some(startup.company.clone()),
            startup_description: startup.description.clone(),
            startup_sector: Some(startup.sector.clone()),
            startup_website: Some(startup.website.clone()),
        }
    }

    pub fn for_theme(event: &Event, default_theme: &str, startup_description: &str) -> Self {
        Self {
            event_name: event.name.clone(),
            event_website: None,
            event_theme: Some(
                event
                    .theme
                    .clone()
                    .filter(|theme| !theme.is_empty())
                    .unwrap_or_else(|| default_theme.to_string()),
            ),
            startup_company: None,
            startup_description: startup_description.to_string(),
            startup_sector: None,
            startup_website: None,
        }
    }
}

use super::format::{range_end_param, range_start_param};
use super::model::{EventFilters, FilterControl};
use crate::backend::model::EventQuery;

pub const DEFAULT_EVENT_THEME: &str = "tecnología, startups e innovación";

/// Which filters, vocabularies and analysis payload a dashboard uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Profile {
    /// Startup and event name selects, analysis from a popup button
    StartupEvent,
    /// Date range and location inputs, analysis as soon as a popup opens
    DateRange,
    /// Event date select, analysis from a popup button
    SingleDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisTrigger {
    PopupOpen,
    Button,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vocabulary {
    Startups,
    EventNames,
    EventDates,
}

impl Vocabulary {
    pub fn control(&self) -> FilterControl {
        match self {
            Vocabulary::Startups => FilterControl::Startup,
            Vocabulary::EventNames => FilterControl::EventName,
            Vocabulary::EventDates => FilterControl::Date,
        }
    }

    pub fn sentinel_label(&self) -> &'static str {
        match self {
            Vocabulary::Startups => "Select a startup",
            Vocabulary::EventNames => "All events",
            Vocabulary::EventDates => "All dates",
        }
    }
}

impl Profile {
    /// Populated in this order before the first event fetch
    pub fn vocabularies(&self) -> &'static [Vocabulary] {
        match self {
            Profile::StartupEvent => &[Vocabulary::Startups, Vocabulary::EventNames],
            Profile::DateRange => &[],
            Profile::SingleDate => &[Vocabulary::EventDates],
        }
    }

    pub fn analysis_trigger(&self) -> AnalysisTrigger {
        match self {
            Profile::DateRange => AnalysisTrigger::PopupOpen,
            Profile::StartupEvent | Profile::SingleDate => AnalysisTrigger::Button,
        }
    }

    pub fn requires_startup(&self) -> bool {
        matches!(self, Profile::StartupEvent)
    }

    pub fn event_query(&self, filters: &EventFilters) -> EventQuery {
        let query = EventQuery::unfiltered();

        match self {
            Profile::StartupEvent => {
                query.with("selectedEventName", filters.event_name.as_deref())
            }
            Profile::DateRange => query
                .with(
                    "startDate",
                    filters.start_date.as_deref().map(range_start_param).as_deref(),
                )
                .with(
                    "endDate",
                    filters.end_date.as_deref().map(range_end_param).as_deref(),
                )
                .with("location", filters.location.as_deref()),
            Profile::SingleDate => query.with("selectedDate", filters.date.as_deref()),
        }
    }
}

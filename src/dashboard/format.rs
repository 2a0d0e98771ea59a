use crate::backend::model::Event;
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;
use voca_rs::escape::escape_html;

const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

lazy_static! {
    static ref ISO_DATE_PREFIX: Regex =
        Regex::new(r"^(\d{4})-(\d{2})-(\d{2})(?:$|[T ])").expect("Failed to create ISO date regex");
    static ref ISO_DATE_ONLY: Regex =
        Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("Failed to create ISO date regex");
}

/// `2025-05-21` or `2025-05-21T00:00:00Z` becomes `21/05/2025`.
/// Anything that isn't an ISO 8601 date is returned unchanged.
pub fn format_date(date: &str) -> String {
    match parse_calendar_date(date) {
        Some(parsed) => parsed.format(DISPLAY_DATE_FORMAT).to_string(),
        None => {
            debug!("Not an ISO date, leaving it as is: '{}'", date);
            date.to_string()
        }
    }
}

fn parse_calendar_date(date: &str) -> Option<NaiveDate> {
    let captures = ISO_DATE_PREFIX.captures(date.trim())?;

    NaiveDate::from_ymd_opt(
        captures[1].parse().ok()?,
        captures[2].parse().ok()?,
        captures[3].parse().ok()?,
    )
}

pub fn format_date_range(initial_date: &str, final_date: &str) -> String {
    let start = format_date(initial_date);
    let end = format_date(final_date);

    if end.is_empty() || start == end {
        start
    } else if start.is_empty() {
        end
    } else {
        format!("{} - {}", start, end)
    }
}

/// Date inputs become the datetimes the backend compares against,
/// anything more precise is sent as typed.
pub fn range_start_param(date: &str) -> String {
    if ISO_DATE_ONLY.is_match(date.trim()) {
        format!("{}T00:00:00Z", date.trim())
    } else {
        date.trim().to_string()
    }
}

pub fn range_end_param(date: &str) -> String {
    if ISO_DATE_ONLY.is_match(date.trim()) {
        format!("{}T23:59:59Z", date.trim())
    } else {
        date.trim().to_string()
    }
}

pub fn popup_html(event: &Event, analyze_button: bool) -> String {
    let mut html = format!(
        "<b>{}</b><br>{}<br>{}<br><a href=\"{}\" target=\"_blank\">{}</a>",
        escape_html(&event.name),
        escape_html(&format_date_range(&event.initial_date, &event.final_date)),
        escape_html(&event.location),
        escape_html(&event.website),
        escape_html(&event.website),
    );

    if analyze_button {
        html.push_str("<br><button class=\"analyze-button\">Analyze relevance</button>");
    }

    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::model::LatLng;

    #[test_log::test]
    fn should_format_a_plain_date() {
        assert_eq!(format_date("2025-05-21"), "21/05/2025");
    }

    #[test_log::test]
    fn should_format_a_datetime_using_its_calendar_date() {
        assert_eq!(format_date("2025-05-21T00:00:00Z"), "21/05/2025");
        assert_eq!(format_date("2025-11-30T18:30:00.000+02:00"), "30/11/2025");
    }

    #[test_log::test]
    fn when_a_date_is_malformed_should_return_it_unchanged() {
        assert_eq!(format_date("next tuesday"), "next tuesday");
        assert_eq!(format_date("2025-13-45"), "2025-13-45");
        assert_eq!(format_date(""), "");
    }

    #[test_log::test]
    fn when_both_dates_are_the_same_day_should_show_it_once() {
        assert_eq!(
            format_date_range("2025-05-21", "2025-05-21T00:00:00Z"),
            "21/05/2025"
        );
    }

    #[test_log::test]
    fn should_format_a_date_range() {
        assert_eq!(
            format_date_range("2025-05-21", "2025-05-23"),
            "21/05/2025 - 23/05/2025"
        );
    }

    #[test_log::test]
    fn date_inputs_should_be_sent_as_day_boundaries() {
        assert_eq!(range_start_param("2025-05-21"), "2025-05-21T00:00:00Z");
        assert_eq!(range_end_param("2025-05-23"), "2025-05-23T23:59:59Z");
        assert_eq!(
            range_start_param("2025-05-21T10:00:00Z"),
            "2025-05-21T10:00:00Z"
        );
    }

    #[test_log::test]
    fn popup_should_escape_event_text() {
        let event = Event {
            id: None,
            name: "<script>Slush</script>".to_string(),
            initial_date: "2025-11-30".to_string(),
            final_date: "2025-12-01".to_string(),
            location: "Helsinki".to_string(),
            website: "https://www.slush.org/".to_string(),
            position: Some(LatLng::new(60.1699, 24.9384)),
            description: None,
            theme: None,
        };

        let html = popup_html(&event, true);

        assert!(html.contains("&lt;script&gt;Slush"), "{}", html);
        assert!(!html.contains("<script>"), "{}", html);
        assert!(html.contains("30/11/2025 - 01/12/2025"), "{}", html);
        assert!(html.contains("analyze-button"), "{}", html);
        assert!(!popup_html(&event, false).contains("analyze-button"));
    }
}

//! Chronological day sections for the schedule list.

use crate::Event;
use chrono::{DateTime, Locale, TimeZone, Utc};
use serde::Serialize;
use std::fmt;

/// Section label for events whose kickoff time is unknown.
pub const UNSCHEDULED_LABEL: &str = "TBD";

/// Events sharing a weekday label, in kickoff order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DaySection {
    pub label: String,
    pub events: Vec<Event>,
}

/// Locale for date labels, from `LC_ALL`, `LC_TIME` or `LANG` in that order.
/// Unset or unknown values fall back to `en_US`.
pub fn system_locale() -> Locale {
    ["LC_ALL", "LC_TIME", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty())
        .and_then(|value| parse_locale(&value))
        .unwrap_or(Locale::en_US)
}

/// "fr_FR.UTF-8" and "de_DE@euro" name the same locales as "fr_FR" and "de_DE".
fn parse_locale(value: &str) -> Option<Locale> {
    let name = value.split(['.', '@']).next()?;
    Locale::try_from(name).ok()
}

/// Weekday name ("Sunday", "dimanche") of `date` as seen from `tz`.
pub fn weekday_label<Tz>(date: &DateTime<Utc>, tz: &Tz, locale: Locale) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    date.with_timezone(tz).format_localized("%A", locale).to_string()
}

/// Clock time of `date`: "1:00 PM" where the locale has an AM/PM marker,
/// "13:00" where it does not.
pub fn kickoff_time<Tz>(date: &DateTime<Tz>, locale: Locale) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let meridiem = date.format_localized("%p", locale).to_string();
    let pattern = if meridiem.trim().is_empty() { "%H:%M" } else { "%-I:%M %p" };
    date.format_localized(pattern, locale).to_string()
}

/// Sort events by kickoff and bucket them by weekday label.
///
/// Sections appear in the order their first event kicks off. An event joins
/// any existing section with the same label, so a slate spanning more than a
/// week folds the later games into the earlier section. Undated events sort
/// last under [`UNSCHEDULED_LABEL`]. Labels are English weekday names.
pub fn group_by_weekday<Tz>(events: Vec<Event>, tz: &Tz) -> Vec<DaySection>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    group_by_weekday_localized(events, tz, Locale::en_US)
}

/// [`group_by_weekday`] with weekday names in `locale`.
pub fn group_by_weekday_localized<Tz>(mut events: Vec<Event>, tz: &Tz, locale: Locale) -> Vec<DaySection>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    events.sort_by_key(|e| (e.date.is_none(), e.date));

    events.into_iter().fold(Vec::<DaySection>::new(), |mut sections, event| {
        let label = event
            .date
            .as_ref()
            .map(|d| weekday_label(d, tz, locale))
            .unwrap_or_else(|| UNSCHEDULED_LABEL.to_owned());

        match sections.iter_mut().find(|s| s.label == label) {
            Some(section) => section.events.push(event),
            None => sections.push(DaySection { label, events: vec![event] }),
        }
        sections
    })
}

/// Keep only events whose name or short name contains `query`
/// (case-insensitive). Sections left without events are dropped.
pub fn filter_sections(sections: &[DaySection], query: &str) -> Vec<DaySection> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return sections.to_vec();
    }

    sections
        .iter()
        .filter_map(|section| {
            let events: Vec<Event> = section
                .events
                .iter()
                .filter(|e| {
                    e.name.to_lowercase().contains(&needle)
                        || e.short_name.to_lowercase().contains(&needle)
                })
                .cloned()
                .collect();
            (!events.is_empty()).then(|| DaySection { label: section.label.clone(), events })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn event(id: &str, date: &str) -> Event {
        Event {
            id: id.into(),
            name: format!("Game {id}"),
            short_name: format!("G{id}"),
            date: Some(DateTime::parse_from_rfc3339(date).unwrap().with_timezone(&Utc)),
            ..Default::default()
        }
    }

    fn ids(sections: &[DaySection]) -> Vec<Vec<&str>> {
        sections
            .iter()
            .map(|s| s.events.iter().map(|e| e.id.as_str()).collect())
            .collect()
    }

    fn labels(sections: &[DaySection]) -> Vec<&str> {
        sections.iter().map(|s| s.label.as_str()).collect()
    }

    #[test]
    fn empty_input_yields_no_sections() {
        assert!(group_by_weekday(Vec::new(), &Utc).is_empty());
    }

    #[test]
    fn same_sunday_lands_in_one_section_in_kickoff_order() {
        let events = vec![
            event("late", "2024-09-08T20:25:00Z"),
            event("early", "2024-09-08T17:00:00Z"),
        ];
        let sections = group_by_weekday(events, &Utc);
        assert_eq!(labels(&sections), vec!["Sunday"]);
        assert_eq!(ids(&sections), vec![vec!["early", "late"]]);
    }

    #[test]
    fn flattened_output_is_sorted_input() {
        let events = vec![
            event("mon", "2024-09-10T00:15:00Z"),
            event("thu", "2024-09-06T00:20:00Z"),
            event("sun2", "2024-09-08T20:25:00Z"),
            event("sun1", "2024-09-08T17:00:00Z"),
            event("fri", "2024-09-06T23:15:00Z"),
        ];
        let sections = group_by_weekday(events, &Utc);
        let flat: Vec<&str> = sections
            .iter()
            .flat_map(|s| s.events.iter().map(|e| e.id.as_str()))
            .collect();
        assert_eq!(flat, vec!["thu", "fri", "sun1", "sun2", "mon"]);
    }

    #[test]
    fn section_order_follows_first_kickoff_not_alphabet() {
        let events = vec![
            event("c", "2024-09-10T00:15:00Z"), // Tuesday UTC
            event("a", "2024-09-06T00:20:00Z"), // Friday UTC
            event("b", "2024-09-08T17:00:00Z"), // Sunday UTC
        ];
        let sections = group_by_weekday(events, &Utc);
        assert_eq!(labels(&sections), vec!["Friday", "Sunday", "Tuesday"]);
    }

    #[test]
    fn labels_follow_the_given_time_zone() {
        // 00:20 UTC Friday is Thursday evening on the US east coast.
        let eastern = FixedOffset::west_opt(4 * 3600).unwrap();
        let sections = group_by_weekday(vec![event("tnf", "2024-09-06T00:20:00Z")], &eastern);
        assert_eq!(labels(&sections), vec!["Thursday"]);
    }

    #[test]
    fn labels_follow_the_given_locale() {
        let events = vec![
            event("sun", "2024-09-08T17:00:00Z"),
            event("mon", "2024-09-09T17:00:00Z"),
        ];
        let sections = group_by_weekday_localized(events, &Utc, Locale::fr_FR);
        assert_eq!(labels(&sections), vec!["dimanche", "lundi"]);
    }

    #[test]
    fn kickoff_time_uses_24_hours_without_a_meridiem() {
        let date = Utc.with_ymd_and_hms(2024, 9, 8, 17, 0, 0).unwrap();
        assert_eq!(kickoff_time(&date, Locale::en_US), "5:00 PM");
        assert_eq!(kickoff_time(&date, Locale::fr_FR), "17:00");
    }

    #[test]
    fn locale_names_drop_encoding_and_modifier() {
        assert_eq!(parse_locale("fr_FR.UTF-8"), Some(Locale::fr_FR));
        assert_eq!(parse_locale("de_DE@euro"), Some(Locale::de_DE));
        assert_eq!(parse_locale("en_US"), Some(Locale::en_US));
        assert_eq!(parse_locale("not-a-locale"), None);
    }

    #[test]
    fn repeated_weekday_joins_existing_section() {
        let events = vec![
            event("wk1", "2024-09-08T17:00:00Z"),
            event("mon", "2024-09-09T17:00:00Z"),
            event("wk2", "2024-09-15T17:00:00Z"),
        ];
        let sections = group_by_weekday(events, &Utc);
        assert_eq!(labels(&sections), vec!["Sunday", "Monday"]);
        assert_eq!(ids(&sections), vec![vec!["wk1", "wk2"], vec!["mon"]]);
    }

    #[test]
    fn undated_events_go_last_under_tbd() {
        let undated = Event { id: "tbd".into(), ..Default::default() };
        let events = vec![undated, event("sun", "2024-09-08T17:00:00Z")];
        let sections = group_by_weekday(events, &Utc);
        assert_eq!(labels(&sections), vec!["Sunday", UNSCHEDULED_LABEL]);
    }

    #[test]
    fn filter_matches_name_and_short_name_case_insensitively() {
        let sections = group_by_weekday(
            vec![
                event("1", "2024-09-08T17:00:00Z"),
                event("2", "2024-09-09T17:00:00Z"),
            ],
            &Utc,
        );
        let hits = filter_sections(&sections, "g2");
        assert_eq!(labels(&hits), vec!["Monday"]);
        assert_eq!(ids(&hits), vec![vec!["2"]]);

        let hits = filter_sections(&sections, "GAME 1");
        assert_eq!(ids(&hits), vec![vec!["1"]]);
    }

    #[test]
    fn blank_filter_keeps_everything() {
        let sections = group_by_weekday(vec![event("1", "2024-09-08T17:00:00Z")], &Utc);
        assert_eq!(filter_sections(&sections, "  ").len(), 1);
        assert!(filter_sections(&sections, "zzz").is_empty());
    }
}

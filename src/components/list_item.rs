use chrono::{Locale, TimeZone};
use nfl_api::{Event, GameStatus};
use nfl_api::schedule::kickoff_time;
use std::fmt;

/// Display strings for one schedule row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventRow {
    pub title: String,
    pub subtitle: String,
    /// "FINAL 27-20" once the game is over.
    pub tag: Option<String>,
    /// "Q3 7:11" while the game is on.
    pub live: Option<String>,
    pub time: String,
    pub weekday: String,
    pub matchup: String, // "BAL vs KC"
}

impl EventRow {
    pub fn new<Tz>(event: &Event, tz: &Tz, locale: Locale) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let local = event.date.map(|d| d.with_timezone(tz));
        let live = match event.status.kind {
            GameStatus::InProgress => Some(match (event.status.period, event.status.clock.as_deref()) {
                (Some(p), Some(clock)) => format!("Q{p} {clock}"),
                _ => "LIVE".to_string(),
            }),
            GameStatus::Postponed => Some("PPD".to_string()),
            _ => None,
        };
        let abbrev = |c: Option<&nfl_api::Competitor>| {
            c.map(|c| c.team.abbrev.clone())
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| "TBD".to_string())
        };

        Self {
            title: event.name.clone(),
            subtitle: event.short_name.clone(),
            tag: event.final_score().map(|s| format!("FINAL {s}")),
            live,
            time: local
                .as_ref()
                .map(|d| kickoff_time(d, locale))
                .unwrap_or_else(|| "TBD".to_string()),
            weekday: local
                .as_ref()
                .map(|d| d.format_localized("%A", locale).to_string())
                .unwrap_or_default(),
            matchup: format!("{} vs {}", abbrev(event.away()), abbrev(event.home())),
        }
    }

    /// Accessory column text, right of the title.
    pub fn accessories(&self) -> String {
        let status = self.tag.as_deref().or(self.live.as_deref());
        match status {
            Some(status) => format!("{status}  {}  {}  {}", self.time, self.weekday, self.matchup),
            None => format!("{}  {}  {}", self.time, self.weekday, self.matchup),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use nfl_api::client::parse_scoreboard;

    const SCOREBOARD: &str = include_str!("../../api/tests/fixtures/scoreboard.json");

    fn row(short_name: &str) -> EventRow {
        let board = parse_scoreboard(SCOREBOARD).unwrap();
        let event = board.events.iter().find(|e| e.short_name == short_name).unwrap();
        EventRow::new(event, &Utc, Locale::en_US)
    }

    #[test]
    fn completed_game_gets_final_tag() {
        let r = row("BAL @ KC");
        assert_eq!(r.tag.as_deref(), Some("FINAL 20-27"));
        assert_eq!(r.matchup, "BAL vs KC");
        assert_eq!(r.weekday, "Friday");
        assert_eq!(r.time, "12:20 AM");
    }

    #[test]
    fn live_game_shows_clock() {
        let r = row("WSH @ TB");
        assert_eq!(r.tag, None);
        assert_eq!(r.live.as_deref(), Some("Q3 7:11"));
        assert!(r.accessories().starts_with("Q3 7:11  8:25 PM  Sunday"));
    }

    #[test]
    fn scheduled_game_has_no_status() {
        let r = row("LAR @ DET");
        assert_eq!(r.tag, None);
        assert_eq!(r.live, None);
        assert_eq!(r.accessories(), "12:20 AM  Monday  LAR vs DET");
    }

    #[test]
    fn weekday_follows_locale() {
        let board = parse_scoreboard(SCOREBOARD).unwrap();
        let event = board.events.iter().find(|e| e.short_name == "BAL @ KC").unwrap();
        assert_eq!(EventRow::new(event, &Utc, Locale::fr_FR).weekday, "vendredi");
    }

    #[test]
    fn undated_event_falls_back_to_tbd() {
        let r = EventRow::new(&Event::default(), &Utc, Locale::en_US);
        assert_eq!(r.time, "TBD");
        assert_eq!(r.matchup, "TBD vs TBD");
    }
}

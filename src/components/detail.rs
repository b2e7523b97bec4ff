//! Markdown game document and the metadata sidebar for the detail view.

use chrono::{Locale, TimeZone};
use nfl_api::{Competitor, Event, Leader, Link};
use nfl_api::schedule::kickoff_time;
use std::fmt::{self, Write};

/// One labeled row of the detail sidebar.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataField {
    pub label: &'static str,
    pub value: String,
}

fn team_label(c: &Competitor) -> String {
    let name = if c.team.display_name.is_empty() {
        c.team.short_name.as_str()
    } else {
        c.team.display_name.as_str()
    };
    if c.team.abbrev.is_empty() {
        name.to_owned()
    } else {
        format!("{name} ({})", c.team.abbrev)
    }
}

/// Render one event as a markdown document.
pub fn format_event_markdown(event: &Event) -> String {
    let mut md = String::new();
    write_event_markdown(&mut md, event).expect("writing to a String is infallible");
    md
}

fn write_event_markdown(md: &mut String, event: &Event) -> fmt::Result {
    let competition = event.competition();

    match (event.away(), event.home()) {
        (Some(away), Some(home)) => {
            writeln!(md, "## {} @ {}\n", team_label(away), team_label(home))?
        }
        _ => writeln!(md, "## {}\n", event.name)?,
    }

    if let Some(score) = event.final_score() {
        writeln!(md, "**Final:** {score}")?;
    } else if let Some(detail) = event.status.short_detail.as_deref() {
        writeln!(md, "**Status:** {detail}")?;
    }

    let Some(competition) = competition else {
        return write_links(md, &event_links(event));
    };

    if let Some(venue) = competition.venue.as_ref().map(|v| v.display()).filter(|v| !v.is_empty()) {
        writeln!(md, "**Venue:** {venue}")?;
    }
    if let Some(odds) = &competition.odds {
        match (odds.details.as_deref(), odds.over_under) {
            (Some(details), Some(ou)) => writeln!(md, "**Odds:** {details} (O/U {ou})")?,
            (Some(details), None) => writeln!(md, "**Odds:** {details}")?,
            (None, Some(ou)) => writeln!(md, "**Odds:** O/U {ou}")?,
            (None, None) => {}
        }
    }
    if let Some(weather) = event.weather.as_ref().and_then(|w| w.summary()) {
        writeln!(md, "**Weather:** {weather}")?;
    }
    for note in &competition.notes {
        writeln!(md, "\n> {note}")?;
    }
    if let Some(headline) = &competition.headline {
        writeln!(md, "\n_{headline}_")?;
    }

    if !competition.broadcasts.is_empty() {
        writeln!(md, "\n### Broadcasting Networks\n")?;
        for broadcast in &competition.broadcasts {
            for name in &broadcast.names {
                if broadcast.market.is_empty() {
                    writeln!(md, "- **{name}**")?;
                } else {
                    writeln!(md, "- **{name}** ({})", broadcast.market)?;
                }
            }
        }
    }

    let groups = leader_groups(event);
    if !groups.is_empty() {
        writeln!(md, "\n### Leaders")?;
        for (team, leaders) in groups {
            if !team.is_empty() {
                writeln!(md, "\n#### {team}\n")?;
            }
            for (category, top) in leaders {
                writeln!(md, "- **{category}:** {} ({})", top.athlete, top.display_value)?;
            }
        }
    }

    write_links(md, &event_links(event))
}

type LeaderGroup<'a> = (String, Vec<(&'a str, &'a Leader)>);

/// Top performer per category, grouped by team with the away side first.
///
/// ESPN nests leaders under each competitor on some feeds and lists them once
/// per competition, tagged with a team id, on others. Competitor leaders win
/// when present. Competition leaders whose team matches neither side are
/// grouped under an empty team label.
fn leader_groups(event: &Event) -> Vec<LeaderGroup<'_>> {
    let sides: Vec<&Competitor> = [event.away(), event.home()].into_iter().flatten().collect();

    let nested: Vec<LeaderGroup> = sides
        .iter()
        .copied()
        .filter(|c| !c.leaders.is_empty())
        .map(|c| {
            let tops = c
                .leaders
                .iter()
                .filter_map(|cat| cat.leaders.first().map(|l| (cat.display_name.as_str(), l)))
                .collect();
            (c.team.abbrev.clone(), tops)
        })
        .collect();
    if !nested.is_empty() {
        return nested;
    }

    let Some(competition) = event.competition() else {
        return Vec::new();
    };

    let mut groups: Vec<LeaderGroup> =
        sides.iter().map(|c| (c.team.abbrev.clone(), Vec::new())).collect();
    let mut unattributed = Vec::new();
    for category in &competition.leaders {
        for leader in &category.leaders {
            let side = leader
                .team_id
                .as_deref()
                .and_then(|id| sides.iter().position(|c| c.team.id == id));
            let bucket = match side {
                Some(i) => &mut groups[i].1,
                None => &mut unattributed,
            };
            // First leader listed per team is the category leader.
            if !bucket.iter().any(|(name, _)| *name == category.display_name) {
                bucket.push((category.display_name.as_str(), leader));
            }
        }
    }
    if !unattributed.is_empty() {
        groups.push((String::new(), unattributed));
    }
    groups.retain(|(_, leaders)| !leaders.is_empty());
    groups
}

fn write_links(md: &mut String, links: &[Link]) -> fmt::Result {
    if links.is_empty() {
        return Ok(());
    }
    writeln!(md, "\n### Useful Links\n")?;
    for link in links {
        writeln!(md, "- [{}]({})", link.text, link.href)?;
    }
    Ok(())
}

/// Outbound links for an event: its own links, then the ticket purchase page.
pub fn event_links(event: &Event) -> Vec<Link> {
    let mut links = event.links.clone();
    let ticket = event
        .competition()
        .and_then(|c| c.tickets.as_ref())
        .and_then(|t| t.link.clone());
    if let Some(href) = ticket
        && !links.iter().any(|l| l.href == href)
    {
        links.push(Link {
            rel: vec!["tickets".into()],
            href,
            text: "Buy Tickets".into(),
            is_external: true,
        });
    }
    links
}

/// Sidebar fields for the detail view. Fields without a value are omitted.
pub fn metadata<Tz>(event: &Event, tz: &Tz, locale: Locale) -> Vec<MetadataField>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut fields = Vec::new();
    let mut push = |label: &'static str, value: Option<String>| {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            fields.push(MetadataField { label, value });
        }
    };

    let local = event.date.map(|d| d.with_timezone(tz));
    push("Date", local.as_ref().map(|d| d.format_localized("%A, %B %-d", locale).to_string()));
    push("Time", local.as_ref().map(|d| kickoff_time(d, locale)));

    let competition = event.competition();
    push(
        "Venue",
        competition.and_then(|c| c.venue.as_ref()).map(|v| v.display()),
    );
    push("Score", event.final_score());
    push(
        "Broadcasts",
        competition.map(|c| {
            c.broadcasts
                .iter()
                .flat_map(|b| b.names.iter().cloned())
                .collect::<Vec<_>>()
                .join(", ")
        }),
    );
    push(
        "Away Record",
        event
            .away()
            .and_then(|c| c.overall_record().map(|r| format!("{} {r}", c.team.abbrev))),
    );
    push(
        "Home Record",
        event
            .home()
            .and_then(|c| c.overall_record().map(|r| format!("{} {r}", c.team.abbrev))),
    );
    push("Weather", event.weather.as_ref().and_then(|w| w.summary()));

    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use nfl_api::client::parse_scoreboard;

    const SCOREBOARD: &str = include_str!("../../api/tests/fixtures/scoreboard.json");

    fn fixture_event(short_name: &str) -> Event {
        parse_scoreboard(SCOREBOARD)
            .expect("fixture parses")
            .events
            .into_iter()
            .find(|e| e.short_name == short_name)
            .expect("fixture event exists")
    }

    fn value<'a>(fields: &'a [MetadataField], label: &str) -> Option<&'a str> {
        fields.iter().find(|f| f.label == label).map(|f| f.value.as_str())
    }

    #[test]
    fn completed_game_shows_away_dash_home() {
        let md = format_event_markdown(&fixture_event("PIT @ ATL"));
        assert!(md.starts_with("## Pittsburgh Steelers (PIT) @ Atlanta Falcons (ATL)\n"));
        assert!(md.contains("**Final:** 18-10"), "{md}");
        assert!(!md.contains("**Status:**"));
    }

    #[test]
    fn scheduled_game_omits_score() {
        let md = format_event_markdown(&fixture_event("LAR @ DET"));
        assert!(!md.contains("**Final:**"));
        assert!(!md.contains("0-0"), "pre-game zeros must not show as a score: {md}");
        assert!(md.contains("**Status:** 9/8 - 8:20 PM EDT"));
    }

    #[test]
    fn live_game_omits_score() {
        let md = format_event_markdown(&fixture_event("WSH @ TB"));
        assert!(!md.contains("13-23"));
        assert!(md.contains("**Status:** 7:11 - 3rd"));
    }

    #[test]
    fn document_embeds_venue_odds_weather_broadcasts() {
        let md = format_event_markdown(&fixture_event("LAR @ DET"));
        assert!(md.contains("**Venue:** Ford Field (Detroit, MI)"));
        assert!(md.contains("**Odds:** DET -3.5 (O/U 51.5)"));
        assert!(md.contains("**Weather:** Clear, 61°F"));
        assert!(md.contains("### Broadcasting Networks\n\n- **NBC** (national)"));
    }

    #[test]
    fn document_lists_leaders_per_team_away_first() {
        let md = format_event_markdown(&fixture_event("PIT @ ATL"));
        let pit = md.find("#### PIT").expect("away leaders");
        let atl = md.find("#### ATL").expect("home leaders");
        assert!(pit < atl);
        assert!(md.contains("- **Rushing Yards:** Najee Harris (70 YDS)"));
        assert!(md.contains("- **Passing Yards:** Kirk Cousins (155 YDS, 1 TD, 2 INT)"));
    }

    #[test]
    fn competition_level_leaders_are_attributed_by_team_id() {
        let board = parse_scoreboard(include_str!(
            "../../api/tests/fixtures/scoreboard_competition_leaders.json"
        ))
        .expect("fixture parses");
        let md = format_event_markdown(&board.events[0]);

        let pit = md.find("#### PIT").expect("away leaders");
        let atl = md.find("#### ATL").expect("home leaders");
        assert!(pit < atl, "{md}");
        let fields = md.find("Justin Fields").unwrap();
        let harris = md.find("- **Rushing Leader:** Najee Harris (70 YDS)").unwrap();
        let cousins = md.find("- **Passing Leader:** Kirk Cousins (155 YDS, 1 TD, 2 INT)").unwrap();
        assert!(pit < fields && fields < harris && harris < atl && atl < cousins, "{md}");
    }

    #[test]
    fn leaders_without_a_known_team_are_still_listed() {
        let board = parse_scoreboard(include_str!(
            "../../api/tests/fixtures/scoreboard_competition_leaders.json"
        ))
        .expect("fixture parses");
        let md = format_event_markdown(&board.events[0]);
        assert!(md.contains("- **Rushing Leader:** Bijan Robinson (42 YDS)"), "{md}");
    }

    #[test]
    fn document_ends_with_links() {
        let md = format_event_markdown(&fixture_event("LAR @ DET"));
        assert!(md.contains("### Useful Links"));
        assert!(md.contains("- [Gamecast](https://www.espn.com/nfl/game/_/gameId/401671805/rams-lions)"));
        assert!(md.contains("- [Buy Tickets](https://www.vividseats.com/detroit-lions-tickets)"));
    }

    #[test]
    fn sparse_event_still_renders() {
        let event = Event { name: "TBD at TBD".into(), ..Default::default() };
        let md = format_event_markdown(&event);
        assert_eq!(md, "## TBD at TBD\n\n");
    }

    #[test]
    fn ticket_link_is_appended_once() {
        let links = event_links(&fixture_event("LAR @ DET"));
        assert_eq!(links.len(), 2);
        assert_eq!(links[1].text, "Buy Tickets");
        assert!(event_links(&fixture_event("WSH @ TB")).is_empty());
    }

    #[test]
    fn metadata_for_completed_game() {
        let fields = metadata(&fixture_event("PIT @ ATL"), &Utc, Locale::en_US);
        assert_eq!(value(&fields, "Date"), Some("Sunday, September 8"));
        assert_eq!(value(&fields, "Time"), Some("5:00 PM"));
        assert_eq!(value(&fields, "Score"), Some("18-10"));
        assert_eq!(value(&fields, "Broadcasts"), Some("FOX"));
        assert_eq!(value(&fields, "Away Record"), Some("PIT 1-0"));
        assert_eq!(value(&fields, "Home Record"), Some("ATL 0-1"));
        assert_eq!(value(&fields, "Weather"), None);
    }

    #[test]
    fn metadata_skips_score_before_final() {
        let fields = metadata(&fixture_event("LAR @ DET"), &Utc, Locale::en_US);
        assert_eq!(value(&fields, "Score"), None);
        assert_eq!(value(&fields, "Date"), Some("Monday, September 9"));
        assert_eq!(value(&fields, "Weather"), Some("Clear, 61°F"));
        let labels: Vec<&str> = fields.iter().map(|f| f.label).collect();
        assert_eq!(
            labels,
            vec!["Date", "Time", "Venue", "Broadcasts", "Away Record", "Home Record", "Weather"]
        );
    }
}

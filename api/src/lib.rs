pub mod client;
pub mod espn;
pub mod schedule;

use chrono::{DateTime, Utc};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Domain types, independent of the ESPN wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
pub struct Scoreboard {
    pub league: String, // "NFL"
    pub season_year: Option<u16>,
    pub week: Option<u32>,
    pub events: Vec<Event>,
}

/// One scheduled game.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Event {
    pub id: String,
    pub name: String,       // "Kansas City Chiefs at Baltimore Ravens"
    pub short_name: String, // "KC @ BAL"
    pub date: Option<DateTime<Utc>>,
    pub week: Option<u32>,
    pub status: Status,
    pub competitions: Vec<Competition>,
    pub links: Vec<Link>,
    pub weather: Option<Weather>,
}

impl Event {
    /// The match inside this event. ESPN models it as a list; for the NFL
    /// there is always exactly one.
    pub fn competition(&self) -> Option<&Competition> {
        self.competitions.first()
    }

    pub fn home(&self) -> Option<&Competitor> {
        self.competition()?.home()
    }

    pub fn away(&self) -> Option<&Competitor> {
        self.competition()?.away()
    }

    pub fn is_completed(&self) -> bool {
        self.status.completed
    }

    /// `"{away}-{home}"` once the game is over, `None` before that.
    pub fn final_score(&self) -> Option<String> {
        if !self.is_completed() {
            return None;
        }
        let away = self.away()?;
        let home = self.home()?;
        Some(format!("{}-{}", away.score, home.score))
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Competition {
    pub id: String,
    pub attendance: Option<u32>,
    pub neutral_site: bool,
    pub venue: Option<Venue>,
    /// Home team first, away team second. Position is authoritative.
    pub competitors: Vec<Competitor>,
    pub broadcasts: Vec<Broadcast>,
    pub status: Status,
    pub odds: Option<Odds>,
    pub notes: Vec<String>,
    pub tickets: Option<Tickets>,
    pub leaders: Vec<LeaderCategory>,
    pub headline: Option<String>,
}

impl Competition {
    pub fn home(&self) -> Option<&Competitor> {
        self.competitors.first()
    }

    pub fn away(&self) -> Option<&Competitor> {
        self.competitors.get(1)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Venue {
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub capacity: Option<u32>,
    pub indoor: Option<bool>,
}

impl Venue {
    /// "M&T Bank Stadium (Baltimore, MD)", degrading to whatever is known.
    pub fn display(&self) -> String {
        let place = match (&self.city, &self.state) {
            (Some(city), Some(state)) => Some(format!("{city}, {state}")),
            (Some(city), None) => Some(city.clone()),
            (None, Some(state)) => Some(state.clone()),
            (None, None) => None,
        };
        match (self.name.is_empty(), place) {
            (false, Some(place)) => format!("{} ({place})", self.name),
            (false, None) => self.name.clone(),
            (true, Some(place)) => place,
            (true, None) => String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Competitor {
    pub id: String,
    pub team: Team,
    /// Score as sent by the API, "" before kickoff.
    pub score: String,
    pub winner: Option<bool>,
    pub records: Vec<Record>,
    pub leaders: Vec<LeaderCategory>,
    pub linescores: Vec<f64>,
}

impl Competitor {
    /// Overall ("total") record summary, e.g. "11-6".
    pub fn overall_record(&self) -> Option<&str> {
        self.records
            .iter()
            .find(|r| r.kind == "total")
            .or_else(|| self.records.first())
            .map(|r| r.summary.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Team {
    pub id: String,
    pub location: String,   // "Kansas City"
    pub name: String,       // "Chiefs"
    pub display_name: String, // "Kansas City Chiefs"
    pub short_name: String, // "Chiefs"
    pub abbrev: String,     // "KC"
    pub color: Option<String>, // hex color from ESPN
    pub logo: Option<String>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Record {
    pub name: String,    // "overall", "Home", "Road"
    pub kind: String,    // "total", "home", "road"
    pub summary: String, // "11-6"
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum GameStatus {
    #[default]
    Scheduled,
    InProgress,
    Final,
    Postponed,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Status {
    pub kind: GameStatus,
    pub completed: bool,
    pub clock: Option<String>,
    pub period: Option<u8>,
    pub detail: Option<String>,       // "Sun, September 8th at 1:00 PM EDT"
    pub short_detail: Option<String>, // "9/8 - 1:00 PM EDT", "Final"
}

impl Status {
    pub fn is_live(&self) -> bool {
        self.kind == GameStatus::InProgress
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Broadcast {
    pub market: String, // "national"
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Odds {
    pub provider: Option<String>,
    pub details: Option<String>, // "KC -3.5"
    pub over_under: Option<f64>,
    pub spread: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Weather {
    pub display_value: Option<String>, // "Partly sunny"
    pub temperature: Option<i32>,
    pub high_temperature: Option<i32>,
}

impl Weather {
    /// "Partly sunny, 75°F"
    pub fn summary(&self) -> Option<String> {
        let temp = self.temperature.or(self.high_temperature);
        match (self.display_value.as_deref(), temp) {
            (Some(desc), Some(t)) => Some(format!("{desc}, {t}°F")),
            (Some(desc), None) => Some(desc.to_owned()),
            (None, Some(t)) => Some(format!("{t}°F")),
            (None, None) => None,
        }
    }
}

/// A statistical category (passing yards, rushing yards, ...) with its top performers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LeaderCategory {
    pub name: String,         // "passingYards"
    pub display_name: String, // "Passing Yards"
    pub leaders: Vec<Leader>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Leader {
    pub athlete: String,       // "Patrick Mahomes"
    pub position: Option<String>,
    pub jersey: Option<String>,
    pub display_value: String, // "20/28, 291 YDS, 1 TD, 1 INT"
    pub value: f64,
    /// Team the leader plays for, when ESPN says so.
    pub team_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Tickets {
    pub summary: String, // "Tickets as low as $120"
    pub available: Option<u32>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Link {
    pub rel: Vec<String>,
    pub href: String,
    pub text: String,
    pub is_external: bool,
}

/// A news article from the league feed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Article {
    pub id: String,
    pub headline: String,
    pub description: Option<String>,
    pub published: Option<DateTime<Utc>>,
    pub image: Option<String>,
    pub url: Option<String>,
}

//! ESPN API raw wire types: serde shapes for deserializing ESPN responses.
//! These map to our clean domain types via the mapping functions in client.rs.
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Scoreboard  (site v2 API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScoreboardResponse {
    pub leagues: Option<Vec<EspnLeague>>,
    pub season: Option<EspnSeason>,
    pub week: Option<EspnWeek>,
    pub events: Option<Vec<EspnEvent>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnLeague {
    pub id: Option<String>,
    pub name: Option<String>,
    pub abbreviation: Option<String>,
    pub slug: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnSeason {
    pub year: Option<u16>,
    /// Season type id on the top-level object (1 = pre, 2 = regular, 3 = post).
    #[serde(rename = "type")]
    pub season_type: Option<serde_json::Value>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnWeek {
    pub number: Option<u32>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnEvent {
    pub id: Option<String>,
    pub uid: Option<String>,
    pub date: Option<String>, // "2024-09-08T17:00Z"
    pub name: Option<String>,
    #[serde(rename = "shortName")]
    pub short_name: Option<String>,
    pub season: Option<EspnSeason>,
    pub week: Option<EspnWeek>,
    pub competitions: Option<Vec<EspnCompetition>>,
    pub links: Option<Vec<EspnLink>>,
    pub status: Option<EspnStatus>,
    pub weather: Option<EspnWeather>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCompetition {
    pub id: Option<String>,
    pub date: Option<String>,
    pub attendance: Option<u32>,
    #[serde(rename = "neutralSite")]
    pub neutral_site: Option<bool>,
    pub venue: Option<EspnVenue>,
    pub competitors: Option<Vec<EspnCompetitor>>,
    pub notes: Option<Vec<EspnNote>>,
    pub status: Option<EspnStatus>,
    pub broadcasts: Option<Vec<EspnBroadcast>>,
    pub leaders: Option<Vec<EspnLeaderCategory>>,
    pub odds: Option<Vec<EspnOdds>>,
    pub tickets: Option<Vec<EspnTicket>>,
    pub headlines: Option<Vec<EspnHeadline>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnVenue {
    pub id: Option<String>,
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
    pub address: Option<EspnAddress>,
    pub capacity: Option<u32>,
    pub indoor: Option<bool>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnAddress {
    pub city: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnCompetitor {
    pub id: Option<String>,
    pub order: Option<u8>,
    #[serde(rename = "homeAway")]
    pub home_away: Option<String>, // "home" | "away"
    pub winner: Option<bool>,
    pub team: Option<EspnTeam>,
    pub score: Option<String>, // ESPN sends scores as strings
    pub linescores: Option<Vec<EspnLinescore>>,
    pub records: Option<Vec<EspnRecord>>,
    pub leaders: Option<Vec<EspnLeaderCategory>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnTeam {
    pub id: Option<String>,
    pub location: Option<String>,
    pub name: Option<String>,
    pub abbreviation: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(rename = "shortDisplayName")]
    pub short_display_name: Option<String>,
    pub color: Option<String>,
    pub logo: Option<String>,
    pub links: Option<Vec<EspnLink>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnLink {
    #[serde(default)]
    pub rel: Vec<String>,
    pub href: Option<String>,
    pub text: Option<String>,
    #[serde(rename = "shortText")]
    pub short_text: Option<String>,
    #[serde(rename = "isExternal")]
    pub is_external: Option<bool>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnLinescore {
    pub value: Option<f64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnRecord {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub record_type: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnStatus {
    pub clock: Option<f64>,
    #[serde(rename = "displayClock")]
    pub display_clock: Option<String>,
    pub period: Option<u8>,
    #[serde(rename = "type")]
    pub status_type: Option<EspnStatusType>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnStatusType {
    pub id: Option<String>,
    pub name: Option<String>, // "STATUS_SCHEDULED", "STATUS_IN_PROGRESS", "STATUS_FINAL"
    pub state: Option<String>, // "pre" | "in" | "post"
    pub completed: Option<bool>,
    pub detail: Option<String>,
    #[serde(rename = "shortDetail")]
    pub short_detail: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnBroadcast {
    pub market: Option<String>,
    #[serde(default)]
    pub names: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnLeaderCategory {
    pub name: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    pub leaders: Option<Vec<EspnLeader>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnLeader {
    #[serde(rename = "displayValue")]
    pub display_value: Option<String>,
    pub value: Option<f64>,
    pub athlete: Option<EspnAthlete>,
    /// Set on competition-level leaders, which are not nested under a competitor.
    pub team: Option<EspnTeamRef>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnTeamRef {
    pub id: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnAthlete {
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(rename = "shortName")]
    pub short_name: Option<String>,
    pub jersey: Option<String>,
    pub position: Option<EspnPosition>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnPosition {
    pub abbreviation: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnOdds {
    pub provider: Option<EspnOddsProvider>,
    pub details: Option<String>, // "KC -3.5"
    #[serde(rename = "overUnder")]
    pub over_under: Option<f64>,
    pub spread: Option<f64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnOddsProvider {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnWeather {
    #[serde(rename = "displayValue")]
    pub display_value: Option<String>,
    pub temperature: Option<i32>,
    #[serde(rename = "highTemperature")]
    pub high_temperature: Option<i32>,
    #[serde(rename = "conditionId")]
    pub condition_id: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnNote {
    #[serde(rename = "type")]
    pub note_type: Option<String>,
    pub headline: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnTicket {
    pub summary: Option<String>,
    #[serde(rename = "numberAvailable")]
    pub number_available: Option<u32>,
    pub links: Option<Vec<EspnLink>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnHeadline {
    pub description: Option<String>,
    #[serde(rename = "shortLinkText")]
    pub short_link_text: Option<String>,
}

// ---------------------------------------------------------------------------
// News  (site v2 API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct NewsResponse {
    pub header: Option<String>,
    pub articles: Option<Vec<EspnArticle>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnArticle {
    /// Numeric on most articles, absent on some video entries.
    pub id: Option<serde_json::Value>,
    #[serde(rename = "dataSourceIdentifier")]
    pub data_source_identifier: Option<String>,
    pub headline: Option<String>,
    pub description: Option<String>,
    pub published: Option<String>,
    pub images: Option<Vec<EspnImage>>,
    pub links: Option<EspnArticleLinks>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnImage {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnArticleLinks {
    pub web: Option<EspnHref>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnHref {
    pub href: Option<String>,
}

use crate::espn::{
    EspnCompetition, EspnCompetitor, EspnEvent, EspnLeaderCategory, EspnLink, EspnStatus,
    EspnTeam, NewsResponse, ScoreboardResponse,
};
use crate::{
    Article, Broadcast, Competition, Competitor, Event, GameStatus, Leader, LeaderCategory, Link,
    Odds, Record, Scoreboard, Status, Team, Tickets, Venue, Weather,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use log::{debug, warn};
use reqwest::Client;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const ESPN_NFL_SITE_V2: &str = "https://site.api.espn.com/apis/site/v2/sports/football/nfl";

/// NFL API client backed by ESPN's public site endpoints.
#[derive(Debug, Clone)]
pub struct NflApi {
    client: Client,
    timeout: Duration,
    base_url: String,
    /// Local ESPN-format scoreboard document used instead of the network.
    snapshot: Option<PathBuf>,
}

impl Default for NflApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("nfltui/0.1 (terminal scoreboard)")
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_secs(10),
            base_url: ESPN_NFL_SITE_V2.to_owned(),
            snapshot: None,
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    Snapshot(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Snapshot(msg) => write!(f, "Snapshot error: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl NflApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Client configured from the environment:
    /// `NFLTUI_API_BASE` overrides the ESPN base URL and
    /// `NFLTUI_SCOREBOARD_JSON` points at a local scoreboard snapshot.
    pub fn from_env() -> Self {
        let mut api = Self::default();
        if let Ok(base) = std::env::var("NFLTUI_API_BASE")
            && !base.trim().is_empty()
        {
            api = api.with_base_url(base.trim());
        }
        if let Ok(path) = std::env::var("NFLTUI_SCOREBOARD_JSON")
            && !path.trim().is_empty()
        {
            api = api.with_snapshot(path.trim());
        }
        api
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_snapshot(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot = Some(path.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch this week's scoreboard.
    pub async fn fetch_scoreboard(&self) -> ApiResult<Scoreboard> {
        if let Some(path) = &self.snapshot {
            debug!("loading scoreboard snapshot from {}", path.display());
            return load_scoreboard_file(path);
        }

        let url = format!("{}/scoreboard", self.base_url);
        let raw: ScoreboardResponse = self.get(&url).await?;
        Ok(map_scoreboard(raw))
    }

    /// Fetch the league news feed.
    pub async fn fetch_news(&self) -> ApiResult<Vec<Article>> {
        let url = format!("{}/news", self.base_url);
        let raw: NewsResponse = self.get(&url).await?;
        Ok(map_news(raw))
    }

    async fn get<T: Default + serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => {
                if e.status().map(|s| s.is_client_error()).unwrap_or(false) {
                    warn!("{url} answered {:?}, treating as empty", e.status());
                    Ok(T::default())
                } else {
                    Err(ApiError::Api(e, url.to_owned()))
                }
            }
        }
    }
}

/// Parse a scoreboard document saved from the ESPN endpoint.
pub fn load_scoreboard_file(path: &std::path::Path) -> ApiResult<Scoreboard> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ApiError::Snapshot(format!("could not read {}: {e}", path.display())))?;
    parse_scoreboard(&content)
        .map_err(|e| ApiError::Snapshot(format!("invalid scoreboard json at {}: {e}", path.display())))
}

/// Parse a scoreboard document from a JSON string.
pub fn parse_scoreboard(json: &str) -> Result<Scoreboard, serde_json::Error> {
    let raw: ScoreboardResponse = serde_json::from_str(json)?;
    Ok(map_scoreboard(raw))
}

// ---------------------------------------------------------------------------
// Mapping: ESPN wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_scoreboard(raw: ScoreboardResponse) -> Scoreboard {
    let league = raw
        .leagues
        .as_deref()
        .unwrap_or_default()
        .first()
        .and_then(|l| l.abbreviation.clone())
        .unwrap_or_else(|| "NFL".into());

    Scoreboard {
        league,
        season_year: raw.season.as_ref().and_then(|s| s.year),
        week: raw.week.as_ref().and_then(|w| w.number),
        events: raw.events.unwrap_or_default().iter().map(map_event).collect(),
    }
}

/// ESPN event dates usually omit seconds ("2024-09-08T17:00Z"), which RFC 3339 rejects.
fn parse_event_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%MZ")
        .ok()
        .map(|naive| naive.and_utc())
}

fn map_event(event: &EspnEvent) -> Event {
    let id = event.id.clone().unwrap_or_default();

    let date = event.date.as_deref().and_then(|d| {
        let parsed = parse_event_date(d);
        if parsed.is_none() {
            warn!("event {id}: unparseable date {d:?}");
        }
        parsed
    });

    let competitions: Vec<Competition> = event
        .competitions
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(map_competition)
        .collect();

    // Event-level status is authoritative; fall back to the competition's.
    let status = event
        .status
        .as_ref()
        .map(map_status)
        .or_else(|| competitions.first().map(|c| c.status.clone()))
        .unwrap_or_default();

    Event {
        name: event.name.clone().unwrap_or_default(),
        short_name: event.short_name.clone().unwrap_or_default(),
        date,
        week: event.week.as_ref().and_then(|w| w.number),
        status,
        competitions,
        links: map_links(event.links.as_deref()),
        weather: event.weather.as_ref().map(|w| Weather {
            display_value: w.display_value.clone(),
            temperature: w.temperature,
            high_temperature: w.high_temperature,
        }),
        id,
    }
}

fn map_competition(c: &EspnCompetition) -> Competition {
    let venue = c.venue.as_ref().map(|v| Venue {
        name: v.full_name.clone().unwrap_or_default(),
        city: v.address.as_ref().and_then(|a| a.city.clone()),
        state: v.address.as_ref().and_then(|a| a.state.clone()),
        capacity: v.capacity,
        indoor: v.indoor,
    });

    let broadcasts = c
        .broadcasts
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|b| Broadcast {
            market: b.market.clone().unwrap_or_default(),
            names: b.names.clone(),
        })
        .collect();

    let odds = c.odds.as_deref().unwrap_or_default().first().map(|o| Odds {
        provider: o.provider.as_ref().and_then(|p| p.name.clone()),
        details: o.details.clone(),
        over_under: o.over_under,
        spread: o.spread,
    });

    let notes = c
        .notes
        .as_deref()
        .unwrap_or_default()
        .iter()
        .filter_map(|n| n.headline.clone())
        .filter(|h| !h.is_empty())
        .collect();

    let tickets = c.tickets.as_deref().unwrap_or_default().first().map(|t| Tickets {
        summary: t.summary.clone().unwrap_or_default(),
        available: t.number_available,
        link: t
            .links
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find_map(|l| l.href.clone()),
    });

    Competition {
        id: c.id.clone().unwrap_or_default(),
        attendance: c.attendance.filter(|&a| a > 0),
        neutral_site: c.neutral_site.unwrap_or(false),
        venue,
        competitors: order_competitors(c.competitors.as_deref().unwrap_or_default()),
        broadcasts,
        status: c.status.as_ref().map(map_status).unwrap_or_default(),
        odds,
        notes,
        tickets,
        leaders: map_leader_categories(c.leaders.as_deref()),
        headline: c
            .headlines
            .as_deref()
            .unwrap_or_default()
            .first()
            .and_then(|h| h.description.clone()),
    }
}

/// Home team first, away team second. ESPN already sends them in that order;
/// the explicit `order` field wins when present.
fn order_competitors(competitors: &[EspnCompetitor]) -> Vec<Competitor> {
    let mut indexed: Vec<(usize, &EspnCompetitor)> = competitors.iter().enumerate().collect();
    indexed.sort_by_key(|(i, c)| c.order.map(usize::from).unwrap_or(*i));
    indexed.into_iter().map(|(_, c)| map_competitor(c)).collect()
}

fn map_competitor(c: &EspnCompetitor) -> Competitor {
    Competitor {
        id: c.id.clone().unwrap_or_default(),
        team: c.team.as_ref().map(map_team).unwrap_or_default(),
        score: c.score.clone().unwrap_or_default(),
        winner: c.winner,
        records: c
            .records
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|r| Record {
                name: r.name.clone().unwrap_or_default(),
                kind: r.record_type.clone().unwrap_or_default(),
                summary: r.summary.clone().unwrap_or_default(),
            })
            .collect(),
        leaders: map_leader_categories(c.leaders.as_deref()),
        linescores: c
            .linescores
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(|l| l.value)
            .collect(),
    }
}

fn map_team(t: &EspnTeam) -> Team {
    let display_name = t.display_name.clone().unwrap_or_default();
    Team {
        id: t.id.clone().unwrap_or_default(),
        location: t.location.clone().unwrap_or_default(),
        name: t.name.clone().unwrap_or_default(),
        short_name: t
            .short_display_name
            .clone()
            .unwrap_or_else(|| display_name.clone()),
        display_name,
        abbrev: t.abbreviation.clone().unwrap_or_default(),
        color: t.color.clone(),
        logo: t.logo.clone(),
        links: map_links(t.links.as_deref()),
    }
}

fn map_links(links: Option<&[EspnLink]>) -> Vec<Link> {
    links
        .unwrap_or_default()
        .iter()
        .filter_map(|l| {
            let href = l.href.clone().filter(|h| !h.is_empty())?;
            Some(Link {
                rel: l.rel.clone(),
                text: l
                    .text
                    .clone()
                    .or_else(|| l.short_text.clone())
                    .unwrap_or_else(|| href.clone()),
                href,
                is_external: l.is_external.unwrap_or(false),
            })
        })
        .collect()
}

fn map_leader_categories(categories: Option<&[EspnLeaderCategory]>) -> Vec<LeaderCategory> {
    categories
        .unwrap_or_default()
        .iter()
        .map(|cat| LeaderCategory {
            name: cat.name.clone().unwrap_or_default(),
            display_name: cat
                .display_name
                .clone()
                .or_else(|| cat.name.clone())
                .unwrap_or_default(),
            leaders: cat
                .leaders
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|l| {
                    let athlete = l.athlete.as_ref();
                    Leader {
                        athlete: athlete
                            .and_then(|a| {
                                a.display_name
                                    .clone()
                                    .or_else(|| a.full_name.clone())
                                    .or_else(|| a.short_name.clone())
                            })
                            .unwrap_or_default(),
                        position: athlete
                            .and_then(|a| a.position.as_ref())
                            .and_then(|p| p.abbreviation.clone()),
                        jersey: athlete.and_then(|a| a.jersey.clone()),
                        display_value: l.display_value.clone().unwrap_or_default(),
                        value: l.value.unwrap_or_default(),
                        team_id: l.team.as_ref().and_then(|t| t.id.clone()),
                    }
                })
                .collect(),
        })
        .filter(|cat| !cat.leaders.is_empty())
        .collect()
}

fn map_status(s: &EspnStatus) -> Status {
    let status_type = s.status_type.as_ref();
    let kind = status_type
        .and_then(|t| t.name.as_deref())
        .map(parse_status)
        .or_else(|| status_type.and_then(|t| t.state.as_deref()).map(parse_state))
        .unwrap_or_default();
    let completed = status_type
        .and_then(|t| t.completed)
        .unwrap_or(kind == GameStatus::Final);

    Status {
        kind,
        completed,
        clock: s.display_clock.clone(),
        period: s.period.filter(|&p| p > 0),
        detail: status_type.and_then(|t| t.detail.clone()),
        short_detail: status_type.and_then(|t| t.short_detail.clone()),
    }
}

fn parse_status(s: &str) -> GameStatus {
    match s {
        "STATUS_IN_PROGRESS" | "STATUS_HALFTIME" | "STATUS_END_PERIOD" => GameStatus::InProgress,
        "STATUS_FINAL" | "STATUS_FINAL_OVERTIME" => GameStatus::Final,
        "STATUS_POSTPONED" | "STATUS_CANCELED" | "STATUS_SUSPENDED" | "STATUS_DELAYED" => {
            GameStatus::Postponed
        }
        _ => GameStatus::Scheduled,
    }
}

fn parse_state(s: &str) -> GameStatus {
    match s {
        "in" => GameStatus::InProgress,
        "post" => GameStatus::Final,
        _ => GameStatus::Scheduled,
    }
}

fn map_news(raw: NewsResponse) -> Vec<Article> {
    raw.articles
        .unwrap_or_default()
        .into_iter()
        .map(|a| {
            let id = match &a.id {
                Some(serde_json::Value::String(s)) => s.clone(),
                Some(serde_json::Value::Number(n)) => n.to_string(),
                _ => a.data_source_identifier.clone().unwrap_or_default(),
            };
            Article {
                id,
                headline: a.headline.unwrap_or_default(),
                description: a.description.filter(|d| !d.is_empty()),
                published: a.published.as_deref().and_then(parse_event_date),
                image: a
                    .images
                    .unwrap_or_default()
                    .into_iter()
                    .find_map(|i| i.url),
                url: a.links.and_then(|l| l.web).and_then(|w| w.href),
            }
        })
        .collect()
}

use crate::app::MenuItem;
use crate::components::detail::event_links;
use nfl_api::schedule::{DaySection, filter_sections};
use nfl_api::{Article, Event, Link};

/// Message shown whenever there is nothing to display.
pub const EMPTY_MESSAGE: &str = "Something went wrong";

// ---------------------------------------------------------------------------
// Schedule state
// ---------------------------------------------------------------------------

/// What the schedule tab can show. Exactly one at a time.
#[derive(Debug, Default)]
pub enum ScheduleView {
    #[default]
    Loading,
    Populated(Vec<DaySection>),
    /// Fetch failed or returned no events.
    Empty,
}

#[derive(Debug, Default)]
pub struct ScheduleState {
    pub view: ScheduleView,
    pub league: String,
    pub week: Option<u32>,
    pub season_year: Option<u16>,
    /// Search text; events are filtered on name and short name.
    pub query: String,
    /// True while keystrokes go into `query`.
    pub searching: bool,
    /// Index into the flattened, filtered event list.
    pub selected: usize,
}

impl ScheduleState {
    pub fn load(&mut self, sections: Vec<DaySection>) {
        self.view = if sections.is_empty() {
            ScheduleView::Empty
        } else {
            ScheduleView::Populated(sections)
        };
        self.clamp_selection();
    }

    pub fn fail(&mut self) {
        self.view = ScheduleView::Empty;
        self.selected = 0;
    }

    /// Sections after applying the search query.
    pub fn visible_sections(&self) -> Vec<DaySection> {
        match &self.view {
            ScheduleView::Populated(sections) => filter_sections(sections, &self.query),
            _ => Vec::new(),
        }
    }

    pub fn visible_event_count(&self) -> usize {
        self.visible_sections().iter().map(|s| s.events.len()).sum()
    }

    pub fn selected_event(&self) -> Option<Event> {
        self.visible_sections()
            .into_iter()
            .flat_map(|s| s.events)
            .nth(self.selected)
    }

    /// Look up an event by id in the unfiltered schedule.
    pub fn find_event(&self, id: &str) -> Option<&Event> {
        match &self.view {
            ScheduleView::Populated(sections) => sections
                .iter()
                .flat_map(|s| s.events.iter())
                .find(|e| e.id == id),
            _ => None,
        }
    }

    pub fn select_next(&mut self) {
        let max = self.visible_event_count().saturating_sub(1);
        if self.selected < max {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn start_search(&mut self) {
        self.searching = true;
    }

    pub fn end_search(&mut self) {
        self.searching = false;
    }

    pub fn push_query(&mut self, c: char) {
        self.query.push(c);
        self.selected = 0;
    }

    pub fn pop_query(&mut self) {
        self.query.pop();
        self.selected = 0;
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
        self.searching = false;
        self.selected = 0;
    }

    fn clamp_selection(&mut self) {
        let max = self.visible_event_count().saturating_sub(1);
        self.selected = self.selected.min(max);
    }
}

// ---------------------------------------------------------------------------
// Game detail state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct DetailState {
    pub event: Option<Event>,
    pub scroll_offset: u16,
    pub selected_link: usize,
}

impl DetailState {
    pub fn show(&mut self, event: Event) {
        let same_game = self.event.as_ref().map(|e| e.id.as_str()) == Some(event.id.as_str());
        self.event = Some(event);
        if !same_game {
            self.scroll_offset = 0;
            self.selected_link = 0;
        }
    }

    pub fn links(&self) -> Vec<Link> {
        self.event.as_ref().map(event_links).unwrap_or_default()
    }

    pub fn cycle_link(&mut self) {
        let count = self.links().len();
        if count > 0 {
            self.selected_link = (self.selected_link + 1) % count;
        }
    }

    pub fn selected_link(&self) -> Option<Link> {
        self.links().into_iter().nth(self.selected_link)
    }

    pub fn scroll_down(&mut self, max: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(1).min(max);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }
}

// ---------------------------------------------------------------------------
// News state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub enum NewsView {
    /// Not requested yet; the news feed is fetched on first visit.
    #[default]
    Idle,
    Loading,
    Populated(Vec<Article>),
    Empty,
}

#[derive(Debug, Default)]
pub struct NewsState {
    pub view: NewsView,
    pub selected: usize,
}

impl NewsState {
    pub fn needs_load(&self) -> bool {
        matches!(self.view, NewsView::Idle)
    }

    pub fn start_loading(&mut self) {
        if !matches!(self.view, NewsView::Populated(_)) {
            self.view = NewsView::Loading;
        }
    }

    pub fn load(&mut self, articles: Vec<Article>) {
        self.selected = self.selected.min(articles.len().saturating_sub(1));
        self.view = if articles.is_empty() {
            NewsView::Empty
        } else {
            NewsView::Populated(articles)
        };
    }

    pub fn fail(&mut self) {
        self.view = NewsView::Empty;
        self.selected = 0;
    }

    pub fn articles(&self) -> &[Article] {
        match &self.view {
            NewsView::Populated(articles) => articles.as_slice(),
            _ => &[],
        }
    }

    pub fn select_next(&mut self) {
        let max = self.articles().len().saturating_sub(1);
        if self.selected < max {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_url(&self) -> Option<String> {
        self.articles().get(self.selected).and_then(|a| a.url.clone())
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub last_error: Option<String>,
    pub schedule: ScheduleState,
    pub detail: DetailState,
    pub news: NewsState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use nfl_api::client::parse_scoreboard;
    use nfl_api::schedule::group_by_weekday;

    const SCOREBOARD: &str = include_str!("../../api/tests/fixtures/scoreboard.json");

    fn loaded() -> ScheduleState {
        let board = parse_scoreboard(SCOREBOARD).unwrap();
        let mut state = ScheduleState::default();
        state.load(group_by_weekday(board.events, &Utc));
        state
    }

    fn selected_short_name(state: &ScheduleState) -> Option<String> {
        state.selected_event().map(|e| e.short_name)
    }

    #[test]
    fn starts_loading() {
        assert!(matches!(ScheduleState::default().view, ScheduleView::Loading));
    }

    #[test]
    fn no_events_is_the_empty_state() {
        let mut state = ScheduleState::default();
        state.load(Vec::new());
        assert!(matches!(state.view, ScheduleView::Empty));
        assert_eq!(state.selected_event().map(|e| e.id), None);
    }

    #[test]
    fn failure_replaces_previous_data() {
        let mut state = loaded();
        state.fail();
        assert!(matches!(state.view, ScheduleView::Empty));
        assert_eq!(state.visible_event_count(), 0);
    }

    #[test]
    fn selection_walks_events_across_sections_in_kickoff_order() {
        let mut state = loaded();
        assert_eq!(selected_short_name(&state).as_deref(), Some("BAL @ KC"));
        state.select_next();
        assert_eq!(selected_short_name(&state).as_deref(), Some("PIT @ ATL"));
        state.select_next();
        state.select_next();
        assert_eq!(selected_short_name(&state).as_deref(), Some("LAR @ DET"));
        state.select_next();
        assert_eq!(state.selected, 3, "selection stops at the last event");
        state.select_prev();
        assert_eq!(selected_short_name(&state).as_deref(), Some("WSH @ TB"));
    }

    #[test]
    fn search_filters_and_resets_selection() {
        let mut state = loaded();
        state.select_next();
        state.start_search();
        for c in "lions".chars() {
            state.push_query(c);
        }
        assert_eq!(state.selected, 0);
        assert_eq!(state.visible_event_count(), 1);
        assert_eq!(selected_short_name(&state).as_deref(), Some("LAR @ DET"));

        state.clear_query();
        assert!(!state.searching);
        assert_eq!(state.visible_event_count(), 4);
    }

    #[test]
    fn reload_keeps_selection_in_range() {
        let mut state = loaded();
        state.selected = 3;
        let board = parse_scoreboard(SCOREBOARD).unwrap();
        let first = board.events.into_iter().take(1).collect();
        state.load(group_by_weekday(first, &Utc));
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn detail_links_cycle_and_wrap() {
        let state = loaded();
        let event = state.find_event("401671805").cloned().unwrap();
        let mut detail = DetailState::default();
        detail.show(event);
        assert_eq!(detail.selected_link().map(|l| l.text), Some("Gamecast".to_string()));
        detail.cycle_link();
        assert_eq!(detail.selected_link().map(|l| l.text), Some("Buy Tickets".to_string()));
        detail.cycle_link();
        assert_eq!(detail.selected_link, 0);
    }

    #[test]
    fn detail_resets_scroll_only_for_a_new_game() {
        let state = loaded();
        let mut detail = DetailState::default();
        detail.show(state.find_event("401671805").cloned().unwrap());
        detail.scroll_down(10);
        detail.show(state.find_event("401671805").cloned().unwrap());
        assert_eq!(detail.scroll_offset, 1);
        detail.show(state.find_event("401671789").cloned().unwrap());
        assert_eq!(detail.scroll_offset, 0);
    }

    #[test]
    fn news_empty_and_selection() {
        let mut news = NewsState::default();
        assert!(news.needs_load());
        news.start_loading();
        assert!(!news.needs_load());
        news.load(Vec::new());
        assert!(matches!(news.view, NewsView::Empty));

        news.load(vec![
            Article { url: Some("https://a".into()), ..Default::default() },
            Article { url: Some("https://b".into()), ..Default::default() },
        ]);
        news.select_next();
        news.select_next();
        assert_eq!(news.selected_url().as_deref(), Some("https://b"));
    }
}

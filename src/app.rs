use crate::browser;
use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use crate::state::messages::NetworkRequest;
use chrono::Local;
use log::{error, info};
use nfl_api::schedule::group_by_weekday_localized;
use nfl_api::{Article, Scoreboard};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Schedule,
    GameDetail,
    News,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new() -> Self {
        Self::with_settings(AppSettings::load())
    }

    pub fn with_settings(settings: AppSettings) -> Self {
        let app = Self {
            state: AppState::new(),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_scoreboard_loaded(&mut self, scoreboard: Scoreboard) {
        self.state.last_error = None;
        info!("scoreboard loaded: {} events", scoreboard.events.len());

        let schedule = &mut self.state.schedule;
        schedule.league = scoreboard.league;
        schedule.week = scoreboard.week;
        schedule.season_year = scoreboard.season_year;
        schedule.load(group_by_weekday_localized(scoreboard.events, &Local, self.settings.locale));

        // Keep an open detail view in step with the fresh data.
        let shown = self.state.detail.event.as_ref().map(|e| e.id.clone());
        if let Some(id) = shown
            && let Some(event) = self.state.schedule.find_event(&id).cloned()
        {
            self.state.detail.show(event);
        }
    }

    pub fn on_news_loaded(&mut self, articles: Vec<Article>) {
        self.state.last_error = None;
        self.state.news.load(articles);
    }

    pub fn on_error(&mut self, request: NetworkRequest, message: String) {
        match request {
            NetworkRequest::LoadScoreboard => self.state.schedule.fail(),
            NetworkRequest::LoadNews => self.state.news.fail(),
        }
        self.state.last_error = Some(message);
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    /// Switch to the news tab. Returns the request to send when the feed
    /// has not been fetched yet.
    pub fn show_news(&mut self) -> Option<NetworkRequest> {
        self.update_tab(MenuItem::News);
        if self.state.news.needs_load() {
            self.state.news.start_loading();
            return Some(NetworkRequest::LoadNews);
        }
        None
    }

    // -----------------------------------------------------------------------
    // Schedule
    // -----------------------------------------------------------------------

    /// Open the selected game in the detail tab. Returns false when nothing is selected.
    pub fn open_selected_game(&mut self) -> bool {
        let Some(event) = self.state.schedule.selected_event() else {
            return false;
        };
        self.state.detail.show(event);
        self.update_tab(MenuItem::GameDetail);
        true
    }

    // -----------------------------------------------------------------------
    // Outbound links
    // -----------------------------------------------------------------------

    pub fn open_selected_link(&mut self) {
        let url = self.state.detail.selected_link().map(|l| l.href);
        self.open_url(url);
    }

    pub fn open_selected_article(&mut self) {
        let url = self.state.news.selected_url();
        self.open_url(url);
    }

    fn open_url(&mut self, url: Option<String>) {
        let Some(url) = url else {
            return;
        };
        if let Err(e) = browser::open_in_browser(&url) {
            error!("{e}");
            self.state.last_error = Some(e);
        }
    }
}

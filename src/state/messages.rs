use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use nfl_api::{Article, Scoreboard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkRequest {
    LoadScoreboard,
    LoadNews,
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    ScoreboardLoaded { scoreboard: Scoreboard },
    NewsLoaded { articles: Vec<Article> },
    /// Any failure of `request`; the view it feeds falls back to the empty state.
    Error { request: NetworkRequest, message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}

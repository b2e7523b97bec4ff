use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

/// Lines the detail document may scroll past its last page.
const DETAIL_SCROLL_LIMIT: u16 = 500;

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    // Search mode swallows every key except Ctrl-C.
    if guard.state.active_tab == MenuItem::Schedule && guard.state.schedule.searching {
        let schedule = &mut guard.state.schedule;
        match (key_event.code, key_event.modifiers) {
            (Char('c'), KeyModifiers::CONTROL) => {
                crate::cleanup_terminal();
                std::process::exit(0);
            }
            (KeyCode::Esc, _) => schedule.clear_query(),
            (KeyCode::Enter, _) => schedule.end_search(),
            (KeyCode::Backspace, _) => schedule.pop_query(),
            (Char(c), _) => schedule.push_query(c),
            _ => {}
        }
        return;
    }

    let mut request = None;

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Schedule),
        (_, Char('2'), _) => guard.update_tab(MenuItem::GameDetail),
        (_, Char('3'), _) => request = guard.show_news(),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Schedule
        (MenuItem::Schedule, Char('j') | KeyCode::Down, _) => guard.state.schedule.select_next(),
        (MenuItem::Schedule, Char('k') | KeyCode::Up, _) => guard.state.schedule.select_prev(),
        (MenuItem::Schedule, Char('/'), _) => guard.state.schedule.start_search(),
        (MenuItem::Schedule, KeyCode::Esc, _) => guard.state.schedule.clear_query(),
        (MenuItem::Schedule, KeyCode::Enter, _) => {
            guard.open_selected_game();
        }
        (MenuItem::Schedule | MenuItem::GameDetail, Char('r'), _) => {
            request = Some(NetworkRequest::LoadScoreboard);
        }

        // Game detail
        (MenuItem::GameDetail, Char('j') | KeyCode::Down, _) => {
            guard.state.detail.scroll_down(DETAIL_SCROLL_LIMIT)
        }
        (MenuItem::GameDetail, Char('k') | KeyCode::Up, _) => guard.state.detail.scroll_up(),
        (MenuItem::GameDetail, KeyCode::Tab, _) => guard.state.detail.cycle_link(),
        (MenuItem::GameDetail, Char('o') | KeyCode::Enter, _) => guard.open_selected_link(),
        (MenuItem::GameDetail, KeyCode::Esc, _) => guard.update_tab(MenuItem::Schedule),

        // News
        (MenuItem::News, Char('j') | KeyCode::Down, _) => guard.state.news.select_next(),
        (MenuItem::News, Char('k') | KeyCode::Up, _) => guard.state.news.select_prev(),
        (MenuItem::News, Char('o') | KeyCode::Enter, _) => guard.open_selected_article(),
        (MenuItem::News, Char('r'), _) => {
            guard.state.news.start_loading();
            request = Some(NetworkRequest::LoadNews);
        }
        (MenuItem::News, KeyCode::Esc, _) => guard.update_tab(MenuItem::Schedule),

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }

    if let Some(request) = request {
        drop(guard);
        let _ = network_requests.send(request).await;
    }
}

use chrono::{Local, Locale};
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs, Wrap};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::detail::{format_event_markdown, metadata};
use crate::components::list_item::EventRow;
use crate::state::app_state::{EMPTY_MESSAGE, NewsView, ScheduleState, ScheduleView};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;

static TABS: &[&str; 3] = &["Schedule", "Game Detail", "News"];

/// Narrower schedules show "AWY @ HOM" instead of full team names.
const WIDE_ROW: u16 = 96;

const HELP_TEXT: &str = "\
Schedule
  j/k, ↓/↑   move selection
  /          search by team or matchup (Enter keeps, Esc clears)
  Enter      open game detail
  r          refetch the scoreboard

Game Detail
  j/k        scroll
  Tab        select next link
  o, Enter   open link in browser
  Esc        back to schedule

News
  j/k        move selection
  o, Enter   open article in browser
  r          refetch headlines

Global
  1 2 3      switch tab
  f          toggle full screen
  \"          toggle log pane
  ?          help (Esc to close)
  q, Ctrl-C  quit";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let _ = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Schedule => draw_schedule(f, layout.main, &app.state.schedule, app.settings.locale),
            MenuItem::GameDetail => draw_game_detail(f, layout.main, app),
            MenuItem::News => draw_news(f, layout.main, app),
            MenuItem::Help => draw_help(f, layout.main),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Schedule => 0,
        MenuItem::GameDetail => 1,
        MenuItem::News => 2,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

fn schedule_title(schedule: &ScheduleState) -> String {
    let mut parts = Vec::new();
    parts.push(if schedule.league.is_empty() { "NFL".to_string() } else { schedule.league.clone() });
    if let Some(week) = schedule.week {
        parts.push(format!("Week {week}"));
    }
    if let Some(year) = schedule.season_year {
        parts.push(year.to_string());
    }
    format!(" {} ", parts.join(" · "))
}

fn draw_schedule(f: &mut Frame, area: Rect, schedule: &ScheduleState, locale: Locale) {
    let block = default_border(Color::White).title(schedule_title(schedule));
    let inner = block.inner(area);
    f.render_widget(block, area);

    match &schedule.view {
        ScheduleView::Loading => {
            draw_message(f, inner, "Loading schedule...", Color::DarkGray);
            return;
        }
        ScheduleView::Empty => {
            draw_message(f, inner, EMPTY_MESSAGE, Color::Red);
            return;
        }
        ScheduleView::Populated(_) => {}
    }

    let [key_legend, search, content] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1), Constraint::Fill(1)]).areas(inner);

    f.render_widget(
        Paragraph::new("Keys: j/k=move  Enter=details  /=search  r=refresh  ?=help  q=quit")
            .style(Style::default().fg(Color::DarkGray)),
        key_legend,
    );

    let search_style = if schedule.searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let cursor = if schedule.searching { "_" } else { "" };
    f.render_widget(
        Paragraph::new(format!("Search: {}{cursor}", schedule.query)).style(search_style),
        search,
    );

    let sections = schedule.visible_sections();
    if sections.is_empty() {
        draw_message(f, content, "No games match your search", Color::DarkGray);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    let mut selected_line = 0;
    let mut index = 0;
    for section in &sections {
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(
            section.label.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        for event in &section.events {
            let row = EventRow::new(event, &Local, locale);
            let is_selected = index == schedule.selected;
            if is_selected {
                selected_line = lines.len();
            }
            lines.push(event_row_line(&row, is_selected, content.width < WIDE_ROW));
            index += 1;
        }
    }

    // Keep the selected row on screen.
    let height = content.height as usize;
    let offset = selected_line.saturating_sub(height.saturating_sub(1)) as u16;
    f.render_widget(Paragraph::new(lines).scroll((offset, 0)), content);
}

fn event_row_line(row: &EventRow, selected: bool, compact: bool) -> Line<'static> {
    let (marker, title_style) = if selected {
        ("▶ ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    } else {
        ("  ", Style::default().fg(Color::White))
    };
    let status_style = if row.live.is_some() {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Line::from(vec![
        Span::styled(marker, title_style),
        Span::styled(if compact { row.subtitle.clone() } else { row.title.clone() }, title_style),
        Span::raw("  "),
        Span::styled(row.accessories(), status_style),
    ])
}

// ---------------------------------------------------------------------------
// Game detail
// ---------------------------------------------------------------------------

fn draw_game_detail(f: &mut Frame, area: Rect, app: &mut App) {
    let block = default_border(Color::White).title(" Game Detail ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(event) = app.state.detail.event.as_ref() else {
        draw_message(f, inner, "Select a game on the Schedule tab and press Enter", Color::DarkGray);
        return;
    };

    let [document_area, sidebar_area] =
        Layout::horizontal([Constraint::Percentage(68), Constraint::Percentage(32)]).areas(inner);

    let markdown = format_event_markdown(event);
    let fields = metadata(event, &Local, app.settings.locale);
    let links = app.state.detail.links();

    let document = Paragraph::new(markdown.lines().map(markdown_line).collect::<Vec<_>>())
        .wrap(Wrap { trim: false });

    // Clamp scrolling to the rendered document height.
    let max_scroll = document
        .line_count(document_area.width)
        .saturating_sub(document_area.height as usize);
    let max_scroll = u16::try_from(max_scroll).unwrap_or(u16::MAX);
    app.state.detail.scroll_offset = app.state.detail.scroll_offset.min(max_scroll);

    f.render_widget(document.scroll((app.state.detail.scroll_offset, 0)), document_area);

    let mut side: Vec<Line> = Vec::new();
    for field in fields {
        side.push(Line::from(Span::styled(
            field.label,
            Style::default().fg(Color::DarkGray),
        )));
        side.push(Line::from(field.value));
        side.push(Line::default());
    }
    if !links.is_empty() {
        side.push(Line::from(Span::styled(
            "Links (Tab=next  o=open)",
            Style::default().fg(Color::DarkGray),
        )));
        for (i, link) in links.iter().enumerate() {
            let line = if i == app.state.detail.selected_link {
                Line::from(Span::styled(
                    format!("▶ {}", link.text),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(format!("  {}", link.text))
            };
            side.push(line);
        }
    }

    let sidebar = Paragraph::new(side)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::LEFT).border_style(Style::default().fg(Color::DarkGray)));
    f.render_widget(sidebar, sidebar_area);
}

/// Style one markdown line for the terminal. Only the constructs the game
/// document emits are recognized.
fn markdown_line(line: &str) -> Line<'static> {
    let heading = |text: &str, color: Color| {
        Line::from(Span::styled(
            text.to_owned(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
    };

    if let Some(text) = line.strip_prefix("#### ") {
        return heading(text, Color::White);
    }
    if let Some(text) = line.strip_prefix("### ") {
        return heading(text, Color::Cyan);
    }
    if let Some(text) = line.strip_prefix("## ") {
        return heading(text, Color::Yellow);
    }
    if let Some(text) = line.strip_prefix("> ") {
        return Line::from(Span::styled(
            format!("│ {text}"),
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        ));
    }
    if line.len() > 2 && line.starts_with('_') && line.ends_with('_') {
        return Line::from(Span::styled(
            line[1..line.len() - 1].to_owned(),
            Style::default().add_modifier(Modifier::ITALIC),
        ));
    }

    let (bullet, rest) = match line.strip_prefix("- ") {
        Some(rest) => ("• ", rest),
        None => ("", line),
    };

    // "[text](href)" links show their text.
    if let Some(inner) = rest.strip_prefix('[')
        && let Some((text, _href)) = inner.split_once("](")
    {
        return Line::from(vec![
            Span::raw(bullet),
            Span::styled(text.to_owned(), Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED)),
        ]);
    }

    // "**Label:** value" and "**NAME** (market)"
    if let Some(inner) = rest.strip_prefix("**")
        && let Some((strong, tail)) = inner.split_once("**")
    {
        return Line::from(vec![
            Span::raw(bullet),
            Span::styled(strong.to_owned(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(tail.to_owned()),
        ]);
    }

    Line::from(format!("{bullet}{rest}"))
}

// ---------------------------------------------------------------------------
// News
// ---------------------------------------------------------------------------

fn draw_news(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" NFL News ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    match &app.state.news.view {
        NewsView::Idle | NewsView::Loading => {
            draw_message(f, inner, "Loading headlines...", Color::DarkGray);
            return;
        }
        NewsView::Empty => {
            draw_message(f, inner, EMPTY_MESSAGE, Color::Red);
            return;
        }
        NewsView::Populated(_) => {}
    }

    let mut lines: Vec<Line> = Vec::new();
    let mut selected_line = 0;
    for (i, article) in app.state.news.articles().iter().enumerate() {
        let selected = i == app.state.news.selected;
        if selected {
            selected_line = lines.len();
        }
        let (marker, style) = if selected {
            ("▶ ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        } else {
            ("  ", Style::default().fg(Color::White))
        };
        lines.push(Line::from(Span::styled(format!("{marker}{}", article.headline), style)));

        let published = article
            .published
            .map(|d| d.with_timezone(&Local).format_localized("%A, %B %-d", app.settings.locale).to_string())
            .unwrap_or_default();
        lines.push(Line::from(Span::styled(
            format!("  {published}"),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::default());
    }

    let height = inner.height as usize;
    let offset = (selected_line + 1).saturating_sub(height.saturating_sub(1)) as u16;
    f.render_widget(Paragraph::new(lines).scroll((offset, 0)), inner);
}

// ---------------------------------------------------------------------------
// Chrome
// ---------------------------------------------------------------------------

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::DarkGray).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(HELP_TEXT), inner);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Cyan))
        .style_debug(Style::default().fg(Color::Green))
        .style_trace(Style::default().fg(Color::Magenta));
    f.render_widget(logs, area);
}

fn draw_message(f: &mut Frame, area: Rect, msg: &str, color: Color) {
    let [_top, middle, _bottom] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1), Constraint::Fill(1)]).areas(area);
    f.render_widget(
        Paragraph::new(msg.to_owned())
            .style(Style::default().fg(color))
            .alignment(Alignment::Center),
        middle,
    );
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui::backend::TestBackend;

    fn span_texts(line: &Line) -> Vec<String> {
        line.spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn headings_drop_their_markers() {
        assert_eq!(span_texts(&markdown_line("### Leaders")), ["Leaders"]);
        assert_eq!(span_texts(&markdown_line("## PIT @ ATL")), ["PIT @ ATL"]);
    }

    #[test]
    fn bold_labels_are_split_from_values() {
        let line = markdown_line("**Venue:** Mercedes-Benz Stadium (Atlanta, GA)");
        assert_eq!(span_texts(&line), ["", "Venue:", " Mercedes-Benz Stadium (Atlanta, GA)"]);
        assert!(line.spans[1].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn links_show_only_their_text() {
        let line = markdown_line("- [Gamecast](https://www.espn.com/nfl/game/_/gameId/1)");
        assert_eq!(span_texts(&line), ["• ", "Gamecast"]);
    }

    #[test]
    fn schedule_title_includes_week_and_year() {
        let schedule = ScheduleState {
            league: "NFL".into(),
            week: Some(1),
            season_year: Some(2024),
            ..Default::default()
        };
        assert_eq!(schedule_title(&schedule), " NFL · Week 1 · 2024 ");
    }

    #[test]
    fn empty_schedule_renders_the_error_message() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut app = App::with_settings(Default::default());
        app.state.schedule.fail();
        draw(&mut terminal, &mut app, LoadingState::default());

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains(EMPTY_MESSAGE));
    }
}

//! Non-interactive entry points: `--print`, `--json`, `--event <ID>`.

use crate::components::detail::{format_event_markdown, metadata};
use crate::components::list_item::EventRow;
use crate::state::app_state::EMPTY_MESSAGE;
use chrono::{Local, Locale, TimeZone};
use nfl_api::client::NflApi;
use nfl_api::schedule::{DaySection, group_by_weekday_localized, system_locale};
use std::fmt::{self, Write};

#[derive(Debug, Clone, PartialEq)]
pub enum CliMode {
    Tui,
    Print,
    Json,
    Event(String),
    Help,
    Version,
}

pub fn parse_args<I>(args: I) -> Result<CliMode, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let Some(arg) = args.next() else {
        return Ok(CliMode::Tui);
    };

    let mode = match arg.as_str() {
        "-h" | "--help" => CliMode::Help,
        "-V" | "--version" => CliMode::Version,
        "-p" | "--print" => CliMode::Print,
        "--json" => CliMode::Json,
        "-e" | "--event" => match args.next() {
            Some(id) if !id.starts_with('-') => CliMode::Event(id),
            _ => return Err("--event requires a game id".to_string()),
        },
        _ => return Err(format!("Unknown argument: {arg}")),
    };

    if let Some(extra) = args.next() {
        return Err(format!("Unexpected argument: {extra}"));
    }
    Ok(mode)
}

pub fn usage_text() -> &'static str {
    "nfltui - NFL scoreboard terminal UI

Usage:
  nfltui                 interactive schedule
  nfltui --print         print this week's schedule grouped by weekday
  nfltui --json          print the grouped schedule as JSON
  nfltui --event <ID>    print the detail document for one game
  nfltui --help
  nfltui --version

Environment:
  NFLTUI_SCOREBOARD_JSON   Path to a local ESPN scoreboard JSON snapshot
  NFLTUI_API_BASE          Override the ESPN NFL API base URL
  NFLTUI_LOG_LEVEL         Log pane level (error, warn, info, debug, trace)"
}

/// Run a non-interactive mode and return the process exit code.
pub async fn run(mode: CliMode) -> anyhow::Result<i32> {
    match mode {
        CliMode::Tui => Ok(0),
        CliMode::Help => {
            println!("{}", usage_text());
            Ok(0)
        }
        CliMode::Version => {
            println!("nfltui {}", env!("CARGO_PKG_VERSION"));
            Ok(0)
        }
        CliMode::Print | CliMode::Json | CliMode::Event(_) => {
            let client = NflApi::from_env();
            let locale = system_locale();
            let sections = match client.fetch_scoreboard().await {
                Ok(scoreboard) => group_by_weekday_localized(scoreboard.events, &Local, locale),
                Err(e) => {
                    eprintln!("{e}");
                    Vec::new()
                }
            };
            if sections.is_empty() {
                eprintln!("{EMPTY_MESSAGE}");
                return Ok(1);
            }
            print_sections(&mode, &sections, locale)
        }
    }
}

fn print_sections(mode: &CliMode, sections: &[DaySection], locale: Locale) -> anyhow::Result<i32> {
    match mode {
        CliMode::Json => println!("{}", serde_json::to_string_pretty(sections)?),
        CliMode::Event(id) => {
            let event = sections
                .iter()
                .flat_map(|s| s.events.iter())
                .find(|e| &e.id == id);
            let Some(event) = event else {
                eprintln!("No game with id {id} on the current scoreboard");
                return Ok(1);
            };
            print!("{}", format_event_markdown(event));
            for field in metadata(event, &Local, locale) {
                println!("{}: {}", field.label, field.value);
            }
        }
        _ => print!("{}", format_schedule(sections, &Local, locale)),
    }
    Ok(0)
}

/// Plain-text schedule: one header per weekday, one indented row per game.
pub fn format_schedule<Tz>(sections: &[DaySection], tz: &Tz, locale: Locale) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut out = String::new();
    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{}", section.label);
        for event in &section.events {
            let row = EventRow::new(event, tz, locale);
            let _ = writeln!(out, "  {}  {}", row.title, row.accessories());
        }
    }
    out
}

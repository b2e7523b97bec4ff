use chrono::Locale;
use log::LevelFilter;
use nfl_api::schedule::system_locale;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    /// Language for weekday, month and AM/PM labels.
    pub locale: Locale,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self { full_screen: false, log_level: None, locale: Locale::en_US }
    }
}

impl AppSettings {
    /// Read settings from the environment. `NFLTUI_LOG_LEVEL` takes
    /// `off`/`error`/`warn`/`info`/`debug`/`trace`; the locale comes from
    /// `LC_ALL`/`LC_TIME`/`LANG`.
    pub fn load() -> Self {
        let log_level = std::env::var("NFLTUI_LOG_LEVEL")
            .ok()
            .and_then(|v| parse_log_level(&v));
        Self { full_screen: false, log_level, locale: system_locale() }
    }
}

fn parse_log_level(value: &str) -> Option<LevelFilter> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    LevelFilter::from_str(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_levels_case_insensitively() {
        assert_eq!(parse_log_level("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_log_level(" WARN "), Some(LevelFilter::Warn));
        assert_eq!(parse_log_level("off"), Some(LevelFilter::Off));
    }

    #[test]
    fn ignores_blank_and_unknown_levels() {
        assert_eq!(parse_log_level(""), None);
        assert_eq!(parse_log_level("loud"), None);
    }
}

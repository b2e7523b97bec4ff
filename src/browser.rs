use log::debug;
use std::process::{Command, Stdio};

/// Hand a link to the desktop's default browser.
///
/// Only http(s) URLs are accepted; anything else would be interpreted by the
/// platform opener as a file or program.
pub fn open_in_browser(url: &str) -> Result<(), String> {
    if !is_web_url(url) {
        return Err(format!("refusing to open non-web link: {url}"));
    }

    let (program, args) = opener_command(url);
    debug!("opening {url} with {program}");
    Command::new(program)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|e| format!("could not launch {program}: {e}"))
}

fn is_web_url(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    (lower.starts_with("https://") || lower.starts_with("http://")) && !url.contains(char::is_whitespace)
}

#[cfg(target_os = "macos")]
fn opener_command(url: &str) -> (&'static str, Vec<String>) {
    ("open", vec![url.to_owned()])
}

#[cfg(target_os = "windows")]
fn opener_command(url: &str) -> (&'static str, Vec<String>) {
    // The empty string is the window title `start` expects before the target.
    ("cmd", vec!["/C".into(), "start".into(), String::new(), url.to_owned()])
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command(url: &str) -> (&'static str, Vec<String>) {
    ("xdg-open", vec![url.to_owned()])
}

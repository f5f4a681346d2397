use std::{
    fmt::Display,
    io::Write,
    sync::{LazyLock, PoisonError, RwLock},
};

use nrm_config::config::get_config;
use nrm_core::{error::ErrorContext, NrmResult};
use nrm_operations::Cascade;
use nu_ansi_term::Color::{self, DarkGray};
use tracing::{error, warn};

pub struct Icons;

impl Icons {
    pub const FASTEST: &str = "⚡";
}

pub fn icon_or<'a>(icon: &'a str, fallback: &'a str) -> &'a str {
    if get_config().display().icons() {
        icon
    } else {
        fallback
    }
}

pub static COLOR: LazyLock<RwLock<bool>> = LazyLock::new(|| RwLock::new(true));

pub fn set_color(enabled: bool) {
    *COLOR.write().unwrap_or_else(PoisonError::into_inner) = enabled;
}

pub struct Colored<T: Display>(pub Color, pub T);

impl<T: Display> Display for Colored<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let color = COLOR.read().unwrap_or_else(PoisonError::into_inner);
        if *color {
            write!(f, "{}", self.0.prefix())?;
            self.1.fmt(f)?;
            write!(f, "{}", self.0.suffix())
        } else {
            self.1.fmt(f)
        }
    }
}

/// Width names are padded to in aligned listings.
pub fn column_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(|name| name.chars().count()).max().unwrap_or(0) + 3
}

/// Dashes joining `name` to its value so every row lines up at `width`.
pub fn dash_line(name: &str, width: usize) -> String {
    let count = (width + 1).saturating_sub(name.chars().count()).max(1);
    format!(" {} ", Colored(DarkGray, "-".repeat(count)))
}

pub fn interactive_ask(ques: &str) -> NrmResult<String> {
    print!("{ques}");

    std::io::stdout()
        .flush()
        .with_context(|| "flushing stdout stream".to_string())?;

    let mut response = String::new();
    std::io::stdin()
        .read_line(&mut response)
        .with_context(|| "reading input from stdin".to_string())?;

    Ok(response.trim().to_owned())
}

pub fn get_valid_selection(prompt: &str, max: usize) -> NrmResult<usize> {
    loop {
        let response = interactive_ask(prompt)?;
        match response.parse::<usize>() {
            Ok(n) if n > 0 && n <= max => return Ok(n - 1),
            _ => error!("Invalid selection, please try again."),
        }
    }
}

/// Parses a list such as `1 3,4` into zero-based indices. `None` if any
/// entry is out of `1..=max`.
pub fn parse_multi_selection(response: &str, max: usize) -> Option<Vec<usize>> {
    let mut picked = Vec::new();
    for part in response
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
    {
        match part.parse::<usize>() {
            Ok(n) if n > 0 && n <= max => {
                if !picked.contains(&(n - 1)) {
                    picked.push(n - 1);
                }
            }
            _ => return None,
        }
    }
    Some(picked)
}

pub fn get_valid_multi_selection(prompt: &str, max: usize) -> NrmResult<Vec<usize>> {
    loop {
        let response = interactive_ask(prompt)?;
        match parse_multi_selection(&response, max) {
            Some(picked) => return Ok(picked),
            None => error!("Invalid selection, please try again."),
        }
    }
}

/// Reports a profile update that did not go through after the custom store
/// was already saved.
pub fn report_cascade(cascade: &Cascade) {
    if let Cascade::Failed(reason) = cascade {
        warn!("The custom registry was saved, but the npm profile could not be updated: {reason}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_line_aligns_rows() {
        set_color(false);
        let width = column_width(["npm", "npmMirror"].into_iter());
        assert_eq!(width, 12);

        let short = format!("npm{}", dash_line("npm", width));
        let long = format!("npmMirror{}", dash_line("npmMirror", width));
        assert_eq!(short.len(), long.len());
        assert_eq!(long, "npmMirror ---- ");
    }

    #[test]
    fn test_parse_multi_selection() {
        assert_eq!(parse_multi_selection("1, 3 3", 3), Some(vec![0, 2]));
        assert_eq!(parse_multi_selection("", 3), Some(vec![]));
        assert_eq!(parse_multi_selection("0", 3), None);
        assert_eq!(parse_multi_selection("4", 3), None);
        assert_eq!(parse_multi_selection("a", 3), None);
    }
}

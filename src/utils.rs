use std::time::Duration;

use chrono::{DateTime, Datelike};
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};
use reqwest::Url;

use crate::error::CatalogError;

/// Random value for the `state` parameter of the authorization request.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

/// Starts a steadily ticking spinner showing `message`.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

/// Turns a request target into the outgoing URL.
///
/// Absolute URLs are kept, anything else is appended to `base_url`. Query
/// parameters are joined with `&` when the target already has a query and
/// with `?` otherwise.
///
/// # Example
///
/// ```
/// let url = resolve_url("https://api.spotify.com/v1/", "search?type=track", &[("limit", "50")])?;
/// assert_eq!(url, "https://api.spotify.com/v1/search?type=track&limit=50");
/// ```
pub fn resolve_url(
    base_url: &str,
    target: &str,
    params: &[(&str, &str)],
) -> Result<String, CatalogError> {
    let absolute = if target.starts_with("https://") || target.starts_with("http://") {
        target.to_string()
    } else {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            target.trim_start_matches('/')
        )
    };

    let mut url = Url::parse(&absolute).map_err(|e| CatalogError::InvalidUrl {
        target: target.to_string(),
        reason: e.to_string(),
    })?;
    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params.iter());
    }

    Ok(url.into())
}

/// Parses a selection such as `0-2,5` into indices below `len`.
///
/// `-1` selects every index, ranges are inclusive. Indices out of bounds and
/// reversed ranges are rejected before any range is expanded.
pub fn parse_choices(input: &str, len: usize) -> Result<Vec<usize>, String> {
    let mut choices = Vec::new();

    for part in input.split(',').map(str::trim) {
        if part == "-1" {
            return Ok((0..len).collect());
        }

        let (start, end) = part.split_once('-').unwrap_or((part, part));
        let start = choice_index(start, len)?;
        let end = choice_index(end, len)?;
        if start > end {
            return Err(format!("{part:?} is a reversed range"));
        }
        choices.extend(start..=end);
    }

    Ok(choices)
}

fn choice_index(value: &str, len: usize) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(index) if index < len => Ok(index),
        _ => Err(format!("{:?} is not an index below {}", value.trim(), len)),
    }
}

/// Year of a release date in any of the `YYYY`, `YYYY-MM`, `YYYY-MM-DD`
/// precisions.
pub fn release_to_year(release_date: &str) -> Option<i32> {
    release_date.split('-').next()?.trim().parse().ok()
}

pub fn year_to_decade(year: i32) -> i32 {
    year.div_euclid(10) * 10
}

/// Label of a decade, `1994` becomes `1990s`.
pub fn year_to_decade_str(year: i32) -> String {
    format!("{:02}s", year_to_decade(year))
}

/// Year of an `added_at` timestamp (`2021-03-04T10:00:00Z`).
pub fn added_year(added_at: &str) -> Option<i32> {
    DateTime::parse_from_rfc3339(added_at)
        .ok()
        .map(|date| date.year())
}

/// File name stem for a playlist, every non-alphanumeric character becomes `_`.
pub fn playlist_filename(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

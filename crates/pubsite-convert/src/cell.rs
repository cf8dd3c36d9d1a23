//! Cell-level parsing: missing markers, years, dates, impact annotations

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

/// Four-digit year 19xx/20xx not preceded by another digit, so article
/// numbers like `062007` don't match but `IAQVEC2024` and `(2024)` do.
static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\D)((?:19|20)\d{2})").expect("valid year regex"));

/// `YYYY.MM.DD`
static DOTTED_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((?:19|20)\d{2})\.(\d{2})\.(\d{2})$").expect("valid date regex")
});

/// Empty, `-` and `nan` all mean "no value".
pub fn is_missing(cell: &str) -> bool {
    let s = cell.trim();
    s.is_empty() || s == "-" || s.eq_ignore_ascii_case("nan")
}

/// First plausible year found in the given cells, searched in order.
pub fn year_from_any(cells: &[&str]) -> Option<i64> {
    cells.iter().find_map(|cell| {
        YEAR.captures(cell)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
    })
}

/// Sortable `YYYYMMDD` key for a date cell; `YYYY0000` when only a year is
/// present, 0 when nothing usable is found.
pub fn date_key(cell: &str) -> i64 {
    let s = cell.trim();
    if is_missing(s) {
        return 0;
    }
    if let Some(c) = DOTTED_DATE.captures(s) {
        let part = |i: usize| c[i].parse::<i64>().unwrap_or(0);
        return part(1) * 10_000 + part(2) * 100 + part(3);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return i64::from(d.year()) * 10_000 + i64::from(d.month()) * 100 + i64::from(d.day());
    }
    year_from_any(&[s]).map_or(0, |y| y * 10_000)
}

/// Suffix like ` (IF 6.9, Top 4.95%)`, or empty when both cells are missing.
///
/// Numeric cells are formatted to fixed precision; anything else is kept as written.
pub fn impact_suffix(impact_factor: &str, top_percent: &str) -> String {
    let mut parts = Vec::new();
    if !is_missing(impact_factor) {
        let v = impact_factor.trim();
        match v.parse::<f64>() {
            Ok(n) => parts.push(format!("IF {n:.1}")),
            Err(_) => parts.push(format!("IF {v}")),
        }
    }
    if !is_missing(top_percent) {
        let v = top_percent.trim().trim_end_matches('%').trim();
        match v.parse::<f64>() {
            Ok(n) => parts.push(format!("Top {n:.2}%")),
            Err(_) => parts.push(format!("Top {v}%")),
        }
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

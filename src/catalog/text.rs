use chrono::{DateTime, Datelike, NaiveDate};

use crate::tmdb::{BACKDROP_BASE, IMAGE_BASE};

/// Four-digit year of a provider date (`YYYY-MM-DD`), or empty.
pub(crate) fn year_from_date(date: Option<&str>) -> String {
    let Some(date) = date.map(str::trim).filter(|d| !d.is_empty()) else {
        return String::new();
    };
    if let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return parsed.year().to_string();
    }
    let head: String = date.chars().take(4).collect();
    if head.len() == 4 && head.chars().all(|c| c.is_ascii_digit()) {
        head
    } else {
        String::new()
    }
}

pub(crate) fn full_title(title: &str, year: &str) -> String {
    format!("{} ({})", title, year)
}

pub(crate) fn format_runtime(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}

/// One-decimal score. Zero means the provider has no votes yet.
pub(crate) fn format_rating(vote_average: Option<f64>) -> Option<String> {
    vote_average
        .filter(|v| v.is_finite() && *v > 0.0)
        .map(|v| format!("{:.1}", v))
}

pub(crate) fn format_dollars(amount: Option<u64>) -> String {
    match amount.filter(|a| *a > 0) {
        Some(a) => format!("${}", group_thousands(a)),
        None => String::new(),
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub(crate) fn image_url(path: Option<&str>) -> String {
    path.filter(|p| !p.is_empty())
        .map(|p| format!("{IMAGE_BASE}{p}"))
        .unwrap_or_default()
}

pub(crate) fn backdrop_url(path: &str) -> String {
    format!("{BACKDROP_BASE}{path}")
}

/// Calendar date of a provider timestamp, falling back to the raw value.
pub(crate) fn review_date(created_at: Option<&str>) -> String {
    let Some(raw) = created_at else {
        return String::new();
    };
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive().format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

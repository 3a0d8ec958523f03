use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    my_clippings::record::Kind,
    utility::date::{normalize_date, Clock},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub kind: Kind,
    pub location: String,
    pub page: Option<String>,
    pub created_at: NaiveDateTime,
}

// Checked in order; the first keyword found decides.
pub const KIND_KEYWORDS: [(&str, Kind); 3] = [
    ("Highlight", Kind::Highlight),
    ("Bookmark", Kind::Bookmark),
    ("Note", Kind::Note),
];

// "- Your Highlight on Location 150-152 | page 12 | Added on Monday, January 1, 2024 12:00:00 PM"
pub fn extract_metadata(line: &str, clock: &dyn Clock) -> Metadata {
    let created_at = match extract_date_text(line) {
        Some(date) => normalize_date(date, clock),
        None => clock.now(),
    };

    Metadata {
        kind: extract_kind(line),
        location: extract_location(line).unwrap_or_default(),
        page: extract_page(line),
        created_at,
    }
}

pub fn extract_kind(line: &str) -> Kind {
    KIND_KEYWORDS
        .iter()
        .find(|(keyword, _)| line.contains(keyword))
        .map(|&(_, kind)| kind)
        .unwrap_or(Kind::Unknown)
}

pub fn extract_location(line: &str) -> Option<String> {
    static REGEX_LOCATION: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"Location\s+(?P<location>[0-9]+(?:-[0-9]+)?)").unwrap());

    REGEX_LOCATION
        .captures(line)
        .map(|caps| caps["location"].to_owned())
}

pub fn extract_page(line: &str) -> Option<String> {
    static REGEX_PAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"page\s+(?P<page>[0-9]+)").unwrap());

    REGEX_PAGE.captures(line).map(|caps| caps["page"].to_owned())
}

pub fn extract_date_text(line: &str) -> Option<&str> {
    line.find("Added on ")
        .map(|start| &line[start + "Added on ".len()..])
}

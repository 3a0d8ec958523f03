use once_cell::sync::Lazy;
use regex::Regex;

use crate::utility::str::{capitalize, collapse_whitespace};

// Never capitalized unless they start the title.
pub const STOP_WORDS: [&str; 14] = [
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
];

pub type Pass = fn(&str, Option<&str>) -> String;

// Order matters: later passes assume the separators of earlier ones are gone.
pub const PASSES: [(&str, Pass); 8] = [
    ("filename-prefix", strip_filename_prefix),
    ("catalog-id", strip_catalog_ids),
    ("separators", replace_separators),
    ("whitespace", collapse_whitespace_pass),
    ("author", strip_author),
    ("edition", strip_edition),
    ("trailing-punctuation", strip_trailing_punctuation),
    ("title-case", title_case_pass),
];

// Display title for `raw`. Falls back to `raw` if nothing is left.
pub fn clean_title(raw: &str, author: &str) -> String {
    let author = Some(author.trim()).filter(|a| !a.is_empty());

    let cleaned = PASSES
        .iter()
        .fold(raw.to_owned(), |title, (_, pass)| pass(&title, author));

    if cleaned.is_empty() {
        raw.to_owned()
    } else {
        cleaned
    }
}

// "dokumen.pub_", "z-lib.org_" and friends left behind by download sites
pub fn strip_filename_prefix(title: &str, _: Option<&str>) -> String {
    static REGEX_FILENAME_PREFIX: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"(?i)^\s*(?:dokumen\.pub|ebin\.pub|epdf\.pub|vdoc\.pub|pdfcoffee\.com|z-lib\.org|z-library|zlibrary|libgen(?:\.[a-z]+)?|annas-archive|b-ok\.[a-z]+)_?",
        )
        .unwrap()
    });

    REGEX_FILENAME_PREFIX.replace(title, "").into_owned()
}

pub fn strip_catalog_ids(title: &str, _: Option<&str>) -> String {
    static REGEX_CATALOG_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{6,}\b").unwrap());

    REGEX_CATALOG_ID.replace_all(title, "").into_owned()
}

pub fn replace_separators(title: &str, _: Option<&str>) -> String {
    static REGEX_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-_]+").unwrap());

    REGEX_SEPARATORS.replace_all(title, " ").into_owned()
}

fn collapse_whitespace_pass(title: &str, _: Option<&str>) -> String {
    collapse_whitespace(title)
}

// Each author word is tried once against the current end of the title, in order.
pub fn strip_author(title: &str, author: Option<&str>) -> String {
    static REGEX_TRAILING_GROUP: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"\s*\([^()]*\)\s*$").unwrap());

    let Some(author) = author else {
        return title.to_owned();
    };

    let mut title = strip_trailing_phrase(title, author);

    for word in author.split_whitespace() {
        if word.chars().count() > 2 {
            title = strip_trailing_phrase(&title, word);
        }
    }

    REGEX_TRAILING_GROUP.replace(&title, "").trim().to_owned()
}

fn strip_trailing_phrase(title: &str, phrase: &str) -> String {
    let pattern = format!(r"(?i)\s*\b{}\s*$", regex::escape(phrase));

    match Regex::new(&pattern) {
        Ok(regex) => regex.replace(title, "").trim().to_owned(),
        Err(_) => title.to_owned(),
    }
}

pub fn strip_edition(title: &str, _: Option<&str>) -> String {
    static REGEX_EDITION: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)[\s,:]*\b(?:second edition|first edition|revised|updated)\s*$").unwrap()
    });

    REGEX_EDITION.replace(title, "").trim().to_owned()
}

pub fn strip_trailing_punctuation(title: &str, _: Option<&str>) -> String {
    static REGEX_TRAILING_PUNCTUATION: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"[-_.\s]+$").unwrap());

    REGEX_TRAILING_PUNCTUATION.replace(title, "").into_owned()
}

fn title_case_pass(title: &str, _: Option<&str>) -> String {
    title_case(title)
}

pub fn title_case(title: &str) -> String {
    title
        .split(' ')
        .enumerate()
        .map(|(i, word)| {
            let lower = word.to_lowercase();
            if i > 0 && STOP_WORDS.contains(&lower.as_str()) {
                lower
            } else {
                capitalize(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

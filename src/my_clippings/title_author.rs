use once_cell::sync::Lazy;
use regex::Regex;

use crate::my_clippings::record::UNKNOWN_AUTHOR;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleAuthor {
    pub title: String,
    pub author: String,
}

// "<title> (<author>)"; the last parenthesized group at the end of the line is the author.
pub fn extract_title_author(line: &str) -> TitleAuthor {
    static REGEX_TITLE_AUTHOR: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^(?P<title>.*)\((?P<author>[^()]*)\)$").unwrap());

    let line = line.strip_prefix('\u{feff}').unwrap_or(line);

    let (title, author) = match REGEX_TITLE_AUTHOR.captures(line) {
        Some(caps) => (
            caps["title"].trim().to_owned(),
            caps["author"].trim().to_owned(),
        ),
        None => (line.to_owned(), String::new()),
    };

    // "(Someone)" alone still needs a non-empty grouping key
    let title = if title.is_empty() {
        line.to_owned()
    } else {
        title
    };
    let author = if author.is_empty() {
        UNKNOWN_AUTHOR.to_owned()
    } else {
        author
    };

    TitleAuthor { title, author }
}

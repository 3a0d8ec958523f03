use tracing::{debug, info};

use crate::{
    my_clippings::{
        metadata::extract_metadata,
        query::{group_by_title, search, sort_by_location, statistics, Groups, KindFilter, Statistics},
        record::Record,
        splitter::split_entries,
        title_author::extract_title_author,
    },
    utility::date::{Clock, SystemClock},
};

// Snapshot of one parse. A new parse produces a new snapshot; nothing is merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseResult {
    records: Vec<Record>,
    groups: Groups,
}

impl ParseResult {
    // Document order, duplicates kept.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn groups(&self) -> &Groups {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn statistics(&self) -> Statistics {
        statistics(&self.records)
    }

    pub fn search(&self, query: &str, filter: KindFilter) -> Vec<&Record> {
        search(&self.records, query, filter)
    }

    pub fn sorted_by_location(&self) -> Vec<&Record> {
        sort_by_location(&self.records)
    }

    pub fn display_title(&self, title: &str) -> Option<String> {
        self.groups.get(title).map(|group| group.display_title())
    }
}

pub fn parse_my_clippings(txt: &str) -> ParseResult {
    parse_my_clippings_with_clock(txt, &SystemClock)
}

pub fn parse_my_clippings_with_clock(txt: &str, clock: &dyn Clock) -> ParseResult {
    let entries = split_entries(txt);

    let records: Vec<Record> = entries
        .iter()
        .filter_map(|entry| parse_entry(entry, clock))
        .collect();
    let groups = group_by_title(&records);

    info!(
        entries = entries.len(),
        records = records.len(),
        groups = groups.len(),
        "parsed clippings"
    );

    ParseResult { records, groups }
}

// Line 0 is "<title> (<author>)", line 1 the metadata, the rest is content.
pub fn parse_entry(entry: &str, clock: &dyn Clock) -> Option<Record> {
    let lines: Vec<&str> = entry
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() < 2 {
        debug!(entry, "skipping entry with fewer than 2 lines");
        return None;
    }

    let title_author = extract_title_author(lines[0]);
    let metadata = extract_metadata(lines[1], clock);
    let content = lines[2..].join("\n");

    Some(Record::new(title_author, metadata, content))
}

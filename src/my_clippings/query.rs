use std::collections::{HashMap, HashSet};

use anyhow::Result;
use serde::{ser::SerializeMap, Serialize, Serializer};

use crate::{
    my_clippings::{
        record::{Kind, Record},
        title_cleaner::clean_title,
    },
    utility::str::first_number,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindFilter {
    All,
    Only(Kind),
}

impl KindFilter {
    pub fn of(name: &str) -> Result<Self> {
        if name.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        Ok(Self::Only(Kind::of(name)?))
    }

    pub fn accepts(&self, kind: Kind) -> bool {
        match self {
            Self::All => true,
            Self::Only(only) => *only == kind,
        }
    }
}

// Stable: records with the same leading location number keep their order.
pub fn sort_by_location<'a, I>(records: I) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut records: Vec<_> = records.into_iter().collect();
    records.sort_by_key(|record| first_number(record.location()));
    records
}

// Empty query matches everything; otherwise a case-insensitive substring
// of the content, the title or the author.
pub fn search<'a, I>(records: I, query: &str, filter: KindFilter) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    let query = query.to_lowercase();

    records
        .into_iter()
        .filter(|record| filter.accepts(record.kind()))
        .filter(|record| query.is_empty() || matches_query(record, &query))
        .collect()
}

fn matches_query(record: &Record, lowercase_query: &str) -> bool {
    [record.content(), record.source_title(), record.author()]
        .iter()
        .any(|field| field.to_lowercase().contains(lowercase_query))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub title: String,
    pub records: Vec<Record>,
}

impl Group {
    // Author of the first record in the group.
    pub fn author(&self) -> Option<&str> {
        self.records.first().map(|record| record.author())
    }

    pub fn display_title(&self) -> String {
        clean_title(&self.title, self.author().unwrap_or_default())
    }
}

// Records keyed by exact source title, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Groups {
    groups: Vec<Group>,
    index: HashMap<String, usize>,
}

impl Groups {
    fn push(&mut self, record: Record) {
        match self.index.get(record.source_title()) {
            Some(&i) => self.groups[i].records.push(record),
            None => {
                self.index
                    .insert(record.source_title().to_owned(), self.groups.len());
                self.groups.push(Group {
                    title: record.source_title().to_owned(),
                    records: vec![record],
                });
            }
        }
    }

    pub fn get(&self, title: &str) -> Option<&Group> {
        self.index.get(title).map(|&i| &self.groups[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Group> {
        self.groups.iter()
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|group| group.title.as_str())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    // Group order is kept; records inside each group are sorted.
    pub fn sorted_by_location(&self) -> Groups {
        let mut sorted = Groups::default();
        for group in &self.groups {
            for record in sort_by_location(&group.records) {
                sorted.push(record.clone());
            }
        }
        sorted
    }
}

impl<'a> IntoIterator for &'a Groups {
    type Item = &'a Group;
    type IntoIter = std::slice::Iter<'a, Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for Groups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.title, &group.records)?;
        }
        map.end()
    }
}

pub fn group_by_title<'a, I>(records: I) -> Groups
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut groups = Groups::default();
    for record in records {
        groups.push(record.clone());
    }
    groups
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountsByKind {
    pub highlight: usize,
    pub bookmark: usize,
    pub note: usize,
    pub unknown: usize,
}

impl CountsByKind {
    pub fn get(&self, kind: Kind) -> usize {
        match kind {
            Kind::Highlight => self.highlight,
            Kind::Bookmark => self.bookmark,
            Kind::Note => self.note,
            Kind::Unknown => self.unknown,
        }
    }

    fn count(&mut self, kind: Kind) {
        let counter = match kind {
            Kind::Highlight => &mut self.highlight,
            Kind::Bookmark => &mut self.bookmark,
            Kind::Note => &mut self.note,
            Kind::Unknown => &mut self.unknown,
        };
        *counter += 1;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total: usize,
    pub total_groups: usize,
    pub counts_by_kind: CountsByKind,
}

pub fn statistics<'a, I>(records: I) -> Statistics
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut titles = HashSet::new();
    let mut stats = Statistics::default();

    for record in records {
        stats.total += 1;
        stats.counts_by_kind.count(record.kind());
        titles.insert(record.source_title());
    }
    stats.total_groups = titles.len();

    stats
}

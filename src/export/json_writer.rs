use anyhow::{Context, Result};

use crate::my_clippings::{query::Groups, record::Record};

pub fn render_records_json<'a, I>(records: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Record>,
{
    let records: Vec<&Record> = records.into_iter().collect();
    serde_json::to_string_pretty(&records).context("Failed to serialize records")
}

pub fn render_groups_json(groups: &Groups) -> Result<String> {
    serde_json::to_string_pretty(groups).context("Failed to serialize groups")
}

use std::collections::HashSet;

use crate::{
    export::DATE_FORMAT,
    my_clippings::{
        query::{Group, Groups},
        record::{Record, UNKNOWN_AUTHOR},
    },
};

pub fn render_group_markdown(group: &Group) -> String {
    let mut md = format!("# {}\n", group.display_title());

    if let Some(author) = group.author().filter(|&a| a != UNKNOWN_AUTHOR) {
        md.push_str(&format!("*by {}*\n", author));
    }

    for record in &group.records {
        md.push('\n');
        md.push_str(&render_record_markdown(record));
    }

    md
}

pub fn render_groups_markdown(groups: &Groups) -> String {
    groups
        .iter()
        .map(render_group_markdown)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_record_markdown(record: &Record) -> String {
    let mut heading = vec![record.kind().label().to_owned()];
    if !record.location().is_empty() {
        heading.push(format!("Location {}", record.location()));
    }
    if let Some(page) = record.page() {
        heading.push(format!("Page {}", page));
    }

    let mut md = format!(
        "## {}\n*Added on {}*\n",
        heading.join(" · "),
        record.created_at().format(DATE_FORMAT)
    );

    if !record.content().is_empty() {
        md.push('\n');
        for line in record.content().lines() {
            md.push_str(&format!("> {}\n", line));
        }
    }

    md
}

// "<title>.md" with path-hostile characters replaced; repeats get " (2)", " (3)", ...
pub fn markdown_file_name(display_title: &str, used: &mut HashSet<String>) -> String {
    let stem: String = display_title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let stem = stem.trim().trim_start_matches('.');
    let stem = if stem.is_empty() { "untitled" } else { stem };

    let mut name = format!("{}.md", stem);
    let mut n = 2;
    while used.contains(&name.to_lowercase()) {
        name = format!("{} ({}).md", stem, n);
        n += 1;
    }
    used.insert(name.to_lowercase());

    name
}

use std::{collections::HashSet, fs};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use kindle_clippings::{
    export::{
        csv_writer::render_csv,
        json_writer::{render_groups_json, render_records_json},
        markdown::{markdown_file_name, render_group_markdown},
        ExportFormat,
    },
    my_clippings::parser::{parse_my_clippings_with_clock, ParseResult},
    utility::date::FixedClock,
};

const TXT: &str = "Deep Work (Cal Newport)
- Your Highlight on page 3 | Location 150-152 | Added on Monday, January 1, 2024 12:00:00 PM

Focus is the new IQ.
Second line, with a comma.
==========
Deep Work (Cal Newport)
- Your Bookmark on Location 300 | Added on Monday, January 1, 2024 1:00:00 PM
==========
";

fn parse() -> ParseResult {
    let clock = FixedClock(
        NaiveDate::from_ymd_opt(2030, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
    );
    parse_my_clippings_with_clock(TXT, &clock)
}

#[test]
fn test_export_format_names() -> Result<()> {
    assert_eq!(ExportFormat::of("json")?, ExportFormat::Json);
    assert_eq!(ExportFormat::of("Groups-JSON")?, ExportFormat::GroupsJson);
    assert_eq!(ExportFormat::of("md")?, ExportFormat::Markdown);
    assert!(ExportFormat::of("pdf").is_err());
    Ok(())
}

#[test]
fn test_csv() -> Result<()> {
    let parsed = parse();
    let csv = render_csv(parsed.records())?;

    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    assert_eq!(
        reader.headers()?.iter().collect::<Vec<_>>(),
        vec!["Title", "Author", "Type", "Location", "Page", "Date", "Content"]
    );

    let rows: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>()?;
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0].iter().collect::<Vec<_>>(),
        vec![
            "Deep Work",
            "Cal Newport",
            "Highlight",
            "150-152",
            "3",
            "2024-01-01 12:00:00",
            "Focus is the new IQ.\nSecond line, with a comma.",
        ]
    );
    assert_eq!(&rows[1][2], "Bookmark");
    assert_eq!(&rows[1][4], "");

    Ok(())
}

#[test]
fn test_json() -> Result<()> {
    let parsed = parse();

    let records: serde_json::Value = serde_json::from_str(&render_records_json(parsed.records())?)?;
    assert_eq!(records[0]["sourceTitle"], "Deep Work");
    assert_eq!(records[0]["kind"], "Highlight");
    assert_eq!(records[0]["page"], "3");
    assert_eq!(records[0]["createdAt"], "2024-01-01T12:00:00");
    assert_eq!(records[1]["page"], serde_json::Value::Null);

    let groups: serde_json::Value = serde_json::from_str(&render_groups_json(parsed.groups())?)?;
    let deep_work = groups["Deep Work"].as_array().context("group is not an array")?;
    assert_eq!(deep_work.len(), 2);
    assert_eq!(deep_work[1]["kind"], "Bookmark");

    Ok(())
}

#[test]
fn test_markdown() -> Result<()> {
    let parsed = parse();
    let group = parsed.groups().get("Deep Work").context("group is missing")?;

    assert_eq!(
        render_group_markdown(group),
        "# Deep Work
*by Cal Newport*

## Highlight · Location 150-152 · Page 3
*Added on 2024-01-01 12:00:00*

> Focus is the new IQ.
> Second line, with a comma.

## Bookmark · Location 300
*Added on 2024-01-01 13:00:00*
"
    );

    Ok(())
}

#[test]
fn test_markdown_file_names() -> Result<()> {
    let mut used = HashSet::new();
    assert_eq!(markdown_file_name("Deep Work", &mut used), "Deep Work.md");
    assert_eq!(markdown_file_name("deep work", &mut used), "deep work (2).md");
    assert_eq!(markdown_file_name("AC/DC: Live?", &mut used), "AC_DC_ Live_.md");
    assert_eq!(markdown_file_name("  ", &mut used), "untitled.md");

    // the names are usable as files
    let dir = tempfile::tempdir()?;
    for name in &used {
        fs::write(dir.path().join(name), "")?;
    }
    assert_eq!(fs::read_dir(dir.path())?.count(), used.len());

    Ok(())
}

#[test]
fn test_markdown_hides_unknown_author() -> Result<()> {
    let parsed = parse_my_clippings_with_clock(
        "Some Notes Without Parens
- Your Note on Location 7 | Added on 2024-01-01 10:00:00

Remember this.
==========
",
        &FixedClock(
            NaiveDate::from_ymd_opt(2030, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        ),
    );
    let group = parsed
        .groups()
        .get("Some Notes Without Parens")
        .context("group is missing")?;

    let md = render_group_markdown(group);
    assert!(md.starts_with("# Some Notes Without Parens\n\n## Note · Location 7\n"));
    assert!(!md.contains("*by "));

    Ok(())
}

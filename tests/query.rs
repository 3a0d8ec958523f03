use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use kindle_clippings::my_clippings::{
    metadata::Metadata,
    query::{group_by_title, search, sort_by_location, statistics, KindFilter, Statistics},
    record::{Kind, Record},
    title_author::TitleAuthor,
};

fn record(title: &str, author: &str, kind: Kind, location: &str, content: &str) -> Record {
    Record::new(
        TitleAuthor {
            title: title.to_owned(),
            author: author.to_owned(),
        },
        Metadata {
            kind,
            location: location.to_owned(),
            page: None,
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        },
        content.to_owned(),
    )
}

fn sample() -> Vec<Record> {
    vec![
        record("Deep Work", "Cal Newport", Kind::Highlight, "150-152", "Focus is the new IQ."),
        record("Walden", "Henry David Thoreau", Kind::Note, "7", "Simplify, simplify."),
        record("Deep Work", "Cal Newport", Kind::Bookmark, "300", ""),
        record("Walden", "Henry David Thoreau", Kind::Highlight, "", "I went to the woods"),
    ]
}

#[test]
fn test_sort_by_location_is_stable() {
    let records = vec![
        record("T", "A", Kind::Highlight, "10", "first ten"),
        record("T", "A", Kind::Highlight, "2", "two"),
        record("T", "A", Kind::Highlight, "10-20", "second ten"),
    ];

    let sorted: Vec<&str> = sort_by_location(&records)
        .iter()
        .map(|r| r.location())
        .collect();
    assert_eq!(sorted, vec!["2", "10", "10-20"]);
}

#[test]
fn test_sort_by_location_without_digits_first() {
    let records = sample();
    let sorted: Vec<&str> = sort_by_location(&records)
        .iter()
        .map(|r| r.location())
        .collect();
    assert_eq!(sorted, vec!["", "7", "150-152", "300"]);
}

#[test]
fn test_search_is_case_insensitive() {
    let records = sample();

    let found = search(&records, "FOCUS", KindFilter::All);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].location(), "150-152");

    // title and author match too
    assert_eq!(search(&records, "walden", KindFilter::All).len(), 2);
    assert_eq!(search(&records, "newport", KindFilter::All).len(), 2);
    assert!(search(&records, "nothing like this", KindFilter::All).is_empty());
}

#[test]
fn test_search_with_kind_filter() -> anyhow::Result<()> {
    let records = sample();

    assert_eq!(search(&records, "", KindFilter::All).len(), 4);
    assert_eq!(
        search(&records, "", KindFilter::of("highlight")?).len(),
        2
    );
    assert_eq!(
        search(&records, "deep", KindFilter::Only(Kind::Bookmark)).len(),
        1
    );
    assert!(search(&records, "", KindFilter::Only(Kind::Unknown)).is_empty());
    assert!(KindFilter::of("clip").is_err());

    Ok(())
}

#[test]
fn test_group_by_title_keeps_first_seen_order() {
    let records = sample();
    let groups = group_by_title(&records);

    assert_eq!(groups.titles().collect::<Vec<_>>(), vec!["Deep Work", "Walden"]);

    let walden = groups.get("Walden").unwrap();
    assert_eq!(walden.author(), Some("Henry David Thoreau"));
    assert_eq!(
        walden.records.iter().map(|r| r.kind()).collect::<Vec<_>>(),
        vec![Kind::Note, Kind::Highlight]
    );

    let sorted = groups.sorted_by_location();
    assert_eq!(
        sorted
            .get("Walden")
            .unwrap()
            .records
            .iter()
            .map(|r| r.location())
            .collect::<Vec<_>>(),
        vec!["", "7"]
    );
}

#[test]
fn test_statistics() {
    let records = sample();
    let stats = statistics(&records);

    assert_eq!(stats.total, 4);
    assert_eq!(stats.total_groups, 2);
    assert_eq!(stats.counts_by_kind.highlight, 2);
    assert_eq!(stats.counts_by_kind.note, 1);
    assert_eq!(stats.counts_by_kind.bookmark, 1);
    assert_eq!(stats.counts_by_kind.unknown, 0);

    assert_eq!(statistics(&Vec::<Record>::new()), Statistics::default());
}

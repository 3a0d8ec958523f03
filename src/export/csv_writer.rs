use std::io::Write;

use anyhow::{Context, Result};

use crate::{export::DATE_FORMAT, my_clippings::record::Record};

pub const CSV_HEADER: [&str; 7] = [
    "Title", "Author", "Type", "Location", "Page", "Date", "Content",
];

pub fn write_csv<'a, W, I>(writer: W, records: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Record>,
{
    let mut writer = csv::Writer::from_writer(writer);

    writer
        .write_record(CSV_HEADER)
        .context("Failed to write CSV header")?;

    for record in records {
        let date = record.created_at().format(DATE_FORMAT).to_string();
        writer
            .write_record([
                record.source_title(),
                record.author(),
                record.kind().label(),
                record.location(),
                record.page().unwrap_or_default(),
                date.as_str(),
                record.content(),
            ])
            .with_context(|| format!("Failed to write CSV row: {:?}", record))?;
    }

    writer.flush().context("Failed to flush CSV")?;
    Ok(())
}

pub fn render_csv<'a, I>(records: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut buffer = Vec::new();
    write_csv(&mut buffer, records)?;
    String::from_utf8(buffer).context("CSV output is not UTF-8")
}

//! pubsite convert - publication table to publication document
//!
//! Turns the lab's publication table (exported as CSV) into the JSON
//! document consumed by the site: two buckets, sorted newest first, with an
//! explicit `within_year_order` so the site never needs the raw dates.

pub mod cell;
pub mod table;

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub use table::{read_table, Kind, Row, Table};

/// One entry as written to the document. `year` is `null` when unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicationRecord {
    pub year: Option<i64>,
    pub title: String,
    pub authors: String,
    pub venue: String,
    pub within_year_order: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub journal: usize,
    pub proceedings: usize,
}

/// The complete output document.
#[derive(Debug, Clone, Serialize)]
pub struct PublicationDocument {
    pub generated_from: String,
    pub generated_at: String,
    pub counts: Counts,
    pub journal_papers: Vec<PublicationRecord>,
    pub proceedings: Vec<PublicationRecord>,
}

/// Sort rows (year desc, date desc, table position asc) and number them
/// within each year, 0 being the newest.
pub fn assign_within_year(mut rows: Vec<Row>) -> Vec<PublicationRecord> {
    rows.sort_by(|a, b| {
        b.year
            .cmp(&a.year)
            .then_with(|| b.date_key.cmp(&a.date_key))
            .then_with(|| a.position.cmp(&b.position))
    });

    let mut current_year = None;
    let mut within = 0;
    rows.into_iter()
        .map(|row| {
            if current_year != Some(row.year) {
                current_year = Some(row.year);
                within = 0;
            }
            let record = PublicationRecord {
                year: (row.year != 0).then_some(row.year),
                title: row.title,
                authors: row.authors,
                venue: row.venue,
                within_year_order: within,
            };
            within += 1;
            record
        })
        .collect()
}

/// Build the document from table rows.
pub fn build_document(
    table: Table,
    generated_from: &str,
    generated_at: DateTime<Utc>,
) -> PublicationDocument {
    let journal_papers = assign_within_year(table.journal);
    let proceedings = assign_within_year(table.proceedings);
    PublicationDocument {
        generated_from: generated_from.to_string(),
        generated_at: generated_at.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        counts: Counts {
            journal: journal_papers.len(),
            proceedings: proceedings.len(),
        },
        journal_papers,
        proceedings,
    }
}

/// Read a table from `reader` and build the document.
pub fn convert_reader<R: Read>(reader: R, generated_from: &str) -> Result<PublicationDocument> {
    let table = read_table(reader)?;
    if table.skipped > 0 {
        log::info!("skipped {} rows without title or known kind", table.skipped);
    }
    Ok(build_document(table, generated_from, Utc::now()))
}

/// Convert `input` (CSV) into `output` (pretty JSON), creating parent directories.
pub fn convert_file(input: &Path, output: &Path) -> Result<PublicationDocument> {
    let file = File::open(input)
        .with_context(|| format!("Failed to open table: {}", input.display()))?;
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let document = convert_reader(BufReader::new(file), &name)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let mut out = File::create(output)
        .with_context(|| format!("Failed to create output: {}", output.display()))?;
    serde_json::to_writer_pretty(&mut out, &document)?;
    out.write_all(b"\n")?;

    log::info!(
        "wrote {} journal papers and {} proceedings to {}",
        document.counts.journal,
        document.counts.proceedings,
        output.display()
    );
    Ok(document)
}

//! Reading publication rows out of the source table

use std::io::Read;

use anyhow::{Context, Result};

use crate::cell::{date_key, impact_suffix, year_from_any};

/// Column positions in the source table (0-based).
mod col {
    pub const TITLE: usize = 1;
    pub const KIND: usize = 2;
    pub const VENUE: usize = 3;
    pub const DATE: usize = 4;
    pub const AUTHORS: usize = 5;
    pub const DETAIL: usize = 6;
    pub const IMPACT_FACTOR: usize = 9;
    pub const TOP_PERCENT: usize = 10;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Journal,
    Proceedings,
}

/// One publication row after cell parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based line in the table, header included
    pub position: usize,
    pub kind: Kind,
    pub year: i64,
    pub date_key: i64,
    pub title: String,
    pub authors: String,
    pub venue: String,
}

/// Rows split by kind, in table order.
#[derive(Debug, Default)]
pub struct Table {
    pub journal: Vec<Row>,
    pub proceedings: Vec<Row>,
    pub skipped: usize,
}

/// Parse a CSV table with a header row.
///
/// Rows without a title, or whose kind mentions neither "journal" nor
/// "conference", are skipped. A row without any detectable year inherits the
/// last year seen above it (the table is kept roughly newest first).
pub fn read_table<R: Read>(reader: R) -> Result<Table> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut table = Table::default();
    let mut last_year: Option<i64> = None;

    for (i, record) in csv.records().enumerate() {
        let position = i + 2;
        let record = record.with_context(|| format!("Failed to read table row {position}"))?;
        let cell = |idx: usize| record.get(idx).map(str::trim).unwrap_or("");

        let title = cell(col::TITLE);
        if title.is_empty() {
            table.skipped += 1;
            continue;
        }
        let kind_text = cell(col::KIND).to_lowercase();
        let kind = if kind_text.contains("journal") {
            Kind::Journal
        } else if kind_text.contains("conference") {
            Kind::Proceedings
        } else {
            log::debug!("row {position}: skipping kind {:?}", cell(col::KIND));
            table.skipped += 1;
            continue;
        };

        let venue_main = cell(col::VENUE);
        let date = cell(col::DATE);
        let detail = cell(col::DETAIL);

        let year = match year_from_any(&[date, venue_main, detail, title]) {
            Some(y) => {
                last_year = Some(y);
                y
            }
            None => {
                log::debug!("row {position}: no year found, carrying forward {last_year:?}");
                last_year.unwrap_or(0)
            }
        };

        let mut venue = venue_main.to_string();
        if !detail.is_empty() && detail != "-" {
            if !venue.is_empty() {
                venue.push(' ');
            }
            venue.push_str(detail);
        }
        if kind == Kind::Journal {
            venue.push_str(&impact_suffix(cell(col::IMPACT_FACTOR), cell(col::TOP_PERCENT)));
        }

        let row = Row {
            position,
            kind,
            year,
            date_key: date_key(date),
            title: title.to_string(),
            authors: cell(col::AUTHORS).to_string(),
            venue,
        };
        match kind {
            Kind::Journal => table.journal.push(row),
            Kind::Proceedings => table.proceedings.push(row),
        }
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "no,title,kind,venue,date,authors,detail,x,y,if,top\n";

    fn parse(body: &str) -> Table {
        read_table(format!("{HEADER}{body}").as_bytes()).unwrap()
    }

    #[test]
    fn journal_row_with_impact() {
        let t = parse("1,Heat pumps,Journal (SCI),Energy,2024.03.01,Kim,\"Vol 3, 100\",,,6.93,4.95\n");
        assert_eq!(t.journal.len(), 1);
        let row = &t.journal[0];
        assert_eq!(row.position, 2);
        assert_eq!(row.year, 2024);
        assert_eq!(row.date_key, 20240301);
        assert_eq!(row.venue, "Energy Vol 3, 100 (IF 6.9, Top 4.95%)");
    }

    #[test]
    fn conference_row_has_no_impact_suffix() {
        let t = parse("1,Talk,International Conference,IAQVEC2023,-,Lee,-,,,5.0,1.0\n");
        assert_eq!(t.proceedings.len(), 1);
        assert_eq!(t.proceedings[0].venue, "IAQVEC2023");
        assert_eq!(t.proceedings[0].year, 2023);
        assert_eq!(t.proceedings[0].date_key, 0);
    }

    #[test]
    fn skips_untitled_and_unknown_kinds() {
        let t = parse("1,,Journal,V,2020.01.01,A,,,,,\n2,Patent X,Patent,V,2020.01.01,A,,,,,\n");
        assert!(t.journal.is_empty());
        assert!(t.proceedings.is_empty());
        assert_eq!(t.skipped, 2);
    }

    #[test]
    fn year_carries_forward() {
        let t = parse(concat!(
            "1,First,Journal,Venue,2022.05.01,A,,,,,\n",
            "2,Second,Conference,Venue,-,B,,,,,\n",
        ));
        assert_eq!(t.proceedings[0].year, 2022);
    }

    #[test]
    fn first_row_without_year_is_zero() {
        let t = parse("1,Undated,Journal,Venue,-,A,,,,,\n");
        assert_eq!(t.journal[0].year, 0);
    }

    #[test]
    fn short_rows_are_tolerated() {
        let t = parse("1,Short,Journal\n");
        assert_eq!(t.journal.len(), 1);
        assert_eq!(t.journal[0].venue, "");
        assert_eq!(t.journal[0].authors, "");
    }

    #[test]
    fn authors_kept_as_written() {
        let t = parse(concat!(
            "1,Dash,Journal,Venue,2021.01.01,-,,,,,\n",
            "2,Spaced,Journal,Venue,2021.01.01,  Park; Choi  ,,,,,\n",
        ));
        assert_eq!(t.journal[0].authors, "-");
        assert_eq!(t.journal[1].authors, "Park; Choi");
    }
}

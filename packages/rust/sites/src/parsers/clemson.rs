//! Clemson's season-year roster table.

use std::sync::LazyLock;

use rosters_extract::{RawPlayer, normalize_headers};
use rosters_shared::{Result, Team};
use scraper::{Html, Selector};

use super::{RosterParser, anchor_url, sel, text_of, zip_row};

/// Trailing header cells with no roster field (stats and social columns).
const TRAILING_HEADERS: usize = 4;
/// Trailing body cells matching those headers.
const TRAILING_CELLS: usize = 2;

static HEADER: LazyLock<Selector> = LazyLock::new(|| sel("th"));
static TABLE: LazyLock<Selector> = LazyLock::new(|| sel("table"));
static ROW: LazyLock<Selector> = LazyLock::new(|| sel("tr"));
static CELL: LazyLock<Selector> = LazyLock::new(|| sel("td"));

pub struct ClemsonTableParser;

impl RosterParser for ClemsonTableParser {
    fn name(&self) -> &str {
        "clemson-table"
    }

    fn parse(&self, doc: &Html, team: &Team) -> Result<Vec<RawPlayer>> {
        let mut headers: Vec<String> = doc
            .select(&HEADER)
            .map(text_of)
            .filter(|h| h != "MAJOR")
            .collect();
        headers.truncate(headers.len().saturating_sub(TRAILING_HEADERS));
        let columns = normalize_headers(&headers)?;

        let Some(table) = doc.select(&TABLE).next() else {
            return Ok(Vec::new());
        };

        let mut roster = Vec::new();
        for row in table.select(&ROW).skip(1) {
            let mut cells: Vec<Option<String>> = row.select(&CELL).map(text_of).map(Some).collect();
            cells.truncate(cells.len().saturating_sub(TRAILING_CELLS));

            let mut player = zip_row(&columns, cells);
            player.high_school = None;
            player.previous_school = None;
            player.url = anchor_url(row, team);
            roster.push(player);
        }

        Ok(roster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::test_support::{fixture, team};

    #[test]
    fn drops_trailing_columns() {
        let doc = fixture("clemson_table.html");
        let t = team(147, "https://clemsontigers.com/sports/volleyball");
        let roster = ClemsonTableParser.parse(&doc, &t).unwrap();

        assert_eq!(roster.len(), 2);
        let first = &roster[0];
        assert_eq!(first.jersey.as_deref(), Some("4"));
        assert_eq!(first.name.as_deref(), Some("Sam Carter"));
        assert_eq!(first.position.as_deref(), Some("DS/L"));
        assert_eq!(first.height.as_deref(), Some("5-6"));
        assert_eq!(first.year.as_deref(), Some("So."));
        assert_eq!(first.hometown.as_deref(), Some("Greenville, S.C."));
        assert_eq!(first.high_school, None);
        assert_eq!(
            first.url.as_deref(),
            Some("https://clemsontigers.com/sports/volleyball/roster/sam-carter/501")
        );
    }
}

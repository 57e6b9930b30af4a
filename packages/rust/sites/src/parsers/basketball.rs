//! Basketball-style roster table (`thead`/`tbody`).

use std::sync::LazyLock;

use rosters_extract::{RawPlayer, normalize_headers};
use rosters_shared::{Result, Team};
use scraper::{Html, Selector};
use tracing::warn;

use super::{RosterParser, anchor_name, anchor_url, cell_text, sel, squash_whitespace, text_of, zip_row};

/// Header cells that never carry a roster field on these pages.
const IGNORED_HEADERS: &[&str] = &["Social"];

static HEADER: LazyLock<Selector> = LazyLock::new(|| sel("thead th"));
static BODY: LazyLock<Selector> = LazyLock::new(|| sel("tbody"));
static ROW: LazyLock<Selector> = LazyLock::new(|| sel("tr"));
static CELL: LazyLock<Selector> = LazyLock::new(|| sel("td"));

/// Parses `thead`/`tbody` tables where the name cell may be link-only.
pub struct BasketballTableParser;

impl RosterParser for BasketballTableParser {
    fn name(&self) -> &str {
        "basketball-table"
    }

    fn parse(&self, doc: &Html, team: &Team) -> Result<Vec<RawPlayer>> {
        let headers: Vec<String> = doc
            .select(&HEADER)
            .map(text_of)
            .filter(|h| !h.is_empty() && !IGNORED_HEADERS.contains(&h.as_str()))
            .collect();
        if headers.is_empty() {
            warn!(team = %team.team, "no table header found");
            return Ok(Vec::new());
        }
        let columns = normalize_headers(&headers)?;

        let Some(body) = doc.select(&BODY).next() else {
            warn!(team = %team.team, "no table body found");
            return Ok(Vec::new());
        };

        let mut roster = Vec::new();
        for row in body.select(&ROW) {
            let mut cells: Vec<Option<String>> = row.select(&CELL).map(cell_text).map(Some).collect();
            if cells.is_empty() {
                continue;
            }
            if let Some(Some(text)) = cells.get_mut(4) {
                *text = squash_whitespace(text);
            }
            if cells.len() < columns.len() {
                if let Some(name) = anchor_name(row) {
                    cells.insert(1, Some(name));
                }
            }

            let mut player = zip_row(&columns, cells);
            player.url = anchor_url(row, team);
            roster.push(player);
        }

        Ok(roster)
    }
}

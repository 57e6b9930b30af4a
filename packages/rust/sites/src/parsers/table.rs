//! Generic roster table layout (basketball-style sites and `wvball` pages).
//!
//! Real tables are irregular: blank spacer cells, embedded majors, names only
//! present in a link. [`TableQuirks`] holds the per-team row adjustments.

use std::sync::LazyLock;

use rosters_extract::{RawPlayer, filter_headers, normalize_headers};
use rosters_shared::{Result, Team};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use super::{RosterParser, anchor_name, anchor_url, cell_text, sel, squash_whitespace, zip_row};

/// Majors that appear as an unlabelled trailing cell on some rosters.
const KNOWN_MAJORS: &[&str] = &[
    "Nursing",
    "Biology",
    "Public Health",
    "Exercise Science",
    "Pre-Nursing",
    "Economics",
    "Physical Therapy",
    "Psychology",
    "Business Administration",
    "Criminal Justice/Psychology",
    "Forensic Science",
    "Undecided",
    "Management",
    "Psychology / Management",
    "Political Science",
    "Psychology / Pre-Medicine",
    "Undeclared",
    "Biomedical Engineering",
    "Business Marketing",
    "Chemistry",
    "Business",
    "Computer Science",
    "Business Management",
];

/// Pronoun and marker text ignored when deciding whether a cell is blank.
const BLANK_MARKERS: &[&str] = &["*", "(she/her/hers)", "she/her/hers"];

/// Rows shorter than this are spacers or section headings.
const MIN_ROW_CELLS: usize = 4;

static TABLE: LazyLock<Selector> = LazyLock::new(|| sel("table"));
static ROW: LazyLock<Selector> = LazyLock::new(|| sel("tr"));
static BODY_ROW: LazyLock<Selector> = LazyLock::new(|| sel("tbody tr"));
static CELL: LazyLock<Selector> = LazyLock::new(|| sel("td"));

/// When to drop a row's last cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrailingDrop {
    #[default]
    Never,
    /// Row has exactly as many cells as there are columns.
    WhenFull,
    /// Row has at least as many cells as there are columns.
    WhenAtLeastFull,
}

/// Per-team adjustments for [`SidearmTableParser`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableQuirks {
    /// Which `<table>` on the page holds the roster.
    pub table_index: usize,
    /// Keep blank cells instead of filtering them out.
    pub keep_blank_cells: bool,
    /// The name column is only a link; insert its text as the second cell.
    pub insert_anchor_name: bool,
    /// Skip rows whose first cell equals this jersey.
    pub skip_jersey: Option<&'static str>,
    pub trailing_drop: TrailingDrop,
    /// Remove the cell at this index from every row.
    pub drop_cell: Option<usize>,
    /// Where the major sits when a row contains one; `None` means last.
    pub major_cell: Option<usize>,
}

/// Parses the first (or configured) roster table on the page.
#[derive(Debug, Clone, Default)]
pub struct SidearmTableParser {
    quirks: TableQuirks,
}

impl SidearmTableParser {
    pub fn new(quirks: TableQuirks) -> Self {
        Self { quirks }
    }

    fn row_cells(&self, row: ElementRef<'_>, column_count: usize) -> Option<Vec<Option<String>>> {
        let q = &self.quirks;
        let texts: Vec<String> = row.select(&CELL).map(cell_text).collect();

        let mut cells: Vec<Option<String>> = if q.keep_blank_cells {
            texts.into_iter().map(Some).collect()
        } else {
            let mut kept: Vec<Option<String>> =
                texts.into_iter().filter(|t| !is_blank(t)).map(Some).collect();
            if q.insert_anchor_name {
                if let Some(name) = anchor_name(row) {
                    kept.insert(kept.len().min(1), Some(name));
                }
            }
            kept
        };

        if let (Some(skip), Some(Some(first))) = (q.skip_jersey, cells.first()) {
            if first == skip {
                return None;
            }
        }

        match cells.len() {
            // Jersey-less rows.
            n if n == MIN_ROW_CELLS => cells.insert(0, None),
            n if n < MIN_ROW_CELLS => {
                debug!(?cells, "skipping short row");
                return None;
            }
            _ => {}
        }

        if let Some(Some(text)) = cells.get_mut(4) {
            *text = squash_whitespace(text);
        }

        let drop_last = match q.trailing_drop {
            TrailingDrop::Never => false,
            TrailingDrop::WhenFull => cells.len() == column_count,
            TrailingDrop::WhenAtLeastFull => cells.len() >= column_count,
        };
        if drop_last {
            cells.pop();
        }
        if let Some(index) = q.drop_cell.filter(|i| *i < cells.len()) {
            cells.remove(index);
        }

        let has_major = cells
            .iter()
            .flatten()
            .any(|c| KNOWN_MAJORS.contains(&c.as_str()));
        if has_major {
            match q.major_cell.filter(|i| *i < cells.len()) {
                Some(index) => {
                    cells.remove(index);
                }
                None => {
                    cells.pop();
                }
            }
        }

        if cells.len() < column_count {
            if let Some(name) = anchor_name(row) {
                cells.insert(1, Some(name));
            }
        }

        Some(cells)
    }
}

impl RosterParser for SidearmTableParser {
    fn name(&self) -> &str {
        "sidearm-table"
    }

    fn parse(&self, doc: &Html, team: &Team) -> Result<Vec<RawPlayer>> {
        let Some(table) = doc.select(&TABLE).nth(self.quirks.table_index) else {
            warn!(team = %team.team, index = self.quirks.table_index, "roster table not found");
            return Ok(Vec::new());
        };
        let Some(header_row) = table.select(&ROW).next() else {
            warn!(team = %team.team, "roster table has no rows");
            return Ok(Vec::new());
        };

        let headers: Vec<String> = header_row
            .children()
            .filter_map(ElementRef::wrap)
            .map(|cell| cell.text().collect())
            .collect();
        let columns = normalize_headers(&filter_headers(&headers))?;

        let mut rows: Vec<ElementRef<'_>> = table.select(&BODY_ROW).collect();
        if rows.is_empty() {
            rows = table.select(&ROW).skip(1).collect();
        }

        let mut roster = Vec::new();
        for row in rows {
            let Some(cells) = self.row_cells(row, columns.len()) else {
                continue;
            };
            let mut player = zip_row(&columns, cells);
            player.url = anchor_url(row, team);
            roster.push(player);
        }

        Ok(roster)
    }
}

fn is_blank(text: &str) -> bool {
    let mut stripped = text.to_string();
    for marker in BLANK_MARKERS {
        stripped = stripped.replace(marker, "");
    }
    stripped.trim().is_empty()
}

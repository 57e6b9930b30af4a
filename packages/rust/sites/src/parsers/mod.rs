//! HTML roster parsers.
//!
//! Each parser reads one page layout into [`RawPlayer`]s. Parsers are pure:
//! fetching and normalization happen elsewhere.

mod basketball;
mod cards;
mod clemson;
mod list_item;
mod table;

use std::sync::LazyLock;

use rosters_extract::{CanonicalField, RawPlayer};
use rosters_shared::{Result, Team};
use scraper::{ElementRef, Html, Selector};

use crate::urls::resolve_player_url;

pub use basketball::BasketballTableParser;
pub use cards::SidearmCardsParser;
pub use clemson::ClemsonTableParser;
pub use list_item::SidearmListItemParser;
pub use table::{SidearmTableParser, TableQuirks, TrailingDrop};

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Reads one roster page layout.
///
/// An empty result means the layout was not found on the page; an error means
/// it was found but could not be interpreted (e.g. an unknown column header).
pub trait RosterParser: Send + Sync {
    /// Human-readable parser name for tracing.
    fn name(&self) -> &str;

    /// Extract every player on the page.
    fn parse(&self, doc: &Html, team: &Team) -> Result<Vec<RawPlayer>>;
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

pub(crate) fn sel(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

/// All text under `el`, trimmed.
pub(crate) fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Trimmed text of the first match of `selector` under `el`.
pub(crate) fn first_text(el: ElementRef<'_>, selector: &Selector) -> Option<String> {
    el.select(selector).next().map(text_of)
}

pub(crate) fn squash_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trimmed cell text, ignoring the cell's first `<span>` (mobile labels and
/// pronunciation hints live there).
pub(crate) fn cell_text(cell: ElementRef<'_>) -> String {
    static SPAN: LazyLock<Selector> = LazyLock::new(|| sel("span"));

    let Some(span) = cell.select(&SPAN).next() else {
        return text_of(cell);
    };
    let span_id = span.id();

    cell.descendants()
        .filter(|node| !node.ancestors().any(|a| a.id() == span_id))
        .filter_map(|node| node.value().as_text().map(|t| &**t))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Whitespace-normalized text of the row's first link.
pub(crate) fn anchor_name(row: ElementRef<'_>) -> Option<String> {
    static ANCHOR: LazyLock<Selector> = LazyLock::new(|| sel("a"));
    row.select(&ANCHOR)
        .next()
        .map(|a| squash_whitespace(&a.text().collect::<String>()))
}

/// The row's first link, resolved against the team URL.
pub(crate) fn anchor_url(row: ElementRef<'_>, team: &Team) -> Option<String> {
    static ANCHOR: LazyLock<Selector> = LazyLock::new(|| sel("a[href]"));
    let href = row.select(&ANCHOR).next()?.value().attr("href")?;
    Some(resolve_player_url(team.url.as_deref().unwrap_or_default(), href))
}

/// Store `value` in the field named by `field`.
pub(crate) fn assign(player: &mut RawPlayer, field: CanonicalField, value: Option<String>) {
    let slot = match field {
        CanonicalField::Jersey => &mut player.jersey,
        CanonicalField::Name => &mut player.name,
        CanonicalField::AcademicYear => &mut player.year,
        CanonicalField::Height => &mut player.height,
        CanonicalField::Position => &mut player.position,
        CanonicalField::Town => &mut player.hometown,
        CanonicalField::HighSchool => &mut player.high_school,
        CanonicalField::PreviousSchool => &mut player.previous_school,
    };
    *slot = value;
}

/// Zip a header row with one row of cells; extra cells on either side are ignored.
pub(crate) fn zip_row(columns: &[CanonicalField], cells: Vec<Option<String>>) -> RawPlayer {
    let mut player = RawPlayer::default();
    for (field, value) in columns.iter().zip(cells) {
        assign(&mut player, *field, value);
    }
    player
}

#[cfg(test)]
pub(crate) mod test_support {
    use rosters_shared::Team;
    use scraper::Html;

    pub fn fixture(name: &str) -> Html {
        let path = format!("{}/../../../fixtures/html/{name}", env!("CARGO_MANIFEST_DIR"));
        let body = std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("{path}: {e}"));
        Html::parse_document(&body)
    }

    pub fn team(id: u32, url: &str) -> Team {
        Team::new(id, "Test University", url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_cell(html: &str) -> String {
        let doc = Html::parse_fragment(html);
        let td = doc.select(&sel("td")).next().unwrap();
        cell_text(td)
    }

    #[test]
    fn cell_text_skips_first_span() {
        assert_eq!(first_cell("<table><tr><td><span>Ht.:</span> 6-2 </td></tr></table>"), "6-2");
        assert_eq!(first_cell("<table><tr><td> Jane Doe </td></tr></table>"), "Jane Doe");
    }

    #[test]
    fn zip_row_ignores_extra_cells() {
        let columns = [CanonicalField::Jersey, CanonicalField::Name];
        let player = zip_row(
            &columns,
            vec![Some("7".into()), Some("Jane".into()), Some("extra".into())],
        );
        assert_eq!(player.jersey.as_deref(), Some("7"));
        assert_eq!(player.name.as_deref(), Some("Jane"));
        assert_eq!(player.hometown, None);
    }
}

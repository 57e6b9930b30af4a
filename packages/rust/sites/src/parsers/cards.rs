//! Sidearm Sports card layout (`li.sidearm-roster-player`).

use std::sync::LazyLock;

use rosters_extract::RawPlayer;
use rosters_shared::{Result, Team};
use scraper::{ElementRef, Html, Selector};

use super::{RosterParser, anchor_url, first_text, sel, squash_whitespace, text_of};

/// Entries that link to another sport's roster on some sites.
const SKIPPED_NAMES: &[&str] = &["Addison Jeansonne"];

static PLAYER: LazyLock<Selector> = LazyLock::new(|| sel("li.sidearm-roster-player"));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| sel("a"));
static HEADING: LazyLock<Selector> = LazyLock::new(|| sel("h3"));
static PREVIOUS_SCHOOL: LazyLock<Selector> =
    LazyLock::new(|| sel("span.sidearm-roster-player-previous-school"));
static HIGH_SCHOOL: LazyLock<Selector> =
    LazyLock::new(|| sel("span.sidearm-roster-player-highschool"));
static HEIGHT: LazyLock<Selector> = LazyLock::new(|| sel("span.sidearm-roster-player-height"));
static HOMETOWN: LazyLock<Selector> = LazyLock::new(|| sel("span.sidearm-roster-player-hometown"));
static POSITION: LazyLock<Selector> = LazyLock::new(|| sel("div.sidearm-roster-player-position"));
static POSITION_LONG_SHORT: LazyLock<Selector> = LazyLock::new(|| {
    sel("span.text-bold span.sidearm-roster-player-position-long-short.hide-on-small-down")
});
static POSITION_BOLD: LazyLock<Selector> = LazyLock::new(|| sel("span.text-bold"));
static JERSEY: LazyLock<Selector> = LazyLock::new(|| sel("span.sidearm-roster-player-jersey-number"));
static ACADEMIC_YEAR: LazyLock<Selector> =
    LazyLock::new(|| sel("span.sidearm-roster-player-academic-year"));

/// Parses the standard Sidearm roster cards.
pub struct SidearmCardsParser;

impl RosterParser for SidearmCardsParser {
    fn name(&self) -> &str {
        "sidearm-cards"
    }

    fn parse(&self, doc: &Html, team: &Team) -> Result<Vec<RawPlayer>> {
        let mut roster = Vec::new();

        for card in doc.select(&PLAYER) {
            let name = card_name(card);
            if name.as_deref().is_some_and(|n| SKIPPED_NAMES.contains(&n)) {
                continue;
            }

            // First span is the abbreviated class.
            let year = card.select(&ACADEMIC_YEAR).nth(1).map(|el| el.text().collect());

            roster.push(RawPlayer {
                player_id: card.value().attr("data-player-id").map(str::to_string),
                name,
                jersey: first_text(card, &JERSEY),
                position: card_position(card),
                height: card.select(&HEIGHT).next().map(|el| el.text().collect()),
                year,
                hometown: first_text(card, &HOMETOWN),
                high_school: first_text(card, &HIGH_SCHOOL).map(|hs| squash_whitespace(&hs)),
                previous_school: card.select(&PREVIOUS_SCHOOL).next().map(|el| el.text().collect()),
                url: anchor_url(card, team),
            });
        }

        Ok(roster)
    }
}

fn card_name(card: ElementRef<'_>) -> Option<String> {
    let heading = || first_text(card, &HEADING);

    let labelled = card
        .select(&ANCHOR)
        .next()
        .and_then(|a| a.value().attr("aria-label"))
        .map(|label| label.split(" - ").next().unwrap_or_default().trim().to_string());

    match labelled {
        Some(name) if name.contains("Instagram") => heading(),
        Some(name) => Some(name),
        None => heading(),
    }
}

fn card_position(card: ElementRef<'_>) -> Option<String> {
    let block = card.select(&POSITION).next()?;
    let text = text_of(block);

    if text.is_empty() {
        return Some("N/A".to_string());
    }
    // Position shares the block with the height; keep the leading token.
    if text.contains('"') {
        return text.split_whitespace().next().map(str::to_string);
    }
    first_text(block, &POSITION_LONG_SHORT).or_else(|| first_text(block, &POSITION_BOLD))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::test_support::{fixture, team};

    fn parse_fixture() -> Vec<RawPlayer> {
        let team = team(255, "https://ramblinwreck.com/sports/w-volley");
        SidearmCardsParser
            .parse(&fixture("sidearm_cards.html"), &team)
            .unwrap()
    }

    #[test]
    fn reads_every_card_field() {
        let roster = parse_fixture();
        let jane = &roster[0];

        assert_eq!(jane.player_id.as_deref(), Some("4012"));
        assert_eq!(jane.name.as_deref(), Some("Jane Doe"));
        assert_eq!(jane.jersey.as_deref(), Some("7"));
        assert_eq!(jane.position.as_deref(), Some("OH"));
        assert_eq!(jane.year.as_deref(), Some("Junior"));
        assert_eq!(jane.height.as_deref(), Some("6'1\""));
        assert_eq!(jane.hometown.as_deref(), Some("Atlanta, Ga."));
        assert_eq!(jane.high_school.as_deref(), Some("Westminster Schools"));
        assert_eq!(jane.previous_school, None);
        assert_eq!(
            jane.url.as_deref(),
            Some("https://ramblinwreck.com/sports/w-volley/roster/jane-doe/4012")
        );
    }

    #[test]
    fn skips_known_bad_entries() {
        let roster = parse_fixture();
        assert_eq!(roster.len(), 3);
        assert!(roster.iter().all(|p| p.name.as_deref() != Some("Addison Jeansonne")));
    }

    #[test]
    fn position_fallbacks() {
        let roster = parse_fixture();
        // Instagram aria-label falls back to the heading; empty position is N/A.
        assert_eq!(roster[1].name.as_deref(), Some("Maria Lopez"));
        assert_eq!(roster[1].position.as_deref(), Some("N/A"));
        assert_eq!(roster[1].previous_school.as_deref(), Some("Texas A&M"));
        // Height-first block takes the leading token.
        assert_eq!(roster[2].position.as_deref(), Some("S"));
    }

    #[test]
    fn page_without_cards_is_empty() {
        let doc = Html::parse_document("<html><body><p>No roster</p></body></html>");
        let roster = SidearmCardsParser
            .parse(&doc, &team(1, "https://a.edu/sports/vb"))
            .unwrap();
        assert!(roster.is_empty());
    }
}

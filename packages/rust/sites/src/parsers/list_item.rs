//! Sidearm list layout (`li.sidearm-roster-list-item`), rendered pages only.

use std::sync::LazyLock;

use rosters_extract::RawPlayer;
use rosters_shared::{Result, Team};
use scraper::{Html, Selector};

use super::{RosterParser, anchor_url, first_text, sel, text_of};

static ITEM: LazyLock<Selector> = LazyLock::new(|| sel("li.sidearm-roster-list-item"));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| sel("a"));
static SPAN: LazyLock<Selector> = LazyLock::new(|| sel("span"));
static YEAR: LazyLock<Selector> = LazyLock::new(|| sel("span.sidearm-roster-list-item-year"));
static HOMETOWN: LazyLock<Selector> =
    LazyLock::new(|| sel("div.sidearm-roster-list-item-hometown"));
static HIGH_SCHOOL: LazyLock<Selector> =
    LazyLock::new(|| sel("span.sidearm-roster-list-item-highschool"));
static HEIGHT: LazyLock<Selector> = LazyLock::new(|| sel("span.sidearm-roster-list-item-height"));
static POSITION: LazyLock<Selector> =
    LazyLock::new(|| sel("span.sidearm-roster-list-item-position"));

pub struct SidearmListItemParser;

impl RosterParser for SidearmListItemParser {
    fn name(&self) -> &str {
        "sidearm-list-item"
    }

    fn parse(&self, doc: &Html, team: &Team) -> Result<Vec<RawPlayer>> {
        let roster = doc
            .select(&ITEM)
            .map(|item| RawPlayer {
                player_id: None,
                name: first_text(item, &ANCHOR),
                // The photo badge is the first span.
                jersey: item.select(&SPAN).next().map(text_of),
                position: first_text(item, &POSITION),
                height: first_text(item, &HEIGHT),
                year: first_text(item, &YEAR),
                hometown: first_text(item, &HOMETOWN),
                high_school: first_text(item, &HIGH_SCHOOL),
                previous_school: None,
                url: anchor_url(item, team),
            })
            .collect();

        Ok(roster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::test_support::{fixture, team};

    #[test]
    fn reads_list_items() {
        let doc = fixture("sidearm_list_item.html");
        let t = team(311, "https://cyclones.com/sports/womens-volleyball");
        let roster = SidearmListItemParser.parse(&doc, &t).unwrap();

        assert_eq!(roster.len(), 1);
        let p = &roster[0];
        assert_eq!(p.jersey.as_deref(), Some("10"));
        assert_eq!(p.name.as_deref(), Some("Alex Morgan"));
        assert_eq!(p.position.as_deref(), Some("Setter"));
        assert_eq!(p.height.as_deref(), Some("5' 11''"));
        assert_eq!(p.year.as_deref(), Some("Sophomore"));
        assert_eq!(p.hometown.as_deref(), Some("Ames, Iowa"));
        assert_eq!(p.high_school.as_deref(), Some("Ames"));
        assert_eq!(
            p.url.as_deref(),
            Some("https://cyclones.com/sports/womens-volleyball/roster/alex-morgan/77")
        );
    }
}

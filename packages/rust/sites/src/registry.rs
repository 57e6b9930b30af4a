//! Team → scraping strategy routing.
//!
//! Each team resolves to a [`SiteStrategy`], which expands into an ordered
//! list of [`Attempt`]s. The pipeline runs attempts in order and keeps the
//! first non-empty roster.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use rosters_shared::{Season, Team};

use crate::parsers::{
    BasketballTableParser, ClemsonTableParser, RosterParser, SidearmCardsParser,
    SidearmListItemParser, SidearmTableParser, TableQuirks, TrailingDrop,
};
use crate::script::ScriptLayout;
use crate::urls::{UrlFormat, baskbl_retry_url, build_roster_url, detect_url_format};

// ---------------------------------------------------------------------------
// Routing tables
// ---------------------------------------------------------------------------

/// Teams never scraped.
const EXCLUDED_TEAMS: &[u32] = &[532];

/// Teams whose site has no page for one season.
const MISSING_SEASONS: &[(u32, &str)] = &[(26107, "2021-22")];

const BYU: u32 = 77;
const SAN_JOSE_STATE: u32 = 630;
const MIAMI: u32 = 415;
const CLEMSON: u32 = 147;
const IOWA_STATE: u32 = 311;
const VANDERBILT: u32 = 736;
const OREGON_STATE: &[u32] = &[528];
const AIR_FORCE: &[u32] = &[721, 80];

const TABLE_SCRIPT_TEAMS: &[u32] = &[5, 308, 497, 554];

const CARD_SCRIPT_TEAMS: &[u32] = &[
    9, 71, 83, 96, 99, 156, 173, 180, 191, 234, 249, 257, 301, 306, 367, 387, 392, 400, 404, 418,
    428, 441, 490, 521, 522, 559, 574, 603, 635, 664, 671, 676, 688, 690, 700, 719, 749, 758,
];

const LIST_ITEM_SCRIPT_TEAMS: &[u32] = &[51, 248, 731];

const ROSTER_PLAYER_SCRIPT_TEAMS: &[u32] = &[37, 52, 175, 316, 487];

const DATA_TABLES_SCRIPT_TEAMS: &[u32] = &[556];

/// Sites that only render their roster with JavaScript.
const RENDERED_TEAMS: &[u32] = &[
    8, 31, 66, 72, 80, 224, 327, 334, 463, 513, 528, 623, 648, 694, 706, 721, 725, 735, 742, 809,
    811, 1000, 22, 28, 46, 47, 56, 59, 67, 81, 86, 90, 101, 110, 129, 140, 142, 148, 157, 158, 164,
    166, 169, 172, 176, 193, 196, 204, 215, 217, 229, 235, 241, 255, 280, 288, 317, 326, 331, 345,
    352, 355, 365, 388, 390, 406, 414, 416, 417, 419, 433, 434, 440, 454, 456, 457, 458, 469, 502,
    504, 509, 518, 523, 529, 539, 545, 562, 598, 599, 610, 626, 649, 657, 659, 673, 674, 682, 695,
    697, 698, 703, 716, 718, 732, 756, 760, 768, 772, 796, 798, 800, 807, 812, 1001, 1014, 1036,
    1104, 1162, 1174, 1196, 1340, 1356, 1400, 1403, 1461, 2707, 2711, 2810, 8688, 8746, 11538,
    13028, 23725, 30031, 30037, 30135, 30173, 505160, 312, 328, 473, 1064, 1111,
];

/// Tables whose blank cells are real (empty) columns.
const KEEP_BLANK_CELL_TEAMS: &[u32] = &[
    114, 1050, 1059, 1199, 22626, 24317, 30037, 341, 1315, 46, 641, 730, 75, 806, 817, 89, 145,
    217, 247, 2713, 2798, 28594, 30002, 30225, 467, 567, 569, 137, 715, 779, 808, 8688, 379, 1461,
];

/// Tables whose name cell is link-only.
const ANCHOR_NAME_TEAMS: &[u32] = &[1340, 760, 510, 227];

// ---------------------------------------------------------------------------
// Strategy and attempts
// ---------------------------------------------------------------------------

/// How a team's roster is obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteStrategy {
    /// Not scraped.
    Skip(&'static str),
    /// Site-specific script, no fallback.
    Dedicated(ScriptLayout),
    /// Shared script layout, then the standard page.
    Script(ScriptLayout),
    /// Clemson's season-year table.
    ClemsonTable,
    /// Rendered Sidearm list items.
    RenderedListItems,
    /// Rendered roster page, then plain HTTP.
    Rendered,
    /// `wvball` page: Sidearm cards, then the roster table.
    Wvball,
    /// `w-baskbl` page with its retry URL.
    Baskbl,
    /// Sidearm cards on `{url}/roster/{season}`.
    Standard,
}

impl fmt::Display for SiteStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip(reason) => write!(f, "skip ({reason})"),
            Self::Dedicated(layout) => write!(f, "dedicated script ({layout})"),
            Self::Script(layout) => write!(f, "script ({layout}) with standard fallback"),
            Self::ClemsonTable => f.write_str("clemson table"),
            Self::RenderedListItems => f.write_str("rendered list items"),
            Self::Rendered => f.write_str("rendered page with plain fallback"),
            Self::Wvball => f.write_str("wvball page"),
            Self::Baskbl => f.write_str("w-baskbl page"),
            Self::Standard => f.write_str("standard sidearm page"),
        }
    }
}

/// How a document is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// Plain HTTP (with the curl fallback).
    Http,
    /// Headless browser HTML capture.
    Rendered,
    /// Headless browser script evaluation.
    Script(ScriptLayout),
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http => f.write_str("http"),
            Self::Rendered => f.write_str("rendered"),
            Self::Script(layout) => write!(f, "script:{layout}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub transport: Transport,
}

/// One document fetch and the parsers to try on it.
///
/// Script attempts carry no parsers; the script output is the roster.
#[derive(Clone)]
pub struct Attempt {
    pub request: FetchRequest,
    pub parsers: Vec<Arc<dyn RosterParser>>,
}

impl Attempt {
    fn http(url: String, parsers: Vec<Arc<dyn RosterParser>>) -> Self {
        Self {
            request: FetchRequest {
                url,
                transport: Transport::Http,
            },
            parsers,
        }
    }

    fn rendered(url: String, parsers: Vec<Arc<dyn RosterParser>>) -> Self {
        Self {
            request: FetchRequest {
                url,
                transport: Transport::Rendered,
            },
            parsers,
        }
    }

    fn script(url: String, layout: ScriptLayout) -> Self {
        Self {
            request: FetchRequest {
                url,
                transport: Transport::Script(layout),
            },
            parsers: Vec::new(),
        }
    }

    pub fn parser_names(&self) -> Vec<&str> {
        self.parsers.iter().map(|p| p.name()).collect()
    }
}

impl fmt::Debug for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attempt")
            .field("request", &self.request)
            .field("parsers", &self.parser_names())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Routes teams to strategies and expands strategies into attempts.
pub struct SiteRegistry {
    routes: HashMap<u32, SiteStrategy>,
    rendered: HashSet<u32>,
    quirks: HashMap<u32, TableQuirks>,
}

impl SiteRegistry {
    /// Registry with the built-in routing tables.
    pub fn new() -> Self {
        let mut routes = HashMap::new();

        // Shared layouts first so dedicated sites override them.
        let shared = [
            (TABLE_SCRIPT_TEAMS, ScriptLayout::Table),
            (CARD_SCRIPT_TEAMS, ScriptLayout::Card),
            (LIST_ITEM_SCRIPT_TEAMS, ScriptLayout::ListItem),
            (ROSTER_PLAYER_SCRIPT_TEAMS, ScriptLayout::RosterPlayer),
            (DATA_TABLES_SCRIPT_TEAMS, ScriptLayout::DataTables),
            (AIR_FORCE, ScriptLayout::AirForce),
            (OREGON_STATE, ScriptLayout::OregonState),
        ];
        for (ids, layout) in shared {
            for id in ids {
                routes.insert(*id, SiteStrategy::Script(layout));
            }
        }

        routes.insert(BYU, SiteStrategy::Dedicated(ScriptLayout::Byu));
        routes.insert(SAN_JOSE_STATE, SiteStrategy::Dedicated(ScriptLayout::SanJoseState));
        routes.insert(MIAMI, SiteStrategy::Dedicated(ScriptLayout::Miami));
        routes.insert(VANDERBILT, SiteStrategy::Dedicated(ScriptLayout::Vanderbilt));
        routes.insert(CLEMSON, SiteStrategy::ClemsonTable);
        routes.insert(IOWA_STATE, SiteStrategy::RenderedListItems);

        Self {
            routes,
            rendered: RENDERED_TEAMS.iter().copied().collect(),
            quirks: builtin_quirks(),
        }
    }

    /// Pick the strategy for `team` in `season`.
    pub fn strategy_for(&self, team: &Team, season: &Season) -> SiteStrategy {
        if team.roster.is_some() {
            return SiteStrategy::Skip("roster maintained by hand");
        }
        let Some(url) = team.base_url() else {
            return SiteStrategy::Skip("no team url");
        };
        if EXCLUDED_TEAMS.contains(&team.ncaa_id) {
            return SiteStrategy::Skip("excluded");
        }
        let season_label = season.to_string();
        if MISSING_SEASONS
            .iter()
            .any(|(id, s)| *id == team.ncaa_id && *s == season_label)
        {
            return SiteStrategy::Skip("no roster for this season");
        }

        if let Some(strategy) = self.routes.get(&team.ncaa_id) {
            return strategy.clone();
        }
        if self.rendered.contains(&team.ncaa_id) {
            return SiteStrategy::Rendered;
        }
        match detect_url_format(url) {
            UrlFormat::WvballIndex => SiteStrategy::Wvball,
            UrlFormat::Baskbl => SiteStrategy::Baskbl,
            _ => SiteStrategy::Standard,
        }
    }

    /// Table adjustments for `team_id`.
    pub fn table_quirks(&self, team_id: u32) -> TableQuirks {
        self.quirks.get(&team_id).cloned().unwrap_or_default()
    }

    /// Ordered attempts for `team` in `season`; empty when the team is skipped.
    pub fn plan(&self, team: &Team, season: &Season) -> Vec<Attempt> {
        let strategy = self.strategy_for(team, season);
        let Some(base) = team.base_url() else {
            return Vec::new();
        };

        let standard_url = build_roster_url(base, season, UrlFormat::Default);
        let cards = || -> Vec<Arc<dyn RosterParser>> { vec![Arc::new(SidearmCardsParser)] };
        let table = || -> Arc<dyn RosterParser> {
            Arc::new(SidearmTableParser::new(self.table_quirks(team.ncaa_id)))
        };

        match strategy {
            SiteStrategy::Skip(_) => Vec::new(),
            SiteStrategy::Dedicated(layout) => {
                let url = match layout {
                    ScriptLayout::Byu => format!("{base}/roster/season/{}", season.long_form()),
                    _ => build_roster_url(base, season, UrlFormat::SeasonPath),
                };
                vec![Attempt::script(url, layout)]
            }
            SiteStrategy::Script(layout) => vec![
                Attempt::script(standard_url.clone(), layout),
                Attempt::http(standard_url, cards()),
            ],
            SiteStrategy::ClemsonTable => vec![Attempt::http(
                build_roster_url(base, season, UrlFormat::SeasonYearPath),
                vec![Arc::new(ClemsonTableParser)],
            )],
            SiteStrategy::RenderedListItems => vec![Attempt::rendered(
                standard_url,
                vec![Arc::new(SidearmListItemParser)],
            )],
            SiteStrategy::Rendered => {
                let mut attempts = Vec::new();
                if base.contains("wvball") {
                    attempts.push(Attempt::rendered(standard_url, vec![table()]));
                    attempts.push(Attempt::http(
                        build_roster_url(base, season, UrlFormat::Wbkb),
                        vec![table()],
                    ));
                } else if base.contains("w-baskbl") {
                    attempts.push(Attempt::rendered(
                        standard_url,
                        vec![Arc::new(BasketballTableParser)],
                    ));
                    attempts.extend(baskbl_attempts(base, season));
                } else {
                    attempts.push(Attempt::rendered(standard_url.clone(), cards()));
                    attempts.push(Attempt::http(standard_url, cards()));
                }
                attempts
            }
            SiteStrategy::Wvball => vec![Attempt::http(
                build_roster_url(base, season, UrlFormat::WvballIndex),
                vec![Arc::new(SidearmCardsParser), table()],
            )],
            SiteStrategy::Baskbl => baskbl_attempts(base, season),
            SiteStrategy::Standard => vec![Attempt::http(standard_url, cards())],
        }
    }
}

impl Default for SiteRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn baskbl_attempts(base: &str, season: &Season) -> Vec<Attempt> {
    let parsers = || -> Vec<Arc<dyn RosterParser>> { vec![Arc::new(BasketballTableParser)] };
    let mut attempts = vec![Attempt::http(
        build_roster_url(base, season, UrlFormat::Baskbl),
        parsers(),
    )];
    if let Some(retry) = baskbl_retry_url(base, season) {
        attempts.push(Attempt::http(retry, parsers()));
    }
    attempts
}

fn builtin_quirks() -> HashMap<u32, TableQuirks> {
    let mut quirks: HashMap<u32, TableQuirks> = HashMap::new();

    for id in KEEP_BLANK_CELL_TEAMS {
        quirks.entry(*id).or_default().keep_blank_cells = true;
    }
    for id in ANCHOR_NAME_TEAMS {
        quirks.entry(*id).or_default().insert_anchor_name = true;
    }
    quirks.entry(30164).or_default().table_index = 1;
    quirks.entry(326).or_default().table_index = 12;
    quirks.entry(73).or_default().skip_jersey = Some("43");
    quirks.entry(1036).or_default().trailing_drop = TrailingDrop::WhenFull;
    quirks.entry(1096).or_default().trailing_drop = TrailingDrop::WhenAtLeastFull;
    quirks.entry(142).or_default().drop_cell = Some(2);
    quirks.entry(186).or_default().major_cell = Some(4);

    quirks
}

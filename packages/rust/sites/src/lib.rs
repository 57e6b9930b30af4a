//! Site-specific roster extraction.
//!
//! This crate provides:
//! - [`urls`] — roster URL construction per site pattern
//! - [`parsers`] — HTML layouts ([`RosterParser`] implementations)
//! - [`script`] — in-page extraction scripts for JavaScript-only sites
//! - [`registry`] — team routing ([`SiteRegistry`]) into ordered [`Attempt`]s

pub mod parsers;
pub mod registry;
pub mod script;
pub mod urls;

pub use parsers::{
    BasketballTableParser, ClemsonTableParser, RosterParser, SidearmCardsParser,
    SidearmListItemParser, SidearmTableParser, TableQuirks, TrailingDrop,
};
pub use registry::{Attempt, FetchRequest, SiteRegistry, SiteStrategy, Transport};
pub use script::{ScriptLayout, ScriptRecord, records_from_json};
pub use urls::{UrlFormat, baskbl_retry_url, build_roster_url, detect_url_format, resolve_player_url};

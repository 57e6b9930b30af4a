//! Scrape orchestration for the roster pipeline.
//!
//! This crate ties together team loading, site routing, fetching, parsing and
//! CSV output into season runs (see [`pipeline::scrape_season`]).

pub mod pipeline;
pub mod report;
pub mod sink;
pub mod teams;

pub use pipeline::{ScrapeContext, TeamRoster, scrape_season, scrape_team};
pub use report::{ScrapeReporter, ScrapeSummary, SilentReporter, TeamOutcome, TracingReporter};
pub use sink::{CsvSink, output_path};
pub use teams::{load_teams, select_teams};

//! Scrape outcomes, run summary, and progress reporting.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rosters_shared::{Season, Team};
use tracing::{info, warn};

/// What happened to one team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamOutcome {
    /// Roster found with this many players.
    Parsed(usize),
    /// Every attempt ran but none produced players.
    Unparsed,
    /// Every attempt failed; carries the last error.
    Skipped(String),
    /// Not scraped by routing rules.
    Excluded(String),
}

/// Totals for one season run.
#[derive(Debug, Clone)]
pub struct ScrapeSummary {
    pub season: Season,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
    /// Player rows written.
    pub players: usize,
    pub parsed: Vec<u32>,
    pub unparsed: Vec<u32>,
    pub skipped: Vec<u32>,
    pub excluded: Vec<u32>,
}

impl ScrapeSummary {
    pub fn new(season: Season) -> Self {
        Self {
            season,
            started_at: Utc::now(),
            elapsed: Duration::ZERO,
            players: 0,
            parsed: Vec::new(),
            unparsed: Vec::new(),
            skipped: Vec::new(),
            excluded: Vec::new(),
        }
    }

    /// Record one team's outcome.
    pub fn record(&mut self, team_id: u32, outcome: &TeamOutcome) {
        match outcome {
            TeamOutcome::Parsed(count) => {
                self.players += count;
                self.parsed.push(team_id);
            }
            TeamOutcome::Unparsed => self.unparsed.push(team_id),
            TeamOutcome::Skipped(_) => self.skipped.push(team_id),
            TeamOutcome::Excluded(_) => self.excluded.push(team_id),
        }
    }
}

/// Progress callback for a season run.
pub trait ScrapeReporter: Send + Sync {
    /// Called before a team's attempts run.
    fn team_started(&self, team: &Team);
    /// Called once a team's outcome is known.
    fn team_finished(&self, team: &Team, outcome: &TeamOutcome);
    /// Called when the run completes.
    fn done(&self, summary: &ScrapeSummary);
}

/// No-op reporter for headless/test usage.
pub struct SilentReporter;

impl ScrapeReporter for SilentReporter {
    fn team_started(&self, _team: &Team) {}
    fn team_finished(&self, _team: &Team, _outcome: &TeamOutcome) {}
    fn done(&self, _summary: &ScrapeSummary) {}
}

/// Reports through `tracing` events.
pub struct TracingReporter;

impl ScrapeReporter for TracingReporter {
    fn team_started(&self, team: &Team) {
        info!(team_id = team.ncaa_id, team = %team.team, "processing team");
    }

    fn team_finished(&self, team: &Team, outcome: &TeamOutcome) {
        match outcome {
            TeamOutcome::Parsed(players) => {
                info!(team_id = team.ncaa_id, players, "roster parsed");
            }
            TeamOutcome::Unparsed => warn!(team_id = team.ncaa_id, "no roster found"),
            TeamOutcome::Skipped(error) => {
                warn!(team_id = team.ncaa_id, %error, "team skipped");
            }
            TeamOutcome::Excluded(reason) => {
                info!(team_id = team.ncaa_id, %reason, "team not scraped");
            }
        }
    }

    fn done(&self, summary: &ScrapeSummary) {
        info!(
            season = %summary.season,
            players = summary.players,
            parsed = summary.parsed.len(),
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "scrape complete"
        );
        info!(teams = ?summary.unparsed, "unparsed teams");
        info!(teams = ?summary.skipped, "skipped teams");
    }
}

//! End-to-end scrape pipeline: team → attempts → fetch → parse → normalize → CSV.

use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

use scraper::Html;
use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};

use rosters_extract::RawPlayer;
use rosters_fetch::{HeadlessBrowser, HttpFetcher};
use rosters_shared::{AppConfig, Player, Result, RosterError, Season, Team};
use rosters_sites::{Attempt, RosterParser, SiteRegistry, SiteStrategy, Transport, records_from_json};

use crate::report::{ScrapeReporter, ScrapeSummary, TeamOutcome};
use crate::sink::CsvSink;

/// Transports and routing shared by every team in a run.
pub struct ScrapeContext {
    fetcher: HttpFetcher,
    browser: HeadlessBrowser,
    registry: SiteRegistry,
}

impl ScrapeContext {
    /// Build the HTTP client and browser from config, with the built-in registry.
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self::from_parts(
            HttpFetcher::new(&config.http)?,
            HeadlessBrowser::new(&config.browser),
            SiteRegistry::new(),
        ))
    }

    pub fn from_parts(fetcher: HttpFetcher, browser: HeadlessBrowser, registry: SiteRegistry) -> Self {
        Self {
            fetcher,
            browser,
            registry,
        }
    }
}

/// One team's roster and how it was obtained.
#[derive(Debug, Clone)]
pub struct TeamRoster {
    pub players: Vec<Player>,
    pub outcome: TeamOutcome,
}

/// Scrape one team for `season`.
///
/// Attempts run in order and the first non-empty roster wins. A failing
/// attempt does not stop the next one; the team is `Skipped` only when every
/// attempt failed, and `Unparsed` when they ran but found nothing.
#[instrument(skip_all, fields(team_id = team.ncaa_id, team = %team.team, season = %season))]
pub async fn scrape_team(ctx: &ScrapeContext, team: &Team, season: &Season) -> TeamRoster {
    let attempts = ctx.registry.plan(team, season);
    if attempts.is_empty() {
        let reason = match ctx.registry.strategy_for(team, season) {
            SiteStrategy::Skip(reason) => reason.to_string(),
            other => other.to_string(),
        };
        return TeamRoster {
            players: Vec::new(),
            outcome: TeamOutcome::Excluded(reason),
        };
    }

    let mut last_error: Option<RosterError> = None;
    let mut completed = 0usize;

    for attempt in &attempts {
        let request = &attempt.request;
        debug!(url = %request.url, transport = %request.transport, "running attempt");

        match run_attempt(ctx, team, attempt).await {
            Ok(raw) if !raw.is_empty() => {
                let players: Vec<Player> = raw.iter().map(|p| p.normalize(team, season)).collect();
                info!(url = %request.url, players = players.len(), "roster found");
                let outcome = TeamOutcome::Parsed(players.len());
                return TeamRoster { players, outcome };
            }
            Ok(_) => {
                completed += 1;
                debug!(url = %request.url, "attempt found no players");
            }
            Err(e) => {
                warn!(url = %request.url, transport = %request.transport, error = %e, "attempt failed");
                last_error = Some(e);
            }
        }
    }

    let outcome = match (completed, last_error) {
        (0, Some(e)) => TeamOutcome::Skipped(e.to_string()),
        _ => TeamOutcome::Unparsed,
    };
    TeamRoster {
        players: Vec::new(),
        outcome,
    }
}

async fn run_attempt(ctx: &ScrapeContext, team: &Team, attempt: &Attempt) -> Result<Vec<RawPlayer>> {
    let url = &attempt.request.url;

    match attempt.request.transport {
        Transport::Http => {
            let page = ctx.fetcher.get(url).await?;
            if !page.is_success() {
                debug!(status = page.status, "non-success response");
                return Ok(Vec::new());
            }
            parse_with(&attempt.parsers, &page.body, team)
        }
        Transport::Rendered => match ctx.browser.render_html(url).await? {
            Some(html) => parse_with(&attempt.parsers, &html, team),
            None => Ok(Vec::new()),
        },
        Transport::Script(layout) => {
            let value = ctx.browser.evaluate(url, layout.source()).await?;
            records_from_json(value)
        }
    }
}

/// Try each parser on the document; the first non-empty result wins.
///
/// Errors only surface when every parser failed.
fn parse_with(parsers: &[Arc<dyn RosterParser>], body: &str, team: &Team) -> Result<Vec<RawPlayer>> {
    let doc = Html::parse_document(body);
    let mut last_error = None;
    let mut any_ok = false;

    for parser in parsers {
        match parser.parse(&doc, team) {
            Ok(roster) if !roster.is_empty() => {
                debug!(parser = parser.name(), players = roster.len(), "parser matched");
                return Ok(roster);
            }
            Ok(_) => any_ok = true,
            Err(e) => {
                debug!(parser = parser.name(), error = %e, "parser failed");
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) if !any_ok => Err(e),
        _ => Ok(Vec::new()),
    }
}

/// Scrape every team for `season`, writing rows to `sink` in team order.
///
/// `concurrency` > 1 runs teams in bounded batches; results are still written
/// in input order.
#[instrument(skip_all, fields(season = %season, teams = teams.len(), concurrency = concurrency))]
pub async fn scrape_season<W: Write>(
    ctx: Arc<ScrapeContext>,
    teams: Vec<Team>,
    season: &Season,
    concurrency: usize,
    sink: &mut CsvSink<W>,
    reporter: &dyn ScrapeReporter,
) -> Result<ScrapeSummary> {
    let start = Instant::now();
    let mut summary = ScrapeSummary::new(season.clone());
    let concurrency = concurrency.max(1);
    let semaphore = Arc::new(Semaphore::new(concurrency));

    info!(teams = teams.len(), concurrency, "starting scrape");

    let mut queue = teams;
    while !queue.is_empty() {
        let batch: Vec<Team> = {
            let drain_count = queue.len().min(concurrency);
            queue.drain(..drain_count).collect()
        };

        let mut handles = Vec::with_capacity(batch.len());
        for team in &batch {
            reporter.team_started(team);

            let ctx = ctx.clone();
            let sem = semaphore.clone();
            let team = team.clone();
            let season = season.clone();
            handles.push(tokio::spawn(async move {
                let _permit = sem.acquire_owned().await;
                scrape_team(&ctx, &team, &season).await
            }));
        }

        for (team, handle) in batch.iter().zip(handles) {
            let roster = match handle.await {
                Ok(roster) => roster,
                Err(e) => TeamRoster {
                    players: Vec::new(),
                    outcome: TeamOutcome::Skipped(format!("task failed: {e}")),
                },
            };

            sink.write_players(&roster.players)?;
            summary.record(team.ncaa_id, &roster.outcome);
            reporter.team_finished(team, &roster.outcome);
        }
        sink.flush()?;
    }

    summary.elapsed = start.elapsed();
    reporter.done(&summary);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::SilentReporter;
    use rosters_shared::{BrowserConfig, HttpConfig};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn cards_fixture() -> String {
        let path = format!(
            "{}/../../../fixtures/html/sidearm_cards.html",
            env!("CARGO_MANIFEST_DIR")
        );
        std::fs::read_to_string(path).unwrap()
    }

    fn context() -> ScrapeContext {
        let http = HttpConfig {
            timeout_secs: 5,
            curl_fallback: false,
            ..HttpConfig::default()
        };
        let browser = BrowserConfig {
            command: "rosters-test-no-such-browser".into(),
            ..BrowserConfig::default()
        };
        ScrapeContext::from_parts(
            HttpFetcher::new(&http).unwrap(),
            HeadlessBrowser::new(&browser),
            SiteRegistry::new(),
        )
    }

    async fn roster_server() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sports/womens-volleyball/roster/2023-24"))
            .respond_with(ResponseTemplate::new(200).set_body_string(cards_fixture()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        server
    }

    fn season() -> Season {
        "2023-24".parse().unwrap()
    }

    #[tokio::test]
    async fn standard_team_is_parsed_and_normalized() {
        let server = roster_server().await;
        let team = Team::new(
            99001,
            "Example State",
            format!("{}/sports/womens-volleyball", server.uri()),
        );

        let roster = scrape_team(&context(), &team, &season()).await;
        assert_eq!(roster.outcome, TeamOutcome::Parsed(3));

        let jane = &roster.players[0];
        assert_eq!(jane.name, "Jane Doe");
        assert_eq!(jane.year, "Junior");
        assert_eq!(jane.height, "6'1\"");
        assert_eq!(jane.season, "2023-24");
        assert_eq!(jane.player_id.as_deref(), Some("4012"));
    }

    #[tokio::test]
    async fn missing_page_is_unparsed() {
        let server = roster_server().await;
        let team = Team::new(99002, "Nowhere College", format!("{}/sports/vb", server.uri()));

        let roster = scrape_team(&context(), &team, &season()).await;
        assert_eq!(roster.outcome, TeamOutcome::Unparsed);
        assert!(roster.players.is_empty());
    }

    #[tokio::test]
    async fn failing_transport_is_skipped() {
        // Dedicated script teams have a single browser attempt.
        let team = Team::new(630, "San Jose State", "https://sjsuspartans.com/sports/volleyball");
        let roster = scrape_team(&context(), &team, &season()).await;
        assert!(matches!(roster.outcome, TeamOutcome::Skipped(_)));
    }

    #[tokio::test]
    async fn excluded_team_is_not_fetched() {
        let team = Team::new(532, "Excluded", "https://example.invalid/sports/vb");
        let roster = scrape_team(&context(), &team, &season()).await;
        assert!(matches!(roster.outcome, TeamOutcome::Excluded(_)));
    }

    #[tokio::test]
    async fn season_run_writes_csv_in_team_order() {
        let server = roster_server().await;
        let teams = vec![
            Team::new(99002, "Nowhere College", format!("{}/sports/vb", server.uri())),
            Team::new(
                99001,
                "Example State",
                format!("{}/sports/womens-volleyball", server.uri()),
            ),
            Team::new(532, "Excluded", "https://example.invalid/sports/vb"),
        ];

        let mut sink = CsvSink::from_writer(Vec::new(), true).unwrap();
        let summary = scrape_season(
            Arc::new(context()),
            teams,
            &season(),
            2,
            &mut sink,
            &SilentReporter,
        )
        .await
        .unwrap();

        assert_eq!(summary.players, 3);
        assert_eq!(summary.parsed, vec![99001]);
        assert_eq!(summary.unparsed, vec![99002]);
        assert_eq!(summary.excluded, vec![532]);

        let csv = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("ncaa_id,team,player_id"));
        assert!(lines[1].starts_with("99001,Example State,4012,Jane Doe,Junior"));
        assert!(lines[1].ends_with(",2023-24"));
    }
}

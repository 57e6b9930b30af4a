//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use rosters_core::{
    CsvSink, ScrapeContext, ScrapeReporter, ScrapeSummary, TeamOutcome, load_teams, output_path,
    scrape_season, scrape_team, select_teams,
};
use rosters_shared::{AppConfig, Season, Team, init_config, load_config, load_config_from};
use rosters_sites::SiteRegistry;
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// rosters — scrape collegiate volleyball rosters into CSV.
#[derive(Parser)]
#[command(
    name = "rosters",
    version,
    about = "Scrape collegiate volleyball rosters from athletics sites into a normalized CSV.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.rosters/rosters.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Scrape every team (or a subset) for one season.
    Scrape {
        /// Season in YYYY-YY form (defaults to the current season).
        #[arg(short, long)]
        season: Option<Season>,

        /// Only scrape these team IDs.
        #[arg(short, long, num_args = 1..)]
        teams: Vec<u32>,

        /// Teams list (defaults to `teams_file` from config).
        #[arg(long)]
        teams_file: Option<PathBuf>,

        /// Output directory (defaults to `output_dir` from config).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Append to the season's `_adds` file instead of rewriting the main file.
        #[arg(long)]
        append: bool,

        /// Number of teams scraped at once.
        #[arg(short, long)]
        concurrency: Option<usize>,
    },

    /// Scrape a single roster URL and print its players as CSV.
    Url {
        /// Team sport URL (e.g. https://example.com/sports/womens-volleyball).
        url: String,

        /// Season in YYYY-YY form (defaults to the current season).
        #[arg(short, long)]
        season: Option<Season>,

        /// Team ID used for routing and the ncaa_id column.
        #[arg(long, default_value_t = 0)]
        id: u32,

        /// Team name for the team column.
        #[arg(long, default_value = "")]
        name: String,
    },

    /// Show how a team is routed and which attempts would run.
    Strategy {
        /// Team ID.
        id: u32,

        /// Team URL (defaults to the URL in the teams file).
        #[arg(long)]
        url: Option<String>,

        /// Season in YYYY-YY form (defaults to the current season).
        #[arg(short, long)]
        season: Option<Season>,

        /// Teams list used to look up the team.
        #[arg(long)]
        teams_file: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "rosters=info",
        1 => "rosters=debug",
        _ => "rosters=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config;
    let config = || -> Result<AppConfig> {
        Ok(match &config_path {
            Some(path) => load_config_from(path)?,
            None => load_config()?,
        })
    };

    match cli.command {
        Command::Scrape {
            season,
            teams,
            teams_file,
            out,
            append,
            concurrency,
        } => {
            let config = config()?;
            let opts = ScrapeOptions {
                season: season.unwrap_or_else(Season::current),
                team_ids: teams,
                teams_file: teams_file.unwrap_or_else(|| PathBuf::from(&config.defaults.teams_file)),
                out_dir: out.unwrap_or_else(|| PathBuf::from(&config.defaults.output_dir)),
                append,
                concurrency: concurrency.unwrap_or(config.defaults.concurrency as usize),
            };
            cmd_scrape(&config, opts).await
        }
        Command::Url {
            url,
            season,
            id,
            name,
        } => {
            let season = season.unwrap_or_else(Season::current);
            cmd_url(&config()?, Team::new(id, name, url), &season).await
        }
        Command::Strategy {
            id,
            url,
            season,
            teams_file,
        } => {
            let config = config()?;
            let teams_file =
                teams_file.unwrap_or_else(|| PathBuf::from(&config.defaults.teams_file));
            let season = season.unwrap_or_else(Season::current);
            cmd_strategy(id, url, &season, &teams_file)
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(&config()?),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

/// Resolved `scrape` arguments (flags over config file over defaults).
struct ScrapeOptions {
    season: Season,
    team_ids: Vec<u32>,
    teams_file: PathBuf,
    out_dir: PathBuf,
    append: bool,
    concurrency: usize,
}

async fn cmd_scrape(config: &AppConfig, opts: ScrapeOptions) -> Result<()> {
    let teams = select_teams(load_teams(&opts.teams_file)?, &opts.team_ids);
    if teams.is_empty() {
        return Err(eyre!(
            "no teams selected from '{}'",
            opts.teams_file.display()
        ));
    }

    let path = output_path(&opts.out_dir, &opts.season, opts.append);
    info!(
        season = %opts.season,
        teams = teams.len(),
        out = %path.display(),
        append = opts.append,
        "scraping rosters"
    );

    let ctx = Arc::new(ScrapeContext::new(config)?);
    let mut sink = CsvSink::create(&path, opts.append)?;
    let reporter = CliProgress::new(teams.len() as u64)?;

    let summary = scrape_season(
        ctx,
        teams,
        &opts.season,
        opts.concurrency,
        &mut sink,
        &reporter,
    )
    .await?;

    print_summary(&summary, &path);
    Ok(())
}

async fn cmd_url(config: &AppConfig, team: Team, season: &Season) -> Result<()> {
    let ctx = ScrapeContext::new(config)?;
    let roster = scrape_team(&ctx, &team, season).await;

    match &roster.outcome {
        TeamOutcome::Parsed(_) => {
            let mut sink = CsvSink::from_writer(std::io::stdout().lock(), true)?;
            sink.write_players(&roster.players)?;
            sink.flush()?;
            Ok(())
        }
        TeamOutcome::Unparsed => Err(eyre!("no roster found for {}", team_url(&team))),
        TeamOutcome::Skipped(error) => Err(eyre!("{}: {error}", team_url(&team))),
        TeamOutcome::Excluded(reason) => Err(eyre!("team {} is not scraped: {reason}", team.ncaa_id)),
    }
}

fn cmd_strategy(id: u32, url: Option<String>, season: &Season, teams_file: &Path) -> Result<()> {
    let team = match url {
        Some(url) => Team::new(id, "", url),
        None => load_teams(teams_file)?
            .into_iter()
            .find(|t| t.ncaa_id == id)
            .ok_or_else(|| eyre!("team {id} not found in '{}'", teams_file.display()))?,
    };

    let registry = SiteRegistry::new();
    println!();
    println!("  Team:     {} {}", team.ncaa_id, team.team);
    println!("  URL:      {}", team_url(&team));
    println!("  Season:   {season}");
    println!("  Strategy: {}", registry.strategy_for(&team, season));

    for (i, attempt) in registry.plan(&team, season).iter().enumerate() {
        let parsers = attempt.parser_names();
        println!();
        println!("  Attempt {}", i + 1);
        println!("    {} {}", attempt.request.transport, attempt.request.url);
        if !parsers.is_empty() {
            println!("    parsers: {}", parsers.join(", "));
        }
    }
    println!();

    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    Ok(())
}

fn team_url(team: &Team) -> &str {
    team.url.as_deref().unwrap_or("(no url)")
}

fn print_summary(summary: &ScrapeSummary, path: &Path) {
    println!();
    println!("  Rosters scraped for {}", summary.season);
    println!("  Players:   {}", summary.players);
    println!("  Parsed:    {}", summary.parsed.len());
    println!("  Unparsed:  {}", summary.unparsed.len());
    println!("  Skipped:   {}", summary.skipped.len());
    println!("  Excluded:  {}", summary.excluded.len());
    println!("  Output:    {}", path.display());
    println!(
        "  Started:   {}",
        summary.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("  Time:      {:.1}s", summary.elapsed.as_secs_f64());
    if !summary.unparsed.is_empty() {
        println!("  Unparsed teams: {:?}", summary.unparsed);
    }
    if !summary.skipped.is_empty() {
        println!("  Skipped teams:  {:?}", summary.skipped);
    }
    println!();
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif bar.
struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    fn new(total: u64) -> Result<Self> {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} [{pos}/{len}] {msg}")?
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        bar.enable_steady_tick(Duration::from_millis(80));
        Ok(Self { bar })
    }
}

impl ScrapeReporter for CliProgress {
    fn team_started(&self, team: &Team) {
        self.bar.set_message(format!("{} ({})", team.team, team.ncaa_id));
    }

    fn team_finished(&self, team: &Team, outcome: &TeamOutcome) {
        match outcome {
            TeamOutcome::Parsed(_) | TeamOutcome::Excluded(_) => {}
            TeamOutcome::Unparsed => {
                self.bar
                    .println(format!("  no roster: {} ({})", team.team, team.ncaa_id));
            }
            TeamOutcome::Skipped(error) => {
                self.bar
                    .println(format!("  skipped: {} ({}): {error}", team.team, team.ncaa_id));
            }
        }
        self.bar.inc(1);
    }

    fn done(&self, _summary: &ScrapeSummary) {
        self.bar.finish_and_clear();
    }
}

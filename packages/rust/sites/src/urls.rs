//! Roster URL construction for the athletics-site URL patterns.

use rosters_shared::Season;
use url::Url;

/// How a team URL turns into a roster page URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlFormat {
    /// `{base}/roster/{season}`
    Default,
    /// `/index` replaced by `/roster/{season}`
    WvballIndex,
    /// `index` replaced by `{season}/roster?view=list`
    Wbkb,
    /// Season query parameter on basketball-style sites
    Baskbl,
    /// `{base}/roster/season/{season}`
    SeasonPath,
    /// `{base}/roster/season/{start year}`
    SeasonYearPath,
}

/// Build the roster page URL for `base` in `season`.
pub fn build_roster_url(base: &str, season: &Season, format: UrlFormat) -> String {
    let base = base.trim_end_matches('/');

    match format {
        UrlFormat::Default => format!("{base}/roster/{season}"),
        UrlFormat::WvballIndex => {
            if base.contains("/index") {
                base.replace("/index", &format!("/roster/{season}"))
            } else {
                format!("{base}/roster/{season}")
            }
        }
        UrlFormat::Wbkb => base.replace("index", &format!("{season}/roster?view=list")),
        UrlFormat::Baskbl => {
            if base.contains("index") {
                base.replace("index", &format!("roster/?season={season}"))
            } else if base.ends_with("w-baskbl") {
                format!("{base}/{season}/roster")
            } else {
                format!("{base}/roster/?season={season}")
            }
        }
        UrlFormat::SeasonPath => format!("{base}/roster/season/{season}"),
        UrlFormat::SeasonYearPath => {
            format!("{base}/roster/season/{}", season.start_year())
        }
    }
}

/// Second URL tried for basketball-style sites whose season page is missing.
///
/// Only `index` URLs have an alternative layout.
pub fn baskbl_retry_url(base: &str, season: &Season) -> Option<String> {
    let base = base.trim_end_matches('/');
    base.contains("index")
        .then(|| base.replace("index", &format!("/{season}/roster")))
}

/// Pick a format from the shape of the team URL.
pub fn detect_url_format(url: &str) -> UrlFormat {
    if url.contains("wvball") {
        UrlFormat::WvballIndex
    } else if url.contains("w-baskbl") {
        UrlFormat::Baskbl
    } else if url.contains("/index") {
        UrlFormat::Wbkb
    } else {
        UrlFormat::Default
    }
}

/// Resolve a player link found on a roster page against the team URL.
///
/// Absolute links are returned unchanged; unresolvable input yields `href`.
pub fn resolve_player_url(team_url: &str, href: &str) -> String {
    let href = href.trim();
    if href.is_empty() {
        return String::new();
    }
    Url::parse(team_url)
        .and_then(|base| base.join(href))
        .map(String::from)
        .unwrap_or_else(|_| href.to_string())
}

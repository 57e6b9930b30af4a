//! Loading and selecting teams from `teams.json`.

use std::path::Path;

use rosters_shared::{Result, RosterError, Team};
use tracing::debug;

/// Read the team list.
pub fn load_teams(path: &Path) -> Result<Vec<Team>> {
    let content = std::fs::read_to_string(path).map_err(|e| RosterError::io(path, e))?;
    let teams: Vec<Team> = serde_json::from_str(&content)
        .map_err(|e| RosterError::parse(format!("{}: {e}", path.display())))?;
    debug!(count = teams.len(), path = %path.display(), "loaded teams");
    Ok(teams)
}

/// Keep only the teams in `ids`, in file order. An empty list keeps everything.
pub fn select_teams(teams: Vec<Team>, ids: &[u32]) -> Vec<Team> {
    if ids.is_empty() {
        return teams;
    }
    teams
        .into_iter()
        .filter(|t| ids.contains(&t.ncaa_id))
        .collect()
}

//! In-page extraction scripts for JavaScript-only roster layouts.

use std::fmt;

use serde::Deserialize;

use rosters_extract::RawPlayer;
use rosters_shared::{Result, RosterError};

/// A roster layout read by running a script in a headless browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptLayout {
    /// `.s-person-card__content` cards.
    Card,
    /// `.s-table-body__row` table rows.
    Table,
    /// `.sidearm-roster-list-item` list.
    ListItem,
    /// `.sidearm-roster-player-container` blocks.
    RosterPlayer,
    /// `#DataTables_Table_0`.
    DataTables,
    AirForce,
    OregonState,
    Vanderbilt,
    Miami,
    Byu,
    SanJoseState,
}

impl ScriptLayout {
    /// The JavaScript program; it evaluates to an array of player objects.
    pub fn source(self) -> &'static str {
        match self {
            Self::Card => include_str!("scripts/card.js"),
            Self::Table => include_str!("scripts/table.js"),
            Self::ListItem => include_str!("scripts/list_item.js"),
            Self::RosterPlayer => include_str!("scripts/roster_player.js"),
            Self::DataTables => include_str!("scripts/data_tables.js"),
            Self::AirForce => include_str!("scripts/air_force.js"),
            Self::OregonState => include_str!("scripts/oregon_state.js"),
            Self::Vanderbilt => include_str!("scripts/vanderbilt.js"),
            Self::Miami => include_str!("scripts/miami.js"),
            Self::Byu => include_str!("scripts/byu.js"),
            Self::SanJoseState => include_str!("scripts/san_jose_state.js"),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Table => "table",
            Self::ListItem => "list-item",
            Self::RosterPlayer => "roster-player",
            Self::DataTables => "data-tables",
            Self::AirForce => "air-force",
            Self::OregonState => "oregon-state",
            Self::Vanderbilt => "vanderbilt",
            Self::Miami => "miami",
            Self::Byu => "byu",
            Self::SanJoseState => "san-jose-state",
        }
    }
}

impl fmt::Display for ScriptLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One object produced by an extraction script.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScriptRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub year: Option<String>,
    pub hometown: Option<String>,
    pub high_school: Option<String>,
    pub previous_school: Option<String>,
    pub height: Option<String>,
    pub position: Option<String>,
    pub jersey: Option<String>,
    pub url: Option<String>,
}

impl From<ScriptRecord> for RawPlayer {
    fn from(record: ScriptRecord) -> Self {
        RawPlayer {
            player_id: record.id,
            name: record.name,
            jersey: record.jersey,
            position: record.position,
            height: record.height,
            year: record.year,
            hometown: record.hometown,
            high_school: record.high_school,
            previous_school: record.previous_school,
            url: record.url,
        }
    }
}

/// Convert the JSON array returned by a script into raw players.
pub fn records_from_json(value: serde_json::Value) -> Result<Vec<RawPlayer>> {
    let records: Vec<ScriptRecord> = serde_json::from_value(value)
        .map_err(|e| RosterError::parse(format!("unexpected script output: {e}")))?;
    Ok(records.into_iter().map(RawPlayer::from).collect())
}

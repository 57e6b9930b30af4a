//! Core domain types: seasons, teams, and canonical player records.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RosterError};

/// Fixed CSV column order for roster output.
pub const CSV_COLUMNS: [&str; 13] = [
    "ncaa_id",
    "team",
    "player_id",
    "name",
    "year",
    "hometown",
    "high_school",
    "previous_school",
    "height",
    "position",
    "jersey",
    "url",
    "season",
];

/// First month (August) of a new collegiate season.
const SEASON_START_MONTH: u32 = 8;

// ---------------------------------------------------------------------------
// Season
// ---------------------------------------------------------------------------

/// An academic season in `YYYY-YY` form (e.g. `2023-24`, `1999-00`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Season {
    start_year: i32,
}

impl Season {
    /// Season beginning in the given calendar year.
    pub fn starting(start_year: i32) -> Self {
        Self { start_year }
    }

    /// The season in progress (or about to start) on `date`.
    pub fn for_date(date: NaiveDate) -> Self {
        if date.month() >= SEASON_START_MONTH {
            Self::starting(date.year())
        } else {
            Self::starting(date.year() - 1)
        }
    }

    /// The season for today's local date.
    pub fn current() -> Self {
        Self::for_date(chrono::Local::now().date_naive())
    }

    /// Calendar year the season starts in.
    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    /// Four-digit form used by a handful of sites: `2023-2024`.
    pub fn long_form(&self) -> String {
        format!("{}-{}", self.start_year, self.start_year + 1)
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}",
            self.start_year,
            (self.start_year + 1).rem_euclid(100)
        )
    }
}

impl std::str::FromStr for Season {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self> {
        let bad = || RosterError::validation(format!("season {s:?} is not in YYYY-YY form"));

        let (start, end) = s.trim().split_once('-').ok_or_else(bad)?;
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if start.len() != 4 || end.len() != 2 || !digits(start) || !digits(end) {
            return Err(bad());
        }
        let start_year: i32 = start.parse().map_err(|_| bad())?;
        let end_suffix: i32 = end.parse().map_err(|_| bad())?;

        if (start_year + 1).rem_euclid(100) != end_suffix {
            return Err(RosterError::validation(format!(
                "season {s:?} does not span consecutive years"
            )));
        }

        Ok(Self::starting(start_year))
    }
}

impl TryFrom<String> for Season {
    type Error = RosterError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Season> for String {
    fn from(season: Season) -> Self {
        season.to_string()
    }
}

// ---------------------------------------------------------------------------
// Team
// ---------------------------------------------------------------------------

/// One entry of `teams.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Opaque source-site identifier.
    pub ncaa_id: u32,
    /// Display name.
    pub team: String,
    /// Athletics-site sport URL (e.g. `https://example.com/sports/womens-volleyball`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Present when the roster is maintained by hand; such teams are not scraped.
    /// A `null` value still counts as present.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub roster: Option<serde_json::Value>,
}

fn deserialize_present<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<serde_json::Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

impl Team {
    /// Build a team by hand (single-URL mode, tests).
    pub fn new(ncaa_id: u32, team: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            ncaa_id,
            team: team.into(),
            url: Some(url.into()),
            roster: None,
        }
    }

    /// The team URL without a trailing slash, if any.
    pub fn base_url(&self) -> Option<&str> {
        self.url.as_deref().map(|u| u.trim_end_matches('/'))
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// The canonical output record for one rostered player.
///
/// Every field except `team_id` is a display string; empty means unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub team_id: u32,
    pub team: String,
    pub season: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
    pub name: String,
    pub jersey: String,
    pub position: String,
    pub height: String,
    /// Academic class.
    pub year: String,
    pub hometown: String,
    pub high_school: String,
    pub previous_school: String,
    pub url: String,
}

impl Player {
    /// Values in [`CSV_COLUMNS`] order.
    pub fn csv_record(&self) -> [String; 13] {
        [
            self.team_id.to_string(),
            self.team.clone(),
            self.player_id.clone().unwrap_or_default(),
            self.name.clone(),
            self.year.clone(),
            self.hometown.clone(),
            self.high_school.clone(),
            self.previous_school.clone(),
            self.height.clone(),
            self.position.clone(),
            self.jersey.clone(),
            self.url.clone(),
            self.season.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_parse_and_display() {
        let season: Season = "2023-24".parse().expect("parse season");
        assert_eq!(season.start_year(), 2023);
        assert_eq!(season.to_string(), "2023-24");
        assert_eq!(season.long_form(), "2023-2024");
    }

    #[test]
    fn season_wraps_century() {
        let season: Season = "1999-00".parse().expect("parse season");
        assert_eq!(season.start_year(), 1999);
        assert_eq!(season.to_string(), "1999-00");
    }

    #[test]
    fn season_rejects_malformed() {
        assert!("2023".parse::<Season>().is_err());
        assert!("2023-25".parse::<Season>().is_err());
        assert!("23-24".parse::<Season>().is_err());
        assert!("2023-2024".parse::<Season>().is_err());
        assert!("+023-24".parse::<Season>().is_err());
        assert!("2023-+4".parse::<Season>().is_err());
        assert!("-999-98".parse::<Season>().is_err());
    }

    #[test]
    fn season_for_date_switches_in_august() {
        let july = NaiveDate::from_ymd_opt(2024, 7, 31).unwrap();
        let august = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
        assert_eq!(Season::for_date(july).to_string(), "2023-24");
        assert_eq!(Season::for_date(august).to_string(), "2024-25");
    }

    #[test]
    fn team_deserializes_optional_fields() {
        let json = r#"[
            {"ncaa_id": 255, "team": "Georgia Tech", "url": "https://ramblinwreck.com/sports/w-volley"},
            {"ncaa_id": 1, "team": "No Site", "conference": "Somewhere"},
            {"ncaa_id": 2, "team": "Manual", "url": "https://x.edu", "roster": "manual"}
        ]"#;
        let teams: Vec<Team> = serde_json::from_str(json).expect("deserialize teams");
        assert_eq!(teams.len(), 3);
        assert_eq!(teams[0].ncaa_id, 255);
        assert!(teams[1].url.is_none());
        assert!(teams[2].roster.is_some());
    }

    #[test]
    fn null_roster_still_marks_team_manual() {
        let json = r#"[
            {"ncaa_id": 3, "team": "Null Roster", "url": "https://x.edu", "roster": null},
            {"ncaa_id": 4, "team": "Scraped", "url": "https://y.edu"}
        ]"#;
        let teams: Vec<Team> = serde_json::from_str(json).expect("deserialize teams");
        assert_eq!(teams[0].roster, Some(serde_json::Value::Null));
        assert!(teams[1].roster.is_none());
    }

    #[test]
    fn base_url_strips_trailing_slash() {
        let team = Team::new(1, "A", "https://a.edu/sports/wvball/");
        assert_eq!(team.base_url(), Some("https://a.edu/sports/wvball"));
    }

    #[test]
    fn csv_record_follows_column_order() {
        let player = Player {
            team_id: 255,
            team: "Georgia Tech".into(),
            season: "2023-24".into(),
            player_id: None,
            name: "Jane Doe".into(),
            jersey: "7".into(),
            position: "OH".into(),
            height: "6'1\"".into(),
            year: "Junior".into(),
            hometown: "Dallas, TX".into(),
            high_school: "Jesuit".into(),
            previous_school: String::new(),
            url: "https://x.edu/roster/jane-doe/1".into(),
        };
        let record = player.csv_record();
        assert_eq!(record.len(), CSV_COLUMNS.len());
        assert_eq!(record[0], "255");
        assert_eq!(record[2], "");
        assert_eq!(record[3], "Jane Doe");
        assert_eq!(record[10], "7");
        assert_eq!(record[12], "2023-24");
    }
}

//! Raw per-player cells and their conversion into canonical [`Player`] records.

use rosters_shared::{Player, Season, Team};

use crate::clean::clean_text;
use crate::fields::{extract_height, extract_jersey_number, extract_position, normalize_academic_year};
use crate::hometown::parse_hometown_school;

/// Free-text cells for one player, exactly as a site parser found them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPlayer {
    pub player_id: Option<String>,
    pub name: Option<String>,
    pub jersey: Option<String>,
    pub position: Option<String>,
    pub height: Option<String>,
    pub year: Option<String>,
    pub hometown: Option<String>,
    pub high_school: Option<String>,
    pub previous_school: Option<String>,
    pub url: Option<String>,
}

impl RawPlayer {
    /// Build the canonical record for `team` and `season`.
    ///
    /// Extractors refine jersey, height, position and class; when an extractor
    /// finds nothing the cleaned cell is kept so non-volleyball values survive.
    pub fn normalize(&self, team: &Team, season: &Season) -> Player {
        let jersey = cleaned(&self.jersey);
        let height = cleaned(&self.height);
        let position = cleaned(&self.position);

        let mut hometown = cleaned(&self.hometown);
        let mut high_school = cleaned(&self.high_school);
        let mut previous_school = cleaned(&self.previous_school);

        if high_school.is_empty() && previous_school.is_empty() && hometown.contains('/') {
            let split = parse_hometown_school(&hometown);
            hometown = split.hometown;
            high_school = split.high_school;
            previous_school = split.previous_school;
        }

        Player {
            team_id: team.ncaa_id,
            team: clean_text(&team.team),
            season: season.to_string(),
            player_id: self
                .player_id
                .as_deref()
                .map(clean_text)
                .filter(|id| !id.is_empty()),
            name: cleaned(&self.name),
            jersey: or_cleaned(extract_jersey_number(&jersey), jersey),
            position: or_cleaned(extract_position(&position), position),
            height: or_cleaned(extract_height(&height), height),
            year: normalize_academic_year(&cleaned(&self.year)),
            hometown,
            high_school,
            previous_school,
            url: cleaned(&self.url),
        }
    }
}

fn cleaned(cell: &Option<String>) -> String {
    cell.as_deref().map(clean_text).unwrap_or_default()
}

fn or_cleaned(extracted: String, cleaned: String) -> String {
    if extracted.is_empty() { cleaned } else { extracted }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team() -> Team {
        Team::new(255, "Georgia Tech", "https://ramblinwreck.com/sports/w-volley")
    }

    fn season() -> Season {
        "2023-24".parse().unwrap()
    }

    #[test]
    fn normalizes_volleyball_cells() {
        let raw = RawPlayer {
            player_id: Some("  1234 ".into()),
            name: Some("  Jane \n Doe  Full Bio".into()),
            jersey: Some("#7".into()),
            position: Some("Outside Hitter".into()),
            height: Some("Ht.: 6-1".into()),
            year: Some("Jr.".into()),
            hometown: Some("Hometown: Dallas, TX".into()),
            high_school: Some("Jesuit".into()),
            previous_school: None,
            url: Some("https://ramblinwreck.com/sports/w-volley/roster/jane-doe/1234".into()),
        };
        let player = raw.normalize(&team(), &season());

        assert_eq!(player.team_id, 255);
        assert_eq!(player.season, "2023-24");
        assert_eq!(player.player_id.as_deref(), Some("1234"));
        assert_eq!(player.name, "Jane Doe");
        assert_eq!(player.jersey, "7");
        assert_eq!(player.position, "OH");
        assert_eq!(player.height, "6-1");
        assert_eq!(player.year, "Junior");
        assert_eq!(player.hometown, "Dallas, TX");
        assert_eq!(player.high_school, "Jesuit");
        assert_eq!(player.previous_school, "");
    }

    #[test]
    fn keeps_unrecognized_position() {
        let raw = RawPlayer {
            position: Some("G".into()),
            ..Default::default()
        };
        assert_eq!(raw.normalize(&team(), &season()).position, "G");
    }

    #[test]
    fn splits_combined_hometown() {
        let raw = RawPlayer {
            hometown: Some("Dallas, TX / Texas State University".into()),
            ..Default::default()
        };
        let player = raw.normalize(&team(), &season());
        assert_eq!(player.hometown, "Dallas, TX");
        assert_eq!(player.high_school, "");
        assert_eq!(player.previous_school, "Texas State University");
    }

    #[test]
    fn empty_raw_player_yields_empty_fields() {
        let player = RawPlayer::default().normalize(&team(), &season());
        assert_eq!(player.player_id, None);
        assert_eq!(player.name, "");
        assert_eq!(player.jersey, "");
        assert_eq!(player.year, "");
        assert_eq!(player.team, "Georgia Tech");
    }
}

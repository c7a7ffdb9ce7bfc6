//! Team catalog, league selection and division naming.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An MLB club the dashboard knows by a symbolic key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Team {
    pub key: &'static str,
    pub id: u32,
    pub label: &'static str,
}

/// All 30 clubs, alphabetical by label.
pub const TEAMS: [Team; 30] = [
    Team { key: "diamondbacks", id: 109, label: "Arizona Diamondbacks" },
    Team { key: "braves", id: 144, label: "Atlanta Braves" },
    Team { key: "orioles", id: 110, label: "Baltimore Orioles" },
    Team { key: "redsox", id: 111, label: "Boston Red Sox" },
    Team { key: "cubs", id: 112, label: "Chicago Cubs" },
    Team { key: "whitesox", id: 145, label: "Chicago White Sox" },
    Team { key: "reds", id: 113, label: "Cincinnati Reds" },
    Team { key: "guardians", id: 114, label: "Cleveland Guardians" },
    Team { key: "rockies", id: 115, label: "Colorado Rockies" },
    Team { key: "tigers", id: 116, label: "Detroit Tigers" },
    Team { key: "astros", id: 117, label: "Houston Astros" },
    Team { key: "royals", id: 118, label: "Kansas City Royals" },
    Team { key: "angels", id: 108, label: "Los Angeles Angels" },
    Team { key: "dodgers", id: 119, label: "Los Angeles Dodgers" },
    Team { key: "marlins", id: 146, label: "Miami Marlins" },
    Team { key: "brewers", id: 158, label: "Milwaukee Brewers" },
    Team { key: "twins", id: 142, label: "Minnesota Twins" },
    Team { key: "mets", id: 121, label: "New York Mets" },
    Team { key: "yankees", id: 147, label: "New York Yankees" },
    Team { key: "athletics", id: 133, label: "Oakland Athletics" },
    Team { key: "phillies", id: 143, label: "Philadelphia Phillies" },
    Team { key: "pirates", id: 134, label: "Pittsburgh Pirates" },
    Team { key: "padres", id: 135, label: "San Diego Padres" },
    Team { key: "giants", id: 137, label: "San Francisco Giants" },
    Team { key: "mariners", id: 136, label: "Seattle Mariners" },
    Team { key: "cardinals", id: 138, label: "St. Louis Cardinals" },
    Team { key: "rays", id: 139, label: "Tampa Bay Rays" },
    Team { key: "rangers", id: 140, label: "Texas Rangers" },
    Team { key: "jays", id: 141, label: "Toronto Blue Jays" },
    Team { key: "nationals", id: 120, label: "Washington Nationals" },
];

impl Team {
    pub fn by_id(id: u32) -> Option<Team> {
        TEAMS.iter().copied().find(|t| t.id == id)
    }

    pub fn by_key(key: &str) -> Option<Team> {
        TEAMS
            .iter()
            .copied()
            .find(|t| t.key.eq_ignore_ascii_case(key))
    }
}

impl FromStr for Team {
    type Err = String;

    /// Accepts either the symbolic key (`yankees`) or the numeric id (`147`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let found = match s.parse::<u32>() {
            Ok(id) => Team::by_id(id),
            Err(_) => Team::by_key(s),
        };
        found.ok_or_else(|| format!("unknown team '{}'", s))
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

/// Resolve a division id to its display name.
pub fn division_name(division_id: u32) -> String {
    match division_id {
        200 => "American League West".to_string(),
        201 => "American League East".to_string(),
        202 => "American League Central".to_string(),
        203 => "National League West".to_string(),
        204 => "National League East".to_string(),
        205 => "National League Central".to_string(),
        other => format!("Division {}", other),
    }
}

/// Which league's standings to request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum League {
    #[default]
    Mlb,
    American,
    National,
}

impl League {
    /// Value of the API's `leagueId` parameter.
    pub fn api_ids(&self) -> &'static str {
        match self {
            League::Mlb => "103,104",
            League::American => "103",
            League::National => "104",
        }
    }

    /// Short key used in cache names and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            League::Mlb => "mlb",
            League::American => "al",
            League::National => "nl",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            League::Mlb => "MLB Team Standings",
            League::American => "American League Standings",
            League::National => "National League Standings",
        }
    }
}

impl FromStr for League {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mlb" | "all" => Ok(League::Mlb),
            "al" | "american" => Ok(League::American),
            "nl" | "national" => Ok(League::National),
            other => Err(format!("unknown league '{}' (expected mlb, al or nl)", other)),
        }
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

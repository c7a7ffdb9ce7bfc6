//! Plain-text rendering of standings tables and chart series.

use diamond_core::models::{Chart, League, StandingsSnapshot, Statistic, TeamYearRecord, TEAMS};
use diamond_core::utils::{bar, format_value, truncate_string};

/// Width of the team name column
const TEAM_COLUMN_WIDTH: usize = 26;

/// Width of the bar drawn next to single-series values
const BAR_WIDTH: usize = 40;

pub fn standings(league: League, season: Option<i32>, snapshot: &StandingsSnapshot) {
    match season {
        Some(year) => println!("{} ({})", league.title(), year),
        None => println!("{}", league.title()),
    }

    if snapshot.is_empty() {
        println!("\nNo standings available.");
        return;
    }

    for division in &snapshot.records {
        println!();
        println!(
            "{:<width$} {:>4} {:>4} {:>6} {:>6} {:>5}",
            truncate_string(&division.name(), TEAM_COLUMN_WIDTH),
            "W",
            "L",
            "Pct",
            "GB",
            "Rank",
            width = TEAM_COLUMN_WIDTH
        );
        println!("{}", "-".repeat(TEAM_COLUMN_WIDTH + 30));
        for team in &division.team_records {
            println!(
                "{:<width$} {:>4} {:>4} {:>6} {:>6} {:>5}",
                truncate_string(&team.team.name, TEAM_COLUMN_WIDTH),
                count(team.wins),
                count(team.losses),
                team.winning_percentage.as_deref().unwrap_or("-"),
                team.games_back_display(),
                team.division_rank.as_deref().unwrap_or("-"),
                width = TEAM_COLUMN_WIDTH
            );
        }
    }
}

/// A win or loss count, `-` when the API left it out.
fn count(value: Option<u32>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Current-season card for a team.
fn team_card(current: &TeamYearRecord) {
    let record = &current.record;
    let rows = [
        ("Division", current.division_name.clone()),
        ("Division Rank", record.division_rank.clone().unwrap_or_else(|| "-".to_string())),
        ("Wins", count(record.wins)),
        ("Losses", count(record.losses)),
        ("Win Percentage", record.winning_percentage.clone().unwrap_or_else(|| "-".to_string())),
        ("Games Back", record.games_back_display().to_string()),
        ("League", current.league_name().unwrap_or("-").to_string()),
        ("Games Played", count(record.games_played())),
        ("Remaining Games", count(record.remaining_games())),
    ];
    for (label, value) in rows {
        println!("  {:<16} {}", format!("{}:", label), value);
    }
}

pub fn chart(current: &TeamYearRecord, chart: &Chart) {
    println!("{}", chart.team.label);
    team_card(current);
    println!();
    println!("{}", chart.statistic.label());

    if chart.series.iter().all(|s| s.is_empty()) {
        println!("No data for the selected seasons.");
        return;
    }

    let percentage = chart.statistic.is_percentage();
    match chart.series.as_slice() {
        [single] => {
            let (lo, hi) = single.bounds().unwrap_or((0.0, 0.0));
            for point in &single.points {
                println!(
                    "{:>6}  {:>7}  {}",
                    point.name,
                    format_value(point.value, percentage),
                    bar(point.value, lo, hi, BAR_WIDTH)
                );
            }
        }
        many => {
            let mut header = format!("{:>6}", "Year");
            for series in many {
                header.push_str(&format!("  {:>22}", series.label));
            }
            println!("{}", header);

            let mut years: Vec<i32> = many
                .iter()
                .flat_map(|s| s.points.iter().map(|p| p.name))
                .collect();
            years.sort_unstable();
            years.dedup();

            for year in years {
                let mut line = format!("{:>6}", year);
                for series in many {
                    let value = series
                        .points
                        .iter()
                        .find(|p| p.name == year)
                        .map(|p| format_value(p.value, percentage))
                        .unwrap_or_else(|| "-".to_string());
                    line.push_str(&format!("  {:>22}", value));
                }
                println!("{}", line);
            }
        }
    }
}

pub fn teams() {
    for team in TEAMS.iter() {
        println!("{:<14} {:>4}  {}", team.key, team.id, team.label);
    }
}

pub fn statistics() {
    for stat in Statistic::ALL {
        println!("{:<30} {}", stat.key(), stat.label());
    }
}

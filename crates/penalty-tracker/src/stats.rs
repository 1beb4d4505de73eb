//! Per-athlete kick statistics.
//!
//! [`compute_stats`] is a single pass over the roster: for each athlete it
//! filters the history by exact name and derives counts, conversion rate and
//! preferred zone. The rest of the module orders and exports the result.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::model::{Athlete, Foot, Outcome, SessionRecord, Zone};
use crate::table::Table;

/// Shown in place of a preferred zone when an athlete has no kicks.
pub const NO_ZONE: &str = "-";

/// Columns of the exported statistics report.
pub const REPORT_COLUMNS: [&str; 7] = [
    "Name",
    "DominantFoot",
    "Total",
    "Goals",
    "Misses",
    "ConversionRate",
    "PreferredZone",
];

/// Aggregated statistics for one athlete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AthleteStats {
    /// Athlete name.
    pub name: String,
    /// Athlete dominant foot.
    pub dominant_foot: Foot,
    /// Number of kicks taken.
    pub total: usize,
    /// Number of kicks scored.
    pub goals: usize,
    /// Number of kicks missed.
    pub misses: usize,
    /// Percentage of kicks scored, one decimal place.
    pub conversion_rate: f64,
    /// Most frequently targeted zone, if any kick was taken.
    #[serde(serialize_with = "serialize_zone_or_dash")]
    pub preferred_zone: Option<Zone>,
}

impl AthleteStats {
    /// Preferred zone label, or `-` for an athlete with no kicks.
    #[must_use]
    pub fn preferred_zone_label(&self) -> &'static str {
        self.preferred_zone.map_or(NO_ZONE, Zone::label)
    }
}

fn serialize_zone_or_dash<S: Serializer>(
    zone: &Option<Zone>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(zone.map_or(NO_ZONE, Zone::label))
}

/// Compute statistics for every athlete, in roster order.
///
/// Athletes without kicks get an all-zero record with no preferred zone.
#[must_use]
pub fn compute_stats(athletes: &[Athlete], sessions: &[SessionRecord]) -> Vec<AthleteStats> {
    athletes
        .iter()
        .map(|athlete| {
            let kicks: Vec<&SessionRecord> = sessions
                .iter()
                .filter(|s| s.athlete == athlete.name)
                .collect();

            let total = kicks.len();
            let goals = kicks.iter().filter(|k| k.outcome == Outcome::Goal).count();
            let misses = kicks.iter().filter(|k| k.outcome == Outcome::Miss).count();

            AthleteStats {
                name: athlete.name.clone(),
                dominant_foot: athlete.dominant_foot,
                total,
                goals,
                misses,
                conversion_rate: conversion_rate(goals, total),
                preferred_zone: preferred_zone(kicks.iter().map(|k| k.zone)),
            }
        })
        .collect()
}

/// Percentage of goals over attempts, rounded to one decimal place.
///
/// Exact halves round to the even digit, so 1 of 16 gives 6.2.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn conversion_rate(goals: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = goals as f64 / total as f64 * 100.0;
    // float formatting rounds half to even
    format!("{pct:.1}").parse().unwrap_or(pct)
}

/// The most frequent zone.
///
/// Ties go to the zone that first appears earliest in `zones`.
pub fn preferred_zone(zones: impl IntoIterator<Item = Zone>) -> Option<Zone> {
    // (zone, count) in order of first appearance
    let mut counts: Vec<(Zone, usize)> = Vec::new();
    for zone in zones {
        match counts.iter_mut().find(|(z, _)| *z == zone) {
            Some((_, n)) => *n += 1,
            None => counts.push((zone, 1)),
        }
    }

    let mut best: Option<(Zone, usize)> = None;
    for (zone, n) in counts {
        if best.map_or(true, |(_, m)| n > m) {
            best = Some((zone, n));
        }
    }
    best.map(|(zone, _)| zone)
}

/// Column to order the statistics listing by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Highest conversion rate first.
    #[default]
    ConversionRate,
    /// Alphabetical.
    Name,
    /// Fewest misses first.
    Misses,
    /// Most goals first.
    Goals,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConversionRate => write!(f, "conversion-rate"),
            Self::Name => write!(f, "name"),
            Self::Misses => write!(f, "misses"),
            Self::Goals => write!(f, "goals"),
        }
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "conversion-rate" => Ok(Self::ConversionRate),
            "name" => Ok(Self::Name),
            "misses" => Ok(Self::Misses),
            "goals" => Ok(Self::Goals),
            _ => Err(Error::invalid_value("sort key", s)),
        }
    }
}

/// Stable-sort statistics by the given key.
pub fn sort_stats(stats: &mut [AthleteStats], key: SortKey) {
    match key {
        SortKey::ConversionRate => {
            stats.sort_by(|a, b| b.conversion_rate.total_cmp(&a.conversion_rate));
        }
        SortKey::Name => stats.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::Misses => stats.sort_by_key(|s| s.misses),
        SortKey::Goals => stats.sort_by(|a, b| b.goals.cmp(&a.goals)),
    }
}

/// Lay statistics out as the exported report table.
#[must_use]
pub fn report_table(stats: &[AthleteStats]) -> Table {
    let mut table = Table::new(REPORT_COLUMNS);
    for s in stats {
        table.push_record(&[
            (REPORT_COLUMNS[0], s.name.clone()),
            (REPORT_COLUMNS[1], s.dominant_foot.to_string()),
            (REPORT_COLUMNS[2], s.total.to_string()),
            (REPORT_COLUMNS[3], s.goals.to_string()),
            (REPORT_COLUMNS[4], s.misses.to_string()),
            (REPORT_COLUMNS[5], format!("{:.1}", s.conversion_rate)),
            (REPORT_COLUMNS[6], s.preferred_zone_label().to_string()),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn kick(day: u32, name: &str, zone: Zone, outcome: Outcome) -> SessionRecord {
        let date = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        SessionRecord::new(date, name, zone, outcome)
    }

    fn stats_for(name: &str, total: usize, goals: usize, misses: usize, rate: f64) -> AthleteStats {
        AthleteStats {
            name: name.to_string(),
            dominant_foot: Foot::Right,
            total,
            goals,
            misses,
            conversion_rate: rate,
            preferred_zone: None,
        }
    }

    #[test]
    fn test_athlete_without_kicks_is_all_zero() {
        let athletes = vec![Athlete::new("Ana", Foot::Left)];
        let sessions = vec![kick(1, "Bia", Zone::Center, Outcome::Goal)];

        let stats = compute_stats(&athletes, &sessions);
        assert_eq!(stats.len(), 1);
        let s = &stats[0];
        assert_eq!((s.total, s.goals, s.misses), (0, 0, 0));
        assert!(s.conversion_rate.abs() < f64::EPSILON);
        assert_eq!(s.preferred_zone, None);
        assert_eq!(s.preferred_zone_label(), "-");
    }

    #[test]
    fn test_two_goals_one_miss() {
        let athletes = vec![Athlete::new("Ana", Foot::Right)];
        let sessions = vec![
            kick(1, "Ana", Zone::Center, Outcome::Goal),
            kick(1, "Ana", Zone::TopLeft, Outcome::Goal),
            kick(2, "Ana", Zone::Center, Outcome::Miss),
        ];

        let s = &compute_stats(&athletes, &sessions)[0];
        assert_eq!((s.total, s.goals, s.misses), (3, 2, 1));
        assert!((s.conversion_rate - 66.7).abs() < 1e-9);
    }

    #[test]
    fn test_preferred_zone_is_mode() {
        let athletes = vec![Athlete::new("Ana", Foot::Right)];
        let sessions = vec![
            kick(1, "Ana", Zone::TopLeft, Outcome::Goal),
            kick(1, "Ana", Zone::Center, Outcome::Goal),
            kick(2, "Ana", Zone::Center, Outcome::Miss),
            kick(3, "Ana", Zone::Center, Outcome::Goal),
        ];

        let s = &compute_stats(&athletes, &sessions)[0];
        assert_eq!(s.preferred_zone, Some(Zone::Center));
        assert_eq!(s.preferred_zone_label(), "Centro");
    }

    #[test]
    fn test_beatriz_scenario() {
        let athletes = vec![Athlete::new("Beatriz", Foot::Right)];
        let sessions = vec![
            kick(1, "Beatriz", Zone::Center, Outcome::Goal),
            kick(2, "Beatriz", Zone::BottomLeft, Outcome::Miss),
        ];

        let stats = compute_stats(&athletes, &sessions);
        assert_eq!(
            stats,
            vec![AthleteStats {
                name: "Beatriz".to_string(),
                dominant_foot: Foot::Right,
                total: 2,
                goals: 1,
                misses: 1,
                conversion_rate: 50.0,
                preferred_zone: Some(Zone::Center),
            }]
        );
    }

    #[test]
    fn test_preferred_zone_tie_goes_to_first_seen() {
        let zones = [Zone::BottomLeft, Zone::Center, Zone::Center, Zone::BottomLeft];
        assert_eq!(preferred_zone(zones), Some(Zone::BottomLeft));

        let zones = [Zone::TopRight, Zone::Center, Zone::Center];
        assert_eq!(preferred_zone(zones), Some(Zone::Center));
        assert_eq!(preferred_zone([]), None);
    }

    #[test]
    fn test_name_match_is_exact() {
        let athletes = vec![Athlete::new("Ana", Foot::Right)];
        let sessions = vec![
            kick(1, "ana", Zone::Center, Outcome::Goal),
            kick(1, "Ana ", Zone::Center, Outcome::Goal),
            kick(1, "Ana", Zone::Center, Outcome::Miss),
        ];
        let s = &compute_stats(&athletes, &sessions)[0];
        assert_eq!(s.total, 1);
    }

    #[test]
    fn test_roster_order_preserved() {
        let athletes = vec![
            Athlete::new("Zoe", Foot::Both),
            Athlete::new("Ana", Foot::Left),
        ];
        let names: Vec<_> = compute_stats(&athletes, &[])
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, ["Zoe", "Ana"]);
    }

    #[test]
    fn test_conversion_rate_rounding() {
        assert!((conversion_rate(1, 3) - 33.3).abs() < 1e-9);
        assert!((conversion_rate(1, 8) - 12.5).abs() < 1e-9);
        assert!((conversion_rate(5, 5) - 100.0).abs() < 1e-9);
        assert!(conversion_rate(0, 0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_conversion_rate_halves_round_to_even() {
        assert!((conversion_rate(1, 16) - 6.2).abs() < 1e-9);
        assert!((conversion_rate(5, 16) - 31.2).abs() < 1e-9);
        assert!((conversion_rate(3, 16) - 18.8).abs() < 1e-9);
    }

    #[test]
    fn test_sort_by_conversion_rate_desc_is_stable() {
        let mut stats = vec![
            stats_for("A", 2, 1, 1, 50.0),
            stats_for("B", 1, 1, 0, 100.0),
            stats_for("C", 4, 2, 2, 50.0),
        ];
        sort_stats(&mut stats, SortKey::ConversionRate);
        let names: Vec<_> = stats.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["B", "A", "C"]);
    }

    #[test]
    fn test_sort_by_other_keys() {
        let mut stats = vec![
            stats_for("Carla", 5, 3, 2, 60.0),
            stats_for("Ana", 4, 1, 3, 25.0),
            stats_for("Bia", 6, 6, 0, 100.0),
        ];

        sort_stats(&mut stats, SortKey::Name);
        assert_eq!(stats[0].name, "Ana");

        sort_stats(&mut stats, SortKey::Misses);
        assert_eq!(stats[0].name, "Bia");

        sort_stats(&mut stats, SortKey::Goals);
        let names: Vec<_> = stats.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Bia", "Carla", "Ana"]);
    }

    #[test]
    fn test_sort_key_parse_and_display() {
        for key in [
            SortKey::ConversionRate,
            SortKey::Name,
            SortKey::Misses,
            SortKey::Goals,
        ] {
            assert_eq!(key.to_string().parse::<SortKey>().unwrap(), key);
        }
        assert!("zone".parse::<SortKey>().is_err());
        assert_eq!(SortKey::default(), SortKey::ConversionRate);
    }

    #[test]
    fn test_report_table_csv() {
        let athletes = vec![
            Athlete::new("Beatriz", Foot::Right),
            Athlete::new("Carla", Foot::Left),
        ];
        let sessions = vec![
            kick(1, "Beatriz", Zone::Center, Outcome::Goal),
            kick(2, "Beatriz", Zone::BottomLeft, Outcome::Miss),
        ];

        let csv = report_table(&compute_stats(&athletes, &sessions)).to_csv();
        assert_eq!(
            csv,
            "Name,DominantFoot,Total,Goals,Misses,ConversionRate,PreferredZone\n\
             Beatriz,Right,2,1,1,50.0,Centro\n\
             Carla,Left,0,0,0,0.0,-\n"
        );
    }

    #[test]
    fn test_stats_json_uses_dash_for_missing_zone() {
        let stats = stats_for("Ana", 0, 0, 0, 0.0);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["preferred_zone"], "-");
        assert_eq!(json["dominant_foot"], "Right");
    }
}

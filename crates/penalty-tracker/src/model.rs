//! Core domain types for penalty-tracker.
//!
//! These are the typed views of the two stored tables: the roster
//! ([`Athlete`]) and the kick history ([`SessionRecord`]).

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::table::Row;

/// Canonical columns of the roster table.
pub const ATHLETE_COLUMNS: [&str; 2] = [NAME_COLUMN, FOOT_COLUMN];

/// Canonical columns of the kick history table.
pub const SESSION_COLUMNS: [&str; 4] = [DATE_COLUMN, NAME_COLUMN, ZONE_COLUMN, OUTCOME_COLUMN];

/// Athlete name, shared by both tables.
pub const NAME_COLUMN: &str = "Name";
/// Dominant foot of an athlete.
pub const FOOT_COLUMN: &str = "DominantFoot";
/// Date of a kick.
pub const DATE_COLUMN: &str = "Date";
/// Goal zone a kick targeted.
pub const ZONE_COLUMN: &str = "Zone";
/// Result of a kick.
pub const OUTCOME_COLUMN: &str = "Outcome";

/// Storage format of dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// An athlete's dominant foot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Foot {
    /// Right-footed.
    Right,
    /// Left-footed.
    Left,
    /// Two-footed.
    Both,
}

impl fmt::Display for Foot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Right => write!(f, "Right"),
            Self::Left => write!(f, "Left"),
            Self::Both => write!(f, "Both"),
        }
    }
}

impl FromStr for Foot {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "right" | "destra" | "destro" => Ok(Self::Right),
            "left" | "canhota" | "canhoto" => Ok(Self::Left),
            "both" | "ambidestra" | "ambidestro" => Ok(Self::Both),
            _ => Err(Error::invalid_value("dominant foot", s)),
        }
    }
}

/// One of the seven goal-mouth regions a kick can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// Upper left corner.
    #[serde(rename = "Alto Esquerdo")]
    TopLeft,
    /// Upper right corner.
    #[serde(rename = "Alto Direito")]
    TopRight,
    /// Mid-height, left side.
    #[serde(rename = "MA Esquerdo")]
    MidLeft,
    /// Mid-height, right side.
    #[serde(rename = "MA Direito")]
    MidRight,
    /// Low left corner.
    #[serde(rename = "Canto Esquerdo")]
    BottomLeft,
    /// Low right corner.
    #[serde(rename = "Canto Direito")]
    BottomRight,
    /// Straight down the middle.
    #[serde(rename = "Centro")]
    Center,
}

impl Zone {
    /// All zones in presentation order.
    pub const ALL: [Zone; 7] = [
        Zone::TopLeft,
        Zone::TopRight,
        Zone::MidLeft,
        Zone::MidRight,
        Zone::BottomLeft,
        Zone::BottomRight,
        Zone::Center,
    ];

    /// The label stored in the history table.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::TopLeft => "Alto Esquerdo",
            Self::TopRight => "Alto Direito",
            Self::MidLeft => "MA Esquerdo",
            Self::MidRight => "MA Direito",
            Self::BottomLeft => "Canto Esquerdo",
            Self::BottomRight => "Canto Direito",
            Self::Center => "Centro",
        }
    }

    /// The short name used on the command line.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::MidLeft => "mid-left",
            Self::MidRight => "mid-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
            Self::Center => "center",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Zone {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|z| z.label().eq_ignore_ascii_case(wanted) || z.slug().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::invalid_value("zone", s))
    }
}

/// Result of a kick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The kick was scored.
    Goal,
    /// The kick was saved or missed the target.
    Miss,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Goal => write!(f, "Goal"),
            Self::Miss => write!(f, "Miss"),
        }
    }
}

impl FromStr for Outcome {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "goal" | "golo" | "gol" => Ok(Self::Goal),
            "miss" | "erro" => Ok(Self::Miss),
            _ => Err(Error::invalid_value("outcome", s)),
        }
    }
}

/// A registered athlete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Athlete {
    /// Unique name within the roster.
    pub name: String,
    /// Dominant foot.
    pub dominant_foot: Foot,
}

impl Athlete {
    /// Create a new athlete.
    #[must_use]
    pub fn new(name: impl Into<String>, dominant_foot: Foot) -> Self {
        Self {
            name: name.into(),
            dominant_foot,
        }
    }

    /// Parse a roster row.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the foot is unrecognised.
    pub fn from_row(row: Row<'_>) -> Result<Self> {
        let name = row.get(NAME_COLUMN).unwrap_or_default();
        if name.trim().is_empty() {
            return Err(Error::invalid_value("name", name));
        }
        let foot = row.get(FOOT_COLUMN).unwrap_or_default().parse()?;
        Ok(Self::new(name, foot))
    }

    /// The `(column, value)` pairs for a roster row.
    #[must_use]
    pub fn to_fields(&self) -> [(&'static str, String); 2] {
        [
            (NAME_COLUMN, self.name.clone()),
            (FOOT_COLUMN, self.dominant_foot.to_string()),
        ]
    }
}

/// One logged penalty-kick attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Training date.
    pub date: NaiveDate,
    /// Name of the athlete who took the kick.
    pub athlete: String,
    /// Targeted zone.
    pub zone: Zone,
    /// Whether it went in.
    pub outcome: Outcome,
}

impl SessionRecord {
    /// Create a new session record.
    #[must_use]
    pub fn new(date: NaiveDate, athlete: impl Into<String>, zone: Zone, outcome: Outcome) -> Self {
        Self {
            date,
            athlete: athlete.into(),
            zone,
            outcome,
        }
    }

    /// Parse a history row.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the date, zone or outcome cells is invalid.
    pub fn from_row(row: Row<'_>) -> Result<Self> {
        Ok(Self {
            date: parse_date(row.get(DATE_COLUMN).unwrap_or_default())?,
            athlete: row.get(NAME_COLUMN).unwrap_or_default().to_string(),
            zone: row.get(ZONE_COLUMN).unwrap_or_default().parse()?,
            outcome: row.get(OUTCOME_COLUMN).unwrap_or_default().parse()?,
        })
    }

    /// The `(column, value)` pairs for a history row.
    #[must_use]
    pub fn to_fields(&self) -> [(&'static str, String); 4] {
        [
            (DATE_COLUMN, self.date.format(DATE_FORMAT).to_string()),
            (NAME_COLUMN, self.athlete.clone()),
            (ZONE_COLUMN, self.zone.label().to_string()),
            (OUTCOME_COLUMN, self.outcome.to_string()),
        ]
    }
}

/// Parse a stored date, accepting a trailing time part.
///
/// # Errors
///
/// Returns an error if the value doesn't start with a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date()))
        .map_err(|_| Error::invalid_value("date", s))
}

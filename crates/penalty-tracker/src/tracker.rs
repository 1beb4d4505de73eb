//! Command handlers over the roster and kick history.
//!
//! Every handler takes the current [`AppState`] by value, applies one change,
//! saves the affected table in full and returns the new state. Callers reload
//! with [`Tracker::load`] before each command; nothing is cached between
//! commands, so the last writer to a shared store wins.

use tracing::{info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{Athlete, Foot, SessionRecord, ATHLETE_COLUMNS, NAME_COLUMN, SESSION_COLUMNS};
use crate::stats::{compute_stats, AthleteStats};
use crate::storage::{open_store, TableStore};
use crate::table::Table;

/// Names of the two stored tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNames {
    /// Roster table.
    pub athletes: String,
    /// Kick history table.
    pub sessions: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            athletes: "Athletes".to_string(),
            sessions: "Sessions".to_string(),
        }
    }
}

impl TableNames {
    /// Table names from the storage configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            athletes: config.storage.athletes_table.clone(),
            sessions: config.storage.sessions_table.clone(),
        }
    }
}

/// The two tables as loaded from the store.
///
/// Rows are kept exactly as stored, including ones that don't parse, so
/// rewriting a table never drops data. Typed views skip unparseable rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    /// Roster table.
    pub athletes: Table,
    /// Kick history table.
    pub sessions: Table,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            athletes: Table::new(ATHLETE_COLUMNS),
            sessions: Table::new(SESSION_COLUMNS),
        }
    }
}

impl AppState {
    /// Athletes in roster order.
    #[must_use]
    pub fn roster(&self) -> Vec<Athlete> {
        self.athletes
            .rows()
            .enumerate()
            .filter_map(|(i, row)| match Athlete::from_row(row) {
                Ok(athlete) => Some(athlete),
                Err(e) => {
                    warn!("Skipping roster row {}: {}", i + 1, e);
                    None
                }
            })
            .collect()
    }

    /// Kick history in stored order.
    #[must_use]
    pub fn history(&self) -> Vec<SessionRecord> {
        self.sessions
            .rows()
            .enumerate()
            .filter_map(|(i, row)| match SessionRecord::from_row(row) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping history row {}: {}", i + 1, e);
                    None
                }
            })
            .collect()
    }

    /// Sorted, de-duplicated athlete names for selection lists.
    #[must_use]
    pub fn athlete_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .athletes
            .rows()
            .filter_map(|row| row.get(NAME_COLUMN))
            .filter(|name| !name.trim().is_empty())
            .map(String::from)
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Check if the roster has a row with exactly this name.
    #[must_use]
    pub fn has_athlete(&self, name: &str) -> bool {
        self.athletes.rows().any(|row| row.get(NAME_COLUMN) == Some(name))
    }

    /// Per-athlete statistics in roster order.
    #[must_use]
    pub fn stats(&self) -> Vec<AthleteStats> {
        compute_stats(&self.roster(), &self.history())
    }
}

/// Result of trying to add an athlete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The athlete was added and the roster saved.
    Added,
    /// An athlete with that name already exists; nothing changed.
    Duplicate,
    /// The name was blank; nothing changed.
    EmptyName,
}

/// Loads state from a table store and applies commands to it.
#[derive(Debug)]
pub struct Tracker {
    store: Box<dyn TableStore>,
    tables: TableNames,
}

impl Tracker {
    /// Create a tracker over an existing store.
    #[must_use]
    pub fn new(store: Box<dyn TableStore>, tables: TableNames) -> Self {
        Self { store, tables }
    }

    /// Open the store and table names selected by the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the store can't be opened.
    pub fn open(config: &Config) -> Result<Self> {
        Ok(Self::new(open_store(config)?, TableNames::from_config(config)))
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &dyn TableStore {
        self.store.as_ref()
    }

    /// Load both tables. Never fails; unreadable tables come back empty.
    #[must_use]
    pub fn load(&self) -> AppState {
        AppState {
            athletes: self.store.load(&self.tables.athletes, &ATHLETE_COLUMNS),
            sessions: self.store.load(&self.tables.sessions, &SESSION_COLUMNS),
        }
    }

    /// Append one kick to the history and save it.
    ///
    /// # Errors
    ///
    /// Returns an error if the roster is empty, the athlete isn't in it, or
    /// the history can't be saved.
    pub fn register_kick(&self, mut state: AppState, kick: SessionRecord) -> Result<AppState> {
        if state.athletes.is_empty() {
            return Err(Error::EmptyRoster);
        }
        if !state.has_athlete(&kick.athlete) {
            return Err(Error::unknown_athlete(&kick.athlete));
        }

        state.sessions.push_record(&kick.to_fields());
        self.store.save(&state.sessions, &self.tables.sessions)?;

        info!(
            "Registered {} for {} ({}, {})",
            kick.outcome,
            kick.athlete,
            kick.zone,
            kick.date
        );
        Ok(state)
    }

    /// Add an athlete unless the name is blank or already taken.
    ///
    /// The name is trimmed; the duplicate check is an exact, case-sensitive
    /// match.
    ///
    /// # Errors
    ///
    /// Returns an error if the roster can't be saved.
    pub fn add_athlete(
        &self,
        mut state: AppState,
        name: &str,
        foot: Foot,
    ) -> Result<(AppState, AddOutcome)> {
        let name = name.trim();
        if name.is_empty() {
            return Ok((state, AddOutcome::EmptyName));
        }
        if state.has_athlete(name) {
            warn!("Athlete {} already exists", name);
            return Ok((state, AddOutcome::Duplicate));
        }

        let athlete = Athlete::new(name, foot);
        state.athletes.push_record(&athlete.to_fields());
        self.store.save(&state.athletes, &self.tables.athletes)?;

        info!("Added athlete {} ({})", athlete.name, athlete.dominant_foot);
        Ok((state, AddOutcome::Added))
    }

    /// Remove every roster row with exactly this name.
    ///
    /// History rows are left untouched. Returns how many rows were removed;
    /// nothing is written when that is zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the roster can't be saved.
    pub fn remove_athlete(&self, mut state: AppState, name: &str) -> Result<(AppState, usize)> {
        let removed = state
            .athletes
            .retain(|row| row.get(NAME_COLUMN) != Some(name));
        if removed == 0 {
            return Ok((state, 0));
        }

        self.store.save(&state.athletes, &self.tables.athletes)?;
        info!("Removed athlete {}", name);
        Ok((state, removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::init_test_logging;
    use crate::model::{Outcome, Zone};
    use crate::storage::{CsvStore, SqliteStore};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn csv_tracker() -> (TempDir, Tracker) {
        init_test_logging();
        let temp = tempfile::tempdir().unwrap();
        let store = CsvStore::new(temp.path());
        (temp, Tracker::new(Box::new(store), TableNames::default()))
    }

    fn kick(name: &str, zone: Zone, outcome: Outcome) -> SessionRecord {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        SessionRecord::new(date, name, zone, outcome)
    }

    fn with_athletes(tracker: &Tracker, names: &[&str]) -> AppState {
        let mut state = tracker.load();
        for name in names {
            let (next, outcome) = tracker.add_athlete(state, name, Foot::Right).unwrap();
            assert_eq!(outcome, AddOutcome::Added);
            state = next;
        }
        state
    }

    #[test]
    fn test_load_empty_store() {
        let (_temp, tracker) = csv_tracker();
        let state = tracker.load();
        assert_eq!(state, AppState::default());
        assert!(state.roster().is_empty());
        assert!(state.stats().is_empty());
    }

    #[test]
    fn test_add_athlete_persists() {
        let (_temp, tracker) = csv_tracker();
        let state = with_athletes(&tracker, &["Ana"]);

        assert_eq!(tracker.load(), state);
        assert_eq!(state.roster(), vec![Athlete::new("Ana", Foot::Right)]);
    }

    #[test]
    fn test_add_duplicate_is_rejected() {
        let (_temp, tracker) = csv_tracker();
        let state = with_athletes(&tracker, &["Ana"]);

        let (state, outcome) = tracker.add_athlete(state, "Ana", Foot::Left).unwrap();
        assert_eq!(outcome, AddOutcome::Duplicate);
        assert_eq!(state.athletes.len(), 1);
        assert_eq!(tracker.load().athletes.len(), 1);
    }

    #[test]
    fn test_duplicate_check_is_case_sensitive() {
        let (_temp, tracker) = csv_tracker();
        let state = with_athletes(&tracker, &["Ana"]);

        let (state, outcome) = tracker.add_athlete(state, "ana", Foot::Left).unwrap();
        assert_eq!(outcome, AddOutcome::Added);
        assert_eq!(state.athletes.len(), 2);
    }

    #[test]
    fn test_add_blank_name() {
        let (_temp, tracker) = csv_tracker();
        let (state, outcome) = tracker
            .add_athlete(tracker.load(), "   ", Foot::Both)
            .unwrap();
        assert_eq!(outcome, AddOutcome::EmptyName);
        assert!(state.athletes.is_empty());
    }

    #[test]
    fn test_add_trims_name() {
        let (_temp, tracker) = csv_tracker();
        let (state, _) = tracker
            .add_athlete(tracker.load(), "  Bia ", Foot::Left)
            .unwrap();
        assert!(state.has_athlete("Bia"));
    }

    #[test]
    fn test_register_kick_appends_and_saves() {
        let (_temp, tracker) = csv_tracker();
        let state = with_athletes(&tracker, &["Ana"]);

        let state = tracker
            .register_kick(state, kick("Ana", Zone::Center, Outcome::Goal))
            .unwrap();
        let state = tracker
            .register_kick(state, kick("Ana", Zone::TopLeft, Outcome::Miss))
            .unwrap();

        assert_eq!(state.sessions.len(), 2);
        assert_eq!(tracker.load(), state);
        assert_eq!(
            state.history()[1],
            kick("Ana", Zone::TopLeft, Outcome::Miss)
        );
    }

    #[test]
    fn test_register_kick_requires_roster() {
        let (_temp, tracker) = csv_tracker();
        let err = tracker
            .register_kick(tracker.load(), kick("Ana", Zone::Center, Outcome::Goal))
            .unwrap_err();
        assert!(matches!(err, Error::EmptyRoster));
    }

    #[test]
    fn test_register_kick_requires_known_athlete() {
        let (_temp, tracker) = csv_tracker();
        let state = with_athletes(&tracker, &["Ana"]);
        let err = tracker
            .register_kick(state, kick("Bia", Zone::Center, Outcome::Goal))
            .unwrap_err();
        assert!(matches!(err, Error::UnknownAthlete { .. }));
        assert!(tracker.load().sessions.is_empty());
    }

    #[test]
    fn test_remove_athlete_keeps_history() {
        let (_temp, tracker) = csv_tracker();
        let state = with_athletes(&tracker, &["Ana", "Bia"]);
        let state = tracker
            .register_kick(state, kick("Ana", Zone::Center, Outcome::Goal))
            .unwrap();

        let (state, removed) = tracker.remove_athlete(state, "Ana").unwrap();
        assert_eq!(removed, 1);
        assert!(!state.has_athlete("Ana"));

        let reloaded = tracker.load();
        assert_eq!(reloaded.athlete_names(), ["Bia"]);
        assert_eq!(reloaded.history().len(), 1);
        assert_eq!(reloaded.history()[0].athlete, "Ana");
    }

    #[test]
    fn test_remove_unknown_athlete() {
        let (_temp, tracker) = csv_tracker();
        let state = with_athletes(&tracker, &["Ana"]);
        let (state, removed) = tracker.remove_athlete(state, "Zoe").unwrap();
        assert_eq!(removed, 0);
        assert_eq!(state.athletes.len(), 1);
    }

    #[test]
    fn test_athlete_names_sorted_unique() {
        let mut state = AppState::default();
        for name in ["Carla", "Ana", "Carla", ""] {
            state.athletes.push_record(&[(NAME_COLUMN, name.to_string())]);
        }
        assert_eq!(state.athlete_names(), ["Ana", "Carla"]);
    }

    #[test]
    fn test_unparseable_rows_survive_rewrite() {
        let (temp, tracker) = csv_tracker();
        std::fs::write(
            temp.path().join("Sessions.csv"),
            "Date,Name,Zone,Outcome\n2024-01-01,Ana,Trave,Goal\n",
        )
        .unwrap();
        let state = with_athletes(&tracker, &["Ana"]);
        assert!(state.history().is_empty());

        let state = tracker
            .register_kick(state, kick("Ana", Zone::Center, Outcome::Goal))
            .unwrap();

        let reloaded = tracker.load();
        assert_eq!(reloaded.sessions.len(), 2);
        assert_eq!(reloaded.sessions.row(0).unwrap().get("Zone"), Some("Trave"));
        assert_eq!(state.stats()[0].total, 1);
    }

    #[test]
    fn test_sqlite_backend() {
        init_test_logging();
        let store = SqliteStore::open_in_memory().unwrap();
        let tracker = Tracker::new(Box::new(store), TableNames::default());

        let state = with_athletes(&tracker, &["Beatriz"]);
        let state = tracker
            .register_kick(state, kick("Beatriz", Zone::Center, Outcome::Goal))
            .unwrap();

        assert_eq!(tracker.load(), state);
        assert_eq!(state.stats()[0].goals, 1);
    }

    #[test]
    fn test_custom_table_names() {
        let temp = tempfile::tempdir().unwrap();
        let tables = TableNames {
            athletes: "Atletas".to_string(),
            sessions: "Treinos".to_string(),
        };
        let tracker = Tracker::new(Box::new(CsvStore::new(temp.path())), tables);

        with_athletes(&tracker, &["Ana"]);
        assert!(temp.path().join("Atletas.csv").exists());
    }
}

//! `penalty` - CLI for penalty-tracker
//!
//! Every command loads both tables fresh, applies at most one change, and
//! prints the result.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::Local;
use clap::Parser;

use penalty_tracker::cli::{
    AthleteCommand, Cli, Command, ConfigCommand, ExportCommand, HistoryCommand, KickCommand,
    OutputFormat, StatsCommand,
};
use penalty_tracker::model::parse_date;
use penalty_tracker::stats::{report_table, sort_stats};
use penalty_tracker::{
    init_logging, AddOutcome, AppState, Config, Foot, Outcome, SessionRecord, SortKey, Tracker,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;

    match cli.command {
        Command::Config(cmd) => handle_config(&config, cmd),
        Command::Athlete(cmd) => handle_athlete(&open_tracker(&config)?, cmd),
        Command::Goal(cmd) => handle_kick(&open_tracker(&config)?, cmd, Outcome::Goal),
        Command::Miss(cmd) => handle_kick(&open_tracker(&config)?, cmd, Outcome::Miss),
        Command::Stats(cmd) => handle_stats(&config, &open_tracker(&config)?.load(), &cmd),
        Command::Export(cmd) => handle_export(&config, &open_tracker(&config)?.load(), cmd),
        Command::History(cmd) => handle_history(&open_tracker(&config)?.load(), &cmd),
    }
}

fn open_tracker(config: &Config) -> anyhow::Result<Tracker> {
    Tracker::open(config).with_context(|| {
        format!(
            "failed to open {} store at {}",
            config.storage.backend,
            config.storage_location().display()
        )
    })
}

fn handle_athlete(tracker: &Tracker, cmd: AthleteCommand) -> anyhow::Result<()> {
    let state = tracker.load();
    match cmd {
        AthleteCommand::Add { name, foot } => {
            let foot = Foot::from(foot);
            let (_, outcome) = tracker
                .add_athlete(state, &name, foot)
                .context("failed to save roster")?;
            match outcome {
                AddOutcome::Added => println!("Added {} ({foot}).", name.trim()),
                AddOutcome::Duplicate => println!("Athlete '{}' already exists.", name.trim()),
                AddOutcome::EmptyName => bail!("athlete name must not be empty"),
            }
        }
        AthleteCommand::Remove { name } => {
            let (_, removed) = tracker
                .remove_athlete(state, &name)
                .context("failed to save roster")?;
            if removed == 0 {
                println!("No athlete named '{name}'.");
            } else {
                println!("Removed {name}. Their kick history is kept.");
            }
        }
        AthleteCommand::List { names, json } => {
            if names {
                for name in state.athlete_names() {
                    println!("{name}");
                }
            } else if json {
                println!("{}", serde_json::to_string_pretty(&state.roster())?);
            } else {
                let rows: Vec<Vec<String>> = state
                    .roster()
                    .into_iter()
                    .map(|a| vec![a.name, a.dominant_foot.to_string()])
                    .collect();
                if rows.is_empty() {
                    println!("No athletes registered yet.");
                } else {
                    print_table(&["Name", "Foot"], &rows);
                }
            }
        }
    }
    Ok(())
}

fn handle_kick(tracker: &Tracker, cmd: KickCommand, outcome: Outcome) -> anyhow::Result<()> {
    let date = match cmd.date.as_deref() {
        Some(s) => parse_date(s)?,
        None => Local::now().date_naive(),
    };
    let kick = SessionRecord::new(date, cmd.athlete, cmd.zone.into(), outcome);

    let state = tracker
        .register_kick(tracker.load(), kick.clone())
        .map_err(|e| {
            if e.is_input_error() {
                anyhow::Error::new(e)
            } else {
                anyhow::Error::new(e).context("failed to save kick history")
            }
        })?;

    match outcome {
        Outcome::Goal => println!("GOAL registered for {} ({}).", kick.athlete, kick.zone),
        Outcome::Miss => println!("MISS registered for {} ({}).", kick.athlete, kick.zone),
    }
    let total = state.history().iter().filter(|k| k.athlete == kick.athlete).count();
    println!("{} kicks logged for {}.", total, kick.athlete);
    Ok(())
}

fn handle_stats(config: &Config, state: &AppState, cmd: &StatsCommand) -> anyhow::Result<()> {
    if state.athletes.is_empty() {
        println!("No athletes registered yet. Add one with `penalty athlete add`.");
        return Ok(());
    }

    let key = cmd.sort.map_or(config.report.sort_by, SortKey::from);
    let mut stats = state.stats();
    sort_stats(&mut stats, key);

    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Plain => {
            for s in &stats {
                println!(
                    "{} ({}): {} kicks, {} goals, {} misses, {:.1}%, prefers {}",
                    s.name,
                    s.dominant_foot,
                    s.total,
                    s.goals,
                    s.misses,
                    s.conversion_rate,
                    s.preferred_zone_label()
                );
            }
        }
        OutputFormat::Table => {
            let rows: Vec<Vec<String>> = stats
                .iter()
                .map(|s| {
                    vec![
                        s.name.clone(),
                        s.dominant_foot.to_string(),
                        s.total.to_string(),
                        s.goals.to_string(),
                        s.misses.to_string(),
                        format!("{:.1}", s.conversion_rate),
                        s.preferred_zone_label().to_string(),
                    ]
                })
                .collect();
            print_table(
                &["Name", "Foot", "Kicks", "Goals", "Misses", "Rate %", "Preferred zone"],
                &rows,
            );
        }
    }
    Ok(())
}

fn handle_export(config: &Config, state: &AppState, cmd: ExportCommand) -> anyhow::Result<()> {
    let stats = state.stats();
    let csv = report_table(&stats).to_csv();

    let path = cmd
        .output
        .unwrap_or_else(|| PathBuf::from(&config.report.export_file_name));
    if path.as_os_str() == "-" {
        print!("{csv}");
        return Ok(());
    }

    std::fs::write(&path, csv).with_context(|| format!("failed to write {}", path.display()))?;
    println!("Exported {} athletes to {}.", stats.len(), path.display());
    Ok(())
}

fn handle_history(state: &AppState, cmd: &HistoryCommand) -> anyhow::Result<()> {
    let mut kicks: Vec<SessionRecord> = state
        .history()
        .into_iter()
        .filter(|k| cmd.athlete.as_ref().map_or(true, |a| &k.athlete == a))
        .collect();
    if let Some(n) = cmd.last {
        let skip = kicks.len().saturating_sub(n);
        kicks = kicks.split_off(skip);
    }

    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&kicks)?),
        OutputFormat::Plain => {
            for k in &kicks {
                println!("{} {} {} {}", k.date, k.athlete, k.zone, k.outcome);
            }
        }
        OutputFormat::Table => {
            let rows: Vec<Vec<String>> = kicks
                .iter()
                .map(|k| {
                    vec![
                        k.date.to_string(),
                        k.athlete.clone(),
                        k.zone.to_string(),
                        k.outcome.to_string(),
                    ]
                })
                .collect();
            print_table(&["Date", "Name", "Zone", "Outcome"], &rows);
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Backend:            {}", config.storage.backend);
                println!("  Location:           {}", config.storage_location().display());
                println!("  Athletes table:     {}", config.storage.athletes_table);
                println!("  Sessions table:     {}", config.storage.sessions_table);
                println!();
                println!("[Report]");
                println!("  Sort by:            {}", config.report.sort_by);
                println!("  Export file:        {}", config.report.export_file_name);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => bail!("configuration error: {e}"),
            }
        }
    }
    Ok(())
}

/// Print rows under a header with left-aligned, padded columns.
fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{c:<w$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    println!("{}", line(headers.to_vec()));
    println!(
        "{}",
        widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  ")
    );
    for row in rows {
        println!("{}", line(row.iter().map(String::as_str).collect()));
    }
}

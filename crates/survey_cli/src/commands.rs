//! Command dispatch.
//!
//! # Invariants
//! - Every mutating command prints the recomputed table afterwards.
//! - Commands write only to the provided writer; errors go back to `main`.

use crate::args::{AddArgs, Cli, Command};
use crate::config::CliConfig;
use crate::errors::{CliError, CliResult};
use crate::render;
use log::info;
use std::io::Write;
use std::path::Path;
use survey_core::db::open_db;
use survey_core::{
    init_logging, KeyValueStore, ObservationDraft, ObservationId, OverlayMode, Removal,
    SqliteStore, StaticOverlay, SurveyService,
};

/// Resolves configuration, opens storage and runs one command.
pub fn run(cli: Cli) -> CliResult<()> {
    let config = CliConfig::resolve(cli.data_dir, cli.log_level)?;
    std::fs::create_dir_all(&config.data_dir).map_err(|err| {
        CliError::Config(format!(
            "cannot create data directory `{}`: {err}",
            config.data_dir.display()
        ))
    })?;
    init_logging(&config.log_level, &config.log_dir())?;

    let conn = open_db(config.db_path())?;
    let service = SurveyService::with_backend(SqliteStore::new(&conn));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(cli.command, &service, &config.data_dir, &mut out)
}

pub fn execute<S: KeyValueStore>(
    command: Command,
    service: &SurveyService<S>,
    default_export_dir: &Path,
    out: &mut dyn Write,
) -> CliResult<()> {
    match command {
        Command::List { json } => {
            let snapshot = service.snapshot()?;
            if json {
                serde_json::to_writer_pretty(&mut *out, &snapshot.observations)?;
                writeln!(out)?;
            } else {
                render::table(out, &snapshot.views.table)?;
            }
        }
        Command::Add(args) => {
            let snapshot = service.submit(&draft_from(args))?;
            info!(
                "event=cli_add module=cli status=ok count={}",
                snapshot.observations.len()
            );
            writeln!(out, "Observation added")?;
            render::table(out, &snapshot.views.table)?;
        }
        Command::Remove { id, index } => {
            let removal = match (id, index) {
                (Some(id), _) => service.remove(parse_observation_id(&id)?)?,
                (None, Some(position)) => {
                    let index = position.checked_sub(1).ok_or_else(|| {
                        CliError::Config("--index is 1-based; 0 is not a row".to_string())
                    })?;
                    service.remove_at(index)?
                }
                (None, None) => {
                    return Err(CliError::Config(
                        "remove needs an id or --index".to_string(),
                    ))
                }
            };
            print_removal(out, &removal)?;
        }
        Command::Reset { yes } => {
            if !yes {
                writeln!(out, "Reset demo data to defaults? Re-run with --yes to confirm.")?;
                return Ok(());
            }
            let snapshot = service.reset()?;
            writeln!(out, "Demo data restored")?;
            render::table(out, &snapshot.views.table)?;
        }
        Command::Export { out: dir, stdout } => {
            if stdout {
                write!(out, "{}", service.export_csv()?)?;
            } else {
                let dir = dir.as_deref().unwrap_or(default_export_dir);
                let path = service.export_csv_to(dir)?;
                writeln!(out, "Exported {}", path.display())?;
            }
        }
        Command::Zones { mode, json } => {
            let mode: OverlayMode = mode.parse().map_err(CliError::Config)?;
            let mut overlay = StaticOverlay::default();
            overlay.set_mode(mode);
            if json {
                serde_json::to_writer_pretty(&mut *out, &overlay.styles())?;
                writeln!(out)?;
            } else {
                render::zones(out, &overlay)?;
            }
        }
        Command::Charts { json } => {
            let snapshot = service.snapshot()?;
            if json {
                serde_json::to_writer_pretty(&mut *out, &snapshot.views.charts)?;
                writeln!(out)?;
            } else {
                render::charts(out, &snapshot.views.charts)?;
            }
        }
        Command::Markers { json } => {
            let snapshot = service.snapshot()?;
            if json {
                serde_json::to_writer_pretty(&mut *out, &snapshot.views.markers)?;
                writeln!(out)?;
            } else {
                render::markers(out, &snapshot.views.markers)?;
            }
        }
    }
    Ok(())
}

fn draft_from(args: AddArgs) -> ObservationDraft {
    ObservationDraft {
        area: args.area,
        lat: args.lat,
        lon: args.lon,
        temp: args.temp,
        high_temp: args.high_temp,
        aqi: args.aqi,
        green: args.green,
        ndvi_now: args.ndvi_now,
        ndvi_past: args.ndvi_past,
        note: args.note,
    }
}

fn print_removal(out: &mut dyn Write, removal: &Removal) -> CliResult<()> {
    writeln!(out, "Removed {} ({})", removal.removed.area, removal.removed.id)?;
    render::table(out, &removal.snapshot.views.table)?;
    Ok(())
}

fn parse_observation_id(raw: &str) -> CliResult<ObservationId> {
    raw.trim()
        .parse::<ObservationId>()
        .map_err(|err| CliError::Config(format!("invalid observation id `{raw}`: {err}")))
}

// Parkgate — scripted demo driver
//
// Replays a configurable parking scenario against the access engine under a
// pinned clock and prints the resulting access records, ledger entries and
// facility overview as JSON.
//
// ```console
// $ cargo run --release -- --verbose
// $ cargo run --release -- --config scenario.json
// $ cargo run --release -- --print-config > scenario.json
// ```

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use clap::Parser;
use serde::Serialize;
use tracing::{error, info};

use parkgate::clock::FixedClock;
use parkgate::{
    Access, AccessEngine, AccessId, CliArgs, Dashboard, Event, EventCatalog, Facility,
    FacilityOverview, FacilityRegistry, LedgerEntry, LoggingConfig, NewEvent, NewFacility,
    ScenarioConfig, Store, UserDirectory,
};

fn main() {
    let args = CliArgs::parse();

    if args.print_config {
        match ScenarioConfig::default().print_json() {
            Ok(json) => {
                println!("{json}");
                return;
            }
            Err(e) => {
                eprintln!("failed to serialize default configuration: {e}");
                process::exit(1);
            }
        }
    }

    let logging_result = if args.debug {
        LoggingConfig::init_debug()
    } else if args.verbose {
        LoggingConfig::init_verbose()
    } else {
        LoggingConfig::new().with_level(tracing::Level::WARN).init()
    };
    if let Err(e) = logging_result {
        eprintln!("failed to initialize logging: {e}");
        process::exit(1);
    }

    let config = match ScenarioConfig::from_cli_args(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("failed to load configuration: {e}");
            process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        error!("configuration validation failed: {e}");
        process::exit(1);
    }

    if args.dry_run {
        eprintln!("configuration is valid; dry run requested, not executing");
        return;
    }

    match run_scenario(&config) {
        Ok(report) => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("failed to serialize report: {e}");
                process::exit(1);
            }
        },
        Err(e) => {
            error!("scenario failed: {e:#}");
            process::exit(1);
        }
    }
}

/// Everything the scenario produced, in one printable payload
#[derive(Debug, Serialize)]
struct ScenarioReport {
    facility: Facility,
    event: Option<Event>,
    accesses: Vec<Access>,
    ledger: Vec<LedgerEntry>,
    overview: FacilityOverview,
}

/// One clock-ordered step of the scripted run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Entry(usize),
    Exit(usize),
}

fn run_scenario(config: &ScenarioConfig) -> Result<ScenarioReport> {
    let start = Utc::now();
    let store = Arc::new(Store::new());
    let clock = Arc::new(FixedClock::new(start));

    let directory = UserDirectory::new(Arc::clone(&store));
    let registry = FacilityRegistry::new(Arc::clone(&store));
    let catalog = EventCatalog::new(Arc::clone(&store));
    let engine = AccessEngine::new(Arc::clone(&store), clock.clone());
    let dashboard = Dashboard::new(Arc::clone(&store), clock.clone());

    let admin = directory
        .bootstrap_admin("Operator", "operator")
        .context("bootstrapping the admin account")?;

    let facility = registry
        .create(
            NewFacility {
                name: config.facility.name.clone(),
                address: config.facility.address.clone(),
                capacity: config.facility.capacity,
                rates: config.facility.rates(),
            },
            &admin,
        )
        .context("creating the facility")?;

    let event = match &config.event {
        Some(plan) => {
            let starts_at = start + Duration::minutes(plan.starts_after_minutes);
            let created = catalog
                .create(
                    NewEvent {
                        name: plan.name.clone(),
                        facility: facility.id,
                        starts_at,
                        ends_at: starts_at + Duration::minutes(plan.duration_minutes),
                        flat_fee: plan.flat_fee,
                    },
                    &admin,
                )
                .context("creating the event")?;
            Some(created)
        }
        None => None,
    };

    // Replay entries and exits in clock order so the pinned clock only ever
    // moves forward.
    let mut timeline: Vec<(i64, Step)> = Vec::new();
    for (idx, visit) in config.visits.iter().enumerate() {
        timeline.push((visit.enters_after_minutes, Step::Entry(idx)));
        timeline.push((visit.enters_after_minutes + visit.minutes_parked, Step::Exit(idx)));
    }
    timeline.sort_by_key(|(minutes, step)| (*minutes, matches!(step, Step::Exit(_))));

    let mut access_ids: Vec<Option<AccessId>> = vec![None; config.visits.len()];
    for (minutes, step) in timeline {
        clock.set(start + Duration::minutes(minutes));
        match step {
            Step::Entry(idx) => {
                let access = engine
                    .register_entry(&config.visits[idx].plate, facility.id, &admin)
                    .with_context(|| format!("entry for plate {}", config.visits[idx].plate))?;
                info!(plate = %access.plate, access_type = %access.access_type, "vehicle entered");
                access_ids[idx] = Some(access.id);
            }
            Step::Exit(idx) => {
                let access_id = access_ids[idx]
                    .with_context(|| format!("visit {idx} exited before entering"))?;
                let closed = engine
                    .register_exit(access_id, &admin)
                    .with_context(|| format!("exit for plate {}", config.visits[idx].plate))?;
                info!(
                    plate = %closed.plate,
                    fee = %closed.total_fee.unwrap_or_default(),
                    access_type = %closed.access_type,
                    "vehicle exited"
                );
            }
        }
    }

    let overview =
        dashboard.overview(facility.id, &admin).context("computing the facility overview")?;

    Ok(ScenarioReport {
        facility,
        event,
        accesses: engine.list(&admin),
        ledger: engine.ledger_entries(&admin),
        overview,
    })
}

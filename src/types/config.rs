//! Runtime configuration for the scripted demo driver
//!
//! The binary replays a configurable scenario — one facility, an optional
//! event window, and a list of visits — against the engine under a pinned
//! clock, then prints the resulting records. Configuration comes from CLI
//! arguments (highest priority), a JSON file, or defaults.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::facility::RateSchedule;
use crate::{ParkingError, ParkingResult};

/// The facility the scenario runs against
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityPlan {
    /// Facility name
    pub name: String,
    /// Street address, if any
    #[serde(default)]
    pub address: Option<String>,
    /// Total number of spaces
    pub capacity: u32,
    /// First-hour rate
    pub first_hour: Decimal,
    /// Additional-hour rate
    pub additional_hour: Decimal,
    /// Daily rate
    pub daily: Decimal,
}

impl FacilityPlan {
    /// Rate schedule equivalent of the plan's three rate fields
    pub fn rates(&self) -> RateSchedule {
        RateSchedule {
            first_hour: self.first_hour,
            additional_hour: self.additional_hour,
            daily: self.daily,
        }
    }
}

/// An event window scheduled relative to the scenario start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventPlan {
    /// Event name
    pub name: String,
    /// Minutes after scenario start when the window opens
    pub starts_after_minutes: i64,
    /// Window length in minutes
    pub duration_minutes: i64,
    /// Flat entry fee for accesses entering during the window
    #[serde(default)]
    pub flat_fee: Option<Decimal>,
}

/// One vehicle's scripted visit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitPlan {
    /// Vehicle plate
    pub plate: String,
    /// Minutes after scenario start when the vehicle enters
    #[serde(default)]
    pub enters_after_minutes: i64,
    /// How long the vehicle stays parked
    pub minutes_parked: i64,
}

/// Complete scenario configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// The facility to create
    pub facility: FacilityPlan,
    /// Optional event window on that facility
    #[serde(default)]
    pub event: Option<EventPlan>,
    /// Visits to replay
    pub visits: Vec<VisitPlan>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            facility: FacilityPlan {
                name: "Central Garage".to_string(),
                address: Some("100 Main St".to_string()),
                capacity: 50,
                first_hour: Decimal::new(1000, 2),
                additional_hour: Decimal::new(500, 2),
                daily: Decimal::new(5000, 2),
            },
            event: Some(EventPlan {
                name: "Evening Concert".to_string(),
                starts_after_minutes: 600,
                duration_minutes: 180,
                flat_fee: Some(Decimal::new(2500, 2)),
            }),
            visits: vec![
                VisitPlan {
                    plate: "AAA1111".to_string(),
                    enters_after_minutes: 0,
                    minutes_parked: 45,
                },
                VisitPlan {
                    plate: "BBB2222".to_string(),
                    enters_after_minutes: 0,
                    minutes_parked: 150,
                },
                VisitPlan {
                    plate: "CCC3333".to_string(),
                    enters_after_minutes: 0,
                    minutes_parked: 26 * 60,
                },
                VisitPlan {
                    plate: "DDD4444".to_string(),
                    enters_after_minutes: 630,
                    minutes_parked: 120,
                },
            ],
        }
    }
}

impl ScenarioConfig {
    /// Load a configuration file (JSON)
    pub fn load_from_file(path: &Path) -> ParkingResult<Self> {
        let raw = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// Resolve configuration from CLI arguments, file and defaults
    ///
    /// Priority: CLI overrides > configuration file > built-in defaults.
    pub fn from_cli_args(args: &CliArgs) -> ParkingResult<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        if let Some(capacity) = args.capacity {
            config.facility.capacity = capacity;
        }
        Ok(config)
    }

    /// Validate the scenario before running it
    pub fn validate(&self) -> ParkingResult<()> {
        if self.facility.name.trim().is_empty() {
            return Err(ParkingError::validation("facility name must not be empty"));
        }
        self.facility.rates().validate()?;

        if let Some(event) = &self.event {
            if event.name.trim().is_empty() {
                return Err(ParkingError::validation("event name must not be empty"));
            }
            if event.duration_minutes <= 0 {
                return Err(ParkingError::validation("event duration must be positive"));
            }
        }

        if self.visits.is_empty() {
            return Err(ParkingError::validation("scenario needs at least one visit"));
        }
        for visit in &self.visits {
            if visit.plate.trim().is_empty() {
                return Err(ParkingError::validation("visit plate must not be empty"));
            }
            if visit.minutes_parked < 0 || visit.enters_after_minutes < 0 {
                return Err(ParkingError::validation("visit times must not be negative"));
            }
        }
        if self.visits.len() > self.facility.capacity as usize {
            return Err(ParkingError::validation(
                "scenario has more visits than the facility has spaces",
            ));
        }
        Ok(())
    }

    /// Serialize the configuration as pretty JSON
    pub fn print_json(&self) -> ParkingResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Command line arguments
#[derive(Debug, Clone, Parser)]
#[command(
    name = "parkgate",
    version,
    about = "Parking facility access and billing engine — scripted demo driver",
    long_about = "Replays a configurable parking scenario (entries, exits, an optional \
flat-rate event window) against the access engine under a pinned clock and prints the \
resulting access records, ledger entries and facility overview.

CONFIGURATION:
    1. Command line arguments (highest priority)
    2. Configuration file (--config, JSON)
    3. Built-in defaults

    Use --print-config to generate a template configuration file."
)]
pub struct CliArgs {
    /// Configuration file path (JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the facility capacity
    #[arg(long)]
    pub capacity: Option<u32>,

    /// Print the default configuration as JSON and exit
    #[arg(long)]
    pub print_config: bool,

    /// Validate the configuration without running the scenario
    #[arg(long)]
    pub dry_run: bool,

    /// Enable informational logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

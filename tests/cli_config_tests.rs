//! Tests for CLI parsing and scenario configuration resolution

use std::io::Write;

use clap::Parser;
use rust_decimal_macros::dec;

use parkgate::{CliArgs, ScenarioConfig};

#[test]
fn test_defaults_when_no_arguments_given() {
    let args = CliArgs::try_parse_from(["parkgate"]).unwrap();
    assert!(args.config.is_none());
    assert!(args.capacity.is_none());
    assert!(!args.print_config);
    assert!(!args.dry_run);
    assert!(!args.verbose);
    assert!(!args.debug);
}

#[test]
fn test_flags_parse() {
    let args = CliArgs::try_parse_from([
        "parkgate",
        "--config",
        "scenario.json",
        "--capacity",
        "7",
        "--dry-run",
        "--verbose",
    ])
    .unwrap();
    assert_eq!(args.config.as_deref().unwrap().to_str(), Some("scenario.json"));
    assert_eq!(args.capacity, Some(7));
    assert!(args.dry_run);
    assert!(args.verbose);
}

#[test]
fn test_unknown_flag_is_rejected() {
    assert!(CliArgs::try_parse_from(["parkgate", "--frobnicate"]).is_err());
}

#[test]
fn test_file_then_cli_override_order() {
    let mut config = ScenarioConfig::default();
    config.facility.capacity = 33;
    config.facility.first_hour = dec!(2.50);
    let json = config.print_json().unwrap();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    // File wins over defaults
    let args = CliArgs::try_parse_from([
        "parkgate",
        "--config",
        file.path().to_str().unwrap(),
    ])
    .unwrap();
    let resolved = ScenarioConfig::from_cli_args(&args).unwrap();
    assert_eq!(resolved.facility.capacity, 33);
    assert_eq!(resolved.facility.first_hour, dec!(2.50));

    // CLI wins over file
    let args = CliArgs::try_parse_from([
        "parkgate",
        "--config",
        file.path().to_str().unwrap(),
        "--capacity",
        "99",
    ])
    .unwrap();
    let resolved = ScenarioConfig::from_cli_args(&args).unwrap();
    assert_eq!(resolved.facility.capacity, 99);
    assert_eq!(resolved.facility.first_hour, dec!(2.50));
}

#[test]
fn test_template_output_loads_back() {
    let json = ScenarioConfig::default().print_json().unwrap();
    let parsed: ScenarioConfig = serde_json::from_str(&json).unwrap();
    assert!(parsed.validate().is_ok());
}

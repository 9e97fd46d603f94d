//! Integration tests for CLI
//!
//! These tests verify CLI functionality without running actual commands,
//! but instead test the command parsing and structure.

#![allow(clippy::panic)] // Allow panic! in tests for clear failure messages

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

// Mock CLI structure for testing (mirrors main.rs, without the env fallback)
#[derive(Parser)]
#[command(name = "hafas-sensor")]
#[command(author, version, about = "HaFAS departure sensors for Home Assistant", long_about = None)]
struct Cli {
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    Run,
    Update {
        name: String,
    },
    Trip {
        name: String,
    },
    Setup {
        #[arg(long)]
        reconfigure: Option<String>,
    },
    Check,
}

fn parse_args(args: &[&str]) -> Result<Cli, clap::Error> {
    let os_args: Vec<OsString> = args.iter().map(OsString::from).collect();
    Cli::try_parse_from(os_args)
}

#[test]
fn cli_parses_run_command() {
    let cli = parse_args(&["hafas-sensor", "run"]).unwrap();
    assert!(matches!(cli.command, Commands::Run));
    assert!(cli.config.is_none());
}

#[test]
fn cli_parses_update_with_name() {
    let cli = parse_args(&["hafas-sensor", "update", "To Work"]).unwrap();
    if let Commands::Update { name } = cli.command {
        assert_eq!(name, "To Work");
    } else {
        panic!("Expected Update command");
    }
}

#[test]
fn cli_parses_trip_with_name() {
    let cli = parse_args(&["hafas-sensor", "trip", "Home"]).unwrap();
    if let Commands::Trip { name } = cli.command {
        assert_eq!(name, "Home");
    } else {
        panic!("Expected Trip command");
    }
}

#[test]
fn cli_parses_setup_for_new_sensor() {
    let cli = parse_args(&["hafas-sensor", "setup"]).unwrap();
    if let Commands::Setup { reconfigure } = cli.command {
        assert!(reconfigure.is_none());
    } else {
        panic!("Expected Setup command");
    }
}

#[test]
fn cli_parses_setup_reconfigure() {
    let cli = parse_args(&["hafas-sensor", "setup", "--reconfigure", "To Work"]).unwrap();
    if let Commands::Setup { reconfigure } = cli.command {
        assert_eq!(reconfigure.as_deref(), Some("To Work"));
    } else {
        panic!("Expected Setup command");
    }
}

#[test]
fn cli_parses_check_command() {
    let cli = parse_args(&["hafas-sensor", "check"]).unwrap();
    assert!(matches!(cli.command, Commands::Check));
}

#[test]
fn cli_parses_config_before_subcommand() {
    let cli = parse_args(&["hafas-sensor", "--config", "/etc/hafas/config.toml", "run"]).unwrap();
    assert_eq!(cli.config, Some(PathBuf::from("/etc/hafas/config.toml")));
}

#[test]
fn cli_parses_config_after_subcommand() {
    let cli = parse_args(&["hafas-sensor", "check", "-c", "local.toml"]).unwrap();
    assert_eq!(cli.config, Some(PathBuf::from("local.toml")));
}

#[test]
fn cli_parses_verbose_flag() {
    let cli = parse_args(&["hafas-sensor", "-v", "run"]).unwrap();
    assert_eq!(cli.verbose, 1);
}

#[test]
fn cli_parses_multiple_verbose_flags() {
    let cli = parse_args(&["hafas-sensor", "-vvv", "run"]).unwrap();
    assert_eq!(cli.verbose, 3);
}

#[test]
fn cli_requires_subcommand() {
    let result = parse_args(&["hafas-sensor"]);
    assert!(result.is_err());
}

#[test]
fn cli_update_requires_name() {
    let result = parse_args(&["hafas-sensor", "update"]);
    assert!(result.is_err());
}

#[test]
fn cli_trip_requires_name() {
    let result = parse_args(&["hafas-sensor", "trip"]);
    assert!(result.is_err());
}

#[test]
fn cli_reconfigure_requires_value() {
    let result = parse_args(&["hafas-sensor", "setup", "--reconfigure"]);
    assert!(result.is_err());
}

#[test]
fn cli_rejects_unknown_command() {
    let result = parse_args(&["hafas-sensor", "status"]);
    assert!(result.is_err());
}

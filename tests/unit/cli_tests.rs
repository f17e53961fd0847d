//! Unit tests for CLI argument parsing and validation

use clap::Parser;
use zfstools::cli::{Cli, Commands};
use zfstools::RetentionPolicy;

#[test]
fn test_cli_retention_command() {
    let cli = Cli::try_parse_from([
        "zfstools", "retention", "tank/data", "-i", "2", "-d", "7", "-w", "4", "-m", "12",
    ])
    .unwrap();

    match cli.command {
        Commands::Retention { dataset, policy, dry_run, progress } => {
            assert_eq!(dataset, "tank/data");
            assert_eq!(policy.to_policy(), RetentionPolicy::new(2, 7, 4, 12));
            assert!(!dry_run);
            assert!(!progress);
        }
        _ => panic!("Expected Retention command"),
    }
    assert_eq!(cli.zfs_command, "zfs");
    assert!(cli.log_file.is_none());
    assert!(!cli.verbose);
}

#[test]
fn test_cli_retention_long_flags_and_dry_run() {
    let cli = Cli::try_parse_from([
        "zfstools", "retention", "tank/data",
        "--intra-daily", "1", "--daily", "0", "--weekly", "0", "--monthly", "3",
        "--dry-run", "--progress",
    ])
    .unwrap();

    match cli.command {
        Commands::Retention { policy, dry_run, progress, .. } => {
            assert_eq!(policy.to_policy(), RetentionPolicy::new(1, 0, 0, 3));
            assert!(dry_run);
            assert!(progress);
        }
        _ => panic!("Expected Retention command"),
    }
}

#[test]
fn test_cli_short_dry_run() {
    let cli = Cli::try_parse_from([
        "zfstools", "retention", "tank", "-i", "0", "-d", "0", "-w", "0", "-m", "0", "-n",
    ])
    .unwrap();
    assert!(matches!(cli.command, Commands::Retention { dry_run: true, .. }));
}

#[test]
fn test_cli_tier_counts_are_required() {
    let result = Cli::try_parse_from(["zfstools", "retention", "tank/data", "-i", "1", "-d", "1", "-w", "1"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_rejects_negative_counts() {
    let result = Cli::try_parse_from([
        "zfstools", "retention", "tank", "-i", "-1", "-d", "0", "-w", "0", "-m", "0",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_cli_dataset_is_required() {
    let result = Cli::try_parse_from(["zfstools", "retention", "-i", "1", "-d", "1", "-w", "1", "-m", "1"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_plan_command() {
    let cli = Cli::try_parse_from([
        "zfstools", "plan", "tank/data", "-i", "1", "-d", "2", "-w", "3", "-m", "4", "--format", "json",
    ])
    .unwrap();

    match cli.command {
        Commands::Plan { dataset, policy, format } => {
            assert_eq!(dataset, "tank/data");
            assert_eq!(policy.to_policy(), RetentionPolicy::new(1, 2, 3, 4));
            assert_eq!(format, "json");
        }
        _ => panic!("Expected Plan command"),
    }
}

#[test]
fn test_cli_global_options() {
    let cli = Cli::try_parse_from([
        "zfstools", "plan", "tank", "-i", "0", "-d", "0", "-w", "0", "-m", "0",
        "--log-file", "/var/log/zfstools.log", "--zfs-command", "sudo zfs", "-v",
    ])
    .unwrap();

    assert_eq!(cli.log_file.unwrap().to_str().unwrap(), "/var/log/zfstools.log");
    assert_eq!(cli.zfs_command, "sudo zfs");
    assert!(cli.verbose);
}

#[test]
fn test_command_names() {
    let retention = Cli::try_parse_from(["zfstools", "retention", "tank", "-i", "1", "-d", "0", "-w", "0", "-m", "0"]).unwrap();
    assert_eq!(retention.command.name(), "retention");

    let plan = Cli::try_parse_from(["zfstools", "plan", "tank", "-i", "1", "-d", "0", "-w", "0", "-m", "0"]).unwrap();
    assert_eq!(plan.command.name(), "plan");
}

#[test]
fn test_cli_unknown_command() {
    assert!(Cli::try_parse_from(["zfstools", "documentation"]).is_err());
}

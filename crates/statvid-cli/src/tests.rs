use clap::Parser;

use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["statvid"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn run_defaults() {
    let cli = Cli::try_parse_from(["statvid", "run"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Run {
            limit: 100,
            model: ModelKind::Ridge,
            dry_run: false
        })
    ));
}

#[test]
fn run_with_limit_model_and_dry_run() {
    let cli = Cli::try_parse_from([
        "statvid",
        "run",
        "--limit",
        "25",
        "--model",
        "lightgbm",
        "--dry-run",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Run {
            limit: 25,
            model: ModelKind::Lightgbm,
            dry_run: true
        })
    ));
}

#[test]
fn run_rejects_unknown_model() {
    assert!(Cli::try_parse_from(["statvid", "run", "--model", "xgboost"]).is_err());
}

#[test]
fn bare_ingest_defaults_to_discover() {
    let cli = Cli::try_parse_from(["statvid", "ingest"]).unwrap();
    let Some(Commands::Ingest { command }) = cli.command else {
        panic!("expected ingest command");
    };
    assert!(command.is_none());
    assert!(matches!(
        command.unwrap_or_default(),
        IngestCommands::Discover {
            ref categories,
            target: None,
            dry_run: false
        } if categories.is_empty()
    ));
}

#[test]
fn ingest_discover_collects_repeated_categories() {
    let cli = Cli::try_parse_from([
        "statvid",
        "ingest",
        "discover",
        "--category",
        "20",
        "--category",
        "10",
        "--target",
        "5",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Ingest {
            command: Some(IngestCommands::Discover {
                ref categories,
                target: Some(5),
                dry_run: false
            })
        }) if categories == &vec![20, 10]
    ));
}

#[test]
fn ingest_videos_requires_an_id() {
    assert!(Cli::try_parse_from(["statvid", "ingest", "videos"]).is_err());

    let cli =
        Cli::try_parse_from(["statvid", "ingest", "videos", "--id", "a", "--id", "b"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Ingest {
            command: Some(IngestCommands::Videos { ref ids })
        }) if ids == &vec!["a".to_string(), "b".to_string()]
    ));
}

#[test]
fn ingest_channel_default_limit() {
    let cli = Cli::try_parse_from(["statvid", "ingest", "channel", "--id", "UC1"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Ingest {
            command: Some(IngestCommands::Channel { ref id, limit: 50 })
        }) if id == "UC1"
    ));
}

#[test]
fn features_and_train_parse() {
    assert!(matches!(
        Cli::try_parse_from(["statvid", "features"]).unwrap().command,
        Some(Commands::Features)
    ));
    assert!(matches!(
        Cli::try_parse_from(["statvid", "train", "--model", "lightgbm"])
            .unwrap()
            .command,
        Some(Commands::Train {
            model: ModelKind::Lightgbm
        })
    ));
}

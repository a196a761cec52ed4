use clap::Parser;
use typefinder::logging::LoggingConfig;
use typefinder::tooling::cli::{Cli, Commands};

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["typefinder", "list-occurrences", "Example:Banner"],
        vec![
            "typefinder",
            "list-occurrences",
            "Example:Banner",
            "--format",
            "json",
            "--user",
            "editor",
            "--base-uri",
            "https://example.com",
        ],
        vec!["typefinder", "resolve", "/demo/page-a@live;lang=en"],
        vec!["typefinder", "node-types", "--format", "json"],
        vec!["typefinder", "dimensions"],
        vec!["typefinder", "config"],
        vec!["typefinder", "serve", "--interface", "0.0.0.0", "--port", "9000"],
        vec!["typefinder", "--workspace", "/srv/site", "--log-level", "debug", "dimensions"],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_invalid_arguments() {
    assert!(Cli::try_parse_from(["typefinder", "list-occurrences"]).is_err());
    assert!(Cli::try_parse_from(["typefinder", "serve", "--port", "http"]).is_err());
    assert!(Cli::try_parse_from(["typefinder", "serve", "--interface", "localhost"]).is_err());
    assert!(Cli::try_parse_from(["typefinder", "scan"]).is_err());
}

#[test]
fn list_occurrences_defaults() {
    let cli = Cli::try_parse_from(["typefinder", "list-occurrences", "Example:Banner"]).unwrap();
    match cli.command {
        Commands::ListOccurrences {
            node_type,
            format,
            user,
            base_uri,
        } => {
            assert_eq!(node_type, "Example:Banner");
            assert_eq!(format, "text");
            assert_eq!(user, None);
            assert_eq!(base_uri, None);
        }
        other => panic!("unexpected command: {other:?}"),
    }
    assert_eq!(cli.workspace, std::path::PathBuf::from("."));
}

#[test]
fn log_flags_override_configured_logging() {
    let cli = Cli::try_parse_from([
        "typefinder",
        "--log-level",
        "debug",
        "--log-output",
        "file",
        "--log-file",
        "/tmp/typefinder.log",
        "dimensions",
    ])
    .unwrap();
    let logging = cli.logging_config(&LoggingConfig::default());
    assert_eq!(logging.level, "debug");
    assert_eq!(logging.output, "file");
    assert_eq!(logging.format, "text");
    assert_eq!(
        logging.file,
        Some(std::path::PathBuf::from("/tmp/typefinder.log"))
    );
}

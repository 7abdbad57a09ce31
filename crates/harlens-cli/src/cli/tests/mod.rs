//! CLI parse tests.

use super::{Cli, CliCommand};
use clap::Parser;

pub(super) fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_parse_analyze_defaults() {
    let cli = parse(&["harlens", "analyze", "a.har", "--url", "https://x/"]);
    assert!(cli.config.is_none());
    match cli.command {
        CliCommand::Analyze {
            paths,
            url,
            group,
            summary,
        } => {
            assert_eq!(paths, vec!["a.har"]);
            assert_eq!(url, "https://x/");
            assert_eq!(group, "default");
            assert!(!summary);
        }
        _ => panic!("expected Analyze"),
    }
}

#[test]
fn cli_parse_analyze_many_files_with_group_and_summary() {
    let cli = parse(&[
        "harlens",
        "analyze",
        "one.har",
        "two.har",
        "--url",
        "https://x/",
        "--group",
        "mobile",
        "--summary",
        "--config",
        "/tmp/harlens.toml",
    ]);
    assert_eq!(
        cli.config.as_deref(),
        Some(std::path::Path::new("/tmp/harlens.toml"))
    );
    match cli.command {
        CliCommand::Analyze {
            paths,
            group,
            summary,
            ..
        } => {
            assert_eq!(paths, vec!["one.har", "two.har"]);
            assert_eq!(group, "mobile");
            assert!(summary);
        }
        _ => panic!("expected Analyze"),
    }
}

#[test]
fn cli_analyze_requires_a_file_and_url() {
    assert!(Cli::try_parse_from(["harlens", "analyze", "--url", "https://x/"]).is_err());
    assert!(Cli::try_parse_from(["harlens", "analyze", "a.har"]).is_err());
}

#[test]
fn cli_parse_rules() {
    match parse(&["harlens", "rules"]).command {
        CliCommand::Rules => {}
        _ => panic!("expected Rules"),
    }
}

#[test]
fn cli_parse_diff() {
    match parse(&["harlens", "diff", "a.har", "b.har", "--url", "https://x/"]).command {
        CliCommand::Diff { before, after, url } => {
            assert_eq!(before, "a.har");
            assert_eq!(after, "b.har");
            assert_eq!(url, "https://x/");
        }
        _ => panic!("expected Diff"),
    }
}

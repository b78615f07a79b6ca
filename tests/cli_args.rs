//! CLI argument parsing tests.

use clap::Parser;
use lawg::cli::{Cli, Command, InsightAction, PageArgs};
use lawg::Pagination;

#[test]
fn test_cli_parses_project_subcommand() {
    let cli = Cli::parse_from(["lawg", "--project", "acme", "project"]);

    assert!(!cli.json);
    assert_eq!(cli.project.as_deref(), Some("acme"));
    assert!(matches!(cli.command, Command::Project));
}

#[test]
fn test_cli_parses_log_subcommand() {
    let cli = Cli::parse_from([
        "lawg",
        "-p",
        "acme",
        "log",
        "releases",
        "--title",
        "Deployed",
        "--emoji",
        "🚀",
        "--notify",
    ]);

    match cli.command {
        Command::Log {
            feed,
            title,
            description,
            emoji,
            notify,
        } => {
            assert_eq!(feed, "releases");
            assert_eq!(title, "Deployed");
            assert_eq!(description, None);
            assert_eq!(emoji.as_deref(), Some("🚀"));
            assert!(notify);
        }
        _ => panic!("Expected Log command"),
    }
}

#[test]
fn test_log_requires_title() {
    let result = Cli::try_parse_from(["lawg", "log", "releases"]);
    assert!(result.is_err());
}

#[test]
fn test_global_json_flag() {
    // --json before subcommand
    let cli = Cli::parse_from(["lawg", "--json", "feeds"]);
    assert!(cli.json);

    // --json after subcommand (global flag)
    let cli = Cli::parse_from(["lawg", "feeds", "--json"]);
    assert!(cli.json);
}

#[test]
fn test_list_pagination_args() {
    let cli = Cli::parse_from(["lawg", "logs", "releases", "--limit", "10", "--offset", "20"]);

    match cli.command {
        Command::Logs { feed, page } => {
            assert_eq!(feed, "releases");
            assert_eq!(
                page,
                PageArgs {
                    limit: Some(10),
                    offset: Some(20),
                }
            );
            assert_eq!(Pagination::from(page), Pagination::new(10, 20));
        }
        _ => panic!("Expected Logs command"),
    }
}

#[test]
fn test_pagination_defaults_when_omitted() {
    let cli = Cli::parse_from(["lawg", "insights"]);

    match cli.command {
        Command::Insights { page } => {
            let pagination = Pagination::from(page);
            assert_eq!(pagination.effective_limit(), 25);
            assert_eq!(pagination.effective_offset(), 0);
        }
        _ => panic!("Expected Insights command"),
    }
}

#[test]
fn test_insight_actions() {
    let cli = Cli::parse_from(["lawg", "insight", "set", "insight_1", "12.5"]);
    match cli.command {
        Command::Insight { action } => assert_eq!(
            action,
            InsightAction::Set {
                id: "insight_1".to_string(),
                value: 12.5,
            }
        ),
        _ => panic!("Expected Insight command"),
    }

    let cli = Cli::parse_from(["lawg", "insight", "increment", "insight_1", "-3"]);
    match cli.command {
        Command::Insight { action } => assert_eq!(
            action,
            InsightAction::Increment {
                id: "insight_1".to_string(),
                amount: -3.0,
            }
        ),
        _ => panic!("Expected Insight command"),
    }
}

//! Argument parsing tests

use clap::Parser;
use kbindex::cli::{Cli, Commands, OutputFormat};
use std::path::PathBuf;

#[test]
fn test_parse_expand_with_globals() {
    let cli = Cli::try_parse_from([
        "kbindex", "expand", "/repo", "--batch-size", "5", "--all", "--format", "json",
    ])
    .unwrap();

    assert_eq!(cli.format, OutputFormat::Json);
    match cli.command {
        Commands::Expand(args) => {
            assert_eq!(args.path, PathBuf::from("/repo"));
            assert_eq!(args.batch_size, Some(5));
            assert!(args.all);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_parse_defaults() {
    let cli = Cli::try_parse_from(["kbindex", "seed"]).unwrap();

    assert_eq!(cli.format, OutputFormat::Human);
    assert!(!cli.log_json);
    match cli.command {
        Commands::Seed(args) => {
            assert_eq!(args.path, PathBuf::from("."));
            assert_eq!(args.limit, None);
            assert!(!args.force);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_parse_hook_and_index_files() {
    let cli = Cli::try_parse_from(["kbindex", "hook", "--project", "/repo"]).unwrap();
    assert!(matches!(cli.command, Commands::Hook(ref a) if a.project == PathBuf::from("/repo")));

    let cli = Cli::try_parse_from(["kbindex", "index-files", "a.rs", "b.rs", "--log-json"]).unwrap();
    assert!(cli.log_json);
    match cli.command {
        Commands::IndexFiles(args) => {
            assert_eq!(args.files.len(), 2);
            assert_eq!(args.project, PathBuf::from("."));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_index_files_requires_paths() {
    assert!(Cli::try_parse_from(["kbindex", "index-files"]).is_err());
}

#[test]
fn test_cli_definition_is_valid() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}

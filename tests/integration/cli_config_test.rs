//! Command-line parsing, configuration layering and commands run end to end

use crate::fixtures::archive_builder::sample_repository;
use clap::Parser;
use codelens::cli::{Args, Command, ScanTarget};
use codelens::config::{load_config_with_env_prefix, CliArgs, CliConfig, ConfigSource};
use codelens::models::config::OutputFormat;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn arg(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

/// Config file pointing the scan store into `dir`
fn write_config(dir: &Path) -> PathBuf {
    let config_path = dir.join("codelens.toml");
    fs::write(
        &config_path,
        format!("data_dir = {:?}\nmax_files = 100\n", arg(&dir.join("scans"))),
    )
    .unwrap();
    config_path
}

fn run(argv: &[&str]) -> i32 {
    let args = Args::try_parse_from(argv).unwrap();
    Command::from_args(&args).run(&args)
}

#[test]
fn test_scan_requires_a_target() {
    assert!(Args::try_parse_from(["codelens", "scan"]).is_err());
    assert!(Args::try_parse_from(["codelens", "scan", "--repo", "https://github.com/a/b"]).is_err());
    assert!(Args::try_parse_from([
        "codelens",
        "scan",
        "https://github.com/a/b",
        "--archive",
        "x.zip"
    ])
    .is_err());
}

#[test]
fn test_global_flags_after_subcommand() {
    let args = Args::try_parse_from([
        "codelens",
        "scan",
        "https://github.com/a/b",
        "https://github.com/c/d",
        "--max-files",
        "12",
        "--no-persist",
        "-o",
        "csv",
    ])
    .unwrap();

    let cli = CliConfig::from_args(&args);
    assert_eq!(cli.priority(), 30);
    let partial = cli.load().unwrap();
    assert_eq!(partial.max_files, Some(12));
    assert_eq!(partial.persist, Some(false));
    assert_eq!(partial.output_format, Some(OutputFormat::Csv));
    assert_eq!(partial.quiet, None);

    match Command::from_args(&args) {
        Command::Scan {
            target: ScanTarget::Urls(urls),
            ..
        } => assert_eq!(urls.len(), 2),
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn test_cli_flags_override_config_file() {
    let dir = tempdir().unwrap();
    let config_path = write_config(dir.path());

    let args = Args::try_parse_from([
        "codelens",
        "--config",
        &arg(&config_path),
        "--max-files",
        "7",
        "list",
    ])
    .unwrap();
    let settings = load_config_with_env_prefix(CliArgs::from(&args), "CODELENS_IT1").unwrap();

    assert_eq!(settings.max_files, 7);
    assert_eq!(settings.data_dir, dir.path().join("scans"));
}

#[test]
fn test_invalid_config_file_is_critical() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("codelens.toml");
    fs::write(&config_path, "max_files = \"many\"\n").unwrap();

    assert_eq!(run(&["codelens", "--config", &arg(&config_path), "list"]), 2);
}

#[test]
fn test_archive_scan_show_and_list() {
    let dir = tempdir().unwrap();
    let config_path = write_config(dir.path());
    let archive_path = dir.path().join("demo.zip");
    fs::write(&archive_path, sample_repository()).unwrap();
    let summary_path = dir.path().join("summary.json");

    let code = run(&[
        "codelens",
        "--config",
        &arg(&config_path),
        "--quiet",
        "--no-progress",
        "--output",
        "json",
        "--output-file",
        &arg(&summary_path),
        "scan",
        "--archive",
        &arg(&archive_path),
        "--repo",
        "https://github.com/octo/demo",
    ]);
    assert_eq!(code, 0);

    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&summary_path).unwrap()).unwrap();
    assert_eq!(summary["owner"], "octo");
    assert_eq!(summary["repo"], "demo");
    assert_eq!(summary["total_loc"], 14);
    let scan_id = summary["scan_id"].as_str().unwrap().to_string();
    assert!(dir.path().join("scans").join(format!("{}.json", scan_id)).is_file());

    let graph_path = dir.path().join("graph.json");
    let code = run(&[
        "codelens",
        "--config",
        &arg(&config_path),
        "--output",
        "json",
        "--output-file",
        &arg(&graph_path),
        "show",
        &scan_id,
        "--part",
        "graph",
    ]);
    assert_eq!(code, 0);
    let graph: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&graph_path).unwrap()).unwrap();
    assert_eq!(graph["edges"].as_array().unwrap().len(), 5);
    assert_eq!(graph["nodes"].as_array().unwrap().len(), 9);

    let list_path = dir.path().join("list.json");
    let code = run(&[
        "codelens",
        "--config",
        &arg(&config_path),
        "--output",
        "json",
        "--output-file",
        &arg(&list_path),
        "list",
    ]);
    assert_eq!(code, 0);
    let list: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&list_path).unwrap()).unwrap();
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["scan_id"], scan_id.as_str());
}

#[test]
fn test_limit_failure_exits_with_error() {
    let dir = tempdir().unwrap();
    let config_path = write_config(dir.path());
    let archive_path = dir.path().join("demo.zip");
    fs::write(&archive_path, sample_repository()).unwrap();

    let code = run(&[
        "codelens",
        "--config",
        &arg(&config_path),
        "--quiet",
        "--max-files",
        "3",
        "scan",
        "--archive",
        &arg(&archive_path),
    ]);
    assert_eq!(code, 1);
    assert!(!dir.path().join("scans").exists());
}

#[test]
fn test_show_unknown_scan_is_a_warning() {
    let dir = tempdir().unwrap();
    let config_path = write_config(dir.path());

    assert_eq!(
        run(&["codelens", "--config", &arg(&config_path), "show", "does-not-exist"]),
        0
    );
}

#[test]
fn test_init_writes_loadable_config() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("nested").join("codelens.toml");

    assert_eq!(run(&["codelens", "--config", &arg(&config_path), "init"]), 0);
    assert!(config_path.is_file());

    let cli_args = CliArgs {
        config: Some(config_path),
        ..Default::default()
    };
    let settings = load_config_with_env_prefix(cli_args, "CODELENS_IT2").unwrap();
    assert_eq!(settings.max_bytes, 104_857_600);
    assert_eq!(settings.max_files, 5000);
}

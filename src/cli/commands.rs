//! Command implementations

use super::args::{Args, Commands, Part};
use crate::config::{self, parser, CliArgs, DEFAULT_CONFIG_FILE};
use crate::core::Scanner;
use crate::error::{handle_error, ErrorSeverity, Result, ScanError};
use crate::models::config::Settings;
use crate::models::repo::RepoCoordinates;
use crate::models::scan::{ScanRecord, ScanResult};
use crate::output::{
    create_formatter, create_progress_callback, create_writer, Formatter, OutputPart,
    ProgressReporter,
};
use crate::store::{JsonFileStore, ScanStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error_span, info};

/// What a `scan` invocation reads from
#[derive(Debug, Clone)]
pub enum ScanTarget {
    /// Repository URLs fetched from the code host
    Urls(Vec<String>),
    /// A zipball on disk, optionally attributed to a repository URL
    Archive { path: PathBuf, repo: Option<String> },
}

/// Available commands
#[derive(Debug)]
pub enum Command {
    /// Scan one or more repositories
    Scan { target: ScanTarget, part: OutputPart },
    /// Show a stored scan
    Show { scan_id: String, part: OutputPart },
    /// List stored scans
    List,
    /// Initialize a default configuration file
    Init { path: PathBuf, force: bool },
}

impl From<Part> for OutputPart {
    fn from(part: Part) -> Self {
        match part {
            Part::Summary => OutputPart::Summary,
            Part::Tree => OutputPart::Tree,
            Part::Graph => OutputPart::Graph,
            Part::All => OutputPart::All,
        }
    }
}

impl Command {
    /// Create a command from parsed arguments
    pub fn from_args(args: &Args) -> Self {
        match &args.command {
            Commands::Scan {
                urls,
                archive,
                repo,
                part,
            } => {
                let target = match archive {
                    Some(path) => ScanTarget::Archive {
                        path: path.clone(),
                        repo: repo.clone(),
                    },
                    None => ScanTarget::Urls(urls.clone()),
                };
                Command::Scan {
                    target,
                    part: (*part).into(),
                }
            }
            Commands::Show { id, part } => Command::Show {
                scan_id: id.clone(),
                part: (*part).into(),
            },
            Commands::List => Command::List,
            Commands::Init { force } => Command::Init {
                path: args
                    .config
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE)),
                force: *force,
            },
        }
    }

    /// Execute the command, returning how many scans failed.
    ///
    /// Only batch scans report failures through the count; every other
    /// failure is returned as an error.
    pub fn execute(&self, args: &Args) -> Result<usize> {
        if let Command::Init { path, force } = self {
            init_config(path, *force)?;
            return Ok(0);
        }

        // Loaded after `init` so a broken config file can still be replaced
        let settings = config::load_config(CliArgs::from(args))?;
        debug!(
            data_dir = %settings.data_dir.display(),
            max_bytes = settings.max_bytes,
            max_files = settings.max_files,
            persist = settings.persist,
            "configuration loaded"
        );

        match self {
            Command::Scan { target, part } => run_scan(&settings, target, *part),
            Command::Show { scan_id, part } => {
                show_scan(&settings, scan_id, *part)?;
                Ok(0)
            }
            Command::List => {
                list_scans(&settings)?;
                Ok(0)
            }
            Command::Init { .. } => Ok(0),
        }
    }

    /// Run the command and map the outcome to a process exit code
    pub fn run(&self, args: &Args) -> i32 {
        match self.execute(args) {
            Ok(0) => 0,
            Ok(failed) => {
                eprintln!("\n{} scan(s) failed", failed);
                1
            }
            Err(err) => {
                report_error(&err);
                exit_code(&err)
            }
        }
    }
}

/// Exit code for an error: warnings succeed, critical errors exit with 2
pub fn exit_code(err: &ScanError) -> i32 {
    match err.severity() {
        ErrorSeverity::Warning => 0,
        ErrorSeverity::Error => 1,
        ErrorSeverity::Critical => 2,
    }
}

/// Print an error, and its suggestion if any, to stderr
fn report_error(err: &ScanError) {
    eprintln!("{}: {}", err.severity(), err.user_message());
    if let Some(suggestion) = err.suggestion() {
        eprintln!("Suggestion: {}", suggestion);
    }
}

fn formatter_for(settings: &Settings) -> Box<dyn Formatter> {
    create_formatter(
        &settings.output_format,
        settings.use_colors,
        settings.verbose,
        settings.quiet,
    )
}

fn emit(settings: &Settings, output: &str) -> Result<()> {
    create_writer(settings.output_file.as_ref()).write(output)
}

fn run_scan(settings: &Settings, target: &ScanTarget, part: OutputPart) -> Result<usize> {
    let formatter = formatter_for(settings);
    let show_progress = settings.show_progress && !settings.quiet;
    let reporter = Arc::new(ProgressReporter::new(!show_progress, settings.verbose));

    match target {
        ScanTarget::Archive { path, repo } => {
            let coords = repo.as_deref().map(RepoCoordinates::parse).transpose()?;
            let scanner = Scanner::from_settings(settings.clone())?;

            let spinner = reporter.create_spinner(&format!("Scanning {}", path.display()));
            let result = scanner.scan_local(path, coords);
            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }

            emit(settings, &render(formatter.as_ref(), result?, part)?)?;
            Ok(0)
        }
        ScanTarget::Urls(urls) if urls.len() == 1 => {
            let scanner = Scanner::from_settings(settings.clone())?;

            let spinner = reporter.create_spinner(&format!("Scanning {}", urls[0]));
            let result = scanner.scan_url(&urls[0]);
            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }

            emit(settings, &render(formatter.as_ref(), result?, part)?)?;
            Ok(0)
        }
        ScanTarget::Urls(urls) => {
            let scanner = Scanner::from_settings(settings.clone())?
                .with_progress(create_progress_callback(reporter.clone()));

            reporter.start(urls.len(), "Scanning repositories");
            let results = scanner.scan_many(urls);
            reporter.finish(&format!("Scanned {} repositories", urls.len()));

            let mut sections = Vec::new();
            let mut failed = 0;
            for (url, result) in urls.iter().zip(results) {
                match result {
                    Ok(result) => sections.push(render(formatter.as_ref(), result, part)?),
                    Err(err) => {
                        let _span = error_span!("scan", url = %url).entered();
                        if let Some(critical) = handle_error(err) {
                            return Err(critical);
                        }
                        failed += 1;
                    }
                }
            }

            if !sections.is_empty() {
                emit(settings, &sections.join("\n"))?;
            }
            info!(total = urls.len(), failed, "batch scan finished");
            Ok(failed)
        }
    }
}

fn render(formatter: &dyn Formatter, result: ScanResult, part: OutputPart) -> Result<String> {
    formatter.format(&ScanRecord::from(result), part)
}

fn show_scan(settings: &Settings, scan_id: &str, part: OutputPart) -> Result<()> {
    let store = JsonFileStore::new(settings.data_dir.clone());
    let record = store.load(scan_id)?;
    let output = formatter_for(settings).format(&record, part)?;
    emit(settings, &output)
}

fn list_scans(settings: &Settings) -> Result<()> {
    let store = JsonFileStore::new(settings.data_dir.clone());
    let summaries = store.list_summaries()?;
    let output = formatter_for(settings).format_list(&summaries)?;
    emit(settings, &output)
}

fn init_config(path: &std::path::Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        println!("Configuration file already exists at: {}", path.display());
        println!("Run `codelens init --force` to overwrite it.");
        return Ok(());
    }

    parser::create_default_config(path)?;

    println!("Created default configuration file at: {}", path.display());
    println!("\nEdit it to change scan limits, the scan store directory, or output defaults.");
    Ok(())
}

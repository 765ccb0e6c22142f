//! Output formatting and writing functionality

mod formatters;
mod progress;
mod writers;

pub use self::formatters::{format_size, format_timestamp};
pub use self::progress::{create_progress_callback, ProgressReporter};
pub use self::writers::{create_writer, FileWriter, OutputWriter, StdoutWriter};

use crate::error::{Result, ScanError};
use crate::models::config::OutputFormat;
use crate::models::dependency_graph::DependencyGraph;
use crate::models::scan::{ScanRecord, ScanSummary};
use std::fmt;
use std::str::FromStr;

/// Which part of a scan to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputPart {
    #[default]
    Summary,
    Tree,
    Graph,
    All,
}

impl FromStr for OutputPart {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "summary" => Ok(OutputPart::Summary),
            "tree" => Ok(OutputPart::Tree),
            "graph" => Ok(OutputPart::Graph),
            "all" => Ok(OutputPart::All),
            _ => Err(format!("Invalid part: {} (expected summary, tree, graph or all)", s)),
        }
    }
}

impl fmt::Display for OutputPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputPart::Summary => write!(f, "summary"),
            OutputPart::Tree => write!(f, "tree"),
            OutputPart::Graph => write!(f, "graph"),
            OutputPart::All => write!(f, "all"),
        }
    }
}

/// The graph of a record, or `GraphUnavailable` for legacy records
fn require_graph(record: &ScanRecord) -> Result<&DependencyGraph> {
    record.graph.as_ref().ok_or_else(|| ScanError::GraphUnavailable {
        scan_id: record.scan_id().to_string(),
    })
}

/// Trait for different output formatters
pub trait Formatter {
    /// Render one part of a scan record
    fn format(&self, record: &ScanRecord, part: OutputPart) -> Result<String>;

    /// Render a listing of stored scans
    fn format_list(&self, summaries: &[ScanSummary]) -> Result<String>;
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    pub use_colors: bool,
    pub verbose: bool,
    pub quiet: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(use_colors: bool, verbose: bool, quiet: bool) -> Self {
        Self {
            use_colors,
            verbose,
            quiet,
        }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, record: &ScanRecord, part: OutputPart) -> Result<String> {
        // In quiet mode a summary collapses to a single line
        if self.quiet && part == OutputPart::Summary {
            return Ok(formatters::format_summary_line(&record.summary));
        }

        let mut sections = Vec::new();
        if matches!(part, OutputPart::Summary | OutputPart::All) {
            sections.push(formatters::format_summary_text(&record.summary, self.use_colors));
        }
        if matches!(part, OutputPart::Tree | OutputPart::All) {
            sections.push(formatters::format_tree_text(&record.tree, self.use_colors));
        }
        match part {
            OutputPart::Graph => {
                sections.push(formatters::format_graph_text(
                    require_graph(record)?,
                    self.use_colors,
                    true,
                ));
            }
            OutputPart::All => {
                // Legacy records still render their summary and tree
                if let Some(graph) = &record.graph {
                    sections.push(formatters::format_graph_text(graph, self.use_colors, self.verbose));
                }
            }
            _ => {}
        }

        Ok(sections.join("\n"))
    }

    fn format_list(&self, summaries: &[ScanSummary]) -> Result<String> {
        if self.quiet {
            return Ok(summaries
                .iter()
                .map(|s| format!("{}\n", s.scan_id))
                .collect());
        }
        Ok(formatters::format_list_text(summaries, self.use_colors))
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, record: &ScanRecord, part: OutputPart) -> Result<String> {
        match part {
            OutputPart::Summary => formatters::format_json(&record.summary),
            OutputPart::Tree => formatters::format_json(&record.tree),
            OutputPart::Graph => formatters::format_json(require_graph(record)?),
            OutputPart::All => formatters::format_json(record),
        }
    }

    fn format_list(&self, summaries: &[ScanSummary]) -> Result<String> {
        formatters::format_json(&summaries)
    }
}

/// CSV formatter for spreadsheet analysis
pub struct CsvFormatter;

impl CsvFormatter {
    /// Create a new CSV formatter
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for CsvFormatter {
    fn format(&self, record: &ScanRecord, part: OutputPart) -> Result<String> {
        match part {
            OutputPart::Summary => formatters::format_summary_csv(std::slice::from_ref(&record.summary)),
            OutputPart::Tree | OutputPart::All => formatters::format_tree_csv(&record.tree),
            OutputPart::Graph => formatters::format_graph_csv(require_graph(record)?),
        }
    }

    fn format_list(&self, summaries: &[ScanSummary]) -> Result<String> {
        formatters::format_summary_csv(summaries)
    }
}

/// Graphviz formatter; renders the dependency graph whatever part is asked for
pub struct DotFormatter;

impl Formatter for DotFormatter {
    fn format(&self, record: &ScanRecord, _part: OutputPart) -> Result<String> {
        Ok(require_graph(record)?.to_dot())
    }

    fn format_list(&self, _summaries: &[ScanSummary]) -> Result<String> {
        Err(ScanError::invalid_input(
            "dot",
            "DOT output is only available for a single scan's graph",
        ))
    }
}

/// Create a formatter based on the output format
pub fn create_formatter(
    format: &OutputFormat,
    use_colors: bool,
    verbose: bool,
    quiet: bool,
) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(use_colors, verbose, quiet)),
        OutputFormat::Json => Box::new(JsonFormatter::new()),
        OutputFormat::Csv => Box::new(CsvFormatter::new()),
        OutputFormat::Dot => Box::new(DotFormatter),
    }
}

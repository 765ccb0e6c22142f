//! Output formatting functionality
//!
//! This module provides formatters for different output formats.

use crate::error::{Result, ScanError};
use crate::models::dependency_graph::DependencyGraph;
use crate::models::scan::ScanSummary;
use crate::models::tree::TreeNode;
use ansi_term::Colour::{Blue, Cyan, Green, Yellow};
use ansi_term::Style;
use chrono::{DateTime, Utc};

/// Format a scan summary as text
pub fn format_summary_text(summary: &ScanSummary, use_colors: bool) -> String {
    let mut output = String::new();

    if use_colors {
        output.push_str(&format!("{}\n\n", Blue.bold().paint("Scan Summary")));
    } else {
        output.push_str("Scan Summary\n\n");
    }

    let id = if use_colors {
        Cyan.paint(summary.scan_id.as_str()).to_string()
    } else {
        summary.scan_id.clone()
    };
    output.push_str(&format!("Scan ID: {}\n", id));
    output.push_str(&format!("Repository: {}/{}\n", summary.owner, summary.repo));
    output.push_str(&format!("URL: {}\n", summary.repo_url));
    output.push_str(&format!("Created: {}\n", format_timestamp(summary.created_at)));
    output.push_str(&format!("Files scanned: {}\n", summary.files_scanned));
    output.push_str(&format!("Text files: {}\n", summary.text_files));
    output.push_str(&format!("Parsed files: {}\n", summary.parsed_files));

    let loc = summary.total_loc.to_string();
    if use_colors {
        output.push_str(&format!("Lines of code: {}\n", Green.bold().paint(loc)));
    } else {
        output.push_str(&format!("Lines of code: {}\n", loc));
    }
    output.push_str(&format!("Dependency edges: {}\n", summary.edge_count));
    output.push_str(&format!(
        "Limits: {} / {} files\n",
        format_size(summary.limits.max_bytes),
        summary.limits.max_files
    ));

    output
}

/// One-line summary for quiet mode
pub fn format_summary_line(summary: &ScanSummary) -> String {
    format!(
        "{} {}/{} files={} loc={} edges={}\n",
        summary.scan_id,
        summary.owner,
        summary.repo,
        summary.files_scanned,
        summary.total_loc,
        summary.edge_count
    )
}

/// Format the line-count tree as an indented listing
pub fn format_tree_text(tree: &TreeNode, use_colors: bool) -> String {
    let mut output = String::new();
    if use_colors {
        output.push_str(&format!("{}\n\n", Blue.bold().paint("File Tree")));
    } else {
        output.push_str("File Tree\n\n");
    }
    push_tree_node(&mut output, tree, 0, use_colors);
    output
}

fn push_tree_node(output: &mut String, node: &TreeNode, depth: usize, use_colors: bool) {
    let indent = "  ".repeat(depth);
    let name = if node.is_leaf() {
        node.name.clone()
    } else if use_colors {
        Blue.bold().paint(format!("{}/", node.name)).to_string()
    } else {
        format!("{}/", node.name)
    };
    let loc = if use_colors {
        Style::new().dimmed().paint(format!("({})", node.loc)).to_string()
    } else {
        format!("({})", node.loc)
    };
    output.push_str(&format!("{}{} {}\n", indent, name, loc));

    for child in &node.children {
        push_tree_node(output, child, depth + 1, use_colors);
    }
}

/// Format dependency graph statistics, and the edge list if requested
pub fn format_graph_text(graph: &DependencyGraph, use_colors: bool, list_edges: bool) -> String {
    let mut output = String::new();
    if use_colors {
        output.push_str(&format!("{}\n\n", Blue.bold().paint("Dependency Graph")));
    } else {
        output.push_str("Dependency Graph\n\n");
    }

    let stats = graph.statistics();
    output.push_str(&format!("Nodes: {}\n", stats.total_nodes));
    output.push_str(&format!("Edges: {}\n", stats.total_edges));
    output.push_str(&format!("Connected files: {}\n", stats.connected_files));
    if stats.self_edges > 0 {
        output.push_str(&format!("Self edges: {}\n", stats.self_edges));
    }
    if let Some(file) = &stats.max_fan_in_file {
        output.push_str(&format!("Most imported: {} ({})\n", file, stats.max_fan_in));
    }
    if let Some(file) = &stats.max_fan_out_file {
        output.push_str(&format!("Most imports: {} ({})\n", file, stats.max_fan_out));
    }

    if list_edges && !graph.edges.is_empty() {
        output.push_str("\nEdges:\n");
        for edge in &graph.edges {
            let arrow = if use_colors {
                Yellow.paint("->").to_string()
            } else {
                "->".to_string()
            };
            output.push_str(&format!("  {} {} {}\n", edge.source, arrow, edge.target));
        }
    }

    if use_colors {
        output.push_str(&format!("\n{}\n", Style::new().dimmed().paint(graph.note.as_str())));
    } else {
        output.push_str(&format!("\n{}\n", graph.note));
    }

    output
}

/// Format a listing of stored scans as text
pub fn format_list_text(summaries: &[ScanSummary], use_colors: bool) -> String {
    if summaries.is_empty() {
        return "No stored scans\n".to_string();
    }

    let mut output = String::new();
    if use_colors {
        output.push_str(&format!("{}\n\n", Blue.bold().paint("Stored Scans")));
    } else {
        output.push_str("Stored Scans\n\n");
    }
    for summary in summaries {
        output.push_str(&format!(
            "{}  {}/{}  {}  files={} loc={}\n",
            summary.scan_id,
            summary.owner,
            summary.repo,
            format_timestamp(summary.created_at),
            summary.files_scanned,
            summary.total_loc
        ));
    }
    output
}

/// Format a Unix timestamp as UTC
pub fn format_timestamp(seconds: i64) -> String {
    DateTime::<Utc>::from_timestamp(seconds, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| seconds.to_string())
}

/// Format a byte count in a human-readable way
pub fn format_size(size: u64) -> String {
    if size < 1024 {
        format!("{}B", size)
    } else if size < 1024 * 1024 {
        format!("{:.2}KB", size as f64 / 1024.0)
    } else if size < 1024 * 1024 * 1024 {
        format!("{:.2}MB", size as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2}GB", size as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}

/// Serialize any part of a scan as pretty JSON
pub fn format_json<T: serde::Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

/// Format summaries as CSV, one row per scan
pub fn format_summary_csv(summaries: &[ScanSummary]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "scan_id",
        "owner",
        "repo",
        "repo_url",
        "created_at",
        "files_scanned",
        "text_files",
        "parsed_files",
        "total_loc",
        "edge_count",
        "max_bytes",
        "max_files",
    ])?;
    for summary in summaries {
        writer.write_record([
            summary.scan_id.clone(),
            summary.owner.clone(),
            summary.repo.clone(),
            summary.repo_url.clone(),
            summary.created_at.to_string(),
            summary.files_scanned.to_string(),
            summary.text_files.to_string(),
            summary.parsed_files.to_string(),
            summary.total_loc.to_string(),
            summary.edge_count.to_string(),
            summary.limits.max_bytes.to_string(),
            summary.limits.max_files.to_string(),
        ])?;
    }
    finish_csv(writer)
}

/// One `path,loc` row per tree leaf
pub fn format_tree_csv(tree: &TreeNode) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["path", "loc"])?;
    for (path, loc) in tree.leaves() {
        writer.write_record([path, loc.to_string()])?;
    }
    finish_csv(writer)
}

/// One `source,target` row per edge
pub fn format_graph_csv(graph: &DependencyGraph) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["source", "target"])?;
    for edge in &graph.edges {
        writer.write_record([edge.source.as_str(), edge.target.as_str()])?;
    }
    finish_csv(writer)
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| ScanError::from(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| ScanError::from(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

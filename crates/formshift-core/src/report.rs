//! Plain text reports for audits and diffs.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::analysis::{AuditReport, DiffResult, FieldEntry};
use crate::error::{FormshiftError, Result};
use crate::models::field::FieldType;

/// Format an audit as a text report.
pub fn format_audit_report(report: &AuditReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("Field count: {}\n", report.total_fields()));
    for field_type in FieldType::ALL {
        output.push_str(&format!("{} fields: {}\n", field_type, report.count(field_type)));
    }
    output.push_str(&format!("Recognized total: {}\n\n\n", report.recognized_fields()));

    for field in &report.fields {
        output.push_str(&format!(
            "{} ({}) — Allow Rich Text: {}\n",
            field.name,
            field.kind,
            if field.rich_text { "YES" } else { "NO" }
        ));
    }

    if !report.duplicate_names.is_empty() {
        let names: Vec<&str> = report.duplicate_names.iter().map(String::as_str).collect();
        output.push_str(&format!("\nDuplicate fields:\n{}\n", names.join(", ")));
    }

    output.push_str("\n\nInvalid type fields:\n");
    for message in &report.invalid_type_fields {
        output.push_str(message);
        output.push('\n');
    }

    output
}

/// Format a diff as a text report with one section per side and one for the overlap.
pub fn format_diff_report(label_a: &str, label_b: &str, diff: &DiffResult) -> String {
    let mut output = String::new();
    push_section(&mut output, &format!("Unique to {label_a}"), &diff.unique_to_a);
    output.push('\n');
    push_section(&mut output, &format!("Unique to {label_b}"), &diff.unique_to_b);
    output.push('\n');
    push_section(&mut output, "Common to both", &diff.common);
    output
}

fn push_section(output: &mut String, title: &str, entries: &[FieldEntry]) {
    output.push_str(&format!("{title}:\n"));
    for entry in entries {
        output.push_str(&format!("{entry}\n"));
    }
}

/// Write a report into `dir`, creating it if needed.
pub fn write_report(dir: &Path, file_name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.join(file_name);
    let persist = |source| FormshiftError::Persistence {
        path: path.clone(),
        source,
    };
    fs::create_dir_all(dir).map_err(persist)?;
    fs::write(&path, content).map_err(persist)?;
    debug!("Wrote report {}", path.display());
    Ok(path)
}

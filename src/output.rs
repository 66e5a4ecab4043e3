//! Output formatting utilities

use crate::comparator::TableInfo;
use crate::diff::Difference;
use crate::error::{Result, TabcompareError};
use crate::report::ComparisonReport;
use crate::uniqueness::UniqueRecord;

/// Rows listed per section in the pretty output
const PRETTY_SAMPLE: usize = 5;

/// Pretty printer for tabcompare output
pub struct PrettyPrinter;

impl PrettyPrinter {
    /// Render a comparison report as a tree
    pub fn render_report(report: &ComparisonReport) -> String {
        let summary = &report.summary;
        let meta = &report.metadata;
        let mut out = String::new();

        out.push_str(&format!(
            "🔍 Comparison: {} → {}\n",
            meta.reference_file_name, meta.compare_file_name
        ));
        out.push_str(&format!(
            "├─ Reference: {} rows × {} columns\n",
            summary.reference_rows, summary.reference_columns
        ));
        out.push_str(&format!(
            "├─ Compare:   {} rows × {} columns\n",
            summary.compare_rows, summary.compare_columns
        ));

        let schema_changes = summary.structure_differences + summary.added_columns + summary.removed_columns;
        if schema_changes > 0 {
            out.push_str("├─ ❌ Schema: CHANGED\n");
            let only_ref = &report.different_content.columns_only_in_reference;
            let only_cmp = &report.different_content.columns_only_in_compare;
            if !only_ref.is_empty() {
                out.push_str(&format!("│  ├─ Missing columns: {}\n", only_ref.join(", ")));
            }
            if !only_cmp.is_empty() {
                out.push_str(&format!("│  ├─ Added columns: {}\n", only_cmp.join(", ")));
            }
            out.push_str("│  └─ Cell comparison skipped\n");
        } else {
            out.push_str("├─ ✅ Schema: unchanged\n");
        }

        if summary.modified_cells > 0 {
            out.push_str(&format!("├─ ❌ Modified cells: {}\n", summary.modified_cells));
            let cells: Vec<&Difference> = report
                .differences
                .iter()
                .filter(|d| matches!(d, Difference::CellModified { .. }))
                .take(PRETTY_SAMPLE)
                .collect();
            for (i, diff) in cells.iter().enumerate() {
                let marker = if i == cells.len() - 1 { "└─" } else { "├─" };
                if let Difference::CellModified {
                    reference_value,
                    compare_value,
                    ..
                } = diff
                {
                    out.push_str(&format!(
                        "│  {} {}: '{}' → '{}'\n",
                        marker,
                        diff.position(),
                        reference_value,
                        compare_value
                    ));
                }
            }
        } else if schema_changes == 0 {
            out.push_str("├─ ✅ Cells: unchanged\n");
        }

        if summary.added_rows > 0 {
            out.push_str(&format!("├─ ➕ Added rows: {}\n", summary.added_rows));
        }
        if summary.removed_rows > 0 {
            out.push_str(&format!("├─ ➖ Removed rows: {}\n", summary.removed_rows));
        }

        let content = &report.different_content;
        if content.has_unique_content() {
            out.push_str(&format!(
                "├─ 🔑 Unique rows: {} only in reference, {} only in compare\n",
                content.total_unique_in_reference, content.total_unique_in_compare
            ));
            Self::render_unique_sample(&mut out, "Reference", &content.unique_in_reference);
            Self::render_unique_sample(&mut out, "Compare", &content.unique_in_compare);
        }

        if report.is_truncated() {
            out.push_str(&format!(
                "├─ ⚠️  Showing {} of {} differences\n",
                report.differences.len(),
                summary.differences
            ));
        }

        let verdict = if report.identical { "✅ identical" } else { "❌ different" };
        out.push_str(&format!(
            "└─ Result: {} ({} differences, {})\n",
            verdict, summary.differences, meta.processing_time
        ));
        out
    }

    fn render_unique_sample(out: &mut String, label: &str, records: &[UniqueRecord]) {
        if records.is_empty() {
            return;
        }
        let indices: Vec<String> = records
            .iter()
            .take(PRETTY_SAMPLE)
            .map(|r| (r.row_index + 1).to_string())
            .collect();
        let more = if records.len() > PRETTY_SAMPLE { "..." } else { "" };
        out.push_str(&format!("│  └─ {} rows: {}{}\n", label, indices.join(", "), more));
    }

    /// Machine-readable key=value summary
    pub fn print_quiet(report: &ComparisonReport) {
        let summary = &report.summary;
        println!("identical={}", report.identical);
        println!("differences={}", summary.differences);
        println!("modified_cells={}", summary.modified_cells);
        println!("added_rows={}", summary.added_rows);
        println!("removed_rows={}", summary.removed_rows);
        println!("added_columns={}", summary.added_columns);
        println!("removed_columns={}", summary.removed_columns);
        println!("unique_in_reference={}", summary.unique_in_reference);
        println!("unique_in_compare={}", summary.unique_in_compare);
    }

    /// Print information about a single loaded file
    pub fn print_table_info(info: &TableInfo) {
        println!("📄 File: {}", info.file_name);
        println!("├─ Rows: {}", info.rows);
        println!("├─ Columns: {}", info.columns);
        for (i, name) in info.column_names.iter().enumerate() {
            let prefix = if i == info.column_names.len() - 1 { "│  └─" } else { "│  ├─" };
            println!("{} {}", prefix, name);
        }
        println!("├─ Checksum: {}", info.checksum);
        println!("└─ Content fingerprint: {}", info.fingerprint);
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format any serializable data as JSON
    pub fn format<T: serde::Serialize + ?Sized>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }
}

/// Plain-text report for saving or sharing
pub struct TextReport;

impl TextReport {
    pub fn render(report: &ComparisonReport) -> String {
        let summary = &report.summary;
        let meta = &report.metadata;
        let content = &report.different_content;
        let mut out = String::new();

        out.push_str("FILE COMPARISON REPORT\n");
        out.push_str(&format!("Date: {}\n", meta.comparison_date));
        out.push_str(&format!("Reference file: {}\n", meta.reference_file_name));
        out.push_str(&format!("Compared file: {}\n", meta.compare_file_name));
        out.push_str(&format!("Processing time: {}\n", meta.processing_time));
        out.push_str(&format!(
            "Result: {}\n",
            if report.identical { "identical" } else { "different" }
        ));
        out.push('\n');

        out.push_str("=== SUMMARY ===\n");
        out.push_str(&format!("Total rows: {}\n", summary.total_rows));
        out.push_str(&format!("Total columns: {}\n", summary.total_columns));
        out.push_str(&format!("Differences found: {}\n", summary.differences));
        out.push_str(&format!("Modified cells: {}\n", summary.modified_cells));
        out.push_str(&format!("Added rows: {}\n", summary.added_rows));
        out.push_str(&format!("Removed rows: {}\n", summary.removed_rows));
        out.push_str(&format!("Added columns: {}\n", summary.added_columns));
        out.push_str(&format!("Removed columns: {}\n", summary.removed_columns));
        out.push_str(&format!("Unique in reference: {}\n", summary.unique_in_reference));
        out.push_str(&format!("Unique in compare: {}\n", summary.unique_in_compare));
        out.push('\n');

        out.push_str("=== UNIQUE CONTENT ===\n");
        Self::render_unique(
            &mut out,
            "reference file",
            &content.unique_in_reference,
            content.total_unique_in_reference,
        );
        Self::render_unique(
            &mut out,
            "compared file",
            &content.unique_in_compare,
            content.total_unique_in_compare,
        );
        if !content.columns_only_in_reference.is_empty() {
            out.push_str(&format!(
                "Columns only in reference file: {}\n",
                content.columns_only_in_reference.join(", ")
            ));
        }
        if !content.columns_only_in_compare.is_empty() {
            out.push_str(&format!(
                "Columns only in compared file: {}\n",
                content.columns_only_in_compare.join(", ")
            ));
        }
        out.push('\n');

        out.push_str("=== DETAILED DIFFERENCES ===\n");
        if report.is_truncated() {
            out.push_str(&format!(
                "(showing {} of {})\n",
                report.differences.len(),
                summary.differences
            ));
        }
        for (i, diff) in report.differences.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, diff.kind().as_str().to_uppercase()));
            out.push_str(&format!("   Position: {}\n", diff.position()));
            out.push_str(&format!("   Description: {}\n", diff.description()));
            if let Some(value) = diff.reference_value() {
                out.push_str(&format!("   Reference value: {}\n", value));
            }
            if let Some(value) = diff.compare_value() {
                out.push_str(&format!("   Compare value: {}\n", value));
            }
            out.push('\n');
        }

        out
    }

    fn render_unique(out: &mut String, label: &str, records: &[UniqueRecord], total: usize) {
        out.push_str(&format!("Unique in {} ({}):\n", label, total));
        for (i, record) in records.iter().enumerate() {
            out.push_str(&format!("  {}. Row {}:\n", i + 1, record.row_index + 1));
            for (column, value) in &record.data {
                out.push_str(&format!("     {}: {}\n", column, value));
            }
        }
        if records.len() < total {
            out.push_str(&format!("  ... and {} more\n", total - records.len()));
        }
        out.push('\n');
    }
}

/// CSV export of the differences list
pub struct CsvExporter;

impl CsvExporter {
    pub const HEADER: [&'static str; 5] = [
        "type",
        "position",
        "description",
        "reference_value",
        "compare_value",
    ];

    pub fn render(report: &ComparisonReport) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        writer.write_record(Self::HEADER)?;
        for diff in &report.differences {
            writer.write_record([
                diff.kind().as_str().to_string(),
                diff.position(),
                diff.description(),
                diff.reference_value().unwrap_or_default(),
                diff.compare_value().unwrap_or_default(),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| TabcompareError::Io(e.into_error()))?;
        Ok(String::from_utf8(bytes).map_err(anyhow::Error::from)?)
    }
}

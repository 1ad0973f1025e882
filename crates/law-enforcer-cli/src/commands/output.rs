//! Shared output formatting for lint results.

use anyhow::Result;
use law_enforcer_core::{LintResult, Severity, Violation, ViolationDiagnostic};
use miette::{GraphicalReportHandler, NamedSource, Report};
use std::io::{self, Write};
use std::path::Path;

use crate::OutputFormat;

/// Print lint results in the specified format.
///
/// `root` is where `pretty` looks for the original source files.
pub fn print(result: &LintResult, format: OutputFormat, root: &Path) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => write_text(&mut out, result)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, result)?;
            writeln!(out)?;
        }
        OutputFormat::Compact => write_compact(&mut out, result)?,
        OutputFormat::Pretty => write_pretty(&mut out, result, root)?,
    }
    Ok(())
}

fn severity_indicator(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "\x1b[31merror\x1b[0m",
    }
}

fn write_text(out: &mut impl Write, result: &LintResult) -> io::Result<()> {
    let errors = result.error_count();

    for violation in &result.violations {
        writeln!(
            out,
            "{} {} at {}",
            violation.code, violation.rule, violation.location
        )?;
        writeln!(
            out,
            "  {}: {}",
            severity_indicator(violation.severity),
            violation.message
        )?;
        for label in &violation.labels {
            writeln!(out, "  = note: {} ({})", label.message, label.location)?;
        }
        writeln!(out)?;
    }

    let summary_color = if errors > 0 { "\x1b[31m" } else { "\x1b[32m" };

    writeln!(
        out,
        "{}Found {} error(s) in {} unit(s)\x1b[0m",
        summary_color, errors, result.units_scanned
    )
}

fn write_compact(out: &mut impl Write, result: &LintResult) -> io::Result<()> {
    for violation in &result.violations {
        writeln!(out, "{violation}")?;
    }
    Ok(())
}

fn write_pretty(out: &mut impl Write, result: &LintResult, root: &Path) -> Result<()> {
    let handler = GraphicalReportHandler::new();
    for violation in &result.violations {
        let report = diagnostic_report(violation, root);
        let mut rendered = String::new();
        handler.render_report(&mut rendered, &*report)?;
        writeln!(out, "{rendered}")?;
    }
    writeln!(
        out,
        "{} violation(s) in {} unit(s)",
        result.violations.len(),
        result.units_scanned
    )?;
    Ok(())
}

/// Wraps a violation for miette, attaching the source file when readable.
fn diagnostic_report(violation: &Violation, root: &Path) -> Report {
    let report = Report::new(ViolationDiagnostic::from(violation));
    let file = &violation.location.file;
    match std::fs::read_to_string(root.join(file)) {
        Ok(content) => report.with_source_code(NamedSource::new(file.display().to_string(), content)),
        Err(e) => {
            tracing::debug!("No source for {}: {}", file.display(), e);
            report
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use law_enforcer_core::{Label, Location};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn result() -> LintResult {
        let mut result = LintResult::new();
        result.units_scanned = 2;
        result.violations.push(
            Violation::new(
                "LE003",
                "poco",
                Severity::Error,
                Location::new(PathBuf::from("src/S.cs"), 1, 2).with_span(1, 4),
                "Complex features are not allowed since this class or struct is designed to be serializable",
            )
            .with_label(Label::new(
                Location::new(PathBuf::from("src/S.cs"), 2, 1),
                "[POCO] applies to class `S`",
            )),
        );
        result
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn compact_is_one_line_per_violation() {
        let out = render(|w| write_compact(w, &result()));
        assert_eq!(
            out,
            "src/S.cs:1:2: error [LE003] Complex features are not allowed since this class or struct is designed to be serializable\n"
        );
    }

    #[test]
    fn text_includes_notes_and_summary() {
        let out = render(|w| write_text(w, &result()));
        assert!(out.starts_with("LE003 poco at src/S.cs:1:2\n"));
        assert!(out.contains("= note: [POCO] applies to class `S` (src/S.cs:2:1)"));
        assert!(out.contains("Found 1 error(s) in 2 unit(s)"));
    }

    #[test]
    fn pretty_renders_with_and_without_source() {
        let root = TempDir::new().unwrap();
        let mut buf = Vec::new();
        write_pretty(&mut buf, &result(), root.path()).unwrap();
        let bare = String::from_utf8(buf).unwrap();
        assert!(bare.contains("[LE003]"));

        std::fs::create_dir(root.path().join("src")).unwrap();
        std::fs::write(
            root.path().join("src/S.cs"),
            "[POCO]\ninternal class S { public int X { get; set; } }\n",
        )
        .unwrap();
        let mut buf = Vec::new();
        write_pretty(&mut buf, &result(), root.path()).unwrap();
        let annotated = String::from_utf8(buf).unwrap();
        assert!(annotated.contains("internal class S"));
        assert!(annotated.contains("1 violation(s) in 2 unit(s)"));
    }
}

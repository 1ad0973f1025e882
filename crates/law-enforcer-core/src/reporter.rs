//! Violation reporting to a host sink.

use crate::types::{LintResult, Violation};

/// Destination for violation records.
pub trait DiagnosticSink {
    /// Accepts one violation.
    fn report(&mut self, violation: Violation);
}

impl DiagnosticSink for Vec<Violation> {
    fn report(&mut self, violation: Violation) {
        self.push(violation);
    }
}

impl DiagnosticSink for LintResult {
    fn report(&mut self, violation: Violation) {
        self.violations.push(violation);
    }
}

/// Drains `violations` into `sink`, returning how many were reported.
pub fn report_all<I, S>(violations: I, sink: &mut S) -> usize
where
    I: IntoIterator<Item = Violation>,
    S: DiagnosticSink + ?Sized,
{
    let mut count = 0;
    for violation in violations {
        tracing::debug!("Reporting {}", violation);
        sink.report(violation);
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Location, Severity};
    use std::path::PathBuf;

    #[test]
    fn report_all_counts_and_forwards() {
        let violations = (1..=3).map(|line| {
            Violation::new(
                "LE001",
                "no-primitive-types",
                Severity::Error,
                Location::new(PathBuf::from("M.cs"), line, 6),
                "Primitive types are not allowed in this method",
            )
        });

        let mut result = LintResult::new();
        assert_eq!(report_all(violations, &mut result), 3);
        assert_eq!(result.violations.len(), 3);
        assert_eq!(result.violations[2].location.line, 3);
    }
}

//! # TLDR Compliance Validator
//!
//! Checks a parsed [`Document`] against the required-field and cross-field
//! rules of the wire format and reports everything it finds, never
//! stopping at the first problem.
//!
//! ## Severity contract
//!
//! - **Errors** break compliance: missing tool metadata, no commands,
//!   missing command names, a missing v0.1 `PURPOSE`, an absent v0.2
//!   keymap, and commands that were unreachable during fan-out.
//! - **Warnings** are advisory: name mismatches, duplicate names, empty
//!   example lists, malformed flag entries, and a missing v0.2 purpose
//!   (the v0.2 revision only hard-requires `cmd` and `p`).
//!
//! Unknown fields are never diagnosed; both decoders are forward
//! compatible by construction.
//!
//! Validation is a pure function of the document: [`validate_document`]
//! has no state and returns an explicit issue list. The aggregate
//! [`ValidationReport`] folds in the fan-out reachability results and owns
//! the final compliance verdict.

use std::collections::HashSet;

use crate::tldr::{Document, FetchFailure, WireFormat};

/// Severity level for validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Breaks compliance; a document with any of these fails the run
    Error,
    /// Advisory; surfaced to the operator but never affects the exit code
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A single compliance finding
#[derive(Debug, Clone)]
pub struct Issue {
    /// Where the issue occurred (e.g., "document", "command:node.read")
    pub location: String,
    pub severity: Severity,
    /// Machine-readable kind (e.g., "missing_purpose", "unreachable_command")
    pub kind: String,
    /// Human-readable description of the problem
    pub message: String,
}

impl Issue {
    pub fn error(
        location: impl Into<String>,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Issue {
            location: location.into(),
            severity: Severity::Error,
            kind: kind.into(),
            message: message.into(),
        }
    }

    pub fn warning(
        location: impl Into<String>,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Issue {
            location: location.into(),
            severity: Severity::Warning,
            kind: kind.into(),
            message: message.into(),
        }
    }
}

/// Validate a document. Pure: same document, same issue list.
pub fn validate_document(doc: &Document) -> Vec<Issue> {
    let mut issues = Vec::new();

    if doc.tool_name.trim().is_empty() {
        issues.push(Issue::error(
            "document",
            "missing_tool_name",
            "Missing required field: NAME",
        ));
    }
    if doc.version.trim().is_empty() {
        issues.push(Issue::error(
            "document",
            "missing_version",
            "Missing required field: VERSION",
        ));
    }
    if doc.format == WireFormat::Ascii && doc.summary.trim().is_empty() {
        issues.push(Issue::error(
            "document",
            "missing_summary",
            "Missing required field: SUMMARY",
        ));
    }
    if doc.format == WireFormat::Ndjson && doc.keymap.is_empty() {
        issues.push(Issue::error(
            "document",
            "missing_keymap",
            "meta header declares no keymap entries",
        ));
    }
    if doc.commands.is_empty() {
        issues.push(Issue::error(
            "document",
            "no_commands",
            "document declares no commands",
        ));
    }

    let mut seen = HashSet::new();
    for cmd in &doc.commands {
        let location = format!("command:{}", cmd.name);
        let name_missing = cmd.name.trim().is_empty();

        if name_missing {
            issues.push(Issue::error(
                "command:<unnamed>",
                "missing_name",
                match doc.format {
                    WireFormat::Ascii => "Missing required field: CMD",
                    WireFormat::Ndjson => "missing cmd field",
                },
            ));
        } else if !seen.insert(cmd.name.clone()) {
            issues.push(Issue::warning(
                &location,
                "duplicate_command",
                format!("command name '{}' declared more than once", cmd.name),
            ));
        }

        // Format A fetches stanzas by declared name, so the record's own
        // CMD line can be absent even when the identity is known; the
        // stanza is still required to carry it.
        if !name_missing && doc.format == WireFormat::Ascii && cmd.reported_name.is_none() {
            issues.push(Issue::error(
                &location,
                "missing_name",
                "Missing required field: CMD",
            ));
        }

        if cmd.purpose.trim().is_empty() {
            // v0.2 hard-requires only cmd+p's presence keys per its spec
            // text, so a missing purpose downgrades to advisory there.
            match doc.format {
                WireFormat::Ascii => issues.push(Issue::error(
                    &location,
                    "missing_purpose",
                    "Missing required field: PURPOSE",
                )),
                WireFormat::Ndjson => issues.push(Issue::warning(
                    &location,
                    "missing_purpose",
                    "missing purpose",
                )),
            }
        }

        if let Some(reported) = &cmd.reported_name {
            if reported != &cmd.name {
                issues.push(Issue::warning(
                    &location,
                    "name_mismatch",
                    format!(
                        "CMD field mismatch: expected '{}', got '{}'",
                        cmd.name, reported
                    ),
                ));
            }
        }

        if cmd.examples.is_empty() {
            issues.push(Issue::warning(
                &location,
                "no_examples",
                "no working examples declared",
            ));
        }

        for entry in &cmd.invalid_flags {
            issues.push(Issue::warning(
                &location,
                "malformed_flag",
                format!("flag entry does not match --name=TYPE[=DEFAULT]|description: '{entry}'"),
            ));
        }
    }

    issues
}

/// Aggregate verdict for one introspection run.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub tool_name: String,
    pub version: String,
    /// Commands declared by the source, reachable or not.
    pub total_commands: usize,
    /// Commands whose payload was actually fetched and decoded.
    pub accessible_commands: usize,
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    /// Run the document checks and fold in the fan-out failures.
    pub fn new(doc: &Document, unreachable: &[FetchFailure]) -> Self {
        let mut issues = validate_document(doc);
        for failure in unreachable {
            issues.push(Issue::error(
                format!("command:{}", failure.command),
                "unreachable_command",
                format!(
                    "command '{}' is not accessible: {}",
                    failure.command, failure.reason
                ),
            ));
        }
        ValidationReport {
            tool_name: doc.tool_name.clone(),
            version: doc.version.clone(),
            total_commands: doc.commands.len() + unreachable.len(),
            accessible_commands: doc.commands.len(),
            issues,
        }
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Compliant = zero errors. Unreachable commands are folded in as
    /// errors, so this also covers the "every declared command was
    /// reachable" clause for v0.1 documents.
    pub fn is_compliant(&self) -> bool {
        self.error_count() == 0
    }
}

/// Print the validation summary block: totals first, then per-location
/// issues grouped by severity.
pub fn print_report(report: &ValidationReport) {
    println!();
    println!("{}", "=".repeat(50));
    println!("VALIDATION SUMMARY");
    println!("{}", "=".repeat(50));
    println!("ℹ️  CLI: {} v{}", report.tool_name, report.version);
    println!("ℹ️  Total commands: {}", report.total_commands);
    println!("✅ Accessible commands: {}", report.accessible_commands);

    let failed = report.total_commands - report.accessible_commands;
    if failed > 0 {
        println!("❌ Unreachable commands: {failed}");
    }
    if report.error_count() > 0 {
        println!("❌ Validation errors: {}", report.error_count());
    }
    if report.warning_count() > 0 {
        println!("⚠️  Validation warnings: {}", report.warning_count());
    }

    if !report.issues.is_empty() {
        println!();
        println!("Issues:");
        for issue in report.errors() {
            println!("  ❌ [{}] {}: {}", issue.kind, issue.location, issue.message);
        }
        for issue in report.warnings() {
            println!("  ⚠️  [{}] {}: {}", issue.kind, issue.location, issue.message);
        }
    }

    println!();
    if report.is_compliant() {
        println!("✅ {} is TLDR compliant", report.tool_name);
    } else {
        println!("❌ {} has validation failures", report.tool_name);
    }
}

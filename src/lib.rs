//! # tldrgen
//!
//! **tldrgen** generates documentation, compliance reports and structural
//! analytics for any command-line tool implementing the TLDR
//! self-description standard.
//!
//! ## Overview
//!
//! A TLDR-compliant CLI answers `--tldr` with a compact, machine-parseable
//! description of its commands, inputs, outputs, flags and side effects.
//! tldrgen drives that contract end to end: it invokes the target binary,
//! decodes the response into a typed [`tldr::Document`], checks it against
//! the format's required-field and cross-field rules, derives relatedness
//! graph and distribution analytics, and renders the result as plain text,
//! markdown, JSON and HTML artifacts.
//!
//! ## Architecture
//!
//! The pipeline is strictly layered; each stage only reads the output of
//! the previous one:
//!
//! ```text
//! CLI invocation → probe (subprocess) → tldr (decode) → validator
//!                                                     → analyzer → report
//! ```
//!
//! - **[`probe`]** - resolves and invokes the target CLI with bounded
//!   per-call timeouts
//! - **[`tldr`]** - the wire-format model and the two decoders (v0.1
//!   line-oriented stanzas with per-command fan-out, v0.2 single-call
//!   NDJSON with a keymap header)
//! - **[`validator`]** - pure compliance checks producing errors and
//!   warnings, plus the aggregate run verdict
//! - **[`analyzer`]** - namespace hierarchy, dependency graph with degree
//!   centrality, flag-type/side-effect distributions, coverage metrics
//! - **[`report`]** - swappable renderers (text outline, markdown with
//!   TOC, structured JSON dump, HTML report) and artifact file writing
//! - **[`cli`]** - the `tldrgen` binary's clap interface
//!
//! The validator, analyzer and renderers are format-agnostic: the two wire
//! revisions exist only inside [`tldr`], behind format detection on the
//! first response line.
//!
//! ## Quick Start
//!
//! ```no_run
//! use tldrgen::analyzer::analyze;
//! use tldrgen::probe::CliProbe;
//! use tldrgen::tldr::load_document;
//! use tldrgen::validator::ValidationReport;
//!
//! # fn main() -> anyhow::Result<()> {
//! let probe = CliProbe::resolve("forest")?;
//! let loaded = load_document(&probe)?;
//! let report = ValidationReport::new(&loaded.document, &loaded.unreachable);
//! if report.is_compliant() {
//!     let analysis = analyze(&loaded.document);
//!     println!("{} commands", analysis.total_commands);
//! }
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod cli;
pub mod probe;
pub mod report;
pub mod tldr;
pub mod validator;

pub use analyzer::{analyze, Analysis};
pub use probe::CliProbe;
pub use tldr::{
    load_document, Channel, CommandRecord, Document, FlagSpec, LoadedDocument, WireFormat,
};
pub use validator::{validate_document, Issue, Severity, ValidationReport};

//! Document construction against a live target CLI.
//!
//! One global `--tldr` call decides the wire format. v0.2 delivers the
//! whole command set in that single response; v0.1 declares the command
//! names and requires one further subprocess call per command (fan-out).
//! Per-command failures never abort the run: every declared command is
//! attempted, the failures are carried alongside the document so the
//! validator can report them as unreachable.

use anyhow::bail;
use tracing::{info, warn};

use super::ascii;
use super::detect::detect_format;
use super::ndjson;
use super::types::{Document, WireFormat};
use crate::probe::CliProbe;

/// A declared command whose fan-out call failed or produced nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub command: String,
    pub reason: String,
}

/// A parsed [`Document`] plus the fan-out failures encountered while
/// assembling it. v0.2 documents never have failures (single call).
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub document: Document,
    pub unreachable: Vec<FetchFailure>,
}

/// Fetch and decode the target CLI's TLDR data.
///
/// # Errors
///
/// Fatal on an empty or failing global call ("introspection failed") and
/// on any v0.2 structural parse error. v0.1 per-command failures are not
/// fatal; they land in [`LoadedDocument::unreachable`].
pub fn load_document(probe: &CliProbe) -> anyhow::Result<LoadedDocument> {
    let raw = probe.global_tldr()?;
    if raw.trim().is_empty() {
        bail!(
            "introspection failed: {} --tldr produced no output",
            probe.program().display()
        );
    }

    match detect_format(&raw) {
        WireFormat::Ndjson => {
            let document = ndjson::parse_document(&raw)?;
            info!(
                tool = %document.tool_name,
                commands = document.commands.len(),
                "decoded v0.2 document in a single call"
            );
            Ok(LoadedDocument {
                document,
                unreachable: Vec::new(),
            })
        }
        WireFormat::Ascii => load_ascii(probe, &raw),
    }
}

fn load_ascii(probe: &CliProbe, raw: &str) -> anyhow::Result<LoadedDocument> {
    let global = ascii::parse_global(raw);
    info!(
        tool = %global.name,
        declared = global.commands.len(),
        "fetching per-command stanzas"
    );

    let mut commands = Vec::with_capacity(global.commands.len());
    let mut unreachable = Vec::new();
    for name in &global.commands {
        match probe.command_tldr(name) {
            Ok(text) if !text.trim().is_empty() => {
                commands.push(ascii::parse_command(name, &text));
            }
            Ok(_) => {
                warn!(command = %name, "command produced empty TLDR output");
                unreachable.push(FetchFailure {
                    command: name.clone(),
                    reason: "produced no output".to_string(),
                });
            }
            Err(err) => {
                warn!(command = %name, error = %err, "command TLDR call failed");
                unreachable.push(FetchFailure {
                    command: name.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    Ok(LoadedDocument {
        document: Document {
            tool_name: global.name,
            version: global.version,
            summary: global.summary,
            tldr_call: global.tldr_call,
            format: WireFormat::Ascii,
            keymap: Default::default(),
            commands,
        },
        unreachable,
    })
}

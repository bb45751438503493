//! Structured JSON dump: the full parsed document plus the computed
//! analytics, suitable for programmatic re-consumption.
//!
//! The dump is the one artifact this tool can read back: re-parsing a
//! dump yields a [`Document`] with identical command order and content
//! (analytics are derived data and are simply recomputed).

use serde::{Deserialize, Serialize};

use crate::analyzer::Analysis;
use crate::tldr::{Document, WireFormat};

#[derive(Debug, Serialize, Deserialize)]
pub struct Dump {
    pub metadata: DumpMetadata,
    pub document: Document,
    pub analytics: Analysis,
    pub generated_by: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DumpMetadata {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub summary: String,
    pub format: WireFormat,
    pub total_commands: usize,
}

pub fn render_dump(doc: &Document, analysis: &Analysis) -> anyhow::Result<String> {
    let dump = Dump {
        metadata: DumpMetadata {
            name: doc.tool_name.clone(),
            version: doc.version.clone(),
            summary: doc.summary.clone(),
            format: doc.format,
            total_commands: doc.commands.len(),
        },
        document: doc.clone(),
        analytics: analysis.clone(),
        generated_by: format!("tldrgen {}", env!("CARGO_PKG_VERSION")),
    };
    Ok(serde_json::to_string_pretty(&dump)?)
}

/// Re-parse a structured dump back into its document.
pub fn parse_dump(raw: &str) -> anyhow::Result<Document> {
    let dump: Dump = serde_json::from_str(raw)?;
    Ok(dump.document)
}

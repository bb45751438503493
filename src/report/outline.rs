//! Plain-text outline renderer.
//!
//! The flat reference artifact: a fixed-width header block, hierarchy and
//! connectivity summaries, then every command's raw wire payload verbatim
//! in declaration order.

use askama::Template;

use crate::analyzer::Analysis;
use crate::tldr::Document;

#[derive(Template)]
#[template(path = "report.txt", escape = "none")]
struct OutlineTemplate {
    tool: String,
    version: String,
    summary: String,
    format: String,
    total_commands: usize,
    total_flags: usize,
    average_flags: String,
    hierarchy_lines: Vec<String>,
    has_connected: bool,
    connected_lines: Vec<String>,
    sections: Vec<OutlineSection>,
}

struct OutlineSection {
    title: String,
    raw: String,
}

/// Render the text outline. Infallible on a validated document; fields
/// that are merely warned about degrade to placeholder text.
pub fn render_outline(doc: &Document, analysis: &Analysis) -> anyhow::Result<String> {
    let mut hierarchy_lines = Vec::new();
    if !analysis.hierarchy.top_level.is_empty() {
        hierarchy_lines.push(format!(
            "top-level: {}",
            analysis.hierarchy.top_level.join(", ")
        ));
    }
    for (ns, members) in &analysis.hierarchy.namespaces {
        hierarchy_lines.push(format!("{}: {}", ns, members.join(", ")));
    }
    if hierarchy_lines.is_empty() {
        hierarchy_lines.push("(none)".to_string());
    }

    let connected_lines: Vec<String> = analysis
        .graph
        .most_connected
        .iter()
        .map(|c| {
            format!(
                "{}: {} connections ({} out, {} in)",
                c.command, c.centrality, c.outgoing, c.incoming
            )
        })
        .collect();

    let sections = doc
        .commands
        .iter()
        .map(|cmd| OutlineSection {
            title: cmd.name.clone(),
            raw: if cmd.raw.trim().is_empty() {
                "(no payload captured)".to_string()
            } else {
                cmd.raw.clone()
            },
        })
        .collect();

    let template = OutlineTemplate {
        tool: doc.tool_name.clone(),
        version: doc.version.clone(),
        summary: placeholder(&doc.summary, "(no summary provided)"),
        format: doc.format.to_string(),
        total_commands: analysis.total_commands,
        total_flags: analysis.flag_types.total,
        average_flags: format!("{:.2}", analysis.flag_types.average_per_command),
        hierarchy_lines,
        has_connected: !connected_lines.is_empty(),
        connected_lines,
        sections,
    };
    Ok(template.render()?)
}

fn placeholder(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

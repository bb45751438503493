//! Markdown renderer with a generated table of contents.
//!
//! Commands are grouped by namespace; TOC anchors are derived from the
//! group headings the way markdown viewers slug them (lowercased,
//! non-alphanumerics collapsed to dashes).

use askama::Template;

use crate::analyzer::Analysis;
use crate::tldr::{Channel, CommandRecord, Document, SideEffects};

#[derive(Template)]
#[template(path = "report.md", escape = "none")]
struct MarkdownTemplate {
    tool: String,
    version: String,
    summary: String,
    format: String,
    total_commands: usize,
    toc: Vec<TocEntry>,
    groups: Vec<CommandGroup>,
}

struct TocEntry {
    title: String,
    anchor: String,
    count: usize,
}

struct CommandGroup {
    title: String,
    commands: Vec<CommandView>,
}

struct CommandView {
    name: String,
    purpose: String,
    inputs: String,
    outputs: String,
    side_effects: String,
    has_flags: bool,
    flags: Vec<FlagRow>,
    has_examples: bool,
    examples: Vec<String>,
    has_related: bool,
    related: String,
}

struct FlagRow {
    name: String,
    type_name: String,
    default: String,
    description: String,
}

/// Derive the anchor slug a markdown viewer generates for a heading.
pub fn anchor_for(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.extend(ch.to_lowercase());
        } else if (ch == ' ' || ch == '-' || ch == '.') && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

pub fn render_markdown(doc: &Document, analysis: &Analysis) -> anyhow::Result<String> {
    let mut groups = Vec::new();
    if !analysis.hierarchy.top_level.is_empty() {
        groups.push(build_group(
            doc,
            "Top-level commands",
            &analysis.hierarchy.top_level,
        ));
    }
    for (ns, members) in &analysis.hierarchy.namespaces {
        groups.push(build_group(doc, ns, members));
    }

    let toc = groups
        .iter()
        .map(|g| TocEntry {
            title: g.title.clone(),
            anchor: anchor_for(&g.title),
            count: g.commands.len(),
        })
        .collect();

    let template = MarkdownTemplate {
        tool: doc.tool_name.clone(),
        version: doc.version.clone(),
        summary: placeholder(&doc.summary, "_(no summary provided)_"),
        format: doc.format.to_string(),
        total_commands: analysis.total_commands,
        toc,
        groups,
    };
    Ok(template.render()?)
}

fn build_group(doc: &Document, title: &str, members: &[String]) -> CommandGroup {
    CommandGroup {
        title: title.to_string(),
        commands: members
            .iter()
            .filter_map(|name| doc.command(name))
            .map(command_view)
            .collect(),
    }
}

fn command_view(cmd: &CommandRecord) -> CommandView {
    CommandView {
        name: cmd.name.clone(),
        purpose: placeholder(&cmd.purpose, "_(not documented)_"),
        inputs: channel_text(&cmd.inputs),
        outputs: channel_text(&cmd.outputs),
        side_effects: side_effect_text(&cmd.side_effects),
        has_flags: !cmd.flags.is_empty(),
        flags: cmd
            .flags
            .iter()
            .map(|f| FlagRow {
                name: f.name.clone(),
                type_name: f.type_name.clone(),
                default: f.default.clone().unwrap_or_else(|| "-".to_string()),
                description: placeholder(&f.description, "-"),
            })
            .collect(),
        has_examples: !cmd.examples.is_empty(),
        examples: cmd.examples.clone(),
        has_related: !cmd.related.is_empty(),
        related: cmd
            .related
            .iter()
            .map(|r| format!("`{r}`"))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn channel_text(channel: &Channel) -> String {
    match channel {
        Channel::Text(t) => placeholder(t, "(none)"),
        Channel::Params(params) if params.is_empty() => "(none)".to_string(),
        Channel::Params(params) => params
            .iter()
            .map(|p| {
                let mut s = format!("`{}`", p.name);
                if !p.type_name.is_empty() {
                    s.push_str(&format!(" ({})", p.type_name));
                }
                if p.required {
                    s.push_str(" required");
                }
                s
            })
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn side_effect_text(effects: &SideEffects) -> String {
    match effects {
        SideEffects::Text(t) => placeholder(t, "(none declared)"),
        SideEffects::Tags(tags) if tags.is_empty() => "(none declared)".to_string(),
        SideEffects::Tags(tags) => tags
            .iter()
            .map(|t| format!("`{t}`"))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn placeholder(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

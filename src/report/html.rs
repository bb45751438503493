//! HTML visual report renderer.
//!
//! Single self-contained page: overview metric tiles, coverage bars, flag
//! type distribution, the namespace table and the most-connected ranking.
//! Values are preformatted into strings so the template stays purely
//! presentational.

use askama::Template;

use crate::analyzer::Analysis;
use crate::tldr::Document;

#[derive(Template)]
#[template(path = "report.html")]
struct HtmlTemplate {
    tool: String,
    version: String,
    summary: String,
    format: String,
    metrics: Vec<Metric>,
    coverage_bars: Vec<CoverageBar>,
    flag_rows: Vec<FlagRow>,
    hierarchy_rows: Vec<HierarchyRow>,
    connected_rows: Vec<ConnectedRow>,
    has_effects: bool,
    effect_rows: Vec<EffectRow>,
}

struct Metric {
    label: String,
    value: String,
}

struct CoverageBar {
    label: String,
    percent: String,
    text: String,
}

struct FlagRow {
    type_name: String,
    count: usize,
    percent: String,
}

struct HierarchyRow {
    namespace: String,
    commands: String,
    count: usize,
}

struct ConnectedRow {
    command: String,
    centrality: usize,
    outgoing: usize,
    incoming: usize,
}

struct EffectRow {
    tag: String,
    count: usize,
}

pub fn render_html(doc: &Document, analysis: &Analysis) -> anyhow::Result<String> {
    let metrics = vec![
        Metric {
            label: "Total Commands".to_string(),
            value: analysis.total_commands.to_string(),
        },
        Metric {
            label: "Namespaces".to_string(),
            value: analysis.hierarchy.namespaces.len().to_string(),
        },
        Metric {
            label: "Total Flags".to_string(),
            value: analysis.flag_types.total.to_string(),
        },
        Metric {
            label: "Avg Flags/Command".to_string(),
            value: format!("{:.2}", analysis.flag_types.average_per_command),
        },
    ];

    let cov = &analysis.coverage;
    let coverage_bars = vec![
        bar("Commands with Examples", cov.with_examples, cov.with_examples_percent, cov.total),
        bar("Commands with Related Links", cov.with_related, cov.with_related_percent, cov.total),
        bar("Commands with Schema", cov.with_schema, cov.with_schema_percent, cov.total),
        bar(
            "Commands with Side Effects",
            cov.with_side_effects,
            cov.with_side_effects_percent,
            cov.total,
        ),
        bar("Commands with Flags", cov.with_flags, cov.with_flags_percent, cov.total),
    ];

    // Descending by count; BTreeMap order breaks ties alphabetically.
    let mut flag_rows: Vec<FlagRow> = analysis
        .flag_types
        .distribution
        .iter()
        .map(|(ty, &count)| FlagRow {
            type_name: ty.clone(),
            count,
            percent: if analysis.flag_types.total == 0 {
                "0.0".to_string()
            } else {
                format!(
                    "{:.1}",
                    count as f64 / analysis.flag_types.total as f64 * 100.0
                )
            },
        })
        .collect();
    flag_rows.sort_by(|a, b| b.count.cmp(&a.count));

    let mut hierarchy_rows = Vec::new();
    if !analysis.hierarchy.top_level.is_empty() {
        hierarchy_rows.push(HierarchyRow {
            namespace: "top-level".to_string(),
            commands: analysis.hierarchy.top_level.join(", "),
            count: analysis.hierarchy.top_level.len(),
        });
    }
    for (ns, members) in &analysis.hierarchy.namespaces {
        hierarchy_rows.push(HierarchyRow {
            namespace: ns.clone(),
            commands: members.join(", "),
            count: members.len(),
        });
    }

    let connected_rows = analysis
        .graph
        .most_connected
        .iter()
        .map(|c| ConnectedRow {
            command: c.command.clone(),
            centrality: c.centrality,
            outgoing: c.outgoing,
            incoming: c.incoming,
        })
        .collect();

    let effect_rows: Vec<EffectRow> = analysis
        .side_effects
        .as_ref()
        .map(|dist| {
            dist.tags
                .iter()
                .map(|(tag, &count)| EffectRow {
                    tag: tag.clone(),
                    count,
                })
                .collect()
        })
        .unwrap_or_default();

    let template = HtmlTemplate {
        tool: doc.tool_name.clone(),
        version: doc.version.clone(),
        summary: if doc.summary.trim().is_empty() {
            "(no summary provided)".to_string()
        } else {
            doc.summary.clone()
        },
        format: doc.format.to_string(),
        metrics,
        coverage_bars,
        flag_rows,
        hierarchy_rows,
        connected_rows,
        has_effects: !effect_rows.is_empty(),
        effect_rows,
    };
    Ok(template.render()?)
}

fn bar(label: &str, count: usize, percent: f64, total: usize) -> CoverageBar {
    CoverageBar {
        label: label.to_string(),
        percent: format!("{percent:.1}"),
        text: format!("{percent:.1}% ({count}/{total})"),
    }
}

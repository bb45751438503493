//! # Graph & Distribution Analyzer
//!
//! Read-only derivations over a validated [`Document`]:
//!
//! - namespace hierarchy (top-level vs dotted prefixes)
//! - relatedness graph with degree centrality and a most-connected ranking
//! - flag-type and side-effect distributions
//! - documentation coverage metrics
//!
//! Every output is a pure, deterministic function of the document: maps
//! are `BTreeMap`-keyed, rankings use stable sorts with declaration-order
//! tie-breaks, and nothing reads the clock or ambient state. Running the
//! analyzer twice on the same document yields identical results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::tldr::{Document, SideEffects, WireFormat};

/// How many entries the most-connected ranking keeps.
const MOST_CONNECTED_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub total_commands: usize,
    pub hierarchy: Hierarchy,
    pub graph: DependencyGraph,
    pub flag_types: FlagTypeDistribution,
    /// Only derived for v0.2 documents; v0.1 side effects are free text
    /// and cannot be tabulated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side_effects: Option<SideEffectDistribution>,
    pub coverage: Coverage,
}

/// Commands partitioned by namespace prefix.
///
/// Every command lands in exactly one group; group members are sorted
/// lexicographically for rendering while the document itself keeps
/// declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hierarchy {
    pub top_level: Vec<String>,
    pub namespaces: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyGraph {
    /// `related` targets per command, declaration values retained even
    /// when they point outside the document.
    pub outgoing: BTreeMap<String, Vec<String>>,
    /// Inverted edges; keys may be dangling targets.
    pub incoming: BTreeMap<String, Vec<String>>,
    /// Degree centrality (|outgoing| + |incoming|) per document command.
    pub centrality: BTreeMap<String, usize>,
    /// Top commands by centrality, descending, declaration order breaking
    /// ties; zero-degree commands are omitted.
    pub most_connected: Vec<ConnectedCommand>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectedCommand {
    pub command: String,
    pub centrality: usize,
    pub outgoing: usize,
    pub incoming: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagTypeDistribution {
    /// Counts per declared type token, case preserved as declared.
    pub distribution: BTreeMap<String, usize>,
    pub total: usize,
    /// Rounded to 2 decimals; defined as 0 for zero-command documents.
    pub average_per_command: f64,
    /// Ties resolved to the lexicographically smallest type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub most_common_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideEffectDistribution {
    /// Occurrences of each `domain:operation` tag across all commands.
    pub tags: BTreeMap<String, usize>,
    pub commands_with_effects: usize,
    pub commands_without_effects: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coverage {
    pub total: usize,
    pub with_examples: usize,
    pub with_examples_percent: f64,
    pub with_related: usize,
    pub with_related_percent: f64,
    pub with_schema: usize,
    pub with_schema_percent: f64,
    pub with_side_effects: usize,
    pub with_side_effects_percent: f64,
    pub with_flags: usize,
    pub with_flags_percent: f64,
}

/// Derive all secondary structures for a document.
pub fn analyze(doc: &Document) -> Analysis {
    Analysis {
        total_commands: doc.commands.len(),
        hierarchy: categorize_by_namespace(doc),
        graph: build_dependency_graph(doc),
        flag_types: analyze_flag_types(doc),
        side_effects: (doc.format == WireFormat::Ndjson).then(|| analyze_side_effects(doc)),
        coverage: calculate_coverage(doc),
    }
}

fn categorize_by_namespace(doc: &Document) -> Hierarchy {
    let mut top_level = Vec::new();
    let mut namespaces: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for cmd in &doc.commands {
        match cmd.namespace() {
            Some(ns) => namespaces
                .entry(ns.to_string())
                .or_default()
                .push(cmd.name.clone()),
            None => top_level.push(cmd.name.clone()),
        }
    }
    top_level.sort();
    for group in namespaces.values_mut() {
        group.sort();
    }
    Hierarchy {
        top_level,
        namespaces,
    }
}

fn build_dependency_graph(doc: &Document) -> DependencyGraph {
    // Last-wins on duplicate names, matching the documented duplicate
    // policy; the validator has already warned about them.
    let mut outgoing: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for cmd in &doc.commands {
        outgoing.insert(cmd.name.clone(), cmd.related.clone());
    }

    let mut incoming: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (source, targets) in &outgoing {
        for target in targets {
            incoming
                .entry(target.clone())
                .or_default()
                .push(source.clone());
        }
    }

    let mut centrality = BTreeMap::new();
    let mut ranked = Vec::new();
    let mut ranked_names = std::collections::HashSet::new();
    for cmd in &doc.commands {
        if !ranked_names.insert(cmd.name.as_str()) {
            continue;
        }
        let out_count = outgoing.get(&cmd.name).map_or(0, Vec::len);
        let in_count = incoming.get(&cmd.name).map_or(0, Vec::len);
        centrality.insert(cmd.name.clone(), out_count + in_count);
        ranked.push(ConnectedCommand {
            command: cmd.name.clone(),
            centrality: out_count + in_count,
            outgoing: out_count,
            incoming: in_count,
        });
    }

    // Stable sort: ties keep declaration order.
    ranked.sort_by(|a, b| b.centrality.cmp(&a.centrality));
    ranked.retain(|c| c.centrality > 0);
    ranked.truncate(MOST_CONNECTED_LIMIT);

    DependencyGraph {
        outgoing,
        incoming,
        centrality,
        most_connected: ranked,
    }
}

fn analyze_flag_types(doc: &Document) -> FlagTypeDistribution {
    let mut distribution: BTreeMap<String, usize> = BTreeMap::new();
    let mut total = 0usize;
    for cmd in &doc.commands {
        total += cmd.flags.len();
        for flag in &cmd.flags {
            let key = if flag.type_name.is_empty() {
                "unknown".to_string()
            } else {
                flag.type_name.clone()
            };
            *distribution.entry(key).or_insert(0) += 1;
        }
    }

    let average_per_command = if doc.commands.is_empty() {
        0.0
    } else {
        round2(total as f64 / doc.commands.len() as f64)
    };

    // BTreeMap iteration order makes the tie-break lexicographic.
    let most_common_type = distribution
        .iter()
        .fold(None::<(&String, usize)>, |best, (ty, &count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((ty, count)),
        })
        .map(|(ty, _)| ty.clone());

    FlagTypeDistribution {
        distribution,
        total,
        average_per_command,
        most_common_type,
    }
}

fn analyze_side_effects(doc: &Document) -> SideEffectDistribution {
    let mut tags: BTreeMap<String, usize> = BTreeMap::new();
    let mut with = 0usize;
    for cmd in &doc.commands {
        match &cmd.side_effects {
            SideEffects::Tags(declared) if !declared.is_empty() => {
                with += 1;
                for tag in declared {
                    *tags.entry(tag.clone()).or_insert(0) += 1;
                }
            }
            _ => {}
        }
    }
    SideEffectDistribution {
        tags,
        commands_with_effects: with,
        commands_without_effects: doc.commands.len() - with,
    }
}

fn calculate_coverage(doc: &Document) -> Coverage {
    let total = doc.commands.len();
    let with_examples = doc.commands.iter().filter(|c| !c.examples.is_empty()).count();
    let with_related = doc.commands.iter().filter(|c| !c.related.is_empty()).count();
    let with_schema = doc.commands.iter().filter(|c| c.schema_json.is_some()).count();
    let with_side_effects = doc
        .commands
        .iter()
        .filter(|c| c.side_effects.is_declared())
        .count();
    let with_flags = doc.commands.iter().filter(|c| !c.flags.is_empty()).count();

    Coverage {
        total,
        with_examples,
        with_examples_percent: percent(with_examples, total),
        with_related,
        with_related_percent: percent(with_related, total),
        with_schema,
        with_schema_percent: percent(with_schema, total),
        with_side_effects,
        with_side_effects_percent: percent(with_side_effects, total),
        with_flags,
        with_flags_percent: percent(with_flags, total),
    }
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        round1(part as f64 / total as f64 * 100.0)
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Wire-format variant a [`Document`] was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireFormat {
    /// v0.1 line-oriented `UPPERCASE_KEY: value` stanzas, one subprocess
    /// call per command.
    Ascii,
    /// v0.2 NDJSON with a `# meta:` keymap header, one subprocess call
    /// total.
    Ndjson,
}

impl std::fmt::Display for WireFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WireFormat::Ascii => write!(f, "v0.1 (ascii)"),
            WireFormat::Ndjson => write!(f, "v0.2 (ndjson)"),
        }
    }
}

/// Input/output channel description of a command.
///
/// v0.1 carries free text; v0.2 carries structured parameter descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Channel {
    Params(Vec<ParamSpec>),
    Text(String),
}

impl Channel {
    pub fn is_empty(&self) -> bool {
        match self {
            Channel::Text(t) => t.trim().is_empty(),
            Channel::Params(p) => p.is_empty(),
        }
    }
}

impl Default for Channel {
    fn default() -> Self {
        Channel::Text(String::new())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    #[serde(rename = "type", default)]
    pub type_name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// Declared side effects of a command.
///
/// v0.1 is a free-text descriptor; v0.2 is a list of `domain:operation`
/// tags suitable for tabulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SideEffects {
    Tags(Vec<String>),
    Text(String),
}

impl SideEffects {
    /// True when the command declares at least one effect.
    pub fn is_declared(&self) -> bool {
        match self {
            SideEffects::Text(t) => !t.trim().is_empty(),
            SideEffects::Tags(tags) => !tags.is_empty(),
        }
    }
}

impl Default for SideEffects {
    fn default() -> Self {
        SideEffects::Text(String::new())
    }
}

/// One `--flag` declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagSpec {
    pub name: String,
    /// Declared type token, case preserved (`STR` in v0.1, `str` in v0.2).
    /// The vocabulary is open; unknown tokens are accepted.
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default)]
    pub description: String,
}

/// Metadata for a single command within a [`Document`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandRecord {
    /// Declared identifier. Dot-separated segments denote the namespace
    /// (`node.read` lives under `node`).
    pub name: String,
    /// The name the command reported about itself (`CMD:` in v0.1), kept
    /// separately so the validator can cross-check it against `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reported_name: Option<String>,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub inputs: Channel,
    #[serde(default)]
    pub outputs: Channel,
    #[serde(default)]
    pub side_effects: SideEffects,
    #[serde(default)]
    pub flags: Vec<FlagSpec>,
    /// v0.1 `FLAGS` entries that failed the `--name=TYPE[=DEFAULT]|desc`
    /// pattern. Kept so the validator can surface them as warnings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub invalid_flags: Vec<String>,
    #[serde(default)]
    pub examples: Vec<String>,
    /// Names of related commands. Targets are not required to exist in the
    /// same document; dangling references are retained.
    #[serde(default)]
    pub related: Vec<String>,
    /// v0.1 `SCHEMA_JSON` payload, verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_json: Option<String>,
    /// Verbatim source payload (ASCII stanza or NDJSON line) for the plain
    /// text outline.
    #[serde(default)]
    pub raw: String,
}

impl CommandRecord {
    /// Namespace prefix (segment before the first `.`), or `None` for a
    /// top-level command.
    pub fn namespace(&self) -> Option<&str> {
        self.name.split_once('.').map(|(ns, _)| ns)
    }
}

/// The full parsed result of one introspection run against a target CLI.
///
/// A document is constructed fresh per run and never mutated afterwards;
/// validation, analysis and rendering only read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub tool_name: String,
    pub version: String,
    /// v0.1 `SUMMARY`; empty for v0.2 documents.
    #[serde(default)]
    pub summary: String,
    /// v0.1 `TLDR_CALL` invocation hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tldr_call: Option<String>,
    pub format: WireFormat,
    /// v0.2 short-key → long-name aliases; empty for v0.1 documents.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub keymap: BTreeMap<String, String>,
    /// Commands in declaration order. Never sorted.
    pub commands: Vec<CommandRecord>,
}

impl Document {
    pub fn command(&self, name: &str) -> Option<&CommandRecord> {
        self.commands.iter().find(|c| c.name == name)
    }
}

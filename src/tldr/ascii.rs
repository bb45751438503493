//! Decoder for the v0.1 line-oriented wire format.
//!
//! Stanzas are `UPPERCASE_KEY: value` lines. Lines that do not match the
//! key pattern are ignored, so newer producers can add syntax without
//! breaking older consumers. List-valued fields use per-field delimiters:
//! commas for `COMMANDS`/`RELATED`, pipes for `EXAMPLES`, semicolons for
//! `FLAGS` entries of the form `--name=TYPE[=DEFAULT]|description`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

use super::types::{Channel, CommandRecord, FlagSpec, SideEffects};

static KEY_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z_]+):\s*(.*)$").expect("key line pattern"));

/// Parsed document-level stanza from the global `--tldr` call.
#[derive(Debug, Clone, Default)]
pub struct GlobalIndex {
    pub name: String,
    pub version: String,
    pub summary: String,
    pub tldr_call: Option<String>,
    /// Declared command names, in declaration order.
    pub commands: Vec<String>,
}

/// Split a stanza into a key → raw value map.
///
/// Later occurrences of a key overwrite earlier ones; unmatched lines are
/// skipped without error.
pub fn parse_stanza(raw: &str) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    for line in raw.lines() {
        if let Some(caps) = KEY_LINE_RE.captures(line.trim_end()) {
            fields.insert(caps[1].to_string(), caps[2].trim().to_string());
        }
    }
    fields
}

/// Decode the global index stanza.
pub fn parse_global(raw: &str) -> GlobalIndex {
    let mut fields = parse_stanza(raw);
    GlobalIndex {
        name: fields.remove("NAME").unwrap_or_default(),
        version: fields.remove("VERSION").unwrap_or_default(),
        summary: fields.remove("SUMMARY").unwrap_or_default(),
        tldr_call: fields.remove("TLDR_CALL").filter(|v| !v.is_empty()),
        commands: split_list(fields.get("COMMANDS").map_or("", String::as_str), ','),
    }
}

/// Decode one per-command stanza fetched for `declared` via fan-out.
///
/// `declared` stays the record's identity; the stanza's own `CMD:` value is
/// kept on `reported_name` for the validator's cross-check.
pub fn parse_command(declared: &str, raw: &str) -> CommandRecord {
    let mut fields = parse_stanza(raw);
    let (flags, invalid_flags) = parse_flags(fields.get("FLAGS").map_or("", String::as_str));
    CommandRecord {
        name: declared.to_string(),
        reported_name: fields.remove("CMD").filter(|v| !v.is_empty()),
        purpose: fields.remove("PURPOSE").unwrap_or_default(),
        inputs: Channel::Text(fields.remove("INPUTS").unwrap_or_default()),
        outputs: Channel::Text(fields.remove("OUTPUTS").unwrap_or_default()),
        side_effects: SideEffects::Text(fields.remove("SIDE_EFFECTS").unwrap_or_default()),
        flags,
        invalid_flags,
        examples: split_list(fields.get("EXAMPLES").map_or("", String::as_str), '|'),
        related: split_list(fields.get("RELATED").map_or("", String::as_str), ','),
        schema_json: fields.remove("SCHEMA_JSON").filter(|v| !v.is_empty()),
        raw: raw.trim_end().to_string(),
    }
}

/// Decode a semicolon-separated `FLAGS` value.
///
/// Returns the well-formed flags plus every entry that failed the
/// `--name=TYPE[=DEFAULT]|description` pattern, so callers can surface the
/// rejects instead of losing them.
pub fn parse_flags(raw: &str) -> (Vec<FlagSpec>, Vec<String>) {
    let mut flags = Vec::new();
    let mut invalid = Vec::new();
    for entry in raw.split(';') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        match parse_flag_entry(entry) {
            Some(flag) => flags.push(flag),
            None => invalid.push(entry.to_string()),
        }
    }
    (flags, invalid)
}

fn parse_flag_entry(entry: &str) -> Option<FlagSpec> {
    let (signature, description) = entry.split_once('|')?;
    let signature = signature.trim().strip_prefix("--")?;
    let mut parts = signature.splitn(3, '=');
    let name = parts.next()?.trim();
    if name.is_empty() {
        return None;
    }
    // Type defaults to BOOL when the signature is bare `--name`.
    let type_name = parts.next().map_or("BOOL", str::trim);
    let default = parts.next().map(|d| d.trim().to_string());
    Some(FlagSpec {
        name: name.to_string(),
        type_name: type_name.to_string(),
        default,
        alias: None,
        description: description.trim().to_string(),
    })
}

fn split_list(raw: &str, sep: char) -> Vec<String> {
    raw.split(sep)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stanza_ignores_unmatched_lines() {
        let fields = parse_stanza("NAME: forest\nnot a field\n# comment\nVERSION: 1.2.0");
        assert_eq!(fields.get("NAME").map(String::as_str), Some("forest"));
        assert_eq!(fields.get("VERSION").map(String::as_str), Some("1.2.0"));
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn bare_flag_defaults_to_bool() {
        let (flags, invalid) = parse_flags("--verbose|chatty output");
        assert!(invalid.is_empty());
        assert_eq!(flags[0].name, "verbose");
        assert_eq!(flags[0].type_name, "BOOL");
        assert_eq!(flags[0].default, None);
    }

    #[test]
    fn flag_with_type_and_default() {
        let (flags, _) = parse_flags("--depth=INT=3|traversal depth");
        assert_eq!(flags[0].type_name, "INT");
        assert_eq!(flags[0].default.as_deref(), Some("3"));
        assert_eq!(flags[0].description, "traversal depth");
    }

    #[test]
    fn malformed_entries_are_kept_aside() {
        let (flags, invalid) = parse_flags("--ok=STR|fine; no-dashes=STR|nope; missing-pipe");
        assert_eq!(flags.len(), 1);
        assert_eq!(invalid, vec!["no-dashes=STR|nope", "missing-pipe"]);
    }
}

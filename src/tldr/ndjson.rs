//! Decoder for the v0.2 NDJSON wire format.
//!
//! Line 1 is a `--- tool: NAME ---` banner, line 2 a `# meta:` header
//! carrying `tool=`, `version=` and a `keymap={...}` object mapping short
//! JSON keys to their semantic long names. Every following non-blank line
//! is one JSON object describing one command.
//!
//! Unlike the v0.1 decoder there is no forward-compatible fallback for
//! malformed syntax: a line that is not a JSON object is a fatal parse
//! error naming the 1-based line number. Unknown *fields* inside a valid
//! object are still ignored.

use anyhow::{bail, Context};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::types::{Channel, CommandRecord, Document, FlagSpec, ParamSpec, SideEffects, WireFormat};

static TOOL_BANNER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^---\s+tool:\s+(.+?)\s+---$").expect("tool banner pattern"));

const META_PREFIX: &str = "# meta:";

/// Long field names of the v0.2 command object vocabulary. Short keys are
/// resolved against these through the keymap.
const FIELD_COMMAND: &str = "command";
const FIELD_PURPOSE: &str = "purpose";
const FIELD_INPUTS: &str = "inputs";
const FIELD_OUTPUTS: &str = "outputs";
const FIELD_FLAGS: &str = "flags";
const FIELD_SIDE_EFFECTS: &str = "side_effects";
const FIELD_EXAMPLES: &str = "examples";
const FIELD_RELATED: &str = "related";

/// True when `line` is a v0.2 tool banner. Used for format detection.
pub fn is_tool_banner(line: &str) -> bool {
    TOOL_BANNER_RE.is_match(line.trim_end())
}

/// Decode a complete v0.2 payload into a [`Document`].
///
/// Fails fast on a malformed banner or meta header (quoting the offending
/// line) and on any body line that is not a JSON object (naming its
/// 1-based line number).
pub fn parse_document(raw: &str) -> anyhow::Result<Document> {
    let mut lines = raw.lines();

    let banner = lines.next().unwrap_or_default();
    let tool_name = match TOOL_BANNER_RE.captures(banner.trim_end()) {
        Some(caps) => caps[1].to_string(),
        None => bail!("malformed tool banner on line 1: {banner:?}"),
    };

    let meta = lines.next().unwrap_or_default();
    if !meta.trim_start().starts_with(META_PREFIX) {
        bail!("malformed meta header on line 2: {meta:?}");
    }
    let version = meta_value(meta, "version=").unwrap_or_default();
    let keymap = parse_keymap(meta)
        .with_context(|| format!("malformed keymap on line 2: {meta:?}"))?;

    let mut commands = Vec::new();
    for (idx, line) in raw.lines().enumerate().skip(2) {
        if line.trim().is_empty() {
            continue;
        }
        let lineno = idx + 1;
        let value: Value = serde_json::from_str(line)
            .with_context(|| format!("line {lineno} is not valid JSON"))?;
        let Value::Object(obj) = value else {
            bail!("line {lineno} is not a JSON object");
        };
        commands.push(parse_command(&obj, &keymap, line));
    }

    Ok(Document {
        tool_name,
        version,
        summary: String::new(),
        tldr_call: None,
        format: WireFormat::Ndjson,
        keymap,
        commands,
    })
}

/// Extract the value of `key=` from the meta header, up to the next comma.
fn meta_value(meta: &str, key: &str) -> Option<String> {
    let start = meta.find(key)? + key.len();
    let rest = &meta[start..];
    let end = rest.find(',').unwrap_or(rest.len());
    let value = rest[..end].trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Parse the `keymap={...}` object out of the meta header.
///
/// Strict JSON is preferred; the relaxed `{short:long,short:long}` form
/// with bare identifiers is accepted as well since producers emit both.
fn parse_keymap(meta: &str) -> anyhow::Result<BTreeMap<String, String>> {
    let Some(start) = meta.find("keymap=") else {
        bail!("missing keymap= declaration");
    };
    let rest = &meta[start + "keymap=".len()..];
    let Some(open) = rest.find('{') else {
        bail!("keymap is not an object");
    };
    let mut depth = 0usize;
    let mut close = None;
    for (i, ch) in rest[open..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(open + i);
                    break;
                }
            }
            _ => {}
        }
    }
    let Some(close) = close else {
        bail!("unterminated keymap object");
    };
    let body = &rest[open..=close];

    if let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(body) {
        let mut keymap = BTreeMap::new();
        for (k, v) in obj {
            if let Value::String(long) = v {
                keymap.insert(k, long);
            }
        }
        return Ok(keymap);
    }

    // Relaxed form: bare identifiers, `{cmd:command,p:purpose}`.
    let mut keymap = BTreeMap::new();
    for pair in body.trim_matches(['{', '}']).split(',') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        let Some((short, long)) = pair.split_once(':') else {
            bail!("keymap entry {pair:?} has no colon");
        };
        keymap.insert(
            short.trim().trim_matches('"').to_string(),
            long.trim().trim_matches('"').to_string(),
        );
    }
    Ok(keymap)
}

fn parse_command(
    obj: &Map<String, Value>,
    keymap: &BTreeMap<String, String>,
    raw_line: &str,
) -> CommandRecord {
    let name = field(obj, keymap, FIELD_COMMAND)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    CommandRecord {
        name,
        reported_name: None,
        purpose: field(obj, keymap, FIELD_PURPOSE)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        inputs: Channel::Params(param_list(field(obj, keymap, FIELD_INPUTS))),
        outputs: Channel::Params(param_list(field(obj, keymap, FIELD_OUTPUTS))),
        side_effects: SideEffects::Tags(string_list(field(obj, keymap, FIELD_SIDE_EFFECTS))),
        flags: flag_list(field(obj, keymap, FIELD_FLAGS)),
        invalid_flags: Vec::new(),
        examples: string_list(field(obj, keymap, FIELD_EXAMPLES)),
        related: string_list(field(obj, keymap, FIELD_RELATED)),
        schema_json: None,
        raw: raw_line.trim_end().to_string(),
    }
}

/// Look up a semantic field on a command object.
///
/// The object's keys are the short keys of the keymap; any short key whose
/// long name matches wins. The long name itself is accepted as a fallback
/// so producers without an alias for a field still decode. Keys that
/// resolve to nothing are the caller's unknown fields and stay ignored.
fn field<'a>(
    obj: &'a Map<String, Value>,
    keymap: &BTreeMap<String, String>,
    long_name: &str,
) -> Option<&'a Value> {
    keymap
        .iter()
        .find(|(_, long)| long.as_str() == long_name)
        .and_then(|(short, _)| obj.get(short))
        .or_else(|| obj.get(long_name))
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn param_list(value: Option<&Value>) -> Vec<ParamSpec> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(param_entry).collect())
        .unwrap_or_default()
}

fn param_entry(value: &Value) -> Option<ParamSpec> {
    let obj = value.as_object()?;
    Some(ParamSpec {
        name: obj.get("name")?.as_str()?.to_string(),
        type_name: obj
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        required: obj.get("required").and_then(Value::as_bool).unwrap_or(false),
        default: obj
            .get("default")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

fn flag_list(value: Option<&Value>) -> Vec<FlagSpec> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(flag_entry).collect())
        .unwrap_or_default()
}

fn flag_entry(value: &Value) -> Option<FlagSpec> {
    let obj = value.as_object()?;
    Some(FlagSpec {
        name: obj.get("name")?.as_str()?.to_string(),
        type_name: obj
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        default: obj
            .get("default")
            .and_then(Value::as_str)
            .map(str::to_string),
        alias: obj.get("alias").and_then(Value::as_str).map(str::to_string),
        description: obj
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    })
}

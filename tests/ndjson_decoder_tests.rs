#![allow(clippy::unwrap_used, clippy::expect_used)]

use tldrgen::tldr::ndjson::parse_document;
use tldrgen::tldr::{detect_format, Channel, SideEffects, WireFormat};

const MINIMAL: &str = "--- tool: demo ---\n# meta: tool=demo, version=1.0, keymap={cmd:command,p:purpose}\n{\"cmd\":\"init\",\"p\":\"Init\"}";

#[test]
fn test_banner_detected_as_ndjson() {
    assert_eq!(detect_format(MINIMAL), WireFormat::Ndjson);
}

#[test]
fn test_minimal_document_decodes() {
    let doc = parse_document(MINIMAL).unwrap();
    assert_eq!(doc.tool_name, "demo");
    assert_eq!(doc.version, "1.0");
    assert_eq!(doc.format, WireFormat::Ndjson);
    assert_eq!(doc.keymap.get("cmd").map(String::as_str), Some("command"));
    assert_eq!(doc.commands.len(), 1);
    assert_eq!(doc.commands[0].name, "init");
    assert_eq!(doc.commands[0].purpose, "Init");
    assert_eq!(doc.commands[0].raw, "{\"cmd\":\"init\",\"p\":\"Init\"}");
}

#[test]
fn test_strict_json_keymap_accepted() {
    let raw = "--- tool: demo ---\n# meta: tool=demo, version=1.0, keymap={\"cmd\":\"command\",\"p\":\"purpose\"}\n{\"cmd\":\"init\",\"p\":\"Init\"}";
    let doc = parse_document(raw).unwrap();
    assert_eq!(doc.commands[0].name, "init");
}

#[test]
fn test_structured_fields_decode() {
    let raw = concat!(
        "--- tool: demo ---\n",
        "# meta: tool=demo, version=1.0, keymap={cmd:command,p:purpose,i:inputs,o:outputs,f:flags,se:side_effects,x:examples,r:related}\n",
        "{\"cmd\":\"sync\",\"p\":\"Synchronize\",",
        "\"i\":[{\"name\":\"source\",\"type\":\"dir\",\"required\":true}],",
        "\"o\":[{\"name\":\"report\",\"type\":\"file\"}],",
        "\"f\":[{\"name\":\"dry-run\",\"type\":\"bool\",\"description\":\"no writes\"},{\"name\":\"jobs\",\"type\":\"int\",\"default\":\"4\",\"alias\":\"j\"}],",
        "\"se\":[\"fs:write\",\"net:read\"],",
        "\"x\":[\"demo sync ./src\"],",
        "\"r\":[\"init\"]}",
    );
    let doc = parse_document(raw).unwrap();
    let cmd = &doc.commands[0];

    match &cmd.inputs {
        Channel::Params(params) => {
            assert_eq!(params.len(), 1);
            assert_eq!(params[0].name, "source");
            assert_eq!(params[0].type_name, "dir");
            assert!(params[0].required);
        }
        Channel::Text(_) => panic!("expected structured inputs"),
    }

    assert_eq!(cmd.flags.len(), 2);
    assert_eq!(cmd.flags[0].name, "dry-run");
    assert_eq!(cmd.flags[0].description, "no writes");
    assert_eq!(cmd.flags[1].default.as_deref(), Some("4"));
    assert_eq!(cmd.flags[1].alias.as_deref(), Some("j"));

    assert_eq!(
        cmd.side_effects,
        SideEffects::Tags(vec!["fs:write".to_string(), "net:read".to_string()])
    );
    assert_eq!(cmd.examples, vec!["demo sync ./src"]);
    assert_eq!(cmd.related, vec!["init"]);
}

#[test]
fn test_missing_purpose_decodes_to_empty() {
    let raw = "--- tool: demo ---\n# meta: tool=demo, version=1.0, keymap={cmd:command,p:purpose}\n{\"cmd\":\"init\"}";
    let doc = parse_document(raw).unwrap();
    assert_eq!(doc.commands[0].purpose, "");
}

#[test]
fn test_unknown_fields_are_ignored() {
    let raw = "--- tool: demo ---\n# meta: tool=demo, version=1.0, keymap={cmd:command,p:purpose}\n{\"cmd\":\"init\",\"p\":\"Init\",\"zz\":\"future field\",\"nested\":{\"a\":1}}";
    let doc = parse_document(raw).unwrap();
    assert_eq!(doc.commands.len(), 1);
    assert_eq!(doc.commands[0].name, "init");
}

#[test]
fn test_long_names_accepted_without_keymap_alias() {
    // A field with no short alias still decodes through its long name.
    let raw = "--- tool: demo ---\n# meta: tool=demo, version=1.0, keymap={cmd:command,p:purpose}\n{\"cmd\":\"init\",\"p\":\"Init\",\"examples\":[\"demo init\"]}";
    let doc = parse_document(raw).unwrap();
    assert_eq!(doc.commands[0].examples, vec!["demo init"]);
}

#[test]
fn test_blank_lines_are_skipped() {
    let raw = "--- tool: demo ---\n# meta: tool=demo, version=1.0, keymap={cmd:command,p:purpose}\n\n{\"cmd\":\"init\",\"p\":\"Init\"}\n\n";
    let doc = parse_document(raw).unwrap();
    assert_eq!(doc.commands.len(), 1);
}

#[test]
fn test_malformed_banner_is_fatal_and_quoted() {
    let raw = "-- tool: demo --\n# meta: tool=demo, version=1.0, keymap={cmd:command}";
    let err = parse_document(raw).unwrap_err().to_string();
    assert!(err.contains("line 1"), "got: {err}");
    assert!(err.contains("-- tool: demo --"), "got: {err}");
}

#[test]
fn test_malformed_meta_header_is_fatal_and_quoted() {
    let raw = "--- tool: demo ---\nnot a meta line\n{\"cmd\":\"init\"}";
    let err = parse_document(raw).unwrap_err().to_string();
    assert!(err.contains("line 2"), "got: {err}");
    assert!(err.contains("not a meta line"), "got: {err}");
}

#[test]
fn test_invalid_json_line_names_line_number() {
    let raw = "--- tool: demo ---\n# meta: tool=demo, version=1.0, keymap={cmd:command,p:purpose}\nnot valid json";
    let err = parse_document(raw).unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("line 3"), "got: {chain}");
}

#[test]
fn test_non_object_json_line_is_fatal() {
    let raw = "--- tool: demo ---\n# meta: tool=demo, version=1.0, keymap={cmd:command,p:purpose}\n{\"cmd\":\"init\",\"p\":\"Init\"}\n[1,2,3]";
    let err = parse_document(raw).unwrap_err().to_string();
    assert!(err.contains("line 4"), "got: {err}");
    assert!(err.contains("not a JSON object"), "got: {err}");
}

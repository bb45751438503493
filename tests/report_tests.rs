#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{command, document};
use tldrgen::analyzer::analyze;
use tldrgen::report::{parse_dump, render_dump, render_html, render_markdown, render_outline};
use tldrgen::tldr::{ndjson, FlagSpec, WireFormat};

fn sample_doc() -> tldrgen::tldr::Document {
    let mut capture = command("capture");
    capture.raw = "CMD: capture\nPURPOSE: capture purpose".to_string();
    capture.related = vec!["node.read".to_string()];
    capture.flags = vec![FlagSpec {
        name: "title".to_string(),
        type_name: "STR".to_string(),
        default: None,
        alias: None,
        description: "note title".to_string(),
    }];
    let mut read = command("node.read");
    read.raw = "CMD: node.read\nPURPOSE: node.read purpose".to_string();
    document(WireFormat::Ascii, vec![capture, read])
}

#[test]
fn test_outline_contains_rules_and_raw_payloads() {
    let doc = sample_doc();
    let analysis = analyze(&doc);
    let text = render_outline(&doc, &analysis).unwrap();

    assert!(text.contains(&"=".repeat(60)));
    assert!(text.contains(&"-".repeat(60)));
    assert!(text.contains("demo v1.0"));
    // Raw per-command payloads appear verbatim.
    assert!(text.contains("CMD: capture\nPURPOSE: capture purpose"));
    assert!(text.contains("CMD: node.read"));
    // Declaration order: capture's section precedes node.read's.
    let capture_at = text.find("CMD: capture").unwrap();
    let read_at = text.find("CMD: node.read").unwrap();
    assert!(capture_at < read_at);
}

#[test]
fn test_outline_degrades_to_placeholders() {
    let mut cmd = command("bare");
    cmd.raw = String::new();
    let mut doc = document(WireFormat::Ascii, vec![cmd]);
    doc.summary = String::new();
    let analysis = analyze(&doc);

    let text = render_outline(&doc, &analysis).unwrap();
    assert!(text.contains("(no summary provided)"));
    assert!(text.contains("(no payload captured)"));
}

#[test]
fn test_markdown_toc_anchors_derive_from_namespaces() {
    let doc = sample_doc();
    let analysis = analyze(&doc);
    let md = render_markdown(&doc, &analysis).unwrap();

    assert!(md.contains("## Table of contents"));
    assert!(md.contains("- [Top-level commands](#top-level-commands)"));
    assert!(md.contains("- [node](#node)"));
    assert!(md.contains("### `capture`"));
    assert!(md.contains("| `--title` | STR | - | note title |"));
    assert!(md.contains("Related: `node.read`"));
}

#[test]
fn test_html_report_renders_metrics_and_tables() {
    let doc = sample_doc();
    let analysis = analyze(&doc);
    let html = render_html(&doc, &analysis).unwrap();

    assert!(html.contains("<title>demo v1.0 - TLDR Report</title>"));
    assert!(html.contains("Total Commands"));
    assert!(html.contains("<code>STR</code>"));
    assert!(html.contains("top-level"));
    assert!(html.contains("Most Connected Commands"));
}

#[test]
fn test_html_escapes_untrusted_payloads() {
    let mut cmd = command("xss");
    cmd.purpose = "<script>alert(1)</script>".to_string();
    let mut doc = document(WireFormat::Ascii, vec![cmd]);
    doc.summary = "<b>bold</b> summary".to_string();
    let analysis = analyze(&doc);

    let html = render_html(&doc, &analysis).unwrap();
    assert!(!html.contains("<b>bold</b>"));
    assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
}

#[test]
fn test_dump_round_trip_preserves_commands() {
    let doc = sample_doc();
    let analysis = analyze(&doc);
    let json = render_dump(&doc, &analysis).unwrap();

    let reparsed = parse_dump(&json).unwrap();
    assert_eq!(reparsed, doc);
    // Ordering specifically: names come back in declaration order.
    let names: Vec<&str> = reparsed.commands.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["capture", "node.read"]);
}

#[test]
fn test_dump_round_trip_for_ndjson_documents() {
    let raw = concat!(
        "--- tool: demo ---\n",
        "# meta: tool=demo, version=2.0, keymap={cmd:command,p:purpose,se:side_effects,x:examples}\n",
        "{\"cmd\":\"init\",\"p\":\"Init\",\"se\":[\"fs:write\"],\"x\":[\"demo init\"]}\n",
        "{\"cmd\":\"sync\",\"p\":\"Sync\",\"se\":[],\"x\":[\"demo sync\"]}",
    );
    let doc = ndjson::parse_document(raw).unwrap();
    let analysis = analyze(&doc);

    let reparsed = parse_dump(&render_dump(&doc, &analysis).unwrap()).unwrap();
    assert_eq!(reparsed, doc);
    assert_eq!(reparsed.format, WireFormat::Ndjson);
    assert_eq!(reparsed.keymap, doc.keymap);
}

#[test]
fn test_dump_embeds_analytics() {
    let doc = sample_doc();
    let analysis = analyze(&doc);
    let json = render_dump(&doc, &analysis).unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["metadata"]["name"], "demo");
    assert_eq!(value["metadata"]["total_commands"], 2);
    assert_eq!(value["analytics"]["total_commands"], 2);
    assert!(value["analytics"]["graph"]["centrality"].is_object());
    assert!(value["generated_by"]
        .as_str()
        .unwrap()
        .starts_with("tldrgen"));
}

#[test]
fn test_rendering_never_fails_on_warning_only_documents() {
    // Warnings only: empty examples, no related, missing ndjson purpose.
    let raw = "--- tool: demo ---\n# meta: tool=demo, version=1.0, keymap={cmd:command,p:purpose}\n{\"cmd\":\"init\"}";
    let doc = ndjson::parse_document(raw).unwrap();
    let analysis = analyze(&doc);

    assert!(render_outline(&doc, &analysis).is_ok());
    assert!(render_markdown(&doc, &analysis).is_ok());
    assert!(render_html(&doc, &analysis).is_ok());
    assert!(render_dump(&doc, &analysis).is_ok());

    let md = render_markdown(&doc, &analysis).unwrap();
    assert!(md.contains("_(not documented)_"));
}

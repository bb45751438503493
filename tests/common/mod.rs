#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

use tldrgen::tldr::{CommandRecord, Document, WireFormat};

/// Build a minimal command with a purpose so it validates cleanly unless a
/// test breaks it on purpose.
pub fn command(name: &str) -> CommandRecord {
    CommandRecord {
        name: name.to_string(),
        reported_name: Some(name.to_string()),
        purpose: format!("{name} purpose"),
        examples: vec![format!("demo {name}")],
        raw: format!("CMD: {name}"),
        ..CommandRecord::default()
    }
}

/// Build a document that passes validation for the given format.
pub fn document(format: WireFormat, commands: Vec<CommandRecord>) -> Document {
    let keymap = match format {
        WireFormat::Ascii => Default::default(),
        WireFormat::Ndjson => [("cmd", "command"), ("p", "purpose")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    };
    Document {
        tool_name: "demo".to_string(),
        version: "1.0".to_string(),
        summary: match format {
            WireFormat::Ascii => "Demo tool".to_string(),
            WireFormat::Ndjson => String::new(),
        },
        tldr_call: None,
        format,
        keymap,
        commands,
    }
}

#[cfg(unix)]
pub mod fake_cli {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    /// Write an executable shell script into `dir` that plays the target
    /// CLI role in subprocess tests.
    pub fn install(dir: &Path, name: &str, script: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// A well-behaved v0.1 target with two commands.
    pub const ASCII_DEMO: &str = r#"#!/bin/sh
case "$1" in
  --tldr)
    printf 'NAME: demo\nVERSION: 1.0\nSUMMARY: Demo tool\nCOMMANDS: capture, node.read\nTLDR_CALL: demo <command> --tldr\n'
    ;;
  capture)
    printf 'CMD: capture\nPURPOSE: Create a note\nINPUTS: STDIN\nOUTPUTS: node record\nSIDE_EFFECTS: writes to DB\nFLAGS: --title=STR|note title\nEXAMPLES: demo capture --title x\nRELATED: node.read\n'
    ;;
  node)
    printf 'CMD: node.read\nPURPOSE: Read a node\nINPUTS: node id\nOUTPUTS: node record\nSIDE_EFFECTS: none\nFLAGS: --format=STR=plain|output format\nEXAMPLES: demo node read 42\nRELATED: capture\n'
    ;;
  *)
    exit 2
    ;;
esac
"#;

    /// A well-behaved v0.2 target: everything in one call.
    pub const NDJSON_DEMO: &str = r#"#!/bin/sh
printf -- '--- tool: demo ---\n'
printf '# meta: tool=demo, version=2.0, keymap={cmd:command,p:purpose,x:examples,r:related,se:side_effects}\n'
printf '{"cmd":"init","p":"Initialize","x":["demo init"],"r":["sync"],"se":["fs:write"]}\n'
printf '{"cmd":"sync","p":"Synchronize","x":["demo sync"],"r":[],"se":[]}\n'
"#;
}

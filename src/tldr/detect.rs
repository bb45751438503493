//! Wire-format detection.
//!
//! The two TLDR revisions are distinguished by the first line of the
//! global `--tldr` response: a `--- tool: NAME ---` banner selects the
//! v0.2 NDJSON decoder, anything else falls back to the v0.1 line format.

use super::ndjson;
use super::types::WireFormat;

pub fn detect_format(raw: &str) -> WireFormat {
    match raw.lines().next() {
        Some(first) if ndjson::is_tool_banner(first) => WireFormat::Ndjson,
        _ => WireFormat::Ascii,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_selects_ndjson() {
        assert_eq!(detect_format("--- tool: demo ---\n# meta: ..."), WireFormat::Ndjson);
    }

    #[test]
    fn key_value_selects_ascii() {
        assert_eq!(detect_format("NAME: forest\nVERSION: 1.0"), WireFormat::Ascii);
        assert_eq!(detect_format(""), WireFormat::Ascii);
    }
}

//! # TLDR Wire Format
//!
//! Typed model and decoders for the TLDR self-description format.
//!
//! Two revisions coexist:
//!
//! - **v0.1** ([`ascii`]) - line-oriented `UPPERCASE_KEY: value` stanzas,
//!   discovered through one subprocess call per command (fan-out).
//! - **v0.2** ([`ndjson`]) - a banner + `# meta:` keymap header followed by
//!   one JSON object per line, delivered in a single call.
//!
//! [`detect::detect_format`] picks the decoder from the first response
//! line; everything downstream (validator, analyzer, renderers) works on
//! the shared [`Document`] model and stays format-agnostic.

pub mod ascii;
pub mod detect;
mod load;
pub mod ndjson;
mod types;

pub use detect::detect_format;
pub use load::{load_document, FetchFailure, LoadedDocument};
pub use types::{
    Channel, CommandRecord, Document, FlagSpec, ParamSpec, SideEffects, WireFormat,
};

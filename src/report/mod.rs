//! # Report Renderer
//!
//! Projects a `(Document, Analysis)` pair into artifacts. Each target
//! representation is its own strategy module behind the same
//! `render(doc, analysis) -> String` shape:
//!
//! - [`outline`] - flat plain-text reference with raw per-command payloads
//! - [`markdown`] - hierarchical outline with a table of contents
//! - [`dump`] - structured JSON for programmatic re-consumption
//! - [`html`] - single-page visual report
//!
//! Rendering never fails on a document that validated with zero errors;
//! warn-level gaps degrade to placeholder text. [`artifacts`] owns the
//! `<cli>_tldr.<ext>` file conventions.

pub mod artifacts;
pub mod dump;
pub mod html;
pub mod markdown;
pub mod outline;

pub use artifacts::{write_artifacts, ArtifactOptions};
pub use dump::{parse_dump, render_dump};
pub use html::render_html;
pub use markdown::render_markdown;
pub use outline::render_outline;

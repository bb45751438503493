//! Artifact file writing.
//!
//! Filenames follow the `<cli>_tldr.<ext>` convention. The text outline
//! and JSON dump are always written; markdown and HTML are opt-in. All
//! artifacts are rendered before the first byte hits disk, so a rendering
//! failure leaves no partial file set behind.

use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::analyzer::Analysis;
use crate::tldr::Document;

use super::{dump, html, markdown, outline};

#[derive(Debug, Clone)]
pub struct ArtifactOptions {
    pub out_dir: PathBuf,
    pub markdown: bool,
    pub html: bool,
}

impl Default for ArtifactOptions {
    fn default() -> Self {
        ArtifactOptions {
            out_dir: PathBuf::from("."),
            markdown: false,
            html: false,
        }
    }
}

/// Render and write the artifact set, returning the paths written.
pub fn write_artifacts(
    cli_name: &str,
    doc: &Document,
    analysis: &Analysis,
    opts: &ArtifactOptions,
) -> anyhow::Result<Vec<PathBuf>> {
    let stem = artifact_stem(cli_name);

    // Render everything up front; writing starts only once all renderers
    // have succeeded.
    let mut artifacts = vec![
        (format!("{stem}_tldr.txt"), outline::render_outline(doc, analysis)?),
        (format!("{stem}_tldr.json"), dump::render_dump(doc, analysis)?),
    ];
    if opts.markdown {
        artifacts.push((
            format!("{stem}_tldr.md"),
            markdown::render_markdown(doc, analysis)?,
        ));
    }
    if opts.html {
        artifacts.push((format!("{stem}_tldr.html"), html::render_html(doc, analysis)?));
    }

    fs::create_dir_all(&opts.out_dir)
        .with_context(|| format!("failed to create {}", opts.out_dir.display()))?;

    let mut written = Vec::with_capacity(artifacts.len());
    for (file_name, contents) in artifacts {
        let path = opts.out_dir.join(file_name);
        fs::write(&path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "wrote artifact");
        println!("✅ Generated: {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// Final path component of the target CLI name, so `./bin/demo` still
/// produces `demo_tldr.txt`.
fn artifact_stem(cli_name: &str) -> String {
    Path::new(cli_name)
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli_name.to_string())
}

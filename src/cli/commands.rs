use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::analyzer::{analyze, Analysis};
use crate::probe::CliProbe;
use crate::report::{write_artifacts, ArtifactOptions};
use crate::tldr::{load_document, Document};
use crate::validator::{print_report, ValidationReport};

/// Command-line interface for tldrgen
///
/// Provides commands for generating documentation artifacts from and
/// validating TLDR-compliant CLIs.
#[derive(Parser)]
#[command(name = "tldrgen")]
#[command(about = "TLDR documentation generator and validator", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available tldrgen commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate documentation artifacts for a TLDR-compliant CLI
    Generate {
        /// Name (or path) of the target CLI executable
        cli: String,

        /// Run the parser and validator only and print a compliance
        /// summary; exits non-zero when the target is not compliant
        #[arg(long, default_value_t = false)]
        validate: bool,

        /// Print the analytics report to the console instead of writing
        /// artifact files
        #[arg(long, default_value_t = false, conflicts_with = "validate")]
        analyze: bool,

        /// Additionally write a Markdown reference with a table of contents
        #[arg(long, default_value_t = false)]
        markdown: bool,

        /// Additionally write an HTML visual report
        #[arg(long, default_value_t = false)]
        html: bool,

        /// Directory artifact files are written into
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Per-subprocess timeout in seconds
        #[arg(long, default_value_t = 10)]
        timeout_secs: u64,
    },
}

/// Execute the CLI command provided by the user, exiting the process with
/// the appropriate status code.
///
/// # Errors
///
/// Returns an error if:
/// - The target CLI cannot be resolved or its introspection call fails
/// - The TLDR payload has a fatal parse error
/// - Artifact files cannot be written
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let code = execute(&cli)?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

/// Run a parsed [`Cli`] invocation and return the intended exit code.
/// Split from [`run_cli`] so tests can drive it without process exit.
pub fn execute(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Generate {
            cli: target,
            validate,
            analyze: analyze_only,
            markdown,
            html,
            out_dir,
            timeout_secs,
        } => {
            let probe =
                CliProbe::resolve(target)?.with_timeout(Duration::from_secs(*timeout_secs));

            println!("ℹ️  Fetching TLDR data from '{target}'...");
            let loaded = load_document(&probe)?;
            let report = ValidationReport::new(&loaded.document, &loaded.unreachable);

            if *validate {
                print_report(&report);
                return Ok(if report.is_compliant() { 0 } else { 1 });
            }

            if !report.is_compliant() {
                print_report(&report);
                anyhow::bail!("'{}' failed TLDR validation", report.tool_name);
            }

            let analysis = analyze(&loaded.document);

            if *analyze_only {
                print_analysis(&loaded.document, &analysis);
                return Ok(0);
            }

            let written = write_artifacts(
                target,
                &loaded.document,
                &analysis,
                &ArtifactOptions {
                    out_dir: out_dir.clone(),
                    markdown: *markdown,
                    html: *html,
                },
            )?;
            info!(artifacts = written.len(), "generation finished");
            println!("✅ Done! {} artifact(s) generated.", written.len());
            Ok(0)
        }
    }
}

/// Print the analytics report block for `--analyze`.
fn print_analysis(doc: &Document, analysis: &Analysis) {
    println!();
    println!("{}", "=".repeat(50));
    println!("ANALYTICS REPORT");
    println!("{}", "=".repeat(50));
    println!();
    println!("Tool: {} v{} ({})", doc.tool_name, doc.version, doc.format);
    println!("Total commands: {}", analysis.total_commands);

    println!();
    println!("Command hierarchy:");
    if !analysis.hierarchy.top_level.is_empty() {
        println!("  top-level: {} commands", analysis.hierarchy.top_level.len());
    }
    for (ns, members) in &analysis.hierarchy.namespaces {
        println!("  {}: {} commands", ns, members.len());
    }

    println!();
    println!("Flag type distribution:");
    if analysis.flag_types.distribution.is_empty() {
        println!("  (no flags declared)");
    }
    for (ty, count) in &analysis.flag_types.distribution {
        println!("  {ty}: {count}");
    }
    println!(
        "  total: {} (avg {:.2} per command)",
        analysis.flag_types.total, analysis.flag_types.average_per_command
    );

    let cov = &analysis.coverage;
    println!();
    println!("Coverage:");
    println!(
        "  examples: {}% ({}/{})",
        cov.with_examples_percent, cov.with_examples, cov.total
    );
    println!(
        "  related: {}% ({}/{})",
        cov.with_related_percent, cov.with_related, cov.total
    );
    println!(
        "  schema: {}% ({}/{})",
        cov.with_schema_percent, cov.with_schema, cov.total
    );
    println!(
        "  side effects: {}% ({}/{})",
        cov.with_side_effects_percent, cov.with_side_effects, cov.total
    );

    println!();
    println!("Most connected commands:");
    if analysis.graph.most_connected.is_empty() {
        println!("  (no related links declared)");
    }
    for entry in &analysis.graph.most_connected {
        println!(
            "  {}: {} connections ({} out, {} in)",
            entry.command, entry.centrality, entry.outgoing, entry.incoming
        );
    }

    if let Some(effects) = &analysis.side_effects {
        println!();
        println!("Side effect tags:");
        if effects.tags.is_empty() {
            println!("  (none declared)");
        }
        for (tag, count) in &effects.tags {
            println!("  {tag}: {count}");
        }
        println!(
            "  commands with effects: {} / without: {}",
            effects.commands_with_effects, effects.commands_without_effects
        );
    }
}

//! infgen — EDK2 module test-scaffolding generator.
//!
//! Parses a module description (INF) file, substitutes deterministic
//! synthetic GUIDs and tokens for the real values, infers missing PCD
//! datum types from the module's C sources, and writes a scaffold report
//! for downstream code generation.

use anyhow::{Context, Result};
use clap::Parser;

use infgen::alloc::AllocationContext;
use infgen::cli::{self, Cli};
use infgen::inf::InfDocument;
use infgen::report;

fn main() -> Result<()> {
    let cli = Cli::parse();
    infgen::verbose::init(cli.quiet, cli.verbose);

    match cli.command {
        cli::Command::Generate(ref args) => cmd_generate(args),
        cli::Command::Inspect(ref args) => cmd_inspect(args),
    }
}

/// Generate `scaffold.json` from a description file.
fn cmd_generate(args: &cli::GenerateArgs) -> Result<()> {
    let written = report::generate(&args.inf, args.source_root.as_deref(), &args.dest)
        .with_context(|| format!("generating scaffold for {}", args.inf.display()))?;

    if !infgen::verbose::is_quiet() {
        println!("Wrote {}", written.display());
    }
    Ok(())
}

/// Print the extracted sections of a description file.
///
/// Identifier-bearing sections are shown with their substituted values, so
/// the output matches what `generate` would embed in the report.
fn cmd_inspect(args: &cli::InspectArgs) -> Result<()> {
    let doc = InfDocument::load(&args.inf)
        .with_context(|| format!("loading {}", args.inf.display()))?;
    let mut ctx = AllocationContext::new();

    print_section("Defines", doc.defines().unwrap_or_default().iter());
    println!("[Sources]");
    for source in doc.sources().unwrap_or_default() {
        println!("  {source}");
    }
    print_section("Packages", doc.packages().iter());
    print_section("LibraryClasses", doc.library_classes().iter());
    print_section("Guids", doc.guids(&mut ctx).iter());
    print_section("Protocols", doc.protocols(&mut ctx).iter());
    print_section("Ppis", doc.ppis(&mut ctx).iter());
    print_section("Pcd", doc.pcds().iter());

    Ok(())
}

fn print_section<'a, I>(name: &str, entries: I)
where
    I: Iterator<Item = (&'a String, &'a String)>,
{
    println!("[{name}]");
    for (key, value) in entries {
        if value.is_empty() {
            println!("  {key}");
        } else {
            println!("  {key} = {value}");
        }
    }
}

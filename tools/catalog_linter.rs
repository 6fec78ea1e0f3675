/// Catalog Linter: reports authoring defects in a tag catalog.
///
/// Usage: catalog_linter [<catalog.ron>]

use clap::Parser;
use prompt_composer::core::catalog::{Catalog, Severity};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "catalog_linter")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Validate pools, groups and default probabilities in a tag catalog")]
struct Args {
    /// Catalog file to check; the built-in catalog when omitted
    catalog: Option<PathBuf>,
    /// Treat warnings as errors
    #[arg(long)]
    strict: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let loaded = match &args.catalog {
        Some(path) => Catalog::load_from_ron(path),
        None => Catalog::builtin(),
    };
    let catalog = match loaded {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("ERROR: Failed to load catalog: {}", e);
            process::exit(1);
        }
    };

    let pools = catalog.pools();
    println!(
        "Loaded {} pools ({} tags, {} expression variants)",
        pools.len(),
        catalog.tag_count(),
        catalog.expressions.variants.len()
    );

    let issues = catalog.lint();

    println!("\n=== Catalog Lint Report ===\n");

    if issues.is_empty() {
        println!("All checks passed!");
    }

    for issue in issues.iter().filter(|i| i.severity == Severity::Warning) {
        println!("{}", issue);
    }
    for issue in issues.iter().filter(|i| i.severity == Severity::Error) {
        println!("{}", issue);
    }

    let errors = issues.iter().filter(|i| i.severity == Severity::Error).count();
    let warnings = issues.len() - errors;
    println!("\nSummary: {} errors, {} warnings", errors, warnings);

    if errors > 0 || (args.strict && warnings > 0) {
        process::exit(1);
    }
}

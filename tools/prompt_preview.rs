/// Prompt Preview: interactive shell for sampling prompts from a catalog.
///
/// Usage: prompt_preview [--catalog <path>] [--seed <n>] [--category <name> [--count <n>]]
///
/// Commands:
///   gen <category>         generate one prompt
///   bulk <category> <n>    generate n prompts with tag statistics
///   seed [n]               show or set the RNG seed
///   categories             list categories
///   help                   list commands
///   quit                   exit

use clap::Parser;
use prompt_composer::core::catalog::Catalog;
use prompt_composer::{Category, PromptEngine};
use rustc_hash::{FxHashMap, FxHashSet};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "prompt_preview")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interactive shell for sampling tag prompts")]
struct Args {
    /// RON catalog to load instead of the built-in one
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Initial RNG seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Print prompts for this category and exit
    #[arg(long)]
    category: Option<String>,
    /// Number of prompts to print with --category
    #[arg(long, default_value_t = 1)]
    count: usize,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let catalog = match &args.catalog {
        Some(path) => Catalog::load_from_ron(path),
        None => Catalog::builtin(),
    };
    let catalog = match catalog {
        Ok(c) => c,
        Err(e) => {
            eprintln!("ERROR: Failed to load catalog: {}", e);
            process::exit(1);
        }
    };

    let mut builder = PromptEngine::builder().with_catalog(catalog);
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    let mut engine = match builder.build() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    if let Some(name) = &args.category {
        for _ in 0..args.count {
            match engine.generate_prompt(name) {
                Ok(prompt) => println!("{}", prompt),
                Err(e) => {
                    eprintln!("ERROR: {}", e);
                    process::exit(1);
                }
            }
        }
        return;
    }

    println!("Loaded {} tags", engine.catalog().tag_count());
    println!("Seed: {}", engine.seed());
    println!("Type 'help' for commands.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("preview> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd.to_lowercase(), rest.trim()),
            None => (line.to_lowercase(), ""),
        };

        match cmd.as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => print_help(),
            "categories" | "cats" => {
                for category in engine.categories() {
                    println!("  {}", category);
                }
            }
            "gen" | "g" => {
                if rest.is_empty() {
                    println!("Usage: gen <category>");
                    continue;
                }
                match engine.generate_prompt(rest) {
                    Ok(prompt) => {
                        println!("\n{}\n", prompt);
                        println!(
                            "[Trace] category={} tags={} generation={}",
                            prompt.category,
                            prompt.len(),
                            engine.generation_count()
                        );
                    }
                    Err(e) => println!("ERROR: {}", e),
                }
            }
            "seed" => {
                if rest.is_empty() {
                    println!("Current seed: {}", engine.seed());
                    continue;
                }
                match rest.parse::<u64>() {
                    Ok(seed) => {
                        engine.reseed(seed);
                        println!("Seed set to {}", seed);
                    }
                    Err(_) => println!("Invalid seed: {}", rest),
                }
            }
            "bulk" => {
                // The count comes last because category names may contain spaces.
                let Some((name, count)) = rest.rsplit_once(char::is_whitespace) else {
                    println!("Usage: bulk <category> <n>");
                    continue;
                };
                let count: usize = match count.parse() {
                    Ok(n) if n > 0 => n,
                    _ => {
                        println!("Invalid count: {}", count);
                        continue;
                    }
                };
                let Some(category) = Category::from_name(name.trim()) else {
                    println!("Unknown category: '{}'. Try 'categories'.", name.trim());
                    continue;
                };
                run_bulk(&mut engine, category, count);
            }
            _ => {
                println!("Unknown command: '{}'. Type 'help' for available commands.", cmd);
            }
        }
    }
}

fn run_bulk(engine: &mut PromptEngine, category: Category, count: usize) {
    let prompts = match engine.generate_variants(category, count) {
        Ok(prompts) => prompts,
        Err(e) => {
            println!("ERROR: {}", e);
            return;
        }
    };

    println!("\n=== Bulk Generation: {} x {} ===\n", prompts.len(), category);

    let unique: FxHashSet<String> = prompts.iter().map(|p| p.to_string()).collect();
    println!("Unique prompts: {} / {}", unique.len(), prompts.len());

    let avg_tags = prompts.iter().map(|p| p.len() as f64).sum::<f64>() / prompts.len() as f64;
    let min_tags = prompts.iter().map(|p| p.len()).min().unwrap_or(0);
    let max_tags = prompts.iter().map(|p| p.len()).max().unwrap_or(0);
    println!("Tags per prompt: avg {:.1}, min {}, max {}", avg_tags, min_tags, max_tags);

    let mut tag_counts: FxHashMap<&str, u32> = FxHashMap::default();
    for prompt in &prompts {
        for tag in &prompt.tags {
            *tag_counts.entry(tag.as_str()).or_insert(0) += 1;
        }
    }
    let mut tag_freq: Vec<(&str, u32)> = tag_counts.into_iter().collect();
    tag_freq.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    println!("\nTop 10 tags:");
    for (tag, n) in tag_freq.iter().take(10) {
        println!("  {}: {} ({:.0}%)", tag, n, 100.0 * *n as f64 / prompts.len() as f64);
    }

    if let Some(first) = prompts.first() {
        println!("\nSample prompt:");
        println!("  {}", first);
    }
    println!();
}

fn print_help() {
    println!("Commands:");
    println!("  gen <category>        Generate one prompt");
    println!("  bulk <category> <n>   Generate n prompts with tag statistics");
    println!("  seed [n]              Show or set the RNG seed");
    println!("  categories            List categories");
    println!("  help                  Show this help");
    println!("  quit                  Exit");
    println!();
    let names: Vec<&str> = Category::ALL.iter().map(|c| c.name()).collect();
    println!("Categories: {}", names.join(", "));
}

//! ordgen CLI
//!
//! Command-line interface for generating Open Resource Discovery documents
//! from compiled service models.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use ordgen_common::{annotations, DefinitionGraph, DefinitionKind, OrdConfig};
use ordgen_generator::{OrdGenerator, Severity, Synthesis};
use ordgen_parser::{load_config, load_project_descriptor, ModelParser};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ordgen")]
#[command(version, about = "Generate Open Resource Discovery documents from compiled service models", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the ORD document of an application
    #[command(after_help = "EXAMPLES:\n  \
        # Print the document to stdout\n  \
        ordgen generate --model gen/csn.json --package package.json\n\n  \
        # Apply overrides and write to a file\n  \
        ordgen generate \\\n    \
        --model gen/csn.json \\\n    \
        --package package.json \\\n    \
        --config ord.yaml \\\n    \
        --output ./ord/document.json")]
    Generate {
        /// Path to the compiled model (CSN JSON)
        #[arg(short, long)]
        model: PathBuf,

        /// Path to the project descriptor
        #[arg(short, long, default_value = "package.json")]
        package: PathBuf,

        /// Override configuration (YAML or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Load a compiled model and display the definitions the generator sees
    #[command(after_help = "EXAMPLES:\n  \
        ordgen inspect --model gen/csn.json\n  \
        ordgen inspect --model gen/csn.json --verbose")]
    Inspect {
        /// Path to the compiled model (CSN JSON)
        #[arg(short, long)]
        model: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            model,
            package,
            config,
            output,
        } => {
            generate_command(
                model.as_path(),
                package.as_path(),
                config.as_deref(),
                output.as_deref(),
                cli.verbose,
            )?;
        }

        Commands::Inspect { model } => {
            inspect_command(model.as_path(), cli.verbose)?;
        }
    }

    Ok(())
}

/// Structured logs go to stderr so the document can be piped from stdout
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("ORDGEN_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_model(model_path: &Path) -> Result<DefinitionGraph> {
    let parser = ModelParser::from_file(model_path).context("Failed to load compiled model")?;
    Ok(parser.parse())
}

fn generate_command(
    model_path: &Path,
    package_path: &Path,
    config_path: Option<&Path>,
    output: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    eprintln!(
        "{} Generating ORD document from: {}",
        "→".cyan(),
        model_path.display()
    );

    let graph = load_model(model_path)?;
    eprintln!("{} Loaded {} definitions", "✓".green(), graph.len());

    let descriptor =
        load_project_descriptor(package_path).context("Failed to load project descriptor")?;

    let config = match config_path {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => OrdConfig::default(),
    };

    if verbose {
        eprintln!("  Project: {}", descriptor.name);
        if let Some(namespace) = &config.namespace {
            eprintln!("  Namespace: {}", namespace);
        }
        if let Some(path) = output {
            eprintln!("  Output: {}", path.display());
        }
    }

    let generator = OrdGenerator::new(graph);
    let synthesis = match output {
        Some(path) => generator
            .generate_to_file(Some(&descriptor), &config, path)
            .context("Failed to generate ORD document")?,
        None => {
            let synthesis = generator
                .generate(Some(&descriptor), &config)
                .context("Failed to generate ORD document")?;
            let rendered = serde_json::to_string_pretty(&synthesis.document)
                .context("Failed to serialize ORD document")?;
            println!("{}", rendered);
            synthesis
        }
    };

    print_summary(&synthesis);
    print_warnings(&synthesis);

    eprintln!("\n{}", "✓ Generation complete!".green().bold());
    if let Some(path) = output {
        eprintln!("  📄 {}", path.display());
    }

    Ok(())
}

fn print_summary(synthesis: &Synthesis) {
    let document = &synthesis.document;
    eprintln!("\n{}", "ORD Document:".bold());
    eprintln!("  Packages: {}", document.packages.len());
    eprintln!("  Groups: {}", document.groups.len());
    eprintln!("  API resources: {}", document.api_resources.len());
    eprintln!("  Event resources: {}", document.event_resources.len());
    eprintln!("  Entity types: {}", document.entity_types.len());
    eprintln!("  Data products: {}", document.data_products.len());
}

fn print_warnings(synthesis: &Synthesis) {
    if synthesis.warnings.is_empty() {
        return;
    }

    eprintln!("\n{}", "Diagnostics:".bold());
    for warning in &synthesis.warnings {
        match warning.severity() {
            Severity::Error => {
                eprintln!("  {} [{}] {}", "✗".red(), warning.code(), warning)
            }
            Severity::Warning => {
                eprintln!("  {} [{}] {}", "⚠".yellow(), warning.code(), warning)
            }
        }
    }
}

fn inspect_command(model_path: &Path, verbose: bool) -> Result<()> {
    println!("{} Inspecting model: {}", "→".cyan(), model_path.display());

    let graph = load_model(model_path)?;

    println!("\n{}", "✓ Load successful!".green().bold());
    println!("\n{}", "Definition Graph:".bold());
    println!(
        "  Namespace: {}",
        graph.namespace.as_deref().unwrap_or("(none)").yellow()
    );
    for (label, kind) in [
        ("Services", DefinitionKind::Service),
        ("Entities", DefinitionKind::Entity),
        ("Events", DefinitionKind::Event),
        ("Actions", DefinitionKind::Action),
        ("Functions", DefinitionKind::Function),
    ] {
        println!("  {}: {}", label, graph.of_kind(kind).count());
    }

    println!("\n{}", "Services:".bold());
    for service in graph.services() {
        println!("  • {}", service.name.cyan());

        let protocols = service
            .annotations
            .get_str_list(annotations::PROTOCOL)
            .map(|p| p.join(", "))
            .unwrap_or_else(|| "(inferred)".to_string());
        println!("    Protocols: {}", protocols);

        if let Some(visibility) = service.annotations.get_str(annotations::VISIBILITY) {
            println!("    Visibility: {}", visibility);
        }
        if service.annotations.is_set(annotations::EXTERNAL) {
            println!("    {}", "external".dimmed());
        }

        let entities = graph.owned_by(&service.name, DefinitionKind::Entity).count();
        let events = graph.owned_by(&service.name, DefinitionKind::Event).count();
        println!("    Entities: {}, Events: {}", entities, events);

        if verbose {
            for endpoint in &service.endpoints {
                println!(
                    "    Endpoint: {} {}",
                    endpoint.kind,
                    endpoint.path.as_deref().unwrap_or("-")
                );
            }
            for entity in graph.owned_by(&service.name, DefinitionKind::Entity) {
                println!(
                    "    - {} ({} relationships)",
                    entity.name,
                    entity.relationships.len()
                );
            }
        }
    }

    Ok(())
}

//! cwlview CLI - inspect the CWL workflows of a directory tree

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cwlview::node::field_text;
use cwlview::{
    Collection, CwlError, EntryStrategy, FixSuggestion, LocalRepository, Port, PortMap, RepoLocation, ViewerConfig,
    Workflow,
};

/// Local checkouts have a single revision: the working tree
const LOCAL_REVISION: &str = "HEAD";

#[derive(Parser)]
#[command(name = "cwlview")]
#[command(about = "Normalize and inspect CWL workflows in a directory tree")]
#[command(version)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the entry workflow
    Show {
        #[command(flatten)]
        load: LoadArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List every document in the collection
    Docs {
        #[command(flatten)]
        load: LoadArgs,
    },
}

#[derive(Args)]
struct LoadArgs {
    /// Directory containing workflow files (searched recursively)
    dir: PathBuf,

    /// Entry workflow selection: first, root
    #[arg(short, long)]
    entry: Option<EntryStrategy>,

    /// Extension of workflow files (default: cwl)
    #[arg(long)]
    extension: Option<String>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// GitHub tree URL inside the repository DIR is a clone of; its path
    /// selects the subdirectory and its branch pins the revision
    #[arg(short, long)]
    url: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Show { load, format } => show_workflow(&load, format),
        Commands::Docs { load } => list_documents(&load),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.downcast_ref::<CwlError>().and_then(|e| e.fix_suggestion()) {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

/// Logs go to stderr so JSON on stdout stays parseable
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_collection(args: &LoadArgs) -> anyhow::Result<Collection> {
    let mut config = match &args.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    }
    .with_env()?;

    if let Some(extension) = &args.extension {
        config = config.with_extension(extension.as_str())?;
    }
    if let Some(strategy) = args.entry {
        config.entry_strategy = strategy;
    }

    let (location, revision) = match &args.url {
        Some(url) => {
            let location = RepoLocation::from_url(url)?;
            let revision = location.branch.clone();
            (location, revision)
        }
        None => (RepoLocation::local(""), LOCAL_REVISION.to_string()),
    };

    let repo = LocalRepository::new(&args.dir);
    Collection::from_repository_with(&repo, &location, &revision, &config)
        .with_context(|| format!("Failed to load workflows from {}", repo.root().display()))
}

fn show_workflow(args: &LoadArgs, format: OutputFormat) -> anyhow::Result<()> {
    let collection = load_collection(args)?;
    let workflow = collection
        .get_workflow()
        .ok_or_else(|| anyhow!("No workflow found in {}", args.dir.display()))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&workflow)?),
        OutputFormat::Text => print_workflow(&workflow),
    }
    Ok(())
}

fn list_documents(args: &LoadArgs) -> anyhow::Result<()> {
    let collection = load_collection(args)?;
    let entry = collection.find_entry_workflow();

    for id in collection.document_ids() {
        let class = collection
            .document(id)
            .and_then(|doc| field_text(doc, "class"))
            .unwrap_or_else(|| "?".to_string());
        if Some(id) == entry {
            println!("{} {} ({})", "*".green().bold(), id.bold(), class);
        } else {
            println!("  {} ({})", id, class);
        }
    }
    println!(
        "{} documents, entry ({}): {}",
        collection.len(),
        collection.strategy(),
        entry.unwrap_or("(none)")
    );
    Ok(())
}

fn print_workflow(workflow: &Workflow) {
    println!("{} {}", "Workflow:".cyan().bold(), workflow.label.bold());
    if let Some(doc) = &workflow.doc {
        println!("  {}", doc.dimmed());
    }

    print_ports("Inputs", workflow.inputs.as_ref(), 0);
    print_ports("Outputs", workflow.outputs.as_ref(), 0);

    println!("{} ({})", "Steps".cyan().bold(), workflow.step_count());
    for (id, step) in workflow.steps.iter().flatten() {
        match &step.label {
            Some(label) => println!("  {} - {}", id.bold(), label),
            None => println!("  {}", id.bold()),
        }
        if let Some(types) = &step.types {
            println!("    type: {}", types);
        }
        print_ports("in", step.inputs.as_ref(), 4);
        print_ports("out", step.outputs.as_ref(), 4);
    }
}

fn print_ports(title: &str, ports: Option<&PortMap>, indent: usize) {
    let pad = " ".repeat(indent);
    let count = ports.map_or(0, |p| p.len());
    println!("{}{} ({})", pad, title.cyan(), count);
    for (id, port) in ports.into_iter().flatten() {
        println!("{}  {}", pad, describe_port(id, port));
    }
}

fn describe_port(id: &str, port: &Port) -> String {
    let mut line = id.to_string();
    if let Some(port_type) = &port.port_type {
        line.push_str(&format!(": {}", port_type));
    }
    if let Some(label) = &port.label {
        line.push_str(&format!(" \"{}\"", label));
    }
    if let Some(default) = &port.default_value {
        line.push_str(&format!(" = {}", default));
    }
    if !port.source_ids.is_empty() {
        line.push_str(&format!(" <- {}", port.source_ids.join(", ")));
    }
    line
}

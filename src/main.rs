//! Command-line walkthrough of the lending library.

use std::path::PathBuf;

use clap::Parser;
use lending_library::{
    LibraryConfig, LibraryVisualization,
    observers::{NotificationService, TransitionLogger},
    script::Script,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Run a lending-library scenario and print the resulting state
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON scenario script; the built-in walkthrough runs when omitted
    #[arg(long)]
    script: Option<PathBuf>,

    /// Print the final inventory snapshot as JSON
    #[arg(long)]
    json: bool,

    /// Print the final state as a Graphviz DOT graph
    #[arg(long)]
    dot: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match &cli.config {
        Some(path) => LibraryConfig::from_file(path)?,
        None => LibraryConfig::default(),
    };
    let script = match &cli.script {
        Some(path) => Script::from_file(path)?,
        None => Script::demo(),
    };

    let mut library = script.open_library(config)?;
    library.register_observer(Box::new(TransitionLogger));
    library.register_observer(Box::new(NotificationService));

    let outcomes = script.run(&mut library);
    let rejected = outcomes.iter().filter(|o| o.result.is_err()).count();
    info!(steps = outcomes.len(), rejected, "scenario finished");

    println!("{library}");
    print!("{}", LibraryVisualization::render_text(&library));
    println!("{}", LibraryVisualization::history_table(&library));

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&library.view_available_books())?);
    }
    if cli.dot {
        print!("{}", LibraryVisualization::generate_dot(&library));
    }

    Ok(())
}

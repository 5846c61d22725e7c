use anyhow::Context;
use artchive::commands::*;
use artchive::core::{
    config::Settings,
    error::ArtchiveError,
    output::print_error,
    store::PathStore,
};
use clap::{Parser, Subcommand};
use std::env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "artchive")]
#[command(about = "List a directory with entries colored by git status")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// File holding the selected directory (defaults to the user config directory)
    #[arg(long, global = true, value_name = "FILE")]
    store: Option<PathBuf>,

    /// Git binary used for status
    #[arg(long, global = true, value_name = "BIN")]
    git: Option<String>,

    /// Seconds to wait for a listing before giving up
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// Let every recompute publish, even when a newer one was requested
    #[arg(long, global = true)]
    no_coalesce: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the colored listing of the selected directory
    List {
        /// List this directory instead of the selected one (not persisted)
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or change the selected directory
    Dir {
        /// New directory to select
        path: Option<PathBuf>,
        /// Print the resulting listing as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show which color each status code gets
    Legend,
}

fn load_settings(cli: &Cli) -> Settings {
    let mut settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Using default settings: {e}");
            Settings::default()
        }
    };

    if let Some(git) = &cli.git {
        settings.git_binary = git.clone();
    }
    if let Some(timeout) = cli.timeout {
        settings.recompute_timeout_secs = timeout;
    }
    if cli.no_coalesce {
        settings.coalesce_recomputes = false;
    }
    settings
}

fn command_options(cli: &Cli) -> anyhow::Result<CommandOptions> {
    let store = match &cli.store {
        Some(file) => PathStore::with_file(file),
        None => PathStore::default_location().context("Cannot locate the directory store")?,
    };

    Ok(CommandOptions {
        settings: load_settings(cli),
        store,
    })
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Commands::Legend = cli.command {
        execute_legend();
        return Ok(());
    }

    let options = command_options(&cli)?;
    match cli.command {
        Commands::List { dir, json } => execute_list(&options, dir, json)?,
        Commands::Dir { path, json } => execute_dir(&options, path, json)?,
        Commands::Legend => execute_legend(),
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    if let Err(e) = run(cli) {
        match e.downcast_ref::<ArtchiveError>() {
            Some(ArtchiveError::NoDirectorySelected) => {
                print_error("No directory selected. Use: artchive dir <PATH>");
            }
            Some(err @ ArtchiveError::RecomputeTimedOut { .. }) => {
                print_error(&format!("{err}. Try again or raise --timeout"));
            }
            _ => print_error(&format!("{e:#}")),
        }
        std::process::exit(1);
    }
}

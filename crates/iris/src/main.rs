mod cli;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use iris_core::io::ReaderPath;
use iris_core::kernel::error::{Error, Result};
use iris_core::plugin_system::ReaderManager;
use iris_core::{Application, IrisConfig};
use log::{debug, error};

// --- Core plugins for static registration ---
use core_csv_reader::CsvReaderPlugin;
use core_image_reader::ImageReaderPlugin;

use crate::cli::LayerSummary;

const EXIT_FAILURE: u8 = 1;
const EXIT_NO_READER: u8 = 2;

/// Iris: open n-dimensional data through reader plugins
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Configuration file (JSON, TOML or YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open one or more paths and report the layers created
    Open {
        /// Paths or URLs to open
        #[arg(required = true)]
        paths: Vec<String>,
        /// Only ask this reader plugin
        #[arg(long)]
        plugin: Option<String>,
        /// Hand all paths to the reader as one stack
        #[arg(long)]
        stack: bool,
        /// Print layers as JSON
        #[arg(long)]
        json: bool,
    },
    /// Inspect reader plugins
    Plugins {
        #[command(subcommand)]
        command: PluginCommand,
    },
}

#[derive(Subcommand, Debug)]
enum PluginCommand {
    /// List registered plugins in call order
    List {
        #[arg(long)]
        json: bool,
    },
}

async fn build_app(config: IrisConfig) -> Result<Application> {
    let app = Application::with_config(config)?;
    app.register_plugin(Arc::new(ImageReaderPlugin::new())).await?;
    app.register_plugin(Arc::new(CsvReaderPlugin::new())).await?;
    debug!("Static core plugins registered");
    app.apply_plugin_settings().await?;
    Ok(app)
}

async fn run(app: &mut Application, command: Commands) -> Result<()> {
    match command {
        Commands::Open {
            paths,
            plugin,
            stack,
            json,
        } => {
            let mut options = app.default_open_options();
            options.plugin = plugin;
            options.stack |= stack;

            let path = match <[String; 1]>::try_from(paths) {
                Ok([single]) => ReaderPath::Single(single),
                Err(many) => ReaderPath::Many(many),
            };
            let added = app.viewer_mut().open_path(path, &options).await?;

            let layers = app.viewer().layers();
            let summaries: Vec<LayerSummary<'_>> = added
                .iter()
                .filter_map(|name| layers.get(name))
                .map(LayerSummary::from)
                .collect();
            cli::print_layers(&summaries, json).map_err(|e| Error::Other(e.to_string()))
        }
        Commands::Plugins {
            command: PluginCommand::List { json },
        } => {
            let infos = app.reader_manager().plugin_infos().await?;
            cli::print_plugins(&infos, json).map_err(|e| Error::Other(e.to_string()))
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config = match IrisConfig::load_or_default(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            logging::init(args.verbose, iris_core::kernel::constants::DEFAULT_LOG_LEVEL);
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::from(EXIT_FAILURE);
        }
    };
    logging::init(args.verbose, config.log_level());

    let mut app = match build_app(config).await {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Failed to initialize application: {}", e);
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    match run(&mut app, args.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::PluginSystem(e)) if e.is_no_reader() => {
            eprintln!("{}", e);
            ExitCode::from(EXIT_NO_READER)
        }
        Err(e) => {
            error!("Command failed: {:?}", e);
            eprintln!("{}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

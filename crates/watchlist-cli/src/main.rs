use clap::{ArgAction, Parser, Subcommand};
use commands::{config, lookup, shell};
use std::path::PathBuf;
use watchlist_config::{Config, PathManager};

mod commands;
mod logging;
mod output;
mod render;

#[derive(Parser)]
#[command(name = "watchlist")]
#[command(about = "Movie Watchlist - search OMDb and keep an ordered list of movies to watch")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive watchlist shell (default)
    #[command(long_about = "Start the interactive shell. Type a title to search, select a result to add it to the watchlist, and drag rows to reorder them. Type 'help' inside the shell for the command list.")]
    Shell,
    /// Search OMDb by title and list matching movies
    Search {
        /// Title to search for
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Show full details for one movie by IMDb identifier
    Show {
        /// IMDb identifier, e.g. tt1375666
        id: String,
    },
    /// View or change configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Update configuration values
    #[command(long_about = "Update configuration values and write them to the config file. Passing --api-key without a value prompts for it without echoing.")]
    Set {
        /// OMDb API key (prompted when given without a value)
        #[arg(long, value_name = "KEY", num_args = 0..=1, default_missing_value = "")]
        api_key: Option<String>,

        /// OMDb endpoint
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let paths = PathManager::default();
    let config_path = match cli.config {
        Some(path) => path,
        None => paths.config_file(),
    };
    let mut config = Config::load_or_default(&config_path)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_path.display(), e))?;
    if let Some(file) = config.logging.file.as_mut() {
        *file = paths.resolve_log_file(file.as_path());
    }

    logging::init_logging(cli.verbose, cli.quiet, &config.logging).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => shell::run_shell(&config, &output).await,
        Commands::Search { query } => lookup::run_search(&query.join(" "), &config, &output).await,
        Commands::Show { id } => lookup::run_show(&id, &config, &output).await,
        Commands::Config { cmd } => match cmd {
            ConfigCommands::Show { full } => config::show_config(&config, &config_path, full, &output),
            ConfigCommands::Set { api_key, base_url } => {
                config::set_config(config_path.as_path(), api_key, base_url, &output)
            }
        },
    }
}

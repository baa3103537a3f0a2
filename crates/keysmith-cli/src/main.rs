//! Keysmith CLI entrypoint.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod handlers;

use commands::{Commands, ConfigCommands};
use config::KeysmithConfig;

#[derive(Parser)]
#[command(name = "keysmith")]
#[command(author, version, about = "Keysmith license authorization tool", long_about = None)]
struct Cli {
    /// Configuration file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = match cli.config {
        Some(path) => path,
        None => KeysmithConfig::config_path()?,
    };
    let mut config = KeysmithConfig::load_from(&config_path)
        .map_err(|e| format!("load config {}: {e}", config_path.display()))?;

    match cli.command {
        Commands::Keygen { save, yes } => handlers::keygen(&mut config, &config_path, save, yes)?,
        Commands::Generate {
            hwid,
            version,
            edition,
            output_dir,
        } => handlers::generate(&config, &hwid, version, edition, output_dir)?,
        Commands::Verify { hwid, file } => handlers::verify(&config, &hwid, &file)?,
        Commands::PublicKey => handlers::public_key(&config)?,
        Commands::Config { command } => match command {
            ConfigCommands::Show => handlers::show_config(&config, &config_path),
            ConfigCommands::Set { key, value } => {
                handlers::set_config(&mut config, &config_path, &key, &value)?
            }
            ConfigCommands::Path => println!("{}", config_path.display()),
        },
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

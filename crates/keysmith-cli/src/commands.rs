//! CLI command definitions.

use clap::Subcommand;
use keysmith_licensing::Edition;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a new DSA key pair
    Keygen {
        /// Store the private key in the configuration file
        #[arg(long)]
        save: bool,

        /// Replace a stored key without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Build and write an authorization file
    Generate {
        /// Hardware id the licenses are bound to
        #[arg(long)]
        hwid: String,

        /// Major version to authorize
        #[arg(long)]
        version: u8,

        /// Edition of the primary license (suite, standard, intro, lite)
        #[arg(short, long, default_value = "suite")]
        edition: Edition,

        /// Directory to write the file into
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Check every record of an authorization file
    Verify {
        /// Hardware id the licenses should be bound to
        #[arg(long)]
        hwid: String,

        /// Authorization file to check
        file: PathBuf,
    },

    /// Print the public key of the configured private key
    PublicKey,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },

    /// Print the configuration file location
    Path,
}

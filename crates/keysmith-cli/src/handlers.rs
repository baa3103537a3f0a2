//! Command handlers.

use crate::config::KeysmithConfig;
use console::style;
use dialoguer::Confirm;
use keysmith_core::check_public_key_length;
use keysmith_dsa::{DEFAULT_MAX_ATTEMPTS, ParameterSizes, encode_private, encode_public};
use keysmith_licensing::{
    Edition, authorization_file_name, build, read_authorization_file, verify_batch,
    write_authorization_file,
};
use rand::rngs::OsRng;
use std::fmt::Display;
use std::path::{Path, PathBuf};

type HandlerResult = Result<(), Box<dyn std::error::Error>>;

/// Prefix an error with the stage that failed.
fn stage<E: Display>(name: &'static str) -> impl FnOnce(E) -> Box<dyn std::error::Error> {
    move |e| format!("{name}: {e}").into()
}

/// Generate a key pair and optionally store it.
pub fn keygen(
    config: &mut KeysmithConfig,
    config_path: &Path,
    save: bool,
    yes: bool,
) -> HandlerResult {
    println!(
        "{} Generating 1024-bit DSA parameters, this can take a while...",
        style("i").blue()
    );
    let key = keysmith_dsa::generate_key_pair(
        &mut OsRng,
        ParameterSizes::L1024_N160,
        DEFAULT_MAX_ATTEMPTS,
    )
    .map_err(stage("generate key"))?;

    let private_hex = encode_private(&key);
    println!("{} Generated key pair", style("✓").green());
    println!("\nPrivate key:\n{private_hex}");
    println!("\nPublic key:\n{}", encode_public(key.public_key()));

    if !save {
        return Ok(());
    }

    if config.private_key.is_some() && !yes {
        let replace = Confirm::new()
            .with_prompt("A private key is already configured. Replace it?")
            .default(false)
            .interact()?;
        if !replace {
            println!("{} Kept the existing key", style("!").yellow());
            return Ok(());
        }
    }

    config.private_key = Some(private_hex);
    config.save_to(config_path).map_err(stage("save config"))?;
    println!(
        "{} Saved private key to {}",
        style("✓").green(),
        config_path.display()
    );
    Ok(())
}

/// Build a batch for `hwid` and write it as an authorization file.
pub fn generate(
    config: &KeysmithConfig,
    hwid: &str,
    version: u8,
    edition: Edition,
    output_dir: Option<PathBuf>,
) -> HandlerResult {
    let file_name = authorization_file_name(edition, hwid).map_err(stage("check hardware id"))?;
    let key = config.private_key().map_err(stage("load private key"))?;

    println!(
        "Generating {} licenses for {}...",
        style(edition).bold(),
        style(hwid).bold()
    );
    let records = build(&key, hwid, edition.code(), u32::from(version), &mut OsRng)
        .map_err(stage("generate licenses"))?;

    let dir = output_dir
        .or_else(|| config.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let path = dir.join(file_name);
    write_authorization_file(&records, &path).map_err(stage("write authorization file"))?;

    println!(
        "{} Wrote {} records to {}",
        style("✓").green(),
        records.len(),
        path.display()
    );
    Ok(())
}

/// Verify an authorization file against the configured key.
pub fn verify(config: &KeysmithConfig, hwid: &str, file: &Path) -> HandlerResult {
    let key = config.private_key().map_err(stage("load private key"))?;
    let records = read_authorization_file(file).map_err(stage("read authorization file"))?;
    verify_batch(&records, key.public_key(), hwid).map_err(stage("verify"))?;

    println!(
        "{} {} records verify for {}",
        style("✓").green(),
        records.len(),
        style(hwid).bold()
    );
    Ok(())
}

/// Print the public key and compare its length with the original.
pub fn public_key(config: &KeysmithConfig) -> HandlerResult {
    let key = config.private_key().map_err(stage("load private key"))?;
    let public_hex = encode_public(key.public_key());
    println!("{public_hex}");

    match config.original_public_key.as_deref() {
        Some(original) => {
            check_public_key_length(&public_hex, original).map_err(stage("check public key"))?;
            println!(
                "{} Length matches the original public key ({} characters)",
                style("✓").green(),
                public_hex.len()
            );
        }
        None => println!(
            "{} No original_public_key configured, length not checked",
            style("i").blue()
        ),
    }
    Ok(())
}

/// Show configuration.
pub fn show_config(config: &KeysmithConfig, config_path: &Path) {
    println!("Current configuration:");
    println!(
        "  private_key: {}",
        if config.private_key.is_some() {
            "***"
        } else {
            "(not set)"
        }
    );
    println!(
        "  original_public_key: {}",
        config
            .original_public_key
            .as_ref()
            .map(|key| format!("{} characters", key.len()))
            .unwrap_or_else(|| "(not set)".to_string())
    );
    println!(
        "  output_dir: {}",
        config
            .output_dir
            .as_ref()
            .map(|dir| dir.display().to_string())
            .unwrap_or_else(|| "(not set)".to_string())
    );

    println!("\nConfig file: {}", config_path.display());
}

/// Set configuration.
pub fn set_config(
    config: &mut KeysmithConfig,
    config_path: &Path,
    key: &str,
    value: &str,
) -> HandlerResult {
    config.set(key, value)?;
    config.save_to(config_path)?;

    // never echo key material
    let shown = if key == "private_key" { "***" } else { value };
    println!("{} Set {} = {}", style("✓").green(), key, shown);
    Ok(())
}

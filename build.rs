//! Build script for the Spotify metadata provider.
//!
//! Copies the `.env.example` template into the plugin's local data directory,
//! next to the `.env` file the CLI reads at startup.

use std::{env, fs, path::PathBuf};

/// Copies `.env.example` from the crate root into the local data directory.
///
/// A missing template only produces a cargo warning. Failing to create the
/// target directory or write the file fails the build.
///
/// Target locations:
/// - Linux: `~/.local/share/spotube-plugin-spotify/.env.example`
/// - macOS: `~/Library/Application Support/spotube-plugin-spotify/.env.example`
/// - Windows: `%LOCALAPPDATA%/spotube-plugin-spotify/.env.example`
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let template = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("spotube-plugin-spotify");
    fs::create_dir_all(&out_dir)?;

    if template.is_file() {
        fs::copy(&template, out_dir.join(".env.example"))?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            template.display()
        );
    }

    Ok(())
}

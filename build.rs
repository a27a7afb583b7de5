//! Build script for the genrelists CLI.
//!
//! Copies the `.env.example` configuration template into the per-user data
//! directory so a fresh install has a template next to where the binary
//! looks for its `.env` file.

use std::{env, fs, path::PathBuf};

/// Copies `.env.example` from the crate root into `<data dir>/genrelists/`.
///
/// The data directory is resolved with `dirs::data_local_dir()`:
/// - Linux: `~/.local/share/genrelists/.env.example`
/// - macOS: `~/Library/Application Support/genrelists/.env.example`
/// - Windows: `%LOCALAPPDATA%/genrelists/.env.example`
///
/// Every failure is reported as a cargo warning instead of failing the
/// build, since sandboxed builds may not be able to write there.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    if !env_example_path.is_file() {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
        return Ok(());
    }

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("genrelists");

    let copied = fs::create_dir_all(&out_dir)
        .and_then(|_| fs::read_to_string(&env_example_path))
        .and_then(|contents| fs::write(out_dir.join(".env.example"), contents));

    if let Err(e) = copied {
        println!(
            "cargo:warning=could not copy .env.example to {}: {}",
            out_dir.display(),
            e
        );
    }

    Ok(())
}

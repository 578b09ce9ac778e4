//! Host-side helper: `cargo run` checks the project data, builds the WASM
//! bundle into `static/pkg`, and serves `static/` locally.
//! `cargo run -- check` only validates the data file.

use std::path::Path;
use std::process::Command;
use std::{env, fs};

use anyhow::{bail, Context, Result};
use portfolio_fx::project::ProjectCatalog;

const SITE_DIR: &str = "static";
const PKG_DIR: &str = "static/pkg";
const DATA_FILE: &str = "static/data/projects.json";
const PORT: &str = "8000";

fn check_data(path: &Path) -> Result<()> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let catalog = ProjectCatalog::from_json(&text).with_context(|| format!("parsing {}", path.display()))?;
    println!("{} project(s) in {}", catalog.projects().len(), path.display());
    for finding in catalog.audit() {
        eprintln!("warning: {finding}");
    }
    Ok(())
}

/// `wasm-pack` writes the bundle next to the pages so `static/` is servable
/// as-is. A missing `wasm-pack` only skips the step.
fn build_wasm() -> Result<()> {
    let status = match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", PKG_DIR])
        .status()
    {
        Ok(status) => status,
        Err(err) => {
            eprintln!("skipping bundle build, wasm-pack unavailable: {err}");
            return Ok(());
        }
    };
    if !status.success() {
        bail!("wasm-pack build failed ({status})");
    }
    Ok(())
}

/// Blocks until the server exits. Pages fetch `data/projects.json`, which
/// browsers refuse over `file://`, hence a real HTTP server.
fn serve() -> Result<()> {
    println!("serving {SITE_DIR} at http://127.0.0.1:{PORT}");
    let status = Command::new("python3")
        .args(["-m", "http.server", PORT, "--bind", "127.0.0.1", "--directory", SITE_DIR])
        .status()
        .context("starting python3 http.server")?;
    if !status.success() {
        bail!("http server exited with {status}");
    }
    Ok(())
}

fn main() -> Result<()> {
    check_data(Path::new(DATA_FILE))?;
    if env::args().nth(1).as_deref() == Some("check") {
        return Ok(());
    }
    build_wasm()?;
    serve()
}

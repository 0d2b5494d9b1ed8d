//! Workspace tasks: `cargo xtask schema` and `cargo xtask validate`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use eyeview::options::Options;
use eyeview::AnnotationRegistry;

#[derive(Parser)]
#[command(name = "xtask", about = "eyeview workspace tasks")]
struct Cli {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Write the options JSON schema (stdout when no path is given).
    Schema {
        /// Output file.
        out: Option<PathBuf>,
    },
    /// Check an annotation registry file and list its tour order.
    Validate {
        /// Registry TOML file.
        registry: PathBuf,
        /// Options preset to check alongside the registry.
        #[arg(long)]
        options: Option<PathBuf>,
    },
}

fn schema(out: Option<PathBuf>) -> Result<()> {
    let json = serde_json::to_string_pretty(&Options::json_schema())?;
    match out {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn validate(registry: &Path, options: Option<&Path>) -> Result<()> {
    let reg = AnnotationRegistry::load(registry)
        .with_context(|| format!("invalid registry {}", registry.display()))?;
    for a in reg.ordered() {
        println!("{:>3}  {:<16} {}", a.order, a.id, a.title);
    }
    println!("{} annotations OK", reg.len());

    if let Some(path) = options {
        let _ = Options::load(path)
            .with_context(|| format!("invalid options {}", path.display()))?;
        println!("options {} OK", path.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    match Cli::parse().task {
        Task::Schema { out } => schema(out),
        Task::Validate { registry, options } => {
            validate(&registry, options.as_deref())
        }
    }
}

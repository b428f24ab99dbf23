//! Command line driver for karaoke effect scripts
//!
//! Effect scripts are standalone executables that read a timed script and
//! write an effect script; `kara run` invokes one with the input and output
//! paths as its two arguments, so the same driver works for any effect
//! regardless of what it is written in. `kara info` prints a summary of a
//! script without running anything.

use std::path::PathBuf;
use std::process::Command;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser)]
#[command(name = "kara", version, about = "Karaoke effect generation for ASS subtitles")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an effect executable over a timed script
    Run {
        /// Effect executable to invoke
        effect: PathBuf,
        /// Timed input script
        input: PathBuf,
        /// Output path for the generated script
        output: PathBuf,
    },
    /// Print a summary of a script
    Info {
        /// Script to inspect
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    match Cli::parse().command {
        Commands::Run {
            effect,
            input,
            output,
        } => run_effect(&effect, &input, &output),
        Commands::Info { input } => info_script(&input),
    }
}

fn run_effect(effect: &PathBuf, input: &PathBuf, output: &PathBuf) -> Result<()> {
    // Validate the input before handing it to the effect.
    let doc = kara_io::load(input)
        .with_context(|| format!("loading `{}`", input.display()))?;
    info!(
        events = doc.events.len(),
        styles = doc.styles.len(),
        "input script loaded"
    );

    let status = Command::new(effect)
        .arg(input)
        .arg(output)
        .status()
        .with_context(|| format!("running `{}`", effect.display()))?;
    if !status.success() {
        bail!("effect `{}` exited with {status}", effect.display());
    }

    // Fail loudly when the effect produced something unparseable.
    let generated = kara_io::load(output)
        .with_context(|| format!("reading generated `{}`", output.display()))?;
    info!(
        events = generated.events.len(),
        "effect script generated"
    );
    Ok(())
}

fn info_script(input: &PathBuf) -> Result<()> {
    let doc = kara_io::load(input)
        .with_context(|| format!("loading `{}`", input.display()))?;
    let resolution = doc.effective_resolution();
    println!("Title:      {}", doc.metadata.title.as_deref().unwrap_or("-"));
    println!("Resolution: {}x{}", resolution.width, resolution.height);
    println!("Styles:     {}", doc.styles.len());
    let dialogues = doc.events.iter().filter(|e| !e.comment).count();
    let comments = doc.events.len() - dialogues;
    println!("Events:     {dialogues} dialogue, {comments} comment");
    if let Some(last) = doc.events.iter().map(|e| e.end).max() {
        println!("Length:     {last}");
    }
    Ok(())
}

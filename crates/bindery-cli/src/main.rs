// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bindery: combine images into a single multi-page PDF.
//
// Entry point. Initialises logging, resolves page settings, reads the images in
// argument order, and writes the assembled document.

mod input;
mod settings;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use bindery_core::BinderyError;
use bindery_core::human_errors::humanize_error;
use bindery_document::DocumentAssembler;
use bindery_document::pdf::reader::page_count;
use clap::Parser;
use tracing::info;

use settings::{Overrides, PaperArg};

#[derive(Parser, Debug)]
#[command(name = "bindery")]
#[command(author, version, about = "Combine images into one PDF, one page per image", long_about = None)]
struct Args {
    /// Images to bind, in page order
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// Output PDF file
    #[arg(short, long, default_value = "bindery.pdf")]
    output: PathBuf,

    /// Paper size
    #[arg(long, value_enum)]
    paper: Option<PaperArg>,

    /// Use landscape pages
    #[arg(long)]
    landscape: bool,

    /// Margin around each image, in points
    #[arg(long)]
    margin: Option<f32>,

    /// Title stored in the PDF metadata
    #[arg(long)]
    title: Option<String>,

    /// JSON settings file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read the written PDF back and check its page count
    #[arg(long)]
    verify: bool,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<BinderyError>() {
                Some(bindery_err) => {
                    let human = humanize_error(bindery_err);
                    eprintln!("{}\n{}", human.message, human.suggestion);
                }
                None => eprintln!("error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let overrides = Overrides {
        paper: args.paper.map(Into::into),
        landscape: args.landscape,
        margin: args.margin,
        title: args.title,
    };
    let config = settings::resolve(args.config.as_deref(), overrides)?;
    let assembler = DocumentAssembler::new(config)?;

    let items = input::load_items(&args.images).await?;
    info!(images = items.len(), "Images loaded");

    let doc = assembler.assemble_async(items).await?;

    tokio::fs::write(&args.output, &doc.bytes)
        .await
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!(
        pages = doc.page_count(),
        bytes = doc.bytes.len(),
        "Wrote {}",
        args.output.display()
    );

    if args.verify {
        let written = tokio::fs::read(&args.output)
            .await
            .with_context(|| format!("Failed to re-read {}", args.output.display()))?;
        let pages = page_count(&written)?;
        anyhow::ensure!(
            pages == doc.page_count(),
            "{} has {pages} pages, expected {}",
            args.output.display(),
            doc.page_count()
        );
        info!(pages, "Verified");
    }

    Ok(())
}

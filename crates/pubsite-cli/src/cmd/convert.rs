//! Convert subcommand - publication table to publication document

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use pubsite_core::{finish_stage, SharedProgress};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Publication table exported as CSV (header row first)
    pub input: PathBuf,

    /// Output JSON path (default: the configured source path)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: ConvertArgs, config: &Config, progress: &SharedProgress) -> Result<()> {
    let output = args
        .output
        .unwrap_or_else(|| config.source.path.clone());

    let pb = progress.stage_line("convert");
    pb.set_message(args.input.display().to_string());
    let result = pubsite_convert::convert_file(&args.input, &output);
    finish_stage(&pb, "done");
    let document = result?;

    progress.println(format!(
        "{} journal papers, {} proceedings → {}",
        document.counts.journal,
        document.counts.proceedings,
        output.display()
    ));
    Ok(())
}

//! pubsite - publication lists for the lab site
//!
//! Loads the publication document, renders both collapsible lists into a
//! page skeleton and reports what a visitor would see. Also converts the
//! publication table into that document.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "pubsite")]
#[command(about = "Publication lists for the lab site")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ./pubsite.toml or ~/.config/pubsite/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Load the publication document and show the rendered lists
    Show(cmd::show::ShowArgs),
    /// Convert a publication table (CSV) into the publication document
    Convert(cmd::convert::ConvertArgs),
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let progress = Arc::new(pubsite_core::ProgressContext::new());

    // Logging:
    //   TTY:     quiet (warn) unless --debug, spinners show activity
    //   non-TTY: info unless --debug, logs are the only progress indicator
    let is_tty = progress.is_tty();
    let multi = if is_tty { Some(progress.multi()) } else { None };
    let quiet = if is_tty { !cli.debug } else { false };
    pubsite_core::init_logging(quiet, cli.debug, multi);

    let config = if let Some(path) = cli.config {
        Config::from_file(&path)?
    } else {
        Config::load()?
    };

    match cli.command {
        Command::Show(args) => cmd::show::run(args, &config, &progress),
        Command::Convert(args) => cmd::convert::run(args, &config, &progress),
        Command::Config => {
            print_config(&config);
            Ok(())
        }
    }
}

fn print_config(config: &Config) {
    use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table};

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Setting").fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);

    table.add_row(vec!["Source".to_string(), config.source().to_string()]);
    let pipeline = config.pipeline();
    for bucket in pubsite_core::Bucket::ALL {
        let list = pipeline.for_bucket(bucket);
        table.add_row(vec![
            format!("{bucket} anchors"),
            format!("#{} / #{}", list.container_id, list.toggle_id),
        ]);
        table.add_row(vec![
            format!("{bucket} initial show"),
            list.initial_show.to_string(),
        ]);
        table.add_row(vec![
            format!("{bucket} labels"),
            format!("{:?} / {:?}", list.collapsed_label, list.expanded_label),
        ]);
    }

    eprintln!("\n{table}");
}

//! Show subcommand - render the publication lists and report the result

use anyhow::Result;
use clap::{Args, ValueEnum};
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table};

use pubsite_core::{
    finish_stage, load_and_render, Bucket, Document, NodeId, PipelineConfig, PipelineReport,
    SharedProgress, Source, SHARED_RUNTIME,
};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Document URL or path (overrides config)
    #[arg(short, long)]
    pub source: Option<String>,

    /// Activate a list's toggle after rendering (repeatable)
    #[arg(short, long, value_enum)]
    pub expand: Vec<BucketArg>,

    /// Leave an anchor id out of the page skeleton (repeatable)
    #[arg(long)]
    pub omit: Vec<String>,

    /// Print the render report as JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Copy, ValueEnum, Debug)]
pub enum BucketArg {
    Journal,
    Proceedings,
}

impl From<BucketArg> for Bucket {
    fn from(b: BucketArg) -> Self {
        match b {
            BucketArg::Journal => Bucket::Journal,
            BucketArg::Proceedings => Bucket::Proceedings,
        }
    }
}

pub fn run(args: ShowArgs, config: &Config, progress: &SharedProgress) -> Result<()> {
    let source = args
        .source
        .as_deref()
        .map(Source::parse)
        .unwrap_or_else(|| config.source());
    let pipeline = config.pipeline();

    let anchors: Vec<&str> = pipeline
        .anchor_ids()
        .into_iter()
        .filter(|id| !args.omit.iter().any(|o| o.as_str() == *id))
        .collect();
    let mut doc = Document::with_anchors(&anchors);

    let pb = progress.stage_line("load");
    pb.set_message(source.to_string());
    let (_, report) = SHARED_RUNTIME.block_on(load_and_render(&mut doc, &source, &pipeline));
    finish_stage(&pb, "done");

    for bucket in args.expand.into_iter().map(Bucket::from) {
        expand(&mut doc, &pipeline, bucket);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_lists(&doc, &pipeline, &report);
    }
    Ok(())
}

fn expand(doc: &mut Document, pipeline: &PipelineConfig, bucket: Bucket) {
    let toggle_id = &pipeline.for_bucket(bucket).toggle_id;
    let Some(toggle) = doc.get_element_by_id(toggle_id) else {
        log::warn!("{bucket}: toggle #{toggle_id} not on page");
        return;
    };
    if doc.activate(toggle) {
        log::debug!("{bucket}: toggled #{toggle_id}");
    } else {
        log::warn!("{bucket}: nothing to expand");
    }
}

/// Text of the first descendant of `item` with `class`.
fn field(doc: &Document, item: NodeId, class: &str) -> String {
    doc.elements_by_class(item, class)
        .first()
        .map(|&n| doc.text_content(n))
        .unwrap_or_default()
}

fn print_lists(doc: &Document, pipeline: &PipelineConfig, report: &PipelineReport) {
    if let Some(err) = &report.load_error {
        eprintln!("publications unavailable: {err}");
    }

    for bucket in Bucket::ALL {
        let list = pipeline.for_bucket(bucket);
        let Some(container) = doc.get_element_by_id(&list.container_id) else {
            eprintln!("\n{bucket}: #{} not on page", list.container_id);
            continue;
        };

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_header(vec![
                Cell::new("#").fg(Color::Cyan),
                Cell::new("Year").fg(Color::Cyan),
                Cell::new("Title").fg(Color::Cyan),
                Cell::new("Authors").fg(Color::Cyan),
                Cell::new("Venue").fg(Color::Cyan),
                Cell::new("Shown").fg(Color::Cyan),
            ]);
        for (i, &item) in doc.children(container).iter().enumerate() {
            let shown = doc.is_displayed(item);
            table.add_row(vec![
                Cell::new(i + 1),
                Cell::new(field(doc, item, "pub-year")),
                Cell::new(field(doc, item, "pub-title")),
                Cell::new(field(doc, item, "pub-authors")),
                Cell::new(field(doc, item, "pub-venue")),
                Cell::new(if shown { "yes" } else { "-" }).fg(if shown {
                    Color::Green
                } else {
                    Color::DarkGrey
                }),
            ]);
        }

        let toggle = match doc.get_element_by_id(&list.toggle_id) {
            Some(t) if doc.is_displayed(t) => format!("[{}]", doc.text_content(t)),
            Some(_) => "hidden".to_string(),
            None => "missing".to_string(),
        };
        eprintln!(
            "\n{bucket} ({} items, toggle: {toggle})\n{table}",
            report.outcome(bucket).total()
        );
    }
}

//! Publication pipeline: load → partition → sort → render each bucket.

use serde::Serialize;

use crate::disclosure::{self, DisclosureConfig, RenderOutcome};
use crate::dom::Document;
use crate::fetch::{load_collection, Source};
use crate::ordering::{Bucket, Buckets};
use crate::publication::PublicationCollection;

/// Rendering configuration for both buckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineConfig {
    pub journal: DisclosureConfig,
    pub proceedings: DisclosureConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            journal: DisclosureConfig::journal(),
            proceedings: DisclosureConfig::proceedings(),
        }
    }
}

impl PipelineConfig {
    pub fn for_bucket(&self, bucket: Bucket) -> &DisclosureConfig {
        match bucket {
            Bucket::Journal => &self.journal,
            Bucket::Proceedings => &self.proceedings,
        }
    }

    /// Every anchor id the page is expected to provide.
    pub fn anchor_ids(&self) -> Vec<&str> {
        Bucket::ALL
            .iter()
            .flat_map(|&b| {
                let c = self.for_bucket(b);
                [c.container_id.as_str(), c.toggle_id.as_str()]
            })
            .collect()
    }
}

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    pub journal: RenderOutcome,
    pub proceedings: RenderOutcome,
    /// Set when loading failed and both buckets were rendered empty
    pub load_error: Option<String>,
}

impl PipelineReport {
    pub fn outcome(&self, bucket: Bucket) -> RenderOutcome {
        match bucket {
            Bucket::Journal => self.journal,
            Bucket::Proceedings => self.proceedings,
        }
    }
}

/// Sort both buckets and render them, journal first.
pub fn render_publications(
    doc: &mut Document,
    config: &PipelineConfig,
    collection: PublicationCollection,
) -> (Buckets, PipelineReport) {
    let buckets = Buckets::partition(collection);
    log::info!(
        "rendering {} journal papers, {} proceedings",
        buckets.journal.len(),
        buckets.proceedings.len()
    );

    let journal = disclosure::render(doc, &config.journal, &buckets.journal);
    log::debug!("journal: {journal:?}");
    let proceedings = disclosure::render(doc, &config.proceedings, &buckets.proceedings);
    log::debug!("proceedings: {proceedings:?}");

    let report = PipelineReport {
        journal,
        proceedings,
        load_error: None,
    };
    (buckets, report)
}

/// Load the document and render it. A load failure is logged and the
/// publication section renders empty; it never propagates.
pub async fn load_and_render(
    doc: &mut Document,
    source: &Source,
    config: &PipelineConfig,
) -> (Buckets, PipelineReport) {
    match load_collection(source).await {
        Ok(collection) => render_publications(doc, config, collection),
        Err(e) => {
            log::error!("failed to load publications from {source}: {e}");
            let (buckets, mut report) =
                render_publications(doc, config, PublicationCollection::default());
            report.load_error = Some(e.to_string());
            (buckets, report)
        }
    }
}

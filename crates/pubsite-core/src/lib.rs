//! pubsite core - publication lists with show-more disclosure
//!
//! Loads a publication document, sorts it into journal and proceedings
//! buckets and renders each bucket as a collapsible list into an in-memory
//! page document.

pub mod disclosure;
pub mod dom;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod ordering;
pub mod pipeline;
pub mod progress;
pub mod publication;

// Re-exports for convenience
pub use disclosure::{render, DisclosureConfig, DisclosureItem, DisclosureState, RenderOutcome};
pub use dom::{ActivationHandler, Document, NodeId};
pub use error::LoadError;
pub use fetch::{http_client, load_collection, Source, SHARED_RUNTIME};
pub use logging::{init_logging, IndicatifLogger};
pub use ordering::{compare, sort_bucket, Bucket, Buckets};
pub use pipeline::{load_and_render, render_publications, PipelineConfig, PipelineReport};
pub use progress::{finish_stage, ProgressContext, SharedProgress};
pub use publication::{Publication, PublicationCollection};

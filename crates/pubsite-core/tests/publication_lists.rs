//! End-to-end behaviour of the publication lists: document in, page out.

use pubsite_core::{
    render_publications, Bucket, DisclosureConfig, DisclosureState, Document, PipelineConfig,
    PublicationCollection, RenderOutcome,
};
use serde_json::json;

fn config(initial_show: usize) -> PipelineConfig {
    PipelineConfig {
        journal: DisclosureConfig::journal().with_initial_show(initial_show),
        proceedings: DisclosureConfig::proceedings().with_initial_show(initial_show),
    }
}

fn page(config: &PipelineConfig) -> Document {
    Document::with_anchors(&config.anchor_ids())
}

/// Titles of displayed items in `container`, in page order.
fn displayed_titles(doc: &Document, container: &str) -> Vec<String> {
    let list = doc.get_element_by_id(container).unwrap();
    doc.children(list)
        .iter()
        .filter(|&&li| doc.is_displayed(li))
        .map(|&li| doc.text_content(doc.elements_by_class(li, "pub-title")[0]))
        .collect()
}

fn all_titles(doc: &Document, container: &str) -> Vec<String> {
    let list = doc.get_element_by_id(container).unwrap();
    doc.elements_by_class(list, "pub-title")
        .into_iter()
        .map(|n| doc.text_content(n))
        .collect()
}

#[test]
fn worked_example() {
    let collection = PublicationCollection::from_value(&json!({
        "journal_papers": [
            {"title": "B", "year": 2023, "within_year_order": 1},
            {"title": "A", "year": 2024, "within_year_order": 0},
            {"title": "C", "year": 2023, "within_year_order": 0}
        ]
    }));
    let config = config(2);
    let mut doc = page(&config);
    let (_, report) = render_publications(&mut doc, &config, collection);

    assert_eq!(
        report.outcome(Bucket::Journal),
        RenderOutcome::Collapsible {
            total: 3,
            visible: 2
        }
    );
    assert_eq!(all_titles(&doc, "journal-list"), ["A", "C", "B"]);
    assert_eq!(displayed_titles(&doc, "journal-list"), ["A", "C"]);

    let toggle = doc.get_element_by_id("journal-toggle").unwrap();
    assert!(doc.is_displayed(toggle));
    assert_eq!(doc.text_content(toggle), "Show More");

    doc.activate(toggle);
    assert_eq!(displayed_titles(&doc, "journal-list"), ["A", "C", "B"]);
    assert_eq!(doc.text_content(toggle), "Show Less");

    // proceedings absent from the document: empty list, hidden toggle
    assert_eq!(report.proceedings, RenderOutcome::AllShown { total: 0 });
    let p_toggle = doc.get_element_by_id("proceedings-toggle").unwrap();
    assert!(doc.is_hidden(p_toggle));
}

#[test]
fn toggle_parity() {
    let entries: Vec<_> = (0..7)
        .map(|i| json!({"title": format!("T{i}"), "year": 2000 + i}))
        .collect();
    let collection = PublicationCollection::from_value(&json!({ "proceedings": entries }));
    let config = config(3);
    let mut doc = page(&config);
    render_publications(&mut doc, &config, collection);

    let toggle = doc.get_element_by_id("proceedings-toggle").unwrap();
    let initial = displayed_titles(&doc, "proceedings-list");
    let initial_label = doc.text_content(toggle);
    assert_eq!(initial.len(), 3);

    for n in 1..=6 {
        doc.activate(toggle);
        let shown = displayed_titles(&doc, "proceedings-list");
        let expanded = doc
            .handler_state::<DisclosureState>(toggle)
            .unwrap()
            .is_expanded();
        if n % 2 == 0 {
            assert_eq!(shown, initial);
            assert_eq!(doc.text_content(toggle), initial_label);
            assert!(!expanded);
        } else {
            assert_eq!(shown.len(), 7);
            assert_eq!(doc.text_content(toggle), "Show Less");
            assert!(expanded);
        }
    }
}

#[test]
fn partition_is_complete_and_disjoint() {
    let collection = PublicationCollection::from_value(&json!({
        "journal_papers": [
            {"title": "J-a", "year": 2020},
            {"title": "J-b"},
            {"title": "J-a", "year": 2020}
        ],
        "proceedings": [
            {"title": "P-a", "year": 2018},
            "garbage"
        ]
    }));
    let config = config(10);
    let mut doc = page(&config);
    render_publications(&mut doc, &config, collection);

    assert_eq!(all_titles(&doc, "journal-list"), ["J-a", "J-a", "J-b"]);
    assert_eq!(all_titles(&doc, "proceedings-list"), ["P-a", ""]);
}

#[test]
fn rerender_after_reload_is_idempotent() {
    let doc_json = json!({
        "journal_papers": (0..4).map(|i| json!({"title": format!("J{i}"), "year": 2020})).collect::<Vec<_>>()
    });
    let config = config(2);
    let mut doc = page(&config);
    for _ in 0..3 {
        render_publications(&mut doc, &config, PublicationCollection::from_value(&doc_json));
    }
    assert_eq!(all_titles(&doc, "journal-list").len(), 4);

    let toggle = doc.get_element_by_id("journal-toggle").unwrap();
    doc.activate(toggle);
    assert_eq!(displayed_titles(&doc, "journal-list").len(), 4);
}

#[test]
fn malformed_document_renders_empty_section() {
    let config = config(2);
    let mut doc = page(&config);
    let collection = PublicationCollection::from_value(&json!(["not", "an", "object"]));
    let (_, report) = render_publications(&mut doc, &config, collection);
    assert_eq!(report.journal, RenderOutcome::AllShown { total: 0 });
    assert_eq!(report.proceedings, RenderOutcome::AllShown { total: 0 });
}

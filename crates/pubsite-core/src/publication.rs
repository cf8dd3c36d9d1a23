//! Publication data model and lenient document decoding.
//!
//! The publication document is produced by an offline tool and trusted, but
//! the page must survive a partially broken file. Decoding therefore never
//! fails on shape: wrong types fall back to defaults and missing buckets are
//! empty. Only bytes that are not JSON at all produce an error.

use serde::Serialize;
use serde_json::{Map, Value};

/// JSON key of the journal bucket.
pub const JOURNAL_KEY: &str = "journal_papers";
/// JSON key of the proceedings bucket.
pub const PROCEEDINGS_KEY: &str = "proceedings";

/// One described work.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Publication {
    pub title: String,
    pub authors: String,
    /// May already carry impact-factor annotations, e.g. `Energy 12 (IF 6.9, Top 4.95%)`
    pub venue: String,
    /// 0 when absent or non-numeric
    pub year: i64,
    /// Lower value = more recent within the same year
    pub within_year_order: i64,
}

impl Publication {
    /// Decode one entry. Non-object values become an all-default entry so that
    /// every input position is still accounted for.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };
        Self {
            title: text_field(obj, "title"),
            authors: text_field(obj, "authors"),
            venue: text_field(obj, "venue"),
            year: int_field(obj, "year"),
            within_year_order: int_field(obj, "within_year_order"),
        }
    }
}

/// The fetched top-level document: two independent buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PublicationCollection {
    pub journal_papers: Vec<Publication>,
    pub proceedings: Vec<Publication>,
}

impl PublicationCollection {
    /// Decode raw bytes. Errors only when the bytes are not valid JSON.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_slice(bytes)?;
        Ok(Self::from_value(&value))
    }

    /// Decode an already-parsed JSON value. Never fails.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            log::warn!("publication document is not a JSON object, treating as empty");
            return Self::default();
        };
        Self {
            journal_papers: bucket_field(obj, JOURNAL_KEY),
            proceedings: bucket_field(obj, PROCEEDINGS_KEY),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.journal_papers.is_empty() && self.proceedings.is_empty()
    }
}

fn bucket_field(obj: &Map<String, Value>, key: &str) -> Vec<Publication> {
    match obj.get(key) {
        Some(Value::Array(entries)) => entries.iter().map(Publication::from_value).collect(),
        None | Some(Value::Null) => Vec::new(),
        Some(_) => {
            log::warn!("`{key}` is not an array, treating as empty");
            Vec::new()
        }
    }
}

fn text_field(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Integers pass through, floats truncate, numeric strings parse; anything else is 0.
fn int_field(obj: &Map<String, Value>, key: &str) -> i64 {
    match obj.get(key) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite())
                        .map(|f| f as i64)
                })
                .unwrap_or(0)
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_entry() {
        let p = Publication::from_value(&json!({
            "title": "Heat pumps",
            "authors": "Kim, Lee",
            "venue": "Energy 12 (IF 6.9, Top 4.95%)",
            "year": 2024,
            "within_year_order": 2
        }));
        assert_eq!(p.title, "Heat pumps");
        assert_eq!(p.authors, "Kim, Lee");
        assert_eq!(p.venue, "Energy 12 (IF 6.9, Top 4.95%)");
        assert_eq!(p.year, 2024);
        assert_eq!(p.within_year_order, 2);
    }

    #[test]
    fn missing_fields_default() {
        let p = Publication::from_value(&json!({}));
        assert_eq!(p, Publication::default());
    }

    #[test]
    fn null_year_is_zero() {
        let p = Publication::from_value(&json!({"title": "x", "year": null}));
        assert_eq!(p.year, 0);
    }

    #[test]
    fn non_numeric_year_is_zero() {
        let p = Publication::from_value(&json!({"year": "unknown", "within_year_order": true}));
        assert_eq!(p.year, 0);
        assert_eq!(p.within_year_order, 0);
    }

    #[test]
    fn numeric_string_year_parses() {
        let p = Publication::from_value(&json!({"year": " 2021 "}));
        assert_eq!(p.year, 2021);
    }

    #[test]
    fn float_year_truncates() {
        let p = Publication::from_value(&json!({"year": 2020.0, "within_year_order": 1.7}));
        assert_eq!(p.year, 2020);
        assert_eq!(p.within_year_order, 1);
    }

    #[test]
    fn non_object_entry_is_default() {
        assert_eq!(Publication::from_value(&json!("oops")), Publication::default());
        assert_eq!(Publication::from_value(&Value::Null), Publication::default());
    }

    #[test]
    fn collection_buckets() {
        let c = PublicationCollection::from_value(&json!({
            "journal_papers": [{"title": "J1"}, {"title": "J2"}],
            "proceedings": [{"title": "P1"}],
            "counts": {"journal": 2, "proceedings": 1}
        }));
        assert_eq!(c.journal_papers.len(), 2);
        assert_eq!(c.proceedings.len(), 1);
        assert_eq!(c.proceedings[0].title, "P1");
    }

    #[test]
    fn collection_missing_bucket_is_empty() {
        let c = PublicationCollection::from_value(&json!({"journal_papers": [{}]}));
        assert_eq!(c.journal_papers.len(), 1);
        assert!(c.proceedings.is_empty());
    }

    #[test]
    fn collection_wrong_shapes_are_empty() {
        assert!(PublicationCollection::from_value(&json!([1, 2, 3])).is_empty());
        assert!(PublicationCollection::from_value(&json!("text")).is_empty());
        let c = PublicationCollection::from_value(&json!({
            "journal_papers": {"title": "not a list"},
            "proceedings": 7
        }));
        assert!(c.is_empty());
    }

    #[test]
    fn from_slice_rejects_non_json() {
        assert!(PublicationCollection::from_slice(b"<html>404</html>").is_err());
    }

    #[test]
    fn from_slice_accepts_empty_object() {
        let c = PublicationCollection::from_slice(b"{}").unwrap();
        assert!(c.is_empty());
    }
}

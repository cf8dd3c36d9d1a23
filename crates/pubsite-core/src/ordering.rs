//! Sort and partition of publications into display buckets.

use std::cmp::Ordering;

use serde::Serialize;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::publication::{Publication, PublicationCollection, JOURNAL_KEY, PROCEEDINGS_KEY};

/// A top-level publication category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Journal,
    Proceedings,
}

impl Bucket {
    /// Render order: journal first, then proceedings.
    pub const ALL: [Bucket; 2] = [Bucket::Journal, Bucket::Proceedings];

    /// JSON key in the publication document
    pub fn key(self) -> &'static str {
        match self {
            Self::Journal => JOURNAL_KEY,
            Self::Proceedings => PROCEEDINGS_KEY,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Journal => "Journal",
            Self::Proceedings => "Proceedings",
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Total order over publications.
///
/// Year descending, then `within_year_order` ascending, then title. Authors and
/// venue break any remaining tie so the result never depends on input order.
pub fn compare(a: &Publication, b: &Publication) -> Ordering {
    b.year
        .cmp(&a.year)
        .then_with(|| a.within_year_order.cmp(&b.within_year_order))
        .then_with(|| compare_text(&a.title, &b.title))
        .then_with(|| compare_text(&a.authors, &b.authors))
        .then_with(|| compare_text(&a.venue, &b.venue))
}

/// Accent- and case-insensitive comparison, then case-folded, then code points.
///
/// Approximates a locale collation closely enough for titles: `"apple"` and
/// `"Banana"` order alphabetically, and `"Émissions"` sorts among the `e`s.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(collation_key(b))
        .then_with(|| case_folded(a).cmp(case_folded(b)))
        .then_with(|| a.cmp(b))
}

/// NFD with combining marks removed, lowercased.
fn collation_key(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|&c| !is_combining_mark(c))
        .flat_map(char::to_lowercase)
}

fn case_folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

/// Sort one bucket in place.
pub fn sort_bucket(items: &mut [Publication]) {
    items.sort_by(compare);
}

/// Both buckets, each sorted by [`compare`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Buckets {
    pub journal: Vec<Publication>,
    pub proceedings: Vec<Publication>,
}

impl Buckets {
    /// Split the collection into its two buckets and sort each independently.
    ///
    /// Entries are never moved between buckets or deduplicated.
    pub fn partition(collection: PublicationCollection) -> Self {
        let PublicationCollection {
            mut journal_papers,
            mut proceedings,
        } = collection;
        sort_bucket(&mut journal_papers);
        sort_bucket(&mut proceedings);
        Self {
            journal: journal_papers,
            proceedings,
        }
    }

    pub fn get(&self, bucket: Bucket) -> &[Publication] {
        match bucket {
            Bucket::Journal => &self.journal,
            Bucket::Proceedings => &self.proceedings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(title: &str, year: i64, order: i64) -> Publication {
        Publication {
            title: title.to_string(),
            year,
            within_year_order: order,
            ..Default::default()
        }
    }

    fn titles(items: &[Publication]) -> Vec<&str> {
        items.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn year_descending() {
        let mut items = vec![p("old", 2019, 0), p("new", 2024, 0), p("mid", 2021, 0)];
        sort_bucket(&mut items);
        assert_eq!(titles(&items), ["new", "mid", "old"]);
    }

    #[test]
    fn within_year_order_ascending() {
        let mut items = vec![p("B", 2023, 1), p("A", 2024, 0), p("C", 2023, 0)];
        sort_bucket(&mut items);
        assert_eq!(titles(&items), ["A", "C", "B"]);
    }

    #[test]
    fn title_breaks_tie() {
        let mut items = vec![p("zeta", 2022, 0), p("Alpha", 2022, 0), p("beta", 2022, 0)];
        sort_bucket(&mut items);
        assert_eq!(titles(&items), ["Alpha", "beta", "zeta"]);
    }

    #[test]
    fn missing_year_sorts_last() {
        let mut items = vec![p("undated", 0, 0), p("dated", 1999, 5)];
        sort_bucket(&mut items);
        assert_eq!(titles(&items), ["dated", "undated"]);
    }

    #[test]
    fn order_independent_of_input() {
        let base = vec![
            p("a", 2020, 1),
            p("b", 2020, 1),
            p("c", 2021, 0),
            p("d", 0, 0),
            Publication {
                authors: "Z".into(),
                ..p("a", 2020, 1)
            },
        ];
        let mut forward = base.clone();
        let mut reversed: Vec<_> = base.into_iter().rev().collect();
        sort_bucket(&mut forward);
        sort_bucket(&mut reversed);
        assert_eq!(forward, reversed);
    }

    #[test]
    fn compare_text_case_folds_first() {
        assert_eq!(compare_text("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_text("Same", "Same"), Ordering::Equal);
        assert_ne!(compare_text("same", "Same"), Ordering::Equal);
    }

    #[test]
    fn accented_titles_sort_with_their_base_letter() {
        let mut items = vec![
            p("Zeolite filters", 2023, 0),
            p("Émissions indoor", 2023, 0),
            p("Fans", 2023, 0),
        ];
        sort_bucket(&mut items);
        assert_eq!(titles(&items), ["Émissions indoor", "Fans", "Zeolite filters"]);
    }

    #[test]
    fn accent_only_difference_stays_total() {
        assert_eq!(compare_text("resume", "résumé"), Ordering::Less);
        assert_eq!(compare_text("résumé", "resume"), Ordering::Greater);
        assert_eq!(compare_text("résumé", "résumé"), Ordering::Equal);
        // decomposed and precomposed forms are still told apart
        assert_ne!(compare_text("e\u{301}", "\u{e9}"), Ordering::Equal);
    }

    #[test]
    fn partition_keeps_buckets_apart() {
        let collection = PublicationCollection {
            journal_papers: vec![p("j-old", 2020, 0), p("j-new", 2023, 0)],
            proceedings: vec![p("c1", 2022, 1), p("c0", 2022, 0), p("c1", 2022, 1)],
        };
        let buckets = Buckets::partition(collection);
        assert_eq!(titles(buckets.get(Bucket::Journal)), ["j-new", "j-old"]);
        // duplicates are preserved, not merged
        assert_eq!(titles(buckets.get(Bucket::Proceedings)), ["c0", "c1", "c1"]);
    }

    #[test]
    fn bucket_keys() {
        assert_eq!(Bucket::Journal.key(), "journal_papers");
        assert_eq!(Bucket::Proceedings.key(), "proceedings");
        assert_eq!(Bucket::ALL[0], Bucket::Journal);
    }
}

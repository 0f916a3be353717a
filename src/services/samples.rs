// src/services/samples.rs

//! Built-in sample catalog.
//!
//! The fallback source for any category whose live scrape yields
//! nothing. Unknown slugs resolve to the fiction list, so a refresh
//! cycle always has something to commit for every configured category.

use crate::models::{BookRecord, Provenance};

/// Source label attached to fallback records.
pub const SAMPLE_SOURCE: &str = "builtin-samples";

type SampleEntry = (&'static str, &'static str, f64, f64);

const FICTION: &[SampleEntry] = &[
    ("The Thursday Murder Club", "Richard Osman", 8.99, 4.5),
    ("The Midnight Library", "Matt Haig", 7.49, 4.7),
    ("Where the Crawdads Sing", "Delia Owens", 6.99, 4.8),
];

const SCIENCE: &[SampleEntry] = &[
    ("A Brief History of Time", "Stephen Hawking", 15.99, 4.7),
    ("Cosmos", "Carl Sagan", 14.99, 4.8),
];

const HISTORY: &[SampleEntry] = &[(
    "Sapiens: A Brief History of Humankind",
    "Yuval Noah Harari",
    18.50,
    4.8,
)];

const TECHNOLOGY: &[SampleEntry] =
    &[("The Pragmatic Programmer", "David Thomas", 32.99, 4.6)];

/// Return the sample records for a category, stamped with the requested
/// slug. Never empty.
pub fn sample_books(slug: &str) -> Vec<BookRecord> {
    let entries = match slug {
        "fiction" => FICTION,
        "science" => SCIENCE,
        "history" => HISTORY,
        "technology" => TECHNOLOGY,
        // Unknown categories borrow the fiction list.
        _ => FICTION,
    };

    entries
        .iter()
        .enumerate()
        .map(|(i, &(title, author, price, rating))| BookRecord {
            id: format!("{}-{}", slug, i + 1),
            title: title.to_string(),
            author: author.to_string(),
            price,
            rating,
            category: slug.to_string(),
            description: None,
            provenance: Provenance::Sample,
            source: SAMPLE_SOURCE.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories_have_samples() {
        for slug in ["fiction", "science", "history", "technology"] {
            let books = sample_books(slug);
            assert!(!books.is_empty());
            assert!(books.iter().all(|b| b.category == slug));
            assert!(books.iter().all(|b| b.provenance == Provenance::Sample));
        }
    }

    #[test]
    fn unknown_slug_falls_back_to_fiction_titles() {
        let books = sample_books("poetry");
        assert_eq!(books.len(), FICTION.len());
        assert_eq!(books[0].title, "The Thursday Murder Club");
        // Records are stamped with the requested slug, not "fiction".
        assert!(books.iter().all(|b| b.category == "poetry"));
        assert_eq!(books[0].id, "poetry-1");
    }

    #[test]
    fn fiction_list_matches_catalog_order() {
        let books = sample_books("fiction");
        let titles: Vec<_> = books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "The Thursday Murder Club",
                "The Midnight Library",
                "Where the Crawdads Sing",
            ]
        );
    }
}

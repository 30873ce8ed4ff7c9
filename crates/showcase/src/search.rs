//! Catalogue search.
//!
//! The search form offers one query box and a category selector; the query
//! is title-cased (names are stored that way in the data set) and matched
//! exactly against the registered entities. A hit redirects the front end
//! to the matching tag listing, so all this module resolves is the name.

use catalogue::MemoryRepository;

/// What kind of tagged entity a query refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchCategory {
    Actor,
    Director,
    Genre,
}

/// Resolve a free-text query to the registered entity name it matches, or
/// `None` when the catalogue has no such entity.
pub fn resolve(query: &str, category: SearchCategory, repo: &MemoryRepository) -> Option<String> {
    let name = title_case(query.trim());
    let found = match category {
        SearchCategory::Actor => repo.get_actors().iter().any(|a| a.name() == name),
        SearchCategory::Director => repo.get_directors().iter().any(|d| d.name() == name),
        SearchCategory::Genre => repo.get_genres().iter().any(|g| g.name() == name),
    };
    found.then_some(name)
}

pub fn search_exists(query: &str, category: SearchCategory, repo: &MemoryRepository) -> bool {
    resolve(query, category, repo).is_some()
}

/// Title-case a query: the first letter of every alphabetic run is
/// upper-cased, the rest lowered, so "sci-fi" becomes "Sci-Fi" and
/// "james gunn" becomes "James Gunn".
pub fn title_case(query: &str) -> String {
    let mut result = String::with_capacity(query.len());
    let mut at_word_start = true;
    for ch in query.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                result.extend(ch.to_uppercase());
            } else {
                result.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            result.push(ch);
            at_word_start = true;
        }
    }
    result
}

//! Duplicate-title bookkeeping for one conversion run.

use std::collections::HashMap;

use owo_colors::OwoColorize;

/// Tracks every title published so far and rewrites collisions.
///
/// The WordPress importer refuses a post whose title and post date match an
/// already-imported post, ignoring time of day. This tool assigns no post
/// dates, so every record in a run lands on the import date and a repeated
/// title would be dropped silently. Colliding titles get a " (n)" suffix
/// instead; the rename can be undone in the WordPress editor afterwards.
#[derive(Debug, Default)]
pub struct TitleRegistry {
    used: HashMap<String, u32>,
    collided: bool,
}

impl TitleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `candidate` and return the title to publish under.
    ///
    /// A fresh title comes back unchanged. A repeat gets the original
    /// candidate's occurrence count appended, and if that decorated string
    /// is itself taken (the source data may already contain "Title (2)"),
    /// the count keeps climbing until a free string is found.
    pub fn resolve(&mut self, candidate: String) -> String {
        if !self.used.contains_key(&candidate) {
            self.used.insert(candidate.clone(), 1);
            return candidate;
        }
        loop {
            let count = self.used.get(&candidate).copied().unwrap_or(1) + 1;
            self.used.insert(candidate.clone(), count);
            let decorated = format!("{candidate} ({count})");
            if !self.used.contains_key(&decorated) {
                eprintln!(
                    "{} \"{}\" renamed to \"{}\"",
                    "duplicate title".yellow(),
                    candidate,
                    decorated
                );
                self.used.insert(decorated.clone(), 1);
                self.collided = true;
                return decorated;
            }
        }
    }

    /// Whether any title was renamed during this run.
    pub fn had_collisions(&self) -> bool {
        self.collided
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn repeated_titles_get_numbered() {
        let mut registry = TitleRegistry::new();
        assert_eq!(registry.resolve("A".into()), "A");
        assert_eq!(registry.resolve("A".into()), "A (2)");
        assert_eq!(registry.resolve("A".into()), "A (3)");
        assert!(registry.had_collisions());
    }

    #[test]
    fn fresh_titles_pass_through() {
        let mut registry = TitleRegistry::new();
        assert_eq!(registry.resolve("A".into()), "A");
        assert_eq!(registry.resolve("B".into()), "B");
        assert!(!registry.had_collisions());
    }

    #[test]
    fn skips_over_a_decoration_already_in_use() {
        let mut registry = TitleRegistry::new();
        assert_eq!(registry.resolve("A".into()), "A");
        assert_eq!(registry.resolve("A (2)".into()), "A (2)");
        assert_eq!(registry.resolve("A".into()), "A (3)");
        assert_eq!(registry.resolve("A".into()), "A (4)");
    }

    #[test]
    fn resolved_titles_are_pairwise_distinct() {
        proptest::proptest!(|(titles in proptest::collection::vec("[A-C ()0-9]{0,6}", 0..40))| {
            let mut registry = TitleRegistry::new();
            let resolved: Vec<String> = titles
                .into_iter()
                .map(|t| registry.resolve(t))
                .collect();
            let unique: HashSet<&String> = resolved.iter().collect();
            proptest::prop_assert_eq!(unique.len(), resolved.len());
        })
    }
}

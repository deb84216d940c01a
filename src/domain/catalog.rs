//! Entities, predicates and the ordered question catalog.

use std::hash::Hash;

/// A uniquely named record the decision tree tells apart.
pub trait Entity: Sync {
    fn name(&self) -> &str;
}

/// Pure yes/no question over an entity.
///
/// Implementations must be total: a missing field answers `false`.
/// Identity (`Eq` + `Hash`) is what keeps a question from being asked twice on one branch.
pub trait Predicate<E: ?Sized>: Clone + Eq + Hash + Send + Sync {
    fn test(&self, entity: &E) -> bool;
}

/// A predicate paired with its human-readable question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry<P> {
    pub predicate: P,
    pub label: String,
}

impl<P> CatalogEntry<P> {
    pub fn new(predicate: P, label: impl Into<String>) -> Self {
        Self {
            predicate,
            label: label.into(),
        }
    }
}

/// Ordered question catalog. Order decides ties between equally good questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog<P> {
    entries: Vec<CatalogEntry<P>>,
}

impl<P> Default for Catalog<P> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<P: Eq> Catalog<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry unless its predicate is already present.
    ///
    /// Returns `false` when the entry was dropped as a duplicate.
    pub fn push(&mut self, entry: CatalogEntry<P>) -> bool {
        if self.entries.iter().any(|e| e.predicate == entry.predicate) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub fn contains(&self, predicate: &P) -> bool {
        self.entries.iter().any(|e| &e.predicate == predicate)
    }
}

impl<P> Catalog<P> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CatalogEntry<P>] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry<P>> {
        self.entries.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }
}

impl<P: Eq> FromIterator<CatalogEntry<P>> for Catalog<P> {
    fn from_iter<I: IntoIterator<Item = CatalogEntry<P>>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for entry in iter {
            catalog.push(entry);
        }
        catalog
    }
}

impl<P: Eq> Extend<CatalogEntry<P>> for Catalog<P> {
    fn extend<I: IntoIterator<Item = CatalogEntry<P>>>(&mut self, iter: I) {
        for entry in iter {
            self.push(entry);
        }
    }
}

impl<'a, P> IntoIterator for &'a Catalog<P> {
    type Item = &'a CatalogEntry<P>;
    type IntoIter = std::slice::Iter<'a, CatalogEntry<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_duplicate_predicate_when_pushing_then_keeps_first_label() {
        let mut catalog = Catalog::new();
        assert!(catalog.push(CatalogEntry::new(1u8, "first")));
        assert!(!catalog.push(CatalogEntry::new(1u8, "second")));
        assert!(catalog.push(CatalogEntry::new(2u8, "first")));

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.labels().collect::<Vec<_>>(), vec!["first", "first"]);
    }

    #[test]
    fn given_entries_when_collecting_then_preserves_order() {
        let catalog: Catalog<u8> = [3u8, 1, 2]
            .into_iter()
            .map(|n| CatalogEntry::new(n, format!("q{n}")))
            .collect();

        let order: Vec<u8> = catalog.iter().map(|e| e.predicate).collect();
        assert_eq!(order, vec![3, 1, 2]);
        assert!(catalog.contains(&2));
        assert!(!catalog.contains(&4));
    }
}

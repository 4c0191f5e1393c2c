//! Selection set.

use crate::element::ElementId;
use std::collections::BTreeSet;

/// Unique, order-irrelevant set of selected element ids.
///
/// An empty set means nothing is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<ElementId>,
}

impl SelectionSet {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection holding exactly one id.
    pub fn single(id: ElementId) -> Self {
        Self {
            ids: BTreeSet::from([id]),
        }
    }

    /// Whether the id is selected.
    pub fn contains(&self, id: &ElementId) -> bool {
        self.ids.contains(id)
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of selected ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Selected ids in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &ElementId> {
        self.ids.iter()
    }

    /// Selected ids collected in sorted order.
    pub fn to_vec(&self) -> Vec<ElementId> {
        self.ids.iter().copied().collect()
    }

    /// Replace the whole set.
    pub fn replace<I: IntoIterator<Item = ElementId>>(&mut self, ids: I) {
        self.ids = ids.into_iter().collect();
    }

    /// Returns false if the id was already selected.
    pub fn insert(&mut self, id: ElementId) -> bool {
        self.ids.insert(id)
    }

    /// Returns false if the id was not selected.
    pub fn remove(&mut self, id: &ElementId) -> bool {
        self.ids.remove(id)
    }

    /// Flip membership; returns whether the id is selected afterwards.
    pub fn toggle(&mut self, id: ElementId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

impl FromIterator<ElementId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = ElementId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_deduplicates() {
        let id = ElementId::new();
        let mut selection = SelectionSet::new();
        selection.replace([id, id, id]);
        assert_eq!(selection.len(), 1);
        assert!(selection.contains(&id));
    }

    #[test]
    fn test_toggle_and_clear() {
        let id = ElementId::new();
        let mut selection = SelectionSet::new();
        assert!(selection.toggle(id));
        assert!(!selection.toggle(id));
        assert!(selection.is_empty());

        selection.insert(id);
        selection.clear();
        assert!(selection.is_empty());
    }
}

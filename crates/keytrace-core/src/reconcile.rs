//! Keyed reconciliation of drawn elements
//!
//! A renderer keeps the elements it has materialized in a [`Scene`]. Each
//! redraw describes the full desired element set; [`reconcile`] diffs it
//! against the scene by key so only added, changed and removed elements
//! are touched.

use std::collections::BTreeMap;

/// Difference between a desired element set and the materialized one
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation<K, V> {
    /// Keys only in the desired set, in desired order
    pub added: Vec<(K, V)>,
    /// Keys in both whose value changed, in desired order
    pub updated: Vec<(K, V)>,
    /// Keys only in the materialized set
    pub removed: Vec<K>,
}

impl<K, V> Reconciliation<K, V> {
    /// Check if applying this would change nothing
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }

    /// Number of element operations
    pub fn len(&self) -> usize {
        self.added.len() + self.updated.len() + self.removed.len()
    }
}

/// Diff `desired` against `materialized` by key
///
/// When a key repeats in `desired` the last entry wins.
pub fn reconcile<K, V>(desired: &[(K, V)], materialized: &BTreeMap<K, V>) -> Reconciliation<K, V>
where
    K: Ord + Clone,
    V: PartialEq + Clone,
{
    let mut wanted: BTreeMap<&K, &V> = BTreeMap::new();
    let mut order: Vec<&K> = Vec::with_capacity(desired.len());
    for (key, value) in desired {
        if wanted.insert(key, value).is_none() {
            order.push(key);
        }
    }

    let mut added = Vec::new();
    let mut updated = Vec::new();
    for key in order {
        let value = wanted[key];
        match materialized.get(key) {
            None => added.push((key.clone(), value.clone())),
            Some(current) if current != value => updated.push((key.clone(), value.clone())),
            Some(_) => {}
        }
    }

    let removed = materialized
        .keys()
        .filter(|key| !wanted.contains_key(key))
        .cloned()
        .collect();

    Reconciliation {
        added,
        updated,
        removed,
    }
}

/// Materialized elements keyed for reconciliation
#[derive(Debug, Clone, PartialEq)]
pub struct Scene<K, V> {
    elements: BTreeMap<K, V>,
}

impl<K: Ord, V> Default for Scene<K, V> {
    fn default() -> Self {
        Self {
            elements: BTreeMap::new(),
        }
    }
}

impl<K, V> Scene<K, V>
where
    K: Ord + Clone,
    V: PartialEq + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a reconciliation produced against this scene
    pub fn apply(&mut self, reconciliation: &Reconciliation<K, V>) {
        for key in &reconciliation.removed {
            self.elements.remove(key);
        }
        for (key, value) in reconciliation
            .added
            .iter()
            .chain(reconciliation.updated.iter())
        {
            self.elements.insert(key.clone(), value.clone());
        }
    }

    /// Reconcile with `desired`, apply, and return what changed
    pub fn sync(&mut self, desired: &[(K, V)]) -> Reconciliation<K, V> {
        let reconciliation = reconcile(desired, &self.elements);
        self.apply(&reconciliation);
        reconciliation
    }

    /// Remove everything, returning the removed keys
    pub fn clear(&mut self) -> Vec<K> {
        let keys = self.elements.keys().cloned().collect();
        self.elements.clear();
        keys
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.elements.get(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.elements.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.elements.iter()
    }
}

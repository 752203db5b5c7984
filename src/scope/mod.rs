//! Scope builder (C4): walks the ancestry leaf-first, emitting scope
//! contributions per construct. First insertion wins — nearer scopes
//! shadow outer ones.

mod builder;
mod item;

pub use builder::try_node_scope;
pub use item::ScopeItem;

use std::collections::HashMap;

/// Insertion-ordered `identifier -> ScopeItem` map. Iteration order is the
/// order bindings were discovered during the ancestry walk, i.e. nearest
/// binding first (spec invariant 2).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeScope {
    order: Vec<String>,
    items: HashMap<String, ScopeItem>,
}

impl NodeScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Inserts `item` under `key` only if `key` isn't already bound —
    /// nearer (earlier-visited) bindings always win.
    pub fn insert_if_absent(&mut self, key: impl Into<String>, item: ScopeItem) {
        let key = key.into();
        if !self.items.contains_key(&key) {
            self.order.push(key.clone());
            self.items.insert(key, item);
        }
    }

    pub fn get(&self, key: &str) -> Option<&ScopeItem> {
        self.items.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    pub fn keys_in_order(&self) -> &[String] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScopeItem)> {
        self.order.iter().map(move |k| (k.as_str(), &self.items[k]))
    }
}

//! Per-kind component storage

use crate::ecs::component::{Component, ComponentKey, ComponentKind};
use crate::foundation::collections::OrderedList;

/// Owns every live component, one insertion-ordered list per kind
///
/// Systems traverse a kind's list in attach order; the generational keys
/// hand stale-detection to the underlying [`OrderedList`].
pub struct ComponentStore {
    lists: [OrderedList<ComponentKey, Component>; ComponentKind::COUNT],
}

impl ComponentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            lists: std::array::from_fn(|_| OrderedList::new()),
        }
    }

    /// Append a component to its kind's list
    pub fn insert(&mut self, component: Component) -> ComponentKey {
        let kind = component.payload.kind();
        self.lists[kind.index()].push_back(component)
    }

    /// Borrow a component by kind and key
    pub fn get(&self, kind: ComponentKind, key: ComponentKey) -> Option<&Component> {
        self.lists[kind.index()].get(key)
    }

    /// Mutably borrow a component by kind and key
    pub fn get_mut(&mut self, kind: ComponentKind, key: ComponentKey) -> Option<&mut Component> {
        self.lists[kind.index()].get_mut(key)
    }

    /// Remove a component, handing its value back
    pub fn take(&mut self, kind: ComponentKind, key: ComponentKey) -> Option<Component> {
        self.lists[kind.index()].take(key)
    }

    /// Whether `key` refers to a live component of `kind`
    pub fn contains(&self, kind: ComponentKind, key: ComponentKey) -> bool {
        self.lists[kind.index()].contains(key)
    }

    /// Number of live components of `kind`
    pub fn len(&self, kind: ComponentKind) -> usize {
        self.lists[kind.index()].len()
    }

    /// Whether no components of any kind are stored
    pub fn is_empty(&self) -> bool {
        ComponentKind::ALL.iter().all(|kind| self.len(*kind) == 0)
    }

    /// Snapshot of a kind's keys in attach order
    ///
    /// Traversals iterate the snapshot and revalidate each key at use, so
    /// hooks may freely add or remove components mid-pass.
    pub fn keys(&self, kind: ComponentKind) -> Vec<ComponentKey> {
        self.lists[kind.index()].keys().collect()
    }
}

impl Default for ComponentStore {
    fn default() -> Self {
        Self::new()
    }
}

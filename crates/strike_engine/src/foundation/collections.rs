//! Specialized collection types

pub use slotmap::{new_key_type, Key, SlotMap};

/// Intrusive link node stored in the backing arena
struct Node<K: Key, T> {
    value: T,
    prev: Option<K>,
    next: Option<K>,
}

/// Insertion-ordered sequence with stable generational handles
///
/// Elements live in a slot map arena and are threaded onto a doubly-linked
/// list, giving O(1) removal by key while preserving insertion order. Keys
/// are generational: once an element is removed its key goes stale and never
/// dereferences a replacement value.
///
/// `remove` returns the key of the *next* element in order, so a traversal
/// that removes its current element can continue without skipping or
/// revisiting a neighbor. This is the backbone of the entity registry and
/// of every per-kind component store.
pub struct OrderedList<K: Key, T> {
    nodes: SlotMap<K, Node<K, T>>,
    head: Option<K>,
    tail: Option<K>,
}

impl<K: Key, T> OrderedList<K, T> {
    /// Create an empty list
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            head: None,
            tail: None,
        }
    }

    /// Number of live elements
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the list holds no elements
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a value, returning its stable key
    pub fn push_back(&mut self, value: T) -> K {
        let prev_tail = self.tail;
        let key = self.nodes.insert(Node {
            value,
            prev: prev_tail,
            next: None,
        });
        match prev_tail {
            Some(tail) => self.nodes[tail].next = Some(key),
            None => self.head = Some(key),
        }
        self.tail = Some(key);
        key
    }

    /// Remove and return the oldest element
    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.head?;
        self.take(head)
    }

    /// Key of the oldest element
    pub fn front_key(&self) -> Option<K> {
        self.head
    }

    /// Key of the element following `key` in insertion order
    pub fn next_key(&self, key: K) -> Option<K> {
        self.nodes.get(key)?.next
    }

    /// Whether `key` refers to a live element
    pub fn contains(&self, key: K) -> bool {
        self.nodes.contains_key(key)
    }

    /// Borrow the element behind `key`, if it is still live
    pub fn get(&self, key: K) -> Option<&T> {
        self.nodes.get(key).map(|node| &node.value)
    }

    /// Mutably borrow the element behind `key`, if it is still live
    pub fn get_mut(&mut self, key: K) -> Option<&mut T> {
        self.nodes.get_mut(key).map(|node| &mut node.value)
    }

    /// Remove the element behind `key`, returning its successor's key
    ///
    /// Returns `None` when the key is stale or the removed element was the
    /// last in order. Stale keys are a no-op.
    pub fn remove(&mut self, key: K) -> Option<K> {
        self.unlink(key).and_then(|(_, next)| next)
    }

    /// Remove the element behind `key` and hand its value back
    pub fn take(&mut self, key: K) -> Option<T> {
        self.unlink(key).map(|(value, _)| value)
    }

    /// Drop every element; all outstanding keys go stale
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    /// Iterate keys and values in insertion order
    pub fn iter(&self) -> Iter<'_, K, T> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    /// Iterate keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.iter().map(|(key, _)| key)
    }

    fn unlink(&mut self, key: K) -> Option<(T, Option<K>)> {
        let node = self.nodes.remove(key)?;
        match node.prev {
            Some(prev) => self.nodes[prev].next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self.nodes[next].prev = node.prev,
            None => self.tail = node.prev,
        }
        Some((node.value, node.next))
    }
}

impl<K: Key, T> Default for OrderedList<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered iterator over an [`OrderedList`]
pub struct Iter<'a, K: Key, T> {
    list: &'a OrderedList<K, T>,
    cursor: Option<K>,
}

impl<'a, K: Key, T> Iterator for Iter<'a, K, T> {
    type Item = (K, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.cursor?;
        let node = self.list.nodes.get(key)?;
        self.cursor = node.next;
        Some((key, &node.value))
    }
}

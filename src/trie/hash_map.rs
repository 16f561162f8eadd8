use std::collections::HashMap;

use super::Trie;

/// Uncompressed character trie with `HashMap` children.
pub struct HashMapTrie<T> {
    root: Node<T>,
    len: usize,
}

struct Node<T> {
    value: Option<T>,
    children: HashMap<char, Node<T>>,
}

impl<T> Node<T> {
    fn new() -> Self {
        Self {
            value: None,
            children: HashMap::new(),
        }
    }
}

impl<T> HashMapTrie<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Node::new(),
            len: 0,
        }
    }

    fn node(&self, key: &str) -> Option<&Node<T>> {
        key.chars()
            .try_fold(&self.root, |node, c| node.children.get(&c))
    }
}

impl<T> Default for HashMapTrie<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + Sync> Trie<T> for HashMapTrie<T> {
    fn put(&mut self, key: &str, value: T) -> Option<T> {
        let node = key.chars().fold(&mut self.root, |node, c| {
            node.children.entry(c).or_insert_with(Node::new)
        });
        let previous = node.value.replace(value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    fn get(&self, key: &str) -> Option<&T> {
        self.node(key).and_then(|node| node.value.as_ref())
    }

    fn prefix(&self, path: &str) -> Option<&T> {
        let mut node = &self.root;
        let mut deepest = node.value.as_ref();
        for c in path.chars() {
            let Some(child) = node.children.get(&c) else {
                break;
            };
            node = child;
            if let Some(value) = node.value.as_ref() {
                deepest = Some(value);
            }
        }
        deepest
    }

    fn len(&self) -> usize {
        self.len
    }
}

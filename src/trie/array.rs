use super::Trie;

/// Uncompressed byte trie; children kept sorted by byte and searched
/// with binary search. Denser than [`HashMapTrie`](super::HashMapTrie)
/// for the narrow fan-out typical of URL paths.
pub struct ArrayTrie<T> {
    root: Node<T>,
    len: usize,
}

struct Node<T> {
    byte: u8,
    value: Option<T>,
    children: Vec<Node<T>>,
}

impl<T> Node<T> {
    const fn new(byte: u8) -> Self {
        Self {
            byte,
            value: None,
            children: Vec::new(),
        }
    }

    fn child(&self, byte: u8) -> Option<&Self> {
        self.children
            .binary_search_by_key(&byte, |child| child.byte)
            .ok()
            .map(|idx| &self.children[idx])
    }

    fn child_or_insert(&mut self, byte: u8) -> &mut Self {
        let idx = match self.children.binary_search_by_key(&byte, |child| child.byte) {
            Ok(idx) => idx,
            Err(idx) => {
                self.children.insert(idx, Self::new(byte));
                idx
            }
        };
        &mut self.children[idx]
    }
}

impl<T> ArrayTrie<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: Node::new(0),
            len: 0,
        }
    }
}

impl<T> Default for ArrayTrie<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + Sync> Trie<T> for ArrayTrie<T> {
    fn put(&mut self, key: &str, value: T) -> Option<T> {
        let node = key
            .bytes()
            .fold(&mut self.root, |node, byte| node.child_or_insert(byte));
        let previous = node.value.replace(value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    fn get(&self, key: &str) -> Option<&T> {
        key.bytes()
            .try_fold(&self.root, |node, byte| node.child(byte))
            .and_then(|node| node.value.as_ref())
    }

    fn prefix(&self, path: &str) -> Option<&T> {
        let mut node = &self.root;
        let mut deepest = node.value.as_ref();
        for byte in path.bytes() {
            let Some(child) = node.child(byte) else {
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

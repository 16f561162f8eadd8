use super::Trie;

/// Compressed (radix) trie over bytes.
///
/// Each edge carries a non-empty byte label; siblings are sorted by the
/// first byte of their label, so descending one level is a binary
/// search plus a label comparison. Edges are split on insertion when a
/// new key diverges inside an existing label.
pub struct RadixTrie<T> {
    root: Node<T>,
    len: usize,
}

struct Node<T> {
    label: Vec<u8>,
    value: Option<T>,
    children: Vec<Node<T>>,
}

impl<T> Node<T> {
    const fn new(label: Vec<u8>, value: Option<T>) -> Self {
        Self {
            label,
            value,
            children: Vec::new(),
        }
    }

    fn child_index(&self, first: u8) -> Result<usize, usize> {
        self.children
            .binary_search_by_key(&first, |child| child.label[0])
    }

    /// Split this edge so that its label is exactly `label[..at]`.
    fn split(&mut self, at: usize) {
        let suffix = self.label.split_off(at);
        let tail = Self {
            label: suffix,
            value: self.value.take(),
            children: std::mem::take(&mut self.children),
        };
        self.children.push(tail);
    }

    /// Walk `key` down from this node. Returns the node reached after
    /// consuming the whole key, if the key ends on a node boundary.
    fn find(&self, key: &[u8]) -> Option<&Self> {
        let mut node = self;
        let mut rest = key;
        while let Some(&first) = rest.first() {
            let idx = node.child_index(first).ok()?;
            let child = &node.children[idx];
            rest = rest.strip_prefix(child.label.as_slice())?;
            node = child;
        }
        Some(node)
    }
}

fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

impl<T> RadixTrie<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: Node::new(Vec::new(), None),
            len: 0,
        }
    }
}

impl<T> Default for RadixTrie<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + Sync> Trie<T> for RadixTrie<T> {
    fn put(&mut self, key: &str, value: T) -> Option<T> {
        let mut node = &mut self.root;
        let mut rest = key.as_bytes();

        while let Some(&first) = rest.first() {
            match node.child_index(first) {
                Ok(idx) => {
                    let child = &mut node.children[idx];
                    let common = common_prefix_len(&child.label, rest);
                    if common < child.label.len() {
                        child.split(common);
                    }
                    rest = &rest[common..];
                    node = child;
                }
                Err(idx) => {
                    node.children
                        .insert(idx, Node::new(rest.to_vec(), Some(value)));
                    self.len += 1;
                    return None;
                }
            }
        }

        let previous = node.value.replace(value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    fn get(&self, key: &str) -> Option<&T> {
        self.root
            .find(key.as_bytes())
            .and_then(|node| node.value.as_ref())
    }

    fn prefix(&self, path: &str) -> Option<&T> {
        let mut node = &self.root;
        let mut deepest = node.value.as_ref();
        let mut rest = path.as_bytes();

        while let Some(&first) = rest.first() {
            let Ok(idx) = node.child_index(first) else {
                break;
            };
            let child = &node.children[idx];
            let Some(remaining) = rest.strip_prefix(child.label.as_slice()) else {
                break;
            };
            rest = remaining;
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

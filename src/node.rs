use std::collections::HashMap;

/// Single-level wildcard label: matches exactly one segment at its depth.
pub const WILDCARD: &str = "*";

/// Suffix wildcard label: matches its segment and everything deeper.
pub const SUFFIX_WILDCARD: &str = "**";

/// One node of the domain tree.
///
/// A node owns its children outright, so the tree is a strict hierarchy with
/// no sharing between branches. `value` is set only when a stored key
/// terminates here; intermediate nodes carry `None`.
#[derive(Debug, Clone)]
pub(crate) struct Node<V> {
    pub(crate) value: Option<V>,
    pub(crate) children: HashMap<String, Node<V>>,
}

impl<V> Node<V> {
    pub(crate) fn new() -> Self {
        Self {
            value: None,
            children: HashMap::new(),
        }
    }

    /// Resolve `segments` to the best match, consuming them right to left.
    ///
    /// Precedence at every depth is exact, then `*`, then `**`. An exact or
    /// `*` child consumes one segment and keeps matching deeper; `**` ends
    /// the match immediately with its own value, no matter how many segments
    /// remain. At the last segment the first child present wins outright,
    /// even when it holds no value.
    pub(crate) fn lookup(&self, segments: &[&str]) -> Option<&V> {
        let (seg, rest) = segments.split_last()?;

        if rest.is_empty() {
            for label in [*seg, WILDCARD, SUFFIX_WILDCARD] {
                if let Some(child) = self.children.get(label) {
                    return child.value.as_ref();
                }
            }
            return None;
        }

        if let Some(child) = self.children.get(*seg) {
            if let Some(found) = child.lookup(rest) {
                return Some(found);
            }
        }

        if let Some(child) = self.children.get(WILDCARD) {
            if let Some(found) = child.lookup(rest) {
                return Some(found);
            }
        }

        if let Some(child) = self.children.get(SUFFIX_WILDCARD) {
            return child.value.as_ref();
        }

        None
    }

    /// Number of value-bearing nodes in this subtree.
    pub(crate) fn count_values(&self) -> usize {
        usize::from(self.value.is_some())
            + self.children.values().map(Node::count_values).sum::<usize>()
    }
}

impl<V: Clone> Node<V> {
    /// Insert `value` at the path described by `segments`.
    ///
    /// The walk consumes segments right to left, so the rightmost segment
    /// (the top-level domain component) lands nearest the root and the
    /// leftmost, most specific segment terminates the path. Intermediate
    /// nodes are created on demand and never removed.
    ///
    /// When the terminal segment is a wildcard, the node owning the wildcard
    /// child also takes the value. Lookup reads that node's own value when
    /// the key ends there, which is what lets `**.example.com` match bare
    /// `example.com`.
    pub(crate) fn insert(&mut self, segments: &[&str], value: V) {
        let Some((terminal, rest)) = segments.split_first() else {
            return;
        };

        let mut node = self;
        for seg in rest.iter().rev() {
            node = node
                .children
                .entry((*seg).to_string())
                .or_insert_with(Node::new);
        }

        if *terminal == WILDCARD || *terminal == SUFFIX_WILDCARD {
            node.value = Some(value.clone());
        }

        match node.children.get_mut(*terminal) {
            Some(child) => child.value = Some(value),
            None => {
                node.children.insert(
                    (*terminal).to_string(),
                    Node {
                        value: Some(value),
                        children: HashMap::new(),
                    },
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_stores_reversed() {
        let mut root: Node<u32> = Node::new();
        root.insert(&["www", "example", "com"], 1);

        let com = root.children.get("com").expect("com nearest the root");
        let example = com.children.get("example").expect("example below com");
        let www = example.children.get("www").expect("www deepest");

        assert_eq!(www.value, Some(1));
        assert_eq!(example.value, None);
        assert_eq!(com.value, None);
    }

    #[test]
    fn test_insert_empty_segments_is_noop() {
        let mut root: Node<u32> = Node::new();
        root.insert(&[], 1);

        assert!(root.children.is_empty());
        assert_eq!(root.value, None);
    }

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut root: Node<u32> = Node::new();
        root.insert(&["example", "com"], 1);
        root.insert(&["example", "com"], 2);

        assert_eq!(root.lookup(&["example", "com"]), Some(&2));
        assert_eq!(root.count_values(), 1);
    }

    #[test]
    fn test_terminal_wildcard_marks_parent() {
        let mut root: Node<u32> = Node::new();
        root.insert(&["*", "example", "com"], 7);

        let example = &root.children["com"].children["example"];
        assert_eq!(example.value, Some(7), "parent takes the wildcard value");
        assert_eq!(example.children["*"].value, Some(7));
    }

    #[test]
    fn test_lookup_precedence_per_depth() {
        let mut root: Node<&str> = Node::new();
        root.insert(&["a", "b", "c"], "exact");
        root.insert(&["a", "*", "c"], "single");
        root.insert(&["**", "c"], "suffix");

        assert_eq!(root.lookup(&["a", "b", "c"]), Some(&"exact"));
        assert_eq!(root.lookup(&["a", "q", "c"]), Some(&"single"));
        assert_eq!(root.lookup(&["x", "y", "z", "c"]), Some(&"suffix"));
        assert_eq!(root.lookup(&["a", "b", "d"]), None);
    }

    #[test]
    fn test_lookup_empty_segments() {
        let mut root: Node<u32> = Node::new();
        root.insert(&["example", "com"], 1);

        assert_eq!(root.lookup(&[]), None);
    }

    #[test]
    fn test_terminal_depth_short_circuits_on_child_presence() {
        // An exact child without a value shadows a sibling wildcard at the
        // same depth; only the level above may still fall back.
        let mut root: Node<u32> = Node::new();
        root.insert(&["deep", "b", "c"], 1); // creates valueless "b" under "c"
        root.insert(&["*", "c"], 2);

        assert_eq!(root.lookup(&["b", "c"]), None);
        assert_eq!(root.lookup(&["q", "c"]), Some(&2));
    }

    #[test]
    fn test_suffix_wildcard_never_recurses() {
        let mut root: Node<u32> = Node::new();
        root.insert(&["**", "com"], 9);

        // "**" swallows every remaining segment with its own value.
        assert_eq!(root.lookup(&["a", "com"]), Some(&9));
        assert_eq!(root.lookup(&["a", "b", "c", "d", "com"]), Some(&9));
    }

    #[test]
    fn test_count_values() {
        let mut root: Node<u32> = Node::new();
        assert_eq!(root.count_values(), 0);

        root.insert(&["example", "com"], 1);
        root.insert(&["example", "org"], 2);
        assert_eq!(root.count_values(), 2);

        // A wildcard entry also marks its parent node.
        root.insert(&["*", "example", "net"], 3);
        assert_eq!(root.count_values(), 4);
    }
}

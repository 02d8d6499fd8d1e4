use std::iter::FusedIterator;

use crate::{NIL, NodeId, Root, Tree};

impl Tree {
    /// Gets an iterator over the entries of the tree, sorted by key. Entries
    /// sharing a key come out in insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmultimap::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert("b", "2");
    /// tree.insert("a", "1");
    /// tree.insert("b", "3");
    ///
    /// let entries: Vec<_> = tree.iter().collect();
    /// assert_eq!(entries, [("a", "1"), ("b", "2"), ("b", "3")]);
    /// ```
    pub fn iter(&self) -> Iter<'_> {
        let root = self.root();
        Iter {
            root,
            first: root.first(),
            last: root.last(),
            len: self.len(),
        }
    }

    /// Gets an iterator over the keys, in sorted order, repeats included.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator {
        self.iter().map(|(k, _)| k)
    }

    /// Gets an iterator over the values, in order by key.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator {
        self.iter().map(|(_, v)| v)
    }
}

pub struct Iter<'a> {
    root: &'a Root,
    first: NodeId,
    last: NodeId,
    len: usize,
}

impl<'a> Iter<'a> {
    fn entry(&self, id: NodeId) -> (&'a str, &'a str) {
        let node = &self.root[id];
        (node.key.as_str(), node.value.as_str())
    }
}

impl<'a> IntoIterator for &'a Tree {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 || self.first == NIL {
            return None;
        }
        let current = self.first;
        self.len -= 1;
        self.first = self.root.successor(current);
        Some(self.entry(current))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<'a> DoubleEndedIterator for Iter<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 || self.last == NIL {
            return None;
        }
        let current = self.last;
        self.len -= 1;
        self.last = self.root.predecessor(current);
        Some(self.entry(current))
    }
}

impl ExactSizeIterator for Iter<'_> {
    fn len(&self) -> usize {
        self.len
    }
}

impl FusedIterator for Iter<'_> {}

impl Clone for Iter<'_> {
    fn clone(&self) -> Self {
        Iter {
            root: self.root,
            first: self.first,
            last: self.last,
            len: self.len,
        }
    }
}

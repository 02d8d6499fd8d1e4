use log::debug;

use crate::{NIL, NodeId, Root, Tree};

impl Default for Tree {
    fn default() -> Self {
        Tree::new()
    }
}

impl Drop for Tree {
    fn drop(&mut self) {
        self.root.clear();
    }
}

impl Tree {
    pub fn new() -> Self {
        Tree {
            root: Root::new(),
            len: 0,
        }
    }

    /// Adds one entry. Entries with an existing key are kept alongside the
    /// old ones, after them in order.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let node = self.root.alloc_node(key.into(), value.into());
        self.root.insert_node(node);
        self.len += 1;
        debug!("inserted {:?}, {} entries", self.root[node], self.len);
    }

    /// Returns every value stored under `key`, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmultimap::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert("m", "1");
    /// tree.insert("a", "0");
    /// tree.insert("m", "2");
    ///
    /// assert_eq!(tree.find("m"), ["1", "2"]);
    /// assert!(tree.find("z").is_empty());
    /// ```
    pub fn find(&self, key: &str) -> Vec<&str> {
        let hit = self.root.search(self.root.root, key);
        if hit == NIL {
            return Vec::new();
        }

        let mut values = Vec::new();
        let mut pred = self.root.predecessor(hit);
        while pred != NIL && self.root[pred].key == key {
            values.push(self.root[pred].value.as_str());
            pred = self.root.predecessor(pred);
        }
        values.reverse();

        values.push(self.root[hit].value.as_str());

        let mut succ = self.root.successor(hit);
        while succ != NIL && self.root[succ].key == key {
            values.push(self.root[succ].value.as_str());
            succ = self.root.successor(succ);
        }
        values
    }

    /// Removes every entry whose key and value both match. Returns how many
    /// entries went away.
    ///
    /// Each removal searches again from the root and rescans the run of
    /// equal keys, so removing k matches from a run of r entries sharing
    /// `key` costs O(k·(log n + r)).
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmultimap::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert("k", "a");
    /// tree.insert("k", "b");
    /// tree.insert("k", "a");
    ///
    /// assert_eq!(tree.delete("k", "a"), 2);
    /// assert_eq!(tree.find("k"), ["b"]);
    /// assert_eq!(tree.delete("k", "zzz"), 0);
    /// ```
    pub fn delete(&mut self, key: &str, value: &str) -> usize {
        let mut removed = 0;
        // Every erase reshapes the tree, so each round starts over from the
        // root instead of reusing ids found before the erase.
        while let Some(victim) = self.locate(key, value) {
            self.root.erase(victim);
            self.root.dealloc_node(victim);
            self.len -= 1;
            removed += 1;
        }
        if removed > 0 {
            debug!(
                "deleted {removed} x ({key:?},{value:?}), {} entries",
                self.len
            );
        }
        removed
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.root.search(self.root.root, key) != NIL
    }

    /// The entry with the smallest key; the oldest one when several share it.
    pub fn first(&self) -> Option<(&str, &str)> {
        self.entry(self.root.first())
    }

    /// The entry with the largest key; the newest one when several share it.
    pub fn last(&self) -> Option<(&str, &str)> {
        self.entry(self.root.last())
    }

    /// Number of nodes on the longest path from the root down to a leaf.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = Vec::new();
        if self.root.root != NIL {
            stack.push((self.root.root, 1));
        }
        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.root[id];
            for child in [node.left, node.right] {
                if child != NIL {
                    stack.push((child, depth + 1));
                }
            }
        }
        height
    }

    pub fn clear(&mut self) {
        let freed = self.root.clear();
        debug!("cleared {freed} entries");
        self.len = 0;
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn root(&self) -> &Root {
        &self.root
    }

    fn entry(&self, id: NodeId) -> Option<(&str, &str)> {
        (id != NIL).then(|| {
            let node = &self.root[id];
            (node.key.as_str(), node.value.as_str())
        })
    }

    /// Finds one node holding exactly `(key, value)`, scanning the run of
    /// equal keys on both sides of the search hit.
    fn locate(&self, key: &str, value: &str) -> Option<NodeId> {
        let hit = self.root.search(self.root.root, key);
        if hit == NIL {
            return None;
        }
        if self.root[hit].value == value {
            return Some(hit);
        }

        let mut pred = self.root.predecessor(hit);
        while pred != NIL && self.root[pred].key == key {
            if self.root[pred].value == value {
                return Some(pred);
            }
            pred = self.root.predecessor(pred);
        }

        let mut succ = self.root.successor(hit);
        while succ != NIL && self.root[succ].key == key {
            if self.root[succ].value == value {
                return Some(succ);
            }
            succ = self.root.successor(succ);
        }
        None
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Tree {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Tree {
        let mut tree = Tree::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Tree {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

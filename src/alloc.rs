use std::mem;

use log::trace;

use crate::{NIL, Node, NodeId, Root};

impl Root {
    /// Hands out a slot holding a fresh red node, reusing freed slots first.
    pub(crate) fn alloc_node(&mut self, key: String, value: String) -> NodeId {
        let node = Node::new(key, value);
        match self.free.pop() {
            Some(id) => {
                self[id] = node;
                id
            }
            None => {
                self.nodes.push(node);
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    /// Releases a slot that is no longer linked into the tree and hands its
    /// entry back.
    pub(crate) fn dealloc_node(&mut self, id: NodeId) -> (String, String) {
        debug_assert_ne!(id, NIL, "the sentinel is never freed");
        let node = mem::replace(&mut self[id], Node::nil());
        self.free.push(id);
        (node.key, node.value)
    }

    /// Frees every node in post-order, then resets the arena down to the
    /// sentinel. Returns how many nodes were freed.
    pub(crate) fn clear(&mut self) -> usize {
        let mut freed = 0;
        let mut current = self.root;
        while current != NIL {
            let (left, right, parent) = {
                let node = &self[current];
                (node.left, node.right, node.parent)
            };
            if left != NIL {
                current = left;
                continue;
            }
            if right != NIL {
                current = right;
                continue;
            }
            // Leaf: unhook it so the parent becomes a leaf in turn.
            if parent != NIL {
                if self[parent].left == current {
                    self[parent].left = NIL;
                } else {
                    self[parent].right = NIL;
                }
            }
            self.dealloc_node(current);
            freed += 1;
            current = parent;
        }
        trace!("freed {freed} nodes");
        self.root = NIL;
        self.free.clear();
        self.nodes.truncate(1);
        self[NIL] = Node::nil();
        freed
    }

    /// Number of slots in use, sentinel excluded.
    #[cfg(test)]
    pub(crate) fn live_slots(&self) -> usize {
        self.nodes.len() - 1 - self.free.len()
    }

    #[cfg(test)]
    pub(crate) fn capacity_slots(&self) -> usize {
        self.nodes.len() - 1
    }
}

use std::{cmp::Ordering::*, fmt::Debug};

use crate::{Color, NIL, Node, NodeId, Root};

impl Node {
    /// A detached red node, as fresh out of insertion.
    pub(crate) fn new(key: String, value: String) -> Self {
        Node {
            parent: NIL,
            left: NIL,
            right: NIL,
            color: Color::Red,
            key,
            value,
        }
    }

    /// The shape of the sentinel, also used for vacant slots.
    pub(crate) fn nil() -> Self {
        Node {
            parent: NIL,
            left: NIL,
            right: NIL,
            color: Color::Black,
            key: String::new(),
            value: String::new(),
        }
    }

    #[inline(always)]
    pub(crate) fn is_black(&self) -> bool {
        self.color == Color::Black
    }

    #[inline(always)]
    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
    }
}

impl Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "{:?}::({:?},{:?})",
            self.color, self.key, self.value
        ))
    }
}

// Search and order queries.
impl Root {
    /// Descends from `x` and returns the first node whose key equals `key`,
    /// or [`NIL`]. Other nodes with the same key sit next to it in order.
    pub(crate) fn search(&self, mut x: NodeId, key: &str) -> NodeId {
        while x != NIL {
            let candidate = &self[x];
            match key.cmp(candidate.key.as_str()) {
                Equal => break,
                Less => x = candidate.left,
                Greater => x = candidate.right,
            }
        }
        x
    }

    #[inline]
    pub(crate) fn minimum(&self, mut x: NodeId) -> NodeId {
        while self[x].left != NIL {
            x = self[x].left;
        }
        x
    }

    #[inline]
    pub(crate) fn maximum(&self, mut x: NodeId) -> NodeId {
        while self[x].right != NIL {
            x = self[x].right;
        }
        x
    }

    pub(crate) fn successor(&self, mut x: NodeId) -> NodeId {
        // If we have a right-hand child, go down and then left as far as we
        // can.
        if self[x].right != NIL {
            return self.minimum(self[x].right);
        }
        // Otherwise go up until we come from a left-hand child; that parent
        // is the next node.
        let mut y = self[x].parent;
        while y != NIL && x == self[y].right {
            x = y;
            y = self[y].parent;
        }
        y
    }

    pub(crate) fn predecessor(&self, mut x: NodeId) -> NodeId {
        if self[x].left != NIL {
            return self.maximum(self[x].left);
        }
        let mut y = self[x].parent;
        while y != NIL && x == self[y].left {
            x = y;
            y = self[y].parent;
        }
        y
    }

    pub(crate) fn first(&self) -> NodeId {
        self.minimum(self.root)
    }

    pub(crate) fn last(&self) -> NodeId {
        self.maximum(self.root)
    }
}

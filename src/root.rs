use std::ops::{Index, IndexMut};

use log::trace;

use crate::{Color, NIL, Node, NodeId, Root};

impl Default for Root {
    fn default() -> Self {
        Root::new()
    }
}

impl Index<NodeId> for Root {
    type Output = Node;

    #[inline(always)]
    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for Root {
    #[inline(always)]
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }
}

impl Root {
    pub(crate) fn new() -> Self {
        Root {
            nodes: vec![Node::nil()],
            free: Vec::new(),
            root: NIL,
        }
    }

    /// Links the detached node `z` below its BST parent and rebalances.
    /// Equal keys go right, so `z` lands after every node with the same key.
    pub(crate) fn insert_node(&mut self, z: NodeId) {
        let mut parent = NIL;
        let mut x = self.root;
        while x != NIL {
            parent = x;
            x = if self[z].key < self[x].key {
                self[x].left
            } else {
                self[x].right
            };
        }

        self[z].parent = parent;
        if parent == NIL {
            self.root = z;
        } else if self[z].key < self[parent].key {
            self[parent].left = z;
        } else {
            self[parent].right = z;
        }
        let node = &mut self[z];
        node.left = NIL;
        node.right = NIL;
        node.color = Color::Red;
        self.insert_fixup(z);
    }

    /// Unlinks `z` from the tree and rebalances. The slot itself is left to
    /// the caller to free.
    pub(crate) fn erase(&mut self, z: NodeId) {
        let mut removed_color = self[z].color;
        let x;

        if self[z].left == NIL {
            x = self[z].right;
            self.transplant(z, x);
        } else if self[z].right == NIL {
            x = self[z].left;
            self.transplant(z, x);
        } else {
            /*
             * Two children: the in-order predecessor y takes z's place and
             * colour; y's own left child x fills y's old slot.
             *
             *      (z)            (y)
             *      / \            / \
             *    (l) (r)  -->   (l) (r)
             *      \              \
             *      (y)            (x)
             *      /
             *    (x)
             */
            let y = self.maximum(self[z].left);
            removed_color = self[y].color;
            x = self[y].left;
            if self[y].parent == z {
                // x may be the sentinel; the fixup still needs its parent.
                self[x].parent = y;
            } else {
                self.transplant(y, x);
                let z_left = self[z].left;
                self[y].left = z_left;
                self[z_left].parent = y;
            }
            self.transplant(z, y);
            let z_right = self[z].right;
            self[y].right = z_right;
            self[z_right].parent = y;
            self[y].color = self[z].color;
        }

        if removed_color == Color::Black {
            self.erase_fixup(x);
        }
        self[NIL].parent = NIL;

        let node = &mut self[z];
        node.parent = NIL;
        node.left = NIL;
        node.right = NIL;
    }
}

// Private

impl Root {
    fn insert_fixup(&mut self, mut z: NodeId) {
        // Loop invariant: z is red. The sentinel is black, so the loop stops
        // once z is the root.
        while self[self[z].parent].is_red() {
            let parent = self[z].parent;
            let gparent = self[parent].parent;

            if parent == self[gparent].left {
                let uncle = self[gparent].right;
                if self[uncle].is_red() {
                    /*
                     * Case 1 - uncle is red (color flips).
                     *
                     *       G            g
                     *      / \          / \
                     *     p   u  -->   P   U
                     *    /            /
                     *   z            z
                     *
                     * g's parent might be red too; carry on from g.
                     */
                    trace!("insert fixup: red uncle at {gparent:?}");
                    self[parent].color = Color::Black;
                    self[uncle].color = Color::Black;
                    self[gparent].color = Color::Red;
                    z = gparent;
                    continue;
                }

                if z == self[parent].right {
                    /*
                     * Case 2 - zig-zag (left rotate at parent).
                     *
                     *      G             G
                     *     / \           / \
                     *    p   U  -->    z   U
                     *     \           /
                     *      z         p
                     *
                     * Still red-red; Case 3 finishes the job.
                     */
                    trace!("insert fixup: zig-zag at {parent:?}");
                    z = parent;
                    self.rotate_left(z);
                }

                /*
                 * Case 3 - zig-zig (right rotate at gparent).
                 *
                 *        G           P
                 *       / \         / \
                 *      p   U  -->  z   g
                 *     /                 \
                 *    z                   U
                 */
                let parent = self[z].parent;
                let gparent = self[parent].parent;
                trace!("insert fixup: zig-zig at {gparent:?}");
                self[parent].color = Color::Black;
                self[gparent].color = Color::Red;
                self.rotate_right(gparent);
            } else {
                let uncle = self[gparent].left;
                if self[uncle].is_red() {
                    /* Case 1 - color flips */
                    trace!("insert fixup: red uncle at {gparent:?}");
                    self[parent].color = Color::Black;
                    self[uncle].color = Color::Black;
                    self[gparent].color = Color::Red;
                    z = gparent;
                    continue;
                }

                if z == self[parent].left {
                    /* Case 2 - right rotate at parent */
                    trace!("insert fixup: zig-zag at {parent:?}");
                    z = parent;
                    self.rotate_right(z);
                }

                /* Case 3 - left rotate at gparent */
                let parent = self[z].parent;
                let gparent = self[parent].parent;
                trace!("insert fixup: zig-zig at {gparent:?}");
                self[parent].color = Color::Black;
                self[gparent].color = Color::Red;
                self.rotate_left(gparent);
            }
        }
        let root = self.root;
        self[root].color = Color::Black;
    }

    /// Repairs the missing black on every path through `x`, which may be the
    /// sentinel standing in for a removed leaf.
    fn erase_fixup(&mut self, mut x: NodeId) {
        while x != self.root && self[x].is_black() {
            let parent = self[x].parent;

            if x == self[parent].left {
                let mut sibling = self[parent].right;
                if self[sibling].is_red() {
                    /*
                     * Case 1 - red sibling (left rotate at parent).
                     *
                     *     P               S
                     *    / \             / \
                     *   X   s    -->    p   Sr
                     *      / \         / \
                     *     Sl  Sr      X   Sl
                     */
                    trace!("erase fixup: red sibling at {parent:?}");
                    self[sibling].color = Color::Black;
                    self[parent].color = Color::Red;
                    self.rotate_left(parent);
                    sibling = self[parent].right;
                }

                let near = self[sibling].left;
                let far = self[sibling].right;
                if self[near].is_black() && self[far].is_black() {
                    /*
                     * Case 2 - sibling color flip, push the deficit up.
                     *
                     *    (p)           (p)
                     *    / \           / \
                     *   X   S    -->  X   s
                     *      / \           / \
                     *     Sl  Sr        Sl  Sr
                     */
                    trace!("erase fixup: black nephews at {parent:?}");
                    self[sibling].color = Color::Red;
                    x = parent;
                    continue;
                }

                if self[far].is_black() {
                    /*
                     * Case 3 - far nephew black (right rotate at sibling).
                     *
                     *   (p)           (p)
                     *   / \           / \
                     *  X   S    -->  X   Sl
                     *     / \             \
                     *    sl  Sr            s
                     *                       \
                     *                        Sr
                     */
                    trace!("erase fixup: near red nephew at {sibling:?}");
                    self[near].color = Color::Black;
                    self[sibling].color = Color::Red;
                    self.rotate_right(sibling);
                    sibling = self[parent].right;
                }

                /*
                 * Case 4 - far nephew red (left rotate at parent).
                 *
                 *      (p)             (s)
                 *      / \             / \
                 *     X   S     -->   P   Sr
                 *        / \         / \
                 *      (sl) sr      X  (sl)
                 */
                trace!("erase fixup: far red nephew at {parent:?}");
                self[sibling].color = self[parent].color;
                self[parent].color = Color::Black;
                let far = self[sibling].right;
                self[far].color = Color::Black;
                self.rotate_left(parent);
                x = self.root;
            } else {
                let mut sibling = self[parent].left;
                if self[sibling].is_red() {
                    /* Case 1 - right rotate at parent */
                    trace!("erase fixup: red sibling at {parent:?}");
                    self[sibling].color = Color::Black;
                    self[parent].color = Color::Red;
                    self.rotate_right(parent);
                    sibling = self[parent].left;
                }

                let near = self[sibling].right;
                let far = self[sibling].left;
                if self[near].is_black() && self[far].is_black() {
                    /* Case 2 - sibling color flip */
                    trace!("erase fixup: black nephews at {parent:?}");
                    self[sibling].color = Color::Red;
                    x = parent;
                    continue;
                }

                if self[far].is_black() {
                    /* Case 3 - left rotate at sibling */
                    trace!("erase fixup: near red nephew at {sibling:?}");
                    self[near].color = Color::Black;
                    self[sibling].color = Color::Red;
                    self.rotate_left(sibling);
                    sibling = self[parent].left;
                }

                /* Case 4 - right rotate at parent */
                trace!("erase fixup: far red nephew at {parent:?}");
                self[sibling].color = self[parent].color;
                self[parent].color = Color::Black;
                let far = self[sibling].left;
                self[far].color = Color::Black;
                self.rotate_right(parent);
                x = self.root;
            }
        }
        self[x].color = Color::Black;
    }

    /// Promotes `x`'s right child into `x`'s place.
    ///
    /// ```text
    ///     x              y
    ///    / \            / \
    ///   a   y   -->    x   c
    ///      / \        / \
    ///     b   c      a   b
    /// ```
    pub(crate) fn rotate_left(&mut self, x: NodeId) {
        let y = self[x].right;
        debug_assert_ne!(y, NIL, "rotate_left needs a right child");
        let b = self[y].left;
        self[x].right = b;
        if b != NIL {
            self[b].parent = x;
        }
        let parent = self[x].parent;
        self[y].parent = parent;
        self.change_child(x, y, parent);
        self[y].left = x;
        self[x].parent = y;
    }

    /// Mirror of [`Self::rotate_left`].
    pub(crate) fn rotate_right(&mut self, x: NodeId) {
        let y = self[x].left;
        debug_assert_ne!(y, NIL, "rotate_right needs a left child");
        let b = self[y].right;
        self[x].left = b;
        if b != NIL {
            self[b].parent = x;
        }
        let parent = self[x].parent;
        self[y].parent = parent;
        self.change_child(x, y, parent);
        self[y].right = x;
        self[x].parent = y;
    }

    /// Puts the subtree rooted at `v` where `u` was. `v` may be the
    /// sentinel, whose parent link is then set for the erase fixup.
    fn transplant(&mut self, u: NodeId, v: NodeId) {
        let parent = self[u].parent;
        self.change_child(u, v, parent);
        self[v].parent = parent;
    }

    fn change_child(&mut self, old: NodeId, new: NodeId, parent: NodeId) {
        if parent == NIL {
            self.root = new;
        } else if self[parent].left == old {
            self[parent].left = new;
        } else {
            self[parent].right = new;
        }
    }
}

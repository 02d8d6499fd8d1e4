use std::{error::Error, fmt};

use crate::{NIL, NodeId, Tree};

/// A broken red-black or ordering rule. Seeing one means the tree code has a
/// bug; there is nothing to recover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    RedSentinel,
    RedRoot,
    RootHasParent,
    RedRedPair { key: String },
    BlackHeightMismatch { key: String, left: usize, right: usize },
    OutOfOrder { key: String },
    BrokenParentLink { key: String },
    LengthMismatch { expected: usize, found: usize },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::RedSentinel => f.write_str("sentinel is red"),
            InvariantViolation::RedRoot => f.write_str("root is red"),
            InvariantViolation::RootHasParent => f.write_str("root has a parent"),
            InvariantViolation::RedRedPair { key } => {
                write!(f, "red node {key:?} has a red child")
            }
            InvariantViolation::BlackHeightMismatch { key, left, right } => write!(
                f,
                "black height below {key:?} differs: {left} on the left, {right} on the right"
            ),
            InvariantViolation::OutOfOrder { key } => {
                write!(f, "key {key:?} is on the wrong side of an ancestor")
            }
            InvariantViolation::BrokenParentLink { key } => {
                write!(f, "child of {key:?} does not point back to it")
            }
            InvariantViolation::LengthMismatch { expected, found } => {
                write!(f, "tree says {expected} entries but holds {found}")
            }
        }
    }
}

impl Error for InvariantViolation {}

impl Tree {
    /// Checks every red-black and ordering rule, plus parent links and the
    /// entry count. On success returns the number of black nodes on any path
    /// from the root down to the sentinel.
    ///
    /// Key order is checked as non-decreasing in order: rotations can leave
    /// a key equal to a node's own in its left subtree.
    pub fn validate(&self) -> Result<usize, InvariantViolation> {
        let root = self.root();
        if root[NIL].is_red() {
            return Err(InvariantViolation::RedSentinel);
        }
        if root.root != NIL {
            if root[root.root].is_red() {
                return Err(InvariantViolation::RedRoot);
            }
            if root[root.root].parent != NIL {
                return Err(InvariantViolation::RootHasParent);
            }
        }

        let mut found = 0;
        let black_height = self.check(root.root, None, None, &mut found)?;
        if found != self.len() {
            return Err(InvariantViolation::LengthMismatch {
                expected: self.len(),
                found,
            });
        }
        Ok(black_height)
    }

    // Equal keys may sit on either side after rotations, so the bounds are
    // inclusive.
    fn check<'a>(
        &'a self,
        id: NodeId,
        low: Option<&'a str>,
        high: Option<&'a str>,
        found: &mut usize,
    ) -> Result<usize, InvariantViolation> {
        if id == NIL {
            return Ok(0);
        }
        let root = self.root();
        let node = &root[id];
        *found += 1;

        let key = node.key.as_str();
        if low.is_some_and(|low| key < low) || high.is_some_and(|high| key > high) {
            return Err(InvariantViolation::OutOfOrder {
                key: node.key.clone(),
            });
        }
        for child in [node.left, node.right] {
            if child == NIL {
                continue;
            }
            if root[child].parent != id {
                return Err(InvariantViolation::BrokenParentLink {
                    key: node.key.clone(),
                });
            }
            if node.is_red() && root[child].is_red() {
                return Err(InvariantViolation::RedRedPair {
                    key: node.key.clone(),
                });
            }
        }

        let left = self.check(node.left, low, Some(key), found)?;
        let right = self.check(node.right, Some(key), high, found)?;
        if left != right {
            return Err(InvariantViolation::BlackHeightMismatch {
                key: node.key.clone(),
                left,
                right,
            });
        }
        Ok(left + usize::from(node.is_black()))
    }
}

//! An ordered multimap from string keys to string values.
//!
//! Entries live in a red-black tree whose nodes are stored in an arena. Slot
//! zero of the arena is the shared black sentinel standing in for every
//! missing child and for the parent of the root.
mod alloc;
mod app;
mod iter;
mod node;
mod print;
mod root;
mod tree;
mod validate;

pub use app::{App, AppConfig, Command};
pub use iter::Iter;
pub use validate::InvariantViolation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    /// The single letter used by the tree dump.
    pub fn as_char(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Black => 'B',
        }
    }
}

/// Index of a node inside the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

/// The sentinel: always black, never owned, never freed.
pub(crate) const NIL: NodeId = NodeId(0);

#[derive(Clone, PartialEq)]
pub(crate) struct Node {
    pub(crate) parent: NodeId,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
    pub(crate) color: Color,
    pub(crate) key: String,
    pub(crate) value: String,
}

/// The structural half of the tree: node storage plus the root link.
/// Rotations, fixups and order queries live here.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Root {
    nodes: Vec<Node>,
    free: Vec<NodeId>,
    pub(crate) root: NodeId,
}

/// A red-black tree acting as an ordered multimap. Several entries may share
/// a key; entries with equal keys are kept in insertion order.
///
/// Equality compares structure, not just contents: two trees holding the
/// same entries in different shapes are not equal.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    root: Root,
    len: usize,
}

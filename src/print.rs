use std::{fmt, io};

use crate::{NIL, Node, Tree};

impl Tree {
    /// Writes the tree sideways: largest key first, one line per node, each
    /// line indented four columns per level and showing color, key and value.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmultimap::Tree;
    ///
    /// let tree: Tree = [("b", "2"), ("a", "1"), ("c", "3")].into_iter().collect();
    /// let mut out = Vec::new();
    /// tree.write_tree(&mut out).unwrap();
    /// assert_eq!(
    ///     String::from_utf8(out).unwrap(),
    ///     "       R c 3\n   B b 2\n       R a 1\n"
    /// );
    /// ```
    pub fn write_tree<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        self.reverse_in_order(|depth, node| writeln!(out, "{}", Line(depth, node)))
    }

    /// Dumps the tree to standard output.
    pub fn print(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_tree(&mut out)
    }

    /// Visits right subtree, node, left subtree, without recursion.
    fn reverse_in_order<E>(
        &self,
        mut visit: impl FnMut(usize, &Node) -> Result<(), E>,
    ) -> Result<(), E> {
        let root = self.root();
        let mut stack = Vec::new();
        let mut current = (root.root, 0);
        loop {
            while current.0 != NIL {
                stack.push(current);
                current = (root[current.0].right, current.1 + 1);
            }
            let Some((id, depth)) = stack.pop() else {
                break;
            };
            visit(depth, &root[id])?;
            current = (root[id].left, depth + 1);
        }
        Ok(())
    }
}

struct Line<'a>(usize, &'a Node);

impl fmt::Display for Line<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Line(depth, node) = self;
        write!(
            f,
            "{:>width$} {} {}",
            node.color.as_char(),
            node.key,
            node.value,
            width = depth * 4 + 4
        )
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.reverse_in_order(|depth, node| writeln!(f, "{}", Line(depth, node)))
    }
}

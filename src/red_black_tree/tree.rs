use crate::arena::Arena;
use crate::entry::Entry;
use crate::red_black_tree::node::{Color, Link, Node};
use std::borrow::Borrow;
use std::cmp;
use std::cmp::Ordering;

/// The core red-black tree. Nodes are stored in an arena and linked by index; `None` links stand
/// for leaf positions and are treated as black. The fix-up procedures walk parent references
/// iteratively, so no recursion is involved in any mutating operation.
pub struct Tree<T, U> {
    pub arena: Arena<Node<T, U>>,
    pub root: Link,
}

impl<T, U> Tree<T, U> {
    pub fn new() -> Self {
        Tree {
            arena: Arena::new(),
            root: None,
        }
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    // leaf positions count as black
    fn color(&self, link: Link) -> Color {
        match link {
            None => Color::Black,
            Some(index) => self.arena[index].color,
        }
    }

    pub fn find<V>(&self, key: &V) -> Link
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut curr = self.root;
        while let Some(index) = curr {
            match key.cmp(self.arena[index].entry.key.borrow()) {
                Ordering::Less => curr = self.arena[index].left,
                Ordering::Greater => curr = self.arena[index].right,
                Ordering::Equal => return curr,
            }
        }
        None
    }

    pub fn get<V>(&self, key: &V) -> Option<&Entry<T, U>>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.find(key).map(|index| &self.arena[index].entry)
    }

    pub fn get_mut<V>(&mut self, key: &V) -> Option<&mut Entry<T, U>>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        match self.find(key) {
            Some(index) => Some(&mut self.arena[index].entry),
            None => None,
        }
    }

    /// Inserts an entry into the tree. If the key is already present, the tree is left untouched
    /// and the rejected entry is returned.
    pub fn insert(&mut self, key: T, value: U) -> Option<Entry<T, U>>
    where
        T: Ord,
    {
        let mut parent = None;
        let mut go_left = false;
        let mut curr = self.root;
        while let Some(index) = curr {
            parent = curr;
            match key.cmp(&self.arena[index].entry.key) {
                Ordering::Less => {
                    go_left = true;
                    curr = self.arena[index].left;
                }
                Ordering::Greater => {
                    go_left = false;
                    curr = self.arena[index].right;
                }
                Ordering::Equal => return Some(Entry { key, value }),
            }
        }

        let mut new_node = Node::new(key, value);
        new_node.parent = parent;
        let index = self.arena.allocate(new_node);
        match parent {
            None => self.root = Some(index),
            Some(parent_index) => {
                if go_left {
                    self.arena[parent_index].left = Some(index);
                } else {
                    self.arena[parent_index].right = Some(index);
                }
            }
        }

        self.insert_fixup(index);
        None
    }

    // The only possible violation on entry is a red `z` with a red parent. Recoloring in the
    // red-uncle case moves the violation two levels up; the rotation cases terminate the loop.
    fn insert_fixup(&mut self, mut z: usize) {
        while self.color(self.arena[z].parent) == Color::Red {
            let parent = self.arena[z].parent.expect("Expected a red parent node.");
            let grandparent = self.arena[parent]
                .parent
                .expect("Expected a grandparent above a red parent.");

            if self.arena[grandparent].left == Some(parent) {
                let uncle = self.arena[grandparent].right;
                match uncle {
                    Some(uncle) if self.arena[uncle].color == Color::Red => {
                        self.arena[parent].color = Color::Black;
                        self.arena[uncle].color = Color::Black;
                        self.arena[grandparent].color = Color::Red;
                        z = grandparent;
                    }
                    _ => {
                        if self.arena[parent].right == Some(z) {
                            z = parent;
                            self.rotate_left(z);
                        }
                        let parent = self.arena[z].parent.expect("Expected a parent node.");
                        let grandparent = self.arena[parent]
                            .parent
                            .expect("Expected a grandparent node.");
                        self.arena[parent].color = Color::Black;
                        self.arena[grandparent].color = Color::Red;
                        self.rotate_right(grandparent);
                    }
                }
            } else {
                let uncle = self.arena[grandparent].left;
                match uncle {
                    Some(uncle) if self.arena[uncle].color == Color::Red => {
                        self.arena[parent].color = Color::Black;
                        self.arena[uncle].color = Color::Black;
                        self.arena[grandparent].color = Color::Red;
                        z = grandparent;
                    }
                    _ => {
                        if self.arena[parent].left == Some(z) {
                            z = parent;
                            self.rotate_right(z);
                        }
                        let parent = self.arena[z].parent.expect("Expected a parent node.");
                        let grandparent = self.arena[parent]
                            .parent
                            .expect("Expected a grandparent node.");
                        self.arena[parent].color = Color::Black;
                        self.arena[grandparent].color = Color::Red;
                        self.rotate_left(grandparent);
                    }
                }
            }
        }

        if let Some(root) = self.root {
            self.arena[root].color = Color::Black;
        }
    }

    /// Removes the entry with the given key, if present. The node physically unlinked always has
    /// at most one real child: a node with two children swaps places with its in-order successor
    /// first.
    pub fn remove<V>(&mut self, key: &V) -> Option<Entry<T, U>>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let z = self.find(key)?;
        let (x, x_parent, spliced_color) = match (self.arena[z].left, self.arena[z].right) {
            (None, right) => {
                let parent = self.arena[z].parent;
                self.transplant(z, right);
                (right, parent, self.arena[z].color)
            }
            (left, None) => {
                let parent = self.arena[z].parent;
                self.transplant(z, left);
                (left, parent, self.arena[z].color)
            }
            (_, Some(right)) => {
                let successor = self.min_node(right);
                let spliced_color = self.arena[successor].color;
                let x = self.arena[successor].right;
                let x_parent;
                if self.arena[successor].parent == Some(z) {
                    x_parent = Some(successor);
                } else {
                    x_parent = self.arena[successor].parent;
                    self.transplant(successor, x);
                    let z_right = self.arena[z].right;
                    self.arena[successor].right = z_right;
                    if let Some(z_right) = z_right {
                        self.arena[z_right].parent = Some(successor);
                    }
                }
                self.transplant(z, Some(successor));
                let z_left = self.arena[z].left;
                self.arena[successor].left = z_left;
                if let Some(z_left) = z_left {
                    self.arena[z_left].parent = Some(successor);
                }
                let z_color = self.arena[z].color;
                self.arena[successor].color = z_color;
                (x, x_parent, spliced_color)
            }
        };

        let node = self.arena.free(z);
        if spliced_color == Color::Black {
            self.remove_fixup(x, x_parent);
        }
        Some(node.entry)
    }

    // Replaces the subtree rooted at `u` with the subtree rooted at `v`.
    fn transplant(&mut self, u: usize, v: Link) {
        let parent = self.arena[u].parent;
        match parent {
            None => self.root = v,
            Some(parent) => {
                if self.arena[parent].left == Some(u) {
                    self.arena[parent].left = v;
                } else {
                    self.arena[parent].right = v;
                }
            }
        }
        if let Some(v) = v {
            self.arena[v].parent = parent;
        }
    }

    // `x` carries an extra black after a black node was spliced out. Since `x` may be a leaf
    // position, its parent is threaded through explicitly rather than read from a sentinel.
    fn remove_fixup(&mut self, mut x: Link, mut x_parent: Link) {
        while x != self.root && self.color(x) == Color::Black {
            let parent = match x_parent {
                Some(parent) => parent,
                None => break,
            };

            if self.arena[parent].left == x {
                let mut sibling = self.arena[parent]
                    .right
                    .expect("Expected a sibling opposite an extra black.");
                if self.arena[sibling].color == Color::Red {
                    self.arena[sibling].color = Color::Black;
                    self.arena[parent].color = Color::Red;
                    self.rotate_left(parent);
                    sibling = self.arena[parent]
                        .right
                        .expect("Expected a sibling opposite an extra black.");
                }

                let sibling_left = self.arena[sibling].left;
                let sibling_right = self.arena[sibling].right;
                if self.color(sibling_left) == Color::Black
                    && self.color(sibling_right) == Color::Black
                {
                    self.arena[sibling].color = Color::Red;
                    x = Some(parent);
                    x_parent = self.arena[parent].parent;
                } else {
                    if self.color(sibling_right) == Color::Black {
                        if let Some(near) = sibling_left {
                            self.arena[near].color = Color::Black;
                        }
                        self.arena[sibling].color = Color::Red;
                        self.rotate_right(sibling);
                        sibling = self.arena[parent]
                            .right
                            .expect("Expected a sibling opposite an extra black.");
                    }
                    let parent_color = self.arena[parent].color;
                    self.arena[sibling].color = parent_color;
                    self.arena[parent].color = Color::Black;
                    if let Some(far) = self.arena[sibling].right {
                        self.arena[far].color = Color::Black;
                    }
                    self.rotate_left(parent);
                    x = self.root;
                    x_parent = None;
                }
            } else {
                let mut sibling = self.arena[parent]
                    .left
                    .expect("Expected a sibling opposite an extra black.");
                if self.arena[sibling].color == Color::Red {
                    self.arena[sibling].color = Color::Black;
                    self.arena[parent].color = Color::Red;
                    self.rotate_right(parent);
                    sibling = self.arena[parent]
                        .left
                        .expect("Expected a sibling opposite an extra black.");
                }

                let sibling_left = self.arena[sibling].left;
                let sibling_right = self.arena[sibling].right;
                if self.color(sibling_left) == Color::Black
                    && self.color(sibling_right) == Color::Black
                {
                    self.arena[sibling].color = Color::Red;
                    x = Some(parent);
                    x_parent = self.arena[parent].parent;
                } else {
                    if self.color(sibling_left) == Color::Black {
                        if let Some(near) = sibling_right {
                            self.arena[near].color = Color::Black;
                        }
                        self.arena[sibling].color = Color::Red;
                        self.rotate_left(sibling);
                        sibling = self.arena[parent]
                            .left
                            .expect("Expected a sibling opposite an extra black.");
                    }
                    let parent_color = self.arena[parent].color;
                    self.arena[sibling].color = parent_color;
                    self.arena[parent].color = Color::Black;
                    if let Some(far) = self.arena[sibling].left {
                        self.arena[far].color = Color::Black;
                    }
                    self.rotate_right(parent);
                    x = self.root;
                    x_parent = None;
                }
            }
        }

        if let Some(index) = x {
            self.arena[index].color = Color::Black;
        }
    }

    fn rotate_left(&mut self, index: usize) {
        let child = self.arena[index]
            .right
            .expect("Expected a right child to rotate left.");
        let child_left = self.arena[child].left;
        self.arena[index].right = child_left;
        if let Some(child_left) = child_left {
            self.arena[child_left].parent = Some(index);
        }

        let parent = self.arena[index].parent;
        self.arena[child].parent = parent;
        match parent {
            None => self.root = Some(child),
            Some(parent) => {
                if self.arena[parent].left == Some(index) {
                    self.arena[parent].left = Some(child);
                } else {
                    self.arena[parent].right = Some(child);
                }
            }
        }

        self.arena[child].left = Some(index);
        self.arena[index].parent = Some(child);
    }

    fn rotate_right(&mut self, index: usize) {
        let child = self.arena[index]
            .left
            .expect("Expected a left child to rotate right.");
        let child_right = self.arena[child].right;
        self.arena[index].left = child_right;
        if let Some(child_right) = child_right {
            self.arena[child_right].parent = Some(index);
        }

        let parent = self.arena[index].parent;
        self.arena[child].parent = parent;
        match parent {
            None => self.root = Some(child),
            Some(parent) => {
                if self.arena[parent].right == Some(index) {
                    self.arena[parent].right = Some(child);
                } else {
                    self.arena[parent].left = Some(child);
                }
            }
        }

        self.arena[child].right = Some(index);
        self.arena[index].parent = Some(child);
    }

    fn min_node(&self, mut index: usize) -> usize {
        while let Some(left) = self.arena[index].left {
            index = left;
        }
        index
    }

    pub fn min(&self) -> Option<&Entry<T, U>> {
        self.root
            .map(|index| &self.arena[self.min_node(index)].entry)
    }

    pub fn max(&self) -> Option<&Entry<T, U>> {
        self.root.map(|index| {
            let mut curr = index;
            while let Some(right) = self.arena[curr].right {
                curr = right;
            }
            &self.arena[curr].entry
        })
    }

    pub fn floor<V>(&self, key: &V) -> Option<&Entry<T, U>>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut curr = self.root;
        let mut result = None;
        while let Some(index) = curr {
            match key.cmp(self.arena[index].entry.key.borrow()) {
                Ordering::Less => curr = self.arena[index].left,
                Ordering::Greater => {
                    result = Some(index);
                    curr = self.arena[index].right;
                }
                Ordering::Equal => return Some(&self.arena[index].entry),
            }
        }
        result.map(|index| &self.arena[index].entry)
    }

    pub fn ceil<V>(&self, key: &V) -> Option<&Entry<T, U>>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut curr = self.root;
        let mut result = None;
        while let Some(index) = curr {
            match key.cmp(self.arena[index].entry.key.borrow()) {
                Ordering::Greater => curr = self.arena[index].right,
                Ordering::Less => {
                    result = Some(index);
                    curr = self.arena[index].left;
                }
                Ordering::Equal => return Some(&self.arena[index].entry),
            }
        }
        result.map(|index| &self.arena[index].entry)
    }

    /// Returns the longest root-to-leaf path of the tree, counted in edges. Diagnostic only; the
    /// balancing algorithm never reads it.
    pub fn height(&self) -> usize {
        self.node_height(self.root).saturating_sub(1)
    }

    fn node_height(&self, link: Link) -> usize {
        match link {
            None => 0,
            Some(index) => {
                let node = &self.arena[index];
                1 + cmp::max(self.node_height(node.left), self.node_height(node.right))
            }
        }
    }

    /// Checks the red-black invariants: the root is black, no red node has a red child, and every
    /// root-to-leaf path contains the same number of black nodes. Intended for tests and
    /// debugging; insertion and removal never call it.
    pub fn is_valid(&self) -> bool {
        if self.color(self.root) == Color::Red {
            return false;
        }
        self.black_height(self.root).is_some()
    }

    // Bottom-up black-height computation that short-circuits with `None` on the first red-red
    // edge or black-height mismatch.
    fn black_height(&self, link: Link) -> Option<usize> {
        let index = match link {
            Some(index) => index,
            None => return Some(1),
        };
        let node = &self.arena[index];
        if node.color == Color::Red
            && (self.color(node.left) == Color::Red || self.color(node.right) == Color::Red)
        {
            return None;
        }
        let left_height = self.black_height(node.left)?;
        let right_height = self.black_height(node.right)?;
        if left_height != right_height {
            return None;
        }
        match node.color {
            Color::Black => Some(left_height + 1),
            Color::Red => Some(left_height),
        }
    }
}

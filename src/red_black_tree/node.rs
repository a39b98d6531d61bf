use crate::entry::Entry;

/// An enum representing the color of a node in a red-black tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

/// An index link to a node in the tree's arena. `None` stands for a leaf position and is always
/// considered black, so fix-up code never has to special-case missing children.
pub type Link = Option<usize>;

/// A struct representing an internal node of a red-black tree.
///
/// Child links are the owning direction of the tree; the parent link is a non-owning
/// back-reference used by the iterative fix-up procedures and rotations.
pub struct Node<T, U> {
    pub entry: Entry<T, U>,
    pub color: Color,
    pub left: Link,
    pub right: Link,
    pub parent: Link,
}

impl<T, U> Node<T, U> {
    pub fn new(key: T, value: U) -> Self {
        Node {
            entry: Entry { key, value },
            color: Color::Red,
            left: None,
            right: None,
            parent: None,
        }
    }
}

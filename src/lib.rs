//! An ordered map and set implemented with an arena-backed red-black tree.
//!
//! Nodes live in a typed arena and refer to each other by index, so the tree
//! can keep parent back-references without reference counting or unsafe code.

mod entry;
pub mod arena;
pub mod red_black_tree;

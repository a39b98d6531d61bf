//! Self-balancing binary search tree that uses a color bit to ensure that the tree remains
//! approximately balanced during insertions and deletions. Nodes are stored in an arena and
//! linked by index, which allows the iterative fix-up procedures to follow parent references
//! without unsafe code.

mod map;
mod node;
mod set;
mod tree;

pub use self::map::RedBlackMap;
pub use self::map::RedBlackMapIntoIter;
pub use self::map::RedBlackMapIter;
pub use self::map::RedBlackMapLevels;
pub use self::map::RedBlackMapRange;
pub use self::set::RedBlackSet;
pub use self::set::RedBlackSetIntoIter;
pub use self::set::RedBlackSetIter;
pub use self::set::RedBlackSetLevels;
pub use self::set::RedBlackSetRange;

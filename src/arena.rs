//! Fast, but limited allocator.

use std::mem;
use std::ops::{Index, IndexMut};

enum Block<T> {
    Occupied(T),
    Vacant(Option<usize>),
}

/// A fast, but limited allocator that only allocates a single type of object.
///
/// Objects are stored in a `Vec` and addressed by plain `usize` indices, so allocated objects may
/// freely refer to each other by index without aliasing concerns and no unsafe code is needed.
/// Freed slots are threaded onto a vacancy list and reused by later allocations before the
/// backing vector grows. All objects inside the arena are destroyed when the arena is destroyed.
///
/// # Examples
///
/// ```
/// use ordered_collections::arena::Arena;
///
/// let mut arena = Arena::new();
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(x), 2);
/// ```
pub struct Arena<T> {
    blocks: Vec<Block<T>>,
    head: Option<usize>,
    len: usize,
}

impl<T> Arena<T> {
    /// Constructs a new, empty `Arena<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let arena: Arena<u32> = Arena::new();
    /// ```
    pub fn new() -> Self {
        Arena {
            blocks: Vec::new(),
            head: None,
            len: 0,
        }
    }

    /// Allocates an object in the arena and returns its index. The index can later be used to
    /// retrieve mutable and immutable references to the object, and to deallocate the object.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// ```
    pub fn allocate(&mut self, value: T) -> usize {
        self.len += 1;
        match self.head.take() {
            None => {
                self.blocks.push(Block::Occupied(value));
                self.blocks.len() - 1
            }
            Some(index) => {
                let vacant_block = mem::replace(&mut self.blocks[index], Block::Occupied(value));
                match vacant_block {
                    Block::Vacant(next_index) => {
                        self.head = next_index;
                        index
                    }
                    Block::Occupied(_) => panic!("Expected a vacant block at the vacancy head."),
                }
            }
        }
    }

    /// Deallocates the object at a particular index and returns the object.
    ///
    /// # Panics
    ///
    /// Panics if the index corresponds to an invalid or vacant block.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(x), 0);
    /// ```
    pub fn free(&mut self, index: usize) -> T {
        match self.blocks.get(index) {
            Some(Block::Occupied(_)) => {}
            Some(Block::Vacant(_)) => panic!("Error: attempting to free vacant block."),
            None => panic!("Error: attempting to free invalid block."),
        }
        let old_block = mem::replace(&mut self.blocks[index], Block::Vacant(self.head.take()));
        match old_block {
            Block::Occupied(value) => {
                self.len -= 1;
                self.head = Some(index);
                value
            }
            Block::Vacant(_) => unreachable!(),
        }
    }

    /// Returns an immutable reference to the object at a particular index. Returns `None` if the
    /// index does not correspond to a valid object.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(x), Some(&0));
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        match self.blocks.get(index) {
            Some(Block::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to the object at a particular index. Returns `None` if the
    /// index does not correspond to a valid object.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get_mut(x), Some(&mut 0));
    /// ```
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        match self.blocks.get_mut(index) {
            Some(Block::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the number of objects in the arena.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// arena.allocate(0);
    /// assert_eq!(arena.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena contains no objects.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let arena: Arena<u32> = Arena::new();
    /// assert!(arena.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clears the arena, destroying all objects and invalidating all previously returned indices.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// arena.allocate(0);
    /// arena.clear();
    /// assert!(arena.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.head = None;
        self.len = 0;
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for Arena<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.get(index).expect("Error: index out of bounds.")
    }
}

impl<T> IndexMut<usize> for Arena<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.get_mut(index).expect("Error: index out of bounds.")
    }
}

#[cfg(test)]
mod tests {
    use super::Arena;

    #[test]
    #[should_panic]
    fn test_free_invalid_block() {
        let mut arena: Arena<u32> = Arena::new();
        arena.free(0);
    }

    #[test]
    #[should_panic]
    fn test_free_vacant_block() {
        let mut arena = Arena::new();
        let index = arena.allocate(0);
        arena.free(index);
        arena.free(index);
    }

    #[test]
    fn test_allocate() {
        let mut arena = Arena::new();
        assert_eq!(arena.allocate(0), 0);
        assert_eq!(arena.allocate(0), 1);
        assert_eq!(arena.allocate(0), 2);
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_free_reuses_block() {
        let mut arena = Arena::new();
        let index = arena.allocate(0);
        assert_eq!(arena.free(index), 0);
        assert_eq!(arena.allocate(1), index);
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_free_reuses_most_recent_block() {
        let mut arena = Arena::new();
        arena.allocate(0);
        let second = arena.allocate(1);
        let third = arena.allocate(2);
        assert_eq!(arena.free(second), 1);
        assert_eq!(arena.free(third), 2);
        assert_eq!(arena.allocate(3), third);
        assert_eq!(arena.allocate(4), second);
    }

    #[test]
    fn test_get() {
        let mut arena = Arena::new();
        let index = arena.allocate(0);
        assert_eq!(arena.get(index), Some(&0));
        assert_eq!(arena.get(index + 1), None);
    }

    #[test]
    fn test_get_vacant_block() {
        let mut arena = Arena::new();
        let index = arena.allocate(0);
        arena.free(index);
        assert_eq!(arena.get(index), None);
    }

    #[test]
    fn test_get_mut() {
        let mut arena = Arena::new();
        let index = arena.allocate(0);
        *arena.get_mut(index).unwrap() = 1;
        assert_eq!(arena.get(index), Some(&1));
        assert_eq!(arena.get_mut(index + 1), None);
    }

    #[test]
    fn test_clear() {
        let mut arena = Arena::new();
        let index = arena.allocate(0);
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.get(index), None);
    }
}

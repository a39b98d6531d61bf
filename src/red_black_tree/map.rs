use crate::entry::Entry;
use crate::red_black_tree::node::Link;
use crate::red_black_tree::tree::Tree;
use std::borrow::Borrow;
use std::ops::{Index, IndexMut};

/// An ordered map implemented using a red-black tree.
///
/// A red-black tree is a self-balancing binary search tree that tags every node with a color and
/// maintains a small set of color invariants: the root is black, no red node has a red child, and
/// every root-to-leaf path contains the same number of black nodes. Together these bound the
/// height of the tree by `2 * log2(n + 1)`, so all operations run in worst-case logarithmic time.
///
/// # Examples
///
/// ```
/// use ordered_collections::red_black_tree::RedBlackMap;
///
/// let mut map = RedBlackMap::new();
/// map.insert(0, 1);
/// map.insert(3, 4);
///
/// assert_eq!(map[&0], 1);
/// assert_eq!(map.get(&1), None);
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.min(), Some(&0));
/// assert_eq!(map.ceil(&2), Some(&3));
///
/// map[&0] = 2;
/// assert_eq!(map.remove(&0), Some((0, 2)));
/// assert_eq!(map.remove(&1), None);
/// ```
pub struct RedBlackMap<T, U> {
    tree: Tree<T, U>,
}

impl<T, U> RedBlackMap<T, U> {
    /// Constructs a new, empty `RedBlackMap<T, U>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<u32, u32> = RedBlackMap::new();
    /// ```
    pub fn new() -> Self {
        RedBlackMap { tree: Tree::new() }
    }

    /// Inserts a key-value pair into the map. If the key already exists in the map, the map is
    /// left unchanged and the rejected pair is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// assert_eq!(map.insert(1, 1), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// assert_eq!(map.insert(1, 2), Some((1, 2)));
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn insert(&mut self, key: T, value: U) -> Option<(T, U)>
    where
        T: Ord,
    {
        self.tree.insert(key, value).map(|entry| {
            let Entry { key, value } = entry;
            (key, value)
        })
    }

    /// Removes a key-value pair from the map. If the key exists in the map, it will return the
    /// associated key-value pair. Otherwise it will return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove(&1), Some((1, 1)));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<(T, U)>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.remove(key).map(|entry| {
            let Entry { key, value } = entry;
            (key, value)
        })
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Returns an immutable reference to the value associated with a particular key. It will
    /// return `None` if the key does not exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.get(&0), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn get<V>(&self, key: &V) -> Option<&U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.get(key).map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn get_mut<V>(&mut self, key: &V) -> Option<&mut U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.get_mut(key).map(|entry| &mut entry.value)
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.arena.len()
    }

    /// Returns `true` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<u32, u32> = RedBlackMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears the map, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns a key in the map that is less than or equal to a particular key. Returns `None` if
    /// such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.floor(&0), None);
    /// assert_eq!(map.floor(&2), Some(&1));
    /// ```
    pub fn floor<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.floor(key).map(|entry| &entry.key)
    }

    /// Returns a key in the map that is greater than or equal to a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.ceil(&0), Some(&1));
    /// assert_eq!(map.ceil(&2), None);
    /// ```
    pub fn ceil<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.ceil(key).map(|entry| &entry.key)
    }

    /// Returns the minimum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        self.tree.min().map(|entry| &entry.key)
    }

    /// Returns the maximum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        self.tree.max().map(|entry| &entry.key)
    }

    /// Returns the longest root-to-leaf path of the tree, counted in edges. The red-black
    /// invariants guarantee that the result never exceeds `2 * log2(len + 1)`. Diagnostic only;
    /// no operation of the map depends on it.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// map.insert(3, 3);
    /// assert_eq!(map.height(), 1);
    /// ```
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Checks that the tree upholds the red-black invariants: the root is black, no red node has
    /// a red child, and every root-to-leaf path contains the same number of black nodes. Intended
    /// for tests and debugging; mutating operations never call it.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// assert!(map.is_valid());
    /// ```
    pub fn is_valid(&self) -> bool {
        self.tree.is_valid()
    }

    /// Returns an iterator over all key-value pairs with `low <= key <= high`, in ascending key
    /// order. Subtrees that lie entirely outside the bounds are never visited, so the iterator
    /// runs in `O(log n + k)` time for `k` yielded pairs. If `low > high`, the iterator is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// map.insert(5, 5);
    ///
    /// let keys = map.range(&2, &5).map(|pair| *pair.0).collect::<Vec<u32>>();
    /// assert_eq!(keys, vec![3, 5]);
    /// ```
    pub fn range<'a, V>(&'a self, low: &'a V, high: &'a V) -> RedBlackMapRange<'a, T, U, V>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut iter = RedBlackMapRange {
            tree: &self.tree,
            stack: Vec::new(),
            low,
            high,
        };
        if low <= high {
            iter.push_left(self.tree.root);
        }
        iter
    }

    /// Returns an iterator over the levels of the tree. Each item is one level of key-value
    /// pairs, left to right, starting at the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(2, 2);
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    ///
    /// let mut levels = map.levels();
    /// assert_eq!(levels.next(), Some(vec![(&2, &2)]));
    /// assert_eq!(levels.next(), Some(vec![(&1, &1), (&3, &3)]));
    /// assert_eq!(levels.next(), None);
    /// ```
    pub fn levels(&self) -> RedBlackMapLevels<'_, T, U> {
        RedBlackMapLevels {
            tree: &self.tree,
            level: self.tree.root.into_iter().collect(),
        }
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs using in-order
    /// traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RedBlackMapIter<'_, T, U> {
        RedBlackMapIter {
            tree: &self.tree,
            current: self.tree.root,
            stack: Vec::new(),
        }
    }
}

impl<T, U> IntoIterator for RedBlackMap<T, U> {
    type IntoIter = RedBlackMapIntoIter<T, U>;
    type Item = (T, U);

    fn into_iter(self) -> Self::IntoIter {
        let current = self.tree.root;
        Self::IntoIter {
            tree: self.tree,
            current,
            stack: Vec::new(),
        }
    }
}

impl<'a, T, U> IntoIterator for &'a RedBlackMap<T, U>
where
    T: 'a,
    U: 'a,
{
    type IntoIter = RedBlackMapIter<'a, T, U>;
    type Item = (&'a T, &'a U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `RedBlackMap<T, U>`.
///
/// This iterator traverses the elements of the map in-order and yields owned entries.
pub struct RedBlackMapIntoIter<T, U> {
    tree: Tree<T, U>,
    current: Link,
    stack: Vec<usize>,
}

impl<T, U> Iterator for RedBlackMapIntoIter<T, U> {
    type Item = (T, U);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(index) = self.current {
            self.stack.push(index);
            self.current = self.tree.arena[index].left;
        }
        self.stack.pop().map(|index| {
            let node = self.tree.arena.free(index);
            self.current = node.right;
            let Entry { key, value } = node.entry;
            (key, value)
        })
    }
}

/// An iterator for `RedBlackMap<T, U>`.
///
/// This iterator traverses the elements of the map in-order and yields immutable references.
pub struct RedBlackMapIter<'a, T, U> {
    tree: &'a Tree<T, U>,
    current: Link,
    stack: Vec<usize>,
}

impl<'a, T, U> Iterator for RedBlackMapIter<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        while let Some(index) = self.current {
            self.stack.push(index);
            self.current = tree.arena[index].left;
        }
        self.stack.pop().map(|index| {
            let node = &tree.arena[index];
            self.current = node.right;
            (&node.entry.key, &node.entry.value)
        })
    }
}

/// A range iterator for `RedBlackMap<T, U>`.
///
/// This iterator yields the key-value pairs whose keys lie in an inclusive range, in ascending
/// key order, pruning every subtree that lies entirely outside the range.
pub struct RedBlackMapRange<'a, T, U, V: ?Sized> {
    tree: &'a Tree<T, U>,
    stack: Vec<usize>,
    low: &'a V,
    high: &'a V,
}

impl<'a, T, U, V> RedBlackMapRange<'a, T, U, V>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    // Pushes the left spine of `link`, descending left only below nodes that can still reach the
    // lower bound.
    fn push_left(&mut self, mut link: Link) {
        let tree = self.tree;
        while let Some(index) = link {
            let node = &tree.arena[index];
            if node.entry.key.borrow() >= self.low {
                self.stack.push(index);
                link = node.left;
            } else {
                link = node.right;
            }
        }
    }
}

impl<'a, T, U, V> Iterator for RedBlackMapRange<'a, T, U, V>
where
    T: Borrow<V> + 'a,
    U: 'a,
    V: Ord + ?Sized,
{
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let tree = self.tree;
        let node = &tree.arena[index];
        if node.entry.key.borrow() > self.high {
            self.stack.clear();
            return None;
        }
        if node.entry.key.borrow() < self.high {
            self.push_left(node.right);
        }
        Some((&node.entry.key, &node.entry.value))
    }
}

/// A level-order iterator for `RedBlackMap<T, U>`.
///
/// This iterator traverses the tree breadth-first and yields one level of key-value pairs at a
/// time, left to right.
pub struct RedBlackMapLevels<'a, T, U> {
    tree: &'a Tree<T, U>,
    level: Vec<usize>,
}

impl<'a, T, U> Iterator for RedBlackMapLevels<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    type Item = Vec<(&'a T, &'a U)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.level.is_empty() {
            return None;
        }
        let tree = self.tree;
        let mut items = Vec::with_capacity(self.level.len());
        let mut next_level = Vec::new();
        for &index in &self.level {
            let node = &tree.arena[index];
            items.push((&node.entry.key, &node.entry.value));
            if let Some(left) = node.left {
                next_level.push(left);
            }
            if let Some(right) = node.right {
                next_level.push(right);
            }
        }
        self.level = next_level;
        Some(items)
    }
}

impl<T, U> Default for RedBlackMap<T, U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T, U, V> Index<&'a V> for RedBlackMap<T, U>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    type Output = U;

    fn index(&self, key: &V) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

impl<'a, T, U, V> IndexMut<&'a V> for RedBlackMap<T, U>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    fn index_mut(&mut self, key: &V) -> &mut Self::Output {
        self.get_mut(key).expect("Error: key does not exist.")
    }
}

#[cfg(test)]
mod tests {
    use super::RedBlackMap;

    #[test]
    fn test_len_empty() {
        let map: RedBlackMap<u32, u32> = RedBlackMap::new();
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn test_is_empty() {
        let map: RedBlackMap<u32, u32> = RedBlackMap::new();
        assert!(map.is_empty());
    }

    #[test]
    fn test_min_max_empty() {
        let map: RedBlackMap<u32, u32> = RedBlackMap::new();
        assert_eq!(map.min(), None);
        assert_eq!(map.max(), None);
    }

    #[test]
    fn test_insert() {
        let mut map = RedBlackMap::new();
        assert_eq!(map.insert(1, 1), None);
        assert!(map.contains_key(&1));
        assert_eq!(map.get(&1), Some(&1));
    }

    #[test]
    fn test_insert_rejects_duplicate() {
        let mut map = RedBlackMap::new();
        assert_eq!(map.insert(1, 1), None);
        assert_eq!(map.insert(1, 3), Some((1, 3)));
        assert_eq!(map.get(&1), Some(&1));
        assert_eq!(map.len(), 1);
        assert_eq!(
            map.iter().collect::<Vec<(&u32, &u32)>>(),
            vec![(&1, &1)],
        );
    }

    #[test]
    fn test_remove() {
        let mut map = RedBlackMap::new();
        map.insert(1, 1);
        assert_eq!(map.remove(&1), Some((1, 1)));
        assert!(!map.contains_key(&1));
        assert!(map.is_empty());
    }

    #[test]
    fn test_remove_absent() {
        let mut map = RedBlackMap::new();
        map.insert(1, 1);
        assert_eq!(map.remove(&100), None);
        assert_eq!(map.len(), 1);
        assert!(map.is_valid());
    }

    #[test]
    fn test_min_max() {
        let mut map = RedBlackMap::new();
        map.insert(1, 1);
        map.insert(3, 3);
        map.insert(5, 5);

        assert_eq!(map.min(), Some(&1));
        assert_eq!(map.max(), Some(&5));
    }

    #[test]
    fn test_get_mut() {
        let mut map = RedBlackMap::new();
        map.insert(1, 1);
        {
            let value = map.get_mut(&1);
            *value.unwrap() = 3;
        }
        assert_eq!(map.get(&1), Some(&3));
    }

    #[test]
    fn test_floor_ceil() {
        let mut map = RedBlackMap::new();
        map.insert(1, 1);
        map.insert(3, 3);
        map.insert(5, 5);

        assert_eq!(map.floor(&0), None);
        assert_eq!(map.floor(&2), Some(&1));
        assert_eq!(map.floor(&4), Some(&3));
        assert_eq!(map.floor(&6), Some(&5));

        assert_eq!(map.ceil(&0), Some(&1));
        assert_eq!(map.ceil(&2), Some(&3));
        assert_eq!(map.ceil(&4), Some(&5));
        assert_eq!(map.ceil(&6), None);
    }

    #[test]
    fn test_range() {
        let mut map = RedBlackMap::new();
        for key in &[10, 20, 30, 15, 25, 5, 1, 35, 40] {
            map.insert(*key, *key);
        }

        assert_eq!(
            map.range(&15, &30).map(|pair| *pair.0).collect::<Vec<u32>>(),
            vec![15, 20, 25, 30],
        );
        assert_eq!(
            map.range(&0, &100).map(|pair| *pair.0).collect::<Vec<u32>>(),
            vec![1, 5, 10, 15, 20, 25, 30, 35, 40],
        );
        assert_eq!(
            map.range(&11, &14).map(|pair| *pair.0).collect::<Vec<u32>>(),
            Vec::<u32>::new(),
        );
    }

    #[test]
    fn test_range_inverted_bounds() {
        let mut map = RedBlackMap::new();
        map.insert(1, 1);
        map.insert(3, 3);

        assert_eq!(map.range(&3, &1).count(), 0);
    }

    #[test]
    fn test_levels() {
        let mut map = RedBlackMap::new();
        map.insert(2, 2);
        map.insert(1, 1);
        map.insert(3, 3);

        let mut levels = map.levels();
        assert_eq!(levels.next(), Some(vec![(&2, &2)]));
        assert_eq!(levels.next(), Some(vec![(&1, &1), (&3, &3)]));
        assert_eq!(levels.next(), None);
    }

    #[test]
    fn test_levels_empty() {
        let map: RedBlackMap<u32, u32> = RedBlackMap::new();
        assert_eq!(map.levels().next(), None);
    }

    #[test]
    fn test_height() {
        let mut map = RedBlackMap::new();
        assert_eq!(map.height(), 0);
        map.insert(1, 1);
        assert_eq!(map.height(), 0);
        map.insert(2, 2);
        map.insert(3, 3);
        assert_eq!(map.height(), 1);
    }

    #[test]
    fn test_is_valid() {
        let mut map = RedBlackMap::new();
        assert!(map.is_valid());
        for key in 0..32 {
            map.insert(key, key);
            assert!(map.is_valid());
        }
        for key in 0..32 {
            map.remove(&key);
            assert!(map.is_valid());
        }
    }

    #[test]
    fn test_clear() {
        let mut map = RedBlackMap::new();
        map.insert(1, 1);
        map.insert(2, 2);
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.iter().next(), None);
    }

    #[test]
    fn test_into_iter() {
        let mut map = RedBlackMap::new();
        map.insert(1, 2);
        map.insert(5, 6);
        map.insert(3, 4);

        assert_eq!(
            map.into_iter().collect::<Vec<(u32, u32)>>(),
            vec![(1, 2), (3, 4), (5, 6)],
        );
    }

    #[test]
    fn test_iter() {
        let mut map = RedBlackMap::new();
        map.insert(1, 2);
        map.insert(5, 6);
        map.insert(3, 4);

        assert_eq!(
            map.iter().collect::<Vec<(&u32, &u32)>>(),
            vec![(&1, &2), (&3, &4), (&5, &6)],
        );
    }

    #[test]
    fn test_iter_restartable() {
        let mut map = RedBlackMap::new();
        map.insert(1, 2);
        map.insert(5, 6);
        map.insert(3, 4);

        let first = map.iter().collect::<Vec<(&u32, &u32)>>();
        let second = map.iter().collect::<Vec<(&u32, &u32)>>();
        assert_eq!(first, second);
    }
}

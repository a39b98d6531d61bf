use ordered_collections::red_black_tree::{RedBlackMap, RedBlackSet};
use rand::Rng;
use std::collections::BTreeMap;

const NUM_OF_OPERATIONS: usize = 10_000;

#[test]
fn int_test_map_against_model() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut map = RedBlackMap::new();
    let mut model = BTreeMap::new();

    for i in 0..NUM_OF_OPERATIONS {
        let key = rng.gen_range(0, 1000);
        let val = rng.gen::<u32>();

        if rng.gen::<bool>() {
            let expected_rejected = model.contains_key(&key);
            let rejected = map.insert(key, val);
            assert_eq!(rejected.is_some(), expected_rejected);
            if rejected.is_none() {
                model.insert(key, val);
            }
        } else {
            assert_eq!(map.remove(&key), model.remove(&key).map(|val| (key, val)));
        }

        assert_eq!(map.len(), model.len());
        if i % 512 == 0 {
            assert!(map.is_valid());
        }
    }

    assert!(map.is_valid());
    assert_eq!(
        map.iter().collect::<Vec<(&u32, &u32)>>(),
        model.iter().collect::<Vec<(&u32, &u32)>>(),
    );

    let bound = 2.0 * ((model.len() + 1) as f64).log2();
    assert!((map.height() as f64) <= bound);
}

#[test]
fn int_test_invariants_after_every_operation() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([2, 2, 2, 2]);
    let mut set = RedBlackSet::new();
    let mut inserted = Vec::new();

    for _ in 0..1000 {
        let key = rng.gen_range(0u32, 200);
        if set.insert(key) {
            inserted.push(key);
        }
        assert!(set.is_valid());
    }

    while let Some(key) = inserted.pop() {
        assert_eq!(set.remove(&key), Some(key));
        assert!(set.is_valid());
    }
    assert!(set.is_empty());
}

#[test]
fn int_test_floor_ceil_against_model() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([3, 3, 3, 3]);
    let mut map = RedBlackMap::new();
    let mut model = BTreeMap::new();

    for _ in 0..1000 {
        let key = rng.gen_range(0u32, 10_000);
        if map.insert(key, ()).is_none() {
            model.insert(key, ());
        }
    }

    for _ in 0..1000 {
        let probe = rng.gen_range(0u32, 10_000);
        let floor = model.range(..=probe).next_back().map(|pair| pair.0);
        let ceil = model.range(probe..).next().map(|pair| pair.0);
        assert_eq!(map.floor(&probe), floor);
        assert_eq!(map.ceil(&probe), ceil);
    }
}

#[test]
fn test_sorted_sequence_after_inserts() {
    let mut set = RedBlackSet::new();
    for key in &[10, 20, 30, 15, 25, 5, 1, 35, 40] {
        assert!(set.insert(*key));
    }

    assert_eq!(
        set.iter().cloned().collect::<Vec<u32>>(),
        vec![1, 5, 10, 15, 20, 25, 30, 35, 40],
    );
    assert!(set.is_valid());
}

#[test]
fn test_removals_preserve_order_and_invariants() {
    let mut set = RedBlackSet::new();
    for key in &[10, 20, 30, 15, 25, 5, 1, 35, 40] {
        set.insert(*key);
    }

    for key in &[30, 15, 1] {
        assert_eq!(set.remove(key), Some(*key));
        assert!(set.is_valid());
    }

    assert_eq!(
        set.iter().cloned().collect::<Vec<u32>>(),
        vec![5, 10, 20, 25, 35, 40],
    );
}

#[test]
fn test_remove_absent_key_is_noop() {
    let mut set = RedBlackSet::new();
    for key in &[10, 20, 30, 15, 25, 5, 1, 35, 40] {
        set.insert(*key);
    }

    assert_eq!(set.remove(&100), None);
    assert_eq!(set.len(), 9);
    assert!(set.is_valid());
    assert_eq!(
        set.iter().cloned().collect::<Vec<u32>>(),
        vec![1, 5, 10, 15, 20, 25, 30, 35, 40],
    );
}

#[test]
fn test_range_query() {
    let mut set = RedBlackSet::new();
    for key in &[10, 20, 30, 15, 25, 5, 1, 35, 40] {
        set.insert(*key);
    }

    assert_eq!(
        set.range(&15, &30).cloned().collect::<Vec<u32>>(),
        vec![15, 20, 25, 30],
    );
}

#[test]
fn test_height_bound_with_ascending_inserts() {
    let mut set = RedBlackSet::new();
    for key in 1..=100u32 {
        set.insert(key);
    }

    assert!(set.is_valid());
    // 2 * log2(101) is roughly 13.3
    assert!(set.height() <= 13);
}

#[test]
fn test_size_accounting() {
    let mut set = RedBlackSet::new();
    let mut successful_inserts = 0;
    let mut successful_removes = 0;

    for key in &[3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5] {
        if set.insert(*key) {
            successful_inserts += 1;
        }
    }
    for key in &[1, 1, 2, 7] {
        if set.remove(key).is_some() {
            successful_removes += 1;
        }
    }

    assert_eq!(set.len(), successful_inserts - successful_removes);
}

#[test]
fn test_level_order_groups() {
    let mut set = RedBlackSet::new();
    for key in 1..=15u32 {
        set.insert(key);
    }

    let levels = set.levels().collect::<Vec<Vec<&u32>>>();
    assert_eq!(levels.len(), set.height() + 1);

    let mut all_keys = levels
        .into_iter()
        .flatten()
        .cloned()
        .collect::<Vec<u32>>();
    all_keys.sort();
    assert_eq!(all_keys, (1..=15).collect::<Vec<u32>>());
}

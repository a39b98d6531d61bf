/// A key-value pair stored by the map implementations in this crate.
#[derive(Debug)]
pub struct Entry<T, U> {
    pub key: T,
    pub value: U,
}

use std::ops::Index;

use crate::utils::MyHash;

#[derive(Clone)]
struct Entry<T> {
    value: T,
    /// Index of the next entry in the same bucket (0 terminates the chain).
    next: usize,
}

/// Hash-consing table: every distinct value is stored exactly once.
///
/// Index 0 is a sentry and never holds a value.
/// Entries are never dropped, so indices stay valid for the lifetime of the table.
pub struct Table<T> {
    data: Vec<Entry<T>>,
    buckets: Vec<usize>,
    bitmask: u64,
    capacity: usize,
}

impl<T> Table<T>
where
    T: Default,
{
    /// Create a new table holding at most `2^bits` entries.
    pub fn new(bits: usize) -> Self {
        assert!(bits <= 31, "Storage bits should be in the range 0..=31");

        let capacity = 1 << bits;
        let buckets_size = 1 << bits.min(16);

        let mut data = Vec::with_capacity(capacity.min(1 << 16));
        data.push(Entry {
            value: T::default(),
            next: 0,
        });

        Self {
            data,
            buckets: vec![0; buckets_size],
            bitmask: (buckets_size - 1) as u64,
            capacity,
        }
    }
}

impl<T> Table<T> {
    /// Maximum number of entries (including the sentry).
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of stored values (excluding the sentry).
    pub fn size(&self) -> usize {
        self.data.len() - 1
    }

    pub fn is_full(&self) -> bool {
        self.data.len() >= self.capacity
    }

    /// Get the reference to the value at the given index.
    pub fn value(&self, index: usize) -> &T {
        assert_ne!(index, 0, "Index is 0");
        &self.data[index].value
    }

    /// Append a value without checking for duplicates.
    ///
    /// Returns `None` if the table is full.
    pub fn add(&mut self, value: T) -> Option<usize> {
        if self.is_full() {
            return None;
        }
        let index = self.data.len();
        self.data.push(Entry { value, next: 0 });
        Some(index)
    }
}

impl<T> Table<T>
where
    T: MyHash + Eq,
{
    /// Put a value into the table, returning the index of the (possibly pre-existing) entry.
    ///
    /// Returns `None` if the value is new and the table is full.
    pub fn put(&mut self, value: T) -> Option<usize> {
        let bucket = (value.hash() & self.bitmask) as usize;
        let mut index = self.buckets[bucket];

        if index == 0 {
            let i = self.add(value)?;
            self.buckets[bucket] = i;
            return Some(i);
        }

        loop {
            if self.data[index].value == value {
                return Some(index);
            }
            let next = self.data[index].next;
            if next == 0 {
                let i = self.add(value)?;
                self.data[index].next = i;
                return Some(i);
            }
            index = next;
        }
    }
}

impl<T> Index<usize> for Table<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.value(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
    struct Item(i32);

    impl MyHash for Item {
        fn hash(&self) -> u64 {
            self.0.unsigned_abs() as u64
        }
    }

    #[test]
    fn test_add() {
        let mut table = Table::new(2);
        let index = table.add(Item(42)).unwrap();
        assert_eq!(index, 1);
        assert_eq!(table[index], Item(42));
        assert_eq!(table.size(), 1);
    }

    #[test]
    fn test_add_too_much() {
        let mut table = Table::new(2);
        assert_eq!(table.add(Item(1)), Some(1));
        assert_eq!(table.add(Item(2)), Some(2));
        assert_eq!(table.add(Item(3)), Some(3));
        assert!(table.is_full());
        assert_eq!(table.add(Item(4)), None);
        assert_eq!(table.size(), 3);
    }

    #[test]
    fn test_put_deduplicates() {
        let mut table = Table::new(4);
        let a = table.put(Item(5)).unwrap();
        let b = table.put(Item(-5)).unwrap();
        let c = table.put(Item(5)).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, c);
        assert_eq!(table[b], Item(-5));
        assert_eq!(table.size(), 2);
    }

    #[test]
    fn test_put_existing_into_full_table() {
        let mut table = Table::new(1);
        assert_eq!(table.put(Item(7)), Some(1));
        assert_eq!(table.put(Item(8)), None);
        assert_eq!(table.put(Item(7)), Some(1));
    }
}

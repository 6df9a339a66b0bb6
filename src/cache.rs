use crate::reference::Ref;
use crate::utils::{pairing3, MyHash};

struct Entry<K, V> {
    key: K,
    value: V,
}

/// Lossy direct-mapped cache of operation results.
///
/// A newer entry simply overwrites whatever occupied its slot.
pub struct Cache<K, V> {
    data: Vec<Option<Entry<K, V>>>,
    bitmask: u64,
}

impl<K, V> Cache<K, V> {
    /// Create a new cache of size `2^bits`.
    pub fn new(bits: usize) -> Self {
        assert!(bits <= 31, "Bits should be in the range 0..=31");

        let size = 1 << bits;
        Self {
            data: std::iter::repeat_with(|| None).take(size).collect(),
            bitmask: (size - 1) as u64,
        }
    }
}

impl<K, V> Cache<K, V>
where
    K: MyHash + Eq,
{
    fn slot(&self, key: &K) -> usize {
        (key.hash() & self.bitmask) as usize
    }

    /// Get the cached result.
    pub fn get(&self, key: &K) -> Option<&V> {
        match &self.data[self.slot(key)] {
            Some(entry) if &entry.key == key => Some(&entry.value),
            _ => None,
        }
    }

    /// Insert a result into the cache.
    pub fn insert(&mut self, key: K, value: V) {
        let slot = self.slot(&key);
        self.data[slot] = Some(Entry { key, value });
    }
}

impl MyHash for (Ref, Ref, Ref) {
    fn hash(&self) -> u64 {
        pairing3(
            self.0.unsigned() as u64,
            self.1.unsigned() as u64,
            self.2.unsigned() as u64,
        )
    }
}

//! Per-representation registry with a current cursor.
//!
//! The [`Store`] keeps, for every [`Tag`], an ordered list of values and the
//! index of the current one. Adding or converting a value appends it to the
//! target list and makes it current; tags are independent of each other.
//!
//! ```
//! use logic_workbench::repr::Tag;
//! use logic_workbench::store::Store;
//! use logic_workbench::truth_table::TruthTable;
//!
//! let mut store = Store::new();
//! store.add(TruthTable::from_binary("0110").unwrap());
//! store.convert(Tag::TruthTable, Tag::Aig).unwrap();
//!
//! assert_eq!(store.count(Tag::Aig), 1);
//! assert_eq!(store.statistics(Tag::Aig).unwrap()["inputs"], 2);
//! ```

use std::collections::BTreeMap;
use std::io::Write;

use log::debug;
use serde_json::{Map, Value};

use crate::bdd::BddConfig;
use crate::convert;
use crate::error::{Error, Result};
use crate::present;
use crate::repr::{Repr, Tag};

#[derive(Debug, Default)]
struct Entry {
    values: Vec<Repr>,
    current: Option<usize>,
}

#[derive(Debug, Default)]
pub struct Store {
    entries: BTreeMap<Tag, Entry>,
    bdd_config: BddConfig,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose BDD-producing conversions use managers sized by `config`.
    pub fn with_bdd_config(config: BddConfig) -> Self {
        Self {
            entries: BTreeMap::new(),
            bdd_config: config,
        }
    }

    pub fn bdd_config(&self) -> BddConfig {
        self.bdd_config
    }

    /// Append `value` to the entry of its tag and make it current.
    pub fn add(&mut self, value: impl Into<Repr>) -> usize {
        let value = value.into();
        let tag = value.tag();
        let entry = self.entries.entry(tag).or_default();
        entry.values.push(value);
        let index = entry.values.len() - 1;
        entry.current = Some(index);
        debug!("add {} #{}", tag, index);
        index
    }

    fn current_index_of(&self, tag: Tag) -> Result<usize> {
        self.entries
            .get(&tag)
            .and_then(|e| e.current)
            .ok_or(Error::NoCurrentValue { tag })
    }

    pub fn current(&self, tag: Tag) -> Result<&Repr> {
        let index = self.current_index_of(tag)?;
        Ok(&self.entries[&tag].values[index])
    }

    pub fn current_mut(&mut self, tag: Tag) -> Result<&mut Repr> {
        let index = self.current_index_of(tag)?;
        let entry = self
            .entries
            .get_mut(&tag)
            .ok_or(Error::NoCurrentValue { tag })?;
        Ok(&mut entry.values[index])
    }

    pub fn current_index(&self, tag: Tag) -> Option<usize> {
        self.entries.get(&tag).and_then(|e| e.current)
    }

    pub fn select(&mut self, tag: Tag, index: usize) -> Result<()> {
        let len = self.count(tag);
        match self.entries.get_mut(&tag) {
            Some(entry) if index < len => {
                entry.current = Some(index);
                debug!("select {} #{}", tag, index);
                Ok(())
            }
            _ => Err(Error::IndexOutOfRange { tag, index, len }),
        }
    }

    pub fn count(&self, tag: Tag) -> usize {
        self.entries.get(&tag).map_or(0, |e| e.values.len())
    }

    pub fn is_empty(&self, tag: Tag) -> bool {
        self.count(tag) == 0
    }

    pub fn values(&self, tag: Tag) -> &[Repr] {
        self.entries.get(&tag).map_or(&[][..], |e| e.values.as_slice())
    }

    /// Remove all values of `tag`.
    pub fn clear(&mut self, tag: Tag) {
        if let Some(entry) = self.entries.remove(&tag) {
            debug!("clear {} ({} values)", tag, entry.values.len());
        }
    }

    /// One summary line per value of `tag`, the current one marked with `*`.
    pub fn summaries(&self, tag: Tag) -> Vec<String> {
        let current = self.current_index(tag);
        self.values(tag)
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let mark = if current == Some(i) { '*' } else { ' ' };
                format!("{} {:2}: {}", mark, i, present::summarize(value))
            })
            .collect()
    }

    /// Write the report of the current value of `tag` to `w`.
    pub fn report(&self, tag: Tag, w: &mut impl Write) -> Result<()> {
        present::report(w, self.current(tag)?)?;
        Ok(())
    }

    pub fn statistics(&self, tag: Tag) -> Result<Map<String, Value>> {
        Ok(present::statistics(self.current(tag)?))
    }

    /// Convert the current `source` value to `target`, append the result and select it.
    ///
    /// Nothing is changed if the conversion fails.
    pub fn convert(&mut self, source: Tag, target: Tag) -> Result<usize> {
        if !convert::is_available(source, target) {
            return Err(Error::ConversionUnavailable {
                from: source,
                to: target,
            });
        }
        let value = convert::convert(self.current(source)?, target, self.bdd_config)?;
        Ok(self.add(value))
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::truth_table::TruthTable;

    #[test]
    fn test_empty() {
        let store = Store::new();
        for tag in Tag::ALL {
            assert!(store.is_empty(tag));
            assert!(matches!(store.current(tag), Err(Error::NoCurrentValue { tag: t }) if t == tag));
        }
    }

    #[test]
    fn test_add_selects() {
        let mut store = Store::new();
        assert_eq!(store.add(TruthTable::var(1, 0)), 0);
        assert_eq!(store.add(TruthTable::var(2, 1)), 1);
        assert_eq!(store.current_index(Tag::TruthTable), Some(1));
        assert_eq!(
            store.current(Tag::TruthTable).unwrap().as_truth_table(),
            Some(&TruthTable::var(2, 1))
        );

        store.select(Tag::TruthTable, 0).unwrap();
        assert_eq!(store.current_index(Tag::TruthTable), Some(0));
        assert!(matches!(
            store.select(Tag::TruthTable, 2),
            Err(Error::IndexOutOfRange {
                tag: Tag::TruthTable,
                index: 2,
                len: 2
            })
        ));
        assert_eq!(store.current_index(Tag::TruthTable), Some(0));
    }

    #[test]
    fn test_clear_invalidates_current() {
        let mut store = Store::new();
        store.add(TruthTable::one(2));
        store.clear(Tag::TruthTable);
        assert_eq!(store.count(Tag::TruthTable), 0);
        assert!(store.current(Tag::TruthTable).is_err());
    }

    #[test]
    fn test_summaries_mark_current() {
        let mut store = Store::new();
        store.add(TruthTable::from_binary("01").unwrap());
        store.add(TruthTable::from_binary("0110").unwrap());
        store.select(Tag::TruthTable, 0).unwrap();
        assert_eq!(store.summaries(Tag::TruthTable), vec!["*  0: 01", "   1: 0110"]);
    }

    #[test]
    fn test_failed_conversion_leaves_store_untouched() {
        let mut store = Store::new();
        store.add(TruthTable::var(2, 0));
        let err = store.convert(Tag::TruthTable, Tag::Xmg).unwrap_err();
        assert!(matches!(err, Error::ConversionUnavailable { .. }));
        assert!(store.is_empty(Tag::Xmg));

        let err = store.convert(Tag::Aig, Tag::Mig).unwrap_err();
        assert!(matches!(err, Error::NoCurrentValue { tag: Tag::Aig }));
        assert!(store.is_empty(Tag::Mig));
    }
}

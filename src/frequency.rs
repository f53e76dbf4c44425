use std::collections::btree_map;
use std::collections::BTreeMap;

/// Occurrence count of every distinct byte in an input.
///
/// Iteration follows natural byte order, which is also the order leaves are
/// seeded into the priority queue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<u8, u64>,
}

impl FrequencyTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }

    /// Counts every byte of `bytes` in a single pass.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        bytes.iter().copied().collect()
    }

    /// Records one occurrence of `symbol`.
    pub fn push(&mut self, symbol: u8) {
        *self.counts.entry(symbol).or_insert(0) += 1;
    }

    /// Returns the count for `symbol`, or `None` if it never occurred.
    pub fn get(&self, symbol: u8) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of symbols counted.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterates `(symbol, count)` pairs in byte order.
    pub fn iter(&self) -> FrequencyIter<'_> {
        FrequencyIter {
            inner: self.counts.iter(),
        }
    }
}

/// Iterator over `(symbol, count)` pairs in byte order.
pub struct FrequencyIter<'a> {
    inner: btree_map::Iter<'a, u8, u64>,
}

impl Iterator for FrequencyIter<'_> {
    type Item = (u8, u64);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(&symbol, &count)| (symbol, count))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for FrequencyIter<'_> {}

impl<'a> IntoIterator for &'a FrequencyTable {
    type Item = (u8, u64);
    type IntoIter = FrequencyIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<u8> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl Extend<u8> for FrequencyTable {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        for symbol in iter {
            self.push(symbol);
        }
    }
}

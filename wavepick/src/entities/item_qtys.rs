use itertools::Itertools;

/// Sparse item → quantity vector, shared by the demand of an [`Order`](crate::entities::Order)
/// and the supply of an [`Aisle`](crate::entities::Aisle).
///
/// Entries are kept sorted by item id, every item appears at most once and every quantity is positive.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ItemQtys {
    entries: Vec<(usize, u64)>,
}

impl ItemQtys {
    /// Panics if an item appears more than once or a quantity is zero.
    pub fn new(entries: impl IntoIterator<Item = (usize, u64)>) -> Self {
        let entries = entries
            .into_iter()
            .sorted_unstable_by_key(|(item, _)| *item)
            .collect_vec();
        assert!(
            entries.windows(2).all(|w| w[0].0 != w[1].0),
            "item ids within a vector must be unique: {entries:?}"
        );
        assert!(
            entries.iter().all(|(_, qty)| *qty > 0),
            "quantities must be positive: {entries:?}"
        );
        Self { entries }
    }

    /// Quantity of `item`, zero if absent
    pub fn get(&self, item: usize) -> u64 {
        self.entries
            .binary_search_by_key(&item, |(i, _)| *i)
            .map_or(0, |idx| self.entries[idx].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn items(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|(item, _)| *item)
    }

    /// Sum of all quantities
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, qty)| qty).sum()
    }

    /// Number of distinct items
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest item id referenced, if any
    pub fn max_item(&self) -> Option<usize> {
        self.entries.last().map(|(item, _)| *item)
    }
}

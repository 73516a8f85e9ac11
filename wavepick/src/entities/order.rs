use crate::entities::ItemQtys;

/// Customer order: the units of every item it demands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Order {
    pub id: usize,
    /// Demanded quantity per item
    pub demand: ItemQtys,
    /// Sum of all demanded quantities, cached at construction
    pub total_units: u64,
}

impl Order {
    pub fn new(id: usize, demand: ItemQtys) -> Self {
        let total_units = demand.total();
        Self {
            id,
            demand,
            total_units,
        }
    }
}

use crate::entities::Instance;
use crate::util::assertions;

/// Item-centric view of an [`Instance`]: for every item, which orders demand it and which aisles stock it.
///
/// Built once per instance in time linear in the number of non-zeros, read-only afterwards.
#[derive(Debug, Clone)]
pub struct IncidenceIndex {
    /// `item_to_orders[i]` holds `(order_id, qty)` for every order demanding item `i`
    item_to_orders: Vec<Vec<(usize, u64)>>,
    /// `item_to_aisles[i]` holds `(aisle_id, qty)` for every aisle stocking item `i`
    item_to_aisles: Vec<Vec<(usize, u64)>>,
}

impl IncidenceIndex {
    pub fn new(instance: &Instance) -> Self {
        // sized by the items actually referenced, the declared item count may be far larger
        let n_referenced = instance
            .orders
            .iter()
            .filter_map(|o| o.demand.max_item())
            .chain(instance.aisles.iter().filter_map(|a| a.supply.max_item()))
            .max()
            .map_or(0, |item| item + 1);
        let mut item_to_orders = vec![vec![]; n_referenced];
        let mut item_to_aisles = vec![vec![]; n_referenced];

        for order in &instance.orders {
            for (item, qty) in order.demand.iter() {
                item_to_orders[item].push((order.id, qty));
            }
        }
        for aisle in &instance.aisles {
            for (item, qty) in aisle.supply.iter() {
                item_to_aisles[item].push((aisle.id, qty));
            }
        }

        let index = Self {
            item_to_orders,
            item_to_aisles,
        };
        debug_assert!(assertions::incidence_matches_instance(&index, instance));
        index
    }

    /// Orders demanding `item` with their quantities, empty if the item is unknown or not demanded
    pub fn orders_of(&self, item: usize) -> &[(usize, u64)] {
        self.item_to_orders.get(item).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Aisles stocking `item` with their quantities, empty if the item is unknown or not stocked
    pub fn aisles_of(&self, item: usize) -> &[(usize, u64)] {
        self.item_to_aisles.get(item).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Items demanded by at least one order, ascending
    pub fn demanded_items(&self) -> impl Iterator<Item = usize> + '_ {
        self.item_to_orders
            .iter()
            .enumerate()
            .filter(|(_, orders)| !orders.is_empty())
            .map(|(item, _)| item)
    }

    /// Total demand for `item` if every order were selected
    pub fn total_demand(&self, item: usize) -> u64 {
        self.orders_of(item).iter().map(|(_, q)| q).sum()
    }

    /// Total supply of `item` if every aisle were visited
    pub fn total_supply(&self, item: usize) -> u64 {
        self.aisles_of(item).iter().map(|(_, q)| q).sum()
    }

    /// One past the largest item referenced by any order or aisle
    pub fn n_items(&self) -> usize {
        self.item_to_orders.len()
    }
}

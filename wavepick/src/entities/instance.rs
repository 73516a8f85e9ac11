use crate::entities::{Aisle, Order};
use crate::util::assertions;

/// Static (unmodifiable) representation of a Wave Order Picking instance:
/// a set of orders to choose from, a set of aisles to visit and the bounds on the size of the wave.
#[derive(Debug, Clone)]
pub struct Instance {
    /// Name of the instance, usually the stem of the file it was read from
    pub name: String,
    /// Orders, indexed by their id
    pub orders: Vec<Order>,
    /// Aisles, indexed by their id
    pub aisles: Vec<Aisle>,
    /// Items are identified by integers in `[0, n_items)`
    pub n_items: usize,
    /// Minimum number of units the wave has to contain (inclusive)
    pub wave_lb: u64,
    /// Maximum number of units the wave can contain (inclusive)
    pub wave_ub: u64,
}

impl Instance {
    pub fn new(
        name: impl Into<String>,
        orders: Vec<Order>,
        aisles: Vec<Aisle>,
        n_items: usize,
        wave_lb: u64,
        wave_ub: u64,
    ) -> Self {
        assert!(
            wave_lb <= wave_ub,
            "wave lower bound ({wave_lb}) exceeds upper bound ({wave_ub})"
        );
        assert!(
            assertions::instance_ids_correct(&orders, &aisles),
            "all orders and aisles should have consecutive IDs starting from 0"
        );
        assert!(assertions::instance_items_in_range(&orders, &aisles, n_items));
        debug_assert!(assertions::order_totals_correct(&orders));

        Self {
            name: name.into(),
            orders,
            aisles,
            n_items,
            wave_lb,
            wave_ub,
        }
    }

    pub fn n_orders(&self) -> usize {
        self.orders.len()
    }

    pub fn n_aisles(&self) -> usize {
        self.aisles.len()
    }

    pub fn order(&self, id: usize) -> &Order {
        &self.orders[id]
    }

    pub fn aisle(&self, id: usize) -> &Aisle {
        &self.aisles[id]
    }

    /// Units picked if every order were part of the wave
    pub fn total_demand_units(&self) -> u64 {
        self.orders.iter().map(|o| o.total_units).sum()
    }

    /// Number of (order, item) and (aisle, item) pairs
    pub fn n_nonzeros(&self) -> usize {
        self.orders.iter().map(|o| o.demand.len()).sum::<usize>()
            + self.aisles.iter().map(|a| a.supply.len()).sum::<usize>()
    }
}

use crate::entities::{Aisle, IncidenceIndex, Instance, Order};

pub fn instance_ids_correct(orders: &[Order], aisles: &[Aisle]) -> bool {
    orders.iter().enumerate().all(|(i, order)| order.id == i)
        && aisles.iter().enumerate().all(|(i, aisle)| aisle.id == i)
}

pub fn instance_items_in_range(orders: &[Order], aisles: &[Aisle], n_items: usize) -> bool {
    orders
        .iter()
        .filter_map(|o| o.demand.max_item())
        .chain(aisles.iter().filter_map(|a| a.supply.max_item()))
        .all(|item| item < n_items)
}

pub fn order_totals_correct(orders: &[Order]) -> bool {
    orders.iter().all(|o| o.total_units == o.demand.total())
}

/// Every (order, item) and (aisle, item) pair appears exactly once in the index, with the same quantity
pub fn incidence_matches_instance(index: &IncidenceIndex, instance: &Instance) -> bool {
    let orders_match = (0..index.n_items()).all(|item| {
        index
            .orders_of(item)
            .iter()
            .all(|&(o, qty)| instance.order(o).demand.get(item) == qty)
    });
    let aisles_match = (0..index.n_items()).all(|item| {
        index
            .aisles_of(item)
            .iter()
            .all(|&(a, qty)| instance.aisle(a).supply.get(item) == qty)
    });
    let n_pairs = (0..index.n_items())
        .map(|item| index.orders_of(item).len() + index.aisles_of(item).len())
        .sum::<usize>();

    orders_match && aisles_match && n_pairs == instance.n_nonzeros()
}

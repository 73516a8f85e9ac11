use crate::entities::Instance;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Candidate solution: a set of orders forming the wave and a set of aisles to visit.
///
/// Both are true sets. Duplicate indices collapse and insertion order is irrelevant.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    pub orders: BTreeSet<usize>,
    pub aisles: BTreeSet<usize>,
}

/// A selection refers to an order or aisle the instance does not contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("order {order} does not exist (instance has {n_orders} orders)")]
    OrderOutOfRange { order: usize, n_orders: usize },
    #[error("aisle {aisle} does not exist (instance has {n_aisles} aisles)")]
    AisleOutOfRange { aisle: usize, n_aisles: usize },
}

impl Selection {
    pub fn new(
        orders: impl IntoIterator<Item = usize>,
        aisles: impl IntoIterator<Item = usize>,
    ) -> Self {
        Self {
            orders: orders.into_iter().collect(),
            aisles: aisles.into_iter().collect(),
        }
    }

    pub fn n_orders(&self) -> usize {
        self.orders.len()
    }

    pub fn n_aisles(&self) -> usize {
        self.aisles.len()
    }

    /// Checks every index refers to an existing order or aisle of `instance`
    pub fn validate(&self, instance: &Instance) -> Result<(), SelectionError> {
        if let Some(&order) = self.orders.iter().find(|&&o| o >= instance.n_orders()) {
            return Err(SelectionError::OrderOutOfRange {
                order,
                n_orders: instance.n_orders(),
            });
        }
        if let Some(&aisle) = self.aisles.iter().find(|&&a| a >= instance.n_aisles()) {
            return Err(SelectionError::AisleOutOfRange {
                aisle,
                n_aisles: instance.n_aisles(),
            });
        }
        Ok(())
    }

    /// Total units picked by the selected orders, `None` if an order does not exist
    pub fn units_picked(&self, instance: &Instance) -> Option<u64> {
        self.orders
            .iter()
            .map(|&o| instance.orders.get(o).map(|order| order.total_units))
            .sum()
    }
}

use crate::entities::{Instance, Selection, SelectionError};
use std::collections::BTreeMap;
use thiserror::Error;

/// First condition a selection was found to violate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    #[error(transparent)]
    UnknownIndex(#[from] SelectionError),
    #[error("wave too small: {picked} units picked, at least {lb} required")]
    WaveTooSmall { picked: u64, lb: u64 },
    #[error("wave too large: {picked} units picked, at most {ub} allowed")]
    WaveTooLarge { picked: u64, ub: u64 },
    #[error("item {item}: {demand} units demanded but only {supply} available")]
    ItemShortage { item: usize, demand: u64, supply: u64 },
}

/// The productivity ratio cannot be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ObjectiveError {
    #[error("no aisles visited, objective undefined")]
    NoAislesVisited,
    #[error(transparent)]
    UnknownIndex(#[from] SelectionError),
}

/// Outcome of checking a selection against an instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub feasible: bool,
    /// Why the selection is infeasible, `None` if feasible
    pub violation: Option<Violation>,
    /// Units picked per visited aisle, computed regardless of feasibility
    pub objective: Result<f64, ObjectiveError>,
    pub units_picked: u64,
    pub n_aisles: usize,
}

/// Checks whether `selection` is a feasible wave for `instance`.
///
/// 1. the units picked by the selected orders lie within `[wave_lb, wave_ub]`
/// 2. for every item demanded by a selected order, the summed demand over all selected orders
///    does not exceed the summed supply over all selected aisles
///
/// Items are examined in ascending order, so the reported violation is deterministic.
pub fn check(instance: &Instance, selection: &Selection) -> Result<(), Violation> {
    selection.validate(instance)?;

    let picked: u64 = selection
        .orders
        .iter()
        .map(|&o| instance.order(o).total_units)
        .sum();
    if picked < instance.wave_lb {
        return Err(Violation::WaveTooSmall {
            picked,
            lb: instance.wave_lb,
        });
    }
    if picked > instance.wave_ub {
        return Err(Violation::WaveTooLarge {
            picked,
            ub: instance.wave_ub,
        });
    }

    // demand per required item, supply is only tallied for those
    let mut balance: BTreeMap<usize, (u64, u64)> = BTreeMap::new();
    for &o in &selection.orders {
        for (item, qty) in instance.order(o).demand.iter() {
            balance.entry(item).or_default().0 += qty;
        }
    }
    for &a in &selection.aisles {
        for (item, qty) in instance.aisle(a).supply.iter() {
            if let Some((_, supply)) = balance.get_mut(&item) {
                *supply += qty;
            }
        }
    }

    match balance
        .into_iter()
        .find(|(_, (demand, supply))| demand > supply)
    {
        Some((item, (demand, supply))) => Err(Violation::ItemShortage {
            item,
            demand,
            supply,
        }),
        None => Ok(()),
    }
}

pub fn is_feasible(instance: &Instance, selection: &Selection) -> bool {
    check(instance, selection).is_ok()
}

/// Productivity ratio of a selection: units picked divided by the number of visited aisles.
pub fn objective(instance: &Instance, selection: &Selection) -> Result<f64, ObjectiveError> {
    selection.validate(instance)?;
    if selection.aisles.is_empty() {
        return Err(ObjectiveError::NoAislesVisited);
    }
    let picked: u64 = selection
        .orders
        .iter()
        .map(|&o| instance.order(o).total_units)
        .sum();
    Ok(picked as f64 / selection.n_aisles() as f64)
}

/// Runs both [`check`] and [`objective`] on a selection.
pub fn evaluate(instance: &Instance, selection: &Selection) -> Verdict {
    let violation = check(instance, selection).err();
    Verdict {
        feasible: violation.is_none(),
        violation,
        objective: objective(instance, selection),
        units_picked: selection.units_picked(instance).unwrap_or(0),
        n_aisles: selection.n_aisles(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Aisle, ItemQtys, Order};
    use float_cmp::approx_eq;
    use test_case::test_case;

    /// orders {0:{0:3}, 1:{0:2,1:2}}, aisles {0:{0:5}, 1:{1:2}}, wave in [2, 5]
    fn scenario() -> Instance {
        let orders = vec![
            Order::new(0, ItemQtys::new([(0, 3)])),
            Order::new(1, ItemQtys::new([(0, 2), (1, 2)])),
        ];
        let aisles = vec![
            Aisle::new(0, ItemQtys::new([(0, 5)])),
            Aisle::new(1, ItemQtys::new([(1, 2)])),
        ];
        Instance::new("scenario", orders, aisles, 2, 2, 5)
    }

    #[test]
    fn single_order_single_aisle_is_feasible() {
        let instance = scenario();
        let selection = Selection::new([0], [0]);

        assert!(is_feasible(&instance, &selection));
        let obj = objective(&instance, &selection).unwrap();
        assert!(approx_eq!(f64, obj, 3.0));
    }

    #[test]
    fn both_orders_single_aisle_is_infeasible() {
        let instance = scenario();
        let selection = Selection::new([0, 1], [0]);

        assert_eq!(
            check(&instance, &selection),
            Err(Violation::WaveTooLarge { picked: 7, ub: 5 })
        );
        assert!(!is_feasible(&instance, &selection));
    }

    #[test]
    fn shortage_reported_for_uncovered_item() {
        let instance = scenario();
        let selection = Selection::new([1], [0]);

        assert_eq!(
            check(&instance, &selection),
            Err(Violation::ItemShortage {
                item: 1,
                demand: 2,
                supply: 0
            })
        );
    }

    #[test]
    fn zero_aisles_is_undefined_not_infeasible() {
        let orders = vec![Order::new(0, ItemQtys::new([(0, 3)]))];
        let aisles = vec![Aisle::new(0, ItemQtys::new([(1, 1)]))];
        let instance = Instance::new("no-aisles", orders, aisles, 2, 0, 5);

        // no orders, no aisles: within bounds and nothing to cover
        let empty = Selection::default();
        assert!(is_feasible(&instance, &empty));
        assert_eq!(
            objective(&instance, &empty),
            Err(ObjectiveError::NoAislesVisited)
        );

        let verdict = evaluate(&instance, &Selection::new([0], []));
        assert!(!verdict.feasible);
        assert_eq!(verdict.objective, Err(ObjectiveError::NoAislesVisited));
        assert_eq!(verdict.units_picked, 3);
    }

    #[test_case(&[0], &[0, 1], 1.5; "extra aisle halves the ratio")]
    #[test_case(&[1], &[0, 1], 2.0; "both items covered")]
    #[test_case(&[0, 0, 0], &[0, 0], 3.0; "duplicates collapse")]
    fn objective_values(orders: &[usize], aisles: &[usize], expected: f64) {
        let instance = scenario();
        let selection = Selection::new(orders.iter().copied(), aisles.iter().copied());
        let obj = objective(&instance, &selection).unwrap();
        assert!(approx_eq!(f64, obj, expected));
    }

    #[test]
    fn unknown_indices_are_reported() {
        let instance = scenario();
        let selection = Selection::new([0, 9], [0]);

        assert_eq!(
            check(&instance, &selection),
            Err(Violation::UnknownIndex(SelectionError::OrderOutOfRange {
                order: 9,
                n_orders: 2
            }))
        );
        assert_eq!(
            objective(&instance, &Selection::new([0], [4])),
            Err(ObjectiveError::UnknownIndex(
                SelectionError::AisleOutOfRange {
                    aisle: 4,
                    n_aisles: 2
                }
            ))
        );
    }

    #[test]
    fn evaluation_is_idempotent() {
        let instance = scenario();
        let selection = Selection::new([1], [0, 1]);
        let first = evaluate(&instance, &selection);
        let second = evaluate(&instance, &selection);
        assert_eq!(first, second);
        assert!(first.feasible);
    }
}

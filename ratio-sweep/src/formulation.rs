use crate::solver::{BinaryProgram, ConstraintId, Relation, Sense, VarId};
use itertools::Itertools;
use wavepick::entities::{IncidenceIndex, Instance, Selection};

pub const WAVE_LB: &str = "wave_lb";
pub const WAVE_UB: &str = "wave_ub";
pub const AISLE_BUDGET: &str = "aisle_budget";

/// Binary program selecting the wave with the most units while visiting at most `k` aisles.
///
/// * `x_o` - order `o` is part of the wave
/// * `y_a` - aisle `a` is visited
///
/// ```text
/// max  Σ units(o)·x_o
/// s.t. Σ units(o)·x_o ≥ wave_lb
///      Σ units(o)·x_o ≤ wave_ub
///      Σ q(o,i)·x_o ≤ Σ q(a,i)·y_a    for every demanded item i
///      Σ y_a ≤ k
/// ```
///
/// Only the right-hand side of the aisle budget changes between values of `k`.
#[derive(Debug, Clone)]
pub struct WaveFormulation {
    pub program: BinaryProgram,
    pub order_vars: Vec<VarId>,
    pub aisle_vars: Vec<VarId>,
    budget: ConstraintId,
}

impl WaveFormulation {
    pub fn new(instance: &Instance, index: &IncidenceIndex, k: usize) -> Self {
        let mut program = BinaryProgram::new(Sense::Maximize);

        let order_vars = instance
            .orders
            .iter()
            .map(|o| program.add_var(format!("x_{}", o.id)))
            .collect_vec();
        let aisle_vars = instance
            .aisles
            .iter()
            .map(|a| program.add_var(format!("y_{}", a.id)))
            .collect_vec();

        let units = instance
            .orders
            .iter()
            .map(|o| (order_vars[o.id], o.total_units as f64))
            .collect_vec();

        program.add_constraint(WAVE_LB, units.clone(), Relation::Ge, instance.wave_lb as f64);
        program.add_constraint(WAVE_UB, units.clone(), Relation::Le, instance.wave_ub as f64);

        // demand - supply <= 0, items nobody demands impose nothing
        for item in index.demanded_items() {
            let demand = index
                .orders_of(item)
                .iter()
                .map(|&(o, q)| (order_vars[o], q as f64));
            let supply = index
                .aisles_of(item)
                .iter()
                .map(|&(a, q)| (aisle_vars[a], -(q as f64)));
            program.add_constraint(
                format!("availability_{item}"),
                demand.chain(supply).collect(),
                Relation::Le,
                0.0,
            );
        }

        let budget = program.add_constraint(
            AISLE_BUDGET,
            aisle_vars.iter().map(|&y| (y, 1.0)).collect(),
            Relation::Le,
            k as f64,
        );

        program.set_objective(units, Sense::Maximize);

        Self {
            program,
            order_vars,
            aisle_vars,
            budget,
        }
    }

    pub fn set_aisle_budget(&mut self, k: usize) {
        self.program.set_rhs(self.budget, k as f64);
    }

    pub fn aisle_budget(&self) -> usize {
        self.program.constraint(self.budget).rhs as usize
    }

    /// Orders and aisles set to one in `assignment`
    pub fn selection(&self, assignment: &[bool]) -> Selection {
        Selection::new(
            self.order_vars
                .iter()
                .enumerate()
                .filter(|&(_, &x)| assignment[x])
                .map(|(o, _)| o),
            self.aisle_vars
                .iter()
                .enumerate()
                .filter(|&(_, &y)| assignment[y])
                .map(|(a, _)| a),
        )
    }

    /// Assignment selecting exactly the orders and aisles of `selection`
    pub fn assignment(&self, selection: &Selection) -> Vec<bool> {
        let mut assignment = vec![false; self.program.n_vars()];
        for &o in &selection.orders {
            assignment[self.order_vars[o]] = true;
        }
        for &a in &selection.aisles {
            assignment[self.aisle_vars[a]] = true;
        }
        assignment
    }
}

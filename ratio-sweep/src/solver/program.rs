use serde::{Deserialize, Serialize};

/// Index of a binary variable within a [`BinaryProgram`]
pub type VarId = usize;

/// Handle to a constraint of a [`BinaryProgram`], used to change its right-hand side in place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstraintId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relation {
    Le,
    Ge,
    Eq,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sense {
    Maximize,
    Minimize,
}

/// `Σ coef · var  (≤ | ≥ | =)  rhs`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    pub name: String,
    pub terms: Vec<(VarId, f64)>,
    pub relation: Relation,
    pub rhs: f64,
}

impl LinearConstraint {
    pub fn lhs(&self, assignment: &[bool]) -> f64 {
        eval_terms(&self.terms, assignment)
    }

    pub fn is_satisfied_by(&self, assignment: &[bool]) -> bool {
        let lhs = self.lhs(assignment);
        match self.relation {
            Relation::Le => lhs <= self.rhs,
            Relation::Ge => lhs >= self.rhs,
            Relation::Eq => lhs == self.rhs,
        }
    }
}

/// Solver-agnostic description of a linear program over binary variables.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryProgram {
    var_names: Vec<String>,
    constraints: Vec<LinearConstraint>,
    objective: Vec<(VarId, f64)>,
    sense: Sense,
}

impl BinaryProgram {
    pub fn new(sense: Sense) -> Self {
        Self {
            var_names: vec![],
            constraints: vec![],
            objective: vec![],
            sense,
        }
    }

    pub fn add_var(&mut self, name: impl Into<String>) -> VarId {
        self.var_names.push(name.into());
        self.var_names.len() - 1
    }

    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        terms: Vec<(VarId, f64)>,
        relation: Relation,
        rhs: f64,
    ) -> ConstraintId {
        debug_assert!(terms.iter().all(|(v, _)| *v < self.var_names.len()));
        self.constraints.push(LinearConstraint {
            name: name.into(),
            terms,
            relation,
            rhs,
        });
        ConstraintId(self.constraints.len() - 1)
    }

    pub fn set_objective(&mut self, terms: Vec<(VarId, f64)>, sense: Sense) {
        debug_assert!(terms.iter().all(|(v, _)| *v < self.var_names.len()));
        self.objective = terms;
        self.sense = sense;
    }

    /// Modifies the right-hand side of a single constraint, leaving all others untouched
    pub fn set_rhs(&mut self, id: ConstraintId, rhs: f64) {
        self.constraints[id.0].rhs = rhs;
    }

    pub fn constraint(&self, id: ConstraintId) -> &LinearConstraint {
        &self.constraints[id.0]
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn var_names(&self) -> &[String] {
        &self.var_names
    }

    pub fn n_vars(&self) -> usize {
        self.var_names.len()
    }

    pub fn objective(&self) -> &[(VarId, f64)] {
        &self.objective
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    /// Objective value attained by `assignment`
    pub fn evaluate(&self, assignment: &[bool]) -> f64 {
        eval_terms(&self.objective, assignment)
    }

    pub fn is_satisfied_by(&self, assignment: &[bool]) -> bool {
        assignment.len() == self.n_vars()
            && self.constraints.iter().all(|c| c.is_satisfied_by(assignment))
    }

    /// Number of non-zero coefficients over all constraints
    pub fn n_nonzeros(&self) -> usize {
        self.constraints.iter().map(|c| c.terms.len()).sum()
    }
}

fn eval_terms(terms: &[(VarId, f64)], assignment: &[bool]) -> f64 {
    terms
        .iter()
        .filter(|(v, _)| assignment[*v])
        .map(|(_, coef)| coef)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rhs_updates_only_touch_one_constraint() {
        let mut program = BinaryProgram::new(Sense::Maximize);
        let a = program.add_var("a");
        let b = program.add_var("b");
        let cap = program.add_constraint("cap", vec![(a, 1.0), (b, 1.0)], Relation::Le, 1.0);
        program.add_constraint("min", vec![(a, 2.0), (b, 3.0)], Relation::Ge, 2.0);
        program.set_objective(vec![(a, 2.0), (b, 3.0)], Sense::Maximize);

        let before = program.constraints()[1].clone();
        program.set_rhs(cap, 2.0);

        assert_eq!(program.constraint(cap).rhs, 2.0);
        assert_eq!(program.constraints()[1], before);
        assert!(program.is_satisfied_by(&[true, true]));
        assert!(!program.is_satisfied_by(&[false, false]));
        assert_eq!(program.evaluate(&[true, true]), 5.0);
        assert_eq!(program.n_nonzeros(), 4);
    }
}

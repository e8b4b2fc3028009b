use good_lp::{
    constraint, default_solver, variable, variables, Expression, ResolutionError, Solution,
    SolverModel, Variable,
};
use log::{debug, info};
use thiserror::Error;

use crate::error::ModelError;
use crate::model::expr::{LinExpr, Sense, VarId, VarKind};
use crate::model::Model;

/// Terminal solver verdicts, surfaced unchanged to the caller.
///
/// The core performs no retry or relaxation; if a relaxation strategy is
/// wanted it belongs in a layer above this interface.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error("model is infeasible")]
    Infeasible,
    #[error("model is unbounded")]
    Unbounded,
    #[error("solver failure: {0}")]
    Solver(String),
}

/// A concrete value for every declared variable, plus the realized objective.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    values: Vec<f64>,
    objective_value: f64,
}

impl Assignment {
    pub fn new(values: Vec<f64>, objective_value: f64) -> Assignment {
        Assignment {
            values,
            objective_value,
        }
    }

    /// The solved value of a single variable.
    pub fn value(&self, var: VarId) -> Result<f64, ModelError> {
        self.values
            .get(var.index())
            .copied()
            .ok_or(ModelError::IndexOutOfRange {
                subject: "assignment",
                axis: "variable",
                index: var.index(),
                bound: self.values.len(),
            })
    }

    /// Evaluates a linear expression under this assignment.
    pub fn eval(&self, expr: &LinExpr) -> Result<f64, ModelError> {
        let mut total = expr.constant();
        for &(var, coef) in expr.terms() {
            total += coef * self.value(var)?;
        }
        Ok(total)
    }

    pub fn objective_value(&self) -> f64 {
        self.objective_value
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The boundary to the external MILP engine: accept a model, return an
/// optimal or best-found assignment, or a terminal verdict.
pub trait SolveAdapter {
    fn solve(&self, model: &Model) -> Result<Assignment, SolveError>;
}

/// The bundled backend. Lowers the model into `good_lp` and runs the
/// pure-Rust `microlp` branch-and-bound solver synchronously.
#[derive(Debug, Default)]
pub struct MilpSolver;

impl MilpSolver {
    fn lower(expr: &LinExpr, handles: &[Variable]) -> Expression {
        expr.terms()
            .iter()
            .map(|&(var, coef)| coef * handles[var.index()])
            .sum::<Expression>()
            + expr.constant()
    }
}

impl SolveAdapter for MilpSolver {
    fn solve(&self, model: &Model) -> Result<Assignment, SolveError> {
        info!(
            "solving: {} variables, {} constraints",
            model.variables().len(),
            model.constraints().len()
        );

        let mut problem = variables!();
        let handles: Vec<Variable> = model
            .variables()
            .defs()
            .iter()
            .map(|def| {
                let definition = variable().name(def.name.clone());
                let definition = match def.kind {
                    VarKind::Binary => definition.binary(),
                    VarKind::Integer => definition.integer().min(def.lower).max(def.upper),
                    VarKind::Continuous => definition.min(def.lower).max(def.upper),
                };
                problem.add(definition)
            })
            .collect();

        let objective = Self::lower(&model.objective().expr, &handles);

        let mut solver = problem.minimise(objective).using(default_solver);
        for c in model.constraints() {
            let lhs = Self::lower(&c.expr, &handles);
            let lowered = match c.sense {
                Sense::Eq => constraint::eq(lhs, c.rhs),
                Sense::Le => constraint::leq(lhs, c.rhs),
                Sense::Ge => constraint::geq(lhs, c.rhs),
            };
            solver = solver.with(lowered);
        }

        let solution = solver.solve().map_err(|e| match e {
            ResolutionError::Infeasible => SolveError::Infeasible,
            ResolutionError::Unbounded => SolveError::Unbounded,
            other => SolveError::Solver(format!("{other:?}")),
        })?;

        let values: Vec<f64> = handles.iter().map(|&v| solution.value(v)).collect();
        let objective_value = model.objective().expr.eval_with(|var| values[var.index()]);
        debug!("solve finished, objective {objective_value}");

        Ok(Assignment::new(values, objective_value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::tests::ConstantSource;
    use crate::model::ModelConfig;
    use crate::network::{Dims, Network};

    #[test]
    fn solves_the_minimal_instance() {
        let network =
            Network::from_source(Dims::new(1, 1, 1), &mut ConstantSource::default()).unwrap();
        let model = Model::build(&network, ModelConfig::default()).unwrap();

        let assignment = MilpSolver.solve(&model).unwrap();

        let x = model.variables().x(0, 0, 0, 0).unwrap();
        let y = model.variables().y(0, 0, 0).unwrap();
        let z = model.variables().z(0, 0, 0).unwrap();

        // the single good must ship on the only triple, in one container
        assert!((assignment.value(x).unwrap() - 1.0).abs() < 1e-6);
        assert!((assignment.value(y).unwrap() - 1.0).abs() < 1e-6);
        // nothing ties z to the dispatch, so minimization drives it to zero
        assert!(assignment.value(z).unwrap().abs() < 1e-6);
    }

    #[test]
    fn assignment_lookup_is_checked() {
        let assignment = Assignment::new(vec![1.0, 0.0], 1.0);
        assert_eq!(assignment.value(VarId(1)).unwrap(), 0.0);
        assert_eq!(
            assignment.value(VarId(2)).unwrap_err(),
            ModelError::IndexOutOfRange {
                subject: "assignment",
                axis: "variable",
                index: 2,
                bound: 2,
            }
        );
    }
}

//! Bridge from [`LinearProgram`] to the `good_lp` microlp backend.

use good_lp::{
    Expression, ProblemVariables, ResolutionError, Solution as _, SolverModel, constraint, microlp, variable,
};

use crate::model::{LinearExpr, LinearProgram, ModelError, ObjSense, Sense, VarId, VarKind};

/// Integer variables within this distance of an integer are snapped to it.
const INTEGRALITY_TOL: f64 = 1e-6;

/// Optimal assignment of a solved [`LinearProgram`].
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    objective: f64,
    values: Vec<f64>,
}

impl Solution {
    #[inline] pub fn objective(&self) -> f64 { self.objective }

    #[inline] pub fn value(&self, var: VarId) -> f64 { self.values[var.0] }

    #[inline] pub fn values(&self) -> &[f64] { &self.values }
}

/// Solve `lp` to optimality.
pub fn solve(lp: &LinearProgram) -> Result<Solution, ModelError> {
    let mut vars = ProblemVariables::new();
    let handles: Vec<good_lp::Variable> = lp.variables().iter()
        .map(|var| {
            let mut def = variable().name(var.name.clone());
            if let Some(lo) = var.lower { def = def.min(lo) }
            if let Some(hi) = var.upper { def = def.max(hi) }
            match var.kind {
                VarKind::Continuous => {}
                VarKind::Integer => def = def.integer(),
                VarKind::Binary => def = def.binary(),
            }
            vars.add(def)
        })
        .collect();

    let to_expression = |expr: &LinearExpr| -> Expression {
        expr.terms()
            .map(|(var, coef)| coef * handles[var.0])
            .sum::<Expression>() + expr.constant_term()
    };

    let objective = to_expression(lp.objective());
    let unsolved = match lp.sense() {
        ObjSense::Minimize => vars.minimise(objective),
        ObjSense::Maximize => vars.maximise(objective),
    };

    let mut model = unsolved.using(microlp);
    for c in lp.constraints() {
        let lhs = to_expression(&c.expr);
        model = model.with(match c.sense {
            Sense::Le => constraint::leq(lhs, c.rhs),
            Sense::Ge => constraint::geq(lhs, c.rhs),
            Sense::Eq => constraint::eq(lhs, c.rhs),
        });
    }

    let solved = model.solve().map_err(|err| match err {
        ResolutionError::Infeasible => ModelError::Infeasible(lp.name().to_string()),
        ResolutionError::Unbounded => ModelError::Unbounded(lp.name().to_string()),
        other => ModelError::Solver { model: lp.name().to_string(), message: other.to_string() },
    })?;

    let values: Vec<f64> = lp.variables().iter().zip(&handles)
        .map(|(var, &handle)| {
            let value = solved.value(handle);
            match var.kind {
                VarKind::Continuous => value,
                VarKind::Integer | VarKind::Binary if (value - value.round()).abs() < INTEGRALITY_TOL => value.round(),
                VarKind::Integer | VarKind::Binary => value,
            }
        })
        .collect();

    let objective = lp.objective().evaluate(&values);
    Ok(Solution { objective, values })
}

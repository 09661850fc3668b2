use std::collections::BTreeMap;

/// Coefficients at or below this magnitude are dropped from expressions.
const EPS: f64 = 1e-12;

/// Index of a variable inside its [`LinearProgram`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(pub(crate) usize);

impl VarId {
    #[inline] pub fn index(self) -> usize { self.0 }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VarKind {
    Continuous,
    Integer,
    Binary,
}

/// A decision variable: name, domain, and optional bounds (`None` = infinite).
#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    pub name: String,
    pub kind: VarKind,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

/// Sparse affine expression `sum(c_i * x_i) + constant`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinearExpr {
    pub(crate) terms: BTreeMap<VarId, f64>,
    pub(crate) constant: f64,
}

impl LinearExpr {
    pub fn zero() -> Self { Self::default() }

    pub fn constant(value: f64) -> Self {
        Self { terms: BTreeMap::new(), constant: value }
    }

    pub fn term(var: VarId, coef: f64) -> Self {
        Self::zero().plus(var, coef)
    }

    pub fn from_terms(terms: &[(VarId, f64)]) -> Self {
        terms.iter().fold(Self::zero(), |expr, &(var, coef)| expr.plus(var, coef))
    }

    /// Add `coef * var`, merging with an existing term.
    pub fn plus(mut self, var: VarId, coef: f64) -> Self {
        *self.terms.entry(var).or_insert(0.0) += coef;
        self.terms.retain(|_, c| c.abs() > EPS);
        self
    }

    pub fn with_constant(mut self, value: f64) -> Self {
        self.constant += value;
        self
    }

    pub fn add_inplace(&mut self, other: &LinearExpr) {
        self.constant += other.constant;
        for (&var, &coef) in &other.terms {
            *self.terms.entry(var).or_insert(0.0) += coef;
        }
        self.terms.retain(|_, c| c.abs() > EPS);
    }

    pub fn sub_inplace(&mut self, other: &LinearExpr) {
        self.add_inplace(&other.scale(-1.0));
    }

    pub fn scale(&self, k: f64) -> Self {
        Self {
            terms: self.terms.iter()
                .map(|(&var, &coef)| (var, coef * k))
                .filter(|(_, coef)| coef.abs() > EPS)
                .collect(),
            constant: self.constant * k,
        }
    }

    #[inline] pub fn terms(&self) -> impl Iterator<Item = (VarId, f64)> + '_ { self.terms.iter().map(|(&v, &c)| (v, c)) }

    #[inline] pub fn constant_term(&self) -> f64 { self.constant }

    #[inline] pub fn coefficient(&self, var: VarId) -> f64 { self.terms.get(&var).copied().unwrap_or(0.0) }

    /// Evaluate against a full assignment indexed by `VarId`.
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.constant + self.terms.iter().map(|(var, coef)| coef * values[var.0]).sum::<f64>()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sense {
    Le,
    Ge,
    Eq,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjSense {
    Minimize,
    Maximize,
}

/// A named linear constraint `expr <sense> rhs` with no constant in `expr`.
#[derive(Clone, Debug, PartialEq)]
pub struct Constraint {
    pub name: String,
    pub expr: LinearExpr,
    pub sense: Sense,
    pub rhs: f64,
}

/// Arena of variables and constraints for one optimization model.
#[derive(Clone, Debug)]
pub struct LinearProgram {
    name: String,
    sense: ObjSense,
    objective: LinearExpr,
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
}

impl LinearProgram {
    pub fn new(name: impl Into<String>, sense: ObjSense) -> Self {
        Self {
            name: name.into(),
            sense,
            objective: LinearExpr::zero(),
            variables: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Register a variable and return its handle.
    pub fn add_var(&mut self, name: impl Into<String>, kind: VarKind, lower: Option<f64>, upper: Option<f64>) -> VarId {
        let (lower, upper) = match kind {
            VarKind::Binary => (Some(0.0), Some(1.0)),
            _ => (lower, upper),
        };
        self.variables.push(Variable { name: name.into(), kind, lower, upper });
        VarId(self.variables.len() - 1)
    }

    /// Add `expr <sense> rhs`, moving any constant of `expr` to the right-hand side.
    pub fn add_constraint(&mut self, name: impl Into<String>, mut expr: LinearExpr, sense: Sense, rhs: f64) {
        let rhs = rhs - expr.constant;
        expr.constant = 0.0;
        self.constraints.push(Constraint { name: name.into(), expr, sense, rhs });
    }

    pub fn set_objective(&mut self, objective: LinearExpr) {
        self.objective = objective;
    }

    #[inline] pub fn name(&self) -> &str { &self.name }

    #[inline] pub fn sense(&self) -> ObjSense { self.sense }

    #[inline] pub fn objective(&self) -> &LinearExpr { &self.objective }

    #[inline] pub fn variables(&self) -> &[Variable] { &self.variables }

    #[inline] pub fn variable(&self, var: VarId) -> &Variable { &self.variables[var.0] }

    #[inline] pub fn constraints(&self) -> &[Constraint] { &self.constraints }

    #[inline] pub fn num_variables(&self) -> usize { self.variables.len() }

    #[inline] pub fn num_constraints(&self) -> usize { self.constraints.len() }

    /// Check whether an assignment satisfies every bound and constraint within `tol`.
    pub fn is_feasible(&self, values: &[f64], tol: f64) -> bool {
        let bounds_ok = self.variables.iter().zip(values).all(|(var, &value)| {
            var.lower.is_none_or(|lo| value >= lo - tol) && var.upper.is_none_or(|hi| value <= hi + tol)
        });

        bounds_ok && self.constraints.iter().all(|c| {
            let lhs = c.expr.evaluate(values);
            match c.sense {
                Sense::Le => lhs <= c.rhs + tol,
                Sense::Ge => lhs >= c.rhs - tol,
                Sense::Eq => (lhs - c.rhs).abs() <= tol,
            }
        })
    }
}

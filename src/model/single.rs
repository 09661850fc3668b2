use crate::{model::{FacilityPlan, LinearExpr, LinearProgram, ModelError, ObjSense, Sense, VarId, VarKind, solve}, site::Site};

/// One facility at integer `(u, v)` minimizing total weighted rectilinear distance.
///
/// Per site `i`, the free integers `d_x{i}` and `d_y{i}` bound `|x_i - u|`
/// and `|y_i - v|` from above; minimization drives them down to the absolute
/// values. The prevent-build row `d_x{i} + d_y{i} >= 1` only applies to these
/// bounds, so the facility can still land on a site while the objective charges
/// that site a distance of 1. See [`FacilityPlan::facilities_on_sites`].
#[derive(Clone, Debug)]
pub struct SingleFacilityModel {
    lp: LinearProgram,
    u: VarId,
    v: VarId,
    /// Per-site `(d_x, d_y)` handles, indexed like the input sites.
    distances: Vec<(VarId, VarId)>,
}

impl SingleFacilityModel {
    pub fn build(sites: &[Site]) -> Result<Self, ModelError> {
        if sites.is_empty() { return Err(ModelError::NoSites) }

        let mut lp = LinearProgram::new("Facility_Problem", ObjSense::Minimize);
        let u = lp.add_var("u", VarKind::Integer, Some(0.0), None);
        let v = lp.add_var("v", VarKind::Integer, Some(0.0), None);

        let distances: Vec<(VarId, VarId)> = (0..sites.len())
            .map(|i| (
                lp.add_var(format!("d_x{i}"), VarKind::Integer, None, None),
                lp.add_var(format!("d_y{i}"), VarKind::Integer, None, None),
            ))
            .collect();

        let mut objective = LinearExpr::zero();
        for (site, &(dx, dy)) in sites.iter().zip(&distances) {
            let p = site.weight() as f64;
            objective = objective.plus(dx, p).plus(dy, p);
        }
        lp.set_objective(objective);

        for (i, (site, &(dx, dy))) in sites.iter().zip(&distances).enumerate() {
            let (x, y) = (site.x() as f64, site.y() as f64);

            // x - u <= dx  and  -(x - u) <= dx
            lp.add_constraint(format!("Neighborhood_{i}_X_UB"), LinearExpr::from_terms(&[(u, -1.0), (dx, -1.0)]), Sense::Le, -x);
            lp.add_constraint(format!("Neighborhood_{i}_X_LB"), LinearExpr::from_terms(&[(u, 1.0), (dx, -1.0)]), Sense::Le, x);
            lp.add_constraint(format!("Neighborhood_{i}_Y_UB"), LinearExpr::from_terms(&[(v, -1.0), (dy, -1.0)]), Sense::Le, -y);
            lp.add_constraint(format!("Neighborhood_{i}_Y_LB"), LinearExpr::from_terms(&[(v, 1.0), (dy, -1.0)]), Sense::Le, y);

            lp.add_constraint(format!("Neighborhood_{i}_Prevent_Build"), LinearExpr::from_terms(&[(dx, 1.0), (dy, 1.0)]), Sense::Ge, 1.0);
        }

        Ok(Self { lp, u, v, distances })
    }

    #[inline] pub fn lp(&self) -> &LinearProgram { &self.lp }

    /// Handles of the facility coordinates `(u, v)`.
    #[inline] pub fn location(&self) -> (VarId, VarId) { (self.u, self.v) }

    /// Handles of the distance variables of site `i`.
    #[inline] pub fn distance_vars(&self, i: usize) -> (VarId, VarId) { self.distances[i] }

    pub fn solve(&self) -> Result<FacilityPlan, ModelError> {
        let solution = solve(&self.lp)?;
        let location = (solution.value(self.u).round() as i64, solution.value(self.v).round() as i64);
        Ok(FacilityPlan::new(vec![location], solution.objective()))
    }
}

use crate::{model::{FacilityPlan, LinearExpr, LinearProgram, ModelError, ObjSense, Sense, VarId, VarKind, solve}, site::Site};

/// Default big-M constant disabling one of the two nearest-facility rows per site.
pub const DEFAULT_BIG_M: f64 = 99_999.0;

/// Decision variables owned by one site in the two-facility model.
#[derive(Clone, Copy, Debug)]
pub struct SiteVars {
    /// `(d_x, d_y)` towards facility 1 and facility 2.
    pub distances: [(VarId, VarId); 2],
    /// `E_k`: weighted distance to the nearer facility.
    pub nearest: VarId,
    /// `g_k`: 1 releases the facility-1 row, 0 releases the facility-2 row.
    pub choice: VarId,
}

/// Two facilities minimizing the sum of weighted distances to the nearer one.
///
/// As in [`SingleFacilityModel`](crate::model::SingleFacilityModel), the
/// `Site_{k}_F{f}_Prevent_Build` rows bound the distance variables rather than
/// the facility position, so a solved facility may still sit on a site.
#[derive(Clone, Debug)]
pub struct TwoFacilityModel {
    lp: LinearProgram,
    facilities: [(VarId, VarId); 2],
    site_vars: Vec<SiteVars>,
    big_m: f64,
}

impl TwoFacilityModel {
    pub fn build(sites: &[Site]) -> Result<Self, ModelError> {
        Self::build_with_big_m(sites, DEFAULT_BIG_M)
    }

    /// Build with a custom big-M; it must exceed every weighted site distance
    /// the solver may consider.
    pub fn build_with_big_m(sites: &[Site], big_m: f64) -> Result<Self, ModelError> {
        if sites.is_empty() { return Err(ModelError::NoSites) }

        let mut lp = LinearProgram::new("Double_Facility_Problem", ObjSense::Minimize);
        let facilities = [1, 2].map(|f| (
            lp.add_var(format!("u_{f}"), VarKind::Integer, Some(0.0), None),
            lp.add_var(format!("v_{f}"), VarKind::Integer, Some(0.0), None),
        ));

        let site_vars: Vec<SiteVars> = (0..sites.len())
            .map(|k| {
                let distances = [1, 2].map(|f| (
                    lp.add_var(format!("d_x{k}_to_{f}"), VarKind::Integer, Some(0.0), None),
                    lp.add_var(format!("d_y{k}_to_{f}"), VarKind::Integer, Some(0.0), None),
                ));
                let nearest = lp.add_var(format!("E_{k}"), VarKind::Integer, Some(1.0), None);
                let choice = lp.add_var(format!("g_{k}"), VarKind::Binary, None, None);
                SiteVars { distances, nearest, choice }
            })
            .collect();

        lp.set_objective(site_vars.iter().fold(LinearExpr::zero(), |obj, vars| obj.plus(vars.nearest, 1.0)));

        for (k, (site, vars)) in sites.iter().zip(&site_vars).enumerate() {
            let (x, y) = (site.x() as f64, site.y() as f64);
            let p = site.weight() as f64;

            for (f, (&(u, v), &(dx, dy))) in facilities.iter().zip(&vars.distances).enumerate() {
                let tag = format!("Site_{k}_F{}", f + 1);
                lp.add_constraint(format!("{tag}_X_UB"), LinearExpr::from_terms(&[(u, -1.0), (dx, -1.0)]), Sense::Le, -x);
                lp.add_constraint(format!("{tag}_X_LB"), LinearExpr::from_terms(&[(u, 1.0), (dx, -1.0)]), Sense::Le, x);
                lp.add_constraint(format!("{tag}_Y_UB"), LinearExpr::from_terms(&[(v, -1.0), (dy, -1.0)]), Sense::Le, -y);
                lp.add_constraint(format!("{tag}_Y_LB"), LinearExpr::from_terms(&[(v, 1.0), (dy, -1.0)]), Sense::Le, y);
                lp.add_constraint(format!("{tag}_Prevent_Build"), LinearExpr::from_terms(&[(dx, 1.0), (dy, 1.0)]), Sense::Ge, 1.0);
            }

            // p (dx1 + dy1) - B g - E <= 0
            let [(dx1, dy1), (dx2, dy2)] = vars.distances;
            lp.add_constraint(
                format!("Site_{k}_Nearest_F1"),
                LinearExpr::from_terms(&[(dx1, p), (dy1, p), (vars.choice, -big_m), (vars.nearest, -1.0)]),
                Sense::Le,
                0.0,
            );
            // p (dx2 + dy2) - B (1 - g) - E <= 0
            lp.add_constraint(
                format!("Site_{k}_Nearest_F2"),
                LinearExpr::from_terms(&[(dx2, p), (dy2, p), (vars.choice, big_m), (vars.nearest, -1.0)]).with_constant(-big_m),
                Sense::Le,
                0.0,
            );
        }

        Ok(Self { lp, facilities, site_vars, big_m })
    }

    #[inline] pub fn lp(&self) -> &LinearProgram { &self.lp }

    #[inline] pub fn big_m(&self) -> f64 { self.big_m }

    /// Handles of facility `f` (0 or 1) coordinates.
    #[inline] pub fn facility(&self, f: usize) -> (VarId, VarId) { self.facilities[f] }

    #[inline] pub fn site_vars(&self, k: usize) -> &SiteVars { &self.site_vars[k] }

    pub fn solve(&self) -> Result<FacilityPlan, ModelError> {
        let solution = solve(&self.lp)?;
        let locations = self.facilities.iter()
            .map(|&(u, v)| (solution.value(u).round() as i64, solution.value(v).round() as i64))
            .collect();
        Ok(FacilityPlan::new(locations, solution.objective()))
    }
}

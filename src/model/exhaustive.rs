//! Brute-force facility search over the non-site grid cells.
//!
//! Candidates are restricted to the site grid, which is where the optimal
//! rectilinear facility sits for every non-degenerate input.

use rayon::prelude::*;

use crate::{field::{FieldError, compute_field}, model::{FacilityPlan, ModelError}, site::Site};

/// Best single facility cell: the minimum of the raw weighted-distance field.
pub fn best_single_location(sites: &[Site]) -> Result<FacilityPlan, ModelError> {
    let cells = candidate_cells(sites)?;
    let best = cells.iter()
        .min_by_key(|&&(x, y, score)| (score, x, y))
        .ok_or_else(|| ModelError::Infeasible("exhaustive single facility".into()))?;

    Ok(FacilityPlan::new(vec![(best.0 as i64, best.1 as i64)], best.2 as f64))
}

/// Best unordered pair of distinct non-site cells for two facilities.
pub fn best_pair_locations(sites: &[Site]) -> Result<FacilityPlan, ModelError> {
    let cells = candidate_cells(sites)?;
    if cells.len() < 2 {
        return Err(ModelError::Infeasible("exhaustive two facility".into()));
    }

    // weighted[c][k] = weight_k * distance(site k, candidate c)
    let weighted: Vec<Vec<u64>> = cells.iter()
        .map(|&(x, y, _)| sites.iter().map(|site| site.weighted_distance_to(x, y)).collect())
        .collect();

    let pair_cost = |a: &[u64], b: &[u64]| -> u64 {
        a.iter().zip(b).map(|(&da, &db)| da.min(db)).sum()
    };

    let (cost, i, j) = (0..cells.len())
        .into_par_iter()
        .filter_map(|i| {
            ((i + 1)..cells.len())
                .map(|j| (pair_cost(&weighted[i], &weighted[j]), i, j))
                .min()
        })
        .min()
        .ok_or_else(|| ModelError::Infeasible("exhaustive two facility".into()))?;

    let at = |c: usize| (cells[c].0 as i64, cells[c].1 as i64);
    Ok(FacilityPlan::new(vec![at(i), at(j)], cost as f64))
}

fn candidate_cells(sites: &[Site]) -> Result<Vec<(u32, u32, u64)>, ModelError> {
    let raw = compute_field(sites).map_err(|err| match err {
        FieldError::InvalidInput(_) => ModelError::NoSites,
        other => ModelError::Solver { model: "exhaustive".into(), message: other.to_string() },
    })?;
    Ok(raw.into_iter().map(|cell| (cell.x, cell.y, cell.raw_score)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::assignment_cost;

    fn sites(raw: &[(u32, u32, u32)]) -> Vec<Site> {
        raw.iter().map(|&(x, y, w)| Site::new(x, y, w).unwrap()).collect()
    }

    #[test]
    fn single_location_is_field_minimum() {
        let s = sites(&[(0, 0, 1), (4, 0, 1), (2, 3, 1)]);
        let plan = best_single_location(&s).unwrap();
        // (2,0): 2 + 2 + 3
        assert_eq!(plan.facilities(), &[(2, 0)]);
        assert_eq!(plan.objective(), 7.0);
    }

    #[test]
    fn pair_splits_two_clusters() {
        let s = sites(&[(0, 0, 5), (0, 2, 5), (6, 0, 4), (6, 2, 4)]);
        let plan = best_pair_locations(&s).unwrap();
        assert_eq!(plan.facilities(), &[(0, 1), (6, 1)]);
        assert_eq!(plan.objective(), 18.0);
        assert_eq!(assignment_cost(&s, plan.facilities()), 18);
    }

    #[test]
    fn too_few_candidates_is_infeasible() {
        let s = sites(&[(0, 0, 1), (2, 0, 1)]);
        assert!(best_single_location(&s).is_ok());
        assert!(matches!(best_pair_locations(&s), Err(ModelError::Infeasible(_))));
        assert!(matches!(best_single_location(&sites(&[(0, 0, 1)])), Err(ModelError::Infeasible(_))));
        assert_eq!(best_pair_locations(&[]), Err(ModelError::NoSites));
    }
}

use std::fmt;

use serde::Serialize;

use crate::site::Site;

/// Solved facility coordinates together with the objective reached.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FacilityPlan {
    facilities: Vec<(i64, i64)>,
    objective: f64,
}

impl FacilityPlan {
    pub fn new(facilities: Vec<(i64, i64)>, objective: f64) -> Self {
        Self { facilities, objective }
    }

    #[inline] pub fn facilities(&self) -> &[(i64, i64)] { &self.facilities }

    #[inline] pub fn objective(&self) -> f64 { self.objective }

    /// Population-weighted distance from every site to its nearest facility.
    #[inline] pub fn cost(&self, sites: &[Site]) -> u64 { assignment_cost(sites, &self.facilities) }

    /// Facilities that coincide with a site cell.
    pub fn facilities_on_sites(&self, sites: &[Site]) -> Vec<(i64, i64)> {
        self.facilities.iter()
            .copied()
            .filter(|&f| sites.iter().any(|site| site_distance(site, f) == 0))
            .collect()
    }

    /// True when the objective equals the real assignment cost of the plan.
    #[inline] pub fn is_exact(&self, sites: &[Site]) -> bool { self.cost(sites) as f64 == self.objective }
}

impl fmt::Display for FacilityPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let locations = self.facilities.iter()
            .map(|(x, y)| format!("({x}, {y})"))
            .collect::<Vec<_>>()
            .join(" and ");
        write!(f, "{locations} with objective {}", self.objective)
    }
}

/// Manhattan distance from `site` to the point `(x, y)`.
#[inline]
pub fn site_distance(site: &Site, (x, y): (i64, i64)) -> u64 {
    (site.x() as i64).abs_diff(x) + (site.y() as i64).abs_diff(y)
}

/// Index of the facility nearest to `site` (first one on ties).
pub fn nearest_facility(site: &Site, facilities: &[(i64, i64)]) -> Option<usize> {
    facilities.iter()
        .enumerate()
        .min_by_key(|&(i, &f)| (site_distance(site, f), i))
        .map(|(i, _)| i)
}

/// Sum over sites of `weight * distance to the nearest facility`.
pub fn assignment_cost(sites: &[Site], facilities: &[(i64, i64)]) -> u64 {
    sites.iter()
        .filter_map(|site| {
            let nearest = nearest_facility(site, facilities)?;
            Some(site.weight() as u64 * site_distance(site, facilities[nearest]))
        })
        .sum()
}

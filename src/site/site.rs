use serde::Serialize;

use crate::field::FieldError;

/// A fixed, population-weighted point on the integer grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Site {
    x: u32,
    y: u32,
    weight: u32,
}

impl Site {
    /// Create a new site, rejecting zero weights.
    pub fn new(x: u32, y: u32, weight: u32) -> Result<Self, FieldError> {
        if weight == 0 {
            return Err(FieldError::InvalidInput(format!("site at ({x},{y}) has zero weight")));
        }
        Ok(Self { x, y, weight })
    }

    #[inline] pub fn x(&self) -> u32 { self.x }

    #[inline] pub fn y(&self) -> u32 { self.y }

    #[inline] pub fn weight(&self) -> u32 { self.weight }

    /// Grid coordinates of the site.
    #[inline] pub fn coords(&self) -> (u32, u32) { (self.x, self.y) }

    /// Manhattan distance from this site to the cell `(x, y)`.
    #[inline]
    pub fn distance_to(&self, x: u32, y: u32) -> u64 {
        (self.x.abs_diff(x) + self.y.abs_diff(y)) as u64
    }

    /// Population-weighted Manhattan distance from this site to `(x, y)`.
    #[inline]
    pub fn weighted_distance_to(&self, x: u32, y: u32) -> u64 {
        self.weight as u64 * self.distance_to(x, y)
    }
}

/// Inclusive grid bounds `(max_x, max_y)` spanned by a set of sites.
pub fn grid_bounds(sites: &[Site]) -> Result<(u32, u32), FieldError> {
    let max_x = sites.iter().map(Site::x).max();
    let max_y = sites.iter().map(Site::y).max();

    match (max_x, max_y) {
        (Some(max_x), Some(max_y)) => Ok((max_x, max_y)),
        _ => Err(FieldError::InvalidInput("no sites given; grid bounds are undefined".into())),
    }
}

/// Total weight of all sites.
pub fn total_weight(sites: &[Site]) -> u64 {
    sites.iter().map(|site| site.weight() as u64).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_weight_is_rejected() {
        assert!(matches!(Site::new(1, 2, 0), Err(FieldError::InvalidInput(_))));
        assert!(Site::new(0, 0, 1).is_ok());
    }

    #[test]
    fn weighted_distance_is_rectilinear() {
        let site = Site::new(3, 1, 4).unwrap();
        assert_eq!(site.distance_to(0, 0), 4);
        assert_eq!(site.distance_to(3, 1), 0);
        assert_eq!(site.weighted_distance_to(5, 4), 4 * 5);
    }

    #[test]
    fn bounds_are_per_axis_maxima() {
        let sites = [Site::new(0, 7, 1).unwrap(), Site::new(5, 2, 3).unwrap()];
        assert_eq!(grid_bounds(&sites).unwrap(), (5, 7));
        assert_eq!(total_weight(&sites), 4);
    }

    #[test]
    fn bounds_of_empty_input_fail() {
        assert!(matches!(grid_bounds(&[]), Err(FieldError::InvalidInput(_))));
    }
}

use std::collections::HashSet;

use rayon::prelude::*;
use serde::Serialize;

use crate::{field::FieldError, site::{Site, grid_bounds}};

/// Grids with at least this many cells are scanned column-parallel.
pub(crate) const PARALLEL_THRESHOLD: usize = 10_000;

/// A non-site grid cell with its population-weighted distance total.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RawCell {
    pub x: u32,
    pub y: u32,
    pub raw_score: u64,
}

/// A field cell after min-max normalization (0 = best, 1 = worst).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FieldCell {
    pub x: u32,
    pub y: u32,
    pub raw_score: u64,
    pub normalized_score: f64,
}

/// Sum over every site of `weight * manhattan_distance` to `(x, y)`.
#[inline]
pub fn raw_score(sites: &[Site], x: u32, y: u32) -> u64 {
    sites.iter().map(|site| site.weighted_distance_to(x, y)).sum()
}

/// Score every grid cell in `[0, max_x] x [0, max_y]` that is not a site.
///
/// Cells are ordered x outer, y inner. The sum for each cell always runs over
/// all sites; only the cell's own membership in the output depends on the
/// site locations.
pub fn compute_field(sites: &[Site]) -> Result<Vec<RawCell>, FieldError> {
    let (max_x, max_y) = grid_bounds(sites)?;
    let occupied: HashSet<(u32, u32)> = sites.iter().map(Site::coords).collect();

    let column = |x: u32| -> Vec<RawCell> {
        (0..=max_y)
            .filter(|&y| !occupied.contains(&(x, y)))
            .map(|y| RawCell { x, y, raw_score: raw_score(sites, x, y) })
            .collect()
    };

    let num_cells = (max_x as usize + 1) * (max_y as usize + 1);
    let cells: Vec<RawCell> = if num_cells >= PARALLEL_THRESHOLD {
        (0..=max_x).into_par_iter().flat_map(column).collect()
    } else {
        (0..=max_x).flat_map(column).collect()
    };

    Ok(cells)
}

/// Rescale raw scores so the best cell maps to 0 and the worst to 1.
pub fn normalize(cells: &[RawCell]) -> Result<Vec<FieldCell>, FieldError> {
    let (best, worst) = score_range(cells)
        .ok_or(FieldError::DegenerateRange { cells: 0, score: None })?;

    if best == worst {
        return Err(FieldError::DegenerateRange { cells: cells.len(), score: Some(best) });
    }

    let span = (worst - best) as f64;
    Ok(cells.iter()
        .map(|cell| FieldCell {
            x: cell.x,
            y: cell.y,
            raw_score: cell.raw_score,
            normalized_score: (cell.raw_score - best) as f64 / span,
        })
        .collect())
}

/// Like [`normalize`], but a zero-width range maps every cell to 0.
pub fn normalize_or_zero(cells: &[RawCell]) -> Vec<FieldCell> {
    normalize(cells).unwrap_or_else(|_| {
        cells.iter()
            .map(|cell| FieldCell { x: cell.x, y: cell.y, raw_score: cell.raw_score, normalized_score: 0.0 })
            .collect()
    })
}

/// Minimum and maximum raw score, or `None` for an empty field.
fn score_range(cells: &[RawCell]) -> Option<(u64, u64)> {
    cells.iter().fold(None, |range, cell| match range {
        None => Some((cell.raw_score, cell.raw_score)),
        Some((lo, hi)) => Some((lo.min(cell.raw_score), hi.max(cell.raw_score))),
    })
}

/// The normalized weighted-distance field of a set of sites.
#[derive(Clone, Debug)]
pub struct Field {
    cells: Vec<FieldCell>,
    bounds: (u32, u32),
    best_score: u64,
    worst_score: u64,
}

impl Field {
    /// Compute and normalize the field; fails on a degenerate score range.
    pub fn evaluate(sites: &[Site]) -> Result<Self, FieldError> {
        let raw = compute_field(sites)?;
        let cells = normalize(&raw)?;
        Self::from_cells(sites, cells)
    }

    /// Compute the field, mapping a degenerate score range to all zeros.
    pub fn evaluate_or_zero(sites: &[Site]) -> Result<Self, FieldError> {
        let raw = compute_field(sites)?;
        Self::from_cells(sites, normalize_or_zero(&raw))
    }

    fn from_cells(sites: &[Site], cells: Vec<FieldCell>) -> Result<Self, FieldError> {
        let bounds = grid_bounds(sites)?;
        let best_score = cells.iter().map(|cell| cell.raw_score).min().unwrap_or(0);
        let worst_score = cells.iter().map(|cell| cell.raw_score).max().unwrap_or(0);
        Ok(Self { cells, bounds, best_score, worst_score })
    }

    #[inline] pub fn cells(&self) -> &[FieldCell] { &self.cells }

    #[inline] pub fn len(&self) -> usize { self.cells.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.cells.is_empty() }

    /// Inclusive grid bounds `(max_x, max_y)`.
    #[inline] pub fn bounds(&self) -> (u32, u32) { self.bounds }

    #[inline] pub fn best_score(&self) -> u64 { self.best_score }

    #[inline] pub fn worst_score(&self) -> u64 { self.worst_score }

    /// Look up the cell at `(x, y)`; `None` for site locations and out-of-grid points.
    pub fn get(&self, x: u32, y: u32) -> Option<&FieldCell> {
        let (max_x, max_y) = self.bounds;
        if x > max_x || y > max_y { return None }
        self.cells.binary_search_by(|cell| (cell.x, cell.y).cmp(&(x, y)))
            .ok()
            .map(|i| &self.cells[i])
    }

    /// Cells in ascending raw score order, ties broken by coordinates.
    pub fn ranked(&self) -> Vec<&FieldCell> {
        let mut ranked: Vec<&FieldCell> = self.cells.iter().collect();
        ranked.sort_by_key(|cell| (cell.raw_score, cell.x, cell.y));
        ranked
    }

    /// All cells attaining the best (lowest) raw score.
    pub fn best_cells(&self) -> Vec<&FieldCell> {
        self.cells.iter().filter(|cell| cell.raw_score == self.best_score).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sites(raw: &[(u32, u32, u32)]) -> Vec<Site> {
        raw.iter().map(|&(x, y, w)| Site::new(x, y, w).unwrap()).collect()
    }

    fn sample_sites() -> Vec<Site> {
        sites(&[(0, 0, 3), (4, 1, 1), (2, 3, 2), (1, 2, 5)])
    }

    #[test]
    fn two_collinear_sites_give_single_degenerate_cell() {
        let s = sites(&[(0, 0, 1), (2, 0, 1)]);
        let raw = compute_field(&s).unwrap();
        assert_eq!(raw, vec![RawCell { x: 1, y: 0, raw_score: 2 }]);
        assert_eq!(normalize(&raw), Err(FieldError::DegenerateRange { cells: 1, score: Some(2) }));
    }

    #[test]
    fn l_shaped_sites_leave_one_corner() {
        let s = sites(&[(0, 0, 1), (0, 1, 1), (1, 0, 1)]);
        let raw = compute_field(&s).unwrap();
        assert_eq!(raw, vec![RawCell { x: 1, y: 1, raw_score: 4 }]);
        assert!(matches!(Field::evaluate(&s), Err(FieldError::DegenerateRange { .. })));
    }

    #[test]
    fn empty_input_is_invalid() {
        assert!(matches!(compute_field(&[]), Err(FieldError::InvalidInput(_))));
        assert!(matches!(Field::evaluate(&[]), Err(FieldError::InvalidInput(_))));
    }

    #[test]
    fn single_site_has_no_field() {
        let s = sites(&[(0, 0, 7)]);
        assert!(compute_field(&s).unwrap().is_empty());
        assert_eq!(Field::evaluate(&s).unwrap_err(), FieldError::DegenerateRange { cells: 0, score: None });
    }

    #[test]
    fn cells_cover_grid_minus_sites() {
        let s = sample_sites();
        let (max_x, max_y) = grid_bounds(&s).unwrap();
        let raw = compute_field(&s).unwrap();

        assert_eq!(raw.len(), ((max_x + 1) * (max_y + 1)) as usize - s.len());
        for cell in &raw {
            assert!(cell.x <= max_x && cell.y <= max_y);
            assert!(s.iter().all(|site| site.coords() != (cell.x, cell.y)));
        }

        // x outer, y inner
        for pair in raw.windows(2) {
            assert!((pair[0].x, pair[0].y) < (pair[1].x, pair[1].y));
        }
    }

    #[test]
    fn sum_runs_over_every_site() {
        let s = sample_sites();
        let raw = compute_field(&s).unwrap();
        let cell = raw.iter().find(|c| (c.x, c.y) == (1, 1)).unwrap();
        // 3*(1+1) + 1*(3+0) + 2*(1+2) + 5*(0+1)
        assert_eq!(cell.raw_score, 6 + 3 + 6 + 5);
    }

    #[test]
    fn duplicate_sites_count_twice() {
        let s = sites(&[(0, 0, 1), (0, 0, 1), (2, 2, 1)]);
        let raw = compute_field(&s).unwrap();
        assert_eq!(raw.len(), 9 - 2);
        let corner = raw.iter().find(|c| (c.x, c.y) == (2, 0)).unwrap();
        assert_eq!(corner.raw_score, 2 + 2 + 2);
    }

    #[test]
    fn normalized_scores_span_unit_interval() {
        let field = Field::evaluate(&sample_sites()).unwrap();
        let min = field.cells().iter().map(|c| c.normalized_score).fold(f64::INFINITY, f64::min);
        let max = field.cells().iter().map(|c| c.normalized_score).fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(min, 0.0);
        assert_eq!(max, 1.0);

        for cell in field.cells() {
            let expected = (cell.raw_score - field.best_score()) as f64
                / (field.worst_score() - field.best_score()) as f64;
            assert!((cell.normalized_score - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn site_order_does_not_matter() {
        let s = sample_sites();
        let mut reversed = s.clone();
        reversed.reverse();
        assert_eq!(compute_field(&s).unwrap(), compute_field(&reversed).unwrap());
    }

    #[test]
    fn moving_away_from_all_sites_never_improves() {
        let s = sites(&[(0, 0, 2), (1, 1, 3), (0, 2, 1)]);
        // widen the grid so there is room beyond every site
        let mut wide = s.clone();
        wide.push(Site::new(6, 5, 1).unwrap());
        let raw = compute_field(&wide).unwrap();
        let score = |x: u32, y: u32| raw_score(&s, x, y);

        for cell in &raw {
            if cell.x >= 1 && cell.y >= 2 && cell.x < 6 {
                assert!(score(cell.x + 1, cell.y) >= score(cell.x, cell.y));
            }
        }
    }

    #[test]
    fn steps_beyond_every_site_never_improve() {
        let site_sets = [
            sample_sites(),
            sites(&[(0, 0, 2), (1, 1, 3), (0, 2, 1)]),
            sites(&[(3, 0, 9), (0, 4, 1), (5, 5, 4), (2, 2, 2)]),
        ];

        for s in &site_sets {
            let (max_x, max_y) = grid_bounds(s).unwrap();
            for x in 0..=max_x + 2 {
                for y in 0..=max_y + 2 {
                    let here = raw_score(s, x, y);
                    if s.iter().all(|site| site.x() <= x) {
                        assert!(raw_score(s, x + 1, y) >= here, "+x from ({x},{y})");
                    }
                    if s.iter().all(|site| site.y() <= y) {
                        assert!(raw_score(s, x, y + 1) >= here, "+y from ({x},{y})");
                    }
                }
            }
        }
    }

    #[test]
    fn extremes_normalize_to_zero_and_one() {
        let site_sets = [
            sample_sites(),
            sites(&[(0, 0, 1), (2, 1, 2)]),
            sites(&[(0, 0, 3), (6, 0, 2), (6, 4, 2), (0, 4, 3), (3, 2, 1)]),
            sites(&[(3, 0, 9), (0, 4, 1), (5, 5, 4), (2, 2, 2)]),
        ];

        for s in &site_sets {
            let field = Field::evaluate(s).unwrap();
            for cell in field.cells() {
                assert!((0.0..=1.0).contains(&cell.normalized_score));
                if cell.raw_score == field.best_score() { assert_eq!(cell.normalized_score, 0.0) }
                if cell.raw_score == field.worst_score() { assert_eq!(cell.normalized_score, 1.0) }
            }
            assert!(field.cells().iter().any(|c| c.normalized_score == 0.0));
            assert!(field.cells().iter().any(|c| c.normalized_score == 1.0));
        }
    }

    #[test]
    fn parallel_scan_matches_sequential() {
        let s = sites(&[(0, 0, 1), (120, 3, 2), (40, 99, 5)]);
        let raw = compute_field(&s).unwrap();
        assert!(121 * 100 >= PARALLEL_THRESHOLD);
        assert_eq!(raw.len(), 121 * 100 - 3);
        for pair in raw.windows(2) {
            assert!((pair[0].x, pair[0].y) < (pair[1].x, pair[1].y));
        }
        for cell in raw.iter().step_by(97) {
            assert_eq!(cell.raw_score, raw_score(&s, cell.x, cell.y));
        }
    }

    #[test]
    fn zero_policy_flattens_degenerate_fields() {
        let s = sites(&[(0, 0, 1), (2, 0, 1)]);
        let field = Field::evaluate_or_zero(&s).unwrap();
        assert_eq!(field.len(), 1);
        assert_eq!(field.cells()[0].normalized_score, 0.0);
        assert_eq!(field.best_score(), 2);
    }

    #[test]
    fn ranking_and_lookup() {
        let field = Field::evaluate(&sample_sites()).unwrap();
        let ranked = field.ranked();
        assert_eq!(ranked.len(), field.len());
        assert_eq!(ranked[0].raw_score, field.best_score());
        assert_eq!(ranked.last().unwrap().raw_score, field.worst_score());
        for pair in ranked.windows(2) { assert!(pair[0].raw_score <= pair[1].raw_score) }

        assert!(field.best_cells().iter().all(|c| c.normalized_score == 0.0));
        assert!(field.get(0, 0).is_none());
        assert!(field.get(9, 9).is_none());
        assert_eq!(field.get(1, 1).unwrap().raw_score, 20);
    }
}

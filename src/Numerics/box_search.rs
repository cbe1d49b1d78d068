//! Derivative-free search for the minimum of a scalar function inside a box `lower <= x <= upper`.
use nalgebra::DVector;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum OptimizeError {
    #[error("invalid bounds: {0}")]
    InvalidBounds(String),
    #[error("grid search needs at least 2 points per axis, got {0}")]
    TooFewGridPoints(usize),
    #[error("objective is not finite at any grid point")]
    NoFiniteValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxBounds {
    pub lower: DVector<f64>,
    pub upper: DVector<f64>,
}

impl BoxBounds {
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self, OptimizeError> {
        if lower.len() != upper.len() || lower.is_empty() {
            return Err(OptimizeError::InvalidBounds(format!(
                "{} lower and {} upper values",
                lower.len(),
                upper.len()
            )));
        }
        for (i, (l, u)) in lower.iter().zip(upper.iter()).enumerate() {
            if !l.is_finite() || !u.is_finite() || l > u {
                return Err(OptimizeError::InvalidBounds(format!(
                    "axis {}: [{}, {}]",
                    i, l, u
                )));
            }
        }
        Ok(Self {
            lower: DVector::from_vec(lower),
            upper: DVector::from_vec(upper),
        })
    }

    pub fn dim(&self) -> usize {
        self.lower.len()
    }

    pub fn widths(&self) -> DVector<f64> {
        &self.upper - &self.lower
    }

    pub fn project(&self, x: &DVector<f64>) -> DVector<f64> {
        DVector::from_fn(x.len(), |i, _| x[i].clamp(self.lower[i], self.upper[i]))
    }

    pub fn contains(&self, x: &DVector<f64>) -> bool {
        (0..self.dim()).all(|i| x[i] >= self.lower[i] && x[i] <= self.upper[i])
    }
}

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub x: DVector<f64>,
    pub fx: f64,
    pub evaluations: usize,
}

/// Deterministic global search: evaluate on a `points_per_axis`^dim tensor grid, then shrink
/// the rectangle to half its width around the best point (clipped to `bounds`) and repeat,
/// `passes` grids in total. Non-finite values are skipped; ties keep the first point found.
pub fn grid_zoom_search(
    mut f: impl FnMut(&DVector<f64>) -> f64,
    bounds: &BoxBounds,
    points_per_axis: usize,
    passes: usize,
) -> Result<SearchResult, OptimizeError> {
    if points_per_axis < 2 {
        return Err(OptimizeError::TooFewGridPoints(points_per_axis));
    }
    let dim = bounds.dim();
    let total = points_per_axis.pow(dim as u32);
    let mut lower = bounds.lower.clone();
    let mut upper = bounds.upper.clone();
    let mut best: Option<(DVector<f64>, f64)> = None;
    let mut evaluations = 0;

    for _ in 0..passes.max(1) {
        for k in 0..total {
            let mut rest = k;
            let x = DVector::from_fn(dim, |i, _| {
                let j = rest % points_per_axis;
                rest /= points_per_axis;
                lower[i] + (upper[i] - lower[i]) * j as f64 / (points_per_axis - 1) as f64
            });
            let fx = f(&x);
            evaluations += 1;
            if !fx.is_finite() {
                continue;
            }
            if best.as_ref().is_none_or(|(_, fb)| fx < *fb) {
                best = Some((x, fx));
            }
        }
        let Some((xb, _)) = &best else {
            return Err(OptimizeError::NoFiniteValue);
        };
        for i in 0..dim {
            let quarter = 0.25 * (upper[i] - lower[i]);
            lower[i] = (xb[i] - quarter).max(bounds.lower[i]);
            upper[i] = (xb[i] + quarter).min(bounds.upper[i]);
        }
    }
    let (x, fx) = best.ok_or(OptimizeError::NoFiniteValue)?;
    Ok(SearchResult {
        x,
        fx,
        evaluations,
    })
}

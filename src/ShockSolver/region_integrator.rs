//! Integration of one region from its perturbed singular start toward the sonic point.
//!
//! The symbolic structure system of [`ShockODE`] and its symbolic Jacobian are handed to the
//! Radau IIA solver of `RustedSciThe`; the Mach grid is read from its dense output.
use crate::ShockSolver::critical_point::PerturbedStart;
use crate::ShockSolver::shock_config::IntegrationConfig;
use crate::ShockSolver::shock_errors::ShockError;
use crate::ShockSolver::shock_ode::{MACH_VARIABLE, STATE_VARIABLES, ShockODE};
use RustedSciThe::numerical::Radau::{
    RadauConfig, RadauError, RadauOutputPolicy, RadauProblem, RadauSolution, RadauSolver,
};
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    /// from the upstream state (M > 1) down to the sonic point
    Precursor,
    /// from the downstream state (M < 1) up to the sonic point
    Relaxation,
}

impl Region {
    /// Mach number at which the grid of this region ends.
    pub fn sonic_end(self, sonic_offset: f64) -> f64 {
        match self {
            Region::Precursor => 1.0 + sonic_offset,
            Region::Relaxation => 1.0 - sonic_offset,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Precursor => write!(f, "precursor"),
            Region::Relaxation => write!(f, "relaxation"),
        }
    }
}

/// Samples of one integrated region, ordered along the Mach grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct Trajectory {
    pub region: Region,
    pub mach: Vec<f64>,
    pub x: Vec<f64>,
    pub T: Vec<f64>,
    pub rho: Vec<f64>,
    pub v: Vec<f64>,
    pub Trad: Vec<f64>,
    /// accepted Radau steps spent on the whole grid
    pub steps: usize,
}

impl Trajectory {
    /// Fills density, velocity and radiation temperature from (M, x, T) samples.
    #[allow(non_snake_case)]
    pub fn from_samples(
        ode: &ShockODE,
        region: Region,
        mach: Vec<f64>,
        x: Vec<f64>,
        T: Vec<f64>,
        steps: usize,
    ) -> Self {
        let rho: Vec<f64> = mach
            .iter()
            .zip(T.iter())
            .map(|(m, t)| ode.density(*m, *t))
            .collect();
        let v = rho.iter().map(|r| ode.velocity(*r)).collect();
        let Trad = rho
            .iter()
            .zip(T.iter())
            .map(|(r, t)| ode.trad_closure(*r, *t))
            .collect();
        Self {
            region,
            mach,
            x,
            T,
            rho,
            v,
            Trad,
            steps,
        }
    }

    pub fn len(&self) -> usize {
        self.mach.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mach.is_empty()
    }

    pub fn mach_range(&self) -> (f64, f64) {
        min_max(&self.mach)
    }

    pub fn x_range(&self) -> (f64, f64) {
        min_max(&self.x)
    }

    /// First index where positions stop being strictly monotonic, if any.
    pub fn monotonicity_violation(&self) -> Option<usize> {
        if self.x.len() < 2 {
            return None;
        }
        let dir = (self.x[1] - self.x[0]).signum();
        if dir == 0.0 {
            return Some(1);
        }
        self.x
            .windows(2)
            .position(|w| !((w[1] - w[0]) * dir > 0.0))
            .map(|i| i + 1)
    }
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        })
}

/// `n` equally spaced Mach numbers from `start` to `end`, both included exactly.
pub fn mach_grid(start: f64, end: f64, n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            if i + 1 == n {
                end
            } else {
                start + (end - start) * i as f64 / (n - 1) as f64
            }
        })
        .collect()
}

fn radau_solver(
    ode: &ShockODE,
    region: Region,
    grid: &[f64],
    config: &IntegrationConfig,
) -> Result<RadauSolver, ShockError> {
    let problem = RadauProblem::new(
        ode.symbolic_rhs(),
        STATE_VARIABLES.iter().map(|v| v.to_string()).collect(),
        MACH_VARIABLE,
    )
    .with_jacobian(ode.symbolic_jacobian());
    let (t0, t_bound) = (grid[0], grid[grid.len() - 1]);
    let settings = RadauConfig {
        t0,
        t_bound,
        rtol: config.rtol,
        atol: config.atol,
        first_step: Some(config.initial_step_fraction * (grid[1] - grid[0]).abs()),
        max_steps: config.max_steps,
        output: RadauOutputPolicy::Dense,
        ..RadauConfig::default()
    };
    RadauSolver::prepare(problem, settings).map_err(|source| ShockError::IntegrationFailed {
        region: region.to_string(),
        source,
    })
}

/// States on the grid: the start, dense output inside, the final step at the end.
fn states_on_grid(
    solution: &RadauSolution,
    grid: &[f64],
    y0: &[f64],
) -> Result<Vec<[f64; 2]>, RadauError> {
    let inner = solution.sample_many(&grid[1..grid.len() - 1])?;
    let mut states = Vec::with_capacity(grid.len());
    states.push([y0[0], y0[1]]);
    states.extend(inner.chunks_exact(2).map(|y| [y[0], y[1]]));
    states.push([solution.y[0], solution.y[1]]);
    Ok(states)
}

/// Integrates the structure equations of one region on a Mach grid from the perturbed start
/// to 1 ± sonic_offset. Position starts at 0. Any integrator failure is fatal.
pub fn integrate_region(
    ode: &ShockODE,
    start: &PerturbedStart,
    config: &IntegrationConfig,
) -> Result<Trajectory, ShockError> {
    let region = start.region;
    let end = region.sonic_end(config.sonic_offset);
    let on_correct_side = match region {
        Region::Precursor => start.mach > end,
        Region::Relaxation => start.mach < end,
    };
    if !on_correct_side {
        return Err(ShockError::InvalidStart {
            region: region.to_string(),
            message: format!(
                "starting Mach number {} does not lie beyond the grid end {}",
                start.mach, end
            ),
        });
    }
    let grid = mach_grid(start.mach, end, config.n_points);
    let failed = |source: RadauError| ShockError::IntegrationFailed {
        region: region.to_string(),
        source,
    };
    let mut solver = radau_solver(ode, region, &grid, config)?;
    let y0 = [0.0, start.T];
    let solution = solver.solve(&y0).map_err(failed)?;
    let states = states_on_grid(&solution, &grid, &y0).map_err(failed)?;

    let x: Vec<f64> = states.iter().map(|y| y[0]).collect();
    let t: Vec<f64> = states.iter().map(|y| y[1]).collect();
    if let Some(i) = (0..states.len()).find(|&i| !(x[i].is_finite() && t[i] > 0.0)) {
        return Err(ShockError::NonPhysicalState {
            region: region.to_string(),
            mach: grid[i],
            message: format!("x = {}, T = {}", x[i], t[i]),
        });
    }
    let steps = solution.accepted_steps;
    let trajectory = Trajectory::from_samples(ode, region, grid, x, t, steps);
    if let Some(i) = trajectory.Trad.iter().position(|v| !v.is_finite()) {
        return Err(ShockError::NonPhysicalState {
            region: region.to_string(),
            mach: trajectory.mach[i],
            message: "negative radiation energy from the momentum closure".to_string(),
        });
    }
    let (m_lo, m_hi) = trajectory.mach_range();
    let (x_lo, x_hi) = trajectory.x_range();
    info!(
        "{} region: M in [{:.8}, {:.8}], x in [{:.6e}, {:.6e}], {} accepted and {} rejected Radau steps",
        region, m_lo, m_hi, x_lo, x_hi, steps, solution.rejected_steps
    );
    Ok(trajectory)
}

//! Matching the precursor and relaxation regions at a common interface.
//!
//! Both trajectories start at x = 0 at their own singular point, so their relative placement is
//! unknown. Shifting the precursor by Δx_A and the relaxation by Δx_B puts the interface at x = 0;
//! across it the radiative flux, the radiation pressure and the hydrodynamic state function
//! S(M) must be continuous (S is invariant across an isothermal-radiation hydrodynamic shock).
//!
//! Matching is a two step pipeline: a deterministic global search produces
//! [`CandidateOffsets`], a Levenberg-Marquardt refinement of the three relative flux mismatches,
//! kept inside the search rectangle, turns it into a [`MatchOutcome`].
use crate::Numerics::box_search::{BoxBounds, grid_zoom_search};
use crate::ShockSolver::profile_interpolant::{InterfaceState, ProfileInterpolant};
use crate::ShockSolver::region_integrator::Trajectory;
use crate::ShockSolver::shock_config::MatchingConfig;
use crate::ShockSolver::shock_errors::ShockError;
use crate::ShockSolver::shock_ode::ShockODE;
use RustedSciThe::numerical::Nonlinear_systems::least_squares::{
    LeastSquaresProblem, LevenbergMarquardt,
};
use log::{info, warn};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// finite-difference step of the refinement Jacobian, relative to the rectangle width
const JACOBIAN_STEP: f64 = 1e-7;

/// Position shifts applied to the precursor (A) and relaxation (B) trajectories.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct MatchOffsets {
    pub dx_A: f64,
    pub dx_B: f64,
}

impl MatchOffsets {
    fn to_vector(self) -> DVector<f64> {
        DVector::from_vec(vec![self.dx_A, self.dx_B])
    }

    fn from_vector(x: &DVector<f64>) -> Self {
        Self {
            dx_A: x[0],
            dx_B: x[1],
        }
    }
}

/// Quantities that must be continuous at the interface, radiation ones in units of P0.
#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(non_snake_case)]
pub struct InterfaceFluxes {
    pub Frad: f64,
    pub Prad: f64,
    pub S: f64,
}

impl InterfaceFluxes {
    fn as_array(&self) -> [f64; 3] {
        [self.Frad, self.Prad, self.S]
    }
}

pub fn interface_fluxes(ode: &ShockODE, state: &InterfaceState) -> InterfaceFluxes {
    InterfaceFluxes {
        Frad: ode.radiative_flux(state.rho, state.T, state.Trad, state.v),
        Prad: ode.radiation_pressure(state.Trad),
        S: ode.hydro_state_function(state.mach),
    }
}

/// Best point of the global search, input of the local refinement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateOffsets {
    pub offsets: MatchOffsets,
    pub objective: f64,
    pub evaluations: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub offsets: MatchOffsets,
    pub objective: f64,
    /// residual evaluations of the refinement alone
    pub refinement_evaluations: usize,
    /// global search plus refinement
    pub evaluations: usize,
    /// objective not above the configured tolerance; otherwise the profile is suspect
    pub converged: bool,
    /// why the refinement stopped
    pub termination: String,
    pub candidate: CandidateOffsets,
}

/// Interface mismatch as a least-squares problem in (Δx_A, Δx_B). Trial points outside the
/// search rectangle are rejected before evaluation.
struct OffsetResiduals<'m, 'a> {
    matcher: &'m ShockMatcher<'a>,
    x: DVector<f64>,
}

impl LeastSquaresProblem for OffsetResiduals<'_, '_> {
    fn set_params(&mut self, x: &DVector<f64>) {
        self.x = x.clone();
    }

    fn params(&self) -> DVector<f64> {
        self.x.clone()
    }

    fn residuals(&self) -> Option<DVector<f64>> {
        Some(self.matcher.residuals(&MatchOffsets::from_vector(&self.x)))
    }

    /// Central differences, one-sided where the rectangle ends.
    fn jacobian(&self) -> Option<DMatrix<f64>> {
        let bounds = &self.matcher.bounds;
        let widths = bounds.widths();
        let mut jac = DMatrix::zeros(3, 2);
        for j in 0..2 {
            let h = JACOBIAN_STEP * widths[j].max(self.x[j].abs());
            let mut plus = self.x.clone();
            let mut minus = self.x.clone();
            plus[j] += h;
            minus[j] -= h;
            let (plus, minus) = (bounds.project(&plus), bounds.project(&minus));
            let dx = plus[j] - minus[j];
            if dx <= 0.0 {
                continue;
            }
            let rp = self.matcher.residuals(&MatchOffsets::from_vector(&plus));
            let rm = self.matcher.residuals(&MatchOffsets::from_vector(&minus));
            jac.set_column(j, &((rp - rm) / dx));
        }
        jac.iter().all(|v| v.is_finite()).then_some(jac)
    }

    fn validate_trial(&self, x: &DVector<f64>) -> bool {
        x.iter().all(|v| v.is_finite()) && self.matcher.bounds.contains(x)
    }
}

pub struct ShockMatcher<'a> {
    ode: &'a ShockODE,
    precursor: ProfileInterpolant,
    relaxation: ProfileInterpolant,
    bounds: BoxBounds,
    config: MatchingConfig,
}

impl<'a> ShockMatcher<'a> {
    /// Builds the interpolants and the search rectangle
    /// Δx_A ∈ [-max x_A, 0], Δx_B ∈ [0, -min x_B].
    pub fn new(
        ode: &'a ShockODE,
        precursor: &Trajectory,
        relaxation: &Trajectory,
        config: &MatchingConfig,
    ) -> Result<Self, ShockError> {
        let precursor_fn = ProfileInterpolant::new(precursor)?;
        let relaxation_fn = ProfileInterpolant::new(relaxation)?;
        let (_, x_a_max) = precursor.x_range();
        let (x_b_min, _) = relaxation.x_range();
        let bounds = BoxBounds::new(vec![-x_a_max, 0.0], vec![0.0, -x_b_min])?;
        info!(
            "matching bounds: dx_A in [{:.6e}, 0], dx_B in [0, {:.6e}]",
            -x_a_max, -x_b_min
        );
        Ok(Self {
            ode,
            precursor: precursor_fn,
            relaxation: relaxation_fn,
            bounds,
            config: config.clone(),
        })
    }

    pub fn bounds(&self) -> &BoxBounds {
        &self.bounds
    }

    /// Fluxes of both sides at the interface for the given shifts.
    pub fn fluxes(&self, offsets: &MatchOffsets) -> (InterfaceFluxes, InterfaceFluxes) {
        let a = self.precursor.eval(-offsets.dx_A);
        let b = self.relaxation.eval(-offsets.dx_B);
        (interface_fluxes(self.ode, &a), interface_fluxes(self.ode, &b))
    }

    /// (j_A - j_B) / |j_B| componentwise for (Frad, Prad, S)
    pub fn residuals(&self, offsets: &MatchOffsets) -> DVector<f64> {
        let (a, b) = self.fluxes(offsets);
        let (a, b) = (a.as_array(), b.as_array());
        let norm = b.iter().map(|s| s * s).sum::<f64>().sqrt();
        DVector::from_fn(3, |i, _| (a[i] - b[i]) / norm)
    }

    /// |j_A - j_B|² / |j_B|²
    pub fn objective(&self, offsets: &MatchOffsets) -> f64 {
        self.residuals(offsets).norm_squared()
    }

    pub fn global_search(&self) -> Result<CandidateOffsets, ShockError> {
        let result = grid_zoom_search(
            |x| self.objective(&MatchOffsets::from_vector(x)),
            &self.bounds,
            self.config.grid_points,
            self.config.zoom_iterations,
        )?;
        let candidate = CandidateOffsets {
            offsets: MatchOffsets::from_vector(&result.x),
            objective: result.fx,
            evaluations: result.evaluations,
        };
        info!(
            "global minimum dx = ({:.10e}, {:.10e}) with value {:.4e} after {} evaluations",
            candidate.offsets.dx_A, candidate.offsets.dx_B, candidate.objective, candidate.evaluations
        );
        Ok(candidate)
    }

    /// Levenberg-Marquardt on the three relative mismatches, started from the candidate and
    /// kept inside the rectangle. A refinement that ends above the candidate returns the
    /// candidate.
    pub fn refine(&self, candidate: &CandidateOffsets) -> Result<MatchOutcome, ShockError> {
        let lm = LevenbergMarquardt::new()
            .try_with_tol(self.config.jump_tol)?
            .try_with_max_iterations(self.config.max_iterations)?;
        let problem = OffsetResiduals {
            matcher: self,
            x: candidate.offsets.to_vector(),
        };
        let (problem, report) = lm.minimize(problem);
        if let Some(error) = report.error {
            return Err(ShockError::Refinement(error));
        }
        let refined = MatchOffsets::from_vector(&problem.params());
        let refined_objective = self.objective(&refined);
        let (offsets, objective) = if refined_objective <= candidate.objective {
            (refined, refined_objective)
        } else {
            (candidate.offsets, candidate.objective)
        };
        let outcome = MatchOutcome {
            offsets,
            objective,
            refinement_evaluations: report.number_of_evaluations,
            evaluations: candidate.evaluations + report.number_of_evaluations,
            converged: objective <= self.config.jump_tol,
            termination: format!("{:?}", report.termination),
            candidate: *candidate,
        };
        info!(
            "objective = {:.4e} after {} evaluations ({}, {} trial points outside the box); dx_A = {:.10e}, dx_B = {:.10e}",
            outcome.objective,
            outcome.refinement_evaluations,
            outcome.termination,
            report.rejected_domain_trials,
            outcome.offsets.dx_A,
            outcome.offsets.dx_B
        );
        if !outcome.converged {
            warn!(
                "matching conditions NOT satisfied: objective {:.4e} > {:.1e}, the profile may be quite wrong",
                outcome.objective, self.config.jump_tol
            );
        }
        Ok(outcome)
    }

    /// Global search followed by local refinement.
    pub fn solve(&self) -> Result<MatchOutcome, ShockError> {
        let candidate = self.global_search()?;
        self.refine(&candidate)
    }
}

//! # Radiative Shock Task
//!
//! `RadShockTask` drives the whole pipeline for one configuration:
//!
//! 1. jump conditions (far-field states and the shock regime)
//! 2. perturbed starting points next to both singular end states
//! 3. integration of the precursor and relaxation regions
//! 4. matching of both regions at the interface
//! 5. assembly of the final profile
//!
//! Intermediate results stay available as fields after [`RadShockTask::solve`]. Every stage
//! except matching fails hard; a matching residual above tolerance only sets
//! `MatchOutcome::converged = false`.
//!
//! ## Example
//! ```rust, ignore
//! let mut task = RadShockTask::preset(3.0);
//! task.solve()?;
//! task.pretty_print();
//! task.save_profile()?;
//! ```
use crate::ShockSolver::critical_point::{SingularStarts, perturb_singular_points};
use crate::ShockSolver::jump_conditions::{AsymptoticStates, solve_jump_conditions};
use crate::ShockSolver::profile_assembler::{ShockProfile, assemble_profile};
use crate::ShockSolver::profile_io::{ProfileComparison, compare_profiles, save_profile_in};
use crate::ShockSolver::region_integrator::{Trajectory, integrate_region};
use crate::ShockSolver::shock_config::ShockConfig;
use crate::ShockSolver::shock_errors::ShockError;
use crate::ShockSolver::shock_matcher::{MatchOutcome, ShockMatcher};
use crate::ShockSolver::shock_ode::ShockODE;
use log::{error, info};
use std::path::{Path, PathBuf};

/// relative L1 error accepted when comparing against a reference profile
pub const DEFAULT_ERROR_TOL: f64 = 0.005;

#[derive(Debug, Clone)]
pub struct RadShockTask {
    pub config: ShockConfig,
    pub ode: ShockODE,
    pub states: Option<AsymptoticStates>,
    pub starts: Option<SingularStarts>,
    pub precursor: Option<Trajectory>,
    pub relaxation: Option<Trajectory>,
    pub matching: Option<MatchOutcome>,
    pub profile: Option<ShockProfile>,
}

impl RadShockTask {
    /// Task with the generic configuration (M0 = 3 physics, default numerics).
    pub fn new() -> Self {
        Self::from_config(ShockConfig::default())
    }

    pub fn from_config(config: ShockConfig) -> Self {
        let ode = ShockODE::new(&config.physics);
        Self {
            config,
            ode,
            states: None,
            starts: None,
            precursor: None,
            relaxation: None,
            matching: None,
            profile: None,
        }
    }

    /// Reference configuration by upstream Mach number.
    #[allow(non_snake_case)]
    pub fn preset(M0: f64) -> Self {
        Self::from_config(ShockConfig::preset(M0))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ShockError> {
        Ok(Self::from_config(ShockConfig::load(path)?))
    }

    pub fn check_task(&self) -> Result<(), ShockError> {
        self.config.check()?;
        if ShockODE::new(&self.config.physics) != self.ode {
            return Err(ShockError::InvalidConfiguration(
                "physical parameters were changed after the task was created".to_string(),
            ));
        }
        Ok(())
    }

    /// Runs all stages; results of a previous run are discarded first.
    pub fn solve(&mut self) -> Result<(), ShockError> {
        self.reset();
        self.run().inspect_err(|e| error!("radiative shock solve failed: {}", e))
    }

    fn reset(&mut self) {
        self.states = None;
        self.starts = None;
        self.precursor = None;
        self.relaxation = None;
        self.matching = None;
        self.profile = None;
    }

    fn run(&mut self) -> Result<(), ShockError> {
        self.check_task()?;
        let physics = &self.config.physics;
        info!(
            "radiative shock: M0 = {}, P0 = {:e}, gamma = {:.6}, sigma_a = {:e}",
            physics.M0, physics.P0, physics.gamma, physics.sigma_a
        );
        let states = solve_jump_conditions(physics)?;
        self.states = Some(states);

        let starts = perturb_singular_points(&self.ode, &states, self.config.integration.eps)?;
        self.starts = Some(starts);

        let precursor = integrate_region(&self.ode, &starts.precursor, &self.config.integration)?;
        let relaxation =
            integrate_region(&self.ode, &starts.relaxation, &self.config.integration)?;

        let matcher = ShockMatcher::new(&self.ode, &precursor, &relaxation, &self.config.matching)?;
        let outcome = matcher.solve()?;

        let profile = assemble_profile(
            &precursor,
            &relaxation,
            &outcome.offsets,
            self.config.output.pos_offset,
        );
        info!(
            "profile: {} points, x in [{:.6e}, {:.6e}]",
            profile.len(),
            profile.x.first().copied().unwrap_or(f64::NAN),
            profile.x.last().copied().unwrap_or(f64::NAN)
        );
        self.precursor = Some(precursor);
        self.relaxation = Some(relaxation);
        self.matching = Some(outcome);
        self.profile = Some(profile);
        Ok(())
    }

    pub fn profile(&self) -> Result<&ShockProfile, ShockError> {
        self.profile.as_ref().ok_or(ShockError::NotSolved("profile"))
    }

    /// Writes `shock_Mach_{M0}.txt` into the configured output directory.
    pub fn save_profile(&self) -> Result<PathBuf, ShockError> {
        save_profile_in(
            &self.config.output.output_dir,
            self.config.physics.M0,
            self.profile()?,
        )
    }

    pub fn compare_with_reference(
        &self,
        reference: &ShockProfile,
        error_tol: f64,
    ) -> Result<ProfileComparison, ShockError> {
        compare_profiles(self.profile()?, reference, error_tol)
    }
}

impl Default for RadShockTask {
    fn default() -> Self {
        Self::new()
    }
}

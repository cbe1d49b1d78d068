use crate::Numerics::box_search::OptimizeError;
use RustedSciThe::numerical::Nonlinear_systems::least_squares::LeastSquaresError;
use RustedSciThe::numerical::Nonlinear_systems::scalar_root::RootFindingError;
use RustedSciThe::numerical::Radau::RadauError;
use thiserror::Error;

/// Failures of the radiative shock pipeline. Everything here is fatal; a matching residual
/// above tolerance is reported through `MatchOutcome::converged` instead.
#[derive(Debug, Error)]
pub enum ShockError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("jump conditions: root finder failed: {0}")]
    JumpNotConverged(#[from] RootFindingError),
    #[error(
        "downstream perturbation on the {branch} density branch ({regime}) gives rho = {found}, \
         jump conditions give rho1 = {expected}{}",
        branch_hint(.alternative_passes)
    )]
    BranchMismatch {
        regime: String,
        branch: String,
        expected: f64,
        found: f64,
        alternative_passes: bool,
    },
    #[error("{region} region: Radau integration failed: {source}")]
    IntegrationFailed {
        region: String,
        #[source]
        source: RadauError,
    },
    #[error("{region} region: non-physical state at M = {mach}: {message}")]
    NonPhysicalState {
        region: String,
        mach: f64,
        message: String,
    },
    #[error("{region} region: invalid starting point: {message}")]
    InvalidStart { region: String, message: String },
    #[error("{region} region: positions are not strictly monotonic (index {index})")]
    NonMonotonicTrajectory { region: String, index: usize },
    #[error("interpolation: {0}")]
    Interpolation(String),
    #[error("matching: {0}")]
    Matching(#[from] OptimizeError),
    #[error("matching refinement: {0}")]
    Refinement(#[from] LeastSquaresError),
    #[error("profile file, line {line}: {message}")]
    ProfileFormat { line: usize, message: String },
    #[error("{0} is not available before solve()")]
    NotSolved(&'static str),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn branch_hint(alternative_passes: &bool) -> &'static str {
    if *alternative_passes {
        "; the opposite branch would pass"
    } else {
        ""
    }
}

//! Starting points next to the singular end states.
//!
//! At the far upstream and far downstream equilibria both derivatives of the structure equations
//! are 0/0. The slope dT/dTrad along the integral curve leaving such a point follows from
//! differentiating numerator and denominator (l'Hôpital) and is a root of a quadratic.
//!
//! Density in terms of (T, Trad) solves `3Tρ² - bρ + 3γM0² = 0`, `b = Km - γP0 Trad⁴`, so
//! two branches exist:
//!
//! | Branch | sign | Used for |
//! |--------|------|----------|
//! | `Lower` | -1 | upstream end state, always |
//! | `Upper` | +1 | downstream end state when an embedded hydrodynamic shock forms |
//!
//! The downstream branch is fixed once from the jump solution ([`ShockRegime`]) and checked by
//! recomputing the perturbed downstream density.
use crate::ShockSolver::jump_conditions::AsymptoticStates;
use crate::ShockSolver::region_integrator::Region;
use crate::ShockSolver::shock_errors::ShockError;
use crate::ShockSolver::shock_ode::ShockODE;
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DensityBranch {
    Lower,
    Upper,
}

impl DensityBranch {
    pub fn sign(self) -> f64 {
        match self {
            DensityBranch::Lower => -1.0,
            DensityBranch::Upper => 1.0,
        }
    }
    pub fn opposite(self) -> Self {
        match self {
            DensityBranch::Lower => DensityBranch::Upper,
            DensityBranch::Upper => DensityBranch::Lower,
        }
    }
}

impl fmt::Display for DensityBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DensityBranch::Lower => write!(f, "lower"),
            DensityBranch::Upper => write!(f, "upper"),
        }
    }
}

/// Structure of the transition, decided once from the jump conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShockRegime {
    /// downstream density is the upper closure root: a hydrodynamic shock is embedded
    EmbeddedSubshock,
    /// downstream density is the lower closure root: smooth transition
    Continuous,
}

#[allow(non_snake_case)]
impl ShockRegime {
    /// The downstream density is the upper root of the closure quadratic exactly when
    /// 6 T1 ρ1 > b1, equivalently γ v1² / T1 < 1.
    pub fn from_jump(ode: &ShockODE, states: &AsymptoticStates) -> Self {
        let (rho1, T1) = (states.rho1(), states.T1());
        let b1 = ode.Km - ode.gamma * ode.P0 * T1.powi(4);
        if 6.0 * T1 * rho1 - b1 > 0.0 {
            ShockRegime::EmbeddedSubshock
        } else {
            ShockRegime::Continuous
        }
    }

    pub fn downstream_branch(self) -> DensityBranch {
        match self {
            ShockRegime::EmbeddedSubshock => DensityBranch::Upper,
            ShockRegime::Continuous => DensityBranch::Lower,
        }
    }

    pub fn upstream_branch(self) -> DensityBranch {
        DensityBranch::Lower
    }
}

impl fmt::Display for ShockRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShockRegime::EmbeddedSubshock => write!(f, "embedded sub-shock"),
            ShockRegime::Continuous => write!(f, "continuous"),
        }
    }
}

/// Closed-form density on a branch; NaN where the discriminant is negative.
#[allow(non_snake_case)]
pub fn density_on_branch(ode: &ShockODE, T: f64, Trad: f64, branch: DensityBranch) -> f64 {
    let b = ode.Km - ode.gamma * ode.P0 * Trad.powi(4);
    let disc = b * b - 36.0 * ode.gamma * ode.M0 * ode.M0 * T;
    if disc < 0.0 {
        return f64::NAN;
    }
    (b + branch.sign() * disc.sqrt()) / (6.0 * T)
}

/// dT/dTrad along the integral curve through the singular point (ρ, T, Trad).
/// The positive root of the quadratic is preferred; when it is not positive the other root is
/// returned whatever its sign.
#[allow(non_snake_case)]
pub fn dT_dTrad(ode: &ShockODE, rho: f64, T: f64, Trad: f64, branch: DensityBranch) -> f64 {
    let (g, M0, P0) = (ode.gamma, ode.M0, ode.P0);
    let sign = branch.sign();
    let Cp = ode.Cp;
    let v = M0 / rho;
    let M = v / T.sqrt();

    let b = ode.Km - g * P0 * Trad.powi(4);
    let d = (b * b - 36.0 * g * M0 * M0 * T).sqrt();
    let drho_T = -(rho + sign * 3.0 * g * M0 * M0 / d) / T;
    let drho_Trad = (-2.0 / 3.0) * (P0 * g * Trad.powi(3) / T) * (1.0 + sign * b / d);

    let c1 = M0 / (24.0 * P0 * ode.kappa * rho * rho * Trad.powi(3));
    let dG_T = c1
        * (6.0 * Cp * rho * (2.0 * drho_T * (T - 1.0) + rho) - 6.0 * M0 * M0 * rho * drho_T
            + 8.0 * P0 * drho_T * (Trad.powi(4) - 2.0 * rho));
    let dG_Trad = c1
        * (12.0 * Cp * drho_Trad * rho * (T - 1.0) - 6.0 * M0 * M0 * rho * drho_Trad
            + 8.0 * P0 * (drho_Trad * (Trad.powi(4) - 2.0 * rho) + 4.0 * rho * Trad.powi(3)));

    let c2 = P0 / (3.0 * Cp * M0 * (M * M - 1.0));
    let dF_T = c2 * (4.0 * v * Trad.powi(3) * dG_T - 12.0 * ode.sigma_a * (g * M * M - 1.0) * T.powi(3));
    let dF_Trad =
        c2 * (4.0 * v * Trad.powi(3) * dG_Trad + 12.0 * ode.sigma_a * (g * M * M - 1.0) * Trad.powi(3));

    let a = dF_T - dG_Trad;
    let disc = (a * a + 4.0 * dG_T * dF_Trad).sqrt();
    let positive = (a + disc) / (2.0 * dG_T);
    if positive > 0.0 {
        positive
    } else {
        (a - disc) / (2.0 * dG_T)
    }
}

/// A state displaced by `eps` in radiation temperature from a singular end state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct PerturbedStart {
    pub region: Region,
    pub branch: DensityBranch,
    /// signed perturbation of Trad
    pub eps: f64,
    /// dT/dTrad at the end state
    pub slope: f64,
    pub T: f64,
    pub Trad: f64,
    pub rho: f64,
    pub v: f64,
    /// starting Mach number of the integration
    pub mach: f64,
}

/// Both starting points plus the regime they were built for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SingularStarts {
    pub regime: ShockRegime,
    pub precursor: PerturbedStart,
    pub relaxation: PerturbedStart,
}

#[allow(non_snake_case)]
fn perturbed_start(
    ode: &ShockODE,
    region: Region,
    branch: DensityBranch,
    eps: f64,
    slope: f64,
    T: f64,
    Trad: f64,
) -> PerturbedStart {
    let rho = density_on_branch(ode, T, Trad, branch);
    let v = ode.M0 / rho;
    PerturbedStart {
        region,
        branch,
        eps,
        slope,
        T,
        Trad,
        rho,
        v,
        mach: v / T.sqrt(),
    }
}

/// Builds the perturbed starting points of both regions.
///
/// Upstream: Trad = 1 + ε, T = 1 + ε·slope. Downstream: Trad = T1 - ε, T = T1 + ε·slope.
/// The downstream density must reproduce ρ1 within `1e-8 + 2ε|ρ|`, otherwise the regime decision
/// is inconsistent and the run stops.
#[allow(non_snake_case)]
pub fn perturb_singular_points(
    ode: &ShockODE,
    states: &AsymptoticStates,
    eps: f64,
) -> Result<SingularStarts, ShockError> {
    if !(eps > 0.0) {
        return Err(ShockError::InvalidConfiguration(format!(
            "perturbation must be positive, got {}",
            eps
        )));
    }
    let regime = ShockRegime::from_jump(ode, states);
    let up = states.upstream;
    let (rho1, T1) = (states.rho1(), states.T1());

    let eps_A = eps;
    let branch_A = regime.upstream_branch();
    let slope_A = dT_dTrad(ode, up.rho, up.T, up.Trad, branch_A);
    let precursor = perturbed_start(
        ode,
        Region::Precursor,
        branch_A,
        eps_A,
        slope_A,
        up.T + eps_A * slope_A,
        up.Trad + eps_A,
    );

    let eps_B = -eps;
    let branch_B = regime.downstream_branch();
    let slope_B = dT_dTrad(ode, rho1, T1, T1, branch_B);
    let relaxation = perturbed_start(
        ode,
        Region::Relaxation,
        branch_B,
        eps_B,
        slope_B,
        T1 - eps_B * slope_B,
        T1 + eps_B,
    );

    let passes = |rho: f64| (rho1 - rho).abs() <= 1e-8 + 2.0 * eps * rho.abs();
    if !passes(relaxation.rho) {
        let other = branch_B.opposite();
        let slope_other = dT_dTrad(ode, rho1, T1, T1, other);
        let rho_other = density_on_branch(ode, T1 - eps_B * slope_other, T1 + eps_B, other);
        return Err(ShockError::BranchMismatch {
            regime: regime.to_string(),
            branch: branch_B.to_string(),
            expected: rho1,
            found: relaxation.rho,
            alternative_passes: passes(rho_other),
        });
    }
    for start in [&precursor, &relaxation] {
        if !(start.T > 0.0 && start.rho > 0.0 && start.mach.is_finite()) {
            return Err(ShockError::InvalidStart {
                region: start.region.to_string(),
                message: format!(
                    "T = {}, rho = {}, M = {} (slope {})",
                    start.T, start.rho, start.mach, start.slope
                ),
            });
        }
    }
    info!(
        "regime: {}; precursor start T = {:.12}, Trad = {:.12}, M = {:.10}; relaxation start T = {:.12}, Trad = {:.12}, M = {:.10}",
        regime,
        precursor.T,
        precursor.Trad,
        precursor.mach,
        relaxation.T,
        relaxation.Trad,
        relaxation.mach
    );
    Ok(SingularStarts {
        regime,
        precursor,
        relaxation,
    })
}

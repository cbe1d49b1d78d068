//! Far-field states on both sides of the shock.
//!
//! With ρ0 = T0 = Trad0 = 1 and v0 = M0, the conservation of mass, momentum and total energy
//! (gas plus radiation, equilibrium far downstream so Trad1 = T1) read
//! ```text
//! ρ1 v1 = M0
//! M0²/ρ1 + ρ1 T1/γ + P0 T1⁴/3 = M0² + 1/γ + P0/3
//! M0 (v1²/2 + T1/(γ-1)) + 4/3 P0 v1 T1⁴ = M0 (M0²/2 + 1/(γ-1)) + 4/3 P0 M0
//! ```
//! Density is eliminated through the positive root of a quadratic, leaving one equation in T1.
//! It is built as a symbolic expression and solved by Newton-Raphson with the symbolic
//! derivative, starting from the strong shock guess T1 = M0².
use crate::ShockSolver::shock_config::PhysicalParameters;
use crate::ShockSolver::shock_errors::ShockError;
use RustedSciThe::numerical::Nonlinear_systems::scalar_root::{
    RootFindingConfig, RootFindingError, RootFindingMethod, ScalarRootFinder,
};
use RustedSciThe::symbolic::symbolic_engine::Expr;
use log::info;
use serde::{Deserialize, Serialize};

/// Unknown of the reduced jump equation.
pub const JUMP_VARIABLE: &str = "T1";

const JUMP_TOLERANCE: f64 = 1e-12;
const JUMP_MAX_ITERATIONS: usize = 100;

/// Point state: density, gas and radiation temperature, velocity (= M0/ρ).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct PhysicalState {
    pub rho: f64,
    pub T: f64,
    pub Trad: f64,
    pub v: f64,
}

#[allow(non_snake_case)]
impl PhysicalState {
    pub fn new(rho: f64, T: f64, Trad: f64, M0: f64) -> Self {
        Self {
            rho,
            T,
            Trad,
            v: M0 / rho,
        }
    }

    /// local Mach number v/√T
    pub fn mach(&self) -> f64 {
        self.v / self.T.sqrt()
    }

    /// gas pressure in units of the upstream gas pressure
    pub fn pressure(&self) -> f64 {
        self.rho * self.T
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AsymptoticStates {
    pub upstream: PhysicalState,
    pub downstream: PhysicalState,
    /// Newton iterations spent on T1
    pub iterations: usize,
    /// |F(T1)| of the reduced equation at the returned root
    pub residual: f64,
}

#[allow(non_snake_case)]
impl AsymptoticStates {
    pub fn rho1(&self) -> f64 {
        self.downstream.rho
    }
    pub fn T1(&self) -> f64 {
        self.downstream.T
    }
    pub fn v1(&self) -> f64 {
        self.downstream.v
    }
    /// post-shock to upstream gas pressure ratio
    pub fn pressure_ratio(&self) -> f64 {
        self.downstream.pressure() / self.upstream.pressure()
    }
    /// post-shock to upstream radiation energy density ratio
    pub fn radiation_energy_ratio(&self) -> f64 {
        (self.downstream.Trad / self.upstream.Trad).powi(4)
    }
}

/// Downstream density as function of the downstream temperature.
#[allow(non_snake_case)]
pub fn jump_density(params: &PhysicalParameters, T1: f64) -> f64 {
    let (g, P0) = (params.gamma, params.P0);
    let f1 = 3.0 * (g + 1.0) * (T1 - 1.0) - P0 * g * (g - 1.0) * (7.0 + T1.powi(4));
    let f2 = 12.0 * (g - 1.0).powi(2) * T1 * (3.0 + g * P0 * (1.0 + 7.0 * T1.powi(4)));
    (f1 + (f1 * f1 + f2).sqrt()) / (6.0 * (g - 1.0) * T1)
}

/// Reduced jump equation F(T1) = 0.
#[allow(non_snake_case)]
pub fn jump_residual(params: &PhysicalParameters, T1: f64) -> f64 {
    let (g, P0, M0) = (params.gamma, params.P0, params.M0);
    let rho = jump_density(params, T1);
    3.0 * rho * (rho * T1 - 1.0) + g * P0 * rho * (T1.powi(4) - 1.0)
        - 3.0 * g * (rho - 1.0) * M0 * M0
}

/// [`jump_residual`] as a symbolic expression in `T1`.
pub fn symbolic_jump_residual(params: &PhysicalParameters) -> Expr {
    let (g, P0, M0) = (params.gamma, params.P0, params.M0);
    let cst = Expr::Const;
    let t = Expr::Var(JUMP_VARIABLE.to_string());
    let t4 = t.clone().pow(cst(4.0));
    let f1 = cst(3.0 * (g + 1.0)) * (t.clone() - cst(1.0))
        - cst(P0 * g * (g - 1.0)) * (cst(7.0) + t4.clone());
    let f2 = cst(12.0 * (g - 1.0).powi(2))
        * t.clone()
        * (cst(3.0) + cst(g * P0) * (cst(1.0) + cst(7.0) * t4.clone()));
    let disc = (f1.clone().pow(cst(2.0)) + f2).pow(cst(0.5));
    let rho = (f1 + disc) / (cst(6.0 * (g - 1.0)) * t.clone());
    cst(3.0) * rho.clone() * (rho.clone() * t - cst(1.0))
        + cst(g * P0) * rho.clone() * (t4 - cst(1.0))
        - cst(3.0 * g * M0 * M0) * (rho - cst(1.0))
}

/// Residuals of the mass, momentum and energy balances for a candidate downstream state.
#[allow(non_snake_case)]
pub fn conservation_residuals(params: &PhysicalParameters, rho1: f64, T1: f64) -> [f64; 3] {
    let (g, P0, M0) = (params.gamma, params.P0, params.M0);
    let v1 = M0 / rho1;
    let mass = rho1 * v1 - M0;
    let momentum = M0 * M0 / rho1 + rho1 * T1 / g + P0 * T1.powi(4) / 3.0
        - (M0 * M0 + 1.0 / g + P0 / 3.0);
    let energy = M0 * (0.5 * v1 * v1 + T1 / (g - 1.0)) + 4.0 / 3.0 * P0 * v1 * T1.powi(4)
        - (M0 * (0.5 * M0 * M0 + 1.0 / (g - 1.0)) + 4.0 / 3.0 * P0 * M0);
    [mass, momentum, energy]
}

/// Solves the jump conditions; any root-finder failure is fatal for the run.
pub fn solve_jump_conditions(params: &PhysicalParameters) -> Result<AsymptoticStates, ShockError> {
    if !(params.gamma > 1.0) || !(params.M0 > 1.0) || params.P0 < 0.0 {
        return Err(ShockError::InvalidConfiguration(format!(
            "jump conditions need gamma > 1, M0 > 1, P0 >= 0 (got {}, {}, {})",
            params.gamma, params.M0, params.P0
        )));
    }
    let finder = ScalarRootFinder::with_config(RootFindingConfig {
        tolerance: JUMP_TOLERANCE,
        max_iterations: JUMP_MAX_ITERATIONS,
        verbose: false,
    });
    let root = finder.solve_symbolic_expr(
        symbolic_jump_residual(params),
        JUMP_VARIABLE,
        RootFindingMethod::NewtonRaphson,
        params.M0 * params.M0,
        None,
        None,
    )?;
    let t1 = root.root;
    let rho1 = jump_density(params, t1);
    if !(t1 > 1.0 && rho1 > 1.0) {
        return Err(ShockError::JumpNotConverged(RootFindingError::InvalidInput(
            format!("non-physical downstream state T1 = {}, rho1 = {}", t1, rho1),
        )));
    }
    let states = AsymptoticStates {
        upstream: PhysicalState::new(1.0, 1.0, 1.0, params.M0),
        downstream: PhysicalState::new(rho1, t1, t1, params.M0),
        iterations: root.iterations,
        residual: jump_residual(params, t1).abs(),
    };
    info!(
        "jump conditions: rho1 = {:.10}, T1 = {:.10}, v1 = {:.10} ({} Newton iterations)",
        rho1,
        t1,
        states.v1(),
        root.iterations
    );
    Ok(states)
}

/// Ideal-gas Rankine-Hugoniot values (ρ1, T1) for P0 = 0.
#[allow(non_snake_case)]
pub fn rankine_hugoniot(gamma: f64, M0: f64) -> (f64, f64) {
    let m2 = M0 * M0;
    let rho1 = (gamma + 1.0) * m2 / ((gamma - 1.0) * m2 + 2.0);
    let T1 = (2.0 * gamma * m2 - (gamma - 1.0)) * ((gamma - 1.0) * m2 + 2.0)
        / ((gamma + 1.0).powi(2) * m2);
    (rho1, T1)
}

//! Right-hand side of the structure equations with the Mach number as independent variable.
//!
//! State `y = [x, T]`. Density, velocity and radiation temperature follow algebraically:
//! ```text
//! ρ = M0 / (M √T),   v = M0 / ρ
//! Trad⁴ = (Km - 3γM0²/ρ - 3Tρ) / (γP0)
//! dTrad/dx = v (6Cp ρ (T - 1) + 3ρ (v² - M0²) + 8P0 (Trad⁴ - ρ)) / (24 P0 κ Trad³)
//! r  = 3ρσa (Trad⁴ - T⁴)
//! Zd = 4M0 Trad³ dTrad/dx + (γ-1)/(γ+1) (γM² + 1) r
//! Zn = 4M0 Trad³ dTrad/dx + (γM² - 1) r
//! dx/dM = -6 M0 ρ T / ((γ+1) P0 M) · (M² - 1) / Zd
//! dT/dM = -2 (γ-1)/(γ+1) · (T / M) · Zn / Zd
//! ```
//! In `Zd` and `Zn` the factor Trad³ cancels against the denominator of dTrad/dx, so the system
//! only needs Trad⁴ and stays polynomial in Trad.
//!
//! The same system is available twice: in plain `f64` arithmetic for closures and diagnostics,
//! and as `RustedSciThe` symbolic expressions (variables `x`, `T`, independent variable `M`)
//! handed to the Radau solver together with their symbolic Jacobian.
use crate::ShockSolver::shock_config::PhysicalParameters;
use RustedSciThe::symbolic::symbolic_engine::Expr;
use nalgebra::{DMatrix, DVector};

/// Unknowns of the structure system, in order.
pub const STATE_VARIABLES: [&str; 2] = ["x", "T"];
/// Independent variable of the structure system.
pub const MACH_VARIABLE: &str = "M";

/// Physical parameters together with the derived constants used in every evaluation.
#[derive(Debug, Clone, PartialEq)]
#[allow(non_snake_case)]
pub struct ShockODE {
    pub gamma: f64,
    pub P0: f64,
    pub M0: f64,
    pub sigma_a: f64,
    pub c: f64,
    pub kappa: f64,
    pub Km: f64,
    pub Cp: f64,
}

#[allow(non_snake_case)]
impl ShockODE {
    pub fn new(params: &PhysicalParameters) -> Self {
        Self {
            gamma: params.gamma,
            P0: params.P0,
            M0: params.M0,
            sigma_a: params.sigma_a,
            c: params.c,
            kappa: params.kappa(),
            Km: params.Km(),
            Cp: params.Cp(),
        }
    }

    /// ρ from Mach number and gas temperature
    pub fn density(&self, M: f64, T: f64) -> f64 {
        self.M0 / (M * T.sqrt())
    }

    pub fn velocity(&self, rho: f64) -> f64 {
        self.M0 / rho
    }

    /// Trad⁴ from the momentum closure; may be negative away from physical states.
    pub fn trad4_closure(&self, rho: f64, T: f64) -> f64 {
        let g = self.gamma;
        (self.Km - 3.0 * g * self.M0 * self.M0 / rho - 3.0 * T * rho) / (g * self.P0)
    }

    /// Radiation temperature from the momentum closure, NaN where Trad⁴ would be negative.
    pub fn trad_closure(&self, rho: f64, T: f64) -> f64 {
        let base = self.trad4_closure(rho, T);
        if base < 0.0 || !base.is_finite() {
            return f64::NAN;
        }
        base.powf(0.25)
    }

    /// numerator of dTrad/dx without the factor v / (24 P0 κ Trad³)
    fn gradient_numerator(&self, rho: f64, T: f64, Trad4: f64) -> f64 {
        let v = self.M0 / rho;
        6.0 * self.Cp * rho * (T - 1.0)
            + 3.0 * rho * (v * v - self.M0 * self.M0)
            + 8.0 * self.P0 * (Trad4 - rho)
    }

    pub fn dTrad_dx(&self, rho: f64, T: f64, Trad: f64) -> f64 {
        let v = self.M0 / rho;
        v * self.gradient_numerator(rho, T, Trad.powi(4))
            / (24.0 * self.P0 * self.kappa * Trad.powi(3))
    }

    /// dErad/dx with Erad = Trad⁴
    pub fn dErad_dx(&self, rho: f64, T: f64, Trad: f64) -> f64 {
        4.0 * Trad.powi(3) * self.dTrad_dx(rho, T, Trad)
    }

    /// Radiative flux (diffusion plus advection of radiation enthalpy), in units of P0.
    pub fn radiative_flux(&self, rho: f64, T: f64, Trad: f64, v: f64) -> f64 {
        -self.kappa * self.dErad_dx(rho, T, Trad) + (4.0 / 3.0) * (v / self.c) * Trad.powi(4)
    }

    /// Radiation pressure in units of P0.
    pub fn radiation_pressure(&self, Trad: f64) -> f64 {
        Trad.powi(4) / 3.0
    }

    /// S(M) = M² ((γ-1)M² + 2) / (γM² + 1)², invariant across a hydrodynamic shock.
    pub fn hydro_state_function(&self, M: f64) -> f64 {
        let M2 = M * M;
        M2 * ((self.gamma - 1.0) * M2 + 2.0) / (self.gamma * M2 + 1.0).powi(2)
    }

    /// (dx/dM, dT/dM); NaN outside T > 0, M > 0 or where Trad⁴ < 0.
    pub fn derivatives(&self, M: f64, y: &DVector<f64>) -> DVector<f64> {
        let T = y[1];
        if !(T > 0.0) || !(M > 0.0) {
            return DVector::from_element(2, f64::NAN);
        }
        let (gamma, M0, P0) = (self.gamma, self.M0, self.P0);
        let rho = self.density(M, T);
        let Trad4 = self.trad4_closure(rho, T);
        if Trad4 < 0.0 {
            return DVector::from_element(2, f64::NAN);
        }
        let grad = M0 * self.velocity(rho) * self.gradient_numerator(rho, T, Trad4)
            / (6.0 * P0 * self.kappa);
        let r = 3.0 * self.sigma_a * rho * (Trad4 - T.powi(4));
        let M2 = M * M;
        let Zd = grad + (gamma - 1.0) / (gamma + 1.0) * (gamma * M2 + 1.0) * r;
        let Zn = grad + (gamma * M2 - 1.0) * r;
        let dx = -6.0 * M0 * rho * T / ((gamma + 1.0) * P0 * M) * (M2 - 1.0) / Zd;
        let dT = -2.0 * (gamma - 1.0) / (gamma + 1.0) * (T / M) * Zn / Zd;
        DVector::from_vec(vec![dx, dT])
    }

    /// Symbolic right-hand side `[dx/dM, dT/dM]` in the variables `x`, `T` and `M`.
    pub fn symbolic_rhs(&self) -> Vec<Expr> {
        let (gamma, M0, P0) = (self.gamma, self.M0, self.P0);
        let cst = Expr::Const;
        let M = Expr::Var(MACH_VARIABLE.to_string());
        let T = Expr::Var(STATE_VARIABLES[1].to_string());
        let M2 = M.clone().pow(cst(2.0));

        let rho = cst(M0) / (M.clone() * T.clone().pow(cst(0.5)));
        let v = cst(M0) / rho.clone();
        let Trad4 = (cst(self.Km)
            - cst(3.0 * gamma * M0 * M0) / rho.clone()
            - cst(3.0) * T.clone() * rho.clone())
            / cst(gamma * P0);
        let numerator = cst(6.0 * self.Cp) * rho.clone() * (T.clone() - cst(1.0))
            + cst(3.0) * rho.clone() * (v.clone().pow(cst(2.0)) - cst(M0 * M0))
            + cst(8.0 * P0) * (Trad4.clone() - rho.clone());
        let grad = cst(M0 / (6.0 * P0 * self.kappa)) * v * numerator;
        let r = cst(3.0 * self.sigma_a) * rho.clone() * (Trad4 - T.clone().pow(cst(4.0)));
        let Zd = grad.clone()
            + cst((gamma - 1.0) / (gamma + 1.0)) * (cst(gamma) * M2.clone() + cst(1.0)) * r.clone();
        let Zn = grad + (cst(gamma) * M2.clone() - cst(1.0)) * r;

        let dx = cst(-6.0 * M0 / ((gamma + 1.0) * P0)) * rho * T.clone() / M.clone()
            * (M2 - cst(1.0))
            / Zd.clone();
        let dT = cst(-2.0 * (gamma - 1.0) / (gamma + 1.0)) * (T / M) * Zn / Zd;
        vec![dx, dT]
    }

    /// Row-major symbolic Jacobian of [`Self::symbolic_rhs`] with respect to `[x, T]`.
    /// The first column vanishes since nothing depends on x.
    pub fn symbolic_jacobian(&self) -> Vec<Expr> {
        let mut jacobian = Vec::with_capacity(4);
        for f in self.symbolic_rhs() {
            for var in STATE_VARIABLES {
                jacobian.push(f.diff(var));
            }
        }
        jacobian
    }

    /// Symbolic Jacobian evaluated at (M, y).
    pub fn jacobian(&self, M: f64, y: &DVector<f64>) -> DMatrix<f64> {
        let args = [STATE_VARIABLES[0], STATE_VARIABLES[1], MACH_VARIABLE];
        let values = [y[0], y[1], M];
        let entries: Vec<f64> = self
            .symbolic_jacobian()
            .iter()
            .map(|e| e.eval_expression(&args, &values))
            .collect();
        DMatrix::from_row_slice(2, 2, &entries)
    }
}

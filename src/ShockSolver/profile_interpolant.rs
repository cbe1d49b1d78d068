//! Piecewise cubic interpolation of a trajectory as a function of position.
use crate::ShockSolver::region_integrator::{Region, Trajectory};
use crate::ShockSolver::shock_errors::ShockError;
use RustedSciThe::numerical::interpolation::inter_n_extrapolate::{InterpolationSpace, Pchip};

/// Interpolated state at one position.
#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(non_snake_case)]
pub struct InterfaceState {
    pub rho: f64,
    pub mach: f64,
    pub v: f64,
    pub T: f64,
    pub Trad: f64,
}

/// Monotone cubic Hermite interpolants (PCHIP) of ρ, M, v, T and Trad over position.
/// Outside the sampled range the end slopes are continued linearly.
#[allow(non_snake_case)]
pub struct ProfileInterpolant {
    pub region: Region,
    x_range: (f64, f64),
    rho: Pchip,
    mach: Pchip,
    v: Pchip,
    T: Pchip,
    Trad: Pchip,
}

#[allow(non_snake_case)]
impl ProfileInterpolant {
    pub fn new(trajectory: &Trajectory) -> Result<Self, ShockError> {
        let region = trajectory.region;
        if trajectory.len() < 2 {
            return Err(ShockError::Interpolation(format!(
                "{} region has {} samples, at least 2 are needed",
                region,
                trajectory.len()
            )));
        }
        if let Some(index) = trajectory.monotonicity_violation() {
            return Err(ShockError::NonMonotonicTrajectory {
                region: region.to_string(),
                index,
            });
        }
        if let Some(index) = trajectory.x.iter().position(|x| !x.is_finite()) {
            return Err(ShockError::Interpolation(format!(
                "{} region: position {} is not finite",
                region, index
            )));
        }
        // knots must increase; relaxation positions decrease along the grid
        let reversed = trajectory.x[1] < trajectory.x[0];
        let ordered = |values: &[f64]| -> Vec<f64> {
            if reversed {
                values.iter().rev().copied().collect()
            } else {
                values.to_vec()
            }
        };
        let x = ordered(&trajectory.x);
        let pchip = |values: &[f64]| Pchip::new(&x, &ordered(values), InterpolationSpace::Linear);
        Ok(Self {
            region,
            x_range: trajectory.x_range(),
            rho: pchip(&trajectory.rho),
            mach: pchip(&trajectory.mach),
            v: pchip(&trajectory.v),
            T: pchip(&trajectory.T),
            Trad: pchip(&trajectory.Trad),
        })
    }

    pub fn eval(&self, x: f64) -> InterfaceState {
        InterfaceState {
            rho: self.rho.eval(x, false),
            mach: self.mach.eval(x, false),
            v: self.v.eval(x, false),
            T: self.T.eval(x, false),
            Trad: self.Trad.eval(x, false),
        }
    }

    /// Sampled position range (min, max).
    pub fn x_range(&self) -> (f64, f64) {
        self.x_range
    }
}

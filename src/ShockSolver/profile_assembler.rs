use crate::ShockSolver::region_integrator::Trajectory;
use crate::ShockSolver::shock_matcher::MatchOffsets;
use serde::{Deserialize, Serialize};

/// Full shock profile ordered by increasing position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[allow(non_snake_case)]
pub struct ShockProfile {
    pub x: Vec<f64>,
    pub rho: Vec<f64>,
    pub v: Vec<f64>,
    pub T: Vec<f64>,
    pub Trad: Vec<f64>,
}

#[allow(non_snake_case)]
impl ShockProfile {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// radiation energy density in units of the upstream one
    pub fn Erad(&self) -> Vec<f64> {
        self.Trad.iter().map(|t| t.powi(4)).collect()
    }

    fn push(&mut self, traj: &Trajectory, i: usize, x: f64) {
        self.x.push(x);
        self.rho.push(traj.rho[i]);
        self.v.push(traj.v[i]);
        self.T.push(traj.T[i]);
        self.Trad.push(traj.Trad[i]);
    }
}

/// Shifts both regions by their offsets, keeps the precursor at x <= 0 and the relaxation at
/// x >= 0 (reversed), then adds `pos_offset` to every position.
pub fn assemble_profile(
    precursor: &Trajectory,
    relaxation: &Trajectory,
    offsets: &MatchOffsets,
    pos_offset: f64,
) -> ShockProfile {
    let mut profile = ShockProfile::default();
    for i in 0..precursor.len() {
        let x = precursor.x[i] + offsets.dx_A;
        if x <= 0.0 {
            profile.push(precursor, i, x + pos_offset);
        }
    }
    for i in (0..relaxation.len()).rev() {
        let x = relaxation.x[i] + offsets.dx_B;
        if x >= 0.0 {
            profile.push(relaxation, i, x + pos_offset);
        }
    }
    profile
}

//! Run configuration: physical parameters, integration and matching settings, presentation
//! settings. Serialised to and from JSON; presets reproduce the two reference regimes
//! (M0 = 3 with an embedded hydrodynamic shock of moderate strength and the strong M0 = 30 case).
use crate::ShockSolver::shock_errors::ShockError;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Dimensionless physical parameters of the problem. Upstream density and temperature are 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct PhysicalParameters {
    /// adiabatic index
    pub gamma: f64,
    /// ratio of radiation to gas pressure upstream
    pub P0: f64,
    /// upstream Mach number
    pub M0: f64,
    /// absorption coefficient
    pub sigma_a: f64,
    /// speed of light
    pub c: f64,
}

impl Default for PhysicalParameters {
    fn default() -> Self {
        Self {
            gamma: 5.0 / 3.0,
            P0: 1e-4,
            M0: 3.0,
            sigma_a: 1e6,
            c: 1.0,
        }
    }
}

#[allow(non_snake_case)]
impl PhysicalParameters {
    /// upstream sound speed
    pub fn cs0(&self) -> f64 {
        1.0 / (3.0 * self.sigma_a).sqrt()
    }
    pub fn kappa_opacity(&self) -> f64 {
        self.sigma_a * self.cs0() / self.c
    }
    /// radiation diffusivity
    pub fn kappa(&self) -> f64 {
        self.c / (3.0 * self.kappa_opacity() * self.cs0())
    }
    /// total momentum flux times 3γ
    pub fn Km(&self) -> f64 {
        3.0 * (self.gamma * self.M0 * self.M0 + 1.0) + self.gamma * self.P0
    }
    pub fn Cp(&self) -> f64 {
        1.0 / (self.gamma - 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationConfig {
    /// perturbation of the radiation temperature away from the singular end states
    pub eps: f64,
    pub rtol: f64,
    pub atol: f64,
    /// maximum number of Radau steps over one region
    pub max_steps: usize,
    /// number of points of each Mach number grid
    pub n_points: usize,
    /// grids stop at 1 + sonic_offset (precursor) and 1 - sonic_offset (relaxation)
    pub sonic_offset: f64,
    /// first trial step relative to the grid spacing
    pub initial_step_fraction: f64,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            eps: 1e-6,
            rtol: 1e-8,
            atol: 1e-12,
            max_steps: 50_000,
            n_points: 1024,
            sonic_offset: 1e-3,
            initial_step_fraction: 1e-6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// acceptance threshold of the relative flux mismatch
    pub jump_tol: f64,
    /// grid points per offset axis in one pass of the global search
    pub grid_points: usize,
    /// number of global search passes, each on a rectangle half as wide
    pub zoom_iterations: usize,
    /// iteration limit of the local refinement
    pub max_iterations: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            jump_tol: 1e-5,
            grid_points: 17,
            zoom_iterations: 10,
            max_iterations: 200,
        }
    }
}

/// Presentation settings, never read by the solver itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// uniform shift added to the final positions
    pub pos_offset: f64,
    pub xlim: (f64, f64),
    pub ylim: (f64, f64),
    pub output_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pos_offset: 0.0,
            xlim: (-0.05, 0.05),
            ylim: (1.0, 5.0),
            output_dir: ".".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ShockConfig {
    pub physics: PhysicalParameters,
    pub integration: IntegrationConfig,
    pub matching: MatchingConfig,
    pub output: OutputConfig,
}

impl ShockConfig {
    /// Reference setup for M0 = 3.
    #[allow(non_snake_case)]
    pub fn mach3() -> Self {
        let physics = PhysicalParameters::default();
        let L = 9.112876254180604 * (1.0 / physics.sigma_a) * (physics.c / physics.cs0());
        Self {
            physics,
            integration: IntegrationConfig::default(),
            matching: MatchingConfig::default(),
            output: OutputConfig {
                pos_offset: (0.0132 / 0.01575) * L,
                xlim: (0.0, L),
                ylim: (1.0, 4.5),
                output_dir: ".".to_string(),
            },
        }
    }

    /// Reference setup for M0 = 30: much smaller perturbation, looser tolerances.
    pub fn mach30() -> Self {
        Self {
            physics: PhysicalParameters {
                M0: 30.0,
                ..PhysicalParameters::default()
            },
            integration: IntegrationConfig {
                eps: 1e-11,
                rtol: 1e-7,
                atol: 1e-10,
                ..IntegrationConfig::default()
            },
            matching: MatchingConfig::default(),
            output: OutputConfig {
                pos_offset: 0.0,
                xlim: (-0.25, 0.05),
                ylim: (1.0, 70.0),
                output_dir: ".".to_string(),
            },
        }
    }

    /// Preset by upstream Mach number; unknown values get the generic defaults.
    #[allow(non_snake_case)]
    pub fn preset(M0: f64) -> Self {
        if M0 == 3.0 {
            Self::mach3()
        } else if M0 == 30.0 {
            Self::mach30()
        } else {
            Self {
                physics: PhysicalParameters {
                    M0,
                    ..PhysicalParameters::default()
                },
                ..Self::default()
            }
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self, ShockError> {
        let config: ShockConfig = serde_json::from_str(s)?;
        config.check()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ShockError> {
        let text = fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&text)?;
        info!("configuration loaded from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ShockError> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Validates everything the full solve depends on.
    pub fn check(&self) -> Result<(), ShockError> {
        let p = &self.physics;
        let i = &self.integration;
        let m = &self.matching;
        let bad = |msg: String| Err(ShockError::InvalidConfiguration(msg));
        if !(p.gamma > 1.0 && p.gamma <= 2.0) {
            return bad(format!("adiabatic index must lie in (1, 2], got {}", p.gamma));
        }
        if !(p.P0 > 0.0) || !p.P0.is_finite() {
            return bad(format!(
                "radiation coupling P0 must be positive for the structure solve, got {}",
                p.P0
            ));
        }
        if !(p.M0 > 1.0) || !p.M0.is_finite() {
            return bad(format!("upstream Mach number must exceed 1, got {}", p.M0));
        }
        if !(p.sigma_a > 0.0) || !(p.c > 0.0) {
            return bad("absorption coefficient and speed of light must be positive".to_string());
        }
        if !(i.eps > 0.0 && i.eps <= 1e-3) {
            return bad(format!("eps must lie in (0, 1e-3], got {}", i.eps));
        }
        if !(i.rtol > 0.0) || !(i.atol > 0.0) {
            return bad("integration tolerances must be positive".to_string());
        }
        if i.max_steps == 0 || i.n_points < 4 {
            return bad("max_steps must be positive and n_points at least 4".to_string());
        }
        if !(i.sonic_offset > 0.0 && i.sonic_offset < 0.5) {
            return bad(format!("sonic_offset must lie in (0, 0.5), got {}", i.sonic_offset));
        }
        if !(i.initial_step_fraction > 0.0 && i.initial_step_fraction <= 1.0) {
            return bad("initial_step_fraction must lie in (0, 1]".to_string());
        }
        if !(m.jump_tol > 0.0) || m.grid_points < 2 || m.zoom_iterations == 0 {
            return bad(
                "matching needs a positive tolerance, 2+ grid points and 1+ passes".to_string(),
            );
        }
        Ok(())
    }
}

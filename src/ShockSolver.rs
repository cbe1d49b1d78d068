//! # Radiative Shock Solver
//!
//! Semi-analytic structure of a steady, planar, non-equilibrium radiative shock in the
//! grey nonequilibrium-diffusion approximation (Lowrie & Edwards, Shock Waves 18, 2008).
//! The solution is a reference profile for verification of radiation-hydrodynamics codes.
//!
//! ## Mathematical Model
//!
//! ### Nomenclature
//!
//! All quantities are dimensionless, scaled with the upstream state (ρ0 = T0 = Trad0 = 1).
//!
//! | Symbol | Description |
//! |--------|-------------|
//! | `γ` | adiabatic index |
//! | `P0` | upstream ratio of radiation to gas pressure |
//! | `M0` | upstream Mach number |
//! | `σa` | absorption coefficient |
//! | `c` | speed of light |
//! | `κ` | radiation diffusivity, `c / (3 κ_opacity cs0)` |
//! | `M` | local Mach number `v/√T` |
//! | `ρ`, `v`, `T` | density, velocity, gas temperature |
//! | `Trad` | radiation temperature, `Erad = Trad⁴` |
//! | `Km` | `3(γM0² + 1) + γP0`, three times γ times the total momentum flux |
//!
//! ### Model Assumptions
//!
//! - ideal gas with constant γ, grey radiation, constant opacities
//! - radiation in the diffusion limit, Eddington factor 1/3
//! - the far upstream and far downstream states are in radiative equilibrium (`Trad = T`)
//!
//! ### Governing Equations
//!
//! Mass and momentum conservation give closed forms for ρ, v and Trad in terms of (M, T).
//! Energy conservation and the radiation diffusion equation reduce to two ODEs with the
//! Mach number as independent variable:
//! ```text
//! dx/dM = -6 M0 ρ T / ((γ+1) P0 M) · (M² - 1) / Zd
//! dT/dM = -2 (γ-1)/(γ+1) · (T / M) · Zn / Zd
//! ```
//! (see [`shock_ode`] for `Zn`, `Zd`). Both end states are singular points of this system
//! and M = 1 is where the denominators change sign.
//!
//! ## Numerical Solution
//!
//! | Stage | Module | Method |
//! |-------|--------|--------|
//! | far-field states | [`jump_conditions`] | symbolic Newton on one equation in T1 |
//! | regime, starting points | [`critical_point`] | l'Hôpital slope dT/dTrad, branch chosen once |
//! | precursor and relaxation | [`region_integrator`] | Radau IIA with symbolic Jacobian on a Mach grid ending at 1 ± offset |
//! | matching | [`shock_matcher`] | grid zoom search, then Levenberg-Marquardt inside the box |
//! | profile | [`profile_assembler`], [`profile_io`] | shift, select, concatenate, write |
//!
//! When the radiative precursor cannot heat the gas to the downstream state before the sonic
//! point, the two regions are joined by an embedded hydrodynamic shock (Zel'dovich spike).
//! Continuity of radiative flux, radiation pressure and `S(M)` across the interface fixes the
//! position shifts of both regions.
//!
//! The driver [`radshock_task::RadShockTask`] runs the stages in order and keeps every
//! intermediate result.

pub mod critical_point;
pub mod jump_conditions;
pub mod profile_assembler;
pub mod profile_interpolant;
pub mod profile_io;
pub mod radshock_task;
pub mod radshock_task_output;
pub mod region_integrator;
pub mod shock_config;
pub mod shock_errors;
pub mod shock_matcher;
pub mod shock_ode;

mod jump_conditions_tests;
mod radshock_task_tests;
mod shock_config_tests;
mod shock_matcher_tests;

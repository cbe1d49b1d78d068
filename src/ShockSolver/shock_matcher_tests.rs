#[cfg(test)]
mod tests {
    use crate::ShockSolver::critical_point::perturb_singular_points;
    use crate::ShockSolver::jump_conditions::solve_jump_conditions;
    use crate::ShockSolver::profile_assembler::assemble_profile;
    use crate::ShockSolver::profile_interpolant::ProfileInterpolant;
    use crate::ShockSolver::region_integrator::{Region, Trajectory, integrate_region, mach_grid};
    use crate::ShockSolver::shock_config::ShockConfig;
    use crate::ShockSolver::shock_errors::ShockError;
    use crate::ShockSolver::shock_matcher::{
        CandidateOffsets, MatchOffsets, ShockMatcher, interface_fluxes,
    };
    use crate::ShockSolver::shock_ode::ShockODE;
    use approx::assert_relative_eq;

    fn mach3_regions() -> (ShockODE, ShockConfig, Trajectory, Trajectory) {
        let config = ShockConfig::mach3();
        let ode = ShockODE::new(&config.physics);
        let states = solve_jump_conditions(&config.physics).unwrap();
        let starts = perturb_singular_points(&ode, &states, config.integration.eps).unwrap();
        let a = integrate_region(&ode, &starts.precursor, &config.integration).unwrap();
        let b = integrate_region(&ode, &starts.relaxation, &config.integration).unwrap();
        (ode, config, a, b)
    }

    fn synthetic(ode: &ShockODE, x: Vec<f64>) -> Trajectory {
        let n = x.len();
        let mach = mach_grid(2.5, 1.5, n);
        let t = (0..n).map(|i| 1.0 + 0.1 * i as f64).collect();
        Trajectory::from_samples(ode, Region::Precursor, mach, x, t, 0)
    }

    #[test]
    fn test_interpolant_reproduces_samples() {
        let (_, _, a, b) = mach3_regions();
        for traj in [&a, &b] {
            let f = ProfileInterpolant::new(traj).unwrap();
            for i in (0..traj.len()).step_by(97) {
                let s = f.eval(traj.x[i]);
                assert_relative_eq!(s.T, traj.T[i], max_relative = 1e-10);
                assert_relative_eq!(s.rho, traj.rho[i], max_relative = 1e-10);
                assert_relative_eq!(s.mach, traj.mach[i], max_relative = 1e-10);
                assert_relative_eq!(s.v, traj.v[i], max_relative = 1e-10);
                assert_relative_eq!(s.Trad, traj.Trad[i], max_relative = 1e-10);
            }
        }
    }

    #[test]
    fn test_interpolant_rejects_non_monotonic_positions() {
        let ode = ShockODE::new(&ShockConfig::mach3().physics);
        let traj = synthetic(&ode, vec![0.0, 1.0, 3.0, 2.0, 4.0]);
        assert!(matches!(
            ProfileInterpolant::new(&traj),
            Err(ShockError::NonMonotonicTrajectory { index: 3, .. })
        ));
        let ok = synthetic(&ode, vec![0.0, -1.0, -2.0, -3.0]);
        let f = ProfileInterpolant::new(&ok).unwrap();
        assert_eq!(f.x_range(), (-3.0, 0.0));
        // modest extrapolation stays finite
        assert!(f.eval(0.5).T.is_finite());
    }

    #[test]
    fn test_bounds_follow_trajectory_extent() {
        let (ode, config, a, b) = mach3_regions();
        let matcher = ShockMatcher::new(&ode, &a, &b, &config.matching).unwrap();
        let bounds = matcher.bounds();
        assert_eq!(bounds.lower[0], -a.x_range().1);
        assert_eq!(bounds.upper[0], 0.0);
        assert_eq!(bounds.lower[1], 0.0);
        assert_eq!(bounds.upper[1], -b.x_range().0);
    }

    #[test]
    fn test_objective_is_relative_mismatch() {
        let (ode, config, a, b) = mach3_regions();
        let matcher = ShockMatcher::new(&ode, &a, &b, &config.matching).unwrap();
        let offsets = MatchOffsets {
            dx_A: -0.01,
            dx_B: 0.001,
        };
        let (fa, fb) = matcher.fluxes(&offsets);
        let expected = ((fa.Frad - fb.Frad).powi(2)
            + (fa.Prad - fb.Prad).powi(2)
            + (fa.S - fb.S).powi(2))
            / (fb.Frad.powi(2) + fb.Prad.powi(2) + fb.S.powi(2));
        assert_relative_eq!(matcher.objective(&offsets), expected, max_relative = 1e-12);
        let r = matcher.residuals(&offsets);
        let norm = (fb.Frad.powi(2) + fb.Prad.powi(2) + fb.S.powi(2)).sqrt();
        assert_relative_eq!(r[0], (fa.Frad - fb.Frad) / norm, max_relative = 1e-12);
        assert_relative_eq!(r[2], (fa.S - fb.S) / norm, max_relative = 1e-12);
        let state = ProfileInterpolant::new(&b).unwrap().eval(-0.001);
        assert_eq!(interface_fluxes(&ode, &state), fb);
    }

    #[test]
    fn test_matching_mach3() {
        let (ode, config, a, b) = mach3_regions();
        let matcher = ShockMatcher::new(&ode, &a, &b, &config.matching).unwrap();
        let candidate = matcher.global_search().unwrap();
        assert_eq!(
            candidate.evaluations,
            config.matching.grid_points.pow(2) * config.matching.zoom_iterations
        );
        let outcome = matcher.refine(&candidate).unwrap();
        assert!(outcome.converged);
        assert!(!outcome.termination.is_empty());
        assert_eq!(
            outcome.evaluations,
            candidate.evaluations + outcome.refinement_evaluations
        );
        assert!(outcome.objective < 1e-5);
        assert!(outcome.objective <= candidate.objective);
        assert_relative_eq!(outcome.offsets.dx_A, -0.019635, max_relative = 5e-2);
        assert_relative_eq!(outcome.offsets.dx_B, 0.003677, max_relative = 5e-2);

        // refinement from its own result does not move the objective
        let again = matcher
            .refine(&CandidateOffsets {
                offsets: outcome.offsets,
                objective: outcome.objective,
                evaluations: 0,
            })
            .unwrap();
        assert!((again.objective - outcome.objective).abs() < config.matching.jump_tol);
    }

    #[test]
    fn test_unreachable_tolerance_is_flagged_not_fatal() {
        let (ode, mut config, a, b) = mach3_regions();
        config.matching.jump_tol = 1e-30;
        let matcher = ShockMatcher::new(&ode, &a, &b, &config.matching).unwrap();
        let outcome = matcher.solve().unwrap();
        assert!(!outcome.converged);
        assert!(outcome.objective > config.matching.jump_tol);
        assert!(outcome.objective <= outcome.candidate.objective);
        let x = nalgebra::DVector::from_vec(vec![outcome.offsets.dx_A, outcome.offsets.dx_B]);
        assert!(matcher.bounds().contains(&x));
    }

    #[test]
    fn test_assembly_mach3() {
        let (ode, config, a, b) = mach3_regions();
        let matcher = ShockMatcher::new(&ode, &a, &b, &config.matching).unwrap();
        let outcome = matcher.solve().unwrap();
        let profile = assemble_profile(&a, &b, &outcome.offsets, 0.0);
        assert!(profile.x.windows(2).all(|w| w[1] > w[0]));
        assert_relative_eq!(profile.T[0], 1.0, max_relative = 1e-6);
        let n = profile.len();
        assert_relative_eq!(profile.T[n - 1], 3.6619127, max_relative = 1e-6);
        assert_relative_eq!(profile.rho[n - 1], 3.0021677, max_relative = 1e-6);
        let erad = profile.Erad();
        assert_relative_eq!(erad[n - 1], profile.Trad[n - 1].powi(4));

        let shifted = assemble_profile(&a, &b, &outcome.offsets, 0.5);
        assert_eq!(shifted.len(), n);
        assert_relative_eq!(shifted.x[0], profile.x[0] + 0.5);
    }
}

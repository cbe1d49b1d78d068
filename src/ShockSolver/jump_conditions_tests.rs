#[cfg(test)]
mod tests {
    use crate::ShockSolver::jump_conditions::{
        JUMP_VARIABLE, conservation_residuals, jump_residual, rankine_hugoniot,
        solve_jump_conditions, symbolic_jump_residual,
    };
    use crate::ShockSolver::shock_config::PhysicalParameters;
    use crate::ShockSolver::shock_errors::ShockError;
    use approx::assert_relative_eq;

    #[allow(non_snake_case)]
    fn params(gamma: f64, P0: f64, M0: f64) -> PhysicalParameters {
        PhysicalParameters {
            gamma,
            P0,
            M0,
            ..PhysicalParameters::default()
        }
    }

    #[test]
    fn test_mach3_reference_values() {
        let states = solve_jump_conditions(&params(5.0 / 3.0, 1e-4, 3.0)).unwrap();
        assert_relative_eq!(states.rho1(), 3.0021677, max_relative = 1e-6);
        assert_relative_eq!(states.T1(), 3.6619127, max_relative = 1e-6);
        assert_relative_eq!(states.v1(), 3.0 / states.rho1(), max_relative = 1e-14);
        assert_eq!(states.downstream.Trad, states.downstream.T);
        assert_eq!(states.upstream.rho, 1.0);
        assert_relative_eq!(states.upstream.mach(), 3.0, max_relative = 1e-14);
        assert!(states.residual < 1e-7);
    }

    #[test]
    fn test_mach30_reference_values() {
        let states = solve_jump_conditions(&params(5.0 / 3.0, 1e-4, 30.0)).unwrap();
        assert_relative_eq!(states.rho1(), 6.06764, max_relative = 1e-5);
        assert_relative_eq!(states.T1(), 62.94088, max_relative = 1e-5);
        assert_relative_eq!(
            states.pressure_ratio(),
            states.rho1() * states.T1(),
            max_relative = 1e-14
        );
        assert_relative_eq!(
            states.radiation_energy_ratio(),
            states.T1().powi(4),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_conservation_and_compression() {
        for &gamma in &[1.2, 1.4, 5.0 / 3.0, 1.9] {
            for &P0 in &[0.0, 1e-4, 1e-2] {
                for &M0 in &[1.2, 2.0, 3.0, 10.0, 30.0] {
                    let p = params(gamma, P0, M0);
                    let s = solve_jump_conditions(&p).unwrap();
                    let [mass, momentum, energy] = conservation_residuals(&p, s.rho1(), s.T1());
                    let scale = M0 * M0 + 1.0 / gamma + P0 / 3.0;
                    assert!(mass.abs() < 1e-12 * M0, "mass {} for {:?}", mass, p);
                    assert!(momentum.abs() < 1e-6 * scale, "momentum {} for {:?}", momentum, p);
                    assert!(energy.abs() < 1e-6 * M0 * scale, "energy {} for {:?}", energy, p);
                    assert!(s.rho1() >= 1.0 && s.T1() >= 1.0);
                    assert!(s.v1() <= M0);
                }
            }
        }
    }

    #[test]
    fn test_no_radiation_reduces_to_rankine_hugoniot() {
        for &M0 in &[1.5, 3.0, 7.0] {
            let s = solve_jump_conditions(&params(5.0 / 3.0, 0.0, M0)).unwrap();
            let (rho1, t1) = rankine_hugoniot(5.0 / 3.0, M0);
            assert_relative_eq!(s.rho1(), rho1, max_relative = 1e-8);
            assert_relative_eq!(s.T1(), t1, max_relative = 1e-8);
        }
        let (rho1, t1) = rankine_hugoniot(5.0 / 3.0, 3.0);
        assert_relative_eq!(rho1, 3.0, max_relative = 1e-14);
        assert_relative_eq!(t1, 11.0 / 3.0, max_relative = 1e-14);
    }

    #[test]
    fn test_trivial_root_at_upstream_state() {
        // T1 = 1 (no shock) always satisfies the reduced equation
        let p = params(5.0 / 3.0, 1e-4, 3.0);
        assert!(jump_residual(&p, 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_symbolic_residual_matches_plain_evaluation() {
        for &M0 in &[3.0, 30.0] {
            let p = params(5.0 / 3.0, 1e-4, M0);
            let expr = symbolic_jump_residual(&p);
            for &t in &[1.5, 3.6619127, 10.0, M0 * M0] {
                let symbolic = expr.eval_expression(&[JUMP_VARIABLE], &[t]);
                let plain = jump_residual(&p, t);
                assert_relative_eq!(symbolic, plain, max_relative = 1e-10, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            solve_jump_conditions(&params(5.0 / 3.0, 1e-4, 0.5)),
            Err(ShockError::InvalidConfiguration(_))
        ));
        assert!(solve_jump_conditions(&params(1.0, 1e-4, 3.0)).is_err());
        assert!(solve_jump_conditions(&params(5.0 / 3.0, -1.0, 3.0)).is_err());
    }
}

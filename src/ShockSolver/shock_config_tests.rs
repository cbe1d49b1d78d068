#[cfg(test)]
mod tests {
    use crate::ShockSolver::shock_config::{PhysicalParameters, ShockConfig};
    use crate::ShockSolver::shock_errors::ShockError;
    use approx::assert_relative_eq;
    use tempfile::tempdir;

    #[test]
    fn test_derived_constants() {
        let p = PhysicalParameters::default();
        assert_relative_eq!(p.cs0(), 1.0 / (3.0e6_f64).sqrt(), max_relative = 1e-14);
        // c / (3 sigma_a cs0² / c) = 1 for c = 1
        assert_relative_eq!(p.kappa(), 1.0, max_relative = 1e-12);
        assert_relative_eq!(p.Cp(), 1.5, max_relative = 1e-14);
        let gamma = 5.0 / 3.0;
        assert_relative_eq!(
            p.Km(),
            3.0 * (gamma * 9.0 + 1.0) + gamma * 1e-4,
            max_relative = 1e-14
        );
    }

    #[test]
    fn test_presets() {
        let c3 = ShockConfig::mach3();
        assert_eq!(c3.physics.M0, 3.0);
        assert_eq!(c3.integration.eps, 1e-6);
        assert_eq!(c3.output.xlim.0, 0.0);
        assert!(c3.output.pos_offset > 0.0 && c3.output.pos_offset < c3.output.xlim.1);
        let c30 = ShockConfig::preset(30.0);
        assert_eq!(c30.physics.M0, 30.0);
        assert_eq!(c30.integration.eps, 1e-11);
        assert_eq!(c30.integration.rtol, 1e-7);
        assert_eq!(c30.output.ylim, (1.0, 70.0));
        let c5 = ShockConfig::preset(5.0);
        assert_eq!(c5.physics.M0, 5.0);
        assert_eq!(c5.integration, ShockConfig::default().integration);
        for c in [c3, c30, c5] {
            assert!(c.check().is_ok());
        }
    }

    #[test]
    fn test_check_rejects_bad_values() {
        let mut c = ShockConfig::mach3();
        c.physics.M0 = 0.9;
        assert!(matches!(c.check(), Err(ShockError::InvalidConfiguration(_))));

        let mut c = ShockConfig::mach3();
        c.physics.gamma = 1.0;
        assert!(c.check().is_err());

        let mut c = ShockConfig::mach3();
        c.integration.eps = 0.0;
        assert!(c.check().is_err());

        let mut c = ShockConfig::mach3();
        c.integration.n_points = 2;
        assert!(c.check().is_err());

        let mut c = ShockConfig::mach3();
        c.matching.grid_points = 1;
        assert!(c.check().is_err());
    }

    #[test]
    fn test_sonic_offset_must_be_positive() {
        // a grid ending on M = 1 would start the integration at the singular point
        for offset in [0.0, -1e-3, 0.5, f64::NAN] {
            let mut c = ShockConfig::mach3();
            c.integration.sonic_offset = offset;
            assert!(matches!(c.check(), Err(ShockError::InvalidConfiguration(_))));
        }
        let mut c = ShockConfig::mach3();
        c.integration.sonic_offset = 1e-9;
        assert!(c.check().is_ok());
    }

    #[test]
    fn test_json_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mach30.json");
        let config = ShockConfig::mach30();
        config.save(&path).unwrap();
        let loaded = ShockConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        assert!(matches!(
            ShockConfig::from_json_str("{ \"physics\": 3 }"),
            Err(ShockError::Json(_))
        ));
        let mut config = ShockConfig::mach3();
        config.physics.P0 = -1.0;
        let text = serde_json::to_string(&config).unwrap();
        assert!(matches!(
            ShockConfig::from_json_str(&text),
            Err(ShockError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let result = ShockConfig::load(dir.path().join("absent.json"));
        assert!(matches!(result, Err(ShockError::Io(_))));
    }
}

#[cfg(test)]
mod tests {
    use crate::Numerics::box_search::{BoxBounds, OptimizeError, grid_zoom_search};
    use approx::assert_relative_eq;
    use nalgebra::DVector;

    fn quadratic(x: &DVector<f64>) -> f64 {
        let (a, b) = (x[0] - 0.5, x[1] - 0.25);
        100.0 * a * a + b * b + 10.0 * a * b
    }

    fn unit_box() -> BoxBounds {
        BoxBounds::new(vec![-1.0, -1.0], vec![1.0, 1.0]).unwrap()
    }

    #[test]
    fn test_bounds_validation() {
        assert!(BoxBounds::new(vec![0.0], vec![1.0, 2.0]).is_err());
        assert!(BoxBounds::new(vec![1.0], vec![0.0]).is_err());
        assert!(BoxBounds::new(vec![], vec![]).is_err());
        let b = unit_box();
        let p = b.project(&DVector::from_vec(vec![3.0, -0.5]));
        assert_eq!(p, DVector::from_vec(vec![1.0, -0.5]));
        assert!(b.contains(&p));
        assert!(!b.contains(&DVector::from_vec(vec![1.0 + 1e-12, 0.0])));
        assert_eq!(b.widths(), DVector::from_vec(vec![2.0, 2.0]));
    }

    #[test]
    fn test_grid_zoom_search_locates_minimum() {
        let res = grid_zoom_search(quadratic, &unit_box(), 17, 10).unwrap();
        assert_relative_eq!(res.x[0], 0.5, epsilon = 1e-3);
        assert_relative_eq!(res.x[1], 0.25, epsilon = 1e-3);
        assert_eq!(res.evaluations, 17 * 17 * 10);
    }

    #[test]
    fn test_grid_zoom_search_corner_minimum() {
        let bounds = BoxBounds::new(vec![0.0, 0.0], vec![1.0, 1.0]).unwrap();
        let f = |x: &DVector<f64>| (x[0] - 2.0).powi(2) + (x[1] + 1.0).powi(2);
        let res = grid_zoom_search(f, &bounds, 5, 4).unwrap();
        assert_eq!(res.x, DVector::from_vec(vec![1.0, 0.0]));
        assert!(bounds.contains(&res.x));
    }

    #[test]
    fn test_grid_zoom_search_skips_nan() {
        let f = |x: &DVector<f64>| {
            if x[0] < 0.0 {
                f64::NAN
            } else {
                (x[0] - 0.2).powi(2) + x[1].powi(2)
            }
        };
        let res = grid_zoom_search(f, &unit_box(), 9, 6).unwrap();
        assert!(res.fx.is_finite());
        assert_relative_eq!(res.x[0], 0.2, epsilon = 1e-2);

        let all_nan = grid_zoom_search(|_x: &DVector<f64>| f64::NAN, &unit_box(), 3, 2);
        assert_eq!(all_nan.unwrap_err(), OptimizeError::NoFiniteValue);
        assert_eq!(
            grid_zoom_search(quadratic, &unit_box(), 1, 2).unwrap_err(),
            OptimizeError::TooFewGridPoints(1)
        );
    }
}

//! Text files of shock profiles and comparison of two profiles.
//!
//! Format: one header line `# x rho vel Tmat Trad`, then one row per sample with the five values
//! in 18-digit scientific notation (`1.000000000000000000e+00`) separated by single spaces.
use crate::ShockSolver::profile_assembler::ShockProfile;
use crate::ShockSolver::shock_errors::ShockError;
use log::{info, warn};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const PROFILE_HEADER: &str = "# x rho vel Tmat Trad";

/// `shock_Mach_3.0.txt` for M0 = 3
#[allow(non_snake_case)]
pub fn profile_file_name(M0: f64) -> String {
    format!("shock_Mach_{:?}.txt", M0)
}

/// Scientific notation with 18 fraction digits and a signed two-digit exponent.
pub fn format_sci(value: f64) -> String {
    if !value.is_finite() {
        return format!("{}", value);
    }
    let s = format!("{:.18e}", value);
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exp),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => s,
    }
}

pub fn write_profile(path: impl AsRef<Path>, profile: &ShockProfile) -> Result<(), ShockError> {
    let file = fs::File::create(path.as_ref())?;
    let mut w = BufWriter::new(file);
    writeln!(w, "{}", PROFILE_HEADER)?;
    for i in 0..profile.len() {
        let row = [
            profile.x[i],
            profile.rho[i],
            profile.v[i],
            profile.T[i],
            profile.Trad[i],
        ]
        .map(format_sci);
        writeln!(w, "{}", row.join(" "))?;
    }
    w.flush()?;
    info!(
        "profile with {} points written to {}",
        profile.len(),
        path.as_ref().display()
    );
    Ok(())
}

/// Writes `shock_Mach_{M0}.txt` into `dir` and returns its path.
#[allow(non_snake_case)]
pub fn save_profile_in(
    dir: impl AsRef<Path>,
    M0: f64,
    profile: &ShockProfile,
) -> Result<PathBuf, ShockError> {
    let dir = dir.as_ref();
    if !dir.as_os_str().is_empty() {
        fs::create_dir_all(dir)?;
    }
    let path = dir.join(profile_file_name(M0));
    write_profile(&path, profile)?;
    Ok(path)
}

pub fn parse_profile(text: &str) -> Result<ShockProfile, ShockError> {
    let mut profile = ShockProfile::default();
    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let values = line
            .split_whitespace()
            .map(|tok| {
                tok.parse::<f64>().map_err(|e| ShockError::ProfileFormat {
                    line: n + 1,
                    message: format!("'{}': {}", tok, e),
                })
            })
            .collect::<Result<Vec<f64>, ShockError>>()?;
        if values.len() != 5 {
            return Err(ShockError::ProfileFormat {
                line: n + 1,
                message: format!("expected 5 columns, found {}", values.len()),
            });
        }
        profile.x.push(values[0]);
        profile.rho.push(values[1]);
        profile.v.push(values[2]);
        profile.T.push(values[3]);
        profile.Trad.push(values[4]);
    }
    Ok(profile)
}

pub fn read_profile(path: impl AsRef<Path>) -> Result<ShockProfile, ShockError> {
    let text = fs::read_to_string(path)?;
    parse_profile(&text)
}

/// Relative L1 errors of a profile against a reference.
#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(non_snake_case)]
pub struct ProfileComparison {
    pub T_error: f64,
    pub rho_error: f64,
    /// samples of the tested profile inside the reference position range
    pub points: usize,
    pub error_tol: f64,
}

impl ProfileComparison {
    pub fn passed(&self) -> bool {
        self.T_error < self.error_tol && self.rho_error < self.error_tol
    }
}

/// Piecewise linear value of the reference at `x`, None outside its range. Knots are
/// non-decreasing; a repeated knot is a jump, and on it the mean of both sides is returned.
pub fn reference_value(xs: &[f64], values: &[f64], x: f64) -> Option<f64> {
    let n = xs.len();
    if n < 2 || !(x >= xs[0] && x <= xs[n - 1]) {
        return None;
    }
    let lo = xs.partition_point(|k| *k < x);
    let hi = xs.partition_point(|k| *k <= x);
    if lo < hi {
        return Some(0.5 * (values[lo] + values[hi - 1]));
    }
    let (x0, x1) = (xs[lo - 1], xs[lo]);
    let w = (x - x0) / (x1 - x0);
    Some(values[lo - 1] + w * (values[lo] - values[lo - 1]))
}

fn relative_l1(xs: &[f64], values: &[f64], ref_x: &[f64], ref_values: &[f64]) -> Option<f64> {
    let mut num = 0.0;
    let mut den = 0.0;
    for (x, val) in xs.iter().zip(values) {
        let r = reference_value(ref_x, ref_values, *x)?;
        num += (val - r).abs();
        den += r.abs();
    }
    (den > 0.0).then_some(num / den)
}

/// `Σ|u - u_ref| / Σ|u_ref|` over the tested samples inside the reference range, with the
/// reference linearly interpolated. Reference positions must be non-decreasing; the repeated
/// position an assembled profile has at the interface is treated as the jump it represents.
pub fn compare_profiles(
    profile: &ShockProfile,
    reference: &ShockProfile,
    error_tol: f64,
) -> Result<ProfileComparison, ShockError> {
    let n = reference.len();
    if n < 2
        || reference.x.windows(2).any(|w| !(w[1] >= w[0]))
        || !(reference.x[n - 1] > reference.x[0])
    {
        return Err(ShockError::Interpolation(
            "reference profile needs non-decreasing x spanning a positive range".to_string(),
        ));
    }
    let (lo, hi) = (reference.x[0], reference.x[n - 1]);
    let inside: Vec<usize> = (0..profile.len())
        .filter(|&i| profile.x[i] >= lo && profile.x[i] <= hi)
        .collect();
    if inside.is_empty() {
        return Err(ShockError::Interpolation(
            "profiles do not overlap in position".to_string(),
        ));
    }
    let pick = |v: &[f64]| inside.iter().map(|&i| v[i]).collect::<Vec<f64>>();
    let xs = pick(&profile.x);
    let nan_if_none = |e: Option<f64>| e.unwrap_or(f64::NAN);
    let comparison = ProfileComparison {
        T_error: nan_if_none(relative_l1(&xs, &pick(&profile.T), &reference.x, &reference.T)),
        rho_error: nan_if_none(relative_l1(
            &xs,
            &pick(&profile.rho),
            &reference.x,
            &reference.rho,
        )),
        points: inside.len(),
        error_tol,
    };
    if comparison.passed() {
        info!(
            "profile comparison: T error {:.3e}, rho error {:.3e} over {} points",
            comparison.T_error, comparison.rho_error, comparison.points
        );
    } else {
        warn!(
            "profile comparison failed: T error {:.3e}, rho error {:.3e} (tolerance {:.1e})",
            comparison.T_error, comparison.rho_error, error_tol
        );
    }
    Ok(comparison)
}

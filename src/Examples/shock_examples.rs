use crate::ShockSolver::critical_point::ShockRegime;
use crate::ShockSolver::jump_conditions::solve_jump_conditions;
use crate::ShockSolver::profile_io::read_profile;
use crate::ShockSolver::radshock_task::{DEFAULT_ERROR_TOL, RadShockTask};
use crate::ShockSolver::shock_config::{PhysicalParameters, ShockConfig};
use crate::ShockSolver::shock_errors::ShockError;
use crate::ShockSolver::shock_ode::ShockODE;
use log::{error, info};
use prettytable::{Table, row};

/// Runnable demonstrations of the radiative shock solver, selected by number.
pub fn shock_examples(shocktask: usize) {
    let result = match shocktask {
        // reference case with a moderate embedded shock
        0 => solve_and_save(ShockConfig::mach3()),
        // strong shock: tiny perturbation, many integrator steps
        1 => solve_and_save(ShockConfig::mach30()),
        2 => config_file_round_trip(),
        3 => {
            jump_table(&[1.05, 1.2, 1.5, 2.0, 3.0, 5.0, 10.0, 30.0, 50.0]);
            Ok(())
        }
        4 => compare_with_saved(),
        _ => {
            error!("no shock example with number {}", shocktask);
            Ok(())
        }
    };
    if let Err(e) = result {
        error!("example {} failed: {}", shocktask, e);
    }
}

pub fn solve_and_save(config: ShockConfig) -> Result<(), ShockError> {
    let mut task = RadShockTask::from_config(config);
    task.solve()?;
    task.pretty_print();
    let path = task.save_profile()?;
    println!("profile written to {}", path.display());
    Ok(())
}

fn config_file_round_trip() -> Result<(), ShockError> {
    let dir = std::env::temp_dir().join("radshock_example");
    std::fs::create_dir_all(&dir)?;
    let path = dir.join("mach3.json");
    let mut config = ShockConfig::mach3();
    config.output.output_dir = dir.to_string_lossy().into_owned();
    config.save(&path)?;
    info!("configuration written to {}", path.display());
    let mut task = RadShockTask::from_file(&path)?;
    task.solve()?;
    task.pretty_print();
    task.save_profile()?;
    Ok(())
}

/// Far-field states and regime for a list of upstream Mach numbers.
pub fn jump_table(machs: &[f64]) {
    let mut table = Table::new();
    table.add_row(row!["M0", "rho1", "T1", "v1", "P1/P0", "Erad1/Erad0", "regime"]);
    for &m0 in machs {
        let params = PhysicalParameters {
            M0: m0,
            ..PhysicalParameters::default()
        };
        match solve_jump_conditions(&params) {
            Ok(states) => {
                let regime = ShockRegime::from_jump(&ShockODE::new(&params), &states);
                table.add_row(row![
                    m0,
                    format!("{:.8}", states.rho1()),
                    format!("{:.8}", states.T1()),
                    format!("{:.8}", states.v1()),
                    format!("{:.6}", states.pressure_ratio()),
                    format!("{:.6e}", states.radiation_energy_ratio()),
                    regime
                ]);
            }
            Err(e) => {
                table.add_row(row![m0, "-", "-", "-", "-", "-", e.to_string()]);
            }
        }
    }
    println!("\nJump conditions, gamma = 5/3, P0 = 1e-4:");
    table.printstd();
}

/// Grid convergence: a run on half the Mach grid against the saved default run.
fn compare_with_saved() -> Result<(), ShockError> {
    let mut task = RadShockTask::preset(3.0);
    task.config.output.output_dir = std::env::temp_dir()
        .join("radshock_example")
        .to_string_lossy()
        .into_owned();
    task.solve()?;
    let path = task.save_profile()?;
    let reference = read_profile(&path)?;

    let mut coarse = RadShockTask::preset(3.0);
    coarse.config.integration.n_points /= 2;
    coarse.solve()?;
    let cmp = coarse.compare_with_reference(&reference, DEFAULT_ERROR_TOL)?;
    println!(
        "relative L1 error of the {}-point run against {}: T {:.3e}, rho {:.3e}, passed: {}",
        coarse.config.integration.n_points,
        path.display(),
        cmp.T_error,
        cmp.rho_error,
        cmp.passed()
    );
    Ok(())
}

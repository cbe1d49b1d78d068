//! Console tables of a radiative shock task.
use super::radshock_task::RadShockTask;
use prettytable::{Table, row};

impl RadShockTask {
    /// Prints every table that has data: parameters always, the rest after `solve()`.
    pub fn pretty_print(&self) {
        println!("\n=== RADIATIVE SHOCK TASK ===");
        self.pretty_print_parameters();
        self.pretty_print_states();
        self.pretty_print_starts();
        self.pretty_print_matching();
        println!("\n=== END RADIATIVE SHOCK TASK ===\n");
    }

    pub fn pretty_print_parameters(&self) {
        let p = &self.config.physics;
        let i = &self.config.integration;
        let mut table = Table::new();
        table.add_row(row!["Parameter", "Value"]);
        table.add_row(row!["adiabatic index (gamma)", format!("{:.6}", p.gamma)]);
        table.add_row(row!["radiation/gas pressure (P0)", format!("{:e}", p.P0)]);
        table.add_row(row!["upstream Mach number (M0)", format!("{}", p.M0)]);
        table.add_row(row!["absorption coefficient (sigma_a)", format!("{:e}", p.sigma_a)]);
        table.add_row(row!["speed of light (c)", format!("{}", p.c)]);
        table.add_row(row!["diffusivity (kappa)", format!("{:.6e}", self.ode.kappa)]);
        table.add_row(row!["perturbation (eps)", format!("{:e}", i.eps)]);
        table.add_row(row![
            "rtol / atol",
            format!("{:e} / {:e}", i.rtol, i.atol)
        ]);
        table.add_row(row!["grid points per region", i.n_points]);
        table.add_row(row!["distance of grid ends from M = 1", format!("{:e}", i.sonic_offset)]);
        println!("\nParameters:");
        table.printstd();
    }

    pub fn pretty_print_states(&self) {
        let Some(states) = &self.states else {
            return;
        };
        let mut table = Table::new();
        table.add_row(row!["State", "rho", "T", "Trad", "v", "M"]);
        for (name, s) in [("upstream", &states.upstream), ("downstream", &states.downstream)] {
            table.add_row(row![
                name,
                format!("{:.10}", s.rho),
                format!("{:.10}", s.T),
                format!("{:.10}", s.Trad),
                format!("{:.10}", s.v),
                format!("{:.10}", s.mach())
            ]);
        }
        println!("\nAsymptotic states ({} Newton iterations):", states.iterations);
        table.printstd();
        println!("  gas pressure ratio P1/P0: {:.8}", states.pressure_ratio());
        println!(
            "  radiation energy ratio Erad1/Erad0: {:.8}",
            states.radiation_energy_ratio()
        );
    }

    pub fn pretty_print_starts(&self) {
        let Some(starts) = &self.starts else {
            return;
        };
        let mut table = Table::new();
        table.add_row(row!["Region", "branch", "eps", "dT/dTrad", "T", "Trad", "rho", "M"]);
        for s in [&starts.precursor, &starts.relaxation] {
            table.add_row(row![
                s.region,
                s.branch,
                format!("{:e}", s.eps),
                format!("{:.10}", s.slope),
                format!("{:.12}", s.T),
                format!("{:.12}", s.Trad),
                format!("{:.12}", s.rho),
                format!("{:.12}", s.mach)
            ]);
        }
        println!("\nPerturbed starting points, regime: {}", starts.regime);
        table.printstd();

        let mut ranges = Table::new();
        ranges.add_row(row!["Region", "M min", "M max", "x min", "x max", "Radau steps"]);
        let mut any = false;
        for traj in [&self.precursor, &self.relaxation].into_iter().flatten() {
            any = true;
            let (m_lo, m_hi) = traj.mach_range();
            let (x_lo, x_hi) = traj.x_range();
            ranges.add_row(row![
                traj.region,
                format!("{:.8}", m_lo),
                format!("{:.8}", m_hi),
                format!("{:.6e}", x_lo),
                format!("{:.6e}", x_hi),
                traj.steps
            ]);
        }
        if any {
            println!("\nIntegrated regions:");
            ranges.printstd();
        }
    }

    pub fn pretty_print_matching(&self) {
        let Some(m) = &self.matching else {
            return;
        };
        let mut table = Table::new();
        table.add_row(row!["Stage", "dx_A", "dx_B", "objective", "evaluations"]);
        table.add_row(row![
            "global search",
            format!("{:.10e}", m.candidate.offsets.dx_A),
            format!("{:.10e}", m.candidate.offsets.dx_B),
            format!("{:.4e}", m.candidate.objective),
            m.candidate.evaluations
        ]);
        table.add_row(row![
            "Levenberg-Marquardt",
            format!("{:.10e}", m.offsets.dx_A),
            format!("{:.10e}", m.offsets.dx_B),
            format!("{:.4e}", m.objective),
            m.refinement_evaluations
        ]);
        println!("\nMatching:");
        table.printstd();
        if m.converged {
            println!(
                "  matching conditions satisfied ({}, {} evaluations in total)",
                m.termination, m.evaluations
            );
        } else {
            println!(
                "  WARNING: matching objective above {:e}, the profile may be quite wrong",
                self.config.matching.jump_tol
            );
        }
    }
}

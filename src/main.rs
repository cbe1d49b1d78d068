use RadShock::Examples::shock_examples::{shock_examples, solve_and_save};
use RadShock::ShockSolver::shock_config::ShockConfig;
use log::error;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

const USAGE: &str = "usage: RadShock [MACH | path/to/config.json | example N]";

pub fn main() {
    if let Err(e) = TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("logger initialisation failed: {}", e);
    }
    let arg = std::env::args().nth(1);
    let config = match arg.as_deref() {
        None => ShockConfig::mach3(),
        Some("-h") | Some("--help") => {
            println!("{}", USAGE);
            return;
        }
        Some("example") => {
            match std::env::args().nth(2).and_then(|n| n.parse::<usize>().ok()) {
                Some(task) => shock_examples(task),
                None => eprintln!("{}", USAGE),
            }
            return;
        }
        Some(a) => match a.parse::<f64>() {
            Ok(mach) => ShockConfig::preset(mach),
            Err(_) => match ShockConfig::load(a) {
                Ok(config) => config,
                Err(e) => {
                    error!("cannot read configuration {}: {}", a, e);
                    eprintln!("{}", USAGE);
                    std::process::exit(2);
                }
            },
        },
    };
    if let Err(e) = solve_and_save(config) {
        error!("{}", e);
        std::process::exit(1);
    }
}

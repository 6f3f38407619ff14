use penney::checkpoint::Checkpoints;
use penney::env_config::{init_logging, init_rayon_threads};
use penney::report::{format_report, to_json};
use penney::simulation::run_experiment;
use penney::{checkpoint, ConfigError, ExperimentConfig, RngKind, RunMode};

const USAGE: &str = "Usage: penney-simulate [--trials N] [--length L] [--seed S] [--rng small|splitmix] [--serial] [--compare] [--json]";

struct Args {
    config: ExperimentConfig,
    json: bool,
    help: bool,
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T, ConfigError> {
    let value = value.ok_or_else(|| ConfigError::MissingValue(flag.to_string()))?;
    value.parse().map_err(|_| ConfigError::InvalidValue {
        flag: flag.to_string(),
        value: value.clone(),
    })
}

fn parse_args(args: &[String]) -> Result<Args, ConfigError> {
    let mut config = ExperimentConfig::default();
    let mut json = false;
    let mut help = false;

    let mut it = args.iter().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--trials" => config.trials = parse_value(arg, it.next())?,
            "--length" => config.sequence_len = parse_value(arg, it.next())?,
            "--seed" => config.seed = parse_value(arg, it.next())?,
            "--rng" => {
                let name = it
                    .next()
                    .ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                config.rng = name.parse::<RngKind>()?;
            }
            "--serial" => config.mode = RunMode::Serial,
            "--compare" => config.mode = RunMode::Compare,
            "--json" => json = true,
            "--help" | "-h" => help = true,
            other => return Err(ConfigError::UnknownArgument(other.to_string())),
        }
    }

    Ok(Args { config, json, help })
}

fn print_help() {
    println!("{}", USAGE);
    println!();
    println!("Options:");
    println!("  --trials N         Number of trials (default: 1000000)");
    println!("  --length L         Symbols per generated sequence (default: 100)");
    println!("  --seed S           Base RNG seed (default: 42)");
    println!("  --rng NAME         Random source: small (default) or splitmix");
    println!("  --serial           Run all trials on one thread");
    println!("  --compare          Run serially, then in parallel, and log both timings");
    println!("  --json             Print statistics as JSON instead of tables");
}

fn main() {
    init_logging();

    let argv: Vec<String> = std::env::args().collect();
    let args = match parse_args(&argv) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
    };
    if args.help {
        print_help();
        std::process::exit(0);
    }

    let mut cp = Checkpoints::new();
    checkpoint!(cp, "start");

    if args.config.mode != RunMode::Serial {
        init_rayon_threads();
    }

    let stats = match run_experiment(&args.config, &mut cp) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if args.json {
        match to_json(&stats) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error: failed to serialize statistics: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print!("{}", format_report(&stats));
    }
    checkpoint!(cp, "report");

    cp.print_summary();
    std::process::exit(0);
}

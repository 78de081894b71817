use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

pub mod bench;
pub mod config;
pub mod error;
pub mod model;
pub mod utils;

use bench::report::{PhaseReport, MAX_PRECISION};
use config::{Config, LoadOutcome, OutputFormat};
use error::BenchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Only {
    Molecule,
    Structure,
    All,
}

/// Benchmark materials informatics data structures.
#[derive(Debug, Parser)]
#[command(name = "matbench", version)]
struct Cli {
    /// Number of iterations for the benchmark (default: 1000)
    #[arg(short = 'n', long)]
    iterations: Option<usize>,
    /// Scaling factor for molecule and materials (default: 50)
    #[arg(long)]
    scale: Option<usize>,
    /// Which benchmark group to run
    #[arg(long, value_enum, default_value = "all")]
    only: Only,
    /// Output format for results (default: text)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
    /// Settings file to read instead of the per-user one
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write the effective settings back to the settings file
    #[arg(long)]
    save_config: bool,
    /// More diagnostics on stderr (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Errors only
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// Command-line flags take precedence over the settings file.
    fn apply(&self, mut cfg: Config) -> Config {
        if let Some(n) = self.iterations {
            cfg.iterations = n;
        }
        if let Some(scale) = self.scale {
            cfg.scale = scale;
        }
        if let Some(format) = self.format {
            cfg.format = format;
        }
        cfg
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _ = utils::logger::init(utils::logger::level_for(cli.verbose, cli.quiet));

    let (file_cfg, outcome) = Config::load(cli.config.as_deref());
    match outcome {
        LoadOutcome::Loaded(path) => log::info!("Config loaded from {:?}", path),
        LoadOutcome::Missing(path) => log::debug!("No config at {:?}. Using defaults.", path),
        LoadOutcome::Invalid(msg) => log::warn!("{}", msg),
    }
    let cfg = cli.apply(file_cfg);

    if cli.save_config {
        match cfg.save(cli.config.as_deref()) {
            Ok(path) => log::info!("Config saved to {:?}", path),
            Err(e) => log::warn!("Failed to save config: {}", e),
        }
    }

    let stdout = io::stdout();
    match run(&cfg, cli.only, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cfg: &Config, only: Only, out: &mut impl Write) -> Result<(), BenchError> {
    bench::validate(cfg.iterations, cfg.scale)?;
    if cfg.precision > MAX_PRECISION {
        return Err(BenchError::InvalidArgument(format!(
            "precision must be at most {}, got {}",
            MAX_PRECISION, cfg.precision
        )));
    }

    if cfg.format == OutputFormat::Text {
        writeln!(out, "Starting Benchmarks...\n")?;
    }

    if matches!(only, Only::Molecule | Only::All) {
        let reports = bench::benchmark_molecule_creation(cfg.iterations, cfg.scale)?;
        emit(&reports, cfg, out)?;
    }
    if matches!(only, Only::Structure | Only::All) {
        let reports = bench::benchmark_crystal_structure_creation(cfg.iterations, cfg.scale)?;
        emit(&reports, cfg, out)?;
    }
    Ok(())
}

fn emit(reports: &[PhaseReport], cfg: &Config, out: &mut impl Write) -> Result<(), BenchError> {
    match cfg.format {
        OutputFormat::Text => {
            for r in reports {
                writeln!(out, "{}", r.render(cfg.precision))?;
            }
            writeln!(out)?;
        }
        OutputFormat::Json => {
            for r in reports {
                let line = serde_json::to_string(r).map_err(error::ModelError::from)?;
                writeln!(out, "{}", line)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["matbench"]);
        let cfg = cli.apply(Config::default());

        assert_eq!(cfg.iterations, 1000);
        assert_eq!(cfg.scale, 50);
        assert_eq!(cli.only, Only::All);
        assert_eq!(cfg.format, OutputFormat::Text);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from(["matbench", "-n", "5", "--scale", "2", "--format", "json"]);
        let file_cfg = Config {
            iterations: 10,
            scale: 9,
            format: OutputFormat::Text,
            precision: 3,
        };
        let cfg = cli.apply(file_cfg);

        assert_eq!(cfg.iterations, 5);
        assert_eq!(cfg.scale, 2);
        assert_eq!(cfg.format, OutputFormat::Json);
        assert_eq!(cfg.precision, 3);
    }

    #[test]
    fn test_config_used_when_flags_absent() {
        let cli = Cli::parse_from(["matbench", "--only", "structure"]);
        let file_cfg = Config {
            iterations: 10,
            ..Config::default()
        };
        let cfg = cli.apply(file_cfg);

        assert_eq!(cfg.iterations, 10);
        assert_eq!(cli.only, Only::Structure);
    }

    #[test]
    fn test_rejects_non_integer() {
        assert!(Cli::try_parse_from(["matbench", "-n", "ten"]).is_err());
    }

    #[test]
    fn test_run_zero_iterations_fails() {
        let cfg = Config {
            iterations: 0,
            ..Config::default()
        };
        let mut out = Vec::new();

        let result = run(&cfg, Only::Molecule, &mut out);

        assert!(matches!(result, Err(BenchError::InvalidArgument(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn test_run_rejects_large_precision() {
        let cfg = Config {
            iterations: 1,
            scale: 1,
            precision: 100_000,
            ..Config::default()
        };
        let mut out = Vec::new();

        let result = run(&cfg, Only::All, &mut out);

        assert!(matches!(result, Err(BenchError::InvalidArgument(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn test_text_output_lines() {
        let cfg = Config {
            iterations: 1,
            scale: 1,
            ..Config::default()
        };
        let mut out = Vec::new();

        run(&cfg, Only::Molecule, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let results: Vec<&str> = text.lines().filter(|l| l.contains("seconds/iteration")).collect();
        assert!(text.starts_with("Starting Benchmarks...\n\n"));
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|l| l.contains("3 atoms 1 iterations")));
        assert!(results[0].starts_with("Matbench Molecule Creation"));
    }

    #[test]
    fn test_json_output_lines() {
        let cfg = Config {
            iterations: 2,
            scale: 2,
            format: OutputFormat::Json,
            ..Config::default()
        };
        let mut out = Vec::new();

        run(&cfg, Only::All, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        for line in &lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(value["iterations"], 2);
        }
        assert!(lines[0].contains("\"Molecule\""));
        assert!(lines[3].contains("\"Structure\""));
    }

    #[test]
    fn test_verbosity_count() {
        let cli = Cli::parse_from(["matbench", "-vv"]);
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
    }
}

//! Transformer Test Harness CLI
//!
//! Assembles fixtures from the query library and runs the external test
//! runner against them.
//!
//! Usage:
//!   transformer_test --config harness.yaml run
//!   transformer_test --config harness.yaml run transformer_blocks_test
//!   transformer_test --config harness.yaml resolve transformer_blocks_test --write
//!   transformer_test --config harness.yaml list
//!   transformer_test --config harness.yaml check

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use transformer_harness::harness::fixture::FixtureWriter;
use transformer_harness::harness::logging::init_logger;
use transformer_harness::harness::report::{write_report, OutputFormat};
use transformer_harness::harness::{
    Catalog, HarnessConfig, HarnessError, HarnessResult, QueryResolver, TestHarness,
};

#[derive(Parser)]
#[command(name = "transformer_test")]
#[command(about = "Fixture-assembly harness for SQL transformation tests")]
#[command(version)]
struct Cli {
    /// Harness configuration file (YAML)
    #[arg(short, long, global = true, env = "TRANSFORMER_HARNESS_CONFIG")]
    config: Option<PathBuf>,

    /// Override the base directory for catalogs and fixtures
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Override the fixture directory
    #[arg(long, global = true)]
    fixture_dir: Option<PathBuf>,

    /// Override the external runner program
    #[arg(long, global = true)]
    runner: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run test cases (all of them when none are named)
    Run {
        /// Test case names
        names: Vec<String>,

        /// Output format: text, json, junit
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,

        /// Suite name used in the report
        #[arg(long, default_value = "transformer")]
        suite: String,
    },

    /// Print the composed script for a test case
    Resolve {
        /// Test case name
        name: String,

        /// Also write the fixture files (without running the runner)
        #[arg(short, long)]
        write: bool,
    },

    /// List test cases and their query references
    List,

    /// Check the catalogs for duplicate names and unknown query references
    Check,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> HarnessResult<HarnessConfig> {
    let mut config = match cli.config {
        Some(ref path) => HarnessConfig::from_file(path)?,
        None => HarnessConfig::default(),
    };
    if let Some(ref root) = cli.root {
        config = config.with_root_dir(root);
    }
    if let Some(ref dir) = cli.fixture_dir {
        config = config.with_fixture_dir(dir);
    }
    if let Some(ref program) = cli.runner {
        config = config.with_runner_program(program);
    }
    Ok(config)
}

fn run(cli: Cli) -> HarnessResult<ExitCode> {
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Run {
            names,
            output,
            suite,
        } => {
            let harness = TestHarness::from_config(&config)?;

            let report = if names.is_empty() {
                harness.run_all(&suite)
            } else {
                harness.run_suite(&suite, &names)
            };

            let mut stdout = std::io::stdout().lock();
            write_report(&report, output, &mut stdout)
                .map_err(|e| HarnessError::io("<stdout>", e))?;

            Ok(if report.all_passed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        Commands::Resolve { name, write } => {
            let catalog = Catalog::load(&config)?;
            let resolved = QueryResolver::new(&catalog).resolve(&name)?;

            for missing in &resolved.missing_queries {
                eprintln!("warning: unknown query '{}' contributed nothing", missing);
            }
            println!("{}", resolved.script);

            if write {
                let paths = FixtureWriter::from_config(&config).write(&resolved)?;
                eprintln!("wrote {}", paths.statements.display());
                eprintln!("wrote {}", paths.input.display());
                eprintln!("wrote {}", paths.output.display());
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::List => {
            let catalog = Catalog::load(&config)?;
            for case in catalog.test_cases.iter() {
                println!("{}: {}", case.name, case.sql_queries.join(", "));
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Check => {
            let catalog = Catalog::load(&config)?;
            match catalog.validate() {
                Ok(()) => {
                    println!(
                        "catalog ok: {} queries, {} test cases",
                        catalog.queries.len(),
                        catalog.test_cases.len()
                    );
                    Ok(ExitCode::SUCCESS)
                }
                Err(HarnessError::InvalidCatalog { problems }) => {
                    for problem in &problems {
                        println!("{}", problem);
                    }
                    Ok(ExitCode::FAILURE)
                }
                Err(e) => Err(e),
            }
        }
    }
}


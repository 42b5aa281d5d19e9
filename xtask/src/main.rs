use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the GAMETES sweep workspace",
    long_about = "A unified CLI for running CI checks and a local demo sweep\n\
                  in the GAMETES sweep workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a small sweep locally without a scheduler
    SweepDemo {
        /// Directory the sweep tree is written under
        #[arg(long, default_value = "target/sweep-demo")]
        output: String,
        /// Submission command handed each script ("bash" runs the jobs)
        #[arg(long, default_value = "true")]
        qsub_cmd: String,
    },
    /// Run CI checks (fmt, clippy, tests)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting and clippy
    Lint,
    /// Unit and integration tests
    Test,
    /// Run lint + test
    Check,
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo")
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_lint() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);
}

fn ci_test() {
    step("Test gametes_sweep_core");
    run_cargo(&["test", "-p", "gametes_sweep_core"]);

    step("Test gametes_sweep_cluster");
    run_cargo(&["test", "-p", "gametes_sweep_cluster"]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::SweepDemo { output, qsub_cmd } => {
            step("Run demo sweep");
            run_cargo(&[
                "run",
                "-p",
                "gametes_sweep_cluster",
                "--bin",
                "gametes_sweep",
                "--",
                "--outputRoot",
                &output,
                "--qsubCmd",
                &qsub_cmd,
                "--numModelsPerDataset",
                "1,2",
                "--heritability",
                "0.1,0.2",
                "--maf",
                "0.2",
                "--totalCount",
                "2000",
                "--totalAttributeCount",
                "100",
                "--randomSeed",
                "42",
            ]);
            eprintln!("\nDemo sweep written under {output}. Re-run to see every job skipped.");
        }
        Commands::Ci { job } => {
            match job {
                CiJob::Lint => ci_lint(),
                CiJob::Test => ci_test(),
                CiJob::Check => {
                    ci_lint();
                    ci_test();
                }
            }
            eprintln!("\nCI job passed.");
        }
    }
}

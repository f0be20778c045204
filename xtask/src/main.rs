use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Instant;

/// Snapshot files are 2MB of RAM followed by 1MB of VRAM
const SNAPSHOT_SIZE: u64 = 0x30_0000;

#[derive(Parser)]
#[command(name = "x")]
#[command(about = "Development automation for adscene")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all CI checks (fmt, clippy, test, bench build)
    Ci,
    /// Quick checks (fmt, clippy)
    Check,
    /// Format code
    Fmt {
        /// Only check formatting
        #[arg(long)]
        check: bool,
    },
    /// Run clippy with warnings denied
    Clippy,
    /// Run tests, optionally for one module
    Test {
        #[arg(long, value_enum)]
        module: Option<Module>,
    },
    /// Run decode benchmarks
    Bench,
    /// Decode a snapshot file with the adscene binary
    Decode {
        /// Path to snapshot file
        snapshot: String,
        /// Layout override file (TOML)
        #[arg(short = 'l', long)]
        layout: Option<String>,
        /// Write a scene summary to this path
        #[arg(short = 'e', long)]
        export: Option<String>,
        /// Also build the render mesh
        #[arg(long)]
        mesh: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Module {
    Memory,
    Scene,
    Gpu,
}

impl Module {
    fn filter(self) -> &'static str {
        match self {
            Module::Memory => "core::memory",
            Module::Scene => "core::scene",
            Module::Gpu => "core::gpu",
        }
    }
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Commands::Ci => run_ci(),
        Commands::Check => run_check(),
        Commands::Fmt { check: true } => cargo(&["fmt", "--all", "--", "--check"]),
        Commands::Fmt { check: false } => cargo(&["fmt", "--all"]),
        Commands::Clippy => run_clippy(),
        Commands::Test { module } => run_test(module),
        Commands::Bench => cargo(&["bench", "--bench", "decode_bench"]),
        Commands::Decode {
            snapshot,
            layout,
            export,
            mesh,
        } => run_decode(&snapshot, layout.as_deref(), export.as_deref(), mesh),
    }
}

fn run_ci() -> Result<()> {
    println!("{}", "=== adscene CI ===".bold().blue());
    let start = Instant::now();

    run_check()?;
    step("Tests", || run_test(None))?;
    step("Bench build", || cargo(&["bench", "--no-run"]))?;

    println!(
        "\n{} {}",
        "✓ CI passed in".green().bold(),
        format!("{:.2}s", start.elapsed().as_secs_f64()).bold()
    );
    Ok(())
}

fn run_check() -> Result<()> {
    step("Format", || cargo(&["fmt", "--all", "--", "--check"]))?;
    step("Clippy", run_clippy)
}

fn run_clippy() -> Result<()> {
    cargo(&["clippy", "--all-targets", "--", "-D", "warnings"])
}

fn run_test(module: Option<Module>) -> Result<()> {
    match module {
        Some(module) => cargo(&["test", "--lib", module.filter()]),
        None => cargo(&["test", "--workspace"]),
    }
}

/// Check the snapshot size locally, then hand the file to the binary
fn run_decode(
    snapshot: &str,
    layout: Option<&str>,
    export: Option<&str>,
    mesh: bool,
) -> Result<()> {
    let path = Path::new(snapshot);
    if !path.exists() {
        anyhow::bail!("Snapshot file not found: {}", snapshot);
    }

    let size = std::fs::metadata(path)?.len();
    if size != SNAPSHOT_SIZE {
        println!(
            "{} {} is {} bytes, expected {}",
            "✗".red().bold(),
            snapshot.yellow(),
            size,
            SNAPSHOT_SIZE
        );
        anyhow::bail!("Invalid snapshot file size");
    }

    let mut args = vec!["run", "--release", "--bin", "adscene", "--", snapshot];
    if let Some(layout) = layout {
        args.extend(["--layout", layout]);
    }
    if let Some(export) = export {
        args.extend(["--export", export]);
    }
    if mesh {
        args.push("--mesh");
    }
    cargo(&args)
}

fn step<F>(name: &str, task: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    println!("{} {}", "→".blue(), name.bold());
    let start = Instant::now();

    task().inspect_err(|_| println!("{} {} failed", "✗".red().bold(), name))?;

    println!(
        "{} {} ({:.2}s)",
        "✓".green().bold(),
        name,
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn cargo(args: &[&str]) -> Result<()> {
    let status = Command::new("cargo")
        .args(args)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    if !status.success() {
        anyhow::bail!("cargo {} failed with exit code: {}", args.join(" "), status);
    }
    Ok(())
}

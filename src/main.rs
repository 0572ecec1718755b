//! Release manifest CLI
//!
//! Entry point for the `release-manifest` command-line tool.

use clap::{Parser, Subcommand};
use release_manifest::checksum::format_size;
use release_manifest::config::ConfigOrigin;
use release_manifest::manifest;
use release_manifest::pipeline::{default_config_path, ReleasePaths};
use release_manifest::signal::{SignalHandler, EXIT_CODE_INTERRUPTED};
use release_manifest::{EffectiveConfig, GenerateError, GenerateReport, ManifestBuilder};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const EXIT_CODE_FAILURE: i32 = 1;

#[derive(Parser)]
#[command(name = "release-manifest")]
#[command(about = "Generate the auto-update manifest for a compiled release", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct Location {
    /// Directory holding the executable, version file and manifest (default: current directory)
    #[arg(long, short = 'd')]
    dir: Option<PathBuf>,

    /// Path to config file (default: <dir>/manifest_config.json)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,
}

impl Location {
    fn base_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    fn load_config(&self) -> EffectiveConfig {
        let path = self
            .config
            .clone()
            .unwrap_or_else(|| default_config_path(&self.base_dir()));
        EffectiveConfig::load(&path)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Hash the executable and write a validated update manifest
    Generate {
        #[command(flatten)]
        location: Location,
    },

    /// Validate an existing manifest without regenerating it
    Validate {
        #[command(flatten)]
        location: Location,

        /// Manifest to check (default: the configured manifest name in <dir>)
        #[arg(long, short = 'm')]
        manifest: Option<PathBuf>,
    },

    /// Print the effective configuration and where it came from
    Config {
        #[command(flatten)]
        location: Location,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Generate { location } => run_generate(&location),
        Commands::Validate { location, manifest } => run_validate(&location, manifest),
        Commands::Config { location } => run_config(&location),
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        })
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run_generate(location: &Location) {
    let signals = SignalHandler::new();
    if let Err(e) = signals.install() {
        tracing::warn!("Could not install interrupt handler: {}", e);
    }

    let base_dir = location.base_dir();
    let mut builder =
        ManifestBuilder::new(&base_dir, location.load_config()).with_signal_state(signals.state());

    match builder.run() {
        Ok(report) => print_report(&report),
        Err(GenerateError::Interrupted) => {
            eprintln!("Operation cancelled by user.");
            process::exit(EXIT_CODE_INTERRUPTED);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(EXIT_CODE_FAILURE);
        }
    }
}

fn print_report(report: &GenerateReport) {
    let m = &report.manifest;

    println!("Update manifest generated successfully!");
    println!();
    println!("  File:         {}", report.manifest_path.display());
    println!("  Version:      {}", m.version);
    println!("  Download URL: {}", m.download_url);
    println!("  Checksum:     {}", m.checksum);
    println!("  Size:         {}", format_size(report.executable_size));
    println!("  Release Date: {}", m.release_date);
    println!("  Critical:     {}", if m.critical { "Yes" } else { "No" });
    if let Some(rule) = report.classification.matched_rule {
        println!("  Critical by:  {}", rule);
    }
    if report.config_source.origin == ConfigOrigin::Builtin {
        println!("  Config:       built-in defaults");
    } else {
        println!("  Config:       {}", report.config_source.path);
    }
    println!();
    println!("Next steps:");
    println!("  1. Upload the executable to your file server or GitHub releases");
    println!("  2. Upload {} to your manifest URL location", file_name(&report.manifest_path));
    println!("  3. Test the auto-update functionality");
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn run_validate(location: &Location, manifest_path: Option<PathBuf>) {
    let path = manifest_path.unwrap_or_else(|| {
        let config = location.load_config();
        ReleasePaths::resolve(&location.base_dir(), &config.config.file_settings).manifest
    });

    match manifest::validate_file(&path) {
        Ok(()) => println!("Manifest validation passed: {}", path.display()),
        Err(e) => {
            eprintln!("Manifest validation failed: {}", e);
            process::exit(EXIT_CODE_FAILURE);
        }
    }
}

fn run_config(location: &Location) {
    let config = location.load_config();

    match config.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing config: {}", e);
            process::exit(EXIT_CODE_FAILURE);
        }
    }
}

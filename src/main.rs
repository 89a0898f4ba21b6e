mod commands;
mod core;
mod release;
mod ui;

use clap::Parser;
use crate::commands::GenerateOptions;
use crate::core::error::{ReleaseError, print_error};
use crate::core::params::ParameterInput;
use std::path::PathBuf;

/// Generate Konflux production Release manifests from a release notes template
///
/// Resolving tags to commits, finding snapshots and applying the generated
/// manifest (`kubectl apply -f`) are left to the caller.
#[derive(Parser)]
#[command(name = "konflux-release")]
#[command(version, about, long_about = None)]
#[command(disable_version_flag = true)]
#[command(styles = get_styles())]
struct Cli {
  // ============================================================================
  // Release identity
  // ============================================================================
  /// Component name, e.g. cuda-ubi9 (required)
  #[arg(long, value_name = "NAME")]
  component: Option<String>,

  /// Semantic version substituted for {version}, e.g. 3.2.5 (required)
  #[arg(long, value_name = "VERSION")]
  version: Option<String>,

  /// Snapshot to release (required)
  #[arg(long, value_name = "NAME")]
  snapshot: Option<String>,

  /// Release plan the release is routed through (required)
  #[arg(long, value_name = "NAME")]
  release_plan: Option<String>,

  /// Name of the Release resource; must be unique in the namespace (required)
  #[arg(long, value_name = "NAME")]
  release_name: Option<String>,

  /// Accelerator/variant substituted for {accelerator}, e.g. CUDA, ROCm, CPU (required)
  #[arg(long, value_name = "TYPE")]
  accelerator: Option<String>,

  /// Kubernetes namespace of the Release resource (required)
  #[arg(long, value_name = "NAME")]
  namespace: Option<String>,

  // ============================================================================
  // Release notes
  // ============================================================================
  /// Path to the release notes YAML template (required)
  #[arg(long, value_name = "FILE")]
  release_notes_template: Option<PathBuf>,

  /// Advisory type: RHEA (enhancement) or RHSA (security)
  #[arg(long, value_name = "TYPE", default_value = "RHEA")]
  release_type: String,

  /// CVE list, one identifier per line (required with RHSA, ignored with RHEA)
  #[arg(long, value_name = "PATH")]
  cves_file: Option<PathBuf>,

  /// Grace period in days before the Release is garbage collected [default: 365]
  #[arg(long, value_name = "DAYS")]
  grace_period: Option<u32>,

  // ============================================================================
  // Output
  // ============================================================================
  /// Where to write the generated manifest (required unless --dry-run)
  #[arg(long, value_name = "FILE")]
  output: Option<PathBuf>,

  /// Defaults file (default: search for konflux-release.toml in the working directory)
  #[arg(long, value_name = "PATH")]
  config: Option<PathBuf>,

  /// Print the run summary as JSON on stdout
  #[arg(long, conflicts_with = "dry_run")]
  json: bool,

  /// Render the manifest to stdout without writing anything
  #[arg(long)]
  dry_run: bool,

  /// Log every pipeline stage to stderr
  #[arg(short, long)]
  verbose: bool,
}

impl Cli {
  fn into_options(self) -> GenerateOptions {
    GenerateOptions {
      input: ParameterInput {
        component: self.component,
        version: self.version,
        snapshot: self.snapshot,
        release_plan: self.release_plan,
        release_name: self.release_name,
        accelerator: self.accelerator,
        namespace: self.namespace,
        release_notes_template: self.release_notes_template,
        release_type: Some(self.release_type),
        cves_file: self.cves_file,
        grace_period_days: self.grace_period,
        output: self.output,
        dry_run: self.dry_run,
      },
      config: self.config,
      json: self.json,
    }
  }
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();
  ui::init_tracing(cli.verbose);

  if let Err(err) = commands::run_generate(cli.into_options()) {
    handle_error(err);
  }
}

fn handle_error(err: ReleaseError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}

//! Run summary printed after a successful generation

use crate::core::params::ReleaseType;
use serde::Serialize;
use std::path::PathBuf;

/// What was generated, for humans (stderr) or automation (`--json`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
  /// `None` for a dry run
  pub output: Option<PathBuf>,
  pub release_name: String,
  pub namespace: String,
  pub release_plan: String,
  pub snapshot: String,
  pub release_type: ReleaseType,
  pub cve_count: usize,
}

impl RunSummary {
  pub fn print_human(&self) {
    match &self.output {
      Some(path) => eprintln!("✅ Generated: {}", path.display()),
      None => eprintln!("🔍 Dry-run mode (nothing written)"),
    }
    eprintln!("   Release:      {}/{}", self.namespace, self.release_name);
    eprintln!("   Release Plan: {}", self.release_plan);
    eprintln!("   Snapshot:     {}", self.snapshot);
    if self.release_type.is_security() {
      eprintln!("   Type:         {} ({} CVEs)", self.release_type, self.cve_count);
    } else {
      eprintln!("   Type:         {}", self.release_type);
    }
  }
}

//! Generation parameters and their validation
//!
//! [`ParameterInput`] holds what the command line (and the optional defaults
//! file) supplied, every field still optional. [`ParameterInput::validate`]
//! turns it into [`Parameters`], failing on the first missing or malformed
//! field. Nothing here touches the filesystem.

use crate::core::error::ValidationError;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Default grace period for a Release, in days
pub const DEFAULT_GRACE_PERIOD_DAYS: u32 = 365;

const MAX_SUBDOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;
const MAX_ACCELERATOR_LEN: usize = 64;

/// Release classification
///
/// `Rhea` is an enhancement advisory, `Rhsa` a security advisory that must
/// carry a CVE list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ReleaseType {
  #[default]
  #[serde(rename = "RHEA")]
  Rhea,
  #[serde(rename = "RHSA")]
  Rhsa,
}

impl ReleaseType {
  /// Advisory code written into the release notes
  pub fn as_str(self) -> &'static str {
    match self {
      ReleaseType::Rhea => "RHEA",
      ReleaseType::Rhsa => "RHSA",
    }
  }

  pub fn is_security(self) -> bool {
    matches!(self, ReleaseType::Rhsa)
  }
}

impl fmt::Display for ReleaseType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for ReleaseType {
  type Err = ValidationError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_uppercase().as_str() {
      "RHEA" => Ok(ReleaseType::Rhea),
      "RHSA" => Ok(ReleaseType::Rhsa),
      _ => Err(ValidationError::InvalidParameter {
        flag: "--release-type",
        value: s.to_string(),
        reason: "must be RHEA or RHSA".to_string(),
      }),
    }
  }
}

/// Raw generation inputs, before validation
#[derive(Debug, Clone, Default)]
pub struct ParameterInput {
  pub component: Option<String>,
  pub version: Option<String>,
  pub snapshot: Option<String>,
  pub release_plan: Option<String>,
  pub release_name: Option<String>,
  pub accelerator: Option<String>,
  pub namespace: Option<String>,
  pub release_notes_template: Option<PathBuf>,
  pub release_type: Option<String>,
  pub cves_file: Option<PathBuf>,
  pub grace_period_days: Option<u32>,
  pub output: Option<PathBuf>,
  /// Nothing is written, so `--output` may be omitted
  pub dry_run: bool,
}

/// Validated, immutable generation parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameters {
  pub component: String,
  pub version: String,
  pub snapshot: String,
  pub release_plan: String,
  pub release_name: String,
  pub accelerator: String,
  pub namespace: String,
  pub release_notes_template: PathBuf,
  pub release_type: ReleaseType,
  /// Only kept for security releases
  pub cves_file: Option<PathBuf>,
  pub grace_period_days: u32,
  /// Always set unless this is a dry run
  pub output: Option<PathBuf>,
}

impl ParameterInput {
  /// Resolve the release type and check that a security release has a CVE file
  ///
  /// Runs before any file is opened, including the defaults file: neither
  /// field can come from there. A CVE file on an enhancement release is
  /// accepted and ignored.
  pub fn check_classification(&self) -> Result<ReleaseType, ValidationError> {
    let release_type = match &self.release_type {
      Some(raw) => raw.parse()?,
      None => ReleaseType::default(),
    };

    if release_type.is_security() && self.cves_file.is_none() {
      return Err(ValidationError::CvesFileRequired);
    }
    Ok(release_type)
  }

  /// Validate every field: the classification first, then flag order
  pub fn validate(self) -> Result<Parameters, ValidationError> {
    let release_type = self.check_classification()?;

    let component = required("--component", self.component)?;
    check_dns_label("--component", &component)?;

    let version = required("--version", self.version)?;
    if let Err(e) = semver::Version::parse(&version) {
      return Err(ValidationError::InvalidParameter {
        flag: "--version",
        value: version,
        reason: format!("not a semantic version ({})", e),
      });
    }

    let snapshot = required("--snapshot", self.snapshot)?;
    check_dns_subdomain("--snapshot", &snapshot)?;

    let release_plan = required("--release-plan", self.release_plan)?;
    check_dns_subdomain("--release-plan", &release_plan)?;

    let release_name = required("--release-name", self.release_name)?;
    check_dns_subdomain("--release-name", &release_name)?;

    let accelerator = required("--accelerator", self.accelerator)?;
    if accelerator.len() > MAX_ACCELERATOR_LEN || accelerator.chars().any(char::is_control) {
      return Err(ValidationError::InvalidParameter {
        flag: "--accelerator",
        value: accelerator,
        reason: format!(
          "must be a single-line tag of at most {} characters",
          MAX_ACCELERATOR_LEN
        ),
      });
    }

    let namespace = required("--namespace", self.namespace)?;
    check_dns_label("--namespace", &namespace)?;

    let release_notes_template = required_path("--release-notes-template", self.release_notes_template)?;

    let grace_period_days = self.grace_period_days.unwrap_or(DEFAULT_GRACE_PERIOD_DAYS);
    if grace_period_days == 0 {
      return Err(ValidationError::InvalidParameter {
        flag: "--grace-period",
        value: grace_period_days.to_string(),
        reason: "must be at least 1 day".to_string(),
      });
    }

    let output = match self.output {
      Some(path) => Some(required_path("--output", Some(path))?),
      None if self.dry_run => None,
      None => return Err(ValidationError::MissingParameter { flag: "--output" }),
    };

    Ok(Parameters {
      component,
      version,
      snapshot,
      release_plan,
      release_name,
      accelerator,
      namespace,
      release_notes_template,
      release_type,
      cves_file: self.cves_file.filter(|_| release_type.is_security()),
      grace_period_days,
      output,
    })
  }
}

fn required(flag: &'static str, value: Option<String>) -> Result<String, ValidationError> {
  match value.map(|v| v.trim().to_string()) {
    Some(v) if !v.is_empty() => Ok(v),
    _ => Err(ValidationError::MissingParameter { flag }),
  }
}

fn required_path(flag: &'static str, value: Option<PathBuf>) -> Result<PathBuf, ValidationError> {
  match value {
    Some(p) if !p.as_os_str().is_empty() => Ok(p),
    _ => Err(ValidationError::MissingParameter { flag }),
  }
}

/// DNS-1123 subdomain: the shape Kubernetes requires for object names
fn check_dns_subdomain(flag: &'static str, value: &str) -> Result<(), ValidationError> {
  let valid = value.len() <= MAX_SUBDOMAIN_LEN && value.split('.').all(is_dns_label);
  if valid {
    Ok(())
  } else {
    Err(ValidationError::InvalidParameter {
      flag,
      value: value.to_string(),
      reason: format!(
        "must be a lowercase DNS-1123 name (a-z, 0-9, '-', '.'; at most {} characters)",
        MAX_SUBDOMAIN_LEN
      ),
    })
  }
}

fn check_dns_label(flag: &'static str, value: &str) -> Result<(), ValidationError> {
  if is_dns_label(value) {
    Ok(())
  } else {
    Err(ValidationError::InvalidParameter {
      flag,
      value: value.to_string(),
      reason: format!(
        "must be a lowercase DNS-1123 label (a-z, 0-9, '-'; at most {} characters)",
        MAX_LABEL_LEN
      ),
    })
  }
}

fn is_dns_label(s: &str) -> bool {
  let bytes = s.as_bytes();
  if bytes.is_empty() || bytes.len() > MAX_LABEL_LEN {
    return false;
  }
  let edge_ok = |b: u8| b.is_ascii_lowercase() || b.is_ascii_digit();
  edge_ok(bytes[0])
    && edge_ok(bytes[bytes.len() - 1])
    && bytes.iter().all(|&b| edge_ok(b) || b == b'-')
}

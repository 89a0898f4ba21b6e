//! Optional defaults file
//!
//! Teams that cut many releases of the same product keep the shared values
//! (namespace, release plan, template) in `konflux-release.toml` instead of
//! repeating them on every invocation. Flags always win over the file.
//!
//! ```toml
//! namespace = "my-namespace"
//! release_plan = "my-product-ubi9-prod"
//! release_notes_template = "templates/ga-rhea.yaml"
//! grace_period_days = 30
//! ```

use crate::core::error::{InputKind, NotFoundError, ParseError, ReleaseError, ReleaseResult};
use crate::core::params::ParameterInput;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Defaults for the parameters that are usually shared across releases
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReleaseDefaults {
  #[serde(default)]
  pub namespace: Option<String>,
  #[serde(default)]
  pub release_plan: Option<String>,
  #[serde(default)]
  pub accelerator: Option<String>,
  /// Relative paths resolve against the directory holding the config file
  #[serde(default)]
  pub release_notes_template: Option<PathBuf>,
  #[serde(default)]
  pub grace_period_days: Option<u32>,
}

impl ReleaseDefaults {
  /// Find config file in search order: konflux-release.toml, .konflux-release.toml, .config/konflux-release.toml
  pub fn find_config_path(dir: &Path) -> Option<PathBuf> {
    let candidates = [
      dir.join("konflux-release.toml"),
      dir.join(".konflux-release.toml"),
      dir.join(".config").join("konflux-release.toml"),
    ];

    candidates.into_iter().find(|p| p.is_file())
  }

  /// Load defaults from an explicit path, or search `dir` when none is given
  ///
  /// A missing file is only an error when the path was given explicitly.
  pub fn discover(explicit: Option<&Path>, dir: &Path) -> ReleaseResult<Option<(PathBuf, Self)>> {
    let path = match explicit {
      Some(path) => path.to_path_buf(),
      None => match Self::find_config_path(dir) {
        Some(path) => path,
        None => return Ok(None),
      },
    };

    let defaults = Self::load(&path)?;
    Ok(Some((path, defaults)))
  }

  /// Load defaults from a TOML file
  pub fn load(path: &Path) -> ReleaseResult<Self> {
    let content = fs::read_to_string(path).map_err(|e| -> ReleaseError {
      if e.kind() == io::ErrorKind::InvalidData {
        ParseError::Config {
          path: path.to_path_buf(),
          message: e.to_string(),
        }
        .into()
      } else {
        NotFoundError {
          kind: InputKind::Config,
          path: path.to_path_buf(),
          reason: e.to_string(),
        }
        .into()
      }
    })?;

    let mut defaults: ReleaseDefaults = toml_edit::de::from_str(&content).map_err(|e| ParseError::Config {
      path: path.to_path_buf(),
      message: e.to_string().trim().to_string(),
    })?;

    if let Some(template) = &defaults.release_notes_template
      && template.is_relative()
      && let Some(base) = path.parent()
    {
      defaults.release_notes_template = Some(base.join(template));
    }

    Ok(defaults)
  }

  /// Fill every parameter the command line left unset
  pub fn apply_to(&self, input: &mut ParameterInput) {
    fill(&mut input.namespace, &self.namespace);
    fill(&mut input.release_plan, &self.release_plan);
    fill(&mut input.accelerator, &self.accelerator);
    fill(&mut input.release_notes_template, &self.release_notes_template);
    fill(&mut input.grace_period_days, &self.grace_period_days);
  }
}

fn fill<T: Clone>(slot: &mut Option<T>, default: &Option<T>) {
  if slot.is_none() {
    *slot = default.clone();
  }
}

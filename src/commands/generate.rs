//! Generate command implementation
//!
//! Runs the pipeline once, front to back:
//! classification check → defaults file → validation → template → CVEs →
//! substitution → assembly → emit. The first failing stage aborts the run
//! and nothing is written.

use crate::core::config::ReleaseDefaults;
use crate::core::error::{ReleaseResult, ValidationError};
use crate::core::params::{ParameterInput, Parameters, ReleaseType};
use crate::release::cves::load_cves;
use crate::release::emit::{render_yaml, write_atomic};
use crate::release::template::load_template;
use crate::release::{Advisory, ReleaseDocument, Substitutions};
use crate::ui::RunSummary;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Options for one generate run
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
  pub input: ParameterInput,
  /// Explicit defaults file; searched for in the working directory otherwise
  pub config: Option<PathBuf>,
  pub json: bool,
}

/// A rendered release, not yet written
#[derive(Debug, Clone)]
pub struct RenderedRelease {
  pub params: Parameters,
  pub advisory: Advisory,
  pub document: ReleaseDocument,
  pub yaml: String,
}

/// Run the generate command
pub fn run_generate(opts: GenerateOptions) -> ReleaseResult<()> {
  let cwd = env::current_dir()?;
  let dry_run = opts.input.dry_run;
  let rendered = render_release(opts.input, opts.config.as_deref(), &cwd)?;
  debug!(
    advisory = ?rendered.document.advisory_type(),
    cves = ?rendered.document.cve_keys(),
    "release notes classified"
  );

  let output = match rendered.params.output.as_deref() {
    Some(path) if !dry_run => {
      write_atomic(path, rendered.yaml.as_bytes())?;
      info!(output = %path.display(), "release document written");
      Some(path.to_path_buf())
    }
    _ => {
      print!("{}", rendered.yaml);
      None
    }
  };

  let summary = RunSummary {
    output,
    release_name: rendered.params.release_name.clone(),
    namespace: rendered.params.namespace.clone(),
    release_plan: rendered.params.release_plan.clone(),
    snapshot: rendered.params.snapshot.clone(),
    release_type: rendered.advisory.release_type(),
    cve_count: rendered.advisory.cve_count(),
  };

  if opts.json {
    println!("{}", serde_json::to_string_pretty(&summary)?);
  } else {
    summary.print_human();
  }

  Ok(())
}

/// Run every stage up to (not including) the write
pub fn render_release(mut input: ParameterInput, config: Option<&Path>, cwd: &Path) -> ReleaseResult<RenderedRelease> {
  let release_type = input.check_classification()?;
  debug!(%release_type, "classification checked");
  if !release_type.is_security()
    && let Some(path) = &input.cves_file
  {
    warn!(cves_file = %path.display(), "ignoring --cves-file for an RHEA release");
  }

  if let Some((path, defaults)) = ReleaseDefaults::discover(config, cwd)? {
    debug!(config = %path.display(), "applying defaults file");
    defaults.apply_to(&mut input);
  }

  let params = input.validate()?;
  debug!(release = %params.release_name, version = %params.version, "parameters validated");

  let template = load_template(&params.release_notes_template)?;
  debug!(
    template = %params.release_notes_template.display(),
    keys = template.len(),
    "template loaded"
  );

  let advisory = load_advisory(&params)?;

  let notes = Substitutions::new(&params.version, &params.accelerator).render_mapping(&template);
  let document = ReleaseDocument::assemble(&params, notes, &advisory);
  let yaml = render_yaml(&document)?;
  debug!(bytes = yaml.len(), "release document rendered");

  Ok(RenderedRelease {
    params,
    advisory,
    document,
    yaml,
  })
}

fn load_advisory(params: &Parameters) -> ReleaseResult<Advisory> {
  match params.release_type {
    ReleaseType::Rhea => Ok(Advisory::Enhancement),
    ReleaseType::Rhsa => {
      let path = params.cves_file.as_deref().ok_or(ValidationError::CvesFileRequired)?;
      let cves = load_cves(path)?;
      if cves.is_empty() {
        return Err(
          ValidationError::EmptyCveList {
            path: path.to_path_buf(),
          }
          .into(),
        );
      }
      debug!(cves = cves.len(), "CVE list loaded");
      Ok(Advisory::Security { cves })
    }
  }
}

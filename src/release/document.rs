//! Release document assembly
//!
//! Builds the Konflux `Release` custom resource from validated parameters and
//! rendered release notes. The advisory classification always comes from the
//! caller, never from the template: a `type` key in the template is
//! overwritten in place, and a template `cves` key is dropped unless this is a
//! security advisory (in which case it is replaced by the parsed list).

use crate::core::params::{Parameters, ReleaseType};
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

pub const API_VERSION: &str = "appstudio.redhat.com/v1alpha1";
pub const KIND: &str = "Release";

pub const COMPONENT_LABEL: &str = "appstudio.openshift.io/component";
pub const VERSION_ANNOTATION: &str = "release.konflux-ci.dev/version";
pub const ACCELERATOR_ANNOTATION: &str = "release.konflux-ci.dev/accelerator";

const TYPE_KEY: &str = "type";
const CVES_KEY: &str = "cves";

/// Advisory classification together with the data it requires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
  Enhancement,
  Security { cves: Vec<String> },
}

impl Advisory {
  pub fn release_type(&self) -> ReleaseType {
    match self {
      Advisory::Enhancement => ReleaseType::Rhea,
      Advisory::Security { .. } => ReleaseType::Rhsa,
    }
  }

  pub fn cve_count(&self) -> usize {
    match self {
      Advisory::Enhancement => 0,
      Advisory::Security { cves } => cves.len(),
    }
  }
}

/// A Konflux `Release` resource
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseDocument {
  pub api_version: String,
  pub kind: String,
  pub metadata: ReleaseMetadata,
  pub spec: ReleaseSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReleaseMetadata {
  pub name: String,
  pub namespace: String,
  pub labels: BTreeMap<String, String>,
  pub annotations: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseSpec {
  pub grace_period_days: u32,
  pub release_plan: String,
  pub snapshot: String,
  pub data: ReleaseData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseData {
  pub release_notes: Mapping,
}

impl ReleaseDocument {
  /// Assemble the release document
  ///
  /// `notes` must already have its placeholders substituted.
  pub fn assemble(params: &Parameters, notes: Mapping, advisory: &Advisory) -> Self {
    let release_notes = classify_notes(notes, &params.component, advisory);

    let labels = BTreeMap::from([(COMPONENT_LABEL.to_string(), params.component.clone())]);
    let annotations = BTreeMap::from([
      (VERSION_ANNOTATION.to_string(), params.version.clone()),
      (ACCELERATOR_ANNOTATION.to_string(), params.accelerator.clone()),
    ]);

    Self {
      api_version: API_VERSION.to_string(),
      kind: KIND.to_string(),
      metadata: ReleaseMetadata {
        name: params.release_name.clone(),
        namespace: params.namespace.clone(),
        labels,
        annotations,
      },
      spec: ReleaseSpec {
        grace_period_days: params.grace_period_days,
        release_plan: params.release_plan.clone(),
        snapshot: params.snapshot.clone(),
        data: ReleaseData { release_notes },
      },
    }
  }

  /// Advisory type recorded in the release notes
  pub fn advisory_type(&self) -> Option<&str> {
    self.spec.data.release_notes.get(TYPE_KEY).and_then(Value::as_str)
  }

  /// CVE identifiers attached to the release notes, in order
  pub fn cve_keys(&self) -> Vec<&str> {
    self
      .spec
      .data
      .release_notes
      .get(CVES_KEY)
      .and_then(Value::as_sequence)
      .map(|entries| entries.iter().filter_map(|e| e.get("key").and_then(Value::as_str)).collect())
      .unwrap_or_default()
  }
}

fn classify_notes(mut notes: Mapping, component: &str, advisory: &Advisory) -> Mapping {
  notes.insert(TYPE_KEY.into(), advisory.release_type().as_str().into());

  match advisory {
    Advisory::Enhancement => {
      notes.shift_remove(CVES_KEY);
    }
    Advisory::Security { cves } => {
      let entries = cves
        .iter()
        .map(|id| {
          let mut entry = Mapping::new();
          entry.insert("key".into(), id.as_str().into());
          entry.insert("component".into(), component.into());
          Value::Mapping(entry)
        })
        .collect();
      notes.insert(CVES_KEY.into(), Value::Sequence(entries));
    }
  }

  notes
}

//! Release notes template loading

use crate::core::error::{InputKind, NotFoundError, ParseError, ReleaseError, ReleaseResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::io;
use std::path::Path;

/// Load a release notes template
///
/// The template must be a YAML mapping at the top level; everything below
/// it is kept verbatim, in file order.
pub fn load_template(path: &Path) -> ReleaseResult<Mapping> {
  let content = fs::read_to_string(path).map_err(|e| -> ReleaseError {
    if e.kind() == io::ErrorKind::InvalidData {
      ParseError::Template {
        path: path.to_path_buf(),
        location: None,
        message: e.to_string(),
      }
      .into()
    } else {
      NotFoundError {
        kind: InputKind::Template,
        path: path.to_path_buf(),
        reason: e.to_string(),
      }
      .into()
    }
  })?;

  let value: Value = serde_yaml::from_str(&content).map_err(|e| ParseError::Template {
    path: path.to_path_buf(),
    location: e.location().map(|loc| (loc.line(), loc.column())),
    message: e.to_string(),
  })?;

  match value {
    Value::Mapping(mapping) => Ok(mapping),
    other => Err(
      ParseError::TemplateShape {
        path: path.to_path_buf(),
        found: kind_name(&other),
      }
      .into(),
    ),
  }
}

fn kind_name(value: &Value) -> &'static str {
  match value {
    Value::Null => "an empty document",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Sequence(_) => "a sequence",
    Value::Mapping(_) => "a mapping",
    Value::Tagged(_) => "a tagged value",
  }
}

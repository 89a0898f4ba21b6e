//! Placeholder substitution over release notes templates
//!
//! Only `{version}` and `{accelerator}` are recognized. Every string scalar in
//! the template is rewritten in a single left-to-right pass, so text inserted
//! for a placeholder is never scanned again: a version value that itself
//! reads `{accelerator}` is emitted literally. Running the substitution twice
//! over its own output is therefore not a no-op when a value contains a
//! placeholder token. There is no escaping syntax.

use serde_yaml::value::TaggedValue;
use serde_yaml::{Mapping, Value};

pub const VERSION_PLACEHOLDER: &str = "{version}";
pub const ACCELERATOR_PLACEHOLDER: &str = "{accelerator}";

/// Values substituted into a template
#[derive(Debug, Clone, Copy)]
pub struct Substitutions<'a> {
  pub version: &'a str,
  pub accelerator: &'a str,
}

impl<'a> Substitutions<'a> {
  pub fn new(version: &'a str, accelerator: &'a str) -> Self {
    Self { version, accelerator }
  }

  /// Rewrite a mapping value-by-value; keys and key order are untouched
  pub fn render_mapping(&self, mapping: &Mapping) -> Mapping {
    mapping
      .iter()
      .map(|(key, value)| (key.clone(), self.render(value)))
      .collect()
  }

  /// Rewrite every string scalar reachable from `value`
  pub fn render(&self, value: &Value) -> Value {
    match value {
      Value::String(s) => Value::String(self.render_str(s)),
      Value::Sequence(items) => Value::Sequence(items.iter().map(|item| self.render(item)).collect()),
      Value::Mapping(mapping) => Value::Mapping(self.render_mapping(mapping)),
      Value::Tagged(tagged) => Value::Tagged(Box::new(TaggedValue {
        tag: tagged.tag.clone(),
        value: self.render(&tagged.value),
      })),
      Value::Null | Value::Bool(_) | Value::Number(_) => value.clone(),
    }
  }

  /// Replace placeholders in one string
  pub fn render_str(&self, input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('{') {
      out.push_str(&rest[..pos]);
      let tail = &rest[pos..];

      if let Some(after) = tail.strip_prefix(VERSION_PLACEHOLDER) {
        out.push_str(self.version);
        rest = after;
      } else if let Some(after) = tail.strip_prefix(ACCELERATOR_PLACEHOLDER) {
        out.push_str(self.accelerator);
        rest = after;
      } else {
        out.push('{');
        rest = &tail[1..];
      }
    }

    out.push_str(rest);
    out
  }
}

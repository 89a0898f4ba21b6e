//! CVE list parsing
//!
//! File format: one identifier per line, surrounding whitespace ignored,
//! blank lines and `#` comment lines skipped. Order and duplicates are kept.

use crate::core::error::{InputKind, NotFoundError, ParseError, ReleaseResult};
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

static CVE_ID: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^(?i:CVE)-([0-9]{4})-([0-9]{4,})$").expect("CVE identifier pattern is valid")
});

/// Normalize a single CVE identifier, or `None` if it is not one
///
/// The `CVE` prefix is matched case-insensitively and emitted upper-case.
pub fn normalize_cve(raw: &str) -> Option<String> {
  let caps = CVE_ID.captures(raw)?;
  Some(format!("CVE-{}-{}", &caps[1], &caps[2]))
}

/// Load the CVE identifiers listed in `path`
pub fn load_cves(path: &Path) -> ReleaseResult<Vec<String>> {
  let not_found = |e: std::io::Error| NotFoundError {
    kind: InputKind::CveFile,
    path: path.to_path_buf(),
    reason: e.to_string(),
  };

  let reader = BufReader::new(File::open(path).map_err(not_found)?);
  let mut cves = Vec::new();

  for (idx, line) in reader.lines().enumerate() {
    let line = line.map_err(|e| ParseError::CveLine {
      path: path.to_path_buf(),
      line: idx + 1,
      content: format!("<unreadable: {}>", e),
    })?;
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
      continue;
    }

    match normalize_cve(line) {
      Some(id) => cves.push(id),
      None => {
        return Err(
          ParseError::CveLine {
            path: path.to_path_buf(),
            line: idx + 1,
            content: line.to_string(),
          }
          .into(),
        );
      }
    }
  }

  Ok(cves)
}

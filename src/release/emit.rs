//! Deterministic serialization and atomic output
//!
//! The document is rendered fully in memory, then written to a temp file in
//! the destination directory, flushed, fsynced and renamed over the target.
//! A failure at any step leaves the previous file (or no file) in place; the
//! temp file is removed when its handle drops. A replaced file keeps its
//! permissions; a new one gets the umask defaults, as a plain create would.

use crate::core::error::{ReleaseResult, ResultExt, WriteError};
use crate::release::document::ReleaseDocument;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::{Builder, NamedTempFile};
use tracing::debug;

/// Render the release document as YAML
///
/// Struct fields serialize in declaration order, maps in key order and the
/// release notes in template order, so equal inputs give equal bytes.
pub fn render_yaml(doc: &ReleaseDocument) -> ReleaseResult<String> {
  serde_yaml::to_string(doc).context("Failed to serialize release document")
}

/// Atomically replace `path` with `contents`
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), WriteError> {
  let parent = match path.parent() {
    Some(p) if !p.as_os_str().is_empty() => p,
    _ => Path::new("."),
  };

  if !parent.is_dir() {
    return Err(WriteError::MissingDirectory {
      path: parent.to_path_buf(),
    });
  }

  let io_err = |operation: &'static str| {
    move |source: std::io::Error| WriteError::Io {
      path: path.to_path_buf(),
      operation,
      source,
    }
  };

  let mut builder = Builder::new();
  builder.prefix(".konflux-release-").suffix(".tmp");
  default_file_mode(&mut builder);
  let mut tmp = builder.tempfile_in(parent).map_err(io_err("create temp file"))?;
  debug!(temp = %tmp.path().display(), "writing release document");

  if let Ok(existing) = fs::metadata(path)
    && existing.is_file()
  {
    tmp
      .as_file()
      .set_permissions(existing.permissions())
      .map_err(io_err("copy permissions"))?;
  }

  write_and_sync(&mut tmp, contents).map_err(io_err("write temp file"))?;

  tmp.persist(path).map_err(|e| io_err("rename into place")(e.error))?;

  sync_directory(parent);
  Ok(())
}

fn write_and_sync(tmp: &mut NamedTempFile, contents: &[u8]) -> std::io::Result<()> {
  tmp.write_all(contents)?;
  tmp.flush()?;
  tmp.as_file().sync_all()
}

/// Request 0666 at creation so the umask applies, instead of tempfile's 0600
#[cfg(unix)]
fn default_file_mode(builder: &mut Builder<'_, '_>) {
  use std::os::unix::fs::PermissionsExt;
  builder.permissions(fs::Permissions::from_mode(0o666));
}

#[cfg(not(unix))]
fn default_file_mode(_builder: &mut Builder<'_, '_>) {}

/// Make the rename durable; not every filesystem supports syncing a directory
#[cfg(unix)]
fn sync_directory(dir: &Path) {
  if let Err(e) = fs::File::open(dir).and_then(|d| d.sync_all()) {
    debug!(dir = %dir.display(), error = %e, "directory fsync skipped");
  }
}

#[cfg(not(unix))]
fn sync_directory(_dir: &Path) {}

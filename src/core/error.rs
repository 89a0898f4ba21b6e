//! Error types for konflux-release with contextual messages and exit codes
//!
//! Every failure belongs to one pipeline stage category (validation, not-found,
//! parse, write) and renders as a single message naming the offending
//! parameter, file, or line. Categories carry their own help text.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for konflux-release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// Input error (missing file, malformed template or CVE list)
  User = 1,
  /// System error (output not writable, I/O)
  System = 2,
  /// Parameter validation failure
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for konflux-release
#[derive(Debug)]
pub enum ReleaseError {
  /// Bad or missing parameter
  Validation(ValidationError),

  /// Input file does not exist or cannot be opened
  NotFound(NotFoundError),

  /// Malformed input content
  Parse(ParseError),

  /// Output could not be written
  Write(WriteError),

  /// Generic error with message and optional context
  Message { message: String, context: Option<String> },
}

impl ReleaseError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ReleaseError::Message { message, context } => ReleaseError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
      },
      _ => self,
    }
  }

  /// Name of the pipeline stage category that failed
  pub fn stage(&self) -> &'static str {
    match self {
      ReleaseError::Validation(_) => "validation",
      ReleaseError::NotFound(_) => "not-found",
      ReleaseError::Parse(_) => "parse",
      ReleaseError::Write(_) => "write",
      ReleaseError::Message { .. } => "error",
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ReleaseError::Validation(_) => ExitCode::Validation,
      ReleaseError::NotFound(_) => ExitCode::User,
      ReleaseError::Parse(_) => ExitCode::User,
      ReleaseError::Write(_) => ExitCode::System,
      ReleaseError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ReleaseError::Validation(e) => e.help_message(),
      ReleaseError::NotFound(e) => e.help_message(),
      ReleaseError::Parse(e) => e.help_message(),
      ReleaseError::Write(e) => e.help_message(),
      ReleaseError::Message { .. } => None,
    }
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseError::Validation(e) => write!(f, "{}", e),
      ReleaseError::NotFound(e) => write!(f, "{}", e),
      ReleaseError::Parse(e) => write!(f, "{}", e),
      ReleaseError::Write(e) => write!(f, "{}", e),
      ReleaseError::Message { message, context } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ReleaseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ReleaseError::Write(WriteError::Io { source, .. }) => Some(source),
      _ => None,
    }
  }
}

impl From<ValidationError> for ReleaseError {
  fn from(err: ValidationError) -> Self {
    ReleaseError::Validation(err)
  }
}

impl From<NotFoundError> for ReleaseError {
  fn from(err: NotFoundError) -> Self {
    ReleaseError::NotFound(err)
  }
}

impl From<ParseError> for ReleaseError {
  fn from(err: ParseError) -> Self {
    ReleaseError::Parse(err)
  }
}

impl From<WriteError> for ReleaseError {
  fn from(err: WriteError) -> Self {
    ReleaseError::Write(err)
  }
}

impl From<io::Error> for ReleaseError {
  fn from(err: io::Error) -> Self {
    ReleaseError::message(format!("I/O error: {}", err))
  }
}

impl From<serde_json::Error> for ReleaseError {
  fn from(err: serde_json::Error) -> Self {
    ReleaseError::message(format!("JSON error: {}", err))
  }
}

impl From<serde_yaml::Error> for ReleaseError {
  fn from(err: serde_yaml::Error) -> Self {
    ReleaseError::message(format!("YAML serialization error: {}", err))
  }
}

/// Parameter validation errors
#[derive(Debug)]
pub enum ValidationError {
  /// Required parameter not supplied on the command line or in the defaults file
  MissingParameter { flag: &'static str },

  /// Parameter supplied but malformed
  InvalidParameter {
    flag: &'static str,
    value: String,
    reason: String,
  },

  /// `--release-type RHSA` without a CVE list
  CvesFileRequired,

  /// CVE list parsed to zero identifiers
  EmptyCveList { path: PathBuf },
}

impl ValidationError {
  fn help_message(&self) -> Option<String> {
    match self {
      ValidationError::MissingParameter { flag } => Some(format!(
        "Pass {} on the command line or set it in konflux-release.toml.",
        flag
      )),
      ValidationError::CvesFileRequired => {
        Some("Security advisories need a CVE list: add --cves-file <PATH>.".to_string())
      }
      ValidationError::EmptyCveList { .. } => {
        Some("Add one CVE identifier per line (e.g. CVE-2024-12345).".to_string())
      }
      ValidationError::InvalidParameter { .. } => None,
    }
  }
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ValidationError::MissingParameter { flag } => {
        write!(f, "Missing required parameter: {}", flag)
      }
      ValidationError::InvalidParameter { flag, value, reason } => {
        write!(f, "Invalid value '{}' for {}: {}", value, flag, reason)
      }
      ValidationError::CvesFileRequired => {
        write!(f, "--cves-file is required when --release-type is RHSA")
      }
      ValidationError::EmptyCveList { path } => {
        write!(f, "CVE file contains no CVE identifiers: {}", path.display())
      }
    }
  }
}

/// Which input a not-found error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
  Template,
  CveFile,
  Config,
}

impl fmt::Display for InputKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      InputKind::Template => write!(f, "Release notes template"),
      InputKind::CveFile => write!(f, "CVE file"),
      InputKind::Config => write!(f, "Config file"),
    }
  }
}

/// Missing or unreadable input files
#[derive(Debug)]
pub struct NotFoundError {
  pub kind: InputKind,
  pub path: PathBuf,
  pub reason: String,
}

impl NotFoundError {
  fn help_message(&self) -> Option<String> {
    match self.kind {
      InputKind::Template => Some("Check the --release-notes-template path.".to_string()),
      InputKind::CveFile => Some("Check the --cves-file path.".to_string()),
      InputKind::Config => Some("Check the --config path.".to_string()),
    }
  }
}

impl fmt::Display for NotFoundError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} not found: {} ({})", self.kind, self.path.display(), self.reason)
  }
}

/// Malformed input content
#[derive(Debug)]
pub enum ParseError {
  /// Template is not well-formed YAML
  Template {
    path: PathBuf,
    location: Option<(usize, usize)>,
    message: String,
  },

  /// Template parsed but its root is not a mapping
  TemplateShape { path: PathBuf, found: &'static str },

  /// A CVE list line does not look like a CVE identifier
  CveLine { path: PathBuf, line: usize, content: String },

  /// Defaults file is not valid TOML for the expected keys
  Config { path: PathBuf, message: String },
}

impl ParseError {
  fn help_message(&self) -> Option<String> {
    match self {
      ParseError::TemplateShape { .. } => {
        Some("The release notes template must be a YAML mapping at its top level.".to_string())
      }
      ParseError::CveLine { .. } => Some(
        "Each non-comment line must be a single identifier like CVE-2024-12345. Prefix comments with '#'."
          .to_string(),
      ),
      ParseError::Config { .. } => Some(
        "Supported keys: namespace, release_plan, accelerator, release_notes_template, grace_period_days."
          .to_string(),
      ),
      ParseError::Template { .. } => None,
    }
  }
}

impl fmt::Display for ParseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ParseError::Template {
        path,
        location: Some((line, column)),
        message,
      } => write!(
        f,
        "Invalid YAML in template {} at line {}, column {}: {}",
        path.display(),
        line,
        column,
        message
      ),
      ParseError::Template {
        path,
        location: None,
        message,
      } => write!(f, "Invalid YAML in template {}: {}", path.display(), message),
      ParseError::TemplateShape { path, found } => {
        write!(
          f,
          "Invalid template {}: expected a mapping, found {}",
          path.display(),
          found
        )
      }
      ParseError::CveLine { path, line, content } => {
        write!(
          f,
          "Invalid CVE identifier in {} at line {}: '{}'",
          path.display(),
          line,
          content
        )
      }
      ParseError::Config { path, message } => {
        write!(f, "Invalid config {}: {}", path.display(), message)
      }
    }
  }
}

/// Output write failures
#[derive(Debug)]
pub enum WriteError {
  /// Destination directory is missing
  MissingDirectory { path: PathBuf },

  /// I/O failure while writing or publishing the output
  Io {
    path: PathBuf,
    operation: &'static str,
    source: io::Error,
  },
}

impl WriteError {
  fn help_message(&self) -> Option<String> {
    match self {
      WriteError::MissingDirectory { path } => Some(format!("Create the directory first: mkdir -p {}", path.display())),
      WriteError::Io { source, .. } if source.kind() == io::ErrorKind::PermissionDenied => {
        Some("Check write permissions on the output directory.".to_string())
      }
      WriteError::Io { .. } => None,
    }
  }
}

impl fmt::Display for WriteError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      WriteError::MissingDirectory { path } => {
        write!(f, "Cannot write output: directory does not exist: {}", path.display())
      }
      WriteError::Io {
        path,
        operation,
        source,
      } => write!(f, "Cannot write output {} ({}): {}", path.display(), operation, source),
    }
  }
}

/// Result type alias for konflux-release
pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ReleaseError>,
{
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }
}

/// Pretty-print an error to stderr with its stage and help text
pub fn print_error(error: &ReleaseError) {
  eprintln!("\n❌ [{}] {}\n", error.stage(), error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}

//! Tests for failing runs: exit codes, messages, and no partial output

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_missing_template_is_not_found() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let args = args_with("out/release.yaml", "--release-notes-template", Some("templates/missing.yaml"));
  let stderr = run_expect_failure(&ws.path, &args, 1)?;

  assert!(stderr.contains("[not-found]"), "{}", stderr);
  assert!(stderr.contains("Release notes template not found"), "{}", stderr);
  assert!(stderr.contains("missing.yaml"), "{}", stderr);
  assert!(ws.list_dir("out")?.is_empty(), "no output may be left behind");

  Ok(())
}

#[test]
fn test_malformed_template_is_parse_error() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_file("templates/broken.yaml", "synopsis: [unterminated\n")?;

  let args = args_with("out/release.yaml", "--release-notes-template", Some("templates/broken.yaml"));
  let stderr = run_expect_failure(&ws.path, &args, 1)?;

  assert!(stderr.contains("[parse]"), "{}", stderr);
  assert!(stderr.contains("broken.yaml"), "{}", stderr);
  assert!(ws.list_dir("out")?.is_empty());

  Ok(())
}

#[test]
fn test_security_without_cves_file_fails_validation() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let args = args_with("out/release.yaml", "--release-type", Some("RHSA"));
  let stderr = run_expect_failure(&ws.path, &args, 3)?;

  assert!(stderr.contains("[validation]"), "{}", stderr);
  assert!(stderr.contains("--cves-file is required"), "{}", stderr);
  assert!(!ws.file_exists("out/release.yaml"));

  Ok(())
}

#[test]
fn test_non_utf8_template_is_parse_error() -> Result<()> {
  let ws = TestWorkspace::new()?;
  std::fs::write(ws.path.join("templates/latin1.yaml"), b"synopsis: caf\xe9\n")?;

  let args = args_with("out/release.yaml", "--release-notes-template", Some("templates/latin1.yaml"));
  let stderr = run_expect_failure(&ws.path, &args, 1)?;
  assert!(stderr.contains("[parse]"), "{}", stderr);
  assert!(!stderr.contains("not found"), "{}", stderr);

  Ok(())
}

#[test]
fn test_unknown_release_type_rejected() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let args = args_with("out/release.yaml", "--release-type", Some("RHBA"));
  let stderr = run_expect_failure(&ws.path, &args, 3)?;
  assert!(stderr.contains("must be RHEA or RHSA"), "{}", stderr);

  Ok(())
}

#[test]
fn test_each_missing_parameter_is_named() -> Result<()> {
  let ws = TestWorkspace::new()?;

  for flag in [
    "--component",
    "--version",
    "--snapshot",
    "--release-plan",
    "--release-name",
    "--accelerator",
    "--namespace",
    "--release-notes-template",
    "--output",
  ] {
    let args = args_with("out/release.yaml", flag, None);
    let stderr = run_expect_failure(&ws.path, &args, 3)?;
    assert!(
      stderr.contains(&format!("Missing required parameter: {}", flag)),
      "{}: {}",
      flag,
      stderr
    );
  }
  assert!(ws.list_dir("out")?.is_empty());

  Ok(())
}

#[test]
fn test_invalid_version_rejected() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let args = args_with("out/release.yaml", "--version", Some("3.2"));
  let stderr = run_expect_failure(&ws.path, &args, 3)?;
  assert!(stderr.contains("Invalid value '3.2' for --version"), "{}", stderr);

  Ok(())
}

#[test]
fn test_bad_cve_line_named() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_file("cves", "CVE-2024-0001\n# fine\nCVE 2024 0002\n")?;

  let mut args = base_args("out/release.yaml");
  args.extend(["--release-type", "RHSA", "--cves-file", "cves"].map(String::from));
  let stderr = run_expect_failure(&ws.path, &args, 1)?;

  assert!(stderr.contains("line 3"), "{}", stderr);
  assert!(stderr.contains("CVE 2024 0002"), "{}", stderr);
  assert!(ws.list_dir("out")?.is_empty());

  Ok(())
}

#[test]
fn test_missing_cves_file_is_not_found() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let mut args = base_args("out/release.yaml");
  args.extend(["--release-type", "RHSA", "--cves-file", "nope"].map(String::from));
  let stderr = run_expect_failure(&ws.path, &args, 1)?;
  assert!(stderr.contains("CVE file not found"), "{}", stderr);

  Ok(())
}

#[test]
fn test_missing_output_directory_is_write_error() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let stderr = run_expect_failure(&ws.path, &base_args("missing-dir/release.yaml"), 2)?;
  assert!(stderr.contains("[write]"), "{}", stderr);
  assert!(stderr.contains("directory does not exist"), "{}", stderr);
  assert!(!ws.file_exists("missing-dir"));

  Ok(())
}

#[test]
fn test_failed_run_keeps_previous_output() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_file("out/release.yaml", "previous: true\n")?;

  let args = args_with("out/release.yaml", "--release-notes-template", Some("templates/missing.yaml"));
  run_expect_failure(&ws.path, &args, 1)?;

  assert_eq!(ws.read_file("out/release.yaml")?, "previous: true\n");
  assert_eq!(ws.list_dir("out")?, ["release.yaml"]);

  Ok(())
}

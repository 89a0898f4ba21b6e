//! Tests for successful manifest generation

use crate::helpers::*;
use anyhow::Result;
use serde_yaml::Value;

#[test]
fn test_enhancement_release() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_konflux_release(&ws.path, &base_args("out/release.yaml"))?;
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Generated: out/release.yaml"), "{}", stderr);

  let doc = ws.read_yaml("out/release.yaml")?;
  assert_eq!(doc["apiVersion"], Value::from("appstudio.redhat.com/v1alpha1"));
  assert_eq!(doc["kind"], Value::from("Release"));
  assert_eq!(doc["metadata"]["name"], Value::from("my-product-cuda-ubi9-3-2-5-prod-4"));
  assert_eq!(doc["metadata"]["namespace"], Value::from("my-namespace"));
  assert_eq!(
    doc["metadata"]["labels"]["appstudio.openshift.io/component"],
    Value::from("cuda-ubi9")
  );
  assert_eq!(doc["spec"]["gracePeriodDays"], Value::from(365));
  assert_eq!(doc["spec"]["releasePlan"], Value::from("my-product-ubi9-prod"));
  assert_eq!(doc["spec"]["snapshot"], Value::from("my-app-78c7f"));

  let notes = &doc["spec"]["data"]["releaseNotes"];
  assert_eq!(notes["synopsis"], Value::from("Widget 3.2.5 (CUDA)"));
  assert_eq!(notes["type"], Value::from("RHEA"));
  assert_eq!(notes["solution"], Value::from("Update to 3.2.5."));
  assert_eq!(
    notes["references"][0],
    Value::from("https://docs.example.com/widget/3.2.5")
  );
  assert_eq!(
    notes["description"],
    Value::from("Fixes {issue} placeholders that are not ours")
  );
  assert_eq!(notes["issues"]["count"], Value::from(1));
  assert_eq!(notes["issues"]["public"], Value::Bool(true));
  assert!(notes.get("cves").is_none(), "RHEA must not carry a cves field");

  Ok(())
}

#[test]
fn test_security_release_with_cves() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_file("cves", "CVE-2024-0001\n# comment\n\nCVE-2024-0002")?;

  let mut args = base_args("out/release.yaml");
  args.extend(["--release-type", "RHSA", "--cves-file", "cves"].map(String::from));
  run_konflux_release(&ws.path, &args)?;

  let doc = ws.read_yaml("out/release.yaml")?;
  let notes = &doc["spec"]["data"]["releaseNotes"];
  // The template says RHEA; the flag wins.
  assert_eq!(notes["type"], Value::from("RHSA"));

  let keys: Vec<_> = notes["cves"]
    .as_sequence()
    .expect("cves should be a list")
    .iter()
    .map(|c| c["key"].as_str().unwrap_or_default().to_string())
    .collect();
  assert_eq!(keys, ["CVE-2024-0001", "CVE-2024-0002"]);
  assert_eq!(notes["cves"][1]["component"], Value::from("cuda-ubi9"));

  Ok(())
}

#[test]
fn test_template_key_order_preserved() -> Result<()> {
  let ws = TestWorkspace::new()?;
  run_konflux_release(&ws.path, &base_args("out/release.yaml"))?;

  let doc = ws.read_yaml("out/release.yaml")?;
  let keys: Vec<_> = doc["spec"]["data"]["releaseNotes"]
    .as_mapping()
    .expect("release notes should be a mapping")
    .keys()
    .filter_map(Value::as_str)
    .collect();
  assert_eq!(
    keys,
    ["synopsis", "type", "topic", "description", "solution", "references", "issues"]
  );

  Ok(())
}

#[test]
fn test_output_is_byte_identical_across_runs() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_file("cves", "CVE-2023-44487\nCVE-2024-3094\n")?;

  let mut first = base_args("out/first.yaml");
  first.extend(["--release-type", "RHSA", "--cves-file", "cves"].map(String::from));
  let mut second = base_args("out/second.yaml");
  second.extend(["--release-type", "RHSA", "--cves-file", "cves"].map(String::from));

  run_konflux_release(&ws.path, &first)?;
  run_konflux_release(&ws.path, &second)?;

  assert_eq!(ws.read_file("out/first.yaml")?, ws.read_file("out/second.yaml")?);
  assert_eq!(ws.list_dir("out")?, ["first.yaml", "second.yaml"]);

  Ok(())
}

#[test]
fn test_existing_output_replaced() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_file("out/release.yaml", "stale: true\n")?;

  run_konflux_release(&ws.path, &base_args("out/release.yaml"))?;

  let content = ws.read_file("out/release.yaml")?;
  assert!(!content.contains("stale"));
  assert!(content.contains("kind: Release"));

  Ok(())
}

#[test]
fn test_dry_run_prints_without_writing() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let mut args = base_args("out/release.yaml");
  args.push("--dry-run".to_string());
  let output = run_konflux_release(&ws.path, &args)?;

  let stdout = String::from_utf8_lossy(&output.stdout);
  let doc: Value = serde_yaml::from_str(&stdout)?;
  assert_eq!(doc["kind"], Value::from("Release"));
  assert!(!ws.file_exists("out/release.yaml"));

  Ok(())
}

#[test]
fn test_dry_run_needs_no_output() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let mut args = args_with("out/release.yaml", "--output", None);
  args.push("--dry-run".to_string());
  let output = run_konflux_release(&ws.path, &args)?;

  let doc: Value = serde_yaml::from_slice(&output.stdout)?;
  assert_eq!(doc["metadata"]["name"], Value::from("my-product-cuda-ubi9-3-2-5-prod-4"));
  assert!(ws.list_dir("out")?.is_empty());

  Ok(())
}

#[test]
fn test_enhancement_ignores_cves_file() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_file("cves", "CVE-2024-0001\n")?;

  let args = args_with("out/release.yaml", "--cves-file", Some("cves"));
  let output = run_konflux_release(&ws.path, &args)?;

  let doc = ws.read_yaml("out/release.yaml")?;
  let notes = &doc["spec"]["data"]["releaseNotes"];
  assert_eq!(notes["type"], Value::from("RHEA"));
  assert!(notes.get("cves").is_none(), "RHEA must not carry a cves field");
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("ignoring --cves-file"), "{}", stderr);

  Ok(())
}

#[test]
fn test_json_summary() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_file("cves", "CVE-2024-0001\n")?;

  let mut args = base_args("out/release.yaml");
  args.extend(["--release-type", "rhsa", "--cves-file", "cves", "--json"].map(String::from));
  let output = run_konflux_release(&ws.path, &args)?;

  let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
  assert_eq!(json["releaseName"], "my-product-cuda-ubi9-3-2-5-prod-4");
  assert_eq!(json["releaseType"], "RHSA");
  assert_eq!(json["cveCount"], 1);
  assert_eq!(json["output"], "out/release.yaml");

  Ok(())
}

#[test]
fn test_grace_period_flag() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let args = args_with("out/release.yaml", "--grace-period", Some("30"));
  run_konflux_release(&ws.path, &args)?;

  let doc = ws.read_yaml("out/release.yaml")?;
  assert_eq!(doc["spec"]["gracePeriodDays"], Value::from(30));

  Ok(())
}

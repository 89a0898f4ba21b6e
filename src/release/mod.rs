//! Release manifest rendering
//!
//! The stages run strictly in order and never loop back:
//!
//! 1. [`template`]: load the YAML release notes template
//! 2. [`cves`]: load the CVE list (security advisories only)
//! 3. [`substitute`]: replace `{version}` / `{accelerator}` in every string
//! 4. [`document`]: assemble the Konflux `Release` resource
//! 5. [`emit`]: serialize deterministically and write atomically
//!
//! Resolving tags, discovering snapshots and applying the result to a
//! cluster are left to the caller.

pub mod cves;
pub mod document;
pub mod emit;
pub mod substitute;
pub mod template;

pub use document::{Advisory, ReleaseDocument};
pub use substitute::Substitutions;

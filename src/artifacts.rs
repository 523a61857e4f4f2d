//! Artifact probing - filesystem checks for build and scaffold output
//!
//! Purely synchronous and independent of any browser session; usable
//! standalone to validate CLI scaffolding or dist/ build output.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::debug;

/// Return every path from `relative_paths` that does not exist under
/// `base_dir`. Empty set iff all are present. Read-only and idempotent:
/// repeated calls against an unchanged tree yield identical results.
pub fn check_artifacts(base_dir: &Path, relative_paths: &[String]) -> BTreeSet<String> {
    let mut missing = BTreeSet::new();

    for relative in relative_paths {
        let candidate = base_dir.join(relative);
        if !candidate.exists() {
            debug!("Artifact missing: {}", candidate.display());
            missing.insert(relative.clone());
        }
    }

    missing
}

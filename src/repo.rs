// Repository access behind a narrow trait

use anyhow::Result;

use crate::Hunk;

mod git2_impl;

pub use git2_impl::Git2Repo;

/// The version-control operations the adjustment engine needs.
///
/// Kept narrow so the engine can be driven against fixture repositories in
/// tests and so the backing implementation can change without touching
/// callers. Fetching a diff is the only operation here that does real I/O.
pub trait GitRepo {
    /// Ordered hunks for a single path between two commit-ish revisions.
    ///
    /// Returns an empty vector when the path is unchanged between the two
    /// revisions. Hunks are ordered by increasing `old_start`, with the
    /// `source` revision on the old side of each hunk.
    fn hunks_for_path(&self, source: &str, target: &str, path: &str) -> Result<Vec<Hunk>>;
}

// Cross-commit adjustment of paths, positions, and ranges

use anyhow::Result;

use crate::repo::GitRepo;
use crate::translate::{translate_position, translate_range};
use crate::{Hunk, Position, Range};

/// Strategy for mapping a file path from one commit's tree to another's.
///
/// `source` and `target` are already oriented for the diff direction being
/// queried. Returns `None` when the file has no counterpart in the target
/// commit.
pub trait PathResolver {
    fn resolve(&self, source: &str, target: &str, path: &str) -> Result<Option<String>>;
}

/// Path resolution that assumes no file was ever renamed.
///
/// Rename tracking needs rename detection over the commit range, which
/// nothing upstream supplies yet, so every path maps to itself. The
/// [`PathResolver`] trait marks the seam where a rename-aware resolver will
/// slot in.
pub struct IdentityPaths;

impl PathResolver for IdentityPaths {
    fn resolve(&self, _source: &str, _target: &str, path: &str) -> Result<Option<String>> {
        Ok(Some(path.to_string()))
    }
}

/// Translates positions computed against one commit into another commit's
/// coordinate space.
///
/// The adjuster carries the anchor commit the positions were computed
/// against; each call names the commit to translate into. It holds no other
/// state, so one adjuster can serve any number of concurrent queries.
pub struct PositionAdjuster<'a, R> {
    repo: &'a R,
    commit: String,
    paths: Box<dyn PathResolver + 'a>,
}

impl<'a, R: GitRepo> PositionAdjuster<'a, R> {
    pub fn new(repo: &'a R, commit: impl Into<String>) -> Self {
        PositionAdjuster {
            repo,
            commit: commit.into(),
            paths: Box::new(IdentityPaths),
        }
    }

    /// Replace the path resolution strategy.
    pub fn with_paths(mut self, paths: Box<dyn PathResolver + 'a>) -> Self {
        self.paths = paths;
        self
    }

    /// Map `path` from the anchor commit's tree into `commit`'s tree.
    /// If `reverse` is true, the direction is swapped.
    pub fn adjust_path(&self, commit: &str, path: &str, reverse: bool) -> Result<Option<String>> {
        let (source, target) = orient(&self.commit, commit, reverse);
        self.paths.resolve(source, target, path)
    }

    /// Translate `pos` on `path` from the anchor commit into `commit`.
    ///
    /// Returns the path in the target commit together with the translated
    /// position, or `None` when the position's line was edited between the
    /// two commits. If `reverse` is true, the direction is swapped.
    pub fn adjust_position(
        &self,
        commit: &str,
        path: &str,
        pos: Position,
        reverse: bool,
    ) -> Result<Option<(String, Position)>> {
        let Some(target_path) = self.adjust_path(commit, path, reverse)? else {
            return Ok(None);
        };

        let hunks = self.read_hunks(commit, path, reverse)?;
        let adjusted = translate_position(&hunks, pos)?;

        Ok(adjusted.map(|pos| (target_path, pos)))
    }

    /// Translate `range` on `path` from the anchor commit into `commit`.
    ///
    /// Succeeds only when both endpoints translate; a range with one edited
    /// endpoint yields `None` as a whole. If `reverse` is true, the
    /// direction is swapped.
    pub fn adjust_range(
        &self,
        commit: &str,
        path: &str,
        range: Range,
        reverse: bool,
    ) -> Result<Option<(String, Range)>> {
        let Some(target_path) = self.adjust_path(commit, path, reverse)? else {
            return Ok(None);
        };

        let hunks = self.read_hunks(commit, path, reverse)?;
        let adjusted = translate_range(&hunks, range)?;

        Ok(adjusted.map(|range| (target_path, range)))
    }

    /// Ordered hunks for `path` between the anchor commit and `commit`.
    ///
    /// Equal commits cannot differ, so the repository is never consulted
    /// for them.
    fn read_hunks(&self, commit: &str, path: &str, reverse: bool) -> Result<Vec<Hunk>> {
        if self.commit == commit {
            return Ok(Vec::new());
        }

        let (source, target) = orient(&self.commit, commit, reverse);
        self.repo.hunks_for_path(source, target, path)
    }
}

/// Resolve the diff direction for one query without touching the inputs.
fn orient<'c>(source: &'c str, target: &'c str, reverse: bool) -> (&'c str, &'c str) {
    if reverse {
        (target, source)
    } else {
        (source, target)
    }
}

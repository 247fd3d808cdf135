use anyhow::{Context, Result};

use crate::{DiffLine, DiffLineKind, Hunk};

use super::GitRepo;

/// Concrete git repository backed by `libgit2` via the `git2` crate.
///
/// Construct with [`Git2Repo::open`]; then use through the [`GitRepo`] trait.
pub struct Git2Repo {
    inner: git2::Repository,
}

impl Git2Repo {
    /// Try to open a git repository by iteratively trying the given path and
    /// its parents until a repository root is found.
    pub fn open(mut path: std::path::PathBuf) -> Result<Self> {
        loop {
            let result = git2::Repository::open(&path);
            if let Ok(repo) = result {
                return Ok(Git2Repo { inner: repo });
            }
            if !path.pop() {
                anyhow::bail!("Could not find git repository root");
            }
        }
    }

    fn tree_of(&self, commit_ish: &str) -> Result<git2::Tree<'_>> {
        let object = self
            .inner
            .revparse_single(commit_ish)
            .context(format!("Failed to resolve '{}'", commit_ish))?;
        let commit = object
            .peel_to_commit()
            .context("Resolved object is not a commit")?;
        commit.tree().context("Failed to get commit tree")
    }
}

impl GitRepo for Git2Repo {
    fn hunks_for_path(&self, source: &str, target: &str, path: &str) -> Result<Vec<Hunk>> {
        let source_tree = self.tree_of(source)?;
        let target_tree = self.tree_of(target)?;

        // Scope the diff to the one queried path; the pathspec is a literal
        // path, not a glob.
        let mut opts = git2::DiffOptions::new();
        opts.pathspec(path);
        opts.disable_pathspec_match(true);

        let diff = self
            .inner
            .diff_tree_to_tree(Some(&source_tree), Some(&target_tree), Some(&mut opts))
            .context(format!("Failed to diff '{}' between commits", path))?;

        extract_hunks(&diff)
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn extract_hunks(diff: &git2::Diff) -> Result<Vec<Hunk>> {
    let mut hunks = Vec::new();

    for delta_idx in 0..diff.deltas().len() {
        let patch =
            git2::Patch::from_diff(diff, delta_idx)?.context("Failed to extract patch from diff")?;

        for hunk_idx in 0..patch.num_hunks() {
            let (hunk_header, _num_lines) = patch.hunk(hunk_idx)?;

            let mut lines = Vec::new();
            for line_idx in 0..patch.num_lines_in_hunk(hunk_idx)? {
                let line = patch.line_in_hunk(hunk_idx, line_idx)?;
                let kind = match line.origin() {
                    '+' => DiffLineKind::Addition,
                    '-' => DiffLineKind::Deletion,
                    ' ' => DiffLineKind::Context,
                    // End-of-file newline markers are not content lines and
                    // must not count toward either side's line totals
                    _ => continue,
                };
                let content = String::from_utf8_lossy(line.content()).to_string();
                lines.push(DiffLine { kind, content });
            }

            hunks.push(Hunk {
                old_start: hunk_header.old_start(),
                old_lines: hunk_header.old_lines(),
                new_start: hunk_header.new_start(),
                new_lines: hunk_header.new_lines(),
                lines,
            });
        }
    }

    Ok(hunks)
}

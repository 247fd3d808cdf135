// Line-based position arithmetic over parsed diff hunks

use thiserror::Error;

use crate::{DiffLineKind, Hunk, Position, Range};

/// A hunk whose declared original line count exceeds what its body contains.
///
/// This means the diff itself is corrupt, which is a different situation
/// from a position that merely sits on an edited line. Callers that see this
/// error should distrust the whole diff, not just the one query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("hunk at original line {old_start} declares {old_lines} original lines but its body holds fewer")]
pub struct MalformedHunkError {
    pub old_start: u32,
    pub old_lines: u32,
}

/// Find the last hunk whose original span starts at or before the given
/// 1-indexed line, or `None` if the line precedes every hunk.
///
/// Relies on hunks being ordered by increasing `old_start`. Whether the
/// returned hunk actually covers the line is for the caller to decide.
pub fn locate_hunk(hunks: &[Hunk], line: u32) -> Option<&Hunk> {
    hunks.iter().take_while(|hunk| hunk.old_start <= line).last()
}

/// Translate a position from the old side of the diff to the new side.
///
/// Returns `Ok(None)` when the position's line was added or removed by the
/// diff; no equivalent position exists on the other side then, and callers
/// must not fall back to the untranslated value. Character offsets pass
/// through unchanged: diffs are line-granular, so a position on a surviving
/// line keeps its column even when a neighboring line changed.
pub fn translate_position(
    hunks: &[Hunk],
    pos: Position,
) -> Result<Option<Position>, MalformedHunkError> {
    // Positions are 0-indexed, hunk headers are 1-indexed
    let line = pos.line + 1;

    let Some(hunk) = locate_hunk(hunks, line) else {
        // No edits at or before this line
        return Ok(Some(pos));
    };

    // Past the end of the hunk's original span nothing changed length-wise
    // except the hunk itself, so only its net growth shifts the line.
    if line >= hunk.old_start + hunk.old_lines {
        let old_end = i64::from(hunk.old_start + hunk.old_lines);
        let new_end = i64::from(hunk.new_start + hunk.new_lines);
        let adjusted = i64::from(line) + (new_end - old_end);
        if adjusted < 1 {
            // Query past the end of a fully deleted tail
            return Ok(None);
        }
        return Ok(Some(Position {
            line: adjusted as u32 - 1,
            character: pos.character,
        }));
    }

    // Inside the hunk: walk its body, tracking which line each side of the
    // diff is on, until the old-side counter reaches the queried line.
    let mut old_line = hunk.old_start;
    let mut new_line = hunk.new_start;

    for delta in &hunk.lines {
        // The old file contains every body line that was not added
        if delta.kind != DiffLineKind::Addition {
            old_line += 1;
        }

        if old_line == line + 1 {
            if delta.kind != DiffLineKind::Context {
                // The queried line itself was edited away
                return Ok(None);
            }
            return Ok(Some(Position {
                line: new_line - 1,
                character: pos.character,
            }));
        }

        // The new file contains every body line that was not removed
        if delta.kind != DiffLineKind::Deletion {
            new_line += 1;
        }
    }

    // The header promised the queried line was inside this hunk, but the
    // body ran out before reaching it.
    Err(MalformedHunkError {
        old_start: hunk.old_start,
        old_lines: hunk.old_lines,
    })
}

/// Translate both endpoints of a range through [`translate_position`].
///
/// Fails as a whole when either endpoint sits on an edited line, so a
/// partially translated range is never produced.
pub fn translate_range(
    hunks: &[Hunk],
    range: Range,
) -> Result<Option<Range>, MalformedHunkError> {
    let Some(start) = translate_position(hunks, range.start)? else {
        return Ok(None);
    };
    let Some(end) = translate_position(hunks, range.end)? else {
        return Ok(None);
    };

    Ok(Some(Range { start, end }))
}

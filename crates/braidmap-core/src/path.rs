//! Hierarchy path assignment
//!
//! Each note's path is the chain of slugs from the outline roots down to the
//! note itself. Paths are recomputed from scratch on every synchronization so
//! reordered or re-indented outlines settle into consistent identities.

use std::ops::Range;

use crate::document::Note;
use crate::slug::note_slug;

/// Compute the hierarchy path for every note, in note order
pub fn assign_paths(notes: &[Note]) -> Vec<Vec<String>> {
    let mut paths = vec![Vec::new(); notes.len()];
    assign_range(notes, 0..notes.len(), &[], &mut paths);
    paths
}

fn assign_range(notes: &[Note], range: Range<usize>, base: &[String], paths: &mut Vec<Vec<String>>) {
    let depth = base.len();
    let children: Vec<usize> = range
        .clone()
        .filter(|&i| notes[i].indent == depth)
        .collect();

    for (pos, &child) in children.iter().enumerate() {
        let mut path = base.to_vec();
        path.push(note_slug(notes[child].segment_text()));

        let subtree_end = children.get(pos + 1).copied().unwrap_or(range.end);
        assign_range(notes, child + 1..subtree_end, &path, paths);
        paths[child] = path;
    }
}

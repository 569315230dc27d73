//! Link group construction and conflict detection
//!
//! Notes bound to the same id, or (when crosslinking is on) key words with
//! identical content, form a link group. One member is the reference the
//! others point at. Groups are validated before any promotion: a group may
//! define children in only one place, and an id must resolve to exactly one
//! content.

use std::collections::{HashMap, HashSet};

use crate::document::{LinkTag, Note, NoteKind};
use crate::slug::note_slug;
use crate::warning::{Warning, WarningKind};

/// Identity a link group is keyed on
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    /// Explicit id from a `#id` binding
    Id(String),
    /// Lowercased content of unbound key words
    Content(String),
}

/// A group of notes sharing one identity
#[derive(Debug, Clone)]
pub struct LinkGroup {
    pub key: GroupKey,
    /// Indices into the note list, in document order
    pub members: Vec<usize>,
    /// The member the others link to
    pub ref_index: usize,
}

/// All groups of a document plus the warnings and promotions they produced
#[derive(Debug, Clone, Default)]
pub struct GroupSet {
    pub groups: Vec<LinkGroup>,
    pub warnings: Vec<Warning>,
    /// Ids to write into notes promoted from content groups
    pub promoted: HashMap<usize, String>,
}

/// Build link groups over the notes and detect group conflicts
pub fn build_groups(notes: &[Note], crosslink: bool) -> GroupSet {
    let mut order: Vec<GroupKey> = Vec::new();
    let mut members: HashMap<GroupKey, Vec<usize>> = HashMap::new();

    for (i, note) in notes.iter().enumerate() {
        let key = match &note.link {
            LinkTag::Suppressed => continue,
            LinkTag::Bound(id) => GroupKey::Id(id.clone()),
            LinkTag::Unset => {
                if crosslink && note.kind == NoteKind::KeyWord {
                    GroupKey::Content(note.content.to_lowercase())
                } else {
                    continue;
                }
            }
        };
        members
            .entry(key.clone())
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(i);
    }

    let mut set = GroupSet::default();
    let mut taken: HashSet<String> = notes
        .iter()
        .filter_map(|n| match &n.link {
            LinkTag::Bound(id) => Some(id.clone()),
            _ => None,
        })
        .collect();

    for key in order {
        let Some(group_members) = members.remove(&key) else {
            continue;
        };

        let with_children: Vec<usize> = group_members
            .iter()
            .copied()
            .filter(|&i| has_children(notes, i))
            .collect();

        let ref_index = with_children
            .first()
            .copied()
            .unwrap_or(group_members[0]);

        let mut conflicted = false;
        if with_children.len() > 1 {
            conflicted = true;
            for &i in &group_members {
                set.warnings
                    .push(Warning::new(notes[i].line, WarningKind::LinkConflict));
            }
        }

        match &key {
            GroupKey::Id(_) => {
                let contents: HashSet<String> = group_members
                    .iter()
                    .map(|&i| notes[i].content.to_lowercase())
                    .filter(|c| !c.is_empty())
                    .collect();
                if contents.is_empty() {
                    for &i in &group_members {
                        set.warnings
                            .push(Warning::new(notes[i].line, WarningKind::ContentNotDefined));
                    }
                } else if contents.len() > 1 {
                    for &i in &group_members {
                        set.warnings
                            .push(Warning::new(notes[i].line, WarningKind::ContentConflict));
                    }
                }
            }
            GroupKey::Content(content) => {
                if group_members.len() > 1 && !conflicted {
                    let id = unique_id(&note_slug(content), &mut taken);
                    for &i in &group_members {
                        set.promoted.insert(i, id.clone());
                    }
                }
            }
        }

        set.groups.push(LinkGroup {
            key,
            members: group_members,
            ref_index,
        });
    }

    set
}

/// Whether the note at `index` defines a branch
///
/// True when the next line is deeper, or when the note is an ordinal item
/// whose next same-level sibling carries the successor number (a chain
/// continuation).
fn has_children(notes: &[Note], index: usize) -> bool {
    let note = &notes[index];
    if notes
        .get(index + 1)
        .is_some_and(|next| next.indent > note.indent)
    {
        return true;
    }
    if note.list_index == 0 {
        return false;
    }
    for next in &notes[index + 1..] {
        if next.indent < note.indent {
            break;
        }
        if next.indent == note.indent {
            return next.list_index == note.list_index + 1;
        }
    }
    false
}

/// First free id derived from `base`, numbering clashes from 2 upward
fn unique_id(base: &str, taken: &mut HashSet<String>) -> String {
    let id = if taken.contains(base) {
        let mut n = 2u32;
        loop {
            let candidate = format!("{}{}", base, n);
            if !taken.contains(&candidate) {
                break candidate;
            }
            n += 1;
        }
    } else {
        base.to_string()
    };
    taken.insert(id.clone());
    id
}

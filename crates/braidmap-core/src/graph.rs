//! Graph export
//!
//! Projects a parsed document into a node and edge list suitable for
//! rendering or downstream analysis. Node ids are hierarchy paths, so the
//! export is stable across runs of a synchronized document.

use serde::Serialize;

use crate::document::Document;
use crate::group::build_groups;
use crate::path::assign_paths;
use crate::scheduler::StudyCard;

#[derive(Debug, Clone, Serialize)]
pub struct MapNode {
    pub id: String,
    pub content: String,
    pub depth: usize,
    pub studyable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduler_state: Option<StudyCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapEdge {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MindMapGraph {
    pub title: String,
    pub nodes: Vec<MapNode>,
    pub edges: Vec<MapEdge>,
}

/// Build the graph projection of a document
///
/// Unless the document separates headings, a center node carries the title
/// and anchors every outline root. Multi-member link groups contribute an
/// edge from each member to the group's reference note.
pub fn build_graph(doc: &Document) -> MindMapGraph {
    let paths = assign_paths(&doc.notes);
    let groups = build_groups(&doc.notes, doc.settings.crosslink);

    let mut nodes = Vec::new();
    let mut edges = Vec::new();

    if !doc.settings.separate_headings {
        nodes.push(MapNode {
            id: doc.id.clone(),
            content: doc.title.clone(),
            depth: 0,
            studyable: false,
            scheduler_state: None,
        });
    }

    for (i, note) in doc.notes.iter().enumerate() {
        let id = paths[i].join("\\");
        nodes.push(MapNode {
            id: id.clone(),
            content: note.content.clone(),
            depth: paths[i].len(),
            studyable: note.props.study,
            scheduler_state: note.props.card.clone(),
        });

        if paths[i].len() > 1 {
            edges.push(MapEdge {
                source: paths[i][..paths[i].len() - 1].join("\\"),
                target: id,
            });
        } else if !doc.settings.separate_headings {
            edges.push(MapEdge {
                source: doc.id.clone(),
                target: id,
            });
        }
    }

    for group in &groups.groups {
        if group.members.len() < 2 {
            continue;
        }
        let target = paths[group.ref_index].join("\\");
        for &member in &group.members {
            if member == group.ref_index {
                continue;
            }
            edges.push(MapEdge {
                source: paths[member].join("\\"),
                target: target.clone(),
            });
        }
    }

    MindMapGraph {
        title: doc.title.clone(),
        nodes,
        edges,
    }
}

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::block::Block;
use crate::error::DocumentIssue;

/// A named slot populated by respondent answers, referenced by id in blocks
/// and by name in interpolation templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub id: String,
    pub name: String,
}

/// Where an edge starts: a block, optionally narrowed to one of its
/// selectable items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeSource {
    pub block_id: String,
    pub item_id: Option<String>,
}

/// Where an edge lands: a group, optionally a specific block within it.
///
/// Without a block id, traversal lands on the first block of the group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeTarget {
    pub group_id: String,
    pub block_id: Option<String>,
}

/// A named transition rule from a block (or one of its items) to a target
/// group and block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub from: EdgeSource,
    pub to: EdgeTarget,
}

/// An ordered sequence of blocks; the unit of sequential fallback
/// traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Group {
    /// Index of the block with the given id, if present.
    pub fn block_position(&self, block_id: &str) -> Option<usize> {
        self.blocks.iter().position(|block| block.id() == block_id)
    }
}

/// The full graph describing a conversational form.
///
/// Immutable once parsed; the navigator only ever reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowDocument {
    pub version: Option<String>,
    pub name: Option<String>,
    pub groups: Vec<Group>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub variables: Vec<Variable>,
}

impl FlowDocument {
    /// Index of the group with the given id, if present.
    pub fn group_position(&self, group_id: &str) -> Option<usize> {
        self.groups.iter().position(|group| group.id == group_id)
    }

    /// The edge leaving `block_id` that fits the requested choice item.
    ///
    /// An edge narrowed to the requested item wins no matter where it sits
    /// in the edge list; an itemless edge is only the fallback when no
    /// narrowed edge matches, so a block-level default cannot shadow an
    /// item's own branch. An edge narrowed to a different item never
    /// matches. Without a requested item, the first edge leaving the block
    /// decides.
    pub fn matching_edge(&self, block_id: &str, item_id: Option<&str>) -> Option<&Edge> {
        let mut itemless = None;
        for edge in self
            .edges
            .iter()
            .filter(|edge| edge.from.block_id == block_id)
        {
            match (item_id, edge.from.item_id.as_deref()) {
                (Some(requested), Some(narrowed)) if requested == narrowed => {
                    return Some(edge);
                }
                (Some(_), Some(_)) => {}
                (Some(_), None) => itemless = itemless.or(Some(edge)),
                (None, _) => return Some(edge),
            }
        }
        itemless
    }

    /// Whether some group contains a block with the given id.
    pub fn contains_block(&self, block_id: &str) -> bool {
        self.groups
            .iter()
            .any(|group| group.block_position(block_id).is_some())
    }

    /// Checks the document's referential invariants.
    ///
    /// Duplicate ids and dangling edge endpoints come back as issues for
    /// the caller to report; none of them prevents traversal.
    pub fn audit(&self) -> Vec<DocumentIssue> {
        let mut issues = Vec::new();

        issues.extend(
            self.groups
                .iter()
                .map(|group| group.id.as_str())
                .duplicates()
                .map(|id| DocumentIssue::DuplicateGroupId(id.to_string())),
        );

        for group in &self.groups {
            issues.extend(
                group
                    .blocks
                    .iter()
                    .map(Block::id)
                    .duplicates()
                    .map(|id| DocumentIssue::DuplicateBlockId {
                        group_id: group.id.clone(),
                        block_id: id.to_string(),
                    }),
            );
        }

        for edge in &self.edges {
            if !self.contains_block(&edge.from.block_id) {
                issues.push(DocumentIssue::EdgeSourceMissing {
                    edge_id: edge.id.clone(),
                    block_id: edge.from.block_id.clone(),
                });
            }
            match self.group_position(&edge.to.group_id) {
                None => issues.push(DocumentIssue::EdgeTargetMissing {
                    edge_id: edge.id.clone(),
                    group_id: edge.to.group_id.clone(),
                }),
                Some(group_index) => {
                    if let Some(block_id) = &edge.to.block_id {
                        if self.groups[group_index].block_position(block_id).is_none() {
                            issues.push(DocumentIssue::EdgeTargetBlockMissing {
                                edge_id: edge.id.clone(),
                                group_id: edge.to.group_id.clone(),
                                block_id: block_id.clone(),
                            });
                        }
                    }
                }
            }
        }

        issues
    }
}

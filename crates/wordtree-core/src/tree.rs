//! Stratification: rebuilding parent/child edges from dotted ids alone.

use crate::error::StructureError;
use crate::record::Record;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::Serialize;
use std::collections::BTreeMap;

pub type NodeIndex = usize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    pub id: String,
    pub parent_id: Option<String>,
    pub parent: Option<NodeIndex>,
    pub children: Vec<NodeIndex>,
    pub depth: usize,
    pub record: Record,
}

impl TreeNode {
    pub fn word(&self) -> &str {
        self.record.word()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A strict tree over the input records.
///
/// Nodes are stored in pre-order: the root is index `0` and every parent precedes its
/// descendants. Children keep the relative order of their records in the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tree {
    nodes: Vec<TreeNode>,
    max_depth: usize,
}

impl Tree {
    pub const ROOT: NodeIndex = 0;

    pub fn root(&self) -> &TreeNode {
        &self.nodes[Self::ROOT]
    }

    pub fn node(&self, index: NodeIndex) -> &TreeNode {
        &self.nodes[index]
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn find(&self, id: &str) -> Option<NodeIndex> {
        self.nodes.iter().position(|n| n.id == id)
    }

    /// Indices in post-order (children left to right, then the parent).
    pub fn post_order(&self) -> Vec<NodeIndex> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(NodeIndex, bool)> = vec![(Self::ROOT, false)];
        while let Some((idx, expanded)) = stack.pop() {
            if expanded {
                out.push(idx);
                continue;
            }
            stack.push((idx, true));
            for &child in self.nodes[idx].children.iter().rev() {
                stack.push((child, false));
            }
        }
        out
    }

    /// Depth-first list of descendant words, indented two spaces per level below the root's
    /// children. The root itself is not listed.
    pub fn word_list(&self) -> Vec<String> {
        fn walk(tree: &Tree, idx: NodeIndex, prefix: &str, out: &mut Vec<String>) {
            for &child in &tree.nodes[idx].children {
                out.push(format!("{prefix}{}", tree.nodes[child].word()));
                walk(tree, child, &format!("{prefix}  "), out);
            }
        }

        let mut out = Vec::with_capacity(self.nodes.len().saturating_sub(1));
        walk(self, Self::ROOT, "", &mut out);
        out
    }

    /// Number of descendant words per word length (in characters).
    pub fn length_summary(&self) -> BTreeMap<usize, usize> {
        let mut counts = BTreeMap::new();
        for node in self.nodes.iter().skip(1) {
            *counts.entry(node.word().chars().count()).or_insert(0) += 1;
        }
        counts
    }
}

fn check_id(id: &str) -> Result<(), StructureError> {
    if id.is_empty() || id.split('.').any(str::is_empty) {
        return Err(StructureError::MalformedId { id: id.to_string() });
    }
    Ok(())
}

/// Builds the tree for `records`.
///
/// Returns `Ok(None)` for empty input. Duplicate ids are rejected rather than overwritten, and
/// exactly one dot-free id must exist.
pub fn stratify(records: &[Record]) -> Result<Option<Tree>, StructureError> {
    if records.is_empty() {
        return Ok(None);
    }

    let mut by_id: IndexMap<&str, usize, FxBuildHasher> =
        IndexMap::with_capacity_and_hasher(records.len(), FxBuildHasher);
    let mut root: Option<usize> = None;
    for (i, r) in records.iter().enumerate() {
        check_id(&r.id)?;
        if by_id.insert(r.id.as_str(), i).is_some() {
            return Err(StructureError::DuplicateId { id: r.id.clone() });
        }
        if r.parent_id().is_none() {
            if let Some(first) = root {
                return Err(StructureError::MultipleRoots {
                    first: records[first].id.clone(),
                    second: r.id.clone(),
                });
            }
            root = Some(i);
        }
    }
    let Some(root) = root else {
        return Err(StructureError::NoRoot);
    };

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    for (i, r) in records.iter().enumerate() {
        let Some(parent_id) = r.parent_id() else {
            continue;
        };
        let Some(&parent) = by_id.get(parent_id) else {
            return Err(StructureError::MissingParent {
                id: r.id.clone(),
                parent_id: parent_id.to_string(),
            });
        };
        children[parent].push(i);
    }

    // Lay the arena out in pre-order. Parent ids are strictly shorter than child ids, so the
    // walk terminates and reaches every record once all parents resolve.
    let mut nodes: Vec<TreeNode> = Vec::with_capacity(records.len());
    let mut stack: Vec<(usize, Option<NodeIndex>, usize)> = vec![(root, None, 0)];
    let mut max_depth = 0usize;
    while let Some((rec, parent, depth)) = stack.pop() {
        let idx = nodes.len();
        let record = records[rec].clone();
        nodes.push(TreeNode {
            id: record.id.clone(),
            parent_id: record.parent_id().map(str::to_string),
            parent,
            children: Vec::with_capacity(children[rec].len()),
            depth,
            record,
        });
        if let Some(p) = parent {
            nodes[p].children.push(idx);
        }
        max_depth = max_depth.max(depth);
        for &child in children[rec].iter().rev() {
            stack.push((child, Some(idx), depth + 1));
        }
    }

    tracing::debug!(nodes = nodes.len(), max_depth, "stratified records");
    Ok(Some(Tree { nodes, max_depth }))
}

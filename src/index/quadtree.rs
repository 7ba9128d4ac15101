//! Flattened quadtree node table
//!
//! One row per quadrant, stored as parallel columns. Rows reference children
//! and points by `(offset, length)` instead of pointers:
//! - internal row: `length` children starting at row `offset`
//! - leaf row: `length` points starting at `offset` in the sorted point indices
//!
//! The table is produced by an external index builder; this module only reads
//! and validates it.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::{JoinError, Result};

/// One row of the node table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuadNode {
    pub key: u32,
    pub level: u8,
    pub is_quad: bool,
    pub length: u32,
    pub offset: u32,
}

impl QuadNode {
    pub fn leaf(key: u32, level: u8, offset: u32, length: u32) -> Self {
        Self { key, level, is_quad: false, length, offset }
    }

    pub fn internal(key: u32, level: u8, offset: u32, length: u32) -> Self {
        Self { key, level, is_quad: true, length, offset }
    }

    /// `offset..offset + length` as indices
    #[inline]
    pub fn range(&self) -> Range<usize> {
        let start = self.offset as usize;
        start..start + self.length as usize
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        !self.is_quad
    }
}

/// Columnar quadtree `(key, level, is_quad, length, offset)`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quadtree {
    keys: Vec<u32>,
    levels: Vec<u8>,
    is_quad: Vec<bool>,
    lengths: Vec<u32>,
    offsets: Vec<u32>,
}

impl Quadtree {
    /// Build from the five node-table columns; they must have equal length
    pub fn from_columns(
        keys: Vec<u32>,
        levels: Vec<u8>,
        is_quad: Vec<bool>,
        lengths: Vec<u32>,
        offsets: Vec<u32>,
    ) -> Result<Self> {
        let n = keys.len();
        let lens = [levels.len(), is_quad.len(), lengths.len(), offsets.len()];
        if lens.iter().any(|&len| len != n) {
            return Err(JoinError::structural(format!(
                "quadtree columns have different lengths (key={}, level={}, is_quad={}, length={}, offset={})",
                n, lens[0], lens[1], lens[2], lens[3]
            )));
        }
        if u32::try_from(n).is_err() {
            return Err(JoinError::structural(format!("quadtree has {} rows, more than u32 can address", n)));
        }
        Ok(Self { keys, levels, is_quad, lengths, offsets })
    }

    pub fn from_nodes<I: IntoIterator<Item = QuadNode>>(nodes: I) -> Self {
        let mut tree = Quadtree::default();
        for node in nodes {
            tree.keys.push(node.key);
            tree.levels.push(node.level);
            tree.is_quad.push(node.is_quad);
            tree.lengths.push(node.length);
            tree.offsets.push(node.offset);
        }
        tree
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[inline]
    pub fn node(&self, row: usize) -> QuadNode {
        QuadNode {
            key: self.keys[row],
            level: self.levels[row],
            is_quad: self.is_quad[row],
            length: self.lengths[row],
            offset: self.offsets[row],
        }
    }

    pub fn nodes(&self) -> impl Iterator<Item = QuadNode> + '_ {
        (0..self.len()).map(move |row| self.node(row))
    }

    pub fn keys(&self) -> &[u32] {
        &self.keys
    }

    pub fn levels(&self) -> &[u8] {
        &self.levels
    }

    pub fn is_quad(&self) -> &[bool] {
        &self.is_quad
    }

    pub fn lengths(&self) -> &[u32] {
        &self.lengths
    }

    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    /// Rows at level 0, where traversal starts
    pub fn top_level_rows(&self) -> Vec<u32> {
        self.levels
            .iter()
            .enumerate()
            .filter(|&(_, &level)| level == 0)
            .map(|(row, _)| row as u32)
            .collect()
    }

    /// Rows without children
    pub fn leaf_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.is_quad.iter().enumerate().filter(|&(_, &q)| !q).map(|(row, _)| row)
    }

    /// Deepest level present in the table
    pub fn depth(&self) -> Option<u8> {
        self.levels.iter().copied().max()
    }

    /// Check the table shape.
    ///
    /// Each row is the child of at most one parent. With `max_depth`, internal
    /// rows must also sit above it. Leaf point ranges
    /// are checked separately by [`Quadtree::validate_point_ranges`] because
    /// the point count is not known here.
    pub fn validate(&self, max_depth: Option<u8>) -> Result<()> {
        if self.is_empty() {
            return Err(JoinError::structural("quadtree has no rows"));
        }
        if !self.levels.contains(&0) {
            return Err(JoinError::structural("quadtree has no level-0 rows"));
        }

        let mut claimed = vec![false; self.len()];
        for row in 0..self.len() {
            let node = self.node(row);
            if node.is_leaf() {
                continue;
            }
            if let Some(max_depth) = max_depth {
                if node.level >= max_depth {
                    return Err(JoinError::structural(format!(
                        "internal row {} at level {} but max_depth is {}",
                        row, node.level, max_depth
                    )));
                }
            }
            let children = node.range();
            if children.end > self.len() {
                return Err(JoinError::structural(format!(
                    "internal row {} references children {}..{} beyond {} rows",
                    row,
                    children.start,
                    children.end,
                    self.len()
                )));
            }
            // 子节点层级必须严格递增，否则遍历可能成环
            if let Some(child) = children.clone().find(|&c| self.levels[c] as u16 != node.level as u16 + 1) {
                return Err(JoinError::structural(format!(
                    "row {} at level {} is listed as a child of row {} at level {}",
                    child, self.levels[child], row, node.level
                )));
            }
            // 子节点区间不得重叠，否则同一叶子会被重复展开
            for child in children {
                if std::mem::replace(&mut claimed[child], true) {
                    return Err(JoinError::structural(format!(
                        "row {} is listed as a child of more than one parent (again by row {})",
                        child, row
                    )));
                }
            }
        }
        Ok(())
    }

    /// Every leaf's point range lies within `num_points`
    pub fn validate_point_ranges(&self, num_points: usize) -> Result<()> {
        for row in self.leaf_rows() {
            let points = self.node(row).range();
            if points.end > num_points {
                return Err(JoinError::structural(format!(
                    "leaf row {} owns points {}..{} but only {} points exist",
                    row, points.start, points.end, num_points
                )));
            }
        }
        Ok(())
    }
}

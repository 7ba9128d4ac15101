//! Broad phase: shape bounding boxes x quadtree leaves
//!
//! The traversal is a work list of `(shape, row)` pairs processed one level
//! per wave, starting from every level-0 row. A pair survives when the
//! quadrant box intersects both the shape box and the area of interest;
//! surviving internal rows expand to their children for the next wave and
//! surviving leaves are emitted.

use std::fmt;

use rayon::prelude::*;
use serde::Serialize;

use crate::config::IndexParams;
use crate::index::{QuadrantResolver, Quadtree};
use crate::join::core::{collect_indexed, QuadtreeJoinExecutor};
use crate::join::tables::CandidatePairs;
use crate::types::BoundingBox;
use crate::{JoinError, Result};

/// Counters for one traversal wave
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WaveStats {
    /// Quadtree level visited by this wave
    pub level: u8,
    /// Pairs tested
    pub live_pairs: usize,
    /// Pairs whose quadrant intersected both boxes
    pub survivors: usize,
    /// Surviving pairs on leaves
    pub emitted: usize,
}

impl WaveStats {
    pub fn pruned(&self) -> usize {
        self.live_pairs - self.survivors
    }
}

/// Per-wave statistics of one broad-phase call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BroadPhaseStats {
    pub waves: Vec<WaveStats>,
}

impl BroadPhaseStats {
    pub fn pairs_tested(&self) -> usize {
        self.waves.iter().map(|w| w.live_pairs).sum()
    }

    pub fn pairs_pruned(&self) -> usize {
        self.waves.iter().map(WaveStats::pruned).sum()
    }

    pub fn pairs_emitted(&self) -> usize {
        self.waves.iter().map(|w| w.emitted).sum()
    }
}

impl fmt::Display for BroadPhaseStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for wave in &self.waves {
            writeln!(
                f,
                "level {:>2}: tested={} survived={} emitted={}",
                wave.level, wave.live_pairs, wave.survivors, wave.emitted
            )?;
        }
        write!(
            f,
            "total: tested={} pruned={} emitted={}",
            self.pairs_tested(),
            self.pairs_pruned(),
            self.pairs_emitted()
        )
    }
}

impl QuadtreeJoinExecutor {
    /// Candidate `(shape, leaf)` pairs whose boxes intersect
    pub fn bbox_join(
        &self,
        quadtree: &Quadtree,
        shape_boxes: &[BoundingBox],
        params: &IndexParams,
    ) -> Result<CandidatePairs> {
        self.bbox_join_with_stats(quadtree, shape_boxes, params)
            .map(|(pairs, _)| pairs)
    }

    /// [`bbox_join`](Self::bbox_join) plus per-wave counters.
    ///
    /// Output rows are ordered by shape index, then by level-order traversal.
    pub fn bbox_join_with_stats(
        &self,
        quadtree: &Quadtree,
        shape_boxes: &[BoundingBox],
        params: &IndexParams,
    ) -> Result<(CandidatePairs, BroadPhaseStats)> {
        let params = params.validated()?;
        quadtree.validate(Some(params.max_depth))?;
        if u32::try_from(shape_boxes.len()).is_err() {
            return Err(JoinError::invalid(format!(
                "{} shapes exceed the u32 shape index range",
                shape_boxes.len()
            )));
        }
        let resolver = QuadrantResolver::from_params(&params)?;
        let aoi = params.area_of_interest;

        let inverted = shape_boxes.iter().filter(|b| b.is_inverted()).count();
        if inverted > 0 {
            log::warn!("{} shape boxes are inverted, swapping bounds", inverted);
        }
        let shapes: Vec<BoundingBox> = shape_boxes.iter().map(BoundingBox::normalized).collect();

        let roots = quadtree.top_level_rows();
        let mut work: Vec<(u32, u32)> = Vec::with_capacity(shapes.len() * roots.len());
        for shape in 0..shapes.len() as u32 {
            work.extend(roots.iter().map(|&row| (shape, row)));
        }
        log::debug!(
            "broad phase: {} shapes, {} quadtree rows, {} level-0 quadrants",
            shapes.len(),
            quadtree.len(),
            roots.len()
        );

        let mut stats = BroadPhaseStats::default();
        let mut emitted: Vec<(u32, u32)> = Vec::new();
        let mut level = 0u8;

        while !work.is_empty() {
            let survivors = collect_indexed(&self.execution, work.len(), |i, out| {
                let (shape, row) = work[i];
                let node = quadtree.node(row as usize);
                let quadrant = resolver.quadrant_box(node.key, node.level);
                if quadrant.intersects(&shapes[shape as usize]) && quadrant.intersects(&aoi) {
                    out.push((shape, row));
                }
            });

            let mut wave = WaveStats {
                level,
                live_pairs: work.len(),
                survivors: survivors.len(),
                emitted: 0,
            };

            let (leaves, internal): (Vec<_>, Vec<_>) = survivors
                .into_iter()
                .partition(|&(_, row)| quadtree.node(row as usize).is_leaf());
            wave.emitted = leaves.len();
            emitted.extend(leaves);

            work = collect_indexed(&self.execution, internal.len(), |i, out| {
                let (shape, row) = internal[i];
                let children = quadtree.node(row as usize).range();
                out.extend(children.map(|child| (shape, child as u32)));
            });

            log::trace!(
                "broad phase level {}: tested={} survived={} emitted={} next={}",
                wave.level,
                wave.live_pairs,
                wave.survivors,
                wave.emitted,
                work.len()
            );
            stats.waves.push(wave);
            level = level.saturating_add(1);
        }

        // 稳定排序：同一形状内保留层序
        if self.execution.should_parallelize(emitted.len()) {
            emitted.par_sort_by_key(|&(shape, _)| shape);
        } else {
            emitted.sort_by_key(|&(shape, _)| shape);
        }

        log::debug!(
            "broad phase: {} candidate pairs after {} waves ({} pruned)",
            emitted.len(),
            stats.waves.len(),
            stats.pairs_pruned()
        );
        Ok((emitted.into_iter().collect(), stats))
    }
}

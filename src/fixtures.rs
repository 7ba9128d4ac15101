//! Test-only quadtree builder
//!
//! Points are bucketed on the deepest grid, sorted by Morton key and split
//! top-down while a quadrant holds more than `max_leaf_size` points. Rows are
//! laid out level by level so that every internal row's children are
//! contiguous.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::IndexParams;
use crate::index::{morton, QuadNode, Quadtree};
use crate::types::{BoundingBox, PointColumns};

pub(crate) struct QuadtreeFixture {
    pub quadtree: Quadtree,
    pub params: IndexParams,
    /// Sorted position -> point ordinal
    pub point_indices: Vec<u32>,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

impl QuadtreeFixture {
    pub fn build(xs: Vec<f64>, ys: Vec<f64>, params: IndexParams, max_leaf_size: usize) -> Self {
        let depth = params.max_depth as u32;
        let aoi = params.area_of_interest.normalized();
        let cells = (1u32 << depth) - 1;
        let grid = |v: f64, origin: f64| -> u16 {
            let cell = ((v - origin) / params.scale).floor();
            cell.clamp(0.0, cells as f64) as u16
        };

        let full_keys: Vec<u32> = xs
            .iter()
            .zip(ys.iter())
            .map(|(&x, &y)| morton::encode(grid(x, aoi.min_x), grid(y, aoi.min_y)))
            .collect();
        let mut point_indices: Vec<u32> = (0..xs.len() as u32).collect();
        point_indices.sort_by_key(|&i| (full_keys[i as usize], i));
        let sorted_keys: Vec<u32> = point_indices.iter().map(|&i| full_keys[i as usize]).collect();

        let key_at = |full: u32, level: u32| morton::parent_key(full, depth - 1 - level);
        // (key, start, end) runs of equal level keys within `start..end`
        let runs = |start: usize, end: usize, level: u32| {
            let mut out: Vec<(u32, usize, usize)> = Vec::new();
            for pos in start..end {
                let key = key_at(sorted_keys[pos], level);
                match out.last_mut() {
                    Some(last) if last.0 == key => last.2 = pos + 1,
                    _ => out.push((key, pos, pos + 1)),
                }
            }
            out
        };

        let mut nodes = Vec::new();
        let mut groups = runs(0, sorted_keys.len(), 0);
        let mut level = 0u32;
        while !groups.is_empty() {
            let next_base = nodes.len() + groups.len();
            let mut next = Vec::new();
            for &(key, start, end) in &groups {
                let count = end - start;
                if count > max_leaf_size && level + 1 < depth {
                    let children = runs(start, end, level + 1);
                    nodes.push(QuadNode::internal(
                        key,
                        level as u8,
                        (next_base + next.len()) as u32,
                        children.len() as u32,
                    ));
                    next.extend(children);
                } else {
                    nodes.push(QuadNode::leaf(key, level as u8, start as u32, count as u32));
                }
            }
            groups = next;
            level += 1;
        }

        Self {
            quadtree: Quadtree::from_nodes(nodes),
            params,
            point_indices,
            xs,
            ys,
        }
    }

    /// `n` uniform points in the square `origin + [0, extent)^2`
    pub fn random(
        n: usize,
        x_min: f64,
        y_min: f64,
        extent: f64,
        max_depth: u8,
        max_leaf_size: usize,
        seed: u64,
    ) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let xs = (0..n).map(|_| x_min + rng.gen_range(0.0..extent)).collect();
        let ys = (0..n).map(|_| y_min + rng.gen_range(0.0..extent)).collect();
        let aoi = BoundingBox::new(x_min, y_min, x_min + extent, y_min + extent);
        Self::build(xs, ys, IndexParams::for_area(aoi, max_depth), max_leaf_size)
    }

    /// Random boxes with sides up to `max_size` inside the area of interest
    pub fn random_boxes(&self, n: usize, max_size: f64, seed: u64) -> Vec<BoundingBox> {
        let mut rng = StdRng::seed_from_u64(seed);
        let aoi = self.params.area_of_interest.normalized();
        (0..n)
            .map(|_| {
                let x = rng.gen_range(aoi.min_x..aoi.max_x);
                let y = rng.gen_range(aoi.min_y..aoi.max_y);
                let w = rng.gen_range(0.0..max_size);
                let h = rng.gen_range(0.0..max_size);
                BoundingBox::new(x, y, x + w, y + h)
            })
            .collect()
    }

    pub fn points(&self) -> PointColumns<'_, f64> {
        PointColumns::new(&self.point_indices, &self.xs, &self.ys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_built_tree_is_valid() {
        let fixture = QuadtreeFixture::random(1_000, -10.0, 5.0, 50.0, 7, 12, 3);
        let tree = &fixture.quadtree;
        tree.validate(Some(7)).unwrap();
        tree.validate_point_ranges(1_000).unwrap();
        fixture.points().validate().unwrap();

        // every point is owned by exactly one leaf
        let owned: usize = tree.leaf_rows().map(|row| tree.node(row).length as usize).sum();
        assert_eq!(owned, 1_000);
        assert!(tree.depth().unwrap() > 0);
    }

    #[test]
    fn test_leaf_boxes_contain_their_points() {
        let fixture = QuadtreeFixture::random(500, 0.0, 0.0, 32.0, 5, 4, 9);
        let resolver = crate::index::QuadrantResolver::from_params(&fixture.params).unwrap();
        let points = fixture.points();
        for row in fixture.quadtree.leaf_rows() {
            let node = fixture.quadtree.node(row);
            let bbox = resolver.quadrant_box(node.key, node.level);
            for pos in node.range() {
                let (x, y) = points.coords(pos);
                assert!(bbox.contains(&crate::types::Point::new(x, y)));
            }
        }
    }

    #[test]
    fn test_small_leaf_size_stops_at_max_depth() {
        // all points in one deepest cell cannot be split further
        let xs = vec![0.25; 10];
        let ys = vec![0.25; 10];
        let params = IndexParams::new(BoundingBox::new(0.0, 0.0, 8.0, 8.0), 1.0, 3);
        let fixture = QuadtreeFixture::build(xs, ys, params, 1);
        assert_eq!(fixture.quadtree.depth(), Some(2));
        fixture.quadtree.validate(Some(3)).unwrap();
    }
}

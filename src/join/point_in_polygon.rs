//! Narrow phase: exact point-in-polygon test over candidate pairs

use crate::geometry::point_in_polygon;
use crate::index::Quadtree;
use crate::join::core::{collect_indexed, QuadtreeJoinExecutor};
use crate::join::tables::{CandidatePairs, PointInPolygonResult};
use crate::types::{CoordFloat, PointColumns, PolygonColumns};
use crate::Result;

impl QuadtreeJoinExecutor {
    /// `(polygon_index, point_index)` for every point of a candidate leaf that
    /// lies inside the paired polygon.
    ///
    /// All inputs are validated before any work starts. Rows follow the pair
    /// order, then the leaf's point order; `point_index` is the original point
    /// ordinal (`points.indices[pos]`).
    pub fn point_in_polygon<T: CoordFloat>(
        &self,
        pairs: &CandidatePairs,
        quadtree: &Quadtree,
        points: &PointColumns<'_, T>,
        polygons: &PolygonColumns<'_, T>,
    ) -> Result<PointInPolygonResult> {
        points.validate()?;
        polygons.validate()?;
        quadtree.validate(None)?;
        quadtree.validate_point_ranges(points.len())?;
        pairs.validate(quadtree, polygons.num_polygons())?;

        log::debug!(
            "point-in-polygon: {} pairs, {} points, {} polygons",
            pairs.len(),
            points.len(),
            polygons.num_polygons()
        );

        let rows = collect_indexed(&self.execution, pairs.len(), |i, out| {
            let (poly, quad) = pairs.get(i);
            for pos in quadtree.node(quad as usize).range() {
                let (px, py) = points.coords(pos);
                if point_in_polygon(px, py, polygons.polygon_rings(poly as usize)) {
                    out.push((poly, points.ordinal(pos)));
                }
            }
        });

        log::debug!("point-in-polygon: {} containments", rows.len());
        Ok(rows.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ExecutionConfig, IndexParams};
    use crate::fixtures::QuadtreeFixture;
    use crate::index::QuadNode;
    use crate::types::{BoundingBox, Point};

    /// square [(0,0),(0,10),(10,10),(10,0)] with hole [(4,4),(4,6),(6,6),(6,4)]
    const POLY_X: [f64; 8] = [0.0, 0.0, 10.0, 10.0, 4.0, 4.0, 6.0, 6.0];
    const POLY_Y: [f64; 8] = [0.0, 10.0, 10.0, 0.0, 4.0, 6.0, 6.0, 4.0];

    /// One leaf holding every point
    fn single_leaf(n: u32) -> Quadtree {
        Quadtree::from_nodes([QuadNode::leaf(0, 0, 0, n)])
    }

    #[test]
    fn test_square_contains_inner_point_only() {
        let xs = [5.0, 15.0];
        let ys = [5.0, 5.0];
        let points = PointColumns::new(&[0, 1], &xs, &ys);
        let polygons = PolygonColumns::new(&[0, 1], &[0, 4], &POLY_X[..4], &POLY_Y[..4]);
        let pairs: CandidatePairs = [(0, 0)].into_iter().collect();

        let result = QuadtreeJoinExecutor::sequential()
            .point_in_polygon(&pairs, &single_leaf(2), &points, &polygons)
            .unwrap();
        assert_eq!(result.iter().collect::<Vec<_>>(), vec![(0, 0)]);
    }

    #[test]
    fn test_hole_excludes_points() {
        let xs = [5.0, 1.0];
        let ys = [5.0, 1.0];
        let points = PointColumns::new(&[0, 1], &xs, &ys);
        let polygons = PolygonColumns::new(&[0, 2], &[0, 4, 8], &POLY_X, &POLY_Y);
        let pairs: CandidatePairs = [(0, 0)].into_iter().collect();

        let result = QuadtreeJoinExecutor::sequential()
            .point_in_polygon(&pairs, &single_leaf(2), &points, &polygons)
            .unwrap();
        assert_eq!(result.iter().collect::<Vec<_>>(), vec![(0, 1)]);
    }

    #[test]
    fn test_reports_original_ordinals() {
        // sorted order differs from input order
        let xs = [50.0, 5.0, 2.0];
        let ys = [50.0, 5.0, 2.0];
        let points = PointColumns::new(&[2, 0, 1], &xs, &ys);
        let polygons = PolygonColumns::new(&[0, 1], &[0, 4], &POLY_X[..4], &POLY_Y[..4]);
        let tree = Quadtree::from_nodes([
            QuadNode::internal(0, 0, 1, 2),
            QuadNode::leaf(0, 1, 0, 1),
            QuadNode::leaf(3, 1, 1, 2),
        ]);
        let pairs: CandidatePairs = [(0, 1), (0, 2)].into_iter().collect();

        let result = QuadtreeJoinExecutor::sequential()
            .point_in_polygon(&pairs, &tree, &points, &polygons)
            .unwrap();
        assert_eq!(result.iter().collect::<Vec<_>>(), vec![(0, 2), (0, 1)]);
    }

    #[test]
    fn test_float32_coordinates() {
        let xs = [5.0f32, 15.0];
        let ys = [5.0f32, 5.0];
        let poly_x = [0.0f32, 0.0, 10.0, 10.0];
        let poly_y = [0.0f32, 10.0, 10.0, 0.0];
        let points = PointColumns::new(&[0, 1], &xs, &ys);
        let polygons = PolygonColumns::new(&[0, 1], &[0, 4], &poly_x, &poly_y);
        let pairs: CandidatePairs = [(0, 0)].into_iter().collect();

        let result = QuadtreeJoinExecutor::default()
            .point_in_polygon(&pairs, &single_leaf(2), &points, &polygons)
            .unwrap();
        assert_eq!(result.point_indices, vec![0]);
    }

    #[test]
    fn test_validation_runs_before_work() {
        let xs = [5.0, 15.0];
        let ys = [5.0, 5.0];
        let executor = QuadtreeJoinExecutor::sequential();
        let polygons = PolygonColumns::new(&[0, 1], &[0, 4], &POLY_X[..4], &POLY_Y[..4]);
        let pairs: CandidatePairs = [(0, 0)].into_iter().collect();

        // point index count differs from the coordinate count
        let short = PointColumns::new(&[0], &xs, &ys);
        let err = executor.point_in_polygon(&pairs, &single_leaf(1), &short, &polygons).unwrap_err();
        assert!(err.is_input_contract());

        // leaf owns more points than exist
        let points = PointColumns::new(&[0, 1], &xs, &ys);
        let err = executor.point_in_polygon(&pairs, &single_leaf(3), &points, &polygons).unwrap_err();
        assert!(err.is_structural());

        // pair references a missing polygon
        let bad_pairs: CandidatePairs = [(1, 0)].into_iter().collect();
        let err = executor.point_in_polygon(&bad_pairs, &single_leaf(2), &points, &polygons).unwrap_err();
        assert!(err.is_structural());

        // ring with two vertices
        let degenerate = PolygonColumns::new(&[0, 1], &[0, 2], &POLY_X[..2], &POLY_Y[..2]);
        let err = executor.point_in_polygon(&pairs, &single_leaf(2), &points, &degenerate).unwrap_err();
        assert!(err.is_input_contract());
    }

    #[test]
    fn test_matches_brute_force_after_broad_phase() {
        let fixture = QuadtreeFixture::random(3_000, 0.0, 0.0, 100.0, 8, 20, 21);
        // two triangles and a square with a hole
        let poly_x = [
            10.0, 40.0, 25.0, //
            60.0, 95.0, 95.0, //
            20.0, 20.0, 80.0, 80.0, 40.0, 40.0, 60.0, 60.0,
        ];
        let poly_y = [
            10.0, 10.0, 45.0, //
            55.0, 55.0, 90.0, //
            50.0, 98.0, 98.0, 50.0, 60.0, 80.0, 80.0, 60.0,
        ];
        let polygons = PolygonColumns::new(&[0, 1, 2, 4], &[0, 3, 6, 10, 14], &poly_x, &poly_y);
        let boxes: Vec<BoundingBox> = (0..3)
            .map(|p| {
                let ring = polygons.ring(polygons.rings(p).start);
                BoundingBox::from_vertices(ring.xs, ring.ys).unwrap()
            })
            .collect();

        let executor = QuadtreeJoinExecutor::new(ExecutionConfig::always_parallel());
        let pairs = executor.bbox_join(&fixture.quadtree, &boxes, &fixture.params).unwrap();
        let points = fixture.points();
        let result = executor
            .point_in_polygon(&pairs, &fixture.quadtree, &points, &polygons)
            .unwrap();

        let mut expected = Vec::new();
        for poly in 0..3u32 {
            for i in 0..fixture.xs.len() {
                if point_in_polygon(fixture.xs[i], fixture.ys[i], polygons.polygon_rings(poly as usize)) {
                    expected.push((poly, i as u32));
                }
            }
        }
        assert!(!expected.is_empty());
        assert_eq!(result.sorted(), expected);

        let sequential = QuadtreeJoinExecutor::sequential()
            .point_in_polygon(&pairs, &fixture.quadtree, &points, &polygons)
            .unwrap();
        assert_eq!(sequential, result);
    }

    #[test]
    fn test_box_touching_edge_point() {
        // point on the polygon's left edge sits in a leaf touching the polygon box
        let params = IndexParams::new(BoundingBox::new(0.0, 0.0, 16.0, 16.0), 1.0, 4);
        let fixture = QuadtreeFixture::build(vec![0.0, 3.0], vec![5.0, 5.0], params, 1);
        let polygons = PolygonColumns::new(&[0, 1], &[0, 4], &POLY_X[..4], &POLY_Y[..4]);
        let square = BoundingBox::from_vertices(&POLY_X[..4], &POLY_Y[..4]).unwrap();
        assert!(square.contains(&Point::new(0.0, 5.0)));

        let executor = QuadtreeJoinExecutor::sequential();
        let pairs = executor.bbox_join(&fixture.quadtree, &[square], &fixture.params).unwrap();
        let result = executor
            .point_in_polygon(&pairs, &fixture.quadtree, &fixture.points(), &polygons)
            .unwrap();
        assert_eq!(result.sorted(), vec![(0, 0), (0, 1)]);
    }
}

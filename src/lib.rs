//! quadjoin: quadtree-accelerated spatial joins
//!
//! 点与多边形/折线的空间连接，基于预先构建的扁平化四叉树
//!
//! ## 流程
//! - 粗筛 (broad phase): 形状包围盒 × 四叉树叶子象限，逐层波次遍历并剪枝
//! - 精筛 (narrow phase): 点在多边形内判定，或点到最近折线的距离
//!
//! ## 模块
//! - `index`: Morton 编码、象限几何、四叉树节点表
//! - `geometry` / `distance`: 包围盒相交、射线法包含判定、点线距离
//! - `join`: 粗筛与精筛引擎（rayon 并行）
//! - `config`: 索引参数与执行配置
//!
//! ```ignore
//! let pairs = quadjoin::quad_bbox_join(&quadtree, &shape_boxes, aoi, scale, max_depth)?;
//! let inside = quadjoin::quadtree_point_in_polygon(
//!     &pairs, &quadtree, &point_indices, &xs, &ys,
//!     &poly_offsets, &ring_offsets, &poly_xs, &poly_ys,
//! )?;
//! ```

pub mod config;
pub mod distance;
pub mod geometry;
pub mod index;
pub mod join;
pub mod types;

mod error;

#[cfg(test)]
mod fixtures;

pub use config::{ExecutionConfig, IndexParams, JoinConfig};
pub use error::{JoinError, Result};

pub use index::{QuadNode, QuadrantResolver, Quadtree};
pub use join::{
    quad_bbox_join, quad_bbox_join_with_stats, quadtree_point_in_polygon,
    quadtree_point_to_nearest_polyline, BroadPhaseStats, CandidatePairs, NearestPolylineResult,
    NearestPolylineTable, PointInPolygonResult, QuadtreeJoinExecutor,
};
pub use types::{BoundingBox, CoordColumn, CoordFloat, Point};

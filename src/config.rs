//! Join configuration
//!
//! Index parameters describe how the quadtree was built (area of interest,
//! scale, depth); execution settings control how the engines schedule work.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::index::quadrant::{validate_max_depth, validate_scale, MAX_DEPTH_LIMIT};
use crate::types::BoundingBox;
use crate::{JoinError, Result};

/// 四叉树构建参数
///
/// 必须与构建索引时使用的参数一致，否则象限框会错位。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexParams {
    /// 索引覆盖区域，左下角为网格原点
    pub area_of_interest: BoundingBox,

    /// 最深层网格单元的边长
    pub scale: f64,

    /// 树的层数，取值 [1, 15]
    pub max_depth: u8,
}

impl Default for IndexParams {
    fn default() -> Self {
        // 经纬度全球范围，15 层刚好覆盖 360 度
        Self::for_area(BoundingBox::new(-180.0, -90.0, 180.0, 90.0), MAX_DEPTH_LIMIT)
    }
}

impl IndexParams {
    pub fn new(area_of_interest: BoundingBox, scale: f64, max_depth: u8) -> Self {
        Self { area_of_interest, scale, max_depth }
    }

    /// Pick the scale so that `max_depth` levels span the wider side of the area
    pub fn for_area(area_of_interest: BoundingBox, max_depth: u8) -> Self {
        let aoi = area_of_interest.normalized();
        let extent = aoi.width().max(aoi.height());
        let cells = 2f64.powi(max_depth as i32);
        Self { area_of_interest, scale: extent / cells, max_depth }
    }

    /// Checked copy with the area of interest normalized.
    ///
    /// An inverted area is swapped and logged; NaN bounds, a non-positive scale
    /// or a depth outside `[1, 15]` are rejected.
    pub fn validated(&self) -> Result<IndexParams> {
        validate_scale(self.scale)?;
        validate_max_depth(self.max_depth)?;

        let aoi = self.area_of_interest;
        if aoi.is_inverted() {
            log::warn!("area of interest {:?} is inverted, swapping bounds", aoi);
        }
        let aoi = aoi.normalized();
        if !aoi.is_valid() {
            return Err(JoinError::invalid(format!(
                "area of interest {:?} has non-finite bounds",
                self.area_of_interest
            )));
        }
        Ok(Self { area_of_interest: aoi, ..*self })
    }
}

/// 执行配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// 是否使用 rayon 并行
    pub parallel: bool,

    /// 工作量低于该值时串行执行（避免线程调度开销）
    pub min_parallel_batch: usize,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            min_parallel_batch: 1024,
        }
    }
}

impl ExecutionConfig {
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Default::default()
        }
    }

    /// Parallel with no size threshold
    pub fn always_parallel() -> Self {
        Self {
            parallel: true,
            min_parallel_batch: 0,
        }
    }

    #[inline]
    pub fn should_parallelize(&self, work_items: usize) -> bool {
        self.parallel && work_items >= self.min_parallel_batch
    }
}

/// 空间连接配置
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinConfig {
    pub index: IndexParams,
    pub execution: ExecutionConfig,
}

impl JoinConfig {
    pub fn new(index: IndexParams) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    /// 测试用配置：串行执行，结果便于逐步调试
    pub fn for_testing() -> Self {
        Self {
            execution: ExecutionConfig::sequential(),
            ..Default::default()
        }
    }

    /// 大批量场景：任何规模都走并行
    pub fn for_high_throughput() -> Self {
        Self {
            execution: ExecutionConfig::always_parallel(),
            ..Default::default()
        }
    }

    pub fn with_index(mut self, index: IndexParams) -> Self {
        self.index = index;
        self
    }

    pub fn with_area_of_interest(mut self, area_of_interest: BoundingBox) -> Self {
        self.index.area_of_interest = area_of_interest;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.index.scale = scale;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u8) -> Self {
        self.index.max_depth = max_depth;
        self
    }

    pub fn with_execution(mut self, execution: ExecutionConfig) -> Self {
        self.execution = execution;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.index.validated().map(|_| ())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: JoinConfig = serde_json::from_str(json)?;
        config.validate().map_err(|e| JoinError::Config(e.to_string()))?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

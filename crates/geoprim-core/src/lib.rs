//! geoprim 核心几何内核
//!
//! 提供2D/3D点、直线、射线、线段、平面之间的距离、投影、相交与姿态查询。
//! 所有查询都是无状态的纯函数，可以在任意线程并发调用。
//!
//! # 约定
//!
//! - 输入退化（零长度方向、重合的点）时退化为低维公式，不报错
//! - 无解（平行、不相交）用 `None`/`false` 表示
//! - 参数非法（容差越界、尺寸非正）返回 [`GeometryError`]
//!
//! # 示例
//!
//! ```rust
//! use geoprim_core::prelude::*;
//!
//! // 点到线段的距离
//! let segment = Segment2::new(Point2::new(4.0, 2.0), Point2::new(10.0, 10.0));
//! let distance = segment.distance_to_point(&Point2::new(10.0, 2.0));
//! assert!((distance - 4.8).abs() < 1e-12);
//!
//! // 两条线段的交点
//! let hit = intersection_between_two_segments2(
//!     &Point2::new(0.0, 0.0),
//!     &Point2::new(2.0, 2.0),
//!     &Point2::new(0.0, 2.0),
//!     &Point2::new(2.0, 0.0),
//! )
//! .unwrap();
//! assert!(points_approx_eq(&hit, &Point2::new(1.0, 1.0)));
//! ```

pub mod config;
pub mod error;
pub mod math;
pub mod metrics;
pub mod primitives;
pub mod relations;
pub mod shape;
pub mod tools;
pub mod transform;

pub use error::{GeometryError, Result};

pub mod prelude {
    //! 常用类型与查询的便捷导入
    pub use crate::config::Tolerances;
    pub use crate::error::{GeometryError, Result};
    pub use crate::math::{
        approx_eq, points3_approx_eq, points_approx_eq, BoundingBox2, BoundingBox3, Point2, Point3, UnitQuaternion, UnitVector3, Vector2, Vector3,
        EPSILON, ONE_MILLIONTH, ONE_TEN_MILLIONTH, ONE_TRILLIONTH,
    };
    pub use crate::metrics::*;
    pub use crate::primitives::{Line, Line2, Line3, Plane3, Ray, Ray2, Ray3, Segment, Segment2, Segment3};
    pub use crate::relations::*;
    pub use crate::shape::*;
    pub use crate::tools::*;
    pub use crate::transform::RigidTransform3;
}

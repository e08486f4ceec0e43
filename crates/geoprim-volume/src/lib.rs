//! geoprim 体积相交查询
//!
//! 直线、射线、线段与轴对齐包围盒、定向盒、圆柱、椭球的相交，以及点与这些体的
//! 包含、距离、投影查询。
//!
//! # 架构设计
//!
//! 每种体只实现一个规范查询 [`LinearIntersection::line_parameters`]：无限直线与体表面
//! 交点的参数。射线、线段与仅计数的变体都由它裁剪参数域得到，因此计数变体与完整查询
//! 报告的数量总是一致。
//!
//! # 示例
//!
//! ```rust
//! use geoprim_volume::prelude::*;
//!
//! let cylinder = Cylinder3::new(2.0, 0.5, Point3::origin(), Vector3::z()).unwrap();
//! let hits = cylinder.intersection_with_line(&Point3::new(0.1, 0.0, -5.0), &Vector3::z());
//! assert_eq!(hits.count(), 2);
//! ```

pub mod aabb;
pub mod cylinder;
pub mod ellipsoid;
pub mod intersections;
pub mod oriented_box;
pub mod volume;

use geoprim_core::math::{BoundingBox3, Point3, ONE_TRILLIONTH};
use intersections::Intersections;
use nalgebra::{Point, SVector};

/// 参数化直线 `P + t·d` 的参数域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extent {
    /// `t ∈ (-∞, +∞)`
    Line,
    /// `t ∈ [0, +∞)`
    Ray,
    /// `t ∈ [0, 1]`，`d` 为终点减起点
    Segment,
}

impl Extent {
    /// 参数是否落在参数域内，端点处放宽 `ONE_TRILLIONTH`
    pub fn contains(self, t: f64) -> bool {
        match self {
            Extent::Line => t.is_finite(),
            Extent::Ray => t >= -ONE_TRILLIONTH,
            Extent::Segment => (-ONE_TRILLIONTH..=1.0 + ONE_TRILLIONTH).contains(&t),
        }
    }
}

/// 直线/射线/线段与体的相交
///
/// 实现者只需给出 [`line_parameters`](Self::line_parameters)，其余方法由它派生。
pub trait LinearIntersection<const D: usize> {
    /// 无限直线与体表面交点的参数，升序，至多两个
    ///
    /// 方向退化时没有交点。
    fn line_parameters(&self, point: &Point<f64, D>, direction: &SVector<f64, D>) -> Intersections<f64>;

    /// 落在参数域内的交点参数
    fn parameters(&self, point: &Point<f64, D>, direction: &SVector<f64, D>, extent: Extent) -> Intersections<f64> {
        self.line_parameters(point, direction)
            .filter(|t| extent.contains(*t))
    }

    fn intersection_with_line(&self, point: &Point<f64, D>, direction: &SVector<f64, D>) -> Intersections<Point<f64, D>> {
        self.parameters(point, direction, Extent::Line)
            .map(|t| point + direction * t)
    }

    fn intersection_with_ray(&self, origin: &Point<f64, D>, direction: &SVector<f64, D>) -> Intersections<Point<f64, D>> {
        self.parameters(origin, direction, Extent::Ray)
            .map(|t| origin + direction * t)
    }

    fn intersection_with_segment(&self, start: &Point<f64, D>, end: &Point<f64, D>) -> Intersections<Point<f64, D>> {
        let direction = end - start;
        self.parameters(start, &direction, Extent::Segment)
            .map(|t| start + direction * t)
    }

    fn count_intersections_with_line(&self, point: &Point<f64, D>, direction: &SVector<f64, D>) -> usize {
        self.parameters(point, direction, Extent::Line).count()
    }

    fn count_intersections_with_ray(&self, origin: &Point<f64, D>, direction: &SVector<f64, D>) -> usize {
        self.parameters(origin, direction, Extent::Ray).count()
    }

    fn count_intersections_with_segment(&self, start: &Point<f64, D>, end: &Point<f64, D>) -> usize {
        self.parameters(start, &(end - start), Extent::Segment).count()
    }

    fn does_line_intersect(&self, point: &Point<f64, D>, direction: &SVector<f64, D>) -> bool {
        self.count_intersections_with_line(point, direction) > 0
    }

    fn does_ray_intersect(&self, origin: &Point<f64, D>, direction: &SVector<f64, D>) -> bool {
        self.count_intersections_with_ray(origin, direction) > 0
    }

    fn does_segment_intersect(&self, start: &Point<f64, D>, end: &Point<f64, D>) -> bool {
        self.count_intersections_with_segment(start, end) > 0
    }
}

/// 点与实心体的查询
pub trait PointQuery {
    /// 点是否在体内或表面上，`epsilon` 向外放宽
    fn contains_point(&self, query: &Point3, epsilon: f64) -> bool;

    /// 有向距离，体外为正，体内为负
    fn signed_distance(&self, query: &Point3) -> f64;

    /// 体表面上离外部点最近的点，点在体内时返回 `None`
    fn orthogonal_projection(&self, query: &Point3) -> Option<Point3>;

    /// 世界坐标下的轴对齐包围盒
    fn bounding_box(&self) -> BoundingBox3;
}

/// 解 `a·t² + b·t + c = 0`，返回升序实根
///
/// 判别式的绝对值相对 `b²` 可忽略时视为相切，只返回一个根。`a` 为零时无解，
/// 退化方向由调用方按自身尺度判断。
pub(crate) fn solve_quadratic(a: f64, b: f64, c: f64) -> Intersections<f64> {
    if a == 0.0 || !a.is_finite() {
        return Intersections::none();
    }
    let discriminant = b * b - 4.0 * a * c;
    let tolerance = ONE_TRILLIONTH * b * b;
    if discriminant < -tolerance {
        return Intersections::none();
    }
    if discriminant <= tolerance {
        return Intersections::one(-b / (2.0 * a));
    }
    let root = discriminant.sqrt();
    let (first, second) = ((-b - root) / (2.0 * a), (-b + root) / (2.0 * a));
    if first <= second {
        Intersections::two(first, second)
    } else {
        Intersections::two(second, first)
    }
}

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::cylinder::Cylinder3;
    pub use crate::ellipsoid::Ellipsoid3;
    pub use crate::intersections::Intersections;
    pub use crate::oriented_box::OrientedBox3;
    pub use crate::volume::Volume;
    pub use crate::{Extent, LinearIntersection, PointQuery};
    pub use geoprim_core::math::{BoundingBox2, BoundingBox3, Point2, Point3, Vector2, Vector3};
    pub use geoprim_core::transform::RigidTransform3;
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoprim_core::math::approx_eq;

    #[test]
    fn test_extent() {
        assert!(Extent::Line.contains(-1e9));
        assert!(!Extent::Line.contains(f64::NAN));
        assert!(Extent::Ray.contains(0.0));
        assert!(!Extent::Ray.contains(-0.1));
        assert!(Extent::Segment.contains(1.0));
        assert!(!Extent::Segment.contains(1.1));
    }

    #[test]
    fn test_quadratic() {
        let roots = solve_quadratic(1.0, 0.0, -4.0);
        assert_eq!(roots.slots(), [Some(-2.0), Some(2.0)]);

        let roots = solve_quadratic(-1.0, 0.0, 4.0);
        assert_eq!(roots.slots(), [Some(-2.0), Some(2.0)]);

        let tangent = solve_quadratic(1.0, -2.0, 1.0);
        assert_eq!(tangent.slots(), [Some(1.0), None]);

        assert!(solve_quadratic(1.0, 0.0, 1.0).is_empty());
        assert!(solve_quadratic(0.0, 1.0, 1.0).is_empty());

        // 小的首项系数不被当作退化
        let small = solve_quadratic(1e-14, 0.0, -1e-14);
        assert_eq!(small.count(), 2);
        assert!(approx_eq(small.first().unwrap(), -1.0));
        assert!(approx_eq(small.second().unwrap(), 1.0));
    }
}

//! 几何图元值类型
//!
//! 直线、线段、射线、平面的轻量包装。所有方法都委托给各查询族的自由函数，
//! 需要容差的方法接受 [`Tolerances`]。

use crate::config::Tolerances;
use crate::error::Result;
use crate::math::{Point2, Point3, Vector2, Vector3, ONE_TRILLIONTH};
use crate::relations::{self, ClosestPoints};
use crate::{metrics, tools};
use nalgebra::{Point, SVector};
use serde::{Deserialize, Serialize};

// ========== 直线 (Line) ==========

/// 直线：直线上一点与方向（方向无需单位化）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line<const D: usize> {
    pub point: Point<f64, D>,
    pub direction: SVector<f64, D>,
}

/// 2D直线
pub type Line2 = Line<2>;

/// 3D直线
pub type Line3 = Line<3>;

impl<const D: usize> Line<D> {
    pub fn new(point: Point<f64, D>, direction: SVector<f64, D>) -> Self {
        Self { point, direction }
    }

    /// 经过两点的直线，方向从 `first` 指向 `second`
    pub fn from_points(first: Point<f64, D>, second: Point<f64, D>) -> Self {
        Self::new(first, second - first)
    }

    /// 方向向量是否退化
    pub fn is_degenerate(&self) -> bool {
        self.direction.norm() < ONE_TRILLIONTH
    }

    /// 参数 `t` 处的点
    pub fn point_at(&self, t: f64) -> Point<f64, D> {
        self.point + self.direction * t
    }

    /// 查询点投影的参数
    pub fn parameter_of(&self, query: &Point<f64, D>) -> f64 {
        tools::percentage_along_line(query, &self.point, &self.direction)
    }

    /// 点到直线的距离
    pub fn distance_to_point(&self, query: &Point<f64, D>) -> f64 {
        metrics::distance_from_point_to_line(query, &self.point, &self.direction)
    }

    /// 点在直线上的正交投影
    pub fn project(&self, query: &Point<f64, D>) -> Option<Point<f64, D>> {
        metrics::orthogonal_projection_on_line(query, &self.point, &self.direction)
    }

    pub fn is_parallel_to(&self, other: &Self, tolerances: &Tolerances) -> Result<bool> {
        relations::are_vectors_parallel(&self.direction, &other.direction, tolerances.angle_epsilon)
    }

    pub fn is_collinear_with(&self, other: &Self, tolerances: &Tolerances) -> Result<bool> {
        relations::are_lines_collinear(
            &self.point,
            &self.direction,
            &other.point,
            &other.direction,
            tolerances.angle_epsilon,
            tolerances.distance_epsilon,
        )
    }

    /// 与另一条直线的最近点
    pub fn closest_points(&self, other: &Self) -> ClosestPoints<D> {
        relations::closest_points_between_two_lines(&self.point, &self.direction, &other.point, &other.direction)
    }

    /// 与另一条直线的距离
    pub fn distance_to_line(&self, other: &Self) -> f64 {
        self.closest_points(other).distance
    }
}

impl Line2 {
    /// 点到直线的有向距离，左侧为正
    pub fn signed_distance_to_point(&self, query: &Point2) -> f64 {
        metrics::signed_distance_from_point2_to_line2(query, &self.point, &self.direction)
    }

    pub fn is_point_on_left_side(&self, query: &Point2) -> bool {
        metrics::is_point2_on_side_of_line2(query, &self.point, &self.direction, true)
    }

    pub fn is_point_on_right_side(&self, query: &Point2) -> bool {
        metrics::is_point2_on_side_of_line2(query, &self.point, &self.direction, false)
    }

    pub fn contains(&self, query: &Point2, tolerances: &Tolerances) -> bool {
        metrics::is_point2_on_line2(query, &self.point, &self.direction, tolerances.on_line_epsilon)
    }

    pub fn intersection_with_line(&self, other: &Line2) -> Option<Point2> {
        relations::intersection_between_two_lines2(&self.point, &self.direction, &other.point, &other.direction)
    }

    pub fn intersection_with_segment(&self, segment: &Segment2) -> Option<Point2> {
        relations::intersection_between_line2_and_segment2(
            &self.point,
            &self.direction,
            &segment.start,
            &segment.end,
        )
    }

    /// 与另一条直线的内角平分线
    pub fn interior_bisector(&self, other: &Line2) -> Option<Line2> {
        relations::interior_bisector_of_two_lines2(&self.point, &self.direction, &other.point, &other.direction)
            .map(|(point, direction)| Line2::new(point, direction))
    }

    /// 逆时针旋转 90° 的方向
    pub fn perpendicular_direction(&self) -> Vector2 {
        tools::perpendicular_vector2(&self.direction)
    }
}

impl Line3 {
    pub fn intersection_with_plane(&self, plane: &Plane3) -> Option<Point3> {
        relations::intersection_between_line3_and_plane(&plane.point, &plane.normal, &self.point, &self.direction)
    }
}

// ========== 线段 (Segment) ==========

/// 线段：起点与终点，起点等于终点时为零长度线段
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment<const D: usize> {
    pub start: Point<f64, D>,
    pub end: Point<f64, D>,
}

/// 2D线段
pub type Segment2 = Segment<2>;

/// 3D线段
pub type Segment3 = Segment<3>;

impl<const D: usize> Segment<D> {
    pub fn new(start: Point<f64, D>, end: Point<f64, D>) -> Self {
        Self { start, end }
    }

    /// 从起点指向终点的向量
    pub fn direction(&self) -> SVector<f64, D> {
        self.end - self.start
    }

    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    pub fn midpoint(&self) -> Point<f64, D> {
        tools::average_two_points(&self.start, &self.end)
    }

    /// 参数 `t` 处的点，0 为起点，1 为终点
    pub fn point_at(&self, t: f64) -> Point<f64, D> {
        self.start + self.direction() * t
    }

    /// 交换起点与终点
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }

    /// 支撑线
    pub fn support_line(&self) -> Line<D> {
        Line::from_points(self.start, self.end)
    }

    /// 查询点投影的参数（不截断）
    pub fn parameter_of(&self, query: &Point<f64, D>) -> f64 {
        tools::percentage_along_segment(query, &self.start, &self.end)
    }

    pub fn distance_to_point(&self, query: &Point<f64, D>) -> f64 {
        metrics::distance_from_point_to_segment(query, &self.start, &self.end)
    }

    /// 线段上离查询点最近的点
    pub fn project(&self, query: &Point<f64, D>) -> Point<f64, D> {
        metrics::orthogonal_projection_on_segment(query, &self.start, &self.end)
    }

    pub fn closest_points(&self, other: &Self) -> ClosestPoints<D> {
        relations::closest_points_between_two_segments(&self.start, &self.end, &other.start, &other.end)
    }

    pub fn distance_to_segment(&self, other: &Self) -> f64 {
        self.closest_points(other).distance
    }
}

impl Segment2 {
    pub fn intersection_with_segment(&self, other: &Segment2) -> Option<Point2> {
        relations::intersection_between_two_segments2(&self.start, &self.end, &other.start, &other.end)
    }

    pub fn intersects_segment(&self, other: &Segment2) -> bool {
        relations::do_segments2_intersect(&self.start, &self.end, &other.start, &other.end)
    }
}

impl Segment3 {
    pub fn intersection_with_plane(&self, plane: &Plane3) -> Option<Point3> {
        relations::intersection_between_segment3_and_plane(&plane.point, &plane.normal, &self.start, &self.end)
    }

    /// 两端点是否严格位于平面两侧
    pub fn crosses_plane(&self, plane: &Plane3) -> bool {
        relations::does_segment3_intersect_plane(&plane.point, &plane.normal, &self.start, &self.end)
    }
}

// ========== 射线 (Ray) ==========

/// 射线：起点与方向，参数域 `t >= 0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray<const D: usize> {
    pub origin: Point<f64, D>,
    pub direction: SVector<f64, D>,
}

/// 2D射线
pub type Ray2 = Ray<2>;

/// 3D射线
pub type Ray3 = Ray<3>;

impl<const D: usize> Ray<D> {
    pub fn new(origin: Point<f64, D>, direction: SVector<f64, D>) -> Self {
        Self { origin, direction }
    }

    pub fn point_at(&self, t: f64) -> Point<f64, D> {
        self.origin + self.direction * t
    }

    pub fn distance_to_point(&self, query: &Point<f64, D>) -> f64 {
        metrics::distance_from_point_to_ray(query, &self.origin, &self.direction)
    }

    pub fn project(&self, query: &Point<f64, D>) -> Option<Point<f64, D>> {
        metrics::orthogonal_projection_on_ray(query, &self.origin, &self.direction)
    }
}

impl Ray2 {
    pub fn is_point_in_front(&self, query: &Point2) -> bool {
        metrics::is_point2_in_front_of_ray2(query, &self.origin, &self.direction)
    }

    pub fn intersection_with_segment(&self, segment: &Segment2) -> Option<Point2> {
        relations::intersection_between_ray2_and_segment2(&self.origin, &self.direction, &segment.start, &segment.end)
    }

    pub fn intersection_with_line(&self, line: &Line2) -> Option<Point2> {
        relations::intersection_between_ray2_and_line2(&self.origin, &self.direction, &line.point, &line.direction)
    }

    pub fn intersection_with_ray(&self, other: &Ray2) -> Option<Point2> {
        relations::intersection_between_two_rays2(&self.origin, &self.direction, &other.origin, &other.direction)
    }
}

// ========== 平面 (Plane) ==========

/// 平面：平面上一点与法向量（法向量无需单位化）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane3 {
    pub point: Point3,
    pub normal: Vector3,
}

impl Plane3 {
    pub fn new(point: Point3, normal: Vector3) -> Self {
        Self { point, normal }
    }

    /// 由平面上一点与两个切向量创建，切向量平行时返回 `None`
    pub fn from_tangents(point: Point3, first_tangent: &Vector3, second_tangent: &Vector3) -> Option<Self> {
        let normal = first_tangent.cross(second_tangent);
        if normal.norm() < ONE_TRILLIONTH {
            tracing::trace!("plane tangents are parallel");
            return None;
        }
        Some(Self::new(point, normal))
    }

    /// 经过三点的平面，三点共线时返回 `None`
    pub fn from_points(a: &Point3, b: &Point3, c: &Point3) -> Option<Self> {
        tools::normal_from_three_points(a, b, c).map(|normal| Self::new(*a, normal.into_inner()))
    }

    pub fn signed_distance_to_point(&self, query: &Point3) -> f64 {
        metrics::signed_distance_from_point3_to_plane(query, &self.point, &self.normal)
    }

    pub fn distance_to_point(&self, query: &Point3) -> f64 {
        metrics::distance_from_point3_to_plane(query, &self.point, &self.normal)
    }

    pub fn project(&self, query: &Point3) -> Option<Point3> {
        metrics::orthogonal_projection_on_plane(query, &self.point, &self.normal)
    }

    pub fn is_point_above(&self, query: &Point3) -> bool {
        metrics::is_point3_above_or_below_plane(query, &self.point, &self.normal, true)
    }

    pub fn is_point_below(&self, query: &Point3) -> bool {
        metrics::is_point3_above_or_below_plane(query, &self.point, &self.normal, false)
    }

    pub fn is_coincident_with(&self, other: &Plane3, tolerances: &Tolerances) -> Result<bool> {
        relations::are_planes_coincident(
            &self.point,
            &self.normal,
            &other.point,
            &other.normal,
            tolerances.angle_epsilon,
            tolerances.distance_epsilon,
        )
    }

    /// 与另一个平面的交线，方向为单位向量
    pub fn intersection_with_plane(&self, other: &Plane3, tolerances: &Tolerances) -> Result<Option<Line3>> {
        let line = relations::intersection_between_two_planes(
            &self.point,
            &self.normal,
            &other.point,
            &other.normal,
            tolerances.angle_epsilon,
        )?;
        Ok(line.map(|(point, direction)| Line3::new(point, direction.into_inner())))
    }
}

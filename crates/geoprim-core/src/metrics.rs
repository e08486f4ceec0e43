//! 点到直线、射线、线段、平面的度量
//!
//! 距离、有向距离与正交投影。直线方向向量长度低于 [`ONE_TRILLIONTH`] 时，
//! 距离查询退化为到直线上给定点的距离，投影查询返回 `None`。

use crate::math::{Point2, Point3, Vector2, Vector3, ONE_TRILLIONTH};
use crate::tools::percentage_along_line;
use nalgebra::{Point, SVector};

#[inline]
fn is_degenerate<const D: usize>(direction: &SVector<f64, D>) -> bool {
    direction.norm_squared() < ONE_TRILLIONTH * ONE_TRILLIONTH
}

// ========== 直线 (Line) ==========

/// 点到直线距离的平方
pub fn distance_squared_from_point_to_line<const D: usize>(
    query: &Point<f64, D>,
    point_on_line: &Point<f64, D>,
    direction: &SVector<f64, D>,
) -> f64 {
    if is_degenerate(direction) {
        tracing::trace!("line direction is degenerate, using point distance");
        return (query - point_on_line).norm_squared();
    }
    let t = percentage_along_line(query, point_on_line, direction);
    (query - (point_on_line + direction * t)).norm_squared()
}

/// 点到直线的距离
pub fn distance_from_point_to_line<const D: usize>(
    query: &Point<f64, D>,
    point_on_line: &Point<f64, D>,
    direction: &SVector<f64, D>,
) -> f64 {
    distance_squared_from_point_to_line(query, point_on_line, direction).sqrt()
}

/// 点在直线上的正交投影，方向退化时返回 `None`
pub fn orthogonal_projection_on_line<const D: usize>(
    query: &Point<f64, D>,
    point_on_line: &Point<f64, D>,
    direction: &SVector<f64, D>,
) -> Option<Point<f64, D>> {
    if is_degenerate(direction) {
        tracing::trace!("cannot project onto a degenerate line");
        return None;
    }
    let t = percentage_along_line(query, point_on_line, direction);
    Some(point_on_line + direction * t)
}

/// 点到2D直线的有向距离，位于方向左侧（`(-dy, dx)` 一侧）为正
///
/// 方向退化时返回到 `point_on_line` 的（非负）距离。
pub fn signed_distance_from_point2_to_line2(
    query: &Point2,
    point_on_line: &Point2,
    direction: &Vector2,
) -> f64 {
    let norm = direction.norm();
    if norm < ONE_TRILLIONTH {
        tracing::trace!("line direction is degenerate, using point distance");
        return (query - point_on_line).norm();
    }
    direction.perp(&(query - point_on_line)) / norm
}

/// 点是否在2D直线的指定一侧
///
/// `left` 为 `true` 时判断左侧，否则判断右侧。与直线距离在 [`ONE_TRILLIONTH`]
/// 以内的点两侧都不算。方向退化时总是返回 `false`。
pub fn is_point2_on_side_of_line2(
    query: &Point2,
    point_on_line: &Point2,
    direction: &Vector2,
    left: bool,
) -> bool {
    if is_degenerate(direction) {
        return false;
    }
    let signed = signed_distance_from_point2_to_line2(query, point_on_line, direction);
    if left {
        signed > ONE_TRILLIONTH
    } else {
        signed < -ONE_TRILLIONTH
    }
}

/// 点是否在2D直线上（距离不超过 `epsilon`）
pub fn is_point2_on_line2(
    query: &Point2,
    point_on_line: &Point2,
    direction: &Vector2,
    epsilon: f64,
) -> bool {
    distance_from_point_to_line(query, point_on_line, direction) <= epsilon
}

// ========== 线段 (Segment) ==========

/// 查询点在线段上最近点的参数，已截断到 `[0, 1]`
pub fn closest_parameter_on_segment<const D: usize>(
    query: &Point<f64, D>,
    start: &Point<f64, D>,
    end: &Point<f64, D>,
) -> f64 {
    percentage_along_line(query, start, &(end - start)).clamp(0.0, 1.0)
}

/// 点在线段上的正交投影，总是落在线段上
pub fn orthogonal_projection_on_segment<const D: usize>(
    query: &Point<f64, D>,
    start: &Point<f64, D>,
    end: &Point<f64, D>,
) -> Point<f64, D> {
    let t = closest_parameter_on_segment(query, start, end);
    start + (end - start) * t
}

/// 点到线段距离的平方
pub fn distance_squared_from_point_to_segment<const D: usize>(
    query: &Point<f64, D>,
    start: &Point<f64, D>,
    end: &Point<f64, D>,
) -> f64 {
    (query - orthogonal_projection_on_segment(query, start, end)).norm_squared()
}

/// 点到线段的距离
pub fn distance_from_point_to_segment<const D: usize>(
    query: &Point<f64, D>,
    start: &Point<f64, D>,
    end: &Point<f64, D>,
) -> f64 {
    distance_squared_from_point_to_segment(query, start, end).sqrt()
}

// ========== 射线 (Ray) ==========

/// 点在射线上的正交投影，参数截断到 `[0, ∞)`；方向退化时返回 `None`
pub fn orthogonal_projection_on_ray<const D: usize>(
    query: &Point<f64, D>,
    origin: &Point<f64, D>,
    direction: &SVector<f64, D>,
) -> Option<Point<f64, D>> {
    if is_degenerate(direction) {
        tracing::trace!("cannot project onto a degenerate ray");
        return None;
    }
    let t = percentage_along_line(query, origin, direction).max(0.0);
    Some(origin + direction * t)
}

/// 点到射线的距离，方向退化时为到起点的距离
pub fn distance_from_point_to_ray<const D: usize>(
    query: &Point<f64, D>,
    origin: &Point<f64, D>,
    direction: &SVector<f64, D>,
) -> f64 {
    let closest = orthogonal_projection_on_ray(query, origin, direction).unwrap_or(*origin);
    (query - closest).norm()
}

/// 点是否在射线起点的前方（含垂直于起点的那条线）
pub fn is_point2_in_front_of_ray2(query: &Point2, origin: &Point2, direction: &Vector2) -> bool {
    (query - origin).dot(direction) >= 0.0
}

// ========== 平面 (Plane) ==========

/// 点到平面的有向距离，法向量一侧为正；法向量无需单位化
pub fn signed_distance_from_point3_to_plane(
    query: &Point3,
    point_on_plane: &Point3,
    normal: &Vector3,
) -> f64 {
    (query - point_on_plane).dot(normal) / normal.norm()
}

/// 点到平面的距离
pub fn distance_from_point3_to_plane(
    query: &Point3,
    point_on_plane: &Point3,
    normal: &Vector3,
) -> f64 {
    signed_distance_from_point3_to_plane(query, point_on_plane, normal).abs()
}

/// 点是否严格位于平面上方（`above == true`）或下方
///
/// 与平面距离在 [`ONE_TRILLIONTH`] 以内的点既不在上方也不在下方。
pub fn is_point3_above_or_below_plane(
    query: &Point3,
    point_on_plane: &Point3,
    normal: &Vector3,
    above: bool,
) -> bool {
    let signed = signed_distance_from_point3_to_plane(query, point_on_plane, normal);
    if above {
        signed > ONE_TRILLIONTH
    } else {
        signed < -ONE_TRILLIONTH
    }
}

/// 点在平面上的正交投影，法向量退化时返回 `None`
pub fn orthogonal_projection_on_plane(
    query: &Point3,
    point_on_plane: &Point3,
    normal: &Vector3,
) -> Option<Point3> {
    let length_squared = normal.norm_squared();
    if length_squared < ONE_TRILLIONTH * ONE_TRILLIONTH {
        tracing::trace!("cannot project onto a plane with degenerate normal");
        return None;
    }
    let offset = (query - point_on_plane).dot(normal) / length_squared;
    Some(query - normal * offset)
}

// ========== 三角形 (Triangle) ==========

/// 点是否在三角形 ABC 内，边与顶点算在内，顶点顺序任意
pub fn is_point2_inside_triangle(query: &Point2, a: &Point2, b: &Point2, c: &Point2) -> bool {
    let d1 = (b - a).perp(&(query - a));
    let d2 = (c - b).perp(&(query - b));
    let d3 = (a - c).perp(&(query - c));

    let has_negative = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_positive = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_negative && has_positive)
}

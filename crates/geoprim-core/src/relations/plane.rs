//! 3D直线/线段与平面、平面与平面的相交
//!
//! 方向与平面平行时报告不相交，即使直线恰好位于平面内。

use crate::error::Result;
use crate::math::{check_angle_epsilon, Point3, UnitVector3, Vector3, ONE_TRILLIONTH};
use crate::metrics::signed_distance_from_point3_to_plane;
use crate::relations::parallel::are_vectors_parallel;
use nalgebra::Unit;

/// 直线与平面的交点在直线上的参数，平行或方向退化时返回 `None`
fn line_parameter_at_plane(
    point_on_plane: &Point3,
    plane_normal: &Vector3,
    point_on_line: &Point3,
    line_direction: &Vector3,
) -> Option<f64> {
    let denominator = plane_normal.dot(line_direction);
    if denominator.abs() <= ONE_TRILLIONTH * plane_normal.norm() * line_direction.norm() {
        tracing::trace!("line is parallel to plane or degenerate");
        return None;
    }
    Some(plane_normal.dot(&(point_on_plane - point_on_line)) / denominator)
}

/// 3D直线与平面的交点
pub fn intersection_between_line3_and_plane(
    point_on_plane: &Point3,
    plane_normal: &Vector3,
    point_on_line: &Point3,
    line_direction: &Vector3,
) -> Option<Point3> {
    line_parameter_at_plane(point_on_plane, plane_normal, point_on_line, line_direction)
        .map(|t| point_on_line + line_direction * t)
}

/// 3D线段与平面的交点，端点在平面上也算相交
///
/// 两个端点严格位于平面同侧，或线段平行于平面时返回 `None`。
pub fn intersection_between_segment3_and_plane(
    point_on_plane: &Point3,
    plane_normal: &Vector3,
    start: &Point3,
    end: &Point3,
) -> Option<Point3> {
    let start_side = signed_distance_from_point3_to_plane(start, point_on_plane, plane_normal);
    let end_side = signed_distance_from_point3_to_plane(end, point_on_plane, plane_normal);
    if start_side * end_side > 0.0 {
        return None;
    }
    let direction = end - start;
    line_parameter_at_plane(point_on_plane, plane_normal, start, &direction)
        .map(|t| start + direction * t.clamp(0.0, 1.0))
}

/// 线段是否穿过平面，两个端点必须严格位于平面两侧
///
/// 端点恰好在平面上或线段长度为零时返回 `false`。
pub fn does_segment3_intersect_plane(
    point_on_plane: &Point3,
    plane_normal: &Vector3,
    start: &Point3,
    end: &Point3,
) -> bool {
    let start_side = signed_distance_from_point3_to_plane(start, point_on_plane, plane_normal);
    let end_side = signed_distance_from_point3_to_plane(end, point_on_plane, plane_normal);
    start_side * end_side < 0.0
}

/// 两个平面的交线，返回 `(交线上的点, 单位方向)`
///
/// 法向量在 `angle_epsilon` 内平行时返回 `Ok(None)`。交线上的点取离
/// 原点最近的那个。
pub fn intersection_between_two_planes(
    point1: &Point3,
    normal1: &Vector3,
    point2: &Point3,
    normal2: &Vector3,
    angle_epsilon: f64,
) -> Result<Option<(Point3, UnitVector3)>> {
    check_angle_epsilon(angle_epsilon)?;
    if are_vectors_parallel(normal1, normal2, angle_epsilon)? {
        return Ok(None);
    }

    let direction = normal1.cross(normal2);
    let Some(unit_direction) = Unit::try_new(direction, ONE_TRILLIONTH) else {
        tracing::trace!("plane normals are degenerate");
        return Ok(None);
    };

    let h1 = normal1.dot(&point1.coords);
    let h2 = normal2.dot(&point2.coords);
    let n11 = normal1.norm_squared();
    let n22 = normal2.norm_squared();
    let n12 = normal1.dot(normal2);
    let determinant = direction.norm_squared();

    let c1 = (h1 * n22 - h2 * n12) / determinant;
    let c2 = (h2 * n11 - h1 * n12) / determinant;
    let point = Point3::from(normal1 * c1 + normal2 * c2);
    Ok(Some((point, unit_direction)))
}

//! 平行、共线与共面判断
//!
//! 角度容差必须位于 `[0, π/2]`，距离容差必须非负，否则返回错误。

use crate::error::Result;
use crate::math::{check_angle_epsilon, check_distance_epsilon, Point3, Vector3, ONE_TRILLIONTH};
use crate::metrics::{distance_from_point3_to_plane, distance_from_point_to_line};
use nalgebra::{Point, SVector};

/// 两个向量是否平行（同向或反向），夹角或其补角小于 `angle_epsilon`
///
/// 任一向量长度低于 [`ONE_TRILLIONTH`] 时不视为平行。
pub fn are_vectors_parallel<const D: usize>(
    first: &SVector<f64, D>,
    second: &SVector<f64, D>,
    angle_epsilon: f64,
) -> Result<bool> {
    check_angle_epsilon(angle_epsilon)?;

    let first_norm = first.norm();
    let second_norm = second.norm();
    if first_norm < ONE_TRILLIONTH || second_norm < ONE_TRILLIONTH {
        tracing::trace!("parallel test on a degenerate vector");
        return Ok(false);
    }

    let cos = (first.dot(second) / (first_norm * second_norm)).abs();
    Ok(cos > angle_epsilon.cos())
}

/// 两条直线是否共线
///
/// 方向平行且第二条直线上的点到第一条直线的距离小于 `distance_epsilon`。
pub fn are_lines_collinear<const D: usize>(
    point1: &Point<f64, D>,
    direction1: &SVector<f64, D>,
    point2: &Point<f64, D>,
    direction2: &SVector<f64, D>,
    angle_epsilon: f64,
    distance_epsilon: f64,
) -> Result<bool> {
    check_distance_epsilon(distance_epsilon)?;
    if !are_vectors_parallel(direction1, direction2, angle_epsilon)? {
        return Ok(false);
    }
    Ok(distance_from_point_to_line(point2, point1, direction1) < distance_epsilon)
}

/// 两条由两点定义的直线是否共线
pub fn are_lines_collinear_from_points<const D: usize>(
    first_start: &Point<f64, D>,
    first_end: &Point<f64, D>,
    second_start: &Point<f64, D>,
    second_end: &Point<f64, D>,
    angle_epsilon: f64,
    distance_epsilon: f64,
) -> Result<bool> {
    are_lines_collinear(
        first_start,
        &(first_end - first_start),
        second_start,
        &(second_end - second_start),
        angle_epsilon,
        distance_epsilon,
    )
}

/// 两个平面是否重合
pub fn are_planes_coincident(
    point1: &Point3,
    normal1: &Vector3,
    point2: &Point3,
    normal2: &Vector3,
    angle_epsilon: f64,
    distance_epsilon: f64,
) -> Result<bool> {
    check_distance_epsilon(distance_epsilon)?;
    if !are_vectors_parallel(normal1, normal2, angle_epsilon)? {
        return Ok(false);
    }
    Ok(distance_from_point3_to_plane(point2, point1, normal1) < distance_epsilon)
}

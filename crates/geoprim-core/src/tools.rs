//! 标量与向量辅助函数
//!
//! 由端点计算的点积、三角形面积（叉积与海伦公式）、余弦定理、勾股定理、
//! 向量夹角与点集平均。其余查询族都建立在这些函数之上。

use crate::error::{GeometryError, Result};
use crate::math::{check_positive, Point2, Point3, UnitVector3, Vector2, Vector3, ONE_TRILLIONTH};
use nalgebra::{Point, SVector, Unit};

// ========== 点积与面积 ==========

/// 计算 `(end1 - start1) · (end2 - start2)`
pub fn dot_product_from_endpoints<const D: usize>(
    start1: &Point<f64, D>,
    end1: &Point<f64, D>,
    start2: &Point<f64, D>,
    end2: &Point<f64, D>,
) -> f64 {
    (end1 - start1).dot(&(end2 - start2))
}

/// 2D三角形面积（非负）
pub fn triangle_area2(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    0.5 * (b - a).perp(&(c - a)).abs()
}

/// 3D三角形面积
pub fn triangle_area3(a: &Point3, b: &Point3, c: &Point3) -> f64 {
    0.5 * (b - a).cross(&(c - a)).norm()
}

/// 由三边长用海伦公式计算面积
///
/// 边长为负，或某一边严格大于另两边之和时返回错误；
/// 退化三角形（如 1, 1, 2）面积为 0。
pub fn triangle_area_heron(a: f64, b: f64, c: f64) -> Result<f64> {
    if a < 0.0 || b < 0.0 || c < 0.0 || a > b + c || b > a + c || c > a + b {
        tracing::debug!(a, b, c, "lengths do not form a triangle");
        return Err(GeometryError::NotATriangle(a, b, c));
    }
    let s = 0.5 * (a + b + c);
    Ok((s * (s - a) * (s - b) * (s - c)).max(0.0).sqrt())
}

/// 三条边是否构成非退化三角形（严格三角不等式）
pub fn is_forming_triangle(a: f64, b: f64, c: f64) -> bool {
    a + b > c && a + c > b && b + c > a
}

// ========== 余弦定理与勾股定理 ==========

/// 已知三边，求与 `opposite` 相对的角
pub fn triangle_angle_from_sides(adjacent1: f64, adjacent2: f64, opposite: f64) -> Result<f64> {
    check_positive("adjacent side", adjacent1)?;
    check_positive("adjacent side", adjacent2)?;
    if opposite < 0.0 || opposite > adjacent1 + adjacent2 || (adjacent1 - adjacent2).abs() > opposite {
        tracing::debug!(adjacent1, adjacent2, opposite, "lengths do not form a triangle");
        return Err(GeometryError::NotATriangle(adjacent1, adjacent2, opposite));
    }
    let cos = (adjacent1 * adjacent1 + adjacent2 * adjacent2 - opposite * opposite)
        / (2.0 * adjacent1 * adjacent2);
    Ok(cos.clamp(-1.0, 1.0).acos())
}

/// 已知两边及其夹角，求第三边
pub fn triangle_side_from_angle(adjacent1: f64, adjacent2: f64, angle: f64) -> Result<f64> {
    check_positive("adjacent side", adjacent1)?;
    check_positive("adjacent side", adjacent2)?;
    let squared =
        adjacent1 * adjacent1 + adjacent2 * adjacent2 - 2.0 * adjacent1 * adjacent2 * angle.cos();
    Ok(squared.max(0.0).sqrt())
}

/// 已知斜边与一条直角边，求另一条直角边
pub fn pythagorean_leg(hypotenuse: f64, leg: f64) -> Result<f64> {
    if leg < 0.0 || hypotenuse < leg {
        tracing::debug!(hypotenuse, leg, "leg longer than hypotenuse");
        return Err(GeometryError::NotATriangle(hypotenuse, leg, 0.0));
    }
    Ok((hypotenuse * hypotenuse - leg * leg).sqrt())
}

/// 已知两条直角边，求斜边
pub fn pythagorean_hypotenuse(leg1: f64, leg2: f64) -> f64 {
    leg1.hypot(leg2)
}

// ========== 向量 ==========

/// 从 `first` 转到 `second` 的有向角，位于 `[-π, π]`
pub fn angle_from_first_to_second_vector2(first: &Vector2, second: &Vector2) -> f64 {
    first.perp(second).atan2(first.dot(second))
}

/// 两个3D向量之间的夹角，位于 `[0, π]`；零向量得到 0
pub fn angle_between_vectors3(first: &Vector3, second: &Vector3) -> f64 {
    first.cross(second).norm().atan2(first.dot(second))
}

/// 逆时针旋转 90° 得到的垂直向量
#[inline]
pub fn perpendicular_vector2(v: &Vector2) -> Vector2 {
    Vector2::new(-v.y, v.x)
}

/// 将2D向量旋转 `angle` 弧度
pub fn rotate_vector2(angle: f64, v: &Vector2) -> Vector2 {
    let (sin, cos) = angle.sin_cos();
    Vector2::new(cos * v.x - sin * v.y, sin * v.x + cos * v.y)
}

/// 由三点求平面单位法向量，三点共线时返回 `None`
///
/// 法向量方向满足右手定则 `(b - a) × (c - a)`。
pub fn normal_from_three_points(a: &Point3, b: &Point3, c: &Point3) -> Option<UnitVector3> {
    let normal = Unit::try_new((b - a).cross(&(c - a)), ONE_TRILLIONTH);
    if normal.is_none() {
        tracing::trace!("normal requested from collinear points");
    }
    normal
}

// ========== 点距 ==========

#[inline]
pub fn distance_squared_between_points<const D: usize>(a: &Point<f64, D>, b: &Point<f64, D>) -> f64 {
    nalgebra::distance_squared(a, b)
}

#[inline]
pub fn distance_between_points<const D: usize>(a: &Point<f64, D>, b: &Point<f64, D>) -> f64 {
    nalgebra::distance(a, b)
}

// ========== 平均与比例 ==========

/// 点集的平均值，空集返回 `None`
pub fn average_points<const D: usize>(points: &[Point<f64, D>]) -> Option<Point<f64, D>> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(SVector::<f64, D>::zeros(), |acc, p| acc + p.coords);
    Some(Point::from(sum / points.len() as f64))
}

/// 两点的中点
#[inline]
pub fn average_two_points<const D: usize>(a: &Point<f64, D>, b: &Point<f64, D>) -> Point<f64, D> {
    nalgebra::center(a, b)
}

/// 查询点在直线上的投影对应的参数 `t`，满足 `projection = point + t * direction`
///
/// 方向向量退化时返回 0。
pub fn percentage_along_line<const D: usize>(
    query: &Point<f64, D>,
    point_on_line: &Point<f64, D>,
    direction: &SVector<f64, D>,
) -> f64 {
    let length_squared = direction.norm_squared();
    if length_squared < ONE_TRILLIONTH * ONE_TRILLIONTH {
        tracing::trace!("percentage along a degenerate line");
        return 0.0;
    }
    (query - point_on_line).dot(direction) / length_squared
}

/// 查询点在线段支撑线上的投影参数（不截断），0 对应起点，1 对应终点
pub fn percentage_along_segment<const D: usize>(
    query: &Point<f64, D>,
    start: &Point<f64, D>,
    end: &Point<f64, D>,
) -> f64 {
    percentage_along_line(query, start, &(end - start))
}

//! 由向量与三角形导出的姿态和形状
//!
//! 向量到向量的轴角/四元数、外心与外接圆半径、过三点的定半径球心、
//! 等腰三角形的高与角平分线的落点。

use crate::error::{GeometryError, Result};
use crate::math::{check_positive, Point2, Point3, UnitQuaternion, UnitVector3, Vector3, ONE_TRILLIONTH};
use crate::tools::normal_from_three_points;
use nalgebra::{Point, Unit};

// ========== 姿态 (Orientation) ==========

/// 轴角表示，`axis` 为单位向量
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisAngle {
    pub axis: UnitVector3,
    pub angle: f64,
}

impl AxisAngle {
    /// 零旋转，轴取 x 轴
    pub fn identity() -> Self {
        Self {
            axis: Vector3::x_axis(),
            angle: 0.0,
        }
    }

    /// 转为单位四元数
    pub fn to_quaternion(&self) -> UnitQuaternion {
        UnitQuaternion::from_axis_angle(&self.axis, self.angle)
    }
}

/// 与单位向量 `v` 垂直的单位向量，优先取 x 轴在 `v` 垂面上的投影
fn any_orthogonal(v: &Vector3) -> UnitVector3 {
    let candidate = if v.x.abs() < 0.9 { Vector3::x() } else { Vector3::y() };
    Unit::new_normalize(candidate - v * v.dot(&candidate))
}

/// 把 `first` 转到 `second` 方向的最小旋转
///
/// 两向量同向时为零旋转；反向时绕任意一条与 `first` 垂直的轴转 π。
/// 任一向量长度为零时返回零旋转。
pub fn axis_angle_from_first_to_second_vector3(first: &Vector3, second: &Vector3) -> AxisAngle {
    let first_norm = first.norm();
    let second_norm = second.norm();
    if first_norm < ONE_TRILLIONTH || second_norm < ONE_TRILLIONTH {
        tracing::trace!("axis-angle requested for a zero vector");
        return AxisAngle::identity();
    }
    let a = first / first_norm;
    let b = second / second_norm;

    let cross = a.cross(&b);
    let dot = a.dot(&b);
    let angle = cross.norm().atan2(dot);

    match Unit::try_new(cross, ONE_TRILLIONTH) {
        Some(axis) => AxisAngle { axis, angle },
        None if dot > 0.0 => AxisAngle::identity(),
        None => {
            tracing::trace!("vectors are opposite, picking an orthogonal axis");
            AxisAngle {
                axis: any_orthogonal(&a),
                angle: std::f64::consts::PI,
            }
        }
    }
}

/// 把 z 轴转到 `vector` 方向的最小旋转
pub fn axis_angle_from_z_up_to_vector3(vector: &Vector3) -> AxisAngle {
    axis_angle_from_first_to_second_vector3(&Vector3::z(), vector)
}

/// 把 `first` 转到 `second` 方向的最小旋转（四元数）
pub fn quaternion_from_first_to_second_vector3(first: &Vector3, second: &Vector3) -> UnitQuaternion {
    axis_angle_from_first_to_second_vector3(first, second).to_quaternion()
}

// ========== 外接圆与外接球 (Circumscribed) ==========

/// 2D三角形外心，三点共线时返回 `None`
pub fn circumcenter2(a: &Point2, b: &Point2, c: &Point2) -> Option<Point2> {
    let ab = b - a;
    let ac = c - a;
    let d = 2.0 * ab.perp(&ac);
    let scale = ab.norm_squared().max(ac.norm_squared());
    if d.abs() <= ONE_TRILLIONTH * scale {
        tracing::trace!("circumcenter of collinear points");
        return None;
    }
    let ab2 = ab.norm_squared();
    let ac2 = ac.norm_squared();
    let ux = (ac.y * ab2 - ab.y * ac2) / d;
    let uy = (ab.x * ac2 - ac.x * ab2) / d;
    Some(Point2::new(a.x + ux, a.y + uy))
}

/// 3D三角形外心，三点共线时返回 `None`
pub fn circumcenter3(a: &Point3, b: &Point3, c: &Point3) -> Option<Point3> {
    let ab = b - a;
    let ac = c - a;
    let normal = ab.cross(&ac);
    let normal_squared = normal.norm_squared();
    let scale = ab.norm_squared().max(ac.norm_squared());
    if normal_squared <= ONE_TRILLIONTH * scale * scale {
        tracing::trace!("circumcenter of collinear points");
        return None;
    }
    let offset = (normal.cross(&ab) * ac.norm_squared() + ac.cross(&normal) * ab.norm_squared())
        / (2.0 * normal_squared);
    Some(a + offset)
}

/// 外接圆半径，三点共线时返回 `None`
pub fn circumradius<const D: usize>(
    a: &Point<f64, D>,
    b: &Point<f64, D>,
    c: &Point<f64, D>,
) -> Option<f64> {
    let (la, lb, lc) = ((b - c).norm(), (a - c).norm(), (a - b).norm());
    let Some(product) = heron_product(la, lb, lc) else {
        tracing::trace!("circumradius of collinear points");
        return None;
    };
    Some(la * lb * lc / product.sqrt())
}

/// 三边长的 Heron 乘积 `16 * 面积²`，三点共线或重合时返回 `None`
fn heron_product(la: f64, lb: f64, lc: f64) -> Option<f64> {
    let product = (la + lb + lc) * (-la + lb + lc) * (la - lb + lc) * (la + lb - lc);
    let longest = la.max(lb).max(lc);
    (product > ONE_TRILLIONTH * longest.powi(4)).then_some(product)
}

/// 半径为 `radius` 且经过三点的球心
///
/// 球心位于三角形法向 `(b - a) × (c - a)` 一侧。三点共线或半径小于外接圆半径时
/// 返回 `Ok(None)`；半径非正时返回错误。
pub fn sphere_center_from_three_points(
    a: &Point3,
    b: &Point3,
    c: &Point3,
    radius: f64,
) -> Result<Option<Point3>> {
    check_positive("sphere radius", radius)?;

    let (Some(center), Some(normal)) = (circumcenter3(a, b, c), normal_from_three_points(a, b, c)) else {
        return Ok(None);
    };
    let circle_radius_squared = (a - center).norm_squared();
    let height_squared = radius * radius - circle_radius_squared;
    if height_squared < 0.0 {
        tracing::trace!(radius, "sphere too small to pass through the three points");
        return Ok(None);
    }
    Ok(Some(center + normal.as_ref() * height_squared.sqrt()))
}

// ========== 等腰与角平分线 (Isosceles & Bisector) ==========

/// 等腰三角形底边上的高
pub fn triangle_isosceles_height(leg_length: f64, base_length: f64) -> Result<f64> {
    if leg_length < 0.0 || base_length < 0.0 || base_length > 2.0 * leg_length {
        tracing::debug!(leg_length, base_length, "invalid isosceles triangle");
        return Err(GeometryError::NotATriangle(leg_length, leg_length, base_length));
    }
    Ok((leg_length * leg_length - 0.25 * base_length * base_length).max(0.0).sqrt())
}

/// 角 A 的平分线与对边 BC 的交点
///
/// 由角平分线定理 `BX / XC = AB / AC` 得出。三点共线或有重合点时返回 `None`。
pub fn triangle_bisector<const D: usize>(
    a: &Point<f64, D>,
    b: &Point<f64, D>,
    c: &Point<f64, D>,
) -> Option<Point<f64, D>> {
    let ab = (b - a).norm();
    let ac = (c - a).norm();
    if heron_product((b - c).norm(), ac, ab).is_none() {
        tracing::trace!("bisector of a degenerate triangle");
        return None;
    }
    Some(b + (c - b) * (ab / (ab + ac)))
}

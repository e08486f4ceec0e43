//! 有限圆柱
//!
//! 由中心、单位轴向、长度、半径描述。相交分两部分求：
//! 侧面（把直线投影到垂直于轴的平面上得到关于参数的二次方程）
//! 与两个端盖（平面相交后检查是否落在圆盘内）。

use crate::intersections::Intersections;
use crate::{solve_quadratic, LinearIntersection, PointQuery};
use geoprim_core::error::{GeometryError, Result};
use geoprim_core::math::{check_positive, BoundingBox3, Point3, UnitVector3, Vector3, ONE_TRILLIONTH};
use geoprim_core::shape::axis_angle_from_z_up_to_vector3;
use geoprim_core::transform::RigidTransform3;
use nalgebra::Unit;
use serde::{Deserialize, Serialize};

/// 3D圆柱
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cylinder3 {
    length: f64,
    radius: f64,
    position: Point3,
    axis: UnitVector3,
}

impl Cylinder3 {
    /// 创建圆柱，长度或半径非正、轴向为零向量时返回错误
    pub fn new(length: f64, radius: f64, position: Point3, axis: Vector3) -> Result<Self> {
        check_positive("cylinder length", length)?;
        check_positive("cylinder radius", radius)?;
        let axis = Unit::try_new(axis, ONE_TRILLIONTH).ok_or_else(|| {
            tracing::debug!("rejecting cylinder with a zero axis");
            GeometryError::NonPositiveDimension {
                name: "cylinder axis",
                value: axis.norm(),
            }
        })?;
        Ok(Self {
            length,
            radius,
            position,
            axis,
        })
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn half_length(&self) -> f64 {
        0.5 * self.length
    }

    /// 中心
    pub fn position(&self) -> Point3 {
        self.position
    }

    pub fn axis(&self) -> UnitVector3 {
        self.axis
    }

    /// 顶盖中心（沿轴正向）
    pub fn top_center(&self) -> Point3 {
        self.position + self.axis.into_inner() * self.half_length()
    }

    pub fn bottom_center(&self) -> Point3 {
        self.position - self.axis.into_inner() * self.half_length()
    }

    /// 局部坐标到世界坐标的变换，局部 z 轴为圆柱轴向
    pub fn pose(&self) -> RigidTransform3 {
        let rotation = axis_angle_from_z_up_to_vector3(&self.axis).to_quaternion();
        RigidTransform3::from_parts(self.position, rotation)
    }

    /// 把相对中心的向量分解为 `(轴向坐标, 径向分量)`
    fn decompose(&self, relative: &Vector3) -> (f64, Vector3) {
        let axial = self.axis.dot(relative);
        (axial, relative - self.axis.into_inner() * axial)
    }
}

impl LinearIntersection<3> for Cylinder3 {
    fn line_parameters(&self, point: &Point3, direction: &Vector3) -> Intersections<f64> {
        let length = direction.norm();
        if length < ONE_TRILLIONTH {
            tracing::trace!("cylinder test with a degenerate direction");
            return Intersections::none();
        }
        // 参数先按单位方向计算，返回前换算回原方向
        let half_length = self.half_length();
        let (point_axial, point_radial) = self.decompose(&(point - self.position));
        let (direction_axial, direction_radial) = self.decompose(&(direction / length));
        let axial_tolerance = ONE_TRILLIONTH * (1.0 + half_length);
        let radial_tolerance = ONE_TRILLIONTH * (1.0 + self.radius);

        let mut candidates: Vec<f64> = Vec::with_capacity(4);

        // 侧面，平行于轴的直线不与侧面相交
        if direction_radial.norm() > ONE_TRILLIONTH {
            let lateral = solve_quadratic(
                direction_radial.norm_squared(),
                2.0 * point_radial.dot(&direction_radial),
                point_radial.norm_squared() - self.radius * self.radius,
            );
            candidates.extend(
                lateral
                    .iter()
                    .filter(|t| (point_axial + t * direction_axial).abs() <= half_length + axial_tolerance),
            );
        }

        // 端盖
        if direction_axial.abs() > ONE_TRILLIONTH {
            for cap in [-half_length, half_length] {
                let t = (cap - point_axial) / direction_axial;
                if (point_radial + direction_radial * t).norm() <= self.radius + radial_tolerance {
                    candidates.push(t);
                }
            }
        }

        let (Some(first), Some(last)) = (
            candidates.iter().copied().reduce(f64::min),
            candidates.iter().copied().reduce(f64::max),
        ) else {
            return Intersections::none();
        };
        if last - first <= ONE_TRILLIONTH * (1.0 + first.abs().max(last.abs())) {
            Intersections::one(0.5 * (first + last) / length)
        } else {
            Intersections::two(first / length, last / length)
        }
    }
}

impl PointQuery for Cylinder3 {
    fn contains_point(&self, query: &Point3, epsilon: f64) -> bool {
        let (axial, radial) = self.decompose(&(query - self.position));
        axial.abs() <= self.half_length() + epsilon && radial.norm() <= self.radius + epsilon
    }

    fn signed_distance(&self, query: &Point3) -> f64 {
        let (axial, radial) = self.decompose(&(query - self.position));
        let radial_excess = radial.norm() - self.radius;
        let axial_excess = axial.abs() - self.half_length();
        let outside = radial_excess.max(0.0).hypot(axial_excess.max(0.0));
        let inside = radial_excess.max(axial_excess).min(0.0);
        outside + inside
    }

    fn orthogonal_projection(&self, query: &Point3) -> Option<Point3> {
        let (axial, radial) = self.decompose(&(query - self.position));
        let distance = radial.norm();
        let half_length = self.half_length();
        if distance <= self.radius && axial.abs() <= half_length {
            return None;
        }
        let radial = if distance > self.radius {
            radial * (self.radius / distance)
        } else {
            radial
        };
        let axial = axial.clamp(-half_length, half_length);
        Some(self.position + self.axis.into_inner() * axial + radial)
    }

    fn bounding_box(&self) -> BoundingBox3 {
        let axis = self.axis.into_inner();
        let half_length = self.half_length();
        let extents = Vector3::from_fn(|i, _| {
            axis[i].abs() * half_length + self.radius * (1.0 - axis[i] * axis[i]).max(0.0).sqrt()
        });
        BoundingBox3 {
            min: self.position - extents,
            max: self.position + extents,
        }
    }
}

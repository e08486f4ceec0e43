//! 数学基础类型与数值容差
//!
//! 基于 nalgebra 提供的向量和点类型的别名，以及整个内核共享的容差常量。

use crate::error::{GeometryError, Result};
use nalgebra as na;
use serde::{Deserialize, Serialize};

/// 2D点类型
pub type Point2 = na::Point2<f64>;

/// 3D点类型
pub type Point3 = na::Point3<f64>;

/// 2D向量类型
pub type Vector2 = na::Vector2<f64>;

/// 3D向量类型
pub type Vector3 = na::Vector3<f64>;

/// 3D单位向量
pub type UnitVector3 = na::Unit<na::Vector3<f64>>;

/// 单位四元数
pub type UnitQuaternion = na::UnitQuaternion<f64>;

/// 数值容差，用于一般几何比较
pub const EPSILON: f64 = 1e-10;

/// 1e-6，默认的角度容差
pub const ONE_MILLIONTH: f64 = 1.0e-6;

/// 1e-7，默认的距离容差
pub const ONE_TEN_MILLIONTH: f64 = 1.0e-7;

/// 1e-12，低于此长度的方向向量视为退化
pub const ONE_TRILLIONTH: f64 = 1.0e-12;

/// 判断两个浮点数是否近似相等
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// 判断两个2D点是否近似相等
#[inline]
pub fn points_approx_eq(a: &Point2, b: &Point2) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

/// 判断两个3D点是否近似相等
#[inline]
pub fn points3_approx_eq(a: &Point3, b: &Point3) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
}

/// 校验角度容差位于 `[0, π/2]`
pub fn check_angle_epsilon(angle_epsilon: f64) -> Result<()> {
    if !(0.0..=std::f64::consts::FRAC_PI_2).contains(&angle_epsilon) {
        tracing::debug!(angle_epsilon, "rejecting angle epsilon");
        return Err(GeometryError::InvalidAngleEpsilon(angle_epsilon));
    }
    Ok(())
}

/// 校验距离容差非负
pub fn check_distance_epsilon(distance_epsilon: f64) -> Result<()> {
    if distance_epsilon.is_nan() || distance_epsilon < 0.0 {
        tracing::debug!(distance_epsilon, "rejecting distance epsilon");
        return Err(GeometryError::NegativeEpsilon(distance_epsilon));
    }
    Ok(())
}

/// 校验尺寸严格为正
pub fn check_positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_nan() || value <= 0.0 {
        tracing::debug!(name, value, "rejecting non-positive dimension");
        return Err(GeometryError::NonPositiveDimension { name, value });
    }
    Ok(())
}

// ========== 包围盒 (Bounding Box) ==========

/// 2D轴对齐包围盒
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox2 {
    pub min: Point2,
    pub max: Point2,
}

impl BoundingBox2 {
    /// 创建新的包围盒，`min` 在任一轴上大于 `max` 时返回错误
    pub fn new(min: Point2, max: Point2) -> Result<Self> {
        for axis in 0..2 {
            if min[axis] > max[axis] {
                tracing::debug!(axis, "rejecting malformed bounding box");
                return Err(GeometryError::InvalidBoundingBox {
                    axis,
                    min: min[axis],
                    max: max[axis],
                });
            }
        }
        Ok(Self { min, max })
    }

    /// 从点集创建包围盒，点集为空时返回 `None`
    pub fn from_points(points: impl IntoIterator<Item = Point2>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bbox = Self {
            min: first,
            max: first,
        };
        for p in iter {
            bbox.expand_to_include(&p);
        }
        Some(bbox)
    }

    pub fn expand_to_include(&mut self, point: &Point2) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// 两个包围盒是否重叠（含边界接触）
    pub fn intersects(&self, other: &Self) -> bool {
        (0..2).all(|i| self.min[i] <= other.max[i] && self.max[i] >= other.min[i])
    }

    /// 点是否在盒内或边界上，`epsilon` 向外放宽
    pub fn contains(&self, point: &Point2, epsilon: f64) -> bool {
        (0..2).all(|i| point[i] >= self.min[i] - epsilon && point[i] <= self.max[i] + epsilon)
    }

    pub fn center(&self) -> Point2 {
        na::center(&self.min, &self.max)
    }

    /// 各轴上的边长
    pub fn size(&self) -> Vector2 {
        self.max - self.min
    }
}

/// 3D轴对齐包围盒
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox3 {
    pub min: Point3,
    pub max: Point3,
}

impl BoundingBox3 {
    /// 创建新的包围盒，`min` 在任一轴上大于 `max` 时返回错误
    pub fn new(min: Point3, max: Point3) -> Result<Self> {
        for axis in 0..3 {
            if min[axis] > max[axis] {
                tracing::debug!(axis, "rejecting malformed bounding box");
                return Err(GeometryError::InvalidBoundingBox {
                    axis,
                    min: min[axis],
                    max: max[axis],
                });
            }
        }
        Ok(Self { min, max })
    }

    /// 以中心和半尺寸创建
    pub fn from_center_half_extents(center: Point3, half_extents: Vector3) -> Result<Self> {
        Self::new(center - half_extents, center + half_extents)
    }

    /// 从点集创建包围盒，点集为空时返回 `None`
    pub fn from_points(points: impl IntoIterator<Item = Point3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bbox = Self {
            min: first,
            max: first,
        };
        for p in iter {
            bbox.expand_to_include(&p);
        }
        Some(bbox)
    }

    /// 扩展包围盒以包含指定点
    pub fn expand_to_include(&mut self, point: &Point3) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// 合并两个包围盒
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// 检查是否与另一个包围盒相交
    pub fn intersects(&self, other: &Self) -> bool {
        (0..3).all(|i| self.min[i] <= other.max[i] && self.max[i] >= other.min[i])
    }

    /// 检查是否包含指定点（含边界，`epsilon` 向外扩张）
    pub fn contains(&self, point: &Point3, epsilon: f64) -> bool {
        (0..3).all(|i| point[i] >= self.min[i] - epsilon && point[i] <= self.max[i] + epsilon)
    }

    /// 获取中心点
    pub fn center(&self) -> Point3 {
        na::center(&self.min, &self.max)
    }

    /// 获取尺寸
    pub fn size(&self) -> Vector3 {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box2_from_points() {
        let bbox = BoundingBox2::from_points([
            Point2::new(3.0, -1.0),
            Point2::new(-2.0, 4.0),
            Point2::new(1.0, 1.0),
        ])
        .unwrap();

        assert!(points_approx_eq(&bbox.min, &Point2::new(-2.0, -1.0)));
        assert!(points_approx_eq(&bbox.max, &Point2::new(3.0, 4.0)));
        assert!(approx_eq(bbox.size().x, 5.0));
        assert!(bbox.contains(&Point2::new(0.0, 4.0), 0.0));
        assert!(!bbox.contains(&Point2::new(3.5, 0.0), 0.1));
        assert!(bbox.contains(&Point2::new(3.05, 0.0), 0.1));
    }

    #[test]
    fn test_bounding_box_from_no_points() {
        assert!(BoundingBox2::from_points(std::iter::empty()).is_none());
        assert!(BoundingBox3::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn test_malformed_bounding_box() {
        let err = BoundingBox3::new(Point3::new(0.0, 1.0, 0.0), Point3::new(1.0, 0.0, 1.0));
        assert_eq!(
            err,
            Err(GeometryError::InvalidBoundingBox {
                axis: 1,
                min: 1.0,
                max: 0.0
            })
        );

        // 零尺寸的盒子是合法的
        assert!(BoundingBox2::new(Point2::new(1.0, 1.0), Point2::new(1.0, 1.0)).is_ok());
    }

    #[test]
    fn test_bounding_box3_union() {
        let a = BoundingBox3::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0)).unwrap();
        let b = BoundingBox3::new(Point3::new(2.0, -1.0, 0.5), Point3::new(3.0, 0.0, 0.7)).unwrap();
        let u = a.union(&b);

        assert!(points3_approx_eq(&u.min, &Point3::new(0.0, -1.0, 0.0)));
        assert!(points3_approx_eq(&u.max, &Point3::new(3.0, 1.0, 1.0)));
        assert!(!a.intersects(&b));
        assert!(u.intersects(&a));
    }

    #[test]
    fn test_epsilon_checks() {
        assert!(check_angle_epsilon(0.0).is_ok());
        assert!(check_angle_epsilon(std::f64::consts::FRAC_PI_2).is_ok());
        assert!(check_angle_epsilon(-1e-3).is_err());
        assert!(check_angle_epsilon(2.0).is_err());
        assert!(check_angle_epsilon(f64::NAN).is_err());
        assert!(check_distance_epsilon(-1.0).is_err());
        assert!(check_positive("radius", 0.0).is_err());
        assert!(check_positive("radius", 0.5).is_ok());
    }
}

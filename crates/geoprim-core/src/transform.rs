//! 3D刚体变换
//!
//! 旋转加平移，不含缩放。定向盒、圆柱、椭球用它在局部坐标与世界坐标之间转换。

use crate::math::{Point3, UnitQuaternion, UnitVector3, Vector3};
use nalgebra::{Isometry3, Translation3};
use serde::{Deserialize, Serialize};

/// 3D刚体变换
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigidTransform3 {
    isometry: Isometry3<f64>,
}

impl RigidTransform3 {
    /// 创建单位变换
    pub fn identity() -> Self {
        Self {
            isometry: Isometry3::identity(),
        }
    }

    /// 创建平移变换
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            isometry: Isometry3::translation(dx, dy, dz),
        }
    }

    /// 创建绕原点的旋转变换
    pub fn rotation(axis: &UnitVector3, angle: f64) -> Self {
        Self {
            isometry: Isometry3::from_parts(
                Translation3::identity(),
                UnitQuaternion::from_axis_angle(axis, angle),
            ),
        }
    }

    /// 由位置与姿态创建
    pub fn from_parts(position: Point3, orientation: UnitQuaternion) -> Self {
        Self {
            isometry: Isometry3::from_parts(Translation3::from(position.coords), orientation),
        }
    }

    /// 组合两个变换（self 在后，other 在前）
    pub fn then(&self, other: &RigidTransform3) -> Self {
        Self {
            isometry: self.isometry * other.isometry,
        }
    }

    /// 变换一个点
    pub fn transform_point(&self, point: &Point3) -> Point3 {
        self.isometry.transform_point(point)
    }

    /// 变换一个向量（不受平移影响）
    pub fn transform_vector(&self, vector: &Vector3) -> Vector3 {
        self.isometry.transform_vector(vector)
    }

    /// 用逆变换变换一个点，即从世界坐标转到局部坐标
    pub fn inverse_transform_point(&self, point: &Point3) -> Point3 {
        self.isometry.inverse_transform_point(point)
    }

    /// 用逆变换变换一个向量
    pub fn inverse_transform_vector(&self, vector: &Vector3) -> Vector3 {
        self.isometry.inverse_transform_vector(vector)
    }

    /// 获取逆变换，刚体变换总是可逆
    pub fn inverse(&self) -> Self {
        Self {
            isometry: self.isometry.inverse(),
        }
    }

    /// 平移分量，即局部原点在世界坐标中的位置
    pub fn position(&self) -> Point3 {
        Point3::from(self.isometry.translation.vector)
    }

    /// 旋转分量
    pub fn orientation(&self) -> UnitQuaternion {
        self.isometry.rotation
    }

    /// 获取底层的 nalgebra 等距变换
    pub fn isometry(&self) -> &Isometry3<f64> {
        &self.isometry
    }
}

impl Default for RigidTransform3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Isometry3<f64>> for RigidTransform3 {
    fn from(isometry: Isometry3<f64>) -> Self {
        Self { isometry }
    }
}

impl std::ops::Mul for RigidTransform3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.then(&rhs)
    }
}

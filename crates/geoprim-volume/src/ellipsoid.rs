//! 椭球
//!
//! 局部坐标下满足 Σ (xᵢ/rᵢ)² = 1，位姿把局部坐标变换到世界坐标。
//! 把直线代入隐式方程得到关于参数的二次方程。

use crate::intersections::Intersections;
use crate::{solve_quadratic, LinearIntersection, PointQuery};
use geoprim_core::error::Result;
use geoprim_core::math::{check_positive, BoundingBox3, Point3, Vector3, ONE_TRILLIONTH};
use geoprim_core::transform::RigidTransform3;
use serde::{Deserialize, Serialize};

/// 3D椭球
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipsoid3 {
    radii: Vector3,
    pose: RigidTransform3,
}

impl Ellipsoid3 {
    /// 以原点为中心、与坐标轴对齐的椭球，任一半径非正时返回错误
    pub fn new(radii: Vector3) -> Result<Self> {
        check_positive("ellipsoid radius x", radii.x)?;
        check_positive("ellipsoid radius y", radii.y)?;
        check_positive("ellipsoid radius z", radii.z)?;
        Ok(Self {
            radii,
            pose: RigidTransform3::identity(),
        })
    }

    /// 球
    pub fn sphere(center: Point3, radius: f64) -> Result<Self> {
        Ok(Self::new(Vector3::repeat(radius))?
            .with_pose(RigidTransform3::translation(center.x, center.y, center.z)))
    }

    /// 设置位姿
    pub fn with_pose(mut self, pose: RigidTransform3) -> Self {
        self.pose = pose;
        self
    }

    pub fn radii(&self) -> Vector3 {
        self.radii
    }

    pub fn pose(&self) -> &RigidTransform3 {
        &self.pose
    }

    pub fn center(&self) -> Point3 {
        self.pose.position()
    }

    /// 把局部坐标缩放到单位球
    fn to_unit_sphere(&self, local: &Vector3) -> Vector3 {
        local.component_div(&self.radii)
    }

    /// 局部坐标下的点沿中心射线缩放到表面，返回 `(表面点, 缩放前的隐式半径)`
    ///
    /// 点在中心时无法确定方向，返回 `None`。
    fn radial_surface_point(&self, local: &Vector3) -> Option<(Vector3, f64)> {
        let scale = self.to_unit_sphere(local).norm();
        if scale == 0.0 {
            return None;
        }
        Some((local / scale, scale))
    }
}

impl LinearIntersection<3> for Ellipsoid3 {
    fn line_parameters(&self, point: &Point3, direction: &Vector3) -> Intersections<f64> {
        let length = direction.norm();
        if length < ONE_TRILLIONTH {
            tracing::trace!("ellipsoid test with a degenerate direction");
            return Intersections::none();
        }
        // 在单位方向上求解，再换算回原方向的参数
        let local_point = self.to_unit_sphere(&self.pose.inverse_transform_point(point).coords);
        let local_direction = self.to_unit_sphere(&self.pose.inverse_transform_vector(&(direction / length)));
        solve_quadratic(
            local_direction.norm_squared(),
            2.0 * local_point.dot(&local_direction),
            local_point.norm_squared() - 1.0,
        )
        .map(|t| t / length)
    }
}

/// 点查询以沿中心射线的径向缩放近似最近点，球上是精确的
impl PointQuery for Ellipsoid3 {
    fn contains_point(&self, query: &Point3, epsilon: f64) -> bool {
        let local = self.pose.inverse_transform_point(query).coords;
        match self.radial_surface_point(&local) {
            Some((surface, scale)) => scale <= 1.0 || (local - surface).norm() <= epsilon,
            None => true,
        }
    }

    fn signed_distance(&self, query: &Point3) -> f64 {
        let local = self.pose.inverse_transform_point(query).coords;
        match self.radial_surface_point(&local) {
            Some((surface, scale)) => {
                let distance = (local - surface).norm();
                if scale >= 1.0 {
                    distance
                } else {
                    -distance
                }
            }
            None => -self.radii.min(),
        }
    }

    fn orthogonal_projection(&self, query: &Point3) -> Option<Point3> {
        let local = self.pose.inverse_transform_point(query).coords;
        let (surface, scale) = self.radial_surface_point(&local)?;
        if scale <= 1.0 {
            return None;
        }
        Some(self.pose.transform_point(&Point3::from(surface)))
    }

    fn bounding_box(&self) -> BoundingBox3 {
        let rotation = self.pose.orientation().to_rotation_matrix();
        let matrix = rotation.matrix();
        let extents = Vector3::from_fn(|i, _| matrix.row(i).transpose().component_mul(&self.radii).norm());
        let center = self.center();
        BoundingBox3 {
            min: center - extents,
            max: center + extents,
        }
    }
}

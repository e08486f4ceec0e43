//! 定向盒
//!
//! 局部坐标下是以原点为中心的轴对齐盒，位姿把局部坐标变换到世界坐标。

use crate::aabb::{box_projection, box_signed_distance, slab_parameters};
use crate::intersections::Intersections;
use crate::{LinearIntersection, PointQuery};
use geoprim_core::error::Result;
use geoprim_core::math::{check_positive, BoundingBox3, Point3, Vector3};
use geoprim_core::transform::RigidTransform3;
use serde::{Deserialize, Serialize};

/// 3D定向盒
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientedBox3 {
    pose: RigidTransform3,
    size: Vector3,
}

impl OrientedBox3 {
    /// 创建定向盒，任一边长非正时返回错误
    pub fn new(pose: RigidTransform3, size: Vector3) -> Result<Self> {
        check_positive("box size x", size.x)?;
        check_positive("box size y", size.y)?;
        check_positive("box size z", size.z)?;
        Ok(Self { pose, size })
    }

    /// 与世界坐标轴对齐的盒
    pub fn axis_aligned(center: Point3, size: Vector3) -> Result<Self> {
        Self::new(RigidTransform3::translation(center.x, center.y, center.z), size)
    }

    pub fn pose(&self) -> &RigidTransform3 {
        &self.pose
    }

    pub fn size(&self) -> Vector3 {
        self.size
    }

    pub fn half_extents(&self) -> Vector3 {
        self.size * 0.5
    }

    pub fn center(&self) -> Point3 {
        self.pose.position()
    }

    /// 世界坐标下的八个顶点
    pub fn vertices(&self) -> [Point3; 8] {
        let h = self.half_extents();
        std::array::from_fn(|i| {
            let sign = |bit: usize| if i & bit == 0 { -1.0 } else { 1.0 };
            self.pose
                .transform_point(&Point3::new(sign(1) * h.x, sign(2) * h.y, sign(4) * h.z))
        })
    }
}

impl LinearIntersection<3> for OrientedBox3 {
    fn line_parameters(&self, point: &Point3, direction: &Vector3) -> Intersections<f64> {
        let local_point = self.pose.inverse_transform_point(point);
        let local_direction = self.pose.inverse_transform_vector(direction);
        let h = self.half_extents();
        slab_parameters(&Point3::from(-h), &Point3::from(h), &local_point, &local_direction)
    }
}

impl PointQuery for OrientedBox3 {
    fn contains_point(&self, query: &Point3, epsilon: f64) -> bool {
        let local = self.pose.inverse_transform_point(query);
        let h = self.half_extents();
        (0..3).all(|i| local[i].abs() <= h[i] + epsilon)
    }

    fn signed_distance(&self, query: &Point3) -> f64 {
        let local = self.pose.inverse_transform_point(query);
        box_signed_distance(&local.coords, &self.half_extents())
    }

    fn orthogonal_projection(&self, query: &Point3) -> Option<Point3> {
        let local = self.pose.inverse_transform_point(query);
        box_projection(&local.coords, &self.half_extents())
            .map(|projection| self.pose.transform_point(&Point3::from(projection)))
    }

    fn bounding_box(&self) -> BoundingBox3 {
        let rotation = self.pose.orientation().to_rotation_matrix();
        let h = self.half_extents();
        let extents = rotation.matrix().abs() * h;
        let center = self.center();
        BoundingBox3 {
            min: center - extents,
            max: center + extents,
        }
    }
}

//! 体类型枚举
//!
//! 碰撞检测代码持有异构的体集合时使用，按变体分发到具体实现。

use crate::cylinder::Cylinder3;
use crate::ellipsoid::Ellipsoid3;
use crate::intersections::Intersections;
use crate::oriented_box::OrientedBox3;
use crate::{LinearIntersection, PointQuery};
use geoprim_core::math::{BoundingBox3, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// 体类型枚举
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Volume {
    BoundingBox(BoundingBox3),
    OrientedBox(OrientedBox3),
    Cylinder(Cylinder3),
    Ellipsoid(Ellipsoid3),
}

impl Volume {
    /// 获取体的类型名称
    pub fn type_name(&self) -> &'static str {
        match self {
            Volume::BoundingBox(_) => "BoundingBox",
            Volume::OrientedBox(_) => "OrientedBox",
            Volume::Cylinder(_) => "Cylinder",
            Volume::Ellipsoid(_) => "Ellipsoid",
        }
    }
}

impl LinearIntersection<3> for Volume {
    fn line_parameters(&self, point: &Point3, direction: &Vector3) -> Intersections<f64> {
        match self {
            Volume::BoundingBox(b) => b.line_parameters(point, direction),
            Volume::OrientedBox(o) => o.line_parameters(point, direction),
            Volume::Cylinder(c) => c.line_parameters(point, direction),
            Volume::Ellipsoid(e) => e.line_parameters(point, direction),
        }
    }
}

impl PointQuery for Volume {
    fn contains_point(&self, query: &Point3, epsilon: f64) -> bool {
        match self {
            Volume::BoundingBox(b) => b.contains_point(query, epsilon),
            Volume::OrientedBox(o) => o.contains_point(query, epsilon),
            Volume::Cylinder(c) => c.contains_point(query, epsilon),
            Volume::Ellipsoid(e) => e.contains_point(query, epsilon),
        }
    }

    fn signed_distance(&self, query: &Point3) -> f64 {
        match self {
            Volume::BoundingBox(b) => b.signed_distance(query),
            Volume::OrientedBox(o) => o.signed_distance(query),
            Volume::Cylinder(c) => c.signed_distance(query),
            Volume::Ellipsoid(e) => e.signed_distance(query),
        }
    }

    fn orthogonal_projection(&self, query: &Point3) -> Option<Point3> {
        match self {
            Volume::BoundingBox(b) => b.orthogonal_projection(query),
            Volume::OrientedBox(o) => o.orthogonal_projection(query),
            Volume::Cylinder(c) => c.orthogonal_projection(query),
            Volume::Ellipsoid(e) => e.orthogonal_projection(query),
        }
    }

    fn bounding_box(&self) -> BoundingBox3 {
        match self {
            Volume::BoundingBox(b) => *b,
            Volume::OrientedBox(o) => o.bounding_box(),
            Volume::Cylinder(c) => c.bounding_box(),
            Volume::Ellipsoid(e) => e.bounding_box(),
        }
    }
}

impl From<BoundingBox3> for Volume {
    fn from(bbox: BoundingBox3) -> Self {
        Volume::BoundingBox(bbox)
    }
}

impl From<OrientedBox3> for Volume {
    fn from(obb: OrientedBox3) -> Self {
        Volume::OrientedBox(obb)
    }
}

impl From<Cylinder3> for Volume {
    fn from(cylinder: Cylinder3) -> Self {
        Volume::Cylinder(cylinder)
    }
}

impl From<Ellipsoid3> for Volume {
    fn from(ellipsoid: Ellipsoid3) -> Self {
        Volume::Ellipsoid(ellipsoid)
    }
}

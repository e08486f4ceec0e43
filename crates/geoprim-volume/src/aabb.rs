//! 直线与轴对齐包围盒的相交（平板法）
//!
//! 依次用每个轴的 `[min, max]` 平板收窄参数区间 `[t_entry, t_exit]`。
//! 直线恰好擦过棱或顶点时 `t_entry` 与 `t_exit` 只差舍入误差，
//! 在 `ONE_TRILLIONTH` 的相对容差内合并为一个交点。

use crate::intersections::Intersections;
use crate::{LinearIntersection, PointQuery};
use geoprim_core::math::{BoundingBox2, BoundingBox3, Point3, Vector3, ONE_TRILLIONTH};
use nalgebra::{Point, SVector};

/// 直线与盒 `[min, max]` 表面交点的参数
pub fn slab_parameters<const D: usize>(
    min: &Point<f64, D>,
    max: &Point<f64, D>,
    point: &Point<f64, D>,
    direction: &SVector<f64, D>,
) -> Intersections<f64> {
    let norm = direction.norm();
    if norm < ONE_TRILLIONTH {
        tracing::trace!("slab test with a degenerate direction");
        return Intersections::none();
    }

    let mut entry = f64::NEG_INFINITY;
    let mut exit = f64::INFINITY;
    for axis in 0..D {
        let d = direction[axis];
        if d.abs() < ONE_TRILLIONTH * norm {
            if point[axis] < min[axis] || point[axis] > max[axis] {
                return Intersections::none();
            }
            continue;
        }
        let t1 = (min[axis] - point[axis]) / d;
        let t2 = (max[axis] - point[axis]) / d;
        entry = entry.max(t1.min(t2));
        exit = exit.min(t1.max(t2));
    }

    let tolerance = ONE_TRILLIONTH * (1.0 + entry.abs().max(exit.abs()));
    if entry > exit + tolerance {
        Intersections::none()
    } else if exit - entry <= tolerance {
        Intersections::one(0.5 * (entry + exit))
    } else {
        Intersections::two(entry, exit)
    }
}

impl LinearIntersection<2> for BoundingBox2 {
    fn line_parameters(&self, point: &Point<f64, 2>, direction: &SVector<f64, 2>) -> Intersections<f64> {
        slab_parameters(&self.min, &self.max, point, direction)
    }
}

impl LinearIntersection<3> for BoundingBox3 {
    fn line_parameters(&self, point: &Point<f64, 3>, direction: &SVector<f64, 3>) -> Intersections<f64> {
        slab_parameters(&self.min, &self.max, point, direction)
    }
}

/// 点相对中心为 `center`、半尺寸为 `half_extents` 的盒的有向距离（盒的局部坐标）
pub(crate) fn box_signed_distance(local: &Vector3, half_extents: &Vector3) -> f64 {
    let excess = local.abs() - half_extents;
    let outside = excess.sup(&Vector3::zeros()).norm();
    let inside = excess.max().min(0.0);
    outside + inside
}

/// 盒外一点在盒表面上的最近点（盒的局部坐标），点在盒内时返回 `None`
pub(crate) fn box_projection(local: &Vector3, half_extents: &Vector3) -> Option<Vector3> {
    if (0..3).all(|i| local[i].abs() <= half_extents[i]) {
        return None;
    }
    Some(local.sup(&(-half_extents)).inf(half_extents))
}

impl PointQuery for BoundingBox3 {
    fn contains_point(&self, query: &Point3, epsilon: f64) -> bool {
        self.contains(query, epsilon)
    }

    fn signed_distance(&self, query: &Point3) -> f64 {
        box_signed_distance(&(query - self.center()), &(self.size() * 0.5))
    }

    fn orthogonal_projection(&self, query: &Point3) -> Option<Point3> {
        let center = self.center();
        box_projection(&(query - center), &(self.size() * 0.5)).map(|local| center + local)
    }

    fn bounding_box(&self) -> BoundingBox3 {
        *self
    }
}

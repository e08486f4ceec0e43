//! 两条直线或两条线段之间的最近点
//!
//! 最小化 `|P1 + s·d1 - P2 - t·d2|²`，由 2×2 法方程求 `(s, t)`。
//! 方向平行时方程奇异，退化为把第一条的点投影到第二条上；
//! 方向退化时退化为点到直线或点到点。

use crate::math::ONE_TRILLIONTH;
use nalgebra::{Point, SVector};

/// 两个图元之间的最近点对
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPoints<const D: usize> {
    /// 最近点之间的距离
    pub distance: f64,
    /// 第一个图元上的最近点
    pub on_first: Point<f64, D>,
    /// 第二个图元上的最近点
    pub on_second: Point<f64, D>,
    /// `on_first` 在第一个图元上的参数
    pub first_parameter: f64,
    /// `on_second` 在第二个图元上的参数
    pub second_parameter: f64,
}

impl<const D: usize> ClosestPoints<D> {
    fn from_parameters(
        point1: &Point<f64, D>,
        direction1: &SVector<f64, D>,
        s: f64,
        point2: &Point<f64, D>,
        direction2: &SVector<f64, D>,
        t: f64,
    ) -> Self {
        let on_first = point1 + direction1 * s;
        let on_second = point2 + direction2 * t;
        Self {
            distance: (on_first - on_second).norm(),
            on_first,
            on_second,
            first_parameter: s,
            second_parameter: t,
        }
    }
}

/// 法方程的系数
struct NormalEquations {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
}

impl NormalEquations {
    fn new<const D: usize>(
        point1: &Point<f64, D>,
        direction1: &SVector<f64, D>,
        point2: &Point<f64, D>,
        direction2: &SVector<f64, D>,
    ) -> Self {
        let w = point1 - point2;
        Self {
            a: direction1.norm_squared(),
            b: direction1.dot(direction2),
            c: direction2.norm_squared(),
            d: direction1.dot(&w),
            e: direction2.dot(&w),
        }
    }

    fn first_degenerate(&self) -> bool {
        self.a < ONE_TRILLIONTH * ONE_TRILLIONTH
    }

    fn second_degenerate(&self) -> bool {
        self.c < ONE_TRILLIONTH * ONE_TRILLIONTH
    }

    /// `ac - b²`，两方向夹角正弦平方乘以 `ac`
    fn determinant(&self) -> f64 {
        self.a * self.c - self.b * self.b
    }

    fn is_parallel(&self) -> bool {
        self.determinant() <= ONE_TRILLIONTH * self.a * self.c
    }

    /// 固定 `s` 时第二条上的最优参数
    fn second_for(&self, s: f64) -> f64 {
        (self.b * s + self.e) / self.c
    }

    /// 固定 `t` 时第一条上的最优参数
    fn first_for(&self, t: f64) -> f64 {
        (self.b * t - self.d) / self.a
    }
}

/// 两条直线之间的最近点
///
/// 返回的距离与直线的先后顺序、方向正负以及直线上点的选取无关。
pub fn closest_points_between_two_lines<const D: usize>(
    point1: &Point<f64, D>,
    direction1: &SVector<f64, D>,
    point2: &Point<f64, D>,
    direction2: &SVector<f64, D>,
) -> ClosestPoints<D> {
    let eq = NormalEquations::new(point1, direction1, point2, direction2);

    let (s, t) = match (eq.first_degenerate(), eq.second_degenerate()) {
        (true, true) => {
            tracing::trace!("both line directions are degenerate");
            (0.0, 0.0)
        }
        (true, false) => {
            tracing::trace!("first line direction is degenerate");
            (0.0, eq.second_for(0.0))
        }
        (false, true) => {
            tracing::trace!("second line direction is degenerate");
            (eq.first_for(0.0), 0.0)
        }
        (false, false) if eq.is_parallel() => {
            tracing::trace!("lines are parallel, projecting first point");
            (0.0, eq.second_for(0.0))
        }
        (false, false) => {
            let det = eq.determinant();
            (
                (eq.b * eq.e - eq.c * eq.d) / det,
                (eq.a * eq.e - eq.b * eq.d) / det,
            )
        }
    };

    ClosestPoints::from_parameters(point1, direction1, s, point2, direction2, t)
}

/// 两条直线之间的距离
pub fn distance_between_two_lines<const D: usize>(
    point1: &Point<f64, D>,
    direction1: &SVector<f64, D>,
    point2: &Point<f64, D>,
    direction2: &SVector<f64, D>,
) -> f64 {
    closest_points_between_two_lines(point1, direction1, point2, direction2).distance
}

/// 两条线段之间的最近点
///
/// 先求支撑线的最近点并截断 `s`，再以截断后的点重新投影到第二条线段求 `t`；
/// 若 `t` 被截断，再以新的 `t` 回投影并截断 `s`。两个参数都在 `[0, 1]` 内。
pub fn closest_points_between_two_segments<const D: usize>(
    start1: &Point<f64, D>,
    end1: &Point<f64, D>,
    start2: &Point<f64, D>,
    end2: &Point<f64, D>,
) -> ClosestPoints<D> {
    let direction1 = end1 - start1;
    let direction2 = end2 - start2;
    let eq = NormalEquations::new(start1, &direction1, start2, &direction2);

    let (s, t) = match (eq.first_degenerate(), eq.second_degenerate()) {
        (true, true) => {
            tracing::trace!("both segments are degenerate");
            (0.0, 0.0)
        }
        (true, false) => {
            tracing::trace!("first segment is degenerate");
            (0.0, eq.second_for(0.0).clamp(0.0, 1.0))
        }
        (false, true) => {
            tracing::trace!("second segment is degenerate");
            (eq.first_for(0.0).clamp(0.0, 1.0), 0.0)
        }
        (false, false) => {
            let s = if eq.is_parallel() {
                tracing::trace!("segments are parallel");
                0.0
            } else {
                ((eq.b * eq.e - eq.c * eq.d) / eq.determinant()).clamp(0.0, 1.0)
            };

            let t = eq.second_for(s);
            if t < 0.0 {
                (eq.first_for(0.0).clamp(0.0, 1.0), 0.0)
            } else if t > 1.0 {
                (eq.first_for(1.0).clamp(0.0, 1.0), 1.0)
            } else {
                (s, t)
            }
        }
    };

    ClosestPoints::from_parameters(start1, &direction1, s, start2, &direction2, t)
}

/// 两条线段之间的距离
pub fn distance_between_two_segments<const D: usize>(
    start1: &Point<f64, D>,
    end1: &Point<f64, D>,
    start2: &Point<f64, D>,
    end2: &Point<f64, D>,
) -> f64 {
    closest_points_between_two_segments(start1, end1, start2, end2).distance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{approx_eq, points3_approx_eq, Point3, Vector3};

    #[test]
    fn test_skew_lines() {
        let result = closest_points_between_two_lines(
            &Point3::new(0.0, 0.0, 0.0),
            &Vector3::new(1.0, 0.0, 0.0),
            &Point3::new(3.0, -2.0, 5.0),
            &Vector3::new(0.0, 4.0, 0.0),
        );
        assert!(approx_eq(result.distance, 5.0));
        assert!(points3_approx_eq(&result.on_first, &Point3::new(3.0, 0.0, 0.0)));
        assert!(points3_approx_eq(&result.on_second, &Point3::new(3.0, 0.0, 5.0)));
        assert!(approx_eq(result.second_parameter, 0.5));
    }

    #[test]
    fn test_intersecting_lines() {
        let result = closest_points_between_two_lines(
            &Point3::new(-1.0, -1.0, -1.0),
            &Vector3::new(1.0, 1.0, 1.0),
            &Point3::new(2.0, 0.0, 0.0),
            &Vector3::new(-1.0, 0.0, 0.0),
        );
        assert!(approx_eq(result.distance, 0.0));
        assert!(points3_approx_eq(&result.on_first, &Point3::origin()));
    }

    #[test]
    fn test_parallel_lines() {
        let p1 = Point3::new(0.0, 0.0, 0.0);
        let d = Vector3::new(0.0, 0.0, 2.0);
        let p2 = Point3::new(3.0, 4.0, 17.0);
        let result = closest_points_between_two_lines(&p1, &d, &p2, &-d);
        assert!(approx_eq(result.distance, 5.0));
        assert!(points3_approx_eq(&result.on_first, &p1));
        assert!(points3_approx_eq(&result.on_second, &Point3::new(3.0, 4.0, 0.0)));
    }

    #[test]
    fn test_degenerate_line() {
        let result = closest_points_between_two_lines(
            &Point3::new(0.0, 5.0, 0.0),
            &Vector3::zeros(),
            &Point3::new(1.0, 0.0, 0.0),
            &Vector3::new(1.0, 0.0, 0.0),
        );
        assert!(approx_eq(result.distance, 5.0));
        assert!(points3_approx_eq(&result.on_second, &Point3::origin()));

        let result = closest_points_between_two_lines(
            &Point3::new(0.0, 5.0, 0.0),
            &Vector3::zeros(),
            &Point3::new(1.0, 0.0, 0.0),
            &Vector3::zeros(),
        );
        assert!(approx_eq(result.distance, 26.0_f64.sqrt()));
    }

    #[test]
    fn test_segments_beyond_both_ends() {
        let result = closest_points_between_two_segments(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(2.0, 1.0, 0.0),
            &Point3::new(2.0, 3.0, 0.0),
        );
        assert!(points3_approx_eq(&result.on_first, &Point3::new(1.0, 0.0, 0.0)));
        assert!(points3_approx_eq(&result.on_second, &Point3::new(2.0, 1.0, 0.0)));
        assert!(approx_eq(result.distance, 2.0_f64.sqrt()));
    }

    #[test]
    fn test_segments_reversed() {
        let a = Point3::new(-1.0, 0.3, 0.0);
        let b = Point3::new(2.0, -0.5, 1.0);
        let c = Point3::new(0.5, 2.0, -1.0);
        let d = Point3::new(0.7, -2.0, 3.0);

        let forward = distance_between_two_segments(&a, &b, &c, &d);
        assert!(approx_eq(forward, distance_between_two_segments(&b, &a, &c, &d)));
        assert!(approx_eq(forward, distance_between_two_segments(&a, &b, &d, &c)));
        assert!(approx_eq(forward, distance_between_two_segments(&c, &d, &a, &b)));
    }

    #[test]
    fn test_parallel_overlapping_segments() {
        let start1 = Point3::new(0.0, 0.0, 0.0);
        let result = closest_points_between_two_segments(
            &start1,
            &Point3::new(4.0, 0.0, 0.0),
            &Point3::new(-1.0, 2.0, 0.0),
            &Point3::new(3.0, 2.0, 0.0),
        );
        assert!(approx_eq(result.distance, 2.0));
        assert!(points3_approx_eq(&result.on_first, &start1));
    }

    #[test]
    fn test_parallel_disjoint_segments() {
        let result = closest_points_between_two_segments(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(6.0, 0.0, 0.0),
            &Point3::new(5.0, 0.0, 0.0),
        );
        assert!(approx_eq(result.distance, 4.0));
        assert!(points3_approx_eq(&result.on_first, &Point3::new(1.0, 0.0, 0.0)));
        assert!(points3_approx_eq(&result.on_second, &Point3::new(5.0, 0.0, 0.0)));
    }

    #[test]
    fn test_degenerate_segment() {
        let p = Point3::new(0.5, 3.0, 0.0);
        let result = closest_points_between_two_segments(
            &p,
            &p,
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(1.0, 0.0, 0.0),
        );
        assert!(approx_eq(result.distance, 3.0));
        assert!(approx_eq(result.second_parameter, 0.5));
    }
}

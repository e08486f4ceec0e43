//! 2D直线、线段、射线的相交
//!
//! 先按两条直线求解参数，再检查参数是否落在各自的定义域内
//! （线段 `[0, 1]`，射线 `[0, ∞)`），越界时报告不相交而不是截断。
//! 共线时退化为沿公共方向的一维重叠判断，报告重叠区间中离第一个图元起点最近的点。

use crate::math::{Point2, Vector2, ONE_TEN_MILLIONTH, ONE_TRILLIONTH};
use crate::metrics::distance_from_point_to_line;
use crate::tools::percentage_along_line;

/// 参数区间端点的容差，使端点相交被包含在内
const PARAMETER_EPSILON: f64 = ONE_TRILLIONTH;

/// 两条直线的关系
enum LinePair {
    /// 相交于第一条直线参数 `t`、第二条直线参数 `u` 处
    Crossing { t: f64, u: f64 },
    Collinear,
    Parallel,
}

fn classify(point1: &Point2, direction1: &Vector2, point2: &Point2, direction2: &Vector2) -> LinePair {
    let cross = direction1.perp(direction2);
    if cross.abs() <= ONE_TRILLIONTH * direction1.norm() * direction2.norm() {
        return if distance_from_point_to_line(point2, point1, direction1) <= ONE_TEN_MILLIONTH {
            LinePair::Collinear
        } else {
            LinePair::Parallel
        };
    }
    let offset = point2 - point1;
    LinePair::Crossing {
        t: offset.perp(direction2) / cross,
        u: offset.perp(direction1) / cross,
    }
}

fn is_degenerate(direction: &Vector2) -> bool {
    direction.norm_squared() < ONE_TRILLIONTH * ONE_TRILLIONTH
}

#[inline]
fn within(value: f64, lower: f64, upper: f64) -> bool {
    value >= lower - PARAMETER_EPSILON && value <= upper + PARAMETER_EPSILON
}

/// 共线时第二个图元在第一个图元参数轴上所占区间与第一个图元定义域的重叠
///
/// 返回重叠区间的下界（离第一个图元起点最近的点），不重叠时返回 `None`。
fn collinear_overlap(first_domain: (f64, f64), second_interval: (f64, f64)) -> Option<f64> {
    let (a, b) = second_interval;
    let lower = first_domain.0.max(a.min(b));
    let upper = first_domain.1.min(a.max(b));
    (lower <= upper + PARAMETER_EPSILON).then_some(lower)
}

/// 第二个图元在第一条直线参数轴上的区间
fn interval_along(
    point1: &Point2,
    direction1: &Vector2,
    point2: &Point2,
    direction2: &Vector2,
    domain2: (f64, f64),
) -> (f64, f64) {
    let start = percentage_along_line(point2, point1, direction1);
    let rate = direction2.dot(direction1) / direction1.norm_squared();
    // 射线的无穷端按 rate 的符号发散
    (start + rate * domain2.0, start + rate * domain2.1)
}

/// 通用求解：两个图元分别带参数定义域
fn intersect(
    point1: &Point2,
    direction1: &Vector2,
    domain1: (f64, f64),
    point2: &Point2,
    direction2: &Vector2,
    domain2: (f64, f64),
) -> Option<Point2> {
    match (is_degenerate(direction1), is_degenerate(direction2)) {
        (true, true) => {
            tracing::trace!("both directions are degenerate");
            return ((point1 - point2).norm() <= ONE_TEN_MILLIONTH).then_some(*point1);
        }
        (true, false) => {
            tracing::trace!("first direction is degenerate");
            let u = percentage_along_line(point1, point2, direction2);
            let on = distance_from_point_to_line(point1, point2, direction2) <= ONE_TEN_MILLIONTH;
            return (on && within(u, domain2.0, domain2.1)).then_some(*point1);
        }
        (false, true) => {
            tracing::trace!("second direction is degenerate");
            let t = percentage_along_line(point2, point1, direction1);
            let on = distance_from_point_to_line(point2, point1, direction1) <= ONE_TEN_MILLIONTH;
            return (on && within(t, domain1.0, domain1.1)).then_some(*point2);
        }
        (false, false) => {}
    }

    match classify(point1, direction1, point2, direction2) {
        LinePair::Crossing { t, u } => {
            (within(t, domain1.0, domain1.1) && within(u, domain2.0, domain2.1))
                .then(|| point1 + direction1 * t)
        }
        LinePair::Collinear => {
            let interval = interval_along(point1, direction1, point2, direction2, domain2);
            collinear_overlap(domain1, interval).map(|t| point1 + direction1 * t)
        }
        LinePair::Parallel => None,
    }
}

const LINE: (f64, f64) = (f64::NEG_INFINITY, f64::INFINITY);
const RAY: (f64, f64) = (0.0, f64::INFINITY);
const SEGMENT: (f64, f64) = (0.0, 1.0);

// ========== 直线 (Line) ==========

/// 两条2D直线交点在第一条直线上的参数
///
/// 平行但不共线时返回 `None`；共线时返回 `Some(0.0)`，即第一条直线上的给定点。
pub fn percentage_of_intersection_between_two_lines2(
    point1: &Point2,
    direction1: &Vector2,
    point2: &Point2,
    direction2: &Vector2,
) -> Option<f64> {
    if is_degenerate(direction1) || is_degenerate(direction2) {
        tracing::trace!("line intersection with a degenerate direction");
        return None;
    }
    match classify(point1, direction1, point2, direction2) {
        LinePair::Crossing { t, .. } => Some(t),
        LinePair::Collinear => Some(0.0),
        LinePair::Parallel => None,
    }
}

/// 两条2D直线的交点，共线时返回第一条直线上的给定点
pub fn intersection_between_two_lines2(
    point1: &Point2,
    direction1: &Vector2,
    point2: &Point2,
    direction2: &Vector2,
) -> Option<Point2> {
    percentage_of_intersection_between_two_lines2(point1, direction1, point2, direction2)
        .map(|t| point1 + direction1 * t)
}

/// 2D直线与线段的交点，线段端点包含在内；共线时返回线段起点
pub fn intersection_between_line2_and_segment2(
    point_on_line: &Point2,
    line_direction: &Vector2,
    segment_start: &Point2,
    segment_end: &Point2,
) -> Option<Point2> {
    intersect(
        segment_start,
        &(segment_end - segment_start),
        SEGMENT,
        point_on_line,
        line_direction,
        LINE,
    )
}

/// 2D直线是否与线段相交
pub fn does_line2_intersect_segment2(
    point_on_line: &Point2,
    line_direction: &Vector2,
    segment_start: &Point2,
    segment_end: &Point2,
) -> bool {
    intersection_between_line2_and_segment2(point_on_line, line_direction, segment_start, segment_end)
        .is_some()
}

// ========== 线段 (Segment) ==========

/// 两条2D线段的交点，端点包含在内
///
/// 共线重叠时返回重叠部分中离第一条线段起点最近的点。
pub fn intersection_between_two_segments2(
    start1: &Point2,
    end1: &Point2,
    start2: &Point2,
    end2: &Point2,
) -> Option<Point2> {
    intersect(start1, &(end1 - start1), SEGMENT, start2, &(end2 - start2), SEGMENT)
}

/// 两条2D线段是否相交
pub fn do_segments2_intersect(start1: &Point2, end1: &Point2, start2: &Point2, end2: &Point2) -> bool {
    intersection_between_two_segments2(start1, end1, start2, end2).is_some()
}

// ========== 射线 (Ray) ==========

/// 2D射线与线段的交点，共线重叠时返回重叠部分中离射线起点最近的点
pub fn intersection_between_ray2_and_segment2(
    ray_origin: &Point2,
    ray_direction: &Vector2,
    segment_start: &Point2,
    segment_end: &Point2,
) -> Option<Point2> {
    intersect(
        ray_origin,
        ray_direction,
        RAY,
        segment_start,
        &(segment_end - segment_start),
        SEGMENT,
    )
}

/// 2D射线与直线的交点，共线时返回射线起点
pub fn intersection_between_ray2_and_line2(
    ray_origin: &Point2,
    ray_direction: &Vector2,
    point_on_line: &Point2,
    line_direction: &Vector2,
) -> Option<Point2> {
    intersect(ray_origin, ray_direction, RAY, point_on_line, line_direction, LINE)
}

/// 两条2D射线的交点，共线重叠时返回重叠部分中离第一条射线起点最近的点
pub fn intersection_between_two_rays2(
    origin1: &Point2,
    direction1: &Vector2,
    origin2: &Point2,
    direction2: &Vector2,
) -> Option<Point2> {
    intersect(origin1, direction1, RAY, origin2, direction2, RAY)
}

// ========== 角平分线 (Bisector) ==========

/// 两条2D直线的内角平分线，返回 `(平分线上的点, 平分线方向)`
///
/// 平分线方向与两条直线方向的点积都为正。平行不共线时返回 `None`，
/// 共线时返回第一条直线本身。
pub fn interior_bisector_of_two_lines2(
    point1: &Point2,
    direction1: &Vector2,
    point2: &Point2,
    direction2: &Vector2,
) -> Option<(Point2, Vector2)> {
    if is_degenerate(direction1) || is_degenerate(direction2) {
        tracing::trace!("bisector of a degenerate line");
        return None;
    }
    match classify(point1, direction1, point2, direction2) {
        LinePair::Crossing { t, .. } => Some((
            point1 + direction1 * t,
            direction1.normalize() + direction2.normalize(),
        )),
        LinePair::Collinear => Some((*point1, *direction1)),
        LinePair::Parallel => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{approx_eq, points_approx_eq};

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn test_two_lines() {
        let result = intersection_between_two_lines2(
            &p(0.0, 0.0),
            &Vector2::new(1.0, 1.0),
            &p(4.0, 0.0),
            &Vector2::new(0.0, -2.0),
        )
        .unwrap();
        assert!(points_approx_eq(&result, &p(4.0, 4.0)));

        // 平行不共线
        assert!(intersection_between_two_lines2(
            &p(0.0, 0.0),
            &Vector2::new(1.0, 1.0),
            &p(1.0, 0.0),
            &Vector2::new(-2.0, -2.0),
        )
        .is_none());

        // 共线返回第一条直线上的点
        let result = intersection_between_two_lines2(
            &p(1.0, 1.0),
            &Vector2::new(1.0, 1.0),
            &p(5.0, 5.0),
            &Vector2::new(-2.0, -2.0),
        )
        .unwrap();
        assert!(points_approx_eq(&result, &p(1.0, 1.0)));
    }

    #[test]
    fn test_percentage_of_intersection() {
        let t = percentage_of_intersection_between_two_lines2(
            &p(1.0, 0.0),
            &Vector2::new(2.0, 0.0),
            &p(4.0, -1.0),
            &Vector2::new(0.0, 1.0),
        )
        .unwrap();
        assert!(approx_eq(t, 1.5));
    }

    #[test]
    fn test_line_and_segment() {
        let line_point = p(0.0, 1.0);
        let line_direction = Vector2::new(1.0, 0.0);

        let hit = intersection_between_line2_and_segment2(&line_point, &line_direction, &p(3.0, 0.0), &p(3.0, 2.0))
            .unwrap();
        assert!(points_approx_eq(&hit, &p(3.0, 1.0)));

        // 端点包含在内
        let hit = intersection_between_line2_and_segment2(&line_point, &line_direction, &p(3.0, 1.0), &p(3.0, 2.0))
            .unwrap();
        assert!(points_approx_eq(&hit, &p(3.0, 1.0)));

        assert!(!does_line2_intersect_segment2(&line_point, &line_direction, &p(3.0, 1.5), &p(3.0, 2.0)));

        // 共线返回线段起点
        let hit = intersection_between_line2_and_segment2(&line_point, &line_direction, &p(7.0, 1.0), &p(-2.0, 1.0))
            .unwrap();
        assert!(points_approx_eq(&hit, &p(7.0, 1.0)));
    }

    #[test]
    fn test_two_segments() {
        let hit = intersection_between_two_segments2(&p(0.0, 0.0), &p(2.0, 2.0), &p(0.0, 2.0), &p(2.0, 0.0)).unwrap();
        assert!(points_approx_eq(&hit, &p(1.0, 1.0)));

        // 支撑线相交但交点在第二条线段之外
        assert!(!do_segments2_intersect(&p(0.0, 0.0), &p(2.0, 2.0), &p(0.0, 2.0), &p(0.9, 1.1)));
        // 共享端点
        assert!(do_segments2_intersect(&p(0.0, 0.0), &p(1.0, 0.0), &p(1.0, 0.0), &p(1.0, 5.0)));
    }

    #[test]
    fn test_collinear_segments() {
        let origin = p(1.0, 1.0);
        let direction = Vector2::new(0.6, 0.8);
        let at = |t: f64| origin + direction * t;

        assert!(!do_segments2_intersect(&at(0.0), &at(1.0), &at(2.0), &at(3.0)));

        let hit = intersection_between_two_segments2(&at(0.0), &at(1.0), &at(0.5), &at(1.5)).unwrap();
        assert!(points_approx_eq(&hit, &at(0.5)));

        // 第一条线段起点在第二条线段内时报告起点
        let hit = intersection_between_two_segments2(&at(0.7), &at(0.2), &at(0.0), &at(1.0)).unwrap();
        assert!(points_approx_eq(&hit, &at(0.7)));

        // 平行但有偏移
        let shifted = Vector2::new(-0.8, 0.6) * 0.01;
        assert!(!do_segments2_intersect(&at(0.0), &at(1.0), &(at(0.5) + shifted), &(at(1.5) + shifted)));
    }

    #[test]
    fn test_degenerate_segments() {
        assert!(do_segments2_intersect(&p(0.5, 0.0), &p(0.5, 0.0), &p(0.0, 0.0), &p(1.0, 0.0)));
        assert!(!do_segments2_intersect(&p(0.5, 0.1), &p(0.5, 0.1), &p(0.0, 0.0), &p(1.0, 0.0)));
        assert!(do_segments2_intersect(&p(0.5, 0.1), &p(0.5, 0.1), &p(0.5, 0.1), &p(0.5, 0.1)));
    }

    #[test]
    fn test_ray_and_segment() {
        let origin = p(0.0, 0.0);
        let direction = Vector2::new(1.0, 0.0);

        let hit = intersection_between_ray2_and_segment2(&origin, &direction, &p(2.0, -1.0), &p(2.0, 1.0)).unwrap();
        assert!(points_approx_eq(&hit, &p(2.0, 0.0)));
        assert!(intersection_between_ray2_and_segment2(&origin, &direction, &p(-2.0, -1.0), &p(-2.0, 1.0)).is_none());

        // 共线：射线起点在线段内
        let hit = intersection_between_ray2_and_segment2(&origin, &direction, &p(-1.0, 0.0), &p(3.0, 0.0)).unwrap();
        assert!(points_approx_eq(&hit, &origin));
        // 共线：线段在射线前方
        let hit = intersection_between_ray2_and_segment2(&origin, &direction, &p(5.0, 0.0), &p(3.0, 0.0)).unwrap();
        assert!(points_approx_eq(&hit, &p(3.0, 0.0)));
        // 共线：线段在射线后方
        assert!(intersection_between_ray2_and_segment2(&origin, &direction, &p(-5.0, 0.0), &p(-3.0, 0.0)).is_none());
    }

    #[test]
    fn test_rays() {
        let hit = intersection_between_two_rays2(
            &p(0.0, 0.0),
            &Vector2::new(1.0, 0.0),
            &p(3.0, 3.0),
            &Vector2::new(0.0, -1.0),
        )
        .unwrap();
        assert!(points_approx_eq(&hit, &p(3.0, 0.0)));

        assert!(intersection_between_two_rays2(
            &p(0.0, 0.0),
            &Vector2::new(1.0, 0.0),
            &p(3.0, 3.0),
            &Vector2::new(0.0, 1.0),
        )
        .is_none());

        // 共线同向
        let hit = intersection_between_two_rays2(
            &p(0.0, 0.0),
            &Vector2::new(1.0, 0.0),
            &p(4.0, 0.0),
            &Vector2::new(2.0, 0.0),
        )
        .unwrap();
        assert!(points_approx_eq(&hit, &p(4.0, 0.0)));

        // 共线相背
        assert!(intersection_between_two_rays2(
            &p(0.0, 0.0),
            &Vector2::new(1.0, 0.0),
            &p(-4.0, 0.0),
            &Vector2::new(-2.0, 0.0),
        )
        .is_none());

        // 共线相向
        let hit = intersection_between_two_rays2(
            &p(0.0, 0.0),
            &Vector2::new(1.0, 0.0),
            &p(4.0, 0.0),
            &Vector2::new(-1.0, 0.0),
        )
        .unwrap();
        assert!(points_approx_eq(&hit, &p(0.0, 0.0)));

        let hit = intersection_between_ray2_and_line2(
            &p(0.0, 0.0),
            &Vector2::new(1.0, 1.0),
            &p(0.0, 2.0),
            &Vector2::new(1.0, 0.0),
        )
        .unwrap();
        assert!(points_approx_eq(&hit, &p(2.0, 2.0)));
    }

    #[test]
    fn test_interior_bisector() {
        let (point, direction) = interior_bisector_of_two_lines2(
            &p(-1.0, 0.0),
            &Vector2::new(1.0, 0.0),
            &p(0.0, -3.0),
            &Vector2::new(0.0, 1.0),
        )
        .unwrap();
        assert!(points_approx_eq(&point, &p(0.0, 0.0)));
        assert!(approx_eq(direction.x, direction.y));
        assert!(direction.x > 0.0);

        assert!(interior_bisector_of_two_lines2(
            &p(0.0, 0.0),
            &Vector2::new(1.0, 0.0),
            &p(0.0, 1.0),
            &Vector2::new(1.0, 0.0),
        )
        .is_none());
    }
}

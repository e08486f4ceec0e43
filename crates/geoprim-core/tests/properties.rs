//! 对称性、重新标记、刚体变换不变性、参数截断、退化输入的性质测试

use geoprim_core::prelude::*;
use proptest::prelude::*;

fn coordinate() -> impl Strategy<Value = f64> {
    -100.0..100.0f64
}

fn point3() -> impl Strategy<Value = Point3> {
    (coordinate(), coordinate(), coordinate()).prop_map(|(x, y, z)| Point3::new(x, y, z))
}

fn point2() -> impl Strategy<Value = Point2> {
    (coordinate(), coordinate()).prop_map(|(x, y)| Point2::new(x, y))
}

fn rigid_transform() -> impl Strategy<Value = RigidTransform3> {
    (point3(), point3(), -3.0..3.0f64).prop_filter_map("rotation axis is degenerate", |(position, axis, angle)| {
        let axis = nalgebra::Unit::try_new(axis.coords, 1e-3)?;
        Some(RigidTransform3::translation(position.x, position.y, position.z).then(&RigidTransform3::rotation(&axis, angle)))
    })
}

fn direction3() -> impl Strategy<Value = Vector3> {
    (-10.0..10.0f64, -10.0..10.0f64, -10.0..10.0f64)
        .prop_filter("direction is too short", |(x, y, z)| x.hypot(*y).hypot(*z) > 1e-2)
        .prop_map(|(x, y, z)| Vector3::new(x, y, z))
}

/// 两条直线的方向：相交或异面、平行、其中一条退化
fn line_directions() -> impl Strategy<Value = (Vector3, Vector3)> {
    prop_oneof![
        (direction3(), direction3()).prop_filter("directions are nearly parallel", |(first, second)| {
            first.cross(second).norm() > 1e-2 * first.norm() * second.norm()
        }),
        (direction3(), prop_oneof![-3.0..-0.1f64, 0.1..3.0f64]).prop_map(|(first, scale)| (first, first * scale)),
        direction3().prop_map(|second| (Vector3::zeros(), second)),
        direction3().prop_map(|first| (first, Vector3::zeros())),
    ]
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-7 * (1.0 + a.abs().max(b.abs()))
}

proptest! {
    #[test]
    fn segment_distance_is_symmetric(a in point3(), b in point3(), c in point3(), d in point3()) {
        let forward = distance_between_two_segments(&a, &b, &c, &d);
        let backward = distance_between_two_segments(&c, &d, &a, &b);
        prop_assert!(close(forward, backward), "{} != {}", forward, backward);
    }

    #[test]
    fn line_distance_is_symmetric(a in point3(), b in point3(), c in point3(), d in point3()) {
        let forward = distance_between_two_lines(&a, &(b - a), &c, &(d - c));
        let backward = distance_between_two_lines(&c, &(d - c), &a, &(b - a));
        prop_assert!(close(forward, backward), "{} != {}", forward, backward);
    }

    #[test]
    fn line_distance_ignores_direction_sign_and_anchor(
        p1 in point3(),
        p2 in point3(),
        (d1, d2) in line_directions(),
        k in -3.0..3.0f64,
    ) {
        let distance = distance_between_two_lines(&p1, &d1, &p2, &d2);
        let flipped_first = distance_between_two_lines(&p1, &(-d1), &p2, &d2);
        let flipped_second = distance_between_two_lines(&p1, &d1, &p2, &(-d2));
        let slid_first = distance_between_two_lines(&(p1 + d1 * k), &d1, &p2, &d2);
        let slid_second = distance_between_two_lines(&p1, &d1, &(p2 + d2 * k), &d2);
        let swapped = distance_between_two_lines(&p2, &d2, &p1, &d1);

        prop_assert!(close(distance, flipped_first), "{} != {}", distance, flipped_first);
        prop_assert!(close(distance, flipped_second), "{} != {}", distance, flipped_second);
        prop_assert!(close(distance, slid_first), "{} != {}", distance, slid_first);
        prop_assert!(close(distance, slid_second), "{} != {}", distance, slid_second);
        prop_assert!(close(distance, swapped), "{} != {}", distance, swapped);
    }

    #[test]
    fn reversing_a_segment_keeps_distances(q in point3(), a in point3(), b in point3(), c in point3(), d in point3()) {
        prop_assert!(close(
            distance_from_point_to_segment(&q, &a, &b),
            distance_from_point_to_segment(&q, &b, &a),
        ));
        prop_assert!(close(
            distance_between_two_segments(&a, &b, &c, &d),
            distance_between_two_segments(&b, &a, &d, &c),
        ));
    }

    #[test]
    fn flipping_a_line_keeps_distance(q in point3(), p in point3(), direction in point3()) {
        prop_assert!(close(
            distance_from_point_to_line(&q, &p, &direction.coords),
            distance_from_point_to_line(&q, &p, &(-direction.coords)),
        ));
    }

    #[test]
    fn reversing_segments2_keeps_intersection(a in point2(), b in point2(), c in point2(), d in point2()) {
        let forward = do_segments2_intersect(&a, &b, &c, &d);
        prop_assert_eq!(forward, do_segments2_intersect(&b, &a, &c, &d));
        prop_assert_eq!(forward, do_segments2_intersect(&c, &d, &a, &b));
    }

    #[test]
    fn rigid_transform_keeps_distances(
        transform in rigid_transform(),
        a in point3(),
        b in point3(),
        c in point3(),
        d in point3(),
    ) {
        let moved = |p: &Point3| transform.transform_point(p);
        prop_assert!(close(
            distance_between_two_segments(&a, &b, &c, &d),
            distance_between_two_segments(&moved(&a), &moved(&b), &moved(&c), &moved(&d)),
        ));
        prop_assert!(close(
            distance_from_point_to_line(&a, &b, &(c - b)),
            distance_from_point_to_line(&moved(&a), &moved(&b), &(moved(&c) - moved(&b))),
        ));
        prop_assert!(close(
            angle_between_vectors3(&(b - a), &(d - c)),
            angle_between_vectors3(&transform.transform_vector(&(b - a)), &transform.transform_vector(&(d - c))),
        ));
    }

    #[test]
    fn rigid_transform_moves_projections(transform in rigid_transform(), q in point3(), a in point3(), b in point3()) {
        let projection = orthogonal_projection_on_segment(&q, &a, &b);
        let moved = orthogonal_projection_on_segment(
            &transform.transform_point(&q),
            &transform.transform_point(&a),
            &transform.transform_point(&b),
        );
        prop_assert!((transform.transform_point(&projection) - moved).norm() < 1e-7);
    }

    #[test]
    fn segment_parameters_are_clamped(a in point3(), b in point3(), c in point3(), d in point3(), q in point3()) {
        let closest = closest_points_between_two_segments(&a, &b, &c, &d);
        prop_assert!((0.0..=1.0).contains(&closest.first_parameter));
        prop_assert!((0.0..=1.0).contains(&closest.second_parameter));
        prop_assert!((0.0..=1.0).contains(&closest_parameter_on_segment(&q, &a, &b)));
    }

    #[test]
    fn ray_projection_stays_in_front(q in point3(), origin in point3(), direction in point3()) {
        if let Some(projection) = orthogonal_projection_on_ray(&q, &origin, &direction.coords) {
            prop_assert!((projection - origin).dot(&direction.coords) >= -1e-9);
        }
    }

    #[test]
    fn degenerate_direction_falls_back_to_point(q in point3(), p in point3()) {
        let zero = Vector3::zeros();
        let expected = (q - p).norm();
        prop_assert!(close(distance_from_point_to_line(&q, &p, &zero), expected));
        prop_assert!(close(distance_from_point_to_ray(&q, &p, &zero), expected));
        prop_assert!(close(distance_from_point_to_segment(&q, &p, &p), expected));
        prop_assert!(close(distance_between_two_segments(&q, &q, &p, &p), expected));
        prop_assert!(distance_between_two_lines(&q, &zero, &p, &zero).is_finite());
    }
}

//! Continuous (swept) collision test
//!
//! A fast thin body can pass entirely through a target between two ticks;
//! testing only the endpoint positions would miss the hit. Instead the
//! segment from the body's previous position to its current position is
//! tested against the target sphere expanded by the body's own radius,
//! yielding the first intersection point along the path.

use glam::Vec3;

/// First intersection of the segment `p0 -> p1` with a sphere, if any.
///
/// Returns `p0` itself when the segment starts inside the sphere.
pub fn segment_sphere_hit(p0: Vec3, p1: Vec3, center: Vec3, radius: f32) -> Option<Vec3> {
    let d = p1 - p0;
    let m = p0 - center;

    let c = m.length_squared() - radius * radius;
    if c <= 0.0 {
        // Already inside at the start of the tick.
        return Some(p0);
    }

    let a = d.length_squared();
    if a <= f32::EPSILON {
        // Degenerate segment outside the sphere.
        return None;
    }

    let b = m.dot(d);
    if b > 0.0 {
        // Moving away from the sphere center.
        return None;
    }

    let disc = b * b - a * c;
    if disc < 0.0 {
        return None;
    }

    let t = (-b - disc.sqrt()) / a;
    if !(0.0..=1.0).contains(&t) {
        return None;
    }
    Some(p0 + d * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_tunneling_through_small_sphere() {
        // Target at origin, radius 2; one tick carries the shot from
        // z=10 to z=-10. Neither endpoint is inside, but the path is.
        let hit = segment_sphere_hit(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(0.0, 0.0, -10.0),
            Vec3::ZERO,
            2.0,
        )
        .expect("swept test must catch the crossing");
        assert!((hit.z - 2.0).abs() < 1e-3, "entry point near z=2, got {}", hit.z);
    }

    #[test]
    fn test_miss_parallel_path() {
        let hit = segment_sphere_hit(
            Vec3::new(5.0, 0.0, 10.0),
            Vec3::new(5.0, 0.0, -10.0),
            Vec3::ZERO,
            2.0,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_start_inside_returns_start() {
        let p0 = Vec3::new(0.5, 0.0, 0.0);
        let hit = segment_sphere_hit(p0, Vec3::new(10.0, 0.0, 0.0), Vec3::ZERO, 2.0);
        assert_eq!(hit, Some(p0));
    }

    #[test]
    fn test_segment_stops_short() {
        // Path toward the sphere but ending before reaching it.
        let hit = segment_sphere_hit(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::ZERO,
            2.0,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_moving_away_is_no_hit() {
        let hit = segment_sphere_hit(
            Vec3::new(0.0, 0.0, 3.0),
            Vec3::new(0.0, 0.0, 30.0),
            Vec3::ZERO,
            2.0,
        );
        assert!(hit.is_none());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn vec3() -> impl Strategy<Value = Vec3> {
            (-100.0f32..100.0, -100.0f32..100.0, -100.0f32..100.0)
                .prop_map(|(x, y, z)| Vec3::new(x, y, z))
        }

        proptest! {
            // A reported hit always lies on the segment and, unless the
            // segment started inside, on the sphere surface.
            #[test]
            fn hit_point_is_on_segment_and_surface(
                p0 in vec3(),
                p1 in vec3(),
                center in vec3(),
                radius in 0.5f32..20.0,
            ) {
                if let Some(hit) = segment_sphere_hit(p0, p1, center, radius) {
                    let d = p1 - p0;
                    if d.length_squared() > f32::EPSILON {
                        let t = (hit - p0).dot(d) / d.length_squared();
                        prop_assert!((-1e-3..=1.0 + 1e-3).contains(&t));
                    }
                    let started_inside = (p0 - center).length() <= radius;
                    if started_inside {
                        prop_assert_eq!(hit, p0);
                    } else {
                        let err = ((hit - center).length() - radius).abs();
                        let tol = radius * 1e-2 + d.length() * 1e-3 + 1e-2;
                        prop_assert!(err < tol, "surface error {}", err);
                    }
                }
            }

            // A segment built to pass within the sphere is always reported.
            // The crossing point is chosen first and the segment constructed
            // through it, so every generated case is a genuine hit.
            #[test]
            fn close_approach_is_detected(
                center in vec3(),
                dir_raw in vec3(),
                off_raw in vec3(),
                radius in 1.0f32..20.0,
                frac in 0.0f32..0.9,
                len0 in 0.1f32..80.0,
                len1 in 0.1f32..80.0,
            ) {
                prop_assume!(dir_raw.length() > 1e-3);
                let dir = dir_raw.normalize();
                let side = off_raw.cross(dir);
                prop_assume!(side.length() > 1e-3);
                // Closest approach sits strictly inside the sphere, offset
                // perpendicular to the travel direction.
                let through = center + side.normalize() * (radius * frac);
                let p0 = through - dir * len0;
                let p1 = through + dir * len1;
                prop_assert!(segment_sphere_hit(p0, p1, center, radius).is_some());
            }
        }
    }
}

//! Catmull-Rom interpolation through the bin points.

use glam::Vec2;

/// Evaluate the uniform Catmull-Rom segment between `p1` and `p2` at `t` in [0, 1].
///
/// P(0) = p1 and P(1) = p2.
pub fn catmull_rom(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let t2 = t * t;
    let t3 = t2 * t;

    0.5 * ((2.0 * p1)
        + (p2 - p0) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}

/// Interpolate a polyline through every point, `steps` samples per segment.
///
/// The first and last points stand in for their own missing outer
/// neighbours, so the curve spans the full point range. Output contains
/// `(len - 1) * steps + 1` points and ends exactly on the last input point.
pub fn interpolate(points: &[Vec2], steps: usize) -> Vec<Vec2> {
    match points.len() {
        0 => return Vec::new(),
        1 => return points.to_vec(),
        _ => {}
    }
    let steps = steps.max(1);
    let last = points.len() - 1;
    let mut curve = Vec::with_capacity(last * steps + 1);

    for i in 0..last {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(last)];

        for step in 0..steps {
            let t = step as f32 / steps as f32;
            curve.push(catmull_rom(p0, p1, p2, p3, t));
        }
    }
    curve.push(points[last]);

    curve
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn test_endpoints_interpolated_exactly() {
        let quads = [
            [Vec2::new(0.0, 0.0), Vec2::new(1.0, 5.0), Vec2::new(2.0, -3.0), Vec2::new(3.0, 8.0)],
            [Vec2::new(-10.0, 2.0), Vec2::new(40.0, 700.0), Vec2::new(41.0, 0.0), Vec2::new(900.0, 900.0)],
            [Vec2::splat(1.0), Vec2::splat(1.0), Vec2::splat(1.0), Vec2::splat(1.0)],
        ];
        for [p0, p1, p2, p3] in quads {
            assert!(close(catmull_rom(p0, p1, p2, p3, 0.0), p1));
            assert!(close(catmull_rom(p0, p1, p2, p3, 1.0), p2));
        }
    }

    #[test]
    fn test_collinear_points_stay_on_line() {
        let p = |x: f32| Vec2::new(x, 2.0 * x + 1.0);
        let mid = catmull_rom(p(0.0), p(1.0), p(2.0), p(3.0), 0.5);
        assert!(close(mid, p(1.5)));
    }

    #[test]
    fn test_interpolate_covers_all_points() {
        let points: Vec<Vec2> = (0..5).map(|i| Vec2::new(i as f32 * 10.0, (i * i) as f32)).collect();
        let curve = interpolate(&points, 10);

        assert_eq!(curve.len(), 4 * 10 + 1);
        assert!(close(curve[0], points[0]));
        assert!(close(*curve.last().unwrap(), points[4]));
        // Every input point is hit at a segment boundary
        for (i, point) in points.iter().enumerate() {
            assert!(close(curve[i * 10], *point));
        }
    }

    #[test]
    fn test_interpolate_degenerate_inputs() {
        assert!(interpolate(&[], 10).is_empty());
        let single = [Vec2::new(3.0, 4.0)];
        assert_eq!(interpolate(&single, 10), single.to_vec());

        let pair = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0)];
        let curve = interpolate(&pair, 4);
        assert_eq!(curve.len(), 5);
        assert!(close(curve[2], Vec2::new(5.0, 5.0)));
    }
}

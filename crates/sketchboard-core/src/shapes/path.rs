use kurbo::Point;

/// Ramer-Douglas-Peucker line simplification.
///
/// The first and last samples always survive. A tolerance of zero or less
/// keeps every sample.
pub fn simplify_path(points: &[Point], tolerance: f64) -> Vec<Point> {
    if points.len() < 3 || tolerance <= 0.0 {
        return points.to_vec();
    }

    let first = points[0];
    let last = points[points.len() - 1];

    let (max_index, max_dist) = points[1..points.len() - 1]
        .iter()
        .enumerate()
        .map(|(i, p)| (i + 1, perpendicular_distance(*p, first, last)))
        .fold((0, 0.0), |best, cur| if cur.1 > best.1 { cur } else { best });

    if max_dist > tolerance {
        let mut left = simplify_path(&points[..=max_index], tolerance);
        let right = simplify_path(&points[max_index..], tolerance);
        // junction sample appears in both halves
        left.pop();
        left.extend(right);
        left
    } else {
        vec![first, last]
    }
}

/// Distance from `point` to the infinite line through `start` and `end`.
/// Degenerates to point distance when the two coincide.
pub fn perpendicular_distance(point: Point, start: Point, end: Point) -> f64 {
    let seg = end - start;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return (point - start).hypot();
    }
    (point - start).cross(seg).abs() / len_sq.sqrt()
}

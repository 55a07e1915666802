//! Polygon helpers shared by authoring and the style transforms
//!
//! Coordinates are y-up font units throughout. A clockwise polygon has a
//! negative signed area.

use kurbo::{Point, Vec2};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Points closer than this are treated as the same point.
const POINT_EPSILON: f64 = 1e-6;

/// A 32-bit FNV-1a hash of `key`.
pub(crate) fn seed_for(key: &str) -> u64 {
    let hash = key.bytes().fold(0x811C_9DC5u32, |hash, byte| {
        (hash ^ byte as u32).wrapping_mul(0x0100_0193)
    });
    hash as u64
}

/// A deterministic generator for the glyph identified by `key`.
pub(crate) fn rng_for(key: &str) -> StdRng {
    StdRng::seed_from_u64(seed_for(key))
}

pub(crate) fn uniform(rng: &mut StdRng, low: f64, high: f64) -> f64 {
    rng.gen_range(low..=high)
}

pub(crate) fn jitter(rng: &mut StdRng, point: Point, amount: f64) -> Point {
    let dx = uniform(rng, -amount, amount);
    let dy = uniform(rng, -amount, amount);
    Point::new(point.x + dx, point.y + dy)
}

/// The shoelace area; positive for counter-clockwise polygons.
pub(crate) fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].to_vec2().cross(points[(i + 1) % n].to_vec2()))
        .sum::<f64>()
        * 0.5
}

/// The convex hull of `points`, clockwise, without collinear points.
pub(crate) fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    sorted.dedup_by(|a, b| a.distance(*b) < POINT_EPSILON);
    if sorted.len() < 3 {
        return sorted;
    }

    // monotone chain: lower then upper hull, counter-clockwise
    let turn = |o: Point, a: Point, b: Point| (a - o).cross(b - o);
    let half_hull = |points: &mut dyn Iterator<Item = Point>| {
        let mut half: Vec<Point> = Vec::new();
        for pt in points {
            while half.len() >= 2 && turn(half[half.len() - 2], half[half.len() - 1], pt) <= 0.0 {
                half.pop();
            }
            half.push(pt);
        }
        half.pop();
        half
    };
    let mut hull = half_hull(&mut sorted.iter().copied());
    hull.extend(half_hull(&mut sorted.iter().rev().copied()));
    hull.reverse();
    hull
}

/// Remove consecutive duplicate points, including a closing point that
/// repeats the first.
pub(crate) fn dedup_closed(points: &mut Vec<Point>) {
    points.dedup_by(|a, b| a.distance(*b) < POINT_EPSILON);
    while points.len() > 1
        && points[0].distance(points[points.len() - 1]) < POINT_EPSILON
    {
        points.pop();
    }
}

/// Offset a closed polygon by `distance` to the left of its direction of
/// travel, with mitered joins.
///
/// For a clockwise polygon the left is the outside. Convex corners whose
/// miter would reach further than `miter_limit * distance` are bevelled;
/// reflex corners always miter.
pub(crate) fn offset_polygon(points: &[Point], distance: f64, miter_limit: f64) -> Vec<Point> {
    let n = points.len();
    if n < 3 || distance == 0.0 {
        return points.to_vec();
    }
    let mut out = Vec::with_capacity(n + n / 2);
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let cur = points[i];
        let next = points[(i + 1) % n];
        let incoming = (cur - prev).normalize();
        let outgoing = (next - cur).normalize();
        let n0 = incoming.turn_90();
        let n1 = outgoing.turn_90();
        let cos = n0.dot(n1);
        // a right turn puts the left-hand offset on the outside of the corner
        let outer = incoming.cross(outgoing) < 0.0;
        let reversal = cos <= -1.0 + 1e-9;
        let miter_ratio = if reversal {
            f64::INFINITY
        } else {
            (2.0 / (1.0 + cos)).sqrt()
        };
        if reversal || (outer && miter_ratio > miter_limit) {
            out.push(cur + n0 * distance);
            out.push(cur + n1 * distance);
        } else {
            let miter: Vec2 = (n0 + n1) * (distance / (1.0 + cos));
            out.push(cur + miter);
        }
    }
    out
}

/// `true` if two edges of the closed polygon that do not share a vertex
/// touch or cross.
pub(crate) fn self_intersects(points: &[Point]) -> bool {
    let n = points.len();
    if n < 4 {
        return false;
    }
    let edge = |i: usize| (points[i], points[(i + 1) % n]);
    for i in 0..n {
        for j in i + 2..n {
            // the first and last edges share vertex 0
            if i == 0 && j == n - 1 {
                continue;
            }
            let (a0, a1) = edge(i);
            let (b0, b1) = edge(j);
            if segments_intersect(a0, a1, b0, b1) {
                return true;
            }
        }
    }
    false
}

fn segments_intersect(a0: Point, a1: Point, b0: Point, b1: Point) -> bool {
    let orient = |p: Point, q: Point, r: Point| (q - p).cross(r - p);
    let d1 = orient(b0, b1, a0);
    let d2 = orient(b0, b1, a1);
    let d3 = orient(a0, a1, b0);
    let d4 = orient(a0, a1, b1);
    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }
    let on_segment = |p: Point, q: Point, r: Point| {
        r.x >= p.x.min(q.x) && r.x <= p.x.max(q.x) && r.y >= p.y.min(q.y) && r.y <= p.y.max(q.y)
    };
    (d1 == 0.0 && on_segment(b0, b1, a0))
        || (d2 == 0.0 && on_segment(b0, b1, a1))
        || (d3 == 0.0 && on_segment(a0, a1, b0))
        || (d4 == 0.0 && on_segment(a0, a1, b1))
}

/// The length of the closed polygon's boundary.
#[cfg(test)]
pub(crate) fn perimeter(points: &[Point]) -> f64 {
    let n = points.len();
    (0..n).map(|i| points[i].distance(points[(i + 1) % n])).sum()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn square() -> Vec<Point> {
        // clockwise
        vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 100.0),
            Point::new(100.0, 100.0),
            Point::new(100.0, 0.0),
        ]
    }

    #[test]
    fn fnv_seeds() {
        assert_eq!(seed_for(""), 0x811C_9DC5);
        assert_eq!(seed_for("a"), 0xE40C_292C);
    }

    #[test]
    fn seeded_rng_is_repeatable() {
        let mut one = rng_for("U:A:0");
        let mut two = rng_for("U:A:0");
        for _ in 0..8 {
            assert_eq!(uniform(&mut one, -5.0, 5.0), uniform(&mut two, -5.0, 5.0));
        }
    }

    #[test]
    fn area_sign() {
        assert_eq!(signed_area(&square()), -10_000.0);
        let mut ccw = square();
        ccw.reverse();
        assert_eq!(signed_area(&ccw), 10_000.0);
    }

    #[test]
    fn hull_is_clockwise_and_drops_inner_points() {
        let mut points = square();
        points.push(Point::new(50.0, 50.0));
        points.push(Point::new(50.0, 0.0));
        let hull = convex_hull(&points);
        assert_eq!(hull.len(), 4);
        assert_eq!(signed_area(&hull), -10_000.0);
    }

    #[test]
    fn hull_of_too_few_points() {
        let points = [Point::new(1.0, 1.0), Point::new(1.0, 1.0)];
        assert_eq!(convex_hull(&points).len(), 1);
    }

    #[test]
    fn offset_square_outwards() {
        let grown = offset_polygon(&square(), 10.0, 4.0);
        assert_eq!(
            grown,
            vec![
                Point::new(-10.0, -10.0),
                Point::new(-10.0, 110.0),
                Point::new(110.0, 110.0),
                Point::new(110.0, -10.0),
            ]
        );
        // the right-angle miter is sqrt(2) long, so a limit of 1.2 bevels
        let bevelled = offset_polygon(&square(), 10.0, 1.2);
        assert_eq!(bevelled.len(), 8);
        assert_eq!(bevelled[0], Point::new(0.0, -10.0));
        assert_eq!(bevelled[1], Point::new(-10.0, 0.0));
    }

    #[test]
    fn offset_counter_clockwise_shrinks() {
        let mut hole = square();
        hole.reverse();
        let shrunk = offset_polygon(&hole, 10.0, 4.0);
        assert!((signed_area(&shrunk) - 6_400.0).abs() < 1e-9);
    }

    #[test]
    fn detects_bow_tie() {
        let bow_tie = [
            Point::new(0.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(100.0, 0.0),
            Point::new(0.0, 100.0),
        ];
        assert!(self_intersects(&bow_tie));
        assert!(!self_intersects(&square()));
    }

    #[test]
    fn dedup_drops_closing_point() {
        let mut points = square();
        points.insert(1, Point::new(0.0, 0.0));
        points.push(Point::new(0.0, 0.0));
        dedup_closed(&mut points);
        assert_eq!(points, square());
    }

    #[test]
    fn square_perimeter() {
        assert_eq!(perimeter(&square()), 400.0);
    }
}

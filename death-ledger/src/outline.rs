//! Glyph outlines and outline sets

use std::collections::BTreeMap;

use kurbo::{Affine, BezPath, PathEl, Point, Rect, Shape};

use crate::{config::FontMetrics, geom, style::Style};

/// The first codepoint every style covers.
pub const FIRST_CHAR: char = ' ';
/// The last codepoint every style covers.
pub const LAST_CHAR: char = '~';

/// Curves are flattened to within this distance before polygon operations.
pub const FLATTEN_TOLERANCE: f64 = 0.5;

/// Every codepoint a complete outline set covers, ascending.
pub fn coverage() -> impl Iterator<Item = char> + Clone {
    FIRST_CHAR..=LAST_CHAR
}

/// Which way a contour turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Winding {
    /// Filled: ink is on the right of the direction of travel.
    Clockwise,
    /// A counter, such as the hole in an 'o'.
    CounterClockwise,
}

/// One closed loop of an outline.
///
/// The path is a single closed subpath of lines and quadratic or cubic
/// curves.
#[derive(Clone, Debug, PartialEq)]
pub struct Contour {
    path: BezPath,
}

/// The outline and advance of one glyph.
///
/// Codepoints are the keys of the [`OutlineSet`] that holds it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CodepointGlyph {
    /// Advance width, in font units.
    pub advance: i32,
    pub contours: Vec<Contour>,
}

/// The complete outlines of one style.
#[derive(Clone, Debug, PartialEq)]
pub struct OutlineSet {
    style: Style,
    metrics: FontMetrics,
    notdef: CodepointGlyph,
    glyphs: BTreeMap<char, CodepointGlyph>,
}

impl Contour {
    /// A closed polygon through `points`.
    pub fn from_polygon(points: &[Point]) -> Self {
        let mut path = BezPath::new();
        if let Some((first, rest)) = points.split_first() {
            path.move_to(*first);
            rest.iter().for_each(|pt| path.line_to(*pt));
            path.close_path();
        }
        Contour { path }
    }

    /// A closed quadratic B-spline with the given control polygon.
    ///
    /// The on-curve points are the midpoints of the polygon's edges, so a
    /// convex control polygon gives a smooth convex loop.
    pub fn from_quadratic_spline(control: &[Point]) -> Self {
        let n = control.len();
        let mut path = BezPath::new();
        if n >= 2 {
            path.move_to(control[n - 1].midpoint(control[0]));
            for i in 0..n {
                let next = control[(i + 1) % n];
                path.quad_to(control[i], control[i].midpoint(next));
            }
            path.close_path();
        }
        Contour { path }
    }

    /// Wrap a path that is a single closed subpath.
    pub fn from_path(path: BezPath) -> Self {
        Contour { path }
    }

    pub fn path(&self) -> &BezPath {
        &self.path
    }

    /// Signed area, negative for clockwise contours.
    pub fn signed_area(&self) -> f64 {
        self.path.area()
    }

    pub fn winding(&self) -> Winding {
        if self.signed_area() < 0.0 {
            Winding::Clockwise
        } else {
            Winding::CounterClockwise
        }
    }

    pub fn bounds(&self) -> Rect {
        self.path.bounding_box()
    }

    pub fn perimeter(&self) -> f64 {
        self.path.perimeter(1e-3)
    }

    /// The contour as a polygon, with curves flattened to within
    /// `tolerance` and repeated points removed.
    pub fn to_polygon(&self, tolerance: f64) -> Vec<Point> {
        let mut points = Vec::new();
        kurbo::flatten(self.path.iter(), tolerance, |el| match el {
            PathEl::MoveTo(pt) | PathEl::LineTo(pt) => points.push(pt),
            _ => (),
        });
        geom::dedup_closed(&mut points);
        points
    }

    pub fn transformed(&self, affine: Affine) -> Contour {
        Contour {
            path: affine * self.path.clone(),
        }
    }
}

impl CodepointGlyph {
    pub fn new(advance: i32, contours: Vec<Contour>) -> Self {
        CodepointGlyph { advance, contours }
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// The union of the contour bounds, or `None` for an empty glyph.
    pub fn bounds(&self) -> Option<Rect> {
        self.contours
            .iter()
            .map(Contour::bounds)
            .reduce(|acc, rect| acc.union(rect))
    }

    /// Distance from the origin to the left edge of the ink; zero when
    /// there is no ink.
    pub fn left_side_bearing(&self) -> f64 {
        self.bounds().map(|rect| rect.min_x()).unwrap_or(0.0)
    }

    /// Distance from the right edge of the ink to the advance; the whole
    /// advance when there is no ink.
    pub fn right_side_bearing(&self) -> f64 {
        let x_max = self.bounds().map(|rect| rect.max_x()).unwrap_or(0.0);
        self.advance as f64 - x_max
    }

    /// The sum of the contours' unsigned areas.
    ///
    /// Overlapping contours are counted twice.
    pub fn ink_area(&self) -> f64 {
        self.contours.iter().map(|c| c.signed_area().abs()).sum()
    }

    /// All contours as one path.
    pub fn to_bezpath(&self) -> BezPath {
        let mut path = BezPath::new();
        for contour in &self.contours {
            path.extend(contour.path.elements().iter().copied());
        }
        path
    }

    pub fn transformed(&self, affine: Affine) -> CodepointGlyph {
        CodepointGlyph {
            advance: self.advance,
            contours: self.contours.iter().map(|c| c.transformed(affine)).collect(),
        }
    }
}

impl OutlineSet {
    /// Assemble a set, checking that every codepoint in range is present.
    ///
    /// Glyphs outside the range are dropped with a warning.
    pub fn new(
        style: Style,
        metrics: FontMetrics,
        notdef: CodepointGlyph,
        mut glyphs: BTreeMap<char, CodepointGlyph>,
    ) -> Result<Self, crate::Error> {
        if let Some(codepoint) = coverage().find(|cp| !glyphs.contains_key(cp)) {
            return Err(crate::Error::MissingGlyph { style, codepoint });
        }
        glyphs.retain(|cp, _| {
            let keep = (FIRST_CHAR..=LAST_CHAR).contains(cp);
            if !keep {
                log::warn!("{style}: ignoring glyph for {cp:?} outside the covered range");
            }
            keep
        });
        Ok(OutlineSet {
            style,
            metrics,
            notdef,
            glyphs,
        })
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    pub fn notdef(&self) -> &CodepointGlyph {
        &self.notdef
    }

    pub fn get(&self, codepoint: char) -> Option<&CodepointGlyph> {
        self.glyphs.get(&codepoint)
    }

    /// The codepoints of this set, ascending.
    pub fn codepoints(&self) -> impl Iterator<Item = char> + '_ {
        self.glyphs.keys().copied()
    }

    /// Every glyph in glyph order: '.notdef' (with no codepoint) first, then
    /// each codepoint ascending.
    pub fn iter(&self) -> impl Iterator<Item = (Option<char>, &CodepointGlyph)> + '_ {
        std::iter::once((None, &self.notdef))
            .chain(self.glyphs.iter().map(|(cp, glyph)| (Some(*cp), glyph)))
    }

    /// The number of glyphs, including '.notdef'.
    pub fn num_glyphs(&self) -> usize {
        self.glyphs.len() + 1
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::Error;

    fn triangle() -> Contour {
        Contour::from_polygon(&[
            Point::new(0.0, 0.0),
            Point::new(50.0, 100.0),
            Point::new(100.0, 0.0),
        ])
    }

    #[test]
    fn contour_geometry() {
        let tri = triangle();
        assert_eq!(tri.signed_area(), -5_000.0);
        assert_eq!(tri.winding(), Winding::Clockwise);
        assert_eq!(tri.bounds(), Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(tri.to_polygon(FLATTEN_TOLERANCE).len(), 3);
        let expected = 100.0 + 2.0 * 12_500f64.sqrt();
        assert!((tri.perimeter() - expected).abs() < 1e-6);
    }

    #[test]
    fn spline_is_inside_its_control_polygon() {
        let control = [
            Point::new(0.0, 0.0),
            Point::new(0.0, 100.0),
            Point::new(100.0, 100.0),
            Point::new(100.0, 0.0),
        ];
        let spline = Contour::from_quadratic_spline(&control);
        assert_eq!(spline.winding(), Winding::Clockwise);
        let area = spline.signed_area().abs();
        assert!(area > 5_000.0 && area < 10_000.0, "{area}");
        assert_eq!(spline.bounds(), Rect::new(0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn side_bearings() {
        let glyph = CodepointGlyph::new(
            300,
            vec![triangle().transformed(Affine::translate((40.0, 0.0)))],
        );
        assert_eq!(glyph.left_side_bearing(), 40.0);
        assert_eq!(glyph.right_side_bearing(), 160.0);

        let space = CodepointGlyph::new(280, Vec::new());
        assert_eq!(space.left_side_bearing(), 0.0);
        assert_eq!(space.right_side_bearing(), 280.0);
        assert!(space.bounds().is_none());
    }

    #[test]
    fn set_requires_full_coverage() {
        let mut glyphs: BTreeMap<_, _> = coverage()
            .map(|cp| (cp, CodepointGlyph::new(500, Vec::new())))
            .collect();
        glyphs.remove(&'q');
        let err = OutlineSet::new(
            Style::Bold,
            FontMetrics::default(),
            CodepointGlyph::default(),
            glyphs,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::MissingGlyph {
                style: Style::Bold,
                codepoint: 'q'
            }
        ));
    }

    #[test]
    fn glyph_order() {
        let mut glyphs: BTreeMap<_, _> = coverage()
            .map(|cp| (cp, CodepointGlyph::new(500, Vec::new())))
            .collect();
        glyphs.insert('\u{e9}', CodepointGlyph::default());
        let set = OutlineSet::new(
            Style::Regular,
            FontMetrics::default(),
            CodepointGlyph::default(),
            glyphs,
        )
        .unwrap();
        assert_eq!(set.num_glyphs(), 96);
        let order: Vec<_> = set.iter().map(|(cp, _)| cp).take(3).collect();
        assert_eq!(order, [None, Some(' '), Some('!')]);
        assert_eq!(set.codepoints().last(), Some('~'));
    }
}

//! The authored Regular outlines
//!
//! Glyphs are drawn as rough pen strokes. Each stroke is a straight segment
//! that becomes one "nib": a six-point hand-cut shape with a shoulder on
//! either side of each end and a chipped tip beyond each end. Widths,
//! extensions and corners are jittered by a generator seeded from the
//! glyph, so the same store is authored on every run.
//!
//! Shapes are drawn on a 1000-unit em and scaled to the configured
//! `units_per_em`; letters and digits are drawn in a unit box whose height
//! is the cap height.

use std::collections::BTreeMap;

use kurbo::Point;
use rand::rngs::StdRng;

use crate::{
    config::FontMetrics,
    error::Error,
    geom::{self, jitter, rng_for, uniform},
    outline::{coverage, CodepointGlyph, Contour, OutlineSet},
    style::Style,
};

/// A stroke from one point to another.
type Stroke = ((f64, f64), (f64, f64));

const UPPER_WIDTH: f64 = 600.0;
const UPPER_STROKE: f64 = 76.0;
const LOWER_WIDTH: f64 = 560.0;
const DIGIT_WIDTH: f64 = 580.0;
const DIGIT_STROKE: f64 = 74.0;
/// Added to the drawing width of letters and digits to get the advance.
const SIDE_SPACE: f64 = 70.0;
const PUNCTUATION_STROKE: f64 = 62.0;
const PUNCTUATION_ADVANCE: f64 = 540.0;
const SPACE_ADVANCE: f64 = 280.0;
const NOTDEF_STROKE: f64 = 52.0;
const NOTDEF_ADVANCE: f64 = 620.0;
const TAIL_STROKE: f64 = 58.0;
/// How far nib corners wander.
const ROUGHNESS: f64 = 5.0;
/// How far lowercase points wander after scaling.
const LOWERCASE_JITTER: f64 = 3.0;

/// A box with a cross through it.
const NOTDEF_STROKES: &[Stroke] = &[
    ((80.0, 0.0), (80.0, 700.0)),
    ((80.0, 700.0), (500.0, 700.0)),
    ((500.0, 700.0), (500.0, 0.0)),
    ((500.0, 0.0), (80.0, 0.0)),
    ((80.0, 0.0), (500.0, 700.0)),
    ((500.0, 0.0), (80.0, 700.0)),
];

/// The tail added below descender letters.
const DESCENDER_TAIL: Stroke = ((320.0, 120.0), (420.0, -140.0));

/// The two rough ellipses of '%': centre and radii.
const PERCENT_RINGS: [(&str, (f64, f64), (f64, f64)); 2] = [
    ("pct:u", (130.0, 560.0), (70.0, 90.0)),
    ("pct:l", (410.0, 130.0), (70.0, 90.0)),
];
const RING_POINTS: usize = 10;

/// How a lowercase letter is derived from its capital.
struct LowercaseForm {
    name: &'static str,
    scale: (f64, f64),
    shift: (f64, f64),
    advance: f64,
    tail: bool,
}

const ASCENDER_FORM: LowercaseForm = LowercaseForm {
    name: "asc",
    scale: (0.90, 0.94),
    shift: (18.0, 0.0),
    advance: 610.0,
    tail: false,
};

const DESCENDER_FORM: LowercaseForm = LowercaseForm {
    name: "des",
    scale: (0.88, 0.72),
    shift: (16.0, -160.0),
    advance: 610.0,
    tail: true,
};

const X_HEIGHT_FORM: LowercaseForm = LowercaseForm {
    name: "x",
    scale: (0.88, 0.72),
    shift: (16.0, 0.0),
    advance: 600.0,
    tail: false,
};

/// The mutable collection of authored Regular glyphs.
///
/// The store can be edited before it is turned into an [`OutlineSet`]; an
/// incomplete store is an error, never a blank glyph.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphStore {
    metrics: FontMetrics,
    notdef: CodepointGlyph,
    glyphs: BTreeMap<char, CodepointGlyph>,
}

impl GlyphStore {
    /// An empty store with the authored '.notdef'.
    pub fn new(metrics: &FontMetrics) -> Self {
        GlyphStore {
            metrics: *metrics,
            notdef: Pen::new(metrics).notdef(),
            glyphs: BTreeMap::new(),
        }
    }

    /// A store holding every authored glyph.
    pub fn authored(metrics: &FontMetrics) -> Self {
        let pen = Pen::new(metrics);
        let mut store = GlyphStore::new(metrics);
        for codepoint in coverage() {
            if let Some(glyph) = pen.glyph(codepoint) {
                store.glyphs.insert(codepoint, glyph);
            }
        }
        log::debug!("authored {} glyphs", store.len());
        store
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

    /// Add or replace a glyph, returning the one it replaced.
    pub fn insert(&mut self, codepoint: char, glyph: CodepointGlyph) -> Option<CodepointGlyph> {
        self.glyphs.insert(codepoint, glyph)
    }

    pub fn remove(&mut self, codepoint: char) -> Option<CodepointGlyph> {
        self.glyphs.remove(&codepoint)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// The Regular outline set.
    ///
    /// Fails with [`Error::MissingGlyph`] naming the first codepoint in
    /// range without a glyph.
    pub fn outline_set(&self) -> Result<OutlineSet, Error> {
        OutlineSet::new(
            Style::Regular,
            self.metrics,
            self.notdef.clone(),
            self.glyphs.clone(),
        )
    }
}

/// Draws glyphs for one set of metrics.
struct Pen {
    /// From the 1000-unit authoring em to font units.
    scale: f64,
    cap_height: f64,
}

impl Pen {
    fn new(metrics: &FontMetrics) -> Self {
        Pen {
            scale: metrics.scale(),
            cap_height: metrics.cap_height as f64,
        }
    }

    fn glyph(&self, ch: char) -> Option<CodepointGlyph> {
        match ch {
            ' ' => Some(CodepointGlyph::new(self.advance(SPACE_ADVANCE), Vec::new())),
            'A'..='Z' => self.capital(ch),
            'a'..='z' => self.lowercase(ch),
            '0'..='9' => self.digit(ch),
            _ => self.punctuation(ch),
        }
    }

    fn notdef(&self) -> CodepointGlyph {
        let segments = NOTDEF_STROKES.iter().map(|s| self.absolute(*s));
        let nibs = self.stroke_segments(segments, NOTDEF_STROKE, ".notdef");
        CodepointGlyph::new(self.advance(NOTDEF_ADVANCE), polygons_to_contours(nibs))
    }

    fn capital(&self, letter: char) -> Option<CodepointGlyph> {
        let nibs = self.capital_nibs(letter, UPPER_WIDTH)?;
        Some(CodepointGlyph::new(
            self.advance(UPPER_WIDTH + SIDE_SPACE),
            polygons_to_contours(nibs),
        ))
    }

    fn capital_nibs(&self, letter: char, width: f64) -> Option<Vec<Vec<Point>>> {
        let strokes = upper_strokes(letter)?;
        let segments = strokes.iter().map(|s| self.in_box(*s, width));
        Some(self.stroke_segments(segments, UPPER_STROKE, &format!("U:{letter}")))
    }

    fn digit(&self, digit: char) -> Option<CodepointGlyph> {
        let strokes = digit_strokes(digit)?;
        let segments = strokes.iter().map(|s| self.in_box(*s, DIGIT_WIDTH));
        let nibs = self.stroke_segments(segments, DIGIT_STROKE, &format!("D:{digit}"));
        Some(CodepointGlyph::new(
            self.advance(DIGIT_WIDTH + SIDE_SPACE),
            polygons_to_contours(nibs),
        ))
    }

    /// Lowercase letters are their capitals, narrowed, squashed and
    /// re-roughened.
    fn lowercase(&self, letter: char) -> Option<CodepointGlyph> {
        let capital = letter.to_ascii_uppercase();
        let nibs = self.capital_nibs(capital, LOWER_WIDTH)?;
        let form = match letter {
            'b' | 'd' | 'f' | 'h' | 'k' | 'l' | 't' => &ASCENDER_FORM,
            'g' | 'j' | 'p' | 'q' | 'y' => &DESCENDER_FORM,
            _ => &X_HEIGHT_FORM,
        };
        let mut rng = rng_for(&format!("L:{letter}:{}", form.name));
        let (sx, sy) = form.scale;
        let (tx, ty) = (form.shift.0 * self.scale, form.shift.1 * self.scale);
        let wander = LOWERCASE_JITTER * self.scale;
        let mut polygons: Vec<Vec<Point>> = nibs
            .iter()
            .map(|nib| {
                let moved: Vec<_> = nib
                    .iter()
                    .map(|pt| {
                        let pt = Point::new(pt.x * sx + tx, pt.y * sy + ty);
                        jitter(&mut rng, pt, wander)
                    })
                    .collect();
                geom::convex_hull(&moved)
            })
            .filter(|hull| hull.len() >= 3)
            .collect();
        if form.tail {
            let tail = std::iter::once(self.absolute(DESCENDER_TAIL));
            polygons.extend(self.stroke_segments(tail, TAIL_STROKE, &format!("L:{letter}:tail")));
        }
        Some(CodepointGlyph::new(
            self.advance(form.advance),
            polygons_to_contours(polygons),
        ))
    }

    fn punctuation(&self, ch: char) -> Option<CodepointGlyph> {
        let (strokes, advance) = punctuation_strokes(ch)?;
        let segments = strokes.iter().map(|s| self.absolute(*s));
        let nibs = self.stroke_segments(segments, PUNCTUATION_STROKE, &format!("P:{ch}"));
        let mut contours = polygons_to_contours(nibs);
        if ch == '%' {
            contours.extend(PERCENT_RINGS.iter().map(|(key, centre, radii)| {
                Contour::from_quadratic_spline(&self.ring(key, *centre, *radii))
            }));
        }
        Some(CodepointGlyph::new(
            self.advance(advance.unwrap_or(PUNCTUATION_ADVANCE)),
            contours,
        ))
    }

    /// The control polygon of a rough ellipse, clockwise.
    fn ring(&self, key: &str, (cx, cy): (f64, f64), (rx, ry): (f64, f64)) -> Vec<Point> {
        let mut rng = rng_for(key);
        let points: Vec<_> = (0..RING_POINTS)
            .map(|i| {
                let angle = std::f64::consts::TAU * i as f64 / RING_POINTS as f64;
                let jx = uniform(&mut rng, -rx * 0.08, rx * 0.08);
                let jy = uniform(&mut rng, -ry * 0.08, ry * 0.08);
                Point::new(
                    (cx + angle.cos() * rx + jx) * self.scale,
                    (cy + angle.sin() * ry + jy) * self.scale,
                )
            })
            .collect();
        geom::convex_hull(&points)
    }

    /// One nib per segment; each segment has its own generator, keyed by
    /// `key` and the segment's index.
    fn stroke_segments(
        &self,
        segments: impl Iterator<Item = (Point, Point)>,
        width: f64,
        key: &str,
    ) -> Vec<Vec<Point>> {
        segments
            .enumerate()
            .filter_map(|(i, (p0, p1))| {
                let mut rng = rng_for(&format!("{key}:{i}"));
                self.nib(p0, p1, width * self.scale, &mut rng)
            })
            .collect()
    }

    fn nib(&self, p0: Point, p1: Point, width: f64, rng: &mut StdRng) -> Option<Vec<Point>> {
        let along = p1 - p0;
        if along.hypot() < 1e-3 {
            return None;
        }
        let t = along.normalize();
        let n = t.turn_90();

        let w0 = width * uniform(rng, 0.82, 1.18);
        let w1 = width * uniform(rng, 0.78, 1.22);
        let ext0 = width * uniform(rng, 0.08, 0.34);
        let ext1 = width * uniform(rng, 0.08, 0.34);

        let a = p0 + n * (w0 * 0.5) + t * ext0;
        let b = p1 + n * (w1 * 0.5) + t * ext1;
        let c = p1 - n * (w1 * 0.5) + t * ext1;
        let d = p0 - n * (w0 * 0.5) + t * ext0;

        let back = ext0 * uniform(rng, 0.6, 1.2);
        let skew = uniform(rng, -0.18, 0.18) * width;
        let tip_start = p0 - t * back + n * skew;
        let forward = ext1 * uniform(rng, 0.6, 1.2);
        let skew = uniform(rng, -0.18, 0.18) * width;
        let tip_end = p1 + t * forward + n * skew;

        let rough = ROUGHNESS * self.scale;
        let corners = [
            jitter(rng, a, rough),
            jitter(rng, b, rough),
            jitter(rng, tip_end, rough * 0.7),
            jitter(rng, c, rough),
            jitter(rng, d, rough),
            jitter(rng, tip_start, rough * 0.7),
        ];
        let hull = geom::convex_hull(&corners);
        (hull.len() >= 3).then_some(hull)
    }

    /// A stroke in the unit box, mapped to font units.
    fn in_box(&self, ((x0, y0), (x1, y1)): Stroke, width: f64) -> (Point, Point) {
        let map = |x: f64, y: f64| Point::new(x * width * self.scale, y * self.cap_height);
        (map(x0, y0), map(x1, y1))
    }

    /// A stroke in 1000-unit em coordinates, mapped to font units.
    fn absolute(&self, ((x0, y0), (x1, y1)): Stroke) -> (Point, Point) {
        (
            Point::new(x0 * self.scale, y0 * self.scale),
            Point::new(x1 * self.scale, y1 * self.scale),
        )
    }

    fn advance(&self, advance: f64) -> i32 {
        (advance * self.scale).round() as i32
    }
}

fn polygons_to_contours(polygons: Vec<Vec<Point>>) -> Vec<Contour> {
    polygons
        .iter()
        .map(|points| Contour::from_polygon(points))
        .collect()
}

fn upper_strokes(letter: char) -> Option<&'static [Stroke]> {
    let strokes: &[Stroke] = match letter {
        'A' => &[
            ((0.10, 0.00), (0.46, 1.00)),
            ((0.88, 0.00), (0.46, 1.00)),
            ((0.26, 0.50), (0.70, 0.50)),
        ],
        'B' => &[
            ((0.12, 0.00), (0.12, 1.00)),
            ((0.12, 1.00), (0.64, 0.92)),
            ((0.64, 0.92), (0.72, 0.74)),
            ((0.72, 0.74), (0.12, 0.52)),
            ((0.12, 0.52), (0.66, 0.45)),
            ((0.66, 0.45), (0.76, 0.24)),
            ((0.76, 0.24), (0.64, 0.04)),
            ((0.64, 0.04), (0.12, 0.00)),
        ],
        'C' => &[
            ((0.78, 0.92), (0.50, 1.00)),
            ((0.50, 1.00), (0.18, 0.72)),
            ((0.18, 0.72), (0.18, 0.24)),
            ((0.18, 0.24), (0.50, 0.00)),
            ((0.50, 0.00), (0.82, 0.08)),
        ],
        'D' => &[
            ((0.12, 0.00), (0.12, 1.00)),
            ((0.12, 1.00), (0.58, 0.92)),
            ((0.58, 0.92), (0.84, 0.58)),
            ((0.84, 0.58), (0.78, 0.20)),
            ((0.78, 0.20), (0.56, 0.04)),
            ((0.56, 0.04), (0.12, 0.00)),
        ],
        'E' => &[
            ((0.14, 0.00), (0.14, 1.00)),
            ((0.14, 1.00), (0.84, 0.94)),
            ((0.14, 0.52), (0.66, 0.52)),
            ((0.14, 0.00), (0.82, 0.06)),
        ],
        'F' => &[
            ((0.14, 0.00), (0.14, 1.00)),
            ((0.14, 1.00), (0.84, 0.94)),
            ((0.14, 0.54), (0.62, 0.54)),
        ],
        'G' => &[
            ((0.82, 0.88), (0.52, 1.00)),
            ((0.52, 1.00), (0.18, 0.72)),
            ((0.18, 0.72), (0.18, 0.24)),
            ((0.18, 0.24), (0.50, 0.00)),
            ((0.50, 0.00), (0.84, 0.14)),
            ((0.84, 0.14), (0.84, 0.44)),
            ((0.84, 0.44), (0.54, 0.44)),
        ],
        'H' => &[
            ((0.14, 0.00), (0.14, 1.00)),
            ((0.84, 0.00), (0.84, 1.00)),
            ((0.14, 0.52), (0.84, 0.52)),
        ],
        'I' => &[
            ((0.16, 1.00), (0.84, 1.00)),
            ((0.50, 0.00), (0.50, 1.00)),
            ((0.20, 0.00), (0.80, 0.00)),
        ],
        'J' => &[
            ((0.22, 1.00), (0.86, 1.00)),
            ((0.60, 1.00), (0.60, 0.22)),
            ((0.60, 0.22), (0.42, 0.00)),
            ((0.42, 0.00), (0.16, 0.10)),
        ],
        'K' => &[
            ((0.14, 0.00), (0.14, 1.00)),
            ((0.84, 1.00), (0.14, 0.48)),
            ((0.14, 0.48), (0.86, 0.00)),
        ],
        'L' => &[
            ((0.14, 1.00), (0.14, 0.00)),
            ((0.14, 0.00), (0.84, 0.06)),
        ],
        'M' => &[
            ((0.10, 0.00), (0.10, 1.00)),
            ((0.10, 1.00), (0.48, 0.50)),
            ((0.48, 0.50), (0.86, 1.00)),
            ((0.86, 1.00), (0.86, 0.00)),
        ],
        'N' => &[
            ((0.12, 0.00), (0.12, 1.00)),
            ((0.12, 1.00), (0.84, 0.00)),
            ((0.84, 0.00), (0.84, 1.00)),
        ],
        'O' => &[
            ((0.50, 1.00), (0.20, 0.72)),
            ((0.20, 0.72), (0.20, 0.24)),
            ((0.20, 0.24), (0.50, 0.00)),
            ((0.50, 0.00), (0.82, 0.24)),
            ((0.82, 0.24), (0.82, 0.72)),
            ((0.82, 0.72), (0.50, 1.00)),
        ],
        'P' => &[
            ((0.14, 0.00), (0.14, 1.00)),
            ((0.14, 1.00), (0.66, 0.92)),
            ((0.66, 0.92), (0.76, 0.72)),
            ((0.76, 0.72), (0.64, 0.56)),
            ((0.64, 0.56), (0.14, 0.52)),
        ],
        'Q' => &[
            ((0.50, 1.00), (0.20, 0.72)),
            ((0.20, 0.72), (0.20, 0.24)),
            ((0.20, 0.24), (0.50, 0.00)),
            ((0.50, 0.00), (0.82, 0.24)),
            ((0.82, 0.24), (0.82, 0.72)),
            ((0.82, 0.72), (0.50, 1.00)),
            ((0.58, 0.24), (0.88, -0.10)),
        ],
        'R' => &[
            ((0.14, 0.00), (0.14, 1.00)),
            ((0.14, 1.00), (0.66, 0.92)),
            ((0.66, 0.92), (0.76, 0.72)),
            ((0.76, 0.72), (0.64, 0.56)),
            ((0.64, 0.56), (0.14, 0.52)),
            ((0.40, 0.52), (0.84, 0.00)),
        ],
        'S' => &[
            ((0.80, 0.88), (0.54, 1.00)),
            ((0.54, 1.00), (0.22, 0.82)),
            ((0.22, 0.82), (0.70, 0.52)),
            ((0.70, 0.52), (0.28, 0.20)),
            ((0.28, 0.20), (0.12, 0.02)),
            ((0.12, 0.02), (0.76, 0.12)),
        ],
        'T' => &[
            ((0.08, 1.00), (0.90, 1.00)),
            ((0.50, 1.00), (0.50, 0.00)),
        ],
        'U' => &[
            ((0.14, 1.00), (0.14, 0.26)),
            ((0.14, 0.26), (0.42, 0.00)),
            ((0.42, 0.00), (0.74, 0.16)),
            ((0.74, 0.16), (0.84, 1.00)),
        ],
        'V' => &[
            ((0.10, 1.00), (0.48, 0.00)),
            ((0.48, 0.00), (0.88, 1.00)),
        ],
        'W' => &[
            ((0.08, 1.00), (0.28, 0.00)),
            ((0.28, 0.00), (0.50, 0.58)),
            ((0.50, 0.58), (0.72, 0.00)),
            ((0.72, 0.00), (0.92, 1.00)),
        ],
        'X' => &[
            ((0.12, 1.00), (0.86, 0.00)),
            ((0.86, 1.00), (0.12, 0.00)),
        ],
        'Y' => &[
            ((0.10, 1.00), (0.48, 0.52)),
            ((0.88, 1.00), (0.48, 0.52)),
            ((0.48, 0.52), (0.48, 0.00)),
        ],
        'Z' => &[
            ((0.12, 1.00), (0.88, 1.00)),
            ((0.88, 1.00), (0.14, 0.00)),
            ((0.14, 0.00), (0.90, 0.00)),
        ],
        _ => return None,
    };
    Some(strokes)
}

fn digit_strokes(digit: char) -> Option<&'static [Stroke]> {
    let strokes: &[Stroke] = match digit {
        '0' => return upper_strokes('O'),
        '1' => &[
            ((0.42, 0.80), (0.56, 1.00)),
            ((0.56, 1.00), (0.56, 0.00)),
            ((0.34, 0.00), (0.82, 0.00)),
        ],
        '2' => &[
            ((0.22, 0.82), (0.50, 1.00)),
            ((0.50, 1.00), (0.80, 0.80)),
            ((0.80, 0.80), (0.22, 0.00)),
            ((0.22, 0.00), (0.86, 0.00)),
        ],
        '3' => &[
            ((0.18, 0.92), (0.76, 1.00)),
            ((0.76, 1.00), (0.50, 0.52)),
            ((0.50, 0.52), (0.80, 0.12)),
            ((0.80, 0.12), (0.20, 0.00)),
        ],
        '4' => &[
            ((0.76, 0.00), (0.76, 1.00)),
            ((0.14, 0.30), (0.88, 0.30)),
            ((0.14, 0.30), (0.58, 1.00)),
        ],
        '5' => &[
            ((0.84, 1.00), (0.24, 1.00)),
            ((0.24, 1.00), (0.24, 0.56)),
            ((0.24, 0.56), (0.72, 0.56)),
            ((0.72, 0.56), (0.82, 0.18)),
            ((0.82, 0.18), (0.20, 0.00)),
        ],
        '6' => &[
            ((0.78, 0.86), (0.52, 1.00)),
            ((0.52, 1.00), (0.24, 0.56)),
            ((0.24, 0.56), (0.26, 0.20)),
            ((0.26, 0.20), (0.52, 0.00)),
            ((0.52, 0.00), (0.80, 0.18)),
            ((0.80, 0.18), (0.68, 0.48)),
            ((0.68, 0.48), (0.28, 0.48)),
        ],
        '7' => &[
            ((0.14, 1.00), (0.88, 1.00)),
            ((0.88, 1.00), (0.38, 0.00)),
        ],
        '8' => &[
            ((0.50, 1.00), (0.24, 0.76)),
            ((0.24, 0.76), (0.50, 0.52)),
            ((0.50, 0.52), (0.80, 0.76)),
            ((0.80, 0.76), (0.50, 1.00)),
            ((0.50, 0.52), (0.22, 0.20)),
            ((0.22, 0.20), (0.52, 0.00)),
            ((0.52, 0.00), (0.82, 0.20)),
            ((0.82, 0.20), (0.50, 0.52)),
        ],
        '9' => &[
            ((0.80, 0.44), (0.52, 0.52)),
            ((0.52, 0.52), (0.24, 0.72)),
            ((0.24, 0.72), (0.34, 0.94)),
            ((0.34, 0.94), (0.62, 1.00)),
            ((0.62, 1.00), (0.82, 0.80)),
            ((0.82, 0.80), (0.78, 0.00)),
        ],
        _ => return None,
    };
    Some(strokes)
}

fn punctuation_strokes(ch: char) -> Option<(&'static [Stroke], Option<f64>)> {
    let (strokes, advance): (&[Stroke], _) = match ch {
        '!' => (
            &[
                ((260.0, 120.0), (260.0, 700.0)),
                ((260.0, 0.0), (260.0, 50.0)),
            ],
            None,
        ),
        '"' => (
            &[
                ((180.0, 430.0), (180.0, 700.0)),
                ((360.0, 430.0), (360.0, 700.0)),
            ],
            None,
        ),
        '#' => (
            &[
                ((180.0, 0.0), (220.0, 700.0)),
                ((360.0, 0.0), (400.0, 700.0)),
                ((80.0, 230.0), (500.0, 270.0)),
                ((70.0, 460.0), (490.0, 500.0)),
            ],
            None,
        ),
        '$' => (
            &[
                ((280.0, -60.0), (280.0, 760.0)),
                ((420.0, 640.0), (260.0, 700.0)),
                ((260.0, 700.0), (140.0, 540.0)),
                ((140.0, 540.0), (360.0, 410.0)),
                ((360.0, 410.0), (170.0, 200.0)),
                ((170.0, 200.0), (110.0, 40.0)),
                ((110.0, 40.0), (410.0, 120.0)),
            ],
            None,
        ),
        '%' => (
            &[
                ((100.0, 0.0), (440.0, 700.0)),
            ],
            None,
        ),
        '&' => (
            &[
                ((420.0, 80.0), (280.0, 220.0)),
                ((280.0, 220.0), (190.0, 360.0)),
                ((190.0, 360.0), (250.0, 560.0)),
                ((250.0, 560.0), (420.0, 680.0)),
                ((420.0, 680.0), (350.0, 460.0)),
                ((350.0, 460.0), (140.0, 180.0)),
                ((140.0, 180.0), (250.0, 20.0)),
                ((250.0, 20.0), (440.0, 120.0)),
            ],
            Some(620.0),
        ),
        '\'' => (
            &[
                ((260.0, 440.0), (260.0, 700.0)),
            ],
            Some(280.0),
        ),
        '(' => (
            &[
                ((360.0, 740.0), (250.0, 520.0)),
                ((250.0, 520.0), (220.0, 240.0)),
                ((220.0, 240.0), (360.0, -40.0)),
            ],
            Some(340.0),
        ),
        ')' => (
            &[
                ((180.0, 740.0), (290.0, 520.0)),
                ((290.0, 520.0), (320.0, 240.0)),
                ((320.0, 240.0), (180.0, -40.0)),
            ],
            Some(340.0),
        ),
        '*' => (
            &[
                ((260.0, 160.0), (260.0, 640.0)),
                ((120.0, 250.0), (410.0, 560.0)),
                ((410.0, 250.0), (120.0, 560.0)),
            ],
            None,
        ),
        '+' => (
            &[
                ((90.0, 350.0), (450.0, 350.0)),
                ((270.0, 130.0), (270.0, 570.0)),
            ],
            None,
        ),
        ',' => (
            &[
                ((250.0, -120.0), (290.0, 120.0)),
            ],
            Some(260.0),
        ),
        '-' => (
            &[
                ((120.0, 260.0), (430.0, 290.0)),
            ],
            Some(450.0),
        ),
        '.' => (
            &[
                ((250.0, 0.0), (250.0, 40.0)),
            ],
            Some(260.0),
        ),
        '/' => (
            &[
                ((90.0, -60.0), (430.0, 760.0)),
            ],
            None,
        ),
        ':' => (
            &[
                ((260.0, 430.0), (260.0, 470.0)),
                ((260.0, 0.0), (260.0, 40.0)),
            ],
            Some(260.0),
        ),
        ';' => (
            &[
                ((260.0, 430.0), (260.0, 470.0)),
                ((260.0, -120.0), (300.0, 120.0)),
            ],
            Some(300.0),
        ),
        '<' => (
            &[
                ((420.0, 640.0), (120.0, 320.0)),
                ((120.0, 320.0), (420.0, 40.0)),
            ],
            None,
        ),
        '=' => (
            &[
                ((90.0, 420.0), (450.0, 420.0)),
                ((90.0, 240.0), (450.0, 240.0)),
            ],
            None,
        ),
        '>' => (
            &[
                ((120.0, 640.0), (420.0, 320.0)),
                ((420.0, 320.0), (120.0, 40.0)),
            ],
            None,
        ),
        '?' => (
            &[
                ((140.0, 520.0), (250.0, 700.0)),
                ((250.0, 700.0), (410.0, 610.0)),
                ((410.0, 610.0), (280.0, 430.0)),
                ((280.0, 430.0), (260.0, 260.0)),
                ((260.0, 40.0), (260.0, 0.0)),
            ],
            None,
        ),
        '@' => (
            &[
                ((470.0, 120.0), (470.0, 520.0)),
                ((470.0, 520.0), (320.0, 700.0)),
                ((320.0, 700.0), (150.0, 560.0)),
                ((150.0, 560.0), (150.0, 180.0)),
                ((150.0, 180.0), (320.0, 20.0)),
                ((320.0, 20.0), (420.0, 160.0)),
                ((420.0, 160.0), (330.0, 320.0)),
                ((330.0, 320.0), (250.0, 280.0)),
            ],
            Some(700.0),
        ),
        '[' => (
            &[
                ((320.0, 740.0), (180.0, 740.0)),
                ((180.0, 740.0), (180.0, -40.0)),
                ((180.0, -40.0), (320.0, -40.0)),
            ],
            Some(320.0),
        ),
        '\\' => (
            &[
                ((420.0, -60.0), (100.0, 760.0)),
            ],
            None,
        ),
        ']' => (
            &[
                ((180.0, 740.0), (320.0, 740.0)),
                ((320.0, 740.0), (320.0, -40.0)),
                ((320.0, -40.0), (180.0, -40.0)),
            ],
            Some(320.0),
        ),
        '^' => (
            &[
                ((100.0, 420.0), (260.0, 700.0)),
                ((260.0, 700.0), (430.0, 420.0)),
            ],
            None,
        ),
        '_' => (
            &[
                ((80.0, -40.0), (460.0, -40.0)),
            ],
            None,
        ),
        '`' => (
            &[
                ((280.0, 530.0), (220.0, 700.0)),
            ],
            Some(280.0),
        ),
        '{' => (
            &[
                ((330.0, 740.0), (220.0, 620.0)),
                ((220.0, 620.0), (240.0, 430.0)),
                ((240.0, 430.0), (160.0, 350.0)),
                ((160.0, 350.0), (240.0, 270.0)),
                ((240.0, 270.0), (220.0, 80.0)),
                ((220.0, 80.0), (330.0, -40.0)),
            ],
            Some(340.0),
        ),
        '|' => (
            &[
                ((260.0, -80.0), (260.0, 760.0)),
            ],
            Some(280.0),
        ),
        '}' => (
            &[
                ((190.0, 740.0), (300.0, 620.0)),
                ((300.0, 620.0), (280.0, 430.0)),
                ((280.0, 430.0), (360.0, 350.0)),
                ((360.0, 350.0), (280.0, 270.0)),
                ((280.0, 270.0), (300.0, 80.0)),
                ((300.0, 80.0), (190.0, -40.0)),
            ],
            Some(340.0),
        ),
        '~' => (
            &[
                ((90.0, 310.0), (180.0, 390.0)),
                ((180.0, 390.0), (300.0, 300.0)),
                ((300.0, 300.0), (420.0, 380.0)),
            ],
            None,
        ),
        _ => return None,
    };
    Some((strokes, advance))
}

#[cfg(test)]
mod tests {
    use kurbo::PathEl;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::outline::{Winding, FLATTEN_TOLERANCE};

    fn store() -> GlyphStore {
        GlyphStore::authored(&FontMetrics::default())
    }

    #[test]
    fn covers_the_printable_range() {
        let store = store();
        assert_eq!(store.len(), 95);
        let set = store.outline_set().unwrap();
        assert_eq!(set.num_glyphs(), 96);
        assert!(set.iter().skip(2).all(|(_, glyph)| !glyph.is_empty()));
        assert!(set.get(' ').unwrap().is_empty());
    }

    #[test]
    fn authoring_is_deterministic() {
        assert_eq!(store(), store());
    }

    #[rstest]
    #[case(' ', 280)]
    #[case('A', 670)]
    #[case('h', 610)]
    #[case('g', 610)]
    #[case('x', 600)]
    #[case('7', 650)]
    #[case('&', 620)]
    #[case('.', 260)]
    #[case('#', 540)]
    fn advances(#[case] ch: char, #[case] advance: i32) {
        assert_eq!(store().get(ch).unwrap().advance, advance);
    }

    #[test]
    fn notdef_is_a_crossed_box() {
        let store = store();
        let notdef = store.notdef();
        assert_eq!(notdef.advance, 620);
        assert_eq!(notdef.contours.len(), 6);
    }

    #[test]
    fn nibs_are_clockwise_and_convex() {
        let store = store();
        let set = store.outline_set().unwrap();
        for (cp, glyph) in set.iter() {
            for contour in &glyph.contours {
                assert_eq!(contour.winding(), Winding::Clockwise, "{cp:?}");
                let polygon = contour.to_polygon(FLATTEN_TOLERANCE);
                assert!(polygon.len() >= 3, "{cp:?}");
                assert_eq!(geom::convex_hull(&polygon).len(), polygon.len(), "{cp:?}");
            }
        }
    }

    #[test]
    fn one_nib_per_stroke() {
        let store = store();
        assert_eq!(store.get('A').unwrap().contours.len(), 3);
        // the zero is drawn with the strokes of the O, at digit width
        let zero = store.get('0').unwrap();
        let capital_o = store.get('O').unwrap();
        assert_eq!(zero.contours.len(), capital_o.contours.len());
        assert_ne!(zero, capital_o);
        // descenders gain a tail
        assert_eq!(store.get('q').unwrap().contours.len(), 8);
        assert_eq!(store.get('o').unwrap().contours.len(), 6);
    }

    #[test]
    fn percent_has_curved_rings() {
        let store = store();
        let percent = store.get('%').unwrap();
        assert_eq!(percent.contours.len(), 3);
        let curved = percent
            .contours
            .iter()
            .filter(|c| c.path().elements().iter().any(|el| matches!(el, PathEl::QuadTo(..))))
            .count();
        assert_eq!(curved, 2);
    }

    #[test]
    fn descenders_drop_below_the_baseline() {
        let store = store();
        let y_min = |ch| store.get(ch).unwrap().bounds().unwrap().min_y();
        assert!(y_min('p') < -100.0);
        assert!(y_min('n') > -60.0);
        let cap = store.get('H').unwrap().bounds().unwrap();
        assert!(cap.max_y() > 680.0 && cap.max_y() < 760.0);
    }

    #[test]
    fn scales_with_the_em() {
        let big = GlyphStore::authored(&FontMetrics::for_em(2000));
        assert_eq!(big.get('A').unwrap().advance, 1340);
        let small = store().get('A').unwrap().bounds().unwrap();
        let large = big.get('A').unwrap().bounds().unwrap();
        assert!((large.width() - 2.0 * small.width()).abs() < 1e-6);
    }

    #[rstest]
    #[case(512)]
    #[case(2048)]
    #[case(16384)]
    fn proportions_do_not_depend_on_the_em(#[case] units_per_em: u16) {
        let reference = store();
        let metrics = FontMetrics::for_em(units_per_em);
        let scaled = GlyphStore::authored(&metrics);
        let em = units_per_em as f64;

        let aspect = |store: &GlyphStore, ch| {
            let bounds = store.get(ch).unwrap().bounds().unwrap();
            bounds.height() / bounds.width()
        };
        for ch in ['H', 'n', '4'] {
            let expected = aspect(&reference, ch);
            assert!(
                (aspect(&scaled, ch) - expected).abs() < expected * 2e-3,
                "{ch:?} at {units_per_em}"
            );
        }

        let bar = |store: &GlyphStore| store.get('|').unwrap().bounds().unwrap();
        assert!((bar(&scaled).height() / em - bar(&reference).height() / 1000.0).abs() < 1e-9);
        assert!(bar(&scaled).max_y() < metrics.ascender as f64);
        assert!(bar(&scaled).min_y() > metrics.descender as f64);
        let cap = scaled.get('H').unwrap().bounds().unwrap();
        assert!((cap.max_y() / em - 0.722).abs() < 0.01, "{}", cap.max_y());
    }

    #[test]
    fn removed_glyph_is_missing() {
        let mut store = store();
        let removed = store.remove('k');
        assert!(removed.is_some());
        assert!(matches!(
            store.outline_set(),
            Err(Error::MissingGlyph {
                style: Style::Regular,
                codepoint: 'k'
            })
        ));
        store.insert('k', removed.unwrap());
        assert!(store.outline_set().is_ok());
    }
}

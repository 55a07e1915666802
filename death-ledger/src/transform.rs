//! Deriving the bold and italic styles from Regular
//!
//! Every transform is a pure function from one [`OutlineSet`] to a new one.
//! Derived contours are checked, and a transform that produces a contour
//! that is too small, has flipped, or crosses itself fails with
//! [`Error::DegenerateOutline`]; nothing is repaired.

use std::collections::BTreeMap;

use kurbo::{Affine, Point, Vec2};

use crate::{
    config::StyleParams,
    error::{Degeneracy, Error},
    geom,
    outline::{CodepointGlyph, Contour, OutlineSet, Winding, FLATTEN_TOLERANCE},
    style::Style,
};

/// Contours smaller than this, in square font units, are degenerate.
const MIN_AREA: f64 = 1.0;

/// The outline set for `style`, derived from `regular`.
pub fn derive(regular: &OutlineSet, style: Style, params: &StyleParams) -> Result<OutlineSet, Error> {
    match style {
        Style::Regular => Ok(regular.clone()),
        Style::Bold => bold(regular, params),
        Style::Italic => italic(regular, params),
        Style::BoldItalic => bold_italic(regular, params),
    }
}

/// Thicken every stroke.
///
/// Each contour is offset by half the stroke delta to the left of its
/// direction of travel, which is outwards for filled contours and into
/// the counter for holes. The glyph then moves right by the same amount so
/// that its left side bearing is unchanged, and the advance grows by
/// `bold_advance_factor`.
pub fn bold(regular: &OutlineSet, params: &StyleParams) -> Result<OutlineSet, Error> {
    embolden(regular, Style::Bold, params)
}

/// Shear every glyph about the baseline by the italic angle.
pub fn italic(regular: &OutlineSet, params: &StyleParams) -> Result<OutlineSet, Error> {
    slant(regular, Style::Italic, params)
}

/// Bold, then italic.
///
/// The order matters: shearing a thickened outline gives different stroke
/// ends from thickening a sheared one.
pub fn bold_italic(regular: &OutlineSet, params: &StyleParams) -> Result<OutlineSet, Error> {
    let bold = embolden(regular, Style::BoldItalic, params)?;
    slant(&bold, Style::BoldItalic, params)
}

fn embolden(set: &OutlineSet, target: Style, params: &StyleParams) -> Result<OutlineSet, Error> {
    let offset = params.stroke_delta(set.metrics()) / 2.0;
    let shift = Vec2::new(offset, 0.0);
    map_glyphs(set, target, |glyph| {
        let contours = glyph
            .contours
            .iter()
            .map(|contour| {
                let polygon = contour.to_polygon(FLATTEN_TOLERANCE);
                let grown: Vec<Point> = geom::offset_polygon(&polygon, offset, params.miter_limit)
                    .into_iter()
                    .map(|pt| pt + shift)
                    .collect();
                Contour::from_polygon(&grown)
            })
            .collect();
        let growth = (glyph.advance as f64 * params.bold_advance_factor).round() as i32;
        CodepointGlyph::new(glyph.advance + growth, contours)
    })
}

fn slant(set: &OutlineSet, target: Style, params: &StyleParams) -> Result<OutlineSet, Error> {
    let skew = Affine::skew(params.italic_slope(), 0.0);
    map_glyphs(set, target, |glyph| {
        let mut slanted = glyph.transformed(skew);
        slanted.advance += params.italic_advance_add;
        slanted
    })
}

/// Apply `f` to every glyph of `set`, checking each derived contour against
/// the contour it came from.
fn map_glyphs(
    set: &OutlineSet,
    target: Style,
    f: impl Fn(&CodepointGlyph) -> CodepointGlyph,
) -> Result<OutlineSet, Error> {
    let mut notdef = None;
    let mut glyphs = BTreeMap::new();
    for (codepoint, glyph) in set.iter() {
        let derived = f(glyph);
        for (source, contour) in glyph.contours.iter().zip(&derived.contours) {
            check_contour(source, contour).map_err(|reason| Error::DegenerateOutline {
                style: target,
                codepoint,
                reason,
            })?;
        }
        match codepoint {
            Some(cp) => {
                glyphs.insert(cp, derived);
            }
            None => notdef = Some(derived),
        }
    }
    log::debug!("derived {} glyphs for {target}", glyphs.len());
    OutlineSet::new(
        target,
        *set.metrics(),
        notdef.unwrap_or_default(),
        glyphs,
    )
}

fn check_contour(source: &Contour, derived: &Contour) -> Result<(), Degeneracy> {
    let polygon = derived.to_polygon(FLATTEN_TOLERANCE);
    if polygon.len() < 3 {
        return Err(Degeneracy::TooFewPoints(polygon.len()));
    }
    let area = geom::signed_area(&polygon);
    if area.abs() < MIN_AREA {
        return Err(Degeneracy::ZeroArea(area.abs()));
    }
    let winding = if area < 0.0 {
        Winding::Clockwise
    } else {
        Winding::CounterClockwise
    };
    if winding != source.winding() {
        return Err(Degeneracy::WindingFlipped);
    }
    if geom::self_intersects(&polygon) {
        return Err(Degeneracy::SelfIntersecting);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{config::FontMetrics, store::GlyphStore};

    fn params() -> StyleParams {
        StyleParams::default()
    }

    fn regular_with(codepoint: char, glyph: CodepointGlyph) -> OutlineSet {
        let mut store = GlyphStore::authored(&FontMetrics::default());
        store.insert(codepoint, glyph);
        store.outline_set().unwrap()
    }

    fn polygon_glyph(advance: i32, points: &[(f64, f64)]) -> CodepointGlyph {
        let points: Vec<_> = points.iter().map(|(x, y)| Point::new(*x, *y)).collect();
        CodepointGlyph::new(advance, vec![Contour::from_polygon(&points)])
    }

    #[test]
    fn regular_is_unchanged() {
        let regular = GlyphStore::authored(&FontMetrics::default())
            .outline_set()
            .unwrap();
        assert_eq!(derive(&regular, Style::Regular, &params()).unwrap(), regular);
    }

    #[test]
    fn derived_sets_keep_coverage() {
        let regular = GlyphStore::authored(&FontMetrics::default())
            .outline_set()
            .unwrap();
        for style in Style::ALL {
            let derived = derive(&regular, style, &params()).unwrap();
            assert_eq!(derived.style(), style);
            assert!(derived.codepoints().eq(regular.codepoints()));
        }
    }

    #[test]
    fn bold_grows_area_within_offset_bounds() {
        let regular = GlyphStore::authored(&FontMetrics::default())
            .outline_set()
            .unwrap();
        let bold = bold(&regular, &params()).unwrap();
        let offset = params().stroke_delta(regular.metrics()) / 2.0;
        for ((cp, before), (_, after)) in regular.iter().zip(bold.iter()) {
            let mut lower = 0.0;
            let mut upper = 0.0;
            let mut source_area = 0.0;
            for contour in &before.contours {
                let polygon = contour.to_polygon(FLATTEN_TOLERANCE);
                let perimeter = geom::perimeter(&polygon);
                source_area += geom::signed_area(&polygon).abs();
                lower += perimeter * offset;
                upper += perimeter * offset
                    + polygon.len() as f64 * offset * offset * params().miter_limit;
            }
            let growth = after.ink_area() - source_area;
            assert!(
                growth >= lower - 1e-6 && growth <= upper + 1e-6,
                "{cp:?}: {growth} not in {lower}..={upper}"
            );
        }
    }

    #[test]
    fn bold_keeps_left_side_bearing() {
        let regular = regular_with(
            'I',
            polygon_glyph(500, &[(100.0, 0.0), (100.0, 700.0), (200.0, 700.0), (200.0, 0.0)]),
        );
        let bold = bold(&regular, &params()).unwrap();
        let glyph = bold.get('I').unwrap();
        assert_eq!(glyph.left_side_bearing(), 100.0);
        assert_eq!(glyph.bounds().unwrap().width(), 160.0);
        assert_eq!(glyph.advance, 520);
    }

    #[test]
    fn triangle_scenario() {
        let regular = regular_with(
            'A',
            polygon_glyph(600, &[(50.0, 0.0), (300.0, 700.0), (550.0, 0.0)]),
        );
        let source = regular.get('A').unwrap();

        let bold = bold(&regular, &params()).unwrap();
        let bold_a = bold.get('A').unwrap();
        assert!((600..=660).contains(&bold_a.advance), "{}", bold_a.advance);
        assert!(bold_a.ink_area() > source.ink_area());

        let italic = italic(&regular, &params()).unwrap();
        let italic_a = italic.get('A').unwrap();
        let top = |glyph: &CodepointGlyph| {
            glyph.contours[0]
                .to_polygon(FLATTEN_TOLERANCE)
                .into_iter()
                .max_by(|a, b| a.y.total_cmp(&b.y))
                .unwrap()
        };
        let before = top(source);
        let after = top(italic_a);
        assert_eq!(after.y, before.y);
        let expected = before.y * params().italic_angle.to_radians().tan();
        assert!((after.x - before.x - expected).abs() < 1e-9);
        assert_eq!(italic_a.advance, 622);
        // shear preserves area
        assert!((italic_a.ink_area() - source.ink_area()).abs() < 1e-6);
    }

    #[test]
    fn bold_italic_is_bold_then_italic() {
        let regular = GlyphStore::authored(&FontMetrics::default())
            .outline_set()
            .unwrap();
        let bold = bold(&regular, &params()).unwrap();
        let bold_italic = bold_italic(&regular, &params()).unwrap();
        let skew = Affine::skew(params().italic_slope(), 0.0);
        for cp in ['A', 'g', '%', '~'] {
            let mut expected = bold.get(cp).unwrap().transformed(skew);
            expected.advance += params().italic_advance_add;
            assert_eq!(bold_italic.get(cp).unwrap(), &expected, "{cp:?}");
        }
        assert_eq!(bold_italic.style(), Style::BoldItalic);
    }

    #[test]
    fn crossing_contour_is_degenerate() {
        let regular = regular_with(
            'Z',
            polygon_glyph(600, &[(0.0, 0.0), (300.0, 100.0), (300.0, 0.0), (0.0, 50.0)]),
        );
        let err = italic(&regular, &params()).unwrap_err();
        assert!(
            matches!(
                &err,
                Error::DegenerateOutline {
                    style: Style::Italic,
                    codepoint: Some('Z'),
                    reason: Degeneracy::SelfIntersecting,
                }
            ),
            "{err}"
        );
    }

    #[test]
    fn sliver_is_degenerate() {
        let regular = regular_with(
            '.',
            polygon_glyph(260, &[(0.0, 0.0), (0.5, 1.0), (1.0, 0.0)]),
        );
        let err = bold_italic(&regular, &StyleParams {
            bold_stroke_delta: 0.0,
            ..params()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            Error::DegenerateOutline {
                style: Style::BoldItalic,
                codepoint: Some('.'),
                reason: Degeneracy::ZeroArea(_),
            }
        ));
    }

    #[test]
    fn narrow_counter_flips_when_emboldened() {
        // a filled square with a counter too narrow to survive the offset
        let outer = [(0.0, 0.0), (0.0, 300.0), (300.0, 300.0), (300.0, 0.0)];
        let hole = [(100.0, 100.0), (110.0, 100.0), (110.0, 200.0), (100.0, 200.0)];
        let contours = [&outer[..], &hole[..]]
            .iter()
            .map(|pts| {
                let pts: Vec<_> = pts.iter().map(|(x, y)| Point::new(*x, *y)).collect();
                Contour::from_polygon(&pts)
            })
            .collect();
        let regular = regular_with('O', CodepointGlyph::new(400, contours));
        let err = bold(&regular, &params()).unwrap_err();
        assert!(matches!(
            err,
            Error::DegenerateOutline {
                style: Style::Bold,
                codepoint: Some('O'),
                reason: Degeneracy::WindingFlipped,
            }
        ));
    }
}

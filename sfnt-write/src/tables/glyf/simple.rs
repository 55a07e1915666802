//! Simple glyphs (glyphs which do not contain components)

use kurbo::{BezPath, PathEl, Point};

use crate::{
    util::WrappingGet,
    validate::{Validate, ValidationCtx},
    FontWrite, OtRound, TableWriter,
};

use super::Bbox;

bitflags::bitflags! {
    /// Flags used in [`SimpleGlyph`]
    #[derive(Default)]
    pub struct SimpleGlyphFlags: u8 {
        /// Bit 0: If set, the point is on the curve; otherwise, it is off
        /// the curve.
        const ON_CURVE_POINT = 0x01;
        /// Bit 1: If set, the corresponding x-coordinate is 1 byte long,
        /// and the sign is determined by the
        /// X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR flag.
        const X_SHORT_VECTOR = 0x02;
        /// Bit 2: If set, the corresponding y-coordinate is 1 byte long,
        /// and the sign is determined by the
        /// Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR flag.
        const Y_SHORT_VECTOR = 0x04;
        /// Bit 3: If set, the next byte (read as unsigned) specifies the
        /// number of additional times this flag byte is to be repeated in
        /// the logical flags array.
        const REPEAT_FLAG = 0x08;
        /// Bit 4: This flag has two meanings, depending on how the
        /// X_SHORT_VECTOR flag is set. If X_SHORT_VECTOR is set, this bit
        /// describes the sign of the value, with 1 equalling positive and
        /// 0 negative. If X_SHORT_VECTOR is not set and this bit is set,
        /// then the current x-coordinate is the same as the previous
        /// x-coordinate.
        const X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR = 0x10;
        /// Bit 5: As bit 4, for the y-coordinate.
        const Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR = 0x20;
    }
}

/// A point in a glyph contour, with integer coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CurvePoint {
    pub x: i16,
    pub y: i16,
    pub on_curve: bool,
}

/// A simple (without components) glyph
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimpleGlyph {
    pub bbox: Bbox,
    pub contours: Vec<Contour>,
}

/// A single contour, comprising only line and quadratic bezier segments
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Contour(Vec<CurvePoint>);

/// An error if an input curve is malformed
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum MalformedPath {
    HasCubic,
    MissingMove,
    /// A coordinate does not fit in an i16 after rounding.
    CoordinateOverflow(f64),
}

impl CurvePoint {
    pub fn new(x: i16, y: i16, on_curve: bool) -> Self {
        CurvePoint { x, y, on_curve }
    }
}

impl SimpleGlyph {
    /// Attempt to create a simple glyph from a kurbo `BezPath`
    ///
    /// The path may contain only line and quadratic bezier segments. The caller
    /// is responsible for converting any cubic segments to quadratics before
    /// calling.
    ///
    /// Points are rounded to integers. On-curve points that are the midpoint
    /// of their off-curve neighbours are dropped, as are on-curve points that
    /// repeat the previous point once rounded.
    pub fn from_bezpath(path: &BezPath) -> Result<Self, MalformedPath> {
        let mut contours = Vec::new();
        let mut current: Option<Vec<ContourPoint>> = None;
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(pt) => {
                    contours.extend(current.take());
                    current = Some(vec![ContourPoint::on_curve(pt)]);
                }
                PathEl::LineTo(pt) => current
                    .as_mut()
                    .ok_or(MalformedPath::MissingMove)?
                    .push(ContourPoint::on_curve(pt)),
                PathEl::QuadTo(p0, p1) => {
                    let contour = current.as_mut().ok_or(MalformedPath::MissingMove)?;
                    contour.push(ContourPoint::off_curve(p0));
                    contour.push(ContourPoint::on_curve(p1));
                }
                PathEl::CurveTo(..) => return Err(MalformedPath::HasCubic),
                PathEl::ClosePath => {
                    let contour = current.as_mut().ok_or(MalformedPath::MissingMove)?;
                    // remove last point in closed path if has same coords as the move point
                    // matches FontTools handling @ https://github.com/fonttools/fonttools/blob/3b9a73ff8379ab49d3ce35aaaaf04b3a7d9d1655/Lib/fontTools/pens/pointPen.py#L321-L323
                    if contour.len() > 1 && contour.last() == contour.first() {
                        contour.pop();
                    }
                }
            }
        }
        contours.extend(current);

        let contours = contours
            .iter()
            .map(|points| build_contour(points))
            .filter(|contour| !matches!(contour, Ok(c) if c.is_empty()))
            .collect::<Result<Vec<_>, _>>()?;
        let mut glyph = SimpleGlyph {
            bbox: Bbox::default(),
            contours,
        };
        glyph.recompute_bounding_box();
        Ok(glyph)
    }

    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    /// The total number of points across all contours.
    pub fn num_points(&self) -> usize {
        self.contours.iter().map(Contour::len).sum()
    }

    /// Compute the flags and deltas for this glyph's points.
    ///
    /// This does not do the final binary encoding, and it also does not handle
    /// repeating flags.
    //
    // this is adapted from simon's implementation at
    // https://github.com/simoncozens/rust-font-tools/blob/105436d3a617ddbebd25f790b041ff506bd90d44/fonttools-rs/src/tables/glyf/glyph.rs#L268
    fn compute_point_deltas(
        &self,
    ) -> impl Iterator<Item = (SimpleGlyphFlags, CoordDelta, CoordDelta)> + '_ {
        // reused for x & y by passing in the flags
        fn flag_and_delta(
            value: i16,
            short_flag: SimpleGlyphFlags,
            same_or_pos: SimpleGlyphFlags,
        ) -> (SimpleGlyphFlags, CoordDelta) {
            const SHORT_MAX: i16 = u8::MAX as i16;
            const SHORT_MIN: i16 = -SHORT_MAX;
            match value {
                0 => (same_or_pos, CoordDelta::Skip),
                SHORT_MIN..=-1 => (short_flag, CoordDelta::Short(value.unsigned_abs() as u8)),
                1..=SHORT_MAX => (short_flag | same_or_pos, CoordDelta::Short(value as _)),
                _other => (SimpleGlyphFlags::empty(), CoordDelta::Long(value)),
            }
        }

        let (mut last_x, mut last_y) = (0i16, 0i16);
        let mut iter = self.contours.iter().flat_map(|c| c.iter());
        std::iter::from_fn(move || {
            let point = iter.next()?;
            let mut flag = SimpleGlyphFlags::empty();
            let d_x = point.x.wrapping_sub(last_x);
            let d_y = point.y.wrapping_sub(last_y);
            last_x = point.x;
            last_y = point.y;

            if point.on_curve {
                flag |= SimpleGlyphFlags::ON_CURVE_POINT;
            }
            let (x_flag, x_data) = flag_and_delta(
                d_x,
                SimpleGlyphFlags::X_SHORT_VECTOR,
                SimpleGlyphFlags::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR,
            );
            let (y_flag, y_data) = flag_and_delta(
                d_y,
                SimpleGlyphFlags::Y_SHORT_VECTOR,
                SimpleGlyphFlags::Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR,
            );

            flag |= x_flag | y_flag;
            Some((flag, x_data, y_data))
        })
    }

    /// Recompute the Glyph's bounding box based on the current contours
    pub fn recompute_bounding_box(&mut self) {
        let mut points = self
            .contours
            .iter()
            .flat_map(|c| c.iter())
            .map(|p| (p.x, p.y));

        if let Some((mut x_min, mut y_min)) = points.next() {
            let mut x_max = x_min;
            let mut y_max = y_min;
            for (x, y) in points {
                x_min = x_min.min(x);
                y_min = y_min.min(y);
                x_max = x_max.max(x);
                y_max = y_max.max(y);
            }
            self.bbox = Bbox {
                x_min,
                y_min,
                x_max,
                y_max,
            };
        }
    }
}

impl Contour {
    /// The total number of points in this contour
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` if this contour is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CurvePoint> {
        self.0.iter()
    }

    pub fn points(&self) -> &[CurvePoint] {
        &self.0
    }
}

impl From<Vec<CurvePoint>> for Contour {
    fn from(points: Vec<CurvePoint>) -> Self {
        Self(points)
    }
}

/// A little helper for managing how we're representing a given delta
#[derive(Clone, Copy, Debug)]
enum CoordDelta {
    // this is a repeat (set in the flag) and so we write nothing
    Skip,
    Short(u8),
    Long(i16),
}

impl FontWrite for CoordDelta {
    fn write_into(&self, writer: &mut TableWriter) {
        match self {
            CoordDelta::Skip => (),
            CoordDelta::Short(val) => val.write_into(writer),
            CoordDelta::Long(val) => val.write_into(writer),
        }
    }
}

impl FontWrite for SimpleGlyph {
    fn write_into(&self, writer: &mut TableWriter) {
        let n_contours = self.contours.len() as i16;
        if n_contours == 0 {
            // we don't bother writing empty glyphs
            return;
        }
        n_contours.write_into(writer);
        self.bbox.write_into(writer);
        // now write end points of contours:
        let mut cur = 0;
        for contour in &self.contours {
            cur += contour.len();
            (cur as u16 - 1).write_into(writer);
        }
        // instructionLength; these glyphs are unhinted
        0u16.write_into(writer);

        let deltas = self.compute_point_deltas().collect::<Vec<_>>();
        RepeatableFlag::iter_from_flags(deltas.iter().map(|(flag, _, _)| *flag))
            .for_each(|flag| flag.write_into(writer));
        deltas.iter().for_each(|(_, x, _)| x.write_into(writer));
        deltas.iter().for_each(|(_, _, y)| y.write_into(writer));
        writer.pad_to_2byte_aligned();
    }
}

impl Validate for SimpleGlyph {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("SimpleGlyph", |ctx| {
            ctx.in_field("contours", |ctx| {
                if self.contours.len() > i16::MAX as usize {
                    ctx.report(format!("too many contours ({})", self.contours.len()));
                }
                let num_points = self.num_points();
                if num_points > u16::MAX as usize {
                    ctx.report(format!("too many points ({num_points})"));
                }
            })
        })
    }
}

/// A little helper for writing flags that may have a 'repeat' byte
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct RepeatableFlag {
    flag: SimpleGlyphFlags,
    repeat: u8,
}

impl FontWrite for RepeatableFlag {
    fn write_into(&self, writer: &mut TableWriter) {
        debug_assert_eq!(
            self.flag.contains(SimpleGlyphFlags::REPEAT_FLAG),
            self.repeat > 0
        );

        self.flag.bits().write_into(writer);
        if self.flag.contains(SimpleGlyphFlags::REPEAT_FLAG) {
            self.repeat.write_into(writer);
        }
    }
}

impl RepeatableFlag {
    /// given an iterator over raw flags, return an iterator over flags + repeat values
    fn iter_from_flags(
        flags: impl IntoIterator<Item = SimpleGlyphFlags>,
    ) -> impl Iterator<Item = RepeatableFlag> {
        let mut iter = flags.into_iter();
        let mut prev = None;
        // A flag that repeats exactly once costs the same two bytes either
        // way; like fontmake, we write it twice rather than with a repeat
        // count of 1.
        let mut decompose_single_repeat = None;

        std::iter::from_fn(move || loop {
            if let Some(repeat) = decompose_single_repeat.take() {
                return Some(repeat);
            }

            match (iter.next(), prev.take()) {
                (None, Some(RepeatableFlag { flag, repeat: 1 })) => {
                    let flag = flag & !SimpleGlyphFlags::REPEAT_FLAG;
                    decompose_single_repeat = Some(RepeatableFlag { flag, repeat: 0 });
                    return decompose_single_repeat;
                }
                (None, prev) => return prev,
                (Some(flag), None) => prev = Some(RepeatableFlag { flag, repeat: 0 }),
                (Some(flag), Some(mut last)) => {
                    if (last.flag & !SimpleGlyphFlags::REPEAT_FLAG) == flag && last.repeat < u8::MAX
                    {
                        last.repeat += 1;
                        last.flag |= SimpleGlyphFlags::REPEAT_FLAG;
                        prev = Some(last);
                    } else {
                        // split a single repeat into two non-repeat flags
                        if last.repeat == 1 {
                            last.flag &= !SimpleGlyphFlags::REPEAT_FLAG;
                            last.repeat = 0;
                            // stash the extra flag, which we'll use at the top
                            // of the next pass of the loop
                            decompose_single_repeat = Some(last);
                        }
                        prev = Some(RepeatableFlag { flag, repeat: 0 });
                        return Some(last);
                    }
                }
            }
        })
    }
}

/// Point with an associated on-curve flag, before rounding.
#[derive(Clone, Copy, Debug, PartialEq)]
struct ContourPoint {
    point: Point,
    on_curve: bool,
}

impl ContourPoint {
    fn on_curve(point: Point) -> Self {
        Self {
            point,
            on_curve: true,
        }
    }

    fn off_curve(point: Point) -> Self {
        Self {
            point,
            on_curve: false,
        }
    }

    fn to_curve_point(self) -> Result<CurvePoint, MalformedPath> {
        let round = |v: f64| -> Result<i16, MalformedPath> {
            let rounded: f64 = v.ot_round();
            if (i16::MIN as f64..=i16::MAX as f64).contains(&rounded) {
                Ok(rounded as i16)
            } else {
                Err(MalformedPath::CoordinateOverflow(v))
            }
        };
        Ok(CurvePoint::new(
            round(self.point.x)?,
            round(self.point.y)?,
            self.on_curve,
        ))
    }
}

/// Round a contour, dropping implied and repeated on-curve points.
fn build_contour(points: &[ContourPoint]) -> Result<Contour, MalformedPath> {
    let mut out: Vec<CurvePoint> = Vec::with_capacity(points.len());
    for (idx, point) in points.iter().enumerate() {
        if is_implicit_on_curve(points, idx) {
            continue;
        }
        let point = point.to_curve_point()?;
        if point.on_curve && out.last() == Some(&point) {
            continue;
        }
        out.push(point);
    }
    // the contour is closed, so the last point also precedes the first
    while out.len() > 1 && out.first() == out.last() && out[0].on_curve {
        out.pop();
    }
    Ok(Contour(out))
}

/// True if p1 is the midpoint of p0 and p2.
///
/// We check both before and after rounding float coordinates to integer to avoid
/// false negatives due to rounding.
#[inline]
fn is_mid_point(p0: Point, p1: Point, p2: Point) -> bool {
    let mid = p0.midpoint(p2);
    let rounded = |p: Point| -> Point { p.ot_round() };
    let (r0, r1, r2) = (rounded(p0), rounded(p1), rounded(p2));
    ((mid.x - p1.x).abs() < 1e-9 && (mid.y - p1.y).abs() < 1e-9)
        || (r0.x + r2.x == r1.x * 2.0 && r0.y + r2.y == r1.y * 2.0)
}

fn is_implicit_on_curve(points: &[ContourPoint], idx: usize) -> bool {
    let p1 = &points[idx];
    if !p1.on_curve || points.len() < 3 {
        return false;
    }
    let p0 = points.wrapping_prev(idx);
    let p2 = points.wrapping_next(idx);
    if p0.on_curve || p2.on_curve {
        return false;
    }
    // drop p1 if halfway between p0 and p2
    is_mid_point(p0.point, p1.point, p2.point)
}

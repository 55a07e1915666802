//! Rounding whose behavior is defined by the
//! [font specification](https://learn.microsoft.com/en-us/typography/opentype/spec/otff).

/// Floating-point rounding per the OpenType spec: halves round up,
/// toward positive infinity, so `-0.5` becomes `0`.
pub trait OtRound<U, T = Self> {
    fn ot_round(self) -> U;
}

impl OtRound<i16> for f64 {
    #[inline]
    fn ot_round(self) -> i16 {
        (self + 0.5).floor() as i16
    }
}

impl OtRound<u16> for f64 {
    #[inline]
    fn ot_round(self) -> u16 {
        (self + 0.5).floor() as u16
    }
}

impl OtRound<i32> for f64 {
    #[inline]
    fn ot_round(self) -> i32 {
        (self + 0.5).floor() as i32
    }
}

impl OtRound<f64> for f64 {
    #[inline]
    fn ot_round(self) -> f64 {
        (self + 0.5).floor()
    }
}

impl OtRound<(i32, i32)> for kurbo::Point {
    #[inline]
    fn ot_round(self) -> (i32, i32) {
        (self.x.ot_round(), self.y.ot_round())
    }
}

impl OtRound<kurbo::Point> for kurbo::Point {
    #[inline]
    fn ot_round(self) -> kurbo::Point {
        kurbo::Point::new(self.x.ot_round(), self.y.ot_round())
    }
}

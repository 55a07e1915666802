//! fixed-point numerical types

/// 32-bit signed fixed point number with 16 bits of fraction.
///
/// Used for the italic angle of the 'post' table.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Fixed(i32);

impl Fixed {
    /// Minimum value.
    pub const MIN: Self = Self(i32::MIN);

    /// Maximum value.
    pub const MAX: Self = Self(i32::MAX);

    /// Zero.
    pub const ZERO: Self = Self(0);

    const ONE: i32 = 1 << 16;
    const INT_MASK: i32 = !0 << 16;

    /// Creates a fixed point value from an f64.
    ///
    /// This operation is lossy; the float will be rounded to the nearest
    /// representable value, saturating at the ends of the range.
    pub fn from_f64(x: f64) -> Self {
        Self((x * Self::ONE as f64).round() as i32)
    }

    /// Returns the value as an f64.
    ///
    /// This operation is lossless.
    pub fn to_f64(self) -> f64 {
        let int = ((self.0 & Self::INT_MASK) >> 16) as f64;
        let fract = (self.0 & !Self::INT_MASK) as f64 / Self::ONE as f64;
        int + fract
    }

    /// Create from the raw 16.16 bits.
    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    /// The raw 16.16 bits.
    pub const fn to_bits(self) -> i32 {
        self.0
    }

    pub const fn to_be_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

impl std::fmt::Display for Fixed {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.to_f64().fmt(f)
    }
}

impl std::fmt::Debug for Fixed {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.to_f64().fmt(f)
    }
}

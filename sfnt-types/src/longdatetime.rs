//! a datetime type

/// Seconds between 1904-01-01T00:00:00Z and the unix epoch.
const MAC_EPOCH_TO_UNIX_EPOCH: i64 = 2_082_844_800;

/// A simple datetime type.
///
/// This represented as a number of seconds since 12:00 midnight, January 1, 1904, UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LongDateTime(i64);

impl LongDateTime {
    /// Create with a number of seconds relative to 1904-01-01 00:00.
    pub const fn new(secs: i64) -> Self {
        Self(secs)
    }

    /// Create from a number of seconds since the unix epoch.
    ///
    /// Returns `None` if the result does not fit in an `i64`.
    pub const fn from_unix_secs(secs: i64) -> Option<Self> {
        match secs.checked_add(MAC_EPOCH_TO_UNIX_EPOCH) {
            Some(secs) => Some(Self(secs)),
            None => None,
        }
    }

    /// The number of seconds since 00:00 1904-01-01, UTC.
    pub const fn as_secs(&self) -> i64 {
        self.0
    }

    pub const fn to_be_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_epoch_offset() {
        assert_eq!(
            LongDateTime::from_unix_secs(0),
            Some(LongDateTime::new(2_082_844_800))
        );
        // 2024-01-01T00:00:00Z
        assert_eq!(
            LongDateTime::from_unix_secs(1_704_067_200).map(|d| d.as_secs()),
            Some(3_786_912_000)
        );
    }

    #[test]
    fn unix_secs_overflow() {
        assert_eq!(LongDateTime::from_unix_secs(i64::MAX), None);
        assert_eq!(
            LongDateTime::from_unix_secs(i64::MIN),
            Some(LongDateTime::new(i64::MIN + 2_082_844_800))
        );
    }
}

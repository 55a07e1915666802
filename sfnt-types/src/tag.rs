use std::{
    fmt::{Debug, Display, Formatter},
    str::FromStr,
};

/// A four-byte table or vendor identifier.
///
/// [Per the OpenType spec][spec], a tag is a 4-byte array where each byte is in the
/// printable ASCII range `(0x20..=0x7E)`, and trailing positions are padded
/// with spaces.
///
/// Tags order by their raw bytes, which is also the order required for the
/// records of a table directory.
///
/// [spec]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#data-types
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Tag([u8; 4]);

impl Tag {
    /// Construct a `Tag` from raw bytes, without validation.
    pub const fn new(src: &[u8; 4]) -> Tag {
        Tag(*src)
    }

    /// Attempt to create a `Tag` from between one and four printable ascii bytes.
    ///
    /// Inputs shorter than four bytes are padded with spaces. A tag may not
    /// begin with a space, and may not contain a non-space after a space.
    pub const fn new_checked(src: &[u8]) -> Result<Self, InvalidTag> {
        if src.is_empty() || src.len() > 4 {
            return Err(InvalidTag::InvalidLength(src.len()));
        }
        let mut raw = [0x20; 4];
        let mut i = 0;
        let mut seen_space = false;
        while i < src.len() {
            let byte = match src[i] {
                byte @ 0x20 if i == 0 => return Err(InvalidTag::InvalidByte { pos: i, byte }),
                byte @ 0..=0x1F | byte @ 0x7f.. => {
                    return Err(InvalidTag::InvalidByte { pos: i, byte })
                }
                0x21..=0x7e if seen_space => return Err(InvalidTag::ByteAfterSpace { pos: i }),
                byte => byte,
            };
            seen_space |= byte == 0x20;
            raw[i] = byte;
            i += 1;
        }
        Ok(Tag(raw))
    }

    /// Create a tag from raw big-endian bytes, as found in a table record.
    pub const fn from_be_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Return the memory representation of this tag.
    pub const fn to_be_bytes(self) -> [u8; 4] {
        self.0
    }
}

impl Default for Tag {
    /// Four spaces, the tag used for an unset vendor id.
    fn default() -> Self {
        Tag([0x20; 4])
    }
}

/// An error representing an invalid tag.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidTag {
    /// The tag was not between 1 and 4 bytes in length.
    InvalidLength(usize),
    /// The tag contained a byte outside the printable ASCII range.
    InvalidByte { pos: usize, byte: u8 },
    /// The tag contained one or more non-space characters after a space.
    ByteAfterSpace { pos: usize },
}

impl FromStr for Tag {
    type Err = InvalidTag;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Tag::new_checked(src.as_bytes())
    }
}

impl std::error::Error for InvalidTag {}

impl PartialEq<&str> for Tag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for byte in self.0 {
            if (0x20..=0x7E).contains(&byte) {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "{{0x{byte:02X}}}")?;
            }
        }
        Ok(())
    }
}

impl Display for InvalidTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidTag::InvalidByte { pos, byte } => {
                write!(f, "Invalid byte 0x{byte:X} at index {pos}")
            }
            InvalidTag::InvalidLength(len) => write!(f, "Invalid length ({len})"),
            InvalidTag::ByteAfterSpace { .. } => write!(f, "Non-space character after first space"),
        }
    }
}

impl Debug for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tag({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_short_tags() {
        assert_eq!(Tag::new_checked(b"cvt").unwrap(), Tag::new(b"cvt "));
        assert_eq!("NONE".parse::<Tag>().unwrap(), Tag::new(b"NONE"));
    }

    #[test]
    fn rejects_bad_tags() {
        assert_eq!(Tag::new_checked(b""), Err(InvalidTag::InvalidLength(0)));
        assert_eq!(Tag::new_checked(b"hello"), Err(InvalidTag::InvalidLength(5)));
        assert_eq!(
            Tag::new_checked(b" abc"),
            Err(InvalidTag::InvalidByte { pos: 0, byte: 0x20 })
        );
        assert_eq!(
            Tag::new_checked(b"a bc"),
            Err(InvalidTag::ByteAfterSpace { pos: 2 })
        );
    }

    #[test]
    fn directory_order_is_byte_order() {
        // uppercase sorts before lowercase, which puts 'OS/2' first
        let mut tags = [Tag::new(b"head"), Tag::new(b"OS/2"), Tag::new(b"cmap")];
        tags.sort();
        assert_eq!(tags, [Tag::new(b"OS/2"), Tag::new(b"cmap"), Tag::new(b"head")]);
    }

    #[test]
    fn display() {
        assert_eq!(Tag::new(b"glyf").to_string(), "glyf");
        assert_eq!(Tag::new(&[b'a', 0, b'b', b'c']).to_string(), "a{0x00}bc");
    }
}

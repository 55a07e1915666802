use crate::validate::{Validate, ValidationReport};

/// A type that that can be written out as part of a font file.
///
/// Implementations write their fields as big-endian bytes, in the order
/// they appear in the binary format.
pub trait FontWrite {
    /// Write our data into this [TableWriter].
    fn write_into(&self, writer: &mut TableWriter);
}

/// A buffer that accumulates the bytes of a serialized table.
#[derive(Debug, Default)]
pub struct TableWriter {
    data: Vec<u8>,
}

/// Attempt to serialize a table.
///
/// If the table is malformed, this will return an Err([`ValidationReport`]),
/// otherwise it will return the bytes encoding the table.
pub fn dump_table<T: FontWrite + Validate>(table: &T) -> Result<Vec<u8>, ValidationReport> {
    table.validate()?;
    let mut writer = TableWriter::default();
    table.write_into(&mut writer);
    Ok(writer.into_data())
}

impl TableWriter {
    /// Write raw bytes into this table.
    ///
    /// The caller is responsible for ensuring bytes are in big-endian order.
    #[inline]
    pub fn write_slice(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes)
    }

    /// The number of bytes written so far.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` if nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Add a zero byte if needed so that the next write is 2-byte aligned.
    ///
    /// Glyph records in the 'glyf' table are padded this way so that the
    /// short 'loca' format can address them.
    pub fn pad_to_2byte_aligned(&mut self) {
        if self.data.len() % 2 != 0 {
            self.data.push(0);
        }
    }

    /// Consume the writer, returning the written bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

macro_rules! write_be_bytes {
    ($ty:ty) => {
        impl FontWrite for $ty {
            #[inline]
            fn write_into(&self, writer: &mut TableWriter) {
                writer.write_slice(&self.to_be_bytes())
            }
        }
    };
}

write_be_bytes!(u8);
write_be_bytes!(i8);
write_be_bytes!(u16);
write_be_bytes!(i16);
write_be_bytes!(u32);
write_be_bytes!(i32);
write_be_bytes!(i64);
write_be_bytes!(sfnt_types::Fixed);
write_be_bytes!(sfnt_types::LongDateTime);
write_be_bytes!(sfnt_types::Tag);
write_be_bytes!(sfnt_types::Version16Dot16);
write_be_bytes!(sfnt_types::GlyphId);

impl<T: FontWrite> FontWrite for [T] {
    fn write_into(&self, writer: &mut TableWriter) {
        self.iter().for_each(|item| item.write_into(writer))
    }
}

impl<T: FontWrite> FontWrite for Vec<T> {
    fn write_into(&self, writer: &mut TableWriter) {
        self.as_slice().write_into(writer)
    }
}

impl<T: FontWrite, const N: usize> FontWrite for [T; N] {
    fn write_into(&self, writer: &mut TableWriter) {
        self.as_slice().write_into(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sfnt_types::{Fixed, Tag};

    #[test]
    fn big_endian_scalars() {
        let mut writer = TableWriter::default();
        0x0102u16.write_into(&mut writer);
        (-2i16).write_into(&mut writer);
        Tag::new(b"glyf").write_into(&mut writer);
        Fixed::from_f64(1.5).write_into(&mut writer);
        assert_eq!(
            writer.into_data(),
            [1, 2, 0xFF, 0xFE, b'g', b'l', b'y', b'f', 0, 1, 0x80, 0]
        );
    }

    #[test]
    fn pad_to_even() {
        let mut writer = TableWriter::default();
        7u8.write_into(&mut writer);
        writer.pad_to_2byte_aligned();
        assert_eq!(writer.len(), 2);
        writer.pad_to_2byte_aligned();
        assert_eq!(writer.len(), 2);
    }
}

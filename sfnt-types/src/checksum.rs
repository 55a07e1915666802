//! Table and whole-file checksums
//!
//! See the [table directory][spec] section of the OpenType spec.
//!
//! [spec]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#calculating-checksums

/// The value the checksum of a complete font file must sum to.
///
/// The 'head' table's `checkSumAdjustment` is chosen so that the whole-file
/// checksum equals this constant.
pub const CHECKSUM_MAGIC: u32 = 0xB1B0AFBA;

/// Compute the checksum of some table data.
///
/// This is the wrapping sum of the data read as big-endian u32s, with the
/// final partial word zero-padded.
pub fn compute_checksum(data: &[u8]) -> u32 {
    let mut chunks = data.chunks_exact(4);
    let mut sum = chunks
        .by_ref()
        .map(|chunk| u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .fold(0u32, u32::wrapping_add);
    let rem = chunks.remainder();
    if !rem.is_empty() {
        let mut last = [0u8; 4];
        last[..rem.len()].copy_from_slice(rem);
        sum = sum.wrapping_add(u32::from_be_bytes(last));
    }
    sum
}

/// The `checkSumAdjustment` for a font whose checksum (computed with the
/// adjustment field set to zero) is `file_checksum`.
pub fn checksum_adjustment(file_checksum: u32) -> u32 {
    CHECKSUM_MAGIC.wrapping_sub(file_checksum)
}

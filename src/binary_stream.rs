use crate::error::Error;
use crate::Result;

/// Decode a little-endian unsigned field of up to four bytes.
///
/// Each byte is shifted by eight times its index within the field and
/// the results are summed, so `[0x36, 0x00, 0x00, 0x00]` decodes to 54.
/// An empty field decodes to 0.
pub fn read_unsigned_le(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .take(4)
        .enumerate()
        .map(|(index, &byte)| u32::from(byte) << (index * 8))
        .sum()
}

/// Bounds-checked reader for fixed-position header fields
pub struct FieldReader<'a> {
    /// the complete buffer the fields are read from
    buffer: &'a [u8],
}

impl<'a> FieldReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer }
    }

    /// fails with `TruncatedHeader` unless `length` bytes exist at `offset`
    pub fn require(&self, offset: usize, length: usize) -> Result<()> {
        let needed = offset.checked_add(length).unwrap_or(usize::MAX);
        if needed > self.buffer.len() {
            return Err(Error::TruncatedHeader {
                needed,
                actual: self.buffer.len(),
            });
        }
        Ok(())
    }

    pub fn field(&self, offset: usize, length: usize) -> Result<&'a [u8]> {
        self.require(offset, length)?;
        Ok(&self.buffer[offset..offset + length])
    }

    pub fn u16_at(&self, offset: usize) -> Result<u16> {
        Ok(read_unsigned_le(self.field(offset, 2)?) as u16)
    }

    pub fn u32_at(&self, offset: usize) -> Result<u32> {
        Ok(read_unsigned_le(self.field(offset, 4)?))
    }

    /// two's complement reinterpretation of the unsigned field
    pub fn i32_at(&self, offset: usize) -> Result<i32> {
        Ok(self.u32_at(offset)? as i32)
    }
}
